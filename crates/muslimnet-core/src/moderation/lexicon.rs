//! Forbidden-word lexical filter.
//!
//! The word list is configuration: it is loaded once at startup and handed to
//! the filter, so tests can run against fixture lists.

use std::path::Path;

use regex::RegexSet;
use serde::{Deserialize, Serialize};

use super::ModerationError;

/// Words compiled into the binary, used when no list file is configured.
const BUILTIN_WORDS: &[&str] = &[
    "amına koyayım",
    "orospu",
    "siktir",
    "sikerim",
    "yarrak",
    "pezevenk",
    "kahpe",
    "piç",
    "fuck",
    "motherfucker",
];

/// Outcome of a lexical check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LexicalMatch {
    /// Whether any forbidden word occurred.
    pub found: bool,
    /// Matched words in list order, each listed once.
    pub words: Vec<String>,
}

/// A normalized list of forbidden words and phrases.
///
/// Entries are compiled into one `RegexSet`, so a check is a single pass over
/// the content however long the list is.
#[derive(Debug, Clone)]
pub struct ForbiddenWords {
    words: Vec<String>,
    matcher: RegexSet,
}

impl ForbiddenWords {
    /// Creates a list from arbitrary entries.
    ///
    /// Entries are trimmed and lower-cased; blanks and duplicates are dropped.
    pub fn new<I, S>(words: I) -> Result<Self, ModerationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut normalized: Vec<String> = Vec::new();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() && !normalized.contains(&word) {
                normalized.push(word);
            }
        }

        let matcher = RegexSet::new(normalized.iter().map(|word| word_pattern(word)))
            .map_err(ModerationError::WordListPattern)?;

        Ok(Self {
            words: normalized,
            matcher,
        })
    }

    /// An empty list that never matches.
    pub fn empty() -> Self {
        Self {
            words: Vec::new(),
            matcher: RegexSet::empty(),
        }
    }

    /// The default list shipped with the application.
    pub fn builtin() -> Self {
        Self::new(BUILTIN_WORDS.iter().copied()).expect("builtin forbidden words are valid")
    }

    /// Parses a list from text: one entry per line, `#` starts a comment line.
    pub fn parse(text: &str) -> Result<Self, ModerationError> {
        Self::new(
            text.lines()
                .map(str::trim)
                .filter(|line| !line.starts_with('#')),
        )
    }

    /// Loads a list from a file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ModerationError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ModerationError::WordList {
            path: path.to_path_buf(),
            source,
        })?;
        let list = Self::parse(&text)?;
        tracing::info!(count = list.len(), path = ?path, "Loaded forbidden-word list");
        Ok(list)
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Returns true if the list has no entries.
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Checks content against the list.
    ///
    /// Matching is case-insensitive. An entry matches where it starts at a
    /// word boundary, so inflected forms ("orospular") match but entries
    /// buried inside unrelated words do not.
    pub fn contains_forbidden_words(&self, content: &str) -> LexicalMatch {
        if content.is_empty() || self.words.is_empty() {
            return LexicalMatch::default();
        }

        let lowered = content.to_lowercase();
        // SetMatches iterates in pattern order, which is list order.
        let words: Vec<String> = self
            .matcher
            .matches(&lowered)
            .into_iter()
            .map(|idx| self.words[idx].clone())
            .collect();

        LexicalMatch {
            found: !words.is_empty(),
            words,
        }
    }
}

impl Default for ForbiddenWords {
    fn default() -> Self {
        Self::empty()
    }
}

/// Anchors an entry at a word start; trailing text may continue the word.
fn word_pattern(word: &str) -> String {
    let escaped = regex::escape(word);
    match word.chars().next() {
        Some(first) if first.is_alphanumeric() || first == '_' => format!(r"\b{}", escaped),
        _ => escaped,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn fixture() -> ForbiddenWords {
        ForbiddenWords::new(["kötüsöz", "Çirkin Laf", "badword"]).unwrap()
    }

    #[test]
    fn empty_content_matches_nothing() {
        let result = fixture().contains_forbidden_words("");
        assert!(!result.found);
        assert!(result.words.is_empty());
    }

    #[test]
    fn matches_case_insensitively() {
        let result = fixture().contains_forbidden_words("This is a BADWORD here");
        assert!(result.found);
        assert_eq!(result.words, vec!["badword".to_string()]);
    }

    #[test]
    fn matches_turkish_phrase_with_suffix() {
        let result = fixture().contains_forbidden_words("bu çirkin laflar yakışmıyor");
        assert!(result.found);
        assert_eq!(result.words, vec!["çirkin laf".to_string()]);
    }

    #[test]
    fn does_not_match_inside_other_words() {
        let result = fixture().contains_forbidden_words("notabadword at all");
        assert!(!result.found);
    }

    #[test]
    fn matches_phrase_overlapping_an_unanchored_occurrence() {
        // The first "ab ab" starts inside "xab"; the one at byte 4 is a word start.
        let list = ForbiddenWords::new(["ab ab"]).unwrap();
        let result = list.contains_forbidden_words("xab ab ab");
        assert!(result.found);
        assert_eq!(result.words, vec!["ab ab".to_string()]);
    }

    #[test]
    fn entries_starting_with_punctuation_match_anywhere() {
        let list = ForbiddenWords::new(["#yasak"]).unwrap();
        assert!(list.contains_forbidden_words("etiket:#yasak").found);
    }

    #[test]
    fn regex_metacharacters_are_literal() {
        let list = ForbiddenWords::new(["a.b"]).unwrap();
        assert!(list.contains_forbidden_words("şu a.b yazısı").found);
        assert!(!list.contains_forbidden_words("şu axb yazısı").found);
    }

    #[test]
    fn reports_each_word_once_in_list_order() {
        let result = fixture().contains_forbidden_words("badword kötüsöz badword");
        assert_eq!(
            result.words,
            vec!["kötüsöz".to_string(), "badword".to_string()]
        );
    }

    #[test]
    fn clean_content_is_not_found() {
        let result = ForbiddenWords::builtin()
            .contains_forbidden_words("Bugün çok güzel bir gün, Allah'a şükür.");
        assert!(!result.found);
    }

    #[test]
    fn new_normalizes_entries() {
        let list = ForbiddenWords::new(["  Foo ", "foo", "", "BAR"]).unwrap();
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn parse_skips_comments_and_blanks() {
        let list = ForbiddenWords::parse("# header\nfoo\n\n  bar  \n# trailing").unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains_forbidden_words("bar!").found);
    }

    #[test]
    fn from_file_loads_list() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# forbidden").unwrap();
        writeln!(file, "yasakkelime").unwrap();

        let list = ForbiddenWords::from_file(file.path()).unwrap();
        assert_eq!(list.len(), 1);
        assert!(list.contains_forbidden_words("Yasakkelime!").found);
    }

    #[test]
    fn from_file_missing_is_error() {
        let err = ForbiddenWords::from_file("/nonexistent/words.txt").unwrap_err();
        assert!(matches!(err, ModerationError::WordList { .. }));
    }

    #[test]
    fn empty_list_never_matches() {
        assert!(!ForbiddenWords::empty()
            .contains_forbidden_words("anything at all")
            .found);
    }
}
