//! Public moderation entry point.

use tracing::debug;

use super::scorer::MIN_CONTENT_CHARS;
use super::{ForbiddenWords, LexicalMatch, ModerationResult, PatternScorer};

/// Combines the lexical filter and the pattern scorer into one verdict.
///
/// Cheap to share behind an `Arc`: moderation only reads its configuration.
#[derive(Debug, Clone)]
pub struct ContentModerator {
    lexicon: ForbiddenWords,
    scorer: PatternScorer,
}

impl ContentModerator {
    /// Creates a moderator with the builtin pattern scorer.
    pub fn new(lexicon: ForbiddenWords) -> Self {
        Self::with_scorer(lexicon, PatternScorer::new())
    }

    /// Creates a moderator with a custom scorer.
    pub fn with_scorer(lexicon: ForbiddenWords, scorer: PatternScorer) -> Self {
        Self { lexicon, scorer }
    }

    /// The forbidden-word list in use.
    pub fn lexicon(&self) -> &ForbiddenWords {
        &self.lexicon
    }

    /// Runs only the lexical filter.
    pub fn contains_forbidden_words(&self, content: &str) -> LexicalMatch {
        self.lexicon.contains_forbidden_words(content)
    }

    /// Moderates a piece of content.
    ///
    /// Exactly one branch runs: short content is safe, a forbidden-word hit
    /// returns the fixed high-severity verdict without scoring, and anything
    /// else is scored by the pattern table.
    pub fn moderate_content(&self, content: &str) -> ModerationResult {
        if content.trim().chars().count() < MIN_CONTENT_CHARS {
            return ModerationResult::safe();
        }

        let lexical = self.lexicon.contains_forbidden_words(content);
        if lexical.found {
            debug!(
                words = lexical.words.len(),
                "Forbidden words found, skipping pattern scoring"
            );
            return ModerationResult::forbidden_words(&lexical.words);
        }

        let result = self.scorer.score(content);
        debug!(
            content_len = content.len(),
            overall = result.overall,
            flagged = result.flagged,
            "Content scored"
        );
        result
    }
}

impl Default for ContentModerator {
    fn default() -> Self {
        Self::new(ForbiddenWords::builtin())
    }
}
