//! Regex pattern scorer.
//!
//! Scoring is driven by a declarative rule table: each rule is a pattern plus
//! the category increments it contributes when it matches. A rule contributes
//! once per text regardless of how often it matches, so adding matches for a
//! new rule can only raise a category score.

use regex::{Regex, RegexSet};

use super::{Category, CategoryScores, ModerationError, ModerationResult};

/// Content shorter than this (after trimming) is never scored.
pub(crate) const MIN_CONTENT_CHARS: usize = 2;

const VIOLENCE: &[(Category, f64)] = &[(Category::Threat, 0.3), (Category::Extremism, 0.1)];
const OBSCENITY: &[(Category, f64)] = &[(Category::Obscene, 0.35)];
const TOXICITY: &[(Category, f64)] = &[(Category::Toxic, 0.3), (Category::Harassment, 0.2)];
const HATE: &[(Category, f64)] = &[(Category::Hate, 0.35), (Category::Extremism, 0.2)];
const SELF_HARM: &[(Category, f64)] = &[(Category::SelfHarm, 0.4)];
const EXCLAMATIONS: &[(Category, f64)] = &[(Category::Toxic, 0.1), (Category::Harassment, 0.05)];
const SHOUTING: &[(Category, f64)] = &[(Category::Toxic, 0.1), (Category::Harassment, 0.1)];

/// Rules evaluated against the lower-cased text.
const CONTENT_RULES: &[(&str, &[(Category, f64)])] = &[
    // Violence and threats
    (r"\böldür\w*", VIOLENCE),
    (r"\bgeber\w*", VIOLENCE),
    (r"\bbomba\w*", VIOLENCE),
    (r"\bsilah\w*", VIOLENCE),
    (r"\bpatlat\w*", VIOLENCE),
    (r"\bsaldır\w*", VIOLENCE),
    (r"\bkatlet\w*", VIOLENCE),
    (r"\bbıçakla\w*", VIOLENCE),
    (r"\bkan\s+dök\w*", VIOLENCE),
    (r"\b(kill|murder)(s|ed|ing)?\b", VIOLENCE),
    // Obscenity
    (r"\bseks\w*", OBSCENITY),
    (r"\bsex(y|ual)?\b", OBSCENITY),
    (r"\bporno?\w*", OBSCENITY),
    (r"\bçıplak\w*", OBSCENITY),
    (r"\berotik\w*", OBSCENITY),
    (r"\bnudes?\b", OBSCENITY),
    // Toxicity and insults
    (r"\baptal\w*", TOXICITY),
    (r"\bsalak\w*", TOXICITY),
    (r"\bgeri\s*zekal\w*", TOXICITY),
    (r"\bahmak\w*", TOXICITY),
    (r"\bdangalak\w*", TOXICITY),
    (r"\bhödük\w*", TOXICITY),
    (r"\b(stupid|idiot|moron)s?\b", TOXICITY),
    (r"\bshut\s+up\b", TOXICITY),
    // Hate speech
    (r"\bgavur\w*", HATE),
    (
        r"\bpis\s+(yahudi|arap|kürt|ermeni|rum|göçmen|suriyeli|çingene)\w*",
        HATE,
    ),
    (r"\başağılık\s+(ırk|millet|kavim)\w*", HATE),
    (r"\bnefret\s+ediyorum\b", HATE),
    (
        r"\b(yahudi|hristiyan|arap|kürt|ermeni|göçmen)\w*\s+(köpe|domuz)\w*",
        HATE,
    ),
    (
        r"\bhate\s+(all\s+)?(muslims|jews|christians|arabs|immigrants)\b",
        HATE,
    ),
    // Self-harm
    (r"\bintihar\w*", SELF_HARM),
    (r"\bkendimi\s+(öldür|as|kes|vur)\w*", SELF_HARM),
    (r"\byaşamak\s+istemiyorum\b", SELF_HARM),
    (r"\bölmek\s+istiyorum\b", SELF_HARM),
    (r"\bsuicid\w*", SELF_HARM),
    (r"\bkill\s+myself\b", SELF_HARM),
];

/// Rules evaluated against the original text, where case carries meaning.
const TONE_RULES: &[(&str, &[(Category, f64)])] = &[
    (r"!{3,}", EXCLAMATIONS),
    (r"[A-ZÇĞİÖŞÜ]{5,}", SHOUTING),
];

/// A single scoring rule.
#[derive(Debug, Clone, PartialEq)]
pub struct PatternRule {
    /// Regular expression in `regex` crate syntax.
    pub pattern: String,
    /// Increments added when the pattern matches.
    pub increments: Vec<(Category, f64)>,
}

impl PatternRule {
    /// Creates a rule.
    pub fn new(pattern: impl Into<String>, increments: &[(Category, f64)]) -> Self {
        Self {
            pattern: pattern.into(),
            increments: increments.to_vec(),
        }
    }
}

/// A rule table compiled into a single regex set.
#[derive(Debug, Clone)]
struct CompiledRules {
    regex_set: RegexSet,
    rules: Vec<PatternRule>,
}

impl CompiledRules {
    fn compile(rules: Vec<PatternRule>) -> Result<Self, ModerationError> {
        // Compile individually first so errors name the offending pattern.
        for rule in &rules {
            Regex::new(&rule.pattern).map_err(|source| ModerationError::InvalidPattern {
                pattern: rule.pattern.clone(),
                source,
            })?;
        }

        let regex_set = RegexSet::new(rules.iter().map(|r| r.pattern.as_str())).map_err(
            |source| ModerationError::InvalidPattern {
                pattern: "<rule set>".to_string(),
                source,
            },
        )?;

        Ok(Self { regex_set, rules })
    }

    fn apply(&self, text: &str, scores: &mut CategoryScores) {
        for idx in self.regex_set.matches(text).iter() {
            for (category, increment) in &self.rules[idx].increments {
                scores.add(*category, *increment);
            }
        }
    }
}

/// Category scorer backed by a regex rule table.
#[derive(Debug, Clone)]
pub struct PatternScorer {
    content: CompiledRules,
    tone: CompiledRules,
}

impl PatternScorer {
    /// Creates a scorer with the builtin rule tables.
    pub fn new() -> Self {
        Self::with_rules(Self::builtin_rules(), Self::builtin_tone_rules())
            .expect("builtin moderation patterns are valid")
    }

    /// Creates a scorer from custom rule tables.
    ///
    /// `content_rules` see the lower-cased text; `tone_rules` see the text
    /// as submitted.
    pub fn with_rules(
        content_rules: Vec<PatternRule>,
        tone_rules: Vec<PatternRule>,
    ) -> Result<Self, ModerationError> {
        Ok(Self {
            content: CompiledRules::compile(content_rules)?,
            tone: CompiledRules::compile(tone_rules)?,
        })
    }

    /// The builtin content rule table.
    pub fn builtin_rules() -> Vec<PatternRule> {
        to_rules(CONTENT_RULES)
    }

    /// The builtin tone rule table.
    pub fn builtin_tone_rules() -> Vec<PatternRule> {
        to_rules(TONE_RULES)
    }

    /// Scores content and applies the flag thresholds.
    pub fn score(&self, content: &str) -> ModerationResult {
        if content.trim().chars().count() < MIN_CONTENT_CHARS {
            return ModerationResult::safe();
        }

        let mut scores = CategoryScores::default();
        self.content.apply(&content.to_lowercase(), &mut scores);
        self.tone.apply(content, &mut scores);

        ModerationResult::from_scores(scores)
    }
}

impl Default for PatternScorer {
    fn default() -> Self {
        Self::new()
    }
}

fn to_rules(table: &[(&str, &[(Category, f64)])]) -> Vec<PatternRule> {
    table
        .iter()
        .map(|(pattern, increments)| PatternRule::new(*pattern, increments))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::moderation::{FLAG_CATEGORY_THRESHOLD, FLAG_OVERALL_THRESHOLD};

    fn scorer() -> PatternScorer {
        PatternScorer::new()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn builtin_rules_compile() {
        let _ = PatternScorer::with_rules(
            PatternScorer::builtin_rules(),
            PatternScorer::builtin_tone_rules(),
        )
        .unwrap();
    }

    #[test]
    fn short_content_is_safe() {
        for text in ["", " ", "a", "  !  ", "\n\t"] {
            let result = scorer().score(text);
            assert!(!result.flagged);
            assert_eq!(result.category_scores, CategoryScores::default());
        }
    }

    #[test]
    fn greeting_is_clean() {
        let result = scorer().score("Bugün çok güzel bir gün, Allah'a şükür.");
        assert!(!result.flagged);
        assert_eq!(result.overall, 0.0);
        assert!(result.reason.is_empty());
    }

    #[test]
    fn single_violence_word_stays_below_threshold() {
        let result = scorer().score("bomba");
        assert!(approx(result.category_scores.threat, 0.3));
        assert!(approx(result.category_scores.extremism, 0.1));
        assert!(approx(result.overall, 0.4 / 7.0));
        assert!(!result.flagged);
    }

    #[test]
    fn repeated_violence_is_flagged_as_threat() {
        let result = scorer().score("bomba silah öldür patlat saldırı");
        assert!(result.category_scores.threat > 0.6);
        assert!(result.flagged);
        assert_eq!(
            result.reason,
            "Content found inappropriate in category 'threat/violence'"
        );
    }

    #[test]
    fn rule_counts_once_per_text() {
        let once = scorer().score("aptal");
        let twice = scorer().score("aptal aptal aptal");
        assert_eq!(once.category_scores, twice.category_scores);
    }

    #[test]
    fn toxicity_feeds_toxic_and_harassment() {
        let result = scorer().score("sen bir salaksın");
        assert!(approx(result.category_scores.toxic, 0.3));
        assert!(approx(result.category_scores.harassment, 0.2));
        assert_eq!(result.category_scores.threat, 0.0);
    }

    #[test]
    fn hate_feeds_hate_and_extremism() {
        let result = scorer().score("pis göçmenler");
        assert!(approx(result.category_scores.hate, 0.35));
        assert!(approx(result.category_scores.extremism, 0.2));
    }

    #[test]
    fn obscenity_only_feeds_obscene() {
        let result = scorer().score("porno sitesi");
        assert!(approx(result.category_scores.obscene, 0.35));
        assert_eq!(result.overall, 0.35 / 7.0);
    }

    #[test]
    fn self_harm_is_flagged_when_two_rules_match() {
        let result = scorer().score("yaşamak istemiyorum, intihar etmeyi düşünüyorum");
        assert!(approx(result.category_scores.self_harm, 0.8));
        assert!(result.flagged);
        assert_eq!(
            result.reason,
            "Content found inappropriate in category 'self-harm'"
        );
    }

    #[test]
    fn exclamations_add_tone_increment() {
        let result = scorer().score("ne diyorsun!!!");
        assert!(approx(result.category_scores.toxic, 0.1));
        assert!(approx(result.category_scores.harassment, 0.05));
    }

    #[test]
    fn shouting_detects_turkish_capitals() {
        let result = scorer().score("ÇÜĞŞÖ diye bağırma");
        assert!(approx(result.category_scores.toxic, 0.1));
        assert!(approx(result.category_scores.harassment, 0.1));
    }

    #[test]
    fn four_capitals_is_not_shouting() {
        let result = scorer().score("ABCD efg");
        assert_eq!(result.category_scores.toxic, 0.0);
    }

    #[test]
    fn skill_does_not_match_kill() {
        let result = scorer().score("improve your cooking skills");
        assert_eq!(result.category_scores.threat, 0.0);
    }

    #[test]
    fn scores_are_not_clamped() {
        let result = scorer().score("aptal salak ahmak dangalak hödük gerizekalı");
        assert!(result.category_scores.toxic > 1.0);
    }

    #[test]
    fn more_matches_never_lower_a_category() {
        let words = ["aptal", "salak", "ahmak", "dangalak", "hödük", "idiot"];
        let mut previous = 0.0;
        for n in 1..=words.len() {
            let text = words[..n].join(" ");
            let score = scorer().score(&text).category_scores.toxic;
            assert!(score >= previous, "toxic dropped at {} words", n);
            previous = score;
        }
    }

    #[test]
    fn flagged_iff_thresholds_crossed() {
        let samples = [
            "bomba",
            "bomba silah",
            "bomba silah öldür",
            "aptal salak",
            "aptal salak ahmak",
            "NEDEN BÖYLE!!!",
            "porno seks erotik",
            "pis araplar gavurlar",
            "merhaba kardeşim",
        ];
        for text in samples {
            let r = scorer().score(text);
            let expected = r.overall > FLAG_OVERALL_THRESHOLD
                || r.category_scores.any_above(FLAG_CATEGORY_THRESHOLD);
            assert_eq!(r.flagged, expected, "mismatch for {:?}", text);
            assert_eq!(r.flagged, !r.reason.is_empty());
        }
    }

    #[test]
    fn custom_rules_are_used() {
        let scorer = PatternScorer::with_rules(
            vec![PatternRule::new(r"\bspam\b", &[(Category::Harassment, 0.7)])],
            vec![],
        )
        .unwrap();
        let result = scorer.score("buy spam now");
        assert!(result.flagged);
        assert_eq!(
            result.reason,
            "Content found inappropriate in category 'harassment'"
        );
    }

    #[test]
    fn invalid_custom_pattern_is_error() {
        let err = PatternScorer::with_rules(
            vec![PatternRule::new(r"(unclosed", &[(Category::Toxic, 0.1)])],
            vec![],
        )
        .unwrap_err();
        assert!(matches!(err, ModerationError::InvalidPattern { .. }));
    }
}
