//! Moderation categories, per-category scores, and the combined verdict.

use serde::{Deserialize, Serialize};

/// A result is flagged when the mean score exceeds this value.
pub const FLAG_OVERALL_THRESHOLD: f64 = 0.5;

/// A result is flagged when any single category exceeds this value.
pub const FLAG_CATEGORY_THRESHOLD: f64 = 0.6;

/// Categories that content is scored against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Category {
    /// Insults and abuse.
    Toxic,
    /// Obscene or sexual content.
    Obscene,
    /// Hate speech and discrimination.
    Hate,
    /// Threats and violence.
    Threat,
    /// Harassment of other users.
    Harassment,
    /// Self-harm or suicide.
    SelfHarm,
    /// Extremism and radicalization.
    Extremism,
}

impl Category {
    /// Returns all categories in evaluation order.
    ///
    /// This order is also the tie-break order when picking the
    /// highest-scoring category.
    pub fn all() -> &'static [Category] {
        &[
            Category::Toxic,
            Category::Obscene,
            Category::Hate,
            Category::Threat,
            Category::Harassment,
            Category::SelfHarm,
            Category::Extremism,
        ]
    }

    /// Returns the human-readable name used in moderation reasons.
    pub fn name(&self) -> &'static str {
        match self {
            Category::Toxic => "insult/abuse",
            Category::Obscene => "obscene content",
            Category::Hate => "hate speech",
            Category::Threat => "threat/violence",
            Category::Harassment => "harassment",
            Category::SelfHarm => "self-harm",
            Category::Extremism => "extremism/radicalization",
        }
    }
}

/// Severity per category.
///
/// Scores are additive and deliberately not clamped to 1.0; the flag and
/// enforcement thresholds are calibrated against the unclamped scale.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScores {
    pub toxic: f64,
    pub obscene: f64,
    pub hate: f64,
    pub threat: f64,
    pub harassment: f64,
    pub self_harm: f64,
    pub extremism: f64,
}

impl CategoryScores {
    /// Returns the score for a category.
    pub fn get(&self, category: Category) -> f64 {
        match category {
            Category::Toxic => self.toxic,
            Category::Obscene => self.obscene,
            Category::Hate => self.hate,
            Category::Threat => self.threat,
            Category::Harassment => self.harassment,
            Category::SelfHarm => self.self_harm,
            Category::Extremism => self.extremism,
        }
    }

    fn slot(&mut self, category: Category) -> &mut f64 {
        match category {
            Category::Toxic => &mut self.toxic,
            Category::Obscene => &mut self.obscene,
            Category::Hate => &mut self.hate,
            Category::Threat => &mut self.threat,
            Category::Harassment => &mut self.harassment,
            Category::SelfHarm => &mut self.self_harm,
            Category::Extremism => &mut self.extremism,
        }
    }

    /// Adds an increment to a category.
    pub fn add(&mut self, category: Category, increment: f64) {
        *self.slot(category) += increment;
    }

    /// Arithmetic mean of all seven categories.
    pub fn mean(&self) -> f64 {
        let total: f64 = Category::all().iter().map(|c| self.get(*c)).sum();
        total / Category::all().len() as f64
    }

    /// Returns the highest-scoring category.
    ///
    /// Ties go to the category that comes first in [`Category::all`].
    pub fn highest(&self) -> (Category, f64) {
        let mut best = (Category::Toxic, self.toxic);
        for category in &Category::all()[1..] {
            let score = self.get(*category);
            if score > best.1 {
                best = (*category, score);
            }
        }
        best
    }

    /// Returns true if any category is strictly above the threshold.
    pub fn any_above(&self, threshold: f64) -> bool {
        Category::all().iter().any(|c| self.get(*c) > threshold)
    }
}

/// Verdict for one piece of submitted content.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationResult {
    /// Per-category severity.
    pub category_scores: CategoryScores,
    /// Mean of the category scores.
    pub overall: f64,
    /// Whether the content should enter the review queue.
    pub flagged: bool,
    /// Why the content was flagged. Empty when not flagged.
    pub reason: String,
}

impl ModerationResult {
    /// Creates the all-zero, unflagged result.
    pub fn safe() -> Self {
        Self::default()
    }

    /// Builds a result from accumulated scores, applying the flag thresholds.
    pub fn from_scores(category_scores: CategoryScores) -> Self {
        let overall = category_scores.mean();
        let flagged =
            overall > FLAG_OVERALL_THRESHOLD || category_scores.any_above(FLAG_CATEGORY_THRESHOLD);

        let reason = if flagged {
            let (category, _) = category_scores.highest();
            format!(
                "Content found inappropriate in category '{}'",
                category.name()
            )
        } else {
            String::new()
        };

        Self {
            category_scores,
            overall,
            flagged,
            reason,
        }
    }

    /// Builds the fixed high-severity result used when forbidden words match.
    pub fn forbidden_words(words: &[String]) -> Self {
        Self {
            category_scores: CategoryScores {
                toxic: 0.9,
                obscene: 0.3,
                hate: 0.7,
                threat: 0.5,
                harassment: 0.8,
                self_harm: 0.1,
                extremism: 0.4,
            },
            overall: 0.8,
            flagged: true,
            reason: format!("Content contains forbidden words: {}", words.join(", ")),
        }
    }

    /// Score for a single category.
    pub fn score(&self, category: Category) -> f64 {
        self.category_scores.get(category)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_all_returns_all_variants() {
        assert_eq!(Category::all().len(), 7);
    }

    #[test]
    fn category_serializes_camel_case() {
        let json = serde_json::to_string(&Category::SelfHarm).unwrap();
        assert_eq!(json, "\"selfHarm\"");
    }

    #[test]
    fn mean_divides_by_seven() {
        let mut scores = CategoryScores::default();
        scores.add(Category::Threat, 0.7);
        assert!((scores.mean() - 0.1).abs() < 1e-9);
    }

    #[test]
    fn highest_breaks_ties_in_evaluation_order() {
        let mut scores = CategoryScores::default();
        scores.add(Category::Harassment, 0.5);
        scores.add(Category::Hate, 0.5);
        assert_eq!(scores.highest().0, Category::Hate);
    }

    #[test]
    fn highest_of_all_zero_is_first_category() {
        assert_eq!(CategoryScores::default().highest().0, Category::Toxic);
    }

    #[test]
    fn from_scores_flags_on_single_category() {
        let mut scores = CategoryScores::default();
        scores.add(Category::SelfHarm, 0.8);
        let result = ModerationResult::from_scores(scores);
        assert!(result.flagged);
        assert_eq!(
            result.reason,
            "Content found inappropriate in category 'self-harm'"
        );
    }

    #[test]
    fn from_scores_does_not_flag_at_threshold() {
        let mut scores = CategoryScores::default();
        scores.add(Category::Obscene, 0.6);
        let result = ModerationResult::from_scores(scores);
        assert!(!result.flagged);
        assert!(result.reason.is_empty());
    }

    #[test]
    fn from_scores_flags_on_overall() {
        let scores = CategoryScores {
            toxic: 0.55,
            obscene: 0.55,
            hate: 0.55,
            threat: 0.55,
            harassment: 0.55,
            self_harm: 0.55,
            extremism: 0.55,
        };
        let result = ModerationResult::from_scores(scores);
        assert!(result.overall > FLAG_OVERALL_THRESHOLD);
        assert!(result.flagged);
    }

    #[test]
    fn forbidden_words_result_is_fixed() {
        let result = ModerationResult::forbidden_words(&["foo".to_string(), "bar".to_string()]);
        assert!(result.flagged);
        assert_eq!(result.overall, 0.8);
        assert_eq!(result.score(Category::Toxic), 0.9);
        assert_eq!(result.reason, "Content contains forbidden words: foo, bar");
    }

    #[test]
    fn result_serializes_with_camel_case_keys() {
        let value = serde_json::to_value(ModerationResult::safe()).unwrap();
        assert!(value["categoryScores"]["selfHarm"].is_number());
        assert_eq!(value["flagged"], false);
    }
}
