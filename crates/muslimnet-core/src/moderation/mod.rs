//! Content moderation for user-submitted posts and comments.
//!
//! Two independent detectors feed a single [`ModerationResult`]:
//!
//! - [`ForbiddenWords`]: an injected word list matched case-insensitively.
//!   A hit short-circuits with a fixed high-severity verdict.
//! - [`PatternScorer`]: a declarative table of word-boundary regexes that add
//!   per-category severity increments.
//!
//! [`ContentModerator`] combines them behind `moderate_content`.

mod category;
mod error;
mod lexicon;
mod moderator;
mod scorer;

pub use category::{
    Category, CategoryScores, ModerationResult, FLAG_CATEGORY_THRESHOLD, FLAG_OVERALL_THRESHOLD,
};
pub use error::ModerationError;
pub use lexicon::{ForbiddenWords, LexicalMatch};
pub use moderator::ContentModerator;
pub use scorer::{PatternRule, PatternScorer};
