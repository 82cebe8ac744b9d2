//! Errors raised while building moderation components.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while constructing a filter or scorer.
///
/// Scoring itself never fails; only loading configuration can.
#[derive(Debug, Error)]
pub enum ModerationError {
    /// A scoring rule contains an invalid regular expression.
    #[error("invalid pattern '{pattern}': {source}")]
    InvalidPattern {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    /// The forbidden-word list could not be compiled into a matcher.
    #[error("failed to compile word list: {0}")]
    WordListPattern(#[source] regex::Error),

    /// The forbidden-word list could not be read.
    #[error("failed to read word list {path:?}: {source}")]
    WordList {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
