//! Storage error types.

use muslimnet_core::WorkflowError;
use thiserror::Error;

/// Errors that can occur in storage operations.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Database error from rusqlite.
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// IO error (e.g., creating directories).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Record not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A unique constraint would be violated.
    #[error("Conflict: {0}")]
    Conflict(String),

    /// The acting user is banned.
    #[error("User {0} is banned")]
    Banned(i64),

    /// A moderation transition was rejected.
    #[error("Invalid transition: {0}")]
    Workflow(#[from] WorkflowError),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for storage operations.
pub type Result<T> = std::result::Result<T, StorageError>;
