//! Application state for the API server.

use std::sync::Arc;

use muslimnet_core::auth::AuthManager;
use muslimnet_core::ModerationWorkflow;
use muslimnet_storage::{Database, StorageError};

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Database connection.
    pub db: Arc<Database>,
    /// Authentication manager.
    pub auth: Arc<AuthManager>,
    /// Moderation and enforcement, shared read-only by every handler.
    pub workflow: Arc<ModerationWorkflow>,
}

impl AppState {
    /// Creates application state with the builtin word list and default policy.
    pub fn new(db: Database) -> Self {
        Self::with_workflow(db, ModerationWorkflow::default())
    }

    /// Creates application state with a configured workflow.
    pub fn with_workflow(db: Database, workflow: ModerationWorkflow) -> Self {
        Self::with_parts(db, workflow, AuthManager::new())
    }

    /// Creates application state from fully configured parts.
    pub fn with_parts(db: Database, workflow: ModerationWorkflow, auth: AuthManager) -> Self {
        Self {
            db: Arc::new(db),
            auth: Arc::new(auth),
            workflow: Arc::new(workflow),
        }
    }

    /// Creates application state with an in-memory database.
    pub fn in_memory() -> Result<Self, StorageError> {
        Ok(Self::new(Database::in_memory()?))
    }
}
