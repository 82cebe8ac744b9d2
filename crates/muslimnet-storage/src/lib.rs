//! MüslimNet Storage - SQLite persistence layer.
//!
//! This crate stores the records the moderation core reads and writes:
//!
//! - Users and their enforcement standing (warnings, bans)
//! - Posts and comments with their moderation flags
//!
//! Submissions are evaluated and persisted inside one transaction, so the
//! new row, its flags, and any warning or ban on the author commit together.
//!
//! # Example
//!
//! ```no_run
//! use muslimnet_core::ModerationWorkflow;
//! use muslimnet_storage::{Database, NewUser};
//!
//! let db = Database::in_memory().unwrap();
//! let user = db.create_user(NewUser::new("ayse", "$argon2id$...")).unwrap();
//!
//! let workflow = ModerationWorkflow::default();
//! let submission = db.submit_post(&workflow, user.id, "Hayırlı cumalar").unwrap();
//! assert!(!submission.item.flags.flagged_for_content);
//! ```

mod database;
pub mod error;
pub mod models;
mod pool;
pub mod repository;
mod schema;

pub use database::Database;
pub use error::{Result, StorageError};
pub use models::{
    Comment, ModerationStats, NewUser, Post, RescanSummary, ReviewOutcome, Submission, User,
};
pub use pool::ConnectionPool;
pub use repository::{CommentsRepo, PostsRepo, UsersRepo};
