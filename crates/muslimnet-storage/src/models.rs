//! Data models for storage.

use chrono::{DateTime, Utc};
use muslimnet_core::auth::Role;
use muslimnet_core::{AccountStanding, ContentFlags, SubmissionOutcome};
use serde::{Deserialize, Serialize};

/// A registered account.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    /// Unique identifier.
    pub id: i64,
    /// Login name (unique).
    pub username: String,
    /// Argon2 PHC string. Never serialized.
    #[serde(skip)]
    pub password_hash: String,
    /// Permission level.
    pub role: Role,
    /// Deactivated accounts cannot sign in; unrelated to bans.
    pub is_active: bool,
    /// Warnings and ban state.
    #[serde(flatten)]
    pub standing: AccountStanding,
    /// Registration time.
    pub created_at: DateTime<Utc>,
}

/// Parameters for creating a new user.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub password_hash: String,
    pub role: Role,
}

impl NewUser {
    /// A regular member.
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            role: Role::User,
        }
    }

    /// Sets the role.
    pub fn with_role(mut self, role: Role) -> Self {
        self.role = role;
        self
    }
}

/// A post with its moderation flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: i64,
    pub user_id: i64,
    pub content: String,
    #[serde(flatten)]
    pub flags: ContentFlags,
    pub created_at: DateTime<Utc>,
}

/// A comment with its moderation flags.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub user_id: i64,
    pub content: String,
    #[serde(flatten)]
    pub flags: ContentFlags,
    pub created_at: DateTime<Utc>,
}

/// A persisted submission together with what was decided about it.
#[derive(Debug, Clone)]
pub struct Submission<T> {
    /// The stored item.
    pub item: T,
    /// Moderation verdict and enforcement decision.
    pub outcome: SubmissionOutcome,
    /// The author after enforcement was applied.
    pub author: User,
}

/// Result of a moderator review.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewOutcome<T> {
    /// The item was kept; contains its updated record.
    Approved(T),
    /// The item was deleted.
    Removed,
}

/// Counts from a re-scan pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RescanSummary {
    pub flagged_posts: i64,
    pub flagged_comments: i64,
}

/// Review queue and enforcement totals.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationStats {
    pub flagged_posts: i64,
    pub flagged_comments: i64,
    pub warned_users: i64,
    pub banned_users: i64,
}
