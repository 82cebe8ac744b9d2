//! Moderation workflow state machines.
//!
//! ## Content
//!
//! ```text
//! Created ─┬─> Clean
//!          └─> Flagged (review queue) ─┬─> Approved
//!                                      └─> Removed
//! ```
//!
//! ## Accounts
//!
//! ```text
//! Active ─> Warned(n) ─> Banned ─(unban)─> Active / Warned(n)
//! ```
//!
//! States are derived from the persisted fields ([`ContentFlags`],
//! [`AccountStanding`]); transitions are methods on those types so callers
//! never edit moderation fields directly.

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::enforcement::{EnforcementAction, EnforcementDecision, EnforcementPolicy};
use crate::moderation::{ContentModerator, ModerationResult};

/// Workflow errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum WorkflowError {
    /// A ban must always carry a reason.
    #[error("ban reason cannot be empty")]
    BlankBanReason,

    /// Only content that automatic moderation flagged can be reviewed.
    #[error("content was never flagged for review")]
    NotUnderReview,
}

/// Result type for workflow transitions.
pub type Result<T> = std::result::Result<T, WorkflowError>;

/// Where a content item is in its moderation lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentState {
    /// Passed automatic moderation.
    Clean,
    /// Failed automatic moderation and waits in the review queue.
    Flagged,
    /// Reviewed and kept by a moderator.
    Approved,
    /// Rejected by a moderator and deleted.
    Removed,
}

impl ContentState {
    /// Returns true if no further transition is expected.
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ContentState::Flagged)
    }

    /// Returns true if the item belongs in the admin review queue.
    pub fn in_review_queue(&self) -> bool {
        matches!(self, ContentState::Flagged)
    }
}

/// A moderator's verdict on a content item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReviewDecision {
    /// Keep the item and clear its flag.
    Approve { comment: Option<String> },
    /// Delete the item.
    Reject { comment: Option<String> },
}

impl ReviewDecision {
    /// Builds a decision from the admin API's `isApproved` flag.
    pub fn from_approval(is_approved: bool, comment: Option<String>) -> Self {
        let comment = comment.filter(|c| !c.trim().is_empty());
        if is_approved {
            ReviewDecision::Approve { comment }
        } else {
            ReviewDecision::Reject { comment }
        }
    }

    /// The moderator's comment, if any.
    pub fn comment(&self) -> Option<&str> {
        match self {
            ReviewDecision::Approve { comment } | ReviewDecision::Reject { comment } => {
                comment.as_deref()
            }
        }
    }
}

/// Moderation fields persisted on every post and comment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentFlags {
    pub is_approved: bool,
    pub is_moderated: bool,
    pub flagged_for_content: bool,
    pub flag_reason: Option<String>,
    pub moderation_comment: Option<String>,
}

impl Default for ContentFlags {
    fn default() -> Self {
        Self {
            is_approved: true,
            is_moderated: false,
            flagged_for_content: false,
            flag_reason: None,
            moderation_comment: None,
        }
    }
}

impl ContentFlags {
    /// Flags for freshly created content.
    pub fn new() -> Self {
        Self::default()
    }

    /// Flags for new content after automatic moderation.
    pub fn from_result(result: &ModerationResult) -> Self {
        let mut flags = Self::new();
        if result.flagged {
            flags.flag(&result.reason);
        }
        flags
    }

    /// Derives the lifecycle state.
    pub fn state(&self) -> ContentState {
        if self.flagged_for_content {
            ContentState::Flagged
        } else if self.is_moderated {
            ContentState::Approved
        } else {
            ContentState::Clean
        }
    }

    /// Marks the item for review.
    pub fn flag(&mut self, reason: &str) {
        self.flagged_for_content = true;
        self.flag_reason = Some(reason.to_string());
    }

    /// Applies a moderator's decision and returns the resulting state.
    ///
    /// Approving is idempotent. Rejecting leaves the flags untouched and
    /// returns [`ContentState::Removed`]; the caller deletes the item.
    /// Clean content never entered review and is refused.
    pub fn review(&mut self, decision: &ReviewDecision) -> Result<ContentState> {
        if self.state() == ContentState::Clean {
            return Err(WorkflowError::NotUnderReview);
        }

        Ok(match decision {
            ReviewDecision::Approve { comment } => {
                self.is_approved = true;
                self.is_moderated = true;
                self.flagged_for_content = false;
                self.moderation_comment = comment.clone();
                ContentState::Approved
            }
            ReviewDecision::Reject { .. } => ContentState::Removed,
        })
    }
}

/// Where an account is in the enforcement lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "state")]
pub enum AccountState {
    /// No warnings, not banned.
    Active,
    /// Not banned, with one or more warnings.
    Warned { warnings: i64 },
    /// Banned.
    Banned,
}

/// Enforcement fields persisted on every user.
///
/// `is_banned` and `ban_reason` always change together.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccountStanding {
    pub warning_count: i64,
    pub is_banned: bool,
    pub ban_reason: Option<String>,
}

impl AccountStanding {
    /// Derives the lifecycle state.
    pub fn state(&self) -> AccountState {
        if self.is_banned {
            AccountState::Banned
        } else if self.warning_count > 0 {
            AccountState::Warned {
                warnings: self.warning_count,
            }
        } else {
            AccountState::Active
        }
    }

    /// Adds one warning. Warnings never decay.
    pub fn record_warning(&mut self) {
        self.warning_count += 1;
    }

    /// Bans the account.
    pub fn ban(&mut self, reason: &str) -> Result<()> {
        let reason = reason.trim();
        if reason.is_empty() {
            return Err(WorkflowError::BlankBanReason);
        }
        self.is_banned = true;
        self.ban_reason = Some(reason.to_string());
        Ok(())
    }

    /// Lifts a ban. The warning count is kept.
    pub fn unban(&mut self) {
        self.is_banned = false;
        self.ban_reason = None;
    }

    /// Applies a policy decision.
    pub fn apply(&mut self, decision: &EnforcementDecision) -> Result<()> {
        match decision.action {
            EnforcementAction::None => Ok(()),
            EnforcementAction::Warn => {
                self.record_warning();
                Ok(())
            }
            EnforcementAction::Ban => self.ban(&decision.reason),
        }
    }
}

/// Everything decided about a new submission.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionOutcome {
    /// The moderation verdict.
    pub result: ModerationResult,
    /// What to do with the author.
    pub decision: EnforcementDecision,
    /// Flags to persist on the new item.
    pub flags: ContentFlags,
}

impl SubmissionOutcome {
    /// State of the new item.
    pub fn state(&self) -> ContentState {
        self.flags.state()
    }
}

/// Ties moderation and enforcement together for the submission path.
#[derive(Debug, Clone, Default)]
pub struct ModerationWorkflow {
    moderator: ContentModerator,
    policy: EnforcementPolicy,
}

impl ModerationWorkflow {
    /// Creates a workflow.
    pub fn new(moderator: ContentModerator, policy: EnforcementPolicy) -> Self {
        Self { moderator, policy }
    }

    /// The content moderator.
    pub fn moderator(&self) -> &ContentModerator {
        &self.moderator
    }

    /// Evaluates new content against the author's current standing.
    pub fn evaluate(&self, content: &str, author: &AccountStanding) -> SubmissionOutcome {
        let result = self.moderator.moderate_content(content);
        let decision = if result.flagged {
            self.policy.determine_action(&result, author.warning_count)
        } else {
            EnforcementDecision::none()
        };
        let flags = ContentFlags::from_result(&result);

        debug!(
            state = ?flags.state(),
            action = decision.action.name(),
            warnings = author.warning_count,
            "Submission evaluated"
        );

        SubmissionOutcome {
            result,
            decision,
            flags,
        }
    }

    /// Re-moderates an existing item.
    ///
    /// Only clean items are re-checked; returns the updated flags when the
    /// item now fails moderation. Re-scans never touch the author's account.
    pub fn rescan(&self, content: &str, flags: &ContentFlags) -> Option<ContentFlags> {
        if flags.state() != ContentState::Clean {
            return None;
        }
        let result = self.moderator.moderate_content(content);
        if !result.flagged {
            return None;
        }
        let mut updated = flags.clone();
        updated.flag(&result.reason);
        Some(updated)
    }
}
