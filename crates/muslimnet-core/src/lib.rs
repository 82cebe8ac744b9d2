//! MüslimNet Core - Content moderation, enforcement, and workflow logic.
//!
//! Everything in this crate is synchronous and free of I/O apart from loading
//! a forbidden-word list from disk. Scores and decisions are recomputed from
//! stored records on every evaluation; nothing here holds long-lived state
//! except the in-memory session table in [`auth`].
//!
//! ## Example
//!
//! ```
//! use muslimnet_core::enforcement::{EnforcementAction, EnforcementPolicy};
//! use muslimnet_core::moderation::{ContentModerator, ForbiddenWords};
//!
//! let moderator = ContentModerator::new(ForbiddenWords::builtin());
//! let result = moderator.moderate_content("Bugün çok güzel bir gün, Allah'a şükür.");
//! assert!(!result.flagged);
//!
//! let decision = EnforcementPolicy::default().determine_action(&result, 0);
//! assert_eq!(decision.action, EnforcementAction::None);
//! ```

pub mod auth;
pub mod enforcement;
pub mod moderation;
pub mod workflow;

pub use enforcement::{EnforcementAction, EnforcementDecision, EnforcementPolicy};
pub use moderation::{
    Category, CategoryScores, ContentModerator, ForbiddenWords, LexicalMatch, ModerationError,
    ModerationResult, PatternScorer,
};
pub use workflow::{
    AccountStanding, AccountState, ContentFlags, ContentState, ModerationWorkflow,
    ReviewDecision, SubmissionOutcome, WorkflowError,
};
