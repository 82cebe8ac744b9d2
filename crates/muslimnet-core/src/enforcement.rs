//! Enforcement policy: maps a moderation verdict and warning history to an
//! account action.
//!
//! ## Evaluation Order
//!
//! 1. Unflagged content never triggers an action
//! 2. Severe violations ban regardless of history
//! 3. Authors at the warning limit are banned
//! 4. Clearly inappropriate content earns a warning
//! 5. Anything else stays flagged for human review with no account action
//!
//! The policy only decides. Applying the warning increment or ban to the
//! stored account is the caller's job.

use serde::{Deserialize, Serialize};

use crate::moderation::ModerationResult;

/// Reason attached to bans for severe violations.
pub const SEVERE_VIOLATION_REASON: &str = "Severe violation of platform terms of use";

/// Reason attached to bans after too many warnings.
pub const REPEATED_VIOLATION_REASON: &str =
    "Repeated inappropriate content despite prior warnings";

/// Reason used for warnings when the result carries none.
pub const DEFAULT_WARNING_REASON: &str = "Inappropriate content detected";

/// Action to take against the author's account.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnforcementAction {
    /// Leave the account alone.
    #[default]
    None,
    /// Increment the warning count.
    Warn,
    /// Ban the account.
    Ban,
}

impl EnforcementAction {
    /// Returns a human-readable name for this action.
    pub fn name(&self) -> &'static str {
        match self {
            EnforcementAction::None => "None",
            EnforcementAction::Warn => "Warn",
            EnforcementAction::Ban => "Ban",
        }
    }
}

/// A decision produced by the policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnforcementDecision {
    /// The action to take.
    pub action: EnforcementAction,
    /// Why. Empty for [`EnforcementAction::None`].
    pub reason: String,
}

impl EnforcementDecision {
    /// No action.
    pub fn none() -> Self {
        Self::default()
    }

    /// A warning with the given reason.
    pub fn warn(reason: impl Into<String>) -> Self {
        Self {
            action: EnforcementAction::Warn,
            reason: reason.into(),
        }
    }

    /// A ban with the given reason.
    pub fn ban(reason: impl Into<String>) -> Self {
        Self {
            action: EnforcementAction::Ban,
            reason: reason.into(),
        }
    }

    /// Returns true if the action is Ban.
    pub fn is_ban(&self) -> bool {
        self.action == EnforcementAction::Ban
    }

    /// Returns true if the action is Warn.
    pub fn is_warn(&self) -> bool {
        self.action == EnforcementAction::Warn
    }
}

/// Thresholds for escalating enforcement.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnforcementPolicy {
    /// Overall score above which the author is banned outright.
    pub severe_overall: f64,
    /// Obscene score above which the author is banned outright.
    pub severe_obscene: f64,
    /// Extremism score above which the author is banned outright.
    pub severe_extremism: f64,
    /// Self-harm score above which the author is banned outright.
    pub severe_self_harm: f64,
    /// Warning count at which further flagged content bans.
    pub max_warnings: i64,
    /// Overall score above which flagged content earns a warning.
    pub warn_overall: f64,
}

impl Default for EnforcementPolicy {
    fn default() -> Self {
        Self {
            severe_overall: 0.9,
            severe_obscene: 0.8,
            severe_extremism: 0.8,
            severe_self_harm: 0.9,
            max_warnings: 3,
            warn_overall: 0.6,
        }
    }
}

impl EnforcementPolicy {
    /// Decides what to do with the author of the moderated content.
    pub fn determine_action(
        &self,
        result: &ModerationResult,
        warning_count: i64,
    ) -> EnforcementDecision {
        if !result.flagged {
            return EnforcementDecision::none();
        }

        let scores = &result.category_scores;
        if result.overall > self.severe_overall
            || scores.obscene > self.severe_obscene
            || scores.extremism > self.severe_extremism
            || scores.self_harm > self.severe_self_harm
        {
            return EnforcementDecision::ban(SEVERE_VIOLATION_REASON);
        }

        if warning_count >= self.max_warnings {
            return EnforcementDecision::ban(REPEATED_VIOLATION_REASON);
        }

        if result.overall > self.warn_overall {
            let reason = if result.reason.is_empty() {
                DEFAULT_WARNING_REASON.to_string()
            } else {
                result.reason.clone()
            };
            return EnforcementDecision::warn(reason);
        }

        EnforcementDecision::none()
    }
}
