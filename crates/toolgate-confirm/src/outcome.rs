//! The settled result of a confirmation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How an invocation's confirmation settled.
///
/// Cancellation is an explicit variant rather than a channel failure, so
/// "the user denied this" and "the request was canceled before a decision"
/// are never conflated in reporting or retry logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "outcome")]
pub enum ConfirmationOutcome {
    /// Execution may proceed.
    Allowed,
    /// The user (or the disabled policy) refused execution.
    Denied {
        /// Optional human-readable reason, propagated to the agent as
        /// context.
        #[serde(default, skip_serializing_if = "Option::is_none")]
        reason: Option<String>,
    },
    /// The surrounding request was canceled before a decision was made.
    Canceled,
}

impl ConfirmationOutcome {
    /// Check if execution may proceed.
    #[must_use]
    pub fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Check if this outcome is a deliberate refusal.
    #[must_use]
    pub fn is_denied(&self) -> bool {
        matches!(self, Self::Denied { .. })
    }

    /// Check if the invocation was canceled rather than decided.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        matches!(self, Self::Canceled)
    }

    /// The denial reason, if this is a denial that carries one.
    #[must_use]
    pub fn denial_reason(&self) -> Option<&str> {
        match self {
            Self::Denied { reason } => reason.as_deref(),
            _ => None,
        }
    }
}

impl fmt::Display for ConfirmationOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Allowed => write!(f, "allowed"),
            Self::Denied { reason: Some(reason) } => write!(f, "denied: {reason}"),
            Self::Denied { reason: None } => write!(f, "denied"),
            Self::Canceled => write!(f, "canceled"),
        }
    }
}
