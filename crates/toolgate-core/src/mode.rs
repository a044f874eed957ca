//! Confirmation modes and decision scopes.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How invocations of a tool are gated.
///
/// Modes are compared only for equality; no permissiveness ordering is
/// assumed between them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolConfirmationMode {
    /// Invocations proceed without asking the user.
    AlwaysAllow,
    /// Each invocation requires interactive user approval.
    Confirm,
    /// Invocations are refused outright.
    Disabled,
}

impl fmt::Display for ToolConfirmationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AlwaysAllow => write!(f, "always allow"),
            Self::Confirm => write!(f, "confirm"),
            Self::Disabled => write!(f, "disabled"),
        }
    }
}

/// The durability of a user's allow/deny decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionScope {
    /// This invocation only; nothing is stored.
    Once,
    /// The rest of this chat session, in memory only.
    Session,
    /// Persisted globally for this tool.
    Forever,
}

impl fmt::Display for DecisionScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Once => write!(f, "once"),
            Self::Session => write!(f, "session"),
            Self::Forever => write!(f, "forever"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_serde_snake_case() {
        let json = serde_json::to_string(&ToolConfirmationMode::AlwaysAllow).unwrap();
        assert_eq!(json, "\"always_allow\"");

        let back: ToolConfirmationMode = serde_json::from_str("\"disabled\"").unwrap();
        assert_eq!(back, ToolConfirmationMode::Disabled);
    }

    #[test]
    fn test_mode_equality_only() {
        assert_eq!(ToolConfirmationMode::Confirm, ToolConfirmationMode::Confirm);
        assert_ne!(
            ToolConfirmationMode::Confirm,
            ToolConfirmationMode::Disabled
        );
    }

    #[test]
    fn test_scope_display() {
        assert_eq!(DecisionScope::Once.to_string(), "once");
        assert_eq!(DecisionScope::Session.to_string(), "session");
        assert_eq!(DecisionScope::Forever.to_string(), "forever");
    }

    #[test]
    fn test_scope_serde() {
        let json = serde_json::to_string(&DecisionScope::Forever).unwrap();
        assert_eq!(json, "\"forever\"");
    }
}
