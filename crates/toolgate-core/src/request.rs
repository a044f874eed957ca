//! Tool declarations consumed from the tool registry.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::sensitivity::ToolSensitivity;
use crate::types::ToolId;

/// A tool's registry declaration, as far as the confirmation engine is
/// concerned: its identity, display name, and sensitivity flag.
///
/// The sensitivity field keeps the registry's wire key
/// (`confirmAlwaysAllow`) and is omitted entirely for non-sensitive tools.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolRequest {
    /// Opaque tool identifier.
    pub id: ToolId,
    /// Human-readable tool name.
    pub name: String,
    /// Sensitivity declaration; absent means not sensitive.
    #[serde(
        rename = "confirmAlwaysAllow",
        default,
        skip_serializing_if = "not_sensitive"
    )]
    pub sensitivity: ToolSensitivity,
}

fn not_sensitive(sensitivity: &ToolSensitivity) -> bool {
    !sensitivity.is_sensitive()
}

impl ToolRequest {
    /// Declare a regular (non-sensitive) tool.
    pub fn new(id: impl Into<ToolId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            sensitivity: ToolSensitivity::None,
        }
    }

    /// Attach a sensitivity declaration.
    #[must_use]
    pub fn with_sensitivity(mut self, sensitivity: ToolSensitivity) -> Self {
        self.sensitivity = sensitivity;
        self
    }
}

impl fmt::Display for ToolRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}
