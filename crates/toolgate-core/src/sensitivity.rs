//! Per-tool sensitivity declarations.
//!
//! A tool author can flag a tool as sensitive: the built-in default for the
//! tool becomes [`Confirm`](crate::ToolConfirmationMode::Confirm) and a
//! wildcard auto-allow preference is not inherited. On the wire the flag is
//! `true` (generic warning), a string (custom warning text shown before a
//! forever-allow is accepted), or absent.

use serde::de::Deserializer;
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};

/// Whether a tool is declared dangerous enough that blanket "allow
/// everything" policies must not silently apply to it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum ToolSensitivity {
    /// The tool carries no sensitivity declaration.
    #[default]
    None,
    /// The tool is sensitive. `Some(text)` carries custom warning text to
    /// show the user before accepting a forever-allow; `None` means the
    /// generic warning applies.
    Warn(Option<String>),
}

impl ToolSensitivity {
    /// A sensitive declaration with the generic warning.
    #[must_use]
    pub fn warn() -> Self {
        Self::Warn(None)
    }

    /// A sensitive declaration with custom warning text.
    pub fn warn_with(text: impl Into<String>) -> Self {
        Self::Warn(Some(text.into()))
    }

    /// Check whether the tool is flagged sensitive.
    #[must_use]
    pub fn is_sensitive(&self) -> bool {
        matches!(self, Self::Warn(_))
    }

    /// Custom warning text, if the declaration carries one.
    #[must_use]
    pub fn warning_text(&self) -> Option<&str> {
        match self {
            Self::Warn(Some(text)) => Some(text),
            _ => None,
        }
    }
}

// Wire form: `true` | `false` | "custom warning text". Absent is handled by
// `#[serde(default)]` at the field carrying this type.
impl Serialize for ToolSensitivity {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::None => serializer.serialize_bool(false),
            Self::Warn(None) => serializer.serialize_bool(true),
            Self::Warn(Some(text)) => serializer.serialize_str(text),
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SensitivityRepr {
    Flag(bool),
    Text(String),
}

impl<'de> Deserialize<'de> for ToolSensitivity {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        match SensitivityRepr::deserialize(deserializer)? {
            SensitivityRepr::Flag(false) => Ok(Self::None),
            SensitivityRepr::Flag(true) => Ok(Self::Warn(None)),
            SensitivityRepr::Text(text) => Ok(Self::Warn(Some(text))),
        }
    }
}
