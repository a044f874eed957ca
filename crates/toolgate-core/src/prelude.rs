//! Convenience re-exports of the types most callers need.

pub use crate::mode::{DecisionScope, ToolConfirmationMode};
pub use crate::prefs::PreferenceMap;
pub use crate::request::ToolRequest;
pub use crate::sensitivity::ToolSensitivity;
pub use crate::types::{InvocationId, SessionId, Timestamp, ToolId};
