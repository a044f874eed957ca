//! Toolgate Core - Foundation types for the tool confirmation engine.
//!
//! This crate provides:
//! - Opaque identifiers for tools, chat sessions, and invocations
//! - The [`ToolConfirmationMode`] and [`DecisionScope`] enums
//! - [`ToolSensitivity`] declarations and the [`ToolRequest`] registry type
//! - The [`PreferenceMap`] persisted preference document
//!
//! Everything here is plain data: no I/O, no locking, no async. The engine
//! crates build on these types; host applications embed them in their own
//! configuration and persistence layers via the serde implementations.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

pub mod mode;
pub mod prefs;
pub mod request;
pub mod sensitivity;
pub mod types;

pub use mode::{DecisionScope, ToolConfirmationMode};
pub use prefs::PreferenceMap;
pub use request::ToolRequest;
pub use sensitivity::ToolSensitivity;
pub use types::{InvocationId, SessionId, Timestamp, ToolId};
