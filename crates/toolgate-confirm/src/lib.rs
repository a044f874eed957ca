//! Toolgate Confirm - the tool-invocation confirmation policy engine.
//!
//! For an AI agent that requests execution of external tools, this crate
//! decides per tool, per chat session, per invocation whether execution
//! proceeds automatically, requires interactive user approval, or is
//! refused outright, and exposes the asynchronous protocol for settling
//! that decision.
//!
//! # Components
//!
//! - [`resolver`] — the pure precedence algorithm computing a tool's
//!   effective [`ToolConfirmationMode`](toolgate_core::ToolConfirmationMode)
//! - [`SessionOverrideTable`] — ephemeral per-session mode overrides
//! - [`ConfirmationManager`] — resolution entry point and scope writeback
//!   (once / session / forever) against the
//!   [`PreferenceStore`](toolgate_storage::PreferenceStore)
//! - [`Invocation`] — one per tool call: an explicit state machine
//!   (`Pending → Waiting → Allowed | Denied`, with `Rejected` for
//!   cancellation) plus the [`ConfirmationHandle`] the execution pipeline
//!   awaits
//! - [`WaitingTracker`] — presentation-level aggregation of invocations
//!   currently awaiting a user decision, across delegated sub-sessions
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use toolgate_confirm::{ConfirmationManager, ConfirmationOutcome};
//! use toolgate_core::{SessionId, ToolRequest};
//! use toolgate_storage::MemoryPreferenceStore;
//!
//! # async fn demo() -> toolgate_confirm::ConfirmResult<()> {
//! let manager = ConfirmationManager::new(Arc::new(MemoryPreferenceStore::new()));
//!
//! let request = ToolRequest::new("readFile", "Read File");
//! let session = SessionId::new("chat-1");
//!
//! // Regular tools auto-allow by default; the pipeline just awaits.
//! let invocation = manager.begin_invocation(&request, &session).await?;
//! let outcome = invocation.handle().confirmed().await;
//! assert_eq!(outcome, ConfirmationOutcome::Allowed);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

pub mod prelude;

/// Error types and results for the confirmation engine.
pub mod error;
pub mod invocation;
pub mod machine;
pub mod manager;
pub mod outcome;
pub mod resolver;
pub mod session;
pub mod tracker;

pub use error::{ConfirmError, ConfirmResult};
pub use invocation::{ConfirmationHandle, Invocation};
pub use machine::{ConfirmationEvent, ConfirmationState, ConfirmationStateMachine};
pub use manager::ConfirmationManager;
pub use outcome::ConfirmationOutcome;
pub use session::SessionOverrideTable;
pub use tracker::WaitingTracker;
