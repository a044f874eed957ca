//! Convenience re-exports of the engine's public surface.

pub use crate::error::{ConfirmError, ConfirmResult};
pub use crate::invocation::{ConfirmationHandle, Invocation};
pub use crate::machine::{ConfirmationEvent, ConfirmationState, ConfirmationStateMachine};
pub use crate::manager::ConfirmationManager;
pub use crate::outcome::ConfirmationOutcome;
pub use crate::session::SessionOverrideTable;
pub use crate::tracker::WaitingTracker;

pub use toolgate_core::prelude::*;
