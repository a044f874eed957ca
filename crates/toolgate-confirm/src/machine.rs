//! The per-invocation confirmation state machine.
//!
//! An explicit event-driven FSM, independent of any UI framework. States:
//!
//! ```text
//! Pending ──► Waiting ──► Allowed
//!    │           │    └──► Denied
//!    │           └────────► Rejected (canceled)
//!    └────────────────────► Allowed | Denied | Rejected
//! ```
//!
//! Transitions are monotonic: no state is re-entered after leaving it.
//! Cancellation takes precedence over any signal arriving after it has been
//! observed, including a late "needs input" notification.

use serde::{Deserialize, Serialize};
use std::fmt;

use toolgate_core::ToolConfirmationMode;

/// Lifecycle state of one invocation's confirmation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConfirmationState {
    /// Mode resolved; no interaction requested yet.
    Pending,
    /// A user decision has been requested and is outstanding.
    Waiting,
    /// Execution may proceed (user approval or auto-allow policy).
    Allowed,
    /// Execution is refused (user denial or disabled policy).
    Denied,
    /// The surrounding request was canceled before a decision was made.
    /// Not a user decision; reported differently from [`Denied`](Self::Denied).
    Rejected,
}

impl ConfirmationState {
    /// Check whether this state ends the invocation's lifecycle.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Allowed | Self::Denied | Self::Rejected)
    }
}

impl fmt::Display for ConfirmationState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "pending"),
            Self::Waiting => write!(f, "waiting"),
            Self::Allowed => write!(f, "allowed"),
            Self::Denied => write!(f, "denied"),
            Self::Rejected => write!(f, "rejected"),
        }
    }
}

/// An event driving the state machine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmationEvent {
    /// The engine has learned it must ask a human (`Pending → Waiting`).
    InputRequired,
    /// A user decision arrived.
    Decide {
        /// `true` for allow, `false` for deny.
        approved: bool,
    },
    /// The surrounding request was canceled.
    Cancel,
}

/// The state machine for one invocation.
///
/// [`apply`](Self::apply) returns the newly entered state, or `None` when
/// the event is ignored (late signals after settling, anything after a
/// cancellation has been observed, duplicate decisions).
#[derive(Debug, Clone)]
pub struct ConfirmationStateMachine {
    state: ConfirmationState,
    canceled: bool,
}

impl ConfirmationStateMachine {
    /// Construct the machine in the state derived from a resolved mode:
    /// auto-allow and disabled settle immediately, confirm stays pending.
    #[must_use]
    pub fn for_mode(mode: ToolConfirmationMode) -> Self {
        let state = match mode {
            ToolConfirmationMode::AlwaysAllow => ConfirmationState::Allowed,
            ToolConfirmationMode::Disabled => ConfirmationState::Denied,
            ToolConfirmationMode::Confirm => ConfirmationState::Pending,
        };
        Self {
            state,
            canceled: false,
        }
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> ConfirmationState {
        self.state
    }

    /// Check whether a cancellation has been observed.
    #[must_use]
    pub fn is_canceled(&self) -> bool {
        self.canceled
    }

    /// Apply one event.
    ///
    /// Returns the newly entered state, or `None` if the event fired no
    /// transition.
    pub fn apply(&mut self, event: ConfirmationEvent) -> Option<ConfirmationState> {
        match event {
            ConfirmationEvent::InputRequired => {
                // The cancellation flag beats a late waiting signal.
                if self.canceled || self.state != ConfirmationState::Pending {
                    tracing::debug!(state = %self.state, "ignoring late input-required signal");
                    return None;
                }
                self.state = ConfirmationState::Waiting;
                Some(self.state)
            },
            ConfirmationEvent::Decide { approved } => {
                if self.canceled || self.state.is_terminal() {
                    return None;
                }
                self.state = if approved {
                    ConfirmationState::Allowed
                } else {
                    ConfirmationState::Denied
                };
                Some(self.state)
            },
            ConfirmationEvent::Cancel => {
                if self.state.is_terminal() {
                    return None;
                }
                self.canceled = true;
                self.state = ConfirmationState::Rejected;
                Some(self.state)
            },
        }
    }
}
