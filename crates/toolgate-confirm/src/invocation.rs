//! One tool call's confirmation lifecycle.
//!
//! An [`Invocation`] is created per tool call with the tool's resolved
//! mode and mediates between policy and the asynchronous arrival of a user
//! decision. The execution pipeline observes it through a
//! [`ConfirmationHandle`]: `confirmed()` must settle before the tool body
//! runs, and `needs_user_confirmation()` tells the UI when to present a
//! decision surface (never poll the pending state).
//!
//! The original promise pair is re-expressed as two one-shot `watch`
//! latches; cancellation is the explicit
//! [`Canceled`](ConfirmationOutcome::Canceled) outcome, not a channel
//! failure.

use std::sync::{Mutex, MutexGuard};

use tokio::sync::watch;
use tracing::debug;

use toolgate_core::{
    DecisionScope, InvocationId, SessionId, Timestamp, ToolConfirmationMode, ToolId,
    ToolSensitivity,
};

use crate::error::{ConfirmError, ConfirmResult};
use crate::machine::{ConfirmationEvent, ConfirmationState, ConfirmationStateMachine};
use crate::manager::ConfirmationManager;
use crate::outcome::ConfirmationOutcome;

/// Reason attached to automatic denials of disabled tools.
const DISABLED_REASON: &str = "tool is disabled by confirmation policy";

/// One tool call tracked through its confirmation lifecycle.
pub struct Invocation {
    id: InvocationId,
    tool_id: ToolId,
    session_id: SessionId,
    sensitivity: ToolSensitivity,
    created_at: Timestamp,
    manager: ConfirmationManager,
    machine: Mutex<ConfirmationStateMachine>,
    outcome_tx: watch::Sender<Option<ConfirmationOutcome>>,
    waiting_tx: watch::Sender<bool>,
}

impl Invocation {
    /// Construct the invocation in the state its resolved mode dictates.
    pub(crate) fn start(
        manager: ConfirmationManager,
        tool_id: ToolId,
        session_id: SessionId,
        sensitivity: ToolSensitivity,
        mode: ToolConfirmationMode,
    ) -> Self {
        let (outcome_tx, _) = watch::channel(None);
        let (waiting_tx, _) = watch::channel(false);

        let invocation = Self {
            id: InvocationId::new(),
            tool_id,
            session_id,
            sensitivity,
            created_at: Timestamp::now(),
            manager,
            machine: Mutex::new(ConfirmationStateMachine::for_mode(mode)),
            outcome_tx,
            waiting_tx,
        };

        match mode {
            ToolConfirmationMode::AlwaysAllow => {
                invocation
                    .outcome_tx
                    .send_replace(Some(ConfirmationOutcome::Allowed));
            },
            ToolConfirmationMode::Disabled => {
                invocation
                    .outcome_tx
                    .send_replace(Some(ConfirmationOutcome::Denied {
                        reason: Some(DISABLED_REASON.to_string()),
                    }));
            },
            ToolConfirmationMode::Confirm => {},
        }

        debug!(invocation = %invocation.id, tool = %invocation.tool_id, %mode, "invocation started");
        invocation
    }

    fn machine(&self) -> MutexGuard<'_, ConfirmationStateMachine> {
        self.machine.lock().unwrap_or_else(|e| {
            tracing::warn!("invocation state lock poisoned, recovering");
            e.into_inner()
        })
    }

    /// Unique id of this invocation.
    #[must_use]
    pub fn id(&self) -> &InvocationId {
        &self.id
    }

    /// The tool being invoked.
    #[must_use]
    pub fn tool_id(&self) -> &ToolId {
        &self.tool_id
    }

    /// The session this invocation runs in.
    #[must_use]
    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    /// The tool's sensitivity declaration.
    #[must_use]
    pub fn sensitivity(&self) -> &ToolSensitivity {
        &self.sensitivity
    }

    /// When the invocation was created.
    #[must_use]
    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Current lifecycle state.
    #[must_use]
    pub fn state(&self) -> ConfirmationState {
        self.machine().state()
    }

    /// Check whether the outcome has settled.
    #[must_use]
    pub fn is_settled(&self) -> bool {
        self.state().is_terminal()
    }

    /// The settled outcome, if any.
    #[must_use]
    pub fn outcome(&self) -> Option<ConfirmationOutcome> {
        self.outcome_tx.borrow().clone()
    }

    /// The denial reason; only meaningful for denied invocations.
    #[must_use]
    pub fn result_reason(&self) -> Option<String> {
        self.outcome_tx
            .borrow()
            .as_ref()
            .and_then(|outcome| outcome.denial_reason().map(str::to_string))
    }

    /// Signal that this invocation needs interactive input
    /// (`Pending → Waiting`).
    ///
    /// Fires the `needs_user_confirmation` latch and registers with the
    /// manager's [`WaitingTracker`](crate::WaitingTracker), if one is
    /// attached. Ignored on settled or canceled invocations: the
    /// cancellation flag beats a late waiting signal.
    pub fn require_user_input(&self) {
        let fired = self.machine().apply(ConfirmationEvent::InputRequired);
        if fired == Some(ConfirmationState::Waiting) {
            self.waiting_tx.send_replace(true);
            if let Some(tracker) = self.manager.waiting_tracker() {
                tracker.mark_waiting(self.id.clone());
            }
            debug!(invocation = %self.id, tool = %self.tool_id, "awaiting user decision");
        }
    }

    /// Record the user's approval.
    ///
    /// Routes the writeback by `scope` (`Once` stores nothing, `Session`
    /// writes the in-memory override, `Forever` persists), then settles the
    /// outcome as [`Allowed`](ConfirmationOutcome::Allowed).
    ///
    /// For `Forever` on a sensitive tool, obtaining the secondary explicit
    /// confirmation is the caller's responsibility; the engine trusts the
    /// scope argument.
    ///
    /// # Errors
    ///
    /// [`ConfirmError::Storage`] if a `Forever` write fails — the
    /// invocation then remains undecided so the caller can retry or choose
    /// a narrower scope. [`ConfirmError::AlreadyResolved`] if the outcome
    /// has already settled (including a cancellation that won the race).
    pub async fn allow(&self, scope: DecisionScope) -> ConfirmResult<()> {
        self.decide(true, None, scope).await
    }

    /// Record the user's denial, with an optional free-text reason that is
    /// propagated to the execution pipeline as context.
    ///
    /// # Errors
    ///
    /// Same as [`allow`](Self::allow).
    pub async fn deny(&self, scope: DecisionScope, reason: Option<String>) -> ConfirmResult<()> {
        self.decide(false, reason, scope).await
    }

    async fn decide(
        &self,
        approved: bool,
        reason: Option<String>,
        scope: DecisionScope,
    ) -> ConfirmResult<()> {
        if self.machine().state().is_terminal() {
            return Err(ConfirmError::AlreadyResolved {
                invocation: self.id.clone(),
            });
        }

        // Writeback first: a failed forever-write surfaces here and must
        // not masquerade as a settled decision.
        let mode = if approved {
            ToolConfirmationMode::AlwaysAllow
        } else {
            ToolConfirmationMode::Disabled
        };
        match scope {
            DecisionScope::Once => {},
            DecisionScope::Session => {
                self.manager
                    .set_session_mode(self.tool_id.clone(), mode, &self.session_id);
            },
            DecisionScope::Forever => {
                self.manager
                    .set_persistent_mode(&self.tool_id, mode, &self.sensitivity)
                    .await?;
            },
        }

        match self.machine().apply(ConfirmationEvent::Decide { approved }) {
            Some(_) => {
                let outcome = if approved {
                    ConfirmationOutcome::Allowed
                } else {
                    ConfirmationOutcome::Denied { reason }
                };
                debug!(invocation = %self.id, tool = %self.tool_id, %outcome, %scope, "decision recorded");
                self.outcome_tx.send_replace(Some(outcome));
                self.settle_tracking();
                Ok(())
            },
            // A concurrent cancellation (or duplicate decision) won.
            None => Err(ConfirmError::AlreadyResolved {
                invocation: self.id.clone(),
            }),
        }
    }

    /// Force a non-terminal invocation into `Rejected` because the
    /// surrounding request was canceled.
    ///
    /// Race-free against a simultaneous decision: whichever settles the
    /// machine first wins, and once cancellation is observed no later
    /// signal re-enters any state. Ignored on settled invocations.
    pub fn cancel(&self) {
        if self.machine().apply(ConfirmationEvent::Cancel).is_some() {
            self.outcome_tx
                .send_replace(Some(ConfirmationOutcome::Canceled));
            self.settle_tracking();
            debug!(invocation = %self.id, tool = %self.tool_id, "canceled before decision");
        }
    }

    fn settle_tracking(&self) {
        if let Some(tracker) = self.manager.waiting_tracker() {
            tracker.mark_settled(&self.id);
        }
    }

    /// An observer handle for the execution pipeline and UI.
    #[must_use]
    pub fn handle(&self) -> ConfirmationHandle {
        ConfirmationHandle {
            outcome: self.outcome_tx.subscribe(),
            waiting: self.waiting_tx.subscribe(),
        }
    }
}

impl std::fmt::Debug for Invocation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Invocation")
            .field("id", &self.id)
            .field("tool_id", &self.tool_id)
            .field("session_id", &self.session_id)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

/// The observable half of an invocation.
///
/// Cloneable; every clone observes the same settle-once latches.
#[derive(Debug, Clone)]
pub struct ConfirmationHandle {
    outcome: watch::Receiver<Option<ConfirmationOutcome>>,
    waiting: watch::Receiver<bool>,
}

impl ConfirmationHandle {
    /// Wait for the confirmation to settle.
    ///
    /// The execution pipeline must await this before running the tool
    /// body. If the engine side is dropped before a decision, the
    /// invocation counts as canceled.
    pub async fn confirmed(&mut self) -> ConfirmationOutcome {
        match self.outcome.wait_for(Option::is_some).await {
            Ok(outcome) => (*outcome).clone().unwrap_or(ConfirmationOutcome::Canceled),
            Err(_) => ConfirmationOutcome::Canceled,
        }
    }

    /// Wait until the engine knows it must ask a human.
    ///
    /// Also completes once the invocation settles without interaction, so
    /// an observer of an auto-allowed, disabled, or canceled invocation
    /// never stalls; check [`settled`](Self::settled) to tell the cases
    /// apart.
    pub async fn needs_user_confirmation(&mut self) {
        let mut outcome = self.outcome.clone();
        tokio::select! {
            waiting = self.waiting.wait_for(|waiting| *waiting) => {
                let _ = waiting;
            },
            settled = outcome.wait_for(Option::is_some) => {
                let _ = settled;
            },
        }
    }

    /// The settled outcome, or `None` while undecided.
    #[must_use]
    pub fn settled(&self) -> Option<ConfirmationOutcome> {
        self.outcome.borrow().clone()
    }

    /// Check whether a user decision is currently outstanding.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        *self.waiting.borrow() && self.outcome.borrow().is_none()
    }
}

#[cfg(test)]
#[path = "invocation_tests.rs"]
mod tests;
