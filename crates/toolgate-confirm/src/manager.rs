//! Confirmation manager — resolution entry point and scope writeback.
//!
//! The [`ConfirmationManager`] owns the two layers of confirmation state:
//! the persisted [`PreferenceMap`](toolgate_core::PreferenceMap) (behind
//! the host's [`PreferenceStore`]) and the ephemeral
//! [`SessionOverrideTable`]. It resolves effective modes, routes a
//! decision's writeback to the layer its scope names, and constructs
//! [`Invocation`]s for incoming tool calls.
//!
//! # Writeback routing
//!
//! | scope | target |
//! |---------|-----------------------------------------|
//! | once | nothing is stored |
//! | session | [`SessionOverrideTable`], in memory |
//! | forever | [`PreferenceStore`], atomic full-document write |
//!
//! Persisted entries stay minimal: a forever-write only lands when the mode
//! differs from the tool's effective default, and an entry that returns to
//! its default is removed instead of rewritten.

use std::sync::{Arc, RwLock};

use tokio::sync::Mutex;
use tracing::debug;

use toolgate_core::{SessionId, ToolConfirmationMode, ToolId, ToolRequest, ToolSensitivity};
use toolgate_storage::PreferenceStore;

use crate::error::ConfirmResult;
use crate::invocation::Invocation;
use crate::resolver;
use crate::session::SessionOverrideTable;
use crate::tracker::WaitingTracker;

/// The confirmation engine's stateful entry point.
///
/// A cheap-to-clone handle over shared state; every [`Invocation`] carries
/// one back to route its decision writeback.
#[derive(Clone)]
pub struct ConfirmationManager {
    inner: Arc<ManagerInner>,
}

struct ManagerInner {
    /// Durable preference substrate (host-provided).
    store: Arc<dyn PreferenceStore>,
    /// Ephemeral per-session overrides.
    overrides: SessionOverrideTable,
    /// Serializes every persistent read-modify-write cycle.
    write_lock: Mutex<()>,
    /// Optional waiting-set aggregation for presentation.
    waiting_tracker: RwLock<Option<Arc<WaitingTracker>>>,
}

impl ConfirmationManager {
    /// Create a manager over a preference store.
    #[must_use]
    pub fn new(store: Arc<dyn PreferenceStore>) -> Self {
        Self {
            inner: Arc::new(ManagerInner {
                store,
                overrides: SessionOverrideTable::new(),
                write_lock: Mutex::new(()),
                waiting_tracker: RwLock::new(None),
            }),
        }
    }

    /// Attach a [`WaitingTracker`] that aggregates invocations in `Waiting`.
    pub fn set_waiting_tracker(&self, tracker: Arc<WaitingTracker>) {
        let mut slot = self.inner.waiting_tracker.write().unwrap_or_else(|e| {
            tracing::warn!("waiting tracker slot poisoned, recovering");
            e.into_inner()
        });
        *slot = Some(tracker);
    }

    pub(crate) fn waiting_tracker(&self) -> Option<Arc<WaitingTracker>> {
        self.inner
            .waiting_tracker
            .read()
            .map(|slot| slot.clone())
            .unwrap_or(None)
    }

    /// Compute the effective confirmation mode for a tool in a session.
    ///
    /// Reads a snapshot of the persisted document and applies the
    /// precedence rules in [`resolver`]. Unknown tools and sessions are not
    /// errors; they fall through to the wildcard/default steps.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the snapshot read fails.
    pub async fn resolve_mode(
        &self,
        tool: &ToolId,
        session: &SessionId,
        sensitivity: &ToolSensitivity,
    ) -> ConfirmResult<ToolConfirmationMode> {
        let prefs = self.inner.store.read().await?;
        let overrides = self.inner.overrides.snapshot(session);
        let mode = resolver::resolve(&prefs, overrides.as_ref(), tool, sensitivity);
        debug!(%tool, %session, %mode, "resolved confirmation mode");
        Ok(mode)
    }

    /// Persist a tool's confirmation mode globally (`forever` scope).
    ///
    /// The stored document is kept minimal: when `mode` equals the tool's
    /// effective default the entry is removed instead of written, and the
    /// store write is skipped entirely when there was no entry to remove.
    /// The new document is computed in full before the write, so an I/O
    /// failure leaves both the stored document and all in-memory state
    /// untouched.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the read or the atomic write fails.
    pub async fn set_persistent_mode(
        &self,
        tool: &ToolId,
        mode: ToolConfirmationMode,
        sensitivity: &ToolSensitivity,
    ) -> ConfirmResult<()> {
        let _guard = self.inner.write_lock.lock().await;

        let mut prefs = self.inner.store.read().await?;
        let default = resolver::effective_default(&prefs, sensitivity);

        if mode == default {
            if prefs.remove(tool).is_none() {
                debug!(%tool, %mode, "mode matches effective default, nothing to persist");
                return Ok(());
            }
            debug!(%tool, %mode, "mode returned to effective default, removing entry");
        } else {
            prefs.insert(tool.clone(), mode);
            debug!(%tool, %mode, "persisting confirmation mode");
        }

        self.inner.store.write(&prefs).await?;
        Ok(())
    }

    /// Override a tool's mode for one session (`session` scope).
    ///
    /// Unconditional in-memory write: no default comparison, no
    /// persistence, gone when the session's overrides are cleared.
    pub fn set_session_mode(&self, tool: ToolId, mode: ToolConfirmationMode, session: &SessionId) {
        debug!(%tool, %session, %mode, "setting session override");
        self.inner.overrides.set(session, tool, mode);
    }

    /// Drop one session's overrides, or every session's when `None`.
    pub fn clear_session_overrides(&self, session: Option<&SessionId>) {
        self.inner.overrides.clear(session);
    }

    /// Start the confirmation lifecycle for one tool call.
    ///
    /// Resolves the tool's effective mode and constructs the invocation in
    /// the state that mode dictates: auto-allowed and disabled invocations
    /// settle immediately; `Confirm` invocations wait for the interactive
    /// protocol.
    ///
    /// # Errors
    ///
    /// Returns a storage error if reading the preference snapshot fails.
    pub async fn begin_invocation(
        &self,
        request: &ToolRequest,
        session: &SessionId,
    ) -> ConfirmResult<Invocation> {
        let mode = self
            .resolve_mode(&request.id, session, &request.sensitivity)
            .await?;
        Ok(Invocation::start(
            self.clone(),
            request.id.clone(),
            session.clone(),
            request.sensitivity.clone(),
            mode,
        ))
    }

    /// The ephemeral override table (for session teardown integration).
    #[must_use]
    pub fn session_overrides(&self) -> &SessionOverrideTable {
        &self.inner.overrides
    }
}

impl std::fmt::Debug for ConfirmationManager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConfirmationManager")
            .field("overrides", &self.inner.overrides)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
