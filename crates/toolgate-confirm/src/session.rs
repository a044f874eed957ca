//! In-memory per-session confirmation overrides.

use std::collections::HashMap;
use std::fmt;
use std::sync::RwLock;

use toolgate_core::{SessionId, ToolConfirmationMode, ToolId};

/// Ephemeral session-scoped mode overrides.
///
/// Thread-safe via internal [`RwLock`]. Entries are never serialized and do
/// not survive a restart: a session's sub-map is created on its first
/// override and destroyed when the session's overrides are cleared.
///
/// # Example
///
/// ```
/// use toolgate_confirm::SessionOverrideTable;
///
/// let table = SessionOverrideTable::new();
/// assert_eq!(table.session_count(), 0);
/// ```
pub struct SessionOverrideTable {
    overrides: RwLock<HashMap<SessionId, HashMap<ToolId, ToolConfirmationMode>>>,
}

impl SessionOverrideTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            overrides: RwLock::new(HashMap::new()),
        }
    }

    /// Set a session's override for one tool, creating the session's
    /// sub-map on first use. Last writer wins.
    pub fn set(&self, session: &SessionId, tool: ToolId, mode: ToolConfirmationMode) {
        let mut table = self.overrides.write().unwrap_or_else(|e| {
            tracing::warn!("SessionOverrideTable lock poisoned, recovering");
            e.into_inner()
        });
        table.entry(session.clone()).or_default().insert(tool, mode);
    }

    /// Look up one session's override for one tool.
    #[must_use]
    pub fn get(&self, session: &SessionId, tool: &ToolId) -> Option<ToolConfirmationMode> {
        let table = self.overrides.read().unwrap_or_else(|e| {
            tracing::warn!("SessionOverrideTable read lock poisoned, recovering");
            e.into_inner()
        });
        table.get(session).and_then(|tools| tools.get(tool)).copied()
    }

    /// Clone one session's full override map for the resolver.
    ///
    /// Returns `None` for a session with no overrides, which the resolver
    /// treats the same as an empty map.
    #[must_use]
    pub fn snapshot(&self, session: &SessionId) -> Option<HashMap<ToolId, ToolConfirmationMode>> {
        let table = self.overrides.read().unwrap_or_else(|e| {
            tracing::warn!("SessionOverrideTable read lock poisoned, recovering");
            e.into_inner()
        });
        table.get(session).cloned()
    }

    /// Drop one session's overrides, or every session's when `None`.
    pub fn clear(&self, session: Option<&SessionId>) {
        let mut table = self.overrides.write().unwrap_or_else(|e| {
            tracing::warn!("SessionOverrideTable lock poisoned, recovering");
            e.into_inner()
        });
        match session {
            Some(session) => {
                table.remove(session);
            },
            None => table.clear(),
        }
    }

    /// Number of sessions that currently hold overrides.
    #[must_use]
    pub fn session_count(&self) -> usize {
        self.overrides.read().map(|table| table.len()).unwrap_or(0)
    }
}

impl Default for SessionOverrideTable {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SessionOverrideTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionOverrideTable")
            .field("session_count", &self.session_count())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_and_get() {
        let table = SessionOverrideTable::new();
        let chat1 = SessionId::new("chat-1");

        assert_eq!(table.get(&chat1, &ToolId::new("myTool")), None);

        table.set(&chat1, ToolId::new("myTool"), ToolConfirmationMode::AlwaysAllow);
        assert_eq!(
            table.get(&chat1, &ToolId::new("myTool")),
            Some(ToolConfirmationMode::AlwaysAllow)
        );
        assert_eq!(table.session_count(), 1);
    }

    #[test]
    fn test_overrides_are_session_scoped() {
        let table = SessionOverrideTable::new();
        table.set(
            &SessionId::new("chat-1"),
            ToolId::new("myTool"),
            ToolConfirmationMode::Disabled,
        );

        assert_eq!(
            table.get(&SessionId::new("chat-2"), &ToolId::new("myTool")),
            None
        );
    }

    #[test]
    fn test_last_writer_wins() {
        let table = SessionOverrideTable::new();
        let chat1 = SessionId::new("chat-1");
        table.set(&chat1, ToolId::new("myTool"), ToolConfirmationMode::Confirm);
        table.set(&chat1, ToolId::new("myTool"), ToolConfirmationMode::Disabled);

        assert_eq!(
            table.get(&chat1, &ToolId::new("myTool")),
            Some(ToolConfirmationMode::Disabled)
        );
    }

    #[test]
    fn test_clear_one_session() {
        let table = SessionOverrideTable::new();
        table.set(
            &SessionId::new("chat-1"),
            ToolId::new("myTool"),
            ToolConfirmationMode::AlwaysAllow,
        );
        table.set(
            &SessionId::new("chat-2"),
            ToolId::new("myTool"),
            ToolConfirmationMode::Disabled,
        );

        table.clear(Some(&SessionId::new("chat-1")));

        assert_eq!(
            table.get(&SessionId::new("chat-1"), &ToolId::new("myTool")),
            None
        );
        assert_eq!(
            table.get(&SessionId::new("chat-2"), &ToolId::new("myTool")),
            Some(ToolConfirmationMode::Disabled)
        );
    }

    #[test]
    fn test_clear_all_sessions() {
        let table = SessionOverrideTable::new();
        table.set(
            &SessionId::new("chat-1"),
            ToolId::new("myTool"),
            ToolConfirmationMode::AlwaysAllow,
        );
        table.set(
            &SessionId::new("chat-2"),
            ToolId::new("myTool"),
            ToolConfirmationMode::Disabled,
        );

        table.clear(None);
        assert_eq!(table.session_count(), 0);
    }

    #[test]
    fn test_snapshot_clones_session_map() {
        let table = SessionOverrideTable::new();
        let chat1 = SessionId::new("chat-1");
        assert!(table.snapshot(&chat1).is_none());

        table.set(&chat1, ToolId::new("toolA"), ToolConfirmationMode::Confirm);
        table.set(&chat1, ToolId::new("toolB"), ToolConfirmationMode::Disabled);

        let snapshot = table.snapshot(&chat1).unwrap();
        assert_eq!(snapshot.len(), 2);
        assert_eq!(
            snapshot.get(&ToolId::new("toolA")),
            Some(&ToolConfirmationMode::Confirm)
        );
    }
}
