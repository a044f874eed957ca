//! The persisted preference document.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::mode::ToolConfirmationMode;
use crate::types::ToolId;

/// Tool-id to confirmation-mode map, persisted as one atomic document so
/// that reads and writes are consistent snapshots.
///
/// The document is kept minimal: an entry exists only when its value differs
/// from the mode that would otherwise be computed for that tool (see the
/// engine's writeback rules). The `"*"` key is the wildcard fallback.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PreferenceMap(HashMap<ToolId, ToolConfirmationMode>);

impl PreferenceMap {
    /// Create an empty preference document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Look up the entry for a tool.
    #[must_use]
    pub fn get(&self, tool: &ToolId) -> Option<ToolConfirmationMode> {
        self.0.get(tool).copied()
    }

    /// Look up the wildcard (`"*"`) entry.
    #[must_use]
    pub fn wildcard(&self) -> Option<ToolConfirmationMode> {
        self.0.get(&ToolId::wildcard()).copied()
    }

    /// Insert or replace a tool's entry, returning the previous value.
    pub fn insert(
        &mut self,
        tool: ToolId,
        mode: ToolConfirmationMode,
    ) -> Option<ToolConfirmationMode> {
        self.0.insert(tool, mode)
    }

    /// Remove a tool's entry, returning the removed value.
    pub fn remove(&mut self, tool: &ToolId) -> Option<ToolConfirmationMode> {
        self.0.remove(tool)
    }

    /// Check whether a tool has an entry.
    #[must_use]
    pub fn contains(&self, tool: &ToolId) -> bool {
        self.0.contains_key(tool)
    }

    /// Number of entries in the document.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Check whether the document has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterate over all entries.
    pub fn iter(&self) -> impl Iterator<Item = (&ToolId, &ToolConfirmationMode)> {
        self.0.iter()
    }
}

impl FromIterator<(ToolId, ToolConfirmationMode)> for PreferenceMap {
    fn from_iter<I: IntoIterator<Item = (ToolId, ToolConfirmationMode)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let mut prefs = PreferenceMap::new();
        assert!(prefs.is_empty());

        prefs.insert(ToolId::new("toolA"), ToolConfirmationMode::Disabled);
        assert_eq!(
            prefs.get(&ToolId::new("toolA")),
            Some(ToolConfirmationMode::Disabled)
        );
        assert!(prefs.contains(&ToolId::new("toolA")));
        assert_eq!(prefs.len(), 1);

        assert_eq!(
            prefs.remove(&ToolId::new("toolA")),
            Some(ToolConfirmationMode::Disabled)
        );
        assert!(prefs.is_empty());
    }

    #[test]
    fn test_wildcard_lookup() {
        let prefs: PreferenceMap = [(ToolId::wildcard(), ToolConfirmationMode::Confirm)]
            .into_iter()
            .collect();
        assert_eq!(prefs.wildcard(), Some(ToolConfirmationMode::Confirm));
        assert_eq!(prefs.get(&ToolId::new("other")), None);
    }

    #[test]
    fn test_serializes_as_bare_object() {
        let prefs: PreferenceMap = [(ToolId::new("shellExecute"), ToolConfirmationMode::AlwaysAllow)]
            .into_iter()
            .collect();
        let json = serde_json::to_string(&prefs).unwrap();
        assert_eq!(json, r#"{"shellExecute":"always_allow"}"#);

        let back: PreferenceMap = serde_json::from_str(&json).unwrap();
        assert_eq!(back, prefs);
    }
}
