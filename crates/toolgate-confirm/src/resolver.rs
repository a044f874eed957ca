//! The effective-mode precedence algorithm.
//!
//! Pure functions over plain snapshots: the caller supplies the persisted
//! document and the session's override map; nothing here reads ambient
//! state or performs I/O.
//!
//! # Precedence (first match wins)
//!
//! 1. Session override for the tool
//! 2. Persisted per-tool entry
//! 3. Persisted wildcard (`"*"`) entry — except a wildcard
//!    `AlwaysAllow` is **not** inherited by a sensitive tool (a user who
//!    auto-allows everything must not unknowingly auto-allow a tool its
//!    author marked dangerous); a wildcard `Disabled` is inherited even
//!    then, since a blanket deny is always safe to inherit
//! 4. Built-in default: `Confirm` for sensitive tools, `AlwaysAllow`
//!    otherwise

use std::collections::HashMap;

use toolgate_core::{PreferenceMap, ToolConfirmationMode, ToolId, ToolSensitivity};

/// Compute the effective confirmation mode for one tool.
///
/// `overrides` is the calling session's override map, if that session has
/// any. An unknown tool and an absent session behave identically to "no
/// entry" and fall through to the wildcard/default steps.
#[must_use]
pub fn resolve(
    prefs: &PreferenceMap,
    overrides: Option<&HashMap<ToolId, ToolConfirmationMode>>,
    tool: &ToolId,
    sensitivity: &ToolSensitivity,
) -> ToolConfirmationMode {
    if let Some(mode) = overrides.and_then(|session| session.get(tool)) {
        return *mode;
    }
    if let Some(mode) = prefs.get(tool) {
        return mode;
    }
    effective_default(prefs, sensitivity)
}

/// The mode a tool falls back to when it has no entry of its own: the
/// wildcard entry where inheritable, else the built-in default.
///
/// This is the shared helper behind both [`resolve`] and the writeback
/// minimization rule (an entry is persisted only when it differs from this
/// value), so the two can never drift apart.
#[must_use]
pub fn effective_default(
    prefs: &PreferenceMap,
    sensitivity: &ToolSensitivity,
) -> ToolConfirmationMode {
    match prefs.wildcard() {
        // Wildcard auto-allow does not extend to sensitive tools.
        Some(ToolConfirmationMode::AlwaysAllow) if sensitivity.is_sensitive() => {
            ToolConfirmationMode::Confirm
        },
        Some(mode) => mode,
        None if sensitivity.is_sensitive() => ToolConfirmationMode::Confirm,
        None => ToolConfirmationMode::AlwaysAllow,
    }
}
