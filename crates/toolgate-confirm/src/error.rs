use toolgate_core::{InvocationId, ToolId};

/// Errors that can occur while resolving or settling a confirmation.
#[derive(Debug, thiserror::Error)]
pub enum ConfirmError {
    /// The preference substrate failed; no in-memory state was changed.
    #[error("storage error: {0}")]
    Storage(#[from] toolgate_storage::StorageError),

    /// A decision arrived for an invocation that has already settled.
    ///
    /// The decision surface contract is exactly-once; a second decision (or
    /// one racing a cancellation that won) is reported rather than silently
    /// overwriting the outcome.
    #[error("invocation already resolved: {invocation}")]
    AlreadyResolved {
        /// The invocation that was already settled.
        invocation: InvocationId,
    },

    /// The requested tool does not exist in the registry.
    ///
    /// Never produced by the confirmation engine itself; reserved so the
    /// execution pipeline can report registry misses through the same error
    /// type and callers can tell them apart from denials.
    #[error("tool not available: {tool}")]
    ToolNotAvailable {
        /// The unknown tool.
        tool: ToolId,
    },
}

impl ConfirmError {
    /// Check whether this error is the registry-miss kind.
    #[must_use]
    pub fn is_tool_not_available(&self) -> bool {
        matches!(self, Self::ToolNotAvailable { .. })
    }
}

/// Result type for confirmation operations.
pub type ConfirmResult<T> = Result<T, ConfirmError>;
