//! Common error types used across the workspace.
//!
//! Each layer defines its own typed errors and converts into
//! [`RoikitError`] via `From`. Nothing in the core is fatal: callers log
//! these errors and keep the in-memory state authoritative.

/// Base error for operations that cross the persistence boundary.
#[derive(Debug, thiserror::Error)]
pub enum RoikitError {
    /// The session store rejected a read, write, or removal.
    #[error("session storage error")]
    Storage(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// A stored value could not be decoded into the expected shape.
    #[error("malformed value stored under `{key}`")]
    Malformed {
        key: &'static str,
        #[source]
        source: serde_json::Error,
    },

    /// State could not be encoded for storage.
    #[error("failed to serialize state")]
    Serialize(#[from] serde_json::Error),
}

/// Raised when text does not name one of the closed roadmap identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown {kind} identifier `{value}`")]
pub struct ParseIdError {
    /// Which identifier family was being parsed (`"week"` or `"task"`).
    pub kind: &'static str,
    /// The rejected input.
    pub value: String,
}
