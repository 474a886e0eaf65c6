//! Domain-level errors (no external dependencies)

use thiserror::Error;

/// Domain errors represent structural violations of a navigation tree.
/// These are independent of where the tree was read from.
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("malformed navigation tree at {path}: {reason}")]
    MalformedTree { path: String, reason: String },

    #[error("cycle detected in deferred subtree: {0}")]
    CycleDetected(String),

    #[error("deferred subtree script not found: {0}")]
    MissingScript(String),

    #[error("navigation document already installed")]
    AlreadyInstalled,
}

impl DomainError {
    /// Create a malformed-tree error for the node at `path`.
    pub fn malformed(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedTree {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Result type for domain operations.
pub type DomainResult<T> = Result<T, DomainError>;
