//! Shared error and result types for NetLearn

use thiserror::Error;

/// Top-level error type for NetLearn operations
#[derive(Debug, Error)]
pub enum NetLearnError {
    /// Input failed local validation; the collaborator was never contacted
    #[error("Validation error: {0}")]
    Validation(String),

    /// The hosted identity/row-store service call failed
    #[error("Collaborator call failed: {0}")]
    Collaborator(String),

    /// A requested record does not exist
    #[error("Not found: {0}")]
    NotFound(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

/// Convenience result type
pub type Result<T> = std::result::Result<T, NetLearnError>;
