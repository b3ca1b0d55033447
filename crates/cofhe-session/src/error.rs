//! Error types for session operations.

use cofhe_session_core::CallError;
use cofhe_session_store::StoreError;
use thiserror::Error;

/// Errors surfaced by session and permit operations.
///
/// Externally-callable operations return these as structured results; they
/// are never raised as panics to the caller.
#[derive(Debug, Error)]
pub enum SessionError {
    /// An operation requiring an initialized session ran before readiness.
    #[error("session not ready: {0}")]
    NotReady(String),

    /// The external SDK call reported a failure.
    #[error("external call failed: {0}")]
    Call(#[from] CallError),

    /// Store invariant violation.
    #[error("store error: {0}")]
    Store(#[from] StoreError),

    /// An unexpected fault, normalized at the operation boundary.
    #[error("unknown session error: {0}")]
    Unknown(String),
}

/// Result type for session operations.
pub type Result<T> = std::result::Result<T, SessionError>;
