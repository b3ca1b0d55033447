//! Error types for the store crate.

use cofhe_session_core::{AccountId, PermitHash};
use thiserror::Error;

/// Errors from store setter operations.
#[derive(Debug, Error)]
pub enum StoreError {
    /// An active pointer would reference a permit that is not cached.
    #[error("no cached permit {hash} for account {account}")]
    UnknownPermit {
        account: AccountId,
        hash: PermitHash,
    },
}

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;
