//! Error types for the core crate.

use thiserror::Error;

/// Core errors that can occur working with session-layer data types.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("invalid account address: {0}")]
    InvalidAccount(String),

    #[error("decoding error: {0}")]
    DecodingError(String),
}
