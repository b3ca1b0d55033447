//! # CoFHE Session Core
//!
//! Pure types for the CoFHE session layer: identifiers, permits, session
//! state, and configuration.
//!
//! This crate contains no I/O, no stores, no SDK calls. It is pure data
//! shared by the store and session crates.
//!
//! ## Key Types
//!
//! - [`Permit`] - A signed authorization credential for unsealing values
//! - [`PermitHash`] - Content-addressed permit identifier (Blake3 hash)
//! - [`SessionState`] - Readiness flags for the singleton FHE session
//! - [`FheConfig`] - Per-initialization configuration with documented defaults
//! - [`CallError`] - The normalized failure shape for external SDK calls

pub mod call;
pub mod config;
pub mod error;
pub mod permit;
pub mod session;
pub mod types;
pub mod values;

pub use call::{CallError, CallResult, UNKNOWN_ERROR};
pub use config::{Environment, FheConfig, FheConfigPatch};
pub use error::CoreError;
pub use permit::{Permit, PermitOptions};
pub use session::SessionState;
pub use types::{AccountId, ChainId, CiphertextHandle, PermitHash};
pub use values::{Encryptable, EncryptedInput, FheType};
