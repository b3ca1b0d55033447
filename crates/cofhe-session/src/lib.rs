//! # CoFHE Session
//!
//! Client-side session orchestration for an external FHE (fully homomorphic
//! encryption) SDK: initialization tied to a wallet-connected account, the
//! permit lifecycle, and reactive bindings over the shared stores.
//!
//! ## Overview
//!
//! - **Session initialization**: bring the FHE session to ready exactly once
//!   per (chain, account) pair, guarded against duplicate concurrent
//!   attempts, with stale results discarded after a context switch.
//! - **Permits**: create and enumerate the signed credentials that authorize
//!   unsealing encrypted values; one active permit per account.
//! - **Bindings**: push-based views (readiness, account, active permit) that
//!   notify consumers without polling.
//!
//! The cryptography, the co-processor, and the wallet are external
//! collaborators behind the [`FheSdk`] and [`ClientPair`] traits.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use cofhe_session::{FheSession, FheSdk, ClientPair};
//! use cofhe_session::core::PermitOptions;
//!
//! async fn example<S: FheSdk, C: ClientPair>(sdk: Arc<S>, clients: C) {
//!     let session = FheSession::new(sdk);
//!
//!     // Call on every wallet/chain change; no-ops when nothing to do.
//!     session.initialize(&clients, None).await.ok();
//!
//!     if session.is_initialized() {
//!         let permit = session.create_permit(PermitOptions::default()).await;
//!         let _ = permit;
//!     }
//! }
//! ```

pub mod bindings;
pub mod client;
pub mod error;
pub mod sdk;
pub mod session;

// Re-export component crates
pub use cofhe_session_core as core;
pub use cofhe_session_store as store;

// Re-export main types for convenience
pub use bindings::{
    AccountBinding, ActivePermitBinding, ActivePermitHashBinding, AllPermitsBinding,
    ReadinessBinding,
};
pub use client::ClientPair;
pub use error::{Result, SessionError};
pub use sdk::FheSdk;
pub use session::FheSession;

// Re-export commonly used core types
pub use cofhe_session_core::{
    AccountId, CallError, CallResult, ChainId, CiphertextHandle, Encryptable, EncryptedInput,
    Environment, FheConfig, FheConfigPatch, FheType, Permit, PermitHash, PermitOptions,
    SessionState,
};
