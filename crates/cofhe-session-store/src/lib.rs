//! # CoFHE Session Store
//!
//! Reactive state containers for the CoFHE session layer.
//!
//! ## Overview
//!
//! Two process-wide stores back the session layer:
//!
//! - [`SessionStore`] - readiness flags for the singleton FHE session
//! - [`PermitStore`] - the (chain, account)-scoped permit cache with a
//!   per-account active-permit pointer
//!
//! Both are built on [`Watchable`]: a state container exposing a snapshot
//! accessor, setter-funneled mutation, and observer registration returning a
//! deterministic [`Subscription`] handle. Mutation and notification are
//! serialized; listeners always observe a fully updated state.

pub mod error;
pub mod permits;
pub mod session;
pub mod watch;

pub use error::{Result, StoreError};
pub use permits::{PermitStore, PermitStoreState};
pub use session::SessionStore;
pub use watch::{Subscription, Watchable};
