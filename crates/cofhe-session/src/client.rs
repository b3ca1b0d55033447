//! The wallet/chain client pair.
//!
//! Supplied by the host environment and never owned by this layer; the
//! session only reads the current chain, account, and connection status
//! from it.

use cofhe_session_core::{AccountId, ChainId};

/// Read-only accessors for the host's connected wallet/chain client pair.
///
/// Values may change between calls (the user switches accounts or chains in
/// the wallet); the session re-reads them on every initialization attempt.
pub trait ClientPair: Send + Sync {
    /// The chain the public client is connected to.
    fn chain_id(&self) -> ChainId;

    /// The wallet's active account, if any.
    fn account(&self) -> Option<AccountId>;

    /// Whether the wallet is connected.
    fn is_connected(&self) -> bool;
}
