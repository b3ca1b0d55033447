//! The session store: readiness flags for the singleton FHE session.

use cofhe_session_core::{AccountId, ChainId, SessionState};

use crate::watch::{Subscription, Watchable};

/// Process-wide reactive holder of [`SessionState`].
///
/// All mutation funnels through the setters below; the initializer is the
/// only writer. Clones share the underlying state.
#[derive(Clone)]
pub struct SessionStore {
    inner: Watchable<SessionState>,
}

impl SessionStore {
    /// Create a fresh store: all flags false, no account.
    pub fn new() -> Self {
        Self {
            inner: Watchable::new(SessionState::default()),
        }
    }

    /// Snapshot of the current state.
    pub fn state(&self) -> SessionState {
        self.inner.get()
    }

    /// Register a listener for state changes.
    pub fn subscribe(&self, listener: impl Fn(&SessionState) + Send + Sync + 'static) -> Subscription {
        self.inner.subscribe(listener)
    }

    /// Register a listener, seeded immediately with the current state.
    pub fn watch(&self, listener: impl Fn(&SessionState) + Send + Sync + 'static) -> Subscription {
        self.inner.watch(listener)
    }

    /// Record the wallet/chain context, resetting readiness if it changed.
    ///
    /// Invalidates all derived readiness synchronously, regardless of any
    /// in-flight initialization. Returns true if a reset happened.
    pub fn sync_context(&self, chain_id: Option<ChainId>, account: Option<AccountId>) -> bool {
        self.inner.update(|state| {
            if state.chain_id == chain_id && state.account == account {
                return false;
            }
            tracing::debug!(?chain_id, ?account, "session context changed, resetting readiness");
            state.chain_id = chain_id;
            state.account = account;
            state.provider_initialized = false;
            state.signer_initialized = false;
            state.fhe_keys_initialized = false;
            state.last_error = None;
            true
        })
    }

    /// Flip the session to ready and clear any stale error.
    pub fn mark_ready(&self) {
        self.inner.update(|state| {
            state.provider_initialized = true;
            state.signer_initialized = true;
            state.fhe_keys_initialized = true;
            state.last_error = None;
        });
    }

    /// Record a failed attempt. Readiness flags are left untouched; a failed
    /// initialization never set them in the first place.
    pub fn set_error(&self, message: impl Into<String>) {
        let message = message.into();
        self.inner.update(|state| {
            state.last_error = Some(message);
        });
    }

    /// Clear the recorded error (start of a new attempt).
    pub fn clear_error(&self) {
        self.inner.update(|state| {
            state.last_error = None;
        });
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn account(byte: u8) -> AccountId {
        AccountId::from_bytes([byte; 20])
    }

    #[test]
    fn test_initial_state_not_ready() {
        let store = SessionStore::new();
        let state = store.state();
        assert!(!state.ready());
        assert!(state.account.is_none());
        assert!(state.last_error.is_none());
    }

    #[test]
    fn test_context_change_resets_readiness() {
        let store = SessionStore::new();
        store.sync_context(Some(ChainId::new(1)), Some(account(1)));
        store.mark_ready();
        assert!(store.state().ready());

        // Same context: no reset.
        assert!(!store.sync_context(Some(ChainId::new(1)), Some(account(1))));
        assert!(store.state().ready());

        // Account switch: synchronous reset.
        assert!(store.sync_context(Some(ChainId::new(1)), Some(account(2))));
        assert!(!store.state().ready());

        // Chain switch too.
        store.mark_ready();
        assert!(store.sync_context(Some(ChainId::new(5)), Some(account(2))));
        assert!(!store.state().ready());
    }

    #[test]
    fn test_context_change_clears_error() {
        let store = SessionStore::new();
        store.sync_context(Some(ChainId::new(1)), Some(account(1)));
        store.set_error("network down");
        assert!(store.state().last_error.is_some());

        store.sync_context(Some(ChainId::new(1)), Some(account(2)));
        assert!(store.state().last_error.is_none());
    }

    #[test]
    fn test_mark_ready_clears_error() {
        let store = SessionStore::new();
        store.set_error("transient");
        store.mark_ready();
        let state = store.state();
        assert!(state.ready());
        assert!(state.last_error.is_none());
    }
}
