//! Reactive bindings: push-based views over the session and permit stores.
//!
//! Each primitive binding subscribes to one store at construction, seeds its
//! cached value from an immediate snapshot (no initial empty flash), and
//! recomputes exactly once per relevant store change. Dropping a binding
//! removes its listener deterministically; a torn-down binding can never
//! apply a late update.
//!
//! Derived bindings compose the primitive ones instead of subscribing on
//! their own, so there is exactly one subscription chain per primitive fact.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use cofhe_session_core::{AccountId, ChainId, Permit, PermitHash};
use cofhe_session_store::{PermitStore, PermitStoreState, SessionStore, Subscription};

/// Whether the session is ready (all three readiness flags).
pub struct ReadinessBinding {
    value: Arc<RwLock<bool>>,
    _sub: Subscription,
}

impl ReadinessBinding {
    pub fn new(store: &SessionStore) -> Self {
        let value = Arc::new(RwLock::new(false));
        let cache = Arc::clone(&value);
        let sub = store.watch(move |state| {
            *cache.write().unwrap() = state.ready();
        });
        Self { value, _sub: sub }
    }

    pub fn get(&self) -> bool {
        *self.value.read().unwrap()
    }
}

/// The session's active account.
pub struct AccountBinding {
    value: Arc<RwLock<Option<AccountId>>>,
    _sub: Subscription,
}

impl AccountBinding {
    pub fn new(store: &SessionStore) -> Self {
        let value = Arc::new(RwLock::new(None));
        let cache = Arc::clone(&value);
        let sub = store.watch(move |state| {
            *cache.write().unwrap() = state.account;
        });
        Self { value, _sub: sub }
    }

    pub fn get(&self) -> Option<AccountId> {
        *self.value.read().unwrap()
    }
}

/// The per-account active-permit-hash map.
pub struct ActivePermitHashBinding {
    value: Arc<RwLock<HashMap<AccountId, PermitHash>>>,
    _sub: Subscription,
}

impl ActivePermitHashBinding {
    pub fn new(store: &PermitStore) -> Self {
        let value = Arc::new(RwLock::new(HashMap::new()));
        let cache = Arc::clone(&value);
        let sub = store.watch(move |state: &PermitStoreState| {
            *cache.write().unwrap() = state.active.clone();
        });
        Self { value, _sub: sub }
    }

    /// The active hash for one account.
    pub fn get(&self, account: AccountId) -> Option<PermitHash> {
        self.value.read().unwrap().get(&account).copied()
    }

    /// The whole map.
    pub fn all(&self) -> HashMap<AccountId, PermitHash> {
        self.value.read().unwrap().clone()
    }
}

/// All permits cached for the current account.
///
/// `None` until an account is active and the session is initialized,
/// mirroring the underlying lookups.
pub struct AllPermitsBinding {
    account: AccountBinding,
    readiness: ReadinessBinding,
    cache: Arc<RwLock<PermitStoreState>>,
    _sub: Subscription,
}

impl AllPermitsBinding {
    pub fn new(session_store: &SessionStore, permit_store: &PermitStore) -> Self {
        let cache = Arc::new(RwLock::new(PermitStoreState::default()));
        let snapshot = Arc::clone(&cache);
        let sub = permit_store.watch(move |state: &PermitStoreState| {
            *snapshot.write().unwrap() = state.clone();
        });
        Self {
            account: AccountBinding::new(session_store),
            readiness: ReadinessBinding::new(session_store),
            cache,
            _sub: sub,
        }
    }

    pub fn get(&self) -> Option<Vec<Permit>> {
        let account = self.account.get()?;
        if !self.readiness.get() {
            return None;
        }
        Some(self.cache.read().unwrap().all_for_account(account))
    }
}

/// The active permit for the currently connected account.
///
/// Derived: recomputes purely from the primitive bindings plus the permit
/// store's pure lookup; holds no subscription of its own.
pub struct ActivePermitBinding {
    account: AccountBinding,
    readiness: ReadinessBinding,
    hashes: ActivePermitHashBinding,
    permit_store: PermitStore,
}

impl ActivePermitBinding {
    pub fn new(session_store: &SessionStore, permit_store: &PermitStore) -> Self {
        Self {
            account: AccountBinding::new(session_store),
            readiness: ReadinessBinding::new(session_store),
            hashes: ActivePermitHashBinding::new(permit_store),
            permit_store: permit_store.clone(),
        }
    }

    /// The active permit hash for the current account.
    pub fn active_hash(&self) -> Option<PermitHash> {
        let account = self.account.get()?;
        self.hashes.get(account)
    }

    /// Resolve the active permit on the given chain.
    pub fn get(&self, chain_id: ChainId) -> Option<Permit> {
        let account = self.account.get()?;
        if !self.readiness.get() {
            return None;
        }
        let hash = self.hashes.get(account)?;
        self.permit_store.get_permit(chain_id, account, hash)
    }
}
