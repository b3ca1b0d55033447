//! The session orchestrator: initialization and the permit lifecycle.
//!
//! [`FheSession`] brings the session store, the permit store, and the
//! external SDK together behind one API. It owns the only two pieces of
//! state kept outside the stores: the in-flight initialization guard and
//! the permit-generation flag.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use cofhe_session_core::{
    AccountId, ChainId, CiphertextHandle, Encryptable, EncryptedInput, FheConfig, FheConfigPatch,
    FheType, Permit, PermitOptions,
};
use cofhe_session_store::{PermitStore, SessionStore};

use crate::client::ClientPair;
use crate::error::{Result, SessionError};
use crate::sdk::FheSdk;

/// The client-side FHE session.
///
/// Coordinates asynchronous wallet/chain state, the singleton SDK session,
/// and the per-account permit cache. All observable side effects flow
/// through the two stores; bindings subscribe to those.
pub struct FheSession<S: FheSdk> {
    /// The external SDK.
    sdk: Arc<S>,
    /// Readiness flags and session context.
    session_store: SessionStore,
    /// The permit cache.
    permit_store: PermitStore,
    /// Base configuration; per-call patches merge over this.
    config: FheConfig,
    /// In-flight initialization guard. The only mutual exclusion in the
    /// system: two attempts for the same context must not both call out.
    initializing: AtomicBool,
    /// UI feedback only, never a correctness gate.
    generating_permit: AtomicBool,
}

impl<S: FheSdk> FheSession<S> {
    /// Create a session with default configuration and fresh stores.
    pub fn new(sdk: Arc<S>) -> Self {
        Self::with_config(sdk, FheConfig::default())
    }

    /// Create a session with a base configuration.
    pub fn with_config(sdk: Arc<S>, config: FheConfig) -> Self {
        Self {
            sdk,
            session_store: SessionStore::new(),
            permit_store: PermitStore::new(),
            config,
            initializing: AtomicBool::new(false),
            generating_permit: AtomicBool::new(false),
        }
    }

    /// The session store (readiness flags, context, last error).
    pub fn session_store(&self) -> &SessionStore {
        &self.session_store
    }

    /// The permit cache.
    pub fn permit_store(&self) -> &PermitStore {
        &self.permit_store
    }

    /// Whether the session is ready for unseal/encrypt/permit operations.
    pub fn is_initialized(&self) -> bool {
        self.session_store.state().ready()
    }

    /// Whether an initialization attempt is currently in flight.
    pub fn is_initializing(&self) -> bool {
        self.initializing.load(Ordering::Acquire)
    }

    /// Whether a permit creation is currently in flight.
    pub fn is_generating_permit(&self) -> bool {
        self.generating_permit.load(Ordering::Acquire)
    }

    /// Message of the most recent failed attempt, if any.
    pub fn last_error(&self) -> Option<String> {
        self.session_store.state().last_error
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Initialization
    // ─────────────────────────────────────────────────────────────────────────

    /// Bring the session to ready for the client pair's current context.
    ///
    /// Call this whenever wallet or chain state changes. A context switch
    /// resets readiness synchronously before anything else. The call is a
    /// no-op when the wallet is disconnected, no account is active, the
    /// session is already ready, or an attempt is already in flight.
    ///
    /// Failures are recorded in the session store and also returned; the
    /// in-flight guard resets after every attempt, so readiness is
    /// recomputed the next time wallet/chain state changes.
    pub async fn initialize(
        &self,
        clients: &dyn ClientPair,
        patch: Option<FheConfigPatch>,
    ) -> Result<()> {
        let chain_id = clients.chain_id();
        let account = clients.account();

        // Context sync first: a chain or account switch invalidates all
        // derived readiness regardless of any in-flight attempt.
        self.session_store.sync_context(Some(chain_id), account);

        if !clients.is_connected() {
            return Ok(());
        }
        let Some(account) = account else {
            return Ok(());
        };
        if self.session_store.state().ready() {
            return Ok(());
        }

        // In-flight guard: concurrent invocations during the same pending
        // call observe the exchange failure and return without side effect.
        if self
            .initializing
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            return Ok(());
        }

        self.session_store.clear_error();
        let config = patch.unwrap_or_default().apply(self.config.clone());
        tracing::debug!(%chain_id, %account, "initializing fhe session");

        let outcome = self.sdk.initialize(clients, &config).await;

        // Guard resets after every attempt, success or failure.
        self.initializing.store(false, Ordering::Release);

        // Staleness fence: the context captured above must still be the
        // stored one, otherwise a slow call would resurrect readiness for
        // an account the user has switched away from.
        if !self.session_store.state().matches_context(chain_id, account) {
            tracing::debug!(%chain_id, %account, "discarding stale initialization result");
            return Ok(());
        }

        match outcome {
            Ok(auto_permit) => {
                if let Some(permit) = &auto_permit {
                    self.check_issuer(permit, account)?;
                }
                self.session_store.mark_ready();
                if let Some(permit) = auto_permit {
                    let hash = self.permit_store.insert_active(permit);
                    tracing::debug!(%account, %hash, "recorded auto-generated permit");
                }
                tracing::debug!(%chain_id, %account, "fhe session ready");
                Ok(())
            }
            Err(err) => {
                tracing::warn!(%chain_id, %account, error = %err, "fhe session initialization failed");
                self.session_store.set_error(err.message.clone());
                Err(err.into())
            }
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Permits
    // ─────────────────────────────────────────────────────────────────────────

    /// Create a new permit for the active account and make it active.
    ///
    /// Fails immediately (no external call) when the session is not ready
    /// or no account is active. Concurrent calls each execute; the last
    /// writer wins on the active-permit pointer.
    pub async fn create_permit(&self, options: PermitOptions) -> Result<Permit> {
        let state = self.session_store.state();
        if !state.ready() {
            return Err(SessionError::NotReady(
                "fhe session not initialized".into(),
            ));
        }
        let Some(account) = state.account else {
            return Err(SessionError::NotReady("no active wallet account".into()));
        };

        self.generating_permit.store(true, Ordering::Release);
        self.session_store.clear_error();

        let outcome = self.sdk.create_permit(&options).await;
        self.generating_permit.store(false, Ordering::Release);

        match outcome {
            Ok(permit) => {
                self.check_issuer(&permit, account)?;
                let hash = self.permit_store.insert_active(permit.clone());
                tracing::debug!(%account, %hash, "permit created");
                Ok(permit)
            }
            Err(err) => {
                tracing::warn!(%account, error = %err, "permit creation failed");
                self.session_store.set_error(err.message.clone());
                Err(err.into())
            }
        }
    }

    /// A permit issued for another account must never enter the cache as
    /// this account's active permit.
    fn check_issuer(&self, permit: &Permit, account: AccountId) -> Result<()> {
        if permit.issuer == account {
            return Ok(());
        }
        let message = format!(
            "sdk returned a permit issued by {}, expected {}",
            permit.issuer, account
        );
        tracing::warn!(%account, issuer = %permit.issuer, "rejecting permit with foreign issuer");
        self.session_store.set_error(message.clone());
        Err(SessionError::Unknown(message))
    }

    /// The active permit for (chain, account). Pure cache lookup: `None`
    /// when no active hash is recorded or the hash does not resolve. Never
    /// triggers an external call. Cached data survives context switches;
    /// the readiness-gated view is [`ActivePermitBinding`].
    ///
    /// [`ActivePermitBinding`]: crate::bindings::ActivePermitBinding
    pub fn active_permit(&self, chain_id: ChainId, account: AccountId) -> Option<Permit> {
        let hash = self.permit_store.active_permit_hash(account)?;
        self.permit_store.get_permit(chain_id, account, hash)
    }

    /// All permits cached for the account, across chains. Order is not
    /// guaranteed.
    pub fn all_permits(&self, account: AccountId) -> Vec<Permit> {
        self.permit_store.all_permits(account)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // SDK passthrough
    // ─────────────────────────────────────────────────────────────────────────

    /// Decrypt a ciphertext handle back to plaintext.
    pub async fn unseal(&self, handle: CiphertextHandle, ty: FheType) -> Result<u128> {
        self.require_ready()?;
        Ok(self.sdk.unseal(handle, ty).await?)
    }

    /// Encrypt plaintext values into submittable inputs.
    pub async fn encrypt(&self, values: &[Encryptable]) -> Result<Vec<EncryptedInput>> {
        self.require_ready()?;
        Ok(self.sdk.encrypt(values).await?)
    }

    fn require_ready(&self) -> Result<()> {
        if self.session_store.state().ready() {
            Ok(())
        } else {
            Err(SessionError::NotReady(
                "fhe session not initialized".into(),
            ))
        }
    }
}
