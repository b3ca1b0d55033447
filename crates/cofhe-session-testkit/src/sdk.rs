//! The mock FHE SDK.
//!
//! Implements [`FheSdk`] over the in-memory co-processor and mock wallet,
//! with the instrumentation the session tests need: call counters,
//! next-call failure injection, and configurable latency for exercising the
//! in-flight guard and the stale-result fence.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;

use cofhe_session::{ClientPair, FheSdk};
use cofhe_session_core::{
    CallError, CallResult, CiphertextHandle, Encryptable, EncryptedInput, FheConfig, FheType,
    Permit, PermitOptions,
};

use crate::coprocessor::MockCoprocessor;
use crate::wallet::MockWallet;

/// FHE SDK double.
pub struct MockSdk {
    coprocessor: Arc<MockCoprocessor>,
    wallet: Arc<MockWallet>,
    initialized: AtomicBool,
    initialize_calls: AtomicUsize,
    create_permit_calls: AtomicUsize,
    fail_next_initialize: AtomicBool,
    fail_next_create_permit: AtomicBool,
    latency: Mutex<Duration>,
}

impl MockSdk {
    /// Create a mock SDK over a co-processor and wallet.
    pub fn new(coprocessor: Arc<MockCoprocessor>, wallet: Arc<MockWallet>) -> Self {
        Self {
            coprocessor,
            wallet,
            initialized: AtomicBool::new(false),
            initialize_calls: AtomicUsize::new(0),
            create_permit_calls: AtomicUsize::new(0),
            fail_next_initialize: AtomicBool::new(false),
            fail_next_create_permit: AtomicBool::new(false),
            latency: Mutex::new(Duration::ZERO),
        }
    }

    /// The co-processor behind this SDK.
    pub fn coprocessor(&self) -> &Arc<MockCoprocessor> {
        &self.coprocessor
    }

    /// Add artificial latency to every SDK call.
    pub fn set_latency(&self, latency: Duration) {
        *self.latency.lock().unwrap() = latency;
    }

    /// Make the next initialize call fail.
    pub fn fail_next_initialize(&self) {
        self.fail_next_initialize.store(true, Ordering::SeqCst);
    }

    /// Make the next create_permit call fail.
    pub fn fail_next_create_permit(&self) {
        self.fail_next_create_permit.store(true, Ordering::SeqCst);
    }

    /// Number of initialize calls that reached the SDK.
    pub fn initialize_calls(&self) -> usize {
        self.initialize_calls.load(Ordering::SeqCst)
    }

    /// Number of create_permit calls that reached the SDK.
    pub fn create_permit_calls(&self) -> usize {
        self.create_permit_calls.load(Ordering::SeqCst)
    }

    async fn simulate_latency(&self) {
        let latency = *self.latency.lock().unwrap();
        if !latency.is_zero() {
            tokio::time::sleep(latency).await;
        }
    }

    fn make_permit(&self, options: &PermitOptions) -> CallResult<Permit> {
        let Some(account) = self.wallet.account() else {
            return Err(CallError::new("mock sdk: wallet not connected"));
        };

        let issued_at = now_millis();
        let mut permit = Permit {
            chain_id: self.wallet.chain_id(),
            issuer: account,
            name: options.name.clone(),
            issued_at,
            expires_at: options.expiration_secs.map(|s| issued_at + s * 1000),
            sealing_key: rand::random::<[u8; 32]>().to_vec(),
            signature: Vec::new(),
        };
        permit.signature = self.wallet.sign(&permit.signing_bytes());
        Ok(permit)
    }
}

#[async_trait]
impl FheSdk for MockSdk {
    async fn initialize(
        &self,
        _clients: &dyn ClientPair,
        config: &FheConfig,
    ) -> CallResult<Option<Permit>> {
        self.initialize_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.fail_next_initialize.swap(false, Ordering::SeqCst) {
            return Err(CallError::new("mock sdk: injected initialization failure"));
        }

        self.initialized.store(true, Ordering::SeqCst);

        if config.generate_permit {
            Ok(Some(self.make_permit(&PermitOptions::default())?))
        } else {
            Ok(None)
        }
    }

    async fn create_permit(&self, options: &PermitOptions) -> CallResult<Permit> {
        self.create_permit_calls.fetch_add(1, Ordering::SeqCst);
        self.simulate_latency().await;

        if self.fail_next_create_permit.swap(false, Ordering::SeqCst) {
            return Err(CallError::new("mock sdk: injected permit failure"));
        }
        if !self.initialized.load(Ordering::SeqCst) {
            return Err(CallError::new("mock sdk: not initialized"));
        }

        self.make_permit(options)
    }

    async fn unseal(&self, handle: CiphertextHandle, ty: FheType) -> CallResult<u128> {
        self.simulate_latency().await;

        if !self.initialized.load(Ordering::SeqCst) {
            return Err(CallError::new("mock sdk: not initialized"));
        }

        let value = self
            .coprocessor
            .plaintext(handle)
            .ok_or_else(|| CallError::new(format!("unknown ciphertext handle {}", handle)))?;

        if value > ty.max_value() {
            return Err(CallError::new(format!(
                "plaintext {} out of range for {:?}",
                value, ty
            )));
        }
        Ok(value)
    }

    async fn encrypt(&self, values: &[Encryptable]) -> CallResult<Vec<EncryptedInput>> {
        self.simulate_latency().await;

        if !self.initialized.load(Ordering::SeqCst) {
            return Err(CallError::new("mock sdk: not initialized"));
        }

        values
            .iter()
            .map(|v| {
                if v.value > v.ty.max_value() {
                    return Err(CallError::new(format!(
                        "plaintext {} out of range for {:?}",
                        v.value, v.ty
                    )));
                }
                Ok(EncryptedInput {
                    ct_hash: self.coprocessor.register(v.value),
                    ty: v.ty,
                })
            })
            .collect()
    }
}

/// Get current time in milliseconds.
fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("time went backwards")
        .as_millis() as i64
}
