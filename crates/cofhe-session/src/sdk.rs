//! The external FHE SDK interface.
//!
//! This layer never implements the cryptography; it drives an SDK that does.
//! All calls are long-latency network/cryptographic operations and every
//! failure arrives already normalized as a [`CallError`].
//!
//! [`CallError`]: cofhe_session_core::CallError

use async_trait::async_trait;

use cofhe_session_core::{
    CallResult, CiphertextHandle, Encryptable, EncryptedInput, FheConfig, FheType, Permit,
    PermitOptions,
};

use crate::client::ClientPair;

/// The consumed surface of the external FHE SDK.
///
/// Implementations must be thread-safe (Send + Sync). The production
/// implementation wraps the vendor SDK; the testkit provides a mock backed
/// by an in-memory co-processor.
#[async_trait]
pub trait FheSdk: Send + Sync {
    /// Establish the FHE session for the given wallet/chain client pair.
    ///
    /// Returns the auto-generated permit when the configuration requested
    /// one (`generate_permit`), otherwise `None`.
    async fn initialize(
        &self,
        clients: &dyn ClientPair,
        config: &FheConfig,
    ) -> CallResult<Option<Permit>>;

    /// Create a new permit, signing via the connected wallet.
    async fn create_permit(&self, options: &PermitOptions) -> CallResult<Permit>;

    /// Decrypt a ciphertext handle back to plaintext.
    async fn unseal(&self, handle: CiphertextHandle, ty: FheType) -> CallResult<u128>;

    /// Encrypt plaintext values into submittable inputs.
    async fn encrypt(&self, values: &[Encryptable]) -> CallResult<Vec<EncryptedInput>>;
}
