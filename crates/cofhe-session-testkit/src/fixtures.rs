//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::sync::Arc;

use cofhe_session::{FheSession, Result};
use cofhe_session_core::{ChainId, Environment, FheConfig, FheConfigPatch};

use crate::coprocessor::MockCoprocessor;
use crate::mocks::MockHarness;
use crate::sdk::MockSdk;
use crate::wallet::MockWallet;

/// Default chain for fixtures (local hardhat-style network).
pub const TEST_CHAIN: ChainId = ChainId::new(31337);

/// A test fixture wiring wallet, co-processor, mock SDK, and session.
pub struct TestFixture {
    pub coprocessor: Arc<MockCoprocessor>,
    pub wallet: Arc<MockWallet>,
    pub sdk: Arc<MockSdk>,
    pub session: FheSession<MockSdk>,
    pub harness: MockHarness,
}

impl TestFixture {
    /// Create a fixture with a random wallet on the test chain.
    pub fn new() -> Self {
        let seed: [u8; 32] = rand::random();
        Self::with_seed(seed)
    }

    /// Create a fixture with a deterministic wallet keypair from a seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        let coprocessor = Arc::new(MockCoprocessor::new());
        let wallet = Arc::new(MockWallet::from_seed(TEST_CHAIN, seed));
        let sdk = Arc::new(MockSdk::new(Arc::clone(&coprocessor), Arc::clone(&wallet)));
        let session = FheSession::with_config(Arc::clone(&sdk), mock_config());
        let harness = MockHarness::new(Environment::Mock, Arc::clone(&coprocessor));

        Self {
            coprocessor,
            wallet,
            sdk,
            session,
            harness,
        }
    }

    /// Initialize the session from the fixture's wallet (the
    /// hardhat-signer path).
    pub async fn initialize_with_signer(&self) -> Result<()> {
        self.session.initialize(&*self.wallet, None).await
    }

    /// Initialize with a per-call configuration patch.
    pub async fn initialize_with_patch(&self, patch: FheConfigPatch) -> Result<()> {
        self.session.initialize(&*self.wallet, Some(patch)).await
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// The fixture's base configuration: mock environment, everything else
/// at defaults.
pub fn mock_config() -> FheConfig {
    FheConfig {
        environment: Environment::Mock,
        ..FheConfig::default()
    }
}

/// Create multiple fixtures with distinct deterministic wallets.
pub fn multi_account_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            TestFixture::with_seed(seed)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use cofhe_session::ClientPair;

    #[tokio::test]
    async fn test_fixture_initializes() {
        let fixture = TestFixture::with_seed([1; 32]);
        assert!(!fixture.session.is_initialized());

        fixture.initialize_with_signer().await.unwrap();
        assert!(fixture.session.is_initialized());
        assert_eq!(fixture.sdk.initialize_calls(), 1);
    }

    #[test]
    fn test_multi_account_fixtures_distinct() {
        let fixtures = multi_account_fixtures(3);
        let accounts: Vec<_> = fixtures.iter().map(|f| f.wallet.account()).collect();
        assert_ne!(accounts[0], accounts[1]);
        assert_ne!(accounts[1], accounts[2]);
        assert_ne!(accounts[0], accounts[2]);
    }
}
