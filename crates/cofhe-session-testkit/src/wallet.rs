//! The mock wallet: a switchable ed25519 signer implementing [`ClientPair`].
//!
//! Account and chain can be changed mid-test to exercise context switches
//! and the stale-result fence.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use ed25519_dalek::{Signer, SigningKey};

use cofhe_session::ClientPair;
use cofhe_session_core::{AccountId, ChainId};

/// Derive a 20-byte account address from an ed25519 verifying key.
pub fn account_from_key(key: &SigningKey) -> AccountId {
    let digest = blake3::hash(key.verifying_key().as_bytes());
    let mut addr = [0u8; 20];
    addr.copy_from_slice(&digest.as_bytes()[..20]);
    AccountId::from_bytes(addr)
}

/// Wallet/chain client double.
pub struct MockWallet {
    signing_key: SigningKey,
    account: RwLock<AccountId>,
    chain_id: RwLock<ChainId>,
    connected: AtomicBool,
}

impl MockWallet {
    /// Create a wallet with a random keypair on the given chain.
    pub fn generate(chain_id: ChainId) -> Self {
        let seed: [u8; 32] = rand::random();
        Self::from_seed(chain_id, seed)
    }

    /// Create a wallet with a deterministic keypair from a seed.
    pub fn from_seed(chain_id: ChainId, seed: [u8; 32]) -> Self {
        let signing_key = SigningKey::from_bytes(&seed);
        let account = account_from_key(&signing_key);
        Self {
            signing_key,
            account: RwLock::new(account),
            chain_id: RwLock::new(chain_id),
            connected: AtomicBool::new(true),
        }
    }

    /// Sign a message with the wallet key.
    pub fn sign(&self, message: &[u8]) -> Vec<u8> {
        self.signing_key.sign(message).to_bytes().to_vec()
    }

    /// The verifying key, for signature checks in tests.
    pub fn verifying_key(&self) -> ed25519_dalek::VerifyingKey {
        self.signing_key.verifying_key()
    }

    /// Switch the active account (simulates the user picking another
    /// account in the wallet UI).
    pub fn set_account(&self, account: AccountId) {
        *self.account.write().unwrap() = account;
    }

    /// Switch chains.
    pub fn set_chain_id(&self, chain_id: ChainId) {
        *self.chain_id.write().unwrap() = chain_id;
    }

    /// Connect or disconnect the wallet.
    pub fn set_connected(&self, connected: bool) {
        self.connected.store(connected, Ordering::SeqCst);
    }
}

impl ClientPair for MockWallet {
    fn chain_id(&self) -> ChainId {
        *self.chain_id.read().unwrap()
    }

    fn account(&self) -> Option<AccountId> {
        if self.connected.load(Ordering::SeqCst) {
            Some(*self.account.read().unwrap())
        } else {
            None
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::Verifier;

    #[test]
    fn test_deterministic_from_seed() {
        let a = MockWallet::from_seed(ChainId::new(1), [7; 32]);
        let b = MockWallet::from_seed(ChainId::new(1), [7; 32]);
        assert_eq!(a.account(), b.account());

        let c = MockWallet::from_seed(ChainId::new(1), [8; 32]);
        assert_ne!(a.account(), c.account());
    }

    #[test]
    fn test_signatures_verify() {
        let wallet = MockWallet::generate(ChainId::new(1));
        let sig = wallet.sign(b"message");
        let sig = ed25519_dalek::Signature::from_slice(&sig).unwrap();
        assert!(wallet.verifying_key().verify(b"message", &sig).is_ok());
    }

    #[test]
    fn test_disconnect_hides_account() {
        let wallet = MockWallet::generate(ChainId::new(1));
        assert!(wallet.account().is_some());

        wallet.set_connected(false);
        assert!(!wallet.is_connected());
        assert!(wallet.account().is_none());
    }
}
