//! Session state: readiness flags for the singleton FHE session.

use serde::{Deserialize, Serialize};

use crate::types::{AccountId, ChainId};

/// Readiness state of the FHE session.
///
/// All flags start false, flip true only after a successful external
/// initialization, and reset to false whenever the active chain or account
/// changes. Mutation goes exclusively through the session store's setters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    /// The RPC provider side of the session is initialized.
    pub provider_initialized: bool,

    /// The wallet signer side of the session is initialized.
    pub signer_initialized: bool,

    /// FHE key material has been fetched.
    pub fhe_keys_initialized: bool,

    /// The account the session was initialized for.
    pub account: Option<AccountId>,

    /// The chain the session was initialized for.
    pub chain_id: Option<ChainId>,

    /// Message of the most recent failed attempt, cleared at the start of
    /// every new attempt and on success.
    pub last_error: Option<String>,
}

impl SessionState {
    /// The session is usable: provider, signer, and key material are all up.
    pub fn ready(&self) -> bool {
        self.provider_initialized && self.signer_initialized && self.fhe_keys_initialized
    }

    /// True if this state was established for the given context.
    pub fn matches_context(&self, chain_id: ChainId, account: AccountId) -> bool {
        self.chain_id == Some(chain_id) && self.account == Some(account)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ready_requires_all_flags() {
        let mut state = SessionState::default();
        assert!(!state.ready());

        state.provider_initialized = true;
        state.signer_initialized = true;
        assert!(!state.ready());

        state.fhe_keys_initialized = true;
        assert!(state.ready());
    }

    #[test]
    fn test_matches_context() {
        let state = SessionState {
            chain_id: Some(ChainId::new(1)),
            account: Some(AccountId::from_bytes([0x01; 20])),
            ..SessionState::default()
        };

        assert!(state.matches_context(ChainId::new(1), AccountId::from_bytes([0x01; 20])));
        assert!(!state.matches_context(ChainId::new(2), AccountId::from_bytes([0x01; 20])));
        assert!(!state.matches_context(ChainId::new(1), AccountId::from_bytes([0x02; 20])));
    }
}
