//! Permits: signed authorization credentials for decrypting sealed values.
//!
//! A permit is produced by the external SDK (signed via the holder's wallet)
//! and cached by the permit store. It is immutable after creation; renewing
//! a permit means creating a replacement, never mutating in place.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::types::{AccountId, ChainId, PermitHash};

/// A signed authorization credential, keyed logically by (chain, account)
/// and identified by its content hash.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Permit {
    /// The chain this permit authorizes decryption on.
    pub chain_id: ChainId,

    /// The account that issued (and is authorized by) this permit.
    pub issuer: AccountId,

    /// Optional human-readable label.
    pub name: Option<String>,

    /// When the permit was issued (Unix milliseconds).
    pub issued_at: i64,

    /// When the permit expires (Unix milliseconds), if ever.
    pub expires_at: Option<i64>,

    /// Public half of the sealing keypair the SDK generated for this permit.
    pub sealing_key: Vec<u8>,

    /// Wallet signature over the signing bytes.
    pub signature: Vec<u8>,
}

impl Permit {
    /// Content hash of this permit: Blake3 over the canonical CBOR bytes.
    pub fn hash(&self) -> PermitHash {
        PermitHash(*blake3::hash(&self.to_bytes()).as_bytes())
    }

    /// The bytes a wallet signs when creating this permit: the canonical
    /// encoding of every field except the signature itself.
    pub fn signing_bytes(&self) -> Vec<u8> {
        let unsigned = Permit {
            signature: Vec::new(),
            ..self.clone()
        };
        unsigned.to_bytes()
    }

    /// Check if this permit is still valid at the given timestamp.
    pub fn is_valid(&self, now: i64) -> bool {
        match self.expires_at {
            Some(expires) => now <= expires,
            None => true,
        }
    }

    /// Serialize to CBOR bytes.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut buf = Vec::new();
        ciborium::into_writer(self, &mut buf).expect("CBOR serialization failed");
        buf
    }

    /// Deserialize from CBOR bytes.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CoreError> {
        ciborium::from_reader(bytes).map_err(|e| CoreError::DecodingError(e.to_string()))
    }
}

/// Options for creating a new permit.
///
/// All fields are optional; the SDK fills in defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermitOptions {
    /// Human-readable label for the permit.
    pub name: Option<String>,

    /// Requested lifetime in seconds from issuance.
    pub expiration_secs: Option<i64>,
}

impl PermitOptions {
    /// Label the permit.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Request a lifetime in seconds.
    pub fn with_expiration_secs(mut self, secs: i64) -> Self {
        self.expiration_secs = Some(secs);
        self
    }
}
