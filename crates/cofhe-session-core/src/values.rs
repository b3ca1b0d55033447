//! Encryptable value types for the SDK's encrypt surface.

use serde::{Deserialize, Serialize};

use crate::types::CiphertextHandle;

/// Type tags for encrypted values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FheType {
    Bool,
    Uint8,
    Uint16,
    Uint32,
    Uint64,
    Uint128,
}

impl FheType {
    /// Largest plaintext representable under this tag.
    pub fn max_value(&self) -> u128 {
        match self {
            FheType::Bool => 1,
            FheType::Uint8 => u8::MAX as u128,
            FheType::Uint16 => u16::MAX as u128,
            FheType::Uint32 => u32::MAX as u128,
            FheType::Uint64 => u64::MAX as u128,
            FheType::Uint128 => u128::MAX,
        }
    }
}

/// A plaintext value tagged with its target encrypted type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encryptable {
    pub ty: FheType,
    pub value: u128,
}

impl Encryptable {
    pub fn bool(value: bool) -> Self {
        Self {
            ty: FheType::Bool,
            value: value as u128,
        }
    }

    pub fn uint8(value: u8) -> Self {
        Self {
            ty: FheType::Uint8,
            value: value as u128,
        }
    }

    pub fn uint16(value: u16) -> Self {
        Self {
            ty: FheType::Uint16,
            value: value as u128,
        }
    }

    pub fn uint32(value: u32) -> Self {
        Self {
            ty: FheType::Uint32,
            value: value as u128,
        }
    }

    pub fn uint64(value: u64) -> Self {
        Self {
            ty: FheType::Uint64,
            value: value as u128,
        }
    }

    pub fn uint128(value: u128) -> Self {
        Self {
            ty: FheType::Uint128,
            value,
        }
    }
}

/// An encrypted input ready for submission to a contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptedInput {
    /// Handle of the encrypted value at the co-processor.
    pub ct_hash: CiphertextHandle,

    /// The encrypted type.
    pub ty: FheType,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encryptable_constructors() {
        assert_eq!(Encryptable::uint32(5).ty, FheType::Uint32);
        assert_eq!(Encryptable::uint32(5).value, 5);
        assert_eq!(Encryptable::bool(true).value, 1);
    }

    #[test]
    fn test_type_bounds() {
        assert_eq!(FheType::Uint8.max_value(), 255);
        assert_eq!(FheType::Bool.max_value(), 1);
        assert!(Encryptable::uint64(u64::MAX).value <= FheType::Uint64.max_value());
    }
}
