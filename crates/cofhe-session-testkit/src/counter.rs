//! A contract double: an encrypted counter.
//!
//! Stands in for the on-chain Counter contract in end-to-end mock tests.
//! The count lives at the co-processor as an encrypted handle; increments
//! are homomorphic adds.

use std::sync::{Arc, Mutex};

use cofhe_session_core::{CiphertextHandle, EncryptedInput};

use crate::coprocessor::MockCoprocessor;

/// Encrypted counter contract double. Deploys with an encrypted zero.
pub struct MockCounter {
    coprocessor: Arc<MockCoprocessor>,
    count: Mutex<CiphertextHandle>,
}

impl MockCounter {
    /// "Deploy" the counter: registers an encrypted zero.
    pub fn deploy(coprocessor: Arc<MockCoprocessor>) -> Self {
        let count = coprocessor.register(0);
        Self {
            coprocessor,
            count: Mutex::new(count),
        }
    }

    /// The current count handle.
    pub fn count(&self) -> CiphertextHandle {
        *self.count.lock().unwrap()
    }

    /// Increment the counter homomorphically.
    pub fn increment(&self) {
        self.coprocessor.log("counter.increment()");
        let mut count = self.count.lock().unwrap();
        *count = self
            .coprocessor
            .add(*count, 1)
            .expect("counter handle must resolve at the coprocessor");
    }

    /// Reset the counter to a submitted encrypted input.
    pub fn reset(&self, input: EncryptedInput) {
        self.coprocessor.log("counter.reset()");
        *self.count.lock().unwrap() = input.ct_hash;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counter_starts_at_zero() {
        let cp = Arc::new(MockCoprocessor::new());
        let counter = MockCounter::deploy(Arc::clone(&cp));
        assert_eq!(cp.plaintext(counter.count()), Some(0));
    }

    #[test]
    fn test_increment() {
        let cp = Arc::new(MockCoprocessor::new());
        let counter = MockCounter::deploy(Arc::clone(&cp));

        counter.increment();
        assert_eq!(cp.plaintext(counter.count()), Some(1));

        counter.increment();
        assert_eq!(cp.plaintext(counter.count()), Some(2));
    }

    #[test]
    fn test_reset_to_encrypted_input() {
        let cp = Arc::new(MockCoprocessor::new());
        let counter = MockCounter::deploy(Arc::clone(&cp));

        let input = EncryptedInput {
            ct_hash: cp.register(5),
            ty: cofhe_session_core::FheType::Uint32,
        };
        counter.reset(input);
        assert_eq!(cp.plaintext(counter.count()), Some(5));
    }
}
