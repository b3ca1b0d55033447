//! Assertion helpers for mock-environment tests.
//!
//! Everything here is gated on [`Environment::Mock`]: outside that
//! environment the plaintext assertions and log toggles are no-ops, so a
//! suite can run unchanged against a real network without leaking mock-only
//! behavior.

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use cofhe_session_core::{CiphertextHandle, Environment};

use crate::coprocessor::MockCoprocessor;

/// Mock assertion harness bound to an environment and a co-processor.
pub struct MockHarness {
    environment: Environment,
    coprocessor: Arc<MockCoprocessor>,
}

impl MockHarness {
    pub fn new(environment: Environment, coprocessor: Arc<MockCoprocessor>) -> Self {
        Self {
            environment,
            coprocessor,
        }
    }

    /// Whether the harness is running under the given environment tag.
    pub fn is_permitted_environment(&self, tag: Environment) -> bool {
        self.environment == tag
    }

    fn mock_permitted(&self) -> bool {
        self.environment == Environment::Mock
    }

    /// Assert the plaintext behind a handle. No-op outside the mock
    /// environment.
    ///
    /// # Panics
    ///
    /// Panics when the handle is unknown or resolves to a different value.
    pub fn expect_plaintext(&self, handle: CiphertextHandle, expected: u128) {
        if !self.mock_permitted() {
            return;
        }
        match self.coprocessor.plaintext(handle) {
            Some(actual) => assert_eq!(
                actual, expected,
                "plaintext behind {} was {}, expected {}",
                handle, actual, expected
            ),
            None => panic!("no plaintext registered for handle {}", handle),
        }
    }

    /// Enable co-processor logging. No-op outside the mock environment.
    pub fn enable_logs(&self, label: Option<&str>) {
        if self.mock_permitted() {
            self.coprocessor.enable_logs(label);
        }
    }

    /// Disable co-processor logging. No-op outside the mock environment.
    pub fn disable_logs(&self) {
        if self.mock_permitted() {
            self.coprocessor.disable_logs();
        }
    }

    /// Run a future with labelled co-processor logging enabled around it.
    /// Outside the mock environment the future runs without log toggling.
    pub async fn with_logs<F: Future>(&self, label: &str, fut: F) -> F::Output {
        if !self.mock_permitted() {
            return fut.await;
        }
        self.coprocessor.enable_logs(Some(label));
        let output = fut.await;
        self.coprocessor.disable_logs();
        output
    }
}

/// Unwrap a success result, panicking with the failure message otherwise.
pub fn expect_result_success<T, E: fmt::Display>(result: Result<T, E>) -> T {
    match result {
        Ok(value) => value,
        Err(err) => panic!("expected success, got failure: {}", err),
    }
}

/// Unwrap a success result and assert its value.
pub fn expect_result_value<T, E>(result: Result<T, E>, expected: T)
where
    T: PartialEq + fmt::Debug,
    E: fmt::Display,
{
    let value = expect_result_success(result);
    assert_eq!(value, expected);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_environment_gate() {
        let cp = Arc::new(MockCoprocessor::new());
        let mock = MockHarness::new(Environment::Mock, Arc::clone(&cp));
        let testnet = MockHarness::new(Environment::Testnet, Arc::clone(&cp));

        assert!(mock.is_permitted_environment(Environment::Mock));
        assert!(!testnet.is_permitted_environment(Environment::Mock));
    }

    #[test]
    fn test_expect_plaintext_matches() {
        let cp = Arc::new(MockCoprocessor::new());
        let harness = MockHarness::new(Environment::Mock, Arc::clone(&cp));

        let handle = cp.register(5);
        harness.expect_plaintext(handle, 5);
    }

    #[test]
    #[should_panic(expected = "no plaintext registered")]
    fn test_expect_plaintext_unknown_handle_panics() {
        let cp = Arc::new(MockCoprocessor::new());
        let harness = MockHarness::new(Environment::Mock, cp);
        harness.expect_plaintext(CiphertextHandle::from_bytes([0; 32]), 5);
    }

    #[test]
    fn test_expect_plaintext_noop_outside_mock() {
        let cp = Arc::new(MockCoprocessor::new());
        let harness = MockHarness::new(Environment::Testnet, cp);
        // Unknown handle, wrong value: still must not panic outside Mock.
        harness.expect_plaintext(CiphertextHandle::from_bytes([0; 32]), 5);
    }

    #[test]
    fn test_expect_result_helpers() {
        let ok: Result<u32, String> = Ok(3);
        expect_result_value(ok, 3);
    }

    #[test]
    #[should_panic(expected = "expected success")]
    fn test_expect_result_success_panics_on_failure() {
        let err: Result<u32, String> = Err("boom".into());
        expect_result_success(err);
    }
}
