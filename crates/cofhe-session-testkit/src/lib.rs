//! # CoFHE Session Testkit
//!
//! Test doubles and assertion helpers for the CoFHE session layer.
//!
//! ## Overview
//!
//! - [`MockCoprocessor`] - plaintext registry behind opaque ciphertext
//!   handles, with homomorphic add and labelled op logging
//! - [`MockWallet`] - switchable ed25519 signer implementing `ClientPair`
//! - [`MockSdk`] - `FheSdk` double with call counters, failure injection,
//!   and configurable latency
//! - [`MockCounter`] - encrypted-counter contract double
//! - [`MockHarness`] - plaintext assertions and log toggles, gated on the
//!   mock environment
//! - [`TestFixture`] - everything wired together

pub mod coprocessor;
pub mod counter;
pub mod fixtures;
pub mod mocks;
pub mod sdk;
pub mod wallet;

pub use coprocessor::MockCoprocessor;
pub use counter::MockCounter;
pub use fixtures::{mock_config, multi_account_fixtures, TestFixture, TEST_CHAIN};
pub use mocks::{expect_result_success, expect_result_value, MockHarness};
pub use sdk::MockSdk;
pub use wallet::{account_from_key, MockWallet};
