//! Session configuration.
//!
//! Callers supply a partial patch that is merged over documented defaults
//! before each initialization attempt.

use serde::{Deserialize, Serialize};

/// The environment a session targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Environment {
    /// Mock co-processor, test-only. Mock assertion helpers are gated on this.
    Mock,
    /// Public testnet.
    Testnet,
    /// Production network.
    Mainnet,
}

/// Configuration for a session initialization call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FheConfig {
    /// Target environment.
    pub environment: Environment,

    /// Co-processor endpoint. `None` means the SDK default.
    pub cofhe_url: Option<String>,

    /// Verifier endpoint. `None` means the SDK default.
    pub verifier_url: Option<String>,

    /// Threshold network endpoint. `None` means the SDK default.
    pub threshold_network_url: Option<String>,

    /// Ask the SDK to suppress non-fatal initialization errors.
    pub ignore_errors: bool,

    /// Ask the SDK to auto-generate a permit during initialization.
    pub generate_permit: bool,
}

impl Default for FheConfig {
    fn default() -> Self {
        Self {
            environment: Environment::Testnet,
            cofhe_url: None,
            verifier_url: None,
            threshold_network_url: None,
            ignore_errors: false,
            generate_permit: false,
        }
    }
}

/// A partial configuration, merged over defaults per initialization call.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FheConfigPatch {
    pub environment: Option<Environment>,
    pub cofhe_url: Option<String>,
    pub verifier_url: Option<String>,
    pub threshold_network_url: Option<String>,
    pub ignore_errors: Option<bool>,
    pub generate_permit: Option<bool>,
}

impl FheConfigPatch {
    /// Merge this patch over a base configuration. Set fields win; unset
    /// fields keep the base value.
    pub fn apply(self, base: FheConfig) -> FheConfig {
        FheConfig {
            environment: self.environment.unwrap_or(base.environment),
            cofhe_url: self.cofhe_url.or(base.cofhe_url),
            verifier_url: self.verifier_url.or(base.verifier_url),
            threshold_network_url: self.threshold_network_url.or(base.threshold_network_url),
            ignore_errors: self.ignore_errors.unwrap_or(base.ignore_errors),
            generate_permit: self.generate_permit.unwrap_or(base.generate_permit),
        }
    }

    pub fn environment(mut self, env: Environment) -> Self {
        self.environment = Some(env);
        self
    }

    pub fn generate_permit(mut self, generate: bool) -> Self {
        self.generate_permit = Some(generate);
        self
    }

    pub fn ignore_errors(mut self, ignore: bool) -> Self {
        self.ignore_errors = Some(ignore);
        self
    }
}
