//! The mock FHE co-processor.
//!
//! Keeps a registry of plaintexts behind opaque ciphertext handles so tests
//! can assert what "encrypted" values resolve to. Handles are random
//! content-free identifiers; registering the same plaintext twice yields
//! two distinct handles, matching the real co-processor's behavior.

use std::collections::HashMap;
use std::sync::Mutex;

use cofhe_session_core::CiphertextHandle;

struct LogState {
    enabled: bool,
    label: Option<String>,
}

/// In-memory co-processor double.
pub struct MockCoprocessor {
    plaintexts: Mutex<HashMap<CiphertextHandle, u128>>,
    logs: Mutex<LogState>,
}

impl MockCoprocessor {
    /// Create an empty co-processor.
    pub fn new() -> Self {
        Self {
            plaintexts: Mutex::new(HashMap::new()),
            logs: Mutex::new(LogState {
                enabled: false,
                label: None,
            }),
        }
    }

    /// Register a plaintext and return a fresh handle for it.
    pub fn register(&self, value: u128) -> CiphertextHandle {
        let nonce: [u8; 16] = rand::random();
        let mut hasher = blake3::Hasher::new();
        hasher.update(&nonce);
        hasher.update(&value.to_le_bytes());
        let handle = CiphertextHandle(*hasher.finalize().as_bytes());

        self.plaintexts.lock().unwrap().insert(handle, value);
        self.log(&format!("register -> {}", handle));
        handle
    }

    /// Resolve a handle back to its plaintext.
    pub fn plaintext(&self, handle: CiphertextHandle) -> Option<u128> {
        self.plaintexts.lock().unwrap().get(&handle).copied()
    }

    /// Homomorphic addition of a plaintext constant: produces a fresh handle
    /// for `plaintext(handle) + rhs`. Returns `None` for unknown handles.
    pub fn add(&self, handle: CiphertextHandle, rhs: u128) -> Option<CiphertextHandle> {
        let value = self.plaintext(handle)?;
        let result = self.register(value.wrapping_add(rhs));
        self.log(&format!("add {} + {} -> {}", handle, rhs, result));
        Some(result)
    }

    /// Turn on operation logging, optionally under a label.
    pub fn enable_logs(&self, label: Option<&str>) {
        let mut logs = self.logs.lock().unwrap();
        logs.enabled = true;
        logs.label = label.map(String::from);
    }

    /// Turn operation logging off.
    pub fn disable_logs(&self) {
        let mut logs = self.logs.lock().unwrap();
        logs.enabled = false;
        logs.label = None;
    }

    /// Log an operation if logging is enabled.
    pub fn log(&self, op: &str) {
        let logs = self.logs.lock().unwrap();
        if logs.enabled {
            match &logs.label {
                Some(label) => tracing::debug!(label = %label, op, "mock coprocessor"),
                None => tracing::debug!(op, "mock coprocessor"),
            }
        }
    }
}

impl Default for MockCoprocessor {
    fn default() -> Self {
        Self::new()
    }
}
