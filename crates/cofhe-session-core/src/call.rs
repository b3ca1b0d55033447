//! Normalized results for external SDK calls.
//!
//! The external SDK reports failures in several shapes (a structured message
//! field, a bare string, or nothing at all). Every failure is normalized
//! into one canonical message-carrying shape at the boundary, so downstream
//! logic only ever handles [`CallError`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Fallback message when a failure carries no usable message.
pub const UNKNOWN_ERROR: &str = "unknown error";

/// Result of an external SDK call.
pub type CallResult<T> = Result<T, CallError>;

/// The canonical failure shape for external calls.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub struct CallError {
    /// Human-readable failure message, never empty.
    pub message: String,
}

impl CallError {
    /// Create a failure from a message, substituting the generic fallback
    /// for empty input.
    pub fn new(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.is_empty() {
            Self {
                message: UNKNOWN_ERROR.to_string(),
            }
        } else {
            Self { message }
        }
    }

    /// Create a failure from an optional structured message field, falling
    /// back through a display form to the generic message.
    pub fn from_parts(message: Option<String>, fallback: Option<&dyn fmt::Display>) -> Self {
        match message {
            Some(m) if !m.is_empty() => Self { message: m },
            _ => match fallback {
                Some(d) => Self::new(d.to_string()),
                None => Self::unknown(),
            },
        }
    }

    /// The generic failure used when nothing better is known.
    pub fn unknown() -> Self {
        Self {
            message: UNKNOWN_ERROR.to_string(),
        }
    }
}

impl fmt::Display for CallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl From<String> for CallError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for CallError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_message_normalized() {
        assert_eq!(CallError::new("").message, UNKNOWN_ERROR);
        assert_eq!(CallError::new("boom").message, "boom");
    }

    #[test]
    fn test_from_parts_prefers_structured_message() {
        let err = CallError::from_parts(Some("structured".into()), Some(&"fallback"));
        assert_eq!(err.message, "structured");
    }

    #[test]
    fn test_from_parts_falls_back_to_display() {
        let err = CallError::from_parts(None, Some(&"fallback"));
        assert_eq!(err.message, "fallback");

        let err = CallError::from_parts(Some(String::new()), Some(&"fallback"));
        assert_eq!(err.message, "fallback");
    }

    #[test]
    fn test_from_parts_generic_when_nothing_known() {
        let err = CallError::from_parts(None, None);
        assert_eq!(err.message, UNKNOWN_ERROR);
    }
}
