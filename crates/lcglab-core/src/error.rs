//! Error type for parameter validation.

use thiserror::Error;

/// A rejected generator parameter set.
///
/// Carries one human-readable reason: validation stops at the first rule
/// that fails. The message is meant to be shown to the user verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub(crate) fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The reason the input was rejected.
    pub fn message(&self) -> &str {
        &self.message
    }
}
