//! Error types for record persistence.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// A record failed validation (e.g. a name that is too short).
    #[error("validation failed: {0}")]
    Validation(String),

    /// A record with the same unique key already exists.
    #[error("duplicate {kind}: {key}")]
    Duplicate { kind: &'static str, key: String },

    /// The underlying storage failed.
    #[error("storage error: {0}")]
    Backend(String),
}

impl StoreError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn duplicate(kind: &'static str, key: impl Into<String>) -> Self {
        Self::Duplicate {
            kind,
            key: key.into(),
        }
    }

    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }
}
