//! Error types for export.

use thiserror::Error;

use crate::base::FormatSymbol;
use crate::store::StoreError;

/// A single failure recorded during export.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExportError {
    #[error("failed to store browser '{name}': {source}")]
    Browser {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to store hardware platform '{name}': {source}")]
    Platform {
        name: String,
        #[source]
        source: StoreError,
    },

    #[error("failed to store detection batch {batch} ({records} records) after {attempts} attempts: {source}")]
    Batch {
        batch: usize,
        records: usize,
        attempts: usize,
        #[source]
        source: StoreError,
    },
}

/// Errors building a [`TypeMap`](super::TypeMap).
#[derive(Debug, Error)]
pub enum TypeMapError {
    #[error("invalid pattern for format '{symbol}': {source}")]
    Pattern {
        symbol: FormatSymbol,
        #[source]
        source: regex::Error,
    },

    #[cfg(feature = "serde")]
    #[error("invalid type map document: {0}")]
    Json(#[from] serde_json::Error),
}
