//! Error types for capability-file import.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a capability-file read.
///
/// Malformed lines are never errors; they are skipped.
#[derive(Debug, Error)]
pub enum ImportError {
    /// The capability file does not exist.
    #[error("capability file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The file exists but could not be read.
    #[error("failed to read capability file {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ImportError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        if source.kind() == std::io::ErrorKind::NotFound {
            Self::NotFound { path: path.into() }
        } else {
            Self::Io {
                path: path.into(),
                source,
            }
        }
    }

    /// The path the failed read was given.
    pub fn path(&self) -> &std::path::Path {
        match self {
            Self::NotFound { path } | Self::Io { path, .. } => path,
        }
    }
}
