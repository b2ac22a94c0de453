//! Error types for negotiation.

use thiserror::Error;

use crate::base::FormatSymbol;
use crate::store::StoreError;

/// Why a response could not be negotiated.
///
/// `E` is the renderer's own error type, passed through untouched.
#[derive(Debug, Error)]
pub enum NegotiateError<E> {
    /// No accepted format is offered.
    #[error("not acceptable (tried: {})", .attempted.join(", "))]
    NotAcceptable { attempted: Vec<FormatSymbol> },

    /// The wildcard answer had no resource to render.
    #[error("no resource for format '{format}'")]
    ResourceNotFound { format: FormatSymbol },

    #[error("render failed: {0}")]
    Render(#[source] E),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl<E> NegotiateError<E> {
    /// The HTTP status a web layer should answer with.
    pub fn status_code(&self) -> u16 {
        match self {
            NegotiateError::NotAcceptable { .. } => 406,
            NegotiateError::ResourceNotFound { .. } => 404,
            NegotiateError::Render(_) | NegotiateError::Store(_) => 500,
        }
    }

    pub fn is_not_acceptable(&self) -> bool {
        matches!(self, NegotiateError::NotAcceptable { .. })
    }
}
