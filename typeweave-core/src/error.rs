//! Error types for Typeweave core operations.

use crate::identifiers::IdentifierKind;
use thiserror::Error;

/// Core error type for Typeweave operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// No legal identifier can be produced from the raw text.
    #[error("cannot derive a {kind} identifier from '{raw}': {reason}")]
    UnusableIdentifier {
        /// Raw text handed to the identifier service.
        raw: String,
        /// Kind of identifier requested.
        kind: IdentifierKind,
        /// Why the text was rejected.
        reason: String,
    },
}

impl Error {
    /// Creates an unusable identifier error.
    pub fn unusable_identifier(
        raw: impl Into<String>,
        kind: IdentifierKind,
        reason: impl Into<String>,
    ) -> Self {
        Self::UnusableIdentifier {
            raw: raw.into(),
            kind,
            reason: reason.into(),
        }
    }
}

/// Result type alias for Typeweave core operations.
pub type Result<T> = std::result::Result<T, Error>;
