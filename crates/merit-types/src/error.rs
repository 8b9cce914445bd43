use thiserror::Error;

/// Errors produced by parsing digests, identifiers, identities, and
/// message ids.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IdentError {
    #[error("invalid hex string: {0}")]
    InvalidHex(String),

    #[error("invalid byte length: expected {expected}, got {actual}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("invalid identifier {ident:?}: {reason}")]
    InvalidIdentifier { ident: String, reason: String },

    #[error("invalid DID {uri:?}: {reason}")]
    InvalidDid { uri: String, reason: String },

    #[error("invalid message id {id:?}: {reason}")]
    InvalidMessageId { id: String, reason: String },
}
