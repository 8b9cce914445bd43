use thiserror::Error;

use merit_crypto::SignError;
use merit_types::IdentError;

/// Structural or semantic violations in rating content.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ContentError {
    #[error("required field {0:?} is empty")]
    EmptyField(&'static str),

    #[error("count of transactions must be greater than zero")]
    ZeroTransactionCount,

    #[error("total rating must be a positive finite number, got {0}")]
    InvalidRating(f64),

    #[error("total rating {total} exceeds maximum {max} for {count} transactions")]
    RatingOutOfRange { total: f64, max: f64, count: u64 },

    #[error("encoded rating {total} exceeds maximum {max} for {count} transactions")]
    EncodedRatingOutOfRange { total: u64, max: u64, count: u64 },
}

/// Pipeline-boundary error for content construction (canonicalization
/// and sealing). The inner cause stays inspectable through `source()`.
#[derive(Debug, Error)]
pub enum RatingContentError {
    #[error("content error: {0}")]
    Content(#[from] ContentError),

    #[error("identifier error: {0}")]
    Ident(#[from] IdentError),

    #[error("signing error: {0}")]
    Sign(#[from] SignError),
}
