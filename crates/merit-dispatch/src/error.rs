use std::fmt;

use thiserror::Error;

use merit_canon::ContentError;
use merit_crypto::SignError;

/// Which dispatch pipeline raised an error.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Pipeline {
    Create,
    Revise,
    Revoke,
}

impl fmt::Display for Pipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Create => write!(f, "create"),
            Self::Revise => write!(f, "revise"),
            Self::Revoke => write!(f, "revoke"),
        }
    }
}

/// Pipeline-boundary error for dispatch assembly.
///
/// Every failure names the pipeline that raised it and carries the
/// failing step's error as a structured `source()` — the cause is never
/// flattened into a message string.
#[derive(Debug, Error)]
pub enum RatingPropertiesError {
    #[error("{pipeline} dispatch rejected: content invalid")]
    Content {
        pipeline: Pipeline,
        #[source]
        cause: ContentError,
    },

    #[error("{pipeline} dispatch rejected: provider signature invalid")]
    ProviderSignature {
        pipeline: Pipeline,
        #[source]
        cause: SignError,
    },

    #[error("{pipeline} dispatch rejected: required field {field:?} is missing or empty")]
    MissingField {
        pipeline: Pipeline,
        field: &'static str,
    },

    #[error("{pipeline} dispatch rejected: author signing failed")]
    AuthorSigning {
        pipeline: Pipeline,
        #[source]
        cause: SignError,
    },

    #[error("revise dispatch rejected: content carries no reference to the entry being revised")]
    MissingReference,
}

impl RatingPropertiesError {
    /// The pipeline that raised this error.
    pub fn pipeline(&self) -> Pipeline {
        match self {
            Self::Content { pipeline, .. }
            | Self::ProviderSignature { pipeline, .. }
            | Self::MissingField { pipeline, .. }
            | Self::AuthorSigning { pipeline, .. } => *pipeline,
            Self::MissingReference => Pipeline::Revise,
        }
    }
}
