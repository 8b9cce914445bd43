//! Injected signing and key-resolution capabilities.
//!
//! The dispatch core never holds private keys. Signing and verification
//! key lookup are delegated through these traits; implementations may
//! talk to a remote signer or hardware key store, so both calls are
//! asynchronous with no internally-imposed timeout — callers impose
//! their own.

use async_trait::async_trait;
use merit_types::{DidUri, IdentError};

use crate::engine::EntrySignature;
use crate::hasher::HasherError;
use crate::signer::VerifyingKey;

/// Purpose a key is used for, as published in the signer's identity
/// document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum KeyPurpose {
    /// Attesting to content (rating entries, revocations).
    Assertion,
    /// Authenticating as the identity (not used by the dispatch core).
    Authentication,
}

impl KeyPurpose {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Assertion => "assertion",
            Self::Authentication => "authentication",
        }
    }
}

impl std::fmt::Display for KeyPurpose {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Errors from signing, key resolution, and signature verification.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum SignError {
    #[error("signing capability unavailable: {0}")]
    Unavailable(String),

    #[error("no key material for signer {0}")]
    UnknownSigner(String),

    #[error("no {purpose} key published for signer {signer}")]
    NoKeyForPurpose { signer: String, purpose: KeyPurpose },

    #[error("malformed signature: {0}")]
    MalformedSignature(String),

    #[error("signature key {key_uri:?} is not rooted in signer {expected}")]
    SignerMismatch { key_uri: String, expected: String },

    #[error("canonical encoding failed: {0}")]
    Encoding(#[from] HasherError),

    #[error("invalid identifier: {0}")]
    Ident(#[from] IdentError),

    #[error("signature verification failed")]
    VerificationFailed,
}

/// An external holder of private key material that signs on behalf of an
/// identity.
#[async_trait]
pub trait SigningCapability: Send + Sync {
    /// Sign `data` with the key the signer publishes for `purpose`.
    async fn sign(
        &self,
        data: &[u8],
        signer: &DidUri,
        purpose: KeyPurpose,
    ) -> Result<EntrySignature, SignError>;
}

/// Resolves the public key a signer publishes for a given purpose.
#[async_trait]
pub trait KeyResolver: Send + Sync {
    /// Look up the verification key for `signer` under `purpose`.
    async fn resolve(&self, signer: &DidUri, purpose: KeyPurpose)
        -> Result<VerifyingKey, SignError>;
}
