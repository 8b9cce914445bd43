//! The digest & signature engine.
//!
//! Orchestrates the two-party protocol primitives: canonical digesting,
//! signing through an injected [`SigningCapability`], and verification
//! through an injected [`KeyResolver`]. Signature shape is always
//! validated before any cryptographic check — a malformed signature is
//! never silently treated as valid.

use serde::{Deserialize, Serialize};

use merit_types::{ContentDigest, DidUri};

use crate::capability::{KeyPurpose, KeyResolver, SignError, SigningCapability};
use crate::hasher::CanonicalHasher;
use crate::signer::Signature;

/// Signature algorithm tag carried on every [`EntrySignature`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureAlgorithm {
    Ed25519,
}

impl SignatureAlgorithm {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
        }
    }

    /// Expected signature length in bytes.
    pub fn signature_len(&self) -> usize {
        match self {
            Self::Ed25519 => 64,
        }
    }
}

impl std::fmt::Display for SignatureAlgorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A structured, algorithm-tagged signature over a content digest.
///
/// `key_uri` references the signing key as `<did>#<fragment>`; the DID
/// part must match the claimed signer for the signature to verify.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntrySignature {
    /// Reference to the key that produced this signature.
    pub key_uri: String,
    pub algorithm: SignatureAlgorithm,
    /// Raw signature bytes, hex-encoded on the wire.
    #[serde(with = "hex_bytes")]
    pub bytes: Vec<u8>,
}

impl EntrySignature {
    pub fn new(key_uri: impl Into<String>, algorithm: SignatureAlgorithm, bytes: Vec<u8>) -> Self {
        Self {
            key_uri: key_uri.into(),
            algorithm,
            bytes,
        }
    }

    /// Validate the signature's shape against the claimed signer.
    ///
    /// Checks, in order: the key URI is present and rooted in the
    /// expected signer's DID, and the byte length matches the algorithm.
    /// Runs before any cryptographic verification.
    pub fn validate_shape(&self, expected_signer: &DidUri) -> Result<(), SignError> {
        if self.key_uri.is_empty() {
            return Err(SignError::MalformedSignature("empty key uri".into()));
        }
        let base = self.key_uri.split('#').next().unwrap_or(&self.key_uri);
        let did = DidUri::parse(base)?;
        if &did != expected_signer {
            return Err(SignError::SignerMismatch {
                key_uri: self.key_uri.clone(),
                expected: expected_signer.to_uri(),
            });
        }
        if self.bytes.len() != self.algorithm.signature_len() {
            return Err(SignError::MalformedSignature(format!(
                "expected {} signature bytes, got {}",
                self.algorithm.signature_len(),
                self.bytes.len()
            )));
        }
        Ok(())
    }
}

/// Compute the canonical digest of `record` and sign it.
///
/// The digest is deterministic under structurally-equal input regardless
/// of field insertion order (see [`CanonicalHasher::hash_canonical`]).
/// The digest bytes are signed under the `assertion` key purpose.
pub async fn hash_and_sign<T: Serialize>(
    hasher: &CanonicalHasher,
    record: &T,
    signer: &DidUri,
    capability: &dyn SigningCapability,
) -> Result<(ContentDigest, EntrySignature), SignError> {
    let digest = hasher.hash_canonical(record)?;
    let signature = capability
        .sign(digest.as_bytes(), signer, KeyPurpose::Assertion)
        .await?;
    Ok((digest, signature))
}

/// Sign an already-computed digest directly.
///
/// Used when countersigning an existing record: the author signs the
/// provider's digest without re-hashing the content.
pub async fn sign_digest(
    digest: &ContentDigest,
    signer: &DidUri,
    capability: &dyn SigningCapability,
) -> Result<EntrySignature, SignError> {
    capability
        .sign(digest.as_bytes(), signer, KeyPurpose::Assertion)
        .await
}

/// Verify a signature over a digest against the claimed signer identity.
///
/// Shape validation runs first; only then is the key resolved under the
/// `assertion` purpose and the signature checked cryptographically.
pub async fn verify_signature(
    digest: &ContentDigest,
    signature: &EntrySignature,
    expected_signer: &DidUri,
    resolver: &dyn KeyResolver,
) -> Result<(), SignError> {
    signature.validate_shape(expected_signer)?;
    let key = resolver
        .resolve(expected_signer, KeyPurpose::Assertion)
        .await?;
    let sig = Signature::from_slice(&signature.bytes)
        .map_err(|e| SignError::MalformedSignature(e.to_string()))?;
    key.verify(digest.as_bytes(), &sig)
        .map_err(|_| SignError::VerificationFailed)
}

mod hex_bytes {
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&hex::encode(bytes))
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<u8>, D::Error>
    where
        D: Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        hex::decode(&s).map_err(serde::de::Error::custom)
    }
}
