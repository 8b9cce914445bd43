use merit_types::ContentDigest;

/// Domain-separated BLAKE3 canonical hasher.
///
/// Each hasher carries a domain tag (e.g., `"merit-entry-v1"`) that is
/// prepended to every hash computation. This prevents cross-type hash
/// collisions: an entry payload and a revocation payload with identical
/// bytes produce different digests.
pub struct CanonicalHasher {
    domain: &'static str,
}

impl CanonicalHasher {
    /// Hasher for rating entry payloads.
    pub const ENTRY: Self = Self {
        domain: "merit-entry-v1",
    };
    /// Hasher for revocation payloads.
    pub const REVOKE: Self = Self {
        domain: "merit-revoke-v1",
    };
    /// Hasher for entry identifier derivation.
    pub const ENTRY_URI: Self = Self {
        domain: "merit-entry-uri-v1",
    };

    /// Create a hasher with a custom domain tag.
    pub const fn new(domain: &'static str) -> Self {
        Self { domain }
    }

    /// Hash raw bytes with domain separation.
    pub fn hash(&self, data: &[u8]) -> ContentDigest {
        let mut hasher = blake3::Hasher::new();
        hasher.update(self.domain.as_bytes());
        hasher.update(b":");
        hasher.update(data);
        ContentDigest::from_hash(*hasher.finalize().as_bytes())
    }

    /// Hash a serializable value through its canonical JSON encoding.
    ///
    /// The value is re-encoded through `serde_json::Value`, whose object
    /// map is a `BTreeMap`: keys come out sorted, so structurally equal
    /// values hash identically regardless of field insertion order.
    pub fn hash_canonical<T: serde::Serialize>(
        &self,
        value: &T,
    ) -> Result<ContentDigest, HasherError> {
        let canonical = serde_json::to_value(value)
            .map_err(|e| HasherError::Serialization(e.to_string()))?;
        let data = serde_json::to_vec(&canonical)
            .map_err(|e| HasherError::Serialization(e.to_string()))?;
        Ok(self.hash(&data))
    }

    /// Verify that data produces the expected digest.
    pub fn verify(&self, data: &[u8], expected: &ContentDigest) -> bool {
        self.hash(data) == *expected
    }

    /// The domain tag used by this hasher.
    pub fn domain(&self) -> &str {
        self.domain
    }
}

/// Errors from hashing operations.
#[derive(Debug, thiserror::Error, Clone, PartialEq, Eq)]
pub enum HasherError {
    #[error("serialization error: {0}")]
    Serialization(String),
}
