//! In-memory keyring implementing both capability traits.
//!
//! Holds Ed25519 keys per DID and signs/resolves deterministically.
//! Intended for tests and demos; production deployments inject
//! implementations backed by real key storage.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use merit_types::DidUri;

use crate::capability::{KeyPurpose, KeyResolver, SignError, SigningCapability};
use crate::engine::{EntrySignature, SignatureAlgorithm};
use crate::signer::{SigningKey, VerifyingKey};

/// In-memory Ed25519 keyring.
#[derive(Default)]
pub struct InMemoryKeyring {
    keys: RwLock<HashMap<DidUri, SigningKey>>,
}

impl InMemoryKeyring {
    pub fn new() -> Self {
        Self::default()
    }

    /// Generate a fresh key and register it under the DID derived from
    /// its public key. Returns the new identity.
    pub fn generate(&self) -> DidUri {
        let key = SigningKey::generate();
        let did = DidUri::from_address(key.verifying_key().to_chain_address());
        self.insert(did.clone(), key);
        did
    }

    /// Register an existing key under an explicit DID.
    pub fn insert(&self, did: DidUri, key: SigningKey) {
        // A poisoned lock still holds valid key material; recover it.
        let mut keys = self.keys.write().unwrap_or_else(|e| e.into_inner());
        keys.insert(did, key);
    }

    /// Returns `true` if key material is held for the DID.
    pub fn contains(&self, did: &DidUri) -> bool {
        let keys = self.keys.read().unwrap_or_else(|e| e.into_inner());
        keys.contains_key(did)
    }

    fn with_key<T>(
        &self,
        signer: &DidUri,
        f: impl FnOnce(&SigningKey) -> T,
    ) -> Result<T, SignError> {
        let keys = self
            .keys
            .read()
            .map_err(|_| SignError::Unavailable("keyring lock poisoned".into()))?;
        let key = keys
            .get(signer)
            .ok_or_else(|| SignError::UnknownSigner(signer.to_uri()))?;
        Ok(f(key))
    }
}

#[async_trait]
impl SigningCapability for InMemoryKeyring {
    async fn sign(
        &self,
        data: &[u8],
        signer: &DidUri,
        purpose: KeyPurpose,
    ) -> Result<EntrySignature, SignError> {
        let signature = self.with_key(signer, |key| key.sign(data))?;
        Ok(EntrySignature::new(
            format!("{}#{}", signer.to_uri(), purpose.as_str()),
            SignatureAlgorithm::Ed25519,
            signature.to_bytes().to_vec(),
        ))
    }
}

#[async_trait]
impl KeyResolver for InMemoryKeyring {
    async fn resolve(
        &self,
        signer: &DidUri,
        _purpose: KeyPurpose,
    ) -> Result<VerifyingKey, SignError> {
        self.with_key(signer, |key| key.verifying_key())
    }
}
