//! Provider-side sealing: packaging canonical content into signed,
//! immutable entries and revocations.
//!
//! The digest commits to the canonical content, the message id, and the
//! transaction time; the provider signs the digest bytes under the
//! `assertion` key purpose. Sealed values are never mutated — the
//! dispatch builder consumes them as-is.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use merit_crypto::{hash_and_sign, CanonicalHasher, EntrySignature, SigningCapability};
use merit_types::{
    CanonicalRating, ContentDigest, DidUri, EntryUri, IdentityCanonicalizer, MessageId,
    RatingContent,
};

use crate::error::{ContentError, RatingContentError};
use crate::transform::canonicalize;

/// Payload the entry digest commits to.
#[derive(Serialize)]
struct EntryPayload<'a> {
    content: &'a CanonicalRating,
    message_id: &'a MessageId,
    tx_time: &'a DateTime<Utc>,
}

/// A provider-signed rating entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignedEntry {
    pub content: CanonicalRating,
    pub message_id: MessageId,
    pub tx_time: DateTime<Utc>,
    /// Identity the provider signed as.
    pub provider: DidUri,
    pub digest: ContentDigest,
    pub provider_signature: EntrySignature,
}

/// Validate, canonicalize, digest, and provider-sign rating content.
pub async fn seal_entry(
    content: &RatingContent,
    provider: &DidUri,
    canonicalizer: &dyn IdentityCanonicalizer,
    capability: &dyn SigningCapability,
    message_id: Option<MessageId>,
) -> Result<SignedEntry, RatingContentError> {
    let entry = canonicalize(content, provider, canonicalizer, message_id)?;
    let payload = EntryPayload {
        content: &entry.content,
        message_id: &entry.message_id,
        tx_time: &entry.tx_time,
    };
    let (digest, provider_signature) =
        hash_and_sign(&CanonicalHasher::ENTRY, &payload, provider, capability).await?;
    Ok(SignedEntry {
        content: entry.content,
        message_id: entry.message_id,
        tx_time: entry.tx_time,
        provider: provider.clone(),
        digest,
        provider_signature,
    })
}

/// Intent to revoke a previously dispatched entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevokeIntent {
    pub message_id: MessageId,
    /// Unique URI of the entry being revoked.
    pub entry_uri: EntryUri,
    pub provider: DidUri,
    pub tx_time: DateTime<Utc>,
}

/// A provider-signed revocation, hashed and signed like an entry.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SignedRevocation {
    pub intent: RevokeIntent,
    /// Entity uid carried from the original entry; the revocation's own
    /// identifier is derived from it.
    pub entity_uid: String,
    pub digest: ContentDigest,
    pub provider_signature: EntrySignature,
}

/// Build and provider-sign a revocation of an existing entry.
pub async fn seal_revocation(
    entry_uri: &EntryUri,
    entity_uid: &str,
    provider: &DidUri,
    capability: &dyn SigningCapability,
    message_id: Option<MessageId>,
) -> Result<SignedRevocation, RatingContentError> {
    if entity_uid.trim().is_empty() {
        return Err(ContentError::EmptyField("entity_uid").into());
    }
    let intent = RevokeIntent {
        message_id: message_id.unwrap_or_else(MessageId::generate),
        entry_uri: *entry_uri,
        provider: provider.clone(),
        tx_time: Utc::now(),
    };
    let (digest, provider_signature) =
        hash_and_sign(&CanonicalHasher::REVOKE, &intent, provider, capability).await?;
    Ok(SignedRevocation {
        intent,
        entity_uid: entity_uid.to_string(),
        digest,
        provider_signature,
    })
}

#[cfg(test)]
mod tests {
    use merit_crypto::{verify_signature, InMemoryKeyring, SignError};
    use merit_types::{EntityType, Ident, PrefixCanonicalizer, RatingType};

    use super::*;

    fn content() -> RatingContent {
        RatingContent {
            entity_uid: "e1".into(),
            entity_id: "Corner Store".into(),
            entity_type: EntityType::Entity,
            provider_id: "Aggregator".into(),
            provider_uid: "pu1".into(),
            rating_type: RatingType::Overall,
            count_of_txn: 10,
            total_rating: 4.5,
            reference_id: None,
        }
    }

    #[tokio::test]
    async fn sealed_entry_verifies() {
        let keyring = InMemoryKeyring::new();
        let provider = keyring.generate();
        let entry = seal_entry(&content(), &provider, &PrefixCanonicalizer, &keyring, None)
            .await
            .unwrap();

        assert_eq!(entry.content.total_encoded_rating, 45);
        assert!(!entry.digest.is_null());
        verify_signature(&entry.digest, &entry.provider_signature, &provider, &keyring)
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn invalid_magnitude_fails_before_signing() {
        // The keyring holds no key for this provider, so reaching the
        // signing step would fail with UnknownSigner. A content error
        // proves validation rejected the content first.
        let keyring = InMemoryKeyring::new();
        let provider = DidUri::parse("did:merit:3xUnregistered").unwrap();
        let mut c = content();
        c.count_of_txn = 1;
        c.total_rating = 5.5;

        let err = seal_entry(&c, &provider, &PrefixCanonicalizer, &keyring, None)
            .await
            .unwrap_err();
        assert!(matches!(err, RatingContentError::Content(_)));
    }

    #[tokio::test]
    async fn unknown_signer_surfaces_sign_error() {
        let keyring = InMemoryKeyring::new();
        let provider = DidUri::parse("did:merit:3xUnregistered").unwrap();
        let err = seal_entry(&content(), &provider, &PrefixCanonicalizer, &keyring, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RatingContentError::Sign(SignError::UnknownSigner(_))
        ));
    }

    #[tokio::test]
    async fn sealed_entries_with_same_content_differ_by_message_id() {
        let keyring = InMemoryKeyring::new();
        let provider = keyring.generate();
        let a = seal_entry(&content(), &provider, &PrefixCanonicalizer, &keyring, None)
            .await
            .unwrap();
        let b = seal_entry(&content(), &provider, &PrefixCanonicalizer, &keyring, None)
            .await
            .unwrap();
        assert_ne!(a.message_id, b.message_id);
        assert_ne!(a.digest, b.digest);
    }

    #[tokio::test]
    async fn sealed_revocation_verifies() {
        let keyring = InMemoryKeyring::new();
        let provider = keyring.generate();
        let entry_uri = EntryUri::from_ident(Ident::from_hash([4; 32]));

        let revocation = seal_revocation(&entry_uri, "e1", &provider, &keyring, None)
            .await
            .unwrap();
        assert_eq!(revocation.intent.entry_uri, entry_uri);
        verify_signature(
            &revocation.digest,
            &revocation.provider_signature,
            &provider,
            &keyring,
        )
        .await
        .unwrap();
    }

    #[tokio::test]
    async fn revocation_digest_differs_from_entry_digest() {
        let keyring = InMemoryKeyring::new();
        let provider = keyring.generate();
        let entry = seal_entry(&content(), &provider, &PrefixCanonicalizer, &keyring, None)
            .await
            .unwrap();
        let entry_uri = EntryUri::from_ident(Ident::from_hash([4; 32]));
        let revocation = seal_revocation(
            &entry_uri,
            &entry.content.entity_uid,
            &provider,
            &keyring,
            None,
        )
        .await
        .unwrap();
        assert_ne!(entry.digest, revocation.digest);
    }

    #[tokio::test]
    async fn revocation_requires_entity_uid() {
        let keyring = InMemoryKeyring::new();
        let provider = keyring.generate();
        let entry_uri = EntryUri::from_ident(Ident::from_hash([4; 32]));
        let err = seal_revocation(&entry_uri, "  ", &provider, &keyring, None)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            RatingContentError::Content(ContentError::EmptyField("entity_uid"))
        ));
    }

    #[tokio::test]
    async fn signed_entry_serde_roundtrip() {
        let keyring = InMemoryKeyring::new();
        let provider = keyring.generate();
        let entry = seal_entry(&content(), &provider, &PrefixCanonicalizer, &keyring, None)
            .await
            .unwrap();
        let json = serde_json::to_string(&entry).unwrap();
        let parsed: SignedEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(entry, parsed);
    }

    #[tokio::test]
    async fn wrapped_error_exposes_source() {
        use std::error::Error;

        let keyring = InMemoryKeyring::new();
        let provider = DidUri::parse("did:merit:3xUnregistered").unwrap();
        let mut c = content();
        c.entity_uid.clear();
        let err = seal_entry(&c, &provider, &PrefixCanonicalizer, &keyring, None)
            .await
            .unwrap_err();
        let source = err.source().expect("cause must be preserved");
        assert!(source.to_string().contains("entity_uid"));
    }
}
