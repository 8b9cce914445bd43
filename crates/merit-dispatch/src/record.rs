//! Ledger-bound dispatch records.

use serde::{Deserialize, Serialize};

use merit_canon::RevokeIntent;
use merit_crypto::EntrySignature;
use merit_types::{
    CanonicalRating, ChainAddress, ChainSpaceId, ContentDigest, DidUri, EntityType, EntryUri,
    Ident, MessageId, RatingType,
};

/// Canonical rating fields as dispatched on-chain.
///
/// The display-only identifiers (`entity_id`, `provider_id`) are
/// stripped; only chain-canonical fields go to the ledger.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchedRating {
    pub entity_uid: String,
    pub entity_type: EntityType,
    pub provider_uid: String,
    pub rating_type: RatingType,
    pub count_of_txn: u64,
    pub total_encoded_rating: u64,
    pub provider: ChainAddress,
    pub reference_id: Option<Ident>,
}

impl From<&CanonicalRating> for DispatchedRating {
    fn from(content: &CanonicalRating) -> Self {
        Self {
            entity_uid: content.entity_uid.clone(),
            entity_type: content.entity_type,
            provider_uid: content.provider_uid.clone(),
            rating_type: content.rating_type,
            count_of_txn: content.count_of_txn,
            total_encoded_rating: content.total_encoded_rating,
            provider: content.provider.clone(),
            reference_id: content.reference_id,
        }
    }
}

/// The original signed revocation body, dispatched without stripping.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RevokeBody {
    pub intent: RevokeIntent,
    pub entity_uid: String,
}

/// Entry body of a dispatch record, varying by pipeline.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "entry", rename_all = "snake_case")]
pub enum EntryBody {
    Create(DispatchedRating),
    Revise(DispatchedRating),
    Revoke(RevokeBody),
}

/// Final ledger-bound payload, handed to the external submission layer.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct DispatchRecord {
    /// Deterministic unique identifier of this entry.
    pub entry_uri: EntryUri,
    pub chain_space: ChainSpaceId,
    pub message_id: MessageId,
    pub digest: ContentDigest,
    /// Relay operator that countersigned the digest.
    pub author: DidUri,
    pub author_signature: EntrySignature,
    pub body: EntryBody,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn canonical() -> CanonicalRating {
        CanonicalRating {
            entity_uid: "e1".into(),
            entity_id: "Corner Store".into(),
            entity_type: EntityType::Entity,
            provider_id: "Aggregator".into(),
            provider_uid: "pu1".into(),
            rating_type: RatingType::Overall,
            count_of_txn: 10,
            total_encoded_rating: 45,
            provider: ChainAddress::parse("3xProvider").unwrap(),
            reference_id: None,
        }
    }

    #[test]
    fn dispatched_rating_strips_display_fields() {
        let rating = DispatchedRating::from(&canonical());
        let json = serde_json::to_value(&rating).unwrap();
        let object = json.as_object().unwrap();
        assert!(!object.contains_key("entity_id"));
        assert!(!object.contains_key("provider_id"));
        assert_eq!(object["entity_uid"], "e1");
        assert_eq!(object["total_encoded_rating"], 45);
    }

    #[test]
    fn entry_body_serde_is_tagged() {
        let body = EntryBody::Create(DispatchedRating::from(&canonical()));
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["kind"], "create");
        assert!(json["entry"].is_object());
        let parsed: EntryBody = serde_json::from_value(json).unwrap();
        assert_eq!(body, parsed);
    }
}
