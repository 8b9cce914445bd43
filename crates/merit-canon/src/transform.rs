//! Canonical transformation of raw rating content.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use merit_types::{
    CanonicalRating, DidUri, EntryUri, IdentityCanonicalizer, MessageId, RatingContent,
};

use crate::error::RatingContentError;
use crate::validate::validate_content;

/// A canonical rating stamped with its message id and transaction time,
/// ready for digesting.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CanonicalEntry {
    pub content: CanonicalRating,
    pub message_id: MessageId,
    pub tx_time: DateTime<Utc>,
}

/// Encode a decimal rating as a x10 integer.
///
/// `f64::round` rounds half away from zero, the ledger's rounding rule:
/// 2.75 encodes to 28, 3.33 to 33.
pub fn encode_rating(total_rating: f64) -> u64 {
    (total_rating * 10.0).round() as u64
}

/// Transform raw content into its chain-canonical form.
///
/// Validates the content, generates a message id when none is supplied,
/// stamps the current UTC time, re-encodes the decimal rating, resolves
/// the provider identity to its chain form, and rewrites any reference
/// identifier from URI to canonical form.
pub fn canonicalize(
    content: &RatingContent,
    provider: &DidUri,
    canonicalizer: &dyn IdentityCanonicalizer,
    message_id: Option<MessageId>,
) -> Result<CanonicalEntry, RatingContentError> {
    validate_content(content)?;

    let reference_id = match &content.reference_id {
        Some(uri) => Some(*EntryUri::parse(uri)?.ident()),
        None => None,
    };

    let canonical = CanonicalRating {
        entity_uid: content.entity_uid.clone(),
        entity_id: content.entity_id.clone(),
        entity_type: content.entity_type,
        provider_id: content.provider_id.clone(),
        provider_uid: content.provider_uid.clone(),
        rating_type: content.rating_type,
        count_of_txn: content.count_of_txn,
        total_encoded_rating: encode_rating(content.total_rating),
        provider: canonicalizer.to_chain(provider)?,
        reference_id,
    };

    Ok(CanonicalEntry {
        content: canonical,
        message_id: message_id.unwrap_or_else(MessageId::generate),
        tx_time: Utc::now(),
    })
}

#[cfg(test)]
mod tests {
    use merit_types::{EntityType, Ident, PrefixCanonicalizer, RatingType};

    use crate::error::ContentError;

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

    fn provider() -> DidUri {
        DidUri::parse("did:merit:3xProvider").unwrap()
    }

    #[test]
    fn rating_encoding_examples() {
        assert_eq!(encode_rating(4.5), 45);
        assert_eq!(encode_rating(3.33), 33);
        assert_eq!(encode_rating(5.0), 50);
        // 27.5 is exact in binary; the half rounds away from zero.
        assert_eq!(encode_rating(2.75), 28);
        assert_eq!(encode_rating(0.04), 0);
    }

    #[test]
    fn encoding_roundtrip_within_tolerance() {
        for rating in [4.5, 3.33, 1.0, 0.5, 4.99] {
            let encoded = encode_rating(rating);
            assert!((encoded as f64 / 10.0 - rating).abs() < 0.05);
        }
    }

    #[test]
    fn canonical_form_drops_decimal_and_encodes() {
        let entry = canonicalize(&content(), &provider(), &PrefixCanonicalizer, None).unwrap();
        assert_eq!(entry.content.total_encoded_rating, 45);
        assert_eq!(entry.content.provider.as_str(), "3xProvider");
        assert_eq!(entry.content.entity_uid, "e1");
    }

    #[test]
    fn message_id_generated_when_missing() {
        let entry = canonicalize(&content(), &provider(), &PrefixCanonicalizer, None).unwrap();
        assert!(entry.message_id.as_str().starts_with("msg-"));
    }

    #[test]
    fn supplied_message_id_is_kept() {
        let id = MessageId::generate();
        let entry =
            canonicalize(&content(), &provider(), &PrefixCanonicalizer, Some(id.clone())).unwrap();
        assert_eq!(entry.message_id, id);
    }

    #[test]
    fn reference_uri_rewritten_to_canonical() {
        let ident = Ident::from_hash([9; 32]);
        let mut c = content();
        c.reference_id = Some(EntryUri::from_ident(ident).to_uri());
        let entry = canonicalize(&c, &provider(), &PrefixCanonicalizer, None).unwrap();
        assert_eq!(entry.content.reference_id, Some(ident));
    }

    #[test]
    fn malformed_reference_fails_with_ident_error() {
        let mut c = content();
        c.reference_id = Some("entry:merit:nothex".into());
        let err = canonicalize(&c, &provider(), &PrefixCanonicalizer, None).unwrap_err();
        assert!(matches!(err, RatingContentError::Ident(_)));
    }

    #[test]
    fn invalid_content_fails_before_transformation() {
        let mut c = content();
        c.count_of_txn = 1;
        c.total_rating = 5.5;
        let err = canonicalize(&c, &provider(), &PrefixCanonicalizer, None).unwrap_err();
        assert!(matches!(
            err,
            RatingContentError::Content(ContentError::RatingOutOfRange { .. })
        ));
    }

    #[test]
    fn tx_time_is_recent() {
        let before = Utc::now();
        let entry = canonicalize(&content(), &provider(), &PrefixCanonicalizer, None).unwrap();
        let after = Utc::now();
        assert!(entry.tx_time >= before && entry.tx_time <= after);
    }
}
