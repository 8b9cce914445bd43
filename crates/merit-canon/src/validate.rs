//! Structural and semantic validation of rating content.
//!
//! Emptiness checks iterate the string fields directly and short-circuit
//! on the first offending field, naming it in the error. Enumeration
//! membership (`entity_type`, `rating_type`) is enforced by the type
//! system; what remains to check semantically is the transaction count
//! and the rating-magnitude invariant.

use merit_types::rating::{
    CanonicalRating, RatingContent, MAX_ENCODED_RATING_PER_TXN, MAX_RATING_PER_TXN,
};

use crate::error::ContentError;

/// Validate raw rating content. Pure function, no side effects.
pub fn validate_content(content: &RatingContent) -> Result<(), ContentError> {
    let fields = [
        ("entity_uid", content.entity_uid.as_str()),
        ("entity_id", content.entity_id.as_str()),
        ("provider_id", content.provider_id.as_str()),
        ("provider_uid", content.provider_uid.as_str()),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ContentError::EmptyField(name));
        }
    }
    if let Some(reference) = &content.reference_id {
        if reference.trim().is_empty() {
            return Err(ContentError::EmptyField("reference_id"));
        }
    }
    if content.count_of_txn == 0 {
        return Err(ContentError::ZeroTransactionCount);
    }
    if !content.total_rating.is_finite() || content.total_rating <= 0.0 {
        return Err(ContentError::InvalidRating(content.total_rating));
    }
    let max = content.count_of_txn as f64 * MAX_RATING_PER_TXN;
    if content.total_rating > max {
        return Err(ContentError::RatingOutOfRange {
            total: content.total_rating,
            max,
            count: content.count_of_txn,
        });
    }
    Ok(())
}

/// Validate a chain-canonical rating. Pure function, no side effects.
pub fn validate_canonical(content: &CanonicalRating) -> Result<(), ContentError> {
    let fields = [
        ("entity_uid", content.entity_uid.as_str()),
        ("entity_id", content.entity_id.as_str()),
        ("provider_id", content.provider_id.as_str()),
        ("provider_uid", content.provider_uid.as_str()),
        ("provider", content.provider.as_str()),
    ];
    for (name, value) in fields {
        if value.trim().is_empty() {
            return Err(ContentError::EmptyField(name));
        }
    }
    if content.count_of_txn == 0 {
        return Err(ContentError::ZeroTransactionCount);
    }
    let max = content.count_of_txn * MAX_ENCODED_RATING_PER_TXN;
    if content.total_encoded_rating > max {
        return Err(ContentError::EncodedRatingOutOfRange {
            total: content.total_encoded_rating,
            max,
            count: content.count_of_txn,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use merit_types::{ChainAddress, EntityType, RatingType};

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
    fn valid_content_passes() {
        assert!(validate_content(&content()).is_ok());
    }

    #[test]
    fn each_empty_field_is_named() {
        let cases: [(&str, fn(&mut RatingContent)); 4] = [
            ("entity_uid", |c| c.entity_uid.clear()),
            ("entity_id", |c| c.entity_id.clear()),
            ("provider_id", |c| c.provider_id.clear()),
            ("provider_uid", |c| c.provider_uid.clear()),
        ];
        for (field, clear) in cases {
            let mut c = content();
            clear(&mut c);
            assert_eq!(
                validate_content(&c).unwrap_err(),
                ContentError::EmptyField(field)
            );
        }
    }

    #[test]
    fn whitespace_only_counts_as_empty() {
        let mut c = content();
        c.entity_uid = "   ".into();
        assert_eq!(
            validate_content(&c).unwrap_err(),
            ContentError::EmptyField("entity_uid")
        );
    }

    #[test]
    fn empty_reference_is_named() {
        let mut c = content();
        c.reference_id = Some(String::new());
        assert_eq!(
            validate_content(&c).unwrap_err(),
            ContentError::EmptyField("reference_id")
        );
    }

    #[test]
    fn emptiness_short_circuits_on_first_field() {
        let mut c = content();
        c.entity_uid.clear();
        c.provider_uid.clear();
        // Both are empty; the first in field order is reported.
        assert_eq!(
            validate_content(&c).unwrap_err(),
            ContentError::EmptyField("entity_uid")
        );
    }

    #[test]
    fn zero_txn_count_fails() {
        let mut c = content();
        c.count_of_txn = 0;
        assert_eq!(
            validate_content(&c).unwrap_err(),
            ContentError::ZeroTransactionCount
        );
    }

    #[test]
    fn magnitude_at_boundary_passes() {
        let mut c = content();
        c.count_of_txn = 1;
        c.total_rating = 5.0;
        assert!(validate_content(&c).is_ok());
    }

    #[test]
    fn magnitude_above_boundary_fails() {
        let mut c = content();
        c.count_of_txn = 1;
        c.total_rating = 5.5;
        assert!(matches!(
            validate_content(&c).unwrap_err(),
            ContentError::RatingOutOfRange { count: 1, .. }
        ));
    }

    #[test]
    fn non_finite_rating_fails() {
        let mut c = content();
        c.total_rating = f64::NAN;
        assert!(matches!(
            validate_content(&c).unwrap_err(),
            ContentError::InvalidRating(_)
        ));
    }

    #[test]
    fn negative_rating_fails() {
        let mut c = content();
        c.total_rating = -1.0;
        assert!(matches!(
            validate_content(&c).unwrap_err(),
            ContentError::InvalidRating(_)
        ));
    }

    #[test]
    fn valid_canonical_passes() {
        assert!(validate_canonical(&canonical()).is_ok());
    }

    #[test]
    fn canonical_empty_provider_is_named() {
        let mut c = canonical();
        c.provider = ChainAddress::parse("x").unwrap();
        c.provider_uid.clear();
        assert_eq!(
            validate_canonical(&c).unwrap_err(),
            ContentError::EmptyField("provider_uid")
        );
    }

    #[test]
    fn canonical_encoded_magnitude_boundary() {
        let mut c = canonical();
        c.count_of_txn = 1;
        c.total_encoded_rating = 50;
        assert!(validate_canonical(&c).is_ok());
        c.total_encoded_rating = 51;
        assert!(matches!(
            validate_canonical(&c).unwrap_err(),
            ContentError::EncodedRatingOutOfRange { max: 50, .. }
        ));
    }
}
