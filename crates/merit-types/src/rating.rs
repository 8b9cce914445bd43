//! Rating content as supplied by a provider, and its chain-canonical
//! form.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ident::Ident;
use crate::identity::ChainAddress;

/// Maximum decimal rating per transaction.
pub const MAX_RATING_PER_TXN: f64 = 5.0;

/// Maximum encoded (x10 integer) rating per transaction.
pub const MAX_ENCODED_RATING_PER_TXN: u64 = 50;

/// Kind of entity a rating is about.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    Entity,
    Retail,
    Logistic,
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Entity => write!(f, "Entity"),
            Self::Retail => write!(f, "Retail"),
            Self::Logistic => write!(f, "Logistic"),
        }
    }
}

/// Aspect of service a rating covers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RatingType {
    Overall,
    Delivery,
}

impl fmt::Display for RatingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overall => write!(f, "Overall"),
            Self::Delivery => write!(f, "Delivery"),
        }
    }
}

/// Raw rating content as supplied by a provider, before
/// canonicalization.
///
/// `total_rating` is the decimal aggregate over `count_of_txn`
/// transactions and must not exceed `count_of_txn` x
/// [`MAX_RATING_PER_TXN`].
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RatingContent {
    /// Ledger-unique id of the entity being rated.
    pub entity_uid: String,
    /// Display name of the entity.
    pub entity_id: String,
    pub entity_type: EntityType,
    /// Display name of the rating provider.
    pub provider_id: String,
    /// Ledger-unique id of the rating provider.
    pub provider_uid: String,
    pub rating_type: RatingType,
    /// Number of transactions the rating aggregates.
    pub count_of_txn: u64,
    /// Decimal aggregate rating.
    pub total_rating: f64,
    /// URI of a prior entry this content references (set on revisions).
    pub reference_id: Option<String>,
}

/// Chain-canonical form of [`RatingContent`].
///
/// The decimal rating is re-encoded as a x10 integer, the provider DID
/// is resolved to its chain address, and any reference identifier is
/// rewritten from URI form to canonical form. The raw decimal rating is
/// dropped.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CanonicalRating {
    pub entity_uid: String,
    pub entity_id: String,
    pub entity_type: EntityType,
    pub provider_id: String,
    pub provider_uid: String,
    pub rating_type: RatingType,
    pub count_of_txn: u64,
    /// `round(total_rating x 10)`, half away from zero.
    pub total_encoded_rating: u64,
    /// Chain-canonical identity of the provider.
    pub provider: ChainAddress,
    /// Canonical identifier of the referenced prior entry, if any.
    pub reference_id: Option<Ident>,
}
