//! Dispatch assembly for the Merit rating ledger.
//!
//! Takes provider-signed entries and revocations, enforces the
//! two-party signature protocol (verify the provider, countersign as
//! the author), derives the deterministic entry identifier, and
//! assembles the ledger-bound [`DispatchRecord`] consumed by the
//! external submission layer.

pub mod builder;
pub mod derive;
pub mod error;
pub mod record;

pub use builder::DispatchBuilder;
pub use derive::derive_entry_uri;
pub use error::{Pipeline, RatingPropertiesError};
pub use record::{DispatchRecord, DispatchedRating, EntryBody, RevokeBody};
