//! Foundation types for the Merit rating ledger.
//!
//! This crate provides the identity, identifier, and content types shared
//! by every other merit crate. Nothing here performs I/O or cryptography;
//! hashing and signing live in `merit-crypto`.
//!
//! # Key Types
//!
//! - [`ContentDigest`] — BLAKE3 digest of a canonical record
//! - [`Ident`] / [`EntryUri`] / [`ChainSpaceId`] — ledger identifiers and their URI forms
//! - [`DidUri`] / [`ChainAddress`] — decentralized identities and their on-chain form
//! - [`MessageId`] — `msg-<uuid>` correlation identifier
//! - [`RatingContent`] / [`CanonicalRating`] — raw and chain-canonical rating records

pub mod digest;
pub mod error;
pub mod ident;
pub mod identity;
pub mod message;
pub mod rating;

pub use digest::ContentDigest;
pub use error::IdentError;
pub use ident::{ChainSpaceId, EntryUri, Ident};
pub use identity::{ChainAddress, DidUri, IdentityCanonicalizer, PrefixCanonicalizer};
pub use message::MessageId;
pub use rating::{CanonicalRating, EntityType, RatingContent, RatingType};
