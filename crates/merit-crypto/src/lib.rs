//! Cryptographic core for the Merit rating ledger.
//!
//! Provides domain-separated BLAKE3 canonical hashing, Ed25519 signing
//! primitives, the injected signing/key-resolution capability traits,
//! the deterministic structural encoder used for identifier derivation,
//! and the digest & signature engine that orchestrates the two-party
//! protocol.
//!
//! All crypto operations wrap established libraries — no custom
//! cryptography.

pub mod capability;
pub mod encode;
pub mod engine;
pub mod hasher;
pub mod memory;
pub mod signer;

pub use capability::{KeyPurpose, KeyResolver, SignError, SigningCapability};
pub use encode::StructuralEncoder;
pub use engine::{hash_and_sign, sign_digest, verify_signature, EntrySignature, SignatureAlgorithm};
pub use hasher::{CanonicalHasher, HasherError};
pub use memory::InMemoryKeyring;
pub use signer::{Signature, SignatureError, SigningKey, VerifyingKey};
