//! Ledger identifier syntax and the URI codec.
//!
//! A canonical identifier is 64 lowercase hex characters naming a
//! 32-byte hash. The URI form prefixes a scheme and the ledger
//! namespace: `entry:merit:<hex>` for rating entries, `space:merit:<hex>`
//! for chain spaces. The chain stores canonical identifiers; everything
//! outside the chain speaks URIs.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IdentError;

/// Namespace segment shared by all merit URIs.
pub const URI_NAMESPACE: &str = "merit";

/// A canonical (non-URI) ledger identifier.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ident([u8; 32]);

impl Ident {
    /// Length of the hex text form.
    pub const HEX_LEN: usize = 64;

    /// Derive from a raw 32-byte hash.
    pub fn from_hash(hash: [u8; 32]) -> Self {
        Self(hash)
    }

    /// Parse and validate a canonical identifier.
    pub fn parse(s: &str) -> Result<Self, IdentError> {
        if s.len() != Self::HEX_LEN {
            return Err(IdentError::InvalidIdentifier {
                ident: s.to_string(),
                reason: format!("expected {} hex characters, got {}", Self::HEX_LEN, s.len()),
            });
        }
        if !s.bytes().all(|b| matches!(b, b'0'..=b'9' | b'a'..=b'f')) {
            return Err(IdentError::InvalidIdentifier {
                ident: s.to_string(),
                reason: "must be lowercase hex".into(),
            });
        }
        let bytes = hex::decode(s).map_err(|e| IdentError::InvalidHex(e.to_string()))?;
        let mut arr = [0u8; 32];
        arr.copy_from_slice(&bytes);
        Ok(Self(arr))
    }

    /// The 32-byte hash this identifier names.
    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Canonical hex text form.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }
}

impl fmt::Debug for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ident({})", hex::encode(&self.0[..4]))
    }
}

impl fmt::Display for Ident {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

fn split_uri(uri: &str) -> Option<(&str, &str, &str)> {
    let mut parts = uri.splitn(3, ':');
    Some((parts.next()?, parts.next()?, parts.next()?))
}

fn parse_uri(uri: &str, scheme: &str) -> Result<Ident, IdentError> {
    let (s, ns, payload) = split_uri(uri).ok_or_else(|| IdentError::InvalidIdentifier {
        ident: uri.to_string(),
        reason: format!("expected <scheme>:{URI_NAMESPACE}:<identifier>"),
    })?;
    if s != scheme {
        return Err(IdentError::InvalidIdentifier {
            ident: uri.to_string(),
            reason: format!("expected scheme {scheme:?}, got {s:?}"),
        });
    }
    if ns != URI_NAMESPACE {
        return Err(IdentError::InvalidIdentifier {
            ident: uri.to_string(),
            reason: format!("unknown namespace {ns:?}"),
        });
    }
    Ident::parse(payload)
}

/// Deterministic URI naming a rating entry on the ledger.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct EntryUri(Ident);

impl EntryUri {
    pub const SCHEME: &'static str = "entry";

    /// Wrap a canonical identifier.
    pub fn from_ident(ident: Ident) -> Self {
        Self(ident)
    }

    /// Parse and validate an entry URI.
    pub fn parse(uri: &str) -> Result<Self, IdentError> {
        parse_uri(uri, Self::SCHEME).map(Self)
    }

    /// The canonical (non-URI) identifier.
    pub fn ident(&self) -> &Ident {
        &self.0
    }

    /// Full URI text form.
    pub fn to_uri(&self) -> String {
        format!("{}:{}:{}", Self::SCHEME, URI_NAMESPACE, self.0.to_hex())
    }
}

impl fmt::Debug for EntryUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "EntryUri({})", hex::encode(&self.0.as_bytes()[..4]))
    }
}

impl fmt::Display for EntryUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uri())
    }
}

impl TryFrom<String> for EntryUri {
    type Error = IdentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<EntryUri> for String {
    fn from(uri: EntryUri) -> Self {
        uri.to_uri()
    }
}

/// Identifier of the chain space (logical ledger partition) a record is
/// dispatched to.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ChainSpaceId(Ident);

impl ChainSpaceId {
    pub const SCHEME: &'static str = "space";

    /// Wrap a canonical identifier.
    pub fn from_ident(ident: Ident) -> Self {
        Self(ident)
    }

    /// Parse and validate a chain-space URI.
    pub fn parse(uri: &str) -> Result<Self, IdentError> {
        parse_uri(uri, Self::SCHEME).map(Self)
    }

    /// The canonical (non-URI) identifier.
    pub fn ident(&self) -> &Ident {
        &self.0
    }

    /// Full URI text form.
    pub fn to_uri(&self) -> String {
        format!("{}:{}:{}", Self::SCHEME, URI_NAMESPACE, self.0.to_hex())
    }
}

impl fmt::Debug for ChainSpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainSpaceId({})", hex::encode(&self.0.as_bytes()[..4]))
    }
}

impl fmt::Display for ChainSpaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uri())
    }
}

impl TryFrom<String> for ChainSpaceId {
    type Error = IdentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ChainSpaceId> for String {
    fn from(id: ChainSpaceId) -> Self {
        id.to_uri()
    }
}
