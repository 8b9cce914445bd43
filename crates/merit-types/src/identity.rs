//! Decentralized identities and their chain-canonical form.
//!
//! Providers and authors are named by DID URIs (`did:merit:<address>`).
//! The ledger itself stores only the bare address. Conversion between
//! the two forms goes through [`IdentityCanonicalizer`] so that the
//! dispatch core never depends on a DID-resolution layer.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IdentError;

/// DID method segment for merit identities.
pub const DID_METHOD: &str = "merit";

/// Chain-canonical account identity: the bare address the ledger stores.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChainAddress(String);

impl ChainAddress {
    /// Parse and validate an address. Addresses are non-empty and
    /// alphanumeric.
    pub fn parse(s: &str) -> Result<Self, IdentError> {
        if s.is_empty() {
            return Err(IdentError::InvalidDid {
                uri: s.to_string(),
                reason: "address must not be empty".into(),
            });
        }
        if !s.bytes().all(|b| b.is_ascii_alphanumeric()) {
            return Err(IdentError::InvalidDid {
                uri: s.to_string(),
                reason: "address must be alphanumeric".into(),
            });
        }
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ChainAddress({})", self.0)
    }
}

impl fmt::Display for ChainAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A decentralized identity URI, `did:merit:<address>`.
///
/// Fragments (`#key-id`) and query parts are not part of the identity;
/// [`DidUri::parse`] strips them.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct DidUri {
    address: ChainAddress,
}

impl DidUri {
    /// Parse and validate a DID URI.
    pub fn parse(uri: &str) -> Result<Self, IdentError> {
        let base = uri.split(['#', '?']).next().unwrap_or(uri);
        let mut parts = base.splitn(3, ':');
        let scheme = parts.next().unwrap_or_default();
        let method = parts.next().unwrap_or_default();
        let address = parts.next().unwrap_or_default();
        if scheme != "did" {
            return Err(IdentError::InvalidDid {
                uri: uri.to_string(),
                reason: format!("expected scheme \"did\", got {scheme:?}"),
            });
        }
        if method != DID_METHOD {
            return Err(IdentError::InvalidDid {
                uri: uri.to_string(),
                reason: format!("unknown method {method:?}"),
            });
        }
        Ok(Self {
            address: ChainAddress::parse(address)?,
        })
    }

    /// Construct from a chain address.
    pub fn from_address(address: ChainAddress) -> Self {
        Self { address }
    }

    /// The chain-canonical address embedded in this DID.
    pub fn address(&self) -> &ChainAddress {
        &self.address
    }

    /// Full URI text form.
    pub fn to_uri(&self) -> String {
        format!("did:{}:{}", DID_METHOD, self.address.as_str())
    }
}

impl fmt::Debug for DidUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DidUri({})", self.to_uri())
    }
}

impl fmt::Display for DidUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_uri())
    }
}

impl TryFrom<String> for DidUri {
    type Error = IdentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<DidUri> for String {
    fn from(did: DidUri) -> Self {
        did.to_uri()
    }
}

/// Maps decentralized identity URIs to their canonical on-chain form and
/// back.
///
/// Full DID resolution belongs to the ledger collaborator behind this
/// trait; the dispatch core only needs the address mapping.
pub trait IdentityCanonicalizer: Send + Sync {
    /// Canonical on-chain representation of a DID.
    fn to_chain(&self, did: &DidUri) -> Result<ChainAddress, IdentError>;

    /// DID URI form of an on-chain address.
    fn to_did(&self, address: &ChainAddress) -> DidUri;
}

/// Canonicalizer for `did:merit` URIs, where the address is embedded in
/// the URI itself.
#[derive(Clone, Copy, Debug, Default)]
pub struct PrefixCanonicalizer;

impl IdentityCanonicalizer for PrefixCanonicalizer {
    fn to_chain(&self, did: &DidUri) -> Result<ChainAddress, IdentError> {
        Ok(did.address().clone())
    }

    fn to_did(&self, address: &ChainAddress) -> DidUri {
        DidUri::from_address(address.clone())
    }
}
