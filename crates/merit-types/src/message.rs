use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::IdentError;

/// Message identifier correlating a record across the relay protocol.
///
/// Text form is `msg-<uuid>`. Generated ids use UUID v7 so that ids sort
/// by creation time; caller-supplied ids only need to be valid UUIDs.
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MessageId(String);

impl MessageId {
    pub const PREFIX: &'static str = "msg-";

    /// Generate a fresh time-ordered message id.
    pub fn generate() -> Self {
        Self(format!("{}{}", Self::PREFIX, uuid::Uuid::now_v7()))
    }

    /// Parse and validate a message id.
    pub fn parse(s: &str) -> Result<Self, IdentError> {
        let rest = s
            .strip_prefix(Self::PREFIX)
            .ok_or_else(|| IdentError::InvalidMessageId {
                id: s.to_string(),
                reason: format!("missing {:?} prefix", Self::PREFIX),
            })?;
        uuid::Uuid::parse_str(rest).map_err(|e| IdentError::InvalidMessageId {
            id: s.to_string(),
            reason: e.to_string(),
        })?;
        Ok(Self(s.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MessageId({})", self.0)
    }
}

impl fmt::Display for MessageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for MessageId {
    type Error = IdentError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<MessageId> for String {
    fn from(id: MessageId) -> Self {
        id.0
    }
}
