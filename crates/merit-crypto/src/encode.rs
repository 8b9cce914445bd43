/// Deterministic binary encoder for identifier derivation.
///
/// Fixed-width fields (32-byte hashes) are written as-is; variable-width
/// byte strings are prefixed with their u32 little-endian length. The
/// encoding carries no framing beyond that, so field order is part of
/// the contract: callers must write fields in a fixed order.
#[derive(Default)]
pub struct StructuralEncoder {
    buf: Vec<u8>,
}

impl StructuralEncoder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a fixed-width 32-byte hash.
    pub fn put_hash(&mut self, hash: &[u8; 32]) -> &mut Self {
        self.buf.extend_from_slice(hash);
        self
    }

    /// Append a length-prefixed byte string.
    pub fn put_bytes(&mut self, bytes: &[u8]) -> &mut Self {
        self.buf.extend_from_slice(&(bytes.len() as u32).to_le_bytes());
        self.buf.extend_from_slice(bytes);
        self
    }

    /// Append a length-prefixed UTF-8 string.
    pub fn put_str(&mut self, s: &str) -> &mut Self {
        self.put_bytes(s.as_bytes())
    }

    /// Number of bytes encoded so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the encoder and return the encoded bytes.
    pub fn finish(self) -> Vec<u8> {
        self.buf
    }
}
