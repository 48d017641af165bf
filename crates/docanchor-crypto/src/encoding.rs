//! Transport text form of binary values (keys, digests, signatures).

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use subtle::ConstantTimeEq;

use crate::error::{CryptoError, CryptoResult};

/// Encode bytes as padded standard base64.
pub fn encode(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode base64 text, ignoring leading and trailing whitespace.
pub fn decode(text: &str) -> CryptoResult<Vec<u8>> {
    STANDARD
        .decode(text.trim())
        .map_err(|e| CryptoError::InvalidEncoding(e.to_string()))
}

/// Compare two byte strings without an early exit on the first differing
/// byte. Lengths are not secret and are compared first.
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && bool::from(a.ct_eq(b))
}
