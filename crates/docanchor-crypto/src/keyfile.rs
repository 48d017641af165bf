//! The paired key file: a plain-text bundle holding a private key and its
//! public key as two whitespace-separated base64 tokens, private first.
//!
//! The format has no header or checksum. Any content with exactly two tokens
//! parses, so a file with the tokens reversed is only caught when the keys
//! are decoded and matched against each other.

use std::fmt;

use docanchor_types::KeyPair;

use crate::error::{CryptoError, CryptoResult};

/// Key texts read from a paired key file.
#[derive(Clone, PartialEq, Eq)]
pub struct PairedKeyFile {
    pub private_key: String,
    pub public_key: String,
}

impl fmt::Debug for PairedKeyFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PairedKeyFile")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .finish()
    }
}

/// Split a paired key file into its private and public key texts.
pub fn parse_paired_key_file(bytes: &[u8]) -> CryptoResult<PairedKeyFile> {
    let content = std::str::from_utf8(bytes)
        .map_err(|_| CryptoError::MalformedKeyFile("content is not UTF-8 text".into()))?;
    let tokens: Vec<&str> = content.split_whitespace().collect();
    match tokens.as_slice() {
        [private_key, public_key] => Ok(PairedKeyFile {
            private_key: (*private_key).to_string(),
            public_key: (*public_key).to_string(),
        }),
        _ => Err(CryptoError::MalformedKeyFile(format!(
            "expected 2 whitespace-separated keys, found {}",
            tokens.len()
        ))),
    }
}

/// Render a keypair in paired key file form.
pub fn render_paired_key_file(pair: &KeyPair) -> String {
    format!("{} {}\n", pair.private_key.trim(), pair.public_key.trim())
}
