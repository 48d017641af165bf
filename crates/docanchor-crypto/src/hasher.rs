use std::fmt;

use sha2::Digest as _;

use crate::config::{HashAlgorithm, SchemeConfig};
use crate::encoding;
use crate::error::{CryptoError, CryptoResult};

/// A fixed-length content fingerprint.
#[derive(Clone, PartialEq, Eq)]
pub struct Digest {
    algorithm: HashAlgorithm,
    bytes: Vec<u8>,
}

impl Digest {
    /// Wrap raw digest bytes, checking the length against the algorithm.
    pub fn from_bytes(algorithm: HashAlgorithm, bytes: Vec<u8>) -> CryptoResult<Self> {
        if bytes.len() != algorithm.output_len() {
            return Err(CryptoError::InvalidDigestLength {
                expected: algorithm.output_len(),
                actual: bytes.len(),
            });
        }
        Ok(Self { algorithm, bytes })
    }

    /// Parse the base64 transport form.
    pub fn from_text(algorithm: HashAlgorithm, text: &str) -> CryptoResult<Self> {
        Self::from_bytes(algorithm, encoding::decode(text)?)
    }

    /// Base64 transport form.
    pub fn to_text(&self) -> String {
        encoding::encode(&self.bytes)
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Equality without an early exit on the first differing byte.
    pub fn ct_eq(&self, other: &Digest) -> bool {
        self.algorithm == other.algorithm && encoding::constant_time_eq(&self.bytes, &other.bytes)
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({}:{}...)", self.algorithm, hex::encode(&self.bytes[..4]))
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

/// Deterministic fingerprint of text content.
///
/// Hashes the UTF-8 bytes of the text exactly as extracted: no normalization,
/// no domain separation, so digests stay comparable with values anchored by
/// other tools using the same hash.
#[derive(Clone, Copy, Debug, Default)]
pub struct FingerprintEngine {
    algorithm: HashAlgorithm,
}

impl FingerprintEngine {
    pub fn new(config: &SchemeConfig) -> Self {
        Self {
            algorithm: config.hash,
        }
    }

    /// An engine for a hash named at runtime, e.g. from a config file.
    /// Fails with `HashingError` if the hash is not available.
    pub fn named(name: &str) -> CryptoResult<Self> {
        Ok(Self {
            algorithm: HashAlgorithm::from_name(name)?,
        })
    }

    pub fn algorithm(&self) -> HashAlgorithm {
        self.algorithm
    }

    /// Fingerprint text content.
    pub fn digest(&self, content: &str) -> Digest {
        self.digest_bytes(content.as_bytes())
    }

    pub fn digest_bytes(&self, data: &[u8]) -> Digest {
        let bytes = match self.algorithm {
            HashAlgorithm::Sha256 => sha2::Sha256::digest(data).to_vec(),
            HashAlgorithm::Sha512 => sha2::Sha512::digest(data).to_vec(),
            HashAlgorithm::Blake3 => blake3::hash(data).as_bytes().to_vec(),
        };
        Digest {
            algorithm: self.algorithm,
            bytes,
        }
    }

    /// Parse a digest in transport form for this engine's algorithm.
    pub fn parse(&self, text: &str) -> CryptoResult<Digest> {
        Digest::from_text(self.algorithm, text)
    }
}
