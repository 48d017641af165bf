use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::CryptoError;

/// Hash function used to fingerprint document content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HashAlgorithm {
    #[default]
    Sha256,
    Sha512,
    Blake3,
}

impl HashAlgorithm {
    /// Resolve a hash by name, e.g. `"SHA-256"`. Case and dashes are ignored.
    pub fn from_name(name: &str) -> Result<Self, CryptoError> {
        match normalize(name).as_str() {
            "sha256" => Ok(Self::Sha256),
            "sha512" => Ok(Self::Sha512),
            "blake3" => Ok(Self::Blake3),
            _ => Err(CryptoError::HashingError(format!(
                "hash algorithm '{name}' is not available"
            ))),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Sha256 => "SHA-256",
            Self::Sha512 => "SHA-512",
            Self::Blake3 => "BLAKE3",
        }
    }

    /// Digest size in bytes.
    pub fn output_len(&self) -> usize {
        match self {
            Self::Sha256 | Self::Blake3 => 32,
            Self::Sha512 => 64,
        }
    }
}

impl fmt::Display for HashAlgorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for HashAlgorithm {
    type Error = CryptoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value)
    }
}

impl From<HashAlgorithm> for String {
    fn from(value: HashAlgorithm) -> Self {
        value.name().to_string()
    }
}

/// Asymmetric signature scheme, together with its key algorithm and curve.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SignatureScheme {
    /// ECDSA over NIST P-256 with SHA-256 (`SHA256withECDSA`), DER signatures.
    #[default]
    EcdsaP256Sha256,
    /// Ed25519 over the digest bytes, 64-byte signatures.
    Ed25519,
}

impl SignatureScheme {
    pub fn from_name(name: &str) -> Result<Self, CryptoError> {
        match normalize(name).as_str() {
            "sha256withecdsa" | "ecdsap256" | "es256" => Ok(Self::EcdsaP256Sha256),
            "ed25519" | "eddsa" => Ok(Self::Ed25519),
            _ => Err(CryptoError::UnsupportedScheme(name.to_string())),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::EcdsaP256Sha256 => "SHA256withECDSA",
            Self::Ed25519 => "Ed25519",
        }
    }

    /// Key algorithm name reported alongside generated keys and verdicts.
    pub fn key_algorithm(&self) -> &'static str {
        match self {
            Self::EcdsaP256Sha256 => "EC",
            Self::Ed25519 => "EdDSA",
        }
    }

    /// Named curve reported alongside generated keys and verdicts.
    pub fn curve(&self) -> &'static str {
        match self {
            Self::EcdsaP256Sha256 => "secp256r1",
            Self::Ed25519 => "Ed25519",
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl TryFrom<String> for SignatureScheme {
    type Error = CryptoError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::from_name(&value)
    }
}

impl From<SignatureScheme> for String {
    fn from(value: SignatureScheme) -> Self {
        value.name().to_string()
    }
}

/// The algorithms a deployment uses. Fixed for the life of the process and
/// shared by the fingerprint engine, key codec, signer and verifier.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchemeConfig {
    pub hash: HashAlgorithm,
    pub signature: SignatureScheme,
}

impl SchemeConfig {
    pub fn new(hash: HashAlgorithm, signature: SignatureScheme) -> Self {
        Self { hash, signature }
    }

    pub fn key_algorithm(&self) -> &'static str {
        self.signature.key_algorithm()
    }

    pub fn curve(&self) -> &'static str {
        self.signature.curve()
    }
}

fn normalize(name: &str) -> String {
    name.trim()
        .chars()
        .filter(|c| *c != '-' && *c != '_')
        .collect::<String>()
        .to_ascii_lowercase()
}
