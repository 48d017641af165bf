use thiserror::Error;

/// Errors from the cryptographic pipeline.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CryptoError {
    #[error("invalid key material: {0}")]
    InvalidKeyMaterial(String),

    #[error("malformed key file: {0}")]
    MalformedKeyFile(String),

    #[error("signing failed: {0}")]
    SigningError(String),

    #[error("invalid signature encoding: {0}")]
    InvalidSignatureEncoding(String),

    #[error("hashing unavailable: {0}")]
    HashingError(String),

    #[error("unsupported signature scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid base64 text: {0}")]
    InvalidEncoding(String),

    #[error("invalid digest length: expected {expected}, got {actual}")]
    InvalidDigestLength { expected: usize, actual: usize },
}

pub type CryptoResult<T> = Result<T, CryptoError>;
