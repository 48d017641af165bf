use crate::config::{SchemeConfig, SignatureScheme};
use crate::error::{CryptoError, CryptoResult};
use crate::keys::{PrivateKeyHandle, PublicKeyHandle};

/// Signs digests with the configured scheme.
///
/// The digest bytes are the signed message. Under `SHA256withECDSA` the
/// scheme hashes them once more before signing, the same as a JCA
/// `Signature` fed the digest, so signatures interoperate with values
/// anchored by such signers.
#[derive(Clone, Copy, Debug, Default)]
pub struct Signer {
    scheme: SignatureScheme,
}

impl Signer {
    pub fn new(config: &SchemeConfig) -> Self {
        Self {
            scheme: config.signature,
        }
    }

    /// Sign `digest`, returning the encoded signature (DER for ECDSA, 64 raw
    /// bytes for Ed25519).
    pub fn sign(&self, digest: &[u8], key: &PrivateKeyHandle) -> CryptoResult<Vec<u8>> {
        match (self.scheme, key) {
            (SignatureScheme::EcdsaP256Sha256, PrivateKeyHandle::EcdsaP256(key)) => {
                use p256::ecdsa::signature::Signer as _;
                let signature: p256::ecdsa::Signature = key
                    .try_sign(digest)
                    .map_err(|e| CryptoError::SigningError(e.to_string()))?;
                Ok(signature.to_der().as_bytes().to_vec())
            }
            (SignatureScheme::Ed25519, PrivateKeyHandle::Ed25519(key)) => {
                use ed25519_dalek::Signer as _;
                let signature = key
                    .try_sign(digest)
                    .map_err(|e| CryptoError::SigningError(e.to_string()))?;
                Ok(signature.to_bytes().to_vec())
            }
            (scheme, key) => Err(CryptoError::SigningError(format!(
                "{} key cannot sign under {scheme}",
                key.scheme()
            ))),
        }
    }
}

/// Checks signatures over digests with the configured scheme.
#[derive(Clone, Copy, Debug, Default)]
pub struct Verifier {
    scheme: SignatureScheme,
}

impl Verifier {
    pub fn new(config: &SchemeConfig) -> Self {
        Self {
            scheme: config.signature,
        }
    }

    /// `Ok(false)` for a well-formed signature that does not match; an error
    /// only when the signature cannot be parsed or the key belongs to
    /// another scheme.
    pub fn verify(
        &self,
        digest: &[u8],
        signature: &[u8],
        key: &PublicKeyHandle,
    ) -> CryptoResult<bool> {
        match (self.scheme, key) {
            (SignatureScheme::EcdsaP256Sha256, PublicKeyHandle::EcdsaP256(key)) => {
                use p256::ecdsa::signature::Verifier as _;
                let signature = p256::ecdsa::Signature::from_der(signature)
                    .map_err(|e| CryptoError::InvalidSignatureEncoding(e.to_string()))?;
                Ok(key.verify(digest, &signature).is_ok())
            }
            (SignatureScheme::Ed25519, PublicKeyHandle::Ed25519(key)) => {
                use ed25519_dalek::Verifier as _;
                let signature = ed25519_dalek::Signature::from_slice(signature)
                    .map_err(|e| CryptoError::InvalidSignatureEncoding(e.to_string()))?;
                Ok(key.verify(digest, &signature).is_ok())
            }
            (scheme, key) => Err(CryptoError::InvalidKeyMaterial(format!(
                "{} key cannot verify under {scheme}",
                key.scheme()
            ))),
        }
    }
}
