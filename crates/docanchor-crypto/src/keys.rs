use std::fmt;

use docanchor_types::KeyPair;
use rand::rngs::OsRng;

use crate::config::SignatureScheme;
use crate::encoding;
use crate::error::{CryptoError, CryptoResult};

/// Decoded private key, ready for signing.
pub enum PrivateKeyHandle {
    EcdsaP256(p256::ecdsa::SigningKey),
    Ed25519(ed25519_dalek::SigningKey),
}

/// Decoded public key, ready for verification.
#[derive(Clone, PartialEq, Eq)]
pub enum PublicKeyHandle {
    EcdsaP256(p256::ecdsa::VerifyingKey),
    Ed25519(ed25519_dalek::VerifyingKey),
}

impl PrivateKeyHandle {
    pub fn scheme(&self) -> SignatureScheme {
        match self {
            Self::EcdsaP256(_) => SignatureScheme::EcdsaP256Sha256,
            Self::Ed25519(_) => SignatureScheme::Ed25519,
        }
    }

    /// The matching public key.
    pub fn public_key(&self) -> PublicKeyHandle {
        match self {
            Self::EcdsaP256(key) => PublicKeyHandle::EcdsaP256(*key.verifying_key()),
            Self::Ed25519(key) => PublicKeyHandle::Ed25519(key.verifying_key()),
        }
    }
}

impl PublicKeyHandle {
    pub fn scheme(&self) -> SignatureScheme {
        match self {
            Self::EcdsaP256(_) => SignatureScheme::EcdsaP256Sha256,
            Self::Ed25519(_) => SignatureScheme::Ed25519,
        }
    }

    fn fingerprint_bytes(&self) -> Vec<u8> {
        match self {
            Self::EcdsaP256(key) => key.to_encoded_point(true).as_bytes().to_vec(),
            Self::Ed25519(key) => key.to_bytes().to_vec(),
        }
    }
}

impl fmt::Debug for PrivateKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PrivateKeyHandle({}, <redacted>)", self.scheme())
    }
}

impl fmt::Debug for PublicKeyHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "PublicKeyHandle({}, {}...)",
            self.scheme(),
            hex::encode(&self.fingerprint_bytes()[..8])
        )
    }
}

/// Converts key material between its base64 DER transport form and signing
/// handles for the configured scheme.
///
/// Private keys travel as PKCS#8, public keys as SubjectPublicKeyInfo, which
/// is what JCA-style `getEncoded()` produces for EC keys.
#[derive(Clone, Copy, Debug, Default)]
pub struct KeyCodec {
    scheme: SignatureScheme,
}

impl KeyCodec {
    pub fn new(scheme: SignatureScheme) -> Self {
        Self { scheme }
    }

    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// Generate a fresh keypair from the OS random source.
    pub fn generate_key_pair(&self) -> CryptoResult<KeyPair> {
        let private = match self.scheme {
            SignatureScheme::EcdsaP256Sha256 => {
                PrivateKeyHandle::EcdsaP256(p256::ecdsa::SigningKey::random(&mut OsRng))
            }
            SignatureScheme::Ed25519 => {
                PrivateKeyHandle::Ed25519(ed25519_dalek::SigningKey::generate(&mut OsRng))
            }
        };
        let public = private.public_key();
        self.encode_key_pair(&private, &public)
    }

    /// Render a private/public pair in transport form.
    pub fn encode_key_pair(
        &self,
        private: &PrivateKeyHandle,
        public: &PublicKeyHandle,
    ) -> CryptoResult<KeyPair> {
        if private.scheme() != self.scheme || public.scheme() != self.scheme {
            return Err(CryptoError::InvalidKeyMaterial(format!(
                "keys do not belong to the configured {} scheme",
                self.scheme
            )));
        }
        Ok(KeyPair {
            private_key: self.encode_private_key(private)?,
            public_key: self.encode_public_key(public)?,
            key_algorithm: self.scheme.key_algorithm().to_string(),
            curve: self.scheme.curve().to_string(),
        })
    }

    pub fn encode_private_key(&self, key: &PrivateKeyHandle) -> CryptoResult<String> {
        match key {
            PrivateKeyHandle::EcdsaP256(key) => {
                use p256::pkcs8::EncodePrivateKey;
                let secret = p256::SecretKey::from_bytes(&key.to_bytes())
                    .map_err(|e| CryptoError::InvalidKeyMaterial(e.to_string()))?;
                let der = secret
                    .to_pkcs8_der()
                    .map_err(|e| CryptoError::InvalidKeyMaterial(e.to_string()))?;
                Ok(encoding::encode(der.as_bytes()))
            }
            PrivateKeyHandle::Ed25519(key) => {
                use ed25519_dalek::pkcs8::EncodePrivateKey;
                let der = key
                    .to_pkcs8_der()
                    .map_err(|e| CryptoError::InvalidKeyMaterial(e.to_string()))?;
                Ok(encoding::encode(der.as_bytes()))
            }
        }
    }

    pub fn encode_public_key(&self, key: &PublicKeyHandle) -> CryptoResult<String> {
        match key {
            PublicKeyHandle::EcdsaP256(key) => {
                use p256::pkcs8::EncodePublicKey;
                let der = p256::PublicKey::from(key)
                    .to_public_key_der()
                    .map_err(|e| CryptoError::InvalidKeyMaterial(e.to_string()))?;
                Ok(encoding::encode(der.as_bytes()))
            }
            PublicKeyHandle::Ed25519(key) => {
                use ed25519_dalek::pkcs8::EncodePublicKey;
                let der = key
                    .to_public_key_der()
                    .map_err(|e| CryptoError::InvalidKeyMaterial(e.to_string()))?;
                Ok(encoding::encode(der.as_bytes()))
            }
        }
    }

    /// Parse a base64 PKCS#8 private key. Surrounding whitespace is ignored.
    pub fn decode_private_key(&self, text: &str) -> CryptoResult<PrivateKeyHandle> {
        let der = encoding::decode(text)
            .map_err(|e| CryptoError::InvalidKeyMaterial(format!("private key: {e}")))?;
        match self.scheme {
            SignatureScheme::EcdsaP256Sha256 => {
                use p256::pkcs8::DecodePrivateKey;
                let secret = p256::SecretKey::from_pkcs8_der(&der).map_err(|e| {
                    CryptoError::InvalidKeyMaterial(format!("not a P-256 private key: {e}"))
                })?;
                Ok(PrivateKeyHandle::EcdsaP256(secret.into()))
            }
            SignatureScheme::Ed25519 => {
                use ed25519_dalek::pkcs8::DecodePrivateKey;
                let key = ed25519_dalek::SigningKey::from_pkcs8_der(&der).map_err(|e| {
                    CryptoError::InvalidKeyMaterial(format!("not an Ed25519 private key: {e}"))
                })?;
                Ok(PrivateKeyHandle::Ed25519(key))
            }
        }
    }

    /// Parse a base64 SubjectPublicKeyInfo public key. Surrounding whitespace
    /// is ignored.
    pub fn decode_public_key(&self, text: &str) -> CryptoResult<PublicKeyHandle> {
        let der = encoding::decode(text)
            .map_err(|e| CryptoError::InvalidKeyMaterial(format!("public key: {e}")))?;
        match self.scheme {
            SignatureScheme::EcdsaP256Sha256 => {
                use p256::pkcs8::DecodePublicKey;
                let key = p256::PublicKey::from_public_key_der(&der).map_err(|e| {
                    CryptoError::InvalidKeyMaterial(format!("not a P-256 public key: {e}"))
                })?;
                Ok(PublicKeyHandle::EcdsaP256(key.into()))
            }
            SignatureScheme::Ed25519 => {
                use ed25519_dalek::pkcs8::DecodePublicKey;
                let key = ed25519_dalek::VerifyingKey::from_public_key_der(&der).map_err(|e| {
                    CryptoError::InvalidKeyMaterial(format!("not an Ed25519 public key: {e}"))
                })?;
                Ok(PublicKeyHandle::Ed25519(key))
            }
        }
    }
}
