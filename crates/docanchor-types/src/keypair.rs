use std::fmt;

use serde::{Deserialize, Serialize};

/// A freshly generated signing keypair in transport (base64 text) form.
///
/// The private key text is handed to the caller and never retained; `Debug`
/// output redacts it.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPair {
    /// Base64 of the PKCS#8 DER private key.
    pub private_key: String,
    /// Base64 of the SubjectPublicKeyInfo DER public key.
    pub public_key: String,
    /// Key algorithm name, e.g. `"EC"`.
    pub key_algorithm: String,
    /// Curve name, e.g. `"secp256r1"`.
    pub curve: String,
}

impl fmt::Debug for KeyPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyPair")
            .field("private_key", &"<redacted>")
            .field("public_key", &self.public_key)
            .field("key_algorithm", &self.key_algorithm)
            .field("curve", &self.curve)
            .finish()
    }
}
