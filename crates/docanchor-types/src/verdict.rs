use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Previously anchored values together with a freshly computed digest.
///
/// All cryptographic fields are base64 text; surrounding whitespace is
/// tolerated. Bodies using the ledger front end's field names
/// (`newHashEncoded`, `hashEncodedStored`, ...) are accepted as well.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticityRequest {
    pub file_name: String,
    /// Digest recomputed from the presented document.
    #[serde(alias = "newHashEncoded")]
    pub new_digest: String,
    /// Digest retrieved from the ledger.
    #[serde(alias = "hashEncodedStored")]
    pub stored_digest: String,
    /// Signature retrieved from the ledger.
    #[serde(alias = "signedHashEncodedStored")]
    pub stored_signature: String,
    /// Signer public key retrieved from the ledger.
    #[serde(alias = "publicKeyStored")]
    pub stored_public_key: String,
    /// Ledger timestamp of the anchoring transaction, if known.
    #[serde(default, alias = "horodatage", skip_serializing_if = "Option::is_none")]
    pub anchored_at: Option<u64>,
}

/// Outcome of an authenticity evaluation.
///
/// `integrated` and `authenticated` are decided independently: a tampered
/// document still reports whether the anchored signature is genuine.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthenticityVerdict {
    /// The recomputed digest equals the anchored one.
    pub integrated: bool,
    /// The anchored signature verifies over the anchored digest.
    pub authenticated: bool,
    pub file_name: String,
    #[serde(alias = "typeKey")]
    pub key_algorithm: String,
    #[serde(alias = "ellipticCurve")]
    pub curve: String,
    #[serde(alias = "newHashEncoded")]
    pub new_digest: String,
    #[serde(alias = "hashEncodedStored")]
    pub stored_digest: String,
    #[serde(alias = "signedHashEncodedStored")]
    pub stored_signature: String,
    #[serde(alias = "publicKeyStored")]
    pub stored_public_key: String,
    #[serde(default, alias = "horodatage", skip_serializing_if = "Option::is_none")]
    pub anchored_at: Option<u64>,
    pub evaluated_at: DateTime<Utc>,
    /// Non-fatal failures that forced a boolean to `false`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub notes: Vec<String>,
}

impl AuthenticityVerdict {
    /// A verdict echoing the request's (trimmed) fields, with both checks
    /// still failed.
    pub fn pending(
        request: &AuthenticityRequest,
        key_algorithm: impl Into<String>,
        curve: impl Into<String>,
    ) -> Self {
        Self {
            integrated: false,
            authenticated: false,
            file_name: request.file_name.clone(),
            key_algorithm: key_algorithm.into(),
            curve: curve.into(),
            new_digest: request.new_digest.trim().to_string(),
            stored_digest: request.stored_digest.trim().to_string(),
            stored_signature: request.stored_signature.trim().to_string(),
            stored_public_key: request.stored_public_key.trim().to_string(),
            anchored_at: request.anchored_at,
            evaluated_at: Utc::now(),
            notes: Vec::new(),
        }
    }

    /// Both integrity and authenticity hold.
    pub fn is_valid(&self) -> bool {
        self.integrated && self.authenticated
    }

    /// Record a non-fatal failure.
    pub fn note(&mut self, message: impl Into<String>) {
        self.notes.push(message.into());
    }
}
