use serde::{Deserialize, Serialize};

/// Values prepared for the ledger.
///
/// The store path fills `signature` and `public_key`; the lookup path only
/// carries the digest. `timestamp` is assigned by the ledger when the values
/// are anchored and is always `None` when produced here. The ledger's own
/// field names (`hashEncoded`, `signedHashEncoded`, `publicKeyEncoded`) are
/// accepted on input.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFingerprintPayload {
    pub file_name: String,
    /// Base64 digest of the document's text content.
    #[serde(alias = "hashEncoded")]
    pub digest: String,
    #[serde(default, alias = "signedHashEncoded", skip_serializing_if = "Option::is_none")]
    pub signature: Option<String>,
    #[serde(default, alias = "publicKeyEncoded", skip_serializing_if = "Option::is_none")]
    pub public_key: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<u64>,
}

impl DocumentFingerprintPayload {
    /// Payload for anchoring: digest, signature and the signer's public key.
    pub fn for_store(
        file_name: impl Into<String>,
        digest: impl Into<String>,
        signature: impl Into<String>,
        public_key: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            digest: digest.into(),
            signature: Some(signature.into()),
            public_key: Some(public_key.into()),
            timestamp: None,
        }
    }

    /// Payload for looking up anchored values by digest.
    pub fn for_lookup(file_name: impl Into<String>, digest: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            digest: digest.into(),
            signature: None,
            public_key: None,
            timestamp: None,
        }
    }

    /// Whether this payload carries signing material.
    pub fn is_signed(&self) -> bool {
        self.signature.is_some() && self.public_key.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lookup_payload_omits_key_material() {
        let p = DocumentFingerprintPayload::for_lookup("a.pdf", "ZGlnZXN0");
        assert!(!p.is_signed());
        let json = serde_json::to_value(&p).unwrap();
        assert_eq!(json["fileName"], "a.pdf");
        assert!(json.get("signature").is_none());
        assert!(json.get("publicKey").is_none());
        assert!(json.get("timestamp").is_none());
    }

    #[test]
    fn store_payload_is_signed() {
        let p = DocumentFingerprintPayload::for_store("a.pdf", "ZA==", "c2ln", "cGs=");
        assert!(p.is_signed());
        assert_eq!(p.timestamp, None);
    }

    #[test]
    fn accepts_ledger_timestamp_on_input() {
        let json = r#"{"fileName":"a.pdf","digest":"ZA==","signature":"c2ln","publicKey":"cGs=","timestamp":1718000000}"#;
        let p: DocumentFingerprintPayload = serde_json::from_str(json).unwrap();
        assert_eq!(p.timestamp, Some(1_718_000_000));
        assert!(p.is_signed());
    }

    #[test]
    fn accepts_ledger_field_names() {
        let json = r#"{"fileName":"a.pdf","hashEncoded":"ZA==","signedHashEncoded":"c2ln","publicKeyEncoded":"cGs=","timestamp":1718000000}"#;
        let p: DocumentFingerprintPayload = serde_json::from_str(json).unwrap();
        assert_eq!(p.digest, "ZA==");
        assert_eq!(p.signature.as_deref(), Some("c2ln"));
        assert_eq!(p.public_key.as_deref(), Some("cGs="));
        assert_eq!(p.timestamp, Some(1_718_000_000));
    }
}
