use std::fmt;

use docanchor_crypto::{
    encoding, parse_paired_key_file, CryptoError, FingerprintEngine, KeyCodec, PrivateKeyHandle,
    SchemeConfig, Signer,
};
use docanchor_extract::ExtractorRegistry;
use docanchor_types::{Document, DocumentFingerprintPayload, KeyPair};
use tracing::{debug, info};

use crate::error::{ServiceError, ServiceResult};

/// Signing keys as a submitter provides them: a paired key file, or the two
/// key texts. When both are given the key file wins.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct KeyMaterial {
    pub key_file: Option<Vec<u8>>,
    pub private_key: Option<String>,
    pub public_key: Option<String>,
}

impl KeyMaterial {
    pub fn from_texts(private_key: impl Into<String>, public_key: impl Into<String>) -> Self {
        Self {
            key_file: None,
            private_key: Some(private_key.into()),
            public_key: Some(public_key.into()),
        }
    }

    pub fn from_key_file(bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            key_file: Some(bytes.into()),
            ..Default::default()
        }
    }

    /// The trimmed (private, public) key texts.
    pub fn resolve(&self) -> ServiceResult<(String, String)> {
        if let Some(bytes) = &self.key_file {
            let file = parse_paired_key_file(bytes)?;
            return Ok((file.private_key, file.public_key));
        }
        let private = non_blank(self.private_key.as_deref());
        let public = non_blank(self.public_key.as_deref());
        match (private, public) {
            (Some(private), Some(public)) => Ok((private.to_string(), public.to_string())),
            _ => Err(ServiceError::MissingKeyMaterial(
                "provide both keys or a paired key file".into(),
            )),
        }
    }
}

impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyMaterial")
            .field("key_file", &self.key_file.as_ref().map(|b| b.len()))
            .field("private_key", &self.private_key.as_ref().map(|_| "<redacted>"))
            .field("public_key", &self.public_key)
            .finish()
    }
}

fn non_blank(text: Option<&str>) -> Option<&str> {
    text.map(str::trim).filter(|t| !t.is_empty())
}

/// Builds the payloads handed to the ledger: extract text, fingerprint it,
/// and for anchoring, sign the fingerprint.
pub struct DocumentPreparation {
    scheme: SchemeConfig,
    engine: FingerprintEngine,
    codec: KeyCodec,
    signer: Signer,
    extractors: ExtractorRegistry,
}

impl DocumentPreparation {
    pub fn new(scheme: SchemeConfig, extractors: ExtractorRegistry) -> Self {
        Self {
            scheme,
            engine: FingerprintEngine::new(&scheme),
            codec: KeyCodec::new(scheme.signature),
            signer: Signer::new(&scheme),
            extractors,
        }
    }

    pub fn scheme(&self) -> &SchemeConfig {
        &self.scheme
    }

    pub fn extractors(&self) -> &ExtractorRegistry {
        &self.extractors
    }

    pub fn extractors_mut(&mut self) -> &mut ExtractorRegistry {
        &mut self.extractors
    }

    /// Generate a signing keypair for the configured scheme.
    pub fn generate_key_pair(&self) -> ServiceResult<KeyPair> {
        info!(scheme = %self.scheme.signature, "generating key pair");
        Ok(self.codec.generate_key_pair()?)
    }

    /// Fingerprint and sign a document for anchoring.
    pub fn prepare_to_store(
        &self,
        document: &Document,
        keys: &KeyMaterial,
    ) -> ServiceResult<DocumentFingerprintPayload> {
        info!(file = %document.file_name, "preparing document for anchoring");
        let (private_text, public_text) = keys.resolve()?;
        let private = self.decode_signing_key(&private_text, &public_text)?;

        let (kind, content) = self.extractors.extract(document)?;
        let digest = self.engine.digest(&content);
        let signature = self.signer.sign(digest.as_bytes(), &private)?;
        debug!(file = %document.file_name, %kind, digest = %digest, "document signed");

        Ok(DocumentFingerprintPayload::for_store(
            document.file_name.clone(),
            digest.to_text(),
            encoding::encode(&signature),
            public_text,
        ))
    }

    /// Fingerprint a document for looking up its anchored values.
    pub fn prepare_to_lookup(&self, document: &Document) -> ServiceResult<DocumentFingerprintPayload> {
        info!(file = %document.file_name, "preparing document for lookup");
        let (kind, content) = self.extractors.extract(document)?;
        let digest = self.engine.digest(&content);
        debug!(file = %document.file_name, %kind, digest = %digest, "document fingerprinted");
        Ok(DocumentFingerprintPayload::for_lookup(
            document.file_name.clone(),
            digest.to_text(),
        ))
    }

    /// Decode the private key and check that the public key belongs to it,
    /// so a swapped or mismatched pair fails here with a clear message
    /// rather than producing signatures that never verify.
    fn decode_signing_key(
        &self,
        private_text: &str,
        public_text: &str,
    ) -> ServiceResult<PrivateKeyHandle> {
        let private = match self.codec.decode_private_key(private_text) {
            Ok(key) => key,
            Err(err) => {
                if self.codec.decode_private_key(public_text).is_ok() {
                    return Err(CryptoError::InvalidKeyMaterial(
                        "the keys appear swapped: the private key must come first".into(),
                    )
                    .into());
                }
                return Err(err.into());
            }
        };
        let public = self.codec.decode_public_key(public_text)?;
        if private.public_key() != public {
            return Err(CryptoError::InvalidKeyMaterial(
                "the public key does not belong to the private key".into(),
            )
            .into());
        }
        Ok(private)
    }
}

impl fmt::Debug for DocumentPreparation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DocumentPreparation")
            .field("scheme", &self.scheme)
            .field("extractors", &self.extractors)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use docanchor_crypto::{render_paired_key_file, SignatureScheme, Verifier};
    use docanchor_extract::{ExtractError, ExtractResult};
    use docanchor_types::DocumentKind;

    use super::*;

    fn utf8(bytes: &[u8]) -> ExtractResult<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| ExtractError::ExtractionFailure(e.to_string()))
    }

    fn service() -> DocumentPreparation {
        let registry = ExtractorRegistry::new()
            .with(DocumentKind::Pdf, utf8)
            .with(DocumentKind::Word, utf8);
        DocumentPreparation::new(SchemeConfig::default(), registry)
    }

    fn pdf(text: &str) -> Document {
        Document::new("decision.pdf", "application/pdf", text.as_bytes().to_vec())
    }

    #[test]
    fn store_payload_verifies() {
        let svc = service();
        let pair = svc.generate_key_pair().unwrap();
        let payload = svc
            .prepare_to_store(&pdf("Decision No. 42"), &KeyMaterial::from_texts(&pair.private_key, &pair.public_key))
            .unwrap();

        assert_eq!(payload.file_name, "decision.pdf");
        assert_eq!(payload.public_key.as_deref(), Some(pair.public_key.as_str()));
        assert_eq!(payload.timestamp, None);

        let codec = KeyCodec::new(SignatureScheme::EcdsaP256Sha256);
        let public = codec.decode_public_key(&pair.public_key).unwrap();
        let digest = encoding::decode(&payload.digest).unwrap();
        let signature = encoding::decode(payload.signature.as_deref().unwrap()).unwrap();
        let ok = Verifier::new(svc.scheme()).verify(&digest, &signature, &public).unwrap();
        assert!(ok);
    }

    #[test]
    fn store_and_lookup_digests_agree() {
        let svc = service();
        let pair = svc.generate_key_pair().unwrap();
        let keys = KeyMaterial::from_texts(&pair.private_key, &pair.public_key);
        let stored = svc.prepare_to_store(&pdf("same text"), &keys).unwrap();
        let lookup = svc.prepare_to_lookup(&pdf("same text")).unwrap();
        assert_eq!(stored.digest, lookup.digest);
        assert!(!lookup.is_signed());
    }

    #[test]
    fn key_texts_are_trimmed() {
        let svc = service();
        let pair = svc.generate_key_pair().unwrap();
        let keys = KeyMaterial::from_texts(
            format!("  {}\n", pair.private_key),
            format!("\t{} ", pair.public_key),
        );
        let payload = svc.prepare_to_store(&pdf("x"), &keys).unwrap();
        assert_eq!(payload.public_key.unwrap(), pair.public_key);
    }

    #[test]
    fn paired_key_file_is_accepted() {
        let svc = service();
        let pair = svc.generate_key_pair().unwrap();
        let keys = KeyMaterial::from_key_file(render_paired_key_file(&pair).into_bytes());
        let payload = svc.prepare_to_store(&pdf("x"), &keys).unwrap();
        assert!(payload.is_signed());
    }

    #[test]
    fn key_file_wins_over_texts() {
        let svc = service();
        let pair = svc.generate_key_pair().unwrap();
        let keys = KeyMaterial {
            key_file: Some(render_paired_key_file(&pair).into_bytes()),
            private_key: Some("ignored".into()),
            public_key: Some("ignored".into()),
        };
        assert!(svc.prepare_to_store(&pdf("x"), &keys).is_ok());
    }

    #[test]
    fn missing_keys() {
        let svc = service();
        let err = svc.prepare_to_store(&pdf("x"), &KeyMaterial::default()).unwrap_err();
        assert!(matches!(err, ServiceError::MissingKeyMaterial(_)));

        let half = KeyMaterial {
            private_key: Some("abc".into()),
            public_key: Some("   ".into()),
            ..Default::default()
        };
        assert!(matches!(
            svc.prepare_to_store(&pdf("x"), &half),
            Err(ServiceError::MissingKeyMaterial(_))
        ));
    }

    #[test]
    fn malformed_key_file() {
        let svc = service();
        let err = svc
            .prepare_to_store(&pdf("x"), &KeyMaterial::from_key_file(b"onlyonetoken".to_vec()))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Crypto(CryptoError::MalformedKeyFile(_))));
    }

    #[test]
    fn swapped_keys_are_diagnosed() {
        let svc = service();
        let pair = svc.generate_key_pair().unwrap();
        let swapped = format!("{} {}", pair.public_key, pair.private_key);
        let err = svc
            .prepare_to_store(&pdf("x"), &KeyMaterial::from_key_file(swapped.into_bytes()))
            .unwrap_err();
        assert!(err.to_string().contains("swapped"));
    }

    #[test]
    fn mismatched_public_key_is_rejected() {
        let svc = service();
        let a = svc.generate_key_pair().unwrap();
        let b = svc.generate_key_pair().unwrap();
        let err = svc
            .prepare_to_store(&pdf("x"), &KeyMaterial::from_texts(&a.private_key, &b.public_key))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Crypto(CryptoError::InvalidKeyMaterial(ref m)) if m.contains("does not belong")));
    }

    #[test]
    fn invalid_private_key() {
        let svc = service();
        let pair = svc.generate_key_pair().unwrap();
        let err = svc
            .prepare_to_store(&pdf("x"), &KeyMaterial::from_texts("bm90IGEga2V5", &pair.public_key))
            .unwrap_err();
        assert!(matches!(err, ServiceError::Crypto(CryptoError::InvalidKeyMaterial(_))));
    }

    #[test]
    fn unsupported_type_extracts_nothing() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let registry = ExtractorRegistry::new().with(DocumentKind::Pdf, move |b: &[u8]| {
            counter.fetch_add(1, Ordering::SeqCst);
            utf8(b)
        });
        let svc = DocumentPreparation::new(SchemeConfig::default(), registry);
        let pair = svc.generate_key_pair().unwrap();
        let png = Document::new("scan.png", "image/png", vec![0x89, 0x50, 0x4e, 0x47]);

        let err = svc
            .prepare_to_store(&png, &KeyMaterial::from_texts(&pair.private_key, &pair.public_key))
            .unwrap_err();
        assert!(matches!(err, ServiceError::UnsupportedDocumentType(ref t) if t == "image/png"));
        assert!(matches!(
            svc.prepare_to_lookup(&png),
            Err(ServiceError::UnsupportedDocumentType(_))
        ));
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn lookup_needs_no_keys() {
        let payload = service().prepare_to_lookup(&pdf("hello")).unwrap();
        assert_eq!(payload.digest, "LPJNul+wow4m6DsqxbninhsWHlwfp0JecwQzYpOLmCQ=");
        assert_eq!(payload.signature, None);
        assert_eq!(payload.public_key, None);
    }

    #[test]
    fn extraction_failure_aborts() {
        let registry = ExtractorRegistry::new().with(DocumentKind::Pdf, |_: &[u8]| -> ExtractResult<String> {
            Err(ExtractError::ExtractionFailure("encrypted PDF".into()))
        });
        let svc = DocumentPreparation::new(SchemeConfig::default(), registry);
        assert!(matches!(
            svc.prepare_to_lookup(&pdf("x")),
            Err(ServiceError::Extraction(_))
        ));
    }

    #[test]
    fn ed25519_deployment() {
        let scheme = SchemeConfig::new(Default::default(), SignatureScheme::Ed25519);
        let svc = DocumentPreparation::new(scheme, ExtractorRegistry::new().with(DocumentKind::Word, utf8));
        let pair = svc.generate_key_pair().unwrap();
        assert_eq!(pair.curve, "Ed25519");
        let doc = Document::new("d.docx", DocumentKind::Word.content_type(), b"arrete".to_vec());
        let payload = svc
            .prepare_to_store(&doc, &KeyMaterial::from_texts(&pair.private_key, &pair.public_key))
            .unwrap();
        assert_eq!(encoding::decode(&payload.signature.unwrap()).unwrap().len(), 64);
    }

    #[test]
    fn key_material_debug_redacts() {
        let keys = KeyMaterial::from_texts("secret-private", "public");
        let debug = format!("{keys:?}");
        assert!(!debug.contains("secret-private"));
        assert!(debug.contains("public"));
    }
}
