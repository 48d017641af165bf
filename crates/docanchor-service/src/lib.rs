//! Document preparation and authenticity evaluation for docanchor.
//!
//! [`DocumentPreparation`] turns a document (and, for anchoring, signing
//! keys) into the payload handed to the ledger. [`AuthenticityEvaluation`]
//! compares a freshly computed digest and the anchored signature against the
//! anchored values. [`DocAnchor`] bundles both behind one configuration.
//!
//! # Quick Start
//!
//! ```rust
//! use docanchor_service::{DocAnchor, KeyMaterial, ServiceConfig};
//! use docanchor_types::{AuthenticityRequest, Document, DocumentKind};
//! use docanchor_extract::ExtractResult;
//!
//! let mut anchor = DocAnchor::new(ServiceConfig::default());
//! anchor.register_extractor(DocumentKind::Pdf, |bytes: &[u8]| -> ExtractResult<String> {
//!     Ok(String::from_utf8_lossy(bytes).into_owned())
//! });
//!
//! let keys = anchor.generate_key_pair().unwrap();
//! let doc = Document::new("decision.pdf", "application/pdf", b"Decision No. 42".to_vec());
//! let stored = anchor
//!     .prepare_to_store(&doc, &KeyMaterial::from_texts(&keys.private_key, &keys.public_key))
//!     .unwrap();
//!
//! let lookup = anchor.prepare_to_lookup(&doc).unwrap();
//! let verdict = anchor.evaluate(&AuthenticityRequest {
//!     file_name: doc.file_name.clone(),
//!     new_digest: lookup.digest,
//!     stored_digest: stored.digest,
//!     stored_signature: stored.signature.unwrap(),
//!     stored_public_key: stored.public_key.unwrap(),
//!     anchored_at: None,
//! });
//! assert!(verdict.integrated && verdict.authenticated);
//! ```

pub mod config;
pub mod error;
pub mod evaluate;
pub mod prepare;
pub mod service;

pub use config::{ExtractorConfig, ServiceConfig};
pub use error::{ServiceError, ServiceResult};
pub use evaluate::AuthenticityEvaluation;
pub use prepare::{DocumentPreparation, KeyMaterial};
pub use service::DocAnchor;

// Re-export key types
pub use docanchor_crypto::{HashAlgorithm, SchemeConfig, SignatureScheme};
pub use docanchor_types::{
    AuthenticityRequest, AuthenticityVerdict, Document, DocumentFingerprintPayload, DocumentKind,
    KeyPair,
};
