use docanchor_extract::TextExtractor;
use docanchor_types::{
    AuthenticityRequest, AuthenticityVerdict, Document, DocumentFingerprintPayload, DocumentKind,
    KeyPair,
};

use crate::config::ServiceConfig;
use crate::error::ServiceResult;
use crate::evaluate::AuthenticityEvaluation;
use crate::prepare::{DocumentPreparation, KeyMaterial};

/// The docanchor entry point: key generation, document preparation and
/// authenticity evaluation under one configuration.
#[derive(Debug)]
pub struct DocAnchor {
    config: ServiceConfig,
    preparation: DocumentPreparation,
    evaluation: AuthenticityEvaluation,
}

impl DocAnchor {
    /// Build from configuration. Extractors named in the configuration are
    /// registered; others can be added with [`DocAnchor::register_extractor`].
    pub fn new(config: ServiceConfig) -> Self {
        let preparation = DocumentPreparation::new(config.scheme, config.build_registry());
        let evaluation = AuthenticityEvaluation::new(config.scheme);
        Self {
            config,
            preparation,
            evaluation,
        }
    }

    /// Register (or replace) the extraction backend for a document kind.
    pub fn register_extractor(
        &mut self,
        kind: DocumentKind,
        extractor: impl TextExtractor + 'static,
    ) -> &mut Self {
        self.preparation
            .extractors_mut()
            .register(kind, Box::new(extractor));
        self
    }

    pub fn config(&self) -> &ServiceConfig {
        &self.config
    }

    pub fn generate_key_pair(&self) -> ServiceResult<KeyPair> {
        self.preparation.generate_key_pair()
    }

    pub fn prepare_to_store(
        &self,
        document: &Document,
        keys: &KeyMaterial,
    ) -> ServiceResult<DocumentFingerprintPayload> {
        self.preparation.prepare_to_store(document, keys)
    }

    pub fn prepare_to_lookup(&self, document: &Document) -> ServiceResult<DocumentFingerprintPayload> {
        self.preparation.prepare_to_lookup(document)
    }

    pub fn evaluate(&self, request: &AuthenticityRequest) -> AuthenticityVerdict {
        self.evaluation.evaluate(request)
    }
}
