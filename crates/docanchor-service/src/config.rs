use std::path::Path;

use docanchor_crypto::SchemeConfig;
use docanchor_extract::{CommandExtractor, ExtractorRegistry};
use docanchor_types::DocumentKind;
use serde::{Deserialize, Serialize};

use crate::error::{ServiceError, ServiceResult};

/// Deployment configuration: the signature scheme and the extraction
/// backends.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceConfig {
    pub scheme: SchemeConfig,
    pub extractors: ExtractorConfig,
}

/// External programs used to extract text, per document kind.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractorConfig {
    pub pdf: Option<CommandExtractor>,
    pub word: Option<CommandExtractor>,
}

impl ServiceConfig {
    pub fn from_toml_str(text: &str) -> ServiceResult<Self> {
        toml::from_str(text).map_err(|e| ServiceError::Config(e.to_string()))
    }

    /// Load a TOML configuration file.
    pub fn load(path: &Path) -> ServiceResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|e| ServiceError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    /// A registry holding the configured command extractors.
    pub fn build_registry(&self) -> ExtractorRegistry {
        let mut registry = ExtractorRegistry::new();
        if let Some(cmd) = &self.extractors.pdf {
            registry.register(DocumentKind::Pdf, Box::new(cmd.clone()));
        }
        if let Some(cmd) = &self.extractors.word {
            registry.register(DocumentKind::Word, Box::new(cmd.clone()));
        }
        registry
    }
}
