use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// MIME type of a PDF document.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// MIME type of an Office Open XML word-processing document.
pub const WORD_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// The document formats whose text content can be fingerprinted.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DocumentKind {
    Pdf,
    Word,
}

impl DocumentKind {
    /// Resolve a declared MIME type. Parameters such as `; charset=...` and
    /// letter case are ignored.
    pub fn from_content_type(content_type: &str) -> Result<Self, TypeError> {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        match essence.as_str() {
            PDF_CONTENT_TYPE => Ok(Self::Pdf),
            WORD_CONTENT_TYPE => Ok(Self::Word),
            _ => Err(TypeError::UnsupportedDocumentType(content_type.to_string())),
        }
    }

    /// The canonical MIME type for this kind.
    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Pdf => PDF_CONTENT_TYPE,
            Self::Word => WORD_CONTENT_TYPE,
        }
    }
}

impl FromStr for DocumentKind {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_content_type(s)
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pdf => write!(f, "PDF"),
            Self::Word => write!(f, "Word"),
        }
    }
}

/// A document handed in fully materialized, with the type its submitter
/// declared for it.
#[derive(Clone, PartialEq, Eq)]
pub struct Document {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl Document {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: impl Into<Vec<u8>>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes: bytes.into(),
        }
    }

    /// The declared kind, or `UnsupportedDocumentType`.
    pub fn kind(&self) -> Result<DocumentKind, TypeError> {
        DocumentKind::from_content_type(&self.content_type)
    }
}

impl fmt::Debug for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Document")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("len", &self.bytes.len())
            .finish()
    }
}
