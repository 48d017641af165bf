use thiserror::Error;

/// Errors produced by type operations.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum TypeError {
    #[error("unsupported document type: {0} (expected a PDF or Word document)")]
    UnsupportedDocumentType(String),
}
