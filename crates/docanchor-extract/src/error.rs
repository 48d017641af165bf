use docanchor_types::TypeError;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ExtractError {
    #[error("unsupported document type: {0}")]
    UnsupportedDocumentType(String),

    #[error("text extraction failed: {0}")]
    ExtractionFailure(String),
}

impl From<TypeError> for ExtractError {
    fn from(err: TypeError) -> Self {
        match err {
            TypeError::UnsupportedDocumentType(t) => Self::UnsupportedDocumentType(t),
        }
    }
}

pub type ExtractResult<T> = Result<T, ExtractError>;
