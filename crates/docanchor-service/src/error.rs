use docanchor_crypto::CryptoError;
use docanchor_extract::ExtractError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("missing key material: {0}")]
    MissingKeyMaterial(String),

    #[error("unsupported document type: {0} (expected a PDF or Word document)")]
    UnsupportedDocumentType(String),

    #[error("text extraction failed: {0}")]
    Extraction(String),

    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("configuration error: {0}")]
    Config(String),
}

impl From<ExtractError> for ServiceError {
    fn from(err: ExtractError) -> Self {
        match err {
            ExtractError::UnsupportedDocumentType(t) => Self::UnsupportedDocumentType(t),
            ExtractError::ExtractionFailure(m) => Self::Extraction(m),
        }
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;
