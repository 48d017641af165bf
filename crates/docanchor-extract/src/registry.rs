use std::collections::HashMap;
use std::fmt;

use docanchor_types::{Document, DocumentKind};
use tracing::debug;

use crate::error::{ExtractError, ExtractResult};

/// Turns the bytes of one document format into plain text.
pub trait TextExtractor: Send + Sync {
    fn extract(&self, bytes: &[u8]) -> ExtractResult<String>;
}

impl<F> TextExtractor for F
where
    F: Fn(&[u8]) -> ExtractResult<String> + Send + Sync,
{
    fn extract(&self, bytes: &[u8]) -> ExtractResult<String> {
        self(bytes)
    }
}

/// One extractor per supported document kind.
#[derive(Default)]
pub struct ExtractorRegistry {
    extractors: HashMap<DocumentKind, Box<dyn TextExtractor>>,
}

impl ExtractorRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register (or replace) the extractor for `kind`.
    pub fn register(&mut self, kind: DocumentKind, extractor: Box<dyn TextExtractor>) {
        self.extractors.insert(kind, extractor);
    }

    pub fn with(mut self, kind: DocumentKind, extractor: impl TextExtractor + 'static) -> Self {
        self.register(kind, Box::new(extractor));
        self
    }

    pub fn supports(&self, kind: DocumentKind) -> bool {
        self.extractors.contains_key(&kind)
    }

    /// Extract the text of `document`, dispatching on its declared type.
    ///
    /// An unsupported declared type fails before any extractor is called.
    pub fn extract(&self, document: &Document) -> ExtractResult<(DocumentKind, String)> {
        let kind = document.kind()?;
        let extractor = self.extractors.get(&kind).ok_or_else(|| {
            ExtractError::ExtractionFailure(format!("no extractor registered for {kind} documents"))
        })?;
        debug!(file = %document.file_name, %kind, len = document.bytes.len(), "extracting text");
        let text = extractor.extract(&document.bytes)?;
        Ok((kind, text))
    }
}

impl fmt::Debug for ExtractorRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut kinds: Vec<String> = self.extractors.keys().map(|k| k.to_string()).collect();
        kinds.sort();
        f.debug_struct("ExtractorRegistry").field("kinds", &kinds).finish()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    use super::*;

    fn utf8(bytes: &[u8]) -> ExtractResult<String> {
        String::from_utf8(bytes.to_vec()).map_err(|e| ExtractError::ExtractionFailure(e.to_string()))
    }

    fn pdf(body: &str) -> Document {
        Document::new("decision.pdf", "application/pdf", body.as_bytes().to_vec())
    }

    #[test]
    fn dispatches_on_declared_type() {
        let registry = ExtractorRegistry::new()
            .with(DocumentKind::Pdf, |b: &[u8]| -> ExtractResult<String> {
                Ok(format!("pdf:{}", utf8(b)?))
            })
            .with(DocumentKind::Word, |b: &[u8]| -> ExtractResult<String> {
                Ok(format!("word:{}", utf8(b)?))
            });

        let (kind, text) = registry.extract(&pdf("body")).unwrap();
        assert_eq!(kind, DocumentKind::Pdf);
        assert_eq!(text, "pdf:body");

        let word = Document::new("d.docx", DocumentKind::Word.content_type(), b"body".to_vec());
        assert_eq!(registry.extract(&word).unwrap().1, "word:body");
    }

    #[test]
    fn unsupported_type_never_reaches_an_extractor() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let registry = ExtractorRegistry::new().with(DocumentKind::Pdf, move |b: &[u8]| {
            counter.fetch_add(1, Ordering::SeqCst);
            utf8(b)
        });

        let png = Document::new("scan.png", "image/png", vec![0x89, 0x50]);
        assert_eq!(
            registry.extract(&png),
            Err(ExtractError::UnsupportedDocumentType("image/png".into()))
        );
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn missing_backend_is_extraction_failure() {
        let registry = ExtractorRegistry::new();
        assert!(!registry.supports(DocumentKind::Pdf));
        let err = registry.extract(&pdf("x")).unwrap_err();
        assert!(matches!(err, ExtractError::ExtractionFailure(ref m) if m.contains("PDF")));
    }

    #[test]
    fn extractor_errors_propagate() {
        let registry =
            ExtractorRegistry::new().with(DocumentKind::Pdf, |_: &[u8]| -> ExtractResult<String> {
                Err(ExtractError::ExtractionFailure("corrupt xref table".into()))
            });
        let err = registry.extract(&pdf("x")).unwrap_err();
        assert_eq!(err.to_string(), "text extraction failed: corrupt xref table");
    }

    #[test]
    fn register_replaces_existing() {
        fn old(_: &[u8]) -> ExtractResult<String> {
            Ok("old".to_string())
        }
        fn new(_: &[u8]) -> ExtractResult<String> {
            Ok("new".to_string())
        }
        let mut registry = ExtractorRegistry::new().with(DocumentKind::Pdf, old);
        registry.register(DocumentKind::Pdf, Box::new(new));
        assert_eq!(registry.extract(&pdf("x")).unwrap().1, "new");
    }

    #[test]
    fn debug_lists_kinds() {
        let registry = ExtractorRegistry::new().with(DocumentKind::Word, utf8);
        assert_eq!(format!("{registry:?}"), "ExtractorRegistry { kinds: [\"Word\"] }");
    }
}
