//! Text extraction for docanchor.
//!
//! docanchor fingerprints the *text* of a document, not its bytes. This crate
//! defines the extraction contract ([`TextExtractor`]), a registry that
//! dispatches on the declared [`DocumentKind`](docanchor_types::DocumentKind),
//! and a backend that delegates to an external program such as `pdftotext`.
//!
//! Declared types other than PDF and Word are rejected before any extractor
//! runs.

pub mod command;
pub mod error;
pub mod registry;

pub use command::CommandExtractor;
pub use error::{ExtractError, ExtractResult};
pub use registry::{ExtractorRegistry, TextExtractor};
