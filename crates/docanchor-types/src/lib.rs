//! Value types shared across docanchor.
//!
//! Everything here is a request-scoped value object. Nothing is persisted by
//! docanchor itself: anchoring and retrieval belong to the external ledger.
//!
//! # Key Types
//!
//! - [`KeyPair`]: Freshly generated, text-encoded signing keypair
//! - [`Document`]: A fully materialized document with its declared type
//! - [`DocumentKind`]: The two supported document formats
//! - [`DocumentFingerprintPayload`]: Values to anchor, or to look up by
//! - [`AuthenticityRequest`]: Anchored values plus a freshly computed digest
//! - [`AuthenticityVerdict`]: Independent integrity and authenticity outcome

pub mod document;
pub mod error;
pub mod keypair;
pub mod payload;
pub mod verdict;

pub use document::{Document, DocumentKind};
pub use error::TypeError;
pub use keypair::KeyPair;
pub use payload::DocumentFingerprintPayload;
pub use verdict::{AuthenticityRequest, AuthenticityVerdict};
