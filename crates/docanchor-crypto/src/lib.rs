//! Cryptographic pipeline for docanchor.
//!
//! Provides content fingerprinting (SHA-256 by default), text codecs for
//! asymmetric key material, ECDSA P-256 / Ed25519 signing and verification
//! over digests, and the paired key file bundle format.
//!
//! Every component takes its algorithms from a single [`SchemeConfig`]
//! value. All primitives come from established libraries.

pub mod config;
pub mod encoding;
pub mod error;
pub mod hasher;
pub mod keyfile;
pub mod keys;
pub mod signer;

pub use config::{HashAlgorithm, SchemeConfig, SignatureScheme};
pub use error::{CryptoError, CryptoResult};
pub use hasher::{Digest, FingerprintEngine};
pub use keyfile::{parse_paired_key_file, render_paired_key_file, PairedKeyFile};
pub use keys::{KeyCodec, PrivateKeyHandle, PublicKeyHandle};
pub use signer::{Signer, Verifier};
