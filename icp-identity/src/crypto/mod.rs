//! Cryptographic primitives and operations
//!
//! This module provides mnemonic handling, per-algorithm key derivation,
//! SubjectPublicKeyInfo encoding and the SHA-224 digest used for principals.

pub mod mnemonic;
pub mod keys;
pub mod der;
pub mod sha224;

pub use mnemonic::*;
pub use keys::*;
pub use der::{decode_spki, encode_spki};
pub use sha224::{sha224, Sha224};
