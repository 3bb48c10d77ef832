//! Error types for the identity library

use thiserror::Error;

use crate::crypto::keys::Algorithm;

/// Failures raised while parsing principal text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PrincipalError {
    #[error("Invalid base-32 character {character:?} at position {position}")]
    InvalidCharacter { character: char, position: usize },

    #[error("Principal data is {length} bytes, need at least {minimum}")]
    TooShort { length: usize, minimum: usize },

    #[error("Principal is {length} bytes, at most {maximum} allowed")]
    TooLong { length: usize, maximum: usize },

    #[error("Non-canonical base-32 at symbol {position}: {reason}")]
    NonCanonical { position: usize, reason: String },

    #[error("Checksum mismatch: text carries {expected:08x}, bytes hash to {actual:08x}")]
    ChecksumMismatch { expected: u32, actual: u32 },
}

/// Custom error type for identity operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Mnemonic error: {0}")]
    Mnemonic(String),

    #[error("Entropy source error: {0}")]
    Entropy(String),

    #[error("Unsupported algorithm: {0}")]
    UnsupportedAlgorithm(String),

    #[error("Key derivation error: {0}")]
    KeyDerivation(String),

    #[error("Invalid {algorithm} public key length: expected {expected} bytes, got {actual}")]
    InvalidKeyLength {
        algorithm: Algorithm,
        expected: usize,
        actual: usize,
    },

    #[error("Invalid uncompressed point tag: expected 0x04, got 0x{0:02x}")]
    InvalidPointTag(u8),

    #[error("Invalid DER public key: {0}")]
    InvalidDer(String),

    #[error("Invalid principal: {0}")]
    Principal(#[from] PrincipalError),

    #[error("Configuration error: {0}")]
    Config(String),
}

/// Result type for identity operations
pub type Result<T> = std::result::Result<T, Error>;
