//! Key derivation and management
//!
//! This module derives raw keypairs for the signature algorithms the
//! platform accepts for self-authenticating principals.

pub mod ed25519;
pub mod secp256k1;
mod derivation;

pub use derivation::*;
