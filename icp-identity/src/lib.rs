//! ICP identity core
//!
//! Turns a BIP-39 seed phrase into an Ed25519 or secp256k1 keypair and the
//! self-authenticating principal the Internet Computer derives from it. Every
//! step is a pure function of its input, so the same phrase always yields the
//! same keys and the same principal text as the platform's reference tooling.
//!
//! The pipeline runs left to right:
//! mnemonic -> seed -> keypair -> DER SubjectPublicKeyInfo -> SHA-224 + tag -> dashed base-32 text.

pub mod error;
pub mod config;
pub mod crypto;
pub mod principal;
pub mod account;

// Re-export commonly used types for convenience
pub use error::{Error, PrincipalError, Result};
pub use config::KeygenConfig;
pub use crypto::keys::{Algorithm, KeypairMaterial};
pub use crypto::mnemonic::{generate_mnemonic, mnemonic_to_seed, MnemonicStrength};
pub use principal::{decode_principal_text, principal_text, Principal, PrincipalKind};
pub use account::{derive_keypair, KeypairGenerator, KeypairRecord};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
