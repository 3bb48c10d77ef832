//! Ed25519 key derivation
//!
//! The platform's reference tooling does not walk a hierarchy for Ed25519:
//! the first 32 bytes of the BIP-39 seed are the signing seed.

use ed25519_dalek::{SigningKey, VerifyingKey};
use zeroize::Zeroizing;

use crate::error::Result;
use super::derivation::{Algorithm, KeypairMaterial};

/// Derive an Ed25519 key pair from a 64-byte BIP-39 seed
pub fn derive_ed25519_key_pair(seed: &[u8; 64]) -> Result<KeypairMaterial> {
    let mut secret = Zeroizing::new([0u8; 32]);
    secret.copy_from_slice(&seed[..32]);

    let signing_key = SigningKey::from_bytes(&secret);
    let verifying_key = VerifyingKey::from(&signing_key);
    let private_key = Zeroizing::new(signing_key.to_bytes());

    KeypairMaterial::new(
        Algorithm::Ed25519,
        verifying_key.to_bytes().to_vec(),
        private_key.to_vec(),
    )
}
