//! secp256k1 key derivation
//!
//! BIP-32 hierarchical derivation from the full 64-byte seed. The public key
//! handed back is the uncompressed SEC1 point `0x04 || X || Y`.

use ::secp256k1::{All, PublicKey, Scalar, Secp256k1, SecretKey};
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::Zeroizing;

use crate::error::{Error, Result};
use super::derivation::{Algorithm, KeypairMaterial};

/// Account path used by the platform's reference tooling (SLIP-44 coin type 223)
pub const DEFAULT_PATH: &str = "m/44'/223'/0'/0/0";

const HARDENED_OFFSET: u32 = 0x8000_0000;

/// A node in the BIP-32 tree
struct ExtendedKey {
    secret_key: SecretKey,
    chain_code: Zeroizing<[u8; 32]>,
}

/// Derive a secp256k1 key pair from a seed and derivation path
pub fn derive_secp256k1_key_pair(seed: &[u8], path: &str) -> Result<KeypairMaterial> {
    let path_components = parse_derivation_path(path)?;
    let secp = Secp256k1::new();

    let mut node = derive_master_key(seed)?;
    for component in path_components {
        node = derive_child_key(&secp, &node, component)?;
    }

    let compressed = PublicKey::from_secret_key(&secp, &node.secret_key).serialize();
    let uncompressed = decompress_public_key(&compressed)?;

    let private_key = Zeroizing::new(node.secret_key.secret_bytes());

    KeypairMaterial::new(Algorithm::Secp256k1, uncompressed.to_vec(), private_key.to_vec())
}

/// Expand a 33-byte compressed point into its 65-byte uncompressed form
pub fn decompress_public_key(compressed: &[u8]) -> Result<[u8; 65]> {
    let public_key = PublicKey::from_slice(compressed)
        .map_err(|e| Error::KeyDerivation(format!("Invalid compressed public key: {}", e)))?;
    Ok(public_key.serialize_uncompressed())
}

/// Parse a BIP-32 derivation path
pub fn parse_derivation_path(path: &str) -> Result<Vec<u32>> {
    if !path.starts_with("m/") {
        return Err(Error::KeyDerivation(format!("Invalid derivation path: {}", path)));
    }

    let mut result = Vec::new();

    for component in path.trim_start_matches("m/").split('/') {
        if component.is_empty() {
            continue;
        }

        let hardened = component.ends_with('\'') || component.ends_with('h');
        let digits = component.trim_end_matches(['\'', 'h']);
        let index = digits
            .parse::<u32>()
            .ok()
            .filter(|index| *index < HARDENED_OFFSET)
            .ok_or_else(|| {
                Error::KeyDerivation(format!("Invalid derivation path component: {}", component))
            })?;

        result.push(if hardened { index | HARDENED_OFFSET } else { index });
    }

    Ok(result)
}

/// Derive the master key from a seed
fn derive_master_key(seed: &[u8]) -> Result<ExtendedKey> {
    let mut hmac = <Hmac<Sha512> as KeyInit>::new_from_slice(b"Bitcoin seed")
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

    hmac.update(seed);
    let mut result = Zeroizing::new([0u8; 64]);
    result.copy_from_slice(&hmac.finalize().into_bytes());

    let secret_key = SecretKey::from_slice(&result[..32])
        .map_err(|e| Error::KeyDerivation(format!("Seed yields no usable master key: {}", e)))?;

    let mut chain_code = Zeroizing::new([0u8; 32]);
    chain_code.copy_from_slice(&result[32..]);

    Ok(ExtendedKey { secret_key, chain_code })
}

/// Derive a child key from a parent key
fn derive_child_key(secp: &Secp256k1<All>, parent: &ExtendedKey, index: u32) -> Result<ExtendedKey> {
    let mut data = Zeroizing::new(Vec::with_capacity(37));

    if index >= HARDENED_OFFSET {
        data.push(0);
        data.extend_from_slice(Zeroizing::new(parent.secret_key.secret_bytes()).as_slice());
    } else {
        let parent_public_key = PublicKey::from_secret_key(secp, &parent.secret_key);
        data.extend_from_slice(&parent_public_key.serialize());
    }

    data.extend_from_slice(&index.to_be_bytes());

    let mut hmac = <Hmac<Sha512> as KeyInit>::new_from_slice(parent.chain_code.as_slice())
        .map_err(|_| Error::KeyDerivation("HMAC error".to_string()))?;

    hmac.update(&data);
    let mut result = Zeroizing::new([0u8; 64]);
    result.copy_from_slice(&hmac.finalize().into_bytes());

    // child = IL + parent (mod n); IL >= n or a zero result leaves no private key
    let tweak = SecretKey::from_slice(&result[..32]).map_err(|e| {
        Error::KeyDerivation(format!("No private key at child index {:#010x}: {}", index, e))
    })?;
    let secret_key = tweak
        .add_tweak(&Scalar::from(parent.secret_key))
        .map_err(|e| {
            Error::KeyDerivation(format!("No private key at child index {:#010x}: {}", index, e))
        })?;

    let mut chain_code = Zeroizing::new([0u8; 32]);
    chain_code.copy_from_slice(&result[32..]);

    Ok(ExtendedKey { secret_key, chain_code })
}
