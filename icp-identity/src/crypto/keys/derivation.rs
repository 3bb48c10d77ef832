//! Common key derivation functionality

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use zeroize::Zeroize;

use crate::error::{Error, Result};

/// Supported signature algorithms
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Algorithm {
    /// Ed25519, seeded from the first half of the BIP-39 seed
    Ed25519,
    /// secp256k1, derived along a BIP-32 path
    Secp256k1,
}

impl Algorithm {
    /// Length of a raw public key as stored in [`KeypairMaterial`]
    pub fn public_key_len(&self) -> usize {
        match self {
            Self::Ed25519 => 32,
            Self::Secp256k1 => 65,
        }
    }

    /// Length of a raw private key
    pub fn private_key_len(&self) -> usize {
        32
    }

    /// Length of the DER SubjectPublicKeyInfo wrapping the public key
    pub fn der_len(&self) -> usize {
        match self {
            Self::Ed25519 => 44,
            Self::Secp256k1 => 88,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ed25519 => "ed25519",
            Self::Secp256k1 => "secp256k1",
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Algorithm {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ed25519" => Ok(Self::Ed25519),
            "secp256k1" => Ok(Self::Secp256k1),
            other => Err(Error::UnsupportedAlgorithm(other.to_string())),
        }
    }
}

/// Raw keys produced by one derivation.
///
/// Built once and never mutated. The private key is wiped when the value
/// is dropped. Deserializing goes through [`KeypairMaterial::new`], so
/// stored records with malformed keys fail to load.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawKeypairMaterial")]
pub struct KeypairMaterial {
    algorithm: Algorithm,
    #[serde(with = "hex::serde")]
    public_key: Vec<u8>,
    #[serde(with = "hex::serde")]
    private_key: Vec<u8>,
}

/// Unchecked wire form of [`KeypairMaterial`]
#[derive(Deserialize)]
struct RawKeypairMaterial {
    algorithm: Algorithm,
    #[serde(with = "hex::serde")]
    public_key: Vec<u8>,
    #[serde(with = "hex::serde")]
    private_key: Vec<u8>,
}

impl TryFrom<RawKeypairMaterial> for KeypairMaterial {
    type Error = Error;

    fn try_from(raw: RawKeypairMaterial) -> Result<Self> {
        Self::new(raw.algorithm, raw.public_key, raw.private_key)
    }
}

impl KeypairMaterial {
    /// Create key material from raw bytes, checking the algorithm's lengths.
    ///
    /// A 64-byte secp256k1 public key is taken as `X || Y` and gets the
    /// `0x04` uncompressed tag prepended.
    pub fn new(algorithm: Algorithm, public_key: Vec<u8>, mut private_key: Vec<u8>) -> Result<Self> {
        let public_key = match normalize_public_key(algorithm, public_key) {
            Ok(public_key) => public_key,
            Err(e) => {
                private_key.zeroize();
                return Err(e);
            }
        };

        if private_key.len() != algorithm.private_key_len() {
            private_key.zeroize();
            return Err(Error::KeyDerivation(format!(
                "Invalid {} private key length: expected {} bytes, got {}",
                algorithm,
                algorithm.private_key_len(),
                private_key.len()
            )));
        }

        Ok(Self { algorithm, public_key, private_key })
    }

    /// Get the algorithm
    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Get the raw public key bytes
    pub fn public_key(&self) -> &[u8] {
        &self.public_key
    }

    /// Get the raw private key bytes
    pub fn private_key(&self) -> &[u8] {
        &self.private_key
    }
}

impl fmt::Debug for KeypairMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeypairMaterial")
            .field("algorithm", &self.algorithm)
            .field("public_key", &hex::encode(&self.public_key))
            .field("private_key", &"<redacted>")
            .finish()
    }
}

impl Drop for KeypairMaterial {
    fn drop(&mut self) {
        self.private_key.zeroize();
    }
}

/// Bring a raw public key into the canonical length for its algorithm.
pub(crate) fn normalize_public_key(algorithm: Algorithm, mut public_key: Vec<u8>) -> Result<Vec<u8>> {
    match algorithm {
        Algorithm::Ed25519 => {}
        Algorithm::Secp256k1 => {
            if public_key.len() == 64 {
                public_key.insert(0, 0x04);
            }
            if public_key.len() == 65 && public_key[0] != 0x04 {
                return Err(Error::InvalidPointTag(public_key[0]));
            }
        }
    }

    let expected = algorithm.public_key_len();
    if public_key.len() != expected {
        return Err(Error::InvalidKeyLength {
            algorithm,
            expected,
            actual: public_key.len(),
        });
    }

    Ok(public_key)
}

/// Derive key material from a 64-byte BIP-39 seed.
///
/// Ed25519 uses the first 32 seed bytes as its signing seed. secp256k1
/// walks [`secp256k1::DEFAULT_PATH`] from the BIP-32 master key.
pub fn derive_key_pair(algorithm: Algorithm, seed: &[u8; 64]) -> Result<KeypairMaterial> {
    match algorithm {
        Algorithm::Ed25519 => super::ed25519::derive_ed25519_key_pair(seed),
        Algorithm::Secp256k1 => {
            super::secp256k1::derive_secp256k1_key_pair(seed, super::secp256k1::DEFAULT_PATH)
        }
    }
}

/// Like [`derive_key_pair`] but with an explicit BIP-32 path for secp256k1.
///
/// Ed25519 has no hierarchy, so the path is ignored for it.
pub fn derive_key_pair_at(algorithm: Algorithm, seed: &[u8; 64], path: &str) -> Result<KeypairMaterial> {
    match algorithm {
        Algorithm::Ed25519 => super::ed25519::derive_ed25519_key_pair(seed),
        Algorithm::Secp256k1 => super::secp256k1::derive_secp256k1_key_pair(seed, path),
    }
}
