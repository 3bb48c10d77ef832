//! Generator configuration
//!
//! Defaults reproduce the platform's reference tooling: 24-word phrases,
//! empty BIP-39 passphrase and the `m/44'/223'/0'/0/0` secp256k1 path.
//! Changing the passphrase or path yields different, non-reference identities.

use serde::{Deserialize, Serialize};

use crate::crypto::keys::secp256k1::{parse_derivation_path, DEFAULT_PATH};
use crate::crypto::keys::Algorithm;
use crate::crypto::mnemonic::MnemonicStrength;
use crate::error::{Error, Result};

/// Label given to records created without one
pub const DEFAULT_LABEL: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeygenConfig {
    pub default_algorithm: Algorithm,
    pub default_label: String,
    pub mnemonic_strength: MnemonicStrength,
    /// BIP-39 passphrase; `None` means the empty passphrase
    pub passphrase: Option<String>,
    /// BIP-32 path for secp256k1 keys
    pub derivation_path: String,
}

impl Default for KeygenConfig {
    fn default() -> Self {
        Self {
            default_algorithm: Algorithm::Ed25519,
            default_label: DEFAULT_LABEL.to_string(),
            mnemonic_strength: MnemonicStrength::Words24,
            passphrase: None,
            derivation_path: DEFAULT_PATH.to_string(),
        }
    }
}

impl KeygenConfig {
    /// Parse a JSON document; missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.default_label.trim().is_empty() {
            return Err(Error::Config("default_label must not be empty".to_string()));
        }
        parse_derivation_path(&self.derivation_path)
            .map_err(|e| Error::Config(format!("derivation_path: {}", e)))?;
        Ok(())
    }

    /// True when derivations match the reference tooling byte for byte
    pub fn is_reference(&self) -> bool {
        self.passphrase.as_deref().unwrap_or("").is_empty() && self.derivation_path == DEFAULT_PATH
    }
}
