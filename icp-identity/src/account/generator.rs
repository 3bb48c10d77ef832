//! End-to-end keypair generation

use tracing::debug;
use zeroize::Zeroizing;

use crate::config::KeygenConfig;
use crate::crypto::keys::{derive_key_pair_at, Algorithm};
use crate::crypto::mnemonic::{generate_mnemonic, mnemonic_to_seed, normalize_phrase};
use crate::error::Result;
use super::keypair::KeypairRecord;

/// Derives keypair records according to a [`KeygenConfig`].
///
/// Holds no state besides its configuration, so one generator can serve
/// any number of concurrent callers.
#[derive(Debug, Clone, Default)]
pub struct KeypairGenerator {
    config: KeygenConfig,
}

impl KeypairGenerator {
    pub fn new(config: KeygenConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &KeygenConfig {
        &self.config
    }

    /// Create a fresh seed phrase and derive a record from it
    pub fn generate(&self, algorithm: Algorithm, label: Option<&str>) -> Result<KeypairRecord> {
        let mnemonic = Zeroizing::new(generate_mnemonic(self.config.mnemonic_strength)?);
        self.derive_from_mnemonic(algorithm, &mnemonic, label)
    }

    /// Derive the record for an existing seed phrase
    pub fn derive_from_mnemonic(&self, algorithm: Algorithm, mnemonic: &str, label: Option<&str>) -> Result<KeypairRecord> {
        let seed = Zeroizing::new(mnemonic_to_seed(mnemonic, self.config.passphrase.as_deref())?);
        let keys = derive_key_pair_at(algorithm, &seed, &self.config.derivation_path)?;

        let label = label
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .unwrap_or(&self.config.default_label)
            .to_string();

        let record = KeypairRecord::new(label, keys, normalize_phrase(mnemonic));
        debug!(
            id = %record.id(),
            algorithm = %algorithm,
            label = record.label(),
            principal = %record.principal_text()?,
            "derived keypair"
        );
        Ok(record)
    }
}

/// Derive a record with the reference settings: empty passphrase and the
/// default secp256k1 path.
pub fn derive_keypair(algorithm: Algorithm, mnemonic: &str, label: Option<&str>) -> Result<KeypairRecord> {
    KeypairGenerator::default().derive_from_mnemonic(algorithm, mnemonic, label)
}
