//! Keypair record implementation

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use zeroize::Zeroize;

use crate::crypto::der::encode_spki;
use crate::crypto::keys::{Algorithm, KeypairMaterial};
use crate::error::Result;
use crate::principal::Principal;

/// A derived keypair with everything needed to recreate it.
///
/// Storage treats the record as opaque. Records are not mutated after
/// construction; [`KeypairRecord::relabel`] returns a copy.
#[derive(Clone, Serialize, Deserialize)]
pub struct KeypairRecord {
    id: Uuid,
    label: String,
    keys: KeypairMaterial,
    /// Seed phrase the keys were derived from
    mnemonic: String,
    created_at: DateTime<Utc>,
}

impl KeypairRecord {
    pub(crate) fn new(label: String, keys: KeypairMaterial, mnemonic: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            label,
            keys,
            mnemonic,
            created_at: Utc::now(),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn algorithm(&self) -> Algorithm {
        self.keys.algorithm()
    }

    pub fn keys(&self) -> &KeypairMaterial {
        &self.keys
    }

    pub fn public_key(&self) -> &[u8] {
        self.keys.public_key()
    }

    pub fn private_key(&self) -> &[u8] {
        self.keys.private_key()
    }

    pub fn mnemonic(&self) -> &str {
        &self.mnemonic
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// DER SubjectPublicKeyInfo of the public key
    pub fn der_public_key(&self) -> Result<Vec<u8>> {
        encode_spki(self.algorithm(), self.public_key())
    }

    /// Self-authenticating principal of the public key
    pub fn principal(&self) -> Result<Principal> {
        Ok(Principal::self_authenticating(&self.der_public_key()?))
    }

    pub fn principal_text(&self) -> Result<String> {
        Ok(self.principal()?.to_text())
    }

    /// Copy of this record under a different label
    pub fn relabel(&self, label: impl Into<String>) -> Self {
        let mut copy = self.clone();
        copy.label = label.into();
        copy
    }
}

impl fmt::Debug for KeypairRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeypairRecord")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("keys", &self.keys)
            .field("mnemonic", &"<redacted>")
            .field("created_at", &self.created_at)
            .finish()
    }
}

impl Drop for KeypairRecord {
    fn drop(&mut self) {
        self.mnemonic.zeroize();
    }
}
