//! Principals: the platform's identity byte strings and their text form
//!
//! A self-authenticating principal is `SHA-224(DER public key) || 0x02`.
//! The text form is checksummed base-32 (see [`codec`]).

pub mod codec;
mod crc32;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::crypto::der::encode_spki;
use crate::crypto::keys::Algorithm;
use crate::crypto::sha224::{sha224, DIGEST_LEN};
use crate::error::{PrincipalError, Result};

pub use crc32::crc32;

/// Longest principal the platform accepts
pub const MAX_LEN: usize = 29;

/// Length of a self-authenticating principal
pub const SELF_AUTHENTICATING_LEN: usize = DIGEST_LEN + 1;

const TAG_OPAQUE: u8 = 0x01;
const TAG_SELF_AUTHENTICATING: u8 = 0x02;
const TAG_DERIVED: u8 = 0x03;
const TAG_ANONYMOUS: u8 = 0x04;
const TAG_RESERVED: u8 = 0x7f;

/// Class of a principal, read from its trailing tag byte
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PrincipalKind {
    Opaque,
    SelfAuthenticating,
    Derived,
    Anonymous,
    Reserved,
    Unknown,
}

/// Raw principal bytes
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Principal(Vec<u8>);

impl Principal {
    /// Principal owned by the holder of the key whose DER encoding is `der`
    pub fn self_authenticating(der: &[u8]) -> Self {
        Self(self_authenticating_bytes(der).to_vec())
    }

    /// The anonymous principal, `2vxsx-fae`
    pub fn anonymous() -> Self {
        Self(vec![TAG_ANONYMOUS])
    }

    /// Wrap raw bytes, enforcing the platform's length limits
    pub fn from_slice(bytes: &[u8]) -> std::result::Result<Self, PrincipalError> {
        if bytes.is_empty() {
            return Err(PrincipalError::TooShort { length: 0, minimum: 1 });
        }
        if bytes.len() > MAX_LEN {
            return Err(PrincipalError::TooLong {
                length: bytes.len(),
                maximum: MAX_LEN,
            });
        }
        Ok(Self(bytes.to_vec()))
    }

    /// Parse dashed principal text
    pub fn from_text(text: &str) -> std::result::Result<Self, PrincipalError> {
        Self::from_slice(&codec::decode_text(text)?)
    }

    pub fn to_text(&self) -> String {
        codec::encode_text(&self.0)
    }

    pub fn as_slice(&self) -> &[u8] {
        &self.0
    }

    pub fn kind(&self) -> PrincipalKind {
        match (self.0.len(), self.0.last()) {
            (SELF_AUTHENTICATING_LEN, Some(&TAG_SELF_AUTHENTICATING)) => PrincipalKind::SelfAuthenticating,
            (1, Some(&TAG_ANONYMOUS)) => PrincipalKind::Anonymous,
            (_, Some(&TAG_OPAQUE)) => PrincipalKind::Opaque,
            (_, Some(&TAG_DERIVED)) => PrincipalKind::Derived,
            (_, Some(&TAG_RESERVED)) => PrincipalKind::Reserved,
            _ => PrincipalKind::Unknown,
        }
    }
}

impl AsRef<[u8]> for Principal {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Display for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl fmt::Debug for Principal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Principal({})", self.to_text())
    }
}

impl FromStr for Principal {
    type Err = PrincipalError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        Self::from_text(s)
    }
}

impl Serialize for Principal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for Principal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_text(&text).map_err(serde::de::Error::custom)
    }
}

/// `SHA-224(der) || 0x02`
pub fn self_authenticating_bytes(der: &[u8]) -> [u8; SELF_AUTHENTICATING_LEN] {
    let mut bytes = [0u8; SELF_AUTHENTICATING_LEN];
    bytes[..DIGEST_LEN].copy_from_slice(&sha224(der));
    bytes[DIGEST_LEN] = TAG_SELF_AUTHENTICATING;
    bytes
}

/// Principal text for a raw public key
pub fn principal_text(algorithm: Algorithm, public_key: &[u8]) -> Result<String> {
    let der = encode_spki(algorithm, public_key)?;
    Ok(Principal::self_authenticating(&der).to_text())
}

/// Decode and checksum-verify principal text supplied from outside
pub fn decode_principal_text(text: &str) -> Result<Vec<u8>> {
    Ok(codec::decode_text(text)?)
}
