//! DER SubjectPublicKeyInfo encoding
//!
//! Both supported key types have a fixed-size SPKI, so the ASN.1 structure is
//! a constant prefix followed by the key bytes. The prefixes are part of the
//! platform's wire format and must stay byte-exact.

use crate::error::{Error, Result};
use super::keys::{normalize_public_key, Algorithm};

/// `SEQUENCE { SEQUENCE { OID 1.3.101.112 }, BIT STRING (33 bytes, 0 unused bits) }`
pub const ED25519_SPKI_PREFIX: [u8; 12] = [
    0x30, 0x2a, // SEQUENCE, 42 bytes
    0x30, 0x05, // SEQUENCE, 5 bytes
    0x06, 0x03, 0x2b, 0x65, 0x70, // OID 1.3.101.112
    0x03, 0x21, 0x00, // BIT STRING, 33 bytes, 0 unused bits
];

/// `SEQUENCE { SEQUENCE { OID 1.2.840.10045.2.1, OID 1.3.132.0.10 }, BIT STRING (66 bytes) }`
///
/// The last byte is the SEC1 uncompressed-point tag, so only `X || Y` follows.
pub const SECP256K1_SPKI_PREFIX: [u8; 24] = [
    0x30, 0x56, // SEQUENCE, 86 bytes
    0x30, 0x10, // SEQUENCE, 16 bytes
    0x06, 0x07, 0x2a, 0x86, 0x48, 0xce, 0x3d, 0x02, 0x01, // OID 1.2.840.10045.2.1 (ecPublicKey)
    0x06, 0x05, 0x2b, 0x81, 0x04, 0x00, 0x0a, // OID 1.3.132.0.10 (secp256k1)
    0x03, 0x42, 0x00, // BIT STRING, 66 bytes, 0 unused bits
    0x04, // uncompressed point
];

/// Wrap a raw public key in its DER SubjectPublicKeyInfo.
///
/// Ed25519 keys must be exactly 32 bytes. secp256k1 keys must be a 65-byte
/// uncompressed point; a bare 64-byte `X || Y` is accepted and tagged as
/// uncompressed before validation, for callers that strip the tag.
pub fn encode_spki(algorithm: Algorithm, public_key: &[u8]) -> Result<Vec<u8>> {
    let public_key = normalize_public_key(algorithm, public_key.to_vec())?;

    let mut der = Vec::with_capacity(algorithm.der_len());
    match algorithm {
        Algorithm::Ed25519 => {
            der.extend_from_slice(&ED25519_SPKI_PREFIX);
            der.extend_from_slice(&public_key);
        }
        Algorithm::Secp256k1 => {
            der.extend_from_slice(&SECP256K1_SPKI_PREFIX);
            der.extend_from_slice(&public_key[1..]);
        }
    }

    debug_assert_eq!(der.len(), algorithm.der_len());
    Ok(der)
}

/// Recover the algorithm and raw public key from a DER SubjectPublicKeyInfo.
///
/// Only the two fixed layouts produced by [`encode_spki`] are recognized.
pub fn decode_spki(der: &[u8]) -> Result<(Algorithm, Vec<u8>)> {
    let (algorithm, prefix): (Algorithm, &[u8]) = if der.starts_with(&ED25519_SPKI_PREFIX) {
        (Algorithm::Ed25519, &ED25519_SPKI_PREFIX[..])
    } else if der.starts_with(&SECP256K1_SPKI_PREFIX[..23]) {
        (Algorithm::Secp256k1, &SECP256K1_SPKI_PREFIX[..23])
    } else {
        return Err(Error::InvalidDer(format!(
            "unrecognized algorithm identifier in {} bytes of DER",
            der.len()
        )));
    };

    if der.len() != algorithm.der_len() {
        return Err(Error::InvalidDer(format!(
            "{} SubjectPublicKeyInfo must be {} bytes, got {}",
            algorithm,
            algorithm.der_len(),
            der.len()
        )));
    }

    let public_key = normalize_public_key(algorithm, der[prefix.len()..].to_vec())?;
    Ok((algorithm, public_key))
}
