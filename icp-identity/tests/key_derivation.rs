//! Tests for end-to-end identity derivation against reference vectors

use base64::{engine::general_purpose::STANDARD, Engine as _};

use icp_identity::crypto::der::encode_spki;
use icp_identity::crypto::keys::*;
use icp_identity::crypto::mnemonic::*;
use icp_identity::principal::{self_authenticating_bytes, Principal, PrincipalKind};
use icp_identity::{decode_principal_text, derive_keypair, principal_text, Error, PrincipalError};

const MNEMONIC: &str = "abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon abandon art";

const ED25519_PRIVATE: &str = "QIsoXBI4NgBPS4hCyJMkwfATgkUMDUOa80W6f8Saz3A=";
const ED25519_PUBLIC: &str = "HeNS5EzTM2clk/IzSnMOGAqvKQ3omqFtSA3llONOKWE=";
const ED25519_PRINCIPAL: &str = "yhnve-5y5qy-svqjc-aiobw-3a53m-n2gzt-xlrvn-s7kld-r5xid-td2ef-iae";

const SECP256K1_PRIVATE: &str = "Yb+9dY8vXeoLiLMSqhpHbE4MhT2HkGRk0Ai8NkBcD/I=";
const SECP256K1_PUBLIC: &str =
    "BBz+IZWfHzq8STHpP6u3hU/DOJS6Fy5m3ewbQautk0Vd3u79WEhh0/0gvh886bxxFK9et89Fi2sBc4LDysmVe4g=";
const SECP256K1_PRINCIPAL: &str = "m7bn6-s5er4-xouui-ymkqf-azncv-qfche-3qghk-2fvpm-atfyh-ozg2w-iqe";

#[test]
fn test_ed25519_reference_vector() {
    let seed = mnemonic_to_seed(MNEMONIC, None).unwrap();
    let keys = derive_key_pair(Algorithm::Ed25519, &seed).unwrap();

    assert_eq!(STANDARD.encode(keys.private_key()), ED25519_PRIVATE);
    assert_eq!(STANDARD.encode(keys.public_key()), ED25519_PUBLIC);
    assert_eq!(principal_text(Algorithm::Ed25519, keys.public_key()).unwrap(), ED25519_PRINCIPAL);
}

#[test]
fn test_secp256k1_reference_vector() {
    let seed = mnemonic_to_seed(MNEMONIC, None).unwrap();
    let keys = derive_key_pair(Algorithm::Secp256k1, &seed).unwrap();

    assert_eq!(STANDARD.encode(keys.private_key()), SECP256K1_PRIVATE);
    assert_eq!(STANDARD.encode(keys.public_key()), SECP256K1_PUBLIC);
    assert_eq!(principal_text(Algorithm::Secp256k1, keys.public_key()).unwrap(), SECP256K1_PRINCIPAL);
}

#[test]
fn test_explicit_default_path_matches() {
    let seed = mnemonic_to_seed(MNEMONIC, None).unwrap();
    let implicit = derive_key_pair(Algorithm::Secp256k1, &seed).unwrap();
    let explicit = derive_key_pair_at(Algorithm::Secp256k1, &seed, "m/44'/223'/0'/0/0").unwrap();
    let other = derive_key_pair_at(Algorithm::Secp256k1, &seed, "m/44'/223'/0'/0/1").unwrap();

    assert_eq!(implicit, explicit);
    assert_ne!(implicit.public_key(), other.public_key());
}

#[test]
fn test_record_matches_vectors() {
    let ed = derive_keypair(Algorithm::Ed25519, MNEMONIC, Some("ed")).unwrap();
    assert_eq!(STANDARD.encode(ed.private_key()), ED25519_PRIVATE);
    assert_eq!(ed.principal_text().unwrap(), ED25519_PRINCIPAL);
    assert_eq!(ed.mnemonic(), MNEMONIC);

    let k = derive_keypair(Algorithm::Secp256k1, MNEMONIC, Some("k")).unwrap();
    assert_eq!(STANDARD.encode(k.public_key()), SECP256K1_PUBLIC);
    assert_eq!(k.principal_text().unwrap(), SECP256K1_PRINCIPAL);
}

#[test]
fn test_derivation_is_deterministic() {
    for algorithm in [Algorithm::Ed25519, Algorithm::Secp256k1] {
        let first = derive_keypair(algorithm, MNEMONIC, None).unwrap();
        let second = derive_keypair(algorithm, MNEMONIC, None).unwrap();

        assert_eq!(first.public_key(), second.public_key());
        assert_eq!(first.private_key(), second.private_key());
        assert_eq!(first.principal_text().unwrap(), second.principal_text().unwrap());
        assert_ne!(first.id(), second.id());
    }
}

#[test]
fn test_length_invariants() {
    let seed = mnemonic_to_seed(&generate_mnemonic(MnemonicStrength::Words24).unwrap(), None).unwrap();
    for algorithm in [Algorithm::Ed25519, Algorithm::Secp256k1] {
        let keys = derive_key_pair(algorithm, &seed).unwrap();
        let der = encode_spki(algorithm, keys.public_key()).unwrap();
        assert_eq!(der.len(), algorithm.der_len());
        assert_eq!(self_authenticating_bytes(&der).len(), 29);
    }
    assert_eq!(Algorithm::Ed25519.der_len(), 44);
    assert_eq!(Algorithm::Secp256k1.der_len(), 88);
}

#[test]
fn test_principal_text_round_trip() {
    let decoded = decode_principal_text(ED25519_PRINCIPAL).unwrap();
    assert_eq!(decoded.len(), 29);
    assert_eq!(decoded[28], 0x02);

    let principal: Principal = SECP256K1_PRINCIPAL.parse().unwrap();
    assert_eq!(principal.kind(), PrincipalKind::SelfAuthenticating);
    assert_eq!(principal.to_string(), SECP256K1_PRINCIPAL);
}

#[test]
fn test_untagged_secp256k1_point_gives_same_principal() {
    let public = STANDARD.decode(SECP256K1_PUBLIC).unwrap();
    assert_eq!(principal_text(Algorithm::Secp256k1, &public[1..]).unwrap(), SECP256K1_PRINCIPAL);
}

#[test]
fn test_rejections() {
    assert!(matches!(
        encode_spki(Algorithm::Ed25519, &[0u8; 31]),
        Err(Error::InvalidKeyLength { expected: 32, actual: 31, .. })
    ));

    let corrupted = ED25519_PRINCIPAL.replacen('y', "1", 1);
    assert!(matches!(
        decode_principal_text(&corrupted),
        Err(Error::Principal(PrincipalError::InvalidCharacter { character: '1', position: 0 }))
    ));

    assert!(matches!(
        decode_principal_text("aaaa"),
        Err(Error::Principal(PrincipalError::TooShort { .. }))
    ));

    let trailing = ED25519_PRINCIPAL.replace("-iae", "-iaf");
    assert!(matches!(
        decode_principal_text(&trailing),
        Err(Error::Principal(PrincipalError::NonCanonical { .. }))
    ));

    let padded = format!("{}a", ED25519_PRINCIPAL);
    assert!(matches!(
        decode_principal_text(&padded),
        Err(Error::Principal(PrincipalError::NonCanonical { .. }))
    ));

    let swapped = ED25519_PRINCIPAL.replacen("yhnve", "yhnvf", 1);
    assert!(matches!(
        decode_principal_text(&swapped),
        Err(Error::Principal(PrincipalError::ChecksumMismatch { .. }))
    ));
}

#[test]
fn test_record_serialization() {
    let record = derive_keypair(Algorithm::Secp256k1, MNEMONIC, Some("backup")).unwrap();
    let json = serde_json::to_value(&record).unwrap();

    assert_eq!(json["label"], "backup");
    assert_eq!(json["keys"]["algorithm"], "secp256k1");
    assert_eq!(json["keys"]["public_key"].as_str().unwrap().len(), 130);

    let restored: icp_identity::KeypairRecord = serde_json::from_value(json).unwrap();
    assert_eq!(restored.id(), record.id());
    assert_eq!(restored.private_key(), record.private_key());
    assert_eq!(restored.principal_text().unwrap(), SECP256K1_PRINCIPAL);

    let renamed = record.relabel("renamed");
    assert_eq!(renamed.label(), "renamed");
    assert_eq!(record.label(), "backup");
    assert_eq!(renamed.id(), record.id());
}

#[test]
fn test_record_with_malformed_keys_fails_to_load() {
    let record = derive_keypair(Algorithm::Ed25519, MNEMONIC, None).unwrap();
    let mut json = serde_json::to_value(&record).unwrap();
    json["keys"]["public_key"] = serde_json::json!("00");
    json["keys"]["private_key"] = serde_json::json!("01");

    assert!(serde_json::from_value::<icp_identity::KeypairRecord>(json).is_err());
}

#[test]
fn test_parallel_derivations() {
    let handles: Vec<_> = (0..4)
        .map(|i| {
            std::thread::spawn(move || {
                let algorithm = if i % 2 == 0 { Algorithm::Ed25519 } else { Algorithm::Secp256k1 };
                derive_keypair(algorithm, MNEMONIC, None).unwrap().principal_text().unwrap()
            })
        })
        .collect();

    for (i, handle) in handles.into_iter().enumerate() {
        let expected = if i % 2 == 0 { ED25519_PRINCIPAL } else { SECP256K1_PRINCIPAL };
        assert_eq!(handle.join().unwrap(), expected);
    }
}
