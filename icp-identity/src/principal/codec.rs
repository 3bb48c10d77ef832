//! Textual principal encoding
//!
//! `base32(crc32_be(bytes) || bytes)`, lowercase RFC 4648 alphabet without
//! padding, split into dash-separated groups of five characters.

use data_encoding::BASE32_NOPAD;

use crate::error::PrincipalError;
use super::crc32::crc32;

const GROUP_LEN: usize = 5;
const CHECKSUM_LEN: usize = 4;

/// Encode raw principal bytes as dashed text
pub fn encode_text(bytes: &[u8]) -> String {
    let mut payload = Vec::with_capacity(CHECKSUM_LEN + bytes.len());
    payload.extend_from_slice(&crc32(bytes).to_be_bytes());
    payload.extend_from_slice(bytes);

    let encoded = base32_encode(&payload);
    let mut text = String::with_capacity(encoded.len() + encoded.len() / GROUP_LEN);
    for (i, c) in encoded.chars().enumerate() {
        if i > 0 && i % GROUP_LEN == 0 {
            text.push('-');
        }
        text.push(c);
    }
    text
}

/// Decode dashed text back into raw principal bytes, verifying the checksum.
///
/// Surrounding whitespace and dashes are ignored and case is folded.
/// Non-canonical base-32 (impossible lengths, non-zero trailing bits) is
/// rejected, so every principal has exactly one text form.
/// Positions in character errors are offsets into the trimmed input;
/// positions in encoding errors are offsets into the dash-free symbols.
pub fn decode_text(text: &str) -> Result<Vec<u8>, PrincipalError> {
    let mut symbols = String::with_capacity(text.len());
    for (position, character) in text.trim().chars().enumerate() {
        if character == '-' {
            continue;
        }
        let folded = character.to_ascii_lowercase();
        if !matches!(folded, 'a'..='z' | '2'..='7') {
            return Err(PrincipalError::InvalidCharacter { character, position });
        }
        symbols.push(folded);
    }

    let payload = base32_decode(&symbols)?;
    if payload.len() <= CHECKSUM_LEN {
        return Err(PrincipalError::TooShort {
            length: payload.len(),
            minimum: CHECKSUM_LEN + 1,
        });
    }

    let (checksum, bytes) = payload.split_at(CHECKSUM_LEN);
    let expected = u32::from_be_bytes([checksum[0], checksum[1], checksum[2], checksum[3]]);
    let actual = crc32(bytes);
    if expected != actual {
        return Err(PrincipalError::ChecksumMismatch { expected, actual });
    }

    Ok(bytes.to_vec())
}

/// Lowercase RFC 4648 base-32 without padding
fn base32_encode(data: &[u8]) -> String {
    // BASE32_NOPAD emits the uppercase alphabet
    BASE32_NOPAD.encode(data).to_ascii_lowercase()
}

/// Inverse of [`base32_encode`] over symbols already checked against the alphabet
fn base32_decode(symbols: &str) -> Result<Vec<u8>, PrincipalError> {
    BASE32_NOPAD
        .decode(symbols.to_ascii_uppercase().as_bytes())
        .map_err(|e| PrincipalError::NonCanonical {
            position: e.position,
            reason: e.kind.to_string(),
        })
}
