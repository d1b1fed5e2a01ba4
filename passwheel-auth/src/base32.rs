//! Strict base32 codec for secret transport.
//!
//! RFC 4648 alphabet (A–Z, 2–7), specialised to the 20-byte secret size:
//! 20 bytes is exactly 160 bits, so the encoded form is always 32 symbols
//! and padding never arises. Decoding folds ASCII case; encoding emits the
//! uppercase canonical form. Anything outside the alphabet is rejected,
//! including the easily-confused digits 0, 1, 8 and 9 and the `=` pad.

use crate::secret::{ENCODED_LEN, SECRET_LEN, SecretError};

const ALPHABET: &[u8; 32] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ234567";

/// Encode a secret as its 32-symbol uppercase canonical form.
pub(crate) fn encode(bytes: &[u8; SECRET_LEN]) -> String {
    let mut out = String::with_capacity(ENCODED_LEN);
    // 5 bytes in, 8 symbols out per block.
    for chunk in bytes.chunks_exact(5) {
        let mut acc = 0u64;
        for &byte in chunk {
            acc = (acc << 8) | u64::from(byte);
        }
        for slot in (0..8).rev() {
            out.push(char::from(ALPHABET[((acc >> (slot * 5)) & 0x1f) as usize]));
        }
    }
    out
}

/// Decode a 32-symbol base32 string into secret bytes.
///
/// # Errors
///
/// Returns `SecretError::InvalidLength` when the input is not exactly
/// 32 bytes long, or `SecretError::InvalidCharacter` for the first symbol
/// outside A–Z a–z 2–7.
pub(crate) fn decode(input: &str) -> Result<[u8; SECRET_LEN], SecretError> {
    if input.len() != ENCODED_LEN {
        return Err(SecretError::InvalidLength {
            expected: ENCODED_LEN,
            actual: input.len(),
        });
    }

    let mut out = [0u8; SECRET_LEN];
    for (block, chunk) in input.as_bytes().chunks_exact(8).enumerate() {
        let mut acc = 0u64;
        for &symbol in chunk {
            acc = (acc << 5) | u64::from(symbol_value(symbol)?);
        }
        // 40 payload bits live in the low 5 bytes of the accumulator.
        out[block * 5..(block + 1) * 5].copy_from_slice(&acc.to_be_bytes()[3..]);
    }
    Ok(out)
}

fn symbol_value(symbol: u8) -> Result<u8, SecretError> {
    match symbol {
        b'A'..=b'Z' => Ok(symbol - b'A'),
        b'a'..=b'z' => Ok(symbol - b'a'),
        b'2'..=b'7' => Ok(symbol - b'2' + 26),
        _ => Err(SecretError::InvalidCharacter {
            character: char::from(symbol),
        }),
    }
}
