//! Big-integer positional codec over arbitrary alphabets.
//!
//! Shared by the formats whose reference encodings (KSUID base62, ShortUUID
//! base57) have no dedicated codec crate. Values are treated as unsigned
//! big-endian integers, so leading zero bytes collapse unless the caller pads.

use num_bigint::BigUint;

/// Decode `input` against `alphabet`, returning the big-endian bytes.
///
/// Returns `None` when a character is outside the alphabet.
pub fn decode(input: &str, alphabet: &[u8]) -> Option<Vec<u8>> {
    let base = BigUint::from(alphabet.len());
    let mut num = BigUint::from(0u8);
    for ch in input.bytes() {
        let idx = alphabet.iter().position(|&a| a == ch)?;
        num = num * &base + BigUint::from(idx);
    }
    Some(num.to_bytes_be())
}

/// Decode to exactly `width` bytes, left-padding with zeros.
///
/// Returns `None` on a bad character or when the value overflows `width`.
pub fn decode_fixed(input: &str, alphabet: &[u8], width: usize) -> Option<Vec<u8>> {
    let bytes = decode(input, alphabet)?;
    if bytes.len() > width {
        return None;
    }
    let mut out = vec![0u8; width - bytes.len()];
    out.extend_from_slice(&bytes);
    Some(out)
}

/// Encode big-endian bytes against `alphabet`.
pub fn encode(data: &[u8], alphabet: &[u8]) -> String {
    let base = BigUint::from(alphabet.len());
    let zero = BigUint::from(0u8);
    let mut num = BigUint::from_bytes_be(data);
    let mut out = Vec::new();
    while num > zero {
        let rem = &num % &base;
        num = &num / &base;
        let idx = rem.iter_u32_digits().next().unwrap_or(0) as usize;
        out.push(alphabet[idx]);
    }
    out.reverse();
    String::from_utf8(out).unwrap_or_default()
}

/// Encode to exactly `width` characters, left-padding with the zero symbol.
pub fn encode_fixed(data: &[u8], alphabet: &[u8], width: usize) -> String {
    let mut s = encode(data, alphabet);
    while s.len() < width {
        s.insert(0, alphabet[0] as char);
    }
    s
}
