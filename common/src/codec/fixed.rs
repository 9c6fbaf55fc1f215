//! Fixed-width big-endian integer codec.

use primitive_types::U256;

use crate::error::EncodingError;

/// Width in bytes of the integer type carried in memory
const WORD_BYTES: usize = 32;

/// Encodes `value` big-endian into exactly `length` bytes, left padded with
/// zeros. Fails when the value's minimal representation is longer.
pub fn encode(value: &U256, length: usize) -> Result<Vec<u8>, EncodingError> {
    let needed = (value.bits() + 7) / 8;
    if needed > length {
        return Err(EncodingError { needed, length });
    }

    let mut word = [0u8; WORD_BYTES];
    value.to_big_endian(&mut word);

    let mut out = vec![0u8; length];
    out[length - needed..].copy_from_slice(&word[WORD_BYTES - needed..]);
    Ok(out)
}

/// Interprets `bytes` as a big-endian unsigned integer. Any buffer is a valid
/// integer; `None` only when its significant content exceeds 256 bits, which
/// is wider than every field of the format.
pub fn decode(bytes: &[u8]) -> Option<U256> {
    let significant = strip_leading_zeros(bytes);
    if significant.len() > WORD_BYTES {
        return None;
    }
    Some(U256::from_big_endian(significant))
}

/// Bit-width of a big-endian buffer, ignoring leading zero bytes
pub fn bit_width(bytes: &[u8]) -> usize {
    let significant = strip_leading_zeros(bytes);
    match significant.first() {
        Some(first) => (significant.len() - 1) * 8 + (8 - first.leading_zeros() as usize),
        None => 0,
    }
}

fn strip_leading_zeros(bytes: &[u8]) -> &[u8] {
    let start = bytes.iter().position(|b| *b != 0).unwrap_or(bytes.len());
    &bytes[start..]
}
