//! Base83 integer <-> text conversion.
//!
//! Every field of a BlurHash is a big-endian base83 number written with a
//! fixed 83-character alphabet. Both the encoder and the decoder go through
//! this module; the validator uses [`is_base83`] for its charset check.

use crate::error::{BlurhashError, Result};

/// The 83-character alphabet, in digit order.
pub const ALPHABET: &[u8; 83] =
    b"0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz#$%*+,-.:;=?@[]^_{|}~";

const INVALID: u8 = u8::MAX;

const fn build_digit_table() -> [u8; 128] {
    let mut table = [INVALID; 128];
    let mut i = 0;
    while i < ALPHABET.len() {
        table[ALPHABET[i] as usize] = i as u8;
        i += 1;
    }
    table
}

/// ASCII byte -> digit value, `INVALID` for bytes outside the alphabet.
static DIGITS: [u8; 128] = build_digit_table();

/// Look up the digit value of a single byte.
///
/// ```
/// use blurhash_codec::base83::digit_value;
/// assert_eq!(digit_value(b'A'), Some(10));
/// assert_eq!(digit_value(b'!'), None);
/// ```
#[inline]
pub fn digit_value(byte: u8) -> Option<u8> {
    match DIGITS.get(byte as usize) {
        Some(&INVALID) | None => None,
        Some(&digit) => Some(digit),
    }
}

/// Returns `true` if every byte of `s` belongs to the alphabet.
pub fn is_base83(s: &str) -> bool {
    s.bytes().all(|b| digit_value(b).is_some())
}

/// Decode a base83 string of any length into an integer.
///
/// # Errors
///
/// [`BlurhashError::InvalidBase83Character`] for a character outside the
/// alphabet, [`BlurhashError::Base83Overflow`] if the value exceeds `u64`.
///
/// # Examples
///
/// ```
/// use blurhash_codec::base83::decode;
/// assert_eq!(decode("0").unwrap(), 0);
/// assert_eq!(decode("~").unwrap(), 82);
/// assert_eq!(decode("10").unwrap(), 83);
/// ```
pub fn decode(s: &str) -> Result<u64> {
    s.chars().try_fold(0u64, |acc, ch| {
        let digit = u8::try_from(ch)
            .ok()
            .and_then(digit_value)
            .ok_or(BlurhashError::InvalidBase83Character(ch))?;
        acc.checked_mul(83)
            .and_then(|v| v.checked_add(u64::from(digit)))
            .ok_or(BlurhashError::Base83Overflow {
                value: u64::MAX,
                digits: s.len(),
            })
    })
}

/// Encode `value` as exactly `digits` base83 characters, zero padded.
///
/// # Errors
///
/// [`BlurhashError::Base83Overflow`] if `value >= 83^digits`.
///
/// # Examples
///
/// ```
/// use blurhash_codec::base83::encode;
/// assert_eq!(encode(0, 4).unwrap(), "0000");
/// assert_eq!(encode(82, 1).unwrap(), "~");
/// assert!(encode(7000, 2).is_err());
/// ```
pub fn encode(value: u64, digits: usize) -> Result<String> {
    let mut out = String::with_capacity(digits);
    encode_into(value, digits, &mut out)?;
    Ok(out)
}

/// Append the base83 form of `value` to `out`. See [`encode`].
pub fn encode_into(value: u64, digits: usize, out: &mut String) -> Result<()> {
    let fits = u32::try_from(digits)
        .ok()
        .and_then(|d| 83u64.checked_pow(d))
        .map_or(true, |limit| value < limit);
    if !fits {
        return Err(BlurhashError::Base83Overflow { value, digits });
    }

    let mut buf = vec![ALPHABET[0]; digits];
    let mut remaining = value;
    for slot in buf.iter_mut().rev() {
        *slot = ALPHABET[(remaining % 83) as usize];
        remaining /= 83;
    }
    out.extend(buf.into_iter().map(char::from));
    Ok(())
}
