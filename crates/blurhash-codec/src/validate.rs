//! Structural validation of BlurHash strings.

use crate::base83;
use crate::basis::{components_from_flag, hash_len, MAX_COMPONENTS};
use crate::error::{BlurhashError, Result};

fn malformed(hash: &str, reason: impl Into<String>) -> BlurhashError {
    BlurhashError::MalformedHash {
        hash: hash.to_owned(),
        reason: reason.into(),
    }
}

/// Check the charset, size flag and length of `hash`, returning its
/// component counts.
///
/// # Errors
///
/// [`BlurhashError::MalformedHash`] naming the first failed check.
///
/// # Examples
///
/// ```
/// use blurhash_codec::validate;
/// assert_eq!(validate("LEHV6nWB2yk8pyo0adR*.7kCMdnj").unwrap(), (4, 3));
/// assert!(validate("LEHV6nWB").is_err());
/// ```
pub fn validate(hash: &str) -> Result<(u32, u32)> {
    if !base83::is_base83(hash) {
        return Err(malformed(hash, "contains characters outside the base83 alphabet"));
    }

    let flag = hash
        .bytes()
        .next()
        .and_then(base83::digit_value)
        .ok_or_else(|| malformed(hash, "empty string"))?;

    let (components_x, components_y) = components_from_flag(u32::from(flag));
    if components_y > MAX_COMPONENTS {
        return Err(malformed(
            hash,
            format!("size flag {flag} implies {components_y} vertical components"),
        ));
    }

    let expected = hash_len(components_x, components_y);
    if hash.len() != expected {
        return Err(malformed(
            hash,
            format!(
                "length {} does not match {expected} for {components_x}x{components_y} components",
                hash.len()
            ),
        ));
    }

    Ok((components_x, components_y))
}

/// Returns `true` if `hash` is a structurally valid BlurHash.
///
/// ```
/// use blurhash_codec::is_valid_blurhash;
/// assert!(is_valid_blurhash("LlMF%n00%#MwS|WCWEM{R*bbWBbH"));
/// assert!(!is_valid_blurhash("invalid!"));
/// ```
pub fn is_valid_blurhash(hash: &str) -> bool {
    validate(hash).is_ok()
}
