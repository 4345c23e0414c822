//! sRGB transfer functions and the sign-preserving power used for AC
//! quantization.
//!
//! The basis transform runs in linear light. 8-bit samples are linearized
//! through a 256-entry table built once on first use; the way back is
//! computed directly so that encoder output does not depend on a table
//! resolution.

use std::sync::LazyLock;

/// sRGB byte -> linear value in `[0.0, 1.0]`.
static SRGB_TO_LINEAR: LazyLock<[f64; 256]> = LazyLock::new(|| {
    let mut table = [0.0f64; 256];
    for (i, slot) in table.iter_mut().enumerate() {
        *slot = eotf(i as f64 / 255.0);
    }
    table
});

/// sRGB EOTF on a normalized sample.
#[inline]
fn eotf(v: f64) -> f64 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

/// sRGB OETF on a linear value already clamped to `[0.0, 1.0]`.
#[inline]
fn oetf(l: f64) -> f64 {
    if l <= 0.003_130_8 {
        l * 12.92
    } else {
        1.055 * l.powf(1.0 / 2.4) - 0.055
    }
}

/// Convert an sRGB byte value to linear light.
///
/// # Examples
///
/// ```
/// use blurhash_codec::color::srgb_to_linear;
/// assert_eq!(srgb_to_linear(0), 0.0);
/// assert!((srgb_to_linear(255) - 1.0).abs() < 1e-12);
/// ```
#[inline]
pub fn srgb_to_linear(value: u8) -> f64 {
    SRGB_TO_LINEAR[value as usize]
}

/// Convert a linear value to an sRGB byte, clamping to `[0.0, 1.0]` first.
///
/// NaN maps to 0.
///
/// # Examples
///
/// ```
/// use blurhash_codec::color::linear_to_srgb;
/// assert_eq!(linear_to_srgb(-0.25), 0);
/// assert_eq!(linear_to_srgb(1.0), 255);
/// assert_eq!(linear_to_srgb(4.0), 255);
/// ```
#[inline]
pub fn linear_to_srgb(value: f64) -> u8 {
    let clamped = if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    };
    // `as u8` saturates, so a result a hair above 255.5 still lands on 255.
    (oetf(clamped) * 255.0 + 0.5) as u8
}

/// Compute `sign(value) * |value|^exp`.
///
/// # Examples
///
/// ```
/// use blurhash_codec::color::sign_pow;
/// assert!((sign_pow(-4.0, 0.5) + 2.0).abs() < 1e-12);
/// assert!((sign_pow(0.5, 2.0) - 0.25).abs() < 1e-12);
/// ```
#[inline]
pub fn sign_pow(value: f64, exp: f64) -> f64 {
    value.abs().powf(exp).copysign(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_linear_values() {
        assert!((srgb_to_linear(128) - 0.215_860_5).abs() < 1e-6);
        // Linear segment: 10 / 255 / 12.92.
        assert!((srgb_to_linear(10) - 10.0 / 255.0 / 12.92).abs() < 1e-15);
    }

    #[test]
    fn test_byte_roundtrip_is_exact() {
        for i in 0..=255u8 {
            assert_eq!(linear_to_srgb(srgb_to_linear(i)), i, "byte {i}");
        }
    }

    #[test]
    fn test_linearization_is_monotonic() {
        for i in 1..=255u8 {
            assert!(srgb_to_linear(i) > srgb_to_linear(i - 1), "at {i}");
        }
    }

    #[test]
    fn test_gamma_clamps() {
        assert_eq!(linear_to_srgb(f64::NAN), 0);
        assert_eq!(linear_to_srgb(f64::NEG_INFINITY), 0);
        assert_eq!(linear_to_srgb(f64::INFINITY), 255);
        assert_eq!(linear_to_srgb(0.5), 188);
    }

    #[test]
    fn test_sign_pow_preserves_sign() {
        assert_eq!(sign_pow(0.0, 0.5), 0.0);
        assert!((sign_pow(9.0, 0.5) - 3.0).abs() < 1e-12);
        assert!((sign_pow(-3.0, 2.0) + 9.0).abs() < 1e-12);
        assert!(sign_pow(-0.0, 0.5).is_sign_negative());
    }
}
