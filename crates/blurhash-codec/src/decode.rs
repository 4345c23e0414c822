//! BlurHash decoding: parse the base83 fields back into cosine coefficients
//! and render them at the requested size.

use std::ops::Range;

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::base83;
use crate::basis::{
    components_from_flag, ComponentGrid, CosineTable, AC_DIGITS, AC_OFFSET, DC_DIGITS,
    MAX_COMPONENTS, MAX_VALUE_DIGITS, SIZE_FLAG_DIGITS,
};
use crate::color::{linear_to_srgb, sign_pow, srgb_to_linear};
use crate::error::{BlurhashError, Result};
use crate::pixels::{check_dimensions, PixelBuffer, PixelMode};
use crate::validate::validate;

/// Knobs for [`decode_with_options`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecodeOptions {
    /// AC contrast multiplier, at least 1.0.
    pub punch: f64,
    /// Output layout.
    pub mode: PixelMode,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        DecodeOptions {
            punch: 1.0,
            mode: PixelMode::Rgb,
        }
    }
}

impl DecodeOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn punch(mut self, punch: f64) -> Self {
        self.punch = punch;
        self
    }

    pub fn mode(mut self, mode: PixelMode) -> Self {
        self.mode = mode;
        self
    }
}

/// Read the component counts from the size flag of `hash`.
///
/// Only the first character and the minimum length are checked; use
/// [`validate`](crate::validate()) for a full structural check.
///
/// # Errors
///
/// [`BlurhashError::MalformedHash`] if the hash is shorter than 6 characters
/// or its first character is not a valid size flag.
///
/// # Examples
///
/// ```
/// use blurhash_codec::components;
/// assert_eq!(components("LEHV6nWB2yk8pyo0adR*.7kCMdnj").unwrap(), (4, 3));
/// ```
pub fn components(hash: &str) -> Result<(u32, u32)> {
    if hash.len() < AC_OFFSET {
        return Err(BlurhashError::MalformedHash {
            hash: hash.to_owned(),
            reason: format!("length {} is below the minimum of {AC_OFFSET}", hash.len()),
        });
    }
    let malformed = |reason: &str| BlurhashError::MalformedHash {
        hash: hash.to_owned(),
        reason: reason.to_owned(),
    };
    let flag = hash
        .bytes()
        .next()
        .and_then(base83::digit_value)
        .ok_or_else(|| malformed("size flag is not a base83 digit"))?;

    let (components_x, components_y) = components_from_flag(u32::from(flag));
    if components_y > MAX_COMPONENTS {
        return Err(malformed("size flag is out of range"));
    }
    Ok((components_x, components_y))
}

fn field(hash: &str, range: Range<usize>) -> Result<u64> {
    let digits = hash.get(range.clone()).ok_or_else(|| {
        BlurhashError::DecodeFailure(format!("field at {range:?} is out of bounds"))
    })?;
    base83::decode(digits).map_err(|e| BlurhashError::DecodeFailure(e.to_string()))
}

fn decode_dc(value: u64) -> [f64; 3] {
    [
        srgb_to_linear(((value >> 16) & 255) as u8),
        srgb_to_linear(((value >> 8) & 255) as u8),
        srgb_to_linear((value & 255) as u8),
    ]
}

fn decode_ac(value: u64, scale: f64) -> [f64; 3] {
    let channel = |q: u64| sign_pow((q as f64 - 9.0) / 9.0, 2.0) * scale;
    [
        channel(value / (19 * 19)),
        channel((value / 19) % 19),
        channel(value % 19),
    ]
}

/// Parse the fields of a hash whose component counts are already known.
fn parse_grid(
    hash: &str,
    components_x: u32,
    components_y: u32,
    punch: f64,
) -> Result<ComponentGrid> {
    let n = (components_x * components_y) as usize;

    let max_start = SIZE_FLAG_DIGITS;
    let dc_start = max_start + MAX_VALUE_DIGITS;
    let quantized_max = field(hash, max_start..dc_start)?;
    let maximum_value = (quantized_max as f64 + 1.0) / 166.0;
    trace!(quantized_max, "maximum AC value");

    let mut cells = Vec::with_capacity(n);
    cells.push(decode_dc(field(hash, dc_start..dc_start + DC_DIGITS)?));

    for k in 1..n {
        let start = AC_OFFSET + (k - 1) * AC_DIGITS;
        let value = field(hash, start..start + AC_DIGITS)?;
        if value >= 19 * 19 * 19 {
            return Err(BlurhashError::DecodeFailure(format!(
                "AC component {k} has out-of-range value {value}"
            )));
        }
        cells.push(decode_ac(value, maximum_value * punch));
    }

    Ok(ComponentGrid::from_cells(components_x, components_y, cells))
}

impl ComponentGrid {
    /// Recover the coefficients stored in `hash`, with AC terms scaled by `punch`.
    ///
    /// # Errors
    ///
    /// [`BlurhashError::MalformedHash`] if the hash fails validation,
    /// [`BlurhashError::DecodeFailure`] if a field cannot be parsed.
    pub fn from_hash(hash: &str, punch: f64) -> Result<Self> {
        let (components_x, components_y) = validate(hash)?;
        parse_grid(hash, components_x, components_y, punch)
    }
}

fn render(grid: &ComponentGrid, width: u32, height: u32, mode: PixelMode) -> Vec<u8> {
    let cx = grid.components_x() as usize;
    let cy = grid.components_y() as usize;
    let cos_x = CosineTable::new(grid.components_x(), width);
    let cos_y = CosineTable::new(grid.components_y(), height);
    let cells = grid.cells();

    let channels = mode.channels();
    let row_len = width as usize * channels;
    let mut data = vec![0u8; row_len * height as usize];

    let render_row = |(y, row): (usize, &mut [u8])| {
        for (x, px) in row.chunks_exact_mut(channels).enumerate() {
            let mut sum = [0.0f64; 3];
            for j in 0..cy {
                let by = cos_y.get(j, y);
                for i in 0..cx {
                    let basis = cos_x.get(i, x) * by;
                    let colour = &cells[j * cx + i];
                    sum[0] += colour[0] * basis;
                    sum[1] += colour[1] * basis;
                    sum[2] += colour[2] * basis;
                }
            }

            px[0] = linear_to_srgb(sum[0]);
            px[1] = linear_to_srgb(sum[1]);
            px[2] = linear_to_srgb(sum[2]);
            if channels == 4 {
                px[3] = 255;
            }
        }
    };

    #[cfg(feature = "parallel")]
    data.par_chunks_mut(row_len).enumerate().for_each(render_row);
    #[cfg(not(feature = "parallel"))]
    data.chunks_mut(row_len).enumerate().for_each(render_row);

    data
}

/// Decode `hash` into a `width` x `height` image.
///
/// Arguments are checked before the hash is looked at, then the hash must
/// pass [`validate`](crate::validate()).
///
/// # Errors
///
/// - [`BlurhashError::InvalidArgument`] for zero or oversized dimensions, or a
///   punch that is below 1 or not finite.
/// - [`BlurhashError::MalformedHash`] if the hash is structurally invalid.
/// - [`BlurhashError::DecodeFailure`] if a validated hash still cannot be parsed,
///   including an AC pair above 6858 (such as `~~`) that packs no valid triple.
///
/// # Examples
///
/// ```
/// use blurhash_codec::{decode, PixelMode};
/// let image = decode("LEHV6nWB2yk8pyo0adR*.7kCMdnj", 32, 32, 1.0, PixelMode::Rgba).unwrap();
/// assert_eq!(image.as_bytes().len(), 32 * 32 * 4);
/// ```
pub fn decode(
    hash: &str,
    width: u32,
    height: u32,
    punch: f64,
    mode: PixelMode,
) -> Result<PixelBuffer> {
    decode_with_options(hash, width, height, &DecodeOptions { punch, mode })
}

/// [`decode`] with the optional parameters bundled in [`DecodeOptions`].
///
/// ```
/// use blurhash_codec::{decode_with_options, DecodeOptions};
/// let image = decode_with_options("00TI:j", 2, 2, &DecodeOptions::default()).unwrap();
/// assert_eq!(image.pixel(1, 1), Some(&[255, 0, 0][..]));
/// ```
pub fn decode_with_options(
    hash: &str,
    width: u32,
    height: u32,
    options: &DecodeOptions,
) -> Result<PixelBuffer> {
    check_dimensions(width, height)?;
    if !options.punch.is_finite() || options.punch < 1.0 {
        return Err(BlurhashError::invalid_argument(
            "punch",
            format!("{} is not a finite value >= 1", options.punch),
        ));
    }

    debug!(
        hash,
        width,
        height,
        punch = options.punch,
        mode = ?options.mode,
        "decoding blurhash"
    );

    let (components_x, components_y) = validate(hash)?;
    let grid = parse_grid(hash, components_x, components_y, options.punch)?;
    let data = render(&grid, width, height, options.mode);

    debug!(bytes = data.len(), "decoded blurhash");
    Ok(PixelBuffer::from_raw(data, width, height, options.mode))
}
