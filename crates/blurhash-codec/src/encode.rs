//! BlurHash encoding: project the image onto the cosine basis, quantize the
//! coefficients and write them out as base83.

#[cfg(feature = "parallel")]
use rayon::prelude::*;
use tracing::{debug, trace};

use crate::base83;
use crate::basis::{
    check_component_count, hash_len, size_flag, ComponentGrid, CosineTable, AC_DIGITS, DC_DIGITS,
    MAX_COMPONENTS, MAX_VALUE_DIGITS, MIN_COMPONENTS, SIZE_FLAG_DIGITS,
};
use crate::color::{linear_to_srgb, sign_pow, srgb_to_linear};
use crate::error::{BlurhashError, Result};
use crate::pixels::{PixelMode, PixelView};

impl ComponentGrid {
    /// Compute the linear-RGB coefficients of `pixels` for an
    /// `components_x` x `components_y` grid.
    ///
    /// Alpha samples, if any, are skipped.
    ///
    /// # Errors
    ///
    /// [`BlurhashError::InvalidComponentCount`] if either count is outside 1..=9.
    pub fn analyze(pixels: &PixelView<'_>, components_x: u32, components_y: u32) -> Result<Self> {
        check_component_count(components_x, components_y)?;

        let w = pixels.width() as usize;
        let h = pixels.height() as usize;
        let channels = pixels.mode().channels();

        let linear: Vec<[f64; 3]> = (0..h)
            .flat_map(|y| pixels.row(y).chunks_exact(channels))
            .map(|px| {
                [
                    srgb_to_linear(px[0]),
                    srgb_to_linear(px[1]),
                    srgb_to_linear(px[2]),
                ]
            })
            .collect();

        let cos_x = CosineTable::new(components_x, pixels.width());
        let cos_y = CosineTable::new(components_y, pixels.height());
        let area = w as f64 * h as f64;
        let cx = components_x as usize;

        let component = |k: usize| -> [f64; 3] {
            let (i, j) = (k % cx, k / cx);
            let normalisation = if k == 0 { 1.0 } else { 2.0 };
            let row_basis = cos_x.row(i);

            let mut sum = [0.0f64; 3];
            for (y, row) in linear.chunks_exact(w).enumerate() {
                let cy = cos_y.get(j, y);
                for (px, &bx) in row.iter().zip(row_basis) {
                    let basis = bx * cy;
                    sum[0] += basis * px[0];
                    sum[1] += basis * px[1];
                    sum[2] += basis * px[2];
                }
            }

            let scale = normalisation / area;
            [sum[0] * scale, sum[1] * scale, sum[2] * scale]
        };

        let n = (components_x * components_y) as usize;
        #[cfg(feature = "parallel")]
        let cells = (0..n).into_par_iter().map(component).collect();
        #[cfg(not(feature = "parallel"))]
        let cells = (0..n).map(component).collect();

        Ok(ComponentGrid::from_cells(components_x, components_y, cells))
    }
}

fn encode_dc([r, g, b]: [f64; 3]) -> u64 {
    (u64::from(linear_to_srgb(r)) << 16)
        | (u64::from(linear_to_srgb(g)) << 8)
        | u64::from(linear_to_srgb(b))
}

fn encode_ac(value: [f64; 3], maximum_value: f64) -> u64 {
    let quant = |v: f64| {
        (sign_pow(v / maximum_value, 0.5) * 9.0 + 9.5)
            .floor()
            .clamp(0.0, 18.0) as u64
    };
    quant(value[0]) * 19 * 19 + quant(value[1]) * 19 + quant(value[2])
}

/// Serialize a component grid into its hash string.
pub(crate) fn encode_grid(grid: &ComponentGrid) -> Result<String> {
    let (cx, cy) = (grid.components_x(), grid.components_y());
    let mut hash = String::with_capacity(hash_len(cx, cy));

    base83::encode_into(u64::from(size_flag(cx, cy)), SIZE_FLAG_DIGITS, &mut hash)?;

    let maximum_value = if grid.ac().is_empty() {
        base83::encode_into(0, MAX_VALUE_DIGITS, &mut hash)?;
        1.0
    } else {
        let quantized = (grid.max_ac_magnitude() * 166.0 - 0.5)
            .floor()
            .clamp(0.0, 82.0) as u64;
        trace!(quantized, "quantized maximum AC value");
        base83::encode_into(quantized, MAX_VALUE_DIGITS, &mut hash)?;
        (quantized as f64 + 1.0) / 166.0
    };

    let dc = encode_dc(grid.dc());
    trace!(dc, "average color");
    base83::encode_into(dc, DC_DIGITS, &mut hash)?;

    for &ac in grid.ac() {
        base83::encode_into(encode_ac(ac, maximum_value), AC_DIGITS, &mut hash)?;
    }

    Ok(hash)
}

/// Encode an RGB or RGBA image into a BlurHash string.
///
/// Component counts are validated before any pixel is read.
///
/// # Errors
///
/// [`BlurhashError::InvalidComponentCount`] if either count is outside 1..=9.
///
/// # Examples
///
/// ```
/// use blurhash_codec::{encode, PixelMode, PixelView};
/// let pixels = [255u8, 0, 0, 255].repeat(4);
/// let view = PixelView::new(&pixels, 2, 2, PixelMode::Rgba).unwrap();
/// assert_eq!(encode(&view, 1, 1).unwrap(), "00TI:j");
/// ```
pub fn encode(pixels: &PixelView<'_>, components_x: u32, components_y: u32) -> Result<String> {
    check_component_count(components_x, components_y)?;
    debug!(
        width = pixels.width(),
        height = pixels.height(),
        components_x,
        components_y,
        "encoding blurhash"
    );

    let grid = ComponentGrid::analyze(pixels, components_x, components_y)?;
    let hash = encode_grid(&grid)?;

    debug!(%hash, "encoded blurhash");
    Ok(hash)
}

/// Encode a tightly packed RGB buffer of exactly `width * height * 3` bytes.
///
/// # Errors
///
/// [`BlurhashError::InvalidComponentCount`] for out-of-range counts,
/// [`BlurhashError::InvalidArgument`] for bad dimensions or buffer length.
///
/// # Examples
///
/// ```
/// use blurhash_codec::encode_rgb;
/// let hash = encode_rgb(&[0u8; 4 * 4 * 3], 4, 4, 4, 3).unwrap();
/// assert_eq!(hash.len(), 28);
/// ```
pub fn encode_rgb(
    pixels: &[u8],
    width: u32,
    height: u32,
    components_x: u32,
    components_y: u32,
) -> Result<String> {
    check_component_count(components_x, components_y)?;

    let expected = width as usize * height as usize * 3;
    if pixels.len() != expected {
        return Err(BlurhashError::invalid_argument(
            "pixels",
            format!(
                "buffer length {} does not match {width}x{height}x3 = {expected}",
                pixels.len()
            ),
        ));
    }

    let view = PixelView::new(pixels, width, height, PixelMode::Rgb)?;
    encode(&view, components_x, components_y)
}

/// Pick component counts that follow the aspect ratio of a `width` x
/// `height` image, giving the longer axis `max` components.
///
/// `max` is clamped to 1..=9 and so is the shorter axis.
///
/// ```
/// use blurhash_codec::suggested_components;
/// assert_eq!(suggested_components(640, 480, 4), (4, 3));
/// assert_eq!(suggested_components(100, 400, 9), (2, 9));
/// ```
pub fn suggested_components(width: u32, height: u32, max: u32) -> (u32, u32) {
    let max = max.clamp(MIN_COMPONENTS, MAX_COMPONENTS);
    if width == 0 || height == 0 {
        return (max, max);
    }

    let ratio = f64::from(width) / f64::from(height);
    let scaled = |v: f64| (v.round() as u32).clamp(MIN_COMPONENTS, max);
    if ratio < 1.0 {
        (scaled(f64::from(max) * ratio), max)
    } else {
        (max, scaled(f64::from(max) / ratio))
    }
}
