//! Raw 8-bit pixel buffers exchanged with the image library.
//!
//! The encoder reads a borrowed [`PixelView`], which may carry padded rows.
//! The decoder produces an owned, tightly packed [`PixelBuffer`].

use crate::error::{BlurhashError, Result};

/// Largest accepted width or height, for both encoder input and decoder output.
pub const MAX_DIMENSION: u32 = 10_000;

/// Interleaved sample layout of a pixel buffer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PixelMode {
    /// Three samples per pixel.
    #[default]
    Rgb,
    /// Four samples per pixel. Alpha is ignored when encoding and written as
    /// 255 when decoding.
    Rgba,
}

impl PixelMode {
    /// Number of samples per pixel.
    pub const fn channels(self) -> usize {
        match self {
            PixelMode::Rgb => 3,
            PixelMode::Rgba => 4,
        }
    }
}

impl TryFrom<usize> for PixelMode {
    type Error = BlurhashError;

    fn try_from(channels: usize) -> Result<Self> {
        match channels {
            3 => Ok(PixelMode::Rgb),
            4 => Ok(PixelMode::Rgba),
            n => Err(BlurhashError::invalid_argument(
                "mode",
                format!("{n} channels per pixel (expected 3 or 4)"),
            )),
        }
    }
}

pub(crate) fn check_dimensions(width: u32, height: u32) -> Result<()> {
    for (name, value) in [("width", width), ("height", height)] {
        if value == 0 {
            return Err(BlurhashError::invalid_argument(name, "must be > 0"));
        }
        if value > MAX_DIMENSION {
            return Err(BlurhashError::invalid_argument(
                name,
                format!("{value} exceeds the maximum of {MAX_DIMENSION}"),
            ));
        }
    }
    Ok(())
}

/// A borrowed, row-major view over 8-bit RGB or RGBA samples.
#[derive(Debug, Clone, Copy)]
pub struct PixelView<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
    mode: PixelMode,
    stride: usize,
}

impl<'a> PixelView<'a> {
    /// View over tightly packed rows (`stride == width * channels`).
    ///
    /// ```
    /// use blurhash_codec::{PixelMode, PixelView};
    /// let data = [0u8; 2 * 2 * 4];
    /// let view = PixelView::new(&data, 2, 2, PixelMode::Rgba).unwrap();
    /// assert_eq!(view.stride(), 8);
    /// ```
    pub fn new(data: &'a [u8], width: u32, height: u32, mode: PixelMode) -> Result<Self> {
        let stride = width as usize * mode.channels();
        Self::with_stride(data, width, height, mode, stride)
    }

    /// View over rows that start every `stride` bytes.
    ///
    /// The final row only needs `width * channels` bytes, so a buffer cut
    /// right after the last pixel is accepted.
    ///
    /// # Errors
    ///
    /// [`BlurhashError::InvalidArgument`] for zero or oversized dimensions, a
    /// stride shorter than one row, or a buffer too short for the layout.
    pub fn with_stride(
        data: &'a [u8],
        width: u32,
        height: u32,
        mode: PixelMode,
        stride: usize,
    ) -> Result<Self> {
        check_dimensions(width, height)?;

        let row_len = width as usize * mode.channels();
        if stride < row_len {
            return Err(BlurhashError::invalid_argument(
                "stride",
                format!("{stride} is shorter than a row of {row_len} bytes"),
            ));
        }

        let required = stride
            .checked_mul(height as usize - 1)
            .and_then(|v| v.checked_add(row_len))
            .ok_or_else(|| BlurhashError::invalid_argument("stride", "buffer size overflows"))?;
        if data.len() < required {
            return Err(BlurhashError::invalid_argument(
                "pixels",
                format!(
                    "buffer holds {} bytes, {width}x{height} with stride {stride} needs {required}",
                    data.len()
                ),
            ));
        }

        Ok(PixelView {
            data,
            width,
            height,
            mode,
            stride,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mode(&self) -> PixelMode {
        self.mode
    }

    /// Distance in bytes between the starts of two consecutive rows.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Samples of row `y`, without the padding.
    #[inline]
    pub(crate) fn row(&self, y: usize) -> &'a [u8] {
        let start = y * self.stride;
        &self.data[start..start + self.width as usize * self.mode.channels()]
    }
}

/// An owned, tightly packed pixel buffer produced by the decoder.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    data: Vec<u8>,
    width: u32,
    height: u32,
    mode: PixelMode,
}

impl PixelBuffer {
    pub(crate) fn from_raw(data: Vec<u8>, width: u32, height: u32, mode: PixelMode) -> Self {
        debug_assert_eq!(
            data.len(),
            width as usize * height as usize * mode.channels()
        );
        PixelBuffer {
            data,
            width,
            height,
            mode,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn mode(&self) -> PixelMode {
        self.mode
    }

    /// Raw interleaved samples, row-major, top to bottom.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// Samples of the pixel at `(x, y)`, or `None` when out of bounds.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        if x >= self.width || y >= self.height {
            return None;
        }
        let channels = self.mode.channels();
        let start = (y as usize * self.width as usize + x as usize) * channels;
        self.data.get(start..start + channels)
    }

    /// Borrow the buffer as encoder input.
    pub fn view(&self) -> PixelView<'_> {
        PixelView {
            data: &self.data,
            width: self.width,
            height: self.height,
            mode: self.mode,
            stride: self.width as usize * self.mode.channels(),
        }
    }
}
