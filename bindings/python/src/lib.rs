use blurhash_codec::{BlurhashError, PixelView};
use pyo3::create_exception;
use pyo3::exceptions::{PyException, PyValueError};
use pyo3::prelude::*;
use pyo3::types::PyBytes;

create_exception!(
    blurhash,
    BlurhashDecodeError,
    PyException,
    "A blurhash passed validation but could not be decoded."
);

/// Output layout of `decode`.
#[pyclass(eq, eq_int)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[allow(clippy::upper_case_acronyms)]
enum PixelMode {
    RGB = 3,
    RGBA = 4,
}

impl From<PixelMode> for blurhash_codec::PixelMode {
    fn from(mode: PixelMode) -> Self {
        match mode {
            PixelMode::RGB => blurhash_codec::PixelMode::Rgb,
            PixelMode::RGBA => blurhash_codec::PixelMode::Rgba,
        }
    }
}

/// `DecodeFailure` gets its own exception; everything else is a bad argument.
fn to_py_err(e: BlurhashError) -> PyErr {
    match e {
        BlurhashError::DecodeFailure(_) => BlurhashDecodeError::new_err(e.to_string()),
        _ => PyValueError::new_err(e.to_string()),
    }
}

/// Encode image pixel data into a BlurHash string.
///
/// Args:
///     data: Raw 8-bit pixel bytes, row-major, RGB or RGBA.
///     width: Image width in pixels.
///     height: Image height in pixels.
///     x_components: Number of horizontal components (1..=9).
///     y_components: Number of vertical components (1..=9).
///     channels: Samples per pixel in `data`, 3 or 4. Alpha is ignored.
///
/// Returns:
///     The BlurHash string.
#[pyfunction]
#[pyo3(signature = (data, width, height, x_components = 4, y_components = 3, channels = 3))]
fn encode(
    data: &[u8],
    width: u32,
    height: u32,
    x_components: u32,
    y_components: u32,
    channels: usize,
) -> PyResult<String> {
    let mode = blurhash_codec::PixelMode::try_from(channels).map_err(to_py_err)?;
    let view = PixelView::new(data, width, height, mode).map_err(to_py_err)?;
    blurhash_codec::encode(&view, x_components, y_components).map_err(to_py_err)
}

/// Decode a BlurHash string into raw pixel data.
///
/// Args:
///     blurhash: The BlurHash string to decode.
///     width: Output width in pixels.
///     height: Output height in pixels.
///     punch: AC contrast multiplier, at least 1.
///     mode: PixelMode.RGB or PixelMode.RGBA.
///
/// Returns:
///     A bytes object of length width * height * channels.
///
/// Raises:
///     ValueError: on invalid arguments or a malformed blurhash.
///     BlurhashDecodeError: if a valid-looking blurhash cannot be decoded.
#[pyfunction]
#[pyo3(signature = (blurhash, width, height, punch = 1.0, mode = PixelMode::RGB))]
fn decode(
    py: Python<'_>,
    blurhash: &str,
    width: u32,
    height: u32,
    punch: f64,
    mode: PixelMode,
) -> PyResult<Py<PyBytes>> {
    let image = py
        .allow_threads(|| blurhash_codec::decode(blurhash, width, height, punch, mode.into()))
        .map_err(to_py_err)?;
    Ok(PyBytes::new(py, image.as_bytes()).into())
}

/// Return True if the string is a structurally valid blurhash.
#[pyfunction]
fn is_valid_blurhash(blurhash: &str) -> bool {
    blurhash_codec::is_valid_blurhash(blurhash)
}

/// Extract the number of X and Y components from a BlurHash string.
#[pyfunction]
fn components(blurhash: &str) -> PyResult<(u32, u32)> {
    blurhash_codec::components(blurhash).map_err(to_py_err)
}

/// BlurHash encoding and decoding.
#[pymodule]
fn blurhash(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(encode, m)?)?;
    m.add_function(wrap_pyfunction!(decode, m)?)?;
    m.add_function(wrap_pyfunction!(is_valid_blurhash, m)?)?;
    m.add_function(wrap_pyfunction!(components, m)?)?;
    m.add_class::<PixelMode>()?;
    m.add("BlurhashDecodeError", m.py().get_type::<BlurhashDecodeError>())?;
    Ok(())
}
