//! # blurhash-codec
//!
//! BlurHash encoding, decoding and validation in pure Rust.
//!
//! [BlurHash](https://blurha.sh/) stores a blurred approximation of an image
//! as a short base83 string: the average color plus a handful of cosine
//! components. The codec works on raw 8-bit RGB(A) buffers; loading and
//! resizing real image files is left to an image library.
//!
//! ## Quick Start
//!
//! ```
//! use blurhash_codec::{decode, encode, is_valid_blurhash, PixelMode, PixelView};
//!
//! // Encode: image pixels -> BlurHash string
//! let pixels = vec![128u8; 4 * 4 * 3]; // 4x4 gray image
//! let view = PixelView::new(&pixels, 4, 4, PixelMode::Rgb).unwrap();
//! let hash = encode(&view, 4, 3).unwrap();
//! assert!(is_valid_blurhash(&hash));
//!
//! // Decode: BlurHash string -> image pixels
//! let image = decode(&hash, 32, 32, 1.0, PixelMode::Rgba).unwrap();
//! assert_eq!(image.as_bytes().len(), 32 * 32 * 4);
//! ```
//!
//! ## Features
//!
//! - `parallel`: spread component analysis and row rendering over the rayon
//!   thread pool. Output is identical to the single-threaded build.

pub mod base83;
pub mod basis;
pub mod color;
pub mod error;
pub mod pixels;

mod decode;
mod encode;
mod validate;

// Re-export primary functions at crate root.
pub use basis::ComponentGrid;
pub use decode::{components, decode, decode_with_options, DecodeOptions};
pub use encode::{encode, encode_rgb, suggested_components};
pub use error::{BlurhashError, Result};
pub use pixels::{PixelBuffer, PixelMode, PixelView, MAX_DIMENSION};
pub use validate::{is_valid_blurhash, validate};
