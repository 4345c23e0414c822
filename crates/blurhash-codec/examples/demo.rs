//! BlurHash Demo - Encode and decode example
//!
//! Run with: RUST_LOG=blurhash_codec=trace cargo run --example demo

use blurhash_codec::{
    components, decode, encode, is_valid_blurhash, suggested_components, PixelMode, PixelView,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), blurhash_codec::BlurhashError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== BlurHash Demo ===\n");

    // A 12x8 RGBA gradient: red grows to the right, green downwards.
    let width = 12u32;
    let height = 8u32;
    let mut pixels = Vec::with_capacity((width * height * 4) as usize);
    for y in 0..height {
        for x in 0..width {
            let r = (x * 255 / (width - 1)) as u8;
            let g = (y * 255 / (height - 1)) as u8;
            pixels.extend_from_slice(&[r, g, 128, 255]);
        }
    }
    println!("1. Created a {width}x{height} RGBA gradient");

    let (cx, cy) = suggested_components(width, height, 4);
    let view = PixelView::new(&pixels, width, height, PixelMode::Rgba)?;
    let hash = encode(&view, cx, cy)?;
    println!("2. Encoded with {cx}x{cy} components: {hash}");
    println!("   Valid: {}, length: {}\n", is_valid_blurhash(&hash), hash.len());

    let (rcx, rcy) = components(&hash)?;
    println!("3. Components read back from the hash: {rcx}x{rcy}\n");

    let image = decode(&hash, 24, 16, 1.0, PixelMode::Rgb)?;
    let first = image.pixel(0, 0).unwrap_or_default();
    let last = image.pixel(23, 15).unwrap_or_default();
    println!(
        "4. Decoded to {}x{} ({} bytes)",
        image.width(),
        image.height(),
        image.as_bytes().len()
    );
    println!("   First pixel: {first:?}, last pixel: {last:?}");

    let punched = decode(&hash, 24, 16, 2.0, PixelMode::Rgb)?;
    println!(
        "   With punch 2.0, last pixel: {:?}",
        punched.pixel(23, 15).unwrap_or_default()
    );

    Ok(())
}
