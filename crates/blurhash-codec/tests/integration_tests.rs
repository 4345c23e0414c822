use blurhash_codec::{
    base83, components, decode, decode_with_options, encode, encode_rgb, is_valid_blurhash,
    validate, BlurhashError, ComponentGrid, DecodeOptions, PixelMode, PixelView,
};

// ---------------------------------------------------------------------------
// Known test vectors
// ---------------------------------------------------------------------------

/// Reference blurhash from the woltapp README.
const KNOWN_HASH: &str = "LEHV6nWB2yk8pyo0adR*.7kCMdnj";

/// Reference encodings of the 314x176 test picture and its greyscale version.
const PICTURE_HASH: &str = "LlMF%n00%#MwS|WCWEM{R*bbWBbH";
const PICTURE_BW_HASH: &str = "LjIY5?00?bIUofWBWBM{WBofWBj[";

const ALPHABET: &str =
    "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz#$%*+,-.:;=?@[]^_{|}~";

// ---------------------------------------------------------------------------
// Helpers: synthetic images (row-major, RGB u8)
// ---------------------------------------------------------------------------

fn gradient_image(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for y in 0..height {
        for x in 0..width {
            let r = ((x as f64 / width as f64) * 255.0) as u8;
            let g = ((y as f64 / height as f64) * 255.0) as u8;
            pixels.extend_from_slice(&[r, g, 128]);
        }
    }
    pixels
}

/// Low-contrast horizontal ramp that decodes without clipping.
fn soft_ramp(width: usize, height: usize) -> Vec<u8> {
    let mut pixels = Vec::with_capacity(width * height * 3);
    for _y in 0..height {
        for x in 0..width {
            let v = 96 + (x * 64 / width) as u8;
            pixels.extend_from_slice(&[v, 112, 160 - (x * 32 / width) as u8]);
        }
    }
    pixels
}

fn solid_image(width: usize, height: usize, rgb: [u8; 3]) -> Vec<u8> {
    rgb.repeat(width * height)
}

fn average(image: &[u8], channel: usize) -> f64 {
    let n = image.len() / 3;
    image.chunks_exact(3).map(|c| c[channel] as f64).sum::<f64>() / n as f64
}

// ===========================================================================
// Base83
// ===========================================================================

#[test]
fn base83_overflow_boundary() {
    assert!(base83::encode(6859, 2).is_ok());
    assert!(base83::encode(6888, 2).is_ok());
    assert!(matches!(
        base83::encode(7000, 2),
        Err(BlurhashError::Base83Overflow { value: 7000, digits: 2 })
    ));
}

#[test]
fn base83_roundtrip() {
    for (value, digits) in [(0u64, 1), (82, 1), (83, 2), (6888, 2), (0xFFFFFF, 4)] {
        let encoded = base83::encode(value, digits).unwrap();
        assert_eq!(encoded.len(), digits);
        assert_eq!(base83::decode(&encoded).unwrap(), value);
    }
}

// ===========================================================================
// Golden values
// ===========================================================================

#[test]
fn golden_solid_black_4x3() {
    let img = solid_image(12, 9, [0, 0, 0]);
    let hash = encode_rgb(&img, 12, 9, 4, 3).unwrap();
    assert_eq!(hash, "L00000fQfQfQfQfQfQfQfQfQfQfQ");
}

#[test]
fn golden_solid_colours_dc_only() {
    let cases = [
        ([255, 0, 0], "00TI:j"),
        ([0, 0, 0], "000000"),
        ([255, 255, 255], "00TSUA"),
    ];
    for (rgb, expected) in cases {
        let img = solid_image(7, 5, rgb);
        assert_eq!(encode_rgb(&img, 7, 5, 1, 1).unwrap(), expected, "{rgb:?}");
    }
}

#[test]
fn golden_gradient_hashes() {
    // Red ramps left to right, green top to bottom, so the AC order is
    // visible: swapping axes or the row-major index changes the string.
    let img = gradient_image(50, 28);
    let cases = [
        ((4, 3), "LyHB^[2r$5Szl}WWjtf7gJfjfQfj"),
        ((3, 5), "cyHB^[2r$5l}WWjtgJfjfQnmWpjtf7fQfQ"),
        ((9, 2), "HyHB^[2r$5SzjtkBa|oeWpl}WWjtf7fQf7fQf7fQ"),
        ((2, 9), "?yHB^[2rl}WWgJfjnmWpf7fQofWpe;fQofWpe;fQ"),
    ];
    for ((cx, cy), expected) in cases {
        assert_eq!(encode_rgb(&img, 50, 28, cx, cy).unwrap(), expected, "{cx}x{cy}");
    }
}

#[test]
fn golden_decoded_pixels() {
    let picture = decode(PICTURE_HASH, 4, 3, 1.0, PixelMode::Rgb).unwrap();
    assert_eq!(
        picture.as_bytes(),
        &[
            91, 67, 0, 157, 134, 116, 171, 122, 80, 204, 178, 151, //
            135, 88, 0, 167, 128, 113, 178, 115, 80, 215, 183, 162, //
            162, 109, 59, 167, 109, 98, 181, 99, 80, 224, 183, 169,
        ]
    );

    let known = decode(KNOWN_HASH, 4, 3, 1.0, PixelMode::Rgb).unwrap();
    assert_eq!(
        known.as_bytes(),
        &[
            135, 164, 177, 161, 173, 177, 181, 180, 171, 160, 172, 174, //
            124, 154, 169, 148, 148, 154, 164, 145, 134, 146, 152, 155, //
            124, 144, 154, 144, 134, 132, 163, 130, 104, 148, 140, 134,
        ]
    );
}

#[test]
fn reference_picture_hashes_decode() {
    for hash in [PICTURE_HASH, PICTURE_BW_HASH] {
        assert!(is_valid_blurhash(hash));
        assert_eq!(components(hash).unwrap(), (4, 3));
        let image = decode(hash, 31, 17, 1.0, PixelMode::Rgb).unwrap();
        assert_eq!(image.as_bytes().len(), 31 * 17 * 3);
    }
}

#[test]
fn greyscale_reference_decodes_grey() {
    let grid = ComponentGrid::from_hash(PICTURE_BW_HASH, 1.0).unwrap();
    let dc = grid.dc();
    assert_eq!(dc[0], dc[1]);
    assert_eq!(dc[1], dc[2]);

    let image = decode(PICTURE_BW_HASH, 40, 24, 1.0, PixelMode::Rgb).unwrap();
    for px in image.as_bytes().chunks_exact(3) {
        assert!(px[0] == px[1] && px[1] == px[2], "{px:?}");
    }
}

// ===========================================================================
// Encode
// ===========================================================================

#[test]
fn encode_length_and_charset_for_every_grid() {
    let img = gradient_image(24, 16);
    for cx in 1..=9 {
        for cy in 1..=9 {
            let hash = encode_rgb(&img, 24, 16, cx, cy)
                .unwrap_or_else(|e| panic!("encode failed for {cx}x{cy}: {e}"));
            assert_eq!(hash.len(), 4 + 2 * (cx * cy) as usize, "{cx}x{cy}");
            assert!(hash.chars().all(|c| ALPHABET.contains(c)), "{hash}");
            assert!(is_valid_blurhash(&hash), "{hash}");
            assert_eq!(validate(&hash).unwrap(), (cx, cy));
        }
    }
}

#[test]
fn encode_invalid_component_counts() {
    let img = gradient_image(8, 8);
    for (cx, cy) in [(10, 3), (0, 3), (4, 10), (4, 0)] {
        assert!(
            matches!(
                encode_rgb(&img, 8, 8, cx, cy),
                Err(BlurhashError::InvalidComponentCount { .. })
            ),
            "{cx}x{cy}"
        );
    }
}

#[test]
fn encode_is_deterministic() {
    let img = gradient_image(16, 16);
    let view = PixelView::new(&img, 16, 16, PixelMode::Rgb).unwrap();
    assert_eq!(encode(&view, 4, 4).unwrap(), encode(&view, 4, 4).unwrap());
}

#[test]
fn encode_single_pixel_image() {
    let hash = encode_rgb(&[128, 64, 32], 1, 1, 3, 3).unwrap();
    assert_eq!(hash.len(), 4 + 2 * 9);
}

// ===========================================================================
// Decode
// ===========================================================================

#[test]
fn decode_invalid_inputs() {
    assert!(matches!(
        decode("invalid!", 8, 8, 1.0, PixelMode::Rgb),
        Err(BlurhashError::MalformedHash { .. })
    ));
    assert!(matches!(
        decode(KNOWN_HASH, 0, 10, 1.0, PixelMode::Rgb),
        Err(BlurhashError::InvalidArgument { name: "width", .. })
    ));
    assert!(matches!(
        decode(KNOWN_HASH, 10, 10, 0.0, PixelMode::Rgb),
        Err(BlurhashError::InvalidArgument { name: "punch", .. })
    ));
}

#[test]
fn decode_out_of_range_ac_is_decode_failure() {
    // Structurally valid (right length, right alphabet) but "~~" is not a
    // packed (r, g, b) triple.
    let hash = "1~0000~~";
    assert!(is_valid_blurhash(hash));
    assert!(matches!(
        decode(hash, 4, 4, 1.0, PixelMode::Rgb),
        Err(BlurhashError::DecodeFailure(_))
    ));
}

#[test]
fn decode_is_deterministic() {
    let options = DecodeOptions::new().punch(1.25).mode(PixelMode::Rgba);
    let a = decode_with_options(KNOWN_HASH, 33, 21, &options).unwrap();
    let b = decode_with_options(KNOWN_HASH, 33, 21, &options).unwrap();
    assert_eq!(a.as_bytes(), b.as_bytes());
}

#[test]
fn decode_rgba_is_opaque() {
    let image = decode(KNOWN_HASH, 8, 8, 1.0, PixelMode::Rgba).unwrap();
    assert_eq!(image.mode(), PixelMode::Rgba);
    assert!(image.as_bytes().chunks_exact(4).all(|px| px[3] == 255));
}

#[test]
fn decode_single_pixel_matches_coefficient_sum() {
    // At (0, 0) every basis function is 1, so the pixel is the gamma-encoded
    // sum of all coefficients.
    let grid = ComponentGrid::from_hash(KNOWN_HASH, 1.0).unwrap();
    let mut sum = [0.0f64; 3];
    for cell in grid.cells() {
        for c in 0..3 {
            sum[c] += cell[c];
        }
    }
    let expected = sum.map(blurhash_codec::color::linear_to_srgb);

    let image = decode(KNOWN_HASH, 1, 1, 1.0, PixelMode::Rgb).unwrap();
    let got = image.pixel(0, 0).unwrap();
    for c in 0..3 {
        assert!(
            (got[c] as i16 - expected[c] as i16).abs() <= 1,
            "channel {c}: {got:?} vs {expected:?}"
        );
    }
}

// ===========================================================================
// Encode -> Decode round-trip
// ===========================================================================

#[test]
fn roundtrip_solid_colours() {
    for (rgb, channel) in [([255, 0, 0], 0), ([0, 255, 0], 1), ([0, 0, 255], 2)] {
        let img = solid_image(16, 16, rgb);
        let hash = encode_rgb(&img, 16, 16, 4, 4).unwrap();
        let decoded = decode(&hash, 16, 16, 1.0, PixelMode::Rgb).unwrap();
        for c in 0..3 {
            let avg = average(decoded.as_bytes(), c);
            if c == channel {
                assert!(avg > 200.0, "{rgb:?} channel {c} avg {avg}");
            } else {
                assert!(avg < 80.0, "{rgb:?} channel {c} avg {avg}");
            }
        }
    }
}

#[test]
fn roundtrip_dc_only_preserves_grey_levels() {
    for val in [0u8, 1, 50, 128, 200, 254, 255] {
        let img = solid_image(4, 4, [val, val, val]);
        let hash = encode_rgb(&img, 4, 4, 1, 1).unwrap();
        let decoded = decode(&hash, 1, 1, 1.0, PixelMode::Rgb).unwrap();
        assert_eq!(decoded.as_bytes(), &[val, val, val], "level {val}");
    }
}

#[test]
fn roundtrip_reencode_is_stable() {
    let img = soft_ramp(48, 32);
    let original = encode_rgb(&img, 48, 32, 4, 3).unwrap();

    let decoded = decode(&original, 64, 64, 1.0, PixelMode::Rgb).unwrap();
    let reencoded = encode(&decoded.view(), 4, 3).unwrap();
    assert_eq!(components(&reencoded).unwrap(), (4, 3));

    // DC within 2/255 per channel.
    let dc_a = base83::decode(&original[2..6]).unwrap();
    let dc_b = base83::decode(&reencoded[2..6]).unwrap();
    for shift in [16, 8, 0] {
        let a = ((dc_a >> shift) & 255) as i64;
        let b = ((dc_b >> shift) & 255) as i64;
        assert!((a - b).abs() <= 2, "DC channel drifted: {a} -> {b}");
    }

    // The dominant horizontal term keeps its sign on every channel that
    // carries one.
    let before = ComponentGrid::from_hash(&original, 1.0).unwrap();
    let after = ComponentGrid::from_hash(&reencoded, 1.0).unwrap();
    let (a, b) = (before.get(1, 0).unwrap(), after.get(1, 0).unwrap());
    assert!(a[0] < 0.0 && b[0] < 0.0, "{a:?} vs {b:?}");
    assert!(a[2] > 0.0 && b[2] > 0.0, "{a:?} vs {b:?}");
}

#[test]
fn roundtrip_through_padded_rgba_view() {
    let rgb = gradient_image(10, 6);
    let mut padded = Vec::new();
    for row in rgb.chunks_exact(30) {
        for px in row.chunks_exact(3) {
            padded.extend_from_slice(&[px[0], px[1], px[2], 0]);
        }
        padded.extend_from_slice(&[7; 8]);
    }
    let view = PixelView::with_stride(&padded, 10, 6, PixelMode::Rgba, 48).unwrap();
    assert_eq!(
        encode(&view, 5, 2).unwrap(),
        encode_rgb(&rgb, 10, 6, 5, 2).unwrap()
    );
}
