//! TGA decoder: header handling, origin correction, channel order, rejections.

use enough::Unstoppable;
use rgb::RGBA8;
use zeniconset::tga::{self, TgaImageType};
use zeniconset::*;

/// Build a TGA file from raw (already BGR/BGRA/gray) pixel bytes.
fn tga_bytes(image_type: u8, w: u16, h: u16, depth: u8, descriptor: u8, id: &[u8], pixels: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; 18];
    out[0] = id.len() as u8;
    out[2] = image_type;
    out[12..14].copy_from_slice(&w.to_le_bytes());
    out[14..16].copy_from_slice(&h.to_le_bytes());
    out[16] = depth;
    out[17] = descriptor;
    out.extend_from_slice(id);
    out.extend_from_slice(pixels);
    out
}

fn noise_pattern(len: usize) -> Vec<u8> {
    let mut pixels = vec![0u8; len];
    let mut state: u32 = 0xDEAD_BEEF;
    for p in pixels.iter_mut() {
        state ^= state << 13;
        state ^= state >> 17;
        state ^= state << 5;
        *p = state as u8;
    }
    pixels
}

fn decode_some(data: &[u8]) -> RasterBuffer {
    tga::decode(data, None, Unstoppable)
        .unwrap()
        .expect("uncompressed TGA should decode")
}

// ── Channel order and origin ────────────────────────────────────────

#[test]
fn bgr24_bottom_up_is_flipped_and_swizzled() {
    // 2x2, bottom-left origin: first stored row is the bottom row.
    #[rustfmt::skip]
    let pixels = [
        // stored row 0 (visual bottom): blue, green
        255, 0, 0,   0, 255, 0,
        // stored row 1 (visual top): red, white
        0, 0, 255,   255, 255, 255,
    ];
    let data = tga_bytes(2, 2, 2, 24, 0x00, &[], &pixels);
    let img = decode_some(&data);

    assert_eq!((img.width(), img.height()), (2, 2));
    assert_eq!(img.pixel(0, 0), Some(RGBA8::new(255, 0, 0, 255)));
    assert_eq!(img.pixel(1, 0), Some(RGBA8::new(255, 255, 255, 255)));
    assert_eq!(img.pixel(0, 1), Some(RGBA8::new(0, 0, 255, 255)));
    assert_eq!(img.pixel(1, 1), Some(RGBA8::new(0, 255, 0, 255)));
}

#[test]
fn bgra32_top_down_keeps_row_order_and_alpha() {
    #[rustfmt::skip]
    let pixels = [
        10, 20, 30, 40,    50, 60, 70, 80,
        90, 100, 110, 120, 130, 140, 150, 0,
    ];
    let data = tga_bytes(2, 2, 2, 32, 0x20 | 0x08, &[], &pixels);
    let img = decode_some(&data);

    assert_eq!(img.pixel(0, 0), Some(RGBA8::new(30, 20, 10, 40)));
    assert_eq!(img.pixel(1, 0), Some(RGBA8::new(70, 60, 50, 80)));
    assert_eq!(img.pixel(0, 1), Some(RGBA8::new(110, 100, 90, 120)));
    assert_eq!(img.pixel(1, 1), Some(RGBA8::new(150, 140, 130, 0)));
}

#[test]
fn grayscale8_replicates_and_forces_opaque() {
    let pixels = [0u8, 64, 128, 255, 7, 9];
    let data = tga_bytes(3, 3, 2, 8, 0x20, &[], &pixels);
    let img = decode_some(&data);

    let expected: Vec<u8> = pixels.iter().flat_map(|&v| [v, v, v, 255]).collect();
    assert_eq!(img.pixels(), &expected[..]);
}

#[test]
fn truecolor_8bit_depth_decodes_as_gray() {
    // Depth drives bytes-per-pixel, not the image type.
    let data = tga_bytes(2, 1, 1, 8, 0, &[], &[77]);
    let img = decode_some(&data);
    assert_eq!(img.pixel(0, 0), Some(RGBA8::new(77, 77, 77, 255)));
}

#[test]
fn image_id_is_skipped() {
    let id = b"made by hand";
    let data = tga_bytes(2, 1, 1, 24, 0x20, id, &[1, 2, 3]);
    let img = decode_some(&data);
    assert_eq!(img.pixel(0, 0), Some(RGBA8::new(3, 2, 1, 255)));
}

#[test]
fn trailing_bytes_are_ignored() {
    let mut data = tga_bytes(2, 1, 1, 24, 0x20, &[], &[1, 2, 3]);
    data.extend_from_slice(b"TRUEVISION-XFILE.\0");
    let img = decode_some(&data);
    assert_eq!(img.pixels(), &[3, 2, 1, 255]);
}

#[test]
fn dimensions_match_header_for_all_depths() {
    for (image_type, depth) in [(2u8, 24u8), (2, 32), (3, 8)] {
        for descriptor in [0x00u8, 0x20] {
            let (w, h) = (7u16, 5u16);
            let bpp = depth as usize / 8;
            let pixels = noise_pattern(w as usize * h as usize * bpp);
            let data = tga_bytes(image_type, w, h, depth, descriptor, &[], &pixels);
            let img = decode_some(&data);
            assert_eq!(img.width(), 7, "type {image_type} depth {depth}");
            assert_eq!(img.height(), 5, "type {image_type} depth {depth}");
            assert_eq!(img.pixels().len(), 7 * 5 * 4);

            // Pixel (0,0) comes from the first stored row when top-down,
            // otherwise from the last stored row.
            let src_row = if descriptor & 0x20 != 0 { 0 } else { h as usize - 1 };
            let off = src_row * w as usize * bpp;
            let expected = match bpp {
                1 => RGBA8::new(pixels[off], pixels[off], pixels[off], 255),
                3 => RGBA8::new(pixels[off + 2], pixels[off + 1], pixels[off], 255),
                _ => RGBA8::new(pixels[off + 2], pixels[off + 1], pixels[off], pixels[off + 3]),
            };
            assert_eq!(img.pixel(0, 0), Some(expected));
        }
    }
}

// ── Rejections ──────────────────────────────────────────────────────

#[test]
fn rle_truecolor_is_reported() {
    let data = tga_bytes(10, 2, 2, 24, 0, &[], &[0u8; 12]);
    match tga::decode(&data, None, Unstoppable) {
        Err(AssetError::UnsupportedImageType(10)) => {}
        other => panic!("expected UnsupportedImageType(10), got {other:?}"),
    }
}

#[test]
fn other_image_types_are_not_a_tga() {
    for image_type in [0u8, 1, 9, 11, 32, 33, 255] {
        let data = tga_bytes(image_type, 2, 2, 24, 0, &[], &[0u8; 12]);
        let result = tga::decode(&data, None, Unstoppable);
        assert!(
            matches!(result, Ok(None)),
            "type {image_type} should decode to None, got {result:?}"
        );
    }
}

#[test]
fn short_input_is_malformed_header() {
    for len in [0usize, 1, 17] {
        let data = vec![0u8; len];
        assert!(matches!(
            tga::decode(&data, None, Unstoppable),
            Err(AssetError::MalformedHeader(_))
        ));
    }
}

#[test]
fn unsupported_depths() {
    for depth in [15u8, 16, 48] {
        let data = tga_bytes(2, 1, 1, depth, 0, &[], &[0u8; 8]);
        match tga::decode(&data, None, Unstoppable) {
            Err(AssetError::UnsupportedPixelDepth(d)) => assert_eq!(d, depth),
            other => panic!("depth {depth}: expected UnsupportedPixelDepth, got {other:?}"),
        }
    }
}

#[test]
fn truncated_pixel_data() {
    // 4x4x3 = 48 bytes promised after a 5-byte ID; one byte short.
    let id = [1u8, 2, 3, 4, 5];
    let data = tga_bytes(2, 4, 4, 24, 0, &id, &[0u8; 47]);
    match tga::decode(&data, None, Unstoppable) {
        Err(AssetError::Truncated { needed, actual }) => {
            assert_eq!(needed, 18 + 5 + 48);
            assert_eq!(actual, 18 + 5 + 47);
        }
        other => panic!("expected Truncated, got {other:?}"),
    }
}

#[test]
fn zero_dimension_is_malformed() {
    let data = tga_bytes(2, 0, 4, 24, 0, &[], &[]);
    assert!(matches!(
        tga::decode(&data, None, Unstoppable),
        Err(AssetError::MalformedHeader(_))
    ));
}

#[test]
fn limits_reject_large() {
    let data = tga_bytes(3, 4, 4, 8, 0, &[], &[0u8; 16]);
    let limits = Limits {
        max_pixels: Some(15),
        ..Default::default()
    };
    match tga::decode(&data, Some(&limits), Unstoppable) {
        Err(AssetError::LimitExceeded(_)) => {}
        other => panic!("expected LimitExceeded, got {other:?}"),
    }
}

#[test]
fn memory_limit_counts_the_rgba_output() {
    // 16 source bytes of gray expand to a 64-byte RGBA buffer.
    let data = tga_bytes(3, 4, 4, 8, 0, &[], &[0u8; 16]);
    let tight = Limits {
        max_memory_bytes: Some(63),
        ..Default::default()
    };
    assert!(matches!(
        tga::decode(&data, Some(&tight), Unstoppable),
        Err(AssetError::LimitExceeded(_))
    ));

    let exact = Limits {
        max_memory_bytes: Some(64),
        ..Default::default()
    };
    assert!(tga::decode(&data, Some(&exact), Unstoppable).unwrap().is_some());
}

#[test]
fn header_probe() {
    let data = tga_bytes(10, 300, 200, 32, 0x28, b"id", &[]);
    let header = tga::parse_header(&data).unwrap();
    assert_eq!(header.image_type, TgaImageType::RleTrueColor);
    assert_eq!((header.width, header.height), (300, 200));
    assert_eq!(header.data_offset(), 20);
    assert!(header.is_top_down());
}

// ── Routing through DecodeRequest ───────────────────────────────────

#[test]
fn decode_request_routes_tga_by_extension() {
    let data = tga_bytes(2, 1, 1, 24, 0, &[], &[0, 0, 255]);
    let img = DecodeRequest::new(&data, "SPRITE.TGA").decode(Unstoppable).unwrap();
    assert_eq!(img.pixel(0, 0), Some(RGBA8::new(255, 0, 0, 255)));
}

#[test]
fn decode_request_maps_unknown_type_to_error() {
    let data = tga_bytes(1, 1, 1, 8, 0, &[], &[0]);
    match DecodeRequest::new(&data, "x.tga").decode(Unstoppable) {
        Err(AssetError::UnrecognizedTga(1)) => {}
        other => panic!("expected UnrecognizedTga(1), got {other:?}"),
    }
}

#[test]
fn decode_request_rejects_other_extensions() {
    let data = tga_bytes(2, 1, 1, 24, 0, &[], &[0, 0, 255]);
    for name in ["image.gif", "image.bmp", "noextension", "tga"] {
        let err = DecodeRequest::new(&data, name).decode(Unstoppable).unwrap_err();
        assert!(matches!(err, AssetError::UnsupportedInputFormat(_)), "{name}");
        assert!(err.is_decode_error());
    }
}
