#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn tga(image_type: u8, w: u16, h: u16, depth: u8, descriptor: u8, pixels: &[u8]) -> Vec<u8> {
    let mut out = vec![0u8; 18];
    out[2] = image_type;
    out[12..14].copy_from_slice(&w.to_le_bytes());
    out[14..16].copy_from_slice(&h.to_le_bytes());
    out[16] = depth;
    out[17] = descriptor;
    out.extend_from_slice(pixels);
    out
}

fn main() {
    use std::fs;
    for dir in ["fuzz/corpus/fuzz_decode", "fuzz/corpus/fuzz_pipeline"] {
        fs::create_dir_all(dir).unwrap();

        // BGR 2x2 bottom-up
        let bgr = tga(2, 2, 2, 24, 0x00, b"\x00\x00\xff\x00\xff\x00\xff\x00\x00\x80\x80\x80");
        fs::write(format!("{dir}/bgr_2x2.tga"), bgr).unwrap();

        // BGRA 1x2 top-down
        let bgra = tga(2, 1, 2, 32, 0x28, b"\x10\x20\x30\x40\x50\x60\x70\x00");
        fs::write(format!("{dir}/bgra_1x2.tga"), bgra).unwrap();

        // Gray 3x1
        let gray = tga(3, 3, 1, 8, 0x20, b"\x00\x80\xff");
        fs::write(format!("{dir}/gray_3x1.tga"), gray).unwrap();

        // Truncated/malformed seeds for edge coverage
        fs::write(format!("{dir}/empty.bin"), b"").unwrap();
        fs::write(format!("{dir}/short_header.bin"), [0u8; 17]).unwrap();
        fs::write(format!("{dir}/rle.tga"), tga(10, 2, 2, 24, 0, &[0u8; 6])).unwrap();
        fs::write(format!("{dir}/truncated.tga"), tga(2, 4, 4, 24, 0, &[0u8; 10])).unwrap();
        fs::write(format!("{dir}/depth16.tga"), tga(2, 1, 1, 16, 0, &[0u8; 2])).unwrap();
    }

    println!("Generated seed corpus in fuzz/corpus/");
}
