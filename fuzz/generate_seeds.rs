#!/usr/bin/env -S cargo +nightly -Zscript
//! Generate seed corpus files for fuzzing.
//! Run: cargo +nightly -Zscript fuzz/generate_seeds.rs

fn header(width: i32, height: i32, bit_depth: i32) -> Vec<u8> {
    let mut h = vec![0u8; 54];
    h[0] = b'B';
    h[1] = b'M';
    h[18..22].copy_from_slice(&width.to_le_bytes());
    h[22..26].copy_from_slice(&height.to_le_bytes());
    h[28..32].copy_from_slice(&bit_depth.to_le_bytes());
    h
}

fn main() {
    use std::fs;
    let dir = "fuzz/corpus/fuzz_copy";
    fs::create_dir_all(dir).unwrap();

    // 2x2 24-bit, no color table
    let mut rgb = header(2, 2, 24);
    rgb.extend_from_slice(&[0x11, 0x22, 0x33, 0x44]);
    fs::write(format!("{dir}/rgb_2x2.bmp"), rgb).unwrap();

    // 4x4 8-bit with grayscale color table
    let mut pal = header(4, 4, 8);
    for i in 0..=255u8 {
        pal.extend_from_slice(&[i, i, i, 0]);
    }
    pal.extend((0..16u8).map(|i| i * 16));
    fs::write(format!("{dir}/pal8_4x4.bmp"), pal).unwrap();

    // Zero width
    fs::write(format!("{dir}/zero_width.bmp"), header(0, 4, 32)).unwrap();

    // Header declaring far more pixel data than follows
    fs::write(format!("{dir}/huge_declared.bmp"), header(30000, 30000, 24)).unwrap();

    // Negative height
    fs::write(format!("{dir}/topdown.bmp"), header(1, -1, 24)).unwrap();

    println!("Seeds written to {dir}/");
}
