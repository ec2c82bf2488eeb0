//! Image I/O regression test
//!
//! Reads the RGB test photograph, writes it back in every supported
//! format and checks that nothing is lost on the way.

use grayhist_core::GrayGrid;
use grayhist_io::{
    ImageFormat, detect_format, detect_format_from_bytes, read_image, read_image_mem,
    write_image, write_image_mem,
};
use grayhist_test::{RegParams, load_test_image, make_ramp, regout_dir, test_data_path};

#[test]
fn io_reg() {
    let mut rp = RegParams::new("io");

    // --- Decode an RGB PNG through the red channel ---
    let path = test_data_path("kostka.png");
    let format = detect_format(&path).expect("detect kostka.png");
    rp.compare_values(1.0, (format == ImageFormat::Png) as u8 as f64, 0.0);

    let pixs = load_test_image("kostka.png").expect("load kostka.png");
    rp.compare_values(48.0, pixs.width() as f64, 0.0);
    rp.compare_values(32.0, pixs.height() as f64, 0.0);
    // Background at the top-left corner
    rp.compare_values(90.0, pixs.get(0, 0).expect("corner") as f64, 0.0);

    // --- Round trip through each format on disk ---
    for (i, format) in [ImageFormat::Png, ImageFormat::Pnm].into_iter().enumerate() {
        let out = format!("{}/io_roundtrip.{}.{}", regout_dir(), i, format.extension());
        write_image(&pixs, &out, format).expect("write roundtrip");
        rp.compare_values(
            1.0,
            (detect_format(&out).expect("detect roundtrip") == format) as u8 as f64,
            0.0,
        );
        let back = read_image(&out).expect("read roundtrip");
        rp.compare_grid(&back, &pixs);
    }

    // Unknown format falls back to the extension
    let out = format!("{}/io_by_extension.pgm", regout_dir());
    write_image(&pixs, &out, ImageFormat::Unknown).expect("write by extension");
    rp.compare_values(
        1.0,
        (detect_format(&out).expect("detect by extension") == ImageFormat::Pnm) as u8 as f64,
        0.0,
    );

    // --- In-memory round trip ---
    let ramp = make_ramp(256, 4);
    let bytes = write_image_mem(&ramp, ImageFormat::Png).expect("encode ramp");
    rp.compare_values(
        1.0,
        (detect_format_from_bytes(&bytes).expect("sniff ramp") == ImageFormat::Png) as u8 as f64,
        0.0,
    );
    rp.compare_grid(&read_image_mem(&bytes).expect("decode ramp"), &ramp);

    // --- Errors ---
    rp.compare_values(1.0, read_image_mem(&[]).is_err() as u8 as f64, 0.0);
    rp.compare_values(1.0, read_image("no/such/file.png").is_err() as u8 as f64, 0.0);
    // Headers whose dimensions overflow or exceed the data are rejected
    let huge = read_image_mem(b"P6 4294967295 4294967295 255\n");
    rp.compare_values(1.0, huge.is_err() as u8 as f64, 0.0);
    let short = read_image_mem(b"P5 30000 30000 255\n\x07");
    rp.compare_values(1.0, short.is_err() as u8 as f64, 0.0);
    let one = GrayGrid::new(1, 1).expect("1x1 grid");
    rp.compare_values(
        1.0,
        write_image_mem(&one, ImageFormat::Unknown).is_err() as u8 as f64,
        0.0,
    );

    assert!(rp.cleanup(), "io regression test failed");
}
