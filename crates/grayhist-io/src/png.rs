//! PNG image format support
//!
//! Every PNG flavor is normalized to one 8-bit intensity per pixel:
//! palette and low-bit gray are expanded to 8 bits, 16-bit samples keep
//! their high byte, and color pixels go through [`color::intensity_rgb`].
//! Grids are always written as 8-bit grayscale.

use crate::{IoError, IoResult};
use grayhist_core::{GrayGrid, color};
use log::debug;
use png::{BitDepth, ColorType, Decoder, Encoder, Transformations};
use std::io::{BufRead, Seek, Write};

/// Read a PNG image as a grayscale grid
pub fn read_png<R: BufRead + Seek>(reader: R) -> IoResult<GrayGrid> {
    let mut decoder = Decoder::new(reader);
    decoder.set_transformations(Transformations::EXPAND);
    let mut reader = decoder
        .read_info()
        .map_err(|e| IoError::DecodeError(format!("PNG decode error: {}", e)))?;

    let (width, height) = {
        let info = reader.info();
        (info.width, info.height)
    };
    let (color_type, bit_depth) = reader.output_color_type();

    let samples = match color_type {
        ColorType::Grayscale => 1,
        ColorType::GrayscaleAlpha => 2,
        ColorType::Rgb => 3,
        ColorType::Rgba => 4,
        ColorType::Indexed => {
            return Err(IoError::UnsupportedFormat(
                "indexed PNG was not expanded".to_string(),
            ));
        }
    };
    let bytes_per_sample = match bit_depth {
        BitDepth::Eight => 1,
        BitDepth::Sixteen => 2,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unexpected PNG output depth after expansion: {:?}",
                other
            )));
        }
    };

    let buf_size = reader
        .output_buffer_size()
        .ok_or_else(|| IoError::DecodeError("failed to get output buffer size".to_string()))?;
    let mut buf = vec![0; buf_size];
    let output_info = reader
        .next_frame(&mut buf)
        .map_err(|e| IoError::DecodeError(format!("PNG frame error: {}", e)))?;

    let bytes_per_row = output_info.line_size;
    let stride = samples * bytes_per_sample;
    let data = &buf[..output_info.buffer_size()];

    let mut gray = Vec::with_capacity(width as usize * height as usize);
    for y in 0..height as usize {
        let row = &data[y * bytes_per_row..];
        for x in 0..width as usize {
            let idx = x * stride;
            // High byte of each sample; for 8-bit data that is the sample itself.
            let val = if samples >= 3 {
                color::intensity_rgb(
                    row[idx],
                    row[idx + bytes_per_sample],
                    row[idx + 2 * bytes_per_sample],
                )
            } else {
                row[idx]
            };
            gray.push(val);
        }
    }

    debug!(
        "read PNG {}x{} ({:?}, {:?})",
        width, height, color_type, bit_depth
    );
    Ok(GrayGrid::from_vec(width, height, gray)?)
}

/// Write a grid as an 8-bit grayscale PNG
pub fn write_png<W: Write>(grid: &GrayGrid, writer: W) -> IoResult<()> {
    let mut encoder = Encoder::new(writer, grid.width(), grid.height());
    encoder.set_color(ColorType::Grayscale);
    encoder.set_depth(BitDepth::Eight);

    let mut writer = encoder
        .write_header()
        .map_err(|e| IoError::EncodeError(format!("PNG header error: {}", e)))?;

    writer
        .write_image_data(grid.data())
        .map_err(|e| IoError::EncodeError(format!("PNG write error: {}", e)))?;

    writer
        .finish()
        .map_err(|e| IoError::EncodeError(format!("PNG finish error: {}", e)))?;

    Ok(())
}
