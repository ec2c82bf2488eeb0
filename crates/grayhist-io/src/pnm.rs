//! PNM (Portable Any Map) format support
//!
//! Reads PGM (P5) and PPM (P6) binary images with maxval up to 255 and
//! writes PGM (P5). PPM pixels are reduced with [`color::intensity_rgb`].
//! ASCII variants (P2/P3), PBM and 16-bit samples are not supported.

use crate::{IoError, IoResult};
use grayhist_core::{GrayGrid, color};
use log::debug;
use std::io::{BufRead, Read, Write};

/// Read a PNM image (P5/P6) from a reader.
pub fn read_pnm<R: BufRead>(mut reader: R) -> IoResult<GrayGrid> {
    let magic = read_token(&mut reader)?;
    let samples = match magic.as_str() {
        "P5" => 1,
        "P6" => 3,
        other => {
            return Err(IoError::UnsupportedFormat(format!(
                "unsupported PNM type: {}",
                other
            )));
        }
    };

    let width = read_number(&mut reader, "width")?;
    let height = read_number(&mut reader, "height")?;
    let maxval = read_number(&mut reader, "maxval")?;
    if maxval == 0 || maxval > 255 {
        return Err(IoError::UnsupportedFormat(format!(
            "PNM maxval {} not supported",
            maxval
        )));
    }

    let len = (width as usize)
        .checked_mul(height as usize)
        .and_then(|n| n.checked_mul(samples))
        .ok_or_else(|| {
            IoError::InvalidData(format!("PNM dimensions {}x{} too large", width, height))
        })?;

    // Allocate as bytes arrive, not from the header claim.
    let mut raw = Vec::new();
    reader.take(len as u64).read_to_end(&mut raw)?;
    if raw.len() != len {
        return Err(IoError::InvalidData(format!(
            "PNM raster truncated: expected {} bytes, got {}",
            len,
            raw.len()
        )));
    }

    let gray = if samples == 1 {
        raw
    } else {
        raw.chunks_exact(3)
            .map(|px| color::intensity_rgb(px[0], px[1], px[2]))
            .collect()
    };

    debug!("read {} {}x{} maxval={}", magic, width, height, maxval);
    Ok(GrayGrid::from_vec(width, height, gray)?)
}

/// Write a grid as binary PGM (P5) to a writer.
pub fn write_pnm<W: Write>(grid: &GrayGrid, mut writer: W) -> IoResult<()> {
    write!(writer, "P5\n{} {}\n255\n", grid.width(), grid.height())?;
    writer.write_all(grid.data())?;
    writer.flush()?;
    Ok(())
}

/// Read one whitespace-delimited header token, skipping `#` comments.
///
/// Consumes exactly one whitespace byte after the token, so the raster
/// starts right after the maxval token.
fn read_token<R: BufRead>(reader: &mut R) -> IoResult<String> {
    let mut token = String::new();
    let mut in_comment = false;
    let mut byte = [0u8; 1];

    loop {
        if reader.read(&mut byte)? == 0 {
            if token.is_empty() {
                return Err(IoError::InvalidData("truncated PNM header".to_string()));
            }
            return Ok(token);
        }
        let c = byte[0];
        if in_comment {
            in_comment = c != b'\n' && c != b'\r';
            continue;
        }
        if c == b'#' {
            in_comment = true;
        } else if c.is_ascii_whitespace() {
            if !token.is_empty() {
                return Ok(token);
            }
        } else {
            token.push(c as char);
        }
    }
}

fn read_number<R: BufRead>(reader: &mut R, what: &str) -> IoResult<u32> {
    let token = read_token(reader)?;
    token
        .parse()
        .map_err(|_| IoError::InvalidData(format!("invalid PNM {}: {:?}", what, token)))
}
