//! grayhist-io - Image I/O for grayhist
//!
//! Decodes raster files into [`GrayGrid`]s and encodes grids back to
//! files. The histogram algorithms never depend on this crate; it is the
//! external collaborator that feeds them.
//!
//! Supported formats (feature-gated):
//!
//! - **PNG** (`png-format`): any color type in, 8-bit grayscale out
//! - **PNM** (`pnm`): binary PGM/PPM in, binary PGM out
//!
//! Color inputs are reduced through [`grayhist_core::color::intensity`].

mod error;
pub mod format;
#[cfg(feature = "png-format")]
pub mod png;
#[cfg(feature = "pnm")]
pub mod pnm;

pub use error::{IoError, IoResult};
pub use format::{ImageFormat, detect_format, detect_format_from_bytes};

use grayhist_core::GrayGrid;
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Cursor, Read, Seek, Write};
use std::path::Path;

/// Read an image from a file path.
///
/// The format is detected from the file's magic bytes.
pub fn read_image<P: AsRef<Path>>(path: P) -> IoResult<GrayGrid> {
    let file = File::open(path.as_ref())?;
    read_image_from(BufReader::new(file))
}

/// Read an image from any buffered, seekable reader.
pub fn read_image_from<R: BufRead + Seek>(mut reader: R) -> IoResult<GrayGrid> {
    let mut header = [0u8; 8];
    let n = read_header(&mut reader, &mut header)?;
    reader.rewind()?;

    match detect_format_from_bytes(&header[..n])? {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::read_png(reader),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::read_pnm(reader),
        other => Err(IoError::UnsupportedFormat(format!(
            "cannot read {:?} images",
            other
        ))),
    }
}

/// Read an image held in memory.
pub fn read_image_mem(data: &[u8]) -> IoResult<GrayGrid> {
    read_image_from(Cursor::new(data))
}

/// Write an image to a file path.
///
/// [`ImageFormat::Unknown`] falls back to the format implied by the
/// path's extension.
pub fn write_image<P: AsRef<Path>>(grid: &GrayGrid, path: P, format: ImageFormat) -> IoResult<()> {
    let format = match format {
        ImageFormat::Unknown => ImageFormat::from_path(path.as_ref()),
        f => f,
    };
    let file = File::create(path.as_ref())?;
    let mut writer = BufWriter::new(file);
    write_image_to(grid, &mut writer, format)?;
    writer.flush()?;
    Ok(())
}

/// Encode an image into any writer.
pub fn write_image_to<W: Write>(grid: &GrayGrid, writer: W, format: ImageFormat) -> IoResult<()> {
    match format {
        #[cfg(feature = "png-format")]
        ImageFormat::Png => png::write_png(grid, writer),
        #[cfg(feature = "pnm")]
        ImageFormat::Pnm => pnm::write_pnm(grid, writer),
        other => {
            let _ = writer;
            Err(IoError::UnsupportedFormat(format!(
                "cannot write {:?} images",
                other
            )))
        }
    }
}

/// Encode an image into a byte vector.
pub fn write_image_mem(grid: &GrayGrid, format: ImageFormat) -> IoResult<Vec<u8>> {
    let mut buf = Vec::new();
    write_image_to(grid, &mut buf, format)?;
    Ok(buf)
}

/// Fill `header` as far as the stream allows.
fn read_header<R: Read>(reader: &mut R, header: &mut [u8]) -> IoResult<usize> {
    let mut filled = 0;
    while filled < header.len() {
        let n = reader.read(&mut header[filled..])?;
        if n == 0 {
            break;
        }
        filled += n;
    }
    Ok(filled)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mem_roundtrip_each_format() {
        let grid = GrayGrid::from_rows(&[&[0, 50], &[100, 250]]).unwrap();
        for format in [ImageFormat::Png, ImageFormat::Pnm] {
            let bytes = write_image_mem(&grid, format).unwrap();
            assert_eq!(detect_format_from_bytes(&bytes).unwrap(), format);
            assert_eq!(read_image_mem(&bytes).unwrap(), grid);
        }
    }

    #[test]
    fn test_unknown_format_rejected() {
        let grid = GrayGrid::new(1, 1).unwrap();
        assert!(write_image_mem(&grid, ImageFormat::Unknown).is_err());
        assert!(read_image_mem(b"GIF89a....").is_err());
    }
}
