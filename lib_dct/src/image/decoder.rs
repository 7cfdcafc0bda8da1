use std::fs::File;
use std::io::{self, BufReader, Read};
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use thiserror::Error;

use super::format::Header;
use crate::pixel::PixelBuffer;

#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("Unknown header magic {0:?}")]
    MalformedHeader([u8; 3]),
    #[error("Unsupported scale factor {0} (only 1.0 is supported)")]
    UnsupportedScale(f32),
    #[error("Unsupported bits per pixel: {0}")]
    UnsupportedDepth(u8),
    #[error("Stream ended while reading {section}: needed {expected} bytes, got {actual}")]
    TruncatedStream {
        section: &'static str,
        expected: usize,
        actual: usize,
    },
    #[error("Image dimensions {width}x{height} are too large")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("Failed to open {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error while decoding")]
    Io(#[from] io::Error),
    #[error("Failed to deserialize header")]
    Serialization(#[from] bincode::Error),
}

/// Byte length of a single plane: `xres * yres * (bpp / 8)`.
///
/// Further resolution levels are never counted. Returns `None` on overflow.
pub fn plane_size(xres: u32, yres: u32, bpp: u8) -> Option<usize> {
    (xres as usize)
        .checked_mul(yres as usize)?
        .checked_mul(bpp as usize / 8)
}

/// Reads exactly `size` bytes of pixel data.
pub fn read_plane<R: Read + ?Sized>(reader: &mut R, size: usize) -> Result<Vec<u8>, DecodeError> {
    read_exact_or_truncated(reader, size, "pixel plane")
}

// Grows the buffer as data arrives instead of trusting `size` up front.
pub(crate) fn read_exact_or_truncated<R: Read + ?Sized>(
    reader: &mut R,
    size: usize,
    section: &'static str,
) -> Result<Vec<u8>, DecodeError> {
    let mut buffer = Vec::new();
    Read::take(&mut *reader, size as u64).read_to_end(&mut buffer)?;

    if buffer.len() < size {
        error!(
            "Stream ended while reading {}: expected {} bytes, got {}",
            section,
            size,
            buffer.len()
        );
        return Err(DecodeError::TruncatedStream {
            section,
            expected: size,
            actual: buffer.len(),
        });
    }

    Ok(buffer)
}

/// Decodes the full-resolution image and also hands back the header, which
/// carries the fields `PixelBuffer` does not (`unknown`, `num_resolutions`).
pub fn decode_with_header<R: Read + ?Sized>(
    reader: &mut R,
) -> Result<(Header, PixelBuffer), DecodeError> {
    info!("Starting decoding");

    let header = Header::read_unchecked(reader)?;
    let depth = header.validate()?;
    debug!(
        "Image dimensions read: width={} height={} bpp={}",
        header.xres, header.yres, header.bpp
    );

    if header.num_resolutions > 1 {
        debug!(
            "Header declares {} resolutions, reading only the first",
            header.num_resolutions
        );
    }

    let size = header.plane_size().ok_or(DecodeError::DimensionsTooLarge {
        width: header.xres,
        height: header.yres,
    })?;
    let data = read_plane(reader, size)?;
    debug!("Pixel plane read: {} bytes", data.len());

    let buffer = PixelBuffer::from_raw(header.xres, header.yres, depth, data).ok_or(
        DecodeError::DimensionsTooLarge {
            width: header.xres,
            height: header.yres,
        },
    )?;

    info!("Decoding completed successfully");
    Ok((header, buffer))
}

/// Decodes a DCT stream. Bytes after the first plane are left unread.
pub fn decode<R: Read + ?Sized>(reader: &mut R) -> Result<PixelBuffer, DecodeError> {
    decode_with_header(reader).map(|(_, buffer)| buffer)
}

pub fn decode_bytes(encoded_data: &[u8]) -> Result<PixelBuffer, DecodeError> {
    decode(&mut &encoded_data[..])
}

pub fn decode_file<P: AsRef<Path>>(path: P) -> Result<PixelBuffer, DecodeError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| DecodeError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    decode(&mut BufReader::new(file))
}
