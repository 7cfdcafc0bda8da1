use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use log::{debug, error, info};
use thiserror::Error;

use super::format::Header;
use crate::pixel::PixelSource;

#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Image dimensions {width}x{height} are too large")]
    DimensionsTooLarge { width: u32, height: u32 },

    #[error("Failed to create {path}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("I/O error while encoding")]
    Io(#[from] io::Error),
    #[error("Failed to serialize header")]
    Serialization(#[from] bincode::Error),
}

/// Writes `source` as a 32-bit DCT stream.
///
/// Pixels go out row by row as `b, g, r, a`. The writer is buffered and
/// flushed once at the end; it is never closed.
pub fn encode<W, S>(writer: &mut W, source: &S) -> Result<(), EncodingError>
where
    W: Write + ?Sized,
    S: PixelSource + ?Sized,
{
    info!("Starting encoding");

    let (width, height) = (source.width(), source.height());
    let header = Header::build(width, height);
    if header.plane_size().is_none() {
        error!("Plane size for {}x{} overflows", width, height);
        return Err(EncodingError::DimensionsTooLarge { width, height });
    }

    let mut out = BufWriter::new(writer);
    header.write(&mut out)?;
    debug!(
        "Header written:\nMagic: {:?}\nWidth: {}\nHeight: {}",
        header.magic, width, height
    );

    for y in 0..height {
        for x in 0..width {
            let px = source.pixel_at(x, y);
            out.write_all(&[px.b, px.g, px.r, px.a])?;
        }
    }
    out.flush()?;

    info!("Encoding completed successfully");
    Ok(())
}

pub fn encode_to_vec<S: PixelSource + ?Sized>(source: &S) -> Result<Vec<u8>, EncodingError> {
    let mut encoded_data = Vec::new();
    encode(&mut encoded_data, source)?;
    Ok(encoded_data)
}

pub fn encode_file<P, S>(path: P, source: &S) -> Result<(), EncodingError>
where
    P: AsRef<Path>,
    S: PixelSource + ?Sized,
{
    let path = path.as_ref();
    let mut file = File::create(path).map_err(|source| EncodingError::FileAccess {
        path: path.to_path_buf(),
        source,
    })?;

    encode(&mut file, source)
}
