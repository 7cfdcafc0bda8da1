use std::fmt;
use std::fs::File;
use std::io::{self, BufReader};
use std::path::{Path, PathBuf};

use image::{ImageError, ImageFormat};
use lib_dct::constants::{FILE_EXT, FORMAT_NAME, PNG_EXT};
use lib_dct::{DecodeError, EncodingError, Header};
use log::{debug, info};
use thiserror::Error;

use crate::source::{to_dynamic_image, ImageSource};

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Unsupported file type {0:?}")]
    UnsupportedExtension(String),

    #[error("Invalid file path {0}")]
    InvalidPath(PathBuf),

    #[error("Destination {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("No destination folder given")]
    MissingDestination,

    #[error("Failed to read {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("DCT decode error")]
    Decode(#[from] DecodeError),

    #[error("DCT encode error")]
    Encode(#[from] EncodingError),

    #[error("Image processing error")]
    Image(#[from] ImageError),
}

/// Which way a file is converted, picked from its extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    DctToPng,
    PngToDct,
}

impl Direction {
    pub fn from_path(path: &Path) -> Result<Self, ConvertError> {
        let ext = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();

        match ext.as_str() {
            FILE_EXT => Ok(Self::DctToPng),
            PNG_EXT => Ok(Self::PngToDct),
            _ => Err(ConvertError::UnsupportedExtension(ext)),
        }
    }

    pub fn target_ext(self) -> &'static str {
        match self {
            Self::DctToPng => PNG_EXT,
            Self::PngToDct => FILE_EXT,
        }
    }
}

/// `<dest_dir>/<input stem>.<target extension>`.
pub fn output_path(input: &Path, dest_dir: &Path, direction: Direction) -> Result<PathBuf, ConvertError> {
    let stem = input
        .file_stem()
        .ok_or_else(|| ConvertError::InvalidPath(input.to_path_buf()))?;

    // Not `with_extension`: a stem like "a.b" must keep its inner dot
    let mut name = stem.to_os_string();
    name.push(".");
    name.push(direction.target_ext());
    Ok(dest_dir.join(name))
}

/// Converts `input` into `dest_dir`, returning the path written.
pub fn convert(input: &Path, dest_dir: &Path) -> Result<PathBuf, ConvertError> {
    let direction = Direction::from_path(input)?;
    if !dest_dir.is_dir() {
        return Err(ConvertError::NotADirectory(dest_dir.to_path_buf()));
    }

    let output = output_path(input, dest_dir, direction)?;
    debug!("{:?}: {} -> {}", direction, input.display(), output.display());

    match direction {
        Direction::DctToPng => dct_to_png(input, &output)?,
        Direction::PngToDct => png_to_dct(input, &output)?,
    }

    Ok(output)
}

fn dct_to_png(input: &Path, output: &Path) -> Result<(), ConvertError> {
    info!("Converting {} to PNG", input.display());

    let buffer = lib_dct::decode_file(input)?;
    to_dynamic_image(&buffer).save_with_format(output, ImageFormat::Png)?;

    info!("Wrote {}x{} PNG", buffer.width(), buffer.height());
    Ok(())
}

fn png_to_dct(input: &Path, output: &Path) -> Result<(), ConvertError> {
    info!("Converting {} to {}", input.display(), FORMAT_NAME);

    let image = image::open(input)?;
    debug!("Source color type: {:?}", image.color());

    lib_dct::encode_file(output, &ImageSource::new(image))?;

    info!("Wrote {} {}", FORMAT_NAME, output.display());
    Ok(())
}

/// Header of a DCT file, printed whether or not it validates.
pub struct HeaderReport {
    path: PathBuf,
    header: Header,
}

impl fmt::Display for HeaderReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = &self.header;
        writeln!(f, "{}", self.path.display())?;
        writeln!(f, "  magic:       {:?}", String::from_utf8_lossy(&header.magic))?;
        writeln!(f, "  scale:       {}", header.scale)?;
        writeln!(f, "  resolution:  {}x{}", header.xres, header.yres)?;
        writeln!(f, "  bpp:         {}", header.bpp)?;
        writeln!(f, "  unknown:     {:#04x}", header.unknown)?;
        writeln!(f, "  resolutions: {}", header.num_resolutions)?;

        match (header.validate(), header.plane_size()) {
            (Ok(_), Some(size)) => writeln!(f, "  plane size:  {} bytes", size),
            (Ok(_), None) => writeln!(f, "  plane size:  overflows"),
            (Err(err), _) => writeln!(f, "  invalid:     {}", err),
        }
    }
}

pub fn describe(input: &Path) -> Result<HeaderReport, ConvertError> {
    let file = File::open(input).map_err(|source| ConvertError::Read {
        path: input.to_path_buf(),
        source,
    })?;
    let header = Header::read_unchecked(&mut BufReader::new(file))?;

    Ok(HeaderReport {
        path: input.to_path_buf(),
        header,
    })
}
