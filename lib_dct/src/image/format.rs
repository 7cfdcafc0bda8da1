use std::io::{Read, Write};

use log::{debug, error};
use serde::{Deserialize, Serialize};

use super::decoder::{plane_size, read_exact_or_truncated, DecodeError};
use super::encoder::EncodingError;
use crate::constants::{HEADER_SIZE, MAGIC_HEADER, SUPPORTED_SCALE};
use crate::pixel::Depth;

/// The fixed 18-byte DCT header.
///
/// Field order matches the file. bincode's default options (fixed-width
/// little-endian integers, arrays without a length prefix) produce exactly
/// the on-disk layout.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Header {
    pub magic: [u8; 3],
    pub scale: f32,
    pub xres: u32,
    pub yres: u32,
    pub bpp: u8,
    /// Opaque; carried through untouched.
    pub unknown: u8,
    /// Declared resolution levels. Only level 0 is ever read.
    pub num_resolutions: u8,
}

impl Header {
    /// Header for a freshly encoded image. Encoding always writes 32-bit pixels.
    pub fn build(width: u32, height: u32) -> Self {
        Self {
            magic: MAGIC_HEADER,
            scale: SUPPORTED_SCALE,
            xres: width,
            yres: height,
            bpp: Depth::Bgra32.bits(),
            unknown: 0,
            num_resolutions: 1,
        }
    }

    /// Reads the 18 header bytes without checking any field.
    pub fn read_unchecked<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DecodeError> {
        let bytes = read_exact_or_truncated(reader, HEADER_SIZE, "header")?;
        let header: Header = bincode::deserialize(&bytes)?;
        debug!("Header read: {:?}", header);
        Ok(header)
    }

    /// Checks magic, scale and depth, in that order.
    pub fn validate(&self) -> Result<Depth, DecodeError> {
        if self.magic != MAGIC_HEADER {
            error!("Unknown magic {:?}", self.magic);
            return Err(DecodeError::MalformedHeader(self.magic));
        }

        // Exact comparison: anything but 1.0 would need scaling we don't do
        if self.scale != SUPPORTED_SCALE {
            error!("Unsupported scale {}", self.scale);
            return Err(DecodeError::UnsupportedScale(self.scale));
        }

        Depth::from_bpp(self.bpp).ok_or_else(|| {
            error!("Unsupported bits per pixel {}", self.bpp);
            DecodeError::UnsupportedDepth(self.bpp)
        })
    }

    /// Reads and validates a header. Nothing past byte 18 is consumed.
    pub fn parse<R: Read + ?Sized>(reader: &mut R) -> Result<Self, DecodeError> {
        let header = Self::read_unchecked(reader)?;
        header.validate()?;
        debug!("Header validated");
        Ok(header)
    }

    pub fn write<W: Write + ?Sized>(&self, writer: &mut W) -> Result<(), EncodingError> {
        bincode::serialize_into(writer, self).map_err(|err| match *err {
            bincode::ErrorKind::Io(io) => EncodingError::Io(io),
            other => EncodingError::Serialization(Box::new(other)),
        })
    }

    /// `None` when `bpp` is not a supported depth.
    pub fn depth(&self) -> Option<Depth> {
        Depth::from_bpp(self.bpp)
    }

    /// Byte length of the full-resolution plane, `None` on overflow.
    pub fn plane_size(&self) -> Option<usize> {
        plane_size(self.xres, self.yres, self.bpp)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header_bytes(magic: &[u8; 3], scale: f32, bpp: u8) -> Vec<u8> {
        let mut bytes = magic.to_vec();
        bytes.extend_from_slice(&scale.to_le_bytes());
        bytes.extend_from_slice(&640u32.to_le_bytes());
        bytes.extend_from_slice(&480u32.to_le_bytes());
        bytes.extend_from_slice(&[bpp, 0xAB, 3]);
        bytes
    }

    #[test]
    fn test_parse_fields() {
        let bytes = header_bytes(b"DC2", 1.0, 24);
        let header = Header::parse(&mut bytes.as_slice()).unwrap();

        assert_eq!(header.magic, *b"DC2");
        assert_eq!(header.scale, 1.0);
        assert_eq!(header.xres, 640);
        assert_eq!(header.yres, 480);
        assert_eq!(header.bpp, 24);
        assert_eq!(header.unknown, 0xAB);
        assert_eq!(header.num_resolutions, 3);
        assert_eq!(header.depth(), Some(Depth::Bgr24));
    }

    #[test]
    fn test_write_is_inverse_of_parse() {
        for bpp in [24, 32] {
            let bytes = header_bytes(b"DC2", 1.0, bpp);
            let header = Header::parse(&mut bytes.as_slice()).unwrap();

            let mut written: Vec<u8> = Vec::new();
            header.write(&mut written).unwrap();
            assert_eq!(written, bytes);
        }
    }

    #[test]
    fn test_build() {
        let header = Header::build(7, 9);
        let mut written: Vec<u8> = Vec::new();
        header.write(&mut written).unwrap();

        assert_eq!(written.len(), HEADER_SIZE);
        assert_eq!(&written[0..3], b"DC2");
        assert_eq!(&written[3..7], &1.0f32.to_le_bytes());
        assert_eq!(&written[7..11], &7u32.to_le_bytes());
        assert_eq!(&written[11..15], &9u32.to_le_bytes());
        assert_eq!(&written[15..], &[32, 0, 1]);
    }

    #[test]
    fn test_parse_stops_after_header() {
        let mut bytes = header_bytes(b"DC2", 1.0, 32);
        bytes.extend_from_slice(&[1, 2, 3]);
        let mut reader = bytes.as_slice();

        Header::parse(&mut reader).unwrap();
        assert_eq!(reader, &[1, 2, 3]);
    }

    #[test]
    fn test_bad_magic() {
        let bytes = header_bytes(b"ABC", 1.0, 24);
        let err = Header::parse(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedHeader(m) if m == *b"ABC"));
    }

    #[test]
    fn test_bad_scale() {
        let bytes = header_bytes(b"DC2", 2.0, 24);
        let err = Header::parse(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedScale(s) if s == 2.0));
    }

    #[test]
    fn test_bad_depth() {
        let bytes = header_bytes(b"DC2", 1.0, 16);
        let err = Header::parse(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedDepth(16)));
    }

    #[test]
    fn test_validation_order() {
        // Every field is wrong; magic is reported first, then scale
        let bytes = header_bytes(b"XYZ", 0.5, 8);
        let err = Header::parse(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, DecodeError::MalformedHeader(_)));

        let bytes = header_bytes(b"DC2", 0.5, 8);
        let err = Header::parse(&mut bytes.as_slice()).unwrap_err();
        assert!(matches!(err, DecodeError::UnsupportedScale(_)));
    }

    #[test]
    fn test_read_unchecked_keeps_invalid_fields() {
        let bytes = header_bytes(b"ABC", 2.0, 16);
        let header = Header::read_unchecked(&mut bytes.as_slice()).unwrap();

        assert_eq!(header.magic, *b"ABC");
        assert_eq!(header.scale, 2.0);
        assert_eq!(header.bpp, 16);
        assert!(header.validate().is_err());
    }

    #[test]
    fn test_short_header() {
        let bytes = header_bytes(b"DC2", 1.0, 24);
        let err = Header::parse(&mut &bytes[..10]).unwrap_err();

        match err {
            DecodeError::TruncatedStream {
                section,
                expected,
                actual,
            } => {
                assert_eq!(section, "header");
                assert_eq!(expected, HEADER_SIZE);
                assert_eq!(actual, 10);
            }
            other => panic!("expected TruncatedStream, got {other:?}"),
        }
    }
}
