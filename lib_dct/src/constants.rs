pub const FORMAT_NAME: &str = "DCT";
pub const FILE_EXT: &str = "dct";
pub const PNG_EXT: &str = "png";

pub const MAGIC_HEADER: [u8; 3] = *b"DC2";

/// Serialized header length: magic, scale, xres, yres, bpp, unknown, resolution count.
pub const HEADER_SIZE: usize = 18;

/// The only scale factor the format is known to use.
pub const SUPPORTED_SCALE: f32 = 1.0;
