use rgb::RGBA8;

/// Stored pixel depth of a DCT plane.
///
/// Channels are kept blue-first on disk; `Bgr24` carries no alpha.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Depth {
    Bgr24,
    Bgra32,
}

impl Depth {
    pub fn from_bpp(bpp: u8) -> Option<Self> {
        match bpp {
            24 => Some(Self::Bgr24),
            32 => Some(Self::Bgra32),
            _ => None,
        }
    }

    /// Bits per pixel as written in the header.
    pub fn bits(self) -> u8 {
        match self {
            Self::Bgr24 => 24,
            Self::Bgra32 => 32,
        }
    }

    pub fn bytes_per_pixel(self) -> usize {
        self.bits() as usize / 8
    }

    pub fn has_alpha(self) -> bool {
        matches!(self, Self::Bgra32)
    }
}

/// Anything that can be encoded: dimensions plus 8-bit RGBA per pixel.
///
/// Sources with wider channels are expected to narrow them before handing
/// them out (16-bit channels shifted right by 8), and sources without alpha
/// should report `0xFF`.
pub trait PixelSource {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn pixel_at(&self, x: u32, y: u32) -> RGBA8;
}

/// Reads the pixel at `(x, y)` out of a raw blue-first plane.
///
/// Returns `None` if the computed offset runs past the end of `data`.
pub fn decode_pixel(data: &[u8], x: u32, y: u32, width: u32, depth: Depth) -> Option<RGBA8> {
    let stride = depth.bytes_per_pixel();
    let i = (y as usize)
        .checked_mul(width as usize)?
        .checked_add(x as usize)?
        .checked_mul(stride)?;
    data.get(i..i.checked_add(stride)?)
        .map(|px| swizzle(px, depth))
}

// Stored blue-first, handed out red-first.
fn swizzle(px: &[u8], depth: Depth) -> RGBA8 {
    match depth {
        Depth::Bgr24 => RGBA8::new(px[2], px[1], px[0], 0xFF),
        Depth::Bgra32 => RGBA8::new(px[2], px[1], px[0], px[3]),
    }
}

/// A decoded DCT plane: row-major, no row padding, blue-first channels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    width: u32,
    height: u32,
    depth: Depth,
    data: Vec<u8>,
}

impl PixelBuffer {
    /// Wraps a raw plane. Returns `None` unless `data` is exactly
    /// `width * height * depth.bytes_per_pixel()` bytes long.
    pub fn from_raw(width: u32, height: u32, depth: Depth, data: Vec<u8>) -> Option<Self> {
        let expected = (width as usize)
            .checked_mul(height as usize)?
            .checked_mul(depth.bytes_per_pixel())?;
        if data.len() != expected {
            return None;
        }

        Some(Self {
            width,
            height,
            depth,
            data,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn depth(&self) -> Depth {
        self.depth
    }

    pub fn bpp(&self) -> u8 {
        self.depth.bits()
    }

    /// The plane exactly as stored in the file.
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn get_pixel(&self, x: u32, y: u32) -> Option<RGBA8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        decode_pixel(&self.data, x, y, self.width, self.depth)
    }

    /// All pixels, top-to-bottom and left-to-right.
    pub fn pixels(&self) -> impl Iterator<Item = RGBA8> + '_ {
        let depth = self.depth;
        self.data
            .chunks_exact(depth.bytes_per_pixel())
            .map(move |px| swizzle(px, depth))
    }
}

impl PixelSource for PixelBuffer {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }

    fn pixel_at(&self, x: u32, y: u32) -> RGBA8 {
        self.get_pixel(x, y).unwrap_or(RGBA8::new(0, 0, 0, 0))
    }
}
