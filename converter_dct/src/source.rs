use image::{DynamicImage, Rgb, RgbImage, Rgba, RgbaImage};
use lib_dct::{PixelBuffer, PixelSource, RGBA8};

/// A decoded standard image, narrowed to 8-bit RGBA so it can be encoded as DCT.
pub struct ImageSource {
    image: RgbaImage,
}

impl ImageSource {
    pub fn new(image: DynamicImage) -> Self {
        Self {
            image: narrow_to_rgba8(image),
        }
    }
}

/// 16-bit channels keep their high byte; everything else goes through `to_rgba8`.
fn narrow_to_rgba8(image: DynamicImage) -> RgbaImage {
    match image {
        DynamicImage::ImageLuma16(_)
        | DynamicImage::ImageLumaA16(_)
        | DynamicImage::ImageRgb16(_)
        | DynamicImage::ImageRgba16(_) => {
            let wide = image.to_rgba16();
            RgbaImage::from_fn(wide.width(), wide.height(), |x, y| {
                let [r, g, b, a] = wide.get_pixel(x, y).0;
                Rgba([(r >> 8) as u8, (g >> 8) as u8, (b >> 8) as u8, (a >> 8) as u8])
            })
        }
        other => other.to_rgba8(),
    }
}

impl PixelSource for ImageSource {
    fn width(&self) -> u32 {
        self.image.width()
    }

    fn height(&self) -> u32 {
        self.image.height()
    }

    fn pixel_at(&self, x: u32, y: u32) -> RGBA8 {
        match self.image.get_pixel_checked(x, y) {
            Some(Rgba([r, g, b, a])) => RGBA8::new(*r, *g, *b, *a),
            None => RGBA8::new(0, 0, 0, 0),
        }
    }
}

/// Converts a decoded DCT into an image the `image` crate can save.
///
/// 24-bit planes become RGB, 32-bit planes RGBA.
pub fn to_dynamic_image(buffer: &PixelBuffer) -> DynamicImage {
    let (width, height) = (buffer.width(), buffer.height());

    if buffer.depth().has_alpha() {
        DynamicImage::ImageRgba8(RgbaImage::from_fn(width, height, |x, y| {
            let px = buffer.pixel_at(x, y);
            Rgba([px.r, px.g, px.b, px.a])
        }))
    } else {
        DynamicImage::ImageRgb8(RgbImage::from_fn(width, height, |x, y| {
            let px = buffer.pixel_at(x, y);
            Rgb([px.r, px.g, px.b])
        }))
    }
}
