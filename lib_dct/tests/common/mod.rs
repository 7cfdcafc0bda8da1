#![allow(dead_code)]

/// Builds an 18-byte header in file order.
pub fn header(magic: &[u8; 3], scale: f32, xres: u32, yres: u32, bpp: u8, num_res: u8) -> Vec<u8> {
    let mut bytes = magic.to_vec();
    bytes.extend_from_slice(&scale.to_le_bytes());
    bytes.extend_from_slice(&xres.to_le_bytes());
    bytes.extend_from_slice(&yres.to_le_bytes());
    bytes.push(bpp);
    bytes.push(0);
    bytes.push(num_res);
    bytes
}

/// A complete single-plane stream.
pub fn stream(xres: u32, yres: u32, bpp: u8, plane: &[u8]) -> Vec<u8> {
    let mut bytes = header(b"DC2", 1.0, xres, yres, bpp, 1);
    bytes.extend_from_slice(plane);
    bytes
}

/// 2x1, 24-bit: a red pixel then a green one, stored blue-first.
pub const RED_GREEN_BGR: [u8; 6] = [0, 0, 255, 0, 255, 0];

pub const GRADIENT_WIDTH: u32 = 16;
pub const GRADIENT_HEIGHT: u32 = 16;

/// 16x16 BGRA plane with every channel varying, alpha included.
pub fn gradient_bgra() -> Vec<u8> {
    let mut plane = Vec::with_capacity((GRADIENT_WIDTH * GRADIENT_HEIGHT * 4) as usize);
    for y in 0..GRADIENT_HEIGHT {
        for x in 0..GRADIENT_WIDTH {
            let b = (x * 16) as u8;
            let g = (y * 16) as u8;
            let r = ((x + y) * 8) as u8;
            let a = 255 - (x * y) as u8;
            plane.extend_from_slice(&[b, g, r, a]);
        }
    }
    plane
}
