pub mod constants;
pub mod image;
pub mod pixel;

use log::*;
use std::io::Write;

pub use crate::image::decoder::{decode, decode_bytes, decode_file, decode_with_header, DecodeError};
pub use crate::image::encoder::{encode, encode_file, encode_to_vec, EncodingError};
pub use crate::image::format::Header;
pub use crate::pixel::{Depth, PixelBuffer, PixelSource};
pub use rgb::RGBA8;

/// Routes `log` output for this crate and `app_target` to stderr at `level`.
///
/// Everything else stays at `Warn`. `RUST_LOG`, when set, takes precedence.
pub fn init_logging(app_target: &str, level: LevelFilter) {
    env_logger::Builder::new()
        .target(env_logger::Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter(Some("lib_dct"), level)
        .filter(Some(app_target), level)
        .parse_default_env()
        .format(|buf, record| {
            writeln!(
                buf,
                "[{} {}:{}] {}",
                record.level(),
                record.file().unwrap_or("unknown"),
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .init();
}
