use std::path::PathBuf;

use clap::{ArgAction, Parser};
use log::LevelFilter;

#[derive(Parser, Debug)]
#[command(
    name = "dct-converter",
    version,
    about = "Convert DCT images to PNG and back",
    long_about = "Converts <INPUT> into <DEST_DIR>, picking the direction from the \
                  extension: .dct files become .png, .png files become .dct."
)]
pub struct Cli {
    /// Image to convert (.dct or .png)
    pub input: PathBuf,

    /// Folder the converted image is written to
    #[arg(required_unless_present = "info")]
    pub dest_dir: Option<PathBuf>,

    /// Print the header of a .dct file instead of converting it
    #[arg(long)]
    pub info: bool,

    /// More log output (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> LevelFilter {
        match self.verbose {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}
