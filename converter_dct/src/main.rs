mod cli;
mod convert;
mod source;

use std::error::Error;
use std::process::ExitCode;

use clap::Parser;

use cli::Cli;
use convert::ConvertError;

fn main() -> ExitCode {
    let cli = Cli::parse();
    lib_dct::init_logging(env!("CARGO_CRATE_NAME"), cli.log_level());

    match run(&cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {err}");
            let mut cause = err.source();
            while let Some(inner) = cause {
                eprintln!("  caused by: {inner}");
                cause = inner.source();
            }
            ExitCode::FAILURE
        }
    }
}

fn run(cli: &Cli) -> Result<(), ConvertError> {
    if cli.info {
        print!("{}", convert::describe(&cli.input)?);
        return Ok(());
    }

    let dest_dir = cli
        .dest_dir
        .as_deref()
        .ok_or(ConvertError::MissingDestination)?;
    let output = convert::convert(&cli.input, dest_dir)?;
    println!("Wrote {}", output.display());

    Ok(())
}
