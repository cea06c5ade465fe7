use std::ffi::OsString;
use std::path::PathBuf;
use std::process::exit;

use bmpcopy::{BmpCopyError, CopyRequest, Unstoppable};
use clap::{Arg, Command, value_parser};
use log::{Level, error, info};

/// Exit code for a wrong number of arguments.
const USAGE_EXIT_CODE: i32 = 1000;

const USAGE: &str = "Incorrect number of arguments.\nUsage: bmpcopy [input path] [output path]";

#[rustfmt::skip]
fn create_cmd_args() -> Command {
    Command::new("bmpcopy")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(Arg::new("input")
            .value_parser(value_parser!(PathBuf))
            .allow_hyphen_values(true)
            .required(true))
        .arg(Arg::new("output")
            .value_parser(value_parser!(PathBuf))
            .allow_hyphen_values(true)
            .required(true))
}

fn parse_paths() -> Result<(PathBuf, PathBuf), BmpCopyError> {
    // Program name plus exactly two paths. clap consumes a `--` end-of-options
    // marker without counting it, so `bmpcopy -- a b` would parse as two
    // paths; the raw count is checked first to keep that a usage error.
    let args: Vec<OsString> = std::env::args_os().collect();
    if args.len() != 3 {
        return Err(BmpCopyError::Usage);
    }
    let options = create_cmd_args()
        .try_get_matches_from(args)
        .map_err(|_| BmpCopyError::Usage)?;
    let input = options.get_one::<PathBuf>("input").ok_or(BmpCopyError::Usage)?;
    let output = options.get_one::<PathBuf>("output").ok_or(BmpCopyError::Usage)?;
    Ok((input.clone(), output.clone()))
}

fn run() -> Result<(), BmpCopyError> {
    let (input, output) = parse_paths()?;
    let summary = CopyRequest::new().copy_file(&input, &output, Unstoppable)?;
    info!("wrote {} bytes", summary.bytes_written);

    println!("Copy successful!");
    println!("Width: {}", summary.width);
    println!("Height: {}", summary.height);
    Ok(())
}

fn main() {
    if let Err(e) = simple_logger::init_with_level(Level::Warn) {
        eprintln!("could not initialize logger: {e}");
    }

    match run() {
        Ok(()) => {}
        Err(BmpCopyError::Usage) => {
            println!("{USAGE}");
            exit(USAGE_EXIT_CODE);
        }
        Err(e) => {
            error!("Could not copy bitmap: {e}");
            exit(1);
        }
    }
}
