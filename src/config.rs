use std::ffi::OsString;
use std::path::PathBuf;

use crate::error::Error;

const PROGRAM: &str = "charfreq";

/// Paths for a single run, taken from the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub input: PathBuf,
    pub output: PathBuf,
}

impl Config {
    /// Builds a config from raw process arguments, program name first.
    /// Exactly two paths must follow it; they need not be valid Unicode.
    pub fn from_args(args: &[OsString]) -> Result<Config, Error> {
        match args {
            [_, input, output] => Ok(Config {
                input: PathBuf::from(input),
                output: PathBuf::from(output),
            }),
            _ => Err(Error::Usage {
                program: args
                    .first()
                    .map(|program| program.to_string_lossy().into_owned())
                    .unwrap_or_else(|| PROGRAM.to_string()),
            }),
        }
    }
}
