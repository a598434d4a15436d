use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Usage: {program} <inputFile> <outputFile>\nExample: {program} wap.txt wap_output.txt\nExample: {program} input.txt count.txt")]
    Usage { program: String },

    #[error("Error: Input file '{}' not found.", path.display())]
    InputNotFound { path: PathBuf },

    #[error("A file I/O error occurred: {}: {source}", path.display())]
    Io { path: PathBuf, source: io::Error },

    #[error("File access denied: {}: {source}", path.display())]
    Permission { path: PathBuf, source: io::Error },

    #[error("An unexpected error occurred: {}: {source}", path.display())]
    Unexpected { path: PathBuf, source: io::Error },
}

impl Error {
    /// Sorts an I/O failure on `path` into its reporting category.
    pub fn from_io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        let path = path.into();
        match source.kind() {
            io::ErrorKind::PermissionDenied => Error::Permission { path, source },
            // failures that do not come from the filesystem itself
            io::ErrorKind::InvalidData
            | io::ErrorKind::Unsupported
            | io::ErrorKind::OutOfMemory => Error::Unexpected { path, source },
            _ => Error::Io { path, source },
        }
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Error::Usage { .. } => 2,
            _ => 1,
        }
    }
}
