//! Error types of the library

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading volumes and files
#[derive(Error, Debug)]
pub enum Error {
    /// File could not be opened or mapped
    #[error("cannot read '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path exists, but does not lead to a regular file
    #[error("'{0}' is not a file")]
    NotAFile(PathBuf),

    /// One of the volume dimensions is zero
    #[error("invalid volume dimensions {0}x{1}x{2}")]
    InvalidDimensions(usize, usize, usize),

    /// Less data than the dimensions require
    #[error("volume data too short: expected {expected} bytes, got {actual}")]
    SizeMismatch { expected: usize, actual: usize },

    /// Dimensions could not be read from a file name
    #[error("cannot parse volume dimensions from '{0}'")]
    FileName(String),
}

/// A specialized Result type for volume operations
pub type Result<T> = std::result::Result<T, Error>;
