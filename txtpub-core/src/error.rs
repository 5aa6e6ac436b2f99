//! Error types for txtpub core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using TxtpubError
pub type Result<T> = std::result::Result<T, TxtpubError>;

/// Top-level error type for a single conversion
#[derive(Debug, Error)]
pub enum TxtpubError {
    #[error("Language \"{0}\" not supported")]
    UnsupportedLanguage(String),

    #[error("Read error: {0}")]
    Read(#[from] ReadError),

    #[error("Write error: {0}")]
    Write(#[from] WriteError),

    #[error("Conversion error: {0}")]
    Conversion(#[from] ConversionError),
}

/// Errors that occur while loading the source text
#[derive(Debug, Error)]
pub enum ReadError {
    #[error("cannot read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid UTF-8 (first invalid byte at offset {offset})", path.display())]
    InvalidUtf8 { path: PathBuf, offset: usize },
}

/// Errors that occur while writing the output package
#[derive(Debug, Error)]
pub enum WriteError {
    #[error("cannot create output in {}: {source}", path.display())]
    Create {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot move finished package to {}: {source}", path.display())]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("output {} is the input file", path.display())]
    OverwritesInput { path: PathBuf },
}

/// Errors that occur while assembling or serializing a package
#[derive(Debug, Error)]
pub enum ConversionError {
    #[error("Encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Duplicate resource name: {0}")]
    DuplicateResource(String),
}
