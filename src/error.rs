//! Error types for zipdll
//!
//! Every failure an entry point can hit is one of these variants. None of
//! them ever reaches the installer host: the driver turns each one into a
//! log row and a single result string.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Main error type for zipdll
#[derive(Error, Debug)]
pub enum ExtractError {
    /// The archive library refused to open the file
    #[error("cannot open archive '{path}': {source}")]
    ArchiveOpen {
        path: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Entry not found in archive
    #[error("entry '{name}' not found in archive '{archive}'")]
    EntryNotFound { name: String, archive: PathBuf },

    /// Entry header could not be read
    #[error("cannot read attributes of entry {index} in archive '{archive}': {source}")]
    EntryAttributes {
        index: usize,
        archive: PathBuf,
        #[source]
        source: zip::result::ZipError,
    },

    /// Entry could not be written to the destination
    #[error("cannot extract '{name}': {source}")]
    Extraction {
        name: String,
        #[source]
        source: io::Error,
    },

    /// Any other failure reported by the archive library
    #[error("{0}")]
    Library(String),
}

impl ExtractError {
    /// Text the archive library gave for this failure.
    ///
    /// This is what lands on the host stack for the library-error path, so
    /// it carries no paths of our own.
    pub fn description(&self) -> String {
        match self {
            ExtractError::ArchiveOpen { source, .. } => zip_description(source),
            ExtractError::EntryAttributes { source, .. } => zip_description(source),
            ExtractError::Extraction { source, .. } => source.to_string(),
            ExtractError::EntryNotFound { name, .. } => format!("entry '{}' not found", name),
            ExtractError::Library(desc) => desc.clone(),
        }
    }

    /// Create an extraction error
    pub fn extraction(name: impl Into<String>, source: impl Into<io::Error>) -> Self {
        ExtractError::Extraction {
            name: name.into(),
            source: source.into(),
        }
    }

    /// Create a library error
    pub fn library(desc: impl Into<String>) -> Self {
        ExtractError::Library(desc.into())
    }
}

/// Readable text for a `zip` error.
///
/// `ZipError::Io` only says "i/o error"; the OS cause is in the wrapped error.
pub fn zip_description(err: &zip::result::ZipError) -> String {
    match err {
        zip::result::ZipError::Io(e) => e.to_string(),
        other => other.to_string(),
    }
}

/// Result type for zipdll operations
pub type Result<T> = std::result::Result<T, ExtractError>;
