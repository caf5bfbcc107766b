//! Error types for elfparser.
//!
//! Every operation returns [`Result`]; the runner turns a failure into a
//! printed diagnostic and carries on with the next requested operation.

use crate::formats::elf::ElfError;
use crate::io::error::IoError;
use thiserror::Error;

/// Main error type for elfparser operations.
#[derive(Debug, Error)]
pub enum ElfParserError {
    /// Not an ELF file; nothing downstream may run
    #[error("Invalid ELF format: {0}")]
    InvalidFormat(String),

    /// A section the operation depends on is absent
    #[error("{0} section is not found")]
    MissingSection(String),

    /// Out-of-range offsets or indices found while decoding
    #[error("Malformed ELF: {0}")]
    Malformed(ElfError),

    /// Missing output path, symbol name or unusable option value
    #[error("Bad arguments: {0}")]
    BadArguments(String),

    /// Output file errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Input file errors
    #[error("Input error: {0}")]
    Input(#[from] IoError),

    /// Configuration files and JSON output
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl From<ElfError> for ElfParserError {
    fn from(err: ElfError) -> Self {
        match err {
            ElfError::InvalidMagic => ElfParserError::InvalidFormat(err.to_string()),
            ElfError::MissingSection(name) => ElfParserError::MissingSection(name.to_string()),
            other => ElfParserError::Malformed(other),
        }
    }
}

/// Result type alias for elfparser operations
pub type Result<T> = std::result::Result<T, ElfParserError>;
