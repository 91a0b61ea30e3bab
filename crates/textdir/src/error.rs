use thiserror::Error;

use crate::parse::ParseError;

/// Errors raised while serializing content lines.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SerializeError {
    #[error("END without BEGIN while serializing line {0}")]
    EndWithoutBegin(usize),

    #[error("value cannot be encoded: {0}")]
    Unencodable(String),
}

/// Top-level error for directory processing.
#[derive(Error, Debug)]
pub enum DirectoryError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Serialize(#[from] SerializeError),
}

pub type DirectoryResult<T> = std::result::Result<T, DirectoryError>;
