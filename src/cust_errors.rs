//! Custom error types for instance import.

use std::io;
use std::num::ParseIntError;
use thiserror::Error;

/// Errors that can occur while an instance is read.
#[derive(Debug, Error)]
pub enum ImportError {
    #[error("input is malformed")]
    InputMalformedError,
    #[error("io error: {0}")]
    IoError(#[from] io::Error),
    #[error("could not parse a number: {0}")]
    ParseError(#[from] ParseIntError),
}
