use std::{
    fmt,
    num::NonZeroU64,
    string::{String, ToString},
};

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineError {
    pub message: String,
    pub line_number: Option<NonZeroU64>,
}

impl fmt::Display for LineError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self.line_number {
            Some(ln) => write!(f, "Line {}: {}", ln, self.message),
            None => write!(f, "{}", self.message),
        }
    }
}

/// Fatal parse failure. The map document being filled is left holding
/// whatever was committed before the failure and should be discarded.
#[derive(Debug, Clone, Error)]
pub enum Error {
    #[error("{0}")]
    Io(String),
    #[error("{0}")]
    Number(LineError),
}

impl Error {
    pub fn from_number(message: String, line_number: NonZeroU64) -> Error {
        Error::Number(LineError {
            message,
            line_number: Some(line_number),
        })
    }

    pub fn from_io(io_error: std::io::Error) -> Error {
        Error::Io(io_error.to_string())
    }
}

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum WriteError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type ValidationResult = std::result::Result<(), String>;

pub type WriteAttempt = std::result::Result<(), WriteError>;
