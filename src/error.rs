//! Error types for zipflow

use std::io;

/// Result type for zipflow operations
pub type Result<T> = std::result::Result<T, ZipError>;

/// Error types that can occur during ZIP writing
#[derive(Debug)]
pub enum ZipError {
    /// I/O error from the underlying sink or a walked file
    Io(io::Error),
    /// An API call was made in a state that doesn't permit it
    InvalidState(&'static str),
    /// An argument was out of range or otherwise invalid
    InvalidArgument(String),
    /// Entry name exceeds the 16-bit ZIP name-length field
    NameTooLong(usize),
    /// The sink has latched a write or flush failure; no further bytes are emitted
    WriteFailed,
}

impl std::fmt::Display for ZipError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ZipError::Io(e) => write!(f, "I/O error: {}", e),
            ZipError::InvalidState(msg) => {
                write!(f, "invalid operation for current state: {}", msg)
            }
            ZipError::InvalidArgument(msg) => write!(f, "invalid argument: {}", msg),
            ZipError::NameTooLong(len) => {
                write!(f, "entry name too long: {} bytes (max 65535)", len)
            }
            ZipError::WriteFailed => write!(f, "write failed; session is latched"),
        }
    }
}

impl std::error::Error for ZipError {}

impl From<io::Error> for ZipError {
    fn from(err: io::Error) -> Self {
        ZipError::Io(err)
    }
}
