// Error types shared by key generation, the hybrid codec and file handling

use std::io;

/// Errors that can occur while generating keys or encrypting files
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The caller broke an input contract (bad tolerance, operand order, key size...)
    #[error("validation error: {0}")]
    Validation(String),

    /// A key or container record is missing fields or holds mistyped values
    #[error("format error: {0}")]
    Format(String),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// The bounded prime search ran out of candidates
    #[error("key generation failed: no suitable prime after {attempts} attempts")]
    KeyGenerationFailed { attempts: u64 },

    #[error("cipher error: {0}")]
    Cipher(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Format(e.to_string())
    }
}

impl From<base64::DecodeError> for Error {
    fn from(e: base64::DecodeError) -> Self {
        Error::Format(format!("invalid base64 ciphertext: {}", e))
    }
}

/// Result type used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;
