//! Error types for sealed-props.
//!
//! Every failure of a load, store or codec call surfaces as a distinct
//! variant so callers can match on the kind. Property values and key
//! material are never included in error messages; property keys and line
//! numbers are.

use std::path::PathBuf;

/// Properties error types covering all engine operations.
#[derive(Debug, thiserror::Error)]
pub enum PropertiesError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Properties file not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Parse error on line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("Malformed line {line}: missing '=' separator")]
    MalformedLine { line: usize },

    #[error("Decoding failed on line {line}: {reason}")]
    Decoding { line: usize, reason: String },

    #[error("Decryption failed on line {line}: {reason}")]
    Decryption { line: usize, reason: String },

    #[error("Encryption failed: {0}")]
    Encryption(String),

    #[error("Invalid key: {0}")]
    InvalidKey(String),
}

/// Coarse grouping of [`PropertiesError`] variants.
///
/// Front ends use this to pick an exit status or a user-facing hint
/// without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// Filesystem failure, including a missing input file.
    Io,
    /// The cipher rejected a value or ciphertext.
    Crypto,
    /// The input text is not in the expected format.
    Format,
    /// Key material is unusable.
    Config,
}

impl PropertiesError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            PropertiesError::Io(_) | PropertiesError::FileNotFound(_) => ErrorCategory::Io,
            PropertiesError::Decryption { .. } | PropertiesError::Encryption(_) => {
                ErrorCategory::Crypto
            }
            PropertiesError::Parse { .. }
            | PropertiesError::MalformedLine { .. }
            | PropertiesError::Decoding { .. } => ErrorCategory::Format,
            PropertiesError::InvalidKey(_) => ErrorCategory::Config,
        }
    }
}

/// Convenience Result alias.
pub type Result<T> = std::result::Result<T, PropertiesError>;
