//! Error types for wavepick

use thiserror::Error;

/// Main error type for instance construction and loading.
#[derive(Debug, Error)]
pub enum WavePickError {
    /// Bounds are inconsistent or structural data is missing.
    #[error("Invalid instance: {0}")]
    InvalidInstance(String),

    /// The instance source could not be parsed.
    #[error("Data format error on line {line}: {message}")]
    DataFormat { line: usize, message: String },

    /// Reading the instance source failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl WavePickError {
    pub(crate) fn invalid(message: impl Into<String>) -> Self {
        WavePickError::InvalidInstance(message.into())
    }

    pub(crate) fn format(line: usize, message: impl Into<String>) -> Self {
        WavePickError::DataFormat {
            line,
            message: message.into(),
        }
    }
}

/// Result type alias for wavepick core operations
pub type Result<T> = std::result::Result<T, WavePickError>;
