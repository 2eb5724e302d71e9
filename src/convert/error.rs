//! Error types for image conversion.
//!
//! Every failure that can happen while converting a single file is captured by
//! [`ConvertError`]. The conversion service never lets these escape as panics or
//! propagated errors; they end up inside a
//! [`ConversionResult::Failed`](super::ConversionResult).

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while converting an image.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Source file or directory does not exist.
    #[error("File not found: {}", path.display())]
    NotFound {
        /// The path that was looked up
        path: PathBuf,
    },

    /// A user-supplied option is malformed: target format, icon size list, etc.
    #[error("Invalid option: {0}")]
    InvalidOption(String),

    /// The imaging library failed to decode or encode the file.
    #[error("{file}: {source}")]
    Image {
        /// File name of the source image
        file: String,
        #[source]
        source: image::ImageError,
    },

    /// Filesystem failure around the conversion (creating directories, writing output).
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        /// Directory or file the operation touched
        path: PathBuf,
        /// Underlying OS error
        #[source]
        source: io::Error,
    },
}

impl ConvertError {
    pub fn invalid_option(message: impl Into<String>) -> Self {
        ConvertError::InvalidOption(message.into())
    }

    /// Short machine-friendly name of the error kind, used in JSON reports.
    pub fn kind(&self) -> &'static str {
        match self {
            ConvertError::NotFound { .. } => "not_found",
            ConvertError::InvalidOption(_) => "invalid_option",
            ConvertError::Image { .. } => "encode_decode_failure",
            ConvertError::Io { .. } => "io",
        }
    }
}
