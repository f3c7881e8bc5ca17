//! Shared vocabulary for the configurator and the dashboard.

mod sample;
mod types;

pub use sample::*;
pub use types::*;

use thiserror::Error;

/// Failure kinds surfaced by both screens.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConsoleError {
    #[error("unsupported file type: {0}")]
    UnsupportedFileType(String),
    #[error("upload processing failed: {0}")]
    UploadProcessingFailed(String),
    #[error("validation failed: {field}")]
    ValidationFailed { field: &'static str },
    #[error("not found: {0}")]
    NotFound(String),
    #[error("unknown latency channel: {0}")]
    UnknownChannel(String),
}

impl ConsoleError {
    pub fn invalid(field: &'static str) -> Self {
        Self::ValidationFailed { field }
    }
}
