//! Error types for tubecast core

use thiserror::Error;

/// Result type alias for resolution and playback operations
pub type Result<T> = std::result::Result<T, Error>;

/// Resolution and playback error types
#[derive(Error, Debug)]
pub enum Error {
    // Reference errors
    #[error("Wrong video url or id: {0}")]
    InvalidReference(String),

    // Extraction errors
    #[error("Failed to start extractor `{program}`: {source}")]
    ExtractorSpawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Extractor exited with {status} while fetching {url}")]
    ExtractorExit { url: String, status: String },

    #[error("Playlist nesting deeper than {max_depth} levels at {url}")]
    NestingTooDeep { url: String, max_depth: usize },

    #[error("Malformed metadata from {url}: {reason}")]
    MalformedMetadata { url: String, reason: String },

    // Sink errors
    #[error("Failed to start controller `{program}`: {source}")]
    SinkSpawn {
        program: String,
        source: std::io::Error,
    },

    #[error("Controller command `{command}` failed: {reason}")]
    SinkCommand { command: String, reason: String },

    // Discovery errors
    #[error("Device not found: {0}")]
    DeviceNotFound(String),

    #[error("Device discovery failed: {0}")]
    Discovery(String),

    // Configuration errors
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    // Internal errors
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Create a malformed-metadata error
    pub fn malformed(url: impl Into<String>, reason: impl Into<String>) -> Self {
        Error::MalformedMetadata {
            url: url.into(),
            reason: reason.into(),
        }
    }

    /// Returns true if the error came from running the metadata extractor
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            Error::ExtractorSpawn { .. } | Error::ExtractorExit { .. } | Error::NestingTooDeep { .. }
        )
    }

    /// Returns true if the error was caused by user input rather than the environment
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidReference(_) | Error::DeviceNotFound(_) | Error::InvalidConfig(_)
        )
    }

    /// Returns the error code for log output
    pub fn error_code(&self) -> &'static str {
        match self {
            Error::InvalidReference(_) => "INVALID_REFERENCE",
            Error::ExtractorSpawn { .. } => "EXTRACTOR_SPAWN",
            Error::ExtractorExit { .. } => "EXTRACTOR_EXIT",
            Error::NestingTooDeep { .. } => "NESTING_TOO_DEEP",
            Error::MalformedMetadata { .. } => "MALFORMED_METADATA",
            Error::SinkSpawn { .. } => "SINK_SPAWN",
            Error::SinkCommand { .. } => "SINK_COMMAND",
            Error::DeviceNotFound(_) => "DEVICE_NOT_FOUND",
            Error::Discovery(_) => "DISCOVERY",
            Error::InvalidConfig(_) => "INVALID_CONFIG",
            Error::Internal(_) => "INTERNAL",
            Error::Io(_) => "IO",
        }
    }
}
