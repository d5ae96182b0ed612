//! Error types for Instafilter.
//!
//! Uses thiserror for structured errors with context. Session errors are
//! never fatal: the session stays consistent and usable after any of them.

use crate::core::filter::FilterKind;
use crate::core::parameter::ParameterKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use uuid::Uuid;

/// Unique identifier for a filter session, used to correlate log lines.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", &self.0.to_string()[..8])
    }
}

/// Top-level error type for Instafilter.
#[derive(Error, Debug)]
pub enum InstafilterError {
    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("Execution error: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Save error: {0}")]
    Save(#[from] SaveError),

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Errors reported by a filter session.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SessionError {
    /// The parameter is not accepted by the current filter, or its value is
    /// outside the declared range. Nothing was changed.
    #[error("Invalid parameter '{parameter}' for {filter}: {reason}")]
    InvalidParameter {
        filter: FilterKind,
        parameter: ParameterKind,
        reason: String,
    },

    /// The executor could not produce an output. The derived image was
    /// cleared; a later change may succeed.
    #[error("Processing with {filter} failed: {reason}")]
    ProcessingFailed { filter: FilterKind, reason: String },
}

impl SessionError {
    /// Every session error leaves the session usable.
    pub fn is_recoverable(&self) -> bool {
        true
    }

    /// Get suggestion for fixing this error.
    pub fn suggested_fix(&self) -> Option<String> {
        match self {
            SessionError::InvalidParameter { filter, parameter, .. } => {
                let definition = parameter.definition();
                Some(format!(
                    "{} accepts {} between {} and {} only if listed by 'info {}'",
                    filter,
                    parameter,
                    definition.min,
                    definition.max,
                    filter.id()
                ))
            }
            SessionError::ProcessingFailed { .. } => {
                Some("Pick a different photo or adjust the parameters".to_string())
            }
        }
    }
}

/// Errors raised by an image operation executor.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExecutionError {
    #[error("Source image has an empty extent ({width}x{height})")]
    EmptyExtent { width: u32, height: u32 },

    #[error("Image processing error: {0}")]
    ImageProcessing(String),
}

/// Errors from the photo library collaborator.
#[derive(Error, Debug)]
pub enum SaveError {
    #[error("Photo library directory {0} is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to encode image: {0}")]
    Encode(#[from] image::ImageError),
}

/// Errors from the authenticator collaborator.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    #[error("Authentication unavailable: {0}")]
    Unavailable(String),

    #[error("Authentication rejected: {0}")]
    Rejected(String),
}

/// Errors loading configuration.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Unknown filter in config: {0}")]
    UnknownFilter(String),
}

/// Result type alias for Instafilter operations.
pub type InstafilterResult<T> = Result<T, InstafilterError>;

/// Result type alias for session operations.
pub type SessionResult<T> = Result<T, SessionError>;
