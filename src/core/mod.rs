//! Core types for the Instafilter pipeline.
//!
//! This module contains the foundational types shared by the catalog, the
//! session and the collaborators:
//! - Filter kinds and their metadata
//! - Parameter kinds, ranges and parameter sets
//! - The image handle
//! - Error types

pub mod error;
pub mod filter;
pub mod parameter;
pub mod types;

// Re-export commonly used types
pub use error::{ExecutionError, InstafilterError, SessionError};
pub use filter::{Category, FilterKind, FilterMetadata};
pub use parameter::{ParameterDefinition, ParameterKind, ParameterSet};
pub use types::{ImageFormat, ImageMetadata, ImageValue};
