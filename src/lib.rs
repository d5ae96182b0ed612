//! # Instafilter - Single-photo Filter Pipeline
//!
//! Instafilter applies one of ten image filters to a photo, with up to three
//! tunable parameters (intensity, radius, scale), and keeps a live derived
//! image that is recomputed after every change.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use instafilter::prelude::*;
//!
//! let mut session = FilterSession::builtin();
//! session.set_source_image(ImageValue::open("photo.jpg")?)?;
//! session.select_filter(FilterKind::Vignette)?;
//! session.set_parameter(ParameterKind::Intensity, 0.8)?;
//!
//! if let Some(image) = session.take_derived_image() {
//!     let library = DirectoryPhotoLibrary::new("album", ImageFormat::Png);
//!     library.write_to_photo_album(image, ImageSaver::new());
//! }
//! ```
//!
//! ## Architecture
//!
//! - [`core`]: filter and parameter kinds, the image handle, errors
//! - [`filters`]: the catalog, the executor boundary and built-in filters
//! - [`session`]: the filter session that owns the current selection
//! - [`platform`]: photo library and access gate collaborators
//! - [`config`]: TOML configuration
//!
//! ## Custom Executors
//!
//! Implement [`ImageOperationExecutor`] to run filters elsewhere:
//!
//! ```rust,ignore
//! use instafilter::prelude::*;
//!
//! struct Passthrough;
//!
//! impl ImageOperationExecutor for Passthrough {
//!     fn apply(
//!         &self,
//!         _kind: FilterKind,
//!         source: &ImageValue,
//!         _params: &ParameterSet,
//!     ) -> Result<ImageValue, ExecutionError> {
//!         Ok(source.clone())
//!     }
//! }
//!
//! let session = FilterSession::new(Passthrough);
//! ```
//!
//! [`ImageOperationExecutor`]: crate::filters::executor::ImageOperationExecutor

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod config;
pub mod core;
pub mod filters;
pub mod platform;
pub mod session;

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
/// ```rust,ignore
/// use instafilter::prelude::*;
/// ```
pub mod prelude {
    // Core types
    pub use crate::core::filter::{Category, FilterKind, FilterMetadata};
    pub use crate::core::parameter::{ParameterDefinition, ParameterKind, ParameterSet, UiHint};
    pub use crate::core::types::{ImageFormat, ImageMetadata, ImageValue};

    // Errors
    pub use crate::core::error::{
        AuthError, ConfigError, ExecutionError, InstafilterError, SaveError, SessionError, SessionId,
    };

    // Filters
    pub use crate::filters::catalog::{AcceptedParameters, FilterCatalog};
    pub use crate::filters::executor::{BuiltinExecutor, ImageOperationExecutor};

    // Session
    pub use crate::session::{FilterSession, SessionStats};

    // Platform collaborators
    pub use crate::platform::auth::{AccessGate, Authenticator, GateState};
    pub use crate::platform::photo_library::{DirectoryPhotoLibrary, ImageSaver, PhotoLibrary, SavedPhoto};

    // Configuration
    pub use crate::config::AppConfig;
}

/// Library version.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name.
pub const NAME: &str = env!("CARGO_PKG_NAME");
