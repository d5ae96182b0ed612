//! Application configuration loaded from TOML.
//!
//! ```toml
//! default_filter = "sepia_tone"
//! output_dir = "photos"
//! output_format = "jpeg"
//! require_unlock = false
//! ```
//!
//! Every key is optional.

use crate::core::error::ConfigError;
use crate::core::filter::FilterKind;
use crate::core::types::ImageFormat;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Default directory finished photos are written to.
pub const DEFAULT_OUTPUT_DIR: &str = "instafilter-photos";

/// Resolved application configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Filter a new session starts on.
    pub default_filter: FilterKind,
    /// Photo library directory.
    pub output_dir: PathBuf,
    /// Encoding for saved photos.
    pub output_format: ImageFormat,
    /// Whether the access gate starts locked.
    pub require_unlock: bool,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            default_filter: FilterKind::SepiaTone,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            output_format: ImageFormat::Png,
            require_unlock: false,
        }
    }
}

/// On-disk shape; filter names are resolved leniently after parsing.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct RawConfig {
    default_filter: Option<String>,
    output_dir: Option<PathBuf>,
    output_format: Option<ImageFormat>,
    require_unlock: Option<bool>,
}

impl AppConfig {
    /// Parse configuration text.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        let defaults = Self::default();

        let default_filter = match raw.default_filter {
            Some(name) => name.parse().map_err(|_| ConfigError::UnknownFilter(name))?,
            None => defaults.default_filter,
        };

        Ok(Self {
            default_filter,
            output_dir: raw.output_dir.unwrap_or(defaults.output_dir),
            output_format: raw.output_format.unwrap_or(defaults.output_format),
            require_unlock: raw.require_unlock.unwrap_or(defaults.require_unlock),
        })
    }

    /// Load configuration from a file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&text)?;
        log::debug!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Load from `path` if given, otherwise use defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }
}
