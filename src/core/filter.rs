//! Filter kinds and their metadata.
//!
//! The set of filters is closed: every kind is known at compile time, so
//! lookups are exhaustive matches instead of string-keyed tables.

use crate::core::parameter::ParameterKind;
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the ten available image filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterKind {
    Crystallize,
    Edges,
    GaussianBlur,
    Pixellate,
    SepiaTone,
    UnsharpMask,
    Vignette,
    TwirlDistortion,
    MaskToAlpha,
    ZoomBlur,
}

impl FilterKind {
    /// All filters in menu order.
    pub fn all() -> &'static [FilterKind] {
        &[
            FilterKind::Crystallize,
            FilterKind::Edges,
            FilterKind::GaussianBlur,
            FilterKind::Pixellate,
            FilterKind::SepiaTone,
            FilterKind::UnsharpMask,
            FilterKind::Vignette,
            FilterKind::TwirlDistortion,
            FilterKind::MaskToAlpha,
            FilterKind::ZoomBlur,
        ]
    }

    /// Stable snake_case identifier (e.g. "sepia_tone").
    pub fn id(&self) -> &'static str {
        match self {
            FilterKind::Crystallize => "crystallize",
            FilterKind::Edges => "edges",
            FilterKind::GaussianBlur => "gaussian_blur",
            FilterKind::Pixellate => "pixellate",
            FilterKind::SepiaTone => "sepia_tone",
            FilterKind::UnsharpMask => "unsharp_mask",
            FilterKind::Vignette => "vignette",
            FilterKind::TwirlDistortion => "twirl_distortion",
            FilterKind::MaskToAlpha => "mask_to_alpha",
            FilterKind::ZoomBlur => "zoom_blur",
        }
    }

    /// Menu label.
    pub fn display_name(&self) -> &'static str {
        match self {
            FilterKind::Crystallize => "Crystallize",
            FilterKind::Edges => "Edges",
            FilterKind::GaussianBlur => "Gaussian Blur",
            FilterKind::Pixellate => "Pixellate",
            FilterKind::SepiaTone => "Sepia Tone",
            FilterKind::UnsharpMask => "Unsharp Mask",
            FilterKind::Vignette => "Vignette",
            FilterKind::TwirlDistortion => "Twirl Distortion",
            FilterKind::MaskToAlpha => "Mask to Alpha",
            FilterKind::ZoomBlur => "Zoom Blur",
        }
    }

    /// Category used to group the filter in menus.
    pub fn category(&self) -> Category {
        match self {
            FilterKind::GaussianBlur | FilterKind::ZoomBlur => Category::Blur,
            FilterKind::UnsharpMask => Category::Sharpen,
            FilterKind::Edges => Category::Edge,
            FilterKind::SepiaTone | FilterKind::Vignette => Category::Color,
            FilterKind::Crystallize | FilterKind::Pixellate => Category::Stylize,
            FilterKind::TwirlDistortion => Category::Distortion,
            FilterKind::MaskToAlpha => Category::Composite,
        }
    }
}

impl Default for FilterKind {
    fn default() -> Self {
        FilterKind::SepiaTone
    }
}

impl fmt::Display for FilterKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

impl std::str::FromStr for FilterKind {
    type Err = String;

    /// Accepts either the id or the display name, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        FilterKind::all()
            .iter()
            .copied()
            .find(|k| k.id() == needle || k.display_name().to_lowercase() == needle)
            .ok_or_else(|| format!("unknown filter '{}'", s))
    }
}

/// Category for organizing filters in the UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Blur effects
    Blur,
    /// Sharpening effects
    Sharpen,
    /// Edge detection and effects
    Edge,
    /// Color manipulation
    Color,
    /// Cell and block stylization
    Stylize,
    /// Geometric distortion
    Distortion,
    /// Alpha and compositing operations
    Composite,
}

impl Category {
    /// Get the display name for this category.
    pub fn display_name(&self) -> &'static str {
        match self {
            Category::Blur => "Blur",
            Category::Sharpen => "Sharpen",
            Category::Edge => "Edge",
            Category::Color => "Color",
            Category::Stylize => "Stylize",
            Category::Distortion => "Distortion",
            Category::Composite => "Composite",
        }
    }

    /// Get all categories in display order.
    pub fn all() -> &'static [Category] {
        &[
            Category::Color,
            Category::Blur,
            Category::Sharpen,
            Category::Edge,
            Category::Stylize,
            Category::Distortion,
            Category::Composite,
        ]
    }
}

/// Metadata describing a filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilterMetadata {
    /// Which filter this describes
    pub kind: FilterKind,
    /// Unique identifier (e.g., "gaussian_blur")
    pub id: String,
    /// Human-readable name (e.g., "Gaussian Blur")
    pub name: String,
    /// Category for UI organization
    pub category: Category,
    /// Detailed description
    pub description: String,
    /// Recognized parameters the filter accepts
    pub parameters: Vec<ParameterKind>,
    /// Searchable tags
    pub tags: Vec<String>,
}

impl FilterMetadata {
    /// Create a new metadata builder.
    pub fn builder(kind: FilterKind) -> FilterMetadataBuilder {
        FilterMetadataBuilder::new(kind)
    }

    /// Whether the filter accepts `kind`.
    pub fn accepts(&self, kind: ParameterKind) -> bool {
        self.parameters.contains(&kind)
    }
}

/// Builder for FilterMetadata.
pub struct FilterMetadataBuilder {
    kind: FilterKind,
    description: String,
    parameters: Vec<ParameterKind>,
    tags: Vec<String>,
}

impl FilterMetadataBuilder {
    /// Create a new builder; id, name and category come from the kind.
    pub fn new(kind: FilterKind) -> Self {
        Self {
            kind,
            description: String::new(),
            parameters: Vec::new(),
            tags: Vec::new(),
        }
    }

    /// Set the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    /// Add an accepted parameter.
    pub fn parameter(mut self, kind: ParameterKind) -> Self {
        if !self.parameters.contains(&kind) {
            self.parameters.push(kind);
        }
        self
    }

    /// Add multiple tags.
    pub fn tags(mut self, tags: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.tags.extend(tags.into_iter().map(|t| t.into()));
        self
    }

    /// Build the metadata.
    pub fn build(mut self) -> FilterMetadata {
        self.parameters.sort();
        FilterMetadata {
            kind: self.kind,
            id: self.kind.id().to_string(),
            name: self.kind.display_name().to_string(),
            category: self.kind.category(),
            description: self.description,
            parameters: self.parameters,
            tags: self.tags,
        }
    }
}
