//! Image handle passed between the session, the executor and collaborators.
//!
//! Pixel data lives in an `Arc<DynamicImage>` so the session can hand the
//! derived image to a saver without copying the buffer. Filters never mutate
//! the shared buffer; they always produce a new one.

use image::{DynamicImage, GenericImageView};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

/// Image wrapper with metadata.
#[derive(Debug, Clone)]
pub struct ImageValue {
    /// Image metadata (dimensions, format, etc.)
    pub metadata: ImageMetadata,
    data: Arc<DynamicImage>,
}

/// Image metadata without the pixel data.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Width in pixels
    pub width: u32,
    /// Height in pixels
    pub height: u32,
    /// Format the image was decoded from
    pub format: ImageFormat,
    /// Whether the image has an alpha channel
    pub has_alpha: bool,
}

/// Supported image formats.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    #[default]
    Png,
    Jpeg,
    Unknown,
}

impl ImageFormat {
    /// Guess the format from a file extension.
    pub fn from_extension(ext: &str) -> Self {
        match ext.to_lowercase().as_str() {
            "png" => ImageFormat::Png,
            "jpg" | "jpeg" => ImageFormat::Jpeg,
            _ => ImageFormat::Unknown,
        }
    }

    /// Preferred file extension when writing this format.
    pub fn extension(&self) -> &'static str {
        match self {
            ImageFormat::Png | ImageFormat::Unknown => "png",
            ImageFormat::Jpeg => "jpg",
        }
    }

    /// The matching `image` crate format used for encoding.
    pub fn to_image_format(self) -> image::ImageFormat {
        match self {
            ImageFormat::Png | ImageFormat::Unknown => image::ImageFormat::Png,
            ImageFormat::Jpeg => image::ImageFormat::Jpeg,
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "png"),
            ImageFormat::Jpeg => write!(f, "jpeg"),
            ImageFormat::Unknown => write!(f, "unknown"),
        }
    }
}

impl std::str::FromStr for ImageFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match ImageFormat::from_extension(s) {
            ImageFormat::Unknown => Err(format!("unsupported output format '{}'", s)),
            format => Ok(format),
        }
    }
}

impl ImageValue {
    /// Wrap a decoded image that was produced in memory.
    pub fn new(image: DynamicImage) -> Self {
        Self::with_format(image, ImageFormat::Unknown)
    }

    /// Wrap a decoded image, remembering the format it came from.
    pub fn with_format(image: DynamicImage, format: ImageFormat) -> Self {
        let (width, height) = image.dimensions();
        let metadata = ImageMetadata {
            width,
            height,
            format,
            has_alpha: image.color().has_alpha(),
        };
        Self {
            metadata,
            data: Arc::new(image),
        }
    }

    /// Decode an image from disk.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, image::ImageError> {
        let path = path.as_ref();
        let format = path
            .extension()
            .and_then(|e| e.to_str())
            .map(ImageFormat::from_extension)
            .unwrap_or(ImageFormat::Unknown);
        let img = image::open(path)?;
        log::debug!("Loaded {} ({}x{})", path.display(), img.width(), img.height());
        Ok(Self::with_format(img, format))
    }

    /// Encode the image to `path` in the given format.
    ///
    /// JPEG has no alpha channel, so the pixels are flattened to RGB first.
    pub fn encode_to(&self, path: impl AsRef<Path>, format: ImageFormat) -> Result<(), image::ImageError> {
        match format {
            ImageFormat::Jpeg => {
                DynamicImage::ImageRgb8(self.data.to_rgb8()).save_with_format(path, format.to_image_format())
            }
            _ => self.data.save_with_format(path, format.to_image_format()),
        }
    }

    /// Borrow the pixel data.
    pub fn image(&self) -> &DynamicImage {
        &self.data
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.metadata.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.metadata.height
    }

    /// An image with no pixels has an empty extent and cannot be filtered.
    pub fn is_empty(&self) -> bool {
        self.metadata.width == 0 || self.metadata.height == 0
    }

    /// Compare pixel buffers exactly.
    pub fn pixels_eq(&self, other: &ImageValue) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
            || (self.metadata.width == other.metadata.width
                && self.metadata.height == other.metadata.height
                && self.data.color() == other.data.color()
                && self.data.as_bytes() == other.data.as_bytes())
    }
}

impl PartialEq for ImageValue {
    fn eq(&self, other: &Self) -> bool {
        self.pixels_eq(other)
    }
}
