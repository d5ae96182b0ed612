//! The image-operation executor boundary.
//!
//! A session never touches pixels itself; it hands the filter kind, the
//! source image and the restricted parameter set to an executor.

use crate::core::error::ExecutionError;
use crate::core::filter::FilterKind;
use crate::core::parameter::{ParameterKind, ParameterSet};
use crate::core::types::ImageValue;
use crate::filters::builtin;
use crate::filters::catalog::builtin_parameters;

/// Capability that performs pixel-level filtering.
///
/// Implementations must be deterministic for a session's recompute to be
/// idempotent.
pub trait ImageOperationExecutor {
    /// Apply `kind` to `source` using `params`.
    ///
    /// `params` only contains kinds the filter accepts. Missing entries take
    /// the parameter's default.
    fn apply(
        &self,
        kind: FilterKind,
        source: &ImageValue,
        params: &ParameterSet,
    ) -> Result<ImageValue, ExecutionError>;

    /// Recognized inputs `kind` accepts on this executor.
    fn declared_parameters(&self, kind: FilterKind) -> &[ParameterKind] {
        builtin_parameters(kind)
    }
}

impl<E: ImageOperationExecutor + ?Sized> ImageOperationExecutor for Box<E> {
    fn apply(
        &self,
        kind: FilterKind,
        source: &ImageValue,
        params: &ParameterSet,
    ) -> Result<ImageValue, ExecutionError> {
        (**self).apply(kind, source, params)
    }

    fn declared_parameters(&self, kind: FilterKind) -> &[ParameterKind] {
        (**self).declared_parameters(kind)
    }
}

/// CPU executor implementing every filter with `image` and `imageproc`.
#[derive(Debug, Clone, Default)]
pub struct BuiltinExecutor;

impl BuiltinExecutor {
    /// Create a new executor.
    pub fn new() -> Self {
        Self
    }
}

/// Resolve a parameter, falling back to its declared default.
pub(crate) fn param(params: &ParameterSet, kind: ParameterKind) -> f64 {
    params.get(kind).unwrap_or_else(|| kind.default_value())
}

impl ImageOperationExecutor for BuiltinExecutor {
    fn apply(
        &self,
        kind: FilterKind,
        source: &ImageValue,
        params: &ParameterSet,
    ) -> Result<ImageValue, ExecutionError> {
        if source.is_empty() {
            return Err(ExecutionError::EmptyExtent {
                width: source.width(),
                height: source.height(),
            });
        }

        let rgba = source.image().to_rgba8();
        let intensity = param(params, ParameterKind::Intensity) as f32;
        let radius = param(params, ParameterKind::Radius) as f32;
        let scale = param(params, ParameterKind::Scale) as f32;

        let output = match kind {
            FilterKind::Crystallize => builtin::stylize::crystallize(&rgba, radius),
            FilterKind::Edges => builtin::stylize::edges(&rgba, intensity),
            FilterKind::GaussianBlur => builtin::blur::gaussian_blur(&rgba, radius),
            FilterKind::Pixellate => builtin::stylize::pixellate(&rgba, scale),
            FilterKind::SepiaTone => builtin::color::sepia_tone(&rgba, intensity),
            FilterKind::UnsharpMask => builtin::sharpen::unsharp_mask(&rgba, radius, intensity),
            FilterKind::Vignette => builtin::color::vignette(&rgba, intensity, radius),
            FilterKind::TwirlDistortion => builtin::distortion::twirl(&rgba, radius),
            FilterKind::MaskToAlpha => builtin::color::mask_to_alpha(&rgba),
            FilterKind::ZoomBlur => builtin::blur::zoom_blur(&rgba, builtin::blur::ZOOM_AMOUNT),
        };

        Ok(ImageValue::with_format(
            image::DynamicImage::ImageRgba8(output),
            source.metadata.format,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{DynamicImage, Rgba, RgbaImage};

    fn gradient(width: u32, height: u32) -> ImageValue {
        let img = RgbaImage::from_fn(width, height, |x, y| {
            Rgba([(x * 255 / width.max(1)) as u8, (y * 255 / height.max(1)) as u8, 128, 255])
        });
        ImageValue::new(DynamicImage::ImageRgba8(img))
    }

    #[test]
    fn test_every_filter_preserves_dimensions() {
        let executor = BuiltinExecutor::new();
        let source = gradient(24, 16);
        let catalog = crate::filters::catalog::FilterCatalog::builtin();

        for kind in FilterKind::all() {
            let params = catalog.defaults_for(*kind);
            let output = executor.apply(*kind, &source, &params).unwrap();
            assert_eq!((output.width(), output.height()), (24, 16), "{}", kind);
        }
    }

    #[test]
    fn test_deterministic_output() {
        let executor = BuiltinExecutor::new();
        let source = gradient(20, 20);
        let params: ParameterSet = [(ParameterKind::Radius, 6.0)].into_iter().collect();

        let a = executor.apply(FilterKind::Crystallize, &source, &params).unwrap();
        let b = executor.apply(FilterKind::Crystallize, &source, &params).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_empty_extent_fails() {
        let executor = BuiltinExecutor::new();
        let source = ImageValue::new(DynamicImage::ImageRgba8(RgbaImage::new(0, 0)));

        let result = executor.apply(FilterKind::SepiaTone, &source, &ParameterSet::new());
        assert_eq!(result, Err(ExecutionError::EmptyExtent { width: 0, height: 0 }));
    }

    #[test]
    fn test_missing_parameter_uses_default() {
        let params = ParameterSet::new();
        assert_eq!(param(&params, ParameterKind::Scale), 50.0);
    }
}
