//! Twirl distortion.

use super::{center, render, sample_bilinear, to_pixel};
use image::RgbaImage;
use std::f32::consts::PI;

/// Rotation applied at the centre of the twirl, in radians.
pub const TWIRL_ANGLE: f32 = PI;

/// Rotate pixels around the centre, strongest at the centre and fading to
/// nothing at `radius`. Pixels outside the radius are copied unchanged.
pub fn twirl(img: &RgbaImage, radius: f32) -> RgbaImage {
    let (cx, cy) = center(img);

    render(img.width(), img.height(), |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let dist = (dx * dx + dy * dy).sqrt();
        if radius <= 0.0 || dist >= radius {
            return *img.get_pixel(x, y);
        }

        let falloff = 1.0 - dist / radius;
        let angle = TWIRL_ANGLE * falloff * falloff;
        let (sin, cos) = angle.sin_cos();
        let sx = cx + dx * cos - dy * sin;
        let sy = cy + dx * sin + dy * cos;
        to_pixel(sample_bilinear(img, sx, sy))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_outside_radius_unchanged() {
        let img = RgbaImage::from_fn(11, 11, |x, y| Rgba([(x * 20) as u8, (y * 20) as u8, 0, 255]));
        let out = twirl(&img, 3.0);
        assert_eq!(out.get_pixel(0, 0), img.get_pixel(0, 0));
        assert_eq!(out.get_pixel(10, 10), img.get_pixel(10, 10));
        assert_ne!(out, img);
    }

    #[test]
    fn test_zero_radius_is_identity() {
        let img = RgbaImage::from_fn(5, 5, |x, y| Rgba([(x * 40) as u8, (y * 40) as u8, 0, 255]));
        assert_eq!(twirl(&img, 0.0), img);
    }
}
