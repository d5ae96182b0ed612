//! Color filters: sepia tone, vignette and mask-to-alpha.

use super::{center, render, to_pixel};
use image::RgbaImage;

/// Blend towards the classic sepia matrix by `intensity` (0 keeps the input).
pub fn sepia_tone(img: &RgbaImage, intensity: f32) -> RgbaImage {
    let intensity = intensity.clamp(0.0, 1.0);

    render(img.width(), img.height(), |x, y| {
        let [r, g, b, a] = img.get_pixel(x, y).0.map(f32::from);

        let tr = (0.393 * r + 0.769 * g + 0.189 * b).min(255.0);
        let tg = (0.349 * r + 0.686 * g + 0.168 * b).min(255.0);
        let tb = (0.272 * r + 0.534 * g + 0.131 * b).min(255.0);

        to_pixel([
            r + (tr - r) * intensity,
            g + (tg - g) * intensity,
            b + (tb - b) * intensity,
            a,
        ])
    })
}

/// Darken towards the borders.
///
/// Pixels within `radius` of the centre fall off smoothly; everything beyond
/// is darkened by the full `intensity`.
pub fn vignette(img: &RgbaImage, intensity: f32, radius: f32) -> RgbaImage {
    let intensity = intensity.clamp(0.0, 1.0);
    let (cx, cy) = center(img);

    render(img.width(), img.height(), |x, y| {
        let px = img.get_pixel(x, y).0.map(f32::from);
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let dist = (dx * dx + dy * dy).sqrt();

        let falloff = if radius <= 0.0 {
            1.0
        } else {
            let t = (dist / radius).min(1.0);
            t * t * (3.0 - 2.0 * t)
        };
        let factor = 1.0 - intensity * falloff;

        to_pixel([px[0] * factor, px[1] * factor, px[2] * factor, px[3]])
    })
}

/// Use luminance as alpha over a white image.
pub fn mask_to_alpha(img: &RgbaImage) -> RgbaImage {
    render(img.width(), img.height(), |x, y| {
        let [r, g, b, _] = img.get_pixel(x, y).0.map(f32::from);
        let luma = 0.2126 * r + 0.7152 * g + 0.0722 * b;
        to_pixel([255.0, 255.0, 255.0, luma])
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_sepia_zero_intensity_is_identity() {
        let img = RgbaImage::from_pixel(3, 3, Rgba([10, 200, 90, 255]));
        assert_eq!(sepia_tone(&img, 0.0), img);
    }

    #[test]
    fn test_sepia_full_intensity_warms_gray() {
        let img = RgbaImage::from_pixel(1, 1, Rgba([100, 100, 100, 255]));
        let out = sepia_tone(&img, 1.0);
        let p = out.get_pixel(0, 0);
        assert!(p[0] > p[1] && p[1] > p[2]);
        assert_eq!(p[3], 255);
    }

    #[test]
    fn test_vignette_darkens_corners_more() {
        let img = RgbaImage::from_pixel(21, 21, Rgba([200, 200, 200, 255]));
        let out = vignette(&img, 1.0, 10.0);
        assert!(out.get_pixel(0, 0)[0] < out.get_pixel(10, 10)[0]);
        assert_eq!(out.get_pixel(10, 10)[0], 200);
    }

    #[test]
    fn test_mask_to_alpha() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([255, 255, 255, 255]));

        let out = mask_to_alpha(&img);
        assert_eq!(out.get_pixel(0, 0), &Rgba([255, 255, 255, 0]));
        assert_eq!(out.get_pixel(1, 0), &Rgba([255, 255, 255, 255]));
    }
}
