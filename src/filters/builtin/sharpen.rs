//! Unsharp mask sharpening.

use super::{blur::gaussian_blur, render, to_pixel};
use image::RgbaImage;

/// `original + intensity * (original - blurred)` with a Gaussian of `radius`.
pub fn unsharp_mask(img: &RgbaImage, radius: f32, intensity: f32) -> RgbaImage {
    if intensity == 0.0 {
        return img.clone();
    }
    let blurred = gaussian_blur(img, radius);

    render(img.width(), img.height(), |x, y| {
        let orig = img.get_pixel(x, y).0;
        let soft = blurred.get_pixel(x, y).0;
        let mut out = [0.0f32; 4];
        for c in 0..3 {
            let o = orig[c] as f32;
            out[c] = o + intensity * (o - soft[c] as f32);
        }
        out[3] = orig[3] as f32;
        to_pixel(out)
    })
}
