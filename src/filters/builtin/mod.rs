//! Built-in filter implementations used by [`BuiltinExecutor`].
//!
//! Every function takes an RGBA buffer and returns a new one of the same
//! size. Rows are rendered in parallel with rayon.
//!
//! [`BuiltinExecutor`]: crate::filters::executor::BuiltinExecutor

pub mod blur;
pub mod color;
pub mod distortion;
pub mod sharpen;
pub mod stylize;

use image::{Rgba, RgbaImage};
use rayon::prelude::*;

/// Build an image by evaluating `f` for every pixel.
pub(crate) fn render<F>(width: u32, height: u32, f: F) -> RgbaImage
where
    F: Fn(u32, u32) -> Rgba<u8> + Sync,
{
    let mut out = RgbaImage::new(width, height);
    let row_len = width as usize * 4;
    if row_len == 0 {
        return out;
    }

    out.par_chunks_mut(row_len).enumerate().for_each(|(y, row)| {
        for (x, px) in row.chunks_exact_mut(4).enumerate() {
            px.copy_from_slice(&f(x as u32, y as u32).0);
        }
    });
    out
}

/// Sample `img` at a fractional position with bilinear interpolation.
/// Coordinates outside the image are clamped to the nearest edge.
pub(crate) fn sample_bilinear(img: &RgbaImage, x: f32, y: f32) -> [f32; 4] {
    let max_x = (img.width() - 1) as f32;
    let max_y = (img.height() - 1) as f32;
    let x = x.clamp(0.0, max_x);
    let y = y.clamp(0.0, max_y);

    let x0 = x.floor() as u32;
    let y0 = y.floor() as u32;
    let x1 = (x0 + 1).min(img.width() - 1);
    let y1 = (y0 + 1).min(img.height() - 1);
    let fx = x - x0 as f32;
    let fy = y - y0 as f32;

    let p00 = img.get_pixel(x0, y0).0;
    let p10 = img.get_pixel(x1, y0).0;
    let p01 = img.get_pixel(x0, y1).0;
    let p11 = img.get_pixel(x1, y1).0;

    let mut out = [0.0f32; 4];
    for c in 0..4 {
        let top = p00[c] as f32 * (1.0 - fx) + p10[c] as f32 * fx;
        let bottom = p01[c] as f32 * (1.0 - fx) + p11[c] as f32 * fx;
        out[c] = top * (1.0 - fy) + bottom * fy;
    }
    out
}

/// Round and clamp float channels back to a pixel.
pub(crate) fn to_pixel(channels: [f32; 4]) -> Rgba<u8> {
    Rgba(channels.map(|c| c.round().clamp(0.0, 255.0) as u8))
}

/// Image centre in pixel coordinates.
pub(crate) fn center(img: &RgbaImage) -> (f32, f32) {
    ((img.width() as f32 - 1.0) / 2.0, (img.height() as f32 - 1.0) / 2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_visits_every_pixel() {
        let img = render(5, 3, |x, y| Rgba([x as u8, y as u8, 0, 255]));
        assert_eq!(img.get_pixel(4, 2), &Rgba([4, 2, 0, 255]));
        assert_eq!(img.get_pixel(0, 0), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_bilinear_midpoint() {
        let mut img = RgbaImage::new(2, 1);
        img.put_pixel(0, 0, Rgba([0, 0, 0, 255]));
        img.put_pixel(1, 0, Rgba([100, 200, 50, 255]));

        let mid = sample_bilinear(&img, 0.5, 0.0);
        assert_eq!(to_pixel(mid), Rgba([50, 100, 25, 255]));
        assert_eq!(to_pixel(sample_bilinear(&img, -3.0, 9.0)), Rgba([0, 0, 0, 255]));
    }
}
