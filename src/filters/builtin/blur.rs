//! Blur filters: Gaussian and zoom (radial) blur.

use super::{center, render, sample_bilinear, to_pixel};
use image::RgbaImage;
use rayon::prelude::*;

/// Distance in pixels a zoom blur smears each sample towards the edge.
pub const ZOOM_AMOUNT: f32 = 20.0;

const ZOOM_SAMPLES: usize = 16;

/// Largest sigma blurred with an exact Gaussian kernel.
const EXACT_SIGMA_MAX: f32 = 8.0;

/// Box passes used to approximate wider Gaussians.
const BOX_PASSES: usize = 3;

/// Gaussian blur with standard deviation `radius`.
///
/// Beyond the image's largest dimension a wider kernel no longer changes the
/// result meaningfully, so sigma is capped there. A zero radius returns the
/// input unchanged. Above [`EXACT_SIGMA_MAX`] the blur is approximated by
/// repeated running-sum box blurs, whose cost does not depend on sigma.
pub fn gaussian_blur(img: &RgbaImage, radius: f32) -> RgbaImage {
    let sigma = radius.min(img.width().max(img.height()) as f32);
    if sigma <= 0.0 {
        return img.clone();
    }
    if sigma <= EXACT_SIGMA_MAX {
        return imageproc::filter::gaussian_blur_f32(img, sigma);
    }
    box_gaussian(img, sigma)
}

/// Three box blurs of matching variance, each split into a horizontal pass
/// and a vertical pass done as a horizontal pass over the transpose.
fn box_gaussian(img: &RgbaImage, sigma: f32) -> RgbaImage {
    let (w, h) = (img.width() as usize, img.height() as usize);
    if w == 0 || h == 0 {
        return img.clone();
    }

    // Width whose n-fold box convolution has variance sigma^2.
    let ideal = (12.0 * sigma * sigma / BOX_PASSES as f32 + 1.0).sqrt();
    let r = ((ideal - 1.0) / 2.0).round().max(1.0) as usize;

    let mut buf: Vec<f32> = img.as_raw().iter().map(|&v| f32::from(v)).collect();
    let mut tmp = vec![0.0f32; buf.len()];
    for _ in 0..BOX_PASSES {
        box_rows(&buf, &mut tmp, w, r);
        transpose(&tmp, &mut buf, w, h);
        box_rows(&buf, &mut tmp, h, r);
        transpose(&tmp, &mut buf, h, w);
    }

    let mut out = RgbaImage::new(w as u32, h as u32);
    for (dst, v) in out.iter_mut().zip(&buf) {
        *dst = v.round().clamp(0.0, 255.0) as u8;
    }
    out
}

/// Running-sum box blur of half-width `r` along rows `w` pixels long.
/// Samples past either end repeat the edge pixel.
fn box_rows(src: &[f32], dst: &mut [f32], w: usize, r: usize) {
    let inv = 1.0 / (2 * r + 1) as f32;
    let last = w as isize - 1;
    let at = |row: &[f32], x: isize, c: usize| row[x.clamp(0, last) as usize * 4 + c];

    dst.par_chunks_mut(w * 4)
        .zip(src.par_chunks(w * 4))
        .for_each(|(out, row)| {
            for c in 0..4 {
                let r = r as isize;
                let mut sum: f32 = (-r..=r).map(|x| at(row, x, c)).sum();
                for x in 0..w as isize {
                    out[x as usize * 4 + c] = sum * inv;
                    sum += at(row, x + r + 1, c) - at(row, x - r, c);
                }
            }
        });
}

/// Transpose a `w` x `h` RGBA buffer into `h` x `w`.
fn transpose(src: &[f32], dst: &mut [f32], w: usize, h: usize) {
    dst.par_chunks_mut(h * 4).enumerate().for_each(|(x, out)| {
        for y in 0..h {
            let si = (y * w + x) * 4;
            out[y * 4..y * 4 + 4].copy_from_slice(&src[si..si + 4]);
        }
    });
}

/// Radial blur: average samples along the line from each pixel outward
/// from the image centre, covering `amount` pixels at the corners.
pub fn zoom_blur(img: &RgbaImage, amount: f32) -> RgbaImage {
    let (cx, cy) = center(img);
    let max_dist = (cx * cx + cy * cy).sqrt().max(1.0);

    render(img.width(), img.height(), |x, y| {
        let dx = x as f32 - cx;
        let dy = y as f32 - cy;
        let dist = (dx * dx + dy * dy).sqrt();
        if dist == 0.0 {
            return *img.get_pixel(x, y);
        }

        // Zoom blur grows linearly with the distance from the centre.
        let reach = amount * dist / max_dist;
        let (ux, uy) = (dx / dist, dy / dist);

        let mut acc = [0.0f32; 4];
        for i in 0..ZOOM_SAMPLES {
            let t = reach * i as f32 / ZOOM_SAMPLES as f32;
            let s = sample_bilinear(img, x as f32 + ux * t, y as f32 + uy * t);
            for c in 0..4 {
                acc[c] += s[c];
            }
        }
        to_pixel(acc.map(|c| c / ZOOM_SAMPLES as f32))
    })
}
