//! Stylize filters: crystallize, edges and pixellate.

use super::{render, to_pixel};
use image::RgbaImage;

/// Gain applied to the Sobel response before `intensity`.
const EDGE_GAIN: f32 = 10.0;

/// Fill Voronoi cells with the color found at each cell's seed.
///
/// Seeds sit on a grid of `radius`-sized cells, jittered by a hash of the
/// cell coordinates so the result is stable across runs.
pub fn crystallize(img: &RgbaImage, radius: f32) -> RgbaImage {
    let cell = radius.round().max(1.0) as i64;
    let (w, h) = (img.width() as i64, img.height() as i64);

    render(img.width(), img.height(), |x, y| {
        let (sx, sy) = nearest_seed(x as i64, y as i64, cell);
        *img.get_pixel(sx.clamp(0, w - 1) as u32, sy.clamp(0, h - 1) as u32)
    })
}

/// Seed of grid cell (`gx`, `gy`).
///
/// Jitter stays within the middle half of the cell, so the nearest seed of
/// any point always lies in its own cell or one of the eight around it.
fn seed(gx: i64, gy: i64, cell: i64) -> (i64, i64) {
    let hash = cell_hash(gx, gy);
    let span = (cell / 2).max(1);
    let jx = cell / 4 + (hash & 0xffff) as i64 % span;
    let jy = cell / 4 + ((hash >> 16) & 0xffff) as i64 % span;
    (gx * cell + jx, gy * cell + jy)
}

fn nearest_seed(x: i64, y: i64, cell: i64) -> (i64, i64) {
    let (gx, gy) = (x.div_euclid(cell), y.div_euclid(cell));

    let mut best = (i64::MAX, (0, 0));
    for ny in gy - 1..=gy + 1 {
        for nx in gx - 1..=gx + 1 {
            let (sx, sy) = seed(nx, ny, cell);
            let d = (sx - x) * (sx - x) + (sy - y) * (sy - y);
            if d < best.0 {
                best = (d, (sx, sy));
            }
        }
    }
    best.1
}

fn cell_hash(gx: i64, gy: i64) -> u64 {
    let mut z = (gx as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15) ^ (gy as u64).wrapping_mul(0xc2b2_ae3d_27d4_eb4f);
    z = (z ^ (z >> 30)).wrapping_mul(0xbf58_476d_1ce4_e5b9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94d0_49bb_1331_11eb);
    z ^ (z >> 31)
}

/// Sobel edge magnitude per color channel, amplified by `intensity`.
/// Alpha is kept from the source.
pub fn edges(img: &RgbaImage, intensity: f32) -> RgbaImage {
    let gain = intensity.max(0.0) * EDGE_GAIN / 4.0;
    let (w, h) = (img.width() as i64, img.height() as i64);
    let at = |x: i64, y: i64, c: usize| -> f32 {
        img.get_pixel(x.clamp(0, w - 1) as u32, y.clamp(0, h - 1) as u32)[c] as f32
    };

    render(img.width(), img.height(), |x, y| {
        let (x, y) = (x as i64, y as i64);
        let mut out = [0.0f32; 4];
        for (c, value) in out.iter_mut().take(3).enumerate() {
            let gx = (at(x + 1, y - 1, c) + 2.0 * at(x + 1, y, c) + at(x + 1, y + 1, c))
                - (at(x - 1, y - 1, c) + 2.0 * at(x - 1, y, c) + at(x - 1, y + 1, c));
            let gy = (at(x - 1, y + 1, c) + 2.0 * at(x, y + 1, c) + at(x + 1, y + 1, c))
                - (at(x - 1, y - 1, c) + 2.0 * at(x, y - 1, c) + at(x + 1, y - 1, c));
            *value = (gx * gx + gy * gy).sqrt() * gain;
        }
        out[3] = at(x, y, 3);
        to_pixel(out)
    })
}

/// Replace `scale`-sized square blocks with their average color.
pub fn pixellate(img: &RgbaImage, scale: f32) -> RgbaImage {
    let block = scale.round().max(1.0) as u32;
    let (w, h) = img.dimensions();
    let cols = w.div_ceil(block);
    let rows = h.div_ceil(block);

    let mut averages = vec![[0.0f32; 4]; (cols * rows) as usize];
    for (i, avg) in averages.iter_mut().enumerate() {
        let bx = (i as u32 % cols) * block;
        let by = (i as u32 / cols) * block;
        let x_end = (bx + block).min(w);
        let y_end = (by + block).min(h);

        let mut sum = [0u64; 4];
        for y in by..y_end {
            for x in bx..x_end {
                for (s, v) in sum.iter_mut().zip(img.get_pixel(x, y).0) {
                    *s += v as u64;
                }
            }
        }
        let count = ((x_end - bx) * (y_end - by)) as f32;
        *avg = sum.map(|s| s as f32 / count);
    }

    render(w, h, |x, y| to_pixel(averages[((y / block) * cols + x / block) as usize]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    #[test]
    fn test_edges_flat_image_is_black() {
        let img = RgbaImage::from_pixel(6, 6, Rgba([120, 50, 200, 255]));
        let out = edges(&img, 1.0);
        assert_eq!(out.get_pixel(3, 3), &Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn test_edges_detects_step() {
        let img = RgbaImage::from_fn(6, 6, |x, _| {
            if x < 3 { Rgba([0, 0, 0, 255]) } else { Rgba([255, 255, 255, 255]) }
        });
        let out = edges(&img, 1.0);
        assert_eq!(out.get_pixel(3, 3)[0], 255);
        assert_eq!(out.get_pixel(0, 3)[0], 0);
        assert_eq!(edges(&img, 0.0).get_pixel(3, 3)[0], 0);
    }

    #[test]
    fn test_pixellate_averages_blocks() {
        let img = RgbaImage::from_fn(4, 2, |x, _| {
            if x % 2 == 0 { Rgba([0, 0, 0, 255]) } else { Rgba([200, 100, 50, 255]) }
        });
        let out = pixellate(&img, 2.0);
        assert_eq!(out.get_pixel(0, 0), &Rgba([100, 50, 25, 255]));
        assert_eq!(out.get_pixel(3, 1), &Rgba([100, 50, 25, 255]));
    }

    #[test]
    fn test_nearest_seed_is_exact() {
        for cell in [1i64, 2, 3, 4, 7, 12] {
            for y in 0..30 {
                for x in 0..30 {
                    let (sx, sy) = nearest_seed(x, y, cell);
                    let found = (sx - x).pow(2) + (sy - y).pow(2);

                    let mut best = i64::MAX;
                    for gy in -3..30 / cell + 3 {
                        for gx in -3..30 / cell + 3 {
                            let (sx, sy) = seed(gx, gy, cell);
                            best = best.min((sx - x).pow(2) + (sy - y).pow(2));
                        }
                    }
                    assert_eq!(found, best, "cell {} at ({}, {})", cell, x, y);
                }
            }
        }
    }

    #[test]
    fn test_seed_stays_in_cell() {
        for cell in [1i64, 2, 5, 40] {
            for g in -5..5 {
                let (sx, sy) = seed(g, -g, cell);
                assert_eq!(sx.div_euclid(cell), g);
                assert_eq!(sy.div_euclid(cell), -g);
            }
        }
    }

    #[test]
    fn test_crystallize_uses_source_colors() {
        let img = RgbaImage::from_fn(16, 16, |x, y| Rgba([(x * 16) as u8, (y * 16) as u8, 0, 255]));
        let out = crystallize(&img, 4.0);
        for p in out.pixels() {
            assert!(img.pixels().any(|q| q == p));
        }
    }

    #[test]
    fn test_crystallize_is_deterministic() {
        let img = RgbaImage::from_fn(10, 10, |x, y| Rgba([(x * 20) as u8, (y * 20) as u8, 7, 255]));
        assert_eq!(crystallize(&img, 3.0), crystallize(&img, 3.0));
    }
}
