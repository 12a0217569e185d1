//! Source-image sampling and working-resolution derivation.
//!
//! A [`FrameBuffer`] is an owned, CPU-side grid of linear RGBA samples decoded
//! from a Bevy [`Image`]. The animator resamples it down to the working grid
//! resolution whenever a frame is loaded; the source buffer is never mutated.

use bevy::prelude::*;
use bevy::render::render_resource::TextureFormat;

use crate::error::FrameError;

/// An immutable grid of linear RGBA pixel samples.
#[derive(Clone, Debug)]
pub struct FrameBuffer {
    width: usize,
    height: usize,
    pixels: Vec<[f32; 4]>,
}

impl FrameBuffer {
    /// Creates a frame buffer from raw samples.
    ///
    /// # Panics
    ///
    /// Panics if `pixels.len() != width * height` or either dimension is zero.
    pub fn new(width: usize, height: usize, pixels: Vec<[f32; 4]>) -> Self {
        assert!(
            width > 0 && height > 0,
            "FrameBuffer dimensions must be non-zero (got {width}×{height})"
        );
        assert_eq!(
            pixels.len(),
            width * height,
            "pixel count must match dimensions"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Decodes a Bevy [`Image`] into a frame buffer.
    ///
    /// Accepts `Rgba8Unorm` (bytes taken as linear) and `Rgba8UnormSrgb`
    /// (bytes converted to linear). Anything else, a zero-sized image, or an
    /// image whose pixel data is not resident on the CPU, is a [`FrameError`].
    pub fn from_image(image: &Image) -> Result<Self, FrameError> {
        let width = image.texture_descriptor.size.width as usize;
        let height = image.texture_descriptor.size.height as usize;

        if width == 0 || height == 0 {
            return Err(FrameError::ZeroSized { width, height });
        }

        let srgb = match image.texture_descriptor.format {
            TextureFormat::Rgba8Unorm => false,
            TextureFormat::Rgba8UnormSrgb => true,
            other => return Err(FrameError::UnsupportedFormat(other)),
        };

        let data = image.data.as_ref().ok_or(FrameError::MissingData)?;
        let expected = width * height * 4;
        if data.len() != expected {
            return Err(FrameError::WrongSize {
                expected,
                actual: data.len(),
            });
        }

        let pixels = data
            .chunks_exact(4)
            .map(|px| {
                let decode = |b: u8| {
                    let v = b as f32 / 255.0;
                    if srgb { srgb_to_linear(v) } else { v }
                };
                // Alpha is stored linearly in both formats.
                [decode(px[0]), decode(px[1]), decode(px[2]), px[3] as f32 / 255.0]
            })
            .collect();

        Ok(Self {
            width,
            height,
            pixels,
        })
    }

    /// Source width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Source height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Sample at `(x, y)`. Row-major, `y * width + x`.
    pub fn get(&self, x: usize, y: usize) -> [f32; 4] {
        self.pixels[y * self.width + x]
    }

    /// Resamples the buffer to exactly `w × h` samples.
    ///
    /// Dimensions matching the source take the fast 1:1 path with no
    /// filtering. Otherwise each output sample is the box-filter average of
    /// the source rectangle that maps onto it. The source is left untouched.
    pub fn resample(&self, w: usize, h: usize) -> Vec<[f32; 4]> {
        assert!(w > 0 && h > 0, "resample target must be non-zero");

        if w == self.width && h == self.height {
            return self.pixels.clone();
        }

        let mut out = Vec::with_capacity(w * h);
        for ty in 0..h {
            // Source row span covered by this output row.
            let y0 = ty * self.height / h;
            let y1 = (((ty + 1) * self.height).div_ceil(h)).min(self.height).max(y0 + 1);
            for tx in 0..w {
                let x0 = tx * self.width / w;
                let x1 = (((tx + 1) * self.width).div_ceil(w)).min(self.width).max(x0 + 1);

                let mut acc = [0.0f32; 4];
                for sy in y0..y1 {
                    for sx in x0..x1 {
                        let p = self.pixels[sy * self.width + sx];
                        acc[0] += p[0];
                        acc[1] += p[1];
                        acc[2] += p[2];
                        acc[3] += p[3];
                    }
                }
                let n = ((x1 - x0) * (y1 - y0)) as f32;
                out.push([acc[0] / n, acc[1] / n, acc[2] / n, acc[3] / n]);
            }
        }
        out
    }
}

/// Derives the working grid resolution from a source resolution and a cap.
///
/// With `max_resolution == 0` the source dimensions pass through unchanged.
/// When either dimension exceeds the cap, both are scaled by the same factor
/// (aspect ratio preserved) and rounded per dimension, never below 1.
pub fn derive_grid_size(
    original_width: usize,
    original_height: usize,
    max_resolution: usize,
) -> (usize, usize) {
    if max_resolution == 0
        || (original_width <= max_resolution && original_height <= max_resolution)
    {
        return (original_width, original_height);
    }

    let cap = max_resolution as f32;
    let scale = (cap / original_width as f32).min(cap / original_height as f32);
    let w = (original_width as f32 * scale).round().max(1.0) as usize;
    let h = (original_height as f32 * scale).round().max(1.0) as usize;
    (w, h)
}

fn srgb_to_linear(v: f32) -> f32 {
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}
