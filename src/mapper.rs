//! Pure pixel-sample → column height/color mapping.
//!
//! Both functions are side-effect free and operate per cell; the animator
//! calls them for every grid cell when a frame is loaded.

use bevy::prelude::ColorToComponents;

use crate::config::PixelHeightmapConfig;
use crate::math::{inverse_lerp, lerp, luminance};

/// Maps a pixel sample to its target column height.
///
/// Luminance 0 (black) maps to `min_height`, luminance 1 (white) to
/// `max_height`.
pub fn target_height(cfg: &PixelHeightmapConfig, sample: [f32; 4]) -> f32 {
    lerp(cfg.min_height, cfg.max_height, luminance(sample))
}

/// Maps a pixel sample and its target height to the cell's final base color.
///
/// Pipeline, in order:
/// 1. base color is the sample, or `tint_color` flat when `use_pixel_colors`
///    is off;
/// 2. saturation blend around the sample's grayscale (`0` = grayscale,
///    `> 1` oversaturates, intentionally unclamped);
/// 3. brightness multiplier, then componentwise tint;
/// 4. height darkening: taller columns stay bright, short columns fall toward
///    `min_darkened_brightness`, with `height_darkening` as the master blend
///    (`0.0` leaves the color independent of height).
///
/// Channels are not clamped; transient overshoot from brightness/tint is
/// resolved by the render pipeline.
pub fn map_cell(cfg: &PixelHeightmapConfig, sample: [f32; 4], height: f32) -> [f32; 4] {
    let tint = cfg.tint_color.to_f32_array();

    let mut color = if cfg.use_pixel_colors { sample } else { tint };

    if cfg.use_pixel_colors {
        if (cfg.saturation - 1.0).abs() > f32::EPSILON {
            let gray = luminance(color);
            color[0] = lerp(gray, color[0], cfg.saturation);
            color[1] = lerp(gray, color[1], cfg.saturation);
            color[2] = lerp(gray, color[2], cfg.saturation);
        }

        color[0] *= cfg.color_brightness * tint[0];
        color[1] *= cfg.color_brightness * tint[1];
        color[2] *= cfg.color_brightness * tint[2];
        color[3] *= tint[3];
    }

    if cfg.height_darkening > 0.0 {
        let normalized = inverse_lerp(cfg.min_height, cfg.max_height, height);
        let darken = lerp(cfg.min_darkened_brightness, 1.0, normalized);
        let darken = lerp(1.0, darken, cfg.height_darkening);
        color[0] *= darken;
        color[1] *= darken;
        color[2] *= darken;
    }

    color
}
