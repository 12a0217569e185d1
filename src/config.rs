//! Animator configuration.

use bevy::prelude::*;

/// All tunable options for a [`PixelHeightmap`](crate::PixelHeightmap).
///
/// Construct with [`Default::default`] and override fields, or use the
/// builder-style `with_*` setters. Values are sanitized by [`validated`]
/// when handed to the animator, so out-of-range settings degrade gracefully
/// instead of producing NaNs or division by zero.
///
/// [`validated`]: PixelHeightmapConfig::validated
#[derive(Clone, Debug)]
pub struct PixelHeightmapConfig {
    /// World-space distance between adjacent cell columns (also the column footprint).
    pub pixel_spacing: f32,
    /// Column height for a fully black pixel.
    pub min_height: f32,
    /// Column height for a fully white pixel.
    pub max_height: f32,
    /// Cap on the working grid resolution per dimension. `0` = use source resolution.
    pub max_resolution: usize,
    /// Whether a physics collider should track the animated heights.
    pub enable_collision: bool,
    /// Ticks between collider refreshes while collision is enabled.
    pub collision_update_interval: u32,
    /// Whether vertex normals are recomputed from the live geometry.
    pub recalculate_normals: bool,
    /// Ticks between normal recomputations while enabled.
    pub normal_update_interval: u32,
    /// Seconds spent blending from one frame to the next.
    pub transition_duration: f32,
    /// Seconds a frame is displayed before the next transition starts.
    pub frame_hold_duration: f32,
    /// Start playing as soon as the animator is constructed.
    pub auto_play: bool,
    /// Wrap back to frame 0 after the last frame; otherwise playback stops there.
    pub looping: bool,
    /// Color columns from the source pixels; when `false`, `tint_color` is used flat.
    pub use_pixel_colors: bool,
    /// Brightness multiplier applied to pixel-derived colors.
    pub color_brightness: f32,
    /// Tint multiplied into pixel colors, or the flat color when `use_pixel_colors` is off.
    pub tint_color: LinearRgba,
    /// Master blend for height-based darkening. `0.0` disables it entirely.
    pub height_darkening: f32,
    /// Brightness floor reached by the shortest columns when darkening is fully on.
    pub min_darkened_brightness: f32,
    /// Saturation blend around grayscale: `0` = grayscale, `1` = unchanged, `>1` oversaturates.
    pub saturation: f32,
    /// Darken each column's lower vertices toward black.
    pub use_vertical_gradient: bool,
    /// How dark the base of a column gets when the vertical gradient is on.
    pub gradient_strength: f32,
}

impl Default for PixelHeightmapConfig {
    fn default() -> Self {
        Self {
            pixel_spacing: 0.1,
            min_height: 0.0,
            max_height: 2.0,
            max_resolution: 128,
            enable_collision: false,
            collision_update_interval: 10,
            recalculate_normals: false,
            normal_update_interval: 5,
            transition_duration: 1.0,
            frame_hold_duration: 2.0,
            auto_play: true,
            looping: true,
            use_pixel_colors: true,
            color_brightness: 1.0,
            tint_color: LinearRgba::WHITE,
            height_darkening: 0.0,
            min_darkened_brightness: 0.2,
            saturation: 1.0,
            use_vertical_gradient: false,
            gradient_strength: 0.5,
        }
    }
}

impl PixelHeightmapConfig {
    /// Returns a sanitized copy safe to drive the animator with.
    ///
    /// Spacing is clamped to a positive minimum, `max_height` is raised to at
    /// least `min_height`, update intervals are clamped to ≥ 1 and durations
    /// to ≥ 0.
    pub fn validated(&self) -> Self {
        let mut cfg = self.clone();
        cfg.pixel_spacing = cfg.pixel_spacing.max(f32::EPSILON);
        cfg.min_height = cfg.min_height.max(0.0);
        cfg.max_height = cfg.max_height.max(cfg.min_height);
        cfg.collision_update_interval = cfg.collision_update_interval.max(1);
        cfg.normal_update_interval = cfg.normal_update_interval.max(1);
        cfg.transition_duration = cfg.transition_duration.max(0.0);
        cfg.frame_hold_duration = cfg.frame_hold_duration.max(0.0);
        cfg.gradient_strength = cfg.gradient_strength.clamp(0.0, 1.0);
        cfg.height_darkening = cfg.height_darkening.clamp(0.0, 1.0);
        cfg.min_darkened_brightness = cfg.min_darkened_brightness.clamp(0.0, 1.0);
        cfg
    }

    /// Sets the world-space spacing between columns.
    /// Clamped to a positive minimum to avoid zero-footprint columns.
    pub fn with_pixel_spacing(mut self, spacing: f32) -> Self {
        self.pixel_spacing = spacing.max(f32::EPSILON);
        self
    }

    /// Sets the height range columns are mapped into.
    pub fn with_height_range(mut self, min: f32, max: f32) -> Self {
        self.min_height = min;
        self.max_height = max;
        self
    }

    /// Sets the working-resolution cap (`0` = uncapped).
    pub fn with_max_resolution(mut self, cap: usize) -> Self {
        self.max_resolution = cap;
        self
    }

    /// Sets hold and transition timing in seconds.
    pub fn with_timing(mut self, hold: f32, transition: f32) -> Self {
        self.frame_hold_duration = hold;
        self.transition_duration = transition;
        self
    }
}
