//! Scalar and RGBA interpolation helpers.
//!
//! Free pure functions over plain `f32` and `[f32; 4]` so the cell-state and
//! color-mapping pipeline stays independent of any engine math types.

/// Linear interpolation between `a` and `b`. `t` is not clamped.
#[inline]
pub fn lerp(a: f32, b: f32, t: f32) -> f32 {
    a + (b - a) * t
}

/// Inverse of [`lerp`]: where `v` sits between `a` and `b`, clamped to `[0, 1]`.
///
/// Returns `0.0` when the span is degenerate (`a == b`).
#[inline]
pub fn inverse_lerp(a: f32, b: f32, v: f32) -> f32 {
    let span = b - a;
    if span.abs() <= f32::EPSILON {
        0.0
    } else {
        ((v - a) / span).clamp(0.0, 1.0)
    }
}

/// Hermite smoothstep `3t² − 2t³` on `t` clamped to `[0, 1]`.
#[inline]
pub fn smoothstep(t: f32) -> f32 {
    let t = t.clamp(0.0, 1.0);
    t * t * (3.0 - 2.0 * t)
}

/// Rec. 709 luminance of a linear RGBA sample, ignoring alpha.
#[inline]
pub fn luminance(c: [f32; 4]) -> f32 {
    0.2126 * c[0] + 0.7152 * c[1] + 0.0722 * c[2]
}

/// Componentwise linear interpolation of two RGBA colors.
#[inline]
pub fn lerp_rgba(a: [f32; 4], b: [f32; 4], t: f32) -> [f32; 4] {
    [
        lerp(a[0], b[0], t),
        lerp(a[1], b[1], t),
        lerp(a[2], b[2], t),
        lerp(a[3], b[3], t),
    ]
}

/// Multiplies the RGB channels by `s`, leaving alpha untouched.
#[inline]
pub fn scale_rgb(c: [f32; 4], s: f32) -> [f32; 4] {
    [c[0] * s, c[1] * s, c[2] * s, c[3]]
}
