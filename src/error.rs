//! Error types for source-image ingestion.

use bevy::render::render_resource::TextureFormat;
use thiserror::Error;

/// A source [`Image`](bevy::prelude::Image) could not be read as a pixel grid.
///
/// All variants are non-fatal: the offending frame load is skipped and the
/// animator keeps running in its last valid state.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FrameError {
    /// The image has no CPU-side data (e.g. it only exists on the GPU).
    #[error("image has no CPU-side pixel data")]
    MissingData,

    /// The image has a zero width or height and cannot seed a grid.
    #[error("image has a zero dimension ({width}×{height})")]
    ZeroSized {
        /// Declared width in pixels.
        width: usize,
        /// Declared height in pixels.
        height: usize,
    },

    /// The image is not stored as 8-bit RGBA.
    #[error("unsupported texture format {0:?}, expected Rgba8Unorm or Rgba8UnormSrgb")]
    UnsupportedFormat(TextureFormat),

    /// The byte length does not match `width * height * 4`.
    #[error("pixel data is {actual} bytes, expected {expected}")]
    WrongSize {
        /// Expected byte count for the declared dimensions.
        expected: usize,
        /// Actual byte count present.
        actual: usize,
    },
}
