//! Avian3D collider generation from the animated cell heights.
//!
//! The physics representation is a heightfield over the columns' top
//! surfaces, not a trimesh of every box — far cheaper for contact and ray
//! queries, and adequate for a grid whose cells all share one footprint.
//! Rebuild it on ticks where [`TickReport::collider_due`] is set, and
//! immediately when collision is toggled via config.
//!
//! [`TickReport::collider_due`]: crate::TickReport::collider_due

use avian3d::prelude::Collider;
use bevy::prelude::*;

use crate::controller::PixelHeightmap;

/// Builds an Avian3D `Collider::heightfield` from the animator's current
/// (possibly mid-blend) cell heights.
///
/// The heightfield is centered at the origin of its local space; the rendered
/// mesh starts at `(0, 0, 0)`, so offset the collider entity's `Transform` by
/// `(world_width / 2, 0, world_depth / 2)` to align them.
///
/// Returns `None` for an inert animator (no frames loaded).
///
/// # Example
///
/// ```ignore
/// use bevy_pixel_heightmap::{PixelHeightmap, build_cell_heightfield_collider};
///
/// fn refresh(animator: &PixelHeightmap) {
///     if let Some(collider) = build_cell_heightfield_collider(animator) {
///         // commands.entity(terrain).insert(collider);
///     }
/// }
/// ```
pub fn build_cell_heightfield_collider(animator: &PixelHeightmap) -> Option<Collider> {
    let grid = animator.cells()?;
    let (w, h) = (grid.width(), grid.height());
    let spacing = animator.config().pixel_spacing;

    // Avian's 3D heightfield expects `heights[row][col]` where rows subdivide
    // the X axis and cols the Z axis; the grid stores cells[y * w + x], so we
    // transpose while gathering.
    let heights: Vec<Vec<f32>> = (0..w)
        .map(|x| {
            (0..h)
                .map(|y| grid.cell(grid.index(x, y)).current_height)
                .collect()
        })
        .collect();

    // Total world extent per axis; heights are already world units.
    let scale = Vec3::new(w as f32 * spacing, 1.0, h as f32 * spacing);

    Some(Collider::heightfield(heights, scale))
}
