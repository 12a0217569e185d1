//! Cuboid-per-cell mesh synthesis.
//!
//! Every grid cell becomes one axis-aligned box: 24 vertices (4 per face, so
//! each face can carry its own normal and color) and 36 indices. Topology is
//! fixed for the life of the builder — [`CubeGridMeshBuilder::build`] writes
//! indices and face normals once, and each subsequent
//! [`rewrite`](CubeGridMeshBuilder::rewrite) mutates only positions and
//! colors in place. This keeps the per-tick cost of animating tens of
//! thousands of columns to a pair of linear buffer passes.

use bevy::asset::RenderAssetUsages;
use bevy::mesh::{Indices, PrimitiveTopology};
use bevy::prelude::*;

use crate::cells::CellGrid;
use crate::config::PixelHeightmapConfig;
use crate::math::lerp;

/// Vertices emitted per cell (6 faces × 4 corners).
pub const VERTICES_PER_CELL: usize = 24;
/// Indices emitted per cell (6 faces × 2 triangles × 3).
pub const INDICES_PER_CELL: usize = 36;

/// Columns shorter than this skip the vertical gradient; it also guards the
/// normalization against a degenerate zero-height box.
const GRADIENT_MIN_HEIGHT: f32 = 0.01;

/// Unit-cube faces: outward normal plus 4 corner offsets in `{0,1}³`,
/// wound CCW as seen from outside the cube.
const FACES: [([f32; 3], [[f32; 3]; 4]); 6] = [
    // +Y (top)
    ([0.0, 1.0, 0.0], [[0.0, 1.0, 1.0], [1.0, 1.0, 1.0], [1.0, 1.0, 0.0], [0.0, 1.0, 0.0]]),
    // -Y (bottom)
    ([0.0, -1.0, 0.0], [[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [1.0, 0.0, 1.0], [0.0, 0.0, 1.0]]),
    // +X
    ([1.0, 0.0, 0.0], [[1.0, 0.0, 0.0], [1.0, 1.0, 0.0], [1.0, 1.0, 1.0], [1.0, 0.0, 1.0]]),
    // -X
    ([-1.0, 0.0, 0.0], [[0.0, 0.0, 1.0], [0.0, 1.0, 1.0], [0.0, 1.0, 0.0], [0.0, 0.0, 0.0]]),
    // +Z
    ([0.0, 0.0, 1.0], [[1.0, 0.0, 1.0], [1.0, 1.0, 1.0], [0.0, 1.0, 1.0], [0.0, 0.0, 1.0]]),
    // -Z
    ([0.0, 0.0, -1.0], [[0.0, 0.0, 0.0], [0.0, 1.0, 0.0], [1.0, 1.0, 0.0], [1.0, 0.0, 0.0]]),
];

/// Owns the flat vertex/color/normal/index buffers for the full cuboid grid
/// and converts them to (or re-uploads them into) a Bevy [`Mesh`].
///
/// Consumers get read-only slice access; the buffers are mutated only through
/// [`rewrite`](Self::rewrite) and
/// [`recompute_normals`](Self::recompute_normals).
pub struct CubeGridMeshBuilder {
    grid_width: usize,
    grid_height: usize,
    spacing: f32,
    use_vertical_gradient: bool,
    gradient_strength: f32,
    positions: Vec<[f32; 3]>,
    normals: Vec<[f32; 3]>,
    colors: Vec<[f32; 4]>,
    indices: Vec<u32>,
}

impl CubeGridMeshBuilder {
    /// Creates a builder for a `grid_width × grid_height` cell grid.
    ///
    /// Buffers are empty until [`build`](Self::build) runs.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(grid_width: usize, grid_height: usize, cfg: &PixelHeightmapConfig) -> Self {
        assert!(
            grid_width > 0 && grid_height > 0,
            "grid must be non-empty (got {grid_width}×{grid_height})"
        );
        Self {
            grid_width,
            grid_height,
            spacing: cfg.pixel_spacing,
            use_vertical_gradient: cfg.use_vertical_gradient,
            gradient_strength: cfg.gradient_strength,
            positions: Vec::new(),
            normals: Vec::new(),
            colors: Vec::new(),
            indices: Vec::new(),
        }
    }

    /// Adopts the style-affecting subset of a new config
    /// (spacing, vertical gradient). Grid dimensions cannot change.
    pub fn apply_config(&mut self, cfg: &PixelHeightmapConfig) {
        self.spacing = cfg.pixel_spacing;
        self.use_vertical_gradient = cfg.use_vertical_gradient;
        self.gradient_strength = cfg.gradient_strength;
    }

    /// Allocates the buffers, writes the static index and face-normal data,
    /// and performs the initial position/color pass from `grid`.
    ///
    /// # Panics
    ///
    /// Panics if `grid` dimensions differ from the builder's.
    pub fn build(&mut self, grid: &CellGrid) {
        assert_eq!(
            (grid.width(), grid.height()),
            (self.grid_width, self.grid_height),
            "cell grid dimensions must match the builder"
        );

        let cell_count = self.grid_width * self.grid_height;
        let vertex_count = cell_count * VERTICES_PER_CELL;

        self.positions = vec![[0.0; 3]; vertex_count];
        self.colors = vec![[0.0; 4]; vertex_count];
        self.normals = Vec::with_capacity(vertex_count);
        self.indices = Vec::with_capacity(cell_count * INDICES_PER_CELL);

        for cell in 0..cell_count {
            for (face, (normal, _)) in FACES.iter().enumerate() {
                // 4 fresh vertices per face, 2 CCW triangles fanned from the
                // face's first corner.
                let base = (cell * VERTICES_PER_CELL + face * 4) as u32;
                self.indices.extend_from_slice(&[
                    base,
                    base + 1,
                    base + 2,
                    base,
                    base + 2,
                    base + 3,
                ]);
                for _ in 0..4 {
                    self.normals.push(*normal);
                }
            }
        }

        self.rewrite(grid);
    }

    /// Rewrites positions and colors from the grid's current cell state.
    ///
    /// Each cell's box sits at `(x·spacing, 0, y·spacing)` with footprint
    /// `spacing × spacing` and height `current_height`. When the vertical
    /// gradient is on and the column is tall enough, lower vertices are
    /// darkened toward black by up to `gradient_strength`.
    pub fn rewrite(&mut self, grid: &CellGrid) {
        debug_assert_eq!(self.positions.len(), grid.len() * VERTICES_PER_CELL);

        let s = self.spacing;
        for (i, cell) in grid.iter().enumerate() {
            let x = (i % self.grid_width) as f32 * s;
            let z = (i / self.grid_width) as f32 * s;
            let h = cell.current_height;

            let gradient = self.use_vertical_gradient && h > GRADIENT_MIN_HEIGHT;
            let mut v = i * VERTICES_PER_CELL;
            for (_, corners) in &FACES {
                for corner in corners {
                    self.positions[v] = [x + corner[0] * s, corner[1] * h, z + corner[2] * s];

                    let mut color = cell.current_color;
                    if gradient {
                        // Unit-cube corner y is already the vertex's
                        // normalized height within the column.
                        let darken = lerp(self.gradient_strength, 0.0, corner[1]);
                        let keep = 1.0 - darken;
                        color[0] *= keep;
                        color[1] *= keep;
                        color[2] *= keep;
                    }
                    self.colors[v] = color;
                    v += 1;
                }
            }
        }
    }

    /// Recomputes smooth per-vertex normals from the live triangle geometry.
    ///
    /// Each triangle's unnormalized cross product (proportional to its area)
    /// is accumulated at its three vertices, then normalized, so larger faces
    /// dominate. Vertices whose faces have all collapsed (zero-height
    /// columns) default to +Y.
    pub fn recompute_normals(&mut self) {
        let mut accum: Vec<Vec3> = vec![Vec3::ZERO; self.positions.len()];

        for tri in self.indices.chunks_exact(3) {
            let [i0, i1, i2] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
            let p0 = Vec3::from(self.positions[i0]);
            let p1 = Vec3::from(self.positions[i1]);
            let p2 = Vec3::from(self.positions[i2]);
            let face_normal = (p1 - p0).cross(p2 - p0);
            accum[i0] += face_normal;
            accum[i1] += face_normal;
            accum[i2] += face_normal;
        }

        for (out, n) in self.normals.iter_mut().zip(&accum) {
            let len = n.length();
            *out = if len > f32::EPSILON {
                (*n / len).into()
            } else {
                [0.0, 1.0, 0.0]
            };
        }
    }

    /// Produces a fresh [`Mesh`] with positions, normals, vertex colors and
    /// u32 triangle indices.
    pub fn to_mesh(&self) -> Mesh {
        let mut mesh = Mesh::new(
            PrimitiveTopology::TriangleList,
            RenderAssetUsages::default(),
        );
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, self.colors.clone());
        mesh.insert_indices(Indices::U32(self.indices.clone()));
        mesh
    }

    /// Re-uploads the mutable attributes into an existing mesh.
    ///
    /// Positions and colors are always refreshed; normals only when
    /// `refresh_normals` is set (indices are static and never re-sent).
    pub fn apply_to_mesh(&self, mesh: &mut Mesh, refresh_normals: bool) {
        mesh.insert_attribute(Mesh::ATTRIBUTE_POSITION, self.positions.clone());
        mesh.insert_attribute(Mesh::ATTRIBUTE_COLOR, self.colors.clone());
        if refresh_normals {
            mesh.insert_attribute(Mesh::ATTRIBUTE_NORMAL, self.normals.clone());
        }
    }

    /// Vertex positions, 24 per cell.
    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    /// Per-vertex colors, parallel to [`positions`](Self::positions).
    pub fn colors(&self) -> &[[f32; 4]] {
        &self.colors
    }

    /// Per-vertex normals, parallel to [`positions`](Self::positions).
    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    /// Static triangle indices, 36 per cell.
    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    /// Total vertex count (`cells × 24`); zero before [`build`](Self::build).
    pub fn vertex_count(&self) -> usize {
        self.positions.len()
    }
}
