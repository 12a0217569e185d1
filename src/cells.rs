//! Per-cell animation state: current and target height/color pairs.
//!
//! `current_*` is what the geometry displays this tick; `target_*` is the
//! authoritative value from the most recently loaded frame. The grid is sized
//! once at construction and never resized; frame changes only retarget.

use crate::math::{lerp, lerp_rgba, smoothstep};

/// One animated column's state.
#[derive(Clone, Copy, Debug, Default)]
pub struct Cell {
    /// Height currently displayed.
    pub current_height: f32,
    /// Height from the most recently loaded frame.
    pub target_height: f32,
    /// Base color currently displayed.
    pub current_color: [f32; 4],
    /// Base color from the most recently loaded frame.
    pub target_color: [f32; 4],
}

/// Flat row-major store of all cell states, `index = y * width + x`.
#[derive(Clone, Debug)]
pub struct CellGrid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
}

impl CellGrid {
    /// Allocates a zeroed grid.
    ///
    /// # Panics
    ///
    /// Panics if either dimension is zero.
    pub fn new(width: usize, height: usize) -> Self {
        assert!(
            width > 0 && height > 0,
            "CellGrid dimensions must be non-zero (got {width}×{height})"
        );
        Self {
            width,
            height,
            cells: vec![Cell::default(); width * height],
        }
    }

    /// Grid width in cells.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Grid height in cells.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Total cell count.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// `true` when the grid holds no cells (never, by construction).
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Flat index of grid position `(x, y)`.
    #[inline]
    pub fn index(&self, x: usize, y: usize) -> usize {
        y * self.width + x
    }

    /// Read access to a cell by flat index.
    pub fn cell(&self, index: usize) -> &Cell {
        &self.cells[index]
    }

    /// Iterates all cells in flat order.
    pub fn iter(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    /// Points a cell at a new target.
    ///
    /// The old target is committed to `current_*` first, so an interrupted
    /// blend continues from the last authoritative value rather than from a
    /// half-interpolated one.
    pub fn retarget(&mut self, index: usize, new_height: f32, new_color: [f32; 4]) {
        let cell = &mut self.cells[index];
        cell.current_height = cell.target_height;
        cell.current_color = cell.target_color;
        cell.target_height = new_height;
        cell.target_color = new_color;
    }

    /// Blends every cell toward its target at smoothstepped `t`.
    pub fn blend_all(&mut self, t: f32) {
        let eased = smoothstep(t);
        for cell in &mut self.cells {
            cell.current_height = lerp(cell.current_height, cell.target_height, eased);
            cell.current_color = lerp_rgba(cell.current_color, cell.target_color, eased);
        }
    }

    /// Forces `current = target` for every cell.
    pub fn snap_all(&mut self) {
        for cell in &mut self.cells {
            cell.current_height = cell.target_height;
            cell.current_color = cell.target_color;
        }
    }

    /// Current heights in row-major order (e.g. for collider construction).
    pub fn current_heights(&self) -> impl Iterator<Item = f32> + '_ {
        self.cells.iter().map(|c| c.current_height)
    }
}
