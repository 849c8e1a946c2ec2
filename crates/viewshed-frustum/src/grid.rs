//! Grid resolution and (h, v) -> vertex index mapping.

use std::fmt;

use static_assertions::const_assert;

use crate::FrustumError;

/// Largest vertex count a `u16` index buffer can address.
pub const MAX_GRID_VERTICES: usize = u16::MAX as usize + 1;

const_assert!(MAX_GRID_VERTICES == 65_536);

/// Number of angular subdivisions across and down a frustum cap.
///
/// A resolution of `h × v` has `(h + 1) × (v + 1)` grid vertices plus the apex.
/// Column `h = 0` is the right edge and row `v = 0` the top edge, as seen
/// from the observer looking forward.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GridResolution {
    pub horizontal: u32,
    pub vertical: u32,
}

impl GridResolution {
    pub const fn new(horizontal: u32, vertical: u32) -> Self {
        Self {
            horizontal,
            vertical,
        }
    }

    /// Same number of cells on both axes.
    pub const fn square(cells: u32) -> Self {
        Self::new(cells, cells)
    }

    /// Check that the grid is non-empty and addressable with `u16` indices.
    pub fn validate(self) -> Result<Self, FrustumError> {
        if self.horizontal == 0
            || self.vertical == 0
            || self.vertex_count_wide() > MAX_GRID_VERTICES as u128
        {
            return Err(FrustumError::InvalidGrid(self));
        }
        Ok(self)
    }

    fn vertex_count_wide(self) -> u128 {
        (u128::from(self.horizontal) + 1) * (u128::from(self.vertical) + 1) + 1
    }

    /// Grid vertices plus the apex.
    pub fn vertex_count(self) -> usize {
        (self.horizontal as usize + 1) * (self.vertical as usize + 1) + 1
    }

    /// Length of the triangle index buffer: side fans plus two triangles per cell.
    pub fn mesh_index_count(self) -> usize {
        let (h, v) = (self.horizontal as usize, self.vertical as usize);
        (h + v) * 2 * 3 + h * v * 6
    }

    /// Length of the line index buffer: four apex edges plus every grid segment.
    pub fn line_index_count(self) -> usize {
        let (h, v) = (self.horizontal as usize, self.vertical as usize);
        (h * (v + 1) + (h + 1) * v + 4) * 2
    }

    /// Buffer index of grid vertex `(h, v)`. Index 0 is the apex.
    #[inline]
    pub fn index(self, h: u32, v: u32) -> u16 {
        debug_assert!(h <= self.horizontal && v <= self.vertical);
        debug_assert!(self.vertex_count() <= MAX_GRID_VERTICES);
        (v * (self.horizontal + 1) + h + 1) as u16
    }

    /// The four outer corners in `(h, v)` order: top-right, top-left,
    /// bottom-left, bottom-right.
    pub fn corners(self) -> [(u32, u32); 4] {
        let (h, v) = (self.horizontal, self.vertical);
        [(0, 0), (h, 0), (h, v), (0, v)]
    }
}

impl fmt::Display for GridResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.horizontal, self.vertical)
    }
}
