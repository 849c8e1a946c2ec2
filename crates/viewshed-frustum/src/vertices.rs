//! Direction grid interpolation and high/low split vertex buffers.

use glam::DVec3;
use viewshed_math::{SplitCoordinate, angle_between, split_f64, sweep_toward};

use crate::{GridResolution, KeyDirections};

/// Vertex positions as parallel `high`/`low` `f32` arrays, three floats per vertex.
///
/// Refilled in place on every update so the allocations survive across frames.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SplitVertices {
    high: Vec<f32>,
    low: Vec<f32>,
}

impl SplitVertices {
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty buffers with room for `vertex_count` vertices.
    pub fn with_capacity(vertex_count: usize) -> Self {
        Self {
            high: Vec::with_capacity(vertex_count * 3),
            low: Vec::with_capacity(vertex_count * 3),
        }
    }

    /// Coarse halves, `[x, y, z, x, y, z, ...]`.
    pub fn high(&self) -> &[f32] {
        &self.high
    }

    /// Residual halves, same layout as [`high`](Self::high).
    pub fn low(&self) -> &[f32] {
        &self.low
    }

    /// Raw bytes of the high buffer for GPU upload.
    pub fn high_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.high)
    }

    /// Raw bytes of the low buffer for GPU upload.
    pub fn low_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.low)
    }

    pub fn vertex_count(&self) -> usize {
        self.high.len() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.high.is_empty()
    }

    /// Split coordinates of vertex `i`, or `None` if out of range.
    pub fn split(&self, i: usize) -> Option<[SplitCoordinate; 3]> {
        let high = self.high.get(i * 3..i * 3 + 3)?;
        let low = self.low.get(i * 3..i * 3 + 3)?;
        Some(std::array::from_fn(|k| SplitCoordinate {
            high: high[k],
            low: low[k],
        }))
    }

    /// World position of vertex `i` recombined in double precision.
    pub fn position(&self, i: usize) -> Option<DVec3> {
        let [x, y, z] = self.split(i)?;
        Some(DVec3::new(x.to_f64(), y.to_f64(), z.to_f64()))
    }

    /// Drop all vertices, keeping capacity for `vertex_count`.
    fn reset(&mut self, vertex_count: usize) {
        self.high.clear();
        self.low.clear();
        self.high.reserve(vertex_count * 3);
        self.low.reserve(vertex_count * 3);
    }

    fn push(&mut self, p: DVec3) {
        for c in p.to_array() {
            let (high, low) = split_f64(c);
            self.high.push(high as f32);
            self.low.push(low as f32);
        }
    }
}

/// Reusable working storage for direction interpolation.
///
/// Owned by the caller and handed in explicitly so that nothing but the
/// output buffer is mutated behind the caller's back.
#[derive(Clone, Debug, Default)]
pub struct DirectionScratch {
    right_edge: Vec<DVec3>,
    left_edge: Vec<DVec3>,
    directions: Vec<DVec3>,
}

impl DirectionScratch {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Fill `scratch.directions` with the unit direction of every grid vertex.
///
/// Index 0 is the apex and holds the zero vector. Each edge is first swept
/// from top to bottom (corners 0→3 on the right, 1→2 on the left) through
/// `v_angle`; each row is then swept from its right end toward its left end.
pub fn interpolate_directions(
    keys: &KeyDirections,
    v_angle: f64,
    grid: GridResolution,
    scratch: &mut DirectionScratch,
) {
    let DirectionScratch {
        right_edge,
        left_edge,
        directions,
    } = scratch;

    right_edge.clear();
    left_edge.clear();
    sweep_toward(
        keys[KeyDirections::TOP_RIGHT],
        keys[KeyDirections::BOTTOM_RIGHT],
        v_angle,
        grid.vertical,
        right_edge,
    );
    sweep_toward(
        keys[KeyDirections::TOP_LEFT],
        keys[KeyDirections::BOTTOM_LEFT],
        v_angle,
        grid.vertical,
        left_edge,
    );

    directions.clear();
    directions.reserve(grid.vertex_count());
    directions.push(DVec3::ZERO);
    for (&right, &left) in right_edge.iter().zip(left_edge.iter()) {
        let row_angle = angle_between(right, left);
        sweep_toward(right, left, row_angle, grid.horizontal, directions);
    }

    debug_assert_eq!(directions.len(), grid.vertex_count());
}

/// Place the grid at `radius` around `center` and write split vertices into `out`.
///
/// `out` ends up with exactly `grid.vertex_count()` vertices; vertex 0 is
/// `center` itself.
pub fn compute_frustum_vertices(
    center: DVec3,
    radius: f64,
    keys: &KeyDirections,
    v_angle: f64,
    grid: GridResolution,
    scratch: &mut DirectionScratch,
    out: &mut SplitVertices,
) {
    interpolate_directions(keys, v_angle, grid, scratch);

    out.reset(grid.vertex_count());
    for &d in &scratch.directions {
        out.push(d * radius + center);
    }
}
