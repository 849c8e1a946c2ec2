//! Triangle and line index buffers over a frustum vertex grid.
//!
//! Topology depends only on the [`GridResolution`], so these run once per
//! generator and the results are reused for every vertex update.

use crate::{FrustumError, GridResolution};

/// Index of the apex vertex shared by every side face and outline edge.
pub const APEX: u16 = 0;

/// Write the closed-cap triangle list for `grid` into `out`.
///
/// Order: top side fan, left side fan, bottom side fan, right side fan,
/// then two triangles per interior cell. Bottom and right fans are wound
/// opposite to top and left so every side faces outward.
///
/// Grids that fail [`GridResolution::validate`] are rejected and `out` is
/// left untouched.
pub fn compute_mesh_indices(grid: GridResolution, out: &mut Vec<u16>) -> Result<(), FrustumError> {
    let grid = grid.validate()?;
    let (h_grid, v_grid) = (grid.horizontal, grid.vertical);

    out.clear();
    out.reserve(grid.mesh_index_count());

    for h in 0..h_grid {
        out.extend_from_slice(&[APEX, grid.index(h, 0), grid.index(h + 1, 0)]);
    }

    for v in 0..v_grid {
        out.extend_from_slice(&[APEX, grid.index(h_grid, v), grid.index(h_grid, v + 1)]);
    }

    for h in 0..h_grid {
        out.extend_from_slice(&[APEX, grid.index(h + 1, v_grid), grid.index(h, v_grid)]);
    }

    for v in 0..v_grid {
        out.extend_from_slice(&[APEX, grid.index(0, v + 1), grid.index(0, v)]);
    }

    for h in 0..h_grid {
        for v in 0..v_grid {
            let top_a = grid.index(h, v);
            let top_b = grid.index(h + 1, v);
            let bottom_a = grid.index(h, v + 1);
            let bottom_b = grid.index(h + 1, v + 1);
            out.extend_from_slice(&[top_a, bottom_a, bottom_b, top_a, bottom_b, top_b]);
        }
    }

    debug_assert_eq!(out.len(), grid.mesh_index_count());
    Ok(())
}

/// Write the wireframe segment list for `grid` into `out`.
///
/// Order: the four apex-to-corner edges, every row's horizontal segments,
/// then every column's vertical segments. Invalid grids are rejected as in
/// [`compute_mesh_indices`].
pub fn compute_line_indices(grid: GridResolution, out: &mut Vec<u16>) -> Result<(), FrustumError> {
    let grid = grid.validate()?;
    let (h_grid, v_grid) = (grid.horizontal, grid.vertical);

    out.clear();
    out.reserve(grid.line_index_count());

    for (h, v) in grid.corners() {
        out.extend_from_slice(&[APEX, grid.index(h, v)]);
    }

    for v in 0..=v_grid {
        for h in 0..h_grid {
            out.extend_from_slice(&[grid.index(h, v), grid.index(h + 1, v)]);
        }
    }

    for h in 0..=h_grid {
        for v in 0..v_grid {
            out.extend_from_slice(&[grid.index(h, v), grid.index(h, v + 1)]);
        }
    }

    debug_assert_eq!(out.len(), grid.line_index_count());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    fn mesh(grid: GridResolution) -> Vec<u16> {
        let mut out = Vec::new();
        compute_mesh_indices(grid, &mut out).unwrap();
        out
    }

    fn lines(grid: GridResolution) -> Vec<u16> {
        let mut out = Vec::new();
        compute_line_indices(grid, &mut out).unwrap();
        out
    }

    #[test]
    fn test_mesh_length_formula() {
        for (h, v) in [(1, 1), (2, 2), (3, 5), (23, 23), (10, 1)] {
            let g = GridResolution::new(h, v);
            let expected = (h + v) as usize * 2 * 3 + (h * v) as usize * 6;
            assert_eq!(mesh(g).len(), expected);
        }
    }

    #[test]
    fn test_line_length_formula() {
        for (h, v) in [(1, 1), (2, 2), (3, 5), (10, 10), (1, 7)] {
            let g = GridResolution::new(h, v);
            let expected = (h * (v + 1) + (h + 1) * v + 4) as usize * 2;
            assert_eq!(lines(g).len(), expected);
        }
    }

    #[test]
    fn test_indices_in_bounds() {
        for (h, v) in [(1, 1), (4, 2), (23, 23), (254, 256)] {
            let g = GridResolution::new(h, v);
            let count = g.vertex_count();
            assert!(mesh(g).iter().all(|&i| (i as usize) < count));
            assert!(lines(g).iter().all(|&i| (i as usize) < count));
        }
    }

    #[test]
    fn test_every_vertex_referenced() {
        let g = GridResolution::new(4, 3);
        let used: HashSet<u16> = mesh(g).into_iter().collect();
        assert_eq!(used.len(), g.vertex_count());
        let used: HashSet<u16> = lines(g).into_iter().collect();
        assert_eq!(used.len(), g.vertex_count());
    }

    #[test]
    fn test_1x1_mesh_exact() {
        // Vertices: 0 apex, 1 (0,0), 2 (1,0), 3 (0,1), 4 (1,1).
        let expected: Vec<u16> = vec![
            0, 1, 2, // top
            0, 2, 4, // left
            0, 4, 3, // bottom
            0, 3, 1, // right
            1, 3, 4, 1, 4, 2, // cap
        ];
        assert_eq!(mesh(GridResolution::square(1)), expected);
    }

    #[test]
    fn test_1x1_lines_exact() {
        let expected: Vec<u16> = vec![
            0, 1, 0, 2, 0, 4, 0, 3, // apex edges
            1, 2, 3, 4, // rows
            1, 3, 2, 4, // columns
        ];
        assert_eq!(lines(GridResolution::square(1)), expected);
    }

    #[test]
    fn test_side_fans_start_at_apex() {
        let g = GridResolution::new(3, 2);
        let m = mesh(g);
        let side_triangles = (g.horizontal + g.vertical) as usize * 2;
        for tri in m.chunks_exact(3).take(side_triangles) {
            assert_eq!(tri[0], APEX);
        }
        for tri in m.chunks_exact(3).skip(side_triangles) {
            assert!(!tri.contains(&APEX));
        }
    }

    #[test]
    fn test_recompute_reuses_buffer() {
        let g = GridResolution::square(5);
        let mut out = Vec::new();
        compute_mesh_indices(g, &mut out).unwrap();
        let first = out.clone();
        let capacity = out.capacity();
        compute_mesh_indices(g, &mut out).unwrap();
        assert_eq!(out, first);
        assert_eq!(out.capacity(), capacity);
    }

    #[test]
    fn test_grid_past_u16_limit_rejected() {
        let mut m = vec![7u16; 3];
        let mut l = vec![9u16; 2];
        for g in [GridResolution::square(255), GridResolution::square(300)] {
            assert_eq!(
                compute_mesh_indices(g, &mut m),
                Err(FrustumError::InvalidGrid(g))
            );
            assert_eq!(
                compute_line_indices(g, &mut l),
                Err(FrustumError::InvalidGrid(g))
            );
        }
        assert_eq!(m, vec![7, 7, 7]);
        assert_eq!(l, vec![9, 9]);
    }

    #[test]
    fn test_zero_cell_grid_rejected() {
        let mut out = Vec::new();
        assert!(compute_mesh_indices(GridResolution::new(0, 3), &mut out).is_err());
        assert!(compute_line_indices(GridResolution::new(3, 0), &mut out).is_err());
        assert!(out.is_empty());
    }

    #[test]
    fn test_largest_grid_reaches_last_index() {
        // 254 × 256 cells: 65536 vertices, the last one addressed as u16::MAX.
        let g = GridResolution::new(254, 256);
        let l = lines(g);
        assert_eq!(&l[..8], &[0, 1, 0, 255, 0, u16::MAX, 0, 65281]);
        assert_eq!(mesh(g).iter().copied().max(), Some(u16::MAX));
    }
}
