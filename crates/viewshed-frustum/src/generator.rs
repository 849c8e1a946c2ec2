//! Stateful frustum geometry generator: fixed topology, recomputable vertices.

use std::f64::consts::PI;

use glam::DVec3;
use tracing::{debug, warn};
use viewshed_geodesy::{Ellipsoid, LocalFrame, LocalFrameBuilder};

use crate::indices::{compute_line_indices, compute_mesh_indices};
use crate::vertices::{DirectionScratch, SplitVertices, compute_frustum_vertices};
use crate::{AngleAxis, FrustumError, GridResolution, KeyDirections};

/// Inputs for one vertex update.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FrustumParams {
    /// Observer position; becomes the apex.
    pub center: DVec3,
    /// Point the frustum looks at.
    pub aim: DVec3,
    /// Distance from the apex to the cap, in the same unit as the positions.
    pub radius: f64,
    /// Horizontal field of view in radians, in (0, π).
    pub h_angle: f64,
    /// Vertical field of view in radians, in (0, π).
    pub v_angle: f64,
}

impl FrustumParams {
    /// Reject angles outside (0, π) and non-positive or non-finite radii.
    pub fn validate(&self) -> Result<(), FrustumError> {
        check_angle(AngleAxis::Horizontal, self.h_angle)?;
        check_angle(AngleAxis::Vertical, self.v_angle)?;
        if !(self.radius.is_finite() && self.radius > 0.0) {
            return Err(FrustumError::InvalidRadius(self.radius));
        }
        Ok(())
    }
}

fn check_angle(axis: AngleAxis, value: f64) -> Result<(), FrustumError> {
    if value > 0.0 && value < PI {
        Ok(())
    } else {
        Err(FrustumError::AngleRange { axis, value })
    }
}

/// Lifecycle of a [`FrustumGeometryGenerator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GeneratorPhase {
    /// Constructed; no index buffers yet.
    Empty,
    /// Index buffers built; no vertices yet.
    Initialized,
    /// Vertices computed at least once.
    Updated,
}

/// Mesh and line grid resolutions fixed by [`FrustumGeometryGenerator::compute_indices`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FrustumTopology {
    pub mesh: GridResolution,
    pub line: GridResolution,
}

/// Produces the filled cap mesh and the wireframe outline of a viewshed frustum.
///
/// Index buffers are computed once; afterwards only vertex positions change.
/// Every error leaves all buffers exactly as they were.
#[derive(Debug, Default)]
pub struct FrustumGeometryGenerator {
    frame_builder: LocalFrameBuilder,
    topology: Option<FrustumTopology>,
    updated: bool,
    frame: Option<LocalFrame>,
    key_directions: Option<KeyDirections>,
    scratch: DirectionScratch,
    mesh_vertices: SplitVertices,
    mesh_indices: Vec<u16>,
    line_vertices: SplitVertices,
    line_indices: Vec<u16>,
}

impl FrustumGeometryGenerator {
    /// Generator using the WGS84 ellipsoid for the observer's vertical.
    pub fn new() -> Self {
        Self::default()
    }

    /// Generator using a custom reference ellipsoid.
    pub fn with_ellipsoid(ellipsoid: Ellipsoid) -> Self {
        Self {
            frame_builder: LocalFrameBuilder::new(ellipsoid),
            ..Self::default()
        }
    }

    /// Generator with index buffers already built.
    pub fn with_grids(mesh: GridResolution, line: GridResolution) -> Result<Self, FrustumError> {
        let mut generator = Self::new();
        generator.compute_indices(mesh, line)?;
        Ok(generator)
    }

    /// Build the mesh and line index buffers.
    ///
    /// Topology is fixed after the first successful call: calling again with
    /// the same grids is a no-op, with different grids a [`FrustumError::GridMismatch`].
    pub fn compute_indices(
        &mut self,
        mesh: GridResolution,
        line: GridResolution,
    ) -> Result<(), FrustumError> {
        let mesh = mesh.validate()?;
        let line = line.validate()?;

        if let Some(topology) = self.topology {
            return check_topology(topology, mesh, line);
        }

        compute_mesh_indices(mesh, &mut self.mesh_indices)?;
        compute_line_indices(line, &mut self.line_indices)?;
        self.topology = Some(FrustumTopology { mesh, line });

        debug!(
            mesh_grid = %mesh,
            line_grid = %line,
            mesh_indices = self.mesh_indices.len(),
            line_indices = self.line_indices.len(),
            "Built frustum index buffers"
        );
        Ok(())
    }

    /// Recompute mesh and line vertices for new observer/aim/radius/angles.
    ///
    /// `mesh` and `line` must equal the grids passed to [`compute_indices`](Self::compute_indices).
    /// On error nothing is modified and the previous geometry stays valid.
    pub fn compute_vertices(
        &mut self,
        params: &FrustumParams,
        mesh: GridResolution,
        line: GridResolution,
    ) -> Result<(), FrustumError> {
        let result = self.try_compute_vertices(params, mesh, line);
        if let Err(err) = &result {
            warn!("Rejected frustum update: {err}");
        }
        result
    }

    fn try_compute_vertices(
        &mut self,
        params: &FrustumParams,
        mesh: GridResolution,
        line: GridResolution,
    ) -> Result<(), FrustumError> {
        let topology = self.topology.ok_or(FrustumError::IndicesNotComputed)?;
        check_topology(topology, mesh, line)?;
        params.validate()?;

        let frame = self.frame_builder.build_frame(params.center, params.aim)?;
        let keys = KeyDirections::compute(&frame, params.h_angle, params.v_angle);

        compute_frustum_vertices(
            params.center,
            params.radius,
            &keys,
            params.v_angle,
            topology.mesh,
            &mut self.scratch,
            &mut self.mesh_vertices,
        );
        compute_frustum_vertices(
            params.center,
            params.radius,
            &keys,
            params.v_angle,
            topology.line,
            &mut self.scratch,
            &mut self.line_vertices,
        );

        self.frame = Some(frame);
        self.key_directions = Some(keys);
        self.updated = true;

        debug!(
            radius = params.radius,
            h_angle = params.h_angle,
            v_angle = params.v_angle,
            mesh_vertices = self.mesh_vertices.vertex_count(),
            line_vertices = self.line_vertices.vertex_count(),
            "Recomputed frustum vertices"
        );
        Ok(())
    }

    pub fn phase(&self) -> GeneratorPhase {
        match (self.topology, self.updated) {
            (None, _) => GeneratorPhase::Empty,
            (Some(_), false) => GeneratorPhase::Initialized,
            (Some(_), true) => GeneratorPhase::Updated,
        }
    }

    pub fn topology(&self) -> Option<FrustumTopology> {
        self.topology
    }

    /// Local frame from the last successful update.
    pub fn frame(&self) -> Option<&LocalFrame> {
        self.frame.as_ref()
    }

    /// Corner directions from the last successful update.
    pub fn key_directions(&self) -> Option<&KeyDirections> {
        self.key_directions.as_ref()
    }

    pub fn mesh_vertices(&self) -> &SplitVertices {
        &self.mesh_vertices
    }

    pub fn mesh_indices(&self) -> &[u16] {
        &self.mesh_indices
    }

    pub fn line_vertices(&self) -> &SplitVertices {
        &self.line_vertices
    }

    pub fn line_indices(&self) -> &[u16] {
        &self.line_indices
    }

    /// Raw bytes of the mesh index buffer for GPU upload.
    pub fn mesh_index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.mesh_indices)
    }

    /// Raw bytes of the line index buffer for GPU upload.
    pub fn line_index_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.line_indices)
    }
}

fn check_topology(
    topology: FrustumTopology,
    mesh: GridResolution,
    line: GridResolution,
) -> Result<(), FrustumError> {
    if mesh != topology.mesh {
        return Err(FrustumError::GridMismatch {
            expected: topology.mesh,
            actual: mesh,
        });
    }
    if line != topology.line {
        return Err(FrustumError::GridMismatch {
            expected: topology.line,
            actual: line,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;
    use viewshed_geodesy::{Cartographic, FrameError};

    const MESH: GridResolution = GridResolution::square(4);
    const LINE: GridResolution = GridResolution::new(3, 2);

    fn params() -> FrustumParams {
        FrustumParams {
            center: DVec3::ZERO,
            aim: DVec3::Y,
            radius: 100.0,
            h_angle: FRAC_PI_2,
            v_angle: FRAC_PI_2,
        }
    }

    fn ready() -> FrustumGeometryGenerator {
        let mut g = FrustumGeometryGenerator::with_grids(MESH, LINE).unwrap();
        g.compute_vertices(&params(), MESH, LINE).unwrap();
        g
    }

    #[test]
    fn test_phases() {
        let mut g = FrustumGeometryGenerator::new();
        assert_eq!(g.phase(), GeneratorPhase::Empty);
        g.compute_indices(MESH, LINE).unwrap();
        assert_eq!(g.phase(), GeneratorPhase::Initialized);
        g.compute_vertices(&params(), MESH, LINE).unwrap();
        assert_eq!(g.phase(), GeneratorPhase::Updated);
        g.compute_vertices(&FrustumParams { radius: 5.0, ..params() }, MESH, LINE)
            .unwrap();
        assert_eq!(g.phase(), GeneratorPhase::Updated);
    }

    #[test]
    fn test_buffer_sizes() {
        let g = ready();
        assert_eq!(g.mesh_vertices().high().len(), MESH.vertex_count() * 3);
        assert_eq!(g.mesh_vertices().low().len(), MESH.vertex_count() * 3);
        assert_eq!(g.line_vertices().high().len(), LINE.vertex_count() * 3);
        assert_eq!(g.mesh_indices().len(), MESH.mesh_index_count());
        assert_eq!(g.line_indices().len(), LINE.line_index_count());
        assert_eq!(g.mesh_index_bytes().len(), MESH.mesh_index_count() * 2);
        assert_eq!(g.line_index_bytes().len(), LINE.line_index_count() * 2);
    }

    #[test]
    fn test_vertices_before_indices_rejected() {
        let mut g = FrustumGeometryGenerator::new();
        let err = g.compute_vertices(&params(), MESH, LINE).unwrap_err();
        assert_eq!(err, FrustumError::IndicesNotComputed);
        assert!(g.mesh_vertices().is_empty());
        assert_eq!(g.phase(), GeneratorPhase::Empty);
    }

    #[test]
    fn test_wide_angle_rejected_before_first_update() {
        let mut g = FrustumGeometryGenerator::with_grids(MESH, LINE).unwrap();
        let wide = FrustumParams {
            h_angle: PI,
            ..params()
        };
        let err = g.compute_vertices(&wide, MESH, LINE).unwrap_err();
        assert!(matches!(
            err,
            FrustumError::AngleRange {
                axis: AngleAxis::Horizontal,
                ..
            }
        ));
        assert!(g.mesh_vertices().is_empty());
        assert!(g.line_vertices().is_empty());
        assert_eq!(g.phase(), GeneratorPhase::Initialized);
    }

    #[test]
    fn test_wide_angle_keeps_previous_vertices() {
        let mut g = ready();
        let mesh_before = g.mesh_vertices().clone();
        let line_before = g.line_vertices().clone();
        for bad in [
            FrustumParams { v_angle: PI, ..params() },
            FrustumParams { v_angle: 4.0, ..params() },
            FrustumParams { h_angle: 3.5, ..params() },
            FrustumParams { h_angle: 0.0, ..params() },
            FrustumParams { v_angle: f64::NAN, ..params() },
        ] {
            assert!(g.compute_vertices(&bad, MESH, LINE).is_err());
            assert_eq!(g.mesh_vertices(), &mesh_before);
            assert_eq!(g.line_vertices(), &line_before);
        }
    }

    #[test]
    fn test_invalid_radius_rejected() {
        let mut g = ready();
        for radius in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            let err = g
                .compute_vertices(&FrustumParams { radius, ..params() }, MESH, LINE)
                .unwrap_err();
            assert!(matches!(err, FrustumError::InvalidRadius(_)));
        }
    }

    #[test]
    fn test_degenerate_aim_keeps_previous_vertices() {
        let mut g = ready();
        let before = g.mesh_vertices().clone();
        let err = g
            .compute_vertices(&FrustumParams { aim: DVec3::ZERO, ..params() }, MESH, LINE)
            .unwrap_err();
        assert_eq!(err, FrustumError::DegenerateInput(FrameError::CoincidentPoints));
        assert_eq!(g.mesh_vertices(), &before);
    }

    #[test]
    fn test_grid_mismatch_on_vertices() {
        let mut g = ready();
        let before = g.mesh_vertices().clone();
        let err = g
            .compute_vertices(&params(), GridResolution::square(5), LINE)
            .unwrap_err();
        assert_eq!(
            err,
            FrustumError::GridMismatch {
                expected: MESH,
                actual: GridResolution::square(5),
            }
        );
        let err = g
            .compute_vertices(&params(), MESH, GridResolution::square(3))
            .unwrap_err();
        assert!(matches!(err, FrustumError::GridMismatch { .. }));
        assert_eq!(g.mesh_vertices(), &before);
    }

    #[test]
    fn test_indices_fixed_after_first_call() {
        let mut g = FrustumGeometryGenerator::with_grids(MESH, LINE).unwrap();
        let indices = g.mesh_indices().to_vec();
        assert!(g.compute_indices(MESH, LINE).is_ok());
        assert!(g.compute_indices(GridResolution::square(8), LINE).is_err());
        assert_eq!(g.mesh_indices(), indices.as_slice());
        assert_eq!(g.topology(), Some(FrustumTopology { mesh: MESH, line: LINE }));
    }

    #[test]
    fn test_invalid_grid_rejected() {
        let mut g = FrustumGeometryGenerator::new();
        let err = g
            .compute_indices(GridResolution::new(0, 3), LINE)
            .unwrap_err();
        assert_eq!(err, FrustumError::InvalidGrid(GridResolution::new(0, 3)));
        assert_eq!(g.phase(), GeneratorPhase::Empty);
    }

    #[test]
    fn test_indices_unchanged_by_vertex_updates() {
        let mut g = ready();
        let mesh = g.mesh_indices().to_vec();
        let line = g.line_indices().to_vec();
        g.compute_vertices(
            &FrustumParams {
                aim: DVec3::new(1.0, 1.0, 0.2),
                radius: 42.0,
                h_angle: 0.3,
                v_angle: 2.5,
                ..params()
            },
            MESH,
            LINE,
        )
        .unwrap();
        assert_eq!(g.mesh_indices(), mesh.as_slice());
        assert_eq!(g.line_indices(), line.as_slice());
    }

    #[test]
    fn test_earth_scale_apex_and_radius() {
        let e = Ellipsoid::WGS84;
        let center = e.cartographic_to_cartesian(&Cartographic::from_degrees(116.39, 39.91, 100.0));
        let aim = e.cartographic_to_cartesian(&Cartographic::from_degrees(116.392, 39.911, 60.0));
        let mut g = FrustumGeometryGenerator::with_grids(MESH, LINE).unwrap();
        let p = FrustumParams {
            center,
            aim,
            radius: 300.0,
            h_angle: 120f64.to_radians(),
            v_angle: 60f64.to_radians(),
        };
        g.compute_vertices(&p, MESH, LINE).unwrap();

        let apex = g.mesh_vertices().position(0).unwrap();
        assert!(apex.abs_diff_eq(center, 0.01));
        for i in 1..g.mesh_vertices().vertex_count() {
            let d = g.mesh_vertices().position(i).unwrap().distance(center);
            assert!((d - 300.0).abs() < 0.02, "vertex {i} at {d}");
        }
        let frame = g.frame().unwrap();
        assert!(frame.forward.abs_diff_eq((aim - center).normalize(), 1e-12));
        assert!(g.key_directions().is_some());
    }

    #[test]
    fn test_custom_ellipsoid() {
        let mut g = FrustumGeometryGenerator::with_ellipsoid(Ellipsoid::UNIT_SPHERE);
        g.compute_indices(MESH, LINE).unwrap();
        let p = FrustumParams {
            center: DVec3::new(0.0, 0.0, 2.0),
            aim: DVec3::new(1.0, 0.0, 2.0),
            ..params()
        };
        g.compute_vertices(&p, MESH, LINE).unwrap();
        let frame = g.frame().unwrap();
        assert!(frame.up.abs_diff_eq(DVec3::Z, 1e-9));
    }
}
