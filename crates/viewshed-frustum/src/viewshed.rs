//! High-level viewshed: user-facing options plus the generator that backs them.

use glam::DVec3;
use tracing::info;

use crate::{
    FrustumError, FrustumGeometryGenerator, FrustumParams, GridResolution, SplitVertices,
};

/// Default horizontal and vertical field of view, in degrees.
pub const DEFAULT_ANGLE_DEG: f64 = 120.0;

/// Default cap mesh resolution.
pub const DEFAULT_MESH_GRID: GridResolution = GridResolution::square(23);

/// Default wireframe resolution.
pub const DEFAULT_LINE_GRID: GridResolution = GridResolution::square(10);

/// Colors handed through to the renderer. Not used by geometry generation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewshedStyle {
    /// RGBA for areas the observer can see.
    pub visible_color: [f32; 4],
    /// RGBA for occluded areas.
    pub invisible_color: [f32; 4],
    /// RGBA for the wireframe outline.
    pub line_color: [f32; 4],
    /// Opacity of the projected visibility overlay.
    pub alpha: f32,
}

impl Default for ViewshedStyle {
    fn default() -> Self {
        Self {
            visible_color: [0.0, 1.0, 0.0, 1.0],
            invisible_color: [1.0, 0.0, 0.0, 1.0],
            line_color: [0.0, 1.0, 0.0, 1.0],
            alpha: 0.8,
        }
    }
}

/// Everything needed to place a viewshed.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ViewshedOptions {
    pub center: DVec3,
    pub aim: DVec3,
    /// Cap radius; `None` uses the observer-to-aim distance.
    pub radius: Option<f64>,
    /// Horizontal field of view, radians.
    pub h_angle: f64,
    /// Vertical field of view, radians.
    pub v_angle: f64,
    pub mesh_grid: GridResolution,
    pub line_grid: GridResolution,
    pub style: ViewshedStyle,
}

impl ViewshedOptions {
    /// Options with default angles, grids and style.
    pub fn new(center: DVec3, aim: DVec3) -> Self {
        Self {
            center,
            aim,
            radius: None,
            h_angle: DEFAULT_ANGLE_DEG.to_radians(),
            v_angle: DEFAULT_ANGLE_DEG.to_radians(),
            mesh_grid: DEFAULT_MESH_GRID,
            line_grid: DEFAULT_LINE_GRID,
            style: ViewshedStyle::default(),
        }
    }

    pub fn with_radius(mut self, radius: f64) -> Self {
        self.radius = Some(radius);
        self
    }

    pub fn with_angles(mut self, h_angle: f64, v_angle: f64) -> Self {
        self.h_angle = h_angle;
        self.v_angle = v_angle;
        self
    }

    pub fn with_angles_degrees(self, h_deg: f64, v_deg: f64) -> Self {
        self.with_angles(h_deg.to_radians(), v_deg.to_radians())
    }

    pub fn with_grids(mut self, mesh_grid: GridResolution, line_grid: GridResolution) -> Self {
        self.mesh_grid = mesh_grid;
        self.line_grid = line_grid;
        self
    }

    pub fn with_style(mut self, style: ViewshedStyle) -> Self {
        self.style = style;
        self
    }

    /// Radius actually used for the cap.
    pub fn effective_radius(&self) -> f64 {
        self.radius
            .unwrap_or_else(|| self.center.distance(self.aim))
    }

    pub fn params(&self) -> FrustumParams {
        FrustumParams {
            center: self.center,
            aim: self.aim,
            radius: self.effective_radius(),
            h_angle: self.h_angle,
            v_angle: self.v_angle,
        }
    }
}

/// A viewshed whose geometry always matches its last accepted options.
#[derive(Debug)]
pub struct Viewshed {
    options: ViewshedOptions,
    generator: FrustumGeometryGenerator,
}

impl Viewshed {
    /// Build indices and the first set of vertices.
    pub fn new(options: ViewshedOptions) -> Result<Self, FrustumError> {
        let mut generator = FrustumGeometryGenerator::with_grids(options.mesh_grid, options.line_grid)?;
        generator.compute_vertices(&options.params(), options.mesh_grid, options.line_grid)?;

        info!(
            radius = options.effective_radius(),
            h_angle_deg = options.h_angle.to_degrees(),
            v_angle_deg = options.v_angle.to_degrees(),
            mesh_grid = %options.mesh_grid,
            line_grid = %options.line_grid,
            "Created viewshed"
        );

        Ok(Self { options, generator })
    }

    /// Use a pre-configured generator, e.g. one with a custom ellipsoid.
    ///
    /// Index buffers are built if the generator has none yet.
    pub fn with_generator(
        options: ViewshedOptions,
        mut generator: FrustumGeometryGenerator,
    ) -> Result<Self, FrustumError> {
        generator.compute_indices(options.mesh_grid, options.line_grid)?;
        generator.compute_vertices(&options.params(), options.mesh_grid, options.line_grid)?;
        Ok(Self { options, generator })
    }

    /// Edit the options and recompute.
    ///
    /// The edit is committed only if recomputation succeeds; otherwise options
    /// and geometry are left as they were. Grid changes are rejected.
    pub fn update(
        &mut self,
        edit: impl FnOnce(&mut ViewshedOptions),
    ) -> Result<(), FrustumError> {
        let mut candidate = self.options;
        edit(&mut candidate);
        self.generator
            .compute_vertices(&candidate.params(), candidate.mesh_grid, candidate.line_grid)?;
        self.options = candidate;
        Ok(())
    }

    pub fn set_center(&mut self, center: DVec3) -> Result<(), FrustumError> {
        self.update(|o| o.center = center)
    }

    pub fn set_aim(&mut self, aim: DVec3) -> Result<(), FrustumError> {
        self.update(|o| o.aim = aim)
    }

    pub fn set_radius(&mut self, radius: Option<f64>) -> Result<(), FrustumError> {
        self.update(|o| o.radius = radius)
    }

    pub fn set_angles(&mut self, h_angle: f64, v_angle: f64) -> Result<(), FrustumError> {
        self.update(|o| {
            o.h_angle = h_angle;
            o.v_angle = v_angle;
        })
    }

    /// Style changes need no geometry work.
    pub fn set_style(&mut self, style: ViewshedStyle) {
        self.options.style = style;
    }

    pub fn options(&self) -> &ViewshedOptions {
        &self.options
    }

    pub fn style(&self) -> &ViewshedStyle {
        &self.options.style
    }

    pub fn generator(&self) -> &FrustumGeometryGenerator {
        &self.generator
    }

    pub fn mesh_vertices(&self) -> &SplitVertices {
        self.generator.mesh_vertices()
    }

    pub fn mesh_indices(&self) -> &[u16] {
        self.generator.mesh_indices()
    }

    pub fn line_vertices(&self) -> &SplitVertices {
        self.generator.line_vertices()
    }

    pub fn line_indices(&self) -> &[u16] {
        self.generator.line_indices()
    }
}
