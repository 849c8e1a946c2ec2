//! Viewshed frustum geometry: a triangulated cap mesh and a wireframe outline
//! around an observer, emitted as high/low split `f32` vertices and `u16`
//! index buffers for a relative-to-eye renderer.
//!
//! The observer's local frame comes from [`viewshed_geodesy`]; four corner
//! rays span the horizontal and vertical field of view; a grid of directions
//! is interpolated between them by axis-angle rotation and pushed out to the
//! requested radius.
//!
//! ```
//! use glam::DVec3;
//! use viewshed_frustum::{FrustumGeometryGenerator, FrustumParams, GridResolution};
//!
//! let mesh = GridResolution::square(2);
//! let line = GridResolution::square(1);
//! let mut generator = FrustumGeometryGenerator::with_grids(mesh, line).unwrap();
//! let params = FrustumParams {
//!     center: DVec3::ZERO,
//!     aim: DVec3::Y,
//!     radius: 100.0,
//!     h_angle: std::f64::consts::FRAC_PI_2,
//!     v_angle: std::f64::consts::FRAC_PI_2,
//! };
//! generator.compute_vertices(&params, mesh, line).unwrap();
//! assert_eq!(generator.mesh_vertices().vertex_count(), 10);
//! assert_eq!(generator.mesh_indices().len(), 48);
//! ```

mod error;
mod generator;
mod grid;
pub mod indices;
mod key_directions;
pub mod vertices;
mod viewshed;

pub use error::{AngleAxis, FrustumError};
pub use generator::{FrustumGeometryGenerator, FrustumParams, FrustumTopology, GeneratorPhase};
pub use grid::{GridResolution, MAX_GRID_VERTICES};
pub use indices::{compute_line_indices, compute_mesh_indices};
pub use key_directions::KeyDirections;
pub use vertices::{DirectionScratch, SplitVertices, compute_frustum_vertices};
pub use viewshed::{
    DEFAULT_ANGLE_DEG, DEFAULT_LINE_GRID, DEFAULT_MESH_GRID, Viewshed, ViewshedOptions,
    ViewshedStyle,
};
