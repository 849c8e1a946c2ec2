//! Frustum generation error types.

use std::fmt;

use viewshed_geodesy::FrameError;

use crate::GridResolution;

/// Which field-of-view angle a range error refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleAxis {
    Horizontal,
    Vertical,
}

impl fmt::Display for AngleAxis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AngleAxis::Horizontal => f.write_str("horizontal"),
            AngleAxis::Vertical => f.write_str("vertical"),
        }
    }
}

/// Errors reported by the frustum generator. None of them leave partially
/// written geometry behind.
#[derive(Debug, Clone, Copy, PartialEq, thiserror::Error)]
pub enum FrustumError {
    /// Observer/aim pair cannot define a local frame.
    #[error("degenerate observer/aim input: {0}")]
    DegenerateInput(#[from] FrameError),

    /// A field-of-view angle is not strictly between 0 and π.
    #[error("{axis} angle {value} rad is outside (0, π)")]
    AngleRange { axis: AngleAxis, value: f64 },

    /// Vertices were requested for a grid other than the one the indices were built for.
    #[error("grid {actual} does not match the {expected} grid the indices were built for")]
    GridMismatch {
        expected: GridResolution,
        actual: GridResolution,
    },

    /// Grid has a zero dimension or more vertices than a 16-bit index can address.
    #[error("invalid grid {0}: needs at least 1 cell per axis and at most 65536 vertices")]
    InvalidGrid(GridResolution),

    /// Radius is not a positive finite number.
    #[error("radius {0} is not a positive finite length")]
    InvalidRadius(f64),

    /// Vertices were requested before the index buffers were built.
    #[error("index buffers have not been computed yet")]
    IndicesNotComputed,
}
