//! Observer-relative right/forward/up basis.

use glam::{DMat3, DVec3};

use crate::Ellipsoid;

/// Cross products shorter than this are treated as parallel inputs.
const PARALLEL_EPSILON: f64 = 1e-12;

/// Reasons a local frame cannot be built.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum FrameError {
    /// Observer and aim are the same point, so there is no forward direction.
    #[error("observer and aim coincide; forward direction is undefined")]
    CoincidentPoints,

    /// The aim lies straight above or below the observer.
    #[error("aim is along the local vertical; right direction is undefined")]
    AimAlongUp,

    /// The observer is not at the ellipsoid center, yet no geodetic
    /// vertical could be computed (non-finite or overflowing coordinates).
    #[error("no geodetic vertical at the observer position")]
    NoVertical,
}

/// An orthonormal, right-handed basis at the observer.
///
/// `forward` points at the aim, `right` is horizontal, and `up` is the local
/// vertical re-orthogonalized against `forward`. `right × forward = up`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct LocalFrame {
    pub right: DVec3,
    pub forward: DVec3,
    pub up: DVec3,
}

impl LocalFrame {
    /// The basis as a matrix with columns `right`, `forward`, `up`.
    pub fn to_mat3(&self) -> DMat3 {
        DMat3::from_cols(self.right, self.forward, self.up)
    }

    /// Express a frame-local vector `(right, forward, up)` in world space.
    pub fn to_world(&self, local: DVec3) -> DVec3 {
        self.to_mat3() * local
    }
}

/// Builds [`LocalFrame`]s using a reference ellipsoid for the vertical.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LocalFrameBuilder {
    ellipsoid: Ellipsoid,
}

impl LocalFrameBuilder {
    pub fn new(ellipsoid: Ellipsoid) -> Self {
        Self { ellipsoid }
    }

    pub fn ellipsoid(&self) -> &Ellipsoid {
        &self.ellipsoid
    }

    /// Auxiliary vertical at `observer`.
    ///
    /// The ellipsoid center has no geodetic vertical; the polar axis stands in
    /// for it so that coordinates local to the origin still get a frame. Any
    /// other position without a vertical is an error.
    pub fn auxiliary_up(&self, observer: DVec3) -> Result<DVec3, FrameError> {
        match self.ellipsoid.geodetic_up(observer) {
            Some(up) => Ok(up),
            None if (observer / self.ellipsoid.radii()).length_squared() == 0.0 => Ok(DVec3::Z),
            None => Err(FrameError::NoVertical),
        }
    }

    /// Build the frame looking from `observer` toward `aim`.
    pub fn build_frame(&self, observer: DVec3, aim: DVec3) -> Result<LocalFrame, FrameError> {
        let up_aux = self.auxiliary_up(observer)?;

        let forward = (aim - observer)
            .try_normalize()
            .ok_or(FrameError::CoincidentPoints)?;

        let right = forward.cross(up_aux);
        if right.length() < PARALLEL_EPSILON {
            return Err(FrameError::AimAlongUp);
        }
        let right = right.normalize();
        let up = right.cross(forward).normalize();

        Ok(LocalFrame { right, forward, up })
    }
}
