//! The four corner rays bounding a frustum's angular extent.

use std::ops::Index;

use glam::{DQuat, DVec3};
use viewshed_geodesy::LocalFrame;

/// `(vertical, horizontal)` half-angle signs per corner. A positive vertical
/// sign tilts toward `up`; a positive horizontal sign turns toward `right`.
///
/// ```text
///  1 ------------- 0
///  |    forward    |
///  2 ------------- 3
/// ```
const CORNER_SIGNS: [(f64, f64); 4] = [(1.0, 1.0), (1.0, -1.0), (-1.0, -1.0), (-1.0, 1.0)];

/// Unit corner directions in a fixed winding: 0 top-right, 1 top-left,
/// 2 bottom-left, 3 bottom-right.
///
/// Corners 0 and 3 bound the right edge, 1 and 2 the left edge; 0/1 share
/// the top edge and 3/2 the bottom edge. Vertex interpolation relies on this.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct KeyDirections(pub [DVec3; 4]);

impl KeyDirections {
    pub const TOP_RIGHT: usize = 0;
    pub const TOP_LEFT: usize = 1;
    pub const BOTTOM_LEFT: usize = 2;
    pub const BOTTOM_RIGHT: usize = 3;

    /// Tilt `frame.forward` by ±`v_angle / 2` about `right`, then turn it by
    /// ±`h_angle / 2` about `up`. Both rotations use the unrotated frame axes.
    pub fn compute(frame: &LocalFrame, h_angle: f64, v_angle: f64) -> Self {
        let h_half = h_angle * 0.5;
        let v_half = v_angle * 0.5;

        let directions = CORNER_SIGNS.map(|(tilt, turn)| {
            let pitch = DQuat::from_axis_angle(frame.right, tilt * v_half);
            // Positive rotation about `up` swings forward toward -right.
            let yaw = DQuat::from_axis_angle(frame.up, -turn * h_half);
            (yaw * pitch * frame.forward).normalize()
        });

        Self(directions)
    }

    pub fn as_array(&self) -> &[DVec3; 4] {
        &self.0
    }
}

impl Index<usize> for KeyDirections {
    type Output = DVec3;

    fn index(&self, index: usize) -> &DVec3 {
        &self.0[index]
    }
}
