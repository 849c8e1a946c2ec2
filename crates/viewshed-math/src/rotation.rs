//! Axis-angle rotation helpers.

use glam::{DQuat, DVec3};

/// Rotate `v` counter-clockwise by `angle` radians about the unit `axis`.
///
/// Equivalent to applying the Rodrigues rotation matrix for `(axis, angle)`.
#[inline]
pub fn rotate_about(v: DVec3, axis: DVec3, angle: f64) -> DVec3 {
    DQuat::from_axis_angle(axis, angle) * v
}

/// Angle between two non-zero vectors, in radians.
///
/// Uses `atan2(|a × b|, a · b)`, which stays accurate for nearly parallel
/// inputs where `acos` of the dot product loses most of its digits.
pub fn angle_between(a: DVec3, b: DVec3) -> f64 {
    a.cross(b).length().atan2(a.dot(b))
}

/// Append `steps + 1` evenly spaced directions to `out`, starting at `from`
/// and turning toward `to` until `angle` radians have been swept.
///
/// The rotation axis is `from × to`. When the two directions are parallel
/// there is no plane to rotate in and `from` is repeated.
pub fn sweep_toward(from: DVec3, to: DVec3, angle: f64, steps: u32, out: &mut Vec<DVec3>) {
    out.reserve(steps as usize + 1);

    let Some(axis) = from.cross(to).try_normalize() else {
        out.extend(std::iter::repeat_n(from, steps as usize + 1));
        return;
    };

    if steps == 0 {
        out.push(from);
        return;
    }

    for i in 0..=steps {
        let t = angle * f64::from(i) / f64::from(steps);
        out.push(rotate_about(from, axis, t));
    }
}
