use std::fmt;

/// Size of the coarse grid the high half of a split coordinate is snapped to.
///
/// The low half is always strictly smaller than this in magnitude, so it keeps
/// roughly 2⁻⁸ m resolution once narrowed to `f32`.
pub const SPLIT_CELL: f64 = 65536.0;

/// Split `value` into a coarse part and a residual, both still in `f64`.
///
/// The coarse part is `sign(value) * floor(|value| / 65536) * 65536`; the
/// residual is whatever is left. `high + low == value` exactly.
pub fn split_f64(value: f64) -> (f64, f64) {
    if value >= 0.0 {
        let high = (value / SPLIT_CELL).floor() * SPLIT_CELL;
        (high, value - high)
    } else {
        let high = (-value / SPLIT_CELL).floor() * SPLIT_CELL;
        (-high, value + high)
    }
}

/// A double-precision coordinate carried as two `f32` values.
///
/// Shaders add `high` and `low` after subtracting the camera's own split
/// position, recovering precision that a single `f32` would lose at
/// Earth-scale magnitudes.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct SplitCoordinate {
    /// Multiple of [`SPLIT_CELL`] (or its negation).
    pub high: f32,
    /// Residual, `|low| < SPLIT_CELL`.
    pub low: f32,
}

impl SplitCoordinate {
    /// Encode a double.
    pub fn from_f64(value: f64) -> Self {
        let (high, low) = split_f64(value);
        Self {
            high: high as f32,
            low: low as f32,
        }
    }

    /// Sum both halves back in double precision.
    pub fn to_f64(self) -> f64 {
        f64::from(self.high) + f64::from(self.low)
    }
}

impl From<f64> for SplitCoordinate {
    fn from(value: f64) -> Self {
        Self::from_f64(value)
    }
}

impl fmt::Display for SplitCoordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Split({} + {:.4})", self.high, self.low)
    }
}
