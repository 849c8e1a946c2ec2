//! Longitude, latitude and height above an ellipsoid.

use std::fmt;

/// A geodetic position. Longitude and latitude are stored in radians.
#[derive(Clone, Copy, Debug, PartialEq, Default)]
pub struct Cartographic {
    /// Longitude in radians, positive east. Range: (-π, π\].
    pub longitude: f64,
    /// Geodetic latitude in radians, positive north. Range: \[-π/2, π/2\].
    pub latitude: f64,
    /// Height above the ellipsoid surface in meters.
    pub height: f64,
}

impl Cartographic {
    /// Create from radians.
    pub fn new(longitude: f64, latitude: f64, height: f64) -> Self {
        Self {
            longitude,
            latitude,
            height,
        }
    }

    /// Create from degrees.
    pub fn from_degrees(longitude_deg: f64, latitude_deg: f64, height: f64) -> Self {
        Self::new(longitude_deg.to_radians(), latitude_deg.to_radians(), height)
    }

    pub fn longitude_degrees(&self) -> f64 {
        self.longitude.to_degrees()
    }

    pub fn latitude_degrees(&self) -> f64 {
        self.latitude.to_degrees()
    }

    /// Same position raised (or lowered, for negative `dh`) along the surface normal.
    pub fn with_height_offset(self, dh: f64) -> Self {
        Self {
            height: self.height + dh,
            ..self
        }
    }
}

impl fmt::Display for Cartographic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let lat = self.latitude_degrees();
        let lon = self.longitude_degrees();
        let lat_dir = if lat >= 0.0 { "N" } else { "S" };
        let lon_dir = if lon >= 0.0 { "E" } else { "W" };
        write!(
            f,
            "{:.1}\u{00B0}{}, {:.1}\u{00B0}{}, {:.0}m",
            lat.abs(),
            lat_dir,
            lon.abs(),
            lon_dir,
            self.height,
        )
    }
}
