//! Triaxial reference ellipsoid and geodetic <-> Cartesian conversion.

use glam::DVec3;

use crate::Cartographic;

/// Convergence tolerance for the surface projection iteration.
const SURFACE_TOLERANCE: f64 = 1e-12;

/// Hard cap on Newton steps; typical inputs converge in 2-3.
const MAX_SURFACE_ITERATIONS: u32 = 64;

/// Points whose ellipsoid-scaled squared norm is below this are projected
/// radially instead of along the surface normal.
const CENTER_TOLERANCE_SQUARED: f64 = 0.1;

/// An ellipsoid centered at the origin with semi-axes along X, Y and Z.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Ellipsoid {
    radii: DVec3,
    radii_squared: DVec3,
    one_over_radii_squared: DVec3,
}

impl Ellipsoid {
    /// The WGS84 reference ellipsoid, in meters.
    pub const WGS84: Ellipsoid = Ellipsoid::new(6_378_137.0, 6_378_137.0, 6_356_752.314_245_179);

    /// A sphere of radius 1.
    pub const UNIT_SPHERE: Ellipsoid = Ellipsoid::new(1.0, 1.0, 1.0);

    /// Create an ellipsoid from its three semi-axis lengths.
    pub const fn new(x: f64, y: f64, z: f64) -> Self {
        Self {
            radii: DVec3::new(x, y, z),
            radii_squared: DVec3::new(x * x, y * y, z * z),
            one_over_radii_squared: DVec3::new(1.0 / (x * x), 1.0 / (y * y), 1.0 / (z * z)),
        }
    }

    pub fn radii(&self) -> DVec3 {
        self.radii
    }

    /// Outward surface normal at a point assumed to lie on the surface.
    pub fn geodetic_surface_normal(&self, surface_point: DVec3) -> Option<DVec3> {
        (surface_point * self.one_over_radii_squared).try_normalize()
    }

    /// Project `p` onto the surface along the surface normal that passes through it.
    ///
    /// Returns `None` when `p` is at the center, where no projection exists.
    pub fn scale_to_geodetic_surface(&self, p: DVec3) -> Option<DVec3> {
        if !p.is_finite() {
            return None;
        }

        let p2 = p * p * self.one_over_radii_squared;
        let squared_norm = p2.element_sum();
        let ratio = (1.0 / squared_norm).sqrt();
        let intersection = p * ratio;

        if squared_norm < CENTER_TOLERANCE_SQUARED {
            return ratio.is_finite().then_some(intersection);
        }

        // Newton's method on the scalar λ with p_surface = p / (1 + λ / r²).
        let gradient = intersection * self.one_over_radii_squared * 2.0;
        let mut lambda = (1.0 - ratio) * p.length() / (0.5 * gradient.length());
        let mut correction = 0.0;

        for _ in 0..MAX_SURFACE_ITERATIONS {
            lambda -= correction;

            let m = DVec3::ONE / (DVec3::ONE + lambda * self.one_over_radii_squared);
            let m2 = m * m;
            let func = p2.dot(m2) - 1.0;
            if func.abs() <= SURFACE_TOLERANCE {
                return Some(p * m);
            }

            let m3 = m2 * m;
            let derivative = -2.0 * (p2 * m3 * self.one_over_radii_squared).element_sum();
            correction = func / derivative;
        }

        let m = DVec3::ONE / (DVec3::ONE + lambda * self.one_over_radii_squared);
        Some(p * m)
    }

    /// Convert a Cartesian point to longitude/latitude/height.
    ///
    /// Returns `None` at the ellipsoid center.
    pub fn cartesian_to_cartographic(&self, p: DVec3) -> Option<Cartographic> {
        let surface = self.scale_to_geodetic_surface(p)?;
        let n = self.geodetic_surface_normal(surface)?;
        let h = p - surface;

        let longitude = n.y.atan2(n.x);
        let latitude = n.z.clamp(-1.0, 1.0).asin();
        let height = if h.dot(p) < 0.0 { -h.length() } else { h.length() };

        Some(Cartographic::new(longitude, latitude, height))
    }

    /// Convert longitude/latitude/height to a Cartesian point.
    pub fn cartographic_to_cartesian(&self, c: &Cartographic) -> DVec3 {
        let cos_lat = c.latitude.cos();
        let n = DVec3::new(
            cos_lat * c.longitude.cos(),
            cos_lat * c.longitude.sin(),
            c.latitude.sin(),
        )
        .normalize();
        let k = self.radii_squared * n;
        let gamma = n.dot(k).sqrt();
        k / gamma + n * c.height
    }

    /// Unit "up" at `p`: the direction in which `p`'s geodetic height grows.
    ///
    /// Computed by raising `p` one meter in geodetic coordinates and taking
    /// the difference, so it matches the ellipsoid normal through `p` rather
    /// than the geocentric direction. Returns `None` at the center.
    pub fn geodetic_up(&self, p: DVec3) -> Option<DVec3> {
        let raised = self.cartesian_to_cartographic(p)?.with_height_offset(1.0);
        (self.cartographic_to_cartesian(&raised) - p).try_normalize()
    }
}

impl Default for Ellipsoid {
    fn default() -> Self {
        Self::WGS84
    }
}
