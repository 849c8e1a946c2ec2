//! Turning a geodetic scene description into viewshed options.

use glam::DVec3;
use viewshed_config::{Config, GeodeticPoint, StyleConfig};
use viewshed_frustum::{GridResolution, ViewshedOptions, ViewshedStyle};
use viewshed_geodesy::{Cartographic, Ellipsoid};

pub fn to_cartesian(point: &GeodeticPoint, ellipsoid: &Ellipsoid) -> DVec3 {
    let c = Cartographic::from_degrees(point.longitude_deg, point.latitude_deg, point.height_m);
    ellipsoid.cartographic_to_cartesian(&c)
}

fn style(style: &StyleConfig) -> ViewshedStyle {
    ViewshedStyle {
        visible_color: style.visible_color,
        invisible_color: style.invisible_color,
        line_color: style.line_color,
        alpha: style.alpha,
    }
}

/// Options for the scene in `config`, placed on `ellipsoid`.
///
/// Values are copied as-is; range checks happen when the viewshed is built.
pub fn options_from_config(config: &Config, ellipsoid: &Ellipsoid) -> ViewshedOptions {
    let scene = &config.scene;
    let grid = &config.grid;

    let mut options = ViewshedOptions::new(
        to_cartesian(&scene.observer, ellipsoid),
        to_cartesian(&scene.aim, ellipsoid),
    )
    .with_angles_degrees(scene.h_angle_deg, scene.v_angle_deg)
    .with_grids(
        GridResolution::new(grid.h_mesh, grid.v_mesh),
        GridResolution::new(grid.h_line, grid.v_line),
    )
    .with_style(style(&config.style));

    if let Some(radius) = scene.radius_m {
        options = options.with_radius(radius);
    }
    options
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewshed_frustum::{FrustumError, Viewshed};

    #[test]
    fn test_default_scene_builds() {
        let options = options_from_config(&Config::default(), &Ellipsoid::WGS84);
        assert!((options.h_angle.to_degrees() - 120.0).abs() < 1e-9);
        assert_eq!(options.mesh_grid, GridResolution::square(23));
        assert_eq!(options.line_grid, GridResolution::square(10));
        assert!(options.radius.is_none());

        let viewshed = Viewshed::new(options).unwrap();
        assert_eq!(viewshed.mesh_vertices().vertex_count(), 24 * 24 + 1);
        assert_eq!(viewshed.line_vertices().vertex_count(), 11 * 11 + 1);
    }

    #[test]
    fn test_apex_survives_split() {
        let options = options_from_config(&Config::default(), &Ellipsoid::WGS84);
        let viewshed = Viewshed::new(options).unwrap();
        let apex = viewshed.mesh_vertices().position(0).unwrap();
        assert!(apex.distance(options.center) < 0.01);
    }

    #[test]
    fn test_observer_height_above_surface() {
        let point = GeodeticPoint::new(0.0, 0.0, 250.0);
        let p = to_cartesian(&point, &Ellipsoid::WGS84);
        assert!((p.x - (6_378_137.0 + 250.0)).abs() < 1e-6);
        assert!(p.y.abs() < 1e-6 && p.z.abs() < 1e-6);
    }

    #[test]
    fn test_radius_and_style_carried() {
        let mut config = Config::default();
        config.scene.radius_m = Some(300.0);
        config.style.alpha = 0.25;
        let options = options_from_config(&config, &Ellipsoid::WGS84);
        assert_eq!(options.radius, Some(300.0));
        assert_eq!(options.style.alpha, 0.25);
    }

    #[test]
    fn test_invalid_angle_rejected_on_build() {
        let mut config = Config::default();
        config.scene.v_angle_deg = 200.0;
        let options = options_from_config(&config, &Ellipsoid::WGS84);
        assert!(matches!(
            Viewshed::new(options),
            Err(FrustumError::AngleRange { .. })
        ));
    }
}
