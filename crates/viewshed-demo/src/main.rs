//! Builds a viewshed frustum from `config.ron` and reports its buffers.
//!
//! Run with `cargo run -p viewshed-demo`.
//! Run with `cargo run -p viewshed-demo -- --h-angle 90 --output viewshed.json` to dump the buffers.

mod dump;
mod scene;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use viewshed_config::{CliArgs, Config, default_config_dir};
use viewshed_frustum::Viewshed;
use viewshed_geodesy::Ellipsoid;

fn main() -> ExitCode {
    let args = CliArgs::parse();

    let config_dir = match args.config.clone().map_or_else(default_config_dir, Ok) {
        Ok(dir) => dir,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let mut config = Config::load_or_create(&config_dir).unwrap_or_else(|e| {
        eprintln!("Failed to load config: {e}, using defaults");
        Config::default()
    });
    config.apply_cli_overrides(&args);

    let log_dir = config_dir.join("logs");
    viewshed_log::init_logging(Some(&log_dir), cfg!(debug_assertions), Some(&config));

    let ellipsoid = Ellipsoid::WGS84;
    let options = scene::options_from_config(&config, &ellipsoid);
    let viewshed = match Viewshed::new(options) {
        Ok(viewshed) => viewshed,
        Err(e) => {
            error!("Cannot build viewshed: {e}");
            return ExitCode::FAILURE;
        }
    };

    report(&viewshed, &ellipsoid);

    if let Some(path) = &args.output {
        if let Err(e) = dump::write_json(&viewshed, path) {
            error!("{e}");
            return ExitCode::FAILURE;
        }
        info!("Wrote buffers to {}", path.display());
    }

    ExitCode::SUCCESS
}

fn report(viewshed: &Viewshed, ellipsoid: &Ellipsoid) {
    let options = viewshed.options();
    if let Some(observer) = ellipsoid.cartesian_to_cartographic(options.center) {
        info!("Observer at {observer}");
    }

    info!(
        radius = options.effective_radius(),
        vertices = viewshed.mesh_vertices().vertex_count(),
        triangles = viewshed.mesh_indices().len() / 3,
        bytes = viewshed.mesh_vertices().high_bytes().len() * 2
            + viewshed.generator().mesh_index_bytes().len(),
        "Cap mesh"
    );
    info!(
        vertices = viewshed.line_vertices().vertex_count(),
        segments = viewshed.line_indices().len() / 2,
        bytes = viewshed.line_vertices().high_bytes().len() * 2
            + viewshed.generator().line_index_bytes().len(),
        "Outline"
    );

    if let Some(frame) = viewshed.generator().frame() {
        info!(
            forward = ?frame.forward,
            up = ?frame.up,
            "Local frame"
        );
    }
}
