//! Command-line argument parsing for the viewshed tools.

use std::path::PathBuf;

use clap::Parser;

use crate::Config;

/// Viewshed command-line arguments.
///
/// CLI values override settings loaded from `config.ron`.
#[derive(Parser, Debug)]
#[command(name = "viewshed", about = "Generate viewshed frustum geometry")]
pub struct CliArgs {
    /// Horizontal field of view in degrees.
    #[arg(long)]
    pub h_angle: Option<f64>,

    /// Vertical field of view in degrees.
    #[arg(long)]
    pub v_angle: Option<f64>,

    /// Cap radius in meters.
    #[arg(long)]
    pub radius: Option<f64>,

    /// Cap mesh subdivisions per axis.
    #[arg(long)]
    pub mesh_grid: Option<u32>,

    /// Wireframe subdivisions per axis.
    #[arg(long)]
    pub line_grid: Option<u32>,

    /// Log level (error, warn, info, debug, trace).
    #[arg(long)]
    pub log_level: Option<String>,

    /// Path to config directory (overrides default location).
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Write the generated buffers to this JSON file.
    #[arg(long)]
    pub output: Option<PathBuf>,
}

impl Config {
    /// Apply CLI overrides to a loaded config.
    pub fn apply_cli_overrides(&mut self, args: &CliArgs) {
        if let Some(h) = args.h_angle {
            self.scene.h_angle_deg = h;
        }
        if let Some(v) = args.v_angle {
            self.scene.v_angle_deg = v;
        }
        if let Some(r) = args.radius {
            self.scene.radius_m = Some(r);
        }
        if let Some(n) = args.mesh_grid {
            self.grid.h_mesh = n;
            self.grid.v_mesh = n;
        }
        if let Some(n) = args.line_grid {
            self.grid.h_line = n;
            self.grid.v_line = n;
        }
        if let Some(ref level) = args.log_level {
            self.debug.log_level = level.clone();
        }
    }
}
