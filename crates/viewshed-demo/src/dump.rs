//! JSON export of generated buffers.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;
use viewshed_frustum::{SplitVertices, Viewshed};

#[derive(Debug, thiserror::Error)]
pub enum DumpError {
    #[error("failed to write {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode buffers: {0}")]
    Encode(#[from] serde_json::Error),
}

/// One drawable: split positions plus its index list.
#[derive(Serialize)]
struct BufferSet<'a> {
    vertex_count: usize,
    high: &'a [f32],
    low: &'a [f32],
    indices: &'a [u16],
}

impl<'a> BufferSet<'a> {
    fn new(vertices: &'a SplitVertices, indices: &'a [u16]) -> Self {
        Self {
            vertex_count: vertices.vertex_count(),
            high: vertices.high(),
            low: vertices.low(),
            indices,
        }
    }
}

#[derive(Serialize)]
struct ViewshedDump<'a> {
    center: [f64; 3],
    radius: f64,
    h_angle_deg: f64,
    v_angle_deg: f64,
    mesh: BufferSet<'a>,
    line: BufferSet<'a>,
    visible_color: [f32; 4],
    invisible_color: [f32; 4],
    line_color: [f32; 4],
    alpha: f32,
}

impl<'a> ViewshedDump<'a> {
    fn new(viewshed: &'a Viewshed) -> Self {
        let options = viewshed.options();
        let style = viewshed.style();
        Self {
            center: options.center.to_array(),
            radius: options.effective_radius(),
            h_angle_deg: options.h_angle.to_degrees(),
            v_angle_deg: options.v_angle.to_degrees(),
            mesh: BufferSet::new(viewshed.mesh_vertices(), viewshed.mesh_indices()),
            line: BufferSet::new(viewshed.line_vertices(), viewshed.line_indices()),
            visible_color: style.visible_color,
            invisible_color: style.invisible_color,
            line_color: style.line_color,
            alpha: style.alpha,
        }
    }
}

pub fn write_json(viewshed: &Viewshed, path: &Path) -> Result<(), DumpError> {
    let io_err = |source| DumpError::Io {
        path: path.to_path_buf(),
        source,
    };

    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    serde_json::to_writer_pretty(&mut writer, &ViewshedDump::new(viewshed))?;
    writer.flush().map_err(io_err)
}
