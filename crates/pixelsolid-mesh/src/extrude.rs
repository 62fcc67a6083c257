use std::time::Instant;

use pixelsolid_grid::{LabelGrid, MaterialFilter};

use crate::constants::QUADS_PER_CELL_ESTIMATE;
use crate::corner::resolve_diagonal_corners;
use crate::emit::emit_cell;
use crate::mesh::Mesh;
use crate::mesh_build::MeshBuild;

/// Half-open vertical interval `[y0, y1)` in millimeters.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct LayerSpan {
    pub y0: f64,
    pub y1: f64,
}

impl LayerSpan {
    #[inline]
    pub const fn new(y0: f64, y1: f64) -> Self {
        Self { y0, y1 }
    }

    #[inline]
    pub fn height(&self) -> f64 {
        self.y1 - self.y0
    }

    /// True when the span encloses no volume (including NaN bounds).
    #[inline]
    pub fn is_empty(&self) -> bool {
        !(self.y1 > self.y0) || !self.y0.is_finite() || !self.y1.is_finite()
    }
}

/// Extrudes every cell solid under `filter` through `span` into one closed mesh.
///
/// Degenerate input (empty grid, empty span, non-positive pixel size, no solid
/// cell) yields an empty mesh.
pub fn extrude_layer(grid: &LabelGrid, filter: MaterialFilter, span: LayerSpan, pixel_size: f64) -> Mesh {
    if grid.is_empty() || span.is_empty() || !(pixel_size > 0.0) || !pixel_size.is_finite() {
        return Mesh::empty();
    }
    let solid = grid.solid_count(filter);
    if solid == 0 {
        return Mesh::empty();
    }
    let start = Instant::now();

    let offsets = resolve_diagonal_corners(grid, filter, pixel_size);

    let mut build = MeshBuild::with_quad_capacity(solid * QUADS_PER_CELL_ESTIMATE);
    let mut quads = 0usize;
    for gz in 0..grid.height() as i32 {
        for gx in 0..grid.width() as i32 {
            if grid.is_solid(gx, gz, filter) {
                quads += emit_cell(&mut build, grid, filter, &offsets, gx, gz, span, pixel_size);
            }
        }
    }
    let mesh = build.finish();

    log::debug!(
        "extrude {:?} y=[{}, {}) cells={} split_corners={} quads={} verts={} tris={} us={}",
        filter,
        span.y0,
        span.y1,
        solid,
        offsets.len(),
        quads,
        mesh.vertex_count(),
        mesh.triangle_count(),
        start.elapsed().as_micros()
    );

    #[cfg(feature = "self_check")]
    if cfg!(debug_assertions) {
        self_check(&mesh, filter);
    }

    mesh
}

#[cfg(feature = "self_check")]
fn self_check(mesh: &Mesh, filter: MaterialFilter) {
    let report = crate::topology::edge_report(mesh);
    if !report.is_closed_manifold() || !report.is_oriented() {
        log::error!("extrude {:?} produced a non-manifold mesh: {:?}", filter, report);
        debug_assert!(false, "non-manifold extrusion for {filter:?}: {report:?}");
    }
}
