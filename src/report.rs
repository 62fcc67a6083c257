use std::fmt;

use pixelsolid_mesh::{EdgeReport, Mesh, edge_report, weld};

/// Edge checks of one finished mesh, raw and after slicer welding.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshCheck {
    pub name: String,
    pub vertices: usize,
    pub triangles: usize,
    pub bounds: Option<([f64; 3], [f64; 3])>,
    pub edges: EdgeReport,
    pub welded: EdgeReport,
    pub weld_merged: usize,
}

impl MeshCheck {
    pub fn run(name: impl Into<String>, mesh: &Mesh, weld_tolerance: f64) -> Self {
        let w = weld(mesh, weld_tolerance);
        let mut welded = w.report();
        welded.degenerate_triangles += w.dropped_triangles;
        MeshCheck {
            name: name.into(),
            vertices: mesh.vertex_count(),
            triangles: mesh.triangle_count(),
            bounds: mesh
                .bounding_box()
                .map(|b| ([b.min.x, b.min.y, b.min.z], [b.max.x, b.max.y, b.max.z])),
            edges: edge_report(mesh),
            welded,
            weld_merged: mesh.vertex_count() - w.vertex_count,
        }
    }

    /// Closed and consistently wound, before and after welding.
    pub fn passed(&self) -> bool {
        self.edges.is_closed_manifold()
            && self.edges.is_oriented()
            && self.welded.is_closed_manifold()
            && self.welded.is_oriented()
    }
}

impl fmt::Display for MeshCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: verts={} tris={}", self.name, self.vertices, self.triangles)?;
        if let Some((lo, hi)) = self.bounds {
            write!(
                f,
                " bounds=({:.3}, {:.3}, {:.3})..({:.3}, {:.3}, {:.3})",
                lo[0], lo[1], lo[2], hi[0], hi[1], hi[2]
            )?;
        }
        write!(
            f,
            " boundary={} non_manifold={} misoriented={} weld_merged={} weld_boundary={} weld_non_manifold={} {}",
            self.edges.boundary,
            self.edges.non_manifold,
            self.edges.misoriented,
            self.weld_merged,
            self.welded.boundary,
            self.welded.non_manifold,
            if self.passed() { "ok" } else { "FAIL" }
        )
    }
}
