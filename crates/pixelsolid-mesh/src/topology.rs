//! Edge-usage checks and simulated slicer welding.

use hashbrown::HashMap;

use crate::mesh::Mesh;
use crate::vertex_pool::next_vertex_index;

/// Edge usage summary of a triangle list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EdgeReport {
    /// Distinct undirected edges.
    pub edges: usize,
    /// Edges used by exactly one triangle (holes).
    pub boundary: usize,
    /// Edges used by exactly two triangles.
    pub manifold: usize,
    /// Edges used by more than two triangles.
    pub non_manifold: usize,
    /// Directed edges walked the same way by more than one triangle.
    pub misoriented: usize,
    /// Triangles with a repeated vertex index; excluded from edge counts.
    pub degenerate_triangles: usize,
}

impl EdgeReport {
    /// Every edge bounds exactly two triangles and no triangle collapsed.
    #[inline]
    pub fn is_closed_manifold(&self) -> bool {
        self.boundary == 0 && self.non_manifold == 0 && self.degenerate_triangles == 0
    }

    /// Neighboring triangles traverse their shared edge in opposite directions.
    #[inline]
    pub fn is_oriented(&self) -> bool {
        self.misoriented == 0
    }
}

/// Counts edge usage by vertex index.
pub fn edge_report(mesh: &Mesh) -> EdgeReport {
    edge_report_indices(mesh.indices())
}

pub fn edge_report_indices(indices: &[u32]) -> EdgeReport {
    let mut undirected: HashMap<(u32, u32), u32> = HashMap::with_capacity(indices.len());
    let mut directed: HashMap<(u32, u32), u32> = HashMap::with_capacity(indices.len());
    let mut report = EdgeReport::default();
    for t in indices.chunks_exact(3) {
        let (a, b, c) = (t[0], t[1], t[2]);
        if a == b || b == c || a == c {
            report.degenerate_triangles += 1;
            continue;
        }
        for (u, v) in [(a, b), (b, c), (c, a)] {
            *directed.entry((u, v)).or_insert(0) += 1;
            *undirected.entry((u.min(v), u.max(v))).or_insert(0) += 1;
        }
    }
    report.edges = undirected.len();
    for &n in undirected.values() {
        match n {
            1 => report.boundary += 1,
            2 => report.manifold += 1,
            _ => report.non_manifold += 1,
        }
    }
    report.misoriented = directed.values().filter(|&&n| n > 1).count();
    report
}

/// Triangle indices re-expressed over vertices merged by rounded position.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct WeldedMesh {
    pub vertex_count: usize,
    pub indices: Vec<u32>,
    /// Triangles that collapsed under the merge and were removed.
    pub dropped_triangles: usize,
}

impl WeldedMesh {
    pub fn report(&self) -> EdgeReport {
        edge_report_indices(&self.indices)
    }
}

/// Merges vertices whose positions round to the same `tolerance` grid cell,
/// the way slicers re-weld STL triangle soup, and drops collapsed triangles.
///
/// A non-positive or non-finite `tolerance` merges exact duplicates only.
pub fn weld(mesh: &Mesh, tolerance: f64) -> WeldedMesh {
    let scale = if tolerance > 0.0 && tolerance.is_finite() { 1.0 / tolerance } else { 1e6 };
    let q = |v: f64| (v * scale).round() as i64;
    let mut lookup: HashMap<[i64; 3], u32> = HashMap::with_capacity(mesh.vertex_count());
    let remap: Vec<u32> = mesh
        .vertices()
        .map(|p| {
            let next = next_vertex_index(lookup.len());
            *lookup.entry([q(p.x), q(p.y), q(p.z)]).or_insert(next)
        })
        .collect();
    let mut indices = Vec::with_capacity(mesh.indices().len());
    let mut dropped_triangles = 0;
    for [a, b, c] in mesh.triangles() {
        let (a, b, c) = (remap[a as usize], remap[b as usize], remap[c as usize]);
        if a == b || b == c || a == c {
            dropped_triangles += 1;
        } else {
            indices.extend_from_slice(&[a, b, c]);
        }
    }
    WeldedMesh {
        vertex_count: lookup.len(),
        indices,
        dropped_triangles,
    }
}
