use pixelsolid_geom::Vec3;

use crate::face::Face;
use crate::mesh::Mesh;
use crate::vertex_pool::VertexPool;

/// In-progress mesh: a private vertex pool plus the triangle index list.
#[derive(Default, Clone)]
pub struct MeshBuild {
    pool: VertexPool,
    idx: Vec<u32>,
}

impl MeshBuild {
    /// Pre-reserve capacity for approximately `n_quads` quads worth of data.
    pub fn with_quad_capacity(n_quads: usize) -> Self {
        // Quads share corners, so two fresh vertices per quad is generous.
        Self {
            pool: VertexPool::with_capacity(n_quads * 2),
            idx: Vec::with_capacity(n_quads * 6),
        }
    }

    #[inline]
    pub fn vertex(&mut self, p: Vec3) -> u32 {
        self.pool.get_or_create(p)
    }

    /// Appends quad `[v0, v1, v2, v3]` as triangles `(v0,v1,v2)` and `(v0,v2,v3)`.
    #[inline]
    pub fn add_quad(&mut self, q: [u32; 4]) {
        self.idx.extend_from_slice(&[q[0], q[1], q[2], q[0], q[2], q[3]]);
    }

    /// Pools the four corners of a face quad and appends it.
    ///
    /// Corners must already be ordered so the first two edges turn toward
    /// `face.normal()`; the order is never flipped here.
    pub fn add_face_quad(&mut self, face: Face, corners: [Vec3; 4]) {
        debug_assert!(
            (corners[1] - corners[0])
                .cross(corners[2] - corners[0])
                .dot(face.normal())
                > 0.0,
            "{face:?} quad wound inward: {corners:?}"
        );
        let q = corners.map(|p| self.vertex(p));
        self.add_quad(q);
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pool.len()
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    /// Hands the pooled vertices and indices to the assembler.
    pub fn finish(self) -> Mesh {
        Mesh::assemble(self.pool.into_positions(), self.idx)
    }
}
