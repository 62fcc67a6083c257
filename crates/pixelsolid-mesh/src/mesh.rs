use pixelsolid_geom::{Aabb, Vec3};

/// Finished triangle mesh in millimeters.
///
/// Positions and normals are interleaved `x,y,z` per vertex; indices are
/// three per triangle, counter-clockwise seen from outside.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Mesh {
    pos: Vec<f32>,
    norm: Vec<f32>,
    idx: Vec<u32>,
}

impl Mesh {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Joins vertices and triangle indices and derives per-vertex normals.
    ///
    /// Normals are the area-weighted sum of incident face normals, normalized.
    ///
    /// # Panics
    ///
    /// If an index is out of range for `positions`.
    pub fn assemble(positions: Vec<Vec3>, indices: Vec<u32>) -> Mesh {
        debug_assert_eq!(indices.len() % 3, 0);
        let mut acc = vec![Vec3::ZERO; positions.len()];
        for t in indices.chunks_exact(3) {
            let (a, b, c) = (t[0] as usize, t[1] as usize, t[2] as usize);
            // Unnormalized cross product: length is twice the triangle area.
            let n = (positions[b] - positions[a]).cross(positions[c] - positions[a]);
            acc[a] += n;
            acc[b] += n;
            acc[c] += n;
        }
        let mut pos = Vec::with_capacity(positions.len() * 3);
        let mut norm = Vec::with_capacity(positions.len() * 3);
        for (p, n) in positions.iter().zip(&acc) {
            pos.extend_from_slice(&p.to_f32_array());
            norm.extend_from_slice(&n.normalized().to_f32_array());
        }
        Mesh {
            pos,
            norm,
            idx: indices,
        }
    }

    #[inline]
    pub fn vertex_count(&self) -> usize {
        self.pos.len() / 3
    }

    #[inline]
    pub fn triangle_count(&self) -> usize {
        self.idx.len() / 3
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.idx.is_empty() && self.pos.is_empty()
    }

    /// Interleaved vertex positions (x,y,z per vertex).
    pub fn positions(&self) -> &[f32] {
        &self.pos
    }

    /// Interleaved vertex normals (x,y,z per vertex).
    pub fn normals(&self) -> &[f32] {
        &self.norm
    }

    pub fn indices(&self) -> &[u32] {
        &self.idx
    }

    #[inline]
    pub fn vertex(&self, i: u32) -> Vec3 {
        let o = i as usize * 3;
        Vec3::from_f32_slice(&self.pos[o..o + 3])
    }

    #[inline]
    pub fn normal(&self, i: u32) -> Vec3 {
        let o = i as usize * 3;
        Vec3::from_f32_slice(&self.norm[o..o + 3])
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.idx.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.pos.chunks_exact(3).map(Vec3::from_f32_slice)
    }

    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(self.vertices())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unit_square_xz() -> Mesh {
        // Two triangles facing +Y.
        let p = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        ];
        Mesh::assemble(p, vec![0, 1, 2, 0, 2, 3])
    }

    #[test]
    fn empty_mesh_has_nothing() {
        let m = Mesh::empty();
        assert!(m.is_empty());
        assert_eq!(m.vertex_count(), 0);
        assert_eq!(m.triangle_count(), 0);
        assert!(m.bounding_box().is_none());
    }

    #[test]
    fn normals_follow_winding() {
        let m = unit_square_xz();
        assert_eq!(m.vertex_count(), 4);
        assert_eq!(m.triangle_count(), 2);
        for i in 0..4 {
            let n = m.normal(i);
            assert!((n.y - 1.0).abs() < 1e-6, "vertex {i} normal {n:?}");
        }
    }

    #[test]
    fn shared_corner_normal_is_area_weighted() {
        // Vertex 0 touches a large +Y triangle and a small +X triangle.
        let p = vec![
            Vec3::new(0.0, 0.0, 0.0),
            Vec3::new(0.0, 0.0, 4.0),
            Vec3::new(4.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::new(0.0, 0.0, 1.0),
        ];
        let m = Mesh::assemble(p, vec![0, 1, 2, 0, 3, 4]);
        let n = m.normal(0);
        // (1, 16, 0) before normalization.
        assert!(n.y > 0.99);
        assert!(n.x > 0.05 && n.x < 0.07);
        assert!((n.length() - 1.0).abs() < 1e-6);
    }

    #[test]
    fn bounding_box_spans_vertices() {
        let bb = unit_square_xz().bounding_box().unwrap();
        assert_eq!(bb.min, Vec3::new(0.0, 0.0, 0.0));
        assert_eq!(bb.max, Vec3::new(1.0, 0.0, 1.0));
    }
}
