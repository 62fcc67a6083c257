use pixelsolid_geom::Vec3;

use crate::mesh::Mesh;

/// Reorients a Y-up extrusion for a Z-up print bed.
///
/// Maps `(x, y, z)` to `(footprint_width - x, z, y)`. The linear part has
/// determinant +1, so triangle winding stays outward. Column `gx` then grows
/// along print X and the extrusion axis becomes print Z.
pub fn rotate_for_printing(mesh: &Mesh, footprint_width: f64) -> Mesh {
    if mesh.is_empty() {
        return Mesh::empty();
    }
    let positions = mesh
        .vertices()
        .map(|p| Vec3::new(footprint_width - p.x, p.z, p.y))
        .collect();
    Mesh::assemble(positions, mesh.indices().to_vec())
}
