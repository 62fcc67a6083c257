//! Label grid to watertight triangle meshes.
//!
//! Every material becomes its own closed solid, stacked on a base slab that
//! covers all non-empty cells. Cells touching only at a corner get their
//! shared corner split apart so each solid stays manifold after a slicer
//! welds it.
//!
//! ```
//! use pixelsolid_grid::{LabelGrid, Palette};
//! use pixelsolid_mesh::{build_all, topology};
//!
//! let grid = LabelGrid::from_rows(&[[0, 1], [1, 0]]).unwrap();
//! let set = build_all(&grid, &Palette::default(), 10.0, 2.0, 1.0);
//! for layer in set.per_color.values() {
//!     assert!(topology::edge_report(&layer.mesh).is_closed_manifold());
//! }
//! ```

pub mod constants;
mod corner;
mod emit;
mod extrude;
mod face;
mod layers;
mod mesh;
mod mesh_build;
pub mod orient;
pub mod topology;
mod vertex_pool;

pub use corner::{Corner, CornerOffsets, diagonal_offset, is_diagonal_touch, resolve_diagonal_corners};
pub use emit::cell_bounds;
pub use extrude::{LayerSpan, extrude_layer};
pub use face::Face;
pub use layers::{
    ColorLayer, ExtrusionSet, LayerParams, build_all, build_all_sequential, build_base, build_color_layer,
};
pub use mesh::Mesh;
pub use mesh_build::MeshBuild;
pub use orient::rotate_for_printing;
pub use pixelsolid_geom::{Aabb, Vec3};
pub use pixelsolid_grid::{EMPTY_LABEL, LabelGrid, MaterialFilter};
pub use topology::{EdgeReport, WeldedMesh, edge_report, weld};
