use pixelsolid_geom::Vec3;
use pixelsolid_grid::{LabelGrid, MaterialFilter};

use crate::corner::{Corner, CornerOffsets};
use crate::extrude::LayerSpan;
use crate::face::Face;
use crate::mesh_build::MeshBuild;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
enum Level {
    Bottom,
    Top,
}

use Corner::{XMaxZMax as PP, XMaxZMin as PN, XMinZMax as NP, XMinZMin as NN};
use Level::{Bottom as B, Top as T};

/// Fixed corner order per face; the first two edges of each quad turn outward.
const FACE_QUADS: [(Face, [(Corner, Level); 4]); 6] = [
    (Face::PosY, [(NN, T), (NP, T), (PP, T), (PN, T)]),
    (Face::NegY, [(NN, B), (PN, B), (PP, B), (NP, B)]),
    (Face::PosX, [(PN, B), (PN, T), (PP, T), (PP, B)]),
    (Face::NegX, [(NN, B), (NP, B), (NP, T), (NN, T)]),
    (Face::PosZ, [(NP, B), (PP, B), (PP, T), (NP, T)]),
    (Face::NegZ, [(NN, B), (NN, T), (PN, T), (PN, B)]),
];

/// Mirrored world bounds of a cell: `(x_min, x_max, z_min, z_max)`.
#[inline]
pub fn cell_bounds(grid: &LabelGrid, gx: i32, gz: i32, pixel_size: f64) -> (f64, f64, f64, f64) {
    let w = grid.width() as i64;
    let h = grid.height() as i64;
    let (gx, gz) = (gx as i64, gz as i64);
    (
        (w - gx - 1) as f64 * pixel_size,
        (w - gx) as f64 * pixel_size,
        (h - gz - 1) as f64 * pixel_size,
        (h - gz) as f64 * pixel_size,
    )
}

/// Lateral `(x, z)` of each corner after its diagonal offset, indexed by `Corner::index`.
#[inline]
fn resolve_corners(
    grid: &LabelGrid,
    offsets: &CornerOffsets,
    gx: i32,
    gz: i32,
    pixel_size: f64,
) -> [(f64, f64); 4] {
    let (x_min, x_max, z_min, z_max) = cell_bounds(grid, gx, gz, pixel_size);
    Corner::ALL.map(|c| {
        let (x, z) = match c {
            Corner::XMinZMin => (x_min, z_min),
            Corner::XMaxZMin => (x_max, z_min),
            Corner::XMinZMax => (x_min, z_max),
            Corner::XMaxZMax => (x_max, z_max),
        };
        let (dx, dz) = offsets.offset(gx, gz, c);
        (x + dx, z + dz)
    })
}

/// Emits top, bottom and every exposed wall of one solid cell.
///
/// A wall is exposed when the neighbor across it is not solid under `filter`.
/// Returns the number of quads written.
pub(crate) fn emit_cell(
    build: &mut MeshBuild,
    grid: &LabelGrid,
    filter: MaterialFilter,
    offsets: &CornerOffsets,
    gx: i32,
    gz: i32,
    span: LayerSpan,
    pixel_size: f64,
) -> usize {
    let xz = resolve_corners(grid, offsets, gx, gz, pixel_size);
    let mut quads = 0;
    for &(face, verts) in &FACE_QUADS {
        if let Some((dgx, dgz)) = face.grid_step() {
            if grid.is_solid(gx + dgx, gz + dgz, filter) {
                continue;
            }
        }
        let corners = verts.map(|(c, level)| {
            let (x, z) = xz[c.index()];
            let y = match level {
                Level::Bottom => span.y0,
                Level::Top => span.y1,
            };
            Vec3::new(x, y, z)
        });
        build.add_face_quad(face, corners);
        quads += 1;
    }
    quads
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::corner::resolve_diagonal_corners;

    #[test]
    fn bounds_are_mirrored() {
        let g = LabelGrid::from_rows(&[[0, 0, 0], [0, 0, 0]]).unwrap();
        assert_eq!(cell_bounds(&g, 0, 0, 2.0), (4.0, 6.0, 2.0, 4.0));
        assert_eq!(cell_bounds(&g, 2, 1, 2.0), (0.0, 2.0, 0.0, 2.0));
    }

    #[test]
    fn face_table_winds_outward_for_a_unit_cell() {
        let g = LabelGrid::from_rows(&[[0]]).unwrap();
        let offs = CornerOffsets::default();
        let xz = resolve_corners(&g, &offs, 0, 0, 1.0);
        for &(face, verts) in &FACE_QUADS {
            let p = verts.map(|(c, level)| {
                let (x, z) = xz[c.index()];
                Vec3::new(x, if level == Level::Top { 1.0 } else { 0.0 }, z)
            });
            let n = face.normal();
            // Both triangles of the quad, not just the first.
            assert!((p[1] - p[0]).cross(p[2] - p[0]).dot(n) > 0.0, "{face:?} first");
            assert!((p[2] - p[0]).cross(p[3] - p[0]).dot(n) > 0.0, "{face:?} second");
            // Every corner lies on the face plane.
            for v in p {
                let c = Vec3::new(0.5, 0.5, 0.5);
                assert!(((v - c).dot(n) - 0.5).abs() < 1e-12, "{face:?} corner {v:?}");
            }
        }
    }

    #[test]
    fn isolated_cell_emits_six_quads() {
        let g = LabelGrid::from_rows(&[[-1, -1, -1], [-1, 4, -1], [-1, -1, -1]]).unwrap();
        let offs = CornerOffsets::default();
        let mut mb = MeshBuild::default();
        let span = LayerSpan::new(0.0, 1.0);
        let n = emit_cell(&mut mb, &g, MaterialFilter::Material(4), &offs, 1, 1, span, 1.0);
        assert_eq!(n, 6);
        assert_eq!(mb.vertex_count(), 8);
    }

    #[test]
    fn neighbor_of_same_material_hides_wall() {
        let g = LabelGrid::from_rows(&[[1, 1]]).unwrap();
        let offs = CornerOffsets::default();
        let mut mb = MeshBuild::default();
        let span = LayerSpan::new(0.0, 1.0);
        // gx=0 has its neighbor at gx=1, behind the -X wall.
        assert_eq!(emit_cell(&mut mb, &g, MaterialFilter::Material(1), &offs, 0, 0, span, 1.0), 5);
        // Under another material's filter the same neighbor is not solid.
        let mut mb = MeshBuild::default();
        let g2 = LabelGrid::from_rows(&[[1, 2]]).unwrap();
        assert_eq!(emit_cell(&mut mb, &g2, MaterialFilter::Material(1), &offs, 0, 0, span, 1.0), 6);
    }

    #[test]
    fn offset_corner_is_shared_by_every_face_touching_it() {
        let g = LabelGrid::from_rows(&[[0, -1], [-1, 0]]).unwrap();
        let offs = resolve_diagonal_corners(&g, MaterialFilter::Material(0), 10.0);
        let xz = resolve_corners(&g, &offs, 0, 0, 10.0);
        // Cell (0,0) spans x,z in [10, 20]; its xMin/zMin corner moves inward.
        assert_eq!(xz[Corner::XMinZMin.index()], (10.2, 10.2));
        assert_eq!(xz[Corner::XMaxZMax.index()], (20.0, 20.0));
        let mut mb = MeshBuild::default();
        emit_cell(&mut mb, &g, MaterialFilter::Material(0), &offs, 0, 0, LayerSpan::new(0.0, 1.0), 10.0);
        assert_eq!(mb.vertex_count(), 8);
    }
}
