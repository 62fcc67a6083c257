use pixelsolid_grid::{LabelGrid, MaterialFilter, Palette};
use pixelsolid_mesh::constants::SLICER_WELD_TOLERANCE_MM;
use pixelsolid_mesh::{
    build_all, build_all_sequential, build_color_layer, diagonal_offset, edge_report, resolve_diagonal_corners, weld,
};
use proptest::prelude::*;

fn arb_grid() -> impl Strategy<Value = LabelGrid> {
    (1usize..=6, 1usize..=6).prop_flat_map(|(w, h)| {
        prop::collection::vec(-1i32..=3, w * h).prop_map(move |labels| LabelGrid::from_labels(w, h, labels).unwrap())
    })
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(96))]

    // Every mesh is closed, consistently wound, and survives slicer welding intact.
    #[test]
    fn every_mesh_is_closed_and_weld_stable(
        g in arb_grid(),
        p in 0.5f64..20.0,
        ph in 0.1f64..5.0,
        bh in 0.1f64..5.0,
    ) {
        let set = build_all(&g, &Palette::default(), p, ph, bh);
        let meshes = std::iter::once(&set.base).chain(set.per_color.values().map(|l| &l.mesh));
        for m in meshes.filter(|m| !m.is_empty()) {
            let r = edge_report(m);
            prop_assert!(r.is_closed_manifold(), "{:?}", r);
            prop_assert!(r.is_oriented(), "{:?}", r);
            let w = weld(m, SLICER_WELD_TOLERANCE_MM);
            prop_assert_eq!(w.vertex_count, m.vertex_count());
            prop_assert_eq!(w.dropped_triangles, 0);
            let wr = w.report();
            prop_assert!(wr.is_closed_manifold() && wr.is_oriented(), "{:?}", wr);
        }
    }

    // Exactly the materials present get a layer, each confined to its span.
    #[test]
    fn layers_match_materials_and_spans(g in arb_grid(), p in 0.5f64..20.0) {
        let set = build_all(&g, &Palette::default(), p, 2.0, 1.0);
        prop_assert_eq!(set.per_color.keys().copied().collect::<Vec<_>>(), g.materials());
        prop_assert_eq!(set.base.is_empty(), !g.has_non_empty());
        let full = g.width() as f64 * p;
        for layer in set.per_color.values() {
            let bb = layer.mesh.bounding_box().unwrap();
            prop_assert!((bb.min.y - 1.0).abs() < 1e-5 && (bb.max.y - 3.0).abs() < 1e-5);
            prop_assert!(bb.min.x > -1e-4 && bb.max.x < full + 1e-4);
        }
    }

    // A color layer depends only on the cells of its own material.
    #[test]
    fn color_layer_is_independent_of_other_labels(g in arb_grid(), p in 0.5f64..20.0) {
        for k in g.materials() {
            let masked = g.labels().iter().map(|&l| if l == k as i32 { l } else { -1 }).collect();
            let only_k = LabelGrid::from_labels(g.width(), g.height(), masked).unwrap();
            prop_assert_eq!(
                build_color_layer(&g, p, 1.0, 0.5, k),
                build_color_layer(&only_k, p, 1.0, 0.5, k)
            );
        }
    }

    // Top faces of the base cover every non-empty cell, less the split-corner slivers.
    #[test]
    fn base_top_area_tracks_footprint(g in arb_grid(), p in 0.5f64..20.0) {
        let base = build_all_sequential(&g, &Palette::default(), p, 1.0, 1.0).base;
        let area: f64 = base
            .triangles()
            .filter_map(|[a, b, c]| {
                let (pa, pb, pc) = (base.vertex(a), base.vertex(b), base.vertex(c));
                let n = (pb - pa).cross(pc - pa);
                let on_top = [pa, pb, pc].iter().all(|v| (v.y - 1.0).abs() < 1e-5);
                (on_top && n.y > 0.0).then(|| n.length() * 0.5)
            })
            .sum();
        let full = g.solid_count(MaterialFilter::AnyNonEmpty) as f64 * p * p;
        let splits = resolve_diagonal_corners(&g, MaterialFilter::AnyNonEmpty, p).len() as f64;
        let slack = splits * diagonal_offset(p) * p + 1e-3 * full.max(1.0);
        prop_assert!(area <= full + 1e-3 * full.max(1.0), "area {} full {}", area, full);
        prop_assert!(area >= full - slack, "area {} full {} slack {}", area, full, slack);
    }

    // Print orientation keeps every mesh closed and outward.
    #[test]
    fn rotation_preserves_topology(g in arb_grid(), p in 0.5f64..20.0) {
        let set = build_all(&g, &Palette::default(), p, 1.0, 1.0);
        let rotated = set.rotated_for_printing();
        prop_assert_eq!(rotated.mesh_count(), set.mesh_count());
        for layer in rotated.per_color.values() {
            prop_assert_eq!(edge_report(&layer.mesh), edge_report(&set.per_color[&layer.material].mesh));
            let bb = layer.mesh.bounding_box().unwrap();
            prop_assert!(bb.min.z > 1.0 - 1e-5 && bb.max.z < 2.0 + 1e-5);
        }
    }
}
