use std::collections::BTreeMap;
use std::time::Instant;

use pixelsolid_grid::{LabelGrid, MaterialFilter, Palette, Rgb};
use rayon::prelude::*;
use serde::Deserialize;

use crate::extrude::{LayerSpan, extrude_layer};
use crate::mesh::Mesh;
use crate::orient::rotate_for_printing;

/// Physical dimensions of one job, in millimeters.
#[derive(Clone, Copy, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LayerParams {
    pub pixel_size: f64,
    pub pixel_height: f64,
    pub base_height: f64,
}

impl Default for LayerParams {
    fn default() -> Self {
        Self {
            pixel_size: 1.0,
            pixel_height: 1.0,
            base_height: 1.0,
        }
    }
}

impl LayerParams {
    /// `[0, base_height)`.
    #[inline]
    pub fn base_span(&self) -> LayerSpan {
        LayerSpan::new(0.0, self.base_height)
    }

    /// `[base_height, base_height + pixel_height)`.
    #[inline]
    pub fn color_span(&self) -> LayerSpan {
        LayerSpan::new(self.base_height, self.base_height + self.pixel_height)
    }
}

/// Slab under every non-empty cell.
pub fn build_base(grid: &LabelGrid, pixel_size: f64, base_height: f64) -> Mesh {
    extrude_layer(grid, MaterialFilter::AnyNonEmpty, LayerSpan::new(0.0, base_height), pixel_size)
}

/// Solid of one material, stacked on the base.
pub fn build_color_layer(grid: &LabelGrid, pixel_size: f64, pixel_height: f64, base_height: f64, material: u32) -> Mesh {
    extrude_layer(
        grid,
        MaterialFilter::Material(material),
        LayerSpan::new(base_height, base_height + pixel_height),
        pixel_size,
    )
}

/// Mesh of one material plus its palette color.
#[derive(Clone, Debug, PartialEq)]
pub struct ColorLayer {
    pub material: u32,
    pub color: Option<Rgb>,
    pub mesh: Mesh,
}

/// Every mesh of one job. Each is an independent closed solid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ExtrusionSet {
    pub base: Mesh,
    /// Keyed by material; materials whose mesh came out empty are absent.
    pub per_color: BTreeMap<u32, ColorLayer>,
    /// `width * pixel_size`, the extent along X.
    pub footprint_width: f64,
}

impl ExtrusionSet {
    /// Number of non-empty meshes, base included.
    pub fn mesh_count(&self) -> usize {
        usize::from(!self.base.is_empty()) + self.per_color.len()
    }

    pub fn triangle_count(&self) -> usize {
        self.base.triangle_count() + self.per_color.values().map(|l| l.mesh.triangle_count()).sum::<usize>()
    }

    pub fn color(&self, material: u32) -> Option<&ColorLayer> {
        self.per_color.get(&material)
    }

    /// Same set reoriented for a Z-up print bed, see [`rotate_for_printing`].
    pub fn rotated_for_printing(&self) -> ExtrusionSet {
        let w = self.footprint_width;
        ExtrusionSet {
            base: rotate_for_printing(&self.base, w),
            per_color: self
                .per_color
                .iter()
                .map(|(&k, l)| {
                    let layer = ColorLayer {
                        material: l.material,
                        color: l.color,
                        mesh: rotate_for_printing(&l.mesh, w),
                    };
                    (k, layer)
                })
                .collect(),
            footprint_width: w,
        }
    }
}

/// Base plus one layer per material, color layers built on the rayon pool.
pub fn build_all(grid: &LabelGrid, palette: &Palette, pixel_size: f64, pixel_height: f64, base_height: f64) -> ExtrusionSet {
    let t0 = Instant::now();
    let materials = grid.materials();
    let (base, layers) = rayon::join(
        || build_base(grid, pixel_size, base_height),
        || {
            materials
                .par_iter()
                .map(|&m| color_layer(grid, palette, pixel_size, pixel_height, base_height, m))
                .collect::<Vec<_>>()
        },
    );
    let set = assemble_set(grid, pixel_size, base, layers);
    log_build_perf("extrude_all", t0, grid, &set);
    set
}

/// Single-threaded [`build_all`].
pub fn build_all_sequential(
    grid: &LabelGrid,
    palette: &Palette,
    pixel_size: f64,
    pixel_height: f64,
    base_height: f64,
) -> ExtrusionSet {
    let t0 = Instant::now();
    let base = build_base(grid, pixel_size, base_height);
    let layers = grid
        .materials()
        .into_iter()
        .map(|m| color_layer(grid, palette, pixel_size, pixel_height, base_height, m))
        .collect();
    let set = assemble_set(grid, pixel_size, base, layers);
    log_build_perf("extrude_all_sequential", t0, grid, &set);
    set
}

fn color_layer(
    grid: &LabelGrid,
    palette: &Palette,
    pixel_size: f64,
    pixel_height: f64,
    base_height: f64,
    material: u32,
) -> ColorLayer {
    ColorLayer {
        material,
        color: palette.get(material),
        mesh: build_color_layer(grid, pixel_size, pixel_height, base_height, material),
    }
}

fn assemble_set(grid: &LabelGrid, pixel_size: f64, base: Mesh, layers: Vec<ColorLayer>) -> ExtrusionSet {
    let per_color = layers
        .into_iter()
        .filter(|l| !l.mesh.is_empty())
        .map(|l| (l.material, l))
        .collect();
    ExtrusionSet {
        base,
        per_color,
        footprint_width: grid.width() as f64 * pixel_size,
    }
}

fn log_build_perf(what: &str, t0: Instant, grid: &LabelGrid, set: &ExtrusionSet) {
    log::info!(
        target: "perf",
        "ms={} {} colors={} dims=({}, {}) tris={}",
        t0.elapsed().as_millis(),
        what,
        set.per_color.len(),
        grid.width(),
        grid.height(),
        set.triangle_count()
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn params_spans_stack() {
        let p = LayerParams {
            pixel_size: 10.0,
            pixel_height: 2.0,
            base_height: 1.0,
        };
        assert_eq!(p.base_span(), LayerSpan::new(0.0, 1.0));
        assert_eq!(p.color_span(), LayerSpan::new(1.0, 3.0));
        assert_eq!(LayerParams::default().pixel_size, 1.0);
    }

    #[test]
    fn parallel_and_sequential_agree() {
        let g = LabelGrid::from_rows(&[[0, 1, -1], [2, 0, 1], [-1, 2, 0]]).unwrap();
        let pal: Palette = [Rgb::new(255, 0, 0), Rgb::new(0, 255, 0)].into_iter().collect();
        let a = build_all(&g, &pal, 2.0, 1.0, 0.5);
        let b = build_all_sequential(&g, &pal, 2.0, 1.0, 0.5);
        assert_eq!(a, b);
        assert_eq!(a.per_color.len(), 3);
        assert_eq!(a.color(0).and_then(|l| l.color), Some(Rgb::new(255, 0, 0)));
        assert_eq!(a.color(2).and_then(|l| l.color), None);
        assert_eq!(a.footprint_width, 6.0);
        assert_eq!(a.mesh_count(), 4);
    }

    #[test]
    fn zero_height_layers_are_omitted() {
        let g = LabelGrid::from_rows(&[[0, 1]]).unwrap();
        let set = build_all(&g, &Palette::default(), 1.0, 0.0, 0.0);
        assert!(set.base.is_empty());
        assert!(set.per_color.is_empty());
        assert_eq!(set.mesh_count(), 0);
    }
}
