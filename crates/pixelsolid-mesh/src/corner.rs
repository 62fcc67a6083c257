//! Diagonal corner resolution.
//!
//! Two solid cells that meet only at a corner would share the vertical edge
//! through that corner four times (two walls each). Each cell's copy of the
//! corner is nudged toward its own center so the two columns separate.

use hashbrown::HashMap;
use pixelsolid_grid::{LabelGrid, MaterialFilter};

use crate::constants::{DIAGONAL_OFFSET_MAX_CELL_FRACTION, DIAGONAL_OFFSET_MIN_MM, DIAGONAL_OFFSET_RATIO};

/// One of the four vertical edges of a cell column, named by world bounds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Corner {
    XMinZMin = 0,
    XMaxZMin = 1,
    XMinZMax = 2,
    XMaxZMax = 3,
}

impl Corner {
    pub const ALL: [Corner; 4] = [
        Corner::XMinZMin,
        Corner::XMaxZMin,
        Corner::XMinZMax,
        Corner::XMaxZMax,
    ];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Grid step `(dgx, dgz)` toward the diagonal neighbor sharing this corner.
    /// The xMax side borders `gx - 1` and the zMax side borders `gz - 1`.
    #[inline]
    pub fn diagonal_step(self) -> (i32, i32) {
        match self {
            Corner::XMinZMin => (1, 1),
            Corner::XMaxZMin => (-1, 1),
            Corner::XMinZMax => (1, -1),
            Corner::XMaxZMax => (-1, -1),
        }
    }

    /// World-space signs `(sx, sz)` pointing from the corner into the cell.
    #[inline]
    pub fn inward(self) -> (f64, f64) {
        match self {
            Corner::XMinZMin => (1.0, 1.0),
            Corner::XMaxZMin => (-1.0, 1.0),
            Corner::XMinZMax => (1.0, -1.0),
            Corner::XMaxZMax => (-1.0, -1.0),
        }
    }
}

/// Lateral nudge magnitude for a split corner.
///
/// Below 0.08 mm pixels the floor would exceed a quarter cell, so the quarter
/// cell wins and the weld-tolerance margin is no longer guaranteed.
#[inline]
pub fn diagonal_offset(pixel_size: f64) -> f64 {
    DIAGONAL_OFFSET_MIN_MM
        .max(pixel_size * DIAGONAL_OFFSET_RATIO)
        .min(pixel_size * DIAGONAL_OFFSET_MAX_CELL_FRACTION)
}

/// True if `(gx, gz)` touches its neighbor across `corner` only diagonally.
#[inline]
pub fn is_diagonal_touch(grid: &LabelGrid, filter: MaterialFilter, gx: i32, gz: i32, corner: Corner) -> bool {
    let (dgx, dgz) = corner.diagonal_step();
    grid.is_solid(gx + dgx, gz + dgz, filter)
        && !grid.is_solid(gx + dgx, gz, filter)
        && !grid.is_solid(gx, gz + dgz, filter)
}

/// Per-extrusion table of `(gx, gz, corner) -> (dx, dz)` offsets in millimeters.
#[derive(Clone, Debug, Default)]
pub struct CornerOffsets {
    map: HashMap<(i32, i32, Corner), (f64, f64)>,
}

impl CornerOffsets {
    /// Offset for this cell corner, zero when the corner is not split.
    #[inline]
    pub fn offset(&self, gx: i32, gz: i32, corner: Corner) -> (f64, f64) {
        self.map.get(&(gx, gz, corner)).copied().unwrap_or((0.0, 0.0))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Scans every solid cell once and records an offset for each diagonal-only corner.
pub fn resolve_diagonal_corners(grid: &LabelGrid, filter: MaterialFilter, pixel_size: f64) -> CornerOffsets {
    let eps = diagonal_offset(pixel_size);
    let mut map = HashMap::new();
    for gz in 0..grid.height() as i32 {
        for gx in 0..grid.width() as i32 {
            if !grid.is_solid(gx, gz, filter) {
                continue;
            }
            for corner in Corner::ALL {
                if is_diagonal_touch(grid, filter, gx, gz, corner) {
                    let (sx, sz) = corner.inward();
                    map.insert((gx, gz, corner), (sx * eps, sz * eps));
                }
            }
        }
    }
    CornerOffsets { map }
}
