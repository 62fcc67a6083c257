//! Label grid model: quantized pixel-art cells and the solidity predicate.
#![forbid(unsafe_code)]

pub mod error;
pub mod palette;

use std::collections::BTreeSet;

pub use error::GridError;
pub use palette::{Palette, Rgb};

/// Label of a transparent cell.
pub const EMPTY_LABEL: i32 = -1;

/// Selects which labels count as solid for one extrusion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum MaterialFilter {
    /// Every labeled cell (base solid).
    AnyNonEmpty,
    /// Cells carrying exactly this material index (color solid).
    Material(u32),
}

impl MaterialFilter {
    #[inline]
    pub fn matches(self, label: i32) -> bool {
        match self {
            MaterialFilter::AnyNonEmpty => label != EMPTY_LABEL,
            MaterialFilter::Material(m) => label >= 0 && label as u32 == m,
        }
    }
}

/// Immutable `width x height` grid of labels, row-major by `gz`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LabelGrid {
    width: usize,
    height: usize,
    labels: Vec<i32>,
}

impl LabelGrid {
    /// Builds a grid from rows (`rows[gz][gx]`). All rows must be equally long.
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, GridError> {
        let height = rows.len();
        let width = rows.first().map_or(0, |r| r.as_ref().len());
        let mut labels = Vec::with_capacity(width * height);
        for (row, r) in rows.iter().enumerate() {
            let r = r.as_ref();
            if r.len() != width {
                return Err(GridError::RaggedRow {
                    row,
                    expected: width,
                    found: r.len(),
                });
            }
            labels.extend_from_slice(r);
        }
        // A first row of zero length leaves no cells at all.
        if width == 0 {
            return Ok(LabelGrid::default());
        }
        Self::from_labels(width, height, labels)
    }

    /// Builds a grid from a flat row-major buffer of `width * height` labels.
    pub fn from_labels(width: usize, height: usize, labels: Vec<i32>) -> Result<Self, GridError> {
        if width > i32::MAX as usize || height > i32::MAX as usize {
            return Err(GridError::TooLarge { width, height });
        }
        if width.checked_mul(height) != Some(labels.len()) {
            return Err(GridError::LabelCountMismatch {
                width,
                height,
                found: labels.len(),
            });
        }
        if let Some(i) = labels.iter().position(|&l| l < EMPTY_LABEL) {
            return Err(GridError::InvalidLabel {
                gx: i % width,
                gz: i / width,
                label: labels[i],
            });
        }
        if width == 0 || height == 0 {
            return Ok(LabelGrid::default());
        }
        Ok(LabelGrid {
            width,
            height,
            labels,
        })
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }

    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    #[inline]
    pub fn idx(&self, gx: usize, gz: usize) -> usize {
        gz * self.width + gx
    }

    #[inline]
    pub fn contains(&self, gx: i32, gz: i32) -> bool {
        gx >= 0 && gz >= 0 && (gx as usize) < self.width && (gz as usize) < self.height
    }

    /// Label at `(gx, gz)`; out-of-bounds reads as empty.
    #[inline]
    pub fn label(&self, gx: i32, gz: i32) -> i32 {
        if !self.contains(gx, gz) {
            return EMPTY_LABEL;
        }
        self.labels[self.idx(gx as usize, gz as usize)]
    }

    /// True iff the cell is inside the grid and its label passes `filter`.
    #[inline]
    pub fn is_solid(&self, gx: i32, gz: i32, filter: MaterialFilter) -> bool {
        filter.matches(self.label(gx, gz))
    }

    pub fn labels(&self) -> &[i32] {
        &self.labels
    }

    #[inline]
    pub fn has_non_empty(&self) -> bool {
        self.labels.iter().any(|&l| l != EMPTY_LABEL)
    }

    pub fn solid_count(&self, filter: MaterialFilter) -> usize {
        self.labels.iter().filter(|&&l| filter.matches(l)).count()
    }

    /// Distinct material indices present, ascending.
    pub fn materials(&self) -> Vec<u32> {
        let set: BTreeSet<u32> = self
            .labels
            .iter()
            .filter(|&&l| l != EMPTY_LABEL)
            .map(|&l| l as u32)
            .collect();
        set.into_iter().collect()
    }

    /// Rejects grids whose labels index past the palette.
    pub fn check_palette(&self, palette: &Palette) -> Result<(), GridError> {
        match self.materials().last() {
            Some(&label) if label as usize >= palette.len() => Err(GridError::LabelOutsidePalette {
                label,
                palette_len: palette.len(),
            }),
            _ => Ok(()),
        }
    }
}
