//! Structural validation errors for label grids.

use thiserror::Error;

/// Reasons a label grid is rejected at construction.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GridError {
    /// A row's length differs from the first row's.
    #[error("row {row} has {found} labels, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },

    /// A flat label buffer does not hold exactly `width * height` labels.
    #[error("grid {width}x{height} cannot hold {found} labels")]
    LabelCountMismatch {
        width: usize,
        height: usize,
        found: usize,
    },

    /// Labels below the empty sentinel have no meaning.
    #[error("invalid label {label} at ({gx}, {gz})")]
    InvalidLabel { gx: usize, gz: usize, label: i32 },

    /// Dimensions must fit signed 32-bit grid coordinates.
    #[error("grid {width}x{height} exceeds the addressable size")]
    TooLarge { width: usize, height: usize },

    /// A label indexes past the end of the palette.
    #[error("label {label} has no palette entry (palette holds {palette_len} colors)")]
    LabelOutsidePalette { label: u32, palette_len: usize },
}
