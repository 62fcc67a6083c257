//! Shared constants for pixelsolid-mesh. Centralizes common magic numbers.

// Diagonal corner split: offset = max(MIN, pixel_size * RATIO), in millimeters.
// Must stay above the weld tolerance of downstream slicers.
pub const DIAGONAL_OFFSET_MIN_MM: f64 = 0.02;
pub const DIAGONAL_OFFSET_RATIO: f64 = 0.02;
// Hard cap as a fraction of pixel_size; a corner never crosses the cell centerline.
pub const DIAGONAL_OFFSET_MAX_CELL_FRACTION: f64 = 0.25;

// Vertex keys are coordinates rounded to 1e-6 mm.
pub(crate) const VERTEX_KEY_SCALE: f64 = 1e6;

/// Typical slicer vertex-weld tolerance the diagonal offset is sized against.
pub const SLICER_WELD_TOLERANCE_MM: f64 = 0.01;

// Quad reserve per solid cell: top + bottom + an average of two walls.
pub(crate) const QUADS_PER_CELL_ESTIMATE: usize = 4;
