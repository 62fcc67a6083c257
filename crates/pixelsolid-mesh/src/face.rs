//! Axis-aligned faces of a cell column and the grid cell behind each wall.

use pixelsolid_geom::Vec3;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Face {
    PosY,
    NegY,
    PosX,
    NegX,
    PosZ,
    NegZ,
}

impl Face {
    /// Returns the outward unit normal of this face.
    #[inline]
    pub fn normal(self) -> Vec3 {
        match self {
            Face::PosY => Vec3::new(0.0, 1.0, 0.0),
            Face::NegY => Vec3::new(0.0, -1.0, 0.0),
            Face::PosX => Vec3::new(1.0, 0.0, 0.0),
            Face::NegX => Vec3::new(-1.0, 0.0, 0.0),
            Face::PosZ => Vec3::new(0.0, 0.0, 1.0),
            Face::NegZ => Vec3::new(0.0, 0.0, -1.0),
        }
    }

    /// Grid step `(dgx, dgz)` to the cell across this wall; `None` for top/bottom.
    ///
    /// World X and Z run opposite to grid `gx`/`gz`, so the +X wall faces `gx - 1`.
    #[inline]
    pub fn grid_step(self) -> Option<(i32, i32)> {
        match self {
            Face::PosX => Some((-1, 0)),
            Face::NegX => Some((1, 0)),
            Face::PosZ => Some((0, -1)),
            Face::NegZ => Some((0, 1)),
            Face::PosY | Face::NegY => None,
        }
    }
}
