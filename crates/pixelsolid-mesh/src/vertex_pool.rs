use hashbrown::HashMap;
use pixelsolid_geom::Vec3;

use crate::constants::VERTEX_KEY_SCALE;

/// Exact-match key: each coordinate rounded to 1e-6 mm.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub(crate) struct VertexKey([i64; 3]);

impl VertexKey {
    #[inline]
    pub(crate) fn of(p: Vec3) -> Self {
        let q = |v: f64| (v * VERTEX_KEY_SCALE).round() as i64;
        VertexKey([q(p.x), q(p.y), q(p.z)])
    }
}

/// Index the next appended vertex will get. Meshes index vertices with `u32`.
#[inline]
pub(crate) fn next_vertex_index(len: usize) -> u32 {
    debug_assert!(u32::try_from(len).is_ok(), "vertex count {len} exceeds the u32 index range");
    len as u32
}

/// Canonicalizes positions into shared vertex indices for one mesh build.
#[derive(Default, Clone, Debug)]
pub(crate) struct VertexPool {
    lookup: HashMap<VertexKey, u32>,
    positions: Vec<Vec3>,
}

impl VertexPool {
    pub(crate) fn with_capacity(n: usize) -> Self {
        Self {
            lookup: HashMap::with_capacity(n),
            positions: Vec::with_capacity(n),
        }
    }

    /// Returns the index of the first vertex seen with this key, appending on a miss.
    #[inline]
    pub(crate) fn get_or_create(&mut self, p: Vec3) -> u32 {
        let next = next_vertex_index(self.positions.len());
        let ix = *self.lookup.entry(VertexKey::of(p)).or_insert(next);
        if ix == next {
            self.positions.push(p);
        }
        ix
    }

    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.positions.len()
    }

    pub(crate) fn into_positions(self) -> Vec<Vec3> {
        self.positions
    }
}
