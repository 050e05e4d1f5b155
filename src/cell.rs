use core::fmt;
use smallvec::SmallVec;

/// Inline capacity of a neighbour list; an interior cell of a full 3D
/// lattice has 3^3 - 1 = 26 neighbours.
pub const N_NEIGHBOURS: usize = 26;

/// Identity of a cell, derived from its exact center coordinate triple.
///
/// The identity is the IEEE-754 bit pattern of each coordinate, giving a
/// canonical serialization of the triple: equal triples always map to equal
/// identities and distinct triples never collide. Adjacency lookups during
/// grid construction rely on this exactness.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId([u64; 3]);

impl CellId {
    pub fn from_center(center: [f64; 3]) -> CellId {
        CellId([
            center[0].to_bits(),
            center[1].to_bits(),
            center[2].to_bits(),
        ])
    }

    /// The center coordinate triple the identity was derived from.
    pub fn center(&self) -> [f64; 3] {
        [
            f64::from_bits(self.0[0]),
            f64::from_bits(self.0[1]),
            f64::from_bits(self.0[2]),
        ]
    }
}

impl fmt::Debug for CellId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [x, y, z] = self.center();
        write!(f, "({}, {}, {})", x, y, z)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

/// A single lattice cell. The center and neighbour list are fixed at build
/// time; only the traversable flag changes afterwards.
#[derive(Clone, Debug)]
pub struct Cell {
    pub center: [f64; 3],
    pub traversable: bool,
    pub neighbours: SmallVec<[CellId; N_NEIGHBOURS]>,
}

impl Cell {
    pub(crate) fn new(center: [f64; 3]) -> Cell {
        Cell {
            center,
            traversable: true,
            neighbours: SmallVec::new(),
        }
    }

    pub fn id(&self) -> CellId {
        CellId::from_center(self.center)
    }
}
