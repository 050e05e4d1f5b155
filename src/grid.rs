use crate::cell::{Cell, CellId, N_NEIGHBOURS};
use crate::dimensions::GridDimensions;
use crate::error::GridError;
use core::fmt;
use fxhash::FxBuildHasher;
use indexmap::IndexMap;
use itertools::iproduct;
use log::info;
use petgraph::unionfind::UnionFind;
use smallvec::SmallVec;

pub(crate) type FxIndexMap<K, V> = IndexMap<K, V, FxBuildHasher>;

/// [LatticeGrid] holds the cells of a 3D lattice in build order, keyed by
/// their center-derived [CellId], together with connected components of the
/// traversable cells in a [UnionFind] structure. Components answer
/// reachability queries without flood-filling; searches never depend on them.
///
/// Topology (centers and neighbour lists) is fixed at build time. Only
/// traversability changes afterwards, through
/// [set_traversable](Self::set_traversable), which keeps the components in
/// sync using a dirty flag: blocking a cell may split a component, so it
/// defers to [update](Self::update), while unblocking joins in place.
#[derive(Clone, Debug)]
pub struct LatticeGrid {
    pub cells: FxIndexMap<CellId, Cell>,
    pub dimensions: GridDimensions,
    pub components: UnionFind<usize>,
    pub components_dirty: bool,
}

impl LatticeGrid {
    /// Builds the lattice for the given dimensions with every cell
    /// traversable. Cell centers are the cartesian product of the centered
    /// positions along each axis; a candidate neighbour offset (any of the
    /// up-to-26 combinations of `{-w, 0, +w}` per axis) is accepted when the
    /// resulting coordinate stays within half the extent on every axis and a
    /// cell exists at exactly that coordinate. Axes with a single cell have
    /// width equal to the full extent, so the bounds check collapses them out
    /// of the adjacency.
    pub fn new(dimensions: GridDimensions) -> Result<LatticeGrid, GridError> {
        dimensions.validate()?;
        let widths = dimensions.cell_widths();
        let xs = dimensions.axis_centers(0);
        let ys = dimensions.axis_centers(1);
        let zs = dimensions.axis_centers(2);

        let mut cells: FxIndexMap<CellId, Cell> = IndexMap::with_capacity_and_hasher(
            dimensions.cell_count(),
            FxBuildHasher::default(),
        );
        for (&x, &y, &z) in iproduct!(&xs, &ys, &zs) {
            let center = [x, y, z];
            cells.insert(CellId::from_center(center), Cell::new(center));
        }

        let offsets: Vec<[f64; 3]> = iproduct!(
            [-widths[0], 0.0, widths[0]],
            [-widths[1], 0.0, widths[1]],
            [-widths[2], 0.0, widths[2]]
        )
        .map(|(dx, dy, dz)| [dx, dy, dz])
        .filter(|offset| offset.iter().map(|d| d.abs()).sum::<f64>() > 0.0)
        .collect();

        let half = [
            dimensions.size[0] / 2.0,
            dimensions.size[1] / 2.0,
            dimensions.size[2] / 2.0,
        ];
        for ix in 0..cells.len() {
            let center = match cells.get_index(ix) {
                Some((id, _)) => id.center(),
                None => continue,
            };
            let mut neighbours: SmallVec<[CellId; N_NEIGHBOURS]> = SmallVec::new();
            for offset in &offsets {
                let pos = [
                    center[0] + offset[0],
                    center[1] + offset[1],
                    center[2] + offset[2],
                ];
                if pos[0].abs() > half[0] || pos[1].abs() > half[1] || pos[2].abs() > half[2] {
                    continue;
                }
                let neighbour = CellId::from_center(pos);
                if cells.contains_key(&neighbour) {
                    neighbours.push(neighbour);
                }
            }
            if let Some((_, cell)) = cells.get_index_mut(ix) {
                cell.neighbours = neighbours;
            }
        }

        let mut grid = LatticeGrid {
            cells,
            dimensions,
            components: UnionFind::new(0),
            components_dirty: false,
        };
        grid.generate_components();
        Ok(grid)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn contains(&self, id: &CellId) -> bool {
        self.cells.contains_key(id)
    }

    pub fn cell(&self, id: &CellId) -> Option<&Cell> {
        self.cells.get(id)
    }

    /// Whether the identity names a traversable cell of this grid.
    pub fn is_traversable(&self, id: &CellId) -> bool {
        self.cells.get(id).is_some_and(|cell| cell.traversable)
    }

    pub(crate) fn index_of(&self, id: &CellId) -> Option<usize> {
        self.cells.get_index_of(id)
    }

    /// The identity of the cell at the given per-axis indices, if in range.
    /// Useful for callers that address cells by lattice position rather than
    /// by picked coordinate.
    pub fn id_at(&self, idx: [usize; 3]) -> Option<CellId> {
        let [nx, ny, nz] = self.dimensions.cells;
        if idx[0] >= nx || idx[1] >= ny || idx[2] >= nz {
            return None;
        }
        // Cells are inserted with x outermost and z innermost.
        let flat = (idx[0] * ny + idx[1]) * nz + idx[2];
        self.cells.get_index(flat).map(|(id, _)| *id)
    }

    /// Updates a cell's traversable flag. Unblocking joins the cell's
    /// component with its traversable neighbours; blocking may break a
    /// component apart, so the components are only flagged as dirty.
    pub fn set_traversable(&mut self, id: &CellId, traversable: bool) -> Result<(), GridError> {
        let ix = self
            .cells
            .get_index_of(id)
            .ok_or(GridError::UnknownCell(*id))?;
        if self.cells[ix].traversable == traversable {
            return Ok(());
        }
        self.cells[ix].traversable = traversable;
        if traversable {
            let neighbours: SmallVec<[usize; N_NEIGHBOURS]> = self.cells[ix]
                .neighbours
                .iter()
                .filter_map(|n| {
                    self.cells
                        .get_full(n)
                        .filter(|(_, _, cell)| cell.traversable)
                        .map(|(n_ix, _, _)| n_ix)
                })
                .collect();
            for n_ix in neighbours {
                self.components.union(ix, n_ix);
            }
        } else {
            self.components_dirty = true;
        }
        Ok(())
    }

    /// Regenerates the components if they are marked as dirty.
    pub fn update(&mut self) {
        if self.components_dirty {
            info!("Components are dirty: regenerating components");
            self.generate_components();
        }
    }

    /// Generates a new [UnionFind] structure and links up traversable
    /// neighbours to the same components.
    pub fn generate_components(&mut self) {
        info!("Generating connected components");
        self.components = UnionFind::new(self.cells.len());
        self.components_dirty = false;
        for ix in 0..self.cells.len() {
            let Some((_, cell)) = self.cells.get_index(ix) else {
                continue;
            };
            if !cell.traversable {
                continue;
            }
            let neighbours: SmallVec<[usize; N_NEIGHBOURS]> = cell
                .neighbours
                .iter()
                .filter_map(|n| {
                    self.cells
                        .get_full(n)
                        .filter(|(_, _, neighbour)| neighbour.traversable)
                        .map(|(n_ix, _, _)| n_ix)
                })
                .collect();
            for n_ix in neighbours {
                self.components.union(ix, n_ix);
            }
        }
    }

    /// Checks if two cells are on the same component. Stale after blocking
    /// cells until [update](Self::update) runs.
    pub fn reachable(&self, a: &CellId, b: &CellId) -> bool {
        match (self.cells.get_index_of(a), self.cells.get_index_of(b)) {
            (Some(a_ix), Some(b_ix)) => self.components.equiv(a_ix, b_ix),
            _ => false,
        }
    }

    /// Checks if two cells are on different components.
    pub fn unreachable(&self, a: &CellId, b: &CellId) -> bool {
        !self.reachable(a, b)
    }
}

impl fmt::Display for LatticeGrid {
    /// One slab per Y layer, Z decreasing row by row, X left to right;
    /// `.` is traversable, `#` blocked.
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let [nx, ny, nz] = self.dimensions.cells;
        for y in 0..ny {
            writeln!(f, "y = {y}:")?;
            for z in (0..nz).rev() {
                for x in 0..nx {
                    let flat = (x * ny + y) * nz + z;
                    let blocked = self
                        .cells
                        .get_index(flat)
                        .is_some_and(|(_, cell)| !cell.traversable);
                    write!(f, "{}", if blocked { '#' } else { '.' })?;
                }
                writeln!(f)?;
            }
        }
        Ok(())
    }
}
