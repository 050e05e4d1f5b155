use crate::cell::CellId;
use crate::dimensions::GridDimensions;
use crate::{DIAGONAL_COST, STRAIGHT_COST};

/// Movement metric of the lattice. Coordinate deltas are first converted to
/// unit-grid step counts per axis, then collapsed with the closed form
///
/// `14 * min(d0, d2) + 10 * (|d0 - d2| + d1)`
///
/// where X and Z form the diagonal-capable pair and Y only supports straight
/// steps. The same function is the admissible heuristic towards the goal and
/// the exact cost of an edge between adjacent cells (adjacent cells differ by
/// at most one step per axis, where the form is exact).
#[derive(Clone, Copy, Debug)]
pub struct MoveCostModel {
    widths: [f64; 3],
}

impl MoveCostModel {
    pub fn new(dimensions: &GridDimensions) -> MoveCostModel {
        MoveCostModel {
            widths: dimensions.cell_widths(),
        }
    }

    /// Estimated (and, for neighbours, exact) movement cost between two cell
    /// centers.
    pub fn cost(&self, a: [f64; 3], b: [f64; 3]) -> f64 {
        // Steps on a unit grid, one per adjacent cell along each axis.
        let d0 = (a[0] - b[0]).abs() / self.widths[0];
        let d1 = (a[1] - b[1]).abs() / self.widths[1];
        let d2 = (a[2] - b[2]).abs() / self.widths[2];
        // Maximal number of XZ-diagonal steps, the rest goes straight.
        let diagonal = d0.min(d2);
        let direct = (d0 - d2).abs();
        DIAGONAL_COST * diagonal + STRAIGHT_COST * (direct + d1)
    }

    /// Cost between two cells named by identity.
    pub fn cost_between(&self, a: &CellId, b: &CellId) -> f64 {
        self.cost(a.center(), b.center())
    }

    /// Total cost of a path, summing exact edge costs over consecutive pairs.
    pub fn path_cost(&self, path: &[CellId]) -> f64 {
        path.windows(2)
            .map(|pair| self.cost_between(&pair[0], &pair[1]))
            .sum()
    }
}
