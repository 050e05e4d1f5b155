use crate::cell::CellId;
use crate::distance::MoveCostModel;
use crate::error::SearchError;
use crate::grid::LatticeGrid;
use crate::open_set::OpenSet;
use log::{debug, warn};

/// Progress of a search after a step.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchStatus {
    /// The frontier is non-empty and the goal has not been expanded yet.
    Running,
    /// The goal was expanded; a path can be extracted.
    Found,
    /// The open set ran empty without reaching the goal: no path exists
    /// under the current traversability.
    Exhausted,
}

/// Per-cell search bookkeeping, indexed by grid cell order. Zeroed at the
/// start of every search; the g of an untouched cell stays 0, which the
/// relaxation condition accounts for by also testing open-set membership.
#[derive(Clone, Copy, Debug)]
struct NodeState {
    g_cost: f64,
    h_cost: f64,
    parent: Option<CellId>,
    closed: bool,
}

impl Default for NodeState {
    fn default() -> NodeState {
        NodeState {
            g_cost: 0.0,
            h_cost: 0.0,
            parent: None,
            closed: false,
        }
    }
}

/// A single A* search over a borrowed [LatticeGrid].
///
/// Each search owns its own state arena, so any number of searches can run
/// over one grid concurrently; the shared borrow also keeps traversability
/// edits (which need `&mut LatticeGrid`) out of a running search. Stepped
/// consumers call [step](Self::step) once per tick and may simply drop the
/// search to cancel it; [run](Self::run) loops to a terminal status
/// synchronously, bounded by the number of cells.
pub struct Search<'g> {
    grid: &'g LatticeGrid,
    cost_model: MoveCostModel,
    start: CellId,
    goal: CellId,
    open: OpenSet,
    arena: Vec<NodeState>,
    status: SearchStatus,
}

impl<'g> Search<'g> {
    /// Validates the endpoints and prepares a stepped search. Start and goal
    /// must name distinct traversable cells of the grid; nothing is
    /// allocated on rejection.
    pub fn new(
        grid: &'g LatticeGrid,
        start: CellId,
        goal: CellId,
    ) -> Result<Search<'g>, SearchError> {
        if start == goal || !grid.is_traversable(&start) || !grid.is_traversable(&goal) {
            return Err(SearchError::InvalidInput);
        }
        let mut open = OpenSet::new();
        open.push(start, 0.0, 0.0);
        Ok(Search {
            grid,
            cost_model: MoveCostModel::new(&grid.dimensions),
            start,
            goal,
            open,
            arena: vec![NodeState::default(); grid.len()],
            status: SearchStatus::Running,
        })
    }

    pub fn status(&self) -> SearchStatus {
        self.status
    }

    pub fn start(&self) -> CellId {
        self.start
    }

    pub fn goal(&self) -> CellId {
        self.goal
    }

    /// Number of cells currently on the frontier.
    pub fn open_len(&self) -> usize {
        self.open.len()
    }

    /// Expands the minimal-cost frontier cell and relaxes its neighbours.
    /// Returns the status after the step; once terminal, further calls are
    /// no-ops.
    pub fn step(&mut self) -> SearchStatus {
        if self.status != SearchStatus::Running {
            return self.status;
        }
        let grid = self.grid;
        let Some(current) = self.open.pop_min() else {
            debug!("open set exhausted before reaching {}", self.goal);
            self.status = SearchStatus::Exhausted;
            return self.status;
        };
        // The open set only ever holds cells of the borrowed grid.
        let current_ix = grid.index_of(&current).unwrap();
        self.arena[current_ix].closed = true;

        if current == self.goal {
            self.status = SearchStatus::Found;
            return self.status;
        }

        let current_g = self.arena[current_ix].g_cost;
        let current_center = current.center();
        for neighbour in &grid.cells[current_ix].neighbours {
            let n_ix = grid.index_of(neighbour).unwrap();
            if !grid.cells[n_ix].traversable || self.arena[n_ix].closed {
                continue;
            }
            let tentative_g = current_g + self.cost_model.cost(current_center, neighbour.center());
            let queued = self.open.contains(neighbour);
            if tentative_g < self.arena[n_ix].g_cost || !queued {
                let h_cost = self.cost_model.cost(neighbour.center(), self.goal.center());
                self.arena[n_ix] = NodeState {
                    g_cost: tentative_g,
                    h_cost,
                    parent: Some(current),
                    closed: false,
                };
                if queued {
                    self.open.update(neighbour, tentative_g + h_cost, h_cost);
                } else {
                    self.open.push(*neighbour, tentative_g + h_cost, h_cost);
                }
            }
        }
        self.status
    }

    /// Steps until the search terminates and returns the terminal status.
    pub fn run(&mut self) -> SearchStatus {
        while self.step() == SearchStatus::Running {}
        self.status
    }

    /// Walks parent links from the goal back to the start and returns the
    /// reversed sequence, start and goal inclusive. Anything but a [Found]
    /// search has no complete parent chain, so this yields
    /// [NoPath](SearchError::NoPath) rather than a partial sequence.
    ///
    /// [Found]: SearchStatus::Found
    pub fn path(&self) -> Result<Vec<CellId>, SearchError> {
        if self.status != SearchStatus::Found {
            return Err(SearchError::NoPath);
        }
        let mut path: Vec<CellId> = itertools::unfold(Some(self.goal), |next| {
            let id = (*next)?;
            let ix = self.grid.index_of(&id)?;
            *next = self.arena[ix].parent;
            Some(id)
        })
        .collect();
        path.reverse();
        Ok(path)
    }
}

/// Runs a full search synchronously and extracts the path on success.
pub fn find_path(
    grid: &LatticeGrid,
    start: CellId,
    goal: CellId,
) -> Result<Vec<CellId>, SearchError> {
    let mut search = Search::new(grid, start, goal)?;
    match search.run() {
        SearchStatus::Found => search.path(),
        _ => {
            if grid.reachable(&start, &goal) && !grid.components_dirty {
                warn!("{goal} is on the component of {start} but the search exhausted");
            }
            Err(SearchError::NoPath)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dimensions::GridDimensions;

    fn flat_grid() -> LatticeGrid {
        LatticeGrid::new(GridDimensions {
            size: [3.0, 1.0, 3.0],
            cells: [3, 1, 3],
        })
        .unwrap()
    }

    #[test]
    fn rejects_equal_endpoints() {
        let grid = flat_grid();
        let start = grid.id_at([0, 0, 0]).unwrap();
        assert_eq!(
            Search::new(&grid, start, start).err(),
            Some(SearchError::InvalidInput)
        );
    }

    #[test]
    fn rejects_unknown_and_blocked_endpoints() {
        let mut grid = flat_grid();
        let start = grid.id_at([0, 0, 0]).unwrap();
        let goal = grid.id_at([2, 0, 2]).unwrap();
        let outside = CellId::from_center([9.0, 9.0, 9.0]);
        assert!(Search::new(&grid, start, outside).is_err());
        assert!(Search::new(&grid, outside, goal).is_err());

        grid.set_traversable(&goal, false).unwrap();
        assert_eq!(
            Search::new(&grid, start, goal).err(),
            Some(SearchError::InvalidInput)
        );
    }

    #[test]
    fn single_cell_grid_has_no_valid_search() {
        let grid = LatticeGrid::new(GridDimensions {
            size: [1.0, 1.0, 1.0],
            cells: [1, 1, 1],
        })
        .unwrap();
        let only = grid.id_at([0, 0, 0]).unwrap();
        assert_eq!(
            Search::new(&grid, only, only).err(),
            Some(SearchError::InvalidInput)
        );
    }

    #[test]
    fn path_before_found_is_no_path() {
        let grid = flat_grid();
        let start = grid.id_at([0, 0, 0]).unwrap();
        let goal = grid.id_at([2, 0, 2]).unwrap();
        let search = Search::new(&grid, start, goal).unwrap();
        assert_eq!(search.status(), SearchStatus::Running);
        assert_eq!(search.path(), Err(SearchError::NoPath));
    }

    #[test]
    fn terminal_step_is_idempotent() {
        let grid = flat_grid();
        let start = grid.id_at([0, 0, 0]).unwrap();
        let goal = grid.id_at([2, 0, 2]).unwrap();
        let mut search = Search::new(&grid, start, goal).unwrap();
        assert_eq!(search.run(), SearchStatus::Found);
        assert_eq!(search.step(), SearchStatus::Found);
        let path = search.path().unwrap();
        assert_eq!(path.first(), Some(&start));
        assert_eq!(path.last(), Some(&goal));
    }

    #[test]
    fn concurrent_searches_share_a_grid() {
        let grid = flat_grid();
        let a = grid.id_at([0, 0, 0]).unwrap();
        let b = grid.id_at([2, 0, 2]).unwrap();
        let c = grid.id_at([2, 0, 0]).unwrap();
        let mut first = Search::new(&grid, a, b).unwrap();
        let mut second = Search::new(&grid, b, c).unwrap();
        // Interleave the two arenas step by step.
        loop {
            let s1 = first.step();
            let s2 = second.step();
            if s1 != SearchStatus::Running && s2 != SearchStatus::Running {
                break;
            }
        }
        assert_eq!(first.status(), SearchStatus::Found);
        assert_eq!(second.status(), SearchStatus::Found);
        assert_eq!(first.path().unwrap().first(), Some(&a));
        assert_eq!(second.path().unwrap().first(), Some(&b));
    }
}
