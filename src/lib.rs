//! # lattice_pathfinding
//!
//! An [A*](https://en.wikipedia.org/wiki/A*_search_algorithm)-based
//! pathfinding system on 3D lattices, built as the search core of a
//! shortest-path visualizer. A lattice is a centered grid of axis-aligned
//! cells with up to 26 neighbours each; movement costs use a scaled
//! octile-style metric in which the XZ plane supports diagonal steps and Y
//! only straight ones. Searches run either synchronously to completion or
//! one expansion per external tick for animated consumers. Pre-computes
//! [connected components](https://en.wikipedia.org/wiki/Component_(graph_theory))
//! so callers can answer reachability queries without flood-filling.
pub mod cell;
pub mod dimensions;
pub mod distance;
pub mod error;
pub mod grid;
pub mod open_set;
pub mod search;

pub use cell::{Cell, CellId};
pub use dimensions::GridDimensions;
pub use distance::MoveCostModel;
pub use error::{GridError, SearchError};
pub use grid::LatticeGrid;
pub use open_set::OpenSet;
pub use search::{find_path, Search, SearchStatus};

/// Cost of a straight step between adjacent cells. Costs are scaled by 10 so
/// unit lattices keep integral values.
pub const STRAIGHT_COST: f64 = 10.0;
/// Cost of a diagonal step in the XZ plane.
pub const DIAGONAL_COST: f64 = 14.0;
