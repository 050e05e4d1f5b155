use crate::cell::CellId;
use thiserror::Error;

/// Errors raised while building or editing a [LatticeGrid](crate::grid::LatticeGrid).
#[derive(Debug, Error, Clone, PartialEq)]
pub enum GridError {
    /// Extents must be positive and finite, cell counts at least 1. Rejected
    /// before any cell is built.
    #[error("grid dimensions need positive extents and counts, got size {size:?} and cells {cells:?}")]
    InvalidDimensions { size: [f64; 3], cells: [usize; 3] },

    /// The identity does not name a cell of this grid. Rejected before mutation.
    #[error("no cell {0} in the grid")]
    UnknownCell(CellId),
}

/// Errors raised when setting up or concluding a search.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum SearchError {
    /// Start or goal is unknown, blocked, or both name the same cell.
    #[error("start and goal must be distinct traversable cells of the grid")]
    InvalidInput,

    /// Start and goal are not connected under the current traversability.
    /// This is an outcome of a well-formed search, not an engine failure.
    #[error("no path between start and goal")]
    NoPath,
}
