//! Error types for search construction and portal insertion.
//!
//! Runtime boundary conditions (out-of-bounds candidates, impassable cells,
//! an exhausted frontier, stepping after the goal was reached) are ordinary
//! return values, not errors — only invalid construction parameters and
//! malformed portal entries are rejected.

use std::error::Error;
use std::fmt;

use waygrid_core::Point;

/// Errors from [`Search::new`](crate::Search::new).
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SearchError {
    /// Grid width or height was not positive.
    EmptyGrid,
    /// The requested cell count exceeds what the engine can index.
    GridTooLarge {
        /// Requested number of cells.
        cells: u64,
        /// Maximum supported number of cells.
        max: u64,
    },
}

impl fmt::Display for SearchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyGrid => write!(f, "grid dimensions must be positive"),
            Self::GridTooLarge { cells, max } => {
                write!(f, "grid of {cells} cells exceeds the maximum of {max}")
            }
        }
    }
}

impl Error for SearchError {}

/// Errors from portal insertion.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PortalError {
    /// A portal's entrance and exit were the same cell.
    SelfLoop {
        /// The offending cell.
        cell: Point,
    },
}

impl fmt::Display for PortalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfLoop { cell } => {
                write!(f, "portal at {cell} leads to itself")
            }
        }
    }
}

impl Error for PortalError {}
