//! Incremental best-first pathfinding on 2D grids with one-way portals.
//!
//! The search is an explicit, resumable state machine rather than a blocking
//! "find path" call: [`Search::seed`] marks the start cell, then every
//! [`Search::step`] selects and expands exactly one frontier cell until the
//! goal is traversed or the frontier runs dry. All per-cell state (status,
//! g/h values, parents, the last reconstructed path, counters) is observable
//! between steps, which suits visualisation and cooperative-scheduling
//! drivers.
//!
//! Distance estimation is delegated to [`PortalHeuristic`], which keeps the
//! estimate admissible when one-way zero-cost portals (and chains of them)
//! shortcut normal grid adjacency. Four computation strategies trade memory
//! against repeated work:
//!
//! | [`Strategy`] | Portal-table caching |
//! |---|---|
//! | [`Strategy::NoCache`] | rebuilt on every query |
//! | [`Strategy::PerTarget`] | memoized per queried target |
//! | [`Strategy::GoalOnly`] | memoized for the search goal only (default) |
//! | [`Strategy::Exhaustive`] | none — full recursive enumeration (reference) |

mod distance;
mod engine;
mod error;
mod heuristic;
mod portal;

pub use distance::{DIAG_COST, ORTHO_COST, chebyshev, manhattan, octile};
pub use engine::{CellStatus, ResetMode, Search, SearchConfig, UNREACHABLE, WALL};
pub use error::{PortalError, SearchError};
pub use heuristic::{PortalHeuristic, Strategy};
pub use portal::PortalMap;
