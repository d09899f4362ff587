//! Core geometry and grid storage for the waygrid pathfinding crates.
//!
//! Provides the integer [`Point`] and half-open [`Range`] primitives plus a
//! generic owned [`Grid`] store addressed by point. Everything here is plain
//! value-semantics data; search state built on top lives in `waygrid-search`.

mod geom;
mod grid;

pub use geom::{Point, Range, RangeIter};
pub use grid::Grid;
