//! The incremental search engine.

use std::time::{Duration, Instant};

use waygrid_core::{Grid, Point, Range};

use crate::error::{PortalError, SearchError};
use crate::heuristic::{PortalHeuristic, Strategy};
use crate::portal::PortalMap;

/// Sentinel distance for "not yet computed / unreachable".
pub const UNREACHABLE: i32 = i32::MAX;

/// Conventional cost value marking an impassable cell. Any negative cost is
/// treated as a wall.
pub const WALL: i32 = -1;

/// Lifecycle state of one cell within the current search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CellStatus {
    /// Not yet discovered.
    #[default]
    Unsearched,
    /// Discovered but not yet expanded.
    Frontier,
    /// Expanded. Terminal: a traversed cell never re-enters the frontier.
    Traversed,
}

/// How much state [`Search::reset`] discards.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResetMode {
    /// Clear search progress but retain the cost grid and portal map.
    Partial,
    /// Additionally restore the cost grid to the default cost and clear the
    /// portal map.
    Full,
}

/// Construction parameters for [`Search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SearchConfig {
    /// Grid width, in cells.
    pub width: i32,
    /// Grid height, in cells.
    pub height: i32,
    /// Optional start cell. Stored for inspection; searching still begins
    /// with an explicit [`Search::seed`] call.
    pub start: Option<Point>,
    /// Optional goal cell; may also be set later via [`Search::set_goal`].
    pub goal: Option<Point>,
    /// Cost multiplier initially assigned to every cell.
    pub default_cost: i32,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            width: 20,
            height: 20,
            start: None,
            goal: None,
            default_cost: 1,
        }
    }
}

/// An incremental best-first grid search.
///
/// The engine owns all per-cell state and advances one cell per
/// [`step`](Search::step) call, so a driver can interleave stepping with
/// rendering, instrumentation, or cost-grid edits (edits to cells already
/// [`Traversed`](CellStatus::Traversed) have undefined effect on computed
/// distances). Single-threaded by construction: no internal locking, no
/// internal scheduling.
#[derive(Debug)]
pub struct Search {
    bounds: Range,
    start: Option<Point>,
    goal: Option<Point>,
    default_cost: i32,

    status: Grid<CellStatus>,
    cost: Grid<i32>,
    g: Grid<i32>,
    h: Grid<i32>,
    parent: Grid<Option<Point>>,

    portals: PortalMap,
    heuristic: PortalHeuristic,

    step_count: u64,
    step_time: Duration,
    last_path: Vec<Point>,
    path_length: i32,
    finished: bool,
}

impl Search {
    /// Maximum supported cell count.
    pub const MAX_CELLS: u64 = i32::MAX as u64;

    /// Create a new engine from `config`.
    pub fn new(config: SearchConfig) -> Result<Self, SearchError> {
        if config.width <= 0 || config.height <= 0 {
            return Err(SearchError::EmptyGrid);
        }
        let cells = config.width as u64 * config.height as u64;
        if cells > Self::MAX_CELLS {
            return Err(SearchError::GridTooLarge {
                cells,
                max: Self::MAX_CELLS,
            });
        }

        let mut heuristic = PortalHeuristic::default();
        heuristic.set_goal(config.goal);

        Ok(Self {
            bounds: Range::new(0, 0, config.width, config.height),
            start: config.start,
            goal: config.goal,
            default_cost: config.default_cost,
            status: Grid::new(config.width, config.height, CellStatus::default()),
            cost: Grid::new(config.width, config.height, config.default_cost),
            g: Grid::new(config.width, config.height, UNREACHABLE),
            h: Grid::new(config.width, config.height, UNREACHABLE),
            parent: Grid::new(config.width, config.height, None),
            portals: PortalMap::new(),
            heuristic,
            step_count: 0,
            step_time: Duration::ZERO,
            last_path: Vec::new(),
            path_length: 0,
            finished: false,
        })
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Seed the search at `start`: g becomes 0, the cell joins the frontier,
    /// and its h-value is computed if a goal is known. A start on a wall or
    /// outside the grid is silently ignored, leaving the frontier empty.
    pub fn seed(&mut self, start: Point) {
        self.start = Some(start);
        self.relax(start, None);
    }

    /// Advance the search by one cell.
    ///
    /// Returns the traversed cell; `None` once the frontier is exhausted
    /// (no path exists — [`finished`](Search::finished) stays false). After
    /// the goal has been traversed, further calls are no-ops that return the
    /// goal again without touching any state.
    pub fn step(&mut self) -> Option<Point> {
        if self.finished {
            log::debug!("step after finish is a no-op");
            return self.goal;
        }

        let started = Instant::now();
        let Some(next) = self.select_next() else {
            log::debug!("frontier exhausted after {} steps", self.step_count);
            self.last_path.clear();
            return None;
        };

        self.expand(next);
        self.status.set(next, CellStatus::Traversed);
        self.step_count += 1;
        self.finished = self.goal == Some(next);
        self.last_path = self.reconstruct_path(next);
        self.path_length = self.path_length.max(self.g(next));
        self.step_time += started.elapsed();

        if self.finished {
            log::debug!("goal {next} traversed in {} steps", self.step_count);
        }
        Some(next)
    }

    /// Reset search state. See [`ResetMode`] for what each mode retains;
    /// start and goal are configuration and survive both modes.
    pub fn reset(&mut self, mode: ResetMode) {
        self.status.fill(CellStatus::Unsearched);
        self.g.fill(UNREACHABLE);
        self.h.fill(UNREACHABLE);
        self.parent.fill(None);
        self.step_count = 0;
        self.step_time = Duration::ZERO;
        self.last_path.clear();
        self.path_length = 0;
        self.finished = false;
        self.heuristic.invalidate();
        if mode == ResetMode::Full {
            self.cost.fill(self.default_cost);
            self.portals.clear();
        }
    }

    // -----------------------------------------------------------------------
    // Search internals
    // -----------------------------------------------------------------------

    /// Pick the most promising frontier cell: minimum f, then minimum h,
    /// then lowest row-major coordinate.
    fn select_next(&self) -> Option<Point> {
        let mut best: Option<(i32, i32, Point)> = None;
        for (p, &status) in self.status.iter() {
            if status != CellStatus::Frontier {
                continue;
            }
            let key = (self.f(p), self.h(p), p);
            let better = match best {
                None => true,
                Some((bf, bh, _)) => key.0 < bf || (key.0 == bf && key.1 < bh),
            };
            if better {
                best = Some(key);
            }
        }
        best.map(|(_, _, p)| p)
    }

    /// Relax all 8-connected neighbours of `pos`, plus its portal exit when
    /// `pos` is a portal entrance.
    fn expand(&mut self, pos: Point) {
        for neighbor in pos.neighbors_8() {
            self.relax(neighbor, Some(pos));
        }
        if let Some(exit) = self.portals.exit(pos) {
            self.relax(exit, Some(pos));
        }
    }

    /// Offer `pos` a route through `prev` (no predecessor = the seeded
    /// start). Out-of-bounds, impassable, and already-traversed candidates
    /// are rejected without any state change.
    ///
    /// The edge length is the heuristic estimate between the two cells —
    /// exact octile distance for plain 8-connected neighbours, and zero for
    /// a portal entrance relaxing its own exit, which makes portal
    /// transitions free (the exit's cost multiplier scales a zero distance).
    fn relax(&mut self, pos: Point, prev: Option<Point>) {
        let Some(&cost) = self.cost.get(pos) else {
            return;
        };
        if cost < 0 {
            return;
        }
        if self.status.get(pos) == Some(&CellStatus::Traversed) {
            return;
        }

        // h is computed once per cell per search, on first discovery.
        if let Some(goal) = self.goal {
            if self.h(pos) == UNREACHABLE {
                let estimate = self.heuristic.estimate(&self.portals, pos, goal);
                self.h.set(pos, estimate);
            }
        }

        match prev {
            None => {
                self.g.set(pos, 0);
            }
            Some(prev) => {
                let edge = self.heuristic.estimate(&self.portals, prev, pos);
                let tentative = self.g(prev).saturating_add(edge.saturating_mul(cost));
                if tentative < self.g(pos) {
                    self.g.set(pos, tentative);
                    self.parent.set(pos, Some(prev));
                }
            }
        }

        self.status.set(pos, CellStatus::Frontier);
    }

    /// Follow parent pointers from `pos` back to the root and return the
    /// cells in start → `pos` order.
    pub fn reconstruct_path(&self, pos: Point) -> Vec<Point> {
        let mut path = vec![pos];
        let mut cur = pos;
        while let Some(&Some(prev)) = self.parent.get(cur) {
            cur = prev;
            path.push(cur);
        }
        path.reverse();
        path
    }

    // -----------------------------------------------------------------------
    // Mutable inputs
    // -----------------------------------------------------------------------

    /// Assign the traversal cost multiplier of a cell (negative = wall).
    /// Returns `false` if the cell is out of bounds.
    pub fn set_cost(&mut self, p: Point, cost: i32) -> bool {
        self.cost.set(p, cost)
    }

    /// Mark a cell impassable.
    pub fn set_wall(&mut self, p: Point) -> bool {
        self.set_cost(p, WALL)
    }

    /// Register a portal. Returns the entrance's previous exit if it was
    /// already linked. Intended for use before the search begins.
    pub fn add_portal(&mut self, entrance: Point, exit: Point) -> Result<Option<Point>, PortalError> {
        let prev = self.portals.insert(entrance, exit)?;
        self.heuristic.invalidate();
        Ok(prev)
    }

    /// Remove a portal by entrance, returning its exit if one existed.
    pub fn remove_portal(&mut self, entrance: Point) -> Option<Point> {
        let prev = self.portals.remove(entrance);
        if prev.is_some() {
            self.heuristic.invalidate();
        }
        prev
    }

    /// Record the start cell without seeding it.
    pub fn set_start(&mut self, start: Option<Point>) {
        self.start = start;
    }

    /// Set or clear the goal cell. Intended for use before the search
    /// begins: h-values are write-once per search, so cells discovered under
    /// the old goal keep their old estimates until a reset.
    pub fn set_goal(&mut self, goal: Option<Point>) {
        self.goal = goal;
        self.heuristic.set_goal(goal);
    }

    /// Select the heuristic computation strategy. Takes effect immediately;
    /// cached h-values are unaffected.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        self.heuristic.set_strategy(strategy);
    }

    // -----------------------------------------------------------------------
    // Observable outputs
    // -----------------------------------------------------------------------

    /// Grid bounds.
    pub fn bounds(&self) -> Range {
        self.bounds
    }

    /// Grid width.
    pub fn width(&self) -> i32 {
        self.bounds.width()
    }

    /// Grid height.
    pub fn height(&self) -> i32 {
        self.bounds.height()
    }

    /// The recorded start cell.
    pub fn start(&self) -> Option<Point> {
        self.start
    }

    /// The goal cell.
    pub fn goal(&self) -> Option<Point> {
        self.goal
    }

    /// Status of a cell. Out-of-bounds cells read as `Unsearched`.
    pub fn status(&self, p: Point) -> CellStatus {
        self.status.get(p).copied().unwrap_or_default()
    }

    /// Best known accumulated cost from the start to `p`, or [`UNREACHABLE`].
    pub fn g(&self, p: Point) -> i32 {
        self.g.get(p).copied().unwrap_or(UNREACHABLE)
    }

    /// Cached heuristic estimate from `p` to the goal, or [`UNREACHABLE`] if
    /// `p` has not been discovered.
    pub fn h(&self, p: Point) -> i32 {
        self.h.get(p).copied().unwrap_or(UNREACHABLE)
    }

    /// `g + h`, derived on demand; [`UNREACHABLE`] if either part is unset.
    pub fn f(&self, p: Point) -> i32 {
        let (g, h) = (self.g(p), self.h(p));
        if g == UNREACHABLE || h == UNREACHABLE {
            UNREACHABLE
        } else {
            g.saturating_add(h)
        }
    }

    /// Traversal cost multiplier of a cell. Out-of-bounds cells read as
    /// walls.
    pub fn cost(&self, p: Point) -> i32 {
        self.cost.get(p).copied().unwrap_or(WALL)
    }

    /// Parent of `p` in the search forest, if any.
    pub fn parent(&self, p: Point) -> Option<Point> {
        self.parent.get(p).copied().flatten()
    }

    /// The registered portals.
    pub fn portals(&self) -> &PortalMap {
        &self.portals
    }

    /// The heuristic provider (strategy, evaluation counters).
    pub fn heuristic(&self) -> &PortalHeuristic {
        &self.heuristic
    }

    /// Heuristic estimate between two arbitrary cells under the current
    /// portal set and strategy.
    pub fn estimate(&mut self, from: Point, to: Point) -> i32 {
        self.heuristic.estimate(&self.portals, from, to)
    }

    /// Number of step() calls that traversed a cell.
    pub fn step_count(&self) -> u64 {
        self.step_count
    }

    /// Wall-clock time spent inside traversing steps.
    pub fn step_time(&self) -> Duration {
        self.step_time
    }

    /// Number of base heuristic evaluations performed so far.
    pub fn heuristic_evals(&self) -> u64 {
        self.heuristic.evals()
    }

    /// The path to the most recently traversed cell.
    pub fn last_path(&self) -> &[Point] {
        &self.last_path
    }

    /// Highest accumulated cost reached so far, in heuristic units (an
    /// orthogonal step over unit-cost terrain contributes
    /// [`ORTHO_COST`](crate::ORTHO_COST)).
    pub fn path_length(&self) -> i32 {
        self.path_length
    }

    /// Whether the goal has been traversed.
    pub fn finished(&self) -> bool {
        self.finished
    }
}
