//! The portal-aware heuristic provider.
//!
//! The base metric is octile distance; portals extend it with one-way
//! zero-cost shortcuts. The estimate from `a` to `b` is the minimum of the
//! direct distance and, for every portal, the distance to its entrance plus
//! that portal's relaxed distance-to-target. Portal chains are folded into
//! the per-portal distances by [`PortalHeuristic::build_table`].

use std::collections::HashMap;

use waygrid_core::Point;

use crate::distance::octile;
use crate::portal::PortalMap;

/// Relaxed `(entrance, exit-to-target distance)` pairs for one target cell.
type PortalTable = Vec<(Point, i32)>;

/// Selects how portal-to-target tables are computed and cached.
///
/// All strategies estimate the same quantity; they differ in how much table
/// work is repeated versus memoized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Strategy {
    /// Rebuild the portal table on every query.
    NoCache,
    /// Memoize one table per distinct query target. Memory grows with the
    /// number of targets queried (bounded by grid size in practice).
    PerTarget,
    /// Memoize only the table for the search goal — by far the most common
    /// query target. Other targets behave like [`Strategy::NoCache`].
    #[default]
    GoalOnly,
    /// Recursive enumeration of every portal usage order. O(n!) — intended
    /// only to validate the other strategies on small portal sets.
    Exhaustive,
}

/// Admissible distance estimator accounting for one-way portal chains.
///
/// The provider never overestimates the true travel distance: every portal
/// route it considers is realizable, and the direct octile distance is always
/// a candidate. The one-way nature of portals means the single-pass chain
/// relaxation can *overestimate* a portal's distance-to-target relative to
/// [`Strategy::Exhaustive`] in adversarial configurations — still admissible,
/// just occasionally less sharp.
#[derive(Debug, Default)]
pub struct PortalHeuristic {
    strategy: Strategy,
    goal: Option<Point>,
    goal_table: Option<PortalTable>,
    target_tables: HashMap<Point, PortalTable>,
    evals: u64,
    table_builds: u64,
}

impl PortalHeuristic {
    /// Create a provider using the given strategy.
    pub fn new(strategy: Strategy) -> Self {
        Self {
            strategy,
            ..Self::default()
        }
    }

    /// The active strategy.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// Switch strategy, dropping any cached tables.
    pub fn set_strategy(&mut self, strategy: Strategy) {
        if strategy != self.strategy {
            self.strategy = strategy;
            self.invalidate();
        }
    }

    /// Record the search goal so [`Strategy::GoalOnly`] knows which target to
    /// memoize. Changing the goal drops its cached table.
    pub fn set_goal(&mut self, goal: Option<Point>) {
        if goal != self.goal {
            self.goal = goal;
            self.goal_table = None;
        }
    }

    /// Drop all cached tables. Must be called whenever the portal set
    /// changes.
    pub fn invalidate(&mut self) {
        self.goal_table = None;
        self.target_tables.clear();
    }

    /// Number of base (octile) distance evaluations performed, including
    /// those spent building portal tables.
    pub fn evals(&self) -> u64 {
        self.evals
    }

    /// Number of portal-to-target tables built.
    pub fn table_builds(&self) -> u64 {
        self.table_builds
    }

    /// One base-metric evaluation, counted.
    #[inline]
    fn base(&mut self, a: Point, b: Point) -> i32 {
        self.evals += 1;
        octile(a, b)
    }

    /// Estimated travel distance from `from` to `to` under `portals`.
    ///
    /// Directional: portals are one-way, so `estimate(a, b)` and
    /// `estimate(b, a)` may differ.
    pub fn estimate(&mut self, portals: &PortalMap, from: Point, to: Point) -> i32 {
        if portals.is_empty() {
            return self.base(from, to);
        }
        if self.strategy == Strategy::Exhaustive {
            let pairs: Vec<(Point, Point)> = portals.iter().collect();
            return self.permute(&pairs, 0, from, to);
        }

        // Materialize the table under the caching policy, then take the
        // minimum over the direct route and every portal route.
        let cached_goal = self.strategy == Strategy::GoalOnly && self.goal == Some(to);
        if cached_goal && self.goal_table.is_none() {
            let table = self.build_table(portals, to);
            self.goal_table = Some(table);
        }
        if self.strategy == Strategy::PerTarget && !self.target_tables.contains_key(&to) {
            let table = self.build_table(portals, to);
            self.target_tables.insert(to, table);
        }

        let scratch: PortalTable;
        let table: &[(Point, i32)] = if cached_goal {
            match &self.goal_table {
                Some(t) => t,
                None => &[],
            }
        } else if self.strategy == Strategy::PerTarget {
            match self.target_tables.get(&to) {
                Some(t) => t,
                None => &[],
            }
        } else {
            scratch = self.build_table(portals, to);
            &scratch
        };

        let mut best = octile(from, to);
        let mut evals = 1u64;
        for &(entrance, to_target) in table {
            best = best.min(octile(from, entrance).saturating_add(to_target));
            evals += 1;
        }
        self.evals += evals;
        best
    }

    /// Build the relaxed portal-to-target table for `target`.
    ///
    /// Each portal starts at the octile distance from its exit to the target.
    /// Portals are then processed in ascending order of that value (entrance
    /// coordinate breaks ties), and each may shortcut through any
    /// already-processed portal's current value. One-way edges mean a later
    /// portal's improvement never flows back to an earlier one; the single
    /// pass trades that sharpness for O(n²) instead of a fixed-point loop.
    fn build_table(&mut self, portals: &PortalMap, target: Point) -> PortalTable {
        self.table_builds += 1;

        let mut entries: Vec<(Point, Point, i32)> = portals
            .iter()
            .map(|(entrance, exit)| (entrance, exit, 0))
            .collect();
        for entry in entries.iter_mut() {
            entry.2 = octile(entry.1, target);
        }
        self.evals += entries.len() as u64;

        entries.sort_by(|a, b| a.2.cmp(&b.2).then(a.0.cmp(&b.0)));

        for i in 0..entries.len() {
            let (_, exit, mut to_target) = entries[i];
            for j in 0..i {
                let (sub_entrance, _, sub_to_target) = entries[j];
                let hop = self.base(exit, sub_entrance);
                to_target = to_target.min(hop.saturating_add(sub_to_target));
            }
            entries[i].2 = to_target;
        }

        entries
            .into_iter()
            .map(|(entrance, _, to_target)| (entrance, to_target))
            .collect()
    }

    /// Exhaustive recursion over portal usage orders. `used` is a bitmask of
    /// portals already taken on the current route (the pair list is capped by
    /// the mask width, far beyond the strategy's practical limit).
    fn permute(&mut self, pairs: &[(Point, Point)], used: u64, from: Point, to: Point) -> i32 {
        let mut shortest = self.base(from, to);
        for (i, &(entrance, exit)) in pairs.iter().enumerate().take(u64::BITS as usize) {
            if used & (1 << i) != 0 {
                continue;
            }
            let to_entrance = self.base(from, entrance);
            // A route through this portal can only win if reaching its
            // entrance is already cheaper than the best known route.
            if to_entrance < shortest {
                let from_exit = self.permute(pairs, used | (1 << i), exit, to);
                shortest = shortest.min(to_entrance.saturating_add(from_exit));
            }
        }
        shortest
    }
}
