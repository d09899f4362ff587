//! The directed portal map.

use std::collections::BTreeMap;

use waygrid_core::Point;

use crate::error::PortalError;

/// A set of one-way portal edges, keyed by entrance cell.
///
/// Each cell has at most one outgoing portal; a cell may be the exit of any
/// number of portals, and may be an entrance and an exit of *different*
/// portals. Iteration order is the entrance's row-major coordinate order, so
/// heuristic tables built from the map are reproducible.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PortalMap {
    links: BTreeMap<Point, Point>,
}

impl PortalMap {
    /// Create an empty portal map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of portals.
    #[inline]
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the map holds no portals.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }

    /// Register a portal from `entrance` to `exit`.
    ///
    /// An entrance that already had a portal gets relinked; the previous exit
    /// is returned. A portal leading back to its own entrance is rejected.
    pub fn insert(&mut self, entrance: Point, exit: Point) -> Result<Option<Point>, PortalError> {
        if entrance == exit {
            return Err(PortalError::SelfLoop { cell: entrance });
        }
        Ok(self.links.insert(entrance, exit))
    }

    /// Remove the portal at `entrance`, returning its exit if one existed.
    pub fn remove(&mut self, entrance: Point) -> Option<Point> {
        self.links.remove(&entrance)
    }

    /// The exit cell of the portal at `entrance`, if any.
    #[inline]
    pub fn exit(&self, entrance: Point) -> Option<Point> {
        self.links.get(&entrance).copied()
    }

    /// Whether `p` is a portal entrance.
    #[inline]
    pub fn contains_entrance(&self, p: Point) -> bool {
        self.links.contains_key(&p)
    }

    /// Iterate `(entrance, exit)` pairs in entrance coordinate order.
    pub fn iter(&self) -> impl Iterator<Item = (Point, Point)> + '_ {
        self.links.iter().map(|(&entrance, &exit)| (entrance, exit))
    }

    /// Remove all portals.
    pub fn clear(&mut self) {
        self.links.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_lookup() {
        let mut portals = PortalMap::new();
        assert!(portals.is_empty());
        assert_eq!(portals.insert(Point::new(1, 1), Point::new(8, 8)), Ok(None));
        assert_eq!(portals.exit(Point::new(1, 1)), Some(Point::new(8, 8)));
        assert!(portals.contains_entrance(Point::new(1, 1)));
        assert!(!portals.contains_entrance(Point::new(8, 8)));
        assert_eq!(portals.len(), 1);
    }

    #[test]
    fn self_loop_rejected() {
        let mut portals = PortalMap::new();
        let p = Point::new(4, 4);
        assert_eq!(
            portals.insert(p, p),
            Err(PortalError::SelfLoop { cell: p })
        );
        assert!(portals.is_empty());
    }

    #[test]
    fn reinsert_replaces_exit() {
        let mut portals = PortalMap::new();
        let entrance = Point::new(0, 0);
        portals.insert(entrance, Point::new(5, 5)).unwrap();
        let prev = portals.insert(entrance, Point::new(7, 7)).unwrap();
        assert_eq!(prev, Some(Point::new(5, 5)));
        assert_eq!(portals.exit(entrance), Some(Point::new(7, 7)));
        assert_eq!(portals.len(), 1);
    }

    #[test]
    fn entrance_may_also_be_an_exit() {
        let mut portals = PortalMap::new();
        let a = Point::new(0, 0);
        let b = Point::new(3, 3);
        portals.insert(a, b).unwrap();
        portals.insert(b, a).unwrap();
        assert_eq!(portals.exit(a), Some(b));
        assert_eq!(portals.exit(b), Some(a));
    }

    #[test]
    fn iter_in_entrance_order() {
        let mut portals = PortalMap::new();
        portals.insert(Point::new(5, 2), Point::new(0, 0)).unwrap();
        portals.insert(Point::new(1, 1), Point::new(9, 9)).unwrap();
        portals.insert(Point::new(0, 2), Point::new(4, 4)).unwrap();
        let entrances: Vec<Point> = portals.iter().map(|(e, _)| e).collect();
        assert_eq!(
            entrances,
            vec![Point::new(1, 1), Point::new(0, 2), Point::new(5, 2)]
        );
    }

    #[test]
    fn remove_and_clear() {
        let mut portals = PortalMap::new();
        portals.insert(Point::new(1, 1), Point::new(2, 2)).unwrap();
        assert_eq!(portals.remove(Point::new(1, 1)), Some(Point::new(2, 2)));
        assert_eq!(portals.remove(Point::new(1, 1)), None);
        portals.insert(Point::new(3, 3), Point::new(4, 4)).unwrap();
        portals.clear();
        assert!(portals.is_empty());
    }
}
