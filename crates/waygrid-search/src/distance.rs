use waygrid_core::Point;

/// Cost of one orthogonal step in [`octile`] distance.
pub const ORTHO_COST: i32 = 10;

/// Cost of one diagonal step in [`octile`] distance.
///
/// `10` and `14` are a fixed-point approximation of `1` and `√2`; staying in
/// integers avoids the tie inconsistencies float heuristics suffer from.
pub const DIAG_COST: i32 = 14;

/// Octile distance between two points: the exact travel cost between them on
/// an unobstructed 8-connected grid.
///
/// Diagonal movement covers the overlap of the two axis deltas, orthogonal
/// movement the remainder.
#[inline]
pub fn octile(a: Point, b: Point) -> i32 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    ORTHO_COST * (dx - dy).abs() + DIAG_COST * dx.min(dy)
}

/// Manhattan (L1) distance between two points.
#[inline]
pub fn manhattan(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs() + (a.y - b.y).abs()
}

/// Chebyshev (L∞) distance between two points.
#[inline]
pub fn chebyshev(a: Point, b: Point) -> i32 {
    (a.x - b.x).abs().max((a.y - b.y).abs())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn octile_single_steps() {
        let o = Point::ZERO;
        assert_eq!(octile(o, Point::new(1, 0)), 10);
        assert_eq!(octile(o, Point::new(0, -1)), 10);
        assert_eq!(octile(o, Point::new(1, 1)), 14);
        assert_eq!(octile(o, Point::new(-1, 1)), 14);
    }

    #[test]
    fn octile_mixed_path() {
        // 4 diagonals.
        assert_eq!(octile(Point::ZERO, Point::new(4, 4)), 56);
        // 3 diagonals + 1 orthogonal.
        assert_eq!(octile(Point::ZERO, Point::new(4, 3)), 52);
        // Pure orthogonal run.
        assert_eq!(octile(Point::ZERO, Point::new(5, 0)), 50);
    }

    #[test]
    fn octile_symmetric() {
        let a = Point::new(2, 9);
        let b = Point::new(-3, 4);
        assert_eq!(octile(a, b), octile(b, a));
        assert_eq!(octile(a, a), 0);
    }

    #[test]
    fn companion_metrics() {
        let a = Point::ZERO;
        let b = Point::new(3, 5);
        assert_eq!(manhattan(a, b), 8);
        assert_eq!(chebyshev(a, b), 5);
        // Octile sits between the scaled Chebyshev and Manhattan bounds.
        assert!(ORTHO_COST * chebyshev(a, b) <= octile(a, b));
        assert!(octile(a, b) <= ORTHO_COST * manhattan(a, b));
    }
}
