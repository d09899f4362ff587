//! Searches over randomly carved cave maps, seeded for reproducibility.

use rand::RngExt;
use rand::SeedableRng;
use rand::rngs::StdRng;

use waygrid_core::Point;
use waygrid_search::{CellStatus, Search, SearchConfig, chebyshev};

/// Carve open cells into an all-wall grid with a drunk walk, returning the
/// carved cells in visit order. The walk stays 4-connected, so every carved
/// cell is reachable from the first.
fn carve(search: &mut Search, rng: &mut StdRng, from: Point, steps: usize) -> Vec<Point> {
    let bounds = search.bounds();
    let mut carved = vec![from];
    search.set_cost(from, 1);
    let mut cur = from;
    for _ in 0..steps {
        let next = match rng.random_range(0..4u32) {
            0 => Point::new(cur.x + 1, cur.y),
            1 => Point::new(cur.x - 1, cur.y),
            2 => Point::new(cur.x, cur.y + 1),
            _ => Point::new(cur.x, cur.y - 1),
        };
        if !bounds.contains(next) {
            continue;
        }
        cur = next;
        if search.cost(cur) < 0 {
            search.set_cost(cur, 1);
            carved.push(cur);
        }
    }
    carved
}

#[test]
fn drunk_walk_cave_is_always_solvable() {
    for seed in 0..4u64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut search = Search::new(SearchConfig {
            width: 40,
            height: 40,
            default_cost: -1,
            ..SearchConfig::default()
        })
        .unwrap();

        let center = Point::new(20, 20);
        let carved = carve(&mut search, &mut rng, center, 4000);
        let goal = *carved.last().unwrap();
        search.set_goal(Some(goal));
        search.seed(center);

        let mut steps = 0usize;
        while !search.finished() {
            assert!(
                search.step().is_some(),
                "seed {seed}: carved region must stay connected"
            );
            steps += 1;
            assert!(steps <= 40 * 40, "seed {seed}: search failed to terminate");
        }

        let path = search.last_path().to_vec();
        assert_eq!(path.first(), Some(&center));
        assert_eq!(path.last(), Some(&goal));
        for pair in path.windows(2) {
            assert_eq!(chebyshev(pair[0], pair[1]), 1);
            assert!(search.cost(pair[1]) >= 0);
        }
        // Walls are never discovered, let alone traversed.
        for cell in search.bounds().iter() {
            if search.cost(cell) < 0 {
                assert_eq!(search.status(cell), CellStatus::Unsearched);
            }
        }
    }
}
