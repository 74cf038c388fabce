//! Bounded cycle search on `Digraph`, used by the component solvers.
//!
//! Everything here is confined to simple directed cycles of length 2 to 5; the
//! searches run a depth-first exploration that is hard-capped at path length 5,
//! so the exhaustive variant stays safe on small node sets only.

use crate::digraph::Digraph;
use fxhash::FxHashSet;
use rand::rngs::SmallRng;
use rand::seq::SliceRandom;

/// Longest admissible cycle, in edges.
pub const MAX_CYCLE_LEN: usize = 5;

impl Digraph {

    /// Enumerates all simple directed cycles of length 2..=5 through `start`,
    /// restricted to the nodes in `pool`. Each cycle is returned in cycle
    /// order beginning at `start`.
    pub fn short_cycles_through(&self, start: usize, pool: &FxHashSet<usize>) -> Vec<Vec<usize>> {
        let mut cycles = Vec::new();
        let mut path = vec![start];
        self.extend_cycle_search(start, start, pool, &mut path, &mut cycles);
        cycles
    }

    fn extend_cycle_search(&self, start: usize, current: usize, pool: &FxHashSet<usize>,
                           path: &mut Vec<usize>, cycles: &mut Vec<Vec<usize>>) {
        let outs = self.out_neighbors(current).as_ref().expect("`current` is a live node");
        if path.len() >= 2 && outs.contains(&start) {
            cycles.push(path.clone());
        }
        if path.len() >= MAX_CYCLE_LEN {
            return;
        }
        for &next in outs {
            if next != start && pool.contains(&next) && !path.contains(&next) {
                path.push(next);
                self.extend_cycle_search(start, next, pool, path, cycles);
                path.pop();
            }
        }
    }

    /// Looks for some simple directed cycle of length 2..=5 through `start`
    /// inside `pool`, exploring neighbors in random order to diversify
    /// repeated searches. Returns the first cycle found in cycle order, or
    /// `None` if `start` closes no short cycle within `pool`.
    pub fn random_short_cycle_through(&self, start: usize, pool: &FxHashSet<usize>,
                                      rng: &mut SmallRng) -> Option<Vec<usize>> {
        let mut path = vec![start];
        if self.random_cycle_step(start, start, pool, &mut path, rng) {
            Some(path)
        } else {
            None
        }
    }

    fn random_cycle_step(&self, start: usize, current: usize, pool: &FxHashSet<usize>,
                         path: &mut Vec<usize>, rng: &mut SmallRng) -> bool {
        let outs = self.out_neighbors(current).as_ref().expect("`current` is a live node");
        if path.len() >= 2 && outs.contains(&start) {
            return true
        }
        if path.len() >= MAX_CYCLE_LEN {
            return false
        }
        let mut candidates: Vec<usize> = outs.iter()
            .copied()
            .filter(|next| *next != start && pool.contains(next) && !path.contains(next))
            .collect();
        candidates.shuffle(rng);
        for next in candidates {
            path.push(next);
            if self.random_cycle_step(start, next, pool, path, rng) {
                return true
            }
            path.pop();
        }
        false
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;

    fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> Digraph {
        let mut rows = vec![vec![false; n]; n];
        for &(src, trg) in edges {
            rows[src][trg] = true;
        }
        Digraph::from_adjacency(&rows).unwrap()
    }

    fn is_cycle(g: &Digraph, cycle: &[usize]) -> bool {
        (2..=MAX_CYCLE_LEN).contains(&cycle.len())
            && (0..cycle.len()).all(|i| g.has_edge((cycle[i], cycle[(i + 1) % cycle.len()])))
    }

    #[test]
    fn short_cycles_through_test() {
        // 0 <-> 1, 0 -> 1 -> 2 -> 0 and the hexagon continuation 2 -> 3 -> 4 -> 5 -> 0.
        let g = graph_from_edges(6, &[
            (0, 1), (1, 0), (1, 2), (2, 0),
            (2, 3), (3, 4), (4, 5), (5, 0),
        ]);
        let pool: FxHashSet<usize> = g.nodes().collect();
        let cycles = g.short_cycles_through(0, &pool);
        assert_eq!(cycles.len(), 2);
        for cycle in &cycles {
            assert!(is_cycle(&g, cycle));
            assert_eq!(cycle[0], 0);
        }
        assert!(cycles.contains(&vec![0, 1]));
        assert!(cycles.contains(&vec![0, 1, 2]));
        // 0 -> 1 -> 2 -> 3 -> 4 -> 5 -> 0 has six nodes and must not appear.
        assert!(cycles.iter().all(|c| c.len() <= MAX_CYCLE_LEN));
    }

    #[test]
    fn short_cycles_respect_pool_test() {
        let g = graph_from_edges(3, &[(0, 1), (1, 0), (0, 2), (2, 0)]);
        let pool: FxHashSet<usize> = vec![0, 1].into_iter().collect();
        let cycles = g.short_cycles_through(0, &pool);
        assert_eq!(cycles, vec![vec![0, 1]]);
    }

    #[test]
    fn random_short_cycle_test() {
        let g = graph_from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        let pool: FxHashSet<usize> = g.nodes().collect();
        let mut rng = SmallRng::seed_from_u64(7);
        for start in 0..5 {
            let cycle = g.random_short_cycle_through(start, &pool, &mut rng)
                .expect("the pentagon is a valid cycle");
            assert_eq!(cycle.len(), 5);
            assert!(is_cycle(&g, &cycle));
            assert_eq!(cycle[0], start);
        }
        // No short cycle through an acyclic corner.
        let dag = graph_from_edges(3, &[(0, 1), (1, 2), (0, 2)]);
        let pool: FxHashSet<usize> = dag.nodes().collect();
        assert!(dag.random_short_cycle_through(0, &pool, &mut rng).is_none());
    }
}
