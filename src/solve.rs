//! Component solvers and the top-level solving loop.
//!
//! Small strongly connected components are solved exactly by exhaustive
//! bounded cycle enumeration. For larger components an optimal cycle packing
//! is out of reach, so many independent randomized packing trials run over a
//! copy of the component and the best one is committed.

use crate::wcc_instance::{Solution, WCCInstance};
use fxhash::FxHashSet;
use rand::rngs::SmallRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

/// Tunables of the solving loop. The thresholds are heuristic knobs with no
/// deeper rationale; changing them trades time against cover quality.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct SolverConfig {
    /// Components of at most this many nodes are solved exactly.
    pub exact_threshold: usize,
    /// Number of randomized packing trials per component node.
    pub trials_per_vertex: usize,
    /// Consecutive failed cycle searches before a trial gives up.
    pub max_attempts: usize,
    /// Seed of the solver-owned random number generator. Decomposition,
    /// pruning and exact solving stay deterministic regardless of the seed.
    pub seed: u64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        SolverConfig {
            exact_threshold: 16,
            trials_per_vertex: 10,
            max_attempts: 30,
            seed: 5489,
        }
    }
}

impl WCCInstance {

    /// Solves the instance: decompose the live graph into strongly connected
    /// components, prune nodes that lie on no short cycle, solve every
    /// component, and rerun on whatever is left until no node remains.
    /// Returns the accumulated solution.
    pub fn solve(&mut self, config: &SolverConfig) -> Solution {
        let mut rng = SmallRng::seed_from_u64(config.seed);
        while self.graph.num_nodes() > 0 {
            let (components, _membership) = self.graph.strongly_connected_components();
            for component in components {
                let pool = self.prune_component(&component);
                if pool.is_empty() {
                    continue;
                }
                if pool.len() <= config.exact_threshold {
                    self.solve_component_exact(pool);
                } else if self.solve_component_randomized(&pool, config, &mut rng) == 0 {
                    // All trials came up empty. One exact step keeps the
                    // outer loop strictly shrinking.
                    self.exact_step(&pool);
                }
            }
        }
        self.solution.clone()
    }

    /// Exhaustive solver for small components: repeatedly commit the most
    /// valuable short cycle through the smallest remaining node, or discard
    /// that node if it closes no cycle, until the component is used up.
    fn solve_component_exact(&mut self, mut pool: FxHashSet<usize>) {
        while !pool.is_empty() {
            let start = pool.iter().copied().min().expect("`pool` is not empty");
            if let Some(cycle) = self.best_cycle_through(start, &pool) {
                for node in &cycle {
                    pool.remove(node);
                }
                self.commit_cycle(cycle);
            } else {
                pool.remove(&start);
                self.discard_node(start);
            }
        }
    }

    /// The maximum-weight simple cycle of length 2..=5 through `start` within
    /// `pool`, or `None` if there is none. The first enumerated cycle wins
    /// ties, so the choice is deterministic.
    fn best_cycle_through(&self, start: usize, pool: &FxHashSet<usize>) -> Option<Vec<usize>> {
        let mut best: Option<(usize, Vec<usize>)> = None;
        for cycle in self.graph.short_cycles_through(start, pool) {
            let weight = self.cycle_weight(&cycle);
            if best.as_ref().map_or(true, |(best_weight, _)| weight > *best_weight) {
                best = Some((weight, cycle));
            }
        }
        best.map(|(_, cycle)| cycle)
    }

    /// One exact step on `pool`: commit the best cycle through its smallest
    /// node, or discard that node. Fallback that guarantees progress when a
    /// randomized round covers nothing.
    fn exact_step(&mut self, pool: &FxHashSet<usize>) {
        let start = pool.iter().copied().min().expect("`pool` is not empty");
        if let Some(cycle) = self.best_cycle_through(start, pool) {
            self.commit_cycle(cycle);
        } else {
            self.discard_node(start);
        }
    }

    /// Randomized solver for large components: runs many independent greedy
    /// packing trials over a copy of `pool` and commits the packing that
    /// leaves the least weight uncovered. Returns the number of nodes covered.
    fn solve_component_randomized(&mut self, pool: &FxHashSet<usize>, config: &SolverConfig,
                                  rng: &mut SmallRng) -> usize {
        let trials = (config.trials_per_vertex * pool.len()).max(1);
        let mut best: Option<(usize, Vec<Vec<usize>>)> = None;
        for _ in 0..trials {
            let (leftover, packing) = self.packing_trial(pool, config, rng);
            if best.as_ref().map_or(true, |(best_leftover, _)| leftover < *best_leftover) {
                let done = leftover == 0;
                best = Some((leftover, packing));
                if done {
                    // A full cover cannot be improved on.
                    break;
                }
            }
        }
        let (_, packing) = best.expect("at least one trial ran");
        let mut covered = 0;
        for cycle in packing {
            covered += cycle.len();
            self.commit_cycle(cycle);
        }
        covered
    }

    /// One greedy packing trial: keep picking a hard-to-place start node and
    /// searching for some short cycle through it with randomized neighbor
    /// order. A found cycle leaves the open pool; repeated failures with
    /// different starts end the trial. Returns the weight left uncovered and
    /// the packed cycles.
    fn packing_trial(&self, pool: &FxHashSet<usize>, config: &SolverConfig,
                     rng: &mut SmallRng) -> (usize, Vec<Vec<usize>>) {
        let mut open = pool.clone();
        let mut packing = Vec::new();
        let mut attempts = 0;
        while !open.is_empty() && attempts < config.max_attempts {
            let start = if attempts == 0 {
                self.hardest_open_node(&open)
            } else {
                let candidates: Vec<usize> = open.iter().copied().collect();
                *candidates.choose(rng).expect("`open` is not empty")
            };
            if let Some(cycle) = self.graph.random_short_cycle_through(start, &open, rng) {
                for node in &cycle {
                    open.remove(node);
                }
                packing.push(cycle);
                attempts = 0;
            } else {
                attempts += 1;
            }
        }
        (self.set_weight(&open), packing)
    }

    /// The node that is hardest to place: lowest out-degree within `open`,
    /// heavy before light, smallest id as the final tie break. Starting with
    /// these reduces the chance of orphaning them later in the trial.
    fn hardest_open_node(&self, open: &FxHashSet<usize>) -> usize {
        open.iter()
            .copied()
            .min_by_key(|node| {
                let pool_degree = self.graph.out_neighbors_in(*node, open)
                    .map(|outs| outs.len())
                    .expect("`node` is live");
                (pool_degree, usize::from(!self.is_heavy(*node)), *node)
            })
            .expect("`open` is not empty")
    }

}
