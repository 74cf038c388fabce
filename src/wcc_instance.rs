//! A solving instance of the weighted short-cycle cover problem: the graph
//! under reduction, the weight class of every node and the cycles committed to
//! the solution so far.
//!
//! Nodes leave an instance in exactly two ways: covered by a committed cycle,
//! which adds their weight to the solution value, or discarded, which adds
//! nothing. Either way they are gone for all further computation.

use crate::cust_errors::ImportError;
use crate::digraph::Digraph;
use crate::other_ds::NodeSet;
use fxhash::FxHashSet;
use itertools::Itertools;
use std::io;
use std::io::prelude::*;

/// Weight of a covered heavy node.
pub const HEAVY_WEIGHT: usize = 2;
/// Weight of a covered light node.
pub const LIGHT_WEIGHT: usize = 1;

/// An ordered sequence of node-disjoint cycles together with the total weight
/// of the covered nodes.
///
/// A solution without cycles is structurally distinct from "value zero":
/// `cycles` carries the cover, `value` only the score.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Solution {
    pub cycles: Vec<Vec<usize>>,
    pub value: usize,
}

#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct WCCInstance {
    pub graph: Digraph,
    heavy: NodeSet,
    pub solution: Solution,
}

impl WCCInstance {

    /// Returns a new `WCCInstance` with an empty solution.
    pub fn new(graph: Digraph, heavy: NodeSet) -> Self {
        WCCInstance {
            graph,
            heavy,
            solution: Solution::default(),
        }
    }

    /// Checks if `node` is of the heavy weight class.
    pub fn is_heavy(&self, node: usize) -> bool {
        self.heavy.contains(&node)
    }

    /// Weight of `node`: heavy nodes count twice as much as light ones.
    pub fn node_weight(&self, node: usize) -> usize {
        if self.is_heavy(node) {
            HEAVY_WEIGHT
        } else {
            LIGHT_WEIGHT
        }
    }

    /// Total weight of the nodes of `cycle`.
    pub fn cycle_weight(&self, cycle: &[usize]) -> usize {
        cycle.iter().map(|node| self.node_weight(*node)).sum()
    }

    /// Total weight of a node set.
    pub fn set_weight(&self, set: &FxHashSet<usize>) -> usize {
        set.iter().map(|node| self.node_weight(*node)).sum()
    }

    /// Commits `cycle` to the solution and removes its nodes from the graph.
    pub fn commit_cycle(&mut self, cycle: Vec<usize>) {
        self.solution.value += self.cycle_weight(&cycle);
        self.graph.remove_nodes(cycle.iter().copied());
        self.solution.cycles.push(cycle);
    }

    /// Discards `node` permanently; it contributes nothing to the value.
    pub fn discard_node(&mut self, node: usize) {
        self.graph.remove_node(node);
    }

    /// Discards all nodes in `nodes` permanently.
    pub fn discard_nodes<I: IntoIterator<Item = usize>>(&mut self, nodes: I) {
        self.graph.remove_nodes(nodes);
    }

}

// Instance parsing and solution writing.
impl WCCInstance {

    /// Reads an instance from a `BufRead` type: the node count, the
    /// whitespace-separated heavy node ids, then an n×n 0/1 adjacency matrix.
    /// Anything malformed fails here; the solving engine never revalidates.
    pub fn read_instance<R: BufRead>(inp: R) -> Result<Self, ImportError> {
        let mut lines = inp.lines();
        let n: usize = lines.next()
            .ok_or(ImportError::InputMalformedError)??
            .trim()
            .parse()?;
        let heavy_line = match lines.next() {
            Some(line) => line?,
            // The heavy line may be missing entirely for the empty instance.
            None if n == 0 => String::new(),
            None => return Err(ImportError::InputMalformedError),
        };
        let mut heavy = NodeSet::with_capacity(n);
        for token in heavy_line.split_whitespace() {
            let id: usize = token.parse()?;
            if id >= n {
                return Err(ImportError::InputMalformedError);
            }
            heavy.insert(id);
        }
        let mut rows = Vec::with_capacity(n);
        for _ in 0..n {
            let line = lines.next().ok_or(ImportError::InputMalformedError)??;
            let row = line.split_whitespace()
                .map(|token| match token {
                    "0" => Ok(false),
                    "1" => Ok(true),
                    _ => Err(ImportError::InputMalformedError),
                })
                .collect::<Result<Vec<bool>, ImportError>>()?;
            if row.len() != n {
                return Err(ImportError::InputMalformedError);
            }
            rows.push(row);
        }
        let graph = Digraph::from_adjacency(&rows)?;
        Ok(WCCInstance::new(graph, heavy))
    }

    /// Writes a solution to a `Write` type: the total value on the first line,
    /// then one line per cycle with its node ids in cycle order.
    pub fn write_solution<W: Write>(solution: &Solution, mut out: W) -> Result<(), io::Error> {
        writeln!(out, "{}", solution.value)?;
        for cycle in &solution.cycles {
            writeln!(out, "{}", cycle.iter().join(" "))?;
        }
        Ok(())
    }

}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn read_instance_test() {
        let inp = Cursor::new("3\n0 2\n0 1 0\n0 0 1\n1 0 0\n");
        let instance = WCCInstance::read_instance(inp).unwrap();
        assert_eq!(instance.graph.num_nodes(), 3);
        assert!(instance.graph.has_edge((0, 1)));
        assert!(instance.graph.has_edge((2, 0)));
        assert!(instance.is_heavy(0));
        assert!(!instance.is_heavy(1));
        assert_eq!(instance.node_weight(2), HEAVY_WEIGHT);
        assert_eq!(instance.cycle_weight(&[0, 1, 2]), 5);
    }

    #[test]
    fn read_empty_instance_test() {
        let instance = WCCInstance::read_instance(Cursor::new("0\n")).unwrap();
        assert_eq!(instance.graph.num_nodes(), 0);
        let instance = WCCInstance::read_instance(Cursor::new("0\n\n")).unwrap();
        assert_eq!(instance.graph.num_nodes(), 0);
    }

    #[test]
    fn read_malformed_instance_test() {
        // Heavy id out of range.
        assert!(WCCInstance::read_instance(Cursor::new("2\n3\n0 1\n1 0\n")).is_err());
        // Missing matrix row.
        assert!(WCCInstance::read_instance(Cursor::new("2\n\n0 1\n")).is_err());
        // Row of the wrong length.
        assert!(WCCInstance::read_instance(Cursor::new("2\n\n0 1 0\n1 0\n")).is_err());
        // Entry that is neither 0 nor 1.
        assert!(WCCInstance::read_instance(Cursor::new("2\n\n0 2\n1 0\n")).is_err());
        // Node count that is not a number.
        assert!(WCCInstance::read_instance(Cursor::new("two\n\n")).is_err());
    }

    #[test]
    fn commit_and_discard_test() {
        let inp = Cursor::new("4\n1\n0 1 0 0\n1 0 0 0\n0 0 0 1\n0 0 1 0\n");
        let mut instance = WCCInstance::read_instance(inp).unwrap();
        instance.commit_cycle(vec![0, 1]);
        assert_eq!(instance.solution.value, 3);
        assert_eq!(instance.solution.cycles, vec![vec![0, 1]]);
        assert!(!instance.graph.has_node(0));
        instance.discard_node(2);
        assert_eq!(instance.solution.value, 3);
        assert_eq!(instance.graph.num_nodes(), 1);
    }

    #[test]
    fn write_solution_test() {
        let solution = Solution {
            cycles: vec![vec![0, 3, 1], vec![2, 4]],
            value: 7,
        };
        let mut out = Vec::new();
        WCCInstance::write_solution(&solution, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "7\n0 3 1\n2 4\n");
        // The empty solution still carries its value line.
        let mut out = Vec::new();
        WCCInstance::write_solution(&Solution::default(), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "0\n");
    }
}
