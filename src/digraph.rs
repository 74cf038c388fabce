//! Directed, dynamic graph datastructure.
//! The main fields are the two adjacency lists `in_list` and `out_list` which
//! respectively hold all incoming and outgoing neighbors of a node in a
//! `FxHashSet`. A removed node leaves a `None` slot behind, so node ids stay
//! stable over the whole lifetime of an instance and are never renumbered.

use crate::cust_errors::ImportError;
use crate::other_ds::NodeSet;
use fxhash::FxHashSet;

/// Helper marker for the iterative approach to find all strongly connected components.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Im {
    Itm(usize),
    Marker(usize),
}

/// The graph datastructure
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct Digraph {
    in_list: Vec<Option<FxHashSet<usize>>>,
    out_list: Vec<Option<FxHashSet<usize>>>,
}

impl Digraph {

    /// Returns a hashset of the neighborhood of outgoing nodes of `node` if `node` was not already deleted.
    pub fn out_neighbors(&self, node: usize) -> &Option<FxHashSet<usize>> {
        &self.out_list[node]
    }

    /// Returns a hashset of the neighborhood of incoming nodes of `node` if `node` was not already deleted.
    pub fn in_neighbors(&self, node: usize) -> &Option<FxHashSet<usize>> {
        &self.in_list[node]
    }

    /// Returns a hashset of the out neighborhood of `node` that are also in `set` if `node` was
    /// not already deleted.
    pub fn out_neighbors_in(&self, node: usize, set: &FxHashSet<usize>) -> Option<FxHashSet<usize>> {
        self.out_list[node].as_ref().map(|outs| set.intersection(outs).copied().collect())
    }

    /// Returns the amount of nodes including the removed once.
    pub fn num_reserved_nodes(&self) -> usize {
        self.out_list.len()
    }

    /// Returns an iterator over all undeleted nodes, in increasing id order.
    pub fn nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.out_list.iter()
            .enumerate()
            .filter_map(|(index, node)| {
                if node.is_some() {
                    Some(index)
                } else {
                    None
                }
            })
    }

    /// Returns the number of nodes in the graph.
    pub fn num_nodes(&self) -> usize {
        self.nodes().count()
    }

    /// Checks if `node` exists.
    pub fn has_node(&self, node: usize) -> bool {
        self.out_list.len() > node && self.out_list[node].is_some() && self.in_list[node].is_some()
    }

    /// Returns the number of edges in the graph.
    pub fn num_edges(&self) -> usize {
        self.edges().count()
    }

    /// Checks if `edge` exists.
    pub fn has_edge(&self, edge: (usize, usize)) -> bool {
        self.out_list.len() > edge.0 && self.out_list[edge.0].as_ref().filter(|outs| outs.contains(&edge.1)).is_some()
    }

    /// Returns an iterator over all edges.
    pub fn edges(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.out_list.iter()
            .enumerate()
            .filter(|(_, neighs)| neighs.is_some())
            .flat_map(|(index, neighs)| {
                neighs.as_ref()
                    .expect("Due to filter")
                    .iter()
                    .copied()
                    .map(|nn| (index, nn))
                    .collect::<Vec<(usize, usize)>>()
            })
    }

    /// Returns the out degree of `node` or None if `node` was deleted.
    ///
    /// # Panics
    /// Panics if node id is out of bounds.
    pub fn out_degree(&self, node: usize) -> Option<usize> {
        self.out_list[node].as_ref().map(|outs| outs.len())
    }

}

// Dynamic operations.
impl Digraph {

    /// Removes the node `node` and all adjacent edges from the graph in one step.
    /// Returns a tuple of incoming and outgoing neighbors if the node was removed
    /// successfully. Returns None if the node did not exist; removing twice is a
    /// no-op.
    ///
    /// # Panics
    /// Panics if the node index is out of bounds or the graph is broken.
    pub fn remove_node(&mut self, node: usize) -> Option<(FxHashSet<usize>, FxHashSet<usize>)> {
        if let Some(in_neighbors) = self.in_list[node].take() {
            for in_neighbor in &in_neighbors {
                if *in_neighbor != node {
                    self.out_list[*in_neighbor].as_mut().unwrap().remove(&node);
                }
            }
            if let Some(out_neighbors) = self.out_list[node].take() {
                for out_neighbor in &out_neighbors {
                    if *out_neighbor != node {
                        self.in_list[*out_neighbor].as_mut().unwrap().remove(&node);
                    }
                }
                Some((in_neighbors, out_neighbors))
            } else {
                // This should never happen.
                panic!();
            }
        } else {
            None
        }
    }

    /// Removes `nodes` from the graph.
    ///
    /// # Panics
    /// Panics if a node index is invalid.
    pub fn remove_nodes<I: IntoIterator<Item = usize>>(&mut self, nodes: I) {
        for node in nodes {
            self.remove_node(node);
        }
    }

}

// Strongly connected components and bounded reachability.
impl Digraph {

    /// DFS post-ordering of the edge-reversed graph, with unvisited roots
    /// taken in increasing id order and neighbors explored in increasing id
    /// order, so the ordering only depends on the live graph.
    fn reversed_post_order(&self) -> Vec<usize> {
        let mut marked = NodeSet::new();
        let mut order = Vec::new();
        let mut queue: Vec<Im> = Vec::new();
        for root in self.nodes() {
            if marked.contains(&root) {
                continue;
            }
            queue.push(Im::Itm(root));
            while let Some(item) = queue.pop() {
                match item {
                    Im::Itm(node) => {
                        if marked.contains(&node) {
                            continue;
                        }
                        marked.insert(node);
                        queue.push(Im::Marker(node));
                        let mut neighs: Vec<usize> = self.in_neighbors(node)
                            .as_ref()
                            .expect("`node` is a live node or a neighbor of one")
                            .iter()
                            .copied()
                            .collect();
                        neighs.sort_unstable();
                        queue.extend(neighs.into_iter().map(Im::Itm));
                    },
                    Im::Marker(node) => order.push(node),
                }
            }
        }
        order
    }

    /// Finds the strongly connected components of `self`.
    ///
    /// Returns the components as explicit node sets together with a node id to
    /// component index mapping (indexed by reserved node id, `None` for removed
    /// nodes). The decomposition is deterministic for a fixed live graph.
    pub fn strongly_connected_components(&self) -> (Vec<FxHashSet<usize>>, Vec<Option<usize>>) {
        // Step 1: post-order DFS on the reversed graph.
        let order = self.reversed_post_order();
        // Step 2: forward DFS from the unprocessed nodes in decreasing
        // post-order rank; each reachable set forms one component.
        let mut marked = NodeSet::new();
        let mut components: Vec<FxHashSet<usize>> = Vec::new();
        let mut membership: Vec<Option<usize>> = vec![None; self.num_reserved_nodes()];
        for &root in order.iter().rev() {
            if marked.contains(&root) {
                continue;
            }
            let index = components.len();
            let mut component = FxHashSet::default();
            let mut queue = vec![root];
            while let Some(node) = queue.pop() {
                if marked.contains(&node) {
                    continue;
                }
                marked.insert(node);
                component.insert(node);
                membership[node] = Some(index);
                queue.extend(self.out_neighbors(node)
                             .as_ref()
                             .expect("`node` is a live node or a neighbor of one")
                             .iter()
                             .copied());
            }
            components.push(component);
        }
        (components, membership)
    }

    /// Checks whether `node` lies on a directed cycle of at most `max_len`
    /// edges whose vertices all belong to `within`.
    ///
    /// BFS over at most `max_len` levels; a cycle of length `d` exists exactly
    /// if the d-th expansion step reaches `node` again.
    pub fn reaches_back_within(&self, node: usize, max_len: usize, within: &FxHashSet<usize>) -> bool {
        let mut marked: NodeSet = vec![node].into_iter().collect();
        let mut frontier = vec![node];
        for _depth in 1..=max_len {
            let mut next_frontier = Vec::new();
            for current in frontier {
                for &neigh in self.out_neighbors(current)
                    .as_ref()
                    .expect("`current` is a live node or a neighbor of one") {
                    if neigh == node {
                        return true
                    }
                    if within.contains(&neigh) && !marked.contains(&neigh) {
                        marked.insert(neigh);
                        next_frontier.push(neigh);
                    }
                }
            }
            frontier = next_frontier;
        }
        false
    }

}

// Building graphs.
impl Digraph {

    /// Builds a graph from an n×n boolean adjacency matrix.
    /// Diagonal entries are ignored: a length-1 loop is never a valid cycle
    /// here. Fails if the matrix is not square.
    pub fn from_adjacency(rows: &[Vec<bool>]) -> Result<Self, ImportError> {
        let n = rows.len();
        let mut in_list = vec![Some(FxHashSet::default()); n];
        let mut out_list = vec![Some(FxHashSet::default()); n];
        for (i, row) in rows.iter().enumerate() {
            if row.len() != n {
                return Err(ImportError::InputMalformedError);
            }
            for (j, &entry) in row.iter().enumerate() {
                if entry && i != j {
                    out_list[i].as_mut().expect("just created").insert(j);
                    in_list[j].as_mut().expect("just created").insert(i);
                }
            }
        }
        Ok(Digraph {
            in_list,
            out_list,
        })
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph_from_edges(n: usize, edges: &[(usize, usize)]) -> Digraph {
        let mut rows = vec![vec![false; n]; n];
        for &(src, trg) in edges {
            rows[src][trg] = true;
        }
        Digraph::from_adjacency(&rows).unwrap()
    }

    #[test]
    fn from_adjacency_test() {
        // Self-loop on 1 has to be dropped.
        let rows = vec![
            vec![false, true, false],
            vec![false, true, true],
            vec![true, false, false],
        ];
        let g = Digraph::from_adjacency(&rows).unwrap();
        assert_eq!(g.num_nodes(), 3);
        assert_eq!(g.num_edges(), 3);
        assert!(g.has_edge((0, 1)));
        assert!(!g.has_edge((1, 1)));
        let bad = vec![vec![false, true], vec![false]];
        assert!(Digraph::from_adjacency(&bad).is_err());
    }

    #[test]
    fn remove_node_test() {
        let mut g = graph_from_edges(4, &[(0, 1), (1, 2), (2, 0), (2, 3), (3, 1)]);
        let removed = g.remove_node(2);
        assert!(removed.is_some());
        let (ins, outs) = removed.unwrap();
        assert_eq!(ins, vec![1].into_iter().collect::<FxHashSet<usize>>());
        assert_eq!(outs, vec![0, 3].into_iter().collect::<FxHashSet<usize>>());
        assert!(!g.has_node(2));
        assert!(!g.has_edge((1, 2)));
        assert!(!g.has_edge((2, 0)));
        // Ids of the remaining nodes are unchanged.
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec![0, 1, 3]);
        // Removing again is a no-op.
        assert!(g.remove_node(2).is_none());
        assert_eq!(g.num_nodes(), 3);
    }

    #[test]
    fn find_scc_test() {
        let g = graph_from_edges(8, &[
            (0, 1), (1, 2), (2, 0),
            (2, 3),
            (3, 4), (4, 5), (5, 3),
            (6, 7),
        ]);
        let (components, membership) = g.strongly_connected_components();
        assert_eq!(components.len(), 4);
        let comp_of = |v: usize| membership[v].unwrap();
        assert_eq!(comp_of(0), comp_of(1));
        assert_eq!(comp_of(1), comp_of(2));
        assert_eq!(comp_of(3), comp_of(5));
        assert_ne!(comp_of(2), comp_of(3));
        assert_ne!(comp_of(6), comp_of(7));
        let triangle: FxHashSet<usize> = vec![0, 1, 2].into_iter().collect();
        assert!(components.contains(&triangle));
    }

    #[test]
    fn scc_deterministic_test() {
        let mut g = graph_from_edges(6, &[(0, 1), (1, 0), (1, 2), (2, 3), (3, 2), (4, 5), (5, 4)]);
        let first = g.strongly_connected_components();
        let second = g.strongly_connected_components();
        assert_eq!(first, second);
        g.remove_node(1);
        let third = g.strongly_connected_components();
        assert_eq!(third, g.strongly_connected_components());
    }

    #[test]
    fn reaches_back_test() {
        // Directed pentagon: every node closes a cycle of length 5.
        let g = graph_from_edges(5, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 0)]);
        let all: FxHashSet<usize> = g.nodes().collect();
        for node in 0..5 {
            assert!(g.reaches_back_within(node, 5, &all));
            assert!(!g.reaches_back_within(node, 4, &all));
        }
        // Directed hexagon: the only cycle is one edge too long.
        let g = graph_from_edges(6, &[(0, 1), (1, 2), (2, 3), (3, 4), (4, 5), (5, 0)]);
        let all: FxHashSet<usize> = g.nodes().collect();
        for node in 0..6 {
            assert!(!g.reaches_back_within(node, 5, &all));
        }
    }

    #[test]
    fn reaches_back_restricted_test() {
        // 0 <-> 1 plus a 2-cycle 0 <-> 2; restrict the search set.
        let g = graph_from_edges(3, &[(0, 1), (1, 0), (0, 2), (2, 0)]);
        let within: FxHashSet<usize> = vec![0, 1].into_iter().collect();
        assert!(g.reaches_back_within(0, 5, &within));
        let alone: FxHashSet<usize> = vec![2].into_iter().collect();
        // The only cycle through 2 runs over a node outside the allowed set.
        assert!(!g.reaches_back_within(2, 5, &alone));
    }
}
