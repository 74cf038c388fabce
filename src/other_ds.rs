//! Small helper datastructures.

use std::iter::FromIterator;

/// Growable bitset over node ids. Used as the visit marker in the graph
/// traversals and as the heavy-vertex set of an instance.
#[derive(Debug, Default, Clone, Eq, PartialEq)]
pub struct NodeSet {
    blocks: Vec<u64>,
}

impl NodeSet {
    pub fn new() -> Self {
        NodeSet { blocks: Vec::new() }
    }

    /// Preallocates room for ids below `num_nodes`.
    pub fn with_capacity(num_nodes: usize) -> Self {
        NodeSet { blocks: vec![0; (num_nodes + 63) / 64] }
    }

    pub fn insert(&mut self, node: usize) {
        let block = node / 64;
        if block >= self.blocks.len() {
            self.blocks.resize(block + 1, 0);
        }
        self.blocks[block] |= 1u64 << (node % 64);
    }

    pub fn contains(&self, node: &usize) -> bool {
        let block = node / 64;
        block < self.blocks.len() && self.blocks[block] & (1u64 << (node % 64)) != 0
    }
}

impl FromIterator<usize> for NodeSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        let mut set = NodeSet::new();
        for node in iter {
            set.insert(node);
        }
        set
    }
}
