//! Reduction of a component before it is handed to a solver.
//!
//! A node that lies on no directed cycle of at most five edges can never be
//! covered, whatever the solvers do later, and is removed right away with zero
//! contribution.

use crate::cycle_find::MAX_CYCLE_LEN;
use crate::wcc_instance::WCCInstance;
use fxhash::FxHashSet;

impl WCCInstance {

    /// Removes every node of `component` that lies on no cycle of length <= 5
    /// within the component, and returns the surviving set.
    ///
    /// One pass suffices: every node of a witness cycle is itself witnessed by
    /// that cycle, so no removal can invalidate the witness of a survivor.
    pub fn prune_component(&mut self, component: &FxHashSet<usize>) -> FxHashSet<usize> {
        let (alive, dead): (FxHashSet<usize>, FxHashSet<usize>) = component.iter()
            .copied()
            .partition(|node| self.graph.reaches_back_within(*node, MAX_CYCLE_LEN, component));
        self.discard_nodes(dead);
        alive
    }

}
