//! Depth-first traversal over a [`GateGraph`].
//!
//! Visited marks are generation stamps: every gate remembers the epoch it was last visited in, and
//! starting a new epoch invalidates all marks at once without touching the gates. Traversals that
//! share an epoch must be strictly nested; beginning a fresh epoch while an older traversal is still
//! relying on its marks makes those marks stale.

use crate::gate::Gate;
use crate::graph::GateGraph;
use crate::literal::Edge;

/// Which edges a traversal follows.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    /// Towards the inputs.
    Fanin,
    /// Towards the outputs.
    Fanout,
}

/// A traversal generation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct Epoch(u64);

impl GateGraph {
    /// Start a new traversal epoch. All visited marks from earlier epochs become stale.
    #[must_use]
    pub fn begin_epoch(&self) -> Epoch {
        let next = self.epoch.get() + 1;
        self.epoch.set(next);
        Epoch(next)
    }

    /// Returns true if `index` was marked in `epoch`.
    #[must_use]
    pub fn is_visited(&self, index: usize, epoch: Epoch) -> bool {
        self[index].stamp() == epoch.0
    }

    /// Mark `index` as visited in `epoch`.
    pub fn mark_visited(&self, index: usize, epoch: Epoch) {
        self[index].set_stamp(epoch.0);
    }

    pub(crate) fn edges(&self, index: usize, direction: Direction) -> &[Edge] {
        match direction {
            Direction::Fanin => self[index].fanin(),
            Direction::Fanout => self[index].fanout(),
        }
    }

    // Undefined gates are never entered.
    fn enter(&self, index: usize, epoch: Epoch) -> bool {
        match self.gate(index) {
            Some(gate) if !gate.is_undefined() && gate.stamp() != epoch.0 => {
                gate.set_stamp(epoch.0);
                true
            }
            _ => false,
        }
    }

    /// Visit every gate reachable from `roots` along `direction`, children before parents, in a
    /// fresh epoch.
    pub fn depth_first<F: FnMut(&Gate)>(&self, roots: &[usize], direction: Direction, visit: F) {
        let epoch = self.begin_epoch();
        self.depth_first_in(epoch, roots, direction, visit);
    }

    /// Like [`GateGraph::depth_first`], but continuing an existing epoch. Gates already marked in
    /// `epoch` are skipped, so several calls can share one set of marks.
    pub fn depth_first_in<F: FnMut(&Gate)>(&self, epoch: Epoch, roots: &[usize], direction: Direction, mut visit: F) {
        let mut stack: Vec<(usize, usize)> = Vec::new();

        for &root in roots {
            if !self.enter(root, epoch) {
                continue;
            }
            stack.push((root, 0));

            while let Some(&(node, child)) = stack.last() {
                match self.edges(node, direction).get(child) {
                    Some(edge) => {
                        let top = stack.len() - 1;
                        stack[top].1 += 1;
                        if self.enter(edge.target, epoch) {
                            stack.push((edge.target, 0));
                        }
                    }
                    None => {
                        stack.pop();
                        visit(&self[node]);
                    }
                }
            }
        }
    }

    /// Returns the post-order of gates reachable from `roots` along `direction`.
    #[must_use]
    pub fn dfs_order(&self, roots: &[usize], direction: Direction) -> Vec<usize> {
        let mut order = Vec::new();
        self.depth_first(roots, direction, |gate| order.push(gate.variable()));
        order
    }

    /// Returns the post-order of every gate reachable from a primary output.
    #[must_use]
    pub fn output_cone(&self) -> Vec<usize> {
        self.dfs_order(self.outputs(), Direction::Fanin)
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::Direction;
    use crate::graph::GateGraph;
    use crate::literal::Edge;

    /// Inputs 1, 2, 3. `4 = 1 & 2`, `5 = 4 & 3`, `6 = 4 & !1`, outputs 5 and 6 in slots 7 and 8.
    fn diamond() -> GateGraph {
        let mut aig = GateGraph::new(6);
        for input in 1..=3 {
            aig.add_input(input, input + 1).unwrap();
        }
        aig.add_and(4, Edge::new(1, false), Edge::new(2, false), 7).unwrap();
        aig.add_and(5, Edge::new(4, false), Edge::new(3, false), 8).unwrap();
        aig.add_and(6, Edge::new(4, false), Edge::new(1, true), 9).unwrap();
        aig.add_output(Edge::new(5, false), 5).unwrap();
        aig.add_output(Edge::new(6, true), 6).unwrap();
        aig
    }

    #[test]
    fn post_order_fanin() {
        let aig = diamond();
        assert_eq!(aig.output_cone(), vec![1, 2, 4, 3, 5, 7, 6, 8]);
    }

    #[test]
    fn post_order_fanout() {
        let aig = diamond();
        let order = aig.dfs_order(&[3], Direction::Fanout);
        assert_eq!(order, vec![7, 5, 3]);
    }

    #[test]
    fn undefined_gates_are_skipped() {
        let mut aig = GateGraph::new(3);
        aig.add_input(1, 2).unwrap();
        aig.add_and(3, Edge::new(1, false), Edge::new(2, false), 4).unwrap();
        aig.add_output(Edge::new(3, false), 3).unwrap();

        assert_eq!(aig.output_cone(), vec![1, 3, 4]);
    }

    #[test]
    fn epochs_reset_marks() {
        let aig = diamond();

        let epoch = aig.begin_epoch();
        aig.mark_visited(4, epoch);
        assert!(aig.is_visited(4, epoch));

        // Nested traversal in the same epoch does not re-enter 4.
        let mut seen = Vec::new();
        aig.depth_first_in(epoch, &[7], Direction::Fanin, |gate| seen.push(gate.variable()));
        assert_eq!(seen, vec![3, 5, 7]);

        let fresh = aig.begin_epoch();
        assert!(!aig.is_visited(4, fresh));
    }
}
