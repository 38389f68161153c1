use log::{debug, info};

use crate::graph::GateGraph;
use crate::literal::Edge;

/// Which folding law simplified a gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fold {
    /// `a & a => a`
    Idempotence,
    /// `a & !a => 0`
    Contradiction,
    /// `1 & a => a`
    Identity,
    /// `0 & a => 0`
    Annihilation,
}

impl GateGraph {
    /// Work out what the AND gate in `node` folds to, without changing anything.
    ///
    /// Returns `None` for gates that are not AND gates or that no rule applies to, and for a gate
    /// that would fold into itself.
    #[must_use]
    pub fn fold(&self, node: usize) -> Option<(Fold, Edge)> {
        if !self[node].is_and() {
            return None;
        }

        let (mut x, mut y) = (self[node].fanin()[0], self[node].fanin()[1]);
        // Put a constant operand first.
        if y.target == 0 {
            std::mem::swap(&mut x, &mut y);
        }

        let zero = Edge::new(0, false);

        let folded = if x.target == y.target {
            if x.inverted == y.inverted {
                (Fold::Idempotence, x)
            } else {
                (Fold::Contradiction, zero)
            }
        } else if x.target == 0 {
            if x.inverted {
                (Fold::Identity, y)
            } else {
                (Fold::Annihilation, zero)
            }
        } else {
            return None;
        };

        // A gate that feeds itself cannot be replaced by itself.
        Some(folded).filter(|(_, with)| with.target != node)
    }

    /// Fold the AND gate in `node` if any rule applies, rewiring its consumers. Returns the rule used.
    pub fn transform_fold(&mut self, node: usize) -> Option<Fold> {
        let (fold, with) = self.fold(node)?;
        self.replace(node, Some(with));
        info!("Simplifying: {} merging {}{}... ({:?})", with.target, if with.inverted { "!" } else { "" }, node, fold);
        Some(fold)
    }

    /// Remove AND gates that nothing consumes, repeating until none are left. Returns the number of
    /// gates removed.
    pub fn sweep(&mut self) -> usize {
        let mut removed = 0;
        let mut did_something = true;

        while did_something {
            did_something = false;

            for node in 0..self.len() {
                if self[node].is_and() && self[node].fanout().is_empty() {
                    self.remove(node);
                    info!("Sweeping: AIG({}) removed...", node);
                    removed += 1;
                    did_something = true;
                }
            }
        }

        debug!("sweep: removed {} gates, {} AND gates left", removed, self.header().a);
        debug_assert_eq!(self.check(), Ok(()));
        removed
    }

    /// Fold constant and redundant AND gates reachable from the outputs until nothing changes.
    /// Returns the number of gates folded.
    ///
    /// Gates are tried in output-cone post-order. The cone is collected again after every fold,
    /// since folding a gate can expose its consumers.
    pub fn rewrite(&mut self) -> usize {
        let mut folded = 0;
        let mut did_something = true;

        while did_something {
            did_something = false;

            for node in self.output_cone() {
                if self.transform_fold(node).is_some() {
                    folded += 1;
                    did_something = true;
                    break;
                }
            }
        }

        debug!("rewrite: folded {} gates, {} AND gates left", folded, self.header().a);
        debug_assert_eq!(self.check(), Ok(()));
        folded
    }
}
