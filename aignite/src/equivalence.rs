//! The boundary to a functional-equivalence checker.
//!
//! Structural folding only catches redundancy visible in a gate's immediate fan-in. Gates that
//! compute the same function through different structure need an external prover: something
//! proposes candidate pairs, an [`EquivalenceOracle`] decides each one, and
//! [`GateGraph::merge_equivalent`] applies the verdicts with the same replacement used by rewriting.

use log::{debug, info};

use crate::graph::GateGraph;
use crate::literal::Edge;
use crate::traversal::Direction;

/// The answer to "do these two gates compute the same function?".
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// The second gate equals the first, or its inversion if `inverted` is set.
    Equivalent {
        /// The second gate is the inversion of the first.
        inverted: bool,
    },
    /// The gates differ.
    Distinct {
        /// One value per primary input, in declaration order, under which the gates disagree.
        counterexample: Vec<bool>,
    },
}

/// Something that can prove or refute the equivalence of two gates.
pub trait EquivalenceOracle {
    /// Decide whether the gates in `pair` are functionally equivalent.
    fn check(&mut self, graph: &GateGraph, pair: (usize, usize)) -> Verdict;
}

/// What [`GateGraph::merge_equivalent`] did.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct MergeOutcome {
    /// Gates that were replaced, as `(kept, replaced)` pairs.
    pub merged: Vec<(usize, usize)>,
    /// Input vectors that refuted a candidate pair.
    pub counterexamples: Vec<Vec<bool>>,
}

impl GateGraph {
    /// Returns true if replacing `j` by `i` is structurally allowed: `j` is an AND gate, `i` is a
    /// live driver other than `j`, and `i` does not depend on `j`.
    #[must_use]
    pub fn can_merge(&self, i: usize, j: usize) -> bool {
        let (Some(kept), Some(replaced)) = (self.gate(i), self.gate(j)) else {
            return false;
        };

        if i == j || !replaced.is_and() || kept.is_undefined() || self.outputs().contains(&i) {
            return false;
        }

        // `i` in the fan-out cone of `j` would feed back into itself after the merge.
        !self.dfs_order(&[j], Direction::Fanout).contains(&i)
    }

    /// Ask `oracle` about each candidate pair `(i, j)` and replace `j` by `i` (with the learned
    /// polarity) for every pair proven equivalent.
    ///
    /// Pairs whose gates are gone by the time they come up, or that [`GateGraph::can_merge`]
    /// rejects, are skipped without consulting the oracle.
    pub fn merge_equivalent<O: EquivalenceOracle>(&mut self, candidates: &[(usize, usize)], oracle: &mut O) -> MergeOutcome {
        let mut outcome = MergeOutcome::default();

        for &(i, j) in candidates {
            if !self.can_merge(i, j) {
                debug!("equivalence: skipping ({}, {})", i, j);
                continue;
            }

            match oracle.check(self, (i, j)) {
                Verdict::Equivalent { inverted } => {
                    self.replace(j, Some(Edge::new(i, inverted)));
                    info!("Fraig: {} merging {}{}...", i, if inverted { "!" } else { "" }, j);
                    outcome.merged.push((i, j));
                }
                Verdict::Distinct { counterexample } => outcome.counterexamples.push(counterexample),
            }
        }

        debug_assert_eq!(self.check(), Ok(()));
        outcome
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use test_log::test;

    use super::{EquivalenceOracle, MergeOutcome, Verdict};
    use crate::gate::GateKind;
    use crate::graph::GateGraph;
    use crate::literal::Edge;

    /// An oracle that answers from a table, and remembers what it was asked.
    #[derive(Default)]
    struct Table {
        answers: HashMap<(usize, usize), Verdict>,
        asked: Vec<(usize, usize)>,
    }

    impl EquivalenceOracle for Table {
        fn check(&mut self, _graph: &GateGraph, pair: (usize, usize)) -> Verdict {
            self.asked.push(pair);
            self.answers.get(&pair).cloned().unwrap_or(Verdict::Distinct { counterexample: vec![] })
        }
    }

    /// `3 = x & y`, `4 = y & x`, `5 = 3 & 4` and `6 = !x & !y`. Outputs read 5 and 6.
    fn redundant() -> GateGraph {
        let mut aig = GateGraph::new(6);
        aig.add_input(1, 2).unwrap();
        aig.add_input(2, 3).unwrap();
        aig.add_and(3, Edge::new(1, false), Edge::new(2, false), 6).unwrap();
        aig.add_and(4, Edge::new(2, false), Edge::new(1, false), 7).unwrap();
        aig.add_and(5, Edge::new(3, false), Edge::new(4, false), 8).unwrap();
        aig.add_and(6, Edge::new(1, true), Edge::new(2, true), 9).unwrap();
        aig.add_output(Edge::new(5, false), 4).unwrap();
        aig.add_output(Edge::new(6, false), 5).unwrap();
        aig
    }

    #[test]
    fn merge_rewires_consumers() {
        // Before: 5 = 3 & 4 with 4 == 3
        // After: 5 = 3 & 3
        let mut aig = redundant();
        let mut oracle = Table::default();
        oracle.answers.insert((3, 4), Verdict::Equivalent { inverted: false });

        let outcome = aig.merge_equivalent(&[(3, 4)], &mut oracle);

        assert_eq!(outcome.merged, vec![(3, 4)]);
        assert_eq!(aig[4].kind(), GateKind::Undefined);
        assert_eq!(aig[5].fanin(), &[Edge::new(3, false), Edge::new(3, false)]);
        aig.check().unwrap();

        // The merge leaves an idempotent gate for rewriting to fold.
        assert_eq!(aig.rewrite(), 1);
        assert_eq!(aig[7].fanin(), &[Edge::new(3, false)]);
    }

    #[test]
    fn merge_with_polarity() {
        let mut aig = redundant();
        let mut oracle = Table::default();
        oracle.answers.insert((3, 4), Verdict::Equivalent { inverted: true });

        aig.merge_equivalent(&[(3, 4)], &mut oracle);

        assert_eq!(aig[5].fanin(), &[Edge::new(3, false), Edge::new(3, true)]);
        aig.check().unwrap();
    }

    #[test]
    fn counterexamples_are_collected() {
        let mut aig = redundant();
        let mut oracle = Table::default();
        oracle.answers.insert((3, 6), Verdict::Distinct { counterexample: vec![true, true] });

        let outcome = aig.merge_equivalent(&[(3, 6)], &mut oracle);

        assert_eq!(outcome, MergeOutcome { merged: vec![], counterexamples: vec![vec![true, true]] });
        assert_eq!(aig.header().a, 4);
    }

    #[test]
    fn cyclic_and_stale_merges_are_refused() {
        let mut aig = redundant();
        let mut oracle = Table::default();
        for pair in [(5, 3), (4, 4), (3, 1), (3, 4), (4, 5)] {
            oracle.answers.insert(pair, Verdict::Equivalent { inverted: false });
        }

        // 5 reads 3, so 3 cannot become 5. A gate cannot merge with itself, and only AND gates are
        // replaced. After (3, 4) merges, 4 is gone and (4, 5) is stale.
        let outcome = aig.merge_equivalent(&[(5, 3), (4, 4), (3, 1), (3, 4), (4, 5)], &mut oracle);

        assert_eq!(outcome.merged, vec![(3, 4)]);
        assert_eq!(oracle.asked, vec![(3, 4)]);
        assert!(!aig.can_merge(7, 3));
        aig.check().unwrap();
    }
}
