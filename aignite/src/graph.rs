use std::cell::Cell;
use std::mem;
use std::ops::Index;

use itertools::Itertools;
use petgraph::prelude::*;

use crate::error::GraphError;
use crate::gate::{Gate, GateKind};
use crate::literal::Edge;

/// The `M I L O A` counts of an AAG header, kept current as the graph is edited.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Header {
    /// Maximum variable index.
    pub m: usize,
    /// Number of primary inputs.
    pub i: usize,
    /// Number of latches. Always zero.
    pub l: usize,
    /// Number of primary outputs.
    pub o: usize,
    /// Number of live AND gates.
    pub a: usize,
}

/// An and-inverter graph.
///
/// Every gate lives in a dense slot vector indexed by variable number. Slot 0 is the constant zero,
/// slots `1..=M` are the variables of the netlist, and primary outputs take the slots after `M` in
/// declaration order. Edges are `(slot, inverted)` pairs stored on both endpoints.
#[derive(Clone, Debug)]
pub struct GateGraph {
    gates: Vec<Gate>,
    inputs: Vec<usize>,
    outputs: Vec<usize>,
    header: Header,
    comment: Option<String>,
    pub(crate) epoch: Cell<u64>,
}

impl Default for GateGraph {
    fn default() -> Self {
        Self::new(0)
    }
}

impl GateGraph {
    /// Create a graph with the constant gate and an undefined placeholder for every variable up to
    /// `max_variable`.
    #[must_use]
    pub fn new(max_variable: usize) -> Self {
        Self::with_slots((0..=max_variable).map(Gate::placeholder).collect(), max_variable)
    }

    /// Like [`GateGraph::new`], but fails instead of aborting when the slots cannot be allocated.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::TooLarge`] if `max_variable + 1` slots do not fit in memory.
    pub fn try_new(max_variable: usize) -> Result<Self, GraphError> {
        let slots = max_variable.checked_add(1).ok_or(GraphError::TooLarge { slots: usize::MAX })?;

        let mut gates = Vec::new();
        gates.try_reserve_exact(slots).map_err(|_| GraphError::TooLarge { slots })?;
        gates.extend((0..slots).map(Gate::placeholder));

        Ok(Self::with_slots(gates, max_variable))
    }

    fn with_slots(mut gates: Vec<Gate>, max_variable: usize) -> Self {
        gates[0].define(GateKind::Constant, 0);

        Self {
            gates,
            inputs: Vec::new(),
            outputs: Vec::new(),
            header: Header { m: max_variable, ..Header::default() },
            comment: None,
            epoch: Cell::new(0),
        }
    }

    /// Returns the header counts.
    #[must_use]
    pub const fn header(&self) -> Header {
        self.header
    }

    /// Returns the number of gate slots, defined or not.
    #[must_use]
    pub fn len(&self) -> usize {
        self.gates.len()
    }

    /// Returns true if the graph holds nothing but the constant.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.gates.len() <= 1
    }

    /// Returns the gate in slot `index`, if the slot exists.
    #[must_use]
    pub fn gate(&self, index: usize) -> Option<&Gate> {
        self.gates.get(index)
    }

    /// Iterate over every slot in index order.
    pub fn gates(&self) -> impl Iterator<Item = &Gate> + '_ {
        self.gates.iter()
    }

    /// Returns the primary input slots, in declaration order.
    #[must_use]
    pub fn inputs(&self) -> &[usize] {
        &self.inputs
    }

    /// Returns the primary output slots, in declaration order.
    #[must_use]
    pub fn outputs(&self) -> &[usize] {
        &self.outputs
    }

    /// Returns the comment block the graph was read with.
    #[must_use]
    pub fn comment(&self) -> Option<&str> {
        self.comment.as_deref()
    }

    /// Replace the comment block.
    pub fn set_comment(&mut self, comment: String) {
        self.comment = Some(comment);
    }

    /// Give the gate in `index` a symbolic name.
    pub fn set_name(&mut self, index: usize, name: String) {
        self.gates[index].set_name(name);
    }

    /// Make sure slot `index` exists. Existing slots are left alone.
    pub fn create_placeholder(&mut self, index: usize) {
        let len = self.gates.len();
        if index >= len {
            self.gates.extend((len..=index).map(Gate::placeholder));
        }
    }

    /// Upgrade the placeholder in `index` to a real gate with the given fan-in.
    ///
    /// Edges other gates already hold to the placeholder stay valid, since the slot index doesn't
    /// change; only the placeholder's contents do.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::Redefinition`] if the slot already holds a defined gate. The slot is left
    /// unchanged in that case.
    pub fn materialize(&mut self, index: usize, kind: GateKind, fanin: &[Edge], line: usize) -> Result<(), GraphError> {
        debug_assert_eq!(fanin.len(), kind.arity(), "{} gate {} built with wrong fanin", kind, index);
        debug_assert_ne!(kind, GateKind::Undefined);

        self.create_placeholder(index);
        for edge in fanin {
            self.create_placeholder(edge.target);
        }

        let gate = &self.gates[index];
        if !gate.is_undefined() {
            return Err(GraphError::Redefinition {
                variable: index,
                previous: gate.kind(),
                previous_line: gate.line(),
            });
        }

        self.gates[index].define(kind, line);
        for edge in fanin {
            self.attach(index, *edge);
        }

        match kind {
            GateKind::PrimaryInput => {
                self.inputs.push(index);
                self.header.i += 1;
            }
            GateKind::PrimaryOutput => {
                self.outputs.push(index);
                self.header.o += 1;
            }
            GateKind::And => self.header.a += 1,
            GateKind::Constant | GateKind::Undefined => {}
        }

        Ok(())
    }

    /// Define variable `variable` as a primary input.
    ///
    /// # Errors
    ///
    /// See [`GateGraph::materialize`].
    pub fn add_input(&mut self, variable: usize, line: usize) -> Result<(), GraphError> {
        self.materialize(variable, GateKind::PrimaryInput, &[], line)
    }

    /// Define variable `variable` as `AND(a, b)`.
    ///
    /// # Errors
    ///
    /// See [`GateGraph::materialize`].
    pub fn add_and(&mut self, variable: usize, a: Edge, b: Edge, line: usize) -> Result<(), GraphError> {
        self.materialize(variable, GateKind::And, &[a, b], line)
    }

    /// Append a primary output driven by `driver`. Returns the output's slot.
    ///
    /// # Errors
    ///
    /// See [`GateGraph::materialize`].
    pub fn add_output(&mut self, driver: Edge, line: usize) -> Result<usize, GraphError> {
        let index = self.header.m + 1 + self.outputs.len();
        self.materialize(index, GateKind::PrimaryOutput, &[driver], line)?;
        Ok(index)
    }

    /// Add `edge` to the fan-in of `owner`, and its mirror to the fan-out of the target.
    pub fn attach(&mut self, owner: usize, edge: Edge) {
        self.gates[owner].fanin.push(edge);
        self.gates[edge.target].fanout.push(Edge::new(owner, edge.inverted));
    }

    /// Remove one fan-in edge of `owner` pointing at `target`, with its mirror.
    pub fn detach(&mut self, owner: usize, target: usize) -> Option<Edge> {
        let position = self.gates[owner].fanin.iter().position(|edge| edge.target == target)?;
        let edge = self.gates[owner].fanin.remove(position);
        let removed = Gate::remove_half(&mut self.gates[target].fanout, owner, edge.inverted);
        debug_assert!(removed, "edge {} -> {} had no fan-out half", target, owner);
        Some(edge)
    }

    /// Demote the gate in `index` to undefined, detaching all of its edges.
    pub fn remove(&mut self, index: usize) {
        self.replace(index, None);
    }

    /// Replace the gate in `old` by `with`, then demote `old` to undefined.
    ///
    /// Every consumer of `old` is rewired to `with.target`, with the consumer's edge inversion XORed
    /// against `with.inverted`. With `with == None` the consumers simply lose the edge. The fan-in
    /// of `old` is detached either way.
    pub fn replace(&mut self, old: usize, with: Option<Edge>) {
        let kind = self.gates[old].kind();
        if matches!(kind, GateKind::Constant | GateKind::Undefined) {
            return;
        }
        debug_assert_ne!(with.map(|edge| edge.target), Some(old), "gate {} replaced by itself", old);

        for edge in mem::take(&mut self.gates[old].fanin) {
            let removed = Gate::remove_half(&mut self.gates[edge.target].fanout, old, edge.inverted);
            debug_assert!(removed, "edge {} -> {} had no fan-out half", edge.target, old);
        }

        let consumers = mem::take(&mut self.gates[old].fanout)
            .into_iter()
            .map(|edge| edge.target)
            .unique()
            .collect::<Vec<_>>();

        for consumer in consumers {
            match with {
                None => {
                    self.gates[consumer].replace_references_to(old, None, false);
                }
                Some(with) => {
                    let touched = self.gates[consumer].replace_references_to(old, Some(with.target), with.inverted);
                    for edge in touched {
                        self.gates[with.target].fanout.push(Edge::new(consumer, edge.inverted ^ with.inverted));
                    }
                }
            }
        }

        match kind {
            GateKind::PrimaryInput => {
                self.inputs.retain(|&input| input != old);
                self.header.i -= 1;
            }
            GateKind::PrimaryOutput => {
                self.outputs.retain(|&output| output != old);
                self.header.o -= 1;
            }
            GateKind::And => self.header.a -= 1,
            GateKind::Constant | GateKind::Undefined => unreachable!(),
        }

        self.gates[old].undefine();
    }

    /// Returns true if any fan-in of `index` refers to an undefined gate.
    #[must_use]
    pub fn is_floating(&self, index: usize) -> bool {
        self.gates[index].fanin().iter().any(|edge| self.gates[edge.target].is_undefined())
    }

    /// Returns true if `index` is a primary input or AND gate that nothing consumes.
    #[must_use]
    pub fn is_dead(&self, index: usize) -> bool {
        let gate = &self.gates[index];
        matches!(gate.kind(), GateKind::PrimaryInput | GateKind::And) && gate.fanout().is_empty()
    }

    /// Returns every gate with a floating fan-in, in slot order.
    #[must_use]
    pub fn floating_fanins(&self) -> Vec<usize> {
        (0..self.gates.len()).filter(|&index| self.is_floating(index)).collect()
    }

    /// Returns every gate that is defined but not used, in slot order.
    #[must_use]
    pub fn unused(&self) -> Vec<usize> {
        (0..self.gates.len()).filter(|&index| self.is_dead(index)).collect()
    }

    /// Scan the whole graph for edge symmetry and fan-in arity.
    ///
    /// # Errors
    ///
    /// Returns the first violation found.
    pub fn check(&self) -> Result<(), GraphError> {
        for (index, gate) in self.gates.iter().enumerate() {
            let expected = gate.kind().arity();
            if gate.fanin().len() != expected {
                return Err(GraphError::Arity { gate: index, kind: gate.kind(), expected, found: gate.fanin().len() });
            }

            for edge in gate.fanin().iter().unique() {
                let here = gate.fanin().iter().filter(|e| *e == edge).count();
                let there = self.gates[edge.target].fanout().iter().filter(|e| **e == Edge::new(index, edge.inverted)).count();
                if here != there {
                    return Err(GraphError::Asymmetric { from: index, to: edge.target, inverted: edge.inverted });
                }
            }

            for edge in gate.fanout().iter().unique() {
                let here = gate.fanout().iter().filter(|e| *e == edge).count();
                let there = self.gates[edge.target].fanin().iter().filter(|e| **e == Edge::new(index, edge.inverted)).count();
                if here != there {
                    return Err(GraphError::Asymmetric { from: edge.target, to: index, inverted: edge.inverted });
                }
            }
        }

        let ands = self.gates.iter().filter(|gate| gate.is_and()).count();
        debug_assert_eq!(ands, self.header.a, "header AND count out of sync");

        Ok(())
    }

    /// Convert to a petgraph graph, with node `n` standing for slot `n` and edges pointing from
    /// driver to consumer. Undefined slots without edges are dropped.
    #[must_use]
    pub fn to_petgraph(&self) -> StableGraph<GateKind, bool> {
        let mut graph = StableGraph::with_capacity(self.gates.len(), self.gates.len() * 2);

        for gate in &self.gates {
            let node = graph.add_node(gate.kind());
            debug_assert_eq!(node.index(), gate.variable());
        }

        for (index, gate) in self.gates.iter().enumerate() {
            for edge in gate.fanin() {
                graph.add_edge(NodeIndex::new(edge.target), NodeIndex::new(index), edge.inverted);
            }
        }

        for (index, gate) in self.gates.iter().enumerate() {
            if gate.is_undefined() && gate.fanout().is_empty() {
                graph.remove_node(NodeIndex::new(index));
            }
        }

        graph
    }
}

impl Index<usize> for GateGraph {
    type Output = Gate;

    fn index(&self, index: usize) -> &Gate {
        &self.gates[index]
    }
}
