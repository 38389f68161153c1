use std::cell::Cell;
use std::fmt;

use crate::literal::Edge;

/// The variant of a gate slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GateKind {
    /// The constant zero, always variable 0.
    Constant,
    /// A network data input.
    PrimaryInput,
    /// A network data output, with exactly one fanin.
    PrimaryOutput,
    /// A two-input AND gate.
    And,
    /// A slot that is referenced but has no definition (yet, or any more).
    Undefined,
}

impl GateKind {
    /// Returns the number of fanin edges a gate of this kind must have.
    #[must_use]
    pub const fn arity(self) -> usize {
        match self {
            Self::Constant | Self::PrimaryInput | Self::Undefined => 0,
            Self::PrimaryOutput => 1,
            Self::And => 2,
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Constant => "CONST",
            Self::PrimaryInput => "PI",
            Self::PrimaryOutput => "PO",
            Self::And => "AIG",
            Self::Undefined => "UNDEF",
        })
    }
}

/// A node of the gate graph.
///
/// A gate only holds its half of every edge. The [`GateGraph`](crate::graph::GateGraph) keeps the other
/// half in the neighbouring gate, so most mutation goes through the graph rather than through here.
#[derive(Clone, Debug)]
pub struct Gate {
    kind: GateKind,
    variable: usize,
    line: usize,
    pub(crate) fanin: Vec<Edge>,
    pub(crate) fanout: Vec<Edge>,
    name: Option<String>,
    stamp: Cell<u64>,
}

impl Gate {
    /// Create an undefined placeholder for `variable`.
    #[must_use]
    pub fn placeholder(variable: usize) -> Self {
        Self {
            kind: GateKind::Undefined,
            variable,
            line: 0,
            fanin: Vec::new(),
            fanout: Vec::new(),
            name: None,
            stamp: Cell::new(0),
        }
    }

    /// Returns the variant of this gate.
    #[must_use]
    pub const fn kind(&self) -> GateKind {
        self.kind
    }

    /// Returns the variable index of this gate.
    #[must_use]
    pub const fn variable(&self) -> usize {
        self.variable
    }

    /// Returns the source line this gate was defined on, or 0 if it has none.
    #[must_use]
    pub const fn line(&self) -> usize {
        self.line
    }

    /// Returns the fan-in of this gate, in definition order.
    #[must_use]
    pub fn fanin(&self) -> &[Edge] {
        &self.fanin
    }

    /// Returns the fan-out of this gate. The order carries no meaning.
    #[must_use]
    pub fn fanout(&self) -> &[Edge] {
        &self.fanout
    }

    /// Returns the symbolic name of this gate, if it has one.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub(crate) fn set_name(&mut self, name: String) {
        self.name = Some(name);
    }

    /// Returns true for an AND gate.
    #[must_use]
    pub const fn is_and(&self) -> bool {
        matches!(self.kind, GateKind::And)
    }

    /// Returns true for a placeholder slot.
    #[must_use]
    pub const fn is_undefined(&self) -> bool {
        matches!(self.kind, GateKind::Undefined)
    }

    /// Upgrade a placeholder in place. Fan-out already attached to the placeholder is kept.
    pub(crate) fn define(&mut self, kind: GateKind, line: usize) {
        debug_assert!(self.is_undefined(), "gate {} defined twice", self.variable);
        self.kind = kind;
        self.line = line;
    }

    /// Demote this gate back to a placeholder. Edges must already be detached.
    pub(crate) fn undefine(&mut self) {
        debug_assert!(self.fanin.is_empty());
        self.kind = GateKind::Undefined;
        self.line = 0;
        self.name = None;
    }

    pub(crate) fn stamp(&self) -> u64 {
        self.stamp.get()
    }

    pub(crate) fn set_stamp(&self, epoch: u64) {
        self.stamp.set(epoch);
    }

    /// Walk every edge this gate holds that points at `old`, in both fan-in and fan-out.
    ///
    /// With `new == None` the edges are deleted. Otherwise they are retargeted to `new` with their
    /// inversion XORed against `polarity`. Returns the edges as they were before the change, so the
    /// caller can fix up the other halves.
    pub fn replace_references_to(&mut self, old: usize, new: Option<usize>, polarity: bool) -> Vec<Edge> {
        let mut touched = Vec::new();

        for list in [&mut self.fanin, &mut self.fanout] {
            match new {
                None => list.retain(|edge| {
                    if edge.target == old {
                        touched.push(*edge);
                        false
                    } else {
                        true
                    }
                }),
                Some(new) => {
                    for edge in list.iter_mut().filter(|edge| edge.target == old) {
                        touched.push(*edge);
                        *edge = Edge::new(new, edge.inverted ^ polarity);
                    }
                }
            }
        }

        touched
    }

    /// Remove one edge `(target, inverted)` from the given list, returning true if it was present.
    pub(crate) fn remove_half(list: &mut Vec<Edge>, target: usize, inverted: bool) -> bool {
        if let Some(position) = list.iter().position(|edge| edge.target == target && edge.inverted == inverted) {
            list.remove(position);
            true
        } else {
            false
        }
    }
}
