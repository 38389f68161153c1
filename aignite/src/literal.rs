use std::fmt;
use std::ops::Not;

/// An AIGER literal.
///
/// The least significant bit signifies inversion state; the remaining bits are the variable index.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Literal(pub usize);

impl Literal {
    /// The constant-zero literal.
    pub const FALSE: Self = Self(0);
    /// The constant-one literal.
    pub const TRUE: Self = Self(1);

    /// Build a literal from a variable index and an inversion flag.
    #[must_use]
    pub const fn new(variable: usize, inverted: bool) -> Self {
        Self(variable * 2 + inverted as usize)
    }

    /// Returns the variable index of this literal.
    #[must_use]
    pub const fn variable(self) -> usize {
        self.0 >> 1
    }

    /// Returns true if this literal is inverted.
    #[must_use]
    pub const fn is_inverted(self) -> bool {
        self.0 & 1 == 1
    }
}

impl Not for Literal {
    type Output = Self;

    fn not(self) -> Self {
        Self(self.0 ^ 1)
    }
}

impl From<Edge> for Literal {
    fn from(edge: Edge) -> Self {
        Self::new(edge.target, edge.inverted)
    }
}

impl From<aiger::Literal> for Literal {
    fn from(literal: aiger::Literal) -> Self {
        Self::new(literal.variable(), literal.is_inverted())
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A polarity-tagged reference to another gate.
///
/// Edges never own the gate they point at; `target` is a slot index into the owning
/// [`GateGraph`](crate::graph::GateGraph), so replacing a slot's contents keeps every edge valid.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Edge {
    /// Slot index of the gate on the other end.
    pub target: usize,
    /// True if the signal is inverted along this edge.
    pub inverted: bool,
}

impl Edge {
    /// Create a new edge.
    #[must_use]
    pub const fn new(target: usize, inverted: bool) -> Self {
        Self { target, inverted }
    }

    /// Returns this edge with its inversion flag XORed against `polarity`.
    #[must_use]
    pub const fn compose(self, polarity: bool) -> Self {
        Self { target: self.target, inverted: self.inverted ^ polarity }
    }
}

impl Not for Edge {
    type Output = Self;

    fn not(self) -> Self {
        self.compose(true)
    }
}

impl From<Literal> for Edge {
    fn from(literal: Literal) -> Self {
        Self::new(literal.variable(), literal.is_inverted())
    }
}

impl fmt::Display for Edge {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.inverted {
            write!(f, "!{}", self.target)
        } else {
            write!(f, "{}", self.target)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{Edge, Literal};

    #[test]
    fn literal_encoding() {
        let lit = Literal(7);
        assert_eq!(lit.variable(), 3);
        assert!(lit.is_inverted());
        assert_eq!(Literal::new(3, true), lit);
        assert_eq!(!lit, Literal(6));
        assert_eq!(Literal::FALSE.variable(), 0);
        assert!(Literal::TRUE.is_inverted());
    }

    #[test]
    fn edge_compose() {
        // Composing a substitution's polarity into an edge is an XOR.
        let e = Edge::new(4, true);
        assert_eq!(e.compose(false), e);
        assert_eq!(e.compose(true), Edge::new(4, false));
        assert_eq!(!!e, e);
        assert_eq!(Literal::from(e), Literal(9));
        assert_eq!(Edge::from(Literal(9)), e);
        assert_eq!(e.to_string(), "!4");
    }
}
