//! Utilities for working with and-inverter graphs.
//!
//! And-inverter graphs (AIGs) represent boolean logic as a network of two-input AND gates joined by
//! edges that may or may not invert the signal they carry. Together with the constant zero these
//! are enough to represent any combinational logic function, and their regularity makes them the
//! common currency of logic synthesis and verification tools.
//!
//! A graph is read from and written to the ASCII AIGER (`aag`) format. Every gate occupies a slot
//! named by its variable index; gates referenced before their definition get an undefined
//! placeholder slot that is upgraded in place once the definition arrives, so edges never need to be
//! patched. Each edge is stored on both of its endpoints, as a fan-in on the consumer and a fan-out
//! on the driver.
//!
//! An AND gate `a & b` will be notated with `!a` for the inversion of `a`, `0` for the constant zero
//! and `1` for its inversion.
//!
//! Two structural optimisations are provided:
//! - Sweeping removes AND gates that nothing reads, repeating until every remaining AND gate has a
//!   consumer. Primary inputs are never removed, even when they are unused.
//! - Rewriting folds AND gates whose result is obvious from their fan-in alone, and rewires their
//!   consumers to the simpler signal. There are four folding laws:
//!   - Idempotence: `a & a` is `a`.
//!   - Contradiction: `a & !a` is `0`.
//!   - Identity: `1 & a` is `a`.
//!   - Annihilation: `0 & a` is `0`.
//!
//! Folding a gate can make its consumers foldable in turn, so rewriting repeats until nothing
//! changes.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]
#![warn(missing_docs)]

pub mod aag;
pub mod equivalence;
pub mod error;
pub mod gate;
pub mod graph;
pub mod graphviz;
pub mod literal;
pub mod report;
pub mod transform;
pub mod traversal;

pub use equivalence::{EquivalenceOracle, MergeOutcome, Verdict};
pub use error::{GraphError, ParseError};
pub use gate::{Gate, GateKind};
pub use graph::{GateGraph, Header};
pub use literal::{Edge, Literal};
