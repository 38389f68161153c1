//! Human-readable reports on a [`GateGraph`].

use std::fmt;
use std::io::{self, Write};

use itertools::Itertools;

use crate::gate::GateKind;
use crate::graph::GateGraph;
use crate::traversal::{Direction, Epoch};

const REPORT_WIDTH: usize = 50;

/// PI/PO/AND counts of a graph.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    /// Number of primary inputs.
    pub inputs: usize,
    /// Number of primary outputs.
    pub outputs: usize,
    /// Number of live AND gates.
    pub ands: usize,
}

impl fmt::Display for Summary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Circuit Statistics")?;
        writeln!(f, "==================")?;
        writeln!(f, "  PI   {:>9}", self.inputs)?;
        writeln!(f, "  PO   {:>9}", self.outputs)?;
        writeln!(f, "  AIG  {:>9}", self.ands)?;
        writeln!(f, "------------------")?;
        writeln!(f, "  Total{:>9}", self.inputs + self.outputs + self.ands)
    }
}

impl GateGraph {
    /// Returns the gate counts of the graph.
    #[must_use]
    pub fn summary(&self) -> Summary {
        let header = self.header();
        Summary { inputs: header.i, outputs: header.o, ands: header.a }
    }

    /// Print every gate reachable from an output, children first, one per line.
    ///
    /// Fan-ins are written as gate numbers, with `*` for an undefined gate and `!` for an inverted
    /// edge.
    #[allow(clippy::missing_errors_doc)]
    pub fn write_netlist<T: Write>(&self, mut writer: T) -> io::Result<()> {
        for (line, index) in self.output_cone().into_iter().enumerate() {
            let gate = &self[index];

            write!(writer, "[{}] ", line)?;
            if gate.kind() == GateKind::Constant {
                write!(writer, "{}{}", gate.kind(), index)?;
            } else {
                write!(writer, "{:<4}{}", gate.kind(), index)?;
            }

            for edge in gate.fanin() {
                let undefined = if self[edge.target].is_undefined() { "*" } else { "" };
                write!(writer, " {}{}", undefined, edge)?;
            }

            if let Some(name) = gate.name() {
                write!(writer, " ({})", name)?;
            }
            writeln!(writer)?;
        }

        Ok(())
    }

    /// Print the primary inputs in declaration order.
    #[allow(clippy::missing_errors_doc)]
    pub fn write_inputs<T: Write>(&self, mut writer: T) -> io::Result<()> {
        writeln!(writer, "{}", format!("PIs of the circuit: {}", self.inputs().iter().join(" ")).trim_end())
    }

    /// Print the primary outputs in declaration order.
    #[allow(clippy::missing_errors_doc)]
    pub fn write_outputs<T: Write>(&self, mut writer: T) -> io::Result<()> {
        writeln!(writer, "{}", format!("POs of the circuit: {}", self.outputs().iter().join(" ")).trim_end())
    }

    /// Print the gates with floating fan-ins and the gates that are defined but unused. Empty lists
    /// are left out.
    #[allow(clippy::missing_errors_doc)]
    pub fn write_floating<T: Write>(&self, mut writer: T) -> io::Result<()> {
        let floating = self.floating_fanins();
        if !floating.is_empty() {
            writeln!(writer, "Gates with floating fanin(s): {}", floating.iter().join(" "))?;
        }

        let unused = self.unused();
        if !unused.is_empty() {
            writeln!(writer, "Gates defined but not used  : {}", unused.iter().join(" "))?;
        }

        Ok(())
    }

    /// Print a boxed one-line description of gate `index`.
    #[allow(clippy::missing_errors_doc)]
    pub fn write_gate<T: Write>(&self, index: usize, mut writer: T) -> io::Result<()> {
        let gate = &self[index];

        let mut title = format!("{}({})", gate.kind(), index);
        if let Some(name) = gate.name() {
            title.push_str(&format!("\"{}\"", name));
        }
        title.push_str(&format!(", line {}", gate.line()));

        let rule = "=".repeat(REPORT_WIDTH);
        writeln!(writer, "{}", rule)?;
        writeln!(writer, "= {:<width$} =", title, width = REPORT_WIDTH - 4)?;
        writeln!(writer, "{}", rule)
    }

    /// Print the fan-in tree of gate `index`, `level` gates deep.
    #[allow(clippy::missing_errors_doc)]
    pub fn write_fanin<T: Write>(&self, index: usize, level: usize, mut writer: T) -> io::Result<()> {
        let epoch = self.begin_epoch();
        self.write_tree(&mut writer, epoch, index, level, level, Direction::Fanin, false)
    }

    /// Print the fan-out tree of gate `index`, `level` gates deep.
    #[allow(clippy::missing_errors_doc)]
    pub fn write_fanout<T: Write>(&self, index: usize, level: usize, mut writer: T) -> io::Result<()> {
        let epoch = self.begin_epoch();
        self.write_tree(&mut writer, epoch, index, level, level, Direction::Fanout, false)
    }

    // A gate that was already expanded earlier in the tree is printed once more with " (*)" and
    // not expanded again.
    #[allow(clippy::too_many_arguments)]
    fn write_tree<T: Write>(
        &self,
        writer: &mut T,
        epoch: Epoch,
        index: usize,
        max_level: usize,
        level: usize,
        direction: Direction,
        inverted: bool,
    ) -> io::Result<()> {
        let gate = &self[index];

        write!(writer, "{}{}{} {}", "  ".repeat(max_level - level), if inverted { "!" } else { "" }, gate.kind(), index)?;

        if level == 0 {
            return writeln!(writer);
        }

        let edges = match direction {
            Direction::Fanin => gate.fanin().to_vec(),
            Direction::Fanout => gate.fanout().iter().copied().sorted().collect(),
        };

        if self.is_visited(index, epoch) && !edges.is_empty() {
            return writeln!(writer, " (*)");
        }
        self.mark_visited(index, epoch);
        writeln!(writer)?;

        for edge in edges {
            self.write_tree(writer, epoch, edge.target, max_level, level - 1, direction, edge.inverted)?;
        }

        Ok(())
    }
}
