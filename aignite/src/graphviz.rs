use std::io::{self, Write};

use petgraph::visit::{EdgeRef, IntoEdgeReferences};

use crate::gate::GateKind;
use crate::graph::GateGraph;

impl GateGraph {
    /// Write the graph in Graphviz dot format.
    ///
    /// Inverted edges get a hollow circle at the driver end. Every use of the constant gets its own
    /// point node, labelled with the constant value seen by the consumer.
    #[allow(clippy::missing_errors_doc)]
    pub fn to_graphviz<T: Write>(&self, mut writer: T) -> io::Result<()> {
        let graph = self.to_petgraph();

        writeln!(writer, "strict digraph {{")?;

        for node in graph.node_indices() {
            let index = node.index();
            let label = self[index].name().map_or_else(String::new, |name| format!(" ({})", name));

            match graph[node] {
                GateKind::PrimaryInput => {
                    writeln!(writer, "{} [shape=box,color=blue,label=\"Input {}{}\"];", index, index, label)?;
                }
                GateKind::PrimaryOutput => {
                    writeln!(writer, "{} [shape=box,color=green,label=\"Output {}{}\"];", index, index, label)?;
                }
                GateKind::And => {
                    writeln!(writer, "{} [label=\"AND {0}\"];", index)?;
                }
                GateKind::Undefined => {
                    writeln!(writer, "{} [shape=box,style=dashed,color=red,label=\"Undefined {0}\"];", index)?;
                }
                GateKind::Constant => {}
            }
        }

        for edge in graph.edge_references() {
            let (from, to) = (edge.source().index(), edge.target().index());
            let inverted = *edge.weight();

            if graph[edge.source()] == GateKind::Constant {
                writeln!(writer, "z{}_{} [label=\"{}\", shape=plaintext];", to, edge.id().index(), u8::from(inverted))?;
                writeln!(writer, "z{}_{} -> {};", to, edge.id().index(), to)?;
            } else {
                writeln!(writer, "{} -> {}{};", from, to, if inverted { " [dir=both,arrowtail=odot]" } else { "" })?;
            }
        }

        writeln!(writer, "}}")
    }
}

#[cfg(test)]
mod tests {
    use crate::graph::GateGraph;

    #[test]
    fn nand_dot() {
        let aig = GateGraph::from_aag_str("aag 3 2 0 1 1\n2\n4\n7\n6 2 4\ni1 y\n").unwrap();

        let mut buffer = Vec::new();
        aig.to_graphviz(&mut buffer).unwrap();
        let dot = String::from_utf8(buffer).unwrap();

        assert!(dot.starts_with("strict digraph {\n"));
        assert!(dot.ends_with("}\n"));
        assert!(dot.contains("2 [shape=box,color=blue,label=\"Input 2 (y)\"];"));
        assert!(dot.contains("3 [label=\"AND 3\"];"));
        assert!(dot.contains("1 -> 3;"));
        assert!(dot.contains("3 -> 4 [dir=both,arrowtail=odot];"));
    }

    #[test]
    fn constant_uses() {
        let aig = GateGraph::from_aag_str("aag 1 1 0 2 0\n2\n0\n1\n").unwrap();

        let mut buffer = Vec::new();
        aig.to_graphviz(&mut buffer).unwrap();
        let dot = String::from_utf8(buffer).unwrap();

        assert!(!dot.lines().any(|line| line.starts_with("0 ->")));
        assert!(dot.contains("label=\"0\", shape=plaintext"));
        assert!(dot.contains("label=\"1\", shape=plaintext"));
        assert!(dot.contains("-> 2;"));
        assert!(dot.contains("-> 3;"));
    }
}
