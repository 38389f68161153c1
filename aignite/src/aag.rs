//! Reading and writing the ASCII AIGER (`aag`) format.
//!
//! The header and the layout of every body line are checked here first, so that errors carry a
//! line, and a column where there is one. Records are then tokenised by the [`aiger`] crate and
//! checked for redefinition, loops and symbol errors as they are added to the graph. A lone `c` line ends the records; everything after it is kept as
//! the graph's comment.

use std::fs::File;
use std::io::{self, Read, Write};
use std::path::Path;

use log::debug;
use petgraph::algo::toposort;

use crate::error::{GraphError, ParseError, SymbolKind};
use crate::gate::GateKind;
use crate::graph::{GateGraph, Header};
use crate::literal::{Edge, Literal};

/// The comment trailer written after every netlist.
pub const TRAILER: &str = "AAG output by aignite";

/// Split `line` into whitespace-separated tokens, each with its 1-based column.
fn tokenize(line: &str) -> Vec<(usize, &str)> {
    let mut tokens = Vec::new();
    let mut start = None;

    for (index, ch) in line.char_indices().chain(std::iter::once((line.len(), ' '))) {
        match (start, ch.is_whitespace()) {
            (None, false) => start = Some(index),
            (Some(begin), true) => {
                tokens.push((begin + 1, &line[begin..index]));
                start = None;
            }
            _ => {}
        }
    }

    tokens
}

/// Returns the first whitespace that is not a single space between two tokens, as a column.
fn misplaced_space(text: &str) -> Option<usize> {
    let mut after_space = true;
    for (index, ch) in text.char_indices() {
        if ch.is_whitespace() {
            if ch != ' ' || after_space || index + 1 == text.len() {
                return Some(index + 1);
            }
            after_space = true;
        } else {
            after_space = false;
        }
    }
    None
}

/// Parse the header line. Returns the header and the column of its `M` field.
fn parse_header(line: &str) -> Result<(Header, usize), ParseError> {
    let tokens = tokenize(line);

    match tokens.first() {
        Some((_, "aag")) => {}
        Some(&(column, token)) => {
            return Err(ParseError::Header { line: 1, column, message: format!("expected \"aag\", found \"{}\"", token) });
        }
        None => {
            return Err(ParseError::Header { line: 1, column: 1, message: "missing \"aag\" header".to_string() });
        }
    }

    if let Some(column) = misplaced_space(line) {
        return Err(ParseError::Whitespace { line: 1, column });
    }

    let numbers = tokens[1..]
        .iter()
        .map(|&(column, token)| parse_number(token, 1, column))
        .collect::<Result<Vec<_>, _>>()?;

    if numbers.len() != 5 {
        let column = tokens.get(6).map_or(line.trim_end().len() + 1, |&(column, _)| column);
        return Err(ParseError::Header {
            line: 1,
            column,
            message: format!("expected 5 numbers after \"aag\", found {}", numbers.len()),
        });
    }

    let header = Header { m: numbers[0], i: numbers[1], l: numbers[2], o: numbers[3], a: numbers[4] };
    let m_column = tokens[1].0;

    // Literals run up to 2M + 1 and output slots up to M + O.
    let fits = header.m.checked_mul(2).and_then(|max| max.checked_add(1)).is_some()
        && header.m.checked_add(header.o).and_then(|slots| slots.checked_add(1)).is_some();
    if !fits {
        return Err(ParseError::Header {
            line: 1,
            column: m_column,
            message: format!("maximum variable {} is too large", header.m),
        });
    }

    Ok((header, m_column))
}

fn parse_number(token: &str, line: usize, column: usize) -> Result<usize, ParseError> {
    let invalid = || ParseError::InvalidNumber { line, column, token: token.to_string() };
    if token.is_empty() || !token.bytes().all(|byte| byte.is_ascii_digit()) {
        return Err(invalid());
    }
    token.parse().map_err(|_| invalid())
}

/// Check one PI, PO or AND record: single-space separated literals, `arity` of them, none above
/// `max`. The first literal of a defining record must be an even, non-constant literal.
fn scan_record(text: &str, line: usize, arity: usize, defines: bool, max: usize) -> Result<(), ParseError> {
    if text.is_empty() {
        return Err(ParseError::Syntax { line, message: "empty line".to_string() });
    }
    if let Some(column) = misplaced_space(text) {
        return Err(ParseError::Whitespace { line, column });
    }

    let mut column = 1;
    let mut count = 0;
    for token in text.split(' ') {
        let literal = parse_number(token, line, column)?;
        if literal > max {
            return Err(ParseError::LiteralOutOfRange { line, literal, max });
        }
        if count == 0 && defines {
            let literal = Literal(literal);
            if literal.is_inverted() {
                return Err(ParseError::InvertedDefinition { line, literal: literal.0 });
            }
            if literal.variable() == 0 {
                return Err(ParseError::Redefinition {
                    line,
                    variable: 0,
                    previous: GateKind::Constant,
                    previous_line: 0,
                });
            }
        }
        count += 1;
        column += token.len() + 1;
    }

    if count == arity {
        Ok(())
    } else {
        Err(ParseError::Syntax { line, message: format!("expected {} literals, found {}", arity, count) })
    }
}

/// Check every line after the header before the records are tokenised.
///
/// The records have to be laid out exactly, one space between literals, and a symbol line has to
/// start with `i` or `o`.
fn scan_body(body: &str, header: Header) -> Result<(), ParseError> {
    let max = 2 * header.m + 1;
    let outputs_end = header.i.saturating_add(header.o);
    let records = outputs_end.saturating_add(header.a);

    for (index, text) in body.lines().enumerate().skip(1) {
        let line = index + 1;
        let record = index - 1;

        if record < header.i {
            scan_record(text, line, 1, true, max)?;
        } else if record < outputs_end {
            scan_record(text, line, 1, false, max)?;
        } else if record < records {
            scan_record(text, line, 3, true, max)?;
        } else {
            let message = match text.bytes().next() {
                Some(b'i' | b'o') => continue,
                Some(b'l') => "latch symbols are not supported",
                Some(b'c') => "a comment must start with a line holding only \"c\"",
                Some(_) => "illegal symbol type",
                None => "empty line",
            };
            return Err(ParseError::Syntax { line, message: message.to_string() });
        }
    }

    Ok(())
}

/// Split off the comment block, if there is one.
fn split_comment(text: &str) -> (&str, Option<&str>) {
    let mut offset = 0;
    for line in text.split_inclusive('\n') {
        if line.trim_end_matches(['\n', '\r']) == "c" {
            return (&text[..offset], Some(&text[offset + line.len()..]));
        }
        offset += line.len();
    }
    (text, None)
}

fn redefined(err: GraphError, line: usize) -> ParseError {
    match err {
        GraphError::Redefinition { variable, previous, previous_line } => {
            ParseError::Redefinition { line, variable, previous, previous_line }
        }
        other => ParseError::Syntax { line, message: other.to_string() },
    }
}

impl GateGraph {
    /// Read an AAG netlist from a file.
    ///
    /// # Errors
    ///
    /// See [`GateGraph::from_aag_str`].
    pub fn from_aag_path<P: AsRef<Path>>(path: P) -> Result<Self, ParseError> {
        Self::from_aag(File::open(path)?)
    }

    /// Read an AAG netlist from any reader.
    ///
    /// # Errors
    ///
    /// See [`GateGraph::from_aag_str`].
    pub fn from_aag<R: Read>(mut reader: R) -> Result<Self, ParseError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Self::from_aag_str(&text)
    }

    /// Read an AAG netlist.
    ///
    /// # Errors
    ///
    /// Any malformed header or record, literal beyond `2M + 1`, redefined variable, combinational
    /// loop, or symbol naming a PI/PO that does not exist aborts the read with a [`ParseError`]
    /// carrying the line number.
    #[allow(clippy::too_many_lines)]
    pub fn from_aag_str(text: &str) -> Result<Self, ParseError> {
        let (body, comment) = split_comment(text);
        let (header, m_column) = parse_header(body.lines().next().unwrap_or_default())?;
        if header.l != 0 {
            return Err(ParseError::Latches { line: 1, count: header.l });
        }
        scan_body(body, header)?;

        let mut aig = Self::try_new(header.m).map_err(|err| ParseError::Header {
            line: 1,
            column: m_column,
            message: err.to_string(),
        })?;

        let mut line = 1;
        for record in aiger::Reader::from_reader(body.as_bytes())
            .map_err(|err| ParseError::Syntax { line: 1, message: format!("{:?}", err) })?
            .records()
        {
            line += 1;
            let record = record.map_err(|err| ParseError::Syntax { line, message: format!("{:?}", err) })?;

            match record {
                aiger::Aiger::Input(literal) => {
                    aig.add_input(literal.variable(), line).map_err(|err| redefined(err, line))?;
                }
                aiger::Aiger::Latch { .. } => {
                    return Err(ParseError::Latches { line, count: header.l });
                }
                aiger::Aiger::Output(literal) => {
                    aig.add_output(Edge::from(Literal::from(literal)), line).map_err(|err| redefined(err, line))?;
                }
                aiger::Aiger::AndGate { output, inputs } => {
                    let variable = output.variable();
                    let [a, b] = inputs.map(|input| Edge::from(Literal::from(input)));
                    if a.target == variable || b.target == variable {
                        return Err(ParseError::Cycle { line, variable });
                    }
                    aig.add_and(variable, a, b, line).map_err(|err| redefined(err, line))?;
                }
                aiger::Aiger::Symbol { type_spec, position, symbol } => {
                    let (kind, slots) = match type_spec {
                        aiger::Symbol::Input => (SymbolKind::Input, aig.inputs()),
                        aiger::Symbol::Output => (SymbolKind::Output, aig.outputs()),
                        aiger::Symbol::Latch => {
                            return Err(ParseError::Syntax { line, message: "latch symbols are not supported".to_string() });
                        }
                    };
                    let slot = *slots.get(position).ok_or(ParseError::SymbolOutOfRange {
                        line,
                        kind,
                        position,
                        count: slots.len(),
                    })?;
                    if aig[slot].name().is_some() {
                        return Err(ParseError::DuplicateSymbol { line, kind, position });
                    }
                    aig.set_name(slot, symbol);
                }
            }
        }

        let missing = if aig.inputs().len() != header.i {
            Some("PI")
        } else if aig.outputs().len() != header.o {
            Some("PO")
        } else if aig.header().a != header.a {
            Some("AIG")
        } else {
            None
        };
        if let Some(what) = missing {
            return Err(ParseError::MissingDefinition { line: line + 1, what });
        }

        if let Err(cycle) = toposort(&aig.to_petgraph(), None) {
            let variable = cycle.node_id().index();
            return Err(ParseError::Cycle { line: aig[variable].line(), variable });
        }

        if let Some(comment) = comment {
            aig.set_comment(comment.to_string());
        }

        debug!(
            "read aag {} {} 0 {} {}: {} floating, {} unused",
            header.m,
            header.i,
            header.o,
            header.a,
            aig.floating_fanins().len(),
            aig.unused().len()
        );

        Ok(aig)
    }

    fn driver_literal(&self, output: usize) -> Literal {
        self[output].fanin().first().map_or(Literal::FALSE, |edge| Literal::from(*edge))
    }

    /// Write the graph as an AAG netlist.
    ///
    /// Only AND gates reachable from a primary output are written, children before parents, and the
    /// header counts are recomputed to match.
    #[allow(clippy::missing_errors_doc)]
    pub fn to_aag<T: Write>(&self, mut writer: T) -> io::Result<()> {
        let ands = self.output_cone().into_iter().filter(|&index| self[index].is_and()).collect::<Vec<_>>();

        let max_variable = self
            .inputs()
            .iter()
            .copied()
            .chain(ands.iter().copied())
            .chain(ands.iter().chain(self.outputs()).flat_map(|&index| self[index].fanin().iter().map(|edge| edge.target)))
            .max()
            .unwrap_or(0);

        writeln!(writer, "aag {} {} 0 {} {}", max_variable, self.inputs().len(), self.outputs().len(), ands.len())?;

        for &input in self.inputs() {
            writeln!(writer, "{}", Literal::new(input, false))?;
        }

        for &output in self.outputs() {
            writeln!(writer, "{}", self.driver_literal(output))?;
        }

        for &and in &ands {
            let fanin = self[and].fanin();
            writeln!(writer, "{} {} {}", Literal::new(and, false), Literal::from(fanin[0]), Literal::from(fanin[1]))?;
        }

        for (prefix, slots) in [('i', self.inputs()), ('o', self.outputs())] {
            for (position, &slot) in slots.iter().enumerate() {
                match self[slot].name() {
                    Some(name) if !name.is_empty() => writeln!(writer, "{}{} {}", prefix, position, name)?,
                    _ => {}
                }
            }
        }

        writeln!(writer, "c")?;
        writeln!(writer, "{}", TRAILER)
    }

    /// Write the graph as an AAG netlist into a string.
    #[must_use]
    pub fn to_aag_string(&self) -> String {
        let mut buffer = Vec::new();
        // Writing into a Vec cannot fail.
        let _ = self.to_aag(&mut buffer);
        String::from_utf8_lossy(&buffer).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use test_log::test;

    use super::{split_comment, tokenize, TRAILER};
    use crate::error::{ParseError, SymbolKind};
    use crate::gate::GateKind;
    use crate::graph::{GateGraph, Header};
    use crate::literal::Edge;

    const AND2: &str = "aag 3 2 0 1 1\n2\n4\n6\n6 2 4\n";

    #[test]
    fn tokens_have_columns() {
        assert_eq!(tokenize("aag  3 2"), vec![(1, "aag"), (6, "3"), (8, "2")]);
        assert!(tokenize("   ").is_empty());
    }

    #[test]
    fn comment_split() {
        let (body, comment) = split_comment("aag 0 0 0 0 0\nc\nhello\nworld\n");
        assert_eq!(body, "aag 0 0 0 0 0\n");
        assert_eq!(comment, Some("hello\nworld\n"));

        let (body, comment) = split_comment("aag 0 0 0 0 0\ni0 c\n");
        assert_eq!(body, "aag 0 0 0 0 0\ni0 c\n");
        assert_eq!(comment, None);
    }

    #[test]
    fn read_and2() {
        let aig = GateGraph::from_aag_str(AND2).unwrap();
        aig.check().unwrap();

        assert_eq!(aig.header(), Header { m: 3, i: 2, l: 0, o: 1, a: 1 });
        assert_eq!(aig.inputs(), &[1, 2]);
        assert_eq!(aig.outputs(), &[4]);
        assert_eq!(aig[3].kind(), GateKind::And);
        assert_eq!(aig[3].line(), 5);
        assert_eq!(aig[3].fanin(), &[Edge::new(1, false), Edge::new(2, false)]);
        assert_eq!(aig[4].fanin(), &[Edge::new(3, false)]);
    }

    #[test]
    fn read_symbols_and_comment() {
        let text = "aag 3 2 0 1 1\n2\n4\n7\n6 2 5\ni0 clock\ni1 reset\no0 ready\nc\nmade by hand\n";
        let aig = GateGraph::from_aag_str(text).unwrap();

        assert_eq!(aig[1].name(), Some("clock"));
        assert_eq!(aig[2].name(), Some("reset"));
        assert_eq!(aig[4].name(), Some("ready"));
        assert_eq!(aig[4].fanin(), &[Edge::new(3, true)]);
        assert_eq!(aig[3].fanin(), &[Edge::new(1, false), Edge::new(2, true)]);
        assert_eq!(aig.comment(), Some("made by hand\n"));
    }

    #[test]
    fn read_floating_output() {
        // Output reads variable 2, which is never defined.
        let aig = GateGraph::from_aag_str("aag 2 1 0 1 0\n2\n5\n").unwrap();
        aig.check().unwrap();

        assert_eq!(aig[2].kind(), GateKind::Undefined);
        assert_eq!(aig.floating_fanins(), vec![3]);
        assert_eq!(aig.unused(), vec![1]);
    }

    #[test]
    fn header_errors() {
        let err = GateGraph::from_aag_str("aig 1 1 0 0 0\n2\n").unwrap_err();
        assert!(matches!(err, ParseError::Header { line: 1, column: 1, .. }), "{}", err);

        let err = GateGraph::from_aag_str("aag 1 1 0 0\n2\n").unwrap_err();
        assert!(matches!(err, ParseError::Header { line: 1, column: 12, .. }), "{}", err);

        let err = GateGraph::from_aag_str("aag 1 1 0 0 0 0\n2\n").unwrap_err();
        assert!(matches!(err, ParseError::Header { line: 1, column: 15, .. }), "{}", err);

        let err = GateGraph::from_aag_str("aag 1 x 0 0 0\n2\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 1, column: 7, .. }), "{}", err);
        assert_eq!(err.column(), Some(7));

        let err = GateGraph::from_aag_str("").unwrap_err();
        assert!(matches!(err, ParseError::Header { line: 1, .. }), "{}", err);
    }

    #[test]
    fn latches_rejected() {
        let err = GateGraph::from_aag_str("aag 1 0 1 0 0\n2 3\n").unwrap_err();
        assert!(matches!(err, ParseError::Latches { line: 1, count: 1 }), "{}", err);
    }

    #[test]
    fn redefinition_rejected() {
        // The AND gate on line 5 reuses the literal of the first input.
        let err = GateGraph::from_aag_str("aag 3 2 0 1 1\n2\n4\n6\n2 4 4\n").unwrap_err();
        match err {
            ParseError::Redefinition { line, variable, previous, previous_line } => {
                assert_eq!(line, 5);
                assert_eq!(variable, 1);
                assert_eq!(previous, GateKind::PrimaryInput);
                assert_eq!(previous_line, 2);
            }
            other => panic!("unexpected error {}", other),
        }

        let err = GateGraph::from_aag_str("aag 4 2 0 1 2\n2\n4\n6\n6 2 4\n6 4 2\n").unwrap_err();
        assert!(matches!(err, ParseError::Redefinition { line: 6, variable: 3, .. }), "{}", err);
    }

    #[test]
    fn header_too_large() {
        // 2M + 1 does not fit in a usize.
        let err = GateGraph::from_aag_str("aag 18446744073709551615 0 0 0 0\n").unwrap_err();
        assert!(matches!(err, ParseError::Header { line: 1, column: 5, .. }), "{}", err);

        // Fits the arithmetic, but not in memory.
        let err = GateGraph::from_aag_str(&format!("aag {} 0 0 0 0\n", usize::MAX / 4)).unwrap_err();
        assert!(matches!(err, ParseError::Header { line: 1, column: 5, .. }), "{}", err);
    }

    #[test]
    fn extra_spaces_rejected() {
        let err = GateGraph::from_aag_str("aag 3 2 0  1 1\n2\n4\n6\n6 2 4\n").unwrap_err();
        assert!(matches!(err, ParseError::Whitespace { line: 1, column: 11 }), "{}", err);

        let err = GateGraph::from_aag_str("aag 3 2 0 1 1\n2\n4\n6\n6 2 4 \n").unwrap_err();
        assert!(matches!(err, ParseError::Whitespace { line: 5, column: 6 }), "{}", err);

        let err = GateGraph::from_aag_str("aag 3 2 0 1 1\n 2\n4\n6\n6 2 4\n").unwrap_err();
        assert!(matches!(err, ParseError::Whitespace { line: 2, column: 1 }), "{}", err);
    }

    #[test]
    fn malformed_records() {
        let err = GateGraph::from_aag_str("aag 3 2 0 1 1\n2\n4\n6\n6 2 x\n").unwrap_err();
        assert!(matches!(err, ParseError::InvalidNumber { line: 5, column: 5, .. }), "{}", err);

        let err = GateGraph::from_aag_str("aag 3 2 0 1 1\n2\n4\n6\n6 2\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 5, .. }), "{}", err);

        let err = GateGraph::from_aag_str("aag 3 2 0 1 1\n2\n\n6\n6 2 4\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 3, .. }), "{}", err);
    }

    #[test]
    fn trailing_lines_must_be_symbols() {
        let err = GateGraph::from_aag_str("aag 3 2 0 1 1\n2\n4\n6\n6 2 4\n\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 6, .. }), "{}", err);

        let err = GateGraph::from_aag_str("aag 3 2 0 1 1\n2\n4\n6\n6 2 4\néa x\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 6, .. }), "{}", err);

        let err = GateGraph::from_aag_str("aag 1 1 0 0 0\n2\nl0 foo\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 3, .. }), "{}", err);
        assert!(err.to_string().contains("latch symbols"), "{}", err);

        let err = GateGraph::from_aag_str("aag 1 1 0 0 0\n2\ni0\n").unwrap_err();
        assert!(matches!(err, ParseError::Syntax { line: 3, .. }), "{}", err);
    }

    #[test]
    fn literal_out_of_range() {
        // M = 3 allows literals up to 7.
        let err = GateGraph::from_aag_str("aag 3 2 0 1 1\n2\n4\n6\n6 2 8\n").unwrap_err();
        assert!(matches!(err, ParseError::LiteralOutOfRange { line: 5, literal: 8, max: 7 }), "{}", err);

        let err = GateGraph::from_aag_str("aag 1 1 0 1 0\n2\n4\n").unwrap_err();
        assert!(matches!(err, ParseError::LiteralOutOfRange { line: 3, literal: 4, max: 3 }), "{}", err);
    }

    #[test]
    fn inverted_definition() {
        let err = GateGraph::from_aag_str("aag 1 1 0 0 0\n3\n").unwrap_err();
        assert!(matches!(err, ParseError::InvertedDefinition { line: 2, literal: 3 }), "{}", err);

        let err = GateGraph::from_aag_str("aag 2 1 0 1 1\n2\n4\n5 2 2\n").unwrap_err();
        assert!(matches!(err, ParseError::InvertedDefinition { line: 4, literal: 5 }), "{}", err);
    }

    #[test]
    fn constant_cannot_be_defined() {
        let err = GateGraph::from_aag_str("aag 1 1 0 0 0\n0\n").unwrap_err();
        assert!(
            matches!(err, ParseError::Redefinition { line: 2, variable: 0, previous: GateKind::Constant, .. }),
            "{}",
            err
        );
    }

    #[test]
    fn loops_rejected() {
        let err = GateGraph::from_aag_str("aag 3 1 0 1 1\n2\n6\n6 6 6\n").unwrap_err();
        assert!(matches!(err, ParseError::Cycle { line: 4, variable: 3 }), "{}", err);

        // 3 = 1 & 4 and 4 = 3 & 1.
        let err = GateGraph::from_aag_str("aag 4 1 0 1 2\n2\n6\n6 2 8\n8 6 2\n").unwrap_err();
        match err {
            ParseError::Cycle { line, variable } => {
                assert!(variable == 3 || variable == 4, "{}", variable);
                assert_eq!(line, variable + 1);
            }
            other => panic!("unexpected error {}", other),
        }
    }

    #[test]
    fn symbol_out_of_range() {
        let err = GateGraph::from_aag_str("aag 1 1 0 0 0\n2\no0 x\n").unwrap_err();
        assert!(
            matches!(err, ParseError::SymbolOutOfRange { line: 3, kind: SymbolKind::Output, position: 0, count: 0 }),
            "{}",
            err
        );
    }

    #[test]
    fn missing_definition() {
        // The header promises two AND gates and the file holds one.
        let err = GateGraph::from_aag_str("aag 3 2 0 1 2\n2\n4\n6\n6 2 4\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingDefinition { line: 6, what: "AIG" }), "{}", err);

        let err = GateGraph::from_aag_str("aag 3 2 0 1 1\n2\n").unwrap_err();
        assert!(matches!(err, ParseError::MissingDefinition { line: 3, what: "PI" }), "{}", err);
    }

    #[test]
    fn duplicate_symbol() {
        let err = GateGraph::from_aag_str("aag 1 1 0 0 0\n2\ni0 a\ni0 b\n").unwrap_err();
        assert!(
            matches!(err, ParseError::DuplicateSymbol { line: 4, kind: SymbolKind::Input, position: 0 }),
            "{}",
            err
        );
    }

    #[test]
    fn write_and2() {
        let aig = GateGraph::from_aag_str(AND2).unwrap();
        assert_eq!(aig.to_aag_string(), format!("aag 3 2 0 1 1\n2\n4\n6\n6 2 4\nc\n{}\n", TRAILER));
    }

    #[test]
    fn write_drops_unreachable_ands() {
        // Variable 4 is defined but feeds nothing.
        let text = "aag 4 2 0 1 2\n2\n4\n7\n6 2 4\n8 3 5\ni1 b\no0 out\n";
        let aig = GateGraph::from_aag_str(text).unwrap();

        assert_eq!(aig.unused(), vec![4]);
        assert_eq!(aig.to_aag_string(), format!("aag 3 2 0 1 1\n2\n4\n7\n6 2 4\ni1 b\no0 out\nc\n{}\n", TRAILER));
    }

    #[test]
    fn write_orders_children_first() {
        // AND lines appear out of order in the input.
        let text = "aag 5 2 0 1 3\n2\n4\n10\n10 8 6\n6 2 4\n8 3 5\n";
        let aig = GateGraph::from_aag_str(text).unwrap();

        assert_eq!(aig.to_aag_string(), format!("aag 5 2 0 1 3\n2\n4\n10\n8 3 5\n6 2 4\n10 8 6\nc\n{}\n", TRAILER));
    }
}
