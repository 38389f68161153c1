use std::io;

use thiserror::Error;

use crate::gate::GateKind;

/// The kind of symbol-table entry, as named by its leading character.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SymbolKind {
    /// An `i` line.
    Input,
    /// An `o` line.
    Output,
}

impl std::fmt::Display for SymbolKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            Self::Input => "i",
            Self::Output => "o",
        })
    }
}

/// Error returned when reading an AAG file failed.
///
/// Any of these abort the read; no partially-built graph is handed back.
#[derive(Debug, Error)]
pub enum ParseError {
    /// The input could not be read.
    #[error("cannot read design: {0}")]
    Io(#[from] io::Error),

    /// The header line is malformed.
    #[error("line {line}, col {column}: {message}")]
    Header {
        /// Line of the header.
        line: usize,
        /// Column of the offending token.
        column: usize,
        /// What is wrong.
        message: String,
    },

    /// A token that should be an unsigned number is not one.
    #[error("line {line}, col {column}: illegal number \"{token}\"")]
    InvalidNumber {
        /// Line of the token.
        line: usize,
        /// Column the token starts at.
        column: usize,
        /// The token as written.
        token: String,
    },

    /// Tokens are not separated by exactly one space.
    #[error("line {line}, col {column}: extra space character")]
    Whitespace {
        /// Line of the space.
        line: usize,
        /// Column of the extra space.
        column: usize,
    },

    /// A line that cannot be a record or symbol.
    #[error("line {line}: {message}")]
    Syntax {
        /// Line the error was found on.
        line: usize,
        /// What is wrong.
        message: String,
    },

    /// The netlist declares or names latches.
    #[error("line {line}: latches are not supported (L = {count})")]
    Latches {
        /// Line of the header.
        line: usize,
        /// Number of latches declared.
        count: usize,
    },

    /// A literal is larger than `2M + 1`.
    #[error("line {line}: literal \"{literal}\" exceeds maximum valid ID {max}")]
    LiteralOutOfRange {
        /// Line of the literal.
        line: usize,
        /// The literal as written.
        literal: usize,
        /// The largest literal the header allows.
        max: usize,
    },

    /// A PI or AND gate is defined by an odd literal.
    #[error("line {line}: literal {literal}({}) cannot be inverted", .literal / 2)]
    InvertedDefinition {
        /// Line of the definition.
        line: usize,
        /// The literal as written.
        literal: usize,
    },

    /// A variable is defined twice, or the constant is defined at all.
    #[error("line {line}: variable {variable} is redefined, previously defined as {previous} in line {previous_line}")]
    Redefinition {
        /// Line of the second definition.
        line: usize,
        /// The redefined variable.
        variable: usize,
        /// Kind of the first definition.
        previous: GateKind,
        /// Line of the first definition, or 0 for the constant.
        previous_line: usize,
    },

    /// An AND gate depends on itself.
    #[error("line {line}: AND gate {variable} is in a combinational loop")]
    Cycle {
        /// Line the looping gate is defined on.
        line: usize,
        /// A gate on the loop.
        variable: usize,
    },

    /// A symbol names a PI or PO position that was never declared.
    #[error("line {line}: symbol index {kind}{position} is out of range (only {count} declared)")]
    SymbolOutOfRange {
        /// Line of the symbol.
        line: usize,
        /// Whether it names an input or an output.
        kind: SymbolKind,
        /// The position named.
        position: usize,
        /// How many of that kind exist.
        count: usize,
    },

    /// A PI or PO is named twice.
    #[error("line {line}: symbolic name for \"{kind}{position}\" is redefined")]
    DuplicateSymbol {
        /// Line of the second name.
        line: usize,
        /// Whether it names an input or an output.
        kind: SymbolKind,
        /// The position named.
        position: usize,
    },

    /// The file ends before every record the header declares.
    #[error("line {line}: missing {what} definition")]
    MissingDefinition {
        /// Line where the missing record should be.
        line: usize,
        /// The kind of record missing.
        what: &'static str,
    },
}

impl ParseError {
    /// Returns the 1-based line the error was found on, if it has one.
    #[must_use]
    pub fn line(&self) -> Option<usize> {
        match self {
            Self::Io(_) => None,
            Self::Header { line, .. }
            | Self::InvalidNumber { line, .. }
            | Self::Whitespace { line, .. }
            | Self::Syntax { line, .. }
            | Self::Latches { line, .. }
            | Self::LiteralOutOfRange { line, .. }
            | Self::InvertedDefinition { line, .. }
            | Self::Redefinition { line, .. }
            | Self::Cycle { line, .. }
            | Self::SymbolOutOfRange { line, .. }
            | Self::DuplicateSymbol { line, .. }
            | Self::MissingDefinition { line, .. } => Some(*line),
        }
    }

    /// Returns the 1-based column the error was found at, if it is known.
    #[must_use]
    pub fn column(&self) -> Option<usize> {
        match self {
            Self::Header { column, .. } | Self::InvalidNumber { column, .. } | Self::Whitespace { column, .. } => {
                Some(*column)
            }
            _ => None,
        }
    }
}

/// Error returned by graph surgery or by an invariant check.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GraphError {
    /// A slot that already holds a real gate was defined again.
    #[error("variable {variable} is already defined as {previous} in line {previous_line}")]
    Redefinition {
        /// The slot defined twice.
        variable: usize,
        /// Kind of the existing gate.
        previous: GateKind,
        /// Line the existing gate was defined on.
        previous_line: usize,
    },

    /// One half of an edge has no matching other half.
    #[error("edge {from} -> {to} (inverted: {inverted}) has no matching half")]
    Asymmetric {
        /// The consumer end.
        from: usize,
        /// The driver end.
        to: usize,
        /// Inversion of the edge.
        inverted: bool,
    },

    /// A gate has the wrong number of fan-in edges for its kind.
    #[error("{kind} gate {gate} has {found} fanin edges, expected {expected}")]
    Arity {
        /// The gate.
        gate: usize,
        /// Its kind.
        kind: GateKind,
        /// Fan-in count its kind requires.
        expected: usize,
        /// Fan-in count it has.
        found: usize,
    },

    /// The slot vector for this many variables cannot be allocated.
    #[error("cannot allocate {slots} gate slots")]
    TooLarge {
        /// Slots requested.
        slots: usize,
    },
}
