//! DSL (Domain Specific Language) parser for resistor netlists.
//!
//! This module provides a SPICE-inspired text-based language for describing
//! resistor networks. The DSL is line-oriented and human-editable.
//!
//! # Grammar Overview
//!
//! ```text
//! netlist     = { line }
//! line        = comment | directive | resistor | empty
//! comment     = ('#' | ';') { any_char }
//! directive   = '.' directive_name node
//! resistor    = name node node value
//!
//! directive_name = "source" | "target" | "input" | "output" | "node"
//! name        = ('R' | 'r') { letter | digit | '_' }
//! node        = identifier | digit+
//! value       = number [unit_suffix]
//!
//! number      = ['-'] (digit+ ['.' digit+] | '.' digit+) [('e'|'E') ['-'|'+'] digit+]
//! unit_suffix = 'p' | 'n' | 'u' | 'm' | 'k' | 'M' | 'G'
//! identifier  = (letter | '_') { letter | digit | '_' }
//! ```
//!
//! # Directives
//!
//! | Directive | Description | Syntax |
//! |-----------|-------------|--------|
//! | .source | Terminal the resistance is measured from | `.source <node>` |
//! | .target | Terminal the resistance is measured to | `.target <node>` |
//! | .node | Declare a node | `.node <name>` |
//!
//! `.input` and `.output` are accepted as aliases of `.source` and `.target`.
//!
//! # Example
//!
//! ```text
//! # Two 1k resistors in parallel, in series with 500R
//! .source in
//! .target out
//!
//! R1 in  mid 500
//! R2 mid out 1k
//! R3 mid out 1k
//! ```

mod ast;
mod lexer;
mod parser;

pub use ast::*;
pub use lexer::{parse_value, Lexer, Token, TokenKind};
pub use parser::Parser;

use crate::error::Result;

/// Parse a netlist DSL string into an AST.
pub fn parse(input: &str) -> Result<NetlistAst> {
    let lexer = Lexer::new(input);
    let mut parser = Parser::new(lexer)?;
    parser.parse()
}

/// Parse a netlist DSL file.
#[cfg(feature = "cli")]
pub fn parse_file(path: &std::path::Path) -> Result<NetlistAst> {
    let content = std::fs::read_to_string(path).map_err(|e| crate::error::ReduceError::FileReadError {
        path: path.display().to_string(),
        source: e,
    })?;
    parse(&content)
}
