//! Abstract Syntax Tree types for the netlist DSL.

use crate::error::{ReduceError, Result};
use crate::network::{Network, Terminals};

/// Complete AST representation of a parsed netlist.
#[derive(Debug, Clone, Default)]
pub struct NetlistAst {
    /// All resistor instances, in file order
    pub resistors: Vec<ResistorDef>,
    /// Source terminal name
    pub source: Option<String>,
    /// Target terminal name
    pub target: Option<String>,
    /// All referenced node names, in order of first appearance
    pub nodes: Vec<String>,
}

impl NetlistAst {
    /// Create a new empty netlist AST.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a node name if it has not been seen yet.
    pub fn declare_node(&mut self, name: &str) {
        if !self.nodes.iter().any(|n| n == name) {
            self.nodes.push(name.to_string());
        }
    }

    /// Resolve the `.source` and `.target` directives against a network
    /// built from this netlist.
    pub fn terminals(&self, network: &Network) -> Result<Terminals> {
        let source = self.source.as_deref().ok_or(ReduceError::MissingSource)?;
        let target = self.target.as_deref().ok_or(ReduceError::MissingTarget)?;
        network.terminals(source, target)
    }
}

/// A resistor definition from the DSL.
#[derive(Debug, Clone, PartialEq)]
pub struct ResistorDef {
    /// Unique resistor name
    pub name: String,
    /// Connected node names
    pub nodes: Vec<String>,
    /// Resistance in ohms
    pub value: f64,
    /// Source line number for error reporting
    pub line: usize,
}

/// Directives supported by the DSL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// `.source <node>` (alias `.input`)
    Source,
    /// `.target <node>` (alias `.output`)
    Target,
    /// `.node <name>`: declare a node ahead of use
    Node,
}

impl Directive {
    /// Parse a directive from its text, including the leading dot.
    pub fn from_text(text: &str) -> Option<Self> {
        match text.to_ascii_lowercase().as_str() {
            ".source" | ".input" => Some(Self::Source),
            ".target" | ".output" => Some(Self::Target),
            ".node" => Some(Self::Node),
            _ => None,
        }
    }
}
