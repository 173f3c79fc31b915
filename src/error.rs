//! Error types for the ohmnet reducer.
//!
//! This module provides a unified error type [`ReduceError`] that covers
//! all error conditions that can occur during netlist parsing, network
//! validation, reduction and nodal analysis.

use thiserror::Error;

use crate::network::Network;

/// Result type alias using [`ReduceError`].
pub type Result<T> = std::result::Result<T, ReduceError>;

/// Unified error type for all ohmnet operations.
#[derive(Error, Debug)]
pub enum ReduceError {
    // ============ Netlist Parsing Errors ============
    /// Error during lexical analysis
    #[error("Lexer error at line {line}, column {column}: {message}")]
    LexerError {
        line: usize,
        column: usize,
        message: String,
    },

    /// Error during parsing
    #[error("Parse error at line {line}: {message}")]
    ParseError { line: usize, message: String },

    /// Invalid component definition
    #[error("Invalid component '{name}' at line {line}: {message}")]
    InvalidComponent {
        name: String,
        line: usize,
        message: String,
    },

    /// Unknown component type
    #[error("Unknown component type '{component_type}' at line {line} (only resistors are supported)")]
    UnknownComponentType { component_type: String, line: usize },

    /// Malformed `--edge` argument
    #[error("Invalid edge {name} \"{text}\": {message}")]
    InvalidEdge {
        name: String,
        text: String,
        message: String,
    },

    /// Duplicate component name
    #[error("Duplicate component name '{name}' at line {line}")]
    DuplicateComponent { name: String, line: usize },

    /// Missing source terminal
    #[error("No source terminal specified (use '.source <node>' or --source)")]
    MissingSource,

    /// Missing target terminal
    #[error("No target terminal specified (use '.target <node>' or --target)")]
    MissingTarget,

    // ============ Network Validation Errors ============
    /// Network has no edges at all
    #[error("Network has no resistors")]
    EmptyNetwork,

    /// Edge weight is zero, negative or not finite
    #[error("Invalid resistance {resistance} on '{edge}': resistances must be positive and finite")]
    InvalidWeight { edge: String, resistance: f64 },

    /// Terminal not present in the network
    #[error("Node '{node}' not found in network")]
    UnknownNode { node: String },

    /// Source and target are the same node
    #[error("Source and target are both '{node}'")]
    SameTerminal { node: String },

    /// No path between the terminals
    #[error("Nodes '{source_node}' and '{target_node}' are not connected - no finite equivalent resistance")]
    Disconnected {
        source_node: String,
        target_node: String,
    },

    // ============ Reduction Errors ============
    /// Fixed point reached with more than the two terminals left
    #[error(
        "Network between '{source_node}' and '{target_node}' cannot be reduced by series/parallel rules \
         ({} nodes and {} resistors remain) - nodal analysis required",
        .residual.node_count(),
        .residual.edge_count()
    )]
    IrreducibleTopology {
        source_node: String,
        target_node: String,
        residual: Box<Network>,
    },

    /// A combined resistance left the range of positive finite values
    #[error("Combined resistance {resistance} of '{edge}' is out of range (overflow or underflow)")]
    ResistanceOutOfRange { edge: String, resistance: f64 },

    // ============ Nodal Analysis Errors ============
    /// Matrix is singular and cannot be solved
    #[error("Singular conductance matrix - network may contain a floating node")]
    SingularMatrix,

    // ============ I/O Errors ============
    /// Error reading netlist file
    #[error("Failed to read netlist file '{path}': {source}")]
    FileReadError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    // ============ WASM Errors ============
    /// WASM-specific error
    #[cfg(feature = "wasm")]
    #[error("WASM error: {message}")]
    WasmError { message: String },
}

impl ReduceError {
    /// Create a lexer error
    pub fn lexer(line: usize, column: usize, message: impl Into<String>) -> Self {
        Self::LexerError {
            line,
            column,
            message: message.into(),
        }
    }

    /// Create a parse error
    pub fn parse(line: usize, message: impl Into<String>) -> Self {
        Self::ParseError {
            line,
            message: message.into(),
        }
    }

    /// Create an invalid component error
    pub fn invalid_component(name: impl Into<String>, line: usize, message: impl Into<String>) -> Self {
        Self::InvalidComponent {
            name: name.into(),
            line,
            message: message.into(),
        }
    }

    /// Create an unknown node error
    pub fn unknown_node(node: impl Into<String>) -> Self {
        Self::UnknownNode { node: node.into() }
    }

    /// Whether a general linear-system solve could still produce a result.
    pub fn needs_nodal_analysis(&self) -> bool {
        matches!(self, Self::IrreducibleTopology { .. })
    }
}
