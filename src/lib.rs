//! # ohmnet
//!
//! Equivalent resistance of resistor networks by series/parallel reduction.
//!
//! This library provides:
//! - An undirected multigraph of resistors with stable node identities
//! - A fixed-point reducer applying parallel merges and series eliminations
//! - A SPICE-inspired netlist DSL
//! - Nodal analysis as an independent solver for bridges
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`dsl`] - Parser for the netlist language
//! - [`network`] - Resistor graph representation and validation
//! - [`reduce`] - Series/parallel rewrite rules and the reduction driver
//! - [`nodal`] - Conductance matrix assembly and solving
//! - [`format`] - Human-readable resistance values
//!
//! ## Usage
//!
//! ### Library
//!
//! ```
//! use ohmnet::Network;
//!
//! let net = Network::from_edges([("a", "b", 4.0), ("b", "c", 6.0), ("a", "c", 15.0)]);
//! let a = net.find_node("a").unwrap();
//! let c = net.find_node("c").unwrap();
//! let ohms = ohmnet::reduce(&net, a, c).unwrap();
//! assert!((ohms - 6.0).abs() < 1e-12);
//! ```
//!
//! ### Native CLI
//!
//! ```bash
//! ohmnet divider.net --pretty --steps
//! ```
//!
//! ## Reduction Method
//!
//! Each pass over the network:
//!
//! 1. Merges every group of parallel resistors: `1 / Σ(1/Rᵢ)`
//! 2. Eliminates every non-terminal node with two resistors: `R1 + R2`
//! 3. Prunes self-loops and dangling nodes, which carry no current
//!
//! until only the two terminals joined by one resistor remain. A network
//! that stops short of that (a bridge) is reported as
//! [`ReduceError::IrreducibleTopology`]; [`nodal::equivalent_resistance`]
//! solves any connected network.

pub mod dsl;
pub mod error;
pub mod format;
pub mod network;
pub mod nodal;
pub mod reduce;

// Re-export main types for convenience
pub use error::{ReduceError, Result};
pub use network::{Network, NodeId, Terminals};
pub use reduce::{reduce, ReduceConfig, Reducer};

// WASM bindings
#[cfg(feature = "wasm")]
mod wasm;
