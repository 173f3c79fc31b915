//! Resistor network representation and validation.
//!
//! This module provides the graph the reducer works on. The [`Network`]
//! struct is an explicit adjacency structure: every node maps to the ids of
//! its incident edges and every edge owns its endpoints, resistance and
//! label. All mutation goes through owned methods on the network.

mod graph;
mod types;
mod validate;

pub use graph::Network;
pub use types::*;
pub use validate::validate_network;
