//! Network validation.

use crate::error::{ReduceError, Result};

use super::{Network, Terminals};

/// Validate a network and its terminals for reduction.
///
/// Checks, in order:
/// - The network has at least one resistor
/// - Every resistance is positive and finite
/// - Both terminals exist and are distinct
/// - A path connects the terminals
pub fn validate_network(network: &Network, terminals: Terminals) -> Result<()> {
    if network.is_empty() {
        return Err(ReduceError::EmptyNetwork);
    }

    if let Some(edge) = network
        .edges()
        .find(|e| !e.has_valid_resistance())
    {
        return Err(ReduceError::InvalidWeight {
            edge: edge.label.clone(),
            resistance: edge.resistance,
        });
    }

    for node in [terminals.source, terminals.target] {
        if !network.contains_node(node) {
            return Err(ReduceError::unknown_node(network.node_name(node)));
        }
    }

    if terminals.source == terminals.target {
        return Err(ReduceError::SameTerminal {
            node: network.node_name(terminals.source).to_string(),
        });
    }

    if !network.is_connected(terminals.source, terminals.target) {
        return Err(ReduceError::Disconnected {
            source_node: network.node_name(terminals.source).to_string(),
            target_node: network.node_name(terminals.target).to_string(),
        });
    }

    Ok(())
}
