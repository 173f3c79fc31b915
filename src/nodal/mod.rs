//! Nodal analysis of resistor networks.
//!
//! Series/parallel reduction cannot finish on a bridge. Nodal analysis
//! handles any connected network: hold the target at 0 V, inject 1 A into the
//! source and solve Kirchhoff's current law at every other node,
//!
//! ```text
//! G v = i
//! ```
//!
//! where G is the conductance matrix (one row per non-reference node), v the
//! node voltages and i the injected currents. The source voltage is then the
//! equivalent resistance in ohms.
//!
//! This is never used by the reducer itself; it is an independent reference
//! and an explicit fallback.

mod matrix;

pub use matrix::ConductanceMatrix;

use std::collections::HashMap;

use tracing::debug;

use crate::error::Result;
use crate::network::{validate_network, Network, NodeId, Terminals};

/// Current injected into the source terminal, in amperes.
const TEST_CURRENT: f64 = 1.0;

/// Compute the equivalent resistance between `terminals` by nodal analysis.
///
/// Nodes outside the terminals' connected component are ignored.
pub fn equivalent_resistance(network: &Network, terminals: Terminals) -> Result<f64> {
    validate_network(network, terminals)?;

    let component = network.component_of(terminals.source);
    let index: HashMap<NodeId, usize> = component
        .iter()
        .filter(|&&n| n != terminals.target)
        .enumerate()
        .map(|(i, &n)| (n, i))
        .collect();

    let mut matrix = ConductanceMatrix::new(index.len());
    for edge in network
        .edges()
        .filter(|e| component.contains(&e.nodes[0]) && !e.is_self_loop())
    {
        let n1 = index.get(&edge.nodes[0]).copied();
        let n2 = index.get(&edge.nodes[1]).copied();
        matrix.stamp_conductance(n1, n2, edge.conductance());
    }

    let source = index.get(&terminals.source).copied();
    matrix.stamp_current_source(None, source, TEST_CURRENT);

    debug!(size = matrix.size, "solving conductance matrix");
    matrix.factor()?;
    matrix.solve()?;

    Ok(matrix.voltage(source) / TEST_CURRENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReduceError;
    use approx::assert_relative_eq;

    #[test]
    fn test_series_and_parallel() {
        let net = Network::from_edges([("s", "a", 4.0), ("a", "t", 6.0), ("s", "t", 15.0)]);
        let t = net.terminals("s", "t").unwrap();
        assert_relative_eq!(equivalent_resistance(&net, t).unwrap(), 6.0, max_relative = 1e-12);
    }

    #[test]
    fn test_balanced_bridge() {
        // equal arms: no current in the bridge, R_eq = R
        let r = 220.0;
        let net = Network::from_edges([
            ("a", "c", r),
            ("a", "d", r),
            ("c", "b", r),
            ("d", "b", r),
            ("c", "d", r),
        ]);
        let t = net.terminals("a", "b").unwrap();
        assert_relative_eq!(equivalent_resistance(&net, t).unwrap(), r, max_relative = 1e-12);
    }

    #[test]
    fn test_unbalanced_bridge() {
        // 1 ohm everywhere except a 2 ohm arm; solved by hand: 13/11 ohm
        let net = Network::from_edges([
            ("a", "c", 1.0),
            ("a", "d", 1.0),
            ("c", "b", 1.0),
            ("d", "b", 2.0),
            ("c", "d", 1.0),
        ]);
        let t = net.terminals("a", "b").unwrap();
        assert_relative_eq!(
            equivalent_resistance(&net, t).unwrap(),
            13.0 / 11.0,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_very_large_resistances() {
        let net = Network::from_edges([("s", "t", 1e16)]);
        let t = net.terminals("s", "t").unwrap();
        assert_relative_eq!(equivalent_resistance(&net, t).unwrap(), 1e16, max_relative = 1e-12);

        let net = Network::from_edges([("s", "m", 2e15), ("m", "t", 2e15)]);
        let t = net.terminals("s", "t").unwrap();
        assert_relative_eq!(equivalent_resistance(&net, t).unwrap(), 4e15, max_relative = 1e-12);
    }

    #[test]
    fn test_ignores_detached_and_dangling() {
        let net = Network::from_edges([
            ("s", "t", 10.0),
            ("t", "x", 3.0),
            ("island", "far", 1.0),
        ]);
        let t = net.terminals("s", "t").unwrap();
        assert_relative_eq!(equivalent_resistance(&net, t).unwrap(), 10.0, max_relative = 1e-12);
    }

    #[test]
    fn test_validation_applies() {
        let net = Network::from_edges([("s", "a", 1.0), ("b", "t", 1.0)]);
        let t = net.terminals("s", "t").unwrap();
        assert!(matches!(
            equivalent_resistance(&net, t),
            Err(ReduceError::Disconnected { .. })
        ));
    }
}
