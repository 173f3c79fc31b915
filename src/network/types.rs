//! Core types for network representation.

use std::fmt;

/// A unique identifier for a junction in the network.
///
/// Ids are assigned in insertion order and never reused, so a node keeps its
/// id (and its name) even after it has been eliminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "N{}", self.0)
    }
}

/// A unique identifier for a resistor (edge) in the network.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub usize);

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A resistor between two nodes.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    /// Endpoints; order carries no meaning
    pub nodes: [NodeId; 2],
    /// Resistance in ohms
    pub resistance: f64,
    /// Resistor name, or a composed label for merged resistors
    pub label: String,
}

impl Edge {
    /// Get the endpoint opposite to `node`.
    ///
    /// For a self-loop this is `node` itself.
    pub fn other(&self, node: NodeId) -> NodeId {
        if self.nodes[0] == node {
            self.nodes[1]
        } else {
            self.nodes[0]
        }
    }

    /// Check if both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.nodes[0] == self.nodes[1]
    }

    /// Check if the edge joins `a` and `b`, in either direction.
    pub fn connects(&self, a: NodeId, b: NodeId) -> bool {
        (self.nodes[0] == a && self.nodes[1] == b) || (self.nodes[0] == b && self.nodes[1] == a)
    }

    /// Endpoints as an ordered pair `(min, max)`.
    pub fn key(&self) -> (NodeId, NodeId) {
        let [a, b] = self.nodes;
        if a <= b {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Check that the resistance is strictly positive and finite.
    pub fn has_valid_resistance(&self) -> bool {
        self.resistance.is_finite() && self.resistance > 0.0
    }

    /// Conductance in siemens.
    pub fn conductance(&self) -> f64 {
        1.0 / self.resistance
    }
}

/// The two nodes between which the equivalent resistance is measured.
///
/// Terminals are never eliminated or pruned during reduction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Terminals {
    pub source: NodeId,
    pub target: NodeId,
}

impl Terminals {
    pub fn new(source: NodeId, target: NodeId) -> Self {
        Self { source, target }
    }

    /// Check if `node` is one of the terminals.
    pub fn contains(&self, node: NodeId) -> bool {
        node == self.source || node == self.target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn edge(a: usize, b: usize) -> Edge {
        Edge {
            id: EdgeId(0),
            nodes: [NodeId(a), NodeId(b)],
            resistance: 100.0,
            label: "R1".to_string(),
        }
    }

    #[test]
    fn test_edge_is_undirected() {
        let e = edge(3, 1);
        assert_eq!(e.key(), (NodeId(1), NodeId(3)));
        assert!(e.connects(NodeId(1), NodeId(3)));
        assert!(e.connects(NodeId(3), NodeId(1)));
        assert_eq!(e.other(NodeId(3)), NodeId(1));
        assert_eq!(e.other(NodeId(1)), NodeId(3));
    }

    #[test]
    fn test_self_loop() {
        let e = edge(2, 2);
        assert!(e.is_self_loop());
        assert_eq!(e.other(NodeId(2)), NodeId(2));
        assert!((e.conductance() - 0.01).abs() < 1e-12);
    }

    #[test]
    fn test_valid_resistance() {
        let mut e = edge(0, 1);
        assert!(e.has_valid_resistance());
        for bad in [0.0, -1.0, f64::INFINITY, f64::NAN] {
            e.resistance = bad;
            assert!(!e.has_valid_resistance());
        }
    }

    #[test]
    fn test_terminals_contains() {
        let t = Terminals::new(NodeId(0), NodeId(4));
        assert!(t.contains(NodeId(0)));
        assert!(t.contains(NodeId(4)));
        assert!(!t.contains(NodeId(2)));
    }
}
