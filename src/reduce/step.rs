//! Record of the rewrites applied during a reduction.

use crate::format::format_ohms;
use crate::network::{Edge, Network, NodeId};

/// A single rewrite applied to the network.
#[derive(Debug, Clone, PartialEq)]
pub enum ReductionStep {
    /// Two or more resistors between the same pair of nodes were combined.
    Parallel { merged: Vec<Edge>, result: Edge },
    /// A non-terminal node with two resistors was eliminated.
    Series {
        node: NodeId,
        merged: [Edge; 2],
        result: Edge,
    },
    /// A non-terminal node with at most one resistor was removed.
    Dangling { node: NodeId, removed: Vec<Edge> },
    /// A resistor with both ends on the same node was removed.
    SelfLoop { removed: Edge },
    /// Nodes not connected to the terminals were removed.
    Detached {
        nodes: Vec<NodeId>,
        removed: Vec<Edge>,
    },
}

impl ReductionStep {
    /// The resistor produced by this step, if any.
    pub fn result(&self) -> Option<&Edge> {
        match self {
            Self::Parallel { result, .. } | Self::Series { result, .. } => Some(result),
            _ => None,
        }
    }

    /// Explain the step in words.
    ///
    /// `network` resolves node names; removed nodes keep their names, so
    /// either the input or the reduced network works.
    pub fn describe(&self, network: &Network) -> String {
        match self {
            Self::Parallel { merged, result } => {
                let [a, b] = result.nodes;
                format!(
                    "Parallel: {} = {} between '{}' and '{}'",
                    join(merged, " || "),
                    format_ohms(result.resistance),
                    network.node_name(a),
                    network.node_name(b),
                )
            }
            Self::Series { node, merged, result } => format!(
                "Series: {} = {}, eliminating node '{}'",
                join(merged, " + "),
                format_ohms(result.resistance),
                network.node_name(*node),
            ),
            Self::Dangling { node, removed } if removed.is_empty() => {
                format!("Dangling: removed isolated node '{}'", network.node_name(*node))
            }
            Self::Dangling { node, removed } => format!(
                "Dangling: removed node '{}' and {} (no current flows)",
                network.node_name(*node),
                join(removed, ", "),
            ),
            Self::SelfLoop { removed } => format!(
                "Self-loop: removed {} at node '{}'",
                describe_edge(removed),
                network.node_name(removed.nodes[0]),
            ),
            Self::Detached { nodes, removed } => format!(
                "Detached: removed {} nodes and {} resistors not connected to the terminals",
                nodes.len(),
                removed.len(),
            ),
        }
    }
}

fn describe_edge(edge: &Edge) -> String {
    format!("{} ({})", edge.label, format_ohms(edge.resistance))
}

fn join(edges: &[Edge], sep: &str) -> String {
    edges.iter().map(describe_edge).collect::<Vec<_>>().join(sep)
}
