//! Resistor network structure.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::types::{Edge, EdgeId, NodeId, Terminals};
use crate::dsl::NetlistAst;
use crate::error::{ReduceError, Result};

/// An undirected multigraph of resistors.
///
/// Nodes map to the ids of their incident edges; edges own their endpoints,
/// resistance and label. Parallel resistors are separate edges until merged.
/// Node names stay resolvable after a node has been removed so that reduction
/// steps can still be described.
#[derive(Debug, Clone, Default)]
pub struct Network {
    /// Mapping from node names to node IDs
    node_map: HashMap<String, NodeId>,

    /// Reverse mapping from node IDs to names
    node_names: Vec<String>,

    /// Incident edge ids of every live node (a self-loop appears twice)
    adjacency: BTreeMap<NodeId, Vec<EdgeId>>,

    /// All live edges
    edges: BTreeMap<EdgeId, Edge>,

    next_edge: usize,
}

impl Network {
    /// Create an empty network.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a network from `(node, node, ohms)` triples.
    ///
    /// Edges are labelled `R1`, `R2`, ... in iteration order.
    pub fn from_edges<N, I>(edges: I) -> Self
    where
        N: ToString,
        I: IntoIterator<Item = (N, N, f64)>,
    {
        let mut network = Self::new();
        for (idx, (a, b, resistance)) in edges.into_iter().enumerate() {
            let a = network.add_node(a.to_string());
            let b = network.add_node(b.to_string());
            network.add_edge(a, b, resistance, format!("R{}", idx + 1));
        }
        network
    }

    /// Build a network from a parsed netlist.
    pub fn from_ast(ast: &NetlistAst) -> Result<Self> {
        let mut network = Self::new();

        for node_name in &ast.nodes {
            network.add_node(node_name.clone());
        }

        for def in &ast.resistors {
            let nodes = def
                .nodes
                .iter()
                .map(|name| {
                    network
                        .find_node(name)
                        .ok_or_else(|| ReduceError::unknown_node(name.clone()))
                })
                .collect::<Result<Vec<_>>>()?;

            // the parser only produces two-terminal resistors
            debug_assert_eq!(nodes.len(), 2, "resistor {} is not two-terminal", def.name);
            network.add_edge(nodes[0], nodes[1], def.value, def.name.clone());
        }

        Ok(network)
    }

    /// Add a node, or return the existing id for `name`.
    ///
    /// A removed node that is added again comes back with its old id.
    pub fn add_node(&mut self, name: impl Into<String>) -> NodeId {
        let name = name.into();
        let id = match self.node_map.get(&name) {
            Some(&id) => id,
            None => {
                let id = NodeId(self.node_names.len());
                self.node_map.insert(name.clone(), id);
                self.node_names.push(name);
                id
            }
        };
        self.adjacency.entry(id).or_default();
        id
    }

    /// Add a resistor between two live nodes.
    ///
    /// No validation happens here; see
    /// [`validate_network`](super::validate_network).
    pub fn add_edge(
        &mut self,
        a: NodeId,
        b: NodeId,
        resistance: f64,
        label: impl Into<String>,
    ) -> EdgeId {
        let id = EdgeId(self.next_edge);
        self.next_edge += 1;

        self.adjacency.entry(a).or_default().push(id);
        self.adjacency.entry(b).or_default().push(id);
        self.edges.insert(
            id,
            Edge {
                id,
                nodes: [a, b],
                resistance,
                label: label.into(),
            },
        );
        id
    }

    /// Remove an edge, detaching it from both endpoints.
    pub fn remove_edge(&mut self, id: EdgeId) -> Option<Edge> {
        let edge = self.edges.remove(&id)?;
        for node in edge.nodes {
            if let Some(incident) = self.adjacency.get_mut(&node) {
                incident.retain(|&e| e != id);
            }
        }
        Some(edge)
    }

    /// Remove a node together with its incident edges.
    ///
    /// Returns the removed edges in id order.
    pub fn remove_node(&mut self, node: NodeId) -> Vec<Edge> {
        let Some(mut incident) = self.adjacency.remove(&node) else {
            return Vec::new();
        };
        incident.sort();
        incident.dedup();

        let mut removed = Vec::with_capacity(incident.len());
        for id in incident {
            if let Some(edge) = self.edges.remove(&id) {
                let other = edge.other(node);
                if let Some(list) = self.adjacency.get_mut(&other) {
                    list.retain(|&e| e != id);
                }
                removed.push(edge);
            }
        }
        removed
    }

    /// Find a node ID by name.
    pub fn find_node(&self, name: &str) -> Option<NodeId> {
        self.node_map
            .get(name)
            .copied()
            .filter(|id| self.contains_node(*id))
    }

    /// Resolve a terminal by name.
    pub fn terminal(&self, name: &str) -> Result<NodeId> {
        self.find_node(name)
            .ok_or_else(|| ReduceError::unknown_node(name))
    }

    /// Resolve both terminals by name.
    pub fn terminals(&self, source: &str, target: &str) -> Result<Terminals> {
        Ok(Terminals::new(self.terminal(source)?, self.terminal(target)?))
    }

    /// Get the name of a node, live or removed.
    pub fn node_name(&self, node: NodeId) -> &str {
        self.node_names
            .get(node.0)
            .map(String::as_str)
            .unwrap_or("?")
    }

    /// Check if a node is present (not yet eliminated).
    pub fn contains_node(&self, node: NodeId) -> bool {
        self.adjacency.contains_key(&node)
    }

    /// Number of incident edge ends; a self-loop counts twice.
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency.get(&node).map_or(0, Vec::len)
    }

    /// Iterate over the distinct edges incident to `node`, in id order.
    pub fn incident_edges(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        let mut ids = self.adjacency.get(&node).cloned().unwrap_or_default();
        ids.sort();
        ids.dedup();
        ids.into_iter().filter_map(move |id| self.edges.get(&id))
    }

    /// Get an edge by ID.
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    /// Iterate over all live edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = &Edge> + '_ {
        self.edges.values()
    }

    /// Iterate over all live nodes in id order.
    pub fn nodes(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.adjacency.keys().copied()
    }

    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Collect the nodes reachable from `start`, including `start` itself.
    pub fn component_of(&self, start: NodeId) -> BTreeSet<NodeId> {
        let mut seen = BTreeSet::new();
        if !self.contains_node(start) {
            return seen;
        }

        let mut stack = vec![start];
        while let Some(node) = stack.pop() {
            if !seen.insert(node) {
                continue;
            }
            stack.extend(
                self.incident_edges(node)
                    .map(|e| e.other(node))
                    .filter(|n| !seen.contains(n)),
            );
        }
        seen
    }

    /// Check if a path exists between `a` and `b`.
    pub fn is_connected(&self, a: NodeId, b: NodeId) -> bool {
        self.component_of(a).contains(&b)
    }
}
