//! Local rewrite rules.
//!
//! Every rule works in two phases: candidates are collected from a snapshot
//! of the network, then applied one by one in [`CandidateOrder`]. Rules whose
//! candidates can interfere (series elimination, dangling pruning) re-check
//! each candidate against the current network right before applying it.

use std::collections::BTreeMap;

use super::order::CandidateOrder;
use super::step::ReductionStep;
use crate::network::{Edge, EdgeId, Network, NodeId, Terminals};

/// Equivalent resistance of resistors in parallel: `1 / Σ(1/Rᵢ)`.
///
/// Evaluated as `Rmin / Σ(Rmin/Rᵢ)`: every term lies in `(0, 1]`, so no
/// reciprocal of a tiny resistance overflows.
pub fn parallel_resistance(values: impl IntoIterator<Item = f64>) -> f64 {
    let values: Vec<f64> = values.into_iter().collect();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    min / values.iter().map(|r| min / r).sum::<f64>()
}

/// Equivalent resistance of two resistors in series.
pub fn series_resistance(r1: f64, r2: f64) -> f64 {
    r1 + r2
}

/// Replace every group of parallel resistors with a single resistor.
///
/// Groups are disjoint, so no candidate can be invalidated by another.
/// Applying the rule to its own output changes nothing.
pub fn merge_parallel(network: &mut Network, order: &CandidateOrder) -> Vec<ReductionStep> {
    let mut groups: BTreeMap<(NodeId, NodeId), Vec<EdgeId>> = BTreeMap::new();
    for edge in network.edges().filter(|e| !e.is_self_loop()) {
        groups.entry(edge.key()).or_default().push(edge.id);
    }
    groups.retain(|_, ids| ids.len() >= 2);

    let mut pairs: Vec<_> = groups.keys().copied().collect();
    order.sort_pairs(&mut pairs);

    let mut steps = Vec::with_capacity(pairs.len());
    for (a, b) in pairs {
        let merged: Vec<Edge> = groups[&(a, b)]
            .iter()
            .filter_map(|&id| network.remove_edge(id))
            .collect();

        let resistance = parallel_resistance(merged.iter().map(|e| e.resistance));
        let label = compose_label(&merged, "||");
        let result = insert_edge(network, a, b, resistance, label);
        steps.push(ReductionStep::Parallel { merged, result });
    }
    steps
}

/// Eliminate every non-terminal node joined to exactly two other nodes by
/// exactly two resistors.
///
/// The new resistor may duplicate an existing one; it is left for the next
/// [`merge_parallel`] call.
pub fn eliminate_series(
    network: &mut Network,
    terminals: Terminals,
    order: &CandidateOrder,
) -> Vec<ReductionStep> {
    let mut candidates: Vec<NodeId> = network
        .nodes()
        .filter(|&n| series_pair(network, terminals, n).is_some())
        .collect();
    order.sort_nodes(&mut candidates);

    let mut steps = Vec::new();
    for node in candidates {
        // an earlier elimination may have changed this node's neighborhood
        let Some([e1, e2]) = series_pair(network, terminals, node) else {
            continue;
        };
        network.remove_node(node);

        let (a, b) = (e1.other(node), e2.other(node));
        let merged = [e1, e2];
        let resistance = series_resistance(merged[0].resistance, merged[1].resistance);
        let label = compose_label(&merged, "+");
        let result = insert_edge(network, a, b, resistance, label);
        steps.push(ReductionStep::Series {
            node,
            merged,
            result,
        });
    }
    steps
}

/// Remove self-loops and non-terminal nodes with at most one resistor.
///
/// Neither carries current, so the equivalent resistance is unaffected.
/// Nodes left dangling by this call are removed by the next one.
pub fn prune_dangling(
    network: &mut Network,
    terminals: Terminals,
    order: &CandidateOrder,
) -> Vec<ReductionStep> {
    let mut steps = Vec::new();

    let loops: Vec<EdgeId> = network
        .edges()
        .filter(|e| e.is_self_loop())
        .map(|e| e.id)
        .collect();
    for id in loops {
        if let Some(removed) = network.remove_edge(id) {
            steps.push(ReductionStep::SelfLoop { removed });
        }
    }

    let mut candidates: Vec<NodeId> = network
        .nodes()
        .filter(|&n| is_dangling(network, terminals, n))
        .collect();
    order.sort_nodes(&mut candidates);

    for node in candidates {
        if !is_dangling(network, terminals, node) {
            continue;
        }
        let removed = network.remove_node(node);
        steps.push(ReductionStep::Dangling { node, removed });
    }
    steps
}

/// Remove every node outside the terminals' connected component.
pub fn prune_detached(network: &mut Network, terminals: Terminals) -> Option<ReductionStep> {
    let component = network.component_of(terminals.source);
    let detached: Vec<NodeId> = network.nodes().filter(|n| !component.contains(n)).collect();
    if detached.is_empty() {
        return None;
    }

    let mut removed = Vec::new();
    for &node in &detached {
        removed.extend(network.remove_node(node));
    }
    Some(ReductionStep::Detached {
        nodes: detached,
        removed,
    })
}

/// The two resistors of a series candidate, in id order.
fn series_pair(network: &Network, terminals: Terminals, node: NodeId) -> Option<[Edge; 2]> {
    if terminals.contains(node) || network.degree(node) != 2 {
        return None;
    }

    let mut incident = network.incident_edges(node);
    let (e1, e2) = (incident.next()?, incident.next()?);
    if e1.is_self_loop() || e2.is_self_loop() || e1.other(node) == e2.other(node) {
        return None;
    }
    Some([e1.clone(), e2.clone()])
}

fn is_dangling(network: &Network, terminals: Terminals, node: NodeId) -> bool {
    !terminals.contains(node) && network.contains_node(node) && network.degree(node) <= 1
}

fn compose_label(edges: &[Edge], op: &str) -> String {
    let parts: Vec<&str> = edges.iter().map(|e| e.label.as_str()).collect();
    format!("({})", parts.join(op))
}

fn insert_edge(network: &mut Network, a: NodeId, b: NodeId, resistance: f64, label: String) -> Edge {
    let id = network.add_edge(a, b, resistance, label.clone());
    Edge {
        id,
        nodes: [a, b],
        resistance,
        label,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn terminals(net: &Network, s: &str, t: &str) -> Terminals {
        net.terminals(s, t).unwrap()
    }

    #[test]
    fn test_combination_laws() {
        assert_relative_eq!(series_resistance(4.0, 6.0), 10.0);
        assert_relative_eq!(parallel_resistance([4.0, 6.0]), 2.4);
        assert_relative_eq!(parallel_resistance([3.0, 3.0, 3.0]), 1.0);
        assert_relative_eq!(parallel_resistance([7.5]), 7.5);
    }

    #[test]
    fn test_parallel_of_extreme_values() {
        // 1/1e-310 is infinite; the scaled form keeps the smaller resistor
        assert_eq!(parallel_resistance([1e-310, 1.0]), 1e-310);
        assert_relative_eq!(parallel_resistance([1e300, 1e300]), 5e299);
    }

    #[test]
    fn test_merge_parallel() {
        let mut net = Network::from_edges([("a", "b", 4.0), ("b", "a", 6.0), ("b", "c", 1.0)]);
        let steps = merge_parallel(&mut net, &CandidateOrder::Ascending);

        assert_eq!(steps.len(), 1);
        assert_eq!(net.edge_count(), 2);
        let merged = steps[0].result().unwrap();
        assert_relative_eq!(merged.resistance, 2.4);
        assert_eq!(merged.label, "(R1||R2)");
    }

    #[test]
    fn test_merge_parallel_is_idempotent() {
        let mut net = Network::from_edges([
            ("a", "b", 4.0),
            ("a", "b", 6.0),
            ("a", "b", 12.0),
            ("b", "c", 1.0),
            ("c", "b", 1.0),
        ]);
        let first = merge_parallel(&mut net, &CandidateOrder::Ascending);
        assert_eq!(first.len(), 2);

        let snapshot: Vec<Edge> = net.edges().cloned().collect();
        let second = merge_parallel(&mut net, &CandidateOrder::Ascending);
        assert!(second.is_empty());
        assert_eq!(net.edges().cloned().collect::<Vec<_>>(), snapshot);
    }

    #[test]
    fn test_eliminate_series_chain() {
        // a - m1 - m2 - b: both middle nodes go in one batch
        let mut net = Network::from_edges([("a", "m1", 1.0), ("m1", "m2", 2.0), ("m2", "b", 3.0)]);
        let t = terminals(&net, "a", "b");
        let steps = eliminate_series(&mut net, t, &CandidateOrder::Ascending);

        assert_eq!(steps.len(), 2);
        assert_eq!(net.node_count(), 2);
        assert_eq!(net.edge_count(), 1);
        let edge = net.edges().next().unwrap();
        assert_relative_eq!(edge.resistance, 6.0);
        assert!(edge.connects(t.source, t.target));
    }

    #[test]
    fn test_eliminate_series_protects_terminals() {
        let mut net = Network::from_edges([("a", "b", 1.0), ("b", "c", 2.0)]);
        let t = terminals(&net, "a", "b");
        let b = t.target;
        // b has degree 2 but is a terminal; c dangles and is not a series node
        let steps = eliminate_series(&mut net, t, &CandidateOrder::Ascending);
        assert!(steps.is_empty());
        assert!(net.contains_node(b));
    }

    #[test]
    fn test_eliminate_series_skips_double_edge_to_one_neighbor() {
        let mut net = Network::from_edges([("a", "b", 1.0), ("b", "x", 2.0), ("x", "b", 3.0)]);
        let t = terminals(&net, "a", "b");
        assert!(eliminate_series(&mut net, t, &CandidateOrder::Ascending).is_empty());
    }

    #[test]
    fn test_prune_dangling() {
        let mut net = Network::from_edges([("a", "b", 1.0), ("b", "x", 2.0), ("x", "y", 3.0)]);
        let a = net.find_node("a").unwrap();
        net.add_edge(a, a, 9.0, "RL");
        let t = terminals(&net, "a", "b");

        let steps = prune_dangling(&mut net, t, &CandidateOrder::Ascending);
        // self-loop and y go first; x becomes dangling afterwards
        assert_eq!(steps.len(), 2);
        assert!(matches!(steps[0], ReductionStep::SelfLoop { .. }));
        assert!(net.find_node("y").is_none());

        let steps = prune_dangling(&mut net, t, &CandidateOrder::Ascending);
        assert_eq!(steps.len(), 1);
        assert!(net.find_node("x").is_none());
        assert_eq!(net.edge_count(), 1);

        assert!(prune_dangling(&mut net, t, &CandidateOrder::Ascending).is_empty());
    }

    #[test]
    fn test_prune_detached() {
        let mut net = Network::from_edges([("a", "b", 1.0), ("c", "d", 2.0), ("d", "e", 2.0)]);
        let t = terminals(&net, "a", "b");

        let step = prune_detached(&mut net, t).unwrap();
        assert!(matches!(step, ReductionStep::Detached { ref nodes, ref removed }
            if nodes.len() == 3 && removed.len() == 2));
        assert_eq!(net.node_count(), 2);
        assert!(prune_detached(&mut net, t).is_none());
    }
}
