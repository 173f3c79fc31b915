//! Fixed-point reduction driver.

use tracing::{debug, info, trace, warn};

use super::order::CandidateOrder;
use super::rules::{eliminate_series, merge_parallel, prune_dangling, prune_detached};
use super::step::ReductionStep;
use crate::error::{ReduceError, Result};
use crate::network::{validate_network, Network, NodeId, Terminals};

/// Configuration for the reducer.
#[derive(Debug, Clone, Default)]
pub struct ReduceConfig {
    /// Processing order of candidates within a batch.
    pub order: CandidateOrder,
    /// Whether to keep every applied rewrite in [`Reduction::steps`].
    pub record_steps: bool,
}

impl ReduceConfig {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the candidate processing order.
    pub fn with_order(mut self, order: CandidateOrder) -> Self {
        self.order = order;
        self
    }

    /// Record the applied rewrites.
    pub fn with_steps(mut self, record_steps: bool) -> Self {
        self.record_steps = record_steps;
        self
    }
}

/// Outcome of a successful reduction.
#[derive(Debug, Clone)]
pub struct Reduction {
    /// Equivalent resistance between the terminals, in ohms
    pub resistance: f64,
    /// Number of rewrite passes that changed the network
    pub passes: usize,
    /// Applied rewrites, in order (empty unless recording is enabled)
    pub steps: Vec<ReductionStep>,
    /// The fully reduced network: the two terminals and one resistor
    pub network: Network,
}

impl Reduction {
    /// Explain every recorded step in words.
    pub fn explain(&self) -> Vec<String> {
        self.steps.iter().map(|s| s.describe(&self.network)).collect()
    }
}

/// Series/parallel reducer.
///
/// The reducer never mutates the network it is given; it works on a copy.
#[derive(Debug, Clone, Default)]
pub struct Reducer {
    config: ReduceConfig,
}

impl Reducer {
    /// Create a reducer with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a reducer with custom configuration.
    pub fn with_config(config: ReduceConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ReduceConfig {
        &self.config
    }

    /// Reduce `network` to the equivalent resistance between `terminals`.
    ///
    /// Each pass merges parallel resistors, eliminates series nodes and
    /// prunes dead ends, until a pass changes nothing or only the two
    /// terminals joined by a single resistor remain.
    ///
    /// # Errors
    ///
    /// Validation errors from [`validate_network`],
    /// [`ReduceError::ResistanceOutOfRange`] when a combined resistance
    /// overflows or underflows, or [`ReduceError::IrreducibleTopology`]
    /// carrying the residual network when the rules alone cannot finish
    /// (a bridge).
    pub fn reduce(&self, network: &Network, terminals: Terminals) -> Result<Reduction> {
        validate_network(network, terminals)?;

        let order = &self.config.order;
        let mut work = network.clone();
        let mut steps = Vec::new();

        if let Some(step) = prune_detached(&mut work, terminals) {
            debug!(step = %step.describe(&work), "pruned detached nodes");
            if self.config.record_steps {
                steps.push(step);
            }
        }

        let mut passes = 0;
        while single_resistor(&work, terminals).is_none() {
            let mut batch = merge_parallel(&mut work, order);
            batch.extend(eliminate_series(&mut work, terminals, order));
            batch.extend(prune_dangling(&mut work, terminals, order));
            if batch.is_empty() {
                break;
            }
            if let Some(edge) = batch
                .iter()
                .filter_map(ReductionStep::result)
                .find(|e| !e.has_valid_resistance())
            {
                warn!(
                    edge = %edge.label,
                    resistance = edge.resistance,
                    "combined resistance out of range"
                );
                return Err(ReduceError::ResistanceOutOfRange {
                    edge: edge.label.clone(),
                    resistance: edge.resistance,
                });
            }

            passes += 1;
            for step in &batch {
                trace!(pass = passes, step = %step.describe(&work));
            }
            debug!(
                pass = passes,
                rewrites = batch.len(),
                nodes = work.node_count(),
                resistors = work.edge_count(),
                "reduction pass"
            );

            if self.config.record_steps {
                steps.extend(batch);
            }
        }

        let source_name = work.node_name(terminals.source).to_string();
        let target_name = work.node_name(terminals.target).to_string();

        match single_resistor(&work, terminals) {
            Some(resistance) => {
                info!(
                    source = %source_name,
                    target = %target_name,
                    resistance,
                    passes,
                    "network reduced"
                );
                Ok(Reduction {
                    resistance,
                    passes,
                    steps,
                    network: work,
                })
            }
            None => {
                warn!(
                    source = %source_name,
                    target = %target_name,
                    nodes = work.node_count(),
                    resistors = work.edge_count(),
                    "no series or parallel structure left"
                );
                Err(ReduceError::IrreducibleTopology {
                    source_node: source_name,
                    target_node: target_name,
                    residual: Box::new(work),
                })
            }
        }
    }
}

/// Reduce `network` between `source` and `target` with default settings.
///
/// The caller's network is left untouched.
pub fn reduce(network: &Network, source: NodeId, target: NodeId) -> Result<f64> {
    Reducer::new()
        .reduce(network, Terminals::new(source, target))
        .map(|r| r.resistance)
}

/// The resistance of the only resistor left, once nothing but the two
/// terminals remain.
fn single_resistor(network: &Network, terminals: Terminals) -> Option<f64> {
    if network.node_count() != 2 || network.edge_count() != 1 {
        return None;
    }
    network
        .edges()
        .next()
        .filter(|e| e.connects(terminals.source, terminals.target))
        .map(|e| e.resistance)
}
