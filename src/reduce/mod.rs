//! Series/parallel reduction of resistor networks.
//!
//! The reducer repeatedly applies two local rewrites until nothing changes:
//!
//! 1. **Parallel merge**: resistors sharing both endpoints become one
//!    resistor of `1 / Σ(1/Rᵢ)`.
//! 2. **Series elimination**: a non-terminal node with exactly two resistors
//!    is removed and its resistors become one of `R1 + R2`.
//!
//! Dead ends (self-loops, dangling nodes, parts not connected to the
//! terminals) carry no current and are pruned along the way.
//!
//! Both rewrites are confluent: the final resistance does not depend on the
//! order in which candidates are processed. [`CandidateOrder`] only fixes the
//! intermediate networks so runs are reproducible.
//!
//! When a pass changes nothing and more than the two terminals remain, the
//! network contains a bridge and [`ReduceError::IrreducibleTopology`] is
//! returned; see [`crate::nodal`] for a general solve.
//!
//! [`ReduceError::IrreducibleTopology`]: crate::error::ReduceError::IrreducibleTopology

mod order;
mod reducer;
mod rules;
mod step;

pub use order::CandidateOrder;
pub use reducer::{reduce, ReduceConfig, Reducer, Reduction};
pub use rules::{
    eliminate_series, merge_parallel, parallel_resistance, prune_dangling, prune_detached,
    series_resistance,
};
pub use step::ReductionStep;
