//! Processing order for reduction candidates.

use crate::network::NodeId;

/// The order in which candidate nodes and node pairs are rewritten within
/// one batch.
///
/// The equivalent resistance does not depend on the order; the intermediate
/// networks (and the recorded steps) do.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CandidateOrder {
    /// Lowest node id first
    #[default]
    Ascending,
    /// Highest node id first
    Descending,
    /// Nodes in the listed order first, then the remaining nodes by id
    Priority(Vec<NodeId>),
}

impl CandidateOrder {
    /// Sort key of a single node; smaller keys are processed first.
    pub fn rank(&self, node: NodeId) -> (usize, usize) {
        match self {
            Self::Ascending => (0, node.0),
            Self::Descending => (0, usize::MAX - node.0),
            Self::Priority(list) => match list.iter().position(|&n| n == node) {
                Some(pos) => (0, pos),
                None => (1, node.0),
            },
        }
    }

    /// Sort key of an unordered node pair: the better-ranked endpoint first.
    pub fn pair_rank(&self, a: NodeId, b: NodeId) -> ((usize, usize), (usize, usize)) {
        let (ra, rb) = (self.rank(a), self.rank(b));
        if ra <= rb {
            (ra, rb)
        } else {
            (rb, ra)
        }
    }

    pub fn sort_nodes(&self, nodes: &mut [NodeId]) {
        nodes.sort_by_key(|&n| self.rank(n));
    }

    pub fn sort_pairs(&self, pairs: &mut [(NodeId, NodeId)]) {
        pairs.sort_by_key(|&(a, b)| self.pair_rank(a, b));
    }
}
