//! Length and value measurements over paths.

use std::collections::HashSet;

use crate::error::{Error, Result};
use crate::node::{NodeGraph, NodeId, RewardGraph};

/// Sum of the edge costs between consecutive nodes of `path`.
///
/// Paths with fewer than two nodes have length 0.
pub fn path_length<G: NodeGraph>(graph: &G, path: &[NodeId]) -> Result<u64> {
    path.windows(2).try_fold(0u64, |total, pair| {
        let (from, to) = (pair[0], pair[1]);
        graph
            .edge_cost(from, to)
            .map(|cost| total.saturating_add(cost))
            .ok_or(Error::MissingEdge { from, to })
    })
}

/// Reward still collectable along `path`.
///
/// Each distinct node counts once, and nodes listed in `already_taken`
/// contribute nothing.
pub fn path_value<G: RewardGraph>(graph: &G, path: &[NodeId], already_taken: &[NodeId]) -> u64 {
    let taken: HashSet<NodeId> = already_taken.iter().copied().collect();
    let unique: HashSet<NodeId> = path.iter().copied().collect();
    unique
        .into_iter()
        .filter(|node| !taken.contains(node))
        .map(|node| graph.reward(node))
        .sum()
}
