//! Side-trip insertion for escape routes.
//!
//! A diversion is a round trip that leaves a base route at an *anchor* node,
//! visits one rewarding node nearby, and returns to the same anchor. Candidate
//! diversions are ranked by value per unit of length and inserted greedily
//! while they still fit in the remaining time.

use std::cmp::Ordering;
use std::collections::{BTreeMap, HashSet};

use crate::error::Result;
use crate::metrics::{path_length, path_value};
use crate::node::{GraphNode, NodeGraph, NodeId, RewardGraph};
use crate::route::build_route;

/// Nodes reachable from a base path, each mapped to the base-path node it is
/// anchored to.
pub type ReachabilityMap = BTreeMap<NodeId, NodeId>;

/// Discover every node within `depth` hops of `base_path`.
///
/// Nodes on the base path are never included. Every discovered node inherits
/// the anchor of the node it was discovered from, so each entry points back
/// at a node of `base_path`. Depth counts hops, not edge cost.
pub fn reachable_from<G: NodeGraph>(graph: &G, base_path: &[NodeId], depth: usize) -> ReachabilityMap {
    let mut seen: HashSet<NodeId> = base_path.iter().copied().collect();
    let mut anchors = ReachabilityMap::new();
    let mut previous_level: Vec<NodeId> = base_path.to_vec();

    for _ in 0..depth {
        let mut level = Vec::new();
        for &node_id in &previous_level {
            let anchor = anchors.get(&node_id).copied().unwrap_or(node_id);
            let Some(node) = graph.node(node_id) else {
                continue;
            };
            for neighbour in node.neighbours() {
                if seen.insert(neighbour) {
                    anchors.insert(neighbour, anchor);
                    level.push(neighbour);
                }
            }
        }

        if level.is_empty() {
            break;
        }
        previous_level = level;
    }

    anchors
}

/// Candidate round trip from an anchor to a rewarding node and back.
#[derive(Debug, Clone, PartialEq)]
pub struct Diversion {
    pub anchor: NodeId,
    pub target: NodeId,
    /// Full round trip, starting and ending at `anchor`.
    pub path: Vec<NodeId>,
    pub length: u64,
    /// Reward on the round trip not already on the base path.
    pub value: u64,
}

impl Diversion {
    /// Reward gained per unit of length.
    pub fn density(&self) -> f64 {
        if self.length == 0 {
            return if self.value > 0 { f64::INFINITY } else { 0.0 };
        }
        self.value as f64 / self.length as f64
    }
}

/// Build every candidate diversion within `depth` hops of `base_path`, ranked
/// by value density (best first).
pub fn rank_diversions<G: RewardGraph>(
    graph: &G,
    base_path: &[NodeId],
    depth: usize,
) -> Result<Vec<Diversion>> {
    let reachable = reachable_from(graph, base_path, depth);

    let mut diversions = Vec::new();
    for (&target, &anchor) in &reachable {
        if graph.reward(target) == 0 {
            continue;
        }
        let path = build_route(graph, anchor, &[target], anchor)?;
        let length = path_length(graph, &path)?;
        let value = path_value(graph, &path, base_path);
        diversions.push(Diversion {
            anchor,
            target,
            path,
            length,
            value,
        });
    }

    // Stable sort keeps ascending target order among equal densities.
    diversions.sort_by(|a, b| compare_density(b.density(), a.density()));
    Ok(diversions)
}

/// Insert profitable diversions into `base_path` without spending more than
/// `time_budget`.
///
/// Diversions are considered best-density first. One is accepted when its
/// length fits the time still unspent and it adds reward to the route built
/// so far; its nodes are spliced in right after the first occurrence of its
/// anchor. The result is never longer than the base path plus `time_budget`.
pub fn augment<G: RewardGraph>(
    graph: &G,
    base_path: &[NodeId],
    depth: usize,
    time_budget: u64,
) -> Result<Vec<NodeId>> {
    let mut augmented = base_path.to_vec();
    if base_path.is_empty() || depth == 0 || time_budget == 0 {
        return Ok(augmented);
    }

    let mut remaining = time_budget;
    for diversion in rank_diversions(graph, base_path, depth)? {
        if diversion.length > remaining {
            continue;
        }
        if path_value(graph, &diversion.path, &augmented) == 0 {
            continue;
        }
        let Some(position) = augmented.iter().position(|&node| node == diversion.anchor) else {
            continue;
        };

        let insert_at = position + 1;
        augmented.splice(insert_at..insert_at, diversion.path[1..].iter().copied());
        remaining -= diversion.length;
        tracing::trace!(
            node = diversion.target,
            anchor = diversion.anchor,
            length = diversion.length,
            remaining,
            "inserted diversion"
        );
    }

    Ok(augmented)
}

fn compare_density(a: f64, b: f64) -> Ordering {
    a.total_cmp(&b)
}
