//! Node abstraction shared by the exploration and escape graphs.
//!
//! Search and route-building code is written once against [`NodeGraph`] and
//! [`GraphNode`]; the two phases provide their own node representations
//! ([`crate::escape::KnownNode`] and [`crate::explore::DiscoveredNode`]).

use serde::{Deserialize, Serialize};

/// Stable identity of a node. Never changes once a node has been created.
pub type NodeId = u64;

/// Grid coordinates of a node, used for straight-line distance estimates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GridPosition {
    pub row: i64,
    pub column: i64,
}

impl GridPosition {
    pub fn new(row: i64, column: i64) -> Self {
        Self { row, column }
    }

    /// Manhattan distance between two grid positions.
    pub fn manhattan_distance(&self, other: &GridPosition) -> u64 {
        self.row
            .abs_diff(other.row)
            .saturating_add(self.column.abs_diff(other.column))
    }
}

/// Capability contract every node representation satisfies.
pub trait GraphNode {
    /// Stable identity of this node.
    fn id(&self) -> NodeId;

    /// Identities of the nodes currently known to neighbour this one.
    ///
    /// Implementations yield neighbours in ascending id order so searches
    /// are reproducible.
    fn neighbours(&self) -> impl Iterator<Item = NodeId> + '_;

    /// Traversal cost to `neighbour`, or `None` when it is not adjacent.
    fn cost_to(&self, neighbour: NodeId) -> Option<u64>;
}

/// Registry resolving node identities to their single canonical instance.
pub trait NodeGraph {
    type Node: GraphNode;

    /// Return the node registered under `id`.
    fn node(&self, id: NodeId) -> Option<&Self::Node>;

    /// Number of registered nodes.
    fn node_count(&self) -> usize;

    /// Cost of the edge between `from` and `to`, if both exist and are adjacent.
    fn edge_cost(&self, from: NodeId, to: NodeId) -> Option<u64> {
        self.node(from).and_then(|node| node.cost_to(to))
    }
}

/// Graphs whose nodes carry a collectible reward.
pub trait RewardGraph: NodeGraph {
    /// Reward currently stored on `id`. Unknown ids carry no reward.
    fn reward(&self, id: NodeId) -> u64;
}
