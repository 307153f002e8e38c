//! Exploration phase: the cavern is discovered one node at a time and the
//! agent only sees its immediate neighbours plus a distance-to-target hint
//! for each of them.

mod strategy;

pub use strategy::{BestNodeExplore, ExploreStrategy};

use std::collections::{BTreeSet, HashMap};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::{GraphNode, NodeGraph, NodeId};

/// What the environment reveals about a neighbouring node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NodeStatus {
    pub id: NodeId,
    pub distance_to_target: u64,
}

impl NodeStatus {
    pub fn new(id: NodeId, distance_to_target: u64) -> Self {
        Self {
            id,
            distance_to_target,
        }
    }
}

/// State of the exploration phase as exposed by the simulation harness.
pub trait ExplorationEnvironment {
    fn current_location(&self) -> NodeId;

    /// Estimated distance from the current location to the target; 0 on arrival.
    fn distance_to_target(&self) -> u64;

    /// Nodes adjacent to the current location.
    fn neighbours(&self) -> Vec<NodeStatus>;

    /// Move to an adjacent node.
    fn move_to(&mut self, node: NodeId) -> Result<()>;
}

/// A node discovered during exploration.
///
/// The neighbour set only holds what has been seen so far and may be
/// incomplete until the node is visited. Every edge costs 1.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiscoveredNode {
    id: NodeId,
    distance_to_target: u64,
    neighbours: BTreeSet<NodeId>,
}

impl DiscoveredNode {
    pub fn new(id: NodeId, distance_to_target: u64) -> Self {
        Self {
            id,
            distance_to_target,
            neighbours: BTreeSet::new(),
        }
    }

    pub fn distance_to_target(&self) -> u64 {
        self.distance_to_target
    }
}

impl GraphNode for DiscoveredNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn neighbours(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.neighbours.iter().copied()
    }

    fn cost_to(&self, neighbour: NodeId) -> Option<u64> {
        self.neighbours.contains(&neighbour).then_some(1)
    }
}

/// Graph of the nodes discovered so far in one exploration run.
///
/// Edges are only ever added. Every registered node except the origin starts
/// out unvisited.
#[derive(Debug, Clone)]
pub struct ExploreGraph {
    origin: NodeId,
    nodes: HashMap<NodeId, DiscoveredNode>,
    unvisited: BTreeSet<NodeId>,
}

impl ExploreGraph {
    /// Start a graph for a run beginning at `origin`.
    pub fn new(origin: NodeId) -> Self {
        Self {
            origin,
            nodes: HashMap::new(),
            unvisited: BTreeSet::new(),
        }
    }

    pub fn origin(&self) -> NodeId {
        self.origin
    }

    /// Register a node, keeping the existing one if `id` is already known.
    pub fn register(&mut self, id: NodeId, distance_to_target: u64) -> NodeId {
        if !self.nodes.contains_key(&id) {
            self.nodes
                .insert(id, DiscoveredNode::new(id, distance_to_target));
            if id != self.origin {
                self.unvisited.insert(id);
            }
        }
        id
    }

    /// Register every revealed neighbour of `base` and link it to `base`.
    pub fn add_neighbours(&mut self, base: NodeId, neighbours: &[NodeStatus]) {
        for status in neighbours {
            self.register(status.id, status.distance_to_target);
            self.connect(base, status.id);
        }
    }

    /// Link two registered nodes with an undirected edge.
    pub fn connect(&mut self, a: NodeId, b: NodeId) {
        if !(self.nodes.contains_key(&a) && self.nodes.contains_key(&b)) {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&a) {
            node.neighbours.insert(b);
        }
        if let Some(node) = self.nodes.get_mut(&b) {
            node.neighbours.insert(a);
        }
    }

    /// Mark `id` as visited.
    pub fn visit(&mut self, id: NodeId) {
        self.unvisited.remove(&id);
    }

    pub fn is_visited(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id) && !self.unvisited.contains(&id)
    }

    /// Nodes seen but not yet visited, in ascending id order.
    pub fn unvisited(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.unvisited.iter().copied()
    }
}

impl NodeGraph for ExploreGraph {
    type Node = DiscoveredNode;

    fn node(&self, id: NodeId) -> Option<&DiscoveredNode> {
        self.nodes.get(&id)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}
