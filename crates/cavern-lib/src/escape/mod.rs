//! Escape phase: the full cavern is known and the agent must reach the exit
//! before time runs out, collecting as much reward as it can on the way.
//!
//! This module provides:
//! - [`Terrain`] and [`EscapeEnvironment`] - the contracts the simulation harness implements
//! - [`KnownNode`] - node representation for a fully known cavern
//! - [`EscapeMap`] - per-run registry holding one [`KnownNode`] per id
//! - [`TopNDiversionEscape`] - the escape heuristic (see [`strategy`])

mod strategy;

pub use strategy::{EscapePlan, EscapeStrategy, TopNDiversionEscape};

use std::collections::{BTreeMap, HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::node::{GraphNode, GridPosition, NodeGraph, NodeId, RewardGraph};

/// Read-only terrain queries available during the escape phase.
pub trait Terrain {
    /// Reward currently lying on `node`.
    fn reward(&self, node: NodeId) -> u64;

    /// Grid coordinates of `node`.
    fn position(&self, node: NodeId) -> GridPosition;

    /// Nodes adjacent to `node`.
    fn neighbours(&self, node: NodeId) -> Vec<NodeId>;

    /// Length of the edge between two adjacent nodes.
    fn edge_length(&self, from: NodeId, to: NodeId) -> Option<u64>;
}

/// State of the escape phase as exposed by the simulation harness.
pub trait EscapeEnvironment: Terrain {
    fn current_node(&self) -> NodeId;

    fn exit_node(&self) -> NodeId;

    fn time_remaining(&self) -> u64;

    /// Every node of the cavern.
    fn all_nodes(&self) -> Vec<NodeId>;

    /// Move to an adjacent node, spending the edge length in time.
    fn move_to(&mut self, node: NodeId) -> Result<()>;

    /// Pick up the reward on the current node.
    fn collect_reward(&mut self) -> Result<()>;
}

/// A node of a fully known cavern.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnownNode {
    pub id: NodeId,
    pub position: GridPosition,
    pub reward: u64,
    /// Edge length to each neighbour, keyed by neighbour id.
    #[serde(default)]
    pub edges: BTreeMap<NodeId, u64>,
}

impl KnownNode {
    pub fn new(id: NodeId, position: GridPosition, reward: u64) -> Self {
        Self {
            id,
            position,
            reward,
            edges: BTreeMap::new(),
        }
    }
}

impl GraphNode for KnownNode {
    fn id(&self) -> NodeId {
        self.id
    }

    fn neighbours(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.edges.keys().copied()
    }

    fn cost_to(&self, neighbour: NodeId) -> Option<u64> {
        self.edges.get(&neighbour).copied()
    }
}

/// Registry of the [`KnownNode`]s of one escape run.
///
/// Each id maps to exactly one node. A map is built fresh for every run and
/// rewards are captured when nodes are registered; collecting reward in the
/// environment afterwards does not change the map.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<KnownNode>", into = "Vec<KnownNode>")]
pub struct EscapeMap {
    nodes: HashMap<NodeId, KnownNode>,
}

impl EscapeMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot every node of `terrain` reachable through `nodes`.
    pub fn from_terrain<T: Terrain + ?Sized>(terrain: &T, nodes: &[NodeId]) -> Self {
        let mut map = Self::new();
        for &id in nodes {
            map.register(KnownNode::new(id, terrain.position(id), terrain.reward(id)));
        }
        for &id in nodes {
            for neighbour in terrain.neighbours(id) {
                if let Some(length) = terrain.edge_length(id, neighbour) {
                    map.add_edge(id, neighbour, length);
                }
            }
        }
        tracing::debug!(nodes = map.node_count(), "captured escape map");
        map
    }

    /// Register `node`, returning the canonical instance for its id.
    ///
    /// Registering an id that is already known keeps the existing node.
    pub fn register(&mut self, node: KnownNode) -> &KnownNode {
        self.nodes.entry(node.id).or_insert(node)
    }

    /// Connect two registered nodes with an undirected edge of `length`.
    pub fn connect(&mut self, a: NodeId, b: NodeId, length: u64) {
        self.add_edge(a, b, length);
        self.add_edge(b, a, length);
    }

    /// Edges are only recorded between registered nodes.
    fn add_edge(&mut self, from: NodeId, to: NodeId, length: u64) {
        if !self.nodes.contains_key(&to) {
            return;
        }
        if let Some(node) = self.nodes.get_mut(&from) {
            node.edges.insert(to, length);
        }
    }

    /// Iterate over every registered node, in no particular order.
    pub fn nodes(&self) -> impl Iterator<Item = &KnownNode> {
        self.nodes.values()
    }

    pub fn position(&self, id: NodeId) -> Option<GridPosition> {
        self.nodes.get(&id).map(|node| node.position)
    }
}

impl NodeGraph for EscapeMap {
    type Node = KnownNode;

    fn node(&self, id: NodeId) -> Option<&KnownNode> {
        self.nodes.get(&id)
    }

    fn node_count(&self) -> usize {
        self.nodes.len()
    }
}

impl RewardGraph for EscapeMap {
    fn reward(&self, id: NodeId) -> u64 {
        self.nodes.get(&id).map_or(0, |node| node.reward)
    }
}

impl From<Vec<KnownNode>> for EscapeMap {
    fn from(nodes: Vec<KnownNode>) -> Self {
        let mut map = Self::new();
        for node in nodes {
            map.register(node);
        }
        let known: HashSet<NodeId> = map.nodes.keys().copied().collect();
        for node in map.nodes.values_mut() {
            node.edges.retain(|to, _| known.contains(to));
        }
        map
    }
}

impl From<EscapeMap> for Vec<KnownNode> {
    fn from(map: EscapeMap) -> Self {
        let mut nodes: Vec<KnownNode> = map.nodes.into_values().collect();
        nodes.sort_by_key(|node| node.id);
        nodes
    }
}

/// The `n` nodes carrying the most reward, most valuable first.
///
/// Nodes without reward are never returned; equal rewards are ordered by
/// ascending id.
pub fn top_value_nodes(map: &EscapeMap, n: usize) -> Vec<NodeId> {
    let mut rewarding: Vec<&KnownNode> = map.nodes().filter(|node| node.reward > 0).collect();
    rewarding.sort_by(|a, b| b.reward.cmp(&a.reward).then_with(|| a.id.cmp(&b.id)));
    rewarding.into_iter().take(n).map(|node| node.id).collect()
}
