//! Cavern route-planning library entry points.
//!
//! This crate plans routes for an agent moving through a graph-shaped cavern
//! in two phases:
//! - exploration, where the graph is discovered node by node and the agent
//!   follows distance-to-target hints ([`explore`]);
//! - escape, where the whole graph is known and the agent must reach the exit
//!   within a time budget while collecting as much reward as possible
//!   ([`escape`]).
//!
//! Both phases share one shortest-path search written against the
//! [`NodeGraph`] abstraction. The simulation harness that owns the cavern is
//! external; it plugs in through [`ExplorationEnvironment`] and
//! [`EscapeEnvironment`].
//!

#![deny(warnings)]

pub mod config;
pub mod diversion;
pub mod error;
pub mod escape;
pub mod explore;
pub mod explorer;
pub mod metrics;
pub mod node;
pub mod path;
pub mod route;

pub use config::{EscapeConfig, ExploreConfig, StrategyConfig};
pub use diversion::{augment, rank_diversions, reachable_from, Diversion, ReachabilityMap};
pub use error::{Error, Result};
pub use escape::{
    top_value_nodes, EscapeEnvironment, EscapeMap, EscapePlan, EscapeStrategy, KnownNode, Terrain,
    TopNDiversionEscape,
};
pub use explore::{
    BestNodeExplore, DiscoveredNode, ExplorationEnvironment, ExploreGraph, ExploreStrategy,
    NodeStatus,
};
pub use explorer::Explorer;
pub use metrics::{path_length, path_value};
pub use node::{GraphNode, GridPosition, NodeGraph, NodeId, RewardGraph};
pub use path::{find_shortest_path, shortest_distances};
pub use route::build_route;
