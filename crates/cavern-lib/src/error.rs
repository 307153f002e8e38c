use thiserror::Error;

use crate::node::NodeId;

/// Convenient result alias for the cavern routing library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Raised when no route could be found between two nodes.
    #[error("no route found between node {start} and node {goal}")]
    RouteNotFound { start: NodeId, goal: NodeId },

    /// Raised when a node id is not present in the graph being queried.
    #[error("unknown node id: {id}")]
    UnknownNode { id: NodeId },

    /// Raised when two consecutive nodes of a path are not adjacent.
    #[error("no edge between node {from} and node {to}")]
    MissingEdge { from: NodeId, to: NodeId },

    /// Raised when exploration runs out of unvisited nodes before reaching the target.
    #[error("exploration exhausted every reachable node without finding the target (stuck at {location})")]
    ExplorationExhausted { location: NodeId },

    /// Raised when exploration exceeds its configured step bound.
    #[error("exploration exceeded the step limit of {limit}")]
    StepLimitExceeded { limit: usize },

    /// Raised by an environment when a move is not permitted.
    #[error("illegal move from node {from} to node {to}")]
    IllegalMove { from: NodeId, to: NodeId },

    /// Raised by an environment when there is no reward to collect.
    #[error("no reward to collect at node {node}")]
    NothingToCollect { node: NodeId },

    /// Raised when strategy configuration fails validation.
    #[error("invalid configuration: {message}")]
    InvalidConfig { message: String },
}
