use crate::config::ExploreConfig;
use crate::error::{Error, Result};
use crate::node::{NodeGraph, NodeId};
use crate::path::{find_shortest_path, shortest_distances};

use super::{ExplorationEnvironment, ExploreGraph};

/// Trait for exploration-phase strategies.
pub trait ExploreStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Move through `env` until the distance to the target reaches 0.
    fn explore(&self, env: &mut dyn ExplorationEnvironment) -> Result<()>;
}

/// Always head for the unvisited node with the lowest combined cost of
/// getting there and its estimated remaining distance to the target.
///
/// A candidate scores `hops + distance_weight * distance_to_target`, where
/// `hops` is the shortest known path from the current location. Equal scores
/// go to the lower node id.
#[derive(Debug, Clone, Default)]
pub struct BestNodeExplore {
    config: ExploreConfig,
}

impl BestNodeExplore {
    pub fn new(config: ExploreConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ExploreConfig {
        &self.config
    }

    /// Shortest path from `current` to the best unvisited node, or `None`
    /// when no unvisited node is reachable.
    pub fn next_path(&self, graph: &ExploreGraph, current: NodeId) -> Option<Vec<NodeId>> {
        let distances = shortest_distances(graph, current);
        let weight = self.config.distance_weight;

        let (best, score) = graph
            .unvisited()
            .filter_map(|id| {
                let hops = *distances.get(&id)?;
                let node = graph.node(id)?;
                let score = hops as f64 + weight * node.distance_to_target() as f64;
                Some((id, score))
            })
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        tracing::trace!(node = best, score, "next exploration target");
        find_shortest_path(graph, current, best)
    }
}

impl ExploreStrategy for BestNodeExplore {
    fn name(&self) -> &'static str {
        "best-node"
    }

    fn explore(&self, env: &mut dyn ExplorationEnvironment) -> Result<()> {
        let mut graph = ExploreGraph::new(env.current_location());
        let mut steps = 0usize;

        while env.distance_to_target() > 0 {
            let current = env.current_location();
            graph.register(current, env.distance_to_target());
            graph.visit(current);
            graph.add_neighbours(current, &env.neighbours());

            let path = self
                .next_path(&graph, current)
                .ok_or(Error::ExplorationExhausted { location: current })?;

            for &node in path.iter().skip(1) {
                if let Some(limit) = self.config.max_steps {
                    if steps >= limit {
                        return Err(Error::StepLimitExceeded { limit });
                    }
                }
                graph.visit(node);
                env.move_to(node)?;
                steps += 1;
            }
        }

        tracing::debug!(
            moves = steps,
            discovered = graph.node_count(),
            "reached target"
        );
        Ok(())
    }
}
