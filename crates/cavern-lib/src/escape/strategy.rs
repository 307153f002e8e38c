//! Escape strategies.
//!
//! [`TopNDiversionEscape`] routes through as many of the most valuable nodes
//! as time allows, then tries diversions of increasing depth off that route and
//! keeps the most valuable result.

use serde::Serialize;

use crate::config::EscapeConfig;
use crate::diversion::augment;
use crate::error::{Error, Result};
use crate::metrics::{path_length, path_value};
use crate::node::NodeId;
use crate::route::build_route;

use super::{top_value_nodes, EscapeEnvironment, EscapeMap};

/// Trait for escape-phase strategies.
pub trait EscapeStrategy: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Drive `env` from the current node to the exit.
    fn escape(&self, env: &mut dyn EscapeEnvironment) -> Result<()>;
}

/// Route chosen for an escape run, before any move is made.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EscapePlan {
    pub start: NodeId,
    pub exit: NodeId,
    /// Every node visited in order, starting at `start` and ending at `exit`.
    pub steps: Vec<NodeId>,
    /// Total edge length of `steps`.
    pub length: u64,
    /// Reward collectable along `steps`.
    pub value: u64,
    /// Number of top-value waypoints the base route was built through.
    pub waypoints: usize,
    /// Diversion depth whose result was kept; `None` when diversions are disabled.
    pub depth: Option<usize>,
}

impl EscapePlan {
    /// Number of moves needed to follow the plan.
    pub fn move_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

/// Escape through the top-N most valuable nodes, plus greedy diversions.
#[derive(Debug, Clone, Default)]
pub struct TopNDiversionEscape {
    config: EscapeConfig,
}

struct BaseRoute {
    steps: Vec<NodeId>,
    length: u64,
    waypoints: usize,
}

impl TopNDiversionEscape {
    pub fn new(config: EscapeConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &EscapeConfig {
        &self.config
    }

    /// Compute the escape route for the current state of `env` without moving.
    pub fn plan(&self, env: &dyn EscapeEnvironment) -> Result<EscapePlan> {
        let map = EscapeMap::from_terrain(env, &env.all_nodes());
        self.plan_on(&map, env.current_node(), env.exit_node(), env.time_remaining())
    }

    /// Compute the escape route from `start` to `exit` within `time` on `map`.
    pub fn plan_on(
        &self,
        map: &EscapeMap,
        start: NodeId,
        exit: NodeId,
        time: u64,
    ) -> Result<EscapePlan> {
        let base = self.route_via_top_nodes(map, start, exit, time)?;

        let leftover = match time.checked_sub(base.length) {
            Some(leftover) => leftover,
            None => {
                tracing::warn!(
                    length = base.length,
                    time,
                    "direct route to exit does not fit in the remaining time"
                );
                0
            }
        };

        let (steps, depth) = self.best_diversions(map, &base.steps, leftover)?;
        let length = path_length(map, &steps)?;
        let value = path_value(map, &steps, &[]);

        tracing::debug!(
            moves = steps.len().saturating_sub(1),
            length,
            value,
            waypoints = base.waypoints,
            depth = ?depth,
            "escape plan ready"
        );

        Ok(EscapePlan {
            start,
            exit,
            steps,
            length,
            value,
            waypoints: base.waypoints,
            depth,
        })
    }

    /// Find the largest N whose route through the top-N nodes reaches the
    /// exit in time. Falls back to the direct route when nothing fits.
    fn route_via_top_nodes(
        &self,
        map: &EscapeMap,
        start: NodeId,
        exit: NodeId,
        time: u64,
    ) -> Result<BaseRoute> {
        let origin = map.position(start).ok_or(Error::UnknownNode { id: start })?;
        let rewarding = map.nodes().filter(|node| node.reward > 0).count();
        let max_n = self.config.max_waypoints.min(rewarding);

        for n in (1..=max_n).rev() {
            let mut waypoints = top_value_nodes(map, n);
            // Stable sort: equally distant nodes keep their reward order.
            waypoints.sort_by_key(|&id| {
                map.position(id)
                    .map_or(u64::MAX, |position| position.manhattan_distance(&origin))
            });

            let steps = build_route(map, start, &waypoints, exit)?;
            let length = path_length(map, &steps)?;
            if length <= time {
                tracing::debug!(waypoints = n, length, time, "route through top nodes fits");
                return Ok(BaseRoute {
                    steps,
                    length,
                    waypoints: n,
                });
            }
            tracing::trace!(waypoints = n, length, time, "route through top nodes too long");
        }

        let steps = build_route(map, start, &[], exit)?;
        let length = path_length(map, &steps)?;
        Ok(BaseRoute {
            steps,
            length,
            waypoints: 0,
        })
    }

    /// Try diversion depths `1..=max_diversion_depth` and keep the most
    /// valuable result; the earliest depth wins ties.
    fn best_diversions(
        &self,
        map: &EscapeMap,
        base: &[NodeId],
        leftover: u64,
    ) -> Result<(Vec<NodeId>, Option<usize>)> {
        let mut best: Option<(Vec<NodeId>, u64, usize)> = None;

        for depth in 1..=self.config.max_diversion_depth {
            let candidate = augment(map, base, depth, leftover)?;
            let value = path_value(map, &candidate, base);
            let improves = best
                .as_ref()
                .map_or(true, |(_, best_value, _)| value > *best_value);
            if improves {
                tracing::trace!(depth, value, "diversion depth improves route");
                best = Some((candidate, value, depth));
            }
        }

        Ok(match best {
            Some((steps, _, depth)) => (steps, Some(depth)),
            None => (base.to_vec(), None),
        })
    }

    fn follow(&self, env: &mut dyn EscapeEnvironment, plan: &EscapePlan) -> Result<()> {
        for &node in plan.steps.iter().skip(1) {
            env.move_to(node)?;
            let here = env.current_node();
            if env.reward(here) > 0 {
                env.collect_reward()?;
            }
        }
        Ok(())
    }
}

impl EscapeStrategy for TopNDiversionEscape {
    fn name(&self) -> &'static str {
        "top-n-diversion"
    }

    fn escape(&self, env: &mut dyn EscapeEnvironment) -> Result<()> {
        let plan = self.plan(env)?;
        self.follow(env, &plan)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::escape::KnownNode;
    use crate::node::GridPosition;

    /// ```text
    /// 1 - 2 - 3
    /// |       |
    /// 4       5
    /// ```
    fn small_map(rewards: [u64; 5]) -> EscapeMap {
        let mut map = EscapeMap::new();
        let positions = [(0, 0), (0, 1), (0, 2), (1, 0), (1, 2)];
        for (index, (row, column)) in positions.into_iter().enumerate() {
            let id = index as NodeId + 1;
            map.register(KnownNode::new(id, GridPosition::new(row, column), rewards[index]));
        }
        map.connect(1, 2, 10);
        map.connect(2, 3, 10);
        map.connect(1, 4, 10);
        map.connect(3, 5, 10);
        map
    }

    #[test]
    fn plan_without_reward_goes_straight_to_exit() {
        let map = small_map([0; 5]);
        let plan = TopNDiversionEscape::default()
            .plan_on(&map, 1, 3, 100)
            .unwrap();

        assert_eq!(plan.steps, vec![1, 2, 3]);
        assert_eq!(plan.length, 20);
        assert_eq!(plan.value, 0);
        assert_eq!(plan.waypoints, 0);
        assert_eq!(plan.move_count(), 2);
    }

    #[test]
    fn plan_routes_through_affordable_waypoints() {
        let map = small_map([0, 0, 0, 0, 9]);
        let plan = TopNDiversionEscape::default()
            .plan_on(&map, 1, 3, 40)
            .unwrap();

        assert_eq!(plan.steps, vec![1, 2, 3, 5, 3]);
        assert_eq!(plan.waypoints, 1);
        assert_eq!(plan.value, 9);
    }

    #[test]
    fn infeasible_budget_still_returns_direct_route() {
        let map = small_map([0, 0, 0, 7, 9]);
        let plan = TopNDiversionEscape::default()
            .plan_on(&map, 1, 3, 5)
            .unwrap();

        assert_eq!(plan.steps, vec![1, 2, 3]);
        assert_eq!(plan.waypoints, 0);
    }

    #[test]
    fn disabled_diversions_keep_base_route() {
        let map = small_map([0, 0, 0, 7, 0]);
        let strategy = TopNDiversionEscape::new(EscapeConfig {
            max_waypoints: 0,
            max_diversion_depth: 0,
        });
        let plan = strategy.plan_on(&map, 1, 3, 1_000).unwrap();

        assert_eq!(plan.steps, vec![1, 2, 3]);
        assert_eq!(plan.depth, None);
    }

    #[test]
    fn diversions_pick_up_nearby_reward() {
        let map = small_map([0, 0, 0, 7, 0]);
        let strategy = TopNDiversionEscape::new(EscapeConfig {
            max_waypoints: 0,
            max_diversion_depth: 2,
        });
        let plan = strategy.plan_on(&map, 1, 3, 40).unwrap();

        assert_eq!(plan.steps, vec![1, 4, 1, 2, 3]);
        assert_eq!(plan.depth, Some(1));
        assert_eq!(plan.value, 7);
    }

    #[test]
    fn unknown_start_is_rejected() {
        let map = small_map([0; 5]);
        let error = TopNDiversionEscape::default()
            .plan_on(&map, 42, 3, 100)
            .expect_err("node 42 does not exist");
        assert_eq!(error, Error::UnknownNode { id: 42 });
    }
}
