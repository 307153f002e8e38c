use crate::error::{Error, Result};
use crate::metrics::path_value;
use crate::node::{NodeId, RewardGraph};
use crate::path::find_shortest_path;

/// Build a continuous route from `from` to `to` through `waypoints` in order.
///
/// Each waypoint is reached by a shortest path from the current tail of the
/// route. A waypoint whose leg would add no reward beyond the nodes already on
/// the route is skipped, and the tail stays where it was.
pub fn build_route<G: RewardGraph>(
    graph: &G,
    from: NodeId,
    waypoints: &[NodeId],
    to: NodeId,
) -> Result<Vec<NodeId>> {
    let mut route = vec![from];
    let mut tail = from;

    for &waypoint in waypoints {
        let leg = shortest_leg(graph, tail, waypoint)?;
        if path_value(graph, &leg, &route) > 0 {
            route.extend_from_slice(&leg[1..]);
            tail = waypoint;
        } else {
            tracing::trace!(
                waypoint,
                from = tail,
                "skipping waypoint with no reward left on its leg"
            );
        }
    }

    let last = shortest_leg(graph, tail, to)?;
    route.extend_from_slice(&last[1..]);
    Ok(route)
}

fn shortest_leg<G: RewardGraph>(graph: &G, start: NodeId, goal: NodeId) -> Result<Vec<NodeId>> {
    find_shortest_path(graph, start, goal).ok_or(Error::RouteNotFound { start, goal })
}
