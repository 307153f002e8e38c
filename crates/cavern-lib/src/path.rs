use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashMap};

use crate::node::{GraphNode, NodeGraph, NodeId};

/// Find the lowest-cost path between `start` and `goal` with Dijkstra's
/// algorithm.
///
/// The returned path starts with `start` and ends with `goal`; a search from a
/// node to itself yields `[start]`. Returns `None` when `goal` cannot be
/// reached, which includes ids that are not registered in `graph`.
pub fn find_shortest_path<G: NodeGraph>(
    graph: &G,
    start: NodeId,
    goal: NodeId,
) -> Option<Vec<NodeId>> {
    if start == goal {
        return Some(vec![start]);
    }

    let search = dijkstra(graph, start, Some(goal));
    if !search.distances.contains_key(&goal) {
        return None;
    }
    Some(reconstruct_path(&search.parents, start, goal))
}

/// Compute the minimum cost from `start` to every node reachable from it.
pub fn shortest_distances<G: NodeGraph>(graph: &G, start: NodeId) -> HashMap<NodeId, u64> {
    dijkstra(graph, start, None).distances
}

struct Search {
    distances: HashMap<NodeId, u64>,
    parents: HashMap<NodeId, Option<NodeId>>,
}

fn dijkstra<G: NodeGraph>(graph: &G, start: NodeId, goal: Option<NodeId>) -> Search {
    let mut distances: HashMap<NodeId, u64> = HashMap::new();
    let mut parents: HashMap<NodeId, Option<NodeId>> = HashMap::new();
    let mut queue = BinaryHeap::new();

    distances.insert(start, 0);
    parents.insert(start, None);
    queue.push(QueueEntry::new(start, 0));

    while let Some(entry) = queue.pop() {
        // Entries are never removed on improvement, so skip the stale ones.
        let current_distance = match distances.get(&entry.node) {
            Some(distance) if *distance < entry.cost => continue,
            Some(distance) => *distance,
            None => continue,
        };

        if Some(entry.node) == goal {
            break;
        }

        let Some(node) = graph.node(entry.node) else {
            continue;
        };

        for next in node.neighbours() {
            let Some(cost) = node.cost_to(next) else {
                continue;
            };

            let next_cost = current_distance.saturating_add(cost);
            let improves = distances
                .get(&next)
                .map_or(true, |&known| next_cost < known);
            if improves {
                distances.insert(next, next_cost);
                parents.insert(next, Some(entry.node));
                queue.push(QueueEntry::new(next, next_cost));
            }
        }
    }

    Search { distances, parents }
}

fn reconstruct_path(
    parents: &HashMap<NodeId, Option<NodeId>>,
    start: NodeId,
    goal: NodeId,
) -> Vec<NodeId> {
    let mut path = Vec::new();
    let mut current = Some(goal);
    while let Some(node) = current {
        path.push(node);
        if node == start {
            break;
        }
        current = parents.get(&node).copied().flatten();
    }
    path.reverse();
    path
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
struct QueueEntry {
    node: NodeId,
    cost: u64,
}

impl QueueEntry {
    fn new(node: NodeId, cost: u64) -> Self {
        Self { node, cost }
    }
}

impl Ord for QueueEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for QueueEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
