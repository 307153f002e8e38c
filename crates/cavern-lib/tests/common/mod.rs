#![allow(dead_code)]

use std::collections::{BTreeMap, HashMap, HashSet};
use std::path::PathBuf;

use cavern_lib::{
    EscapeEnvironment, EscapeMap, Error, ExplorationEnvironment, GraphNode, GridPosition,
    KnownNode, NodeGraph, NodeId, NodeStatus, RewardGraph, Terrain,
};
use serde::Deserialize;

pub fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

/// Install a test-friendly tracing subscriber once per test binary.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

#[derive(Debug, Deserialize)]
struct FixtureNode {
    name: String,
    row: i64,
    column: i64,
}

#[derive(Debug, Deserialize)]
struct FixtureFile {
    nodes: Vec<FixtureNode>,
    edges: Vec<(String, String, u64)>,
}

/// A named cavern loaded from `docs/fixtures`.
pub struct Cavern {
    pub map: EscapeMap,
    names: HashMap<String, NodeId>,
}

impl Cavern {
    pub fn load(file: &str) -> Self {
        let path = fixtures_dir().join(file);
        let raw = std::fs::read_to_string(&path).expect("fixture readable");
        let fixture: FixtureFile = serde_json::from_str(&raw).expect("fixture parses");

        let mut map = EscapeMap::new();
        let mut names = HashMap::new();
        for (index, node) in fixture.nodes.iter().enumerate() {
            let id = index as NodeId;
            map.register(KnownNode::new(
                id,
                GridPosition::new(node.row, node.column),
                0,
            ));
            names.insert(node.name.clone(), id);
        }

        let mut cavern = Self { map, names };
        for (a, b, length) in &fixture.edges {
            cavern.connect(a, b, *length);
        }
        cavern
    }

    pub fn id(&self, name: &str) -> NodeId {
        *self.names.get(name).expect("known node name")
    }

    pub fn ids(&self, names: &[&str]) -> Vec<NodeId> {
        names.iter().map(|name| self.id(name)).collect()
    }

    pub fn connect(&mut self, a: &str, b: &str, length: u64) {
        let (a, b) = (self.id(a), self.id(b));
        self.map.connect(a, b, length);
    }

    /// Replace the reward on a node. Edges are preserved.
    pub fn set_reward(&mut self, name: &str, reward: u64) {
        let id = self.id(name);
        let mut nodes: Vec<KnownNode> = self.map.clone().into();
        for node in &mut nodes {
            if node.id == id {
                node.reward = reward;
            }
        }
        self.map = EscapeMap::from(nodes);
    }

    pub fn escape_state(&self, start: &str, exit: &str, time: u64) -> FakeEscape {
        FakeEscape::new(self.map.clone(), self.id(start), self.id(exit), time)
    }
}

/// Escape environment backed by an [`EscapeMap`], recording every action.
pub struct FakeEscape {
    map: EscapeMap,
    current: NodeId,
    exit: NodeId,
    time: u64,
    collected: HashSet<NodeId>,
    pub moves: Vec<NodeId>,
    pub gold: u64,
}

impl FakeEscape {
    pub fn new(map: EscapeMap, current: NodeId, exit: NodeId, time: u64) -> Self {
        Self {
            map,
            current,
            exit,
            time,
            collected: HashSet::new(),
            moves: Vec::new(),
            gold: 0,
        }
    }

    pub fn visited(&self, start: NodeId) -> Vec<NodeId> {
        std::iter::once(start).chain(self.moves.iter().copied()).collect()
    }

    pub fn move_count_to(&self, node: NodeId) -> usize {
        self.moves.iter().filter(|&&n| n == node).count()
    }
}

impl Terrain for FakeEscape {
    fn reward(&self, node: NodeId) -> u64 {
        if self.collected.contains(&node) {
            0
        } else {
            RewardGraph::reward(&self.map, node)
        }
    }

    fn position(&self, node: NodeId) -> GridPosition {
        self.map.position(node).unwrap_or_default()
    }

    fn neighbours(&self, node: NodeId) -> Vec<NodeId> {
        self.map
            .node(node)
            .map(|known| known.neighbours().collect())
            .unwrap_or_default()
    }

    fn edge_length(&self, from: NodeId, to: NodeId) -> Option<u64> {
        self.map.edge_cost(from, to)
    }
}

impl EscapeEnvironment for FakeEscape {
    fn current_node(&self) -> NodeId {
        self.current
    }

    fn exit_node(&self) -> NodeId {
        self.exit
    }

    fn time_remaining(&self) -> u64 {
        self.time
    }

    fn all_nodes(&self) -> Vec<NodeId> {
        let mut ids: Vec<NodeId> = self.map.nodes().map(|node| node.id).collect();
        ids.sort_unstable();
        ids
    }

    fn move_to(&mut self, node: NodeId) -> cavern_lib::Result<()> {
        let length = self.map.edge_cost(self.current, node).ok_or(Error::IllegalMove {
            from: self.current,
            to: node,
        })?;
        self.time = self.time.saturating_sub(length);
        self.current = node;
        self.moves.push(node);
        Ok(())
    }

    fn collect_reward(&mut self) -> cavern_lib::Result<()> {
        let reward = Terrain::reward(self, self.current);
        if reward == 0 {
            return Err(Error::NothingToCollect { node: self.current });
        }
        self.gold += reward;
        self.collected.insert(self.current);
        Ok(())
    }
}

/// Exploration environment over an ASCII maze.
///
/// `#` is rock, `.` is floor, `S` the start and `T` the target. Node ids are
/// `row * width + column`; the distance hint is the Manhattan distance to `T`.
pub struct FakeMaze {
    width: usize,
    floor: BTreeMap<NodeId, GridPosition>,
    target: GridPosition,
    current: NodeId,
    pub moves: Vec<NodeId>,
}

impl FakeMaze {
    pub fn parse(layout: &str) -> Self {
        let rows: Vec<&str> = layout
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let width = rows.iter().map(|row| row.len()).max().unwrap_or(0);

        let mut floor = BTreeMap::new();
        let mut start = None;
        let mut target = None;
        for (row, line) in rows.iter().enumerate() {
            for (column, cell) in line.chars().enumerate() {
                if cell == '#' {
                    continue;
                }
                let id = (row * width + column) as NodeId;
                let position = GridPosition::new(row as i64, column as i64);
                floor.insert(id, position);
                match cell {
                    'S' => start = Some(id),
                    'T' => target = Some(position),
                    _ => {}
                }
            }
        }

        Self {
            width,
            floor,
            target: target.expect("maze has a target"),
            current: start.expect("maze has a start"),
            moves: Vec::new(),
        }
    }

    pub fn id_at(&self, row: usize, column: usize) -> NodeId {
        (row * self.width + column) as NodeId
    }

    fn distance_of(&self, id: NodeId) -> u64 {
        self.floor
            .get(&id)
            .map_or(u64::MAX, |position| position.manhattan_distance(&self.target))
    }

    fn adjacent(&self, id: NodeId) -> Vec<NodeId> {
        let Some(position) = self.floor.get(&id) else {
            return Vec::new();
        };
        self.floor
            .iter()
            .filter(|(_, other)| position.manhattan_distance(other) == 1)
            .map(|(&other_id, _)| other_id)
            .collect()
    }
}

impl ExplorationEnvironment for FakeMaze {
    fn current_location(&self) -> NodeId {
        self.current
    }

    fn distance_to_target(&self) -> u64 {
        self.distance_of(self.current)
    }

    fn neighbours(&self) -> Vec<NodeStatus> {
        self.adjacent(self.current)
            .into_iter()
            .map(|id| NodeStatus::new(id, self.distance_of(id)))
            .collect()
    }

    fn move_to(&mut self, node: NodeId) -> cavern_lib::Result<()> {
        if !self.adjacent(self.current).contains(&node) {
            return Err(Error::IllegalMove {
                from: self.current,
                to: node,
            });
        }
        self.current = node;
        self.moves.push(node);
        Ok(())
    }
}
