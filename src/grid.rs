use crate::error::{NavError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Free terrain
pub const PASSABLE: u32 = 0;
/// Permanent wall; edges touching it are infinitely expensive
pub const IMPASSABLE: u32 = 1;
/// Smallest hidden-obstacle class id
pub const FIRST_HIDDEN_CLASS: u32 = 2;

/// Index of a node inside the grid arena
pub type NodeId = usize;

/// A position on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub fn new(x: i32, y: i32) -> Self {
        Position { x, y }
    }

    /// Calculate Euclidean distance squared
    pub fn distance_squared(&self, other: &Position) -> i64 {
        let dx = (self.x - other.x) as i64;
        let dy = (self.y - other.y) as i64;
        dx * dx + dy * dy
    }

    /// Calculate Euclidean distance
    pub fn distance(&self, other: &Position) -> f64 {
        (self.distance_squared(other) as f64).sqrt()
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}

/// Directed half of a symmetric connection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub to: NodeId,
    /// Base travel time, `f64::INFINITY` when either endpoint is a wall
    pub travel_time: f64,
}

/// How edge costs treat discovered hidden obstacles
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostMode {
    /// Every discovered hidden obstacle is impassable
    Standard,
    /// Like `Standard`, but the given class counts as passable even when
    /// discovered (used to score a wizard candidate)
    IgnoreClass(u32),
}

/// A single cell of the land
#[derive(Debug, Clone)]
pub struct Node {
    pub position: Position,
    pub node_type: u32,
    /// Only meaningful for hidden-obstacle types
    pub discovered: bool,
    pub edges: Vec<Edge>,
}

impl Node {
    pub fn new(position: Position, node_type: u32) -> Self {
        Node {
            position,
            node_type,
            discovered: false,
            edges: Vec::new(),
        }
    }

    pub fn is_hidden_obstacle(&self) -> bool {
        self.node_type >= FIRST_HIDDEN_CLASS
    }

    /// Hidden obstacle that has already been revealed
    pub fn is_known_obstacle(&self) -> bool {
        self.discovered && self.is_hidden_obstacle()
    }

    pub fn discover(&mut self) {
        self.discovered = true;
    }

    /// Turn the node into plain terrain after its class was cleared
    pub fn clear_obstacle(&mut self) {
        self.node_type = PASSABLE;
        self.discovered = false;
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.position == other.position
    }
}

impl Eq for Node {}

impl std::hash::Hash for Node {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.position.hash(state);
    }
}

/// Arena owning every node of the land, stored row-major (`x + y * cols`)
#[derive(Clone, Debug)]
pub struct Grid {
    /// Extent along x
    pub cols: i32,
    /// Extent along y
    pub rows: i32,
    nodes: Vec<Node>,
}

impl Grid {
    /// Create a grid where every cell is passable and unconnected
    pub fn new(cols: i32, rows: i32) -> Self {
        let cols = cols.max(0);
        let rows = rows.max(0);
        let mut nodes = Vec::with_capacity(cols as usize * rows as usize);
        for y in 0..rows {
            for x in 0..cols {
                nodes.push(Node::new(Position::new(x, y), PASSABLE));
            }
        }
        Grid { cols, rows, nodes }
    }

    pub fn in_bounds(&self, position: Position) -> bool {
        position.x >= 0 && position.x < self.cols && position.y >= 0 && position.y < self.rows
    }

    /// Convert (x, y) coordinates to a node id
    pub fn get_id(&self, x: i32, y: i32) -> NodeId {
        x as NodeId + y as NodeId * self.cols as NodeId
    }

    /// Convert a node id to (x, y) coordinates
    pub fn get_coords(&self, id: NodeId) -> (i32, i32) {
        let cols = self.cols as NodeId;
        ((id % cols) as i32, (id / cols) as i32)
    }

    /// Node id for `position`, or an error if it lies outside the grid
    pub fn id_of(&self, position: Position) -> Result<NodeId> {
        if !self.in_bounds(position) {
            return Err(NavError::OutOfBounds {
                position,
                cols: self.cols,
                rows: self.rows,
            });
        }
        Ok(self.get_id(position.x, position.y))
    }

    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut Node {
        &mut self.nodes[id]
    }

    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    pub fn position(&self, id: NodeId) -> Position {
        self.nodes[id].position
    }

    pub fn set_type(&mut self, id: NodeId, node_type: u32) {
        self.nodes[id].node_type = node_type;
    }

    /// Connect two nodes in both directions.
    ///
    /// The travel time becomes infinite if either endpoint is a wall.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId, travel_time: f64) {
        let travel_time = if self.nodes[a].node_type == IMPASSABLE
            || self.nodes[b].node_type == IMPASSABLE
        {
            f64::INFINITY
        } else {
            travel_time
        };
        self.nodes[a].edges.push(Edge { to: b, travel_time });
        self.nodes[b].edges.push(Edge { to: a, travel_time });
    }

    pub fn neighbors(&self, id: NodeId) -> &[Edge] {
        &self.nodes[id].edges
    }

    /// Effective cost of taking `edge`, given the current state of its
    /// destination node
    pub fn edge_cost(&self, edge: &Edge, mode: CostMode) -> f64 {
        let target = &self.nodes[edge.to];
        let blocked = match mode {
            CostMode::Standard => target.is_known_obstacle(),
            CostMode::IgnoreClass(class) => target.is_known_obstacle() && target.node_type != class,
        };
        if blocked {
            f64::INFINITY
        } else {
            edge.travel_time
        }
    }

    /// ASCII rendering, one row per y.
    ///
    /// `.` passable, `#` wall, `?` concealed obstacle, `X` discovered obstacle,
    /// `@` for the optional agent position.
    pub fn render_ascii(&self, agent: Option<Position>) -> String {
        let mut result = String::new();
        for y in 0..self.rows {
            for x in 0..self.cols {
                let node = &self.nodes[self.get_id(x, y)];
                let symbol = if agent == Some(node.position) {
                    '@'
                } else if node.node_type == IMPASSABLE {
                    '#'
                } else if node.is_known_obstacle() {
                    'X'
                } else if node.is_hidden_obstacle() {
                    '?'
                } else {
                    '.'
                };
                result.push(symbol);
            }
            result.push('\n');
        }
        result
    }
}
