use crate::error::{NavError, Result};
use crate::grid::{Grid, Position};
use crate::mission::{execute, Mission, MissionRun};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Node type assignment; unlisted cells are passable
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct NodeSpec {
    pub x: i32,
    pub y: i32,
    #[serde(rename = "type")]
    pub node_type: u32,
}

/// Symmetric connection between two cells
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EdgeSpec {
    pub from: Position,
    pub to: Position,
    #[serde(rename = "travelTime")]
    pub travel_time: f64,
}

/// A complete run described in one JSON document
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Scenario {
    pub name: String,
    pub cols: i32,
    pub rows: i32,
    #[serde(default)]
    pub nodes: Vec<NodeSpec>,
    pub edges: Vec<EdgeSpec>,
    pub mission: Mission,
    /// Expected text log, if the scenario doubles as a regression case
    #[serde(default, rename = "expectedLog")]
    pub expected_log: Option<Vec<String>>,
    /// Set when the last objective is expected to be unreachable
    #[serde(default, rename = "expectUnreachable")]
    pub expect_unreachable: bool,
}

impl Scenario {
    /// Load a scenario from JSON file
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)?;
        let scenario: Scenario = serde_json::from_str(&contents)?;
        Ok(scenario)
    }

    pub fn build_grid(&self) -> Result<Grid> {
        if self.cols <= 0 || self.rows <= 0 {
            return Err(NavError::Config(format!(
                "scenario '{}' has non-positive size {}x{}",
                self.name, self.cols, self.rows
            )));
        }
        if self.cols.checked_mul(self.rows).is_none() {
            return Err(NavError::Config(format!(
                "scenario '{}' size {}x{} is too large",
                self.name, self.cols, self.rows
            )));
        }
        let mut grid = Grid::new(self.cols, self.rows);
        for node in &self.nodes {
            let id = grid.id_of(Position::new(node.x, node.y))?;
            grid.set_type(id, node.node_type);
        }
        for edge in &self.edges {
            let a = grid.id_of(edge.from)?;
            let b = grid.id_of(edge.to)?;
            grid.add_edge(a, b, edge.travel_time);
        }
        Ok(grid)
    }

    /// Build the grid and run the mission. Grid construction errors are
    /// returned directly; mission errors land in `MissionRun::result`.
    pub fn run(&self) -> Result<MissionRun> {
        Ok(execute(self.build_grid()?, &self.mission))
    }
}
