//! Readers for the three input files.
//!
//! - nodes: first line `cols rows`, then `x y type` per node
//! - edges: `x1-y1,x2-y2 travel_time` per line
//! - objectives: radius, then start `x y`, then `x y [class ...]` per
//!   objective. Classes listed on an objective line are offered by the
//!   wizard before the *next* objective is pursued.

use crate::error::{NavError, Result};
use crate::grid::{Grid, Position};
use crate::mission::{Mission, Objective};
use log::{debug, warn};
use std::fs;
use std::path::Path;
use std::str::FromStr;

/// Tracks file name and line number for error messages
struct LineCursor<'a> {
    file: &'a str,
    line: usize,
}

impl<'a> LineCursor<'a> {
    fn error(&self, message: impl Into<String>) -> NavError {
        NavError::Parse {
            file: self.file.to_string(),
            line: self.line,
            message: message.into(),
        }
    }

    fn number<T: FromStr>(&self, token: &str, what: &str) -> Result<T> {
        token
            .parse::<T>()
            .map_err(|_| self.error(format!("invalid {} '{}'", what, token)))
    }

    /// Parse `x-y`
    fn coordinate(&self, token: &str) -> Result<Position> {
        let (x, y) = token
            .split_once('-')
            .ok_or_else(|| self.error(format!("expected x-y, found '{}'", token)))?;
        Ok(Position::new(self.number(x, "x coordinate")?, self.number(y, "y coordinate")?))
    }
}

/// Non-empty lines with their 1-based line numbers
fn content_lines(text: &str) -> impl Iterator<Item = (usize, &str)> {
    text.lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line.trim()))
        .filter(|(_, line)| !line.is_empty())
}

/// Build the grid from the contents of a nodes file
pub fn parse_nodes(text: &str, file: &str) -> Result<Grid> {
    let mut grid: Option<Grid> = None;
    let mut cursor = LineCursor { file, line: 0 };

    for (line_no, line) in content_lines(text) {
        cursor.line = line_no;
        let parts: Vec<&str> = line.split_whitespace().collect();

        match parts.as_slice() {
            [cols, rows] => {
                let cols: i32 = cursor.number(cols, "column count")?;
                let rows: i32 = cursor.number(rows, "row count")?;
                if cols <= 0 || rows <= 0 {
                    return Err(cursor.error(format!(
                        "grid size {}x{} must be positive",
                        cols, rows
                    )));
                }
                if cols.checked_mul(rows).is_none() {
                    return Err(cursor.error(format!(
                        "grid size {}x{} is too large",
                        cols, rows
                    )));
                }
                grid = Some(Grid::new(cols, rows));
            }
            [x, y, node_type] => {
                let grid = grid
                    .as_mut()
                    .ok_or_else(|| cursor.error("node listed before the grid size line"))?;
                let position = Position::new(
                    cursor.number(x, "x coordinate")?,
                    cursor.number(y, "y coordinate")?,
                );
                let node_type: u32 = cursor.number(node_type, "node type")?;
                let id = grid.id_of(position)?;
                grid.set_type(id, node_type);
            }
            _ => return Err(cursor.error(format!("expected 2 or 3 fields, found {}", parts.len()))),
        }
    }

    grid.ok_or_else(|| cursor.error("missing grid size line"))
}

/// Add every edge listed in the contents of an edges file
pub fn parse_edges(grid: &mut Grid, text: &str, file: &str) -> Result<usize> {
    let mut cursor = LineCursor { file, line: 0 };
    let mut count = 0;

    for (line_no, line) in content_lines(text) {
        cursor.line = line_no;
        let parts: Vec<&str> = line.split_whitespace().collect();
        let [pair, time] = parts.as_slice() else {
            return Err(cursor.error(format!("expected 2 fields, found {}", parts.len())));
        };

        let (a, b) = pair
            .split_once(',')
            .ok_or_else(|| cursor.error(format!("expected x1-y1,x2-y2, found '{}'", pair)))?;
        let a = grid.id_of(cursor.coordinate(a)?)?;
        let b = grid.id_of(cursor.coordinate(b)?)?;

        let travel_time: f64 = cursor.number(time, "travel time")?;
        if travel_time.is_nan() || travel_time < 0.0 {
            return Err(cursor.error(format!("travel time {} must be non-negative", travel_time)));
        }

        grid.add_edge(a, b, travel_time);
        count += 1;
    }

    Ok(count)
}

/// Build the mission from the contents of an objectives file
pub fn parse_objectives(text: &str, file: &str) -> Result<Mission> {
    let mut cursor = LineCursor { file, line: 0 };
    let mut lines = content_lines(text);

    let (line_no, radius_line) = lines.next().ok_or_else(|| cursor.error("missing radius line"))?;
    cursor.line = line_no;
    let radius: f64 = cursor.number(radius_line, "radius")?;
    if radius.is_nan() || radius < 0.0 {
        return Err(cursor.error(format!("radius {} must be non-negative", radius)));
    }

    let (line_no, start_line) = lines.next().ok_or_else(|| cursor.error("missing start line"))?;
    cursor.line = line_no;
    let start = match start_line.split_whitespace().collect::<Vec<_>>().as_slice() {
        [x, y] => Position::new(
            cursor.number(x, "x coordinate")?,
            cursor.number(y, "y coordinate")?,
        ),
        other => {
            return Err(cursor.error(format!(
                "expected start 'x y', found {} fields",
                other.len()
            )))
        }
    };

    let mut objectives = Vec::new();
    // Options read on one line apply before the following objective
    let mut pending: Vec<u32> = Vec::new();

    for (line_no, line) in lines {
        cursor.line = line_no;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() < 2 {
            return Err(cursor.error(format!(
                "expected 'x y [class ...]', found {} fields",
                parts.len()
            )));
        }

        let destination = Position::new(
            cursor.number(parts[0], "x coordinate")?,
            cursor.number(parts[1], "y coordinate")?,
        );
        let options = parts[2..]
            .iter()
            .map(|token| cursor.number::<u32>(token, "wizard option"))
            .collect::<Result<Vec<_>>>()?;

        objectives.push(Objective::with_wizard(destination, std::mem::take(&mut pending)));
        pending = options;
    }

    if !pending.is_empty() {
        warn!(
            "{}: wizard options {:?} on the last objective have no objective to apply to",
            file, pending
        );
    }

    Ok(Mission {
        radius,
        start,
        objectives,
    })
}

fn read(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Read the nodes and edges files into a fully connected grid
pub fn load_grid(nodes_path: &Path, edges_path: &Path) -> Result<Grid> {
    let nodes_name = nodes_path.display().to_string();
    let edges_name = edges_path.display().to_string();

    let mut grid = parse_nodes(&read(nodes_path)?, &nodes_name)?;
    let edges = parse_edges(&mut grid, &read(edges_path)?, &edges_name)?;
    debug!("Loaded {}x{} grid with {} edges", grid.cols, grid.rows, edges);
    Ok(grid)
}

/// Read the objectives file
pub fn load_mission(path: &Path) -> Result<Mission> {
    parse_objectives(&read(path)?, &path.display().to_string())
}
