#![allow(dead_code)]

use wizardnav::grid::IMPASSABLE;
use wizardnav::{execute, Grid, Mission, MissionRun, Objective, Position};

/// Parse a text map into a grid.
///
/// Format (one row per line, y grows downwards):
/// - `.` passable cell
/// - `#` wall (type 1)
/// - `2`-`9` hidden obstacle of that class
///
/// Orthogonal neighbours are connected with travel time 1; with `diagonal`
/// set, diagonal neighbours are connected too with travel time 1.5.
pub fn parse_map(text: &str, diagonal: bool) -> Grid {
    let rows: Vec<&str> = text
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect();
    let height = rows.len() as i32;
    let width = rows[0].chars().count() as i32;
    let mut grid = Grid::new(width, height);

    for (y, line) in rows.iter().enumerate() {
        assert_eq!(line.chars().count() as i32, width, "ragged map row {}", y);
        for (x, ch) in line.chars().enumerate() {
            let id = grid.get_id(x as i32, y as i32);
            match ch {
                '.' => {}
                '#' => grid.set_type(id, IMPASSABLE),
                '2'..='9' => grid.set_type(id, ch.to_digit(10).unwrap()),
                _ => panic!("unknown map symbol '{}'", ch),
            }
        }
    }

    connect_neighbours(&mut grid, diagonal);
    grid
}

pub fn connect_neighbours(grid: &mut Grid, diagonal: bool) {
    for y in 0..grid.rows {
        for x in 0..grid.cols {
            let id = grid.get_id(x, y);
            if x + 1 < grid.cols {
                let right = grid.get_id(x + 1, y);
                grid.add_edge(id, right, 1.0);
            }
            if y + 1 < grid.rows {
                let down = grid.get_id(x, y + 1);
                grid.add_edge(id, down, 1.0);
            }
            if diagonal && y + 1 < grid.rows {
                if x + 1 < grid.cols {
                    let down_right = grid.get_id(x + 1, y + 1);
                    grid.add_edge(id, down_right, 1.5);
                }
                if x > 0 {
                    let down_left = grid.get_id(x - 1, y + 1);
                    grid.add_edge(id, down_left, 1.5);
                }
            }
        }
    }
}

/// Mission with plain objectives (no wizard)
pub fn mission(radius: f64, start: (i32, i32), goals: &[(i32, i32)]) -> Mission {
    Mission {
        radius,
        start: Position::new(start.0, start.1),
        objectives: goals
            .iter()
            .map(|&(x, y)| Objective::new(Position::new(x, y)))
            .collect(),
    }
}

/// Run a mission and return the text lines plus the full run
pub fn run_lines(grid: Grid, mission: &Mission) -> (Vec<String>, MissionRun) {
    let run = execute(grid, mission);
    (run.log.lines(), run)
}

/// "Moving to" lines only
pub fn moves(lines: &[String]) -> Vec<String> {
    lines
        .iter()
        .filter(|line| line.starts_with("Moving to"))
        .cloned()
        .collect()
}
