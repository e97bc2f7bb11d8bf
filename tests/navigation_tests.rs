mod common;

use common::{mission, moves, parse_map, run_lines};
use wizardnav::discovery::discover_around;
use wizardnav::pathfinding::find_shortest_path;
use wizardnav::wizard::{choose_class, clear_class};
use wizardnav::{execute, Grid, Mission, NavError, Objective, ObstacleIndex, Position};

#[test]
fn test_open_grid_diagonal_route() {
    let grid = parse_map(
        "...
         ...
         ...",
        true,
    );
    let (lines, run) = run_lines(grid, &mission(1.0, (0, 0), &[(2, 2)]));

    assert_eq!(lines, vec!["Moving to 1-1", "Moving to 2-2", "Objective 1 reached!"]);
    assert_eq!(run.result.unwrap(), Position::new(2, 2));
}

#[test]
fn test_hidden_obstacle_forces_replan() {
    let grid = parse_map(
        "...2..
         .####.
         ......",
        false,
    );
    let (lines, run) = run_lines(grid, &mission(1.0, (0, 0), &[(5, 0)]));

    // The first plan runs straight through the concealed cell
    assert_eq!(&lines[..3], &["Moving to 1-0", "Moving to 2-0", "Path is impassable!"]);
    assert_eq!(
        moves(&lines[3..]),
        vec![
            "Moving to 1-0",
            "Moving to 0-0",
            "Moving to 0-1",
            "Moving to 0-2",
            "Moving to 1-2",
            "Moving to 2-2",
            "Moving to 3-2",
            "Moving to 4-2",
            "Moving to 5-2",
            "Moving to 5-1",
            "Moving to 5-0",
        ]
    );
    assert_eq!(lines.last().unwrap(), "Objective 1 reached!");
    assert_eq!(lines.iter().filter(|l| *l == "Path is impassable!").count(), 1);

    let revealed = run.grid.node(run.grid.get_id(3, 0));
    assert!(revealed.discovered);
    run.result.unwrap();
}

#[test]
fn test_obstacle_on_only_route_is_unreachable() {
    let grid = parse_map("...2..", false);
    let (lines, run) = run_lines(grid, &mission(1.0, (0, 0), &[(5, 0)]));

    assert_eq!(lines, vec!["Moving to 1-0", "Moving to 2-0", "Path is impassable!"]);
    match run.result {
        Err(NavError::Unreachable { objective, from, to }) => {
            assert_eq!(objective, 1);
            assert_eq!(from, Position::new(2, 0));
            assert_eq!(to, Position::new(5, 0));
        }
        other => panic!("expected unreachable, got {:?}", other),
    }
}

#[test]
fn test_obstacle_visible_from_start_is_avoided_up_front() {
    let grid = parse_map(
        ".2.
         ...",
        false,
    );
    let (lines, _) = run_lines(grid, &mission(1.0, (0, 0), &[(2, 0)]));
    assert_eq!(
        lines,
        vec![
            "Moving to 0-1",
            "Moving to 1-1",
            "Moving to 2-1",
            "Moving to 2-0",
            "Objective 1 reached!",
        ]
    );
}

#[test]
fn test_wall_blocks_without_discovery() {
    let grid = parse_map(
        ".#.
         ...",
        false,
    );
    let (lines, _) = run_lines(grid, &mission(0.0, (0, 0), &[(2, 0)]));
    assert!(!lines.contains(&"Path is impassable!".to_string()));
    assert_eq!(moves(&lines).len(), 4);
}

#[test]
fn test_wizard_clearing_opens_the_short_route() {
    let grid = parse_map(
        "..2..
         .###.
         .....",
        false,
    );
    let mission = Mission {
        radius: 1.0,
        start: Position::new(0, 0),
        objectives: vec![
            Objective::new(Position::new(4, 0)),
            Objective::with_wizard(Position::new(0, 0), vec![3, 2]),
        ],
    };
    let (lines, run) = run_lines(grid, &mission);
    run.result.unwrap();

    let split = lines.iter().position(|l| l == "Objective 1 reached!").unwrap();
    let (before, after) = lines.split_at(split + 1);

    assert!(before.contains(&"Path is impassable!".to_string()));
    // One step forward, then nine around the walls
    assert_eq!(moves(before).len(), 10);
    assert_eq!(
        after,
        &[
            "Number 2 is chosen!",
            "Moving to 3-0",
            "Moving to 2-0",
            "Moving to 1-0",
            "Moving to 0-0",
            "Objective 2 reached!",
        ]
    );
    let cleared = run.grid.node(run.grid.get_id(2, 0));
    assert_eq!(cleared.node_type, 0);
    assert!(!cleared.discovered);
}

#[test]
fn test_same_request_before_and_after_clearing() {
    let mut grid = parse_map(
        ".3.
         ...",
        false,
    );
    let mut index = ObstacleIndex::from_grid(&grid);
    let start = grid.get_id(0, 0);
    let dest = grid.get_id(2, 0);

    discover_around(&mut grid, start, 1.0);
    let detour = find_shortest_path(&grid, start, dest).unwrap();
    assert_eq!(detour.len(), 5);

    assert_eq!(clear_class(&mut grid, &mut index, 3), 1);
    let direct = find_shortest_path(&grid, start, dest).unwrap();
    assert_eq!(direct, vec![start, grid.get_id(1, 0), dest]);

    // Discovery no longer treats the cleared cell as an obstacle
    assert!(discover_around(&mut grid, start, 5.0).is_empty());
    assert_eq!(find_shortest_path(&grid, start, dest).unwrap().len(), 3);
}

#[test]
fn test_wizard_prefers_lowest_distance_first_seen() {
    // Three routes from (0,0) to (2,2), each through one discovered obstacle:
    // class 2 costs 10, class 3 costs 7, class 4 costs 7
    let mut grid = Grid::new(3, 3);
    let s = grid.get_id(0, 0);
    let d = grid.get_id(2, 2);
    let (a, b, c) = (grid.get_id(1, 0), grid.get_id(2, 0), grid.get_id(0, 1));
    for (id, class) in [(a, 2), (b, 3), (c, 4)] {
        grid.set_type(id, class);
        grid.node_mut(id).discover();
    }
    grid.add_edge(s, a, 5.0);
    grid.add_edge(a, d, 5.0);
    grid.add_edge(s, b, 3.0);
    grid.add_edge(b, d, 4.0);
    grid.add_edge(s, c, 3.5);
    grid.add_edge(c, d, 3.5);

    assert_eq!(choose_class(&grid, &[2, 3, 4], s, d), Some(3));
    assert_eq!(choose_class(&grid, &[4, 3, 2], s, d), Some(4));

    let mission = Mission {
        radius: 0.0,
        start: Position::new(0, 0),
        objectives: vec![Objective::with_wizard(Position::new(2, 2), vec![2, 3, 4])],
    };
    let run = execute(grid, &mission);
    assert_eq!(
        run.log.lines(),
        vec!["Number 3 is chosen!", "Moving to 2-0", "Moving to 2-2", "Objective 1 reached!"]
    );
}

#[test]
fn test_repeated_wizard_class_is_harmless() {
    let grid = parse_map(
        ".2.
         ...",
        false,
    );
    let mission = Mission {
        radius: 1.0,
        start: Position::new(0, 0),
        objectives: vec![
            Objective::with_wizard(Position::new(2, 0), vec![2]),
            Objective::with_wizard(Position::new(0, 0), vec![2]),
        ],
    };
    let (lines, run) = run_lines(grid, &mission);
    run.result.unwrap();
    assert_eq!(
        lines,
        vec![
            "Number 2 is chosen!",
            "Moving to 1-0",
            "Moving to 2-0",
            "Objective 1 reached!",
            "Number 2 is chosen!",
            "Moving to 1-0",
            "Moving to 0-0",
            "Objective 2 reached!",
        ]
    );
}

#[test]
fn test_objective_at_current_position_logs_nothing() {
    let grid = parse_map("...", false);
    let (lines, run) = run_lines(grid, &mission(1.0, (0, 0), &[(2, 0), (2, 0), (0, 0)]));
    run.result.unwrap();
    assert_eq!(
        lines,
        vec![
            "Moving to 1-0",
            "Moving to 2-0",
            "Objective 1 reached!",
            "Moving to 1-0",
            "Moving to 0-0",
            "Objective 3 reached!",
        ]
    );
}

#[test]
fn test_destination_revealed_on_arrival_ends_objective() {
    let grid = parse_map("..5", false);
    let (lines, run) = run_lines(grid, &mission(0.0, (0, 0), &[(2, 0), (0, 0)]));
    assert_eq!(run.result.unwrap(), Position::new(0, 0));
    assert_eq!(
        lines,
        vec![
            "Moving to 1-0",
            "Moving to 2-0",
            "Path is impassable!",
            "Moving to 1-0",
            "Moving to 0-0",
            "Objective 2 reached!",
        ]
    );
    assert!(run.grid.node(run.grid.get_id(2, 0)).is_known_obstacle());
}
