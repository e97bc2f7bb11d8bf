use crate::discovery::discover_around;
use crate::error::{NavError, Result};
use crate::event_log::{EventLog, NavEvent};
use crate::grid::{Grid, NodeId};
use crate::pathfinding::{find_shortest_path, format_path};
use log::{debug, trace};

/// Controller phases while pursuing one objective
#[derive(Clone, Debug, PartialEq)]
pub enum NavState {
    /// Reveal surroundings and compute a route
    Planning,
    /// Walk the planned route
    Advancing(Vec<NodeId>),
    /// Route invalidated; replan from the current node
    Blocked,
    /// Destination reached, terminal for this objective
    ObjectiveReached,
}

/// Agent walking the land with a fixed discovery radius
#[derive(Clone, Debug)]
pub struct Navigator {
    position: NodeId,
    radius: f64,
    replans: usize,
}

impl Navigator {
    pub fn new(start: NodeId, radius: f64) -> Self {
        Navigator {
            position: start,
            radius,
            replans: 0,
        }
    }

    pub fn position(&self) -> NodeId {
        self.position
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    /// Number of times a route was abandoned so far
    pub fn replans(&self) -> usize {
        self.replans
    }

    /// Move to `dest`, replanning whenever discovery cuts the current route.
    ///
    /// Nothing is logged when the agent already stands on `dest`. A step
    /// that reveals `dest` itself logs the cut and ends the objective there.
    ///
    /// Fails with [`NavError::Unreachable`] once no route exists over the
    /// known land; unseen obstacles are already treated as passable, so
    /// further discovery could never open one up.
    pub fn reach_objective(
        &mut self,
        grid: &mut Grid,
        dest: NodeId,
        objective: usize,
        log: &mut EventLog,
    ) -> Result<()> {
        let mut state = NavState::Planning;

        loop {
            state = match state {
                NavState::Planning => {
                    discover_around(grid, self.position, self.radius);
                    if self.position == dest {
                        // Nothing to walk, so nothing is logged
                        NavState::ObjectiveReached
                    } else {
                        let path = find_shortest_path(grid, self.position, dest).ok_or_else(|| {
                            NavError::Unreachable {
                                objective,
                                from: grid.position(self.position),
                                to: grid.position(dest),
                            }
                        })?;
                        trace!("Planned route {}", format_path(grid, &path));
                        NavState::Advancing(path)
                    }
                }
                NavState::Advancing(path) => self.advance(grid, &path, objective, log),
                NavState::Blocked => {
                    self.replans += 1;
                    debug!(
                        "Objective {}: replanning from {}",
                        objective,
                        grid.position(self.position)
                    );
                    NavState::Planning
                }
                NavState::ObjectiveReached => return Ok(()),
            };
        }
    }

    /// Walk `path` (which starts at the current node) one step at a time
    fn advance(
        &mut self,
        grid: &mut Grid,
        path: &[NodeId],
        objective: usize,
        log: &mut EventLog,
    ) -> NavState {
        let dest = path[path.len() - 1];

        for i in 1..path.len() {
            let node = path[i];
            self.position = node;
            let position = grid.position(node);
            log.record(objective, NavEvent::MovingTo { x: position.x, y: position.y });

            let revealed = discover_around(grid, node, self.radius);

            // The remaining route includes the destination itself
            let cut = path[i..]
                .iter()
                .any(|id| revealed.contains_key(id) || grid.node(*id).is_known_obstacle());
            if cut {
                log.record(objective, NavEvent::PathImpassable);
                if node == dest {
                    debug!("Objective {}: stopped on a revealed destination", objective);
                    return NavState::ObjectiveReached;
                }
                return NavState::Blocked;
            }

            if node == dest {
                log.record(objective, NavEvent::ObjectiveReached { objective });
                return NavState::ObjectiveReached;
            }
        }

        // Only reachable for a single-node path, which Planning never hands over
        NavState::Planning
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Single row 0..n with unit edges
    fn corridor(n: i32) -> Grid {
        let mut grid = Grid::new(n, 1);
        for x in 0..n - 1 {
            grid.add_edge(x as NodeId, (x + 1) as NodeId, 1.0);
        }
        grid
    }

    #[test]
    fn test_walks_corridor() {
        let mut grid = corridor(4);
        let mut log = EventLog::new();
        let mut nav = Navigator::new(0, 1.0);

        nav.reach_objective(&mut grid, 3, 1, &mut log).unwrap();

        assert_eq!(
            log.lines(),
            vec!["Moving to 1-0", "Moving to 2-0", "Moving to 3-0", "Objective 1 reached!"]
        );
        assert_eq!(nav.position(), 3);
        assert_eq!(nav.replans(), 0);
    }

    #[test]
    fn test_already_at_destination() {
        let mut grid = corridor(2);
        let mut log = EventLog::new();
        let mut nav = Navigator::new(1, 1.0);
        nav.reach_objective(&mut grid, 1, 3, &mut log).unwrap();
        assert!(log.is_empty());
        assert_eq!(nav.position(), 1);
    }

    #[test]
    fn test_blocked_corridor_is_unreachable() {
        let mut grid = corridor(5);
        grid.set_type(3, 2);
        let mut log = EventLog::new();
        let mut nav = Navigator::new(0, 1.0);

        let err = nav.reach_objective(&mut grid, 4, 1, &mut log).unwrap_err();
        assert!(matches!(err, NavError::Unreachable { objective: 1, .. }));
        // Stepped to 1-0, saw nothing; stepped to 2-0, saw 3-0 and stopped
        assert_eq!(
            log.lines(),
            vec!["Moving to 1-0", "Moving to 2-0", "Path is impassable!"]
        );
        assert_eq!(nav.position(), 2);
        assert_eq!(nav.replans(), 1);
    }

    #[test]
    fn test_destination_revealed_on_arrival_is_impassable() {
        let mut grid = corridor(3);
        grid.set_type(2, 5);
        let mut log = EventLog::new();
        let mut nav = Navigator::new(0, 0.0);

        nav.reach_objective(&mut grid, 2, 1, &mut log).unwrap();
        assert_eq!(
            log.lines(),
            vec!["Moving to 1-0", "Moving to 2-0", "Path is impassable!"]
        );
        assert!(grid.node(2).discovered);
        // The agent still ends on the destination without a replan
        assert_eq!(nav.position(), 2);
        assert_eq!(nav.replans(), 0);
    }

    #[test]
    fn test_destination_seen_early_cuts_before_arrival() {
        let mut grid = corridor(4);
        grid.set_type(3, 4);
        let mut log = EventLog::new();
        let mut nav = Navigator::new(0, 1.0);

        let err = nav.reach_objective(&mut grid, 3, 1, &mut log).unwrap_err();
        assert!(matches!(err, NavError::Unreachable { objective: 1, .. }));
        assert_eq!(
            log.lines(),
            vec!["Moving to 1-0", "Moving to 2-0", "Path is impassable!"]
        );
    }
}
