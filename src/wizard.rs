use crate::event_log::{EventLog, NavEvent};
use crate::grid::{Grid, NodeId};
use crate::obstacles::ObstacleIndex;
use crate::pathfinding::shortest_distance_ignoring;
use log::{debug, info};

/// Pick the candidate class whose removal gives the shortest route from
/// `start` to `dest`.
///
/// Candidates are scored in input order and a later candidate only wins on a
/// strictly smaller distance, so ties go to the first one listed. When every
/// candidate is unreachable the first one is returned. `None` for an empty
/// candidate list.
pub fn choose_class(grid: &Grid, candidates: &[u32], start: NodeId, dest: NodeId) -> Option<u32> {
    let mut best: Option<(u32, f64)> = None;

    for &class in candidates {
        let distance = shortest_distance_ignoring(grid, start, dest, class);
        debug!("Wizard candidate {} scores {}", class, distance);
        match best {
            Some((_, best_distance)) if distance >= best_distance => {}
            _ => best = Some((class, distance)),
        }
    }

    best.map(|(class, _)| class)
}

/// Turn every node of `class` into plain passable terrain and drop the class
/// from the index. Returns how many nodes were cleared (0 for a class that
/// is unknown or was cleared before).
pub fn clear_class(grid: &mut Grid, index: &mut ObstacleIndex, class: u32) -> usize {
    match index.take(class) {
        Some(nodes) => {
            for &id in &nodes {
                grid.node_mut(id).clear_obstacle();
            }
            nodes.len()
        }
        None => 0,
    }
}

/// Evaluate the wizard's offer, log the choice and apply it.
///
/// Returns the chosen class, or `None` (and logs nothing) when `candidates`
/// is empty.
pub fn apply_wizard_choice(
    grid: &mut Grid,
    index: &mut ObstacleIndex,
    candidates: &[u32],
    start: NodeId,
    dest: NodeId,
    objective: usize,
    log: &mut EventLog,
) -> Option<u32> {
    let choice = choose_class(grid, candidates, start, dest)?;
    log.record(objective, NavEvent::WizardChoice { class: choice });

    let cleared = clear_class(grid, index, choice);
    info!("Wizard cleared class {} ({} nodes)", choice, cleared);
    Some(choice)
}
