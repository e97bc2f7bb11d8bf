use crate::error::Result;
use crate::event_log::EventLog;
use crate::grid::{Grid, Position};
use crate::navigator::Navigator;
use crate::obstacles::ObstacleIndex;
use crate::wizard::apply_wizard_choice;
use log::info;
use serde::{Deserialize, Serialize};

/// One destination of the objective stream
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Objective {
    pub destination: Position,
    /// Classes the wizard offers to clear before this objective is pursued
    #[serde(default)]
    pub wizard_options: Vec<u32>,
}

impl Objective {
    pub fn new(destination: Position) -> Self {
        Objective {
            destination,
            wizard_options: Vec::new(),
        }
    }

    pub fn with_wizard(destination: Position, options: Vec<u32>) -> Self {
        Objective {
            destination,
            wizard_options: options,
        }
    }
}

/// Radius, starting point and the ordered objectives
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Mission {
    pub radius: f64,
    pub start: Position,
    pub objectives: Vec<Objective>,
}

/// Final state of a run: the grid as left by the agent, every event
/// recorded, and the mission outcome
#[derive(Debug)]
pub struct MissionRun {
    pub grid: Grid,
    pub log: EventLog,
    pub result: Result<Position>,
}

/// Index the grid's obstacle classes and run `mission` to completion or
/// first error
pub fn execute(mut grid: Grid, mission: &Mission) -> MissionRun {
    let mut index = ObstacleIndex::from_grid(&grid);
    let mut log = EventLog::new();
    let result = run_mission(&mut grid, &mut index, mission, &mut log);
    MissionRun { grid, log, result }
}

/// Pursue every objective in order, recording events into `log`.
///
/// For each objective the wizard's offer (if any) is applied first, then the
/// surroundings of the current position are revealed and the navigator
/// walks to the destination. Stops at the first error; events recorded up to
/// that point stay in `log`. Returns the final position.
pub fn run_mission(
    grid: &mut Grid,
    index: &mut ObstacleIndex,
    mission: &Mission,
    log: &mut EventLog,
) -> Result<Position> {
    let start = grid.id_of(mission.start)?;
    let mut navigator = Navigator::new(start, mission.radius);

    for (i, objective) in mission.objectives.iter().enumerate() {
        let number = i + 1;
        let dest = grid.id_of(objective.destination)?;

        if !objective.wizard_options.is_empty() {
            apply_wizard_choice(
                grid,
                index,
                &objective.wizard_options,
                navigator.position(),
                dest,
                number,
                log,
            );
        }

        info!(
            "Objective {}: {} -> {}",
            number,
            grid.position(navigator.position()),
            objective.destination
        );
        navigator.reach_objective(grid, dest, number, log)?;
    }

    info!(
        "Mission complete: {} objectives, {} replans",
        mission.objectives.len(),
        navigator.replans()
    );
    Ok(grid.position(navigator.position()))
}
