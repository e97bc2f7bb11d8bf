pub mod config;
pub mod discovery;
pub mod error;
pub mod event_log;
pub mod grid;
pub mod hash_table;
pub mod input;
pub mod min_heap;
pub mod mission;
pub mod navigator;
pub mod obstacles;
pub mod pathfinding;
pub mod scenario;
pub mod wizard;

pub use config::Config;
pub use error::{NavError, Result};
pub use event_log::{EventLog, NavEvent};
pub use grid::{Grid, NodeId, Position};
pub use mission::{execute, run_mission, Mission, MissionRun, Objective};
pub use navigator::Navigator;
pub use obstacles::ObstacleIndex;
pub use scenario::Scenario;
