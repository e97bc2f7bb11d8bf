use serde::{Deserialize, Serialize};
use std::fmt;
use std::io::Write;

use crate::error::Result;

/// Progress events emitted while running a mission
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum NavEvent {
    /// Wizard picked an obstacle class to clear
    WizardChoice { class: u32 },
    /// Agent stepped onto (x, y)
    MovingTo { x: i32, y: i32 },
    /// A newly revealed obstacle cut the planned route
    PathImpassable,
    /// Objective number (1-based) reached
    ObjectiveReached { objective: usize },
}

impl fmt::Display for NavEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NavEvent::WizardChoice { class } => write!(f, "Number {} is chosen!", class),
            NavEvent::MovingTo { x, y } => write!(f, "Moving to {}-{}", x, y),
            NavEvent::PathImpassable => write!(f, "Path is impassable!"),
            NavEvent::ObjectiveReached { objective } => {
                write!(f, "Objective {} reached!", objective)
            }
        }
    }
}

/// Event tagged with the objective being pursued when it happened
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct LoggedEvent {
    pub objective: usize,
    pub event: NavEvent,
}

/// In-order record of every event of a run
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Vec<LoggedEvent>,
}

impl EventLog {
    pub fn new() -> Self {
        EventLog { events: Vec::new() }
    }

    pub fn record(&mut self, objective: usize, event: NavEvent) {
        log::trace!("[objective {}] {}", objective, event);
        self.events.push(LoggedEvent { objective, event });
    }

    pub fn events(&self) -> &[LoggedEvent] {
        &self.events
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Text lines in emission order
    pub fn lines(&self) -> Vec<String> {
        self.events.iter().map(|e| e.event.to_string()).collect()
    }

    /// Write the plain text log, one event per line
    pub fn write_text<W: Write>(&self, writer: &mut W) -> Result<()> {
        for logged in &self.events {
            writeln!(writer, "{}", logged.event)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Save log to JSON file
    pub fn save_json(&self, path: &str) -> Result<()> {
        let json = serde_json::to_string_pretty(&self.events)?;
        std::fs::write(path, json)?;
        Ok(())
    }

    /// Get summary statistics
    pub fn summary(&self) -> String {
        let mut moves = 0;
        let mut replans = 0;
        let mut wizard_choices = 0;
        let mut reached = 0;

        for logged in &self.events {
            match logged.event {
                NavEvent::MovingTo { .. } => moves += 1,
                NavEvent::PathImpassable => replans += 1,
                NavEvent::WizardChoice { .. } => wizard_choices += 1,
                NavEvent::ObjectiveReached { .. } => reached += 1,
            }
        }

        format!(
            "Total Events: {}\n\
             Objectives Reached: {}\n\
             Moves: {}, Replans: {}, Wizard Choices: {}",
            self.events.len(),
            reached,
            moves,
            replans,
            wizard_choices
        )
    }
}
