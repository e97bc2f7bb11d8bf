//! Replay viewer for a mission
//!
//! Runs the mission from the three input files, then animates the agent
//! along every `Moving to` event on top of the final map.
//!
//! Keys: Space pause/resume, Right single step, R restart,
//! C copy the map as text, Esc quit.

use arboard::Clipboard;
use clap::Parser;
use macroquad::prelude::*;
use macroquad::window::Conf;
use std::collections::HashSet;
use std::path::PathBuf;
use wizardnav::config::{apply_log_level, init_logging, VisualConfig, DEFAULT_CONFIG_PATH};
use wizardnav::grid::IMPASSABLE;
use wizardnav::{execute, input, Config, Grid, MissionRun, NavEvent, Position};

#[derive(Parser, Debug)]
#[command(name = "visualize", about = "Replay a wizardnav mission")]
struct Cli {
    nodes: PathBuf,
    edges: PathBuf,
    objectives: PathBuf,

    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,
}

/// Replay state
struct Replay {
    grid: Grid,
    /// Cells that held a hidden obstacle before the run
    initially_hidden: HashSet<Position>,
    /// Agent position after each event
    frames: Vec<(Position, String)>,
    start: Position,
    frame: usize,
    playing: bool,
    timer: f32,
    outcome: String,
    visual: VisualConfig,
}

impl Replay {
    fn new(initial: &Grid, start: Position, run: MissionRun, visual: VisualConfig) -> Self {
        let initially_hidden = initial
            .nodes()
            .filter(|(_, node)| node.is_hidden_obstacle())
            .map(|(_, node)| node.position)
            .collect();

        let mut agent = start;
        let mut frames = Vec::with_capacity(run.log.len());
        for logged in run.log.events() {
            if let NavEvent::MovingTo { x, y } = logged.event {
                agent = Position::new(x, y);
            }
            frames.push((agent, logged.event.to_string()));
        }

        let outcome = match &run.result {
            Ok(end) => format!("Mission complete at {}", end),
            Err(e) => format!("Mission failed: {}", e),
        };

        Replay {
            grid: run.grid,
            initially_hidden,
            frames,
            start,
            frame: 0,
            playing: true,
            timer: 0.0,
            outcome,
            visual,
        }
    }

    fn agent(&self) -> Position {
        if self.frame == 0 {
            self.start
        } else {
            self.frames[self.frame - 1].0
        }
    }

    /// Positions visited up to the current frame
    fn trail(&self) -> HashSet<Position> {
        let mut trail: HashSet<Position> =
            self.frames[..self.frame].iter().map(|(p, _)| *p).collect();
        trail.insert(self.start);
        trail
    }

    fn step(&mut self) {
        if self.frame < self.frames.len() {
            self.frame += 1;
        }
    }

    fn update(&mut self, delta: f32) {
        if !self.playing {
            return;
        }
        let interval = self.visual.step_interval.max(0.01);
        self.timer += delta;
        while self.timer >= interval {
            self.timer -= interval;
            self.step();
        }
    }

    fn copy_to_clipboard(&self) {
        let text = self.grid.render_ascii(Some(self.agent()));
        match Clipboard::new() {
            Ok(mut clipboard) => {
                if let Err(e) = clipboard.set_text(&text) {
                    log::warn!("Failed to copy to clipboard: {}", e);
                } else {
                    log::info!("Map copied to clipboard");
                    // Keep clipboard alive for a moment so clipboard managers can capture it
                    std::thread::sleep(std::time::Duration::from_millis(100));
                }
            }
            Err(e) => {
                log::warn!("Failed to access clipboard: {}", e);
            }
        }
    }

    fn draw(&self) {
        clear_background(Color::from_rgba(
            self.visual.background_r,
            self.visual.background_g,
            self.visual.background_b,
            255,
        ));

        let size = self.visual.cell_size;
        let agent = self.agent();
        let trail = self.trail();

        for (_, node) in self.grid.nodes() {
            let Position { x, y } = node.position;
            let color = if node.position == agent {
                BLUE
            } else if node.node_type == IMPASSABLE {
                Color::from_rgba(90, 90, 90, 255)
            } else if node.is_known_obstacle() {
                RED
            } else if node.is_hidden_obstacle() {
                Color::from_rgba(120, 60, 140, 255) // Never discovered
            } else if self.initially_hidden.contains(&node.position) {
                Color::from_rgba(60, 160, 160, 255) // Cleared by the wizard
            } else if trail.contains(&node.position) {
                Color::from_rgba(200, 180, 60, 255)
            } else {
                Color::from_rgba(60, 60, 60, 255)
            };
            draw_rectangle(x as f32 * size, y as f32 * size, size - 1.0, size - 1.0, color);
        }

        let last_event = if self.frame == 0 {
            "-"
        } else {
            self.frames[self.frame - 1].1.as_str()
        };
        let info = format!(
            "Event {}/{}: {}\n{}\nSpace: pause  Right: step  R: restart  C: copy  Esc: quit",
            self.frame,
            self.frames.len(),
            last_event,
            self.outcome
        );
        let top = self.grid.rows as f32 * size + 20.0;
        for (i, line) in info.lines().enumerate() {
            draw_text(line, 10.0, top + i as f32 * 20.0, 20.0, WHITE);
        }
    }
}

fn window_conf() -> Conf {
    let cli = Cli::parse();
    let config = Config::load(&cli.config);
    Conf {
        window_title: config.visual.window_title,
        ..Default::default()
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    let cli = Cli::parse();
    init_logging(false);
    let config = Config::load(&cli.config);
    apply_log_level(&config, false);

    let loaded = input::load_grid(&cli.nodes, &cli.edges)
        .and_then(|grid| input::load_mission(&cli.objectives).map(|mission| (grid, mission)));
    let (grid, mut mission) = match loaded {
        Ok(loaded) => loaded,
        Err(e) => {
            log::error!("{}", e);
            std::process::exit(1);
        }
    };
    if let Some(radius) = config.discovery.radius_override {
        mission.radius = radius;
    }

    let initial = grid.clone();
    let run = execute(grid, &mission);
    let mut replay = Replay::new(&initial, mission.start, run, config.visual);

    loop {
        if is_key_pressed(KeyCode::Space) {
            replay.playing = !replay.playing;
        }
        if is_key_pressed(KeyCode::Right) {
            replay.playing = false;
            replay.step();
        }
        if is_key_pressed(KeyCode::R) {
            replay.frame = 0;
            replay.timer = 0.0;
        }
        if is_key_pressed(KeyCode::C) {
            replay.copy_to_clipboard();
        }
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        replay.update(get_frame_time());
        replay.draw();

        next_frame().await
    }
}
