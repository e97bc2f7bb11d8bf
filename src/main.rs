//! Command-line runner: reads the nodes, edges and objectives files, runs
//! the mission and writes the progress log.
//!
//! ```bash
//! wizardnav nodes.txt edges.txt objectives.txt output.txt
//! wizardnav nodes.txt edges.txt objectives.txt output.txt --json events.json -v
//! ```

use clap::Parser;
use log::{error, info};
use std::fs::File;
use std::io::BufWriter;
use std::path::PathBuf;
use wizardnav::config::{apply_log_level, init_logging, DEFAULT_CONFIG_PATH};
use wizardnav::{execute, input, Config, Result};

#[derive(Parser, Debug)]
#[command(
    name = "wizardnav",
    version,
    about = "Grid navigation with hidden obstacles and a wizard"
)]
struct Cli {
    /// Grid size and node types
    nodes: PathBuf,
    /// Weighted connections between nodes
    edges: PathBuf,
    /// Radius, start position and objectives
    objectives: PathBuf,
    /// Where to write the progress log
    output: PathBuf,

    /// Configuration file
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Also export the events as JSON to this path
    #[arg(long)]
    json: Option<PathBuf>,

    /// Debug-level logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(cli: &Cli) -> Result<()> {
    let config = Config::load(&cli.config);
    apply_log_level(&config, cli.verbose);

    let grid = input::load_grid(&cli.nodes, &cli.edges)?;
    let mut mission = input::load_mission(&cli.objectives)?;
    if let Some(radius) = config.discovery.radius_override {
        info!("Radius override: {} (file says {})", radius, mission.radius);
        mission.radius = radius;
    }

    let run = execute(grid, &mission);

    // The log is written even when the mission failed part-way
    let mut writer = BufWriter::new(File::create(&cli.output)?);
    run.log.write_text(&mut writer)?;

    let json_path = cli
        .json
        .clone()
        .or_else(|| config.output.write_json.then(|| PathBuf::from(&config.output.json_path)));
    if let Some(path) = json_path {
        run.log.save_json(&path.display().to_string())?;
        info!("Wrote JSON event log to {}", path.display());
    }

    if config.output.print_summary {
        info!("\n{}", run.log.summary());
    }

    run.result.map(|end| info!("Finished at {}", end))
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(e) = run(&cli) {
        error!("{}", e);
        std::process::exit(1);
    }
}
