use log::{info, warn, LevelFilter};
use serde::Deserialize;
use std::fs;
use std::path::Path;

/// Default configuration file name
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub logging: LoggingConfig,
    #[serde(default)]
    pub output: OutputConfig,
    #[serde(default)]
    pub discovery: DiscoveryConfig,
    #[serde(default)]
    pub visual: VisualConfig,
}

#[derive(Debug, Deserialize)]
pub struct LoggingConfig {
    /// env_logger filter used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub level: String,
}

#[derive(Debug, Deserialize)]
pub struct OutputConfig {
    #[serde(default)]
    pub write_json: bool,
    #[serde(default = "default_json_path")]
    pub json_path: String,
    #[serde(default = "default_print_summary")]
    pub print_summary: bool,
}

#[derive(Debug, Deserialize, Default)]
pub struct DiscoveryConfig {
    /// Replaces the radius from the objectives file when set
    #[serde(default)]
    pub radius_override: Option<f64>,
}

#[derive(Debug, Deserialize)]
pub struct VisualConfig {
    #[serde(default = "default_window_title")]
    pub window_title: String,
    #[serde(default = "default_cell_size")]
    pub cell_size: f32,
    /// Seconds between replayed moves
    #[serde(default = "default_step_interval")]
    pub step_interval: f32,
    #[serde(default = "default_bg_r")]
    pub background_r: u8,
    #[serde(default = "default_bg_g")]
    pub background_g: u8,
    #[serde(default = "default_bg_b")]
    pub background_b: u8,
}

// Default values
fn default_log_level() -> String { "info".to_string() }
fn default_json_path() -> String { "events.json".to_string() }
fn default_print_summary() -> bool { true }
fn default_window_title() -> String { "wizardnav - mission replay".to_string() }
fn default_cell_size() -> f32 { 24.0 }
fn default_step_interval() -> f32 { 0.15 }
fn default_bg_r() -> u8 { 30 }
fn default_bg_g() -> u8 { 30 }
fn default_bg_b() -> u8 { 30 }

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            write_json: false,
            json_path: default_json_path(),
            print_summary: default_print_summary(),
        }
    }
}

impl Default for VisualConfig {
    fn default() -> Self {
        Self {
            window_title: default_window_title(),
            cell_size: default_cell_size(),
            step_interval: default_step_interval(),
            background_r: default_bg_r(),
            background_g: default_bg_g(),
            background_b: default_bg_b(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logging: LoggingConfig::default(),
            output: OutputConfig::default(),
            discovery: DiscoveryConfig::default(),
            visual: VisualConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(contents: &str) -> crate::error::Result<Self> {
        Ok(toml::from_str(contents)?)
    }

    /// Load configuration from file, or use defaults if the file is missing
    /// or malformed
    pub fn load(path: &Path) -> Self {
        match fs::read_to_string(path) {
            Ok(contents) => match Self::from_toml(&contents) {
                Ok(config) => {
                    info!("Loaded configuration from {}", path.display());
                    config
                }
                Err(e) => {
                    warn!("Failed to parse {}: {}", path.display(), e);
                    warn!("Using default configuration");
                    Config::default()
                }
            },
            Err(_) => {
                info!("No {} found, using default configuration", path.display());
                Config::default()
            }
        }
    }
}

/// Install env_logger for a binary.
///
/// With `RUST_LOG` set, it decides everything. Otherwise every record
/// reaches the logger and `log::max_level` gates output: `info` until the
/// configuration is known, then whatever [`apply_log_level`] sets.
pub fn init_logging(verbose: bool) {
    let from_env = std::env::var_os("RUST_LOG").is_some();
    let mut builder =
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("trace"));
    builder.format_timestamp(None);
    builder.init();

    if !from_env {
        log::set_max_level(if verbose { LevelFilter::Debug } else { LevelFilter::Info });
    }
}

/// Apply `[logging] level` unless RUST_LOG or `--verbose` already decided
pub fn apply_log_level(config: &Config, verbose: bool) {
    if verbose || std::env::var_os("RUST_LOG").is_some() {
        return;
    }
    match config.logging.level.parse::<LevelFilter>() {
        Ok(level) => log::set_max_level(level),
        Err(_) => warn!("Unknown log level '{}', keeping info", config.logging.level),
    }
}
