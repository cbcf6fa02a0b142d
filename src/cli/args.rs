//! CLI argument parsing and configuration.

use std::io;
use std::path::PathBuf;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Directory name used under the platform data/config directories
const APP_DIR_NAME: &str = "mood-tracker";
const DB_FILE_NAME: &str = "mood_tracker.db";
const CONFIG_FILE_NAME: &str = "config.json";
const LOG_DIR_NAME: &str = "logs";

/// Configuration from CLI arguments
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliConfig {
    pub db_path: PathBuf,
    pub config_path: PathBuf,
    pub log_dir: PathBuf,
    pub log_level: String,
}

/// What the command line asked for
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliCommand {
    Run(CliConfig),
    Help,
    Version,
}

/// Print usage information
pub fn print_usage() {
    eprintln!("Mood Tracker - Terminal mood journal");
    eprintln!();
    eprintln!("Usage: mood-tui [OPTIONS]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --db <PATH>            SQLite database file (default: <data dir>/mood-tracker/mood_tracker.db)");
    eprintln!("  --config <PATH>        Preferences JSON file (default: <config dir>/mood-tracker/config.json)");
    eprintln!("  --log-dir <PATH>       Directory for log files (default: <data dir>/mood-tracker/logs)");
    eprintln!("  --log-level <LEVEL>    trace|debug|info|warn|error (default: info, debug in debug builds)");
    eprintln!("  -h, --help             Show this help message");
    eprintln!("  -V, --version          Show version");
    eprintln!();
    eprintln!("Keys:");
    eprintln!("  Enter      Save mood         Up/Down    Select entry");
    eprintln!("  Del, ^D    Delete selected   ^L         Clear all (asks first)");
    eprintln!("  ^T         Toggle theme      ^E / ^W    Toggle input / list word wrap");
    eprintln!("  ^U         Clear input       Esc, ^Q    Quit");
}

/// Parse process arguments
pub fn parse_args() -> io::Result<CliCommand> {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_arg_list(&args)
}

/// Parse an argument list (without the program name)
pub fn parse_arg_list(args: &[String]) -> io::Result<CliCommand> {
    let mut db_path: Option<PathBuf> = None;
    let mut config_path: Option<PathBuf> = None;
    let mut log_dir: Option<PathBuf> = None;
    let mut log_level: Option<String> = None;

    let mut i = 0;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "-h" | "--help" => return Ok(CliCommand::Help),
            "-V" | "--version" => return Ok(CliCommand::Version),
            "--db" | "--config" | "--log-dir" | "--log-level" => {
                i += 1;
                let Some(value) = args.get(i) else {
                    return Err(io::Error::new(
                        io::ErrorKind::InvalidInput,
                        format!("Missing value for {}", arg),
                    ));
                };
                match arg {
                    "--db" => db_path = Some(PathBuf::from(value)),
                    "--config" => config_path = Some(PathBuf::from(value)),
                    "--log-dir" => log_dir = Some(PathBuf::from(value)),
                    _ => log_level = Some(value.clone()),
                }
                i += 1;
            }
            _ => {
                return Err(io::Error::new(
                    io::ErrorKind::InvalidInput,
                    format!("Unknown argument: {}", arg),
                ));
            }
        }
    }

    let data_dir = default_data_dir();
    Ok(CliCommand::Run(CliConfig {
        db_path: db_path.unwrap_or_else(|| data_dir.join(DB_FILE_NAME)),
        config_path: config_path.unwrap_or_else(|| default_config_dir().join(CONFIG_FILE_NAME)),
        log_dir: log_dir.unwrap_or_else(|| data_dir.join(LOG_DIR_NAME)),
        log_level: log_level.unwrap_or_else(|| crate::logging::default_log_level().to_string()),
    }))
}

/// `<platform data dir>/mood-tracker`, or `./mood-tracker` when unknown
fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}

/// `<platform config dir>/mood-tracker`, or `./mood-tracker` when unknown
fn default_config_dir() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR_NAME)
}
