//! CLI argument parsing for mood-tui.

mod args;

pub use args::{parse_args, print_usage, CliCommand, CliConfig, VERSION};
