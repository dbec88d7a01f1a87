//! Command-line interface definitions.
//!
//! Defines the CLI structure for the tradewatch application using `clap`.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Relay Hyperliquid trade openings of watched traders to Telegram
#[derive(Parser, Debug)]
#[command(name = "tradewatch")]
#[command(version)]
pub struct Cli {
    /// JSON output for scripting
    #[arg(long, global = true)]
    pub json: bool,

    /// Decrease output verbosity
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level subcommands for the tradewatch CLI.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the relay and the Telegram bot (foreground)
    Run(RunArgs),

    /// Print the persisted watch-list
    Watchlist(ConfigPathArg),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigCommand),
}

/// Subcommands for `tradewatch config`.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Validate the configuration file and the Telegram environment.
    Validate(ConfigPathArg),
}

/// Shared argument struct for commands that only need a configuration path.
///
/// Without `--config`, `config.toml` in the working directory is used if it
/// exists and built-in defaults otherwise.
#[derive(Parser, Debug)]
pub struct ConfigPathArg {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// Arguments for the `run` subcommand.
#[derive(Parser, Debug)]
pub struct RunArgs {
    /// Path to the configuration file.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the configured log level (e.g. debug, info, warn)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Emit logs as JSON lines
    #[arg(long)]
    pub json_logs: bool,
}
