//! CLI module graph.

pub mod command;
pub mod config;
pub mod output;
pub mod run;
pub mod watchlist;

use std::path::Path;

use crate::error::Result;
use crate::infrastructure::config::settings::Config;

use command::{Cli, Commands, ConfigCommand};

/// Configuration file used when `--config` is not given.
pub const DEFAULT_CONFIG: &str = "config.toml";

/// Load an explicitly named config file, or the default one if present.
pub(crate) fn load_config(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => Config::load(path),
        None => Config::load_or_default(DEFAULT_CONFIG),
    }
}

/// Dispatch a parsed command line.
///
/// # Errors
///
/// Returns the first error reported by the selected command.
pub async fn execute(cli: Cli) -> Result<()> {
    output::configure(output::OutputConfig::new(cli.json, cli.quiet));

    match cli.command {
        Commands::Run(args) => run::execute(&args).await,
        Commands::Watchlist(args) => watchlist::execute(args.config.as_deref()),
        Commands::Config(ConfigCommand::Validate(args)) => {
            config::execute_validate(args.config.as_deref())
        }
    }
}
