//! Handler for the `run` command.

use tokio::signal;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::adapter::inbound::cli::command::RunArgs;
use crate::adapter::inbound::cli::load_config;
use crate::error::Result;
use crate::infrastructure::config::telegram::TelegramSecrets;
use crate::infrastructure::orchestration::run_with_shutdown;

/// Execute the run command.
///
/// Configuration and secrets are checked before anything is started, so a
/// bad setup fails fast with a non-zero exit.
pub async fn execute(args: &RunArgs) -> Result<()> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(level) = &args.log_level {
        config.logging.level.clone_from(level);
    }
    if args.json_logs {
        config.logging.format = "json".to_string();
    }
    let secrets = TelegramSecrets::from_env()?;

    config.init_logging();
    info!(version = env!("CARGO_PKG_VERSION"), "tradewatch starting");

    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    tokio::spawn(async move {
        if let Err(e) = signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
        info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });

    run_with_shutdown(config, secrets, shutdown_rx).await
}
