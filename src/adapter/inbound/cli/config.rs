//! Handler for the `config` command group.

use std::path::Path;

use crate::adapter::inbound::cli::{load_config, output, DEFAULT_CONFIG};
use crate::error::Result;
use crate::infrastructure::config::telegram::TelegramSecrets;

/// Execute `config validate`.
///
/// Checks the file (or the defaults) and that the Telegram secrets are
/// present in the environment, since `run` would fail on either.
pub fn execute_validate(path: Option<&Path>) -> Result<()> {
    let source = path.map_or_else(
        || {
            if Path::new(DEFAULT_CONFIG).exists() {
                DEFAULT_CONFIG.to_string()
            } else {
                "(defaults)".to_string()
            }
        },
        |p| p.display().to_string(),
    );

    let config = load_config(path)?;
    let secrets = TelegramSecrets::from_env()?;

    output::section("Configuration Valid");
    output::field("Source", source);
    output::field("Feed", &config.feed.ws_url);
    output::field("Roles", config.feed.notify_roles.join(", "));
    output::field("Watch-list", config.storage.path.display());
    output::field("Admin chat", secrets.admin_chat_id);
    output::field(
        "Commands",
        if config.telegram.restrict_commands_to_admin {
            "admin chat only"
        } else {
            "any chat"
        },
    );
    output::success("Configuration and environment are valid");
    Ok(())
}
