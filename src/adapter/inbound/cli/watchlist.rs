//! Handler for the `watchlist` command.

use std::io::ErrorKind;
use std::path::Path;

use crate::adapter::inbound::cli::{load_config, output};
use crate::adapter::outbound::file::JsonFileRepository;
use crate::error::{Error, Result};
use crate::port::WatchListRepository;

/// Execute `watchlist`: print the persisted addresses.
pub fn execute(config_path: Option<&Path>) -> Result<()> {
    let config = load_config(config_path)?;
    let repository = JsonFileRepository::new(config.storage.path.clone());

    let traders = match repository.load() {
        Ok(traders) => traders,
        Err(Error::Io(e)) if e.kind() == ErrorKind::NotFound => Vec::new(),
        Err(e) => {
            output::warning(&format!(
                "{} is unreadable and will be treated as empty: {e}",
                repository.path().display()
            ));
            Vec::new()
        }
    };

    output::section("Tracked Traders");
    output::field("File", repository.path().display());
    if traders.is_empty() {
        output::note("No traders tracked.");
        return Ok(());
    }
    for trader in &traders {
        output::item(trader);
    }
    Ok(())
}
