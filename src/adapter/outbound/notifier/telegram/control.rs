//! Command execution against the watch-list.

use std::sync::Arc;

use tracing::error;

use crate::domain::{AddOutcome, RemoveOutcome};
use crate::port::inbound::watchlist::WatchListControl;

use super::command::{command_help, TelegramCommand};

pub const SAVE_FAILED: &str = "Failed to save watch-list, try again.";

/// Executes parsed commands and renders the reply text.
#[derive(Clone)]
pub struct TelegramControl {
    watchlist: Arc<dyn WatchListControl>,
}

impl TelegramControl {
    #[must_use]
    pub fn new(watchlist: Arc<dyn WatchListControl>) -> Self {
        Self { watchlist }
    }

    pub fn execute(&self, command: TelegramCommand) -> String {
        match command {
            TelegramCommand::Start | TelegramCommand::Help => command_help().to_string(),
            TelegramCommand::Add(address) => match self.watchlist.add(address.clone()) {
                Ok(AddOutcome::Added) => format!("Added trader: {address}"),
                Ok(AddOutcome::AlreadyTracked) => "Trader already tracked.".to_string(),
                Err(e) => {
                    error!(error = %e, trader = %address, "Failed to persist added trader");
                    SAVE_FAILED.to_string()
                }
            },
            TelegramCommand::Remove(address) => match self.watchlist.remove(&address) {
                Ok(RemoveOutcome::Removed) => format!("Removed trader: {address}"),
                Ok(RemoveOutcome::NotFound) => "Trader not found.".to_string(),
                Err(e) => {
                    error!(error = %e, trader = %address, "Failed to persist removed trader");
                    SAVE_FAILED.to_string()
                }
            },
            TelegramCommand::List => {
                let traders = self.watchlist.list();
                if traders.is_empty() {
                    return "No traders tracked.".to_string();
                }
                let lines: Vec<&str> = traders.iter().map(|t| t.as_str()).collect();
                format!("Tracked Traders:\n{}", lines.join("\n"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::watchlist::WatchListStore;
    use crate::testkit::domain::address;
    use crate::testkit::store::MemoryRepository;

    fn control_with(repo: MemoryRepository) -> (TelegramControl, Arc<WatchListStore>) {
        let store = Arc::new(WatchListStore::open(Arc::new(repo)));
        (TelegramControl::new(store.clone()), store)
    }

    #[test]
    fn list_empty() {
        let (control, _) = control_with(MemoryRepository::new());
        assert_eq!(control.execute(TelegramCommand::List), "No traders tracked.");
    }

    #[test]
    fn add_then_list() {
        let (control, _) = control_with(MemoryRepository::new());

        assert_eq!(
            control.execute(TelegramCommand::Add(address("0xABC"))),
            "Added trader: 0xabc"
        );
        assert_eq!(
            control.execute(TelegramCommand::Add(address("0xdef"))),
            "Added trader: 0xdef"
        );
        assert_eq!(
            control.execute(TelegramCommand::List),
            "Tracked Traders:\n0xabc\n0xdef"
        );
    }

    #[test]
    fn duplicate_add() {
        let (control, store) = control_with(MemoryRepository::with_addresses(vec![address("0xabc")]));

        assert_eq!(
            control.execute(TelegramCommand::Add(address("0xABC"))),
            "Trader already tracked."
        );
        assert_eq!(store.list().len(), 1);
    }

    #[test]
    fn remove_present_and_missing() {
        let (control, store) = control_with(MemoryRepository::with_addresses(vec![address("0xabc")]));

        assert_eq!(
            control.execute(TelegramCommand::Remove(address("0xdef"))),
            "Trader not found."
        );
        assert_eq!(
            control.execute(TelegramCommand::Remove(address("0xABC"))),
            "Removed trader: 0xabc"
        );
        assert!(store.list().is_empty());
    }

    #[test]
    fn save_failure_reports_and_leaves_list_unchanged() {
        let (control, store) = control_with(MemoryRepository::new().failing_saves());

        assert_eq!(control.execute(TelegramCommand::Add(address("0xabc"))), SAVE_FAILED);
        assert!(store.list().is_empty());
    }

    #[test]
    fn start_and_help_share_text() {
        let (control, _) = control_with(MemoryRepository::new());
        assert_eq!(
            control.execute(TelegramCommand::Start),
            control.execute(TelegramCommand::Help)
        );
    }
}
