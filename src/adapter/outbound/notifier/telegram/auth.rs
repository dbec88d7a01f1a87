//! Authorization for Telegram command handling.

use teloxide::types::ChatId;
use tracing::warn;

use super::command::{command_help, parse_command, CommandParseError};
use super::control::TelegramControl;

/// Which chats may issue commands.
#[derive(Debug, Clone, Copy)]
pub struct CommandAuth {
    admin_chat: ChatId,
    restrict_to_admin: bool,
}

impl CommandAuth {
    #[must_use]
    pub const fn new(admin_chat: ChatId, restrict_to_admin: bool) -> Self {
        Self {
            admin_chat,
            restrict_to_admin,
        }
    }

    /// Check if a chat is authorized to send commands.
    fn allows(&self, incoming_chat: ChatId) -> bool {
        if !self.restrict_to_admin || incoming_chat == self.admin_chat {
            return true;
        }

        warn!(
            chat_id = incoming_chat.0,
            "Ignoring Telegram message from unauthorized chat"
        );
        false
    }
}

/// Process a message and return a response if it's an authorized command.
///
/// Returns `None` for messages from unauthorized chats and for text that is
/// not a command for this bot.
pub fn command_response_for_message(
    text: &str,
    incoming_chat: ChatId,
    bot_username: Option<&str>,
    auth: &CommandAuth,
    control: &TelegramControl,
) -> Option<String> {
    if !auth.allows(incoming_chat) {
        return None;
    }

    match parse_command(text, bot_username) {
        Ok(command) => Some(control.execute(command)),
        Err(CommandParseError::NotACommand) => None,
        Err(err @ CommandParseError::UnknownCommand(_)) => {
            Some(format!("{err}\n\n{}", command_help()))
        }
        Err(err) => Some(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::watchlist::WatchListStore;
    use crate::port::inbound::watchlist::WatchListControl;
    use crate::testkit::store::MemoryRepository;
    use std::sync::Arc;

    const ADMIN: ChatId = ChatId(42);
    const OTHER: ChatId = ChatId(7);
    const BOT: Option<&str> = Some("tradewatch_bot");

    fn setup() -> (TelegramControl, Arc<MemoryRepository>, Arc<WatchListStore>) {
        let repo = Arc::new(MemoryRepository::new());
        let store = Arc::new(WatchListStore::open(repo.clone()));
        (TelegramControl::new(store.clone()), repo, store)
    }

    #[test]
    fn open_mode_answers_any_chat() {
        let (control, _, _) = setup();
        let auth = CommandAuth::new(ADMIN, false);

        let reply = command_response_for_message("/list", OTHER, BOT, &auth, &control);
        assert_eq!(reply.as_deref(), Some("No traders tracked."));
    }

    #[test]
    fn restricted_mode_ignores_other_chats() {
        let (control, _, store) = setup();
        let auth = CommandAuth::new(ADMIN, true);

        assert!(command_response_for_message("/add 0xabc", OTHER, BOT, &auth, &control).is_none());
        assert!(store.list().is_empty());

        let reply = command_response_for_message("/add 0xabc", ADMIN, BOT, &auth, &control);
        assert_eq!(reply.as_deref(), Some("Added trader: 0xabc"));
    }

    #[test]
    fn ignores_non_commands() {
        let (control, _, _) = setup();
        let auth = CommandAuth::new(ADMIN, false);

        assert!(command_response_for_message("hello there", ADMIN, BOT, &auth, &control).is_none());
    }

    #[test]
    fn usage_error_does_not_mutate() {
        let (control, repo, store) = setup();
        let auth = CommandAuth::new(ADMIN, false);

        let reply = command_response_for_message("/add", ADMIN, BOT, &auth, &control);

        assert_eq!(reply.as_deref(), Some("Usage: /add <trader_address>"));
        assert!(store.list().is_empty());
        assert_eq!(repo.save_count(), 0);
    }

    #[test]
    fn unknown_command_includes_help() {
        let (control, _, _) = setup();
        let auth = CommandAuth::new(ADMIN, false);

        let reply = command_response_for_message("/status", ADMIN, BOT, &auth, &control)
            .expect("unknown commands get a reply");

        assert!(reply.starts_with("Unknown command: /status"));
        assert!(reply.contains(command_help()));
    }

    #[test]
    fn command_for_another_bot_does_not_mutate() {
        let (control, repo, store) = setup();
        let auth = CommandAuth::new(ADMIN, false);

        let reply =
            command_response_for_message("/add@other_bot 0xabc", ADMIN, BOT, &auth, &control);

        assert!(reply.is_none());
        assert!(store.list().is_empty());
        assert_eq!(repo.save_count(), 0);
    }

    #[test]
    fn own_mention_is_answered() {
        let (control, _, _) = setup();
        let auth = CommandAuth::new(ADMIN, false);

        let reply =
            command_response_for_message("/Add@tradewatch_bot 0xabc", ADMIN, BOT, &auth, &control);
        assert_eq!(reply.as_deref(), Some("Added trader: 0xabc"));
    }
}
