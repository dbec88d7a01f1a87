//! Telegram command parsing.

use crate::domain::error::DomainError;
use crate::domain::TraderAddress;

/// Supported Telegram commands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TelegramCommand {
    Start,
    Help,
    Add(TraderAddress),
    Remove(TraderAddress),
    List,
}

pub const ADD_USAGE: &str = "Usage: /add <trader_address>";
pub const REMOVE_USAGE: &str = "Usage: /remove <trader_address>";

/// Parse error for Telegram command messages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandParseError {
    NotACommand,
    UnknownCommand(String),
    /// Wrong number of arguments; carries the usage line.
    Usage(&'static str),
    InvalidAddress(DomainError),
}

impl std::fmt::Display for CommandParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotACommand => write!(f, "message is not a command"),
            Self::UnknownCommand(cmd) => write!(f, "Unknown command: {cmd}"),
            Self::Usage(usage) => f.write_str(usage),
            Self::InvalidAddress(err) => write!(f, "Invalid address: {err}"),
        }
    }
}

impl std::error::Error for CommandParseError {}

/// Parse a Telegram message into a bot command.
///
/// Accepts `/cmd` and `/cmd@botname`, followed by whitespace-separated
/// arguments. Command names are case-insensitive. When `bot_username` is
/// known, a command addressed to another bot is [`CommandParseError::NotACommand`].
pub fn parse_command(
    text: &str,
    bot_username: Option<&str>,
) -> Result<TelegramCommand, CommandParseError> {
    let mut parts = text.split_whitespace();
    let Some(raw_command) = parts.next() else {
        return Err(CommandParseError::NotACommand);
    };
    if !raw_command.starts_with('/') {
        return Err(CommandParseError::NotACommand);
    }

    let command = match raw_command.split_once('@') {
        Some((head, mention)) => {
            if bot_username.is_some_and(|name| !name.eq_ignore_ascii_case(mention)) {
                return Err(CommandParseError::NotACommand);
            }
            head
        }
        None => raw_command,
    };
    let command = command.to_ascii_lowercase();
    let args: Vec<&str> = parts.collect();

    match command.as_str() {
        "/start" => Ok(TelegramCommand::Start),
        "/help" => Ok(TelegramCommand::Help),
        "/list" => Ok(TelegramCommand::List),
        "/add" => single_address(&args, ADD_USAGE).map(TelegramCommand::Add),
        "/remove" => single_address(&args, REMOVE_USAGE).map(TelegramCommand::Remove),
        _ => Err(CommandParseError::UnknownCommand(command)),
    }
}

fn single_address(args: &[&str], usage: &'static str) -> Result<TraderAddress, CommandParseError> {
    match args {
        [raw] => TraderAddress::parse(raw).map_err(CommandParseError::InvalidAddress),
        _ => Err(CommandParseError::Usage(usage)),
    }
}

/// Help text returned by `/start` and `/help`.
#[must_use]
pub const fn command_help() -> &'static str {
    "Hi! Use /add <address> to track a trader.\n\n\
    /add <address> - Track a trader\n\
    /remove <address> - Stop tracking a trader\n\
    /list - Show tracked traders\n\
    /help - Show this message"
}

/// Commands registered in the Telegram "/" menu.
#[must_use]
pub fn bot_commands() -> Vec<(&'static str, &'static str)> {
    vec![
        ("start", "Show welcome and help"),
        ("help", "Show available commands"),
        ("add", "Track a trader: /add <address>"),
        ("remove", "Stop tracking a trader: /remove <address>"),
        ("list", "Show tracked traders"),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::domain::address;

    #[test]
    fn parses_simple_commands() {
        assert_eq!(parse_command("/start", None), Ok(TelegramCommand::Start));
        assert_eq!(parse_command("/help", None), Ok(TelegramCommand::Help));
        assert_eq!(parse_command("/list", None), Ok(TelegramCommand::List));
    }

    #[test]
    fn accepts_own_bot_suffix() {
        assert_eq!(
            parse_command("/list@tradewatch_bot", Some("tradewatch_bot")),
            Ok(TelegramCommand::List)
        );
        assert_eq!(
            parse_command("/add@TradeWatch_Bot 0xABC", Some("tradewatch_bot")),
            Ok(TelegramCommand::Add(address("0xabc")))
        );
    }

    #[test]
    fn ignores_commands_for_other_bots() {
        assert_eq!(
            parse_command("/add@other_bot 0xabc", Some("tradewatch_bot")),
            Err(CommandParseError::NotACommand)
        );
        assert_eq!(
            parse_command("/status@other_bot", Some("tradewatch_bot")),
            Err(CommandParseError::NotACommand)
        );
    }

    #[test]
    fn any_suffix_accepted_when_username_unknown() {
        assert_eq!(
            parse_command("/list@whatever_bot", None),
            Ok(TelegramCommand::List)
        );
    }

    #[test]
    fn command_names_are_case_insensitive() {
        assert_eq!(
            parse_command("/Add 0xABC", None),
            Ok(TelegramCommand::Add(address("0xabc")))
        );
        assert_eq!(parse_command("/LIST", None), Ok(TelegramCommand::List));
        assert_eq!(
            parse_command("/Pause", None),
            Err(CommandParseError::UnknownCommand("/pause".into()))
        );
    }

    #[test]
    fn add_normalizes_address() {
        assert_eq!(
            parse_command("/add   0xAbC  ", None),
            Ok(TelegramCommand::Add(address("0xabc")))
        );
    }

    #[test]
    fn add_requires_exactly_one_argument() {
        assert_eq!(
            parse_command("/add", None),
            Err(CommandParseError::Usage(ADD_USAGE))
        );
        assert_eq!(
            parse_command("/add 0xa 0xb", None),
            Err(CommandParseError::Usage(ADD_USAGE))
        );
    }

    #[test]
    fn remove_requires_exactly_one_argument() {
        assert_eq!(
            parse_command("/remove", None),
            Err(CommandParseError::Usage(REMOVE_USAGE))
        );
        assert_eq!(
            parse_command("/remove 0xa", None),
            Ok(TelegramCommand::Remove(address("0xa")))
        );
    }

    #[test]
    fn plain_text_is_not_a_command() {
        assert_eq!(
            parse_command("hello", None),
            Err(CommandParseError::NotACommand)
        );
        assert_eq!(
            parse_command("   ", None),
            Err(CommandParseError::NotACommand)
        );
    }

    #[test]
    fn unknown_command_is_reported() {
        assert_eq!(
            parse_command("/pause", None),
            Err(CommandParseError::UnknownCommand("/pause".into()))
        );
    }

    #[test]
    fn usage_error_displays_usage_line() {
        assert_eq!(
            CommandParseError::Usage(ADD_USAGE).to_string(),
            "Usage: /add <trader_address>"
        );
    }

    #[test]
    fn help_lists_every_menu_command() {
        let help = command_help();
        assert!(help.starts_with("Hi! Use /add <address> to track a trader."));
        for (name, _) in bot_commands().into_iter().filter(|(n, _)| *n != "start") {
            assert!(help.contains(&format!("/{name}")), "missing /{name}");
        }
    }
}
