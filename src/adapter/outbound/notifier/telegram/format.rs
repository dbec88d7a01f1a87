//! Message formatting for Telegram notifications.

use crate::domain::TradeOpened;
use crate::port::outbound::notifier::Event;

/// Format an event into a `MarkdownV2` Telegram message.
pub fn format_event_message(event: &Event, profile_url: &str) -> String {
    match event {
        Event::TradeOpened(trade) => format_trade_opened(trade, profile_url),
    }
}

fn format_trade_opened(trade: &TradeOpened, profile_url: &str) -> String {
    let address = trade.trader.as_str();
    format!(
        "*New Trade Opened*\n\
        👤 Trader: [{}]({})\n\
        📊 Symbol: {}\n\
        🎯 Entry Price: {}\n\
        ⛔ Stop Loss: {}\n\
        ✅ Take Profit: {}",
        escape_markdown(address),
        escape_link_url(&trader_profile_url(profile_url, address)),
        escape_markdown(&trade.symbol.to_string()),
        escape_markdown(&trade.entry_price.to_string()),
        escape_markdown(&trade.stop_loss.to_string()),
        escape_markdown(&trade.take_profit.to_string()),
    )
}

/// Public profile page of a trader.
pub fn trader_profile_url(base: &str, address: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), address)
}

/// Escape special characters for Telegram `MarkdownV2`.
pub fn escape_markdown(text: &str) -> String {
    let special_chars = [
        '\\', '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.',
        '!',
    ];
    let mut result = String::with_capacity(text.len() * 2);

    for c in text.chars() {
        if special_chars.contains(&c) {
            result.push('\\');
        }
        result.push(c);
    }

    result
}

/// Inside `(...)` of an inline link only `)` and `\` are escaped.
fn escape_link_url(url: &str) -> String {
    let mut result = String::with_capacity(url.len());
    for c in url.chars() {
        if c == ')' || c == '\\' {
            result.push('\\');
        }
        result.push(c);
    }
    result
}
