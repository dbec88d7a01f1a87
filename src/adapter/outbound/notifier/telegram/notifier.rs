//! Telegram notification and command handling.
//!
//! Provides the [`TelegramNotifier`] for sending trade notifications and the
//! command listener for bot commands. Notifications pass through a bounded
//! queue to a background worker that retries failed sends.

use std::future::IntoFuture;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use teloxide::prelude::*;
use teloxide::types::{BotCommand, ParseMode};
use tokio::sync::mpsc::{self, error::TrySendError};
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

use crate::error::{Error, Result};
use crate::infrastructure::config::telegram::TelegramAppConfig;
use crate::port::{outbound::notifier::Event, outbound::notifier::Notifier};

use super::auth::{command_response_for_message, CommandAuth};
use super::command::bot_commands;
use super::control::TelegramControl;
use super::format::format_event_message;

/// Sends one formatted message to a chat.
#[async_trait]
pub trait MessageTransport: Send + Sync {
    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()>;
}

#[async_trait]
impl MessageTransport for Bot {
    async fn send_markdown(&self, chat_id: i64, text: &str) -> Result<()> {
        self.send_message(ChatId(chat_id), text)
            .parse_mode(ParseMode::MarkdownV2)
            .await
            .map(|_| ())
            .map_err(|e| Error::Telegram(e.to_string()))
    }
}

/// Timeout and retry settings for one notification.
#[derive(Debug, Clone, Copy)]
pub struct DeliveryPolicy {
    pub send_timeout: Duration,
    pub max_attempts: u32,
    /// Delay before the first retry, doubled after each further failure.
    pub retry_delay: Duration,
}

impl From<&TelegramAppConfig> for DeliveryPolicy {
    fn from(config: &TelegramAppConfig) -> Self {
        Self {
            send_timeout: Duration::from_secs(config.send_timeout_secs),
            max_attempts: config.max_attempts,
            retry_delay: Duration::from_millis(config.retry_delay_ms),
        }
    }
}

impl DeliveryPolicy {
    /// Longest time [`deliver`] can take for one message: every attempt
    /// timing out plus every retry delay.
    #[must_use]
    pub fn worst_case(&self) -> Duration {
        let mut total = self.send_timeout.saturating_mul(self.max_attempts.max(1));
        let mut delay = self.retry_delay;
        for _ in 1..self.max_attempts {
            total = total.saturating_add(delay);
            delay = delay.saturating_mul(2);
        }
        total
    }
}

/// Send `text`, retrying per `policy`. Returns the last error on failure.
pub async fn deliver<T>(
    transport: &T,
    chat_id: i64,
    text: &str,
    policy: &DeliveryPolicy,
) -> Result<()>
where
    T: MessageTransport + ?Sized,
{
    let mut delay = policy.retry_delay;
    let mut attempt = 1;
    loop {
        let result =
            match tokio::time::timeout(policy.send_timeout, transport.send_markdown(chat_id, text))
                .await
            {
                Ok(result) => result,
                Err(_) => Err(Error::Timeout(policy.send_timeout)),
            };

        match result {
            Ok(()) => return Ok(()),
            Err(e) if attempt >= policy.max_attempts => return Err(e),
            Err(e) => {
                warn!(attempt, error = %e, "Telegram send failed, retrying");
                tokio::time::sleep(delay).await;
                delay = delay.saturating_mul(2);
                attempt += 1;
            }
        }
    }
}

/// Telegram notifier that sends messages to the administrator chat.
///
/// `notify` never blocks: when the queue is full the new notification is
/// dropped.
pub struct TelegramNotifier {
    sender: mpsc::Sender<Event>,
}

impl TelegramNotifier {
    /// Create the notifier and spawn its delivery worker.
    ///
    /// The worker exits once every clone of the notifier is dropped and the
    /// queue is drained.
    pub fn spawn<T>(
        transport: Arc<T>,
        chat_id: i64,
        profile_url: String,
        config: &TelegramAppConfig,
    ) -> (Self, JoinHandle<()>)
    where
        T: MessageTransport + 'static,
    {
        let (sender, receiver) = mpsc::channel(config.queue_capacity.max(1));
        let policy = DeliveryPolicy::from(config);
        let handle = tokio::spawn(delivery_worker(
            transport,
            chat_id,
            profile_url,
            policy,
            receiver,
        ));
        (Self { sender }, handle)
    }
}

impl Notifier for TelegramNotifier {
    fn notify(&self, event: Event) {
        match self.sender.try_send(event) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => {
                warn!("Telegram notification queue full, dropping notification");
            }
            Err(TrySendError::Closed(_)) => {
                warn!("Telegram notifier channel closed");
            }
        }
    }
}

/// Background worker that sends Telegram messages.
async fn delivery_worker<T>(
    transport: Arc<T>,
    chat_id: i64,
    profile_url: String,
    policy: DeliveryPolicy,
    mut receiver: mpsc::Receiver<Event>,
) where
    T: MessageTransport + 'static,
{
    info!(chat_id, "Telegram notifier started");

    while let Some(event) = receiver.recv().await {
        let text = format_event_message(&event, &profile_url);
        if let Err(e) = deliver(transport.as_ref(), chat_id, &text, &policy).await {
            error!(
                error = %e,
                attempts = policy.max_attempts,
                "Failed to send Telegram message, dropping notification"
            );
        }
    }

    info!("Telegram notifier worker shutting down");
}

/// Handle inbound Telegram commands until the dispatcher stops.
pub async fn run_command_listener(
    bot: Bot,
    control: TelegramControl,
    auth: CommandAuth,
    reply_timeout: Duration,
) {
    // Register commands with Telegram so they appear in the "/" menu
    if let Err(e) = register_bot_commands(&bot).await {
        warn!(error = %e, "Failed to register bot commands with Telegram");
    }

    // Commands addressed to other bots in a group must be ignored
    let bot_username = match bot.get_me().await {
        Ok(me) => me.user.username,
        Err(e) => {
            warn!(error = %e, "Failed to fetch bot username, accepting any @mention");
            None
        }
    };

    info!(username = ?bot_username, "Telegram command listener started");

    teloxide::repl(bot, move |bot: Bot, msg: Message| {
        let control = control.clone();
        let bot_username = bot_username.clone();
        async move {
            let Some(text) = msg.text() else {
                return respond(());
            };

            if let Some(response) = command_response_for_message(
                text,
                msg.chat.id,
                bot_username.as_deref(),
                &auth,
                &control,
            ) {
                let reply = bot.send_message(msg.chat.id, response).into_future();
                match tokio::time::timeout(reply_timeout, reply).await {
                    Ok(Ok(_)) => {}
                    Ok(Err(e)) => error!(error = %e, "Failed to send Telegram command response"),
                    Err(_) => warn!(
                        chat_id = msg.chat.id.0,
                        "Timed out sending Telegram command response"
                    ),
                }
            }

            respond(())
        }
    })
    .await;
}

/// Register bot commands with Telegram for the "/" menu.
async fn register_bot_commands(bot: &Bot) -> std::result::Result<(), teloxide::RequestError> {
    let commands: Vec<BotCommand> = bot_commands()
        .into_iter()
        .map(|(cmd, desc)| BotCommand::new(cmd, desc))
        .collect();

    bot.set_my_commands(commands).await?;
    info!("Registered bot commands with Telegram");
    Ok(())
}
