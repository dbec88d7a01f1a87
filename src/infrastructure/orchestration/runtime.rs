//! Runtime lifecycle: builds every component and runs the relay and the
//! command listener until shutdown.

use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use tokio::sync::watch;
use tracing::{info, warn};

use crate::adapter::outbound::file::JsonFileRepository;
use crate::adapter::outbound::hyperliquid::HyperliquidFeed;
use crate::adapter::outbound::notifier::telegram::{
    run_command_listener, CommandAuth, DeliveryPolicy, TelegramControl, TelegramNotifier,
};
use crate::application::relay::{run_relay, TradeRelay};
use crate::application::watchlist::WatchListStore;
use crate::error::{Error, Result};
use crate::infrastructure::config::settings::Config;
use crate::infrastructure::config::telegram::TelegramSecrets;
use crate::infrastructure::exchange::ReconnectingFeed;

/// Run until `shutdown` flips to `true` or its sender is dropped.
///
/// # Errors
///
/// Returns an error if the relay task fails before shutdown.
pub async fn run_with_shutdown(
    config: Config,
    secrets: TelegramSecrets,
    shutdown: watch::Receiver<bool>,
) -> Result<()> {
    info!(
        ws_url = %config.feed.ws_url,
        storage = %config.storage.path.display(),
        "Starting tradewatch"
    );

    let repository = Arc::new(JsonFileRepository::new(config.storage.path.clone()));
    let store = Arc::new(WatchListStore::open(repository));

    let bot = Bot::new(&secrets.bot_token);
    let (notifier, delivery) = TelegramNotifier::spawn(
        Arc::new(bot.clone()),
        secrets.admin_chat_id,
        config.feed.profile_url.clone(),
        &config.telegram,
    );
    let relay = TradeRelay::new(Arc::new(notifier), config.feed.notify_roles.clone());

    let feed = ReconnectingFeed::new(
        HyperliquidFeed::new(config.feed.ws_url.clone()),
        config.reconnection.clone(),
    );
    let relay_task = tokio::spawn(run_relay(
        feed,
        relay,
        store.subscribe_changes(),
        shutdown.clone(),
    ));

    let control = TelegramControl::new(store);
    let auth = CommandAuth::new(
        ChatId(secrets.admin_chat_id),
        config.telegram.restrict_commands_to_admin,
    );
    let reply_timeout = Duration::from_secs(config.telegram.send_timeout_secs);
    let command_shutdown = shutdown.clone();
    let command_task = tokio::spawn(async move {
        tokio::select! {
            () = run_command_listener(bot, control, auth, reply_timeout) => {
                warn!("Telegram command listener stopped");
            }
            () = wait_for_shutdown(command_shutdown) => {}
        }
    });

    let relay_result = relay_task.await;
    let stopping = *shutdown.borrow() || shutdown.has_changed().is_err();
    if !stopping {
        command_task.abort();
    }
    if let Err(e) = command_task.await {
        if !e.is_cancelled() {
            warn!(error = %e, "Command listener task failed");
        }
    }

    // Relay is gone, so the delivery queue is closed; the in-flight send gets
    // its full retry budget.
    let grace = DeliveryPolicy::from(&config.telegram).worst_case();
    if tokio::time::timeout(grace, delivery).await.is_err() {
        warn!("Pending notifications not delivered before shutdown");
    }

    relay_result.map_err(|e| Error::Connection(format!("relay task failed: {e}")))?;
    if !stopping {
        return Err(Error::Connection("trade relay stopped unexpectedly".into()));
    }

    info!("tradewatch stopped");
    Ok(())
}

async fn wait_for_shutdown(mut shutdown: watch::Receiver<bool>) {
    while !*shutdown.borrow_and_update() {
        if shutdown.changed().await.is_err() {
            return;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn wait_for_shutdown_returns_on_signal() {
        let (tx, rx) = watch::channel(false);
        let waiter = tokio::spawn(wait_for_shutdown(rx));

        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), waiter)
            .await
            .expect("waiter finished")
            .unwrap();
    }

    #[tokio::test]
    async fn wait_for_shutdown_returns_when_sender_dropped() {
        let (tx, rx) = watch::channel(false);
        drop(tx);

        tokio::time::timeout(Duration::from_secs(1), wait_for_shutdown(rx))
            .await
            .expect("waiter finished");
    }

    #[tokio::test]
    async fn wait_for_shutdown_sees_signal_sent_before_wait() {
        let (tx, rx) = watch::channel(false);
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), wait_for_shutdown(rx))
            .await
            .expect("waiter finished");
    }
}
