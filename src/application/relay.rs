//! Trade relay: turns feed events for watched traders into notifications.
//!
//! The relay loop owns the feed. It keeps the feed's subscriptions in step
//! with the watch-list (additions are subscribed, removals unsubscribed on
//! the live connection) and always filters against the latest snapshot.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::domain::{TradeOpened, TraderAddress};
use crate::port::{Event, FeedEvent, Notifier, TradeFeed};

/// Filter and hand-off stage of the relay.
pub struct TradeRelay {
    notifier: Arc<dyn Notifier>,
    notify_roles: Vec<String>,
}

impl TradeRelay {
    /// `notify_roles` lists the submitter roles whose trades are relayed.
    #[must_use]
    pub fn new(notifier: Arc<dyn Notifier>, notify_roles: Vec<String>) -> Self {
        Self {
            notifier,
            notify_roles,
        }
    }

    /// True if the trader is watched and the submitter role is allowed.
    #[must_use]
    pub fn should_relay(&self, trade: &TradeOpened, watched: &[TraderAddress]) -> bool {
        if !watched.contains(&trade.trader) {
            return false;
        }
        match trade.role.as_str() {
            Some(role) => self.notify_roles.iter().any(|r| r == role),
            None => false,
        }
    }

    /// Notify for a qualifying trade. Returns whether a notification was queued.
    pub fn handle(&self, trade: TradeOpened, watched: &[TraderAddress]) -> bool {
        if !self.should_relay(&trade, watched) {
            debug!(
                trader = %trade.trader,
                role = trade.role.as_str().unwrap_or("none"),
                "Ignoring trade"
            );
            return false;
        }

        info!(trader = %trade.trader, symbol = %trade.symbol, "Trade opened by watched trader");
        self.notifier.notify(Event::TradeOpened(trade));
        true
    }
}

/// Bring the feed's subscriptions from `current` to `next`.
async fn sync_subscriptions<F: TradeFeed>(
    feed: &mut F,
    current: &[TraderAddress],
    next: &[TraderAddress],
) {
    let added: Vec<TraderAddress> = next
        .iter()
        .filter(|a| !current.contains(a))
        .cloned()
        .collect();
    let removed: Vec<TraderAddress> = current
        .iter()
        .filter(|a| !next.contains(a))
        .cloned()
        .collect();

    if !added.is_empty() {
        if let Err(e) = feed.subscribe(&added).await {
            warn!(error = %e, "Failed to subscribe new traders");
        }
    }
    if !removed.is_empty() {
        if let Err(e) = feed.unsubscribe(&removed).await {
            warn!(error = %e, "Failed to unsubscribe removed traders");
        }
    }
}

/// Run the relay until shutdown is signalled or the feed ends.
///
/// Connects the feed, subscribes the current watch-list, then processes
/// events, watch-list changes and the shutdown signal. The feed is closed
/// before returning.
pub async fn run_relay<F: TradeFeed>(
    mut feed: F,
    relay: TradeRelay,
    mut watchlist: watch::Receiver<Vec<TraderAddress>>,
    mut shutdown: watch::Receiver<bool>,
) {
    let mut current = watchlist.borrow_and_update().clone();
    info!(
        exchange = feed.exchange_name(),
        traders = current.len(),
        "Starting trade relay"
    );

    if let Err(e) = feed.connect().await {
        warn!(error = %e, "Initial connection failed, will retry");
    }
    if !current.is_empty() {
        if let Err(e) = feed.subscribe(&current).await {
            warn!(error = %e, "Initial subscription failed");
        }
    }

    let mut watch_open = true;
    loop {
        tokio::select! {
            result = shutdown.changed() => {
                if result.is_err() || *shutdown.borrow() {
                    info!("Trade relay shutting down");
                    break;
                }
            }
            changed = watchlist.changed(), if watch_open => {
                if changed.is_err() {
                    warn!("Watch-list closed, keeping last snapshot");
                    watch_open = false;
                    continue;
                }
                let next = watchlist.borrow_and_update().clone();
                sync_subscriptions(&mut feed, &current, &next).await;
                current = next;
            }
            event = feed.next_event() => {
                match event {
                    Some(FeedEvent::TradeOpened(trade)) => {
                        relay.handle(trade, &current);
                    }
                    Some(FeedEvent::Disconnected { reason }) => {
                        warn!(reason = %reason, "Trade feed disconnected");
                    }
                    None => {
                        warn!("Trade feed ended");
                        break;
                    }
                }
            }
        }
    }

    if let Err(e) = feed.close().await {
        warn!(error = %e, "Failed to close trade feed");
    }
}
