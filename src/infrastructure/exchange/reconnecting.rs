//! Reconnecting wrapper for [`TradeFeed`].
//!
//! Provides automatic reconnection with exponential backoff for any
//! [`TradeFeed`] implementation. The wrapper tracks the subscribed address
//! set and replays it on every reconnect.
//!
//! ```text
//!                 connect ok                 receive error / stream end
//!  Disconnected ──────────────▶ Subscribed ───────────────────────────┐
//!      ▲   │                                                          │
//!      │   │ backoff elapsed                                          │
//!      │   ▼                                                          │
//!      │ Connecting ── failure ──▶ Disconnected (failures += 1) ◀─────┘
//!      │                                   │
//!      │                                   │ failures >= max
//!      └──────── cooldown elapsed ──── Degraded
//! ```

use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::time::sleep_until;
use tracing::{debug, error, info, warn};

use crate::domain::TraderAddress;
use crate::error::Error;
use crate::infrastructure::config::pool::ReconnectionConfig;
use crate::port::{FeedEvent, TradeFeed};

/// Connection state of a [`ReconnectingFeed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeedState {
    /// No live connection; the next read triggers a reconnect.
    Disconnected,
    /// A connection attempt is in flight.
    Connecting,
    /// Connected with the tracked address set subscribed.
    Subscribed,
    /// Too many consecutive failures; attempts paused until the cooldown ends.
    Degraded,
}

impl FeedState {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Subscribed => "subscribed",
            Self::Degraded => "degraded",
        }
    }
}

/// Wrapper that adds automatic reconnection to any [`TradeFeed`].
///
/// Transparently handles disconnections by:
/// 1. Waiting with exponential backoff
/// 2. Reconnecting to the WebSocket
/// 3. Resubscribing to every tracked address
pub struct ReconnectingFeed<F: TradeFeed> {
    inner: F,
    config: ReconnectionConfig,
    /// Addresses to replay after reconnection.
    tracked: Vec<TraderAddress>,
    consecutive_failures: u32,
    current_delay_ms: u64,
    state: FeedState,
    degraded_until: Option<Instant>,
    /// Scheduled time of the pending reconnect attempt. Survives a dropped
    /// `next_event` so the backoff advances once per attempt.
    next_attempt_at: Option<Instant>,
}

impl<F: TradeFeed> ReconnectingFeed<F> {
    /// Create a wrapper in the [`FeedState::Disconnected`] state.
    pub fn new(inner: F, config: ReconnectionConfig) -> Self {
        let initial_delay = config.initial_delay_ms;
        Self {
            inner,
            config,
            tracked: Vec::new(),
            consecutive_failures: 0,
            current_delay_ms: initial_delay,
            state: FeedState::Disconnected,
            degraded_until: None,
            next_attempt_at: None,
        }
    }

    #[must_use]
    pub fn state(&self) -> FeedState {
        self.state
    }

    /// Addresses that will be resubscribed on reconnect.
    #[must_use]
    pub fn tracked(&self) -> &[TraderAddress] {
        &self.tracked
    }

    #[must_use]
    pub fn consecutive_failures(&self) -> u32 {
        self.consecutive_failures
    }

    fn transition(&mut self, next: FeedState) {
        if self.state != next {
            debug!(
                from = self.state.as_str(),
                to = next.as_str(),
                "Feed state change"
            );
            self.state = next;
        }
    }

    fn reset_backoff(&mut self) {
        self.consecutive_failures = 0;
        self.current_delay_ms = self.config.initial_delay_ms;
        self.degraded_until = None;
        self.next_attempt_at = None;
    }

    /// Current delay plus jitter; advances the delay for the next attempt.
    fn next_delay(&mut self) -> Duration {
        let base_delay = Duration::from_millis(self.current_delay_ms);
        let delay = base_delay + Duration::from_millis(jitter_ms(base_delay));

        let next_delay = (self.current_delay_ms as f64 * self.config.backoff_multiplier) as u64;
        self.current_delay_ms = next_delay.min(self.config.max_delay_ms);

        delay
    }

    fn record_failure(&mut self) {
        self.consecutive_failures += 1;

        if self.consecutive_failures >= self.config.max_consecutive_failures {
            let cooldown = Duration::from_millis(self.config.degraded_cooldown_ms);
            self.degraded_until = Some(Instant::now() + cooldown);
            self.transition(FeedState::Degraded);
            error!(
                failures = self.consecutive_failures,
                cooldown_secs = cooldown.as_secs(),
                "Feed degraded, pausing reconnection attempts"
            );
        } else {
            self.transition(FeedState::Disconnected);
        }
    }

    /// Connect and replay the tracked subscriptions.
    async fn establish(&mut self) -> Result<(), Error> {
        self.transition(FeedState::Connecting);
        if let Err(e) = self.inner.connect().await {
            self.record_failure();
            return Err(e);
        }

        if !self.tracked.is_empty() {
            debug!(traders = self.tracked.len(), "Resubscribing to traders");
            if let Err(e) = self.inner.subscribe(&self.tracked).await {
                error!(error = %e, "Resubscribe failed after connect");
                self.record_failure();
                return Err(e);
            }
        }

        self.transition(FeedState::Subscribed);
        Ok(())
    }

    /// Wait out backoff (or the degraded cooldown), then reconnect.
    ///
    /// Cancel-safe: the cooldown and the attempt deadline live on `self`, so
    /// a dropped call resumes the same wait on the next one.
    async fn reconnect(&mut self) -> Result<(), Error> {
        if let Some(until) = self.degraded_until {
            warn!(
                remaining_secs = until.saturating_duration_since(Instant::now()).as_secs(),
                "Feed degraded, waiting for cooldown"
            );
            sleep_until(until.into()).await;
            self.reset_backoff();
            self.transition(FeedState::Disconnected);
        }

        let deadline = match self.next_attempt_at {
            Some(deadline) => deadline,
            None => {
                let delay = self.next_delay();
                info!(
                    delay_ms = delay.as_millis() as u64,
                    attempt = self.consecutive_failures + 1,
                    "Reconnecting after delay"
                );
                let deadline = Instant::now() + delay;
                self.next_attempt_at = Some(deadline);
                deadline
            }
        };
        sleep_until(deadline.into()).await;

        let result = self.establish().await;
        self.next_attempt_at = None;
        result?;
        info!(
            exchange = self.inner.exchange_name(),
            "Reconnected successfully"
        );
        Ok(())
    }

    fn connection_lost(&mut self, reason: &str) {
        warn!(reason = %reason, "Connection lost, will reconnect");
        self.record_failure();
    }
}

/// Up to 20% random jitter to prevent synchronized reconnection storms.
fn jitter_ms(base_delay: Duration) -> u64 {
    let jitter_range_ms = (base_delay.as_millis() as u64) / 5;
    if jitter_range_ms == 0 {
        return 0;
    }

    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or(0);
    u64::from(nanos) % (jitter_range_ms + 1)
}

#[async_trait]
impl<F: TradeFeed> TradeFeed for ReconnectingFeed<F> {
    async fn connect(&mut self) -> Result<(), Error> {
        let result = self.establish().await;
        if result.is_ok() {
            self.reset_backoff();
        }
        result
    }

    async fn subscribe(&mut self, addresses: &[TraderAddress]) -> Result<(), Error> {
        let fresh: Vec<TraderAddress> = addresses
            .iter()
            .filter(|a| !self.tracked.contains(a))
            .cloned()
            .collect();
        if fresh.is_empty() {
            return Ok(());
        }
        self.tracked.extend(fresh.iter().cloned());

        // Deferred until the next (re)connect replays `tracked`.
        if self.state != FeedState::Subscribed {
            return Ok(());
        }

        let result = self.inner.subscribe(&fresh).await;
        if let Err(ref e) = result {
            self.connection_lost(&e.to_string());
        }
        result
    }

    async fn unsubscribe(&mut self, addresses: &[TraderAddress]) -> Result<(), Error> {
        let before = self.tracked.len();
        self.tracked.retain(|a| !addresses.contains(a));
        if self.tracked.len() == before || self.state != FeedState::Subscribed {
            return Ok(());
        }

        let result = self.inner.unsubscribe(addresses).await;
        if let Err(ref e) = result {
            self.connection_lost(&e.to_string());
        }
        result
    }

    async fn next_event(&mut self) -> Option<FeedEvent> {
        loop {
            if self.state != FeedState::Subscribed {
                if let Err(e) = self.reconnect().await {
                    warn!(error = %e, "Reconnection attempt failed, will retry");
                    continue;
                }
            }

            match self.inner.next_event().await {
                Some(FeedEvent::Disconnected { reason }) => {
                    self.connection_lost(&reason);
                }
                Some(event) => {
                    if self.consecutive_failures > 0 {
                        debug!("Received event after reconnection, resetting failure count");
                        self.reset_backoff();
                    }
                    return Some(event);
                }
                None => {
                    self.connection_lost("stream ended");
                }
            }
        }
    }

    async fn close(&mut self) -> Result<(), Error> {
        self.transition(FeedState::Disconnected);
        self.inner.close().await
    }

    fn exchange_name(&self) -> &'static str {
        self.inner.exchange_name()
    }
}
