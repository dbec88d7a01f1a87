#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;

use tradewatch::application::relay::{run_relay, TradeRelay};
use tradewatch::application::watchlist::WatchListStore;
use tradewatch::domain::TraderAddress;
use tradewatch::port::TradeFeed;
use tradewatch::testkit::feed::{FeedHandle, ScriptedFeed};
use tradewatch::testkit::notifier::RecordingNotifier;
use tradewatch::testkit::store::MemoryRepository;

/// Poll `condition` until it holds, failing the test after two seconds.
pub async fn eventually(mut condition: impl FnMut() -> bool) {
    tokio::time::timeout(Duration::from_secs(2), async {
        while !condition() {
            tokio::time::sleep(Duration::from_millis(5)).await;
        }
    })
    .await
    .expect("condition not met in time");
}

/// A relay running against a scripted feed and an in-memory store.
pub struct RelayHarness {
    pub store: Arc<WatchListStore>,
    pub feed: FeedHandle,
    pub notifier: RecordingNotifier,
    shutdown: watch::Sender<bool>,
    task: JoinHandle<()>,
}

impl RelayHarness {
    pub async fn start(initial: Vec<TraderAddress>) -> Self {
        Self::start_with(initial, ScriptedFeed::new(), |scripted| scripted).await
    }

    /// Run the relay over `wrap(scripted)`, e.g. a reconnecting wrapper.
    pub async fn start_with<F, W>(
        initial: Vec<TraderAddress>,
        scripted: ScriptedFeed,
        wrap: W,
    ) -> Self
    where
        F: TradeFeed + 'static,
        W: FnOnce(ScriptedFeed) -> F,
    {
        let store = Arc::new(WatchListStore::open(Arc::new(
            MemoryRepository::with_addresses(initial.clone()),
        )));
        let feed = scripted.handle();
        let notifier = RecordingNotifier::new();
        let relay = TradeRelay::new(Arc::new(notifier.clone()), vec!["user".to_string()]);
        let (shutdown, shutdown_rx) = watch::channel(false);

        let task = tokio::spawn(run_relay(
            wrap(scripted),
            relay,
            store.subscribe_changes(),
            shutdown_rx,
        ));

        let handle = feed.clone();
        if initial.is_empty() {
            eventually(|| handle.connect_count() >= 1).await;
        } else {
            eventually(|| handle.subscribed().first() == Some(&initial)).await;
        }

        Self {
            store,
            feed,
            notifier,
            shutdown,
            task,
        }
    }

    pub async fn stop(self) {
        self.shutdown.send(true).expect("relay listening");
        tokio::time::timeout(Duration::from_secs(2), self.task)
            .await
            .expect("relay stopped in time")
            .expect("relay task");
    }
}
