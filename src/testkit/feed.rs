//! Mock [`TradeFeed`] for testing.
//!
//! [`ScriptedFeed`] pops pre-loaded connect results and events first, then
//! delivers whatever is pushed through its [`FeedHandle`]. Once both are
//! exhausted it stays silent, like a quiet but healthy connection.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::sync::mpsc;

use crate::domain::TraderAddress;
use crate::error::Result;
use crate::port::{FeedEvent, TradeFeed};

#[derive(Default)]
struct Recorded {
    subscribed: Mutex<Vec<Vec<TraderAddress>>>,
    unsubscribed: Mutex<Vec<Vec<TraderAddress>>>,
    connects: AtomicU32,
    closes: AtomicU32,
}

/// Test-side view of a [`ScriptedFeed`].
#[derive(Clone)]
pub struct FeedHandle {
    sender: mpsc::UnboundedSender<FeedEvent>,
    recorded: Arc<Recorded>,
}

impl FeedHandle {
    /// Deliver an event to the feed.
    pub fn push(&self, event: FeedEvent) {
        let _ = self.sender.send(event);
    }

    /// Every `subscribe` call, in order.
    pub fn subscribed(&self) -> Vec<Vec<TraderAddress>> {
        self.recorded.subscribed.lock().expect("lock subscriptions").clone()
    }

    /// Every `unsubscribe` call, in order.
    pub fn unsubscribed(&self) -> Vec<Vec<TraderAddress>> {
        self.recorded
            .unsubscribed
            .lock()
            .expect("lock unsubscriptions")
            .clone()
    }

    pub fn connect_count(&self) -> u32 {
        self.recorded.connects.load(Ordering::SeqCst)
    }

    pub fn close_count(&self) -> u32 {
        self.recorded.closes.load(Ordering::SeqCst)
    }
}

/// A mock feed with scripted results and an on-demand event channel.
pub struct ScriptedFeed {
    connect_results: VecDeque<Result<()>>,
    subscribe_results: VecDeque<Result<()>>,
    events: VecDeque<Option<FeedEvent>>,
    receiver: mpsc::UnboundedReceiver<FeedEvent>,
    handle: FeedHandle,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::unbounded_channel();
        Self {
            connect_results: VecDeque::new(),
            subscribe_results: VecDeque::new(),
            events: VecDeque::new(),
            receiver,
            handle: FeedHandle {
                sender,
                recorded: Arc::new(Recorded::default()),
            },
        }
    }

    pub fn with_connect_results(mut self, results: Vec<Result<()>>) -> Self {
        self.connect_results = results.into();
        self
    }

    pub fn with_subscribe_results(mut self, results: Vec<Result<()>>) -> Self {
        self.subscribe_results = results.into();
        self
    }

    /// Scripted events; `None` simulates the stream ending.
    pub fn with_events(mut self, events: Vec<Option<FeedEvent>>) -> Self {
        self.events = events.into();
        self
    }

    pub fn handle(&self) -> FeedHandle {
        self.handle.clone()
    }
}

impl Default for ScriptedFeed {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TradeFeed for ScriptedFeed {
    async fn connect(&mut self) -> Result<()> {
        self.handle.recorded.connects.fetch_add(1, Ordering::SeqCst);
        self.connect_results.pop_front().unwrap_or(Ok(()))
    }

    async fn subscribe(&mut self, addresses: &[TraderAddress]) -> Result<()> {
        self.handle
            .recorded
            .subscribed
            .lock()
            .expect("lock subscriptions")
            .push(addresses.to_vec());
        self.subscribe_results.pop_front().unwrap_or(Ok(()))
    }

    async fn unsubscribe(&mut self, addresses: &[TraderAddress]) -> Result<()> {
        self.handle
            .recorded
            .unsubscribed
            .lock()
            .expect("lock unsubscriptions")
            .push(addresses.to_vec());
        Ok(())
    }

    async fn next_event(&mut self) -> Option<FeedEvent> {
        if let Some(event) = self.events.pop_front() {
            return event;
        }
        match self.receiver.recv().await {
            Some(event) => Some(event),
            None => std::future::pending().await,
        }
    }

    async fn close(&mut self) -> Result<()> {
        self.handle.recorded.closes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    fn exchange_name(&self) -> &'static str {
        "mock"
    }
}
