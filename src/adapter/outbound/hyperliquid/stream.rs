//! Hyperliquid WebSocket feed.
//!
//! Implements [`TradeFeed`] over a single tokio-tungstenite connection.
//! Text frames are decoded into [`HyperliquidWsMessage`]; only
//! `order_created` updates surface as events. Pings are answered, and close
//! frames or transport errors surface as [`FeedEvent::Disconnected`] so the
//! reconnecting wrapper can take over.

use async_trait::async_trait;
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio_tungstenite::{connect_async, tungstenite::Message, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, trace, warn};

use super::dto::{HyperliquidSubscribeMessage, HyperliquidWsMessage, UpdateMessage, UpdateParams};
use crate::domain::TraderAddress;
use crate::error::{Error, Result};
use crate::port::{FeedEvent, TradeFeed};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;

/// Addresses named in a single subscription log line.
const LOG_PREVIEW: usize = 5;

/// Leading addresses to log and the count left out.
fn preview(addresses: &[TraderAddress]) -> (&[TraderAddress], usize) {
    let shown = addresses.len().min(LOG_PREVIEW);
    (&addresses[..shown], addresses.len() - shown)
}

/// Hyperliquid order-event stream.
pub struct HyperliquidFeed {
    url: String,
    ws: Option<WsStream>,
}

impl HyperliquidFeed {
    /// Create a feed for the given WebSocket URL. Call
    /// [`connect`](TradeFeed::connect) before use.
    #[must_use]
    pub fn new(url: String) -> Self {
        Self { url, ws: None }
    }

    fn socket(&mut self) -> Result<&mut WsStream> {
        self.ws
            .as_mut()
            .ok_or_else(|| Error::Connection("Not connected".into()))
    }

    async fn send_each(&mut self, addresses: &[TraderAddress], method: &'static str) -> Result<()> {
        let ws = self.socket()?;
        for address in addresses {
            let json = serde_json::to_string(&HyperliquidSubscribeMessage::new(method, address))?;
            ws.send(Message::Text(json)).await?;
        }
        Ok(())
    }
}

/// Decode one text frame. `Ok(None)` means the frame is not relevant.
pub(crate) fn decode_frame(text: &str) -> serde_json::Result<Option<FeedEvent>> {
    let message = serde_json::from_str::<HyperliquidWsMessage>(text)?;
    let HyperliquidWsMessage::Update(UpdateMessage {
        params: UpdateParams::OrderCreated { order },
        ..
    }) = message
    else {
        return Ok(None);
    };

    match order.into_trade() {
        Some(trade) => Ok(Some(FeedEvent::TradeOpened(trade))),
        None => {
            debug!("Skipping order_created without a trader address");
            Ok(None)
        }
    }
}

#[async_trait]
impl TradeFeed for HyperliquidFeed {
    async fn connect(&mut self) -> Result<()> {
        info!(url = %self.url, "Connecting to WebSocket");
        let (ws_stream, response) = connect_async(&self.url).await?;
        info!(status = %response.status(), "WebSocket connected");
        self.ws = Some(ws_stream);
        Ok(())
    }

    async fn subscribe(&mut self, addresses: &[TraderAddress]) -> Result<()> {
        let (shown, more) = preview(addresses);
        info!(traders = ?shown, more, "Subscribing to traders");
        self.send_each(addresses, "subscribe").await
    }

    async fn unsubscribe(&mut self, addresses: &[TraderAddress]) -> Result<()> {
        let (shown, more) = preview(addresses);
        info!(traders = ?shown, more, "Unsubscribing from traders");
        self.send_each(addresses, "unsubscribe").await
    }

    async fn next_event(&mut self) -> Option<FeedEvent> {
        let ws = self.ws.as_mut()?;

        loop {
            match ws.next().await? {
                Ok(Message::Text(text)) => {
                    trace!(bytes = text.len(), "Received WebSocket text frame");
                    match decode_frame(&text) {
                        Ok(Some(event)) => return Some(event),
                        Ok(None) => continue,
                        Err(e) => {
                            warn!(error = %e, bytes = text.len(), "Failed to parse message");
                            continue;
                        }
                    }
                }
                Ok(Message::Ping(data)) => {
                    trace!("Received WebSocket ping");
                    if ws.send(Message::Pong(data)).await.is_err() {
                        return Some(FeedEvent::Disconnected {
                            reason: "Failed to send pong".into(),
                        });
                    }
                }
                Ok(Message::Close(frame)) => {
                    info!(frame = ?frame, "WebSocket closed by server");
                    return Some(FeedEvent::Disconnected {
                        reason: frame.map(|f| f.reason.to_string()).unwrap_or_default(),
                    });
                }
                Ok(_) => continue,
                Err(e) => {
                    error!(error = %e, "WebSocket error");
                    return Some(FeedEvent::Disconnected {
                        reason: e.to_string(),
                    });
                }
            }
        }
    }

    async fn close(&mut self) -> Result<()> {
        if let Some(mut ws) = self.ws.take() {
            debug!("Closing WebSocket");
            ws.close(None).await?;
        }
        Ok(())
    }

    fn exchange_name(&self) -> &'static str {
        "Hyperliquid"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::TraderRole;
    use crate::testkit::domain::address;

    #[test]
    fn preview_caps_logged_addresses() {
        let batch: Vec<_> = (0..8).map(|i| address(&format!("0x{i}"))).collect();

        let (shown, more) = preview(&batch);
        assert_eq!(shown, &batch[..LOG_PREVIEW]);
        assert_eq!(more, 3);

        let (shown, more) = preview(&batch[..2]);
        assert_eq!(shown.len(), 2);
        assert_eq!(more, 0);
    }

    #[test]
    fn decode_order_created_frame() {
        let event = decode_frame(
            r#"{"method":"update","params":{"type":"order_created","order":{"trader":"0xabc","trader_role":"user","symbol":"BTC","price":100,"stop_loss":90,"take_profit":120}}}"#,
        )
        .unwrap();

        let Some(FeedEvent::TradeOpened(trade)) = event else {
            panic!("expected trade event, got {event:?}");
        };
        assert_eq!(trade.trader.as_str(), "0xabc");
        assert_eq!(trade.role, TraderRole::User);
    }

    #[test]
    fn decode_ignores_unrelated_frames() {
        assert_eq!(
            decode_frame(r#"{"channel":"subscriptionResponse"}"#).unwrap(),
            None
        );
        assert_eq!(
            decode_frame(r#"{"method":"update","params":{"type":"order_cancelled"}}"#).unwrap(),
            None
        );
        assert_eq!(decode_frame(r#"{"method":"update"}"#).unwrap(), None);
    }

    #[test]
    fn decode_rejects_invalid_json() {
        assert!(decode_frame("not json").is_err());
    }

    #[tokio::test]
    async fn unconnected_feed_yields_no_events() {
        let mut feed = HyperliquidFeed::new("wss://example.invalid/ws".into());
        assert!(feed.next_event().await.is_none());
    }

    #[tokio::test]
    async fn subscribe_before_connect_fails() {
        let mut feed = HyperliquidFeed::new("wss://example.invalid/ws".into());
        let address = TraderAddress::parse("0xabc").unwrap();
        assert!(matches!(
            feed.subscribe(&[address]).await,
            Err(Error::Connection(_))
        ));
    }

    #[tokio::test]
    async fn close_without_connection_is_noop() {
        let mut feed = HyperliquidFeed::new("wss://example.invalid/ws".into());
        assert!(feed.close().await.is_ok());
        assert_eq!(feed.exchange_name(), "Hyperliquid");
    }
}
