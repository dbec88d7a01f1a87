//! Hyperliquid WebSocket message types.
//!
//! Outbound subscription frames:
//! ```json
//! {"method":"subscribe","params":{"address":"0xabc"},"id":1}
//! ```
//!
//! Inbound order notifications:
//! ```json
//! {"method":"update","params":{"type":"order_created","order":{"trader":"0xabc","trader_role":"user","symbol":"BTC","price":100,"stop_loss":90,"take_profit":120}}}
//! ```
//! Every other shape is ignored.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::{FieldValue, TradeOpened, TraderAddress, TraderRole};

/// Request id sent with every subscription frame.
const REQUEST_ID: u64 = 1;

/// Subscription request sent to the Hyperliquid WebSocket.
#[derive(Debug, Serialize)]
pub struct HyperliquidSubscribeMessage<'a> {
    pub method: &'static str,
    pub params: AddressParams<'a>,
    pub id: u64,
}

#[derive(Debug, Serialize)]
pub struct AddressParams<'a> {
    pub address: &'a str,
}

impl<'a> HyperliquidSubscribeMessage<'a> {
    #[must_use]
    pub fn subscribe(address: &'a TraderAddress) -> Self {
        Self::new("subscribe", address)
    }

    #[must_use]
    pub fn unsubscribe(address: &'a TraderAddress) -> Self {
        Self::new("unsubscribe", address)
    }

    #[must_use]
    pub fn new(method: &'static str, address: &'a TraderAddress) -> Self {
        Self {
            method,
            params: AddressParams {
                address: address.as_str(),
            },
            id: REQUEST_ID,
        }
    }
}

/// Messages received from the Hyperliquid WebSocket.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum HyperliquidWsMessage {
    /// `method: "update"` with a typed payload.
    Update(UpdateMessage),

    /// Anything else: acks, heartbeats, other channels.
    Unknown(Value),
}

#[derive(Debug, Deserialize)]
pub struct UpdateMessage {
    pub method: UpdateMethod,
    pub params: UpdateParams,
}

#[derive(Debug, Deserialize)]
pub enum UpdateMethod {
    #[serde(rename = "update")]
    Update,
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
pub enum UpdateParams {
    #[serde(rename = "order_created")]
    OrderCreated { order: OrderPayload },

    #[serde(other)]
    Other,
}

/// Order fields as they arrive; all optional.
#[derive(Debug, Default, Deserialize)]
pub struct OrderPayload {
    #[serde(default)]
    pub trader: Option<String>,
    #[serde(default)]
    pub trader_role: Option<String>,
    #[serde(default)]
    pub symbol: Option<Value>,
    #[serde(default)]
    pub price: Option<Value>,
    #[serde(default)]
    pub stop_loss: Option<Value>,
    #[serde(default)]
    pub take_profit: Option<Value>,
}

impl OrderPayload {
    /// Convert to a domain event. Returns `None` when the trader is absent
    /// or not a valid address.
    #[must_use]
    pub fn into_trade(self) -> Option<TradeOpened> {
        let trader = TraderAddress::parse(self.trader.as_deref()?).ok()?;
        Some(TradeOpened {
            trader,
            role: TraderRole::from_wire(self.trader_role.as_deref()),
            symbol: field(self.symbol),
            entry_price: field(self.price),
            stop_loss: field(self.stop_loss),
            take_profit: field(self.take_profit),
        })
    }
}

/// Strings pass through unquoted, other JSON values in their literal form.
fn field(value: Option<Value>) -> FieldValue {
    match value {
        None | Some(Value::Null) => FieldValue::missing(),
        Some(Value::String(s)) => FieldValue::new(s),
        Some(other) => FieldValue::new(other.to_string()),
    }
}
