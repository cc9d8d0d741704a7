//! External intent bridge.
//!
//! Other desktop applications push loosely-typed contexts at the ticket:
//! an optional slash-delimited instrument ticker plus an optional
//! custom-data bag. The core's only contract with that bridge is
//! [`map_intent`]: context in, partial order patch out. Unrecognized or
//! missing fields are omitted from the patch, never defaulted.
//!
//! [`IntentBridge`] is the long-lived subscription object constructed
//! once at process start. It holds no business state; it only forwards
//! raw contexts over a channel to whoever owns the form.

use rust_decimal::Decimal;
use serde::Deserialize;
use tokio::sync::mpsc;
use tracing::debug;

use crate::models::order::{Account, Amount, OrderSide, OrderType};
use crate::store::{FieldKey, FieldValue, OrderPatch};

/// A raw context object pushed by an external application.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentContext {
    /// Slash-delimited ticker, e.g. `"GBP/USD"`.
    #[serde(default)]
    pub instrument: Option<String>,
    #[serde(default)]
    pub custom_data: Option<IntentCustomData>,
}

/// Optional custom-data bag carried by an intent context.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntentCustomData {
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub ccy: Option<String>,
    #[serde(default)]
    pub side: Option<OrderSide>,
    #[serde(default)]
    pub order_type: Option<OrderType>,
    #[serde(default)]
    pub level: Option<Decimal>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub account_name: Option<String>,
    #[serde(default)]
    pub account_id: Option<i64>,
}

/// A mapped intent: the order patch plus an order identifier when the
/// context points at an existing order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappedIntent {
    pub patch: OrderPatch,
    pub order_id: Option<String>,
}

/// Maps a raw context onto a partial order.
///
/// The slash is stripped from the ticker (`"GBP/USD"` becomes
/// `"GBPUSD"`). An amount needs both value and currency; an account
/// needs both name and id — incomplete composites are omitted.
#[must_use]
pub fn map_intent(context: &IntentContext) -> MappedIntent {
    let mut patch = OrderPatch::new();

    if let Some(instrument) = &context.instrument {
        let symbol: String = instrument.chars().filter(|c| *c != '/').collect();
        if !symbol.is_empty() {
            patch.insert(FieldKey::CurrencyPair, FieldValue::Text(symbol));
        }
    }

    let Some(custom) = &context.custom_data else {
        return MappedIntent {
            patch,
            order_id: None,
        };
    };

    if let (Some(amount), Some(ccy)) = (custom.amount, &custom.ccy) {
        patch.insert(FieldKey::Amount, FieldValue::Amount(Amount::new(amount, ccy)));
    }
    if let Some(side) = custom.side {
        patch.insert(FieldKey::Side, FieldValue::Side(side));
    }
    if let Some(order_type) = custom.order_type {
        patch.insert(FieldKey::OrderType, FieldValue::OrderType(order_type));
    }
    if let Some(level) = custom.level {
        patch.insert(FieldKey::Level, FieldValue::Decimal(level));
    }
    if let (Some(name), Some(id)) = (&custom.account_name, custom.account_id) {
        patch.insert(FieldKey::Account, FieldValue::Account(Account::new(name, id)));
    }

    MappedIntent {
        patch,
        order_id: custom.order_id.clone(),
    }
}

/// Parses a raw JSON context as delivered by the bridge transport.
///
/// # Errors
///
/// Returns [`OrderpadError::Json`](crate::OrderpadError::Json) if the
/// payload is not a valid context object.
pub fn parse_context(json: &str) -> crate::Result<IntentContext> {
    Ok(serde_json::from_str(json)?)
}

/// Forwards raw intent contexts from the bridge transport to the form
/// owner. Constructed once at process start.
pub struct IntentBridge {
    tx: mpsc::UnboundedSender<IntentContext>,
}

impl IntentBridge {
    /// Creates the bridge and the receiving end the form owner drains.
    #[must_use]
    pub fn new() -> (Self, mpsc::UnboundedReceiver<IntentContext>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    /// Forwards one raw context. Dropped silently if the consumer has
    /// gone away (app shutting down).
    pub fn publish(&self, context: IntentContext) {
        debug!(instrument = ?context.instrument, "Forwarding intent context");
        let _ = self.tx.send(context);
    }
}
