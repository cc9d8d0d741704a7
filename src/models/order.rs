//! Core order domain types.
//!
//! The vocabulary every other module speaks: sides, order types, sized
//! amounts, routing accounts, start and expiry policies, and the
//! server-derived order status. Wire names follow the gateway's
//! SCREAMING_SNAKE_CASE convention for enums and camelCase for structs.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Order side (buy or sell the base currency).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    /// Returns the wire-format side name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderSide::Buy => "BUY",
            OrderSide::Sell => "SELL",
        }
    }
}

/// Order type specifying which execution strategy runs the order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderType {
    /// Resting limit order at a fixed level.
    Limit,
    /// Triggered when the market trades through the level.
    StopLoss,
    /// Triggered when the market trades in favour through the level.
    TakeProfit,
    /// Pegged to the prevailing market, optionally capped by a level.
    Float,
    /// Time-weighted execution towards a target end time.
    Twap,
    /// Percentage-of-volume participation.
    Pov,
    /// Executed at a benchmark fixing.
    Fixing,
}

impl OrderType {
    /// Every order type, in display order.
    pub const ALL: [OrderType; 7] = [
        OrderType::Limit,
        OrderType::StopLoss,
        OrderType::TakeProfit,
        OrderType::Float,
        OrderType::Twap,
        OrderType::Pov,
        OrderType::Fixing,
    ];

    /// Returns the wire-format order type name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderType::Limit => "LIMIT",
            OrderType::StopLoss => "STOP_LOSS",
            OrderType::TakeProfit => "TAKE_PROFIT",
            OrderType::Float => "FLOAT",
            OrderType::Twap => "TWAP",
            OrderType::Pov => "POV",
            OrderType::Fixing => "FIXING",
        }
    }

    /// Whether the order carries a price level at all.
    ///
    /// Float orders take an optional cap level; the algorithmic types
    /// (TWAP, POV, fixing) have no level.
    #[must_use]
    pub fn is_price_bearing(&self) -> bool {
        matches!(
            self,
            OrderType::Limit | OrderType::StopLoss | OrderType::TakeProfit | OrderType::Float
        )
    }

    /// Whether schema validation requires a level for this type.
    #[must_use]
    pub fn requires_level(&self) -> bool {
        matches!(
            self,
            OrderType::Limit | OrderType::StopLoss | OrderType::TakeProfit
        )
    }
}

/// When the order becomes active.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StartMode {
    /// Active as soon as the server accepts it.
    Immediate,
    /// Active from a scheduled start time.
    StartAt,
}

/// How the order expires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExpiryStrategy {
    /// Good till cancelled.
    Gtc,
    /// Good till a calendar date.
    Gtd,
    /// Expires at a time of day.
    TimeOfDay,
}

impl ExpiryStrategy {
    /// Whether this strategy binds the order to an end time/date.
    #[must_use]
    pub fn is_date_bound(&self) -> bool {
        matches!(self, ExpiryStrategy::Gtd | ExpiryStrategy::TimeOfDay)
    }
}

/// Expiry policy: a strategy plus the end time it may require.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expiry {
    pub strategy: ExpiryStrategy,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time_zone: Option<String>,
}

impl Expiry {
    /// Creates a good-till-cancelled expiry.
    #[must_use]
    pub fn gtc() -> Self {
        Self {
            strategy: ExpiryStrategy::Gtc,
            end_time: None,
            end_time_zone: None,
        }
    }
}

/// A sized amount in a specific currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Amount {
    pub amount: Decimal,
    pub ccy: String,
}

impl Amount {
    /// Creates a new amount.
    #[must_use]
    pub fn new(amount: Decimal, ccy: &str) -> Self {
        Self {
            amount,
            ccy: ccy.to_string(),
        }
    }
}

/// Routing account for the order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub name: String,
    #[serde(rename = "sdsId")]
    pub sds_id: i64,
}

impl Account {
    /// Creates a new account descriptor.
    #[must_use]
    pub fn new(name: &str, sds_id: i64) -> Self {
        Self {
            name: name.to_string(),
            sds_id,
        }
    }
}

/// Urgency profile for algorithmic execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecutionStyle {
    Passive,
    Neutral,
    Aggressive,
}

/// Which market side arms a trigger order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TriggerSide {
    Bid,
    Ask,
    Mid,
}

/// What a stop order does when it triggers during a restricted window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum DelayBehaviour {
    Queue,
    Reject,
}

/// Server-derived order status. Read-only to the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Working,
    Filled,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    /// Returns the wire-format status name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Working => "WORKING",
            OrderStatus::Filled => "FILLED",
            OrderStatus::Cancelled => "CANCELLED",
            OrderStatus::Rejected => "REJECTED",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn serialize_side_and_type() {
        assert_eq!(serde_json::to_string(&OrderSide::Sell).unwrap(), "\"SELL\"");
        assert_eq!(
            serde_json::to_string(&OrderType::StopLoss).unwrap(),
            "\"STOP_LOSS\""
        );
    }

    #[test]
    fn wire_names_match_as_str() {
        for order_type in OrderType::ALL {
            let json = serde_json::to_string(&order_type).unwrap();
            assert_eq!(json, format!("\"{}\"", order_type.as_str()));
        }
    }

    #[test]
    fn level_requirements() {
        assert!(OrderType::Limit.requires_level());
        assert!(OrderType::StopLoss.requires_level());
        assert!(!OrderType::Float.requires_level());
        assert!(OrderType::Float.is_price_bearing());
        assert!(!OrderType::Twap.is_price_bearing());
    }

    #[test]
    fn date_bound_strategies() {
        assert!(!ExpiryStrategy::Gtc.is_date_bound());
        assert!(ExpiryStrategy::Gtd.is_date_bound());
        assert!(ExpiryStrategy::TimeOfDay.is_date_bound());
    }

    #[test]
    fn account_serializes_sds_id() {
        let account = Account::new("Acct", 1);
        let json = serde_json::to_string(&account).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["name"], "Acct");
        assert_eq!(value["sdsId"], 1);
    }

    #[test]
    fn amount_round_trips_as_string_decimal() {
        let amount = Amount::new(dec!(2500000), "GBP");
        let json = serde_json::to_string(&amount).unwrap();
        let back: Amount = serde_json::from_str(&json).unwrap();
        assert_eq!(back, amount);
    }

    #[test]
    fn gtc_expiry_omits_end_time() {
        let json = serde_json::to_string(&Expiry::gtc()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["strategy"], "GTC");
        assert!(value.get("endTime").is_none());
    }
}
