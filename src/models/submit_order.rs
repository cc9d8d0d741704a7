//! Create/amend order RPC models.
//!
//! The gateway takes a flattened payload: nested amount/account/expiry
//! values are mapped onto individual wire fields, not sent as opaque
//! blobs. Both operations return the same acknowledgement shape.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::models::order::{
    DelayBehaviour, ExecutionStyle, ExpiryStrategy, OrderSide, OrderType, StartMode, TriggerSide,
};
use crate::store::{DerivedOrder, FieldKey};

/// Flattened order payload for create and amend requests.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_id: Option<String>,
    pub currency_pair: String,
    pub side: OrderSide,
    pub order_type: OrderType,
    pub amount: Decimal,
    pub ccy: String,
    pub account_name: String,
    pub account_id: i64,
    pub liquidity_pool: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub level: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_mode: Option<StartMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_strategy: Option<ExpiryStrategy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expiry_end_time_zone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_execution_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub participation_rate: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub execution_style: Option<ExecutionStyle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discretion_factor: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trigger_side: Option<TriggerSide>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iceberg: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub skew: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub franchise_exposure: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delay_behaviour: Option<DelayBehaviour>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixing_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fixing_date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twap_target_end_time: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub twap_target_end_time_zone: Option<String>,
}

impl OrderPayload {
    /// Flattens a derived order into the wire payload.
    ///
    /// Intended to run after a clean full-order schema pass, so missing
    /// required fields indicate a logic fault rather than user input.
    ///
    /// # Errors
    ///
    /// Returns [`OrderpadError::Payload`](crate::OrderpadError::Payload)
    /// if a required field is absent.
    pub fn from_order(order: &DerivedOrder) -> crate::Result<Self> {
        let missing = |field: FieldKey| crate::OrderpadError::Payload(format!(
            "required field {} missing from derived order",
            field.as_str()
        ));

        let amount = order.amount().ok_or_else(|| missing(FieldKey::Amount))?;
        let account = order.account().ok_or_else(|| missing(FieldKey::Account))?;
        let expiry = order.expiry();

        Ok(Self {
            order_id: None,
            currency_pair: order
                .currency_pair()
                .ok_or_else(|| missing(FieldKey::CurrencyPair))?
                .to_string(),
            side: order.side().ok_or_else(|| missing(FieldKey::Side))?,
            order_type: order.order_type().ok_or_else(|| missing(FieldKey::OrderType))?,
            amount: amount.amount,
            ccy: amount.ccy.clone(),
            account_name: account.name.clone(),
            account_id: account.sds_id,
            liquidity_pool: order
                .liquidity_pool()
                .ok_or_else(|| missing(FieldKey::LiquidityPool))?
                .to_string(),
            level: order.level(),
            start_mode: order.start_mode(),
            start_time: order.text(FieldKey::StartTime).map(str::to_string),
            start_date: order.text(FieldKey::StartDate).map(str::to_string),
            time_zone: order.text(FieldKey::TimeZone).map(str::to_string),
            expiry_strategy: expiry.map(|e| e.strategy),
            expiry_end_time: expiry.and_then(|e| e.end_time.clone()),
            expiry_end_time_zone: expiry.and_then(|e| e.end_time_zone.clone()),
            target_execution_rate: order.decimal(FieldKey::TargetExecutionRate),
            participation_rate: order.decimal(FieldKey::ParticipationRate),
            execution_style: order
                .get(FieldKey::ExecutionStyle)
                .and_then(|v| match v {
                    crate::store::FieldValue::ExecutionStyle(s) => Some(*s),
                    _ => None,
                }),
            discretion_factor: order.decimal(FieldKey::DiscretionFactor),
            trigger_side: order.get(FieldKey::TriggerSide).and_then(|v| match v {
                crate::store::FieldValue::TriggerSide(s) => Some(*s),
                _ => None,
            }),
            iceberg: order.decimal(FieldKey::Iceberg),
            skew: order.decimal(FieldKey::Skew),
            franchise_exposure: order.decimal(FieldKey::FranchiseExposure),
            delay_behaviour: order.get(FieldKey::DelayBehaviour).and_then(|v| match v {
                crate::store::FieldValue::DelayBehaviour(b) => Some(*b),
                _ => None,
            }),
            fixing_id: order.text(FieldKey::FixingId).map(str::to_string),
            fixing_date: order.text(FieldKey::FixingDate).map(str::to_string),
            twap_target_end_time: order
                .text(FieldKey::TwapTargetEndTime)
                .map(str::to_string),
            twap_target_end_time_zone: order
                .text(FieldKey::TwapTargetEndTimeZone)
                .map(str::to_string),
        })
    }
}

/// Result of a submission as reported by the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubmitResult {
    Success,
    /// Any non-success result; the reason travels separately.
    #[serde(other)]
    Rejected,
}

/// Acknowledgement returned by both create and amend operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmitAck {
    #[serde(default)]
    pub order_id: Option<String>,
    pub result: SubmitResult,
    #[serde(default)]
    pub failure_reason: Option<String>,
}

/// The create_order request message.
#[derive(Debug, Clone, Serialize)]
pub struct CreateOrderRequest {
    method: String,
    params: OrderPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    req_id: Option<u64>,
}

impl CreateOrderRequest {
    /// Creates a new create_order request from a payload and optional
    /// request ID.
    #[must_use]
    pub fn new(params: OrderPayload, req_id: Option<u64>) -> Self {
        Self {
            method: "create_order".to_string(),
            params,
            req_id,
        }
    }

    /// Returns the request ID if set.
    #[must_use]
    pub fn req_id(&self) -> Option<u64> {
        self.req_id
    }
}

/// The amend_order request message.
#[derive(Debug, Clone, Serialize)]
pub struct AmendOrderRequest {
    method: String,
    params: OrderPayload,
    #[serde(skip_serializing_if = "Option::is_none")]
    req_id: Option<u64>,
}

impl AmendOrderRequest {
    /// Creates a new amend_order request from a payload and optional
    /// request ID.
    #[must_use]
    pub fn new(params: OrderPayload, req_id: Option<u64>) -> Self {
        Self {
            method: "amend_order".to_string(),
            params,
            req_id,
        }
    }

    /// Returns the request ID if set.
    #[must_use]
    pub fn req_id(&self) -> Option<u64> {
        self.req_id
    }
}

/// Response envelope for create and amend requests.
#[derive(Debug, Clone, Deserialize)]
pub struct SubmitResponse {
    pub method: String,
    pub success: bool,
    #[serde(default)]
    pub result: Option<SubmitAck>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub req_id: Option<u64>,
}
