//! Per-field server validation RPC models.
//!
//! A field check ships one candidate value together with the routing
//! context the server needs (order type, pair, account, pool) and comes
//! back classified as a hard error or a soft advisory.

use serde::{Deserialize, Serialize};

use crate::models::order::OrderType;
use crate::store::{DerivedOrder, FieldKey, FieldValue};

/// Severity of a failed field check.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CheckSeverity {
    /// Advisory; never blocks submission.
    Soft,
    /// Blocks submission while present.
    Hard,
}

impl Default for CheckSeverity {
    fn default() -> Self {
        CheckSeverity::Soft
    }
}

/// Parameters for a per-field server check.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldCheckRequest {
    pub field: String,
    pub value: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub order_type: Option<OrderType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency_pair: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub liquidity_pool: Option<String>,
}

impl FieldCheckRequest {
    /// Builds a check request for one candidate value, pulling routing
    /// context from the derived order.
    #[must_use]
    pub fn new(key: FieldKey, value: &FieldValue, order: &DerivedOrder) -> Self {
        Self {
            field: key.as_str().to_string(),
            value: value.to_string(),
            order_type: order.order_type(),
            currency_pair: order.currency_pair().map(str::to_string),
            account: order.account().map(|a| a.name.clone()),
            liquidity_pool: order.liquidity_pool().map(str::to_string),
        }
    }
}

/// Outcome of a per-field server check.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldCheckResponse {
    pub ok: bool,
    #[serde(rename = "type", default)]
    pub severity: CheckSeverity,
    #[serde(default)]
    pub message: Option<String>,
}

/// The check_field request message.
#[derive(Debug, Clone, Serialize)]
pub struct FieldCheckRpcRequest {
    method: String,
    params: FieldCheckRequest,
    #[serde(skip_serializing_if = "Option::is_none")]
    req_id: Option<u64>,
}

impl FieldCheckRpcRequest {
    /// Creates a new check_field request from params and optional
    /// request ID.
    #[must_use]
    pub fn new(params: FieldCheckRequest, req_id: Option<u64>) -> Self {
        Self {
            method: "check_field".to_string(),
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

/// Response envelope for check_field requests.
#[derive(Debug, Clone, Deserialize)]
pub struct FieldCheckRpcResponse {
    pub method: String,
    pub success: bool,
    #[serde(default)]
    pub result: Option<FieldCheckResponse>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub req_id: Option<u64>,
}
