//! Reference-data wire models.
//!
//! The reference-data service delivers one batch: accounts, liquidity
//! pools, currency pair descriptors, and the order types this user is
//! entitled to. The batch is consumed wholesale; partial batches are
//! never merged.

use serde::{Deserialize, Serialize};

use crate::models::order::OrderType;

/// A tradable account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountRef {
    pub id: i64,
    pub name: String,
}

/// A liquidity pool: display name plus the routing value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiquidityPoolRef {
    pub name: String,
    pub value: String,
}

/// Static descriptor for a currency pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrencyPairRef {
    pub symbol: String,
    pub base: String,
    pub quote: String,
    pub amount_precision: u32,
    pub price_precision: u32,
}

/// One reference-data batch.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefDataBatch {
    pub accounts: Vec<AccountRef>,
    pub liquidity_pools: Vec<LiquidityPoolRef>,
    pub currency_pairs: Vec<CurrencyPairRef>,
    pub entitled_order_types: Vec<OrderType>,
}
