//! Field visibility rules.
//!
//! Each field has at most one rule of shape `fn(&DerivedOrder) -> bool`;
//! absence of a rule means always visible. Rules read only the derived
//! order — never reference data or validation state — so they stay pure
//! and synchronously evaluable on every render.

use crate::models::order::{OrderType, StartMode};
use crate::store::{DerivedOrder, FieldKey};

/// Sentinel liquidity pool value for internalized float liquidity.
pub const FLOAT_POOL: &str = "FLOAT_POOL";

type Rule = fn(&DerivedOrder) -> bool;

fn rule_for(field: FieldKey) -> Option<Rule> {
    match field {
        FieldKey::Level => Some(level_visible),
        FieldKey::StartTime | FieldKey::StartDate | FieldKey::TimeZone => Some(scheduled_start),
        FieldKey::ExpiryEndTime | FieldKey::ExpiryEndTimeZone => Some(date_bound_expiry),
        _ => None,
    }
}

/// Level shows only for price-bearing order types. Stop-loss orders
/// routed to the float pool carry no client level: the pool derives the
/// trigger internally. The carve-out applies to stop-loss only; other
/// types on the float pool keep their level.
fn level_visible(values: &DerivedOrder) -> bool {
    let Some(order_type) = values.order_type() else {
        return false;
    };
    if !order_type.is_price_bearing() {
        return false;
    }
    if order_type == OrderType::StopLoss && values.liquidity_pool() == Some(FLOAT_POOL) {
        return false;
    }
    true
}

fn scheduled_start(values: &DerivedOrder) -> bool {
    values.start_mode() == Some(StartMode::StartAt)
}

fn date_bound_expiry(values: &DerivedOrder) -> bool {
    values
        .expiry()
        .is_some_and(|e| e.strategy.is_date_bound())
}

/// Whether a field is currently shown given the derived order.
#[must_use]
pub fn is_visible(field: FieldKey, values: &DerivedOrder) -> bool {
    match rule_for(field) {
        Some(rule) => rule(values),
        None => true,
    }
}

/// Returns the ordered subset of `fields` passing their visibility rule.
#[must_use]
pub fn filter_visible_fields(fields: &[FieldKey], values: &DerivedOrder) -> Vec<FieldKey> {
    fields
        .iter()
        .copied()
        .filter(|field| is_visible(*field, values))
        .collect()
}
