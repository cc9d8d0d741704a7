//! Synchronous schema rules.
//!
//! Every rule sees the entire derived order, never a single field in
//! isolation, so cross-field constraints (scheduled starts, date-bound
//! expiries, per-type parameters) evaluate correctly when any one field
//! changes.

use rust_decimal::Decimal;

use crate::models::order::{OrderType, StartMode};
use crate::store::{DerivedOrder, FieldKey};

/// One schema violation, scoped to the top-level field it concerns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub field: FieldKey,
    pub message: String,
}

impl Violation {
    fn new(field: FieldKey, message: &str) -> Self {
        Self {
            field,
            message: message.to_string(),
        }
    }
}

/// Runs the full schema pass over a derived order and returns every
/// violation found. Pure; never raises.
#[must_use]
pub fn check_order(order: &DerivedOrder) -> Vec<Violation> {
    let mut violations = Vec::new();

    if order.currency_pair().is_none_or(str::is_empty) {
        violations.push(Violation::new(
            FieldKey::CurrencyPair,
            "currency pair is required",
        ));
    }
    if order.side().is_none() {
        violations.push(Violation::new(FieldKey::Side, "side is required"));
    }
    if order.order_type().is_none() {
        violations.push(Violation::new(FieldKey::OrderType, "order type is required"));
    }
    match order.amount() {
        None => violations.push(Violation::new(FieldKey::Amount, "amount is required")),
        Some(amount) => {
            if amount.amount <= Decimal::ZERO {
                violations.push(Violation::new(FieldKey::Amount, "amount must be positive"));
            }
            if amount.ccy.is_empty() {
                violations.push(Violation::new(
                    FieldKey::Amount,
                    "amount currency is required",
                ));
            }
        }
    }
    if order.account().is_none() {
        violations.push(Violation::new(FieldKey::Account, "account is required"));
    }
    if order.liquidity_pool().is_none_or(str::is_empty) {
        violations.push(Violation::new(
            FieldKey::LiquidityPool,
            "liquidity pool is required",
        ));
    }

    if let Some(level) = order.level() {
        if level <= Decimal::ZERO {
            violations.push(Violation::new(FieldKey::Level, "level must be positive"));
        }
    } else if order.order_type().is_some_and(|t| t.requires_level()) {
        violations.push(Violation::new(
            FieldKey::Level,
            "level is required for this order type",
        ));
    }

    if order.start_mode() == Some(StartMode::StartAt) {
        if order.text(FieldKey::StartTime).is_none_or(str::is_empty) {
            violations.push(Violation::new(
                FieldKey::StartTime,
                "start time is required for a scheduled start",
            ));
        }
        if order.text(FieldKey::TimeZone).is_none_or(str::is_empty) {
            violations.push(Violation::new(
                FieldKey::TimeZone,
                "time zone is required for a scheduled start",
            ));
        }
    }

    if let Some(expiry) = order.expiry() {
        if expiry.strategy.is_date_bound()
            && expiry.end_time.as_deref().is_none_or(str::is_empty)
        {
            violations.push(Violation::new(
                FieldKey::Expiry,
                "expiry end time is required for a date-bound expiry",
            ));
        }
    }

    if let Some(order_type) = order.order_type() {
        check_type_parameters(order, order_type, &mut violations);
    }

    violations
}

fn check_type_parameters(
    order: &DerivedOrder,
    order_type: OrderType,
    violations: &mut Vec<Violation>,
) {
    match order_type {
        OrderType::Twap => {
            if order
                .text(FieldKey::TwapTargetEndTime)
                .is_none_or(str::is_empty)
            {
                violations.push(Violation::new(
                    FieldKey::TwapTargetEndTime,
                    "target end time is required for TWAP orders",
                ));
            }
            if let Some(rate) = order.decimal(FieldKey::TargetExecutionRate) {
                if rate <= Decimal::ZERO {
                    violations.push(Violation::new(
                        FieldKey::TargetExecutionRate,
                        "target execution rate must be positive",
                    ));
                }
            }
        }
        OrderType::Pov => match order.decimal(FieldKey::ParticipationRate) {
            None => violations.push(Violation::new(
                FieldKey::ParticipationRate,
                "participation rate is required for POV orders",
            )),
            Some(rate) => {
                if rate <= Decimal::ZERO || rate > Decimal::ONE_HUNDRED {
                    violations.push(Violation::new(
                        FieldKey::ParticipationRate,
                        "participation rate must be between 0 and 100",
                    ));
                }
            }
        },
        OrderType::Fixing => {
            if order.text(FieldKey::FixingId).is_none_or(str::is_empty) {
                violations.push(Violation::new(
                    FieldKey::FixingId,
                    "fixing is required for fixing orders",
                ));
            }
            if order.text(FieldKey::FixingDate).is_none_or(str::is_empty) {
                violations.push(Violation::new(
                    FieldKey::FixingDate,
                    "fixing date is required for fixing orders",
                ));
            }
        }
        _ => {}
    }

    if let Some(factor) = order.decimal(FieldKey::DiscretionFactor) {
        if factor < Decimal::ZERO || factor > Decimal::ONE {
            violations.push(Violation::new(
                FieldKey::DiscretionFactor,
                "discretion factor must be between 0 and 1",
            ));
        }
    }
}
