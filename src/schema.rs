//! Order-type schema registry.
//!
//! Pure static configuration: for each order type, the ordered field
//! list, the subset that stays editable while amending, and the field
//! that takes initial focus. Invariants (checked by tests): editable
//! fields are a subset of the field list, the initial-focus field is in
//! the list, and every type includes side, amount, and account.

use crate::models::order::OrderType;
use crate::store::FieldKey;

/// How a field is rendered. Closed set so dispatch stays exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Non-editable status/execution marker.
    Marker,
    /// Fixed-choice selector (side, order type, pools, enums).
    Select,
    /// Sized amount with currency.
    Amount,
    /// Plain decimal input (level, rates, factors).
    Decimal,
    /// Free text.
    Text,
    /// Calendar date.
    Date,
    /// Time of day.
    Time,
    /// Account picker backed by reference data.
    Account,
}

/// Returns the render kind for a field.
#[must_use]
pub fn render_kind(field: FieldKey) -> FieldKind {
    match field {
        FieldKey::Status => FieldKind::Marker,
        FieldKey::CurrencyPair
        | FieldKey::Side
        | FieldKey::OrderType
        | FieldKey::LiquidityPool
        | FieldKey::StartMode
        | FieldKey::Expiry
        | FieldKey::ExecutionStyle
        | FieldKey::TriggerSide
        | FieldKey::DelayBehaviour
        | FieldKey::TimeZone
        | FieldKey::ExpiryEndTimeZone
        | FieldKey::TwapTargetEndTimeZone => FieldKind::Select,
        FieldKey::Amount => FieldKind::Amount,
        FieldKey::Level
        | FieldKey::TargetExecutionRate
        | FieldKey::ParticipationRate
        | FieldKey::DiscretionFactor
        | FieldKey::Iceberg
        | FieldKey::Skew
        | FieldKey::FranchiseExposure => FieldKind::Decimal,
        FieldKey::FixingId => FieldKind::Text,
        FieldKey::StartDate | FieldKey::FixingDate => FieldKind::Date,
        FieldKey::StartTime
        | FieldKey::ExpiryEndTime
        | FieldKey::TwapTargetEndTime => FieldKind::Time,
        FieldKey::Account => FieldKind::Account,
    }
}

/// Per-order-type form configuration.
#[derive(Debug)]
pub struct OrderTypeConfig {
    /// Ordered field list rendered for this type.
    pub fields: &'static [FieldKey],
    /// Fields that remain writable while amending.
    pub editable_fields: &'static [FieldKey],
    /// Field focused when the form opens.
    pub initial_focus: FieldKey,
}

static LIMIT: OrderTypeConfig = OrderTypeConfig {
    fields: &[
        FieldKey::CurrencyPair,
        FieldKey::Side,
        FieldKey::Amount,
        FieldKey::Level,
        FieldKey::Iceberg,
        FieldKey::Skew,
        FieldKey::LiquidityPool,
        FieldKey::Account,
        FieldKey::StartMode,
        FieldKey::StartTime,
        FieldKey::StartDate,
        FieldKey::TimeZone,
        FieldKey::Expiry,
    ],
    editable_fields: &[
        FieldKey::Amount,
        FieldKey::Level,
        FieldKey::Iceberg,
        FieldKey::Expiry,
    ],
    initial_focus: FieldKey::Amount,
};

static STOP_LOSS: OrderTypeConfig = OrderTypeConfig {
    fields: &[
        FieldKey::CurrencyPair,
        FieldKey::Side,
        FieldKey::Amount,
        FieldKey::Level,
        FieldKey::TriggerSide,
        FieldKey::DelayBehaviour,
        FieldKey::LiquidityPool,
        FieldKey::Account,
        FieldKey::StartMode,
        FieldKey::StartTime,
        FieldKey::StartDate,
        FieldKey::TimeZone,
        FieldKey::Expiry,
    ],
    editable_fields: &[FieldKey::Amount, FieldKey::Level, FieldKey::Expiry],
    initial_focus: FieldKey::Level,
};

static TAKE_PROFIT: OrderTypeConfig = OrderTypeConfig {
    fields: &[
        FieldKey::CurrencyPair,
        FieldKey::Side,
        FieldKey::Amount,
        FieldKey::Level,
        FieldKey::TriggerSide,
        FieldKey::LiquidityPool,
        FieldKey::Account,
        FieldKey::Expiry,
    ],
    editable_fields: &[FieldKey::Amount, FieldKey::Level, FieldKey::Expiry],
    initial_focus: FieldKey::Level,
};

static FLOAT: OrderTypeConfig = OrderTypeConfig {
    fields: &[
        FieldKey::CurrencyPair,
        FieldKey::Side,
        FieldKey::Amount,
        FieldKey::Level,
        FieldKey::FranchiseExposure,
        FieldKey::Skew,
        FieldKey::LiquidityPool,
        FieldKey::Account,
        FieldKey::StartMode,
        FieldKey::StartTime,
        FieldKey::StartDate,
        FieldKey::TimeZone,
        FieldKey::Expiry,
    ],
    editable_fields: &[
        FieldKey::Amount,
        FieldKey::Level,
        FieldKey::Skew,
        FieldKey::Expiry,
    ],
    initial_focus: FieldKey::Amount,
};

static TWAP: OrderTypeConfig = OrderTypeConfig {
    fields: &[
        FieldKey::CurrencyPair,
        FieldKey::Side,
        FieldKey::Amount,
        FieldKey::TargetExecutionRate,
        FieldKey::ExecutionStyle,
        FieldKey::DiscretionFactor,
        FieldKey::TwapTargetEndTime,
        FieldKey::TwapTargetEndTimeZone,
        FieldKey::LiquidityPool,
        FieldKey::Account,
        FieldKey::StartMode,
        FieldKey::StartTime,
        FieldKey::StartDate,
        FieldKey::TimeZone,
        FieldKey::Expiry,
    ],
    editable_fields: &[
        FieldKey::Amount,
        FieldKey::TargetExecutionRate,
        FieldKey::TwapTargetEndTime,
        FieldKey::Expiry,
    ],
    initial_focus: FieldKey::Amount,
};

static POV: OrderTypeConfig = OrderTypeConfig {
    fields: &[
        FieldKey::CurrencyPair,
        FieldKey::Side,
        FieldKey::Amount,
        FieldKey::ParticipationRate,
        FieldKey::ExecutionStyle,
        FieldKey::DiscretionFactor,
        FieldKey::LiquidityPool,
        FieldKey::Account,
        FieldKey::StartMode,
        FieldKey::StartTime,
        FieldKey::StartDate,
        FieldKey::TimeZone,
        FieldKey::Expiry,
    ],
    editable_fields: &[FieldKey::Amount, FieldKey::ParticipationRate, FieldKey::Expiry],
    initial_focus: FieldKey::Amount,
};

static FIXING: OrderTypeConfig = OrderTypeConfig {
    fields: &[
        FieldKey::CurrencyPair,
        FieldKey::Side,
        FieldKey::Amount,
        FieldKey::FixingId,
        FieldKey::FixingDate,
        FieldKey::LiquidityPool,
        FieldKey::Account,
    ],
    editable_fields: &[FieldKey::Amount],
    initial_focus: FieldKey::Amount,
};

/// Looks up the form configuration for an order type. Pure; no side
/// effects.
#[must_use]
pub fn config_for(order_type: OrderType) -> &'static OrderTypeConfig {
    match order_type {
        OrderType::Limit => &LIMIT,
        OrderType::StopLoss => &STOP_LOSS,
        OrderType::TakeProfit => &TAKE_PROFIT,
        OrderType::Float => &FLOAT,
        OrderType::Twap => &TWAP,
        OrderType::Pov => &POV,
        OrderType::Fixing => &FIXING,
    }
}

/// Field list for the read-only view: the configured fields with a
/// non-reorderable status/execution marker prepended.
#[must_use]
pub fn view_fields(order_type: OrderType) -> Vec<FieldKey> {
    let config = config_for(order_type);
    let mut fields = Vec::with_capacity(config.fields.len() + 1);
    fields.push(FieldKey::Status);
    fields.extend_from_slice(config.fields);
    fields
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn editable_fields_contained_in_fields() {
        for order_type in OrderType::ALL {
            let config = config_for(order_type);
            for field in config.editable_fields {
                assert!(
                    config.fields.contains(field),
                    "{order_type:?}: editable field {field:?} not in field list"
                );
            }
        }
    }

    #[test]
    fn initial_focus_in_fields() {
        for order_type in OrderType::ALL {
            let config = config_for(order_type);
            assert!(config.fields.contains(&config.initial_focus));
        }
    }

    #[test]
    fn mandatory_fields_present_for_every_type() {
        for order_type in OrderType::ALL {
            let config = config_for(order_type);
            for required in [FieldKey::Side, FieldKey::Amount, FieldKey::Account] {
                assert!(
                    config.fields.contains(&required),
                    "{order_type:?}: missing {required:?}"
                );
            }
        }
    }

    #[test]
    fn view_fields_prepend_status_marker() {
        for order_type in OrderType::ALL {
            let fields = view_fields(order_type);
            assert_eq!(fields[0], FieldKey::Status);
            assert_eq!(&fields[1..], config_for(order_type).fields);
        }
    }

    #[test]
    fn status_marker_renders_as_marker() {
        assert_eq!(render_kind(FieldKey::Status), FieldKind::Marker);
        assert_eq!(render_kind(FieldKey::Amount), FieldKind::Amount);
        assert_eq!(render_kind(FieldKey::Level), FieldKind::Decimal);
    }
}
