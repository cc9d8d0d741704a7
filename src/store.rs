//! Layered order value store.
//!
//! The order being built is never held as one mutable object. It is always
//! the result of merging ordered layers key-by-key, later layers winning:
//!
//! `defaults < preferences < intent < committed < edits`
//!
//! The merge is shallow per top-level field; nested values such as
//! [`Amount`], [`Account`], and [`Expiry`] are replaced wholesale, never
//! deep-merged. The `committed` layer is the placed-order snapshot taken
//! on submission success; it is empty until then. [`LayeredStore::set_field`]
//! is the only writer of the user-edit layer.

use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::models::order::{
    Account, Amount, DelayBehaviour, ExecutionStyle, Expiry, OrderSide, OrderStatus, OrderType,
    StartMode, TriggerSide,
};

/// Closed set of order field keys.
///
/// `Status`, `ExpiryEndTime`, and `ExpiryEndTimeZone` are render keys:
/// they appear in view-field lists and visibility rules but are never
/// stored in a layer (`Status` is server-derived; the expiry sub-fields
/// live inside the [`Expiry`] value).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldKey {
    Status,
    CurrencyPair,
    Side,
    OrderType,
    Amount,
    Level,
    LiquidityPool,
    Account,
    StartMode,
    StartTime,
    StartDate,
    TimeZone,
    Expiry,
    ExpiryEndTime,
    ExpiryEndTimeZone,
    TargetExecutionRate,
    ParticipationRate,
    ExecutionStyle,
    DiscretionFactor,
    TriggerSide,
    Iceberg,
    Skew,
    FranchiseExposure,
    DelayBehaviour,
    FixingId,
    FixingDate,
    TwapTargetEndTime,
    TwapTargetEndTimeZone,
}

impl FieldKey {
    /// Returns the wire-format field name.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKey::Status => "status",
            FieldKey::CurrencyPair => "currencyPair",
            FieldKey::Side => "side",
            FieldKey::OrderType => "orderType",
            FieldKey::Amount => "amount",
            FieldKey::Level => "level",
            FieldKey::LiquidityPool => "liquidityPool",
            FieldKey::Account => "account",
            FieldKey::StartMode => "startMode",
            FieldKey::StartTime => "startTime",
            FieldKey::StartDate => "startDate",
            FieldKey::TimeZone => "timeZone",
            FieldKey::Expiry => "expiry",
            FieldKey::ExpiryEndTime => "expiryEndTime",
            FieldKey::ExpiryEndTimeZone => "expiryEndTimeZone",
            FieldKey::TargetExecutionRate => "targetExecutionRate",
            FieldKey::ParticipationRate => "participationRate",
            FieldKey::ExecutionStyle => "executionStyle",
            FieldKey::DiscretionFactor => "discretionFactor",
            FieldKey::TriggerSide => "triggerSide",
            FieldKey::Iceberg => "iceberg",
            FieldKey::Skew => "skew",
            FieldKey::FranchiseExposure => "franchiseExposure",
            FieldKey::DelayBehaviour => "delayBehaviour",
            FieldKey::FixingId => "fixingId",
            FieldKey::FixingDate => "fixingDate",
            FieldKey::TwapTargetEndTime => "twapTargetEndTime",
            FieldKey::TwapTargetEndTimeZone => "twapTargetEndTimeZone",
        }
    }
}

/// Closed tagged union over the value shapes order fields take.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Decimal(Decimal),
    Side(OrderSide),
    OrderType(OrderType),
    Amount(Amount),
    Account(Account),
    Expiry(Expiry),
    StartMode(StartMode),
    ExecutionStyle(ExecutionStyle),
    TriggerSide(TriggerSide),
    DelayBehaviour(DelayBehaviour),
}

impl FieldValue {
    /// Creates a text value.
    #[must_use]
    pub fn text(s: &str) -> Self {
        FieldValue::Text(s.to_string())
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_decimal(&self) -> Option<Decimal> {
        match self {
            FieldValue::Decimal(d) => Some(*d),
            _ => None,
        }
    }

    pub fn as_side(&self) -> Option<OrderSide> {
        match self {
            FieldValue::Side(s) => Some(*s),
            _ => None,
        }
    }

    pub fn as_order_type(&self) -> Option<OrderType> {
        match self {
            FieldValue::OrderType(t) => Some(*t),
            _ => None,
        }
    }

    pub fn as_amount(&self) -> Option<&Amount> {
        match self {
            FieldValue::Amount(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_account(&self) -> Option<&Account> {
        match self {
            FieldValue::Account(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_expiry(&self) -> Option<&Expiry> {
        match self {
            FieldValue::Expiry(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_start_mode(&self) -> Option<StartMode> {
        match self {
            FieldValue::StartMode(m) => Some(*m),
            _ => None,
        }
    }
}

impl std::fmt::Display for FieldValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FieldValue::Text(s) => write!(f, "{s}"),
            FieldValue::Decimal(d) => write!(f, "{d}"),
            FieldValue::Side(s) => write!(f, "{}", s.as_str()),
            FieldValue::OrderType(t) => write!(f, "{}", t.as_str()),
            FieldValue::Amount(a) => write!(f, "{}", a.amount),
            FieldValue::Account(a) => write!(f, "{}", a.name),
            FieldValue::Expiry(e) => write!(f, "{:?}", e.strategy),
            FieldValue::StartMode(m) => write!(f, "{m:?}"),
            FieldValue::ExecutionStyle(s) => write!(f, "{s:?}"),
            FieldValue::TriggerSide(s) => write!(f, "{s:?}"),
            FieldValue::DelayBehaviour(b) => write!(f, "{b:?}"),
        }
    }
}

/// A partial order: an ordered map of field values.
///
/// The unit of every layer and of external-intent application.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderPatch {
    values: BTreeMap<FieldKey, FieldValue>,
}

impl OrderPatch {
    /// Creates an empty patch.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert, for constructing patches inline.
    #[must_use]
    pub fn with(mut self, key: FieldKey, value: FieldValue) -> Self {
        self.values.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: FieldKey, value: FieldValue) {
        self.values.insert(key, value);
    }

    pub fn remove(&mut self, key: FieldKey) -> Option<FieldValue> {
        self.values.remove(&key)
    }

    #[must_use]
    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.values.get(&key)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    /// Overwrites this patch's entries with `other`'s, key by key.
    /// Nested values are replaced wholesale.
    pub fn overlay(&mut self, other: &OrderPatch) {
        for (key, value) in &other.values {
            self.values.insert(*key, value.clone());
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (FieldKey, &FieldValue)> {
        self.values.iter().map(|(k, v)| (*k, v))
    }
}

/// The merge result: one effective order plus the status overlay.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedOrder {
    values: OrderPatch,
    status: Option<OrderStatus>,
}

impl DerivedOrder {
    #[must_use]
    pub fn get(&self, key: FieldKey) -> Option<&FieldValue> {
        self.values.get(key)
    }

    /// Returns a copy with one field overridden, for validating a
    /// candidate value against the full order.
    #[must_use]
    pub fn with_override(&self, key: FieldKey, value: FieldValue) -> DerivedOrder {
        let mut values = self.values.clone();
        values.insert(key, value);
        DerivedOrder {
            values,
            status: self.status,
        }
    }

    #[must_use]
    pub fn status(&self) -> Option<OrderStatus> {
        self.status
    }

    pub fn currency_pair(&self) -> Option<&str> {
        self.get(FieldKey::CurrencyPair).and_then(FieldValue::as_text)
    }

    pub fn side(&self) -> Option<OrderSide> {
        self.get(FieldKey::Side).and_then(FieldValue::as_side)
    }

    pub fn order_type(&self) -> Option<OrderType> {
        self.get(FieldKey::OrderType).and_then(FieldValue::as_order_type)
    }

    pub fn amount(&self) -> Option<&Amount> {
        self.get(FieldKey::Amount).and_then(FieldValue::as_amount)
    }

    pub fn level(&self) -> Option<Decimal> {
        self.get(FieldKey::Level).and_then(FieldValue::as_decimal)
    }

    pub fn liquidity_pool(&self) -> Option<&str> {
        self.get(FieldKey::LiquidityPool).and_then(FieldValue::as_text)
    }

    pub fn account(&self) -> Option<&Account> {
        self.get(FieldKey::Account).and_then(FieldValue::as_account)
    }

    pub fn start_mode(&self) -> Option<StartMode> {
        self.get(FieldKey::StartMode).and_then(FieldValue::as_start_mode)
    }

    pub fn expiry(&self) -> Option<&Expiry> {
        self.get(FieldKey::Expiry).and_then(FieldValue::as_expiry)
    }

    /// Typed accessor for any decimal-valued field.
    pub fn decimal(&self, key: FieldKey) -> Option<Decimal> {
        self.get(key).and_then(FieldValue::as_decimal)
    }

    /// Typed accessor for any text-valued field.
    pub fn text(&self, key: FieldKey) -> Option<&str> {
        self.get(key).and_then(FieldValue::as_text)
    }
}

/// Holds the ordered layers and produces the derived order.
#[derive(Debug, Default)]
pub struct LayeredStore {
    defaults: OrderPatch,
    preferences: OrderPatch,
    intent: OrderPatch,
    committed: OrderPatch,
    edits: OrderPatch,
    last_status: Option<OrderStatus>,
}

impl LayeredStore {
    /// Creates a store seeded with process-constant defaults.
    #[must_use]
    pub fn new(defaults: OrderPatch) -> Self {
        Self {
            defaults,
            ..Self::default()
        }
    }

    /// Merges all layers in precedence order and overlays the last
    /// known order status.
    #[must_use]
    pub fn derived(&self) -> DerivedOrder {
        DerivedOrder {
            values: self.merged(),
            status: self.last_status,
        }
    }

    fn merged(&self) -> OrderPatch {
        let mut merged = self.defaults.clone();
        merged.overlay(&self.preferences);
        merged.overlay(&self.intent);
        merged.overlay(&self.committed);
        merged.overlay(&self.edits);
        merged
    }

    /// Writes a value into the user-edit layer. The only writer of that
    /// layer; unrelated fields are untouched.
    pub fn set_field(&mut self, key: FieldKey, value: FieldValue) {
        self.edits.insert(key, value);
    }

    /// Whether the user-edit layer is non-empty.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        !self.edits.is_empty()
    }

    pub fn clear_edits(&mut self) {
        self.edits.clear();
    }

    /// Replaces the preference layer. Preferences arrive once per
    /// session from the user-preference stream.
    pub fn set_preferences(&mut self, preferences: OrderPatch) {
        self.preferences = preferences;
    }

    /// Replaces the external-intent layer wholesale. Intents are never
    /// merged field-by-field into user edits.
    pub fn set_intent(&mut self, intent: OrderPatch) {
        self.intent = intent;
    }

    /// Promotes the current effective order into the placed snapshot and
    /// clears the edit layer. Called on submission success.
    pub fn commit(&mut self) {
        self.committed = self.merged();
        self.edits.clear();
    }

    pub fn set_status(&mut self, status: Option<OrderStatus>) {
        self.last_status = status;
    }

    #[must_use]
    pub fn status(&self) -> Option<OrderStatus> {
        self.last_status
    }
}
