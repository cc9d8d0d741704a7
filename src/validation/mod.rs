//! Field and form validation engine.
//!
//! Validation runs in two phases. The synchronous phase checks the
//! candidate value against the schema rules over the *entire* derived
//! order. If it passes and the field is in the server-checked subset, an
//! asynchronous field check goes to the gateway; its result is only
//! applied if the field's monotonic request id is still current, which
//! is the sole ordering mechanism — in-flight checks are never
//! cancelled, stale responses are simply dropped.
//!
//! Reference-data cross-checks are a third, synchronous concern: each of
//! account, order type, currency pair, and liquidity pool is verified
//! against the current snapshot, feeding both per-field messages and a
//! global advisory that must not clobber a server-set global error.

pub mod debounce;
pub mod rules;

use std::collections::{BTreeMap, BTreeSet};

use tracing::{debug, warn};

use crate::form::OrderForm;
use crate::models::field_check::{CheckSeverity, FieldCheckRequest, FieldCheckResponse};
use crate::refdata::RefDataStore;
use crate::store::{DerivedOrder, FieldKey, FieldValue};

/// Fixed global advisory shown while any reference-data error exists.
pub const REF_DATA_ADVISORY: &str =
    "Some order details reference data that is no longer available";

const ACCOUNT_UNAVAILABLE: &str = "account is not available";
const ORDER_TYPE_NOT_ENTITLED: &str = "order type is not entitled";
const PAIR_UNAVAILABLE: &str = "currency pair is not available";
const POOL_UNAVAILABLE: &str = "liquidity pool is not available";

/// Fields whose values are cross-checked with server truth after a
/// clean schema pass.
const SERVER_CHECKED_FIELDS: &[FieldKey] = &[FieldKey::Amount, FieldKey::Level];

/// Where a global message came from; governs who may clear it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GlobalMessageOrigin {
    RefData,
    Server,
}

/// A banner-level message with its origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlobalMessage {
    pub text: String,
    pub origin: GlobalMessageOrigin,
}

/// Per-field validation bookkeeping.
#[derive(Debug, Default)]
pub struct ValidationState {
    /// Synchronous schema violations.
    pub errors: BTreeMap<FieldKey, String>,
    /// Hard async rejections; block submission while present.
    pub server_errors: BTreeMap<FieldKey, String>,
    /// Soft async advisories; never block submission.
    pub warnings: BTreeMap<FieldKey, String>,
    /// Values pointing at data absent from the reference snapshot.
    pub ref_data_errors: BTreeMap<FieldKey, String>,
    /// Banner message, ref-data or server originated.
    pub global_message: Option<GlobalMessage>,
    validating: BTreeSet<FieldKey>,
    request_ids: BTreeMap<FieldKey, u64>,
}

impl ValidationState {
    /// Allocates the next request id for a field and makes it current.
    pub fn next_request_id(&mut self, key: FieldKey) -> u64 {
        let id = self.current_request_id(key) + 1;
        self.request_ids.insert(key, id);
        id
    }

    /// The field's current request id (0 before any validation).
    #[must_use]
    pub fn current_request_id(&self, key: FieldKey) -> u64 {
        self.request_ids.get(&key).copied().unwrap_or(0)
    }

    /// Whether a result carrying `request_id` may still be applied.
    #[must_use]
    pub fn is_current(&self, key: FieldKey, request_id: u64) -> bool {
        self.current_request_id(key) == request_id
    }

    pub fn set_validating(&mut self, key: FieldKey) {
        self.validating.insert(key);
    }

    pub fn clear_validating(&mut self, key: FieldKey) {
        self.validating.remove(&key);
    }

    /// Whether an async check is outstanding for the field (drives the
    /// per-field spinner).
    #[must_use]
    pub fn is_validating(&self, key: FieldKey) -> bool {
        self.validating.contains(&key)
    }

    /// Drops the field's sync and async messages. Called on edit so
    /// stale text vanishes immediately.
    pub fn clear_field_messages(&mut self, key: FieldKey) {
        self.errors.remove(&key);
        self.server_errors.remove(&key);
        self.warnings.remove(&key);
    }

    /// Whether anything blocks submission. Warnings never do.
    #[must_use]
    pub fn has_blocking_errors(&self) -> bool {
        !self.errors.is_empty() || !self.server_errors.is_empty()
    }
}

/// Handle for an async check issued by the synchronous phase.
#[derive(Debug)]
pub struct PendingCheck {
    pub key: FieldKey,
    pub request_id: u64,
    pub request: FieldCheckRequest,
}

/// Transport for per-field server checks.
pub trait FieldCheckGateway {
    fn check_field(
        &self,
        request: &FieldCheckRequest,
    ) -> impl Future<Output = crate::Result<FieldCheckResponse>> + Send;
}

/// Synchronous phase of field validation.
///
/// Allocates a fresh request id, marks the field validating, clears its
/// schema error, and checks the candidate value against the whole
/// derived order. A schema violation for the field ends validation
/// there; otherwise a [`PendingCheck`] is returned when the field needs
/// a server check.
pub fn begin_field_validation(
    form: &mut OrderForm,
    key: FieldKey,
    value: FieldValue,
) -> Option<PendingCheck> {
    let request_id = form.validation.next_request_id(key);
    form.validation.set_validating(key);
    form.validation.errors.remove(&key);

    let candidate = form.derived_values().with_override(key, value.clone());
    let violations = rules::check_order(&candidate);
    if let Some(violation) = violations.iter().find(|v| v.field == key) {
        // Sync path: the id we just allocated is necessarily current.
        form.validation.errors.insert(key, violation.message.clone());
        form.validation.clear_validating(key);
        return None;
    }

    if !SERVER_CHECKED_FIELDS.contains(&key) {
        form.validation.clear_validating(key);
        return None;
    }

    Some(PendingCheck {
        key,
        request_id,
        request: FieldCheckRequest::new(key, &value, &candidate),
    })
}

/// Applies an async check outcome, enforcing the request-id guard
/// before any state write. Transport faults are logged and treated as
/// "no error determined" rather than propagated.
pub fn apply_field_check(
    form: &mut OrderForm,
    key: FieldKey,
    request_id: u64,
    outcome: crate::Result<FieldCheckResponse>,
) {
    if !form.validation.is_current(key, request_id) {
        debug!(
            field = key.as_str(),
            request_id,
            current = form.validation.current_request_id(key),
            "Discarding stale field check result"
        );
        return;
    }

    match outcome {
        Ok(response) if response.ok => {
            form.validation.server_errors.remove(&key);
            form.validation.warnings.remove(&key);
        }
        Ok(response) => {
            let message = response
                .message
                .unwrap_or_else(|| "value rejected by server validation".to_string());
            match response.severity {
                CheckSeverity::Hard => {
                    form.validation.server_errors.insert(key, message);
                    form.validation.warnings.remove(&key);
                }
                CheckSeverity::Soft => {
                    form.validation.warnings.insert(key, message);
                    form.validation.server_errors.remove(&key);
                }
            }
        }
        Err(e) => {
            warn!(field = key.as_str(), error = %e, "Field check failed; no error determined");
        }
    }

    form.validation.clear_validating(key);
}

/// Validates one field end to end: sync phase, then the server round
/// trip when the field needs one.
pub async fn validate_field<G: FieldCheckGateway>(
    form: &mut OrderForm,
    gateway: &G,
    key: FieldKey,
    value: FieldValue,
) {
    let Some(pending) = begin_field_validation(form, key, value) else {
        return;
    };
    let outcome = gateway.check_field(&pending.request).await;
    apply_field_check(form, pending.key, pending.request_id, outcome);
}

/// Cross-checks the derived order against the reference snapshot.
///
/// Idempotent for unchanged state, callable at any time; does nothing
/// until the first snapshot has loaded. Sets the global advisory while
/// any reference error exists, without clobbering a server-set global
/// message, and clears the advisory only when it was the generic
/// ref-data message.
pub fn validate_ref_data(form: &mut OrderForm, refdata: &RefDataStore) {
    let Some(snapshot) = refdata.snapshot() else {
        return;
    };
    let derived = form.derived_values();

    let mut errors = BTreeMap::new();
    if let Some(account) = derived.account() {
        if !snapshot.has_account(account.sds_id) {
            errors.insert(FieldKey::Account, ACCOUNT_UNAVAILABLE.to_string());
        }
    }
    if let Some(order_type) = derived.order_type() {
        if !snapshot.is_entitled(order_type) {
            errors.insert(FieldKey::OrderType, ORDER_TYPE_NOT_ENTITLED.to_string());
        }
    }
    if let Some(pair) = derived.currency_pair() {
        if !snapshot.has_pair(pair) {
            errors.insert(FieldKey::CurrencyPair, PAIR_UNAVAILABLE.to_string());
        }
    }
    if let Some(pool) = derived.liquidity_pool() {
        if !snapshot.has_pool(pool) {
            errors.insert(FieldKey::LiquidityPool, POOL_UNAVAILABLE.to_string());
        }
    }

    form.validation.ref_data_errors = errors;

    if form.validation.ref_data_errors.is_empty() {
        // Clear only our own advisory; a server-set message stays.
        if form
            .validation
            .global_message
            .as_ref()
            .is_some_and(|m| m.origin == GlobalMessageOrigin::RefData)
        {
            form.validation.global_message = None;
        }
    } else if form
        .validation
        .global_message
        .as_ref()
        .is_none_or(|m| m.origin == GlobalMessageOrigin::RefData)
    {
        form.validation.global_message = Some(GlobalMessage {
            text: REF_DATA_ADVISORY.to_string(),
            origin: GlobalMessageOrigin::RefData,
        });
    }
}

/// Full-order schema pass used at submission: one message per field,
/// first violation wins. Does not consult the async phase; server
/// checks are an editing-time concern.
#[must_use]
pub fn validate_order(order: &DerivedOrder) -> BTreeMap<FieldKey, String> {
    let mut errors = BTreeMap::new();
    for violation in rules::check_order(order) {
        errors.entry(violation.field).or_insert(violation.message);
    }
    errors
}
