//! Order submission and amendment.
//!
//! One entry point, [`submit_order`], drives the whole lifecycle: the
//! duplicate-submit guard, the full-order schema pass, payload
//! flattening, the gateway round trip, and the outcome handling that
//! moves the form between creating, viewing, and amending modes.
//! [`begin_amend`] is the only way back from viewing to an editable
//! form.

use tracing::{debug, info, warn};

use crate::form::{EditMode, OrderForm, SubmitStatus};
use crate::models::submit_order::{OrderPayload, SubmitAck, SubmitResult};
use crate::validation;

const MSG_FIX_ERRORS: &str = "Please fix the highlighted fields before submitting";
const MSG_SUBMIT_FAILED: &str = "Order submission failed; please try again";
const MSG_STATUS_UNCERTAIN: &str =
    "Submission result unknown; the order status will update when the gateway reconnects";
const MSG_REJECTED_FALLBACK: &str = "Order was rejected by the server";
const MSG_AMEND_BLOCKED: &str =
    "Order cannot be amended while it references unavailable data";

/// Transport for order create and amend operations.
pub trait OrderGateway {
    fn create_order(
        &self,
        payload: &OrderPayload,
    ) -> impl Future<Output = crate::Result<SubmitAck>> + Send;

    fn amend_order(
        &self,
        payload: &OrderPayload,
    ) -> impl Future<Output = crate::Result<SubmitAck>> + Send;
}

/// Submits the current effective order, creating or amending depending
/// on the form's lifecycle state.
///
/// Re-entrant calls while a round trip is outstanding are ignored. A
/// failed schema pass populates the per-field error map and stops
/// before any network traffic, and outstanding hard server rejections
/// block dispatch the same way. Warnings never block.
pub async fn submit_order<G: OrderGateway>(form: &mut OrderForm, gateway: &G) {
    if form.submit_status == SubmitStatus::Submitting {
        debug!("Submission already in flight; ignoring");
        return;
    }
    form.submit_status = SubmitStatus::Submitting;

    let derived = form.derived_values();
    let errors = validation::validate_order(&derived);
    if !errors.is_empty() {
        for (key, message) in errors {
            form.validation.errors.insert(key, message);
        }
        form.notify_error(MSG_FIX_ERRORS.to_string());
        form.submit_status = SubmitStatus::Idle;
        return;
    }

    if !form.validation.server_errors.is_empty() {
        debug!(
            fields = form.validation.server_errors.len(),
            "Submission blocked by server validation errors"
        );
        form.notify_error(MSG_FIX_ERRORS.to_string());
        form.submit_status = SubmitStatus::Idle;
        return;
    }

    let mut payload = match OrderPayload::from_order(&derived) {
        Ok(payload) => payload,
        Err(e) => {
            warn!(error = %e, "Failed to build order payload after clean schema pass");
            form.notify_error(MSG_SUBMIT_FAILED.to_string());
            form.submit_status = SubmitStatus::Idle;
            return;
        }
    };

    let amending = form.edit_mode == EditMode::Amending && form.current_order_id.is_some();
    let outcome = if amending {
        payload.order_id = form.current_order_id.clone();
        gateway.amend_order(&payload).await
    } else {
        gateway.create_order(&payload).await
    };

    form.submit_status = SubmitStatus::Idle;

    match outcome {
        Ok(ack) if ack.result == SubmitResult::Success => {
            if !amending {
                form.current_order_id = ack.order_id.clone();
            }
            form.store.commit();
            form.validation.server_errors.clear();
            form.validation.warnings.clear();
            form.edit_mode = EditMode::Viewing;

            let verb = if amending { "amended" } else { "placed" };
            info!(
                order_id = ?form.current_order_id,
                pair = ?derived.currency_pair(),
                amending,
                "Order accepted"
            );
            form.notify_success(format!(
                "{} {} order {}",
                derived.side().map(|s| s.as_str()).unwrap_or(""),
                derived.currency_pair().unwrap_or(""),
                verb
            ));
        }
        Ok(ack) => {
            // Business rejection; the order state did not change server-side.
            if amending {
                form.edit_mode = EditMode::Viewing;
            }
            let reason = ack
                .failure_reason
                .unwrap_or_else(|| MSG_REJECTED_FALLBACK.to_string());
            warn!(reason = %reason, amending, "Order rejected");
            form.notify_error(reason);
        }
        Err(e) => {
            warn!(error = %e, amending, "Order submission transport failure");
            if form.current_order_id.is_some() {
                // An order exists server-side; fall back to viewing it.
                form.edit_mode = EditMode::Viewing;
                form.notify_error(MSG_STATUS_UNCERTAIN.to_string());
            } else {
                form.notify_error(MSG_SUBMIT_FAILED.to_string());
            }
        }
    }
}

/// Moves a viewed order into amending mode, re-opening its editable
/// fields. Refused while the order references reference data that has
/// since disappeared.
pub fn begin_amend(form: &mut OrderForm) {
    if !form.validation.ref_data_errors.is_empty() {
        debug!("Amend blocked by reference-data errors");
        form.notify_error(MSG_AMEND_BLOCKED.to_string());
        return;
    }
    form.edit_mode = EditMode::Amending;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{NotificationKind, OrderForm};
    use crate::models::order::{Account, Amount, OrderSide, OrderType};
    use crate::store::{FieldKey, FieldValue, OrderPatch};
    use rust_decimal_macros::dec;
    use std::sync::Mutex;

    struct AckGateway {
        ack: SubmitAck,
        calls: Mutex<Vec<&'static str>>,
    }

    impl AckGateway {
        fn success(order_id: &str) -> Self {
            Self {
                ack: SubmitAck {
                    order_id: Some(order_id.to_string()),
                    result: SubmitResult::Success,
                    failure_reason: None,
                },
                calls: Mutex::new(Vec::new()),
            }
        }

        fn rejection(reason: Option<&str>) -> Self {
            Self {
                ack: SubmitAck {
                    order_id: None,
                    result: SubmitResult::Rejected,
                    failure_reason: reason.map(str::to_string),
                },
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    impl OrderGateway for AckGateway {
        async fn create_order(&self, _payload: &OrderPayload) -> crate::Result<SubmitAck> {
            self.calls.lock().unwrap().push("create");
            Ok(self.ack.clone())
        }

        async fn amend_order(&self, payload: &OrderPayload) -> crate::Result<SubmitAck> {
            assert!(payload.order_id.is_some(), "amend payload must carry id");
            self.calls.lock().unwrap().push("amend");
            Ok(self.ack.clone())
        }
    }

    struct FailingGateway;

    impl OrderGateway for FailingGateway {
        async fn create_order(&self, _payload: &OrderPayload) -> crate::Result<SubmitAck> {
            Err(crate::OrderpadError::Transport("connection reset".to_string()))
        }

        async fn amend_order(&self, _payload: &OrderPayload) -> crate::Result<SubmitAck> {
            Err(crate::OrderpadError::Transport("connection reset".to_string()))
        }
    }

    fn valid_form() -> OrderForm {
        OrderForm::new(
            OrderPatch::new()
                .with(FieldKey::CurrencyPair, FieldValue::text("GBPUSD"))
                .with(FieldKey::Side, FieldValue::Side(OrderSide::Sell))
                .with(FieldKey::OrderType, FieldValue::OrderType(OrderType::Float))
                .with(
                    FieldKey::Amount,
                    FieldValue::Amount(Amount::new(dec!(2500000), "GBP")),
                )
                .with(FieldKey::Account, FieldValue::Account(Account::new("Acct", 1)))
                .with(FieldKey::LiquidityPool, FieldValue::text("POOL1")),
        )
    }

    #[tokio::test]
    async fn create_success_promotes_to_viewing() {
        let mut form = valid_form();
        let gateway = AckGateway::success("ORD-1");

        submit_order(&mut form, &gateway).await;

        assert_eq!(form.current_order_id.as_deref(), Some("ORD-1"));
        assert_eq!(form.edit_mode, EditMode::Viewing);
        assert_eq!(form.submit_status, SubmitStatus::Idle);
        assert!(!form.is_dirty());

        let toast = form.notifications.pop_front().unwrap();
        assert_eq!(toast.kind, NotificationKind::Success);
        assert!(toast.message.contains("SELL"));
        assert!(toast.message.contains("GBPUSD"));
        assert!(toast.message.contains("placed"));
    }

    #[tokio::test]
    async fn schema_failure_blocks_before_network() {
        let mut form = valid_form();
        form.edit_mode = EditMode::Creating;
        form.set_field_value(
            FieldKey::Amount,
            FieldValue::Amount(Amount::new(dec!(0), "GBP")),
        );
        let gateway = AckGateway::success("ORD-1");

        submit_order(&mut form, &gateway).await;

        assert!(gateway.calls.lock().unwrap().is_empty());
        assert!(form.validation.errors.contains_key(&FieldKey::Amount));
        assert_eq!(form.submit_status, SubmitStatus::Idle);
        assert_eq!(form.edit_mode, EditMode::Creating);
        let toast = form.notifications.pop_front().unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
    }

    #[tokio::test]
    async fn hard_server_error_blocks_submission() {
        let mut form = valid_form();
        form.validation
            .server_errors
            .insert(FieldKey::Amount, "Amount exceeds firm limit".to_string());
        let gateway = AckGateway::success("ORD-1");

        submit_order(&mut form, &gateway).await;

        assert!(gateway.calls.lock().unwrap().is_empty());
        assert_eq!(form.submit_status, SubmitStatus::Idle);
        assert_eq!(form.edit_mode, EditMode::Creating);
        assert!(form.current_order_id.is_none());
        let toast = form.notifications.pop_front().unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(toast.message, MSG_FIX_ERRORS);
    }

    #[tokio::test]
    async fn duplicate_submit_ignored_while_in_flight() {
        let mut form = valid_form();
        form.submit_status = SubmitStatus::Submitting;
        let gateway = AckGateway::success("ORD-1");

        submit_order(&mut form, &gateway).await;

        assert!(gateway.calls.lock().unwrap().is_empty());
        assert!(form.notifications.is_empty());
        assert_eq!(form.submit_status, SubmitStatus::Submitting);
    }

    #[tokio::test]
    async fn business_rejection_keeps_creating_mode() {
        let mut form = valid_form();
        let gateway = AckGateway::rejection(Some("Order exceeds firm notional limit"));

        submit_order(&mut form, &gateway).await;

        assert_eq!(form.edit_mode, EditMode::Creating);
        assert!(form.current_order_id.is_none());
        let toast = form.notifications.pop_front().unwrap();
        assert_eq!(toast.kind, NotificationKind::Error);
        assert_eq!(toast.message, "Order exceeds firm notional limit");
    }

    #[tokio::test]
    async fn rejection_without_reason_uses_fallback() {
        let mut form = valid_form();
        let gateway = AckGateway::rejection(None);

        submit_order(&mut form, &gateway).await;

        let toast = form.notifications.pop_front().unwrap();
        assert_eq!(toast.message, MSG_REJECTED_FALLBACK);
    }

    #[tokio::test]
    async fn amend_success_routes_to_amend_and_returns_to_viewing() {
        let mut form = valid_form();
        form.current_order_id = Some("ORD-1".to_string());
        form.edit_mode = EditMode::Amending;
        form.set_field_value(
            FieldKey::Amount,
            FieldValue::Amount(Amount::new(dec!(5000000), "GBP")),
        );
        let gateway = AckGateway::success("ORD-1");

        submit_order(&mut form, &gateway).await;

        assert_eq!(*gateway.calls.lock().unwrap(), vec!["amend"]);
        assert_eq!(form.edit_mode, EditMode::Viewing);
        assert!(!form.is_dirty());
        // Amended value survives the commit.
        assert_eq!(
            form.derived_values().amount().map(|a| a.amount),
            Some(dec!(5000000))
        );
        let toast = form.notifications.pop_front().unwrap();
        assert!(toast.message.contains("amended"));
    }

    #[tokio::test]
    async fn amend_rejection_returns_to_viewing_keeping_order() {
        let mut form = valid_form();
        form.current_order_id = Some("ORD-1".to_string());
        form.edit_mode = EditMode::Amending;
        let gateway = AckGateway::rejection(Some("Amendment window closed"));

        submit_order(&mut form, &gateway).await;

        assert_eq!(form.edit_mode, EditMode::Viewing);
        assert_eq!(form.current_order_id.as_deref(), Some("ORD-1"));
    }

    #[tokio::test]
    async fn transport_failure_without_order_stays_editable() {
        let mut form = valid_form();

        submit_order(&mut form, &FailingGateway).await;

        assert_eq!(form.edit_mode, EditMode::Creating);
        assert!(form.current_order_id.is_none());
        assert_eq!(form.submit_status, SubmitStatus::Idle);
        let toast = form.notifications.pop_front().unwrap();
        assert_eq!(toast.message, MSG_SUBMIT_FAILED);
    }

    #[tokio::test]
    async fn transport_failure_with_known_order_falls_back_to_viewing() {
        let mut form = valid_form();
        form.current_order_id = Some("ORD-1".to_string());
        form.edit_mode = EditMode::Amending;

        submit_order(&mut form, &FailingGateway).await;

        assert_eq!(form.edit_mode, EditMode::Viewing);
        let toast = form.notifications.pop_front().unwrap();
        assert_eq!(toast.message, MSG_STATUS_UNCERTAIN);
    }

    #[tokio::test]
    async fn success_clears_server_errors_and_warnings() {
        let mut form = valid_form();
        form.validation
            .warnings
            .insert(FieldKey::Amount, "large amount".to_string());
        let gateway = AckGateway::success("ORD-1");

        submit_order(&mut form, &gateway).await;

        assert!(form.validation.warnings.is_empty());
        assert!(form.validation.server_errors.is_empty());
    }

    #[test]
    fn amend_blocked_by_ref_data_errors() {
        let mut form = valid_form();
        form.edit_mode = EditMode::Viewing;
        form.validation
            .ref_data_errors
            .insert(FieldKey::LiquidityPool, "liquidity pool is not available".to_string());

        begin_amend(&mut form);

        assert_eq!(form.edit_mode, EditMode::Viewing);
        let toast = form.notifications.pop_front().unwrap();
        assert_eq!(toast.message, MSG_AMEND_BLOCKED);
    }

    #[test]
    fn amend_allowed_when_ref_data_consistent() {
        let mut form = valid_form();
        form.edit_mode = EditMode::Viewing;
        form.current_order_id = Some("ORD-1".to_string());

        begin_amend(&mut form);

        assert_eq!(form.edit_mode, EditMode::Amending);
        assert!(form.notifications.is_empty());
    }
}
