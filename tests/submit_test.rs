//! End-to-end submission scenarios over the form container.

mod common;

use std::sync::Mutex;

use orderpad::form::{EditMode, NotificationKind, SubmitStatus};
use orderpad::models::order::Amount;
use orderpad::models::submit_order::{OrderPayload, SubmitAck, SubmitResult};
use orderpad::store::{FieldKey, FieldValue};
use orderpad::submit::{OrderGateway, begin_amend, submit_order};
use rust_decimal_macros::dec;

struct RecordingGateway {
    ack: SubmitAck,
    calls: Mutex<Vec<&'static str>>,
}

impl RecordingGateway {
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
}

impl OrderGateway for RecordingGateway {
    async fn create_order(&self, _payload: &OrderPayload) -> orderpad::Result<SubmitAck> {
        self.calls.lock().unwrap().push("create");
        Ok(self.ack.clone())
    }

    async fn amend_order(&self, _payload: &OrderPayload) -> orderpad::Result<SubmitAck> {
        self.calls.lock().unwrap().push("amend");
        Ok(self.ack.clone())
    }
}

#[tokio::test]
async fn test_create_then_amend_lifecycle() {
    let mut form = common::valid_float_form();
    let gateway = RecordingGateway::success("ORD-1");

    // Create.
    submit_order(&mut form, &gateway).await;
    assert_eq!(form.current_order_id.as_deref(), Some("ORD-1"));
    assert_eq!(form.edit_mode, EditMode::Viewing);
    assert_eq!(form.submit_status, SubmitStatus::Idle);
    let toast = form.notifications.pop_front().unwrap();
    assert_eq!(toast.kind, NotificationKind::Success);
    assert!(toast.message.contains("SELL"));
    assert!(toast.message.contains("GBPUSD"));

    // Amend the amount and resubmit.
    begin_amend(&mut form);
    assert_eq!(form.edit_mode, EditMode::Amending);
    form.set_field_value(
        FieldKey::Amount,
        FieldValue::Amount(Amount::new(dec!(5000000), "GBP")),
    );
    submit_order(&mut form, &gateway).await;

    assert_eq!(*gateway.calls.lock().unwrap(), vec!["create", "amend"]);
    assert_eq!(form.edit_mode, EditMode::Viewing);
    assert_eq!(form.current_order_id.as_deref(), Some("ORD-1"));
    assert_eq!(
        form.derived_values().amount().map(|a| a.amount),
        Some(dec!(5000000))
    );
}

#[tokio::test]
async fn test_submit_blocked_by_schema_error() {
    let mut form = common::valid_float_form();
    form.set_field_value(
        FieldKey::Amount,
        FieldValue::Amount(Amount::new(dec!(-1), "GBP")),
    );
    let gateway = RecordingGateway::success("ORD-1");

    submit_order(&mut form, &gateway).await;

    assert!(gateway.calls.lock().unwrap().is_empty());
    assert!(form.validation.errors.contains_key(&FieldKey::Amount));
    assert_eq!(form.edit_mode, EditMode::Creating);
    assert!(form.current_order_id.is_none());
}

#[tokio::test]
async fn test_duplicate_submit_guard() {
    let mut form = common::valid_float_form();
    form.submit_status = SubmitStatus::Submitting;
    let gateway = RecordingGateway::success("ORD-1");

    submit_order(&mut form, &gateway).await;

    assert!(gateway.calls.lock().unwrap().is_empty());
    assert!(form.notifications.is_empty());
}

#[tokio::test]
async fn test_amend_refused_while_ref_data_inconsistent() {
    let mut form = common::valid_float_form();
    let gateway = RecordingGateway::success("ORD-1");
    submit_order(&mut form, &gateway).await;
    form.notifications.clear();

    // Pool disappears from a later snapshot.
    form.validation
        .ref_data_errors
        .insert(FieldKey::LiquidityPool, "liquidity pool is not available".to_string());

    begin_amend(&mut form);
    assert_eq!(form.edit_mode, EditMode::Viewing);
    let toast = form.notifications.pop_front().unwrap();
    assert_eq!(toast.kind, NotificationKind::Error);

    // Once the data comes back the amend proceeds.
    form.validation.ref_data_errors.clear();
    begin_amend(&mut form);
    assert_eq!(form.edit_mode, EditMode::Amending);
}
