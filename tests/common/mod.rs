//! Shared helpers for integration tests.

use orderpad::form::OrderForm;
use orderpad::models::order::{Account, Amount, OrderSide, OrderType};
use orderpad::models::refdata::RefDataBatch;
use orderpad::refdata::RefDataStore;
use orderpad::store::{FieldKey, FieldValue, OrderPatch};
use rust_decimal_macros::dec;

const REFDATA_JSON: &str = include_str!("../fixtures/refdata.json");

/// A form whose derived order passes the full schema check.
pub fn valid_float_form() -> OrderForm {
    OrderForm::new(
        OrderPatch::new()
            .with(FieldKey::CurrencyPair, FieldValue::text("GBPUSD"))
            .with(FieldKey::Side, FieldValue::Side(OrderSide::Sell))
            .with(FieldKey::OrderType, FieldValue::OrderType(OrderType::Float))
            .with(
                FieldKey::Amount,
                FieldValue::Amount(Amount::new(dec!(2500000), "GBP")),
            )
            .with(
                FieldKey::Account,
                FieldValue::Account(Account::new("Global Macro Fund", 1001)),
            )
            .with(FieldKey::LiquidityPool, FieldValue::text("POOL1")),
    )
}

/// A reference-data store loaded from the shared fixture.
pub fn loaded_refdata() -> RefDataStore {
    let batch: RefDataBatch =
        serde_json::from_str(REFDATA_JSON).expect("Failed to deserialize refdata fixture");
    let mut store = RefDataStore::new();
    store.replace(batch);
    store
}
