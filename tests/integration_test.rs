//! Live gateway integration tests.
//!
//! These tests connect to a real order gateway and require network access.
//! Point `ORDERPAD_GATEWAY_URL` and `ORDERPAD_REFDATA_URL` at a test
//! environment, then run with: `cargo test --features integration-tests`

#![cfg(feature = "integration-tests")]

use orderpad::config::fetch_config;
use orderpad::gateway::WsGateway;
use orderpad::refdata::fetch_reference_data;

#[tokio::test]
async fn test_connect_to_gateway() {
    let config = fetch_config().expect("Failed to load config");
    let result = WsGateway::connect(&config.gateway_url).await;
    assert!(result.is_ok(), "Failed to connect to order gateway");
}

#[tokio::test]
async fn test_fetch_reference_data_snapshot() {
    let config = fetch_config().expect("Failed to load config");
    let client = reqwest::Client::new();

    let batch = fetch_reference_data(&client, &config.refdata_url)
        .await
        .expect("Failed to fetch reference data");

    assert!(!batch.accounts.is_empty(), "Snapshot carried no accounts");
    assert!(
        !batch.currency_pairs.is_empty(),
        "Snapshot carried no currency pairs"
    );
}
