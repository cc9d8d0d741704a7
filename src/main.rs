use orderpad::config::fetch_config;
use orderpad::form::{IntentDisposition, OrderForm};
use orderpad::gateway::WsGateway;
use orderpad::intent::{IntentBridge, map_intent};
use orderpad::models::order::Expiry;
use orderpad::refdata::{RefDataStore, fetch_reference_data};
use orderpad::store::{FieldKey, FieldValue, OrderPatch};
use orderpad::validation::debounce::Debouncer;
use orderpad::{OrderpadError, tls, validation};
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), OrderpadError> {
    // Initialize tracing subscriber for logging output.
    tracing_subscriber::fmt::init();

    let app_config = fetch_config()?;

    let http = match &app_config.ca_pem_path {
        Some(path) => reqwest::Client::builder()
            .use_preconfigured_tls(tls::build_tls_config_from_file(path)?)
            .build()?,
        None => reqwest::Client::new(),
    };

    let mut refdata = RefDataStore::new();
    let batch = fetch_reference_data(&http, &app_config.refdata_url).await?;
    refdata.replace(batch);

    let gateway = WsGateway::connect(&app_config.gateway_url).await?;

    let mut form = OrderForm::new(
        OrderPatch::new().with(FieldKey::Expiry, FieldValue::Expiry(Expiry::gtc())),
    );
    let mut debouncer = Debouncer::new(app_config.debounce);
    info!("Order ticket ready");

    // The bridge handle is handed to the desktop interop host; here we
    // drain the contexts it forwards. Each applied field waits out the
    // quiet window before its server check fires.
    let (_bridge, mut intents) = IntentBridge::new();
    loop {
        let deadline = debouncer.next_deadline();
        tokio::select! {
            context = intents.recv() => {
                let Some(context) = context else { break };
                let mapped = map_intent(&context);
                let touched: Vec<FieldKey> = mapped.patch.iter().map(|(key, _)| key).collect();
                if form.apply_external_intent(mapped) == IntentDisposition::Applied {
                    validation::validate_ref_data(&mut form, &refdata);
                    for key in touched {
                        debouncer.touch(key);
                    }
                }
            }
            () = async {
                match deadline {
                    Some(at) => tokio::time::sleep_until(at.into()).await,
                    None => std::future::pending().await,
                }
            } => {
                for key in debouncer.due() {
                    if let Some(value) = form.derived_values().get(key).cloned() {
                        validation::validate_field(&mut form, &gateway, key, value).await;
                    }
                }
            }
        }
    }

    Ok(())
}
