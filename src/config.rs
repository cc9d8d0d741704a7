//! Application configuration loaded from environment variables.
//!
//! - `ORDERPAD_GATEWAY_URL` — order gateway WebSocket endpoint
//! - `ORDERPAD_REFDATA_URL` — reference data HTTP endpoint
//! - `ORDERPAD_DEBOUNCE_MS` — field validation quiet window in milliseconds
//! - `ORDERPAD_CA_PEM` — optional path to a pinned CA certificate PEM

use std::time::Duration;

/// Default gateway WebSocket endpoint.
const DEFAULT_GATEWAY_URL: &str = "wss://gateway.orderpad.internal/v1";

/// Default reference data endpoint.
const DEFAULT_REFDATA_URL: &str = "https://refdata.orderpad.internal/v1/snapshot";

/// Default field validation quiet window.
const DEFAULT_DEBOUNCE_MS: u64 = 300;

/// Top-level application configuration.
#[derive(Debug)]
pub struct AppConfig {
    pub gateway_url: String,
    pub refdata_url: String,
    pub debounce: Duration,
    pub ca_pem_path: Option<String>,
}

/// Loads the application configuration from environment variables.
///
/// Every value has a default; only a malformed debounce window is an
/// error.
///
/// # Errors
///
/// Returns [`OrderpadError::Config`](crate::OrderpadError::Config) if
/// `ORDERPAD_DEBOUNCE_MS` is set but not a number.
pub fn fetch_config() -> crate::Result<AppConfig> {
    let gateway_url =
        non_empty_var("ORDERPAD_GATEWAY_URL").unwrap_or_else(|| DEFAULT_GATEWAY_URL.to_string());
    let refdata_url =
        non_empty_var("ORDERPAD_REFDATA_URL").unwrap_or_else(|| DEFAULT_REFDATA_URL.to_string());

    let debounce_ms = match non_empty_var("ORDERPAD_DEBOUNCE_MS") {
        Some(raw) => raw.parse::<u64>().map_err(|_| {
            crate::OrderpadError::Config(format!(
                "ORDERPAD_DEBOUNCE_MS must be a number of milliseconds, got {raw:?}"
            ))
        })?,
        None => DEFAULT_DEBOUNCE_MS,
    };

    Ok(AppConfig {
        gateway_url,
        refdata_url,
        debounce: Duration::from_millis(debounce_ms),
        ca_pem_path: non_empty_var("ORDERPAD_CA_PEM"),
    })
}

/// Returns the value of an environment variable if it exists and is non-empty.
fn non_empty_var(name: &str) -> Option<String> {
    std::env::var(name).ok().filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Helper that temporarily sets env vars, runs `f`, then restores originals.
    ///
    /// # Safety
    ///
    /// Tests using this helper must run with `--test-threads=1` or otherwise
    /// ensure no other threads read these env vars concurrently.
    fn with_env<F: FnOnce()>(vars: &[(&str, Option<&str>)], f: F) {
        let originals: Vec<(&str, Option<String>)> = vars
            .iter()
            .map(|(k, _)| (*k, std::env::var(k).ok()))
            .collect();

        for (k, v) in vars {
            // SAFETY: config tests run single-threaded (see test runner config).
            unsafe {
                match v {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }

        f();

        for (k, original) in originals {
            // SAFETY: restoring original values, same single-threaded context.
            unsafe {
                match original {
                    Some(val) => std::env::set_var(k, val),
                    None => std::env::remove_var(k),
                }
            }
        }
    }

    #[test]
    fn defaults_without_env_vars() {
        with_env(
            &[
                ("ORDERPAD_GATEWAY_URL", None),
                ("ORDERPAD_REFDATA_URL", None),
                ("ORDERPAD_DEBOUNCE_MS", None),
                ("ORDERPAD_CA_PEM", None),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.gateway_url, DEFAULT_GATEWAY_URL);
                assert_eq!(config.refdata_url, DEFAULT_REFDATA_URL);
                assert_eq!(config.debounce, Duration::from_millis(DEFAULT_DEBOUNCE_MS));
                assert!(config.ca_pem_path.is_none());
            },
        );
    }

    #[test]
    fn custom_endpoints() {
        with_env(
            &[
                ("ORDERPAD_GATEWAY_URL", Some("wss://gw.example.com")),
                ("ORDERPAD_REFDATA_URL", Some("https://rd.example.com")),
                ("ORDERPAD_DEBOUNCE_MS", None),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.gateway_url, "wss://gw.example.com");
                assert_eq!(config.refdata_url, "https://rd.example.com");
            },
        );
    }

    #[test]
    fn custom_debounce_window() {
        with_env(&[("ORDERPAD_DEBOUNCE_MS", Some("150"))], || {
            let config = fetch_config().unwrap();
            assert_eq!(config.debounce, Duration::from_millis(150));
        });
    }

    #[test]
    fn rejects_malformed_debounce() {
        with_env(&[("ORDERPAD_DEBOUNCE_MS", Some("soon"))], || {
            let err = fetch_config().unwrap_err();
            assert!(err.to_string().contains("ORDERPAD_DEBOUNCE_MS"));
        });
    }

    #[test]
    fn empty_values_treated_as_absent() {
        with_env(
            &[
                ("ORDERPAD_GATEWAY_URL", Some("")),
                ("ORDERPAD_REFDATA_URL", Some("")),
                ("ORDERPAD_DEBOUNCE_MS", Some("")),
            ],
            || {
                let config = fetch_config().unwrap();
                assert_eq!(config.gateway_url, DEFAULT_GATEWAY_URL);
                assert_eq!(config.debounce, Duration::from_millis(DEFAULT_DEBOUNCE_MS));
            },
        );
    }
}
