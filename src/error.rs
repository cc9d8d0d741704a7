//! Crate-level error types.
//!
//! [`OrderpadError`] unifies every error source (configuration, gateway
//! transport, JSON, TLS) behind a single enum so callers can match on the
//! variant they care about while still using the `?` operator for easy
//! propagation. Field-level validation outcomes are deliberately *not*
//! errors; they are recorded in the form's validation state instead.

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, OrderpadError>;

/// Top-level error type returned by all public APIs.
#[derive(Debug, thiserror::Error)]
pub enum OrderpadError {
    /// A configuration value was missing, malformed, or inconsistent.
    #[error("configuration error: {0}")]
    Config(String),

    /// A WebSocket operation (connect, send, receive) failed.
    #[error("websocket error: {0}")]
    WebSocket(#[from] tungstenite::Error),

    /// An HTTP request (reference-data fetch) failed.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// JSON serialization or deserialization failed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The gateway returned a response the client could not use.
    #[error("transport error: {0}")]
    Transport(String),

    /// The derived order could not be flattened into a wire payload.
    #[error("order payload error: {0}")]
    Payload(String),

    /// TLS material could not be parsed.
    #[error("tls error: {0}")]
    Tls(String),
}
