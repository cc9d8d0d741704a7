//! Async WebSocket gateway for order entry RPCs.
//!
//! Create, amend, and field-check operations are request/response over a
//! single WebSocket connection. Each request carries a `req_id` and the
//! reader skips unrelated traffic (heartbeats, status pushes) until the
//! matching response arrives.

use std::sync::atomic::{AtomicU64, Ordering};

use futures_util::stream::{SplitSink, SplitStream};
use futures_util::{SinkExt, StreamExt};
use tokio::net::TcpStream;
use tokio::sync::Mutex;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};
use tungstenite::Message;

use crate::Result;
use crate::error::OrderpadError;
use crate::models::field_check::{FieldCheckRequest, FieldCheckResponse, FieldCheckRpcRequest};
use crate::models::submit_order::{
    AmendOrderRequest, CreateOrderRequest, OrderPayload, SubmitAck, SubmitResponse, SubmitResult,
};
use crate::submit::OrderGateway;
use crate::validation::FieldCheckGateway;

/// Write half of a gateway WebSocket connection.
pub type WsWriter = SplitSink<WebSocketStream<MaybeTlsStream<TcpStream>>, Message>;

/// Read half of a gateway WebSocket connection.
pub type WsReader = SplitStream<WebSocketStream<MaybeTlsStream<TcpStream>>>;

/// Establishes a WebSocket connection to the given URL.
///
/// # Errors
///
/// Returns an [`OrderpadError`](crate::OrderpadError) if the connection
/// or TLS handshake fails.
pub async fn connect(url: &str) -> Result<(WsWriter, WsReader)> {
    let (ws_stream, _) = connect_async(url).await?;
    info!("WebSocket handshake completed");

    Ok(ws_stream.split())
}

struct WsSession {
    writer: WsWriter,
    reader: WsReader,
}

/// RPC client over one gateway connection.
///
/// One RPC is outstanding at a time: the session lock is held for the
/// entire send/receive round trip, so concurrent callers queue on it
/// rather than consume each other's responses. Server pushes without a
/// `req_id` (heartbeats, status) are skipped while waiting.
pub struct WsGateway {
    session: Mutex<WsSession>,
    next_req_id: AtomicU64,
}

impl WsGateway {
    /// Connects to the gateway at `url`.
    ///
    /// # Errors
    ///
    /// Returns an [`OrderpadError`](crate::OrderpadError) if the
    /// connection or TLS handshake fails.
    pub async fn connect(url: &str) -> Result<Self> {
        let (writer, reader) = connect(url).await?;
        Ok(Self {
            session: Mutex::new(WsSession { writer, reader }),
            next_req_id: AtomicU64::new(1),
        })
    }

    fn allocate_req_id(&self) -> u64 {
        self.next_req_id.fetch_add(1, Ordering::Relaxed)
    }

    /// Sends one serialized request and reads frames until the response
    /// with the matching `req_id` arrives. The session stays locked for
    /// the whole round trip; a response carrying a different `req_id`
    /// therefore cannot belong to another caller and is dropped with a
    /// warning.
    async fn call(&self, json: String, req_id: u64) -> Result<serde_json::Value> {
        let mut session = self.session.lock().await;
        session.writer.send(Message::Text(json.into())).await?;

        while let Some(msg) = session.reader.next().await {
            let msg = msg?;
            let Message::Text(text) = msg else {
                continue;
            };
            let value: serde_json::Value = serde_json::from_str(&text)
                .map_err(|e| OrderpadError::Payload(e.to_string()))?;

            match value.get("req_id").and_then(serde_json::Value::as_u64) {
                Some(id) if id == req_id => return Ok(value),
                Some(id) => {
                    warn!(req_id = id, expected = req_id, "Dropping response with unexpected req_id");
                }
                None => {
                    debug!(
                        channel = value.get("channel").and_then(|c| c.as_str()),
                        "Skipping non-RPC message"
                    );
                }
            }
        }

        Err(OrderpadError::Transport(
            "connection closed before response".to_string(),
        ))
    }

    fn ack_from_response(response: SubmitResponse) -> Result<SubmitAck> {
        if let Some(ack) = response.result {
            return Ok(ack);
        }
        if let Some(error) = response.error {
            // Protocol-level rejection; surface it like a business one.
            warn!(method = response.method, error = %error, "Request rejected by gateway");
            return Ok(SubmitAck {
                order_id: None,
                result: SubmitResult::Rejected,
                failure_reason: Some(error),
            });
        }
        Err(OrderpadError::Payload(
            "response carried neither result nor error".to_string(),
        ))
    }
}

impl OrderGateway for WsGateway {
    async fn create_order(&self, payload: &OrderPayload) -> Result<SubmitAck> {
        let req_id = self.allocate_req_id();
        let request = CreateOrderRequest::new(payload.clone(), Some(req_id));
        let json = serde_json::to_string(&request)?;
        info!(
            method = "create_order",
            req_id = ?request.req_id(),
            "Sent create_order request"
        );
        let value = self.call(json, req_id).await?;
        Self::ack_from_response(serde_json::from_value(value)?)
    }

    async fn amend_order(&self, payload: &OrderPayload) -> Result<SubmitAck> {
        let req_id = self.allocate_req_id();
        let request = AmendOrderRequest::new(payload.clone(), Some(req_id));
        let json = serde_json::to_string(&request)?;
        info!(
            method = "amend_order",
            req_id = ?request.req_id(),
            "Sent amend_order request"
        );
        let value = self.call(json, req_id).await?;
        Self::ack_from_response(serde_json::from_value(value)?)
    }
}

impl FieldCheckGateway for WsGateway {
    async fn check_field(&self, request: &FieldCheckRequest) -> Result<FieldCheckResponse> {
        let req_id = self.allocate_req_id();
        let rpc = FieldCheckRpcRequest::new(request.clone(), Some(req_id));
        let json = serde_json::to_string(&rpc)?;
        debug!(
            method = "check_field",
            field = request.field,
            req_id = ?rpc.req_id(),
            "Sent check_field request"
        );
        let value = self.call(json, req_id).await?;
        let response: crate::models::field_check::FieldCheckRpcResponse =
            serde_json::from_value(value)?;

        response.result.ok_or_else(|| {
            OrderpadError::Transport(
                response
                    .error
                    .unwrap_or_else(|| "check_field response missing result".to_string()),
            )
        })
    }
}
