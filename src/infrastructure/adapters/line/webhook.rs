//! Webhook endpoint receiving LINE events

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{get, post};
use axum::Router;
use serde::Deserialize;
use std::sync::Arc;

use super::signature;
use crate::application::errors::TransportError;
use crate::application::messaging::MessageDispatcher;
use crate::domain::entities::InboundMessage;
use crate::domain::traits::ReplySender;

pub const SIGNATURE_HEADER: &str = "x-line-signature";

/// Webhook request body
#[derive(Debug, Deserialize)]
pub struct WebhookPayload {
    #[serde(default)]
    pub destination: Option<String>,
    pub events: Vec<Event>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    #[serde(rename = "type")]
    pub kind: String,
    pub reply_token: Option<String>,
    pub timestamp: Option<i64>,
    pub source: Option<Source>,
    pub message: Option<EventMessage>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Source {
    #[serde(rename = "type")]
    pub kind: String,
    pub user_id: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EventMessage {
    #[serde(rename = "type")]
    pub kind: String,
    pub id: Option<String>,
    pub text: Option<String>,
}

impl Event {
    /// Text message events with a reply token; everything else is ignored
    pub fn into_inbound(self) -> Option<InboundMessage> {
        if self.kind != "message" {
            return None;
        }
        let message = self.message.filter(|m| m.kind == "text")?;
        let text = message.text?;
        let reply_token = self.reply_token?;

        let mut inbound = InboundMessage::new(reply_token, text).with_platform("line");
        if let Some(user_id) = self.source.and_then(|s| s.user_id) {
            inbound = inbound.with_sender(user_id);
        }
        if let Some(ts) = self.timestamp {
            inbound = inbound.with_timestamp_millis(ts);
        }
        Some(inbound)
    }
}

/// Shared state of the webhook routes
#[derive(Clone)]
pub struct WebhookState {
    pub dispatcher: Arc<MessageDispatcher>,
    pub sender: Arc<dyn ReplySender>,
    pub channel_secret: Arc<str>,
}

pub fn router(state: WebhookState) -> Router {
    Router::new()
        .route("/callback", post(callback))
        .route("/health", get(|| async { "OK" }))
        .with_state(state)
}

/// Verify, parse and handle one webhook delivery.
/// Anything rejected here never reaches the interpreter.
async fn callback(
    State(state): State<WebhookState>,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, &'static str) {
    let payload = match verify_and_parse(&state.channel_secret, &headers, &body) {
        Ok(payload) => payload,
        Err(e) => {
            tracing::warn!("Rejected webhook call: {}", e);
            return (StatusCode::BAD_REQUEST, "Bad Request");
        }
    };

    tracing::debug!(
        "Webhook for {:?} with {} events",
        payload.destination,
        payload.events.len()
    );

    for event in payload.events {
        let Some(message) = event.into_inbound() else {
            continue;
        };
        if let Err(e) = state.dispatcher.process(&message, state.sender.as_ref()).await {
            tracing::error!("Failed to reply to {:?}: {}", message.sender_id, e);
        }
    }

    (StatusCode::OK, "OK")
}

fn verify_and_parse(
    channel_secret: &str,
    headers: &HeaderMap,
    body: &[u8],
) -> Result<WebhookPayload, TransportError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| TransportError::MissingHeader(SIGNATURE_HEADER.to_string()))?;

    signature::verify(channel_secret, body, signature)?;

    serde_json::from_slice(body).map_err(|e| TransportError::Payload(e.to_string()))
}
