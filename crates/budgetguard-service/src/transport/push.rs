//! Pub/sub push endpoint.
//!
//! The delivery system POSTs one envelope per message. A 2xx response
//! acknowledges it; anything else is a failed delivery.

use std::collections::HashMap;

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Deserialize;

use budgetguard_core::error::GuardError;

use crate::app_state::AppState;
use crate::error::HttpError;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushEnvelope {
    /// Absent message is handled like a message without data.
    #[serde(default)]
    pub message: PushMessage,
    #[serde(default)]
    pub subscription: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PushMessage {
    /// Base64 payload. Absent for attribute-only messages.
    #[serde(default)]
    pub data: Option<String>,
    #[serde(default)]
    pub attributes: HashMap<String, String>,
    #[serde(default)]
    pub message_id: Option<String>,
    #[serde(default)]
    pub publish_time: Option<String>,
}

pub fn decode_envelope(body: &[u8]) -> Result<PushEnvelope, GuardError> {
    serde_json::from_slice(body)
        .map_err(|e| GuardError::BadRequest(format!("invalid push envelope: {e}")))
}

pub async fn pubsub_push(State(app): State<AppState>, body: Bytes) -> Response {
    let env = match decode_envelope(&body) {
        Ok(env) => env,
        Err(e) => {
            tracing::warn!(error = %e, "rejecting push request");
            return HttpError(e).into_response();
        }
    };

    tracing::info!(
        message_id = env.message.message_id.as_deref().unwrap_or(""),
        subscription = env.subscription.as_deref().unwrap_or(""),
        publish_time = env.message.publish_time.as_deref().unwrap_or(""),
        attributes = env.message.attributes.len(),
        "pubsub push received"
    );

    match app.guard().handle_notification(env.message.data.as_deref()).await {
        Ok(outcome) => (StatusCode::OK, outcome.message()).into_response(),
        Err(e) => HttpError(e).into_response(),
    }
}

pub async fn healthz() -> &'static str {
    "ok"
}
