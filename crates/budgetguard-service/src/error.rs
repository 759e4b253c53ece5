//! HTTP mapping for propagated guard failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use budgetguard_core::error::{ClientCode, GuardError};

/// A failure the push endpoint reports to the delivery system. A non-2xx
/// status leaves redelivery to the subscription's own policy.
#[derive(Debug, Error)]
#[error(transparent)]
pub struct HttpError(#[from] pub GuardError);

impl HttpError {
    pub fn status(&self) -> StatusCode {
        match self.0.client_code() {
            // The guard answers payload errors with an outcome; these arms
            // cover callers of `decode_notification` outside the guard.
            ClientCode::MissingPayload | ClientCode::MalformedPayload | ClientCode::BadRequest => {
                StatusCode::BAD_REQUEST
            }
            ClientCode::Credential => StatusCode::SERVICE_UNAVAILABLE,
            ClientCode::BillingApi => StatusCode::BAD_GATEWAY,
            ClientCode::UnsupportedVersion | ClientCode::Internal => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let status = self.status();
        let body = Json(json!({
            "error": self.0.client_code().as_str(),
            "message": self.0.to_string(),
        }));
        (status, body).into_response()
    }
}
