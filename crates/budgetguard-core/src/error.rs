//! Shared error type across budgetguard crates.

use thiserror::Error;

/// Stable error codes surfaced in logs and HTTP error bodies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientCode {
    /// Event carried no payload.
    MissingPayload,
    /// Payload could not be decoded.
    MalformedPayload,
    /// Credential acquisition failed.
    Credential,
    /// Billing provider call failed.
    BillingApi,
    /// Invalid input / configuration.
    BadRequest,
    /// Unsupported config version.
    UnsupportedVersion,
    /// Internal error.
    Internal,
}

impl ClientCode {
    /// String representation used in JSON responses.
    pub fn as_str(self) -> &'static str {
        match self {
            ClientCode::MissingPayload => "MISSING_PAYLOAD",
            ClientCode::MalformedPayload => "MALFORMED_PAYLOAD",
            ClientCode::Credential => "CREDENTIAL",
            ClientCode::BillingApi => "BILLING_API",
            ClientCode::BadRequest => "BAD_REQUEST",
            ClientCode::UnsupportedVersion => "UNSUPPORTED_VERSION",
            ClientCode::Internal => "INTERNAL",
        }
    }
}

/// Shared result type.
pub type Result<T> = std::result::Result<T, GuardError>;

/// Unified error type used by core and service.
#[derive(Debug, Error)]
pub enum GuardError {
    #[error("no data property in event")]
    MissingPayload,
    #[error("malformed payload: {0}")]
    MalformedPayload(String),
    #[error("credential unavailable: {0}")]
    Credential(String),
    #[error("billing api error (status {}): {message}", fmt_status(.status))]
    BillingApi {
        status: Option<u16>,
        message: String,
    },
    #[error("bad request: {0}")]
    BadRequest(String),
    #[error("unsupported config version")]
    UnsupportedVersion,
    #[error("internal: {0}")]
    Internal(String),
}

fn fmt_status(status: &Option<u16>) -> String {
    status.map(|s| s.to_string()).unwrap_or_else(|| "none".into())
}

impl GuardError {
    /// Map internal error to a stable code.
    pub fn client_code(&self) -> ClientCode {
        match self {
            GuardError::MissingPayload => ClientCode::MissingPayload,
            GuardError::MalformedPayload(_) => ClientCode::MalformedPayload,
            GuardError::Credential(_) => ClientCode::Credential,
            GuardError::BillingApi { .. } => ClientCode::BillingApi,
            GuardError::BadRequest(_) => ClientCode::BadRequest,
            GuardError::UnsupportedVersion => ClientCode::UnsupportedVersion,
            GuardError::Internal(_) => ClientCode::Internal,
        }
    }
}
