//! Budget notification payload (base64 -> UTF-8 -> JSON).
//!
//! Only `costAmount` and `budgetAmount` drive decisions. They are decoded
//! leniently: a missing, `null`, or non-numeric amount becomes `None` rather
//! than an error, and the guard treats that as "cannot evaluate".

use base64::alphabet;
use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::Engine as _;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{GuardError, Result};

// Publishers are not consistent about padding, so accept it either way.
const PAYLOAD_B64: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new()
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

/// Decoded budget alert.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BudgetNotification {
    pub cost_amount: Option<f64>,
    pub budget_amount: Option<f64>,
    pub budget_display_name: Option<String>,
    pub alert_threshold_exceeded: Option<f64>,
    pub forecast_threshold_exceeded: Option<f64>,
    pub cost_interval_start: Option<String>,
    pub budget_amount_type: Option<String>,
    pub currency_code: Option<String>,
}

impl BudgetNotification {
    /// `Some(cost > budget)` when both amounts are known.
    pub fn is_over_budget(&self) -> Option<bool> {
        match (self.cost_amount, self.budget_amount) {
            (Some(cost), Some(budget)) => Some(cost > budget),
            _ => None,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePayload {
    #[serde(default)]
    cost_amount: Option<Value>,
    #[serde(default)]
    budget_amount: Option<Value>,
    #[serde(default)]
    budget_display_name: Option<Value>,
    #[serde(default)]
    alert_threshold_exceeded: Option<Value>,
    #[serde(default)]
    forecast_threshold_exceeded: Option<Value>,
    #[serde(default)]
    cost_interval_start: Option<Value>,
    #[serde(default)]
    budget_amount_type: Option<Value>,
    #[serde(default)]
    currency_code: Option<Value>,
}

fn number(v: Option<Value>) -> Option<f64> {
    v.as_ref().and_then(Value::as_f64)
}

fn text(v: Option<Value>) -> Option<String> {
    match v {
        Some(Value::String(s)) => Some(s),
        _ => None,
    }
}

/// Decode the opaque `data` field of a pub/sub message.
pub fn decode_notification(data: Option<&str>) -> Result<BudgetNotification> {
    let data = match data {
        Some(d) if !d.trim().is_empty() => d.trim(),
        _ => return Err(GuardError::MissingPayload),
    };

    // Line-wrapped payloads are valid once whitespace is dropped.
    let compact: String = data.chars().filter(|c| !c.is_ascii_whitespace()).collect();
    let raw = PAYLOAD_B64
        .decode(compact)
        .map_err(|e| GuardError::MalformedPayload(format!("invalid base64: {e}")))?;
    let json = std::str::from_utf8(&raw)
        .map_err(|e| GuardError::MalformedPayload(format!("invalid utf-8: {e}")))?;

    // Parse through `Value` first: duplicate keys keep the last value, and
    // only an object is accepted (a struct would also take a JSON array).
    let value: Value = serde_json::from_str(json)
        .map_err(|e| GuardError::MalformedPayload(format!("invalid json: {e}")))?;
    if !value.is_object() {
        return Err(GuardError::MalformedPayload("payload is not a json object".into()));
    }
    let wire: WirePayload = serde_json::from_value(value)
        .map_err(|e| GuardError::MalformedPayload(format!("invalid json: {e}")))?;

    tracing::debug!(bytes = raw.len(), "decoded budget notification");

    Ok(BudgetNotification {
        cost_amount: number(wire.cost_amount),
        budget_amount: number(wire.budget_amount),
        budget_display_name: text(wire.budget_display_name),
        alert_threshold_exceeded: number(wire.alert_threshold_exceeded),
        forecast_threshold_exceeded: number(wire.forecast_threshold_exceeded),
        cost_interval_start: text(wire.cost_interval_start),
        budget_amount_type: text(wire.budget_amount_type),
        currency_code: text(wire.currency_code),
    })
}
