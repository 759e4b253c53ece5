//! Terminal outcomes of one guard invocation.

use std::fmt;

use serde_json::Value;

/// A locally handled terminal state. Failures that must reach the host are
/// `GuardError`s instead.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    NoData,
    MalformedPayload { reason: String },
    BudgetUnavailable,
    NoActionNecessary { cost: f64 },
    NoProjectConfigured,
    BillingDisabled { response: Value },
    AlreadyDisabled,
}

impl Outcome {
    /// Stable code for structured logs.
    pub fn code(&self) -> &'static str {
        match self {
            Outcome::NoData => "no_data",
            Outcome::MalformedPayload { .. } => "malformed_payload",
            Outcome::BudgetUnavailable => "budget_unavailable",
            Outcome::NoActionNecessary { .. } => "no_action_necessary",
            Outcome::NoProjectConfigured => "no_project_configured",
            Outcome::BillingDisabled { .. } => "billing_disabled",
            Outcome::AlreadyDisabled => "already_disabled",
        }
    }

    /// Human-readable message returned to the caller.
    pub fn message(&self) -> String {
        match self {
            Outcome::NoData => "No data provided in event.".into(),
            Outcome::MalformedPayload { reason } => {
                format!("Malformed budget notification: {reason}")
            }
            Outcome::BudgetUnavailable => "Budget data unavailable; no action taken.".into(),
            Outcome::NoActionNecessary { cost } => {
                format!("No action necessary. (Current cost: {})", json_number(*cost))
            }
            Outcome::NoProjectConfigured => "No project specified".into(),
            Outcome::BillingDisabled { response } => format!("Billing disabled: {response}"),
            Outcome::AlreadyDisabled => "Billing already disabled".into(),
        }
    }

    /// True when the invocation detached the billing account.
    pub fn disabled_billing(&self) -> bool {
        matches!(self, Outcome::BillingDisabled { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message())
    }
}

// Integral values print without a fractional part, like a JSON number.
fn json_number(v: f64) -> String {
    if v.is_finite() && v.fract() == 0.0 && v.abs() < 1e15 {
        format!("{}", v as i64)
    } else {
        format!("{v}")
    }
}
