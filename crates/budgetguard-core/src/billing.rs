//! Billing provider value types.
//!
//! `BillingInfo` mirrors the provider's `ProjectBillingInfo` resource. Only
//! `billingEnabled` drives decisions; the rest is carried for logging.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{GuardError, Result};

/// Fully qualified project resource name (`projects/{id}`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectName {
    id: String,
}

impl ProjectName {
    pub fn new(project_id: &str) -> Result<Self> {
        let id = project_id.trim();
        if id.is_empty() {
            return Err(GuardError::BadRequest("project id must not be empty".into()));
        }
        if id.contains('/') {
            return Err(GuardError::BadRequest(format!(
                "project id must not contain '/': {id}"
            )));
        }
        Ok(Self { id: id.to_string() })
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for ProjectName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "projects/{}", self.id)
    }
}

/// Billing state of one project as reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillingInfo {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub project_id: Option<String>,
    #[serde(default)]
    pub billing_account_name: Option<String>,
    /// The provider omits this field when billing is off.
    #[serde(default)]
    pub billing_enabled: bool,
}
