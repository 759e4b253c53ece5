//! Billing provider API seam.

pub mod client;

use async_trait::async_trait;
use serde_json::Value;

use budgetguard_core::error::Result;
use budgetguard_core::{BillingInfo, ProjectName};

use crate::auth::AccessToken;

pub use client::CloudBillingClient;

/// The two billing operations the guard consumes.
#[async_trait]
pub trait BillingApi: Send + Sync {
    async fn get_billing_info(&self, cred: &AccessToken, project: &ProjectName) -> Result<BillingInfo>;

    /// An empty `billing_account_name` detaches the project's billing account.
    async fn update_billing_info(
        &self,
        cred: &AccessToken,
        project: &ProjectName,
        billing_account_name: &str,
    ) -> Result<Value>;
}
