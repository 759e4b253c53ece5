//! Cloud Billing REST client (`projects.getBillingInfo` / `projects.updateBillingInfo`).

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde_json::{json, Value};

use budgetguard_core::error::{GuardError, Result};
use budgetguard_core::{BillingInfo, ProjectName};

use super::BillingApi;
use crate::auth::AccessToken;

pub struct CloudBillingClient {
    client: Client,
    endpoint: String,
}

impl CloudBillingClient {
    pub fn new(client: Client, endpoint: impl Into<String>) -> Self {
        Self {
            client,
            endpoint: endpoint.into().trim_end_matches('/').to_string(),
        }
    }

    fn billing_info_url(&self, project: &ProjectName) -> String {
        format!("{}/{}/billingInfo", self.endpoint, project)
    }
}

fn transport_err(e: reqwest::Error) -> GuardError {
    GuardError::BillingApi {
        status: e.status().map(|s| s.as_u16()),
        message: e.to_string(),
    }
}

async fn check_status(res: Response) -> Result<Response> {
    let status = res.status();
    if status.is_success() {
        return Ok(res);
    }
    let body = res.text().await.unwrap_or_default();
    Err(GuardError::BillingApi {
        status: Some(status.as_u16()),
        message: body,
    })
}

#[async_trait]
impl BillingApi for CloudBillingClient {
    async fn get_billing_info(&self, cred: &AccessToken, project: &ProjectName) -> Result<BillingInfo> {
        let res = self
            .client
            .get(self.billing_info_url(project))
            .header(reqwest::header::AUTHORIZATION, cred.header_value())
            .send()
            .await
            .map_err(transport_err)?;

        check_status(res).await?.json().await.map_err(transport_err)
    }

    async fn update_billing_info(
        &self,
        cred: &AccessToken,
        project: &ProjectName,
        billing_account_name: &str,
    ) -> Result<Value> {
        let res = self
            .client
            .put(self.billing_info_url(project))
            .header(reqwest::header::AUTHORIZATION, cred.header_value())
            .json(&json!({ "billingAccountName": billing_account_name }))
            .send()
            .await
            .map_err(transport_err)?;

        check_status(res).await?.json().await.map_err(transport_err)
    }
}
