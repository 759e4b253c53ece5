//! Metadata-server token source for managed runtimes.

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;

use budgetguard_core::error::{GuardError, Result};

use super::{AccessToken, CredentialProvider};

const TOKEN_PATH: &str = "/computeMetadata/v1/instance/service-accounts/default/token";

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
    #[serde(default = "default_token_type")]
    token_type: String,
    #[serde(default)]
    expires_in: Option<u64>,
}

fn default_token_type() -> String {
    "Bearer".into()
}

pub struct MetadataServerCredentials {
    client: Client,
    base_url: String,
}

impl MetadataServerCredentials {
    pub fn new(client: Client, base_url: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl CredentialProvider for MetadataServerCredentials {
    async fn fetch(&self, scopes: &[&str]) -> Result<AccessToken> {
        let url = format!("{}{}", self.base_url, TOKEN_PATH);
        let res = self
            .client
            .get(&url)
            .header("Metadata-Flavor", "Google")
            .query(&[("scopes", scopes.join(","))])
            .send()
            .await
            .map_err(|e| GuardError::Credential(format!("metadata request failed: {e}")))?;

        let status = res.status();
        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(GuardError::Credential(format!(
                "metadata server returned {status}: {body}"
            )));
        }

        let tok: TokenResponse = res
            .json()
            .await
            .map_err(|e| GuardError::Credential(format!("invalid token response: {e}")))?;
        if tok.access_token.is_empty() {
            return Err(GuardError::Credential("metadata server returned empty token".into()));
        }

        tracing::debug!(expires_in = ?tok.expires_in, "fetched metadata token");
        Ok(AccessToken::new(tok.access_token, tok.token_type))
    }
}
