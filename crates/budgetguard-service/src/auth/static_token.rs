//! Token from an environment variable (local development).

use async_trait::async_trait;

use budgetguard_core::error::{GuardError, Result};

use super::{AccessToken, CredentialProvider};

pub struct StaticTokenCredentials {
    env_var: String,
}

impl StaticTokenCredentials {
    pub fn new(env_var: impl Into<String>) -> Self {
        Self { env_var: env_var.into() }
    }
}

#[async_trait]
impl CredentialProvider for StaticTokenCredentials {
    // Read at fetch time so a rotated token is picked up by the next invocation.
    async fn fetch(&self, _scopes: &[&str]) -> Result<AccessToken> {
        match std::env::var(&self.env_var) {
            Ok(t) if !t.trim().is_empty() => Ok(AccessToken::bearer(t.trim())),
            Ok(_) => Err(GuardError::Credential(format!("{} is empty", self.env_var))),
            Err(e) => Err(GuardError::Credential(format!("{}: {e}", self.env_var))),
        }
    }
}
