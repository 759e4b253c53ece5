//! Credential acquisition.
//!
//! A credential is fetched once per invocation and handed explicitly to each
//! billing call. Nothing here installs process-wide auth state.

pub mod metadata;
pub mod static_token;

use std::fmt;

use async_trait::async_trait;

use budgetguard_core::error::Result;

pub use metadata::MetadataServerCredentials;
pub use static_token::StaticTokenCredentials;

/// Scopes requested for billing read/write.
pub const BILLING_SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/cloud-billing",
    "https://www.googleapis.com/auth/cloud-platform",
];

/// Bearer credential for outbound API calls.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken {
    token: String,
    token_type: String,
}

impl AccessToken {
    pub fn bearer(token: impl Into<String>) -> Self {
        Self { token: token.into(), token_type: "Bearer".into() }
    }

    pub fn new(token: impl Into<String>, token_type: impl Into<String>) -> Self {
        Self { token: token.into(), token_type: token_type.into() }
    }

    pub fn secret(&self) -> &str {
        &self.token
    }

    /// Value for the `Authorization` header.
    pub fn header_value(&self) -> String {
        format!("{} {}", self.token_type, self.token)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AccessToken")
            .field("token_type", &self.token_type)
            .field("token", &"<redacted>")
            .finish()
    }
}

/// Source of credentials. Failures surface as `GuardError::Credential`.
#[async_trait]
pub trait CredentialProvider: Send + Sync {
    async fn fetch(&self, scopes: &[&str]) -> Result<AccessToken>;
}
