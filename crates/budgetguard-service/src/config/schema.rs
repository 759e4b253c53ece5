use std::net::SocketAddr;

use serde::Deserialize;
use budgetguard_core::error::{GuardError, Result};
use budgetguard_core::ProjectName;

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GuardConfig {
    pub version: u32,

    #[serde(default)]
    pub server: ServerSection,

    #[serde(default)]
    pub guard: GuardSection,

    #[serde(default)]
    pub billing: BillingSection,

    #[serde(default)]
    pub auth: AuthSection,
}

impl GuardConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(GuardError::UnsupportedVersion);
        }

        self.server.validate()?;
        self.guard.validate()?;
        self.billing.validate()?;
        self.auth.validate()?;

        Ok(())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ServerSection {
    #[serde(default = "default_listen")]
    pub listen: String,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self { listen: default_listen() }
    }
}

impl ServerSection {
    pub fn validate(&self) -> Result<()> {
        self.listen_addr().map(|_| ())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr> {
        self.listen.parse().map_err(|e| {
            GuardError::BadRequest(format!("server.listen must be a valid SocketAddr: {e}"))
        })
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".into()
}

#[derive(Debug, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct GuardSection {
    /// Project whose billing gets detached. Absent or blank leaves the
    /// guard without a target.
    #[serde(default)]
    pub project_id: Option<String>,
}

impl GuardSection {
    pub fn validate(&self) -> Result<()> {
        if let Some(id) = self.project_id.as_deref() {
            if !id.trim().is_empty() {
                ProjectName::new(id)?;
            }
        }
        Ok(())
    }

    pub fn project(&self) -> Option<ProjectName> {
        self.project_id.as_deref().and_then(|id| ProjectName::new(id).ok())
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BillingSection {
    #[serde(default = "default_billing_endpoint")]
    pub endpoint: String,
}

impl Default for BillingSection {
    fn default() -> Self {
        Self { endpoint: default_billing_endpoint() }
    }
}

impl BillingSection {
    pub fn validate(&self) -> Result<()> {
        validate_http_url("billing.endpoint", &self.endpoint)
    }
}

fn default_billing_endpoint() -> String {
    "https://cloudbilling.googleapis.com/v1".into()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum AuthProvider {
    /// Platform metadata server (default on managed runtimes).
    #[default]
    Metadata,
    /// Bearer token read from an environment variable.
    Static,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AuthSection {
    #[serde(default)]
    pub provider: AuthProvider,

    #[serde(default = "default_metadata_url")]
    pub metadata_url: String,

    #[serde(default)]
    pub token_env: Option<String>,
}

impl Default for AuthSection {
    fn default() -> Self {
        Self {
            provider: AuthProvider::default(),
            metadata_url: default_metadata_url(),
            token_env: None,
        }
    }
}

impl AuthSection {
    pub fn validate(&self) -> Result<()> {
        match self.provider {
            AuthProvider::Metadata => validate_http_url("auth.metadata_url", &self.metadata_url),
            AuthProvider::Static => match self.token_env.as_deref() {
                Some(name) if !name.trim().is_empty() => Ok(()),
                _ => Err(GuardError::BadRequest(
                    "auth.token_env is required when auth.provider is static".into(),
                )),
            },
        }
    }
}

fn default_metadata_url() -> String {
    "http://metadata.google.internal".into()
}

fn validate_http_url(field: &str, url: &str) -> Result<()> {
    if url.starts_with("http://") || url.starts_with("https://") {
        Ok(())
    } else {
        Err(GuardError::BadRequest(format!("{field} must be an http(s) url")))
    }
}
