//! Shared application state for the budgetguard service.
//!
//! Built once at startup from config. The credential provider and billing
//! client are constructed here and handed to the guard explicitly.

use std::sync::Arc;

use reqwest::Client;

use budgetguard_core::error::{GuardError, Result};

use crate::auth::{CredentialProvider, MetadataServerCredentials, StaticTokenCredentials};
use crate::billing::{BillingApi, CloudBillingClient};
use crate::config::{AuthProvider, GuardConfig};
use crate::guard::BillingGuard;

#[derive(Clone)]
pub struct AppState {
    guard: Arc<BillingGuard>,
}

impl AppState {
    /// Build application state from validated config.
    /// Returns Result so main can handle errors gracefully (no panic).
    pub fn new(cfg: &GuardConfig) -> Result<Self> {
        let http = Client::builder()
            .build()
            .map_err(|e| GuardError::Internal(format!("http client init failed: {e}")))?;

        let credentials: Arc<dyn CredentialProvider> = match cfg.auth.provider {
            AuthProvider::Metadata => Arc::new(MetadataServerCredentials::new(
                http.clone(),
                cfg.auth.metadata_url.clone(),
            )),
            AuthProvider::Static => {
                let var = cfg.auth.token_env.clone().ok_or_else(|| {
                    GuardError::BadRequest("auth.token_env is required for static auth".into())
                })?;
                Arc::new(StaticTokenCredentials::new(var))
            }
        };

        let billing: Arc<dyn BillingApi> =
            Arc::new(CloudBillingClient::new(http, cfg.billing.endpoint.clone()));

        let project = cfg.guard.project();
        if project.is_none() {
            tracing::warn!("guard.project_id not set; alerts over budget will not disable anything");
        }

        Ok(Self::with_guard(BillingGuard::new(project, credentials, billing)))
    }

    /// State around an already-built guard (tests, embedding).
    pub fn with_guard(guard: BillingGuard) -> Self {
        Self { guard: Arc::new(guard) }
    }

    pub fn guard(&self) -> Arc<BillingGuard> {
        Arc::clone(&self.guard)
    }
}
