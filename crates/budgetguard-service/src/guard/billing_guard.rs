//! Decide whether a budget alert requires detaching the project's billing
//! account, and do it.
//!
//! Order of checks:
//! 1. payload present and decodable (else terminal outcome, no calls)
//! 2. cost strictly above budget (else terminal outcome, no calls)
//! 3. target project configured
//! 4. credential (failure propagates)
//! 5. read billing state (failure assumes enabled)
//! 6. detach if enabled (failure propagates)

use std::sync::Arc;

use tracing::Instrument;

use budgetguard_core::error::{GuardError, Result};
use budgetguard_core::{decode_notification, BudgetNotification, Outcome, ProjectName};

use crate::auth::{CredentialProvider, BILLING_SCOPES};
use crate::billing::BillingApi;

/// Detaches billing when spend exceeds budget. Holds no per-invocation state;
/// concurrent invocations share nothing mutable.
#[derive(Clone)]
pub struct BillingGuard {
    project: Option<ProjectName>,
    credentials: Arc<dyn CredentialProvider>,
    billing: Arc<dyn BillingApi>,
}

impl BillingGuard {
    pub fn new(
        project: Option<ProjectName>,
        credentials: Arc<dyn CredentialProvider>,
        billing: Arc<dyn BillingApi>,
    ) -> Self {
        Self { project, credentials, billing }
    }

    /// Handle one notification. `data` is the base64 `data` field of the
    /// pub/sub message, if any.
    ///
    /// Returns `Err` only for credential and disable failures.
    pub async fn handle_notification(&self, data: Option<&str>) -> Result<Outcome> {
        let project = self.project.as_ref().map(|p| p.id()).unwrap_or("-");
        let span = tracing::info_span!("budget_alert", project = %project);
        let res = self.run(data).instrument(span.clone()).await;
        span.in_scope(|| match &res {
            Ok(o) => tracing::info!(outcome = o.code(), "budget alert handled"),
            Err(e) => tracing::error!(code = e.client_code().as_str(), error = %e, "budget alert failed"),
        });
        res
    }

    async fn run(&self, data: Option<&str>) -> Result<Outcome> {
        let n = match decode_notification(data) {
            Ok(n) => n,
            Err(GuardError::MissingPayload) => {
                tracing::error!("no data property in pubsub event");
                return Ok(Outcome::NoData);
            }
            Err(GuardError::MalformedPayload(reason)) => {
                tracing::error!(%reason, "undecodable budget notification");
                return Ok(Outcome::MalformedPayload { reason });
            }
            Err(e) => return Err(e),
        };
        log_notification(&n);

        match (n.is_over_budget(), n.cost_amount) {
            (Some(true), _) => {}
            (Some(false), Some(cost)) => {
                tracing::info!("no action necessary");
                return Ok(Outcome::NoActionNecessary { cost });
            }
            _ => {
                tracing::warn!("cost or budget amount missing; not evaluating");
                return Ok(Outcome::BudgetUnavailable);
            }
        }

        let Some(project) = self.project.as_ref() else {
            tracing::warn!("no project specified");
            return Ok(Outcome::NoProjectConfigured);
        };

        let cred = self.credentials.fetch(&BILLING_SCOPES).await?;

        let enabled = match self.billing.get_billing_info(&cred, project).await {
            Ok(info) => {
                tracing::info!(
                    billing_enabled = info.billing_enabled,
                    account = info.billing_account_name.as_deref().unwrap_or(""),
                    "fetched billing info"
                );
                info.billing_enabled
            }
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    "unable to determine if billing is enabled on specified project, assuming billing is enabled"
                );
                true
            }
        };

        if !enabled {
            tracing::info!("billing already disabled");
            return Ok(Outcome::AlreadyDisabled);
        }

        tracing::info!("disabling billing");
        let response = self.billing.update_billing_info(&cred, project, "").await?;
        tracing::info!(%response, "billing disabled");
        Ok(Outcome::BillingDisabled { response })
    }
}

fn log_notification(n: &BudgetNotification) {
    tracing::info!(
        cost = ?n.cost_amount,
        budget = ?n.budget_amount,
        currency = n.currency_code.as_deref().unwrap_or(""),
        budget_name = n.budget_display_name.as_deref().unwrap_or(""),
        threshold = ?n.alert_threshold_exceeded,
        "budget notification"
    );
}
