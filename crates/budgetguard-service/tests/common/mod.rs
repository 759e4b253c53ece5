//! In-memory collaborators shared by guard and endpoint tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]
#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};

use budgetguard_core::error::{GuardError, Result};
use budgetguard_core::{BillingInfo, ProjectName};
use budgetguard_service::auth::{AccessToken, CredentialProvider};
use budgetguard_service::billing::BillingApi;
use budgetguard_service::guard::BillingGuard;

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    Credential,
    Get(String),
    Update(String, String),
}

pub type CallLog = Arc<Mutex<Vec<Call>>>;

pub struct FakeCredentials {
    pub log: CallLog,
    pub fail: bool,
}

#[async_trait]
impl CredentialProvider for FakeCredentials {
    async fn fetch(&self, scopes: &[&str]) -> Result<AccessToken> {
        assert_eq!(scopes.len(), 2, "billing + platform scopes");
        self.log.lock().unwrap().push(Call::Credential);
        if self.fail {
            return Err(GuardError::Credential("no metadata server".into()));
        }
        Ok(AccessToken::bearer("test-token"))
    }
}

/// Billing provider with one project. Detaching flips `enabled`.
pub struct FakeBilling {
    pub log: CallLog,
    pub enabled: Mutex<bool>,
    pub fail_get: bool,
    pub fail_update: bool,
}

#[async_trait]
impl BillingApi for FakeBilling {
    async fn get_billing_info(&self, cred: &AccessToken, project: &ProjectName) -> Result<BillingInfo> {
        assert_eq!(cred.secret(), "test-token");
        self.log.lock().unwrap().push(Call::Get(project.to_string()));
        if self.fail_get {
            return Err(GuardError::BillingApi { status: Some(403), message: "denied".into() });
        }
        let enabled = *self.enabled.lock().unwrap();
        Ok(BillingInfo {
            name: Some(format!("{project}/billingInfo")),
            project_id: Some(project.id().to_string()),
            billing_account_name: enabled.then(|| "billingAccounts/0000-1111".to_string()),
            billing_enabled: enabled,
        })
    }

    async fn update_billing_info(
        &self,
        cred: &AccessToken,
        project: &ProjectName,
        billing_account_name: &str,
    ) -> Result<Value> {
        assert_eq!(cred.secret(), "test-token");
        self.log
            .lock()
            .unwrap()
            .push(Call::Update(project.to_string(), billing_account_name.to_string()));
        if self.fail_update {
            return Err(GuardError::BillingApi { status: Some(500), message: "backend".into() });
        }
        *self.enabled.lock().unwrap() = false;
        Ok(json!({
            "name": format!("{project}/billingInfo"),
            "projectId": project.id(),
            "billingAccountName": "",
            "billingEnabled": false,
        }))
    }
}

pub struct Harness {
    pub log: CallLog,
    pub guard: BillingGuard,
}

impl Harness {
    pub fn calls(&self) -> Vec<Call> {
        self.log.lock().unwrap().clone()
    }
}

#[derive(Default)]
pub struct HarnessOpts {
    pub no_project: bool,
    pub billing_disabled: bool,
    pub fail_credential: bool,
    pub fail_get: bool,
    pub fail_update: bool,
}

pub fn harness(opts: HarnessOpts) -> Harness {
    let log: CallLog = Arc::new(Mutex::new(Vec::new()));
    let project = if opts.no_project { None } else { Some(ProjectName::new("acme-prod").unwrap()) };
    let creds = Arc::new(FakeCredentials { log: log.clone(), fail: opts.fail_credential });
    let billing = Arc::new(FakeBilling {
        log: log.clone(),
        enabled: Mutex::new(!opts.billing_disabled),
        fail_get: opts.fail_get,
        fail_update: opts.fail_update,
    });
    Harness { log, guard: BillingGuard::new(project, creds, billing) }
}

pub fn payload(json: &str) -> String {
    STANDARD.encode(json)
}
