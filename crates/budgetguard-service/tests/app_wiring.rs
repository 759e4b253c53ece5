//! Config -> AppState -> router wiring, with a local stand-in for the
//! metadata and billing APIs.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::net::SocketAddr;
use std::sync::{Arc, Mutex};

use axum::body::{to_bytes, Body};
use axum::extract::{Path, State};
use axum::http::{HeaderMap, Request, StatusCode};
use axum::routing::get;
use axum::{Json, Router};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use serde_json::{json, Value};
use tower::ServiceExt;

use budgetguard_service::app_state::AppState;
use budgetguard_service::config::{self, AuthProvider};
use budgetguard_service::router::build_router;

/// Records every request as "METHOD path authorization".
#[derive(Clone, Default)]
struct Upstream {
    hits: Arc<Mutex<Vec<String>>>,
}

impl Upstream {
    fn hits(&self) -> Vec<String> {
        self.hits.lock().unwrap().clone()
    }
}

fn record(up: &Upstream, method: &str, path: String, headers: &HeaderMap) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string();
    up.hits.lock().unwrap().push(format!("{method} {path} {auth}"));
}

async fn get_info(State(up): State<Upstream>, Path(p): Path<String>, headers: HeaderMap) -> Json<Value> {
    record(&up, "GET", format!("/v1/projects/{p}/billingInfo"), &headers);
    Json(json!({ "projectId": p, "billingEnabled": true, "billingAccountName": "billingAccounts/0000-1111" }))
}

async fn put_info(State(up): State<Upstream>, Path(p): Path<String>, headers: HeaderMap) -> Json<Value> {
    record(&up, "PUT", format!("/v1/projects/{p}/billingInfo"), &headers);
    Json(json!({ "projectId": p, "billingAccountName": "" }))
}

async fn token(State(up): State<Upstream>, headers: HeaderMap) -> Json<Value> {
    record(&up, "GET", "/token".into(), &headers);
    Json(json!({ "access_token": "meta-token", "token_type": "Bearer", "expires_in": 3599 }))
}

async fn serve(up: Upstream) -> SocketAddr {
    let app = Router::new()
        .route("/v1/projects/:project/billingInfo", get(get_info).put(put_info))
        .route("/computeMetadata/v1/instance/service-accounts/default/token", get(token))
        .with_state(up);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn push_over_budget(app: Router) -> (StatusCode, String) {
    let data = STANDARD.encode(r#"{"costAmount":150,"budgetAmount":100}"#);
    let body = json!({ "message": { "data": data, "messageId": "1" }, "subscription": "s" });
    let req = Request::post("/v1/pubsub/push")
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    let status = res.status();
    let bytes = to_bytes(res.into_body(), usize::MAX).await.unwrap();
    (status, String::from_utf8(bytes.to_vec()).unwrap())
}

#[tokio::test]
async fn blank_project_id_reports_no_project() {
    let up = Upstream::default();
    let addr = serve(up.clone()).await;
    let cfg = config::load_from_str(&format!(
        r#"
version: 1
guard:
  project_id: "  "
billing:
  endpoint: "http://{addr}/v1"
auth:
  provider: metadata
  metadata_url: "http://{addr}"
"#
    ))
    .unwrap();

    let state = AppState::new(&cfg).unwrap();
    let (status, body) = push_over_budget(build_router(state)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "No project specified");
    assert!(up.hits().is_empty(), "{:?}", up.hits());
}

#[tokio::test]
async fn metadata_auth_build_fetches_token_then_disables() {
    let up = Upstream::default();
    let addr = serve(up.clone()).await;
    let cfg = config::load_from_str(&format!(
        r#"
version: 1
guard:
  project_id: "acme-prod"
billing:
  endpoint: "http://{addr}/v1"
auth:
  metadata_url: "http://{addr}"
"#
    ))
    .unwrap();

    let (status, body) = push_over_budget(build_router(AppState::new(&cfg).unwrap())).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Billing disabled:"), "{body}");
    assert_eq!(
        up.hits(),
        vec![
            "GET /token ".to_string(),
            "GET /v1/projects/acme-prod/billingInfo Bearer meta-token".to_string(),
            "PUT /v1/projects/acme-prod/billingInfo Bearer meta-token".to_string(),
        ]
    );
}

#[tokio::test]
async fn static_auth_build_uses_env_token() {
    let var = "BUDGETGUARD_APP_WIRING_TEST_TOKEN";
    std::env::set_var(var, "env-token");

    let up = Upstream::default();
    let addr = serve(up.clone()).await;
    let cfg = config::load_from_str(&format!(
        r#"
version: 1
guard:
  project_id: "acme-prod"
billing:
  endpoint: "http://{addr}/v1"
auth:
  provider: static
  token_env: "{var}"
"#
    ))
    .unwrap();
    assert_eq!(cfg.auth.provider, AuthProvider::Static);

    let (status, body) = push_over_budget(build_router(AppState::new(&cfg).unwrap())).await;

    assert_eq!(status, StatusCode::OK);
    assert!(body.starts_with("Billing disabled:"), "{body}");
    assert_eq!(
        up.hits(),
        vec![
            "GET /v1/projects/acme-prod/billingInfo Bearer env-token".to_string(),
            "PUT /v1/projects/acme-prod/billingInfo Bearer env-token".to_string(),
        ]
    );
}

#[test]
fn static_auth_without_token_env_fails_to_build() {
    let mut cfg = config::load_from_str("version: 1\n").unwrap();
    cfg.auth.provider = AuthProvider::Static;
    cfg.auth.token_env = None;

    let err = AppState::new(&cfg).err().expect("must fail");
    assert_eq!(err.client_code().as_str(), "BAD_REQUEST");
}
