//! Axum router wiring.
//!
//! `POST /v1/pubsub/push` receives budget alerts; `GET /healthz` is a
//! liveness probe.

use axum::{
    routing::{get, post},
    Router,
};

use crate::{app_state::AppState, transport};

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/v1/pubsub/push", post(transport::push::pubsub_push))
        .route("/healthz", get(transport::push::healthz))
        .with_state(state)
}
