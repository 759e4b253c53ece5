//! budgetguard service
//!
//! - Push endpoint: POST /v1/pubsub/push
//! - Detaches the configured project's billing account when an alert reports
//!   cost above budget
//! - Config path: first CLI argument, default `budgetguard.yaml`

use std::process::ExitCode;

use tracing_subscriber::{fmt, EnvFilter};

use budgetguard_core::error::{GuardError, Result};
use budgetguard_service::{app_state, config, router};

const DEFAULT_CONFIG_PATH: &str = "budgetguard.yaml";

#[tokio::main]
async fn main() -> ExitCode {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(code = e.client_code().as_str(), error = %e, "budgetguard exited");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<()> {
    let path = std::env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let cfg = config::load_from_file(&path)?;
    let listen = cfg.server.listen_addr()?;

    let state = app_state::AppState::new(&cfg)?;
    let app = router::build_router(state);

    tracing::info!(%listen, project = ?cfg.guard.project_id, "budgetguard starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| GuardError::Internal(format!("failed to bind {listen}: {e}")))?;

    axum::serve(listener, app)
        .await
        .map_err(|e| GuardError::Internal(format!("server failed: {e}")))
}
