//! routeguard gateway
//!
//! - Loads the policy file (CLI arg, `ROUTEGUARD_CONFIG`, or `routeguard.yaml`)
//! - Serves the guarded echo upstream plus `/healthz`, `/readyz`, `/metrics`
//! - Drains on Ctrl-C

use std::net::SocketAddr;

use tracing_subscriber::{fmt, EnvFilter};

use routeguard_core::error::{Result, RouteGuardError};
use routeguard_gateway::{app_state::AppState, config, router};

#[tokio::main]
async fn main() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("routeguard_gateway=info,routeguard_core=info"));
    fmt().with_env_filter(filter).init();

    if let Err(e) = run().await {
        tracing::error!(error = %e, code = e.client_code().as_str(), "routeguard-gateway failed");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let path = config::resolve_path(std::env::args().nth(1), std::env::var(config::PATH_ENV).ok());
    let cfg = config::load_from_file(&path)?;
    let listen: SocketAddr = cfg
        .gateway
        .listen
        .parse()
        .map_err(|_| RouteGuardError::BadConfig("gateway.listen must be a valid SocketAddr".into()))?;

    let state = AppState::new(cfg)?;
    let app = router::build_router(state.clone());

    tracing::info!(%listen, config = %path, "routeguard-gateway starting");
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .map_err(|e| RouteGuardError::Internal(format!("bind {listen} failed: {e}")))?;

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await
        .map_err(|e| RouteGuardError::Internal(format!("server failed: {e}")))?;

    tracing::info!("routeguard-gateway stopped");
    Ok(())
}

async fn shutdown_signal(state: AppState) {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!(error = %e, "ctrl-c handler unavailable");
        std::future::pending::<()>().await;
    }
    state.metrics().set_draining();
    tracing::info!("shutdown requested, draining");
}
