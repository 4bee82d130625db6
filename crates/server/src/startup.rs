use std::net::SocketAddr;

use axum::Router;
use configs::AppConfig;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::routes;
use crate::state::AppState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load configuration from `CONFIG_PATH` (or `config.toml`), falling back to
/// defaults plus `SERVER_*` environment variables.
pub fn load_config() -> Result<AppConfig, StartupError> {
    AppConfig::load_or_env().map_err(|e| StartupError::InvalidConfig(e.to_string()))
}

/// Build the router with fresh stores. Each call yields independent state.
pub fn build_app(cfg: &AppConfig) -> Router {
    let state = AppState::new(&cfg.validation);
    info!(
        users_gate = state.user_gate.name(),
        products_gate = state.product_gate.name(),
        docs = cfg.docs.enabled,
        "application state built"
    );
    routes::build_router(state, build_cors(), cfg.docs.enabled)
}

fn bind_addr(cfg: &AppConfig) -> Result<SocketAddr, StartupError> {
    let raw = cfg.server.bind_addr();
    raw.parse()
        .map_err(|e| StartupError::InvalidConfig(format!("cannot parse bind address {raw}: {e}")))
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, shutting down");
    }
}

/// Public entry: build the app and serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg);
    let addr = bind_addr(&cfg)?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
