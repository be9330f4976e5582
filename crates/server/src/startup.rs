use std::{net::SocketAddr, sync::Arc};

use axum::Router;
use configs::AppConfig;
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use service::person::repo::seaorm::SeaOrmPersonStore;

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Connect to the database and establish the schema, including the unique
/// email index. Any failure here aborts startup.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    let store = SeaOrmPersonStore::prepare(db)
        .await
        .map_err(|e| StartupError::Schema(e.to_string()))?;
    Ok(ServerState::new(Arc::new(store)))
}

pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
    }
}

/// Build the app from an explicit configuration and serve until Ctrl+C.
pub async fn run_with_config(cfg: AppConfig) -> anyhow::Result<()> {
    let addr: SocketAddr = cfg
        .server
        .bind_addr()
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bad listen address: {e}")))?;

    let state = build_state(&cfg).await?;
    let app = build_app(state);

    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "person api listening");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}
