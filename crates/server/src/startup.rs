use std::{future::Future, net::SocketAddr, sync::Arc};

use axum::Router;
use configs::{AppConfig, ProximityConfig};
use service::{FacilityDataset, ProximityFilterService};
use tokio::net::TcpListener;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::errors::StartupError;
use crate::observability;
use crate::routes;
use crate::state::AppState;

/// The browser dashboards call the lookup cross-origin.
fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// Load and validate the dataset, then wire the proximity service over it.
pub async fn build_state(cfg: &ProximityConfig) -> Result<AppState, StartupError> {
    cfg.validate()
        .map_err(|e| StartupError::InvalidConfig(e.to_string()))?;
    common::env::ensure_env(&cfg.dataset_path).await?;

    let dataset = FacilityDataset::load(&cfg.dataset_path).await?;
    observability::DATASET_FACILITIES.set(dataset.len() as i64);

    let proximity = ProximityFilterService::from_config(Arc::new(dataset), cfg)?;
    info!(
        facilities = proximity.dataset().len(),
        radius_km = proximity.radius_km(),
        "proximity service ready"
    );
    Ok(AppState::new(proximity))
}

pub fn build_app(state: AppState) -> Router {
    routes::build_router(state, build_cors())
}

fn bind_addr(cfg: &AppConfig) -> anyhow::Result<SocketAddr> {
    Ok(cfg.server.bind_addr().parse()?)
}

/// Build the app and serve until `shutdown` resolves.
pub async fn run_with_shutdown<F>(cfg: AppConfig, shutdown: F) -> anyhow::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let state = build_state(&cfg.proximity).await?;
    let app = build_app(state);

    let addr = bind_addr(&cfg)?;
    let listener = TcpListener::bind(addr).await?;
    info!(%addr, "listening for nearby-hospital lookups");
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    Ok(())
}

/// Public entry: serve until Ctrl+C.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    run_with_shutdown(cfg, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!(event = "shutdown_signal", "received Ctrl+C, draining connections");
        }
    })
    .await
}
