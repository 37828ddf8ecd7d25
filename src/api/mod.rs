//! REST API for simulation results.
//!
//! Provides three endpoints:
//! - `GET /regions`: available regional presets
//! - `GET /baseline`: config, KPI report, and result of the startup run
//! - `POST /simulate`: runs a simulation for a JSON `SystemConfig`

mod handlers;
mod types;

use std::io;
use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::{get, post};

use crate::config::SystemConfig;
use crate::sim::engine::SimulationResult;
use crate::sim::kpi::KpiReport;

pub use types::{BaselineResponse, ErrorResponse, RegionInfo};

/// Immutable application state shared across all request handlers.
///
/// Constructed once after the startup simulation completes and wrapped in
/// `Arc`; all data is read-only, so no locks are needed.
pub struct AppState {
    /// Configuration of the startup run.
    pub config: SystemConfig,
    /// KPI report of the startup run.
    pub kpi: KpiReport,
    /// Full result of the startup run.
    pub result: SimulationResult,
}

/// Builds the axum router with all API routes.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/regions", get(handlers::get_regions))
        .route("/baseline", get(handlers::get_baseline))
        .route("/simulate", post(handlers::post_simulate))
        .with_state(state)
}

/// Binds to the given address and serves the API.
///
/// # Errors
///
/// Returns an `io::Error` if the listener cannot bind to `addr` or the
/// server stops with an error.
pub async fn serve(state: Arc<AppState>, addr: SocketAddr) -> io::Result<()> {
    let app = router(state);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "API server listening");
    axum::serve(listener, app).await
}
