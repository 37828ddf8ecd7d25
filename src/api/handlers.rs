//! Request handlers for the API endpoints.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;

use super::AppState;
use super::types::{BaselineResponse, ErrorResponse, RegionInfo};
use crate::config::SystemConfig;
use crate::sim::engine::{SimulationResult, simulate};
use crate::sim::profiles::Region;

type ApiError = (StatusCode, Json<ErrorResponse>);

fn bad_request(error: String) -> ApiError {
    (StatusCode::BAD_REQUEST, Json(ErrorResponse { error }))
}

/// Lists the region presets.
///
/// `GET /regions` → 200 + `Vec<RegionInfo>` JSON
pub async fn get_regions() -> Json<Vec<RegionInfo>> {
    Json(Region::ALL.into_iter().map(RegionInfo::from).collect())
}

/// Returns the startup configuration, KPI report, and result.
///
/// `GET /baseline` → 200 + `BaselineResponse` JSON
pub async fn get_baseline(State(state): State<Arc<AppState>>) -> Json<BaselineResponse> {
    Json(BaselineResponse {
        config: state.config.clone(),
        kpi: state.kpi.clone(),
        result: state.result.clone(),
    })
}

/// Simulates the posted configuration.
///
/// `POST /simulate` with `SystemConfig` JSON → 200 + `SimulationResult` JSON
/// Malformed body or invalid config → 400 + `ErrorResponse`
pub async fn post_simulate(
    payload: Result<Json<SystemConfig>, JsonRejection>,
) -> Result<Json<SimulationResult>, ApiError> {
    let Json(config) = payload.map_err(|e| bad_request(e.body_text()))?;
    let result = simulate(&config).map_err(|e| bad_request(e.to_string()))?;
    Ok(Json(result))
}
