//! Integration tests for the REST API feature.

#![cfg(feature = "api")]

mod common;

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use tower::util::ServiceExt;

use solar_roi_sim::api::{AppState, router};
use solar_roi_sim::config::SystemConfig;
use solar_roi_sim::sim::kpi::KpiReport;

/// Simulates the reference household and wraps it as API state.
fn build_api_state() -> Arc<AppState> {
    let config = common::nsw_reference();
    let result = common::run(&config);
    let kpi = KpiReport::from_result(&result);
    Arc::new(AppState {
        config,
        kpi,
        result,
    })
}

async fn get_json(uri: &str) -> (StatusCode, serde_json::Value) {
    let app = router(build_api_state());
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn baseline_matches_direct_simulation() {
    let (status, json) = get_json("/baseline").await;
    assert_eq!(status, StatusCode::OK);

    let direct = common::run(&common::nsw_reference());
    let irr = json["result"]["irr"].as_f64().unwrap();
    assert!((irr - direct.irr.unwrap()).abs() < 1e-12);
    let payback = json["kpi"]["paybackYears"].as_f64().unwrap();
    assert!((payback - direct.payback_period.unwrap()).abs() < 1e-12);
    assert_eq!(json["config"]["battery_capacity_kwh"], 10.0);
}

#[tokio::test]
async fn regions_carry_typical_consumption() {
    let (status, json) = get_json("/regions").await;
    assert_eq!(status, StatusCode::OK);

    let tas = json
        .as_array()
        .unwrap()
        .iter()
        .find(|r| r["key"] == "TAS")
        .unwrap();
    assert_eq!(tas["typical_annual_consumption_kwh"], 8619.0);
}

#[tokio::test]
async fn simulate_round_trips_posted_config() {
    let app = router(build_api_state());
    let config = SystemConfig::from_preset("NT").unwrap();
    let req = Request::builder()
        .method("POST")
        .uri("/simulate")
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_vec(&config).unwrap()))
        .unwrap();
    let resp = app.oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);

    let body = axum::body::to_bytes(resp.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    let expected = common::run(&config);
    let generation = json["annualData"]["totalGeneration"].as_f64().unwrap();
    assert!((generation - expected.annual_data.total_generation).abs() < 1e-9);
    let flows = json["cashFlows"].as_array().unwrap();
    assert_eq!(flows.len(), expected.cash_flows.len());
    assert_eq!(flows[0], -15_000.0);
}
