//! Shared test fixtures for integration tests.

#![allow(dead_code)]

use solar_roi_sim::config::SystemConfig;
use solar_roi_sim::sim::engine::{SimulationResult, simulate};

/// NSW reference household (8 kWp × 1526 kWh/kWp, 10 kWh battery).
pub fn nsw_reference() -> SystemConfig {
    SystemConfig::baseline()
}

/// NSW reference household with a different battery size.
pub fn nsw_with_battery(capacity_kwh: f64) -> SystemConfig {
    SystemConfig {
        battery_capacity_kwh: capacity_kwh,
        ..nsw_reference()
    }
}

/// Runs a configuration that is expected to be valid.
pub fn run(config: &SystemConfig) -> SimulationResult {
    simulate(config).unwrap_or_else(|e| panic!("simulation should succeed: {e}"))
}

/// Cumulative lump-sum savings after `month` months (0 before the first).
pub fn cumulative_after(result: &SimulationResult, month: usize) -> f64 {
    match month {
        0 => 0.0,
        m => result.monthly_projection[m - 1].cumulative_savings,
    }
}
