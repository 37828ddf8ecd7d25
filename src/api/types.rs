//! API response types.

use serde::Serialize;

use crate::config::SystemConfig;
use crate::sim::engine::SimulationResult;
use crate::sim::kpi::KpiReport;
use crate::sim::profiles::Region;

/// Startup run: configuration, KPIs, and full result.
#[derive(Debug, Serialize)]
pub struct BaselineResponse {
    pub config: SystemConfig,
    pub kpi: KpiReport,
    pub result: SimulationResult,
}

/// One selectable region preset.
#[derive(Debug, Serialize)]
pub struct RegionInfo {
    /// Region key accepted by `SystemConfig::region`.
    pub key: &'static str,
    /// Consumption used by the region's reference household (kWh/year).
    pub typical_annual_consumption_kwh: f64,
}

impl From<Region> for RegionInfo {
    fn from(region: Region) -> Self {
        Self {
            key: region.as_str(),
            typical_annual_consumption_kwh: region.typical_annual_consumption_kwh(),
        }
    }
}

/// Error response body for 400-class errors.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Human-readable error message.
    pub error: String,
}
