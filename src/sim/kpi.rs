//! Headline indicators derived from a simulation result.

use std::fmt;

use serde::Serialize;

use super::engine::SimulationResult;
use super::types::BatteryAccounting;

/// Key performance indicators of one simulation run.
///
/// Computed post-hoc from a `SimulationResult` so printed and exported
/// figures always agree with the projection they summarise.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KpiReport {
    /// Share of PV generation used on site (%); NaN without generation.
    pub self_consumption_pct: f64,
    /// First-year PV generation (kWh).
    pub annual_generation_kwh: f64,
    /// First-year on-site use of PV energy (kWh).
    pub annual_self_consumption_kwh: f64,
    pub annual_export_kwh: f64,
    pub annual_import_kwh: f64,
    /// Payback periods (years).
    pub payback_years: Option<f64>,
    pub payback_years_amortized: Option<f64>,
    pub discounted_payback_years: Option<f64>,
    pub discounted_payback_years_amortized: Option<f64>,
    /// Internal rate of return (%).
    pub irr_pct: Option<f64>,
    pub irr_convention: BatteryAccounting,
    /// Cumulative savings after 20 years.
    pub cumulative_savings: f64,
    pub cumulative_savings_amortized: f64,
}

impl KpiReport {
    /// Summarises a simulation result.
    pub fn from_result(result: &SimulationResult) -> Self {
        let annual = &result.annual_data;
        Self {
            self_consumption_pct: annual.self_consumption_rate * 100.0,
            annual_generation_kwh: annual.total_generation,
            annual_self_consumption_kwh: annual.total_self_consumption,
            annual_export_kwh: annual.to_grid,
            annual_import_kwh: annual.from_grid,
            payback_years: result.payback_period,
            payback_years_amortized: result.payback_period_amortized,
            discounted_payback_years: result.discounted_payback_period,
            discounted_payback_years_amortized: result.discounted_payback_period_amortized,
            irr_pct: result.irr.map(|r| r * 100.0),
            irr_convention: result.irr_convention,
            cumulative_savings: result.final_cumulative_savings(BatteryAccounting::LumpSum),
            cumulative_savings_amortized: result
                .final_cumulative_savings(BatteryAccounting::Amortized),
        }
    }
}

/// Formats an optional figure with a unit, or `N/A`.
struct OrNa(Option<f64>, &'static str);

impl fmt::Display for OrNa {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.0 {
            Some(v) if v.is_finite() => write!(f, "{v:.2}{}", self.1),
            _ => f.write_str("N/A"),
        }
    }
}

impl fmt::Display for KpiReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- KPI Report ---")?;
        writeln!(
            f,
            "Self-consumption rate:    {}",
            OrNa(Some(self.self_consumption_pct), "%")
        )?;
        writeln!(
            f,
            "Annual generation:        {:.1} kWh",
            self.annual_generation_kwh
        )?;
        writeln!(
            f,
            "Annual self-consumption:  {:.1} kWh",
            self.annual_self_consumption_kwh
        )?;
        writeln!(
            f,
            "Grid export / import:     {:.1} / {:.1} kWh",
            self.annual_export_kwh, self.annual_import_kwh
        )?;
        writeln!(
            f,
            "Payback:                  {} (amortized {})",
            OrNa(self.payback_years, " y"),
            OrNa(self.payback_years_amortized, " y")
        )?;
        writeln!(
            f,
            "Discounted payback:       {} (amortized {})",
            OrNa(self.discounted_payback_years, " y"),
            OrNa(self.discounted_payback_years_amortized, " y")
        )?;
        writeln!(
            f,
            "IRR ({}):           {}",
            self.irr_convention,
            OrNa(self.irr_pct, "%")
        )?;
        write!(
            f,
            "20-year savings:          {:.2} (amortized {:.2})",
            self.cumulative_savings, self.cumulative_savings_amortized
        )
    }
}
