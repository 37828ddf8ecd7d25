//! Simulation entry point tying profiles, balancing, projection, and IRR together.

use serde::Serialize;
use tracing::debug;

use super::annual::{AnnualSummary, aggregate};
use super::balance::{DailyBalancer, DaySummary};
use super::finance::irr;
use super::profiles::{
    HOURLY_GENERATION_FACTORS, HOURS_PER_DAY, MONTHLY_GENERATION_PERCENTAGES, MONTHS_PER_YEAR,
    RegionProfile, hourly_generation_fractions,
};
use super::projection::project;
use super::types::{BatteryAccounting, MonthProjection, YearProjection};
use crate::config::{ConfigError, SystemConfig};

/// Everything derived from one `SystemConfig`.
///
/// Payback figures are `None` when the cumulative savings never reach the
/// investment within 20 years; `irr` is `None` when no rate in `[0, 1]`
/// zeroes the NPV of `cash_flows`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    pub annual_data: AnnualSummary,
    pub twenty_year_projection: Vec<YearProjection>,
    pub monthly_projection: Vec<MonthProjection>,
    /// Simple payback in years, lump-sum battery cost.
    pub payback_period: Option<f64>,
    pub payback_period_amortized: Option<f64>,
    pub discounted_payback_period: Option<f64>,
    pub discounted_payback_period_amortized: Option<f64>,
    /// Simple payback in months, lump-sum battery cost.
    pub payback_period_months: Option<f64>,
    pub discounted_payback_period_months: Option<f64>,
    pub irr: Option<f64>,
    /// Convention of the yearly savings in `cash_flows`.
    pub irr_convention: BatteryAccounting,
    /// `[-investment, year 1, .., year 20]`.
    pub cash_flows: Vec<f64>,
    /// Annual-average day.
    pub day_base_data: DaySummary,
    /// Representative day per calendar month, January first.
    pub monthly_day_base_data: Vec<DaySummary>,
    pub monthly_generation_percentages: [f64; MONTHS_PER_YEAR],
    pub monthly_consumption_factors: [f64; MONTHS_PER_YEAR],
    pub hourly_generation_factors: [f64; HOURS_PER_DAY],
    pub hourly_consumption_percentages: [f64; HOURS_PER_DAY],
}

impl SimulationResult {
    /// Cumulative savings at the end of the horizon under `accounting`.
    pub fn final_cumulative_savings(&self, accounting: BatteryAccounting) -> f64 {
        self.twenty_year_projection
            .last()
            .map_or(0.0, |y| match accounting {
                BatteryAccounting::LumpSum => y.cumulative_savings,
                BatteryAccounting::Amortized => y.cumulative_savings_amortized,
            })
    }
}

/// Runs the full simulation for one configuration.
///
/// Validates the configuration, balances one representative day per month
/// (plus the annual-average day), projects 240 months of savings, and solves
/// for the IRR of the yearly cash flows. Deterministic: equal configurations
/// produce equal results.
///
/// # Errors
///
/// Returns the first `ConfigError` reported by [`SystemConfig::validate`].
pub fn simulate(config: &SystemConfig) -> Result<SimulationResult, ConfigError> {
    if let Some(err) = config.validate().into_iter().next() {
        return Err(err);
    }
    let profile = RegionProfile::lookup(&config.region)?;

    let balancer = DailyBalancer::new(
        hourly_generation_fractions(),
        profile.hourly_consumption_fractions(),
        config.battery_capacity_kwh,
    );
    let base = aggregate(
        config.annual_generation(),
        config.annual_consumption_kwh,
        &profile,
        &balancer,
    );

    let projection = project(config, &base.monthly_days);
    let cash_flows = projection.cash_flows(config.investment_cost, config.irr_convention);
    let irr = irr(&cash_flows);
    debug!(
        region = %profile.region,
        convention = %config.irr_convention,
        irr = ?irr,
        "simulation complete"
    );

    let years = |months: Option<f64>| months.map(|m| m / MONTHS_PER_YEAR as f64);
    let payback = projection.payback;

    Ok(SimulationResult {
        annual_data: base.annual,
        twenty_year_projection: projection.years,
        monthly_projection: projection.months,
        payback_period: years(payback.simple),
        payback_period_amortized: years(payback.simple_amortized),
        discounted_payback_period: years(payback.discounted),
        discounted_payback_period_amortized: years(payback.discounted_amortized),
        payback_period_months: payback.simple,
        discounted_payback_period_months: payback.discounted,
        irr,
        irr_convention: config.irr_convention,
        cash_flows,
        day_base_data: base.average_day,
        monthly_day_base_data: base.monthly_days,
        monthly_generation_percentages: MONTHLY_GENERATION_PERCENTAGES,
        monthly_consumption_factors: profile.monthly_consumption_percentages,
        hourly_generation_factors: HOURLY_GENERATION_FACTORS,
        hourly_consumption_percentages: profile.hourly_consumption_percentages,
    })
}
