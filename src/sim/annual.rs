//! Month-by-month aggregation of representative days into annual totals.

use serde::Serialize;
use tracing::{debug, warn};

use super::balance::{DailyBalancer, DaySummary};
use super::profiles::{
    DAYS_IN_MONTH, DAYS_PER_YEAR, MONTHLY_GENERATION_PERCENTAGES, MONTHS_PER_YEAR, RegionProfile,
};

/// First-year energy totals (kWh).
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualSummary {
    pub total_generation: f64,
    /// Configured annual consumption.
    pub total_consumption: f64,
    pub total_self_consumption: f64,
    pub to_grid: f64,
    pub from_grid: f64,
    /// `total_self_consumption / total_generation`; NaN when nothing is generated.
    pub self_consumption_rate: f64,
}

/// Output of the aggregator: annual totals plus the days they were built from.
#[derive(Debug, Clone, PartialEq)]
pub struct BaseData {
    pub annual: AnnualSummary,
    /// Representative day of each calendar month, January first.
    pub monthly_days: Vec<DaySummary>,
    /// Annual-average day, for display only.
    pub average_day: DaySummary,
}

/// Balances one representative day per month and sums them into annual totals.
///
/// Annual self-consumption comes from the monthly loop, never from the
/// average day, so seasonal mismatch between generation and demand is kept.
///
/// # Arguments
///
/// * `annual_generation` - Expected first-year PV production (kWh)
/// * `annual_consumption` - Household consumption (kWh)
/// * `profile` - Regional consumption profile
/// * `balancer` - Daily balancer configured with the run's shapes and battery
pub fn aggregate(
    annual_generation: f64,
    annual_consumption: f64,
    profile: &RegionProfile,
    balancer: &DailyBalancer,
) -> BaseData {
    let mut monthly_days = Vec::with_capacity(MONTHS_PER_YEAR);
    let mut total_generation = 0.0;
    let mut total_self_consumption = 0.0;

    for month in 0..MONTHS_PER_YEAR {
        let days = f64::from(DAYS_IN_MONTH[month]);
        let daily_generation =
            annual_generation * (MONTHLY_GENERATION_PERCENTAGES[month] / 100.0) / days;
        let daily_consumption =
            annual_consumption * (profile.monthly_consumption_percentages[month] / 100.0) / days;

        let day = balancer.balance(daily_generation, daily_consumption);
        total_generation += day.total_generation * days;
        total_self_consumption += day.self_consumption() * days;
        monthly_days.push(day);
    }

    // The average day reports the annual figures / 365 directly.
    let average_day = balancer.balance_with_totals(
        total_generation / DAYS_PER_YEAR,
        annual_consumption / DAYS_PER_YEAR,
    );

    if total_generation == 0.0 {
        warn!("annual generation is zero; self-consumption rate is undefined");
    }

    let annual = AnnualSummary {
        total_generation,
        total_consumption: annual_consumption,
        total_self_consumption,
        to_grid: total_generation - total_self_consumption,
        from_grid: annual_consumption - total_self_consumption,
        self_consumption_rate: total_self_consumption / total_generation,
    };
    debug!(
        region = %profile.region,
        generation_kwh = annual.total_generation,
        self_consumption_kwh = annual.total_self_consumption,
        rate = annual.self_consumption_rate,
        "aggregated annual energy balance"
    );

    BaseData {
        annual,
        monthly_days,
        average_day,
    }
}
