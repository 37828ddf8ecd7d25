//! Projection period records and battery-cost accounting conventions.

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the battery replacement cost is charged against savings.
///
/// # Examples
///
/// ```
/// use solar_roi_sim::sim::types::BatteryAccounting;
///
/// assert_eq!(BatteryAccounting::default(), BatteryAccounting::LumpSum);
/// assert_eq!(BatteryAccounting::Amortized.to_string(), "amortized");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BatteryAccounting {
    /// Full cost booked once, in the last month of year 10.
    #[default]
    LumpSum,
    /// Cost spread evenly over the first 120 months.
    Amortized,
}

impl fmt::Display for BatteryAccounting {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BatteryAccounting::LumpSum => f.write_str("lump_sum"),
            BatteryAccounting::Amortized => f.write_str("amortized"),
        }
    }
}

/// One month of the 240-month projection.
///
/// Energy in kWh, money in the configured currency. Savings come in both
/// battery-accounting conventions side by side.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthProjection {
    /// Projection month, 1..=240.
    pub month: usize,
    /// Projection year, 1..=20.
    pub year: usize,
    /// Calendar month, 1..=12.
    pub month_in_year: usize,
    pub days: u32,
    /// Inflated prices for this month.
    pub electricity_price: f64,
    pub feed_in_tariff: f64,
    pub daily_fixed_cost: f64,
    /// Degraded PV generation.
    pub generation: f64,
    pub self_consumption: f64,
    pub to_grid: f64,
    pub from_grid: f64,
    pub consumption: f64,
    pub cost_without_solar: f64,
    pub cost_with_solar: f64,
    pub revenue_from_grid: f64,
    /// Savings before any battery cost.
    pub base_savings: f64,
    /// Savings with the lump-sum battery charge.
    pub net_savings: f64,
    pub net_savings_amortized: f64,
    pub discounted_net_savings: f64,
    pub discounted_net_savings_amortized: f64,
    pub cumulative_savings: f64,
    pub cumulative_savings_amortized: f64,
    pub cumulative_discounted_savings: f64,
    pub cumulative_discounted_savings_amortized: f64,
    /// Amortized battery cost charged this month.
    pub battery_amortization: f64,
}

impl MonthProjection {
    /// Net savings under the given convention.
    pub fn savings(&self, accounting: BatteryAccounting) -> f64 {
        match accounting {
            BatteryAccounting::LumpSum => self.net_savings,
            BatteryAccounting::Amortized => self.net_savings_amortized,
        }
    }
}

impl fmt::Display for MonthProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "m={:>3} (y{:>2}/{:>2}) | gen={:>7.1} self={:>7.1} export={:>7.1} import={:>7.1} kWh \
             | saved={:>8.2} (amort {:>8.2}) | cum={:>9.2} (amort {:>9.2})",
            self.month,
            self.year,
            self.month_in_year,
            self.generation,
            self.self_consumption,
            self.to_grid,
            self.from_grid,
            self.net_savings,
            self.net_savings_amortized,
            self.cumulative_savings,
            self.cumulative_savings_amortized,
        )
    }
}

/// Twelve consecutive months of the projection summed into one year.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearProjection {
    /// Projection year, 1..=20.
    pub year: usize,
    pub net_savings: f64,
    pub net_savings_amortized: f64,
    pub discounted_net_savings: f64,
    pub discounted_net_savings_amortized: f64,
    /// Cumulative values at the end of the year.
    pub cumulative_savings: f64,
    pub cumulative_savings_amortized: f64,
    pub cumulative_discounted_savings: f64,
    pub cumulative_discounted_savings_amortized: f64,
    pub cost_without_solar: f64,
    pub cost_with_solar: f64,
    pub revenue_from_grid: f64,
    pub battery_amortization: f64,
    pub generation: f64,
    pub self_consumption: f64,
    pub to_grid: f64,
    pub from_grid: f64,
}

impl YearProjection {
    /// Sums a year's months. `months` must be the 12 months of `year`, in order.
    pub fn from_months(year: usize, months: &[MonthProjection]) -> Self {
        let sum = |field: fn(&MonthProjection) -> f64| months.iter().map(field).sum::<f64>();
        let last = months.last();
        let closing = |field: fn(&MonthProjection) -> f64| last.map_or(0.0, field);

        Self {
            year,
            net_savings: sum(|m| m.net_savings),
            net_savings_amortized: sum(|m| m.net_savings_amortized),
            discounted_net_savings: sum(|m| m.discounted_net_savings),
            discounted_net_savings_amortized: sum(|m| m.discounted_net_savings_amortized),
            cumulative_savings: closing(|m| m.cumulative_savings),
            cumulative_savings_amortized: closing(|m| m.cumulative_savings_amortized),
            cumulative_discounted_savings: closing(|m| m.cumulative_discounted_savings),
            cumulative_discounted_savings_amortized: closing(|m| {
                m.cumulative_discounted_savings_amortized
            }),
            cost_without_solar: sum(|m| m.cost_without_solar),
            cost_with_solar: sum(|m| m.cost_with_solar),
            revenue_from_grid: sum(|m| m.revenue_from_grid),
            battery_amortization: sum(|m| m.battery_amortization),
            generation: sum(|m| m.generation),
            self_consumption: sum(|m| m.self_consumption),
            to_grid: sum(|m| m.to_grid),
            from_grid: sum(|m| m.from_grid),
        }
    }

    /// Net savings under the given convention.
    pub fn savings(&self, accounting: BatteryAccounting) -> f64 {
        match accounting {
            BatteryAccounting::LumpSum => self.net_savings,
            BatteryAccounting::Amortized => self.net_savings_amortized,
        }
    }
}

impl fmt::Display for YearProjection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "year={:>2} | gen={:>8.1} kWh | before={:>8.2}  after={:>8.2}  feed-in={:>7.2} \
             | saved={:>9.2} (amort {:>9.2}) | cum={:>10.2} (amort {:>10.2}, disc {:>10.2})",
            self.year,
            self.generation,
            self.cost_without_solar,
            self.cost_with_solar,
            self.revenue_from_grid,
            self.net_savings,
            self.net_savings_amortized,
            self.cumulative_savings,
            self.cumulative_savings_amortized,
            self.cumulative_discounted_savings,
        )
    }
}

/// Payback crossings of the four cumulative savings series, in months.
///
/// `None` means the series never reached the investment with a positive
/// month to interpolate from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaybackMonths {
    pub simple: Option<f64>,
    pub discounted: Option<f64>,
    pub simple_amortized: Option<f64>,
    pub discounted_amortized: Option<f64>,
}
