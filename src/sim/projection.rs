//! 240-month financial projection with payback tracking.

use tracing::debug;

use super::balance::DaySummary;
use super::profiles::{DAYS_IN_MONTH, MONTHS_PER_YEAR};
use super::types::{BatteryAccounting, MonthProjection, PaybackMonths, YearProjection};
use crate::config::SystemConfig;

/// Projection horizon in years.
pub const PROJECTION_YEARS: usize = 20;

/// Projection horizon in months.
pub const PROJECTION_MONTHS: usize = PROJECTION_YEARS * MONTHS_PER_YEAR;

/// Month in which the battery is replaced (end of year 10); also the length
/// of the amortization window.
pub const BATTERY_REPLACEMENT_MONTH: usize = 120;

/// Tracks a cumulative savings series and its first crossing of a target.
#[derive(Debug, Clone)]
pub struct PaybackTracker {
    target: f64,
    cumulative: f64,
    crossing: Option<f64>,
}

impl PaybackTracker {
    pub fn new(target: f64) -> Self {
        Self {
            target,
            cumulative: 0.0,
            crossing: None,
        }
    }

    /// Adds the savings of 1-based `period` and returns the new cumulative total.
    ///
    /// The crossing is interpolated inside the first period whose cumulative
    /// total reaches the target, provided that period's savings are positive;
    /// a period with zero or negative savings never resolves the crossing.
    pub fn record(&mut self, period: usize, savings: f64) -> f64 {
        let before = self.cumulative;
        self.cumulative += savings;
        if self.crossing.is_none() && self.cumulative >= self.target && savings > 0.0 {
            self.crossing = Some((period - 1) as f64 + (self.target - before) / savings);
        }
        self.cumulative
    }

    pub fn cumulative(&self) -> f64 {
        self.cumulative
    }

    /// Fractional period at which the target was reached.
    pub fn crossing(&self) -> Option<f64> {
        self.crossing
    }
}

/// Per-month compounding factors derived from annual percentage rates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MonthlyRates {
    pub inflation: f64,
    pub degradation: f64,
    pub discount: f64,
}

impl MonthlyRates {
    /// Twelfth roots of the annual growth, decay, and discount factors.
    pub fn from_annual_pct(inflation_pct: f64, degradation_pct: f64, discount_pct: f64) -> Self {
        let monthly = |annual: f64| annual.powf(1.0 / MONTHS_PER_YEAR as f64);
        Self {
            inflation: monthly(1.0 + inflation_pct / 100.0),
            degradation: monthly(1.0 - degradation_pct / 100.0),
            discount: monthly(1.0 + discount_pct / 100.0),
        }
    }
}

/// Full projection: monthly detail, yearly rollup, and payback crossings.
#[derive(Debug, Clone, PartialEq)]
pub struct Projection {
    pub months: Vec<MonthProjection>,
    pub years: Vec<YearProjection>,
    pub payback: PaybackMonths,
}

impl Projection {
    /// Yearly cash flows for IRR: the investment as an outflow, then each
    /// year's net savings under `accounting`.
    pub fn cash_flows(&self, investment_cost: f64, accounting: BatteryAccounting) -> Vec<f64> {
        std::iter::once(-investment_cost)
            .chain(self.years.iter().map(|y| y.savings(accounting)))
            .collect()
    }
}

/// Walks the 240-month horizon.
///
/// Each month reuses the representative day of its calendar month, with
/// generation and self-consumption degraded and prices inflated from the
/// first month onwards. Savings are discounted to the start of the projection.
///
/// # Arguments
///
/// * `config` - Validated system configuration
/// * `monthly_days` - Representative days for January..December (12 entries)
pub fn project(config: &SystemConfig, monthly_days: &[DaySummary]) -> Projection {
    debug_assert_eq!(monthly_days.len(), MONTHS_PER_YEAR);

    let rates = MonthlyRates::from_annual_pct(
        config.price_inflation_pct,
        config.panel_degradation_pct,
        config.discount_rate_pct,
    );
    let amortization = config.battery_replacement_cost / BATTERY_REPLACEMENT_MONTH as f64;

    let mut simple = PaybackTracker::new(config.investment_cost);
    let mut discounted = PaybackTracker::new(config.investment_cost);
    let mut simple_amortized = PaybackTracker::new(config.investment_cost);
    let mut discounted_amortized = PaybackTracker::new(config.investment_cost);

    let mut months = Vec::with_capacity(PROJECTION_MONTHS);
    for month in 1..=PROJECTION_MONTHS {
        let calendar = (month - 1) % MONTHS_PER_YEAR;
        let elapsed = (month - 1) as i32;
        let inflation = rates.inflation.powi(elapsed);
        let degradation = rates.degradation.powi(elapsed);
        let discount = rates.discount.powi(month as i32);

        let electricity_price = config.electricity_price * inflation;
        let feed_in_tariff = config.feed_in_tariff * inflation;
        let daily_fixed_cost = config.daily_fixed_cost * inflation;

        let day = &monthly_days[calendar];
        let days = DAYS_IN_MONTH[calendar];
        let day_count = f64::from(days);

        let daily_generation = day.total_generation * degradation;
        let daily_self_consumption = day.self_consumption() * degradation;
        let daily_to_grid = (daily_generation - daily_self_consumption).max(0.0);
        let daily_from_grid = (day.total_consumption - daily_self_consumption).max(0.0);

        let consumption = day.total_consumption * day_count;
        let from_grid = daily_from_grid * day_count;
        let to_grid = daily_to_grid * day_count;

        let fixed = day_count * daily_fixed_cost;
        let cost_without_solar = consumption * electricity_price + fixed;
        let cost_with_solar = from_grid * electricity_price + fixed;
        let revenue_from_grid = to_grid * feed_in_tariff;
        let base_savings = cost_without_solar - (cost_with_solar - revenue_from_grid);

        let net_savings = if month == BATTERY_REPLACEMENT_MONTH {
            base_savings - config.battery_replacement_cost
        } else {
            base_savings
        };
        let battery_amortization = if month <= BATTERY_REPLACEMENT_MONTH {
            amortization
        } else {
            0.0
        };
        let net_savings_amortized = base_savings - battery_amortization;

        let discounted_net_savings = net_savings / discount;
        let discounted_net_savings_amortized = net_savings_amortized / discount;

        months.push(MonthProjection {
            month,
            year: (month - 1) / MONTHS_PER_YEAR + 1,
            month_in_year: calendar + 1,
            days,
            electricity_price,
            feed_in_tariff,
            daily_fixed_cost,
            generation: daily_generation * day_count,
            self_consumption: daily_self_consumption * day_count,
            to_grid,
            from_grid,
            consumption,
            cost_without_solar,
            cost_with_solar,
            revenue_from_grid,
            base_savings,
            net_savings,
            net_savings_amortized,
            discounted_net_savings,
            discounted_net_savings_amortized,
            cumulative_savings: simple.record(month, net_savings),
            cumulative_savings_amortized: simple_amortized.record(month, net_savings_amortized),
            cumulative_discounted_savings: discounted.record(month, discounted_net_savings),
            cumulative_discounted_savings_amortized: discounted_amortized
                .record(month, discounted_net_savings_amortized),
            battery_amortization,
        });
    }

    let years: Vec<YearProjection> = months
        .chunks(MONTHS_PER_YEAR)
        .enumerate()
        .map(|(i, chunk)| YearProjection::from_months(i + 1, chunk))
        .collect();

    let payback = PaybackMonths {
        simple: simple.crossing(),
        discounted: discounted.crossing(),
        simple_amortized: simple_amortized.crossing(),
        discounted_amortized: discounted_amortized.crossing(),
    };
    debug!(
        cumulative = simple.cumulative(),
        cumulative_amortized = simple_amortized.cumulative(),
        payback_months = ?payback.simple,
        horizon_months = PROJECTION_MONTHS,
        "projected savings"
    );

    Projection {
        months,
        years,
        payback,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::balance::DailyBalancer;
    use crate::sim::profiles::HOURS_PER_DAY;

    const EPS: f64 = 1e-6;

    /// Twelve identical days: 20 kWh generated, 15 kWh consumed, 6 kWh used on site.
    fn flat_days() -> Vec<DaySummary> {
        let mut shape = [0.0; HOURS_PER_DAY];
        shape[12] = 1.0;
        let shares = [1.0 / HOURS_PER_DAY as f64; HOURS_PER_DAY];
        let day = DailyBalancer::new(shape, shares, 5.375).balance(20.0, 15.0);
        vec![day; MONTHS_PER_YEAR]
    }

    fn flat_config() -> SystemConfig {
        SystemConfig {
            investment_cost: 10_000.0,
            electricity_price: 0.30,
            feed_in_tariff: 0.10,
            price_inflation_pct: 0.0,
            panel_degradation_pct: 0.0,
            daily_fixed_cost: 1.0,
            battery_replacement_cost: 1_200.0,
            discount_rate_pct: 0.0,
            ..SystemConfig::baseline()
        }
    }

    #[test]
    fn tracker_interpolates_first_crossing() {
        let mut t = PaybackTracker::new(250.0);
        t.record(1, 100.0);
        t.record(2, 100.0);
        t.record(3, 100.0);
        // 200 before month 3, 50 of 100 needed
        assert_eq!(t.crossing(), Some(2.5));
        t.record(4, 100.0);
        assert_eq!(t.crossing(), Some(2.5));
        assert_eq!(t.cumulative(), 400.0);
    }

    #[test]
    fn tracker_ignores_non_positive_crossing_period() {
        let mut t = PaybackTracker::new(0.0);
        t.record(1, 0.0);
        assert_eq!(t.crossing(), None);
        t.record(2, 10.0);
        assert_eq!(t.crossing(), Some(1.0));
    }

    #[test]
    fn tracker_never_crossing_stays_none() {
        let mut t = PaybackTracker::new(1000.0);
        for p in 1..=10 {
            t.record(p, 50.0);
        }
        assert_eq!(t.crossing(), None);
    }

    #[test]
    fn monthly_rates_are_twelfth_roots() {
        let r = MonthlyRates::from_annual_pct(3.0, 0.5, 5.0);
        assert!((r.inflation.powi(12) - 1.03).abs() < 1e-12);
        assert!((r.degradation.powi(12) - 0.995).abs() < 1e-12);
        assert!((r.discount.powi(12) - 1.05).abs() < 1e-12);
    }

    #[test]
    fn horizon_is_240_months_and_20_years() {
        let p = project(&flat_config(), &flat_days());
        assert_eq!(p.months.len(), PROJECTION_MONTHS);
        assert_eq!(p.years.len(), PROJECTION_YEARS);
        assert_eq!(p.months[0].month_in_year, 1);
        assert_eq!(p.months[239].month_in_year, 12);
        assert_eq!(p.months[239].year, 20);
    }

    #[test]
    fn flat_month_cash_flows() {
        let days = flat_days();
        let day = &days[0];
        assert!((day.self_consumption() - 6.0).abs() < EPS);

        let p = project(&flat_config(), &days);
        let jan = &p.months[0];
        // 31 days: consumption 465, import 279, export 434
        assert!((jan.consumption - 465.0).abs() < EPS);
        assert!((jan.from_grid - 279.0).abs() < EPS);
        assert!((jan.to_grid - 434.0).abs() < EPS);
        assert!((jan.cost_without_solar - (465.0 * 0.30 + 31.0)).abs() < EPS);
        assert!((jan.cost_with_solar - (279.0 * 0.30 + 31.0)).abs() < EPS);
        assert!((jan.revenue_from_grid - 43.4).abs() < EPS);
        assert!((jan.base_savings - (186.0 * 0.30 + 43.4)).abs() < EPS);
    }

    #[test]
    fn lump_sum_battery_cost_hits_month_120_only() {
        let p = project(&flat_config(), &flat_days());
        for m in &p.months {
            let charge = m.base_savings - m.net_savings;
            if m.month == BATTERY_REPLACEMENT_MONTH {
                assert!((charge - 1_200.0).abs() < EPS);
            } else {
                assert!(charge.abs() < EPS, "month {} charged {charge}", m.month);
            }
        }
    }

    #[test]
    fn amortized_battery_cost_spreads_over_first_ten_years() {
        let p = project(&flat_config(), &flat_days());
        for m in &p.months {
            let charge = m.base_savings - m.net_savings_amortized;
            let expected = if m.month <= 120 { 10.0 } else { 0.0 };
            assert!((charge - expected).abs() < EPS);
        }
        let total: f64 = p.years.iter().map(|y| y.battery_amortization).sum();
        assert!((total - 1_200.0).abs() < EPS);
    }

    #[test]
    fn both_conventions_end_at_the_same_total() {
        let p = project(&flat_config(), &flat_days());
        let last = &p.months[PROJECTION_MONTHS - 1];
        assert!((last.cumulative_savings - last.cumulative_savings_amortized).abs() < 1e-6);
    }

    #[test]
    fn year_rollup_matches_months() {
        let p = project(&flat_config(), &flat_days());
        let y3 = &p.years[2];
        let months = &p.months[24..36];
        let sum: f64 = months.iter().map(|m| m.net_savings).sum();
        assert!((y3.net_savings - sum).abs() < EPS);
        assert_eq!(y3.cumulative_savings, months[11].cumulative_savings);
    }

    #[test]
    fn zero_rates_make_discounted_equal_simple() {
        let p = project(&flat_config(), &flat_days());
        for m in &p.months {
            assert!((m.discounted_net_savings - m.net_savings).abs() < EPS);
        }
        assert_eq!(p.payback.simple, p.payback.discounted);
    }

    #[test]
    fn inflation_and_degradation_compound_from_month_one() {
        let config = SystemConfig {
            price_inflation_pct: 3.0,
            panel_degradation_pct: 0.5,
            discount_rate_pct: 5.0,
            ..flat_config()
        };
        let p = project(&config, &flat_days());
        assert!((p.months[0].electricity_price - 0.30).abs() < 1e-12);
        assert!((p.months[12].electricity_price - 0.30 * 1.03).abs() < 1e-9);
        let ratio = p.months[12].generation / p.months[0].generation;
        assert!((ratio - 0.995).abs() < 1e-9);
        // Month 12 is discounted by a full year.
        let m12 = &p.months[11];
        assert!((m12.discounted_net_savings * 1.05 - m12.net_savings).abs() < 1e-9);
    }

    #[test]
    fn payback_brackets_investment() {
        let p = project(&flat_config(), &flat_days());
        let payback = p.payback.simple.expect("flat system should pay back");
        let floor = payback.floor() as usize;
        let ceil = payback.ceil() as usize;
        let cumulative = |k: usize| {
            if k == 0 {
                0.0
            } else {
                p.months[k - 1].cumulative_savings
            }
        };
        assert!(cumulative(floor) < 10_000.0);
        assert!(cumulative(ceil) >= 10_000.0);
    }

    #[test]
    fn unreachable_investment_has_no_payback() {
        let config = SystemConfig {
            investment_cost: 1e9,
            ..flat_config()
        };
        let p = project(&config, &flat_days());
        assert_eq!(p.payback, PaybackMonths::default());
    }

    #[test]
    fn cash_flows_start_with_investment() {
        let p = project(&flat_config(), &flat_days());
        let flows = p.cash_flows(10_000.0, BatteryAccounting::LumpSum);
        assert_eq!(flows.len(), PROJECTION_YEARS + 1);
        assert_eq!(flows[0], -10_000.0);
        assert_eq!(flows[10], p.years[9].net_savings);

        let amortized = p.cash_flows(10_000.0, BatteryAccounting::Amortized);
        assert_eq!(amortized[10], p.years[9].net_savings_amortized);
        assert!(flows[10] < amortized[10]);
    }
}
