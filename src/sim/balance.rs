//! Hour-by-hour energy balance of one representative day.

use serde::Serialize;

use super::profiles::HOURS_PER_DAY;

/// Energy flows of one hour of the representative day (kWh).
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HourlyRecord {
    /// Hour of day, 0..=23.
    pub hour: usize,
    pub generation: f64,
    pub consumption: f64,
    /// `min(generation, consumption)`.
    pub direct_self_consumption: f64,
    /// Surplus available to charge the battery, `max(generation - consumption, 0)`.
    #[serde(rename = "toBattery")]
    pub battery_charge_potential: f64,
    /// Shortfall drawn from the grid, `max(consumption - generation, 0)`.
    #[serde(rename = "fromGrid")]
    pub grid_import: f64,
}

/// Totals of one representative day plus its hourly breakdown.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySummary {
    pub hourly: Vec<HourlyRecord>,
    pub total_generation: f64,
    pub total_consumption: f64,
    pub total_direct_self_consumption: f64,
    pub total_to_battery_potential: f64,
    /// Consumption not covered directly by PV.
    pub non_generation_consumption: f64,
    /// Energy stored and discharged the same day, never above capacity,
    /// surplus, or non-generation consumption.
    pub final_effective_charge: f64,
}

impl DaySummary {
    /// Solar energy used on site: direct plus discharged from the battery.
    pub fn self_consumption(&self) -> f64 {
        self.total_direct_self_consumption + self.final_effective_charge
    }
}

/// Balances generation against consumption for a single day.
///
/// Holds the shape vectors and battery size for one run so the aggregator
/// can balance every month and the average day with the same parameters.
#[derive(Debug, Clone)]
pub struct DailyBalancer {
    generation_shape: [f64; HOURS_PER_DAY],
    consumption_shares: [f64; HOURS_PER_DAY],
    battery_capacity_kwh: f64,
}

impl DailyBalancer {
    /// Creates a balancer.
    ///
    /// # Arguments
    ///
    /// * `generation_shape` - Fraction of the day's generation in each hour
    /// * `consumption_shares` - Fraction of the day's consumption in each hour
    ///   (already divided by 100)
    /// * `battery_capacity_kwh` - Usable battery capacity
    pub fn new(
        generation_shape: [f64; HOURS_PER_DAY],
        consumption_shares: [f64; HOURS_PER_DAY],
        battery_capacity_kwh: f64,
    ) -> Self {
        Self {
            generation_shape,
            consumption_shares,
            battery_capacity_kwh,
        }
    }

    /// Balances one day with the given daily totals (kWh).
    ///
    /// Day totals are accumulated from the hourly records. The battery is
    /// assumed to fully discharge within the same day, so no charge carries
    /// over to the next one.
    pub fn balance(&self, daily_generation: f64, daily_consumption: f64) -> DaySummary {
        let mut day = self.hourly_pass(daily_generation, daily_consumption);
        self.settle(&mut day);
        day
    }

    /// Balances one day but reports the given totals instead of the hourly sums.
    ///
    /// Non-generation consumption and the effective charge are derived from
    /// the reported totals, so `non_generation_consumption` always equals
    /// `total_consumption - total_direct_self_consumption`.
    pub fn balance_with_totals(
        &self,
        daily_generation: f64,
        daily_consumption: f64,
    ) -> DaySummary {
        let mut day = self.hourly_pass(daily_generation, daily_consumption);
        day.total_generation = daily_generation;
        day.total_consumption = daily_consumption;
        self.settle(&mut day);
        day
    }

    fn hourly_pass(&self, daily_generation: f64, daily_consumption: f64) -> DaySummary {
        let mut day = DaySummary {
            hourly: Vec::with_capacity(HOURS_PER_DAY),
            total_generation: 0.0,
            total_consumption: 0.0,
            total_direct_self_consumption: 0.0,
            total_to_battery_potential: 0.0,
            non_generation_consumption: 0.0,
            final_effective_charge: 0.0,
        };

        for hour in 0..HOURS_PER_DAY {
            let generation = daily_generation * self.generation_shape[hour];
            let consumption = daily_consumption * self.consumption_shares[hour];
            let record = HourlyRecord {
                hour,
                generation,
                consumption,
                direct_self_consumption: generation.min(consumption),
                battery_charge_potential: (generation - consumption).max(0.0),
                grid_import: (consumption - generation).max(0.0),
            };

            day.total_generation += record.generation;
            day.total_consumption += record.consumption;
            day.total_direct_self_consumption += record.direct_self_consumption;
            day.total_to_battery_potential += record.battery_charge_potential;
            day.hourly.push(record);
        }
        day
    }

    fn settle(&self, day: &mut DaySummary) {
        day.non_generation_consumption = day.total_consumption - day.total_direct_self_consumption;
        day.final_effective_charge = effective_charge(
            day.total_to_battery_potential,
            self.battery_capacity_kwh,
            day.non_generation_consumption,
        );
    }
}

/// Three-way clamp on stored energy: surplus, capacity, and what the
/// household can draw back outside generation hours.
pub fn effective_charge(
    charge_potential: f64,
    battery_capacity_kwh: f64,
    non_generation_consumption: f64,
) -> f64 {
    charge_potential
        .min(battery_capacity_kwh)
        .min(non_generation_consumption)
}
