//! TOML-based system configuration and regional presets.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::sim::profiles::Region;
use crate::sim::types::BatteryAccounting;

/// Residential PV + battery system and tariff parameters for one simulation.
///
/// Rates are percentages (`3.0` means 3 % per year). Money values share one
/// currency. Load from TOML with [`SystemConfig::from_toml_file`] or start
/// from a regional preset with [`SystemConfig::from_preset`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SystemConfig {
    /// Region key of the consumption profile (e.g. `"NSW"`).
    pub region: String,
    /// Household consumption (kWh per year).
    pub annual_consumption_kwh: f64,
    /// PV array size (kWp).
    pub system_power_kwp: f64,
    /// Expected yield (kWh per kWp per year).
    pub annual_generation_factor: f64,
    /// Explicit first-year generation (kWh); overrides power × factor when > 0.
    #[serde(default)]
    pub annual_generation_kwh: f64,
    /// Usable battery capacity (kWh).
    pub battery_capacity_kwh: f64,
    /// Up-front system cost.
    pub investment_cost: f64,
    /// Grid import price per kWh.
    pub electricity_price: f64,
    /// Export tariff per kWh.
    pub feed_in_tariff: f64,
    /// Annual price inflation (%), applied to price, tariff, and fixed cost.
    #[serde(default)]
    pub price_inflation_pct: f64,
    /// Annual panel output degradation (%).
    #[serde(default)]
    pub panel_degradation_pct: f64,
    /// Daily grid connection charge.
    #[serde(default)]
    pub daily_fixed_cost: f64,
    /// Battery replacement cost, due at the end of year 10.
    #[serde(default)]
    pub battery_replacement_cost: f64,
    /// Annual discount rate (%).
    #[serde(default)]
    pub discount_rate_pct: f64,
    /// Battery-cost convention used for the IRR cash flows.
    #[serde(default)]
    pub irr_convention: BatteryAccounting,
}

/// Configuration error with field path and constraint description.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("config error: {field}: {message}")]
pub struct ConfigError {
    /// Field name (e.g. `"battery_capacity_kwh"`).
    pub field: String,
    /// Human-readable constraint description.
    pub message: String,
}

impl SystemConfig {
    /// Reference household for a region: that region's typical consumption
    /// with an 8 kWp array and a 10 kWh battery.
    pub fn for_region(region: Region) -> Self {
        Self {
            region: region.as_str().to_string(),
            annual_consumption_kwh: region.typical_annual_consumption_kwh(),
            system_power_kwp: 8.0,
            annual_generation_factor: 1526.0,
            annual_generation_kwh: 0.0,
            battery_capacity_kwh: 10.0,
            investment_cost: 15_000.0,
            electricity_price: 0.35,
            feed_in_tariff: 0.08,
            price_inflation_pct: 3.0,
            panel_degradation_pct: 0.5,
            daily_fixed_cost: 1.0,
            battery_replacement_cost: 5_000.0,
            discount_rate_pct: 5.0,
            irr_convention: BatteryAccounting::LumpSum,
        }
    }

    /// Returns the NSW reference household.
    pub fn baseline() -> Self {
        Self::for_region(Region::Nsw)
    }

    /// Loads the reference household of a region by name, ignoring case and
    /// surrounding whitespace. The config always carries the canonical key.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the name is not a known region.
    pub fn from_preset(name: &str) -> Result<Self, ConfigError> {
        let key = name.trim().to_ascii_uppercase();
        let region: Region = key.parse().map_err(|e: ConfigError| ConfigError {
            field: "preset".to_string(),
            message: e.message,
        })?;
        Ok(Self::for_region(region))
    }

    /// Parses a configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the file cannot be read or the TOML is invalid.
    pub fn from_toml_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError {
            field: "scenario".to_string(),
            message: format!("cannot read \"{}\": {e}", path.display()),
        })?;
        Self::from_toml_str(&content)
    }

    /// Parses a configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the TOML is invalid, misses a required
    /// field, or contains unknown fields.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError {
            field: "toml".to_string(),
            message: e.to_string(),
        })
    }

    /// First-year generation: the explicit figure if given, otherwise
    /// system power × yield factor.
    pub fn annual_generation(&self) -> f64 {
        if self.annual_generation_kwh > 0.0 {
            self.annual_generation_kwh
        } else {
            self.system_power_kwp * self.annual_generation_factor
        }
    }

    /// Resolves the region key.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on field `region` if the key is unknown.
    pub fn region(&self) -> Result<Region, ConfigError> {
        self.region.parse()
    }

    fn numeric_fields(&self) -> [(&'static str, f64); 13] {
        [
            ("annual_consumption_kwh", self.annual_consumption_kwh),
            ("system_power_kwp", self.system_power_kwp),
            ("annual_generation_factor", self.annual_generation_factor),
            ("annual_generation_kwh", self.annual_generation_kwh),
            ("battery_capacity_kwh", self.battery_capacity_kwh),
            ("investment_cost", self.investment_cost),
            ("electricity_price", self.electricity_price),
            ("feed_in_tariff", self.feed_in_tariff),
            ("price_inflation_pct", self.price_inflation_pct),
            ("panel_degradation_pct", self.panel_degradation_pct),
            ("daily_fixed_cost", self.daily_fixed_cost),
            ("battery_replacement_cost", self.battery_replacement_cost),
            ("discount_rate_pct", self.discount_rate_pct),
        ]
    }

    /// Validates all fields and returns a list of errors.
    ///
    /// Returns an empty vector if configuration is valid.
    pub fn validate(&self) -> Vec<ConfigError> {
        let mut errors = Vec::new();

        if let Err(e) = self.region() {
            errors.push(e);
        }

        for (field, value) in self.numeric_fields() {
            if !value.is_finite() {
                errors.push(ConfigError {
                    field: field.into(),
                    message: format!("must be finite, got {value}"),
                });
            } else if value < 0.0 {
                errors.push(ConfigError {
                    field: field.into(),
                    message: format!("must be >= 0, got {value}"),
                });
            }
        }

        if self.panel_degradation_pct > 100.0 {
            errors.push(ConfigError {
                field: "panel_degradation_pct".into(),
                message: "must be <= 100".into(),
            });
        }

        errors
    }
}
