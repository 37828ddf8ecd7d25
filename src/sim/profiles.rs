//! Static regional consumption profiles and the shared generation shape.
//!
//! Consumption shares are region dependent; the generation shape and the
//! monthly generation split are shared by all regions. All percentage tables
//! are expressed as percent of the period (year or day) and sum to ~100.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::config::ConfigError;

/// Hours in the representative day.
pub const HOURS_PER_DAY: usize = 24;

/// Calendar months per year.
pub const MONTHS_PER_YEAR: usize = 12;

/// Days in the modelled (non-leap) year.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Days per calendar month, February fixed at 28.
pub const DAYS_IN_MONTH: [u32; MONTHS_PER_YEAR] = [31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31];

/// Hourly PV output as a fraction of the day's production.
///
/// Kept as published (sums to 0.97); use [`hourly_generation_fractions`] for
/// energy balancing.
pub const HOURLY_GENERATION_FACTORS: [f64; HOURS_PER_DAY] = [
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.01, 0.05, 0.1, 0.12, 0.13, 0.14, 0.14, 0.12, 0.1, 0.05, 0.01,
    0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0,
];

/// Share of annual PV production per month (percent).
pub const MONTHLY_GENERATION_PERCENTAGES: [f64; MONTHS_PER_YEAR] =
    [10.0, 9.0, 9.0, 8.0, 7.0, 6.0, 7.0, 8.0, 9.0, 9.0, 9.0, 9.0];

const DEFAULT_MONTHLY_CONSUMPTION: [f64; MONTHS_PER_YEAR] = [
    8.55, 7.78, 7.51, 7.14, 8.47, 10.55, 10.67, 9.45, 7.36, 7.21, 7.30, 8.03,
];

const QLD_MONTHLY_CONSUMPTION: [f64; MONTHS_PER_YEAR] = [
    9.27, 9.22, 8.69, 8.14, 7.90, 8.23, 8.19, 7.93, 7.60, 7.67, 8.19, 8.96,
];

const TAS_VIC_HOURLY: [f64; HOURS_PER_DAY] = [
    3.941, 3.941, 3.941, 3.941, 3.941, 3.941, 3.941, 3.941, 3.941, 3.941, 3.941, 3.941, 3.941,
    3.941, 3.941, 4.714, 4.714, 4.714, 4.714, 4.714, 4.714, 4.714, 3.941, 3.941,
];

const NT_QLD_WA_HOURLY: [f64; HOURS_PER_DAY] = [
    2.990, 2.638, 2.405, 2.319, 2.396, 2.745, 3.486, 4.163, 4.270, 4.255, 4.252, 4.348, 4.421,
    4.440, 4.486, 4.667, 5.074, 5.727, 6.229, 5.996, 5.621, 4.970, 4.421, 3.679,
];

const ACT_HOURLY: [f64; HOURS_PER_DAY] = [
    3.400, 3.031, 2.876, 2.867, 3.055, 3.643, 4.493, 4.904, 4.317, 3.792, 3.615, 3.118, 3.053,
    2.937, 3.003, 3.369, 4.434, 5.901, 6.693, 6.550, 6.142, 5.416, 5.178, 4.208,
];

const SA_HOURLY: [f64; HOURS_PER_DAY] = [
    4.850, 5.185, 3.814, 2.956, 2.568, 2.654, 3.142, 3.655, 3.563, 3.624, 4.103, 4.366, 4.188,
    3.980, 3.997, 4.111, 4.525, 5.442, 5.990, 5.715, 5.315, 4.739, 3.905, 3.607,
];

const NSW_HOURLY: [f64; HOURS_PER_DAY] = [
    4.427, 3.912, 3.176, 2.706, 2.583, 2.805, 3.427, 3.939, 4.089, 4.050, 3.986, 3.936, 3.948,
    3.908, 3.920, 4.105, 4.569, 5.328, 5.846, 5.634, 5.329, 4.947, 4.804, 4.630,
];

/// Generation shape normalised so that the 24 fractions sum to exactly 1.
pub fn hourly_generation_fractions() -> [f64; HOURS_PER_DAY] {
    let total: f64 = HOURLY_GENERATION_FACTORS.iter().sum();
    HOURLY_GENERATION_FACTORS.map(|f| f / total)
}

/// Australian state or territory with a published consumption profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Region {
    Nsw,
    Vic,
    Qld,
    Sa,
    Wa,
    Tas,
    Nt,
    Act,
}

impl Region {
    /// Every region with a profile, in display order.
    pub const ALL: [Region; 8] = [
        Region::Nsw,
        Region::Vic,
        Region::Qld,
        Region::Sa,
        Region::Wa,
        Region::Tas,
        Region::Nt,
        Region::Act,
    ];

    /// Region key as used in configuration files.
    pub fn as_str(self) -> &'static str {
        match self {
            Region::Nsw => "NSW",
            Region::Vic => "VIC",
            Region::Qld => "QLD",
            Region::Sa => "SA",
            Region::Wa => "WA",
            Region::Tas => "TAS",
            Region::Nt => "NT",
            Region::Act => "ACT",
        }
    }

    /// Typical household consumption for the region (kWh per year).
    pub fn typical_annual_consumption_kwh(self) -> f64 {
        match self {
            Region::Tas => 8619.0,
            Region::Nt => 8500.0,
            Region::Act => 6407.0,
            Region::Sa => 4950.0,
            Region::Nsw => 5662.0,
            Region::Qld => 5650.0,
            Region::Wa => 5198.0,
            Region::Vic => 4615.0,
        }
    }

    /// Monthly share of annual consumption (percent).
    pub fn monthly_consumption_percentages(self) -> &'static [f64; MONTHS_PER_YEAR] {
        match self {
            Region::Qld => &QLD_MONTHLY_CONSUMPTION,
            _ => &DEFAULT_MONTHLY_CONSUMPTION,
        }
    }

    /// Hourly share of daily consumption (percent).
    pub fn hourly_consumption_percentages(self) -> &'static [f64; HOURS_PER_DAY] {
        match self {
            Region::Tas | Region::Vic => &TAS_VIC_HOURLY,
            Region::Nt | Region::Qld | Region::Wa => &NT_QLD_WA_HOURLY,
            Region::Act => &ACT_HOURLY,
            Region::Sa => &SA_HOURLY,
            Region::Nsw => &NSW_HOURLY,
        }
    }
}

impl fmt::Display for Region {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Region {
    type Err = ConfigError;

    /// Resolves an exact region key such as `"NSW"`.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` on field `region` for keys with no profile.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Region::ALL
            .into_iter()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| ConfigError {
                field: "region".to_string(),
                message: format!(
                    "unknown region \"{s}\", available: {}",
                    Region::ALL.map(Region::as_str).join(", ")
                ),
            })
    }
}

/// Consumption profile of one region, resolved once per simulation run.
#[derive(Debug, Clone, PartialEq)]
pub struct RegionProfile {
    pub region: Region,
    /// Percent of annual consumption per month.
    pub monthly_consumption_percentages: [f64; MONTHS_PER_YEAR],
    /// Percent of daily consumption per hour.
    pub hourly_consumption_percentages: [f64; HOURS_PER_DAY],
}

impl RegionProfile {
    /// Looks up the profile for a region key.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` if the key is not a known region; there is no
    /// fallback profile.
    pub fn lookup(key: &str) -> Result<Self, ConfigError> {
        let region: Region = key.parse()?;
        Ok(Self::for_region(region))
    }

    pub fn for_region(region: Region) -> Self {
        Self {
            region,
            monthly_consumption_percentages: *region.monthly_consumption_percentages(),
            hourly_consumption_percentages: *region.hourly_consumption_percentages(),
        }
    }

    /// Hourly consumption shares as fractions of the day (percent / 100).
    pub fn hourly_consumption_fractions(&self) -> [f64; HOURS_PER_DAY] {
        self.hourly_consumption_percentages.map(|p| p / 100.0)
    }
}
