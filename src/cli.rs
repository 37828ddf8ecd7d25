//! Command-line arguments.

use std::path::PathBuf;

use clap::{ArgGroup, Parser, ValueEnum};

use solar_roi_sim::sim::types::BatteryAccounting;

#[derive(Debug, Parser)]
#[command(name = "solar-roi-sim")]
#[command(version, about = "Residential solar + battery return-on-investment simulator")]
#[command(
    long_about = "Simulates a year of household solar generation against a regional \
    consumption profile, then projects 20 years of savings, payback periods and IRR.\n\
    \nIf neither --scenario nor --preset is given, the NSW reference household is used.\n\
    \nExamples:\n  \
    solar-roi-sim --preset VIC\n  \
    solar-roi-sim --scenario scenarios/nsw.toml --irr-convention amortized\n  \
    solar-roi-sim --preset QLD --battery-kwh 0 --report-out report.csv"
)]
#[command(group(ArgGroup::new("source").args(["scenario", "preset"])))]
pub struct Cli {
    /// Load the system configuration from a TOML file
    #[arg(long, value_name = "PATH")]
    pub scenario: Option<PathBuf>,

    /// Use the reference household of a region (NSW, VIC, QLD, SA, WA, TAS, NT, ACT)
    #[arg(long, value_name = "REGION")]
    pub preset: Option<String>,

    /// Override the battery capacity (kWh)
    #[arg(long, value_name = "KWH")]
    pub battery_kwh: Option<f64>,

    /// Override the battery-cost convention used for the IRR
    #[arg(long, value_enum, value_name = "CONVENTION")]
    pub irr_convention: Option<IrrConventionArg>,

    /// Print all 240 months instead of the yearly table
    #[arg(long)]
    pub monthly: bool,

    /// Print the full simulation result as JSON
    #[arg(long)]
    pub json: bool,

    /// Write a CSV report to this path
    #[arg(long, value_name = "PATH")]
    pub report_out: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long)]
    pub verbose: bool,

    /// Start the REST API after the simulation
    #[cfg(feature = "api")]
    #[arg(long)]
    pub serve: bool,

    /// API server port
    #[cfg(feature = "api")]
    #[arg(long, default_value_t = 3000, requires = "serve")]
    pub port: u16,
}

/// Command-line spelling of [`BatteryAccounting`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum IrrConventionArg {
    LumpSum,
    Amortized,
}

impl From<IrrConventionArg> for BatteryAccounting {
    fn from(arg: IrrConventionArg) -> Self {
        match arg {
            IrrConventionArg::LumpSum => BatteryAccounting::LumpSum,
            IrrConventionArg::Amortized => BatteryAccounting::Amortized,
        }
    }
}
