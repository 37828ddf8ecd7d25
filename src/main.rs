//! Solar ROI simulator entry point: CLI wiring and config-driven simulation.

mod cli;

use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use solar_roi_sim::config::SystemConfig;
use solar_roi_sim::io::export::export_report;
use solar_roi_sim::sim::engine::{SimulationResult, simulate};
use solar_roi_sim::sim::kpi::KpiReport;
use solar_roi_sim::telemetry::init_tracing;

use cli::Cli;

/// Resolves the configuration: `--scenario`, then `--preset`, then the
/// NSW baseline, with command-line overrides applied on top.
fn load_config(cli: &Cli) -> Result<SystemConfig> {
    let mut config = if let Some(path) = &cli.scenario {
        SystemConfig::from_toml_file(path)
            .with_context(|| format!("failed to load scenario {}", path.display()))?
    } else if let Some(name) = &cli.preset {
        SystemConfig::from_preset(name)?
    } else {
        SystemConfig::baseline()
    };

    if let Some(kwh) = cli.battery_kwh {
        config.battery_capacity_kwh = kwh;
    }
    if let Some(convention) = cli.irr_convention {
        config.irr_convention = convention.into();
    }
    Ok(config)
}

fn print_tables(result: &SimulationResult, monthly: bool) {
    if monthly {
        for m in &result.monthly_projection {
            println!("{m}");
        }
    } else {
        for y in &result.twenty_year_projection {
            println!("{y}");
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let config = load_config(&cli)?;

    let errors = config.validate();
    if !errors.is_empty() {
        for e in &errors {
            eprintln!("{e}");
        }
        process::exit(1);
    }

    let result = simulate(&config)?;
    let kpi = KpiReport::from_result(&result);

    if cli.json {
        let json = serde_json::to_string_pretty(&result)
            .context("failed to serialise simulation result")?;
        println!("{json}");
    } else {
        print_tables(&result, cli.monthly);
        println!("\n{kpi}");
    }

    if let Some(path) = &cli.report_out {
        export_report(&config, &result, path)
            .with_context(|| format!("failed to write report {}", path.display()))?;
        info!(path = %path.display(), "report written");
    }

    #[cfg(feature = "api")]
    if cli.serve {
        use std::net::SocketAddr;
        use std::sync::Arc;

        let state = Arc::new(solar_roi_sim::api::AppState {
            config,
            kpi,
            result,
        });
        let addr = SocketAddr::from(([0, 0, 0, 0], cli.port));
        let rt = tokio::runtime::Runtime::new().context("failed to create tokio runtime")?;
        rt.block_on(solar_roi_sim::api::serve(state, addr))
            .with_context(|| format!("API server on {addr} failed"))?;
    }

    Ok(())
}
