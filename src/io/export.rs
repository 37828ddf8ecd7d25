//! CSV report of a simulation run.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use crate::config::SystemConfig;
use crate::sim::engine::SimulationResult;
use crate::sim::kpi::KpiReport;

/// Section titles, in output order.
pub const SECTIONS: [&str; 5] = [
    "Input parameters",
    "Key indicators",
    "20-year projection",
    "Monthly average day",
    "Hourly flow (average day)",
];

const PROJECTION_HEADER: [&str; 17] = [
    "year",
    "generation_kwh",
    "self_consumption_kwh",
    "to_grid_kwh",
    "from_grid_kwh",
    "cost_without_solar",
    "cost_with_solar",
    "revenue_from_grid",
    "battery_amortization",
    "net_savings",
    "net_savings_amortized",
    "discounted_net_savings",
    "discounted_net_savings_amortized",
    "cumulative_savings",
    "cumulative_savings_amortized",
    "cumulative_discounted_savings",
    "cumulative_discounted_savings_amortized",
];

const MONTHLY_HEADER: [&str; 7] = [
    "month",
    "generation_kwh",
    "consumption_kwh",
    "direct_self_consumption_kwh",
    "to_battery_potential_kwh",
    "effective_charge_kwh",
    "non_generation_consumption_kwh",
];

const HOURLY_HEADER: [&str; 6] = [
    "hour",
    "generation_kwh",
    "consumption_kwh",
    "direct_self_consumption_kwh",
    "to_battery_kwh",
    "from_grid_kwh",
];

fn num(value: f64) -> String {
    if value.is_finite() {
        format!("{value:.2}")
    } else {
        "N/A".to_string()
    }
}

fn opt(value: Option<f64>) -> String {
    value.map_or_else(|| "N/A".to_string(), num)
}

/// Exports the report to a CSV file at the given path.
///
/// # Errors
///
/// Returns an `io::Error` if file creation or writing fails.
pub fn export_report(
    config: &SystemConfig,
    result: &SimulationResult,
    path: &Path,
) -> io::Result<()> {
    let file = File::create(path)?;
    let buf = io::BufWriter::new(file);
    write_report(config, result, buf)
}

/// Writes the report as CSV to any writer.
///
/// Five titled sections separated by blank rows; rows have differing field
/// counts. Missing figures are written as `N/A`. Identical inputs produce
/// identical bytes.
///
/// # Errors
///
/// Returns an `io::Error` if writing fails.
pub fn write_report(
    config: &SystemConfig,
    result: &SimulationResult,
    writer: impl Write,
) -> io::Result<()> {
    let mut wtr = csv::WriterBuilder::new()
        .flexible(true)
        .from_writer(writer);
    let blank: [&str; 0] = [];

    wtr.write_record([SECTIONS[0]])?;
    wtr.write_record(["parameter", "value", "unit"])?;
    let inputs: [(&str, String, &str); 15] = [
        ("region", config.region.clone(), ""),
        ("annual_consumption", num(config.annual_consumption_kwh), "kWh"),
        ("system_power", num(config.system_power_kwp), "kWp"),
        ("annual_generation_factor", num(config.annual_generation_factor), "kWh/kWp"),
        ("annual_generation", num(config.annual_generation()), "kWh"),
        ("battery_capacity", num(config.battery_capacity_kwh), "kWh"),
        ("investment_cost", num(config.investment_cost), "$"),
        ("electricity_price", num(config.electricity_price), "$/kWh"),
        ("feed_in_tariff", num(config.feed_in_tariff), "$/kWh"),
        ("price_inflation", num(config.price_inflation_pct), "%/year"),
        ("panel_degradation", num(config.panel_degradation_pct), "%/year"),
        ("daily_fixed_cost", num(config.daily_fixed_cost), "$/day"),
        ("battery_replacement_cost", num(config.battery_replacement_cost), "$"),
        ("discount_rate", num(config.discount_rate_pct), "%/year"),
        ("irr_convention", config.irr_convention.to_string(), ""),
    ];
    for (name, value, unit) in &inputs {
        wtr.write_record([*name, value.as_str(), *unit])?;
    }
    wtr.write_record(blank)?;

    let kpi = KpiReport::from_result(result);
    wtr.write_record([SECTIONS[1]])?;
    wtr.write_record(["indicator", "value", "unit"])?;
    let indicators: [(&str, String, &str); 12] = [
        ("self_consumption_rate", num(kpi.self_consumption_pct), "%"),
        ("annual_generation", num(kpi.annual_generation_kwh), "kWh"),
        ("annual_self_consumption", num(kpi.annual_self_consumption_kwh), "kWh"),
        ("annual_export", num(kpi.annual_export_kwh), "kWh"),
        ("annual_import", num(kpi.annual_import_kwh), "kWh"),
        ("payback_simple", opt(kpi.payback_years), "years"),
        ("payback_simple_amortized", opt(kpi.payback_years_amortized), "years"),
        ("payback_discounted", opt(kpi.discounted_payback_years), "years"),
        (
            "payback_discounted_amortized",
            opt(kpi.discounted_payback_years_amortized),
            "years",
        ),
        ("irr", opt(kpi.irr_pct), "%"),
        ("cumulative_savings_20y", num(kpi.cumulative_savings), "$"),
        (
            "cumulative_savings_20y_amortized",
            num(kpi.cumulative_savings_amortized),
            "$",
        ),
    ];
    for (name, value, unit) in &indicators {
        wtr.write_record([*name, value.as_str(), *unit])?;
    }
    wtr.write_record(blank)?;

    wtr.write_record([SECTIONS[2]])?;
    wtr.write_record(PROJECTION_HEADER)?;
    for y in &result.twenty_year_projection {
        wtr.write_record(&[
            y.year.to_string(),
            num(y.generation),
            num(y.self_consumption),
            num(y.to_grid),
            num(y.from_grid),
            num(y.cost_without_solar),
            num(y.cost_with_solar),
            num(y.revenue_from_grid),
            num(y.battery_amortization),
            num(y.net_savings),
            num(y.net_savings_amortized),
            num(y.discounted_net_savings),
            num(y.discounted_net_savings_amortized),
            num(y.cumulative_savings),
            num(y.cumulative_savings_amortized),
            num(y.cumulative_discounted_savings),
            num(y.cumulative_discounted_savings_amortized),
        ])?;
    }
    wtr.write_record(blank)?;

    wtr.write_record([SECTIONS[3]])?;
    wtr.write_record(MONTHLY_HEADER)?;
    for (i, day) in result.monthly_day_base_data.iter().enumerate() {
        wtr.write_record(&[
            (i + 1).to_string(),
            num(day.total_generation),
            num(day.total_consumption),
            num(day.total_direct_self_consumption),
            num(day.total_to_battery_potential),
            num(day.final_effective_charge),
            num(day.non_generation_consumption),
        ])?;
    }
    wtr.write_record(blank)?;

    wtr.write_record([SECTIONS[4]])?;
    wtr.write_record(HOURLY_HEADER)?;
    for h in &result.day_base_data.hourly {
        wtr.write_record(&[
            format!("{}:00", h.hour),
            num(h.generation),
            num(h.consumption),
            num(h.direct_self_consumption),
            num(h.battery_charge_potential),
            num(h.grid_import),
        ])?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::engine::simulate;

    fn render(config: &SystemConfig) -> String {
        let result = simulate(config).unwrap();
        let mut buf = Vec::new();
        write_report(config, &result, &mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    fn section_rows<'a>(text: &'a str, title: &str) -> Vec<&'a str> {
        text.lines()
            .skip_while(|l| *l != title)
            .skip(2)
            .take_while(|l| !SECTIONS.contains(l))
            .filter(|l| l.chars().any(char::is_alphanumeric))
            .collect()
    }

    #[test]
    fn all_sections_in_order() {
        let text = render(&SystemConfig::baseline());
        let positions: Vec<usize> = SECTIONS
            .iter()
            .map(|s| text.find(&format!("\n{s}")).unwrap_or(0))
            .collect();
        assert!(text.starts_with(SECTIONS[0]));
        assert!(positions[1..].iter().all(|&p| p > 0));
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn section_row_counts() {
        let text = render(&SystemConfig::baseline());
        assert_eq!(section_rows(&text, SECTIONS[0]).len(), 15);
        assert_eq!(section_rows(&text, SECTIONS[1]).len(), 12);
        assert_eq!(section_rows(&text, SECTIONS[2]).len(), 20);
        assert_eq!(section_rows(&text, SECTIONS[3]).len(), 12);
        assert_eq!(section_rows(&text, SECTIONS[4]).len(), 24);
    }

    #[test]
    fn projection_rows_parse_as_numbers() {
        let text = render(&SystemConfig::baseline());
        for row in section_rows(&text, SECTIONS[2]) {
            let fields: Vec<&str> = row.split(',').collect();
            assert_eq!(fields.len(), PROJECTION_HEADER.len());
            for field in &fields[1..] {
                assert!(field.parse::<f64>().is_ok(), "not numeric: {field}");
            }
        }
    }

    #[test]
    fn both_battery_conventions_exported() {
        let cfg = SystemConfig::baseline();
        let result = simulate(&cfg).unwrap();
        let text = render(&cfg);

        let last = result.twenty_year_projection.last().unwrap();
        let expected = format!(
            "cumulative_savings_20y_amortized,{},$",
            num(last.cumulative_savings_amortized)
        );
        assert!(text.contains(&expected), "{expected}");

        let header = text
            .lines()
            .find(|l| l.starts_with("year,"))
            .unwrap();
        let columns: Vec<&str> = header.split(',').collect();
        let col = |name: &str| columns.iter().position(|c| *c == name).unwrap();

        // Year 10 carries the lump-sum replacement; amortized spreads it.
        let row: Vec<&str> = section_rows(&text, SECTIONS[2])[9].split(',').collect();
        let year_10 = &result.twenty_year_projection[9];
        assert_eq!(
            row[col("cumulative_savings_amortized")],
            num(year_10.cumulative_savings_amortized)
        );
        assert_eq!(
            row[col("cumulative_discounted_savings_amortized")],
            num(year_10.cumulative_discounted_savings_amortized)
        );
        assert_eq!(
            row[col("discounted_net_savings_amortized")],
            num(year_10.discounted_net_savings_amortized)
        );
        assert_eq!(row[col("battery_amortization")], num(year_10.battery_amortization));
    }

    #[test]
    fn missing_figures_written_as_na() {
        let cfg = SystemConfig {
            system_power_kwp: 0.0,
            ..SystemConfig::baseline()
        };
        let text = render(&cfg);
        assert!(text.contains("payback_simple,N/A,years"));
        assert!(text.contains("irr,N/A,%"));
        assert!(text.contains("self_consumption_rate,N/A,%"));
    }

    #[test]
    fn deterministic_output() {
        let cfg = SystemConfig::baseline();
        assert_eq!(render(&cfg), render(&cfg));
    }

    #[test]
    fn hour_labels() {
        let text = render(&SystemConfig::baseline());
        let rows = section_rows(&text, SECTIONS[4]);
        assert!(rows[0].starts_with("0:00,"));
        assert!(rows[23].starts_with("23:00,"));
    }
}
