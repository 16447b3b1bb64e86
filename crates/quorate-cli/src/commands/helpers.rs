// Shared helper functions used across CLI command handlers.
//
// These parse CLI string arguments, build the base scenario, and render
// probabilities as expected waiting times.

use miette::IntoDiagnostic;
use serde::Serialize;

use quorate_prob::ParameterSet;

use crate::{Cli, OutputFormat};

pub(crate) const SECONDS_PER_YEAR: f64 = 31_536_000.0;
pub(crate) const SECONDS_PER_DAY: f64 = 86_400.0;

const THOUSAND: f64 = 1e3;
const MILLION: f64 = 1e6;
const BILLION: f64 = 1e9;
const TRILLION: f64 = 1e12;

pub(crate) fn parse_output_format(raw: &str) -> miette::Result<OutputFormat> {
    match raw {
        "text" => Ok(OutputFormat::Text),
        "json" => Ok(OutputFormat::Json),
        other => Err(miette::miette!(
            "Unknown output format: {other}. Use 'text' or 'json'."
        )),
    }
}

/// Scenario described by the global network options.
pub(crate) fn scenario_from_cli(
    cli: &Cli,
    endorsers: u64,
    quorum_percent: u32,
) -> miette::Result<ParameterSet> {
    ParameterSet::from_honest_percent(
        cli.network,
        cli.honest_percent,
        endorsers,
        percent_to_fraction(quorum_percent),
    )
    .into_diagnostic()
}

pub(crate) fn percent_to_fraction(percent: u32) -> f64 {
    f64::from(percent) / 100.0
}

/// Expected years until an event with per-block probability `probability`.
pub(crate) fn years_until(block_time_secs: u64, probability: f64) -> f64 {
    block_time_secs as f64 / (SECONDS_PER_YEAR * probability)
}

/// Expected days until an event with per-block probability `probability`.
pub(crate) fn days_until(block_time_secs: u64, probability: f64) -> f64 {
    block_time_secs as f64 / (SECONDS_PER_DAY * probability)
}

/// Abbreviate a non-negative quantity with K/M/B/T suffixes, four columns wide.
pub(crate) fn format_number(value: f64) -> String {
    let value = (value * 10_000.0).round() / 10_000.0;
    if value >= TRILLION {
        if value / TRILLION < 10.0 {
            format!("{:4.0}T", value / TRILLION)
        } else {
            "> 10T".to_string()
        }
    } else if value >= BILLION {
        format!("{:4.0}B", value / BILLION)
    } else if value >= MILLION {
        format!("{:4.0}M", value / MILLION)
    } else if value >= THOUSAND {
        format!("{:4.0}K", value / THOUSAND)
    } else if value < 1.0 {
        "< 01".to_string()
    } else {
        format!("{value:4.0}")
    }
}

/// Scientific notation with six fraction digits and an exponent of at least
/// two digits, e.g. `1.500000e-05`.
pub(crate) fn format_scientific(value: f64) -> String {
    let rendered = format!("{value:.6e}");
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => rendered,
    }
}

pub(crate) fn print_json<T: Serialize>(report: &T) -> miette::Result<()> {
    let rendered = serde_json::to_string_pretty(report).into_diagnostic()?;
    println!("{rendered}");
    Ok(())
}

pub(crate) fn print_chosen_parameters(params: &ParameterSet, block_time_secs: u64) {
    println!("Chosen parameters:");
    println!("=> Total Nodes: {}", params.network());
    println!("=> # Good Nodes: {}", params.honest());
    println!("=> # Bad Nodes: {}", params.faulty());
    println!("=> Block time: {block_time_secs} seconds");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_number_suffixes() {
        assert_eq!(format_number(0.5), "< 01");
        assert_eq!(format_number(7.0), "   7");
        assert_eq!(format_number(999.0), " 999");
        assert_eq!(format_number(1_500.0), "   2K");
        assert_eq!(format_number(42_000_000.0), "  42M");
        assert_eq!(format_number(3e9), "   3B");
        assert_eq!(format_number(5e12), "   5T");
        assert_eq!(format_number(1e13), "> 10T");
    }

    #[test]
    fn format_number_rounds_to_four_decimals_first() {
        // 0.99996 rounds to 1.0 before the "< 01" check.
        assert_eq!(format_number(0.99996), "   1");
        assert_eq!(format_number(0.99994), "< 01");
    }

    #[test]
    fn format_number_infinite_duration() {
        assert_eq!(format_number(f64::INFINITY), "> 10T");
        assert_eq!(format_number(years_until(1, 0.0)), "> 10T");
    }

    #[test]
    fn scientific_exponent_is_padded() {
        assert_eq!(format_scientific(1.5e-5), "1.500000e-05");
        assert_eq!(format_scientific(1e-14), "1.000000e-14");
        assert_eq!(format_scientific(2.5e-300), "2.500000e-300");
        assert_eq!(format_scientific(0.25), "2.500000e-01");
        assert_eq!(format_scientific(1.0), "1.000000e+00");
        assert_eq!(format_scientific(0.0), "0.000000e+00");
        assert_eq!(format_scientific(12345.0), "1.234500e+04");
        assert_eq!(format_scientific(f64::INFINITY), "inf");
    }

    #[test]
    fn waiting_times() {
        assert!((years_until(1, 1.0 / SECONDS_PER_YEAR) - 1.0).abs() < 1e-12);
        assert_eq!(days_until(2, 1.0), 2.0 / SECONDS_PER_DAY);
        assert!(days_until(1, 0.0).is_infinite());
    }

    #[test]
    fn output_format_parsing() {
        assert_eq!(parse_output_format("text").unwrap(), OutputFormat::Text);
        assert_eq!(parse_output_format("json").unwrap(), OutputFormat::Json);
        assert!(parse_output_format("yaml").is_err());
    }

    #[test]
    fn percent_conversion() {
        assert_eq!(percent_to_fraction(80), 0.8);
        assert_eq!(percent_to_fraction(0), 0.0);
        assert_eq!(percent_to_fraction(100), 1.0);
    }
}
