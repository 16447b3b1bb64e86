use miette::IntoDiagnostic;
use tracing::info;

use quorate_prob::{sweep_quorums, sweep_quorums_biased};

use super::helpers::{
    days_until, format_number, format_scientific, print_chosen_parameters, print_json,
    scenario_from_cli, years_until,
};
use crate::{Cli, NetworkSummary, OutputFormat, SweepReport, SweepRow};

/// Handler for the `sweep` subcommand.
///
/// Tabulates safety and liveness failure probabilities for every quorum
/// percentage in `[low, high]`, optionally amplified for biasable randomness.
pub(crate) fn run_sweep_command(
    cli: &Cli,
    format: OutputFormat,
    endorsers: u64,
    low: u32,
    high: u32,
    bits: Option<u32>,
) -> miette::Result<()> {
    let params = scenario_from_cli(cli, endorsers, low.min(100))?;
    info!(%params, low, high, ?bits, "sweeping quorum range");

    let rows = match bits {
        Some(bits) => sweep_quorums_biased(&params, low, high, bits),
        None => sweep_quorums(&params, low, high),
    }
    .into_diagnostic()?;

    let report = SweepReport {
        summary: NetworkSummary::new(&params, cli.block_time),
        endorsers,
        low_percent: low,
        high_percent: high,
        bits,
        rows: rows
            .into_iter()
            .map(|row| SweepRow {
                quorum_percent: row.quorum_percent,
                safety: row.safety,
                liveness: row.liveness,
                safety_years: years_until(cli.block_time, row.safety),
                liveness_days: days_until(cli.block_time, row.liveness),
            })
            .collect(),
    };

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print_chosen_parameters(&params, cli.block_time);
            render_sweep_text(&report);
            Ok(())
        }
    }
}

fn render_sweep_text(report: &SweepReport) {
    println!("Calculation specific parameters:");
    println!(
        "=> Quorum percentage: {}% - {}%",
        report.low_percent, report.high_percent
    );
    println!("=> Endorser set size: {}", report.endorsers);
    if let Some(bits) = report.bits {
        println!("=> Number of biasable bits of randomness: {bits}");
    }
    println!();

    for row in &report.rows {
        print!(
            "Quorum percentage {}%: p(safety) = {} ({:3.0}%) ({} years),\t p(liveness)= {} ({:3.0}%) ({} days)",
            row.quorum_percent,
            format_scientific(row.safety),
            row.safety * 100.0,
            format_number(row.safety_years),
            format_scientific(row.liveness),
            row.liveness * 100.0,
            format_number(row.liveness_days),
        );
        if report.bits.is_none() {
            print!(
                ",\t finality = {:.2} seconds",
                report.summary.block_time_secs as f64
            );
        }
        println!();
    }
}
