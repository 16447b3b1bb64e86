use miette::IntoDiagnostic;
use tracing::info;

use quorate_prob::{find_minimum_quorum, liveness_probability, SearchOutcome};

use super::helpers::{
    days_until, format_number, format_scientific, percent_to_fraction, print_chosen_parameters,
    print_json, scenario_from_cli, years_until,
};
use crate::{Cli, NetworkSummary, OutputFormat, QuorumReport};

/// Handler for the `quorum` subcommand.
///
/// Finds the lowest quorum percentage, starting at `low`, whose safety
/// failure probability is at most `epsilon`.
pub(crate) fn run_quorum_command(
    cli: &Cli,
    format: OutputFormat,
    endorsers: u64,
    epsilon: f64,
    low: u32,
) -> miette::Result<()> {
    let params = scenario_from_cli(cli, endorsers, low.min(100))?;
    info!(%params, epsilon, low, "searching for minimum quorum");

    let outcome =
        find_minimum_quorum(&params, percent_to_fraction(low), epsilon).into_diagnostic()?;
    let liveness = match outcome.threshold() {
        Some(percent) => {
            let at = params
                .with_quorum(percent_to_fraction(percent))
                .into_diagnostic()?;
            Some(liveness_probability(&at))
        }
        None => None,
    };

    let report = QuorumReport {
        summary: NetworkSummary::new(&params, cli.block_time),
        endorsers,
        epsilon,
        start_percent: low,
        outcome,
        liveness,
    };

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print_chosen_parameters(&params, cli.block_time);
            render_quorum_text(&report);
            Ok(())
        }
    }
}

fn render_quorum_text(report: &QuorumReport) {
    let block_time = report.summary.block_time_secs;
    println!("Calculation specific parameters:");
    println!("=> Endorser set size: {}", report.endorsers);
    println!("=> Failure probability: {}", format_scientific(report.epsilon));
    println!("=> Low Quorum percentage: {}%", report.start_percent);
    println!();

    match (report.outcome, report.liveness) {
        (
            SearchOutcome::Found {
                threshold,
                probability,
            },
            Some(liveness),
        ) => {
            println!(
                "Quorum percentage {}%: p(safety) = {} ({:3.0}%) ({} years), p(liveness)= {} ({:3.0}%) ({} days)",
                threshold,
                format_scientific(probability),
                probability * 100.0,
                format_number(years_until(block_time, probability)),
                format_scientific(liveness),
                liveness * 100.0,
                format_number(days_until(block_time, liveness)),
            );
        }
        _ => {
            println!(
                "No quorum between {}% and 100% achieves p(safety) <= {}",
                report.start_percent,
                format_scientific(report.epsilon)
            );
        }
    }
}
