use miette::IntoDiagnostic;
use tracing::info;

use quorate_prob::{find_minimum_endorsers, liveness_probability, SearchOutcome};

use super::helpers::{
    days_until, format_number, format_scientific, print_chosen_parameters, print_json,
    scenario_from_cli, years_until,
};
use crate::{Cli, EndorsersReport, NetworkSummary, OutputFormat};

/// Handler for the `endorsers` subcommand.
///
/// Finds the smallest endorser set size in `low, low + step, ...` whose
/// safety failure probability at the given quorum is at most `epsilon`.
pub(crate) fn run_endorsers_command(
    cli: &Cli,
    format: OutputFormat,
    epsilon: f64,
    quorum: u32,
    low: u64,
    step: u64,
) -> miette::Result<()> {
    let params = scenario_from_cli(cli, 0, quorum)?;
    info!(%params, epsilon, low, step, "searching for minimum endorser set size");

    let outcome = find_minimum_endorsers(&params, low, step, epsilon).into_diagnostic()?;
    // Without a qualifying size, liveness is reported for the whole network.
    let (endorsers, _) = outcome.reference_pair(params.network());
    let at = params.with_endorsers(endorsers).into_diagnostic()?;
    let liveness = liveness_probability(&at);

    let report = EndorsersReport {
        summary: NetworkSummary::new(&params, cli.block_time),
        quorum_percent: quorum,
        epsilon,
        start: low,
        step,
        outcome,
        liveness,
    };

    match format {
        OutputFormat::Json => print_json(&report),
        OutputFormat::Text => {
            print_chosen_parameters(&params, cli.block_time);
            render_endorsers_text(&report);
            Ok(())
        }
    }
}

fn render_endorsers_text(report: &EndorsersReport) {
    let block_time = report.summary.block_time_secs;
    println!("Calculation specific parameters:");
    println!("=> Failure probability: {}", format_scientific(report.epsilon));
    println!("=> Quorum percentage: {}%", report.quorum_percent);
    println!("=> Lowest Endorser set size: {}", report.start);
    println!("=> Endorser set size step increment: {}", report.step);
    println!();

    match report.outcome {
        SearchOutcome::Found {
            threshold,
            probability,
        } => {
            println!(
                "Endorser set size {}: p(safety) = {} ({:3.0}%) ({} years), p(liveness)= {} ({:3.0}%) ({} days)",
                threshold,
                format_scientific(probability),
                probability * 100.0,
                format_number(years_until(block_time, probability)),
                format_scientific(report.liveness),
                report.liveness * 100.0,
                format_number(days_until(block_time, report.liveness)),
            );
        }
        SearchOutcome::NotFound => {
            println!(
                "No endorser set size up to {} achieves p(safety) <= {}",
                report.summary.network,
                format_scientific(report.epsilon)
            );
            println!(
                "Endorser set size {} (whole network): p(liveness)= {} ({:3.0}%) ({} days)",
                report.summary.network,
                format_scientific(report.liveness),
                report.liveness * 100.0,
                format_number(days_until(block_time, report.liveness)),
            );
        }
    }
}
