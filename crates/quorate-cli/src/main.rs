mod cli;
mod commands;
mod types;

pub(crate) use cli::{Cli, Commands};
pub(crate) use types::{
    EndorsersReport, NetworkSummary, OutputFormat, QuorumReport, SweepReport, SweepRow,
};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use commands::helpers::parse_output_format;

fn main() -> miette::Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let format = parse_output_format(&cli.format)?;

    match cli.command {
        Commands::Sweep {
            endorsers,
            low,
            high,
            bits,
        } => commands::sweep::run_sweep_command(&cli, format, endorsers, low, high, bits),
        Commands::Quorum {
            endorsers,
            epsilon,
            low,
        } => commands::quorum::run_quorum_command(&cli, format, endorsers, epsilon, low),
        Commands::Endorsers {
            epsilon,
            quorum,
            low,
            step,
        } => commands::endorsers::run_endorsers_command(&cli, format, epsilon, quorum, low, step),
    }
}
