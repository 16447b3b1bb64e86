//! CLI argument definitions: top-level `Cli` struct and `Commands` enum.

use clap::{Parser, Subcommand};

pub(crate) const CLI_LONG_ABOUT: &str =
    "Failure probabilities for endorser committees sampled from a partly faulty network.\n\n\
    Reports:\n  \
    1. quorate sweep --endorsers 150 --low 50 --high 80\n  \
    2. quorate quorum --endorsers 150 --epsilon 1e-14\n  \
    3. quorate endorsers --quorum 80 --epsilon 1e-14\n  \
    4. quorate sweep --endorsers 150 --bits 1\n\n\
    Global options describe the network: --network, --honest-percent, --block-time.\n\
    Use --format json for machine-readable output.";

#[derive(Parser)]
#[command(name = "quorate")]
#[command(about = "Failure probabilities for sampled endorser committees")]
#[command(long_about = CLI_LONG_ABOUT)]
#[command(version)]
pub(crate) struct Cli {
    /// Total number of nodes in the network
    #[arg(long, global = true, default_value_t = 1000)]
    pub(crate) network: u64,

    /// Percentage of honest nodes (the honest count is rounded up)
    #[arg(long, global = true, default_value_t = 67.0)]
    pub(crate) honest_percent: f64,

    /// Estimated block time in seconds
    #[arg(long, global = true, default_value_t = 1)]
    pub(crate) block_time: u64,

    /// Output format: text | json
    #[arg(long, global = true, default_value = "text")]
    pub(crate) format: String,

    #[command(subcommand)]
    pub(crate) command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Failure probabilities for a range of quorums at a fixed endorser set size
    #[command(display_order = 1)]
    Sweep {
        /// Endorser set size
        #[arg(long, default_value_t = 150)]
        endorsers: u64,

        /// Lowest quorum percentage
        #[arg(long, default_value_t = 50)]
        low: u32,

        /// Highest quorum percentage
        #[arg(long, default_value_t = 80)]
        high: u32,

        /// Number of biasable bits of randomness (omit for unbiased sampling)
        #[arg(long)]
        bits: Option<u32>,
    },

    /// Lowest quorum that meets a failure probability at a fixed endorser set size
    #[command(display_order = 2)]
    Quorum {
        /// Endorser set size
        #[arg(long, default_value_t = 150)]
        endorsers: u64,

        /// Target safety failure probability
        #[arg(long, default_value_t = 1e-14)]
        epsilon: f64,

        /// Lowest quorum percentage to try
        #[arg(long, default_value_t = 50)]
        low: u32,
    },

    /// Smallest endorser set that meets a failure probability at a fixed quorum
    #[command(display_order = 3)]
    Endorsers {
        /// Target safety failure probability
        #[arg(long, default_value_t = 1e-14)]
        epsilon: f64,

        /// Quorum percentage
        #[arg(long, default_value_t = 80)]
        quorum: u32,

        /// Lowest endorser set size to try
        #[arg(long, default_value_t = 100)]
        low: u64,

        /// Endorser set size step increment
        #[arg(long, default_value_t = 10)]
        step: u64,
    },
}
