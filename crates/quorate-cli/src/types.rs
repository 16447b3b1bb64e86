//! Shared types used across CLI commands and tests.

use serde::Serialize;

use quorate_prob::{ParameterSet, SearchOutcome};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum OutputFormat {
    Text,
    Json,
}

/// Network description shared by every report.
#[derive(Serialize)]
pub(crate) struct NetworkSummary {
    pub(crate) network: u64,
    pub(crate) honest: u64,
    pub(crate) faulty: u64,
    pub(crate) block_time_secs: u64,
}

impl NetworkSummary {
    pub(crate) fn new(params: &ParameterSet, block_time_secs: u64) -> Self {
        Self {
            network: params.network(),
            honest: params.honest(),
            faulty: params.faulty(),
            block_time_secs,
        }
    }
}

/// One quorum row with the expected time until each kind of failure.
#[derive(Serialize)]
pub(crate) struct SweepRow {
    pub(crate) quorum_percent: u32,
    pub(crate) safety: f64,
    pub(crate) liveness: f64,
    /// Expected years until a safety failure; `null` when it never happens.
    pub(crate) safety_years: f64,
    /// Expected days until a liveness failure; `null` when it never happens.
    pub(crate) liveness_days: f64,
}

#[derive(Serialize)]
pub(crate) struct SweepReport {
    pub(crate) summary: NetworkSummary,
    pub(crate) endorsers: u64,
    pub(crate) low_percent: u32,
    pub(crate) high_percent: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) bits: Option<u32>,
    pub(crate) rows: Vec<SweepRow>,
}

#[derive(Serialize)]
pub(crate) struct QuorumReport {
    pub(crate) summary: NetworkSummary,
    pub(crate) endorsers: u64,
    pub(crate) epsilon: f64,
    pub(crate) start_percent: u32,
    pub(crate) outcome: SearchOutcome<u32>,
    /// Liveness failure probability at the discovered quorum.
    pub(crate) liveness: Option<f64>,
}

#[derive(Serialize)]
pub(crate) struct EndorsersReport {
    pub(crate) summary: NetworkSummary,
    pub(crate) quorum_percent: u32,
    pub(crate) epsilon: f64,
    pub(crate) start: u64,
    pub(crate) step: u64,
    pub(crate) outcome: SearchOutcome<u64>,
    /// Liveness failure probability at the discovered size, or at the whole
    /// network when no size qualifies.
    pub(crate) liveness: f64,
}
