use serde::Serialize;

use crate::bias::amplify;
use crate::hypergeometric::{failure_probability, liveness_probability};
use crate::params::ParameterSet;
use crate::search::{validate_percent_range, SearchError};

/// Safety and liveness failure probabilities at one quorum percent.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct QuorumRow {
    pub quorum_percent: u32,
    /// Probability of a safety failure.
    pub safety: f64,
    /// Probability of a liveness failure.
    pub liveness: f64,
}

/// Evaluate every whole quorum percent in `[low, high]` for the endorser set
/// size in `params`.
pub fn sweep_quorums(
    params: &ParameterSet,
    low: u32,
    high: u32,
) -> Result<Vec<QuorumRow>, SearchError> {
    params.validate()?;
    validate_percent_range(low, high)?;
    (low..=high)
        .map(|quorum_percent| -> Result<QuorumRow, SearchError> {
            let at = params.with_quorum(f64::from(quorum_percent) / 100.0)?;
            Ok(QuorumRow {
                quorum_percent,
                safety: failure_probability(&at),
                liveness: liveness_probability(&at),
            })
        })
        .collect()
}

/// [`sweep_quorums`] with both probabilities amplified for an adversary that
/// can bias `bits` bits of the committee randomness.
pub fn sweep_quorums_biased(
    params: &ParameterSet,
    low: u32,
    high: u32,
    bits: u32,
) -> Result<Vec<QuorumRow>, SearchError> {
    sweep_quorums(params, low, high)?
        .into_iter()
        .map(|row| -> Result<QuorumRow, SearchError> {
            Ok(QuorumRow {
                safety: amplify(row.safety, bits)?,
                liveness: amplify(row.liveness, bits)?,
                ..row
            })
        })
        .collect()
}
