//! Threshold searches that invert the hypergeometric failure model.
//!
//! Both searches scan candidates linearly at a fixed granularity and return
//! the first one whose safety failure probability is within `epsilon`. They
//! rely on the failure probability being non-increasing along the scanned
//! dimension (quorum fraction or committee size). That is a modeling
//! assumption: it is not checked, and on a non-monotone scenario the result
//! is the first satisfying candidate rather than a global minimum.

use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info};

use crate::bias::BiasError;
use crate::hypergeometric::failure_probability;
use crate::params::{ParameterError, ParameterSet};

/// Quorum percent reported by the reference tool when no quorum up to 100%
/// meets the bound.
pub const QUORUM_NOT_FOUND_PERCENT: u32 = 101;

/// Quorum candidates are whole percents; a start fraction within this
/// distance below a whole percent snaps to it.
const PERCENT_TOLERANCE: f64 = 1e-9;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    #[error("Invalid parameters: {0}")]
    Parameter(#[from] ParameterError),
    #[error("{0}")]
    Bias(#[from] BiasError),
    #[error("Invalid search range: start quorum must be in [0, 1], got {0}")]
    StartQuorumOutOfRange(f64),
    #[error("Invalid search range: start endorser count {start} must be in [1, {network}]")]
    StartEndorsersOutOfRange { start: u64, network: u64 },
    #[error("Invalid search range: step must be at least 1")]
    ZeroStep,
    #[error("Invalid search range: quorum percents {low}..={high} must satisfy low <= high <= 100")]
    QuorumRangeOutOfBounds { low: u32, high: u32 },
    #[error("Epsilon must be in [0, 1], got {0}")]
    InvalidEpsilon(f64),
}

impl SearchError {
    /// Whether the error describes a scan range that can never produce a
    /// valid search, as opposed to an invalid scenario or bound.
    pub fn is_invalid_range(&self) -> bool {
        matches!(
            self,
            SearchError::StartQuorumOutOfRange(_)
                | SearchError::StartEndorsersOutOfRange { .. }
                | SearchError::ZeroStep
                | SearchError::QuorumRangeOutOfBounds { .. }
        )
    }
}

/// Result of a threshold search.
///
/// Exhausting the candidates is an expected outcome and is reported as
/// [`SearchOutcome::NotFound`], never as a zero-probability success.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum SearchOutcome<T> {
    Found { threshold: T, probability: f64 },
    NotFound,
}

impl<T: Copy> SearchOutcome<T> {
    pub fn threshold(&self) -> Option<T> {
        match self {
            SearchOutcome::Found { threshold, .. } => Some(*threshold),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn probability(&self) -> Option<f64> {
        match self {
            SearchOutcome::Found { probability, .. } => Some(*probability),
            SearchOutcome::NotFound => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, SearchOutcome::Found { .. })
    }

    /// Flatten into the reference tool's `(threshold, probability)` pair,
    /// substituting `sentinel` and `0.0` when nothing was found.
    pub fn reference_pair(&self, sentinel: T) -> (T, f64) {
        match self {
            SearchOutcome::Found {
                threshold,
                probability,
            } => (*threshold, *probability),
            SearchOutcome::NotFound => (sentinel, 0.0),
        }
    }
}

/// Find the lowest whole quorum percent, starting at `start_fraction` and
/// stepping one percent at a time up to 100%, whose safety failure
/// probability is at most `epsilon`.
///
/// Candidates are whole percents only: a fractional `start_fraction` such as
/// 0.505 starts the scan at the next whole percent (51%), so 50.5% is never
/// evaluated. The endorser set size is taken from `params`; its quorum field
/// is ignored.
pub fn find_minimum_quorum(
    params: &ParameterSet,
    start_fraction: f64,
    epsilon: f64,
) -> Result<SearchOutcome<u32>, SearchError> {
    params.validate()?;
    validate_epsilon(epsilon)?;
    if !(0.0..=1.0).contains(&start_fraction) {
        return Err(SearchError::StartQuorumOutOfRange(start_fraction));
    }

    let start = first_whole_percent(start_fraction);
    let candidates: Vec<u64> = (u64::from(start)..=100).collect();
    let found = first_satisfying(candidates, |percent| {
        let candidate = params.with_quorum(percent as f64 / 100.0)?;
        let probability = failure_probability(&candidate);
        debug!(quorum_percent = percent, probability, "evaluated quorum candidate");
        Ok((probability <= epsilon).then_some(probability))
    })?;

    let outcome = match found {
        Some((percent, probability)) => SearchOutcome::Found {
            threshold: percent as u32,
            probability,
        },
        None => SearchOutcome::NotFound,
    };
    info!(?outcome, start_percent = start, epsilon, "quorum search finished");
    Ok(outcome)
}

/// Find the smallest endorser set size in `start, start + step, ...` up to the
/// network size whose safety failure probability is at most `epsilon`.
///
/// The quorum fraction is taken from `params`; its endorser count is ignored.
pub fn find_minimum_endorsers(
    params: &ParameterSet,
    start: u64,
    step: u64,
    epsilon: f64,
) -> Result<SearchOutcome<u64>, SearchError> {
    params.validate()?;
    validate_epsilon(epsilon)?;
    if step == 0 {
        return Err(SearchError::ZeroStep);
    }
    let network = params.network();
    if start == 0 || start > network {
        return Err(SearchError::StartEndorsersOutOfRange { start, network });
    }

    let stride = usize::try_from(step).unwrap_or(usize::MAX);
    let candidates: Vec<u64> = (start..=network).step_by(stride).collect();
    let found = first_satisfying(candidates, |endorsers| {
        let candidate = params.with_endorsers(endorsers)?;
        let probability = failure_probability(&candidate);
        debug!(endorsers, probability, "evaluated endorser candidate");
        Ok((probability <= epsilon).then_some(probability))
    })?;

    let outcome = match found {
        Some((endorsers, probability)) => SearchOutcome::Found {
            threshold: endorsers,
            probability,
        },
        None => SearchOutcome::NotFound,
    };
    info!(?outcome, start, step, epsilon, "endorser search finished");
    Ok(outcome)
}

/// Validate a quorum-percent range `[low, high]` used by the sweeps.
pub(crate) fn validate_percent_range(low: u32, high: u32) -> Result<(), SearchError> {
    if low > high || high > 100 {
        return Err(SearchError::QuorumRangeOutOfBounds { low, high });
    }
    Ok(())
}

fn validate_epsilon(epsilon: f64) -> Result<(), SearchError> {
    if !(0.0..=1.0).contains(&epsilon) {
        return Err(SearchError::InvalidEpsilon(epsilon));
    }
    Ok(())
}

fn first_whole_percent(fraction: f64) -> u32 {
    ((fraction * 100.0 - PERCENT_TOLERANCE).ceil().max(0.0) as u32).min(100)
}

/// First candidate, in scan order, that `evaluate` accepts.
#[cfg(not(feature = "parallel"))]
fn first_satisfying<F>(
    candidates: Vec<u64>,
    evaluate: F,
) -> Result<Option<(u64, f64)>, SearchError>
where
    F: Fn(u64) -> Result<Option<f64>, SearchError>,
{
    for candidate in candidates {
        if let Some(probability) = evaluate(candidate)? {
            return Ok(Some((candidate, probability)));
        }
    }
    Ok(None)
}

/// First candidate, in scan order, that `evaluate` accepts. Candidates are
/// evaluated in parallel; `find_first` keeps the sequential answer.
#[cfg(feature = "parallel")]
fn first_satisfying<F>(
    candidates: Vec<u64>,
    evaluate: F,
) -> Result<Option<(u64, f64)>, SearchError>
where
    F: Fn(u64) -> Result<Option<f64>, SearchError> + Sync + Send,
{
    use rayon::prelude::*;

    candidates
        .into_par_iter()
        .map(|candidate| evaluate(candidate).map(|hit| hit.map(|p| (candidate, p))))
        .find_first(|result| !matches!(result, Ok(None)))
        .transpose()
        .map(Option::flatten)
}
