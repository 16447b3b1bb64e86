//! Exact failure model for endorser committees sampled without replacement.
//!
//! A [`ParameterSet`] describes one scenario. The [`hypergeometric`] module
//! evaluates its safety and liveness failure probabilities with unbounded
//! integer arithmetic, [`search`] inverts the model for a target bound, and
//! [`bias`] adjusts a probability for adversarially biasable randomness.

pub mod bias;
pub mod hypergeometric;
pub mod params;
pub mod search;
pub mod sweep;

pub use bias::{amplify, BiasError};
pub use hypergeometric::{cumulative_probability, failure_probability, liveness_probability};
pub use params::{ParameterError, ParameterSet};
pub use search::{
    find_minimum_endorsers, find_minimum_quorum, SearchError, SearchOutcome,
    QUORUM_NOT_FOUND_PERCENT,
};
pub use sweep::{sweep_quorums, sweep_quorums_biased, QuorumRow};
