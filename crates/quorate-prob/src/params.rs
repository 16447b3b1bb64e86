use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParameterError {
    #[error("Network size must be at least 1")]
    EmptyNetwork,
    #[error("Faulty count {faulty} exceeds network size {network}")]
    FaultyExceedsNetwork { network: u64, faulty: u64 },
    #[error("Honest ({honest}) + faulty ({faulty}) must equal network size {network}")]
    InconsistentCounts { network: u64, honest: u64, faulty: u64 },
    #[error("Endorser set size {endorsers} exceeds network size {network}")]
    EndorsersExceedNetwork { network: u64, endorsers: u64 },
    #[error("Quorum must be a fraction in [0, 1], got {0}")]
    QuorumOutOfRange(f64),
    #[error("Honest percentage must be in [0, 100], got {0}")]
    HonestPercentOutOfRange(f64),
}

/// One evaluation scenario: an endorser committee drawn without replacement
/// from a population split into honest and faulty members.
///
/// Fields are only reachable through validating constructors, so every
/// value of this type satisfies `honest + faulty == network`,
/// `endorsers <= network` and `0 <= quorum <= 1`. Searches derive new
/// scenarios with [`ParameterSet::with_quorum`] and
/// [`ParameterSet::with_endorsers`]; the source value is never touched.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ParameterSet {
    network: u64,
    faulty: u64,
    honest: u64,
    endorsers: u64,
    quorum: f64,
}

impl ParameterSet {
    /// Build a scenario from the network size and faulty count; the honest
    /// count is derived.
    pub fn new(
        network: u64,
        faulty: u64,
        endorsers: u64,
        quorum: f64,
    ) -> Result<Self, ParameterError> {
        if network == 0 {
            return Err(ParameterError::EmptyNetwork);
        }
        if faulty > network {
            return Err(ParameterError::FaultyExceedsNetwork { network, faulty });
        }
        let params = Self {
            network,
            faulty,
            honest: network - faulty,
            endorsers,
            quorum,
        };
        params.validate()?;
        Ok(params)
    }

    /// Build a scenario from explicit honest and faulty counts.
    ///
    /// Rejects counts that do not add up to `network` instead of adjusting
    /// either of them.
    pub fn from_counts(
        network: u64,
        honest: u64,
        faulty: u64,
        endorsers: u64,
        quorum: f64,
    ) -> Result<Self, ParameterError> {
        if honest.checked_add(faulty) != Some(network) {
            return Err(ParameterError::InconsistentCounts {
                network,
                honest,
                faulty,
            });
        }
        Self::new(network, faulty, endorsers, quorum)
    }

    /// Build a scenario from the percentage of honest nodes.
    ///
    /// The honest count is `ceil(network * honest_percent / 100)`, so a
    /// fractional node is always counted as honest.
    pub fn from_honest_percent(
        network: u64,
        honest_percent: f64,
        endorsers: u64,
        quorum: f64,
    ) -> Result<Self, ParameterError> {
        if !(0.0..=100.0).contains(&honest_percent) {
            return Err(ParameterError::HonestPercentOutOfRange(honest_percent));
        }
        let honest = ((network as f64) * honest_percent / 100.0).ceil() as u64;
        let honest = honest.min(network);
        Self::new(network, network - honest, endorsers, quorum)
    }

    /// Copy of this scenario with a different quorum fraction.
    pub fn with_quorum(&self, quorum: f64) -> Result<Self, ParameterError> {
        let next = Self { quorum, ..*self };
        next.validate()?;
        Ok(next)
    }

    /// Copy of this scenario with a different endorser set size.
    pub fn with_endorsers(&self, endorsers: u64) -> Result<Self, ParameterError> {
        let next = Self { endorsers, ..*self };
        next.validate()?;
        Ok(next)
    }

    /// Check every scenario invariant.
    pub fn validate(&self) -> Result<(), ParameterError> {
        if self.network == 0 {
            return Err(ParameterError::EmptyNetwork);
        }
        if self.honest.checked_add(self.faulty) != Some(self.network) {
            return Err(ParameterError::InconsistentCounts {
                network: self.network,
                honest: self.honest,
                faulty: self.faulty,
            });
        }
        if self.endorsers > self.network {
            return Err(ParameterError::EndorsersExceedNetwork {
                network: self.network,
                endorsers: self.endorsers,
            });
        }
        // Written so that NaN fails the range check.
        if !(0.0..=1.0).contains(&self.quorum) {
            return Err(ParameterError::QuorumOutOfRange(self.quorum));
        }
        Ok(())
    }

    pub fn network(&self) -> u64 {
        self.network
    }

    pub fn faulty(&self) -> u64 {
        self.faulty
    }

    pub fn honest(&self) -> u64 {
        self.honest
    }

    pub fn endorsers(&self) -> u64 {
        self.endorsers
    }

    pub fn quorum(&self) -> f64 {
        self.quorum
    }
}

impl std::fmt::Display for ParameterSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "network={} (honest={}, faulty={}), endorsers={}, quorum={:.2}",
            self.network, self.honest, self.faulty, self.endorsers, self.quorum
        )
    }
}
