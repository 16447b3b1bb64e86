use num::bigint::BigInt;
use num::rational::BigRational;
use num::traits::{One, ToPrimitive, Zero};

use crate::params::ParameterSet;

/// Exact binomial coefficient C(n, k) using BigInt.
///
/// Returns zero when `k > n`, so out-of-range summation terms vanish.
pub fn binomial(n: u64, k: u64) -> BigInt {
    if k > n {
        return BigInt::zero();
    }
    // Use the smaller of k and n-k for efficiency
    let k = std::cmp::min(k, n - k);
    if k == 0 {
        return BigInt::one();
    }
    let mut result = BigInt::one();
    for i in 0..k {
        result *= n - i;
        result /= i + 1;
    }
    result
}

/// Number of endorser sets containing at most `x` honest members:
/// `sum_{i=0}^{x} C(honest, i) * C(faulty, endorsers - i)`.
///
/// Only indices where both factors are non-zero are visited. Consecutive
/// coefficients are derived from their predecessor with one exact
/// multiply/divide pair instead of being recomputed from scratch.
pub fn honest_draws_at_most(params: &ParameterSet, x: i64) -> BigInt {
    let endorsers = params.endorsers();
    let honest = params.honest();
    let faulty = params.faulty();

    if x < 0 {
        return BigInt::zero();
    }
    let lo = endorsers.saturating_sub(faulty);
    let hi = (x as u64).min(honest).min(endorsers);
    if lo > hi {
        return BigInt::zero();
    }

    let mut honest_comb = binomial(honest, lo);
    let mut faulty_comb = binomial(faulty, endorsers - lo);
    let mut sum = BigInt::zero();
    for i in lo..=hi {
        sum += &honest_comb * &faulty_comb;
        if i == hi {
            break;
        }
        // C(h, i+1) = C(h, i) * (h - i) / (i + 1)
        honest_comb *= honest - i;
        honest_comb /= i + 1;
        // C(f, k-1) = C(f, k) * k / (f - k + 1), with k = endorsers - i <= faulty
        let k = endorsers - i;
        faulty_comb *= k;
        faulty_comb /= faulty - k + 1;
    }
    sum
}

/// Exact CDF of the number of honest members in the endorser set,
/// `P(H <= x)`, as a reduced rational.
pub fn cumulative_probability_exact(params: &ParameterSet, x: i64) -> BigRational {
    if x < 0 {
        return BigRational::zero();
    }
    if x as u64 >= params.endorsers() {
        return BigRational::one();
    }
    let numerator = honest_draws_at_most(params, x);
    // C(network, endorsers) >= 1 because endorsers <= network.
    let denominator = binomial(params.network(), params.endorsers());
    BigRational::new(numerator, denominator)
}

/// `P(H <= x)` converted to f64 after exact evaluation.
///
/// The conversion works on the reduced ratio, so operands far beyond the
/// f64 range still convert; probabilities below the smallest subnormal
/// become 0.0.
pub fn cumulative_probability(params: &ParameterSet, x: i64) -> f64 {
    cumulative_probability_exact(params, x).to_f64().unwrap_or(0.0)
}

/// Largest honest count at which the faulty members of the endorser set can
/// assemble a quorum on their own: `round((1 - quorum) * endorsers)`.
///
/// Ties round half away from zero.
pub fn failure_point(params: &ParameterSet) -> i64 {
    ((1.0 - params.quorum()) * params.endorsers() as f64).round() as i64
}

/// Largest honest count that still falls short of a quorum:
/// `round(quorum * endorsers) - 1`.
pub fn liveness_point(params: &ParameterSet) -> i64 {
    (params.quorum() * params.endorsers() as f64).round() as i64 - 1
}

/// Probability that the endorser set breaks safety.
pub fn failure_probability(params: &ParameterSet) -> f64 {
    cumulative_probability(params, failure_point(params))
}

/// Probability that the endorser set cannot reach an honest quorum.
pub fn liveness_probability(params: &ParameterSet) -> f64 {
    cumulative_probability(params, liveness_point(params))
}
