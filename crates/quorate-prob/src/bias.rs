use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum BiasError {
    #[error("Probability must be in [0, 1], got {0}")]
    ProbabilityOutOfRange(f64),
}

/// Failure probability when an adversary can bias `bits` bits of the
/// committee randomness, i.e. gets `2^bits` independent attempts:
/// `1 - (1 - p)^(2^bits)`.
///
/// Evaluated as `-expm1(2^bits * ln_1p(-p))` so that probabilities near
/// 1e-14 keep their precision. `bits == 0` returns `p` unchanged.
pub fn amplify(probability: f64, bits: u32) -> Result<f64, BiasError> {
    if !(0.0..=1.0).contains(&probability) {
        return Err(BiasError::ProbabilityOutOfRange(probability));
    }
    if bits == 0 || probability == 0.0 || probability == 1.0 {
        return Ok(probability);
    }
    let attempts = 2f64.powi(bits.min(i32::MAX as u32) as i32);
    let amplified = -(attempts * (-probability).ln_1p()).exp_m1();
    Ok(amplified.clamp(0.0, 1.0))
}
