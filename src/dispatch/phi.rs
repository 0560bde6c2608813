use super::config::Config;
use super::direction::Direction;
use super::validate;
use crate::Energy;
use crate::hamming::Hamming;
use crate::measures;
use crate::repertoire::Repertoire;

/// enough digits to write any f64 out exactly
const DIGITS: usize = 1100;

/// round to a number of decimal digits.
///
/// ties are settled on the exact decimal value of `x`, to the even digit,
/// so 0.125 becomes 0.12 and 2.675 (really 2.67499...) becomes 2.67.
/// rounding twice to the same precision changes nothing.
pub fn round(x: Energy, precision: usize) -> Energy {
    if x.is_finite() {
        format!("{:.*}", precision.min(DIGITS), x)
            .parse()
            .unwrap_or(x)
    } else {
        x
    }
}

/// EMD between two repertoires along a direction.
///
/// Cause repertoires get the full transport solve. Effect repertoires
/// factor over nodes, so they get the analytic solution.
/// The result is rounded to the configured precision.
pub fn directional_emd(
    direction: Direction,
    d1: &Repertoire,
    d2: &Repertoire,
    config: &Config,
    hamming: &Hamming,
) -> anyhow::Result<Energy> {
    d1.compatible(d2)?;
    let distance = match direction {
        Direction::Past => measures::hamming_emd(d1, d2, hamming),
        Direction::Future => measures::effect_emd(d1, d2),
        Direction::Bidirectional => validate::direction(direction, false).map(|_| 0.)?,
    };
    Ok(round(distance, config.precision))
}

/// Distance between two repertoires of a single mechanism,
/// under whichever measure is configured. Rounded to the configured precision.
pub fn small_phi_measure(
    direction: Direction,
    d1: &Repertoire,
    d2: &Repertoire,
    config: &Config,
    hamming: &Hamming,
) -> anyhow::Result<Energy> {
    let measure = config.measure()?;
    d1.compatible(d2)?;
    let distance = match measure.primitive() {
        None => directional_emd(direction, d1, d2, config, hamming)?,
        Some(primitive) => primitive(d1, d2),
    };
    Ok(round(distance, config.precision))
}

/// Distance between two whole-system repertoires.
///
/// This distance must not depend on argument order, so asymmetric
/// measures are refused outright. Unlike the per-mechanism
/// distances, the result is not rounded.
pub fn big_phi_measure(
    r1: &Repertoire,
    r2: &Repertoire,
    config: &Config,
    hamming: &Hamming,
) -> anyhow::Result<Energy> {
    let measure = config.measure()?;
    if measure.is_asymmetric() {
        anyhow::bail!(
            "{} is not supported as a big-phi measure due to its asymmetry.",
            measure
        );
    }
    r1.compatible(r2)?;
    Ok(match measure.primitive() {
        Some(primitive) => primitive(r1, r2),
        None => measures::hamming_emd(r1, r2, hamming),
    })
}
