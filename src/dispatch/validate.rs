//! Checks on configuration values, raised as errors the dispatchers pass straight through.
use super::direction::Direction;
use super::measure::Measure;

/// accept past or future, and bidirectional only when allowed
pub fn direction(direction: Direction, allow_bi: bool) -> anyhow::Result<Direction> {
    match direction {
        Direction::Past | Direction::Future => Ok(direction),
        Direction::Bidirectional if allow_bi => Ok(direction),
        Direction::Bidirectional => Err(anyhow::anyhow!(
            "`direction` must be one of {}, {}; got {}",
            Direction::Past,
            Direction::Future,
            direction
        )),
    }
}

/// resolve a measure identifier against the registry
pub fn measure(name: &str) -> anyhow::Result<Measure> {
    Measure::all()
        .iter()
        .copied()
        .find(|m| m.name() == name.trim())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "`{}` is not a valid measure; choose one of {}",
                name,
                Measure::all()
                    .iter()
                    .map(|m| m.name())
                    .collect::<Vec<_>>()
                    .join(", ")
            )
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directions() {
        assert!(direction(Direction::Past, false).is_ok());
        assert!(direction(Direction::Future, false).is_ok());
        assert!(direction(Direction::Bidirectional, false).is_err());
        assert!(direction(Direction::Bidirectional, true).is_ok());
    }

    #[test]
    fn measures() {
        assert_eq!(measure("KLD").unwrap(), Measure::Kld);
        assert_eq!(measure("EMD").unwrap(), Measure::Emd);
        let e = measure("CHEBYSHEV").unwrap_err().to_string();
        assert!(e.contains("CHEBYSHEV"));
        assert!(e.contains("ENTROPY_DIFFERENCE"));
    }
}
