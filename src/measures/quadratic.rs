use crate::Energy;
use crate::Probability;
use crate::repertoire::Repertoire;

/// Σ p² · ln(p · k) over states with mass, k the number of states
fn concentration(mass: &[Probability]) -> Energy {
    let k = mass.len() as Probability;
    mass.iter()
        .copied()
        .filter(|&p| p > 0.)
        .map(|p| p * p * (p * k).ln())
        .sum()
}

/// PSQ2 measure: how differently concentrated two repertoires are.
/// Zero-mass states contribute nothing.
pub fn psq2(d1: &Repertoire, d2: &Repertoire) -> Energy {
    (concentration(d1.flatten()) - concentration(d2.flatten())).abs()
}

/// MP2Q measure between the unpartitioned repertoire `p`
/// and the partitioned repertoire `q`. Order matters.
///
/// Σ (1/k) · (p² / q) · ln(p / q), where any state with
/// no mass on either side contributes nothing.
pub fn mp2q(p: &Repertoire, q: &Repertoire) -> Energy {
    let k = p.size() as Probability;
    p.flatten()
        .iter()
        .zip(q.flatten())
        .filter(|&(&p, &q)| p > 0. && q > 0.)
        .map(|(&p, &q)| p * p / q * (p / q).ln() / k)
        .filter(|x| x.is_finite())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    const TOLERANCE: Energy = 1e-12;

    #[test]
    fn is_psq2_symmetric() {
        let d1 = Repertoire::random();
        let d2 = Repertoire::random();
        assert!(psq2(&d1, &d2) == psq2(&d2, &d1));
        assert!(psq2(&d1, &d1) == 0.);
    }

    #[test]
    fn psq2_of_uniform_is_zero_concentration() {
        // ln(p · k) vanishes when every state has p = 1/k
        let certain = Repertoire::try_from(vec![1., 0., 0., 0.]).unwrap();
        let uniform = Repertoire::uniform(2);
        assert!(concentration(uniform.flatten()).abs() < TOLERANCE);
        assert!((psq2(&certain, &uniform) - 4f64.ln()).abs() < TOLERANCE);
    }

    #[test]
    fn is_mp2q_asymmetric() {
        let p = Repertoire::try_from(vec![0.9, 0.1]).unwrap();
        let q = Repertoire::try_from(vec![0.5, 0.5]).unwrap();
        let pq = (0.81 / 0.5 * 1.8f64.ln() + 0.01 / 0.5 * 0.2f64.ln()) / 2.;
        let qp = (0.25 / 0.9 * (0.5f64 / 0.9).ln() + 0.25 / 0.1 * 5f64.ln()) / 2.;
        assert!((mp2q(&p, &q) - pq).abs() < TOLERANCE);
        assert!((mp2q(&q, &p) - qp).abs() < TOLERANCE);
        assert!((mp2q(&p, &q) - mp2q(&q, &p)).abs() > 0.1);
    }

    #[test]
    fn mp2q_ignores_empty_states() {
        let p = Repertoire::try_from(vec![0.5, 0.5, 0., 0.]).unwrap();
        let q = Repertoire::try_from(vec![0.5, 0., 0.5, 0.]).unwrap();
        let value = mp2q(&p, &q);
        assert!(value.is_finite());
        assert!(value.abs() < TOLERANCE);
        assert!(mp2q(&p, &p).abs() < TOLERANCE);
    }
}
