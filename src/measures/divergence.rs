use crate::Energy;
use crate::Entropy;
use crate::repertoire::Repertoire;

/// Kullback-Leibler divergence of `d1` from `d2`, in bits.
///
/// Both repertoires are flattened and normalized first.
/// States where `d1` has no mass contribute nothing. If `d2` has no mass
/// where `d1` does, the divergence is infinite, and that is what comes back.
pub fn kld(d1: &Repertoire, d2: &Repertoire) -> Entropy {
    d1.normalize()
        .into_iter()
        .zip(d2.normalize())
        .filter(|&(p, _)| p > 0.)
        .map(|(p, q)| match q > 0. {
            true => p * (p / q).log2(),
            false => Entropy::INFINITY,
        })
        .sum()
}

/// absolute difference between the Shannon entropies, in bits
pub fn entropy_difference(d1: &Repertoire, d2: &Repertoire) -> Energy {
    (d1.entropy() - d2.entropy()).abs()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Arbitrary;

    const TOLERANCE: Entropy = 1e-12;

    #[test]
    fn is_kld_asymmetric() {
        let p = Repertoire::try_from(vec![0.9, 0.1]).unwrap();
        let q = Repertoire::try_from(vec![0.5, 0.5]).unwrap();
        let pq = 0.9 * 1.8f64.log2() + 0.1 * 0.2f64.log2();
        let qp = 0.5 * (0.5f64 / 0.9).log2() + 0.5 * 5f64.log2();
        assert!((kld(&p, &q) - pq).abs() < TOLERANCE);
        assert!((kld(&q, &p) - qp).abs() < TOLERANCE);
        assert!((kld(&p, &q) - kld(&q, &p)).abs() > 0.1);
    }

    #[test]
    fn is_kld_zero_on_itself() {
        let d = Repertoire::random();
        assert!(kld(&d, &d).abs() < TOLERANCE);
    }

    #[test]
    fn is_kld_infinite_without_absolute_continuity() {
        let p = Repertoire::try_from(vec![0.5, 0.5]).unwrap();
        let q = Repertoire::try_from(vec![1., 0.]).unwrap();
        assert!(kld(&p, &q) == Entropy::INFINITY);
        // the other way round is finite: p covers q's support
        assert!((kld(&q, &p) - 1.).abs() < TOLERANCE);
    }

    #[test]
    fn is_kld_normalized() {
        let p = Repertoire::try_from(vec![2., 2.]).unwrap();
        let q = Repertoire::try_from(vec![0.5, 0.5]).unwrap();
        assert!(kld(&p, &q).abs() < TOLERANCE);
    }

    #[test]
    fn is_entropy_difference_symmetric() {
        let d1 = Repertoire::random();
        let d2 = Repertoire::random();
        assert!(entropy_difference(&d1, &d2) == entropy_difference(&d2, &d1));
        assert!(entropy_difference(&d1, &d1) == 0.);
    }

    #[test]
    fn entropy_difference_counts_bits() {
        let certain = Repertoire::try_from(vec![0., 0., 1., 0.]).unwrap();
        let uniform = Repertoire::uniform(2);
        assert!((entropy_difference(&certain, &uniform) - 2.).abs() < TOLERANCE);
    }
}
