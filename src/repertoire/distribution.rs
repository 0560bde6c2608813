use crate::Arbitrary;
use crate::Entropy;
use crate::Probability;

/// A probability distribution over the joint states of a set of binary nodes.
///
/// One axis per node. An axis of length 2 is a node in the purview,
/// an axis of length 1 is a node that has been marginalized out.
///
/// Mass is stored flat with node 0 varying fastest, which is the same
/// order in which [`States`](super::States) enumerates joint states.
/// Squeezing out singleton axes therefore never moves any mass.
///
/// Mass is not required to sum to one. Measures that need a
/// distribution say so and normalize, the rest take it as given.
#[derive(Debug, Clone, PartialEq)]
pub struct Repertoire {
    shape: Vec<usize>,
    mass: Vec<Probability>,
}

impl Repertoire {
    /// build from an explicit shape and flat mass in node-0-fastest order
    pub fn new(shape: Vec<usize>, mass: Vec<Probability>) -> anyhow::Result<Self> {
        if let Some(axis) = shape.iter().position(|&s| s != 1 && s != 2) {
            anyhow::bail!("axis {} has length {}, expected 1 or 2", axis, shape[axis]);
        }
        let size = shape.iter().product::<usize>();
        if size != mass.len() {
            anyhow::bail!("shape {:?} holds {} states, got {}", shape, size, mass.len());
        }
        if let Some(p) = mass.iter().find(|p| !p.is_finite() || **p < 0.) {
            anyhow::bail!("probability mass must be finite and non-negative, got {}", p);
        }
        Ok(Self { shape, mass })
    }
    /// uniform distribution over n binary nodes
    pub fn uniform(n: usize) -> Self {
        let size = 1 << n;
        Self {
            shape: vec![2; n],
            mass: vec![1. / size as Probability; size],
        }
    }
    /// product distribution of independent nodes,
    /// given the probability that each node is off
    pub fn independent(off: &[Probability]) -> Self {
        let n = off.len();
        let mass = (0..1usize << n)
            .map(|s| {
                off.iter()
                    .enumerate()
                    .map(|(k, &p)| if (s >> k) & 1 == 0 { p } else { 1. - p })
                    .product::<Probability>()
            })
            .collect();
        Self {
            shape: vec![2; n],
            mass,
        }
    }
    /// random normalized mass over the given shape
    pub fn noise(shape: &[usize]) -> Self {
        let size = shape.iter().product::<usize>();
        let mass = (0..size)
            .map(|_| rand::random::<Probability>())
            .collect::<Vec<_>>();
        let norm = mass.iter().sum::<Probability>();
        Self {
            shape: shape.to_vec(),
            mass: mass.into_iter().map(|p| p / norm).collect(),
        }
    }

    /// axis lengths, singleton axes included
    pub fn shape(&self) -> &[usize] {
        &self.shape
    }
    /// number of axes, singleton axes included
    pub fn ndim(&self) -> usize {
        self.shape.len()
    }
    /// number of nodes that have not been marginalized out
    pub fn nodes(&self) -> usize {
        self.shape.iter().filter(|&&s| s > 1).count()
    }
    /// shape with singleton axes removed
    pub fn squeeze(&self) -> Vec<usize> {
        self.shape.iter().copied().filter(|&s| s > 1).collect()
    }
    /// mass over joint states of the remaining nodes, node 0 fastest
    pub fn flatten(&self) -> &[Probability] {
        &self.mass
    }
    /// number of joint states
    pub fn size(&self) -> usize {
        self.mass.len()
    }
    /// total mass
    pub fn sum(&self) -> Probability {
        self.mass.iter().sum()
    }
    /// flattened mass rescaled to sum to one. all-zero mass stays zero.
    pub fn normalize(&self) -> Vec<Probability> {
        let total = self.sum();
        if total > 0. {
            self.mass.iter().map(|p| p / total).collect()
        } else {
            self.mass.clone()
        }
    }
    /// Shannon entropy of the normalized mass, in bits
    pub fn entropy(&self) -> Entropy {
        self.normalize()
            .into_iter()
            .filter(|&p| p > 0.)
            .map(|p| -p * p.log2())
            .sum()
    }

    /// distribution of a single axis, every other axis summed out
    pub fn marginal(&self, axis: usize) -> Vec<Probability> {
        assert!(axis < self.ndim(), "axis {} out of range", axis);
        let stride = self.shape[..axis].iter().product::<usize>();
        let length = self.shape[axis];
        let mut marginal = vec![0.; length];
        for (i, p) in self.mass.iter().enumerate() {
            marginal[(i / stride) % length] += p;
        }
        marginal
    }
    /// probability that the node on this axis is off
    pub fn marginal_zero(&self, axis: usize) -> Probability {
        self.marginal(axis)[0]
    }

    /// probability that each node still in the purview is off.
    /// marginalized nodes are off with certainty in every
    /// repertoire, so they are left out.
    pub fn off(&self) -> Vec<Probability> {
        (0..self.ndim())
            .filter(|&axis| self.shape[axis] > 1)
            .map(|axis| self.marginal_zero(axis))
            .collect()
    }

    /// two repertoires can be compared only if they
    /// agree in shape once singleton axes are dropped
    pub fn compatible(&self, other: &Self) -> anyhow::Result<()> {
        if self.squeeze() == other.squeeze() {
            Ok(())
        } else {
            Err(anyhow::anyhow!(
                "repertoires of shape {:?} and {:?} are not comparable",
                self.shape,
                other.shape
            ))
        }
    }
}

impl TryFrom<Vec<Probability>> for Repertoire {
    type Error = anyhow::Error;
    /// flat mass over 2^N joint states, node 0 fastest
    fn try_from(mass: Vec<Probability>) -> Result<Self, Self::Error> {
        if !mass.len().is_power_of_two() {
            anyhow::bail!("{} states is not a power of two", mass.len());
        }
        let n = mass.len().trailing_zeros() as usize;
        Self::new(vec![2; n], mass)
    }
}

impl Arbitrary for Repertoire {
    fn random() -> Self {
        Self::noise(&[2, 2, 2])
    }
}

impl std::fmt::Display for Repertoire {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?} [", self.shape)?;
        for (i, p) in self.mass.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "{:.4}", p)?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOLERANCE: Probability = 1e-12;

    #[test]
    fn rejects_malformed_shapes() {
        assert!(Repertoire::new(vec![3], vec![0.3, 0.3, 0.4]).is_err());
        assert!(Repertoire::new(vec![2, 2], vec![0.5, 0.5]).is_err());
        assert!(Repertoire::new(vec![2], vec![1.5, -0.5]).is_err());
        assert!(Repertoire::try_from(vec![0.2, 0.3, 0.5]).is_err());
        assert!(Repertoire::new(vec![2, 1, 2], vec![0.25; 4]).is_ok());
    }

    #[test]
    fn squeezing_drops_singletons() {
        let r = Repertoire::new(vec![1, 2, 1, 2], vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        assert_eq!(r.ndim(), 4);
        assert_eq!(r.nodes(), 2);
        assert_eq!(r.squeeze(), vec![2, 2]);
        assert_eq!(r.flatten(), &[0.1, 0.2, 0.3, 0.4]);
    }

    #[test]
    fn marginals_sum_out_other_axes() {
        // node 0 fastest: index = s0 + 2 * s1
        let r = Repertoire::try_from(vec![0.1, 0.2, 0.3, 0.4]).unwrap();
        assert!((r.marginal_zero(0) - 0.4).abs() < TOLERANCE);
        assert!((r.marginal_zero(1) - 0.3).abs() < TOLERANCE);
    }

    #[test]
    fn singleton_axis_marginal_is_total_mass() {
        let r = Repertoire::new(vec![2, 1], vec![0.25, 0.75]).unwrap();
        assert!((r.marginal_zero(1) - 1.).abs() < TOLERANCE);
        assert_eq!(r.off(), vec![0.25]);
    }

    #[test]
    fn independent_matches_marginals() {
        let off = [0.3, 0.9, 0.5];
        let r = Repertoire::independent(&off);
        assert!((r.sum() - 1.).abs() < TOLERANCE);
        for (k, p) in off.iter().enumerate() {
            assert!((r.marginal_zero(k) - p).abs() < TOLERANCE);
        }
    }

    #[test]
    fn uniform_has_maximal_entropy() {
        assert!((Repertoire::uniform(3).entropy() - 3.).abs() < TOLERANCE);
        assert!(Repertoire::random().entropy() <= 3. + TOLERANCE);
    }

    #[test]
    fn compatibility_ignores_singletons() {
        let a = Repertoire::new(vec![2, 1, 2], vec![0.25; 4]).unwrap();
        let b = Repertoire::uniform(2);
        let c = Repertoire::uniform(3);
        assert!(a.compatible(&b).is_ok());
        assert!(a.compatible(&c).is_err());
    }
}
