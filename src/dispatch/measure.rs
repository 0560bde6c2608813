use crate::Energy;
use crate::measures;
use crate::repertoire::Repertoire;

/// Signature shared by every primitive reachable without a direction.
pub type Primitive = fn(&Repertoire, &Repertoire) -> Energy;

/// Every distance the dispatchers know how to compute.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Measure {
    /// Earth Mover's Distance under Hamming cost
    Emd,
    /// Kullback-Leibler divergence
    Kld,
    L1,
    EntropyDifference,
    Psq2,
    Mp2q,
}

impl Measure {
    pub const fn all() -> &'static [Self] {
        &[
            Self::Emd,
            Self::Kld,
            Self::L1,
            Self::EntropyDifference,
            Self::Psq2,
            Self::Mp2q,
        ]
    }
    /// identifier as it appears in configuration
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Emd => "EMD",
            Self::Kld => "KLD",
            Self::L1 => "L1",
            Self::EntropyDifference => "ENTROPY_DIFFERENCE",
            Self::Psq2 => "PSQ2",
            Self::Mp2q => "MP2Q",
        }
    }
    /// measures whose value depends on argument order
    pub const fn is_asymmetric(&self) -> bool {
        matches!(self, Self::Kld | Self::Mp2q)
    }
    /// the function computing this measure between two repertoires.
    /// EMD depends on direction and on the cost matrices,
    /// so it has no entry here.
    pub fn primitive(&self) -> Option<Primitive> {
        match self {
            Self::Emd => None,
            Self::Kld => Some(measures::kld),
            Self::L1 => Some(measures::l1),
            Self::EntropyDifference => Some(measures::entropy_difference),
            Self::Psq2 => Some(measures::psq2),
            Self::Mp2q => Some(measures::mp2q),
        }
    }
}

impl TryFrom<&str> for Measure {
    type Error = anyhow::Error;
    fn try_from(s: &str) -> Result<Self, Self::Error> {
        super::validate::measure(s)
    }
}

impl std::fmt::Display for Measure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}
