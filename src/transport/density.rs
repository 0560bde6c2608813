use super::support::Support;
use crate::Probability;

/// generalization of any probability distribution over
/// arbitrary Support.
pub trait Density {
    type S: Support;

    fn density(&self, x: &Self::S) -> Probability;
    fn support(&self) -> impl Iterator<Item = Self::S>;
}

/// flat mass indexed by joint state
impl Density for [Probability] {
    type S = usize;
    fn density(&self, x: &Self::S) -> Probability {
        self.get(*x).copied().unwrap_or(0.)
    }
    fn support(&self) -> impl Iterator<Item = Self::S> {
        0..self.len()
    }
}
