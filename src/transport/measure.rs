use super::support::Support;
use crate::Energy;

/// generalization of *element-wise* distance metric between
/// two Density spaces over arbitrary Support.
///
/// for Hamming costs, X and Y are both joint state indices.
/// note however that generally, image space X and range space Y need not
/// have the same support. what is important is that we can define a
/// distance between any x ∈ X and any y ∈ Y.
pub trait Measure {
    type X: Support;
    type Y: Support;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy;
}
