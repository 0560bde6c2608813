use super::density::Density;
use super::measure::Measure;
use super::support::Support;
use crate::Energy;
use crate::Probability;

pub trait Coupling {
    type X: Support;
    type Y: Support;
    type M: Measure<X = Self::X, Y = Self::Y>;
    type P: Density<S = Self::X> + ?Sized;
    type Q: Density<S = Self::Y> + ?Sized;

    /// solve for the transport plan
    fn minimize(self) -> Self;
    /// mass moved from x to y under the current plan
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Probability;
    /// total cost of the current plan
    fn cost(&self) -> Energy;
}
