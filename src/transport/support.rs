/// marker trait for any type that can
/// be interpreted as a support for a probability distribution.
///
/// currently only implemented by
/// - usize , the index of a joint state, where a mass slice is the implied Density and CostMatrix is the implied Measure
pub trait Support: Clone {}

impl Support for usize {}
