use crate::Energy;
use crate::repertoire::Repertoire;

/// L1 distance between two repertoires:
/// the sum of absolute differences over every joint state.
pub fn l1(d1: &Repertoire, d2: &Repertoire) -> Energy {
    d1.flatten()
        .iter()
        .zip(d2.flatten())
        .map(|(p, q)| (p - q).abs())
        .sum()
}
