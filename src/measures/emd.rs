use crate::Energy;
use crate::hamming::Hamming;
use crate::repertoire::Repertoire;
use crate::transport::Coupling;
use crate::transport::Network;

/// Earth Mover's Distance between two repertoires, with the Hamming
/// distance between joint states as the transportation cost.
///
/// Singleton axes are squeezed out, so N is the number of nodes
/// still in the purview. This is the exact solution, required
/// whenever the repertoires are not known to factor over nodes.
///
/// Both repertoires are expected to carry the same total mass, and
/// nothing here rescales them. With unequal totals only the smaller
/// total is moved.
pub fn hamming_emd(d1: &Repertoire, d2: &Repertoire, hamming: &Hamming) -> Energy {
    let metric = hamming.matrix(d1.nodes());
    Network::from((d1.flatten(), d2.flatten(), &*metric))
        .minimize()
        .cost()
}

/// EMD between two effect repertoires.
///
/// Because the nodes are independent, the EMD between effect repertoires
/// is the sum of the EMDs between the marginal distributions of each node,
/// and the EMD between two marginals of a binary node is the absolute
/// difference in the probabilities that the node is off.
///
/// Nothing here checks independence. Feeding it repertoires
/// that do not factor gives a wrong answer, not an error.
pub fn effect_emd(d1: &Repertoire, d2: &Repertoire) -> Energy {
    d1.off()
        .into_iter()
        .zip(d2.off())
        .map(|(p, q)| (p - q).abs())
        .sum()
}
