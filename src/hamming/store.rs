use super::matrix::CostMatrix;
use std::sync::Arc;

/// Read-through memoization of cost matrices, keyed by node count.
///
/// A matrix is a pure function of its node count, so entries are
/// written at most once per key and never invalidated. Two writers
/// racing on the same key write identical bytes.
/// Matrices are shared behind `Arc`, so a hit never copies one.
pub trait Store: Send + Sync {
    /// Returns the name of the store, for logging.
    fn name(&self) -> String;
    /// cached matrix for n nodes, if any.
    /// unreadable entries count as misses.
    fn get(&self, n: usize) -> Option<Arc<CostMatrix>>;
    /// memoize the matrix for its node count
    fn put(&self, matrix: &Arc<CostMatrix>) -> anyhow::Result<()>;
    /// check if the matrix for n nodes is already stored
    fn done(&self, n: usize) -> bool {
        self.get(n).is_some()
    }
}

impl<S: Store + ?Sized> Store for Box<S> {
    fn name(&self) -> String {
        (**self).name()
    }
    fn get(&self, n: usize) -> Option<Arc<CostMatrix>> {
        (**self).get(n)
    }
    fn put(&self, matrix: &Arc<CostMatrix>) -> anyhow::Result<()> {
        (**self).put(matrix)
    }
    fn done(&self, n: usize) -> bool {
        (**self).done(n)
    }
}
