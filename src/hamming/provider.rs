use super::disk::Disk;
use super::matrix::CostMatrix;
use super::memory::Memory;
use super::store::Store;
use crate::PRECOMPUTED_HAMMING_MATRICES;
use std::sync::Arc;
use std::sync::LazyLock;

/// matrices for 0..PRECOMPUTED_HAMMING_MATRICES nodes, built once per process.
/// together they take under 350KB.
static PRECOMPUTED: LazyLock<Vec<Arc<CostMatrix>>> = LazyLock::new(|| {
    log::debug!("{:<32}{:<16}", "precomputing hamming matrices", PRECOMPUTED_HAMMING_MATRICES);
    (0..PRECOMPUTED_HAMMING_MATRICES)
        .map(CostMatrix::compute)
        .map(Arc::new)
        .collect()
});

/// Source of Hamming cost matrices.
///
/// Small node counts come straight from the process-wide table.
/// Larger ones are read through the store, and computed and written
/// back on a miss. The store is not consulted at all below the threshold.
///
/// | n  | size   |
/// |----|--------|
/// | 9  | 256KB  |
/// | 10 | 1MB    |
/// | 11 | 4MB    |
/// | 12 | 16MB   |
/// | 13 | 64MB   |
pub struct Hamming {
    store: Box<dyn Store>,
}

impl Hamming {
    /// matrices above the threshold are persisted under `REPERTOIRE_CACHE_DIR`
    pub fn persistent() -> Self {
        Self::from(Box::new(Disk::from_env()) as Box<dyn Store>)
    }
    /// matrices above the threshold are kept only as long as this value
    pub fn memory() -> Self {
        Self::from(Box::new(Memory::default()) as Box<dyn Store>)
    }
    pub fn store(&self) -> &dyn Store {
        self.store.as_ref()
    }

    /// the cost matrix over the joint states of n binary nodes
    pub fn matrix(&self, n: usize) -> Arc<CostMatrix> {
        match PRECOMPUTED.get(n) {
            Some(matrix) => matrix.clone(),
            None => self.cached(n),
        }
    }

    /// make sure the matrix for n nodes is available without computation.
    /// an entry only counts if it reads back, so unreadable ones are rewritten.
    pub fn warm(&self, n: usize) -> anyhow::Result<()> {
        if n < PRECOMPUTED_HAMMING_MATRICES {
            log::info!("{:<32}{:<16}", "using precomputed matrix", n);
            Ok(())
        } else if self.store.get(n).is_some() {
            log::info!("{:<32}{:<16}{}", "using cached matrix", n, self.store.name());
            Ok(())
        } else {
            log::info!("{:<32}{:<16}{}", "computing hamming matrix", n, self.store.name());
            self.store.put(&Arc::new(CostMatrix::compute(n)))
        }
    }

    fn cached(&self, n: usize) -> Arc<CostMatrix> {
        if let Some(matrix) = self.store.get(n) {
            log::debug!("{:<32}{:<16}{}", "hamming cache hit", n, self.store.name());
            return matrix;
        }
        log::debug!("{:<32}{:<16}{}", "hamming cache miss", n, self.store.name());
        let matrix = Arc::new(CostMatrix::compute(n));
        if let Err(e) = self.store.put(&matrix) {
            log::warn!("{:<32}{:<16}{}", "failed to cache hamming matrix", n, e);
        }
        matrix
    }
}

impl From<Box<dyn Store>> for Hamming {
    fn from(store: Box<dyn Store>) -> Self {
        Self { store }
    }
}

impl Default for Hamming {
    fn default() -> Self {
        Self::memory()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// counts traffic so tests can see which tier served a request
    #[derive(Default)]
    struct Spy {
        memory: Memory,
        gets: std::sync::atomic::AtomicUsize,
        puts: std::sync::atomic::AtomicUsize,
    }

    impl Store for Arc<Spy> {
        fn name(&self) -> String {
            "spy".to_string()
        }
        fn get(&self, n: usize) -> Option<Arc<CostMatrix>> {
            self.gets.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            self.memory.get(n)
        }
        fn put(&self, matrix: &Arc<CostMatrix>) -> anyhow::Result<()> {
            self.puts.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
            self.memory.put(matrix)
        }
    }

    fn spied() -> (Hamming, Arc<Spy>) {
        let spy = Arc::new(Spy::default());
        let hamming = Hamming::from(Box::new(spy.clone()) as Box<dyn Store>);
        (hamming, spy)
    }

    #[test]
    fn small_matrices_skip_the_store() {
        let (hamming, spy) = spied();
        for n in 0..PRECOMPUTED_HAMMING_MATRICES {
            assert_eq!(hamming.matrix(n).n(), n);
        }
        assert_eq!(spy.gets.load(std::sync::atomic::Ordering::Relaxed), 0);
        assert_eq!(spy.puts.load(std::sync::atomic::Ordering::Relaxed), 0);
    }

    #[test]
    fn large_matrices_are_computed_once() {
        let (hamming, spy) = spied();
        let n = PRECOMPUTED_HAMMING_MATRICES;
        let first = hamming.matrix(n);
        let again = hamming.matrix(n);
        assert!(Arc::ptr_eq(&first, &again));
        assert_eq!(first.n(), n);
        assert_eq!(spy.gets.load(std::sync::atomic::Ordering::Relaxed), 2);
        assert_eq!(spy.puts.load(std::sync::atomic::Ordering::Relaxed), 1);
    }

    #[test]
    fn precomputed_matrices_are_well_formed() {
        let hamming = Hamming::default();
        for n in 0..PRECOMPUTED_HAMMING_MATRICES {
            let m = hamming.matrix(n);
            for i in 0..m.size() {
                assert_eq!(m.get(i, i), 0.);
                for j in 0..i {
                    let cost = m.get(i, j);
                    assert_eq!(cost, m.get(j, i));
                    assert_eq!(cost, cost.round());
                    assert!(cost >= 0. && cost <= n as f64);
                }
            }
        }
    }

    #[test]
    fn precomputed_matrices_match_brute_force() {
        let hamming = Hamming::default();
        for n in 0..PRECOMPUTED_HAMMING_MATRICES {
            assert_eq!(*hamming.matrix(n), CostMatrix::brute(n));
        }
    }

    #[test]
    fn warming_populates_the_store() {
        let (hamming, spy) = spied();
        let n = PRECOMPUTED_HAMMING_MATRICES;
        hamming.warm(3).unwrap();
        assert!(!spy.memory.done(3));
        hamming.warm(n).unwrap();
        hamming.warm(n).unwrap();
        assert!(spy.memory.done(n));
        assert_eq!(spy.puts.load(std::sync::atomic::Ordering::Relaxed), 1);
    }

    #[test]
    fn warming_rewrites_unreadable_entries() {
        let dir = std::env::temp_dir()
            .join(format!("repertoire-warm-{:016x}", rand::random::<u64>()));
        let disk = Disk::from(dir.clone());
        let n = PRECOMPUTED_HAMMING_MATRICES;
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(disk.path(n), b"garbage").unwrap();
        assert!(disk.done(n));
        assert!(disk.get(n).is_none());
        let hamming = Hamming::from(Box::new(disk.clone()) as Box<dyn Store>);
        hamming.warm(n).unwrap();
        assert_eq!(disk.get(n).as_deref(), Some(&CostMatrix::compute(n)));
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
