use super::matrix::CostMatrix;
use super::store::Store;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::sync::RwLock;

/// In-process store. Lives as long as the value does.
#[derive(Debug, Default)]
pub struct Memory(RwLock<BTreeMap<usize, Arc<CostMatrix>>>);

impl Memory {
    /// number of matrices held
    pub fn len(&self) -> usize {
        self.0.read().map(|map| map.len()).unwrap_or_default()
    }
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Store for Memory {
    fn name(&self) -> String {
        "memory".to_string()
    }
    fn get(&self, n: usize) -> Option<Arc<CostMatrix>> {
        self.0.read().ok()?.get(&n).cloned()
    }
    fn put(&self, matrix: &Arc<CostMatrix>) -> anyhow::Result<()> {
        self.0
            .write()
            .map_err(|_| anyhow::anyhow!("poisoned memory store"))?
            .entry(matrix.n())
            .or_insert_with(|| matrix.clone());
        Ok(())
    }
    fn done(&self, n: usize) -> bool {
        self.0
            .read()
            .map(|map| map.contains_key(&n))
            .unwrap_or(false)
    }
}
