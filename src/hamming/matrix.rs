use crate::Energy;
use crate::repertoire::States;
use crate::transport::Measure;

/// Pairwise transportation cost between the 2^N joint states of N binary nodes.
///
/// Entry (i, j) is the number of nodes whose state differs between states i and j,
/// i.e. the Hamming fraction scaled back up by N. Costs never exceed N,
/// so a byte per entry is enough and keeps N = 13 at 64MB instead of 512MB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CostMatrix {
    n: usize,
    costs: Box<[u8]>,
}

impl CostMatrix {
    /// compute from scratch. rows are filled in parallel.
    pub fn compute(n: usize) -> Self {
        use rayon::iter::IndexedParallelIterator;
        use rayon::iter::ParallelIterator;
        use rayon::slice::ParallelSliceMut;
        assert!(n <= u8::MAX as usize, "too many nodes for byte costs");
        let size = 1usize << n;
        let mut costs = vec![0u8; size * size].into_boxed_slice();
        costs
            .par_chunks_mut(size)
            .enumerate()
            .for_each(|(i, row)| {
                row.iter_mut()
                    .enumerate()
                    .for_each(|(j, cost)| *cost = (i ^ j).count_ones() as u8)
            });
        Self { n, costs }
    }
    /// compute by comparing enumerated states node by node.
    /// slow, but shares nothing with the bit-twiddling path.
    pub fn brute(n: usize) -> Self {
        let costs = States::from(n)
            .flat_map(|x| States::from(n).map(move |y| x.hamming(&y) as u8))
            .collect::<Vec<_>>()
            .into_boxed_slice();
        Self { n, costs }
    }
    /// rebuild from raw row-major costs, e.g. when read back from a store
    pub fn from_raw(n: usize, costs: Vec<u8>) -> anyhow::Result<Self> {
        let size = 1usize << n;
        if costs.len() != size * size {
            anyhow::bail!("{} costs for {} nodes, expected {}", costs.len(), n, size * size);
        }
        Ok(Self {
            n,
            costs: costs.into_boxed_slice(),
        })
    }

    /// number of nodes
    pub fn n(&self) -> usize {
        self.n
    }
    /// number of joint states, i.e. side length of the matrix
    pub fn size(&self) -> usize {
        1 << self.n
    }
    /// cost of moving mass from state i to state j
    pub fn get(&self, i: usize, j: usize) -> Energy {
        self.costs[i * self.size() + j] as Energy
    }
    /// one row of costs
    pub fn row(&self, i: usize) -> &[u8] {
        let size = self.size();
        &self.costs[i * size..(i + 1) * size]
    }
    /// raw row-major costs
    pub fn raw(&self) -> &[u8] {
        &self.costs
    }
}

impl Measure for CostMatrix {
    type X = usize;
    type Y = usize;
    fn distance(&self, x: &Self::X, y: &Self::Y) -> Energy {
        self.get(*x, *y)
    }
}

impl std::fmt::Display for CostMatrix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for i in 0..self.size() {
            let row = self
                .row(i)
                .iter()
                .map(|c| c.to_string())
                .collect::<Vec<_>>()
                .join(" ");
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}
