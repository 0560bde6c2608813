/// A joint state of N binary nodes.
///
/// Bit `k` of the inner index is the state of node `k`,
/// so node 0 varies fastest when states are enumerated in order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct State {
    n: usize,
    bits: usize,
}

impl State {
    /// number of nodes in the state
    pub fn n(&self) -> usize {
        self.n
    }
    /// index of this state in the flattened repertoire
    pub fn index(&self) -> usize {
        self.bits
    }
    /// whether node k is on
    pub fn get(&self, k: usize) -> bool {
        assert!(k < self.n, "node {} out of range for {} nodes", k, self.n);
        (self.bits >> k) & 1 == 1
    }
    /// node states as 0/1, node 0 first
    pub fn nodes(&self) -> impl Iterator<Item = u8> + '_ {
        (0..self.n).map(|k| self.get(k) as u8)
    }
    /// count of nodes in which two states differ, compared node by node
    pub fn hamming(&self, other: &Self) -> usize {
        assert!(self.n == other.n, "states over different node counts");
        self.nodes()
            .zip(other.nodes())
            .filter(|(a, b)| a != b)
            .count()
    }
}

impl From<(usize, usize)> for State {
    fn from((n, bits): (usize, usize)) -> Self {
        assert!(bits < 1 << n, "state {} out of range for {} nodes", bits, n);
        Self { n, bits }
    }
}

impl std::fmt::Display for State {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.nodes().try_for_each(|b| write!(f, "{}", b))
    }
}

/// Enumerates all 2^N states of N binary nodes in increasing index order.
#[derive(Debug, Clone)]
pub struct States {
    n: usize,
    next: usize,
}

impl States {
    pub fn n(&self) -> usize {
        self.n
    }
    pub fn size(&self) -> usize {
        1 << self.n
    }
}

impl From<usize> for States {
    fn from(n: usize) -> Self {
        Self { n, next: 0 }
    }
}

impl Iterator for States {
    type Item = State;
    fn next(&mut self) -> Option<Self::Item> {
        if self.next < self.size() {
            let state = State::from((self.n, self.next));
            self.next += 1;
            Some(state)
        } else {
            None
        }
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.size() - self.next;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for States {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enumerates_every_state_once() {
        assert!(States::from(0).count() == 1);
        assert!(States::from(3).count() == 8);
        assert!(States::from(4)
            .enumerate()
            .all(|(i, state)| state.index() == i));
    }

    #[test]
    fn node_zero_varies_fastest() {
        let states = States::from(2).map(|s| s.to_string()).collect::<Vec<_>>();
        assert_eq!(states, vec!["00", "10", "01", "11"]);
    }

    #[test]
    fn hamming_between_states() {
        let a = State::from((3, 0b000));
        let b = State::from((3, 0b101));
        let c = State::from((3, 0b111));
        assert_eq!(a.hamming(&a), 0);
        assert_eq!(a.hamming(&b), 2);
        assert_eq!(b.hamming(&c), 1);
        assert_eq!(a.hamming(&c), 3);
    }
}
