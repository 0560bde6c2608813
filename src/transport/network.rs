use super::coupling::Coupling;
use super::density::Density;
use super::measure::Measure;
use crate::Energy;
use crate::Probability;

/// Exact optimal transport between two mass vectors over joint states.
///
/// Solved as uncapacitated minimum-cost flow on the bipartite graph
/// source → (supply states) → (demand states) → sink, by successive
/// shortest augmenting paths. Node potentials keep reduced costs
/// non-negative, so every search is a dense Dijkstra.
///
/// Only states carrying mass take part, so sparse repertoires
/// cost far less than the full 2^N × 2^N problem.
pub struct Network<'a, M> {
    metric: &'a M,
    /// state index of each supply node
    lhs: Vec<usize>,
    /// state index of each demand node
    rhs: Vec<usize>,
    /// undelivered mass per supply node
    supply: Vec<Probability>,
    /// unfilled mass per demand node
    demand: Vec<Probability>,
    /// row-major flow between supply and demand nodes
    plan: Vec<Probability>,
    potential: Vec<Energy>,
}

impl<'a, M> Network<'a, M>
where
    M: Measure<X = usize, Y = usize>,
{
    /// mass below this is treated as exhausted
    const EPSILON: Probability = 1e-12;

    fn n(&self) -> usize {
        self.lhs.len()
    }
    fn m(&self) -> usize {
        self.rhs.len()
    }
    fn source(&self) -> usize {
        0
    }
    fn sink(&self) -> usize {
        self.n() + self.m() + 1
    }
    fn nodes(&self) -> usize {
        self.n() + self.m() + 2
    }
    fn kernel(&self, i: usize, j: usize) -> Energy {
        self.metric.distance(&self.lhs[i], &self.rhs[j])
    }

    /// residual edges leaving node u, with their true costs
    fn neighbors(&self, u: usize, mut visit: impl FnMut(usize, Energy)) {
        let (n, m) = (self.n(), self.m());
        match u {
            u if u == self.source() => (0..n)
                .filter(|&i| self.supply[i] > Self::EPSILON)
                .for_each(|i| visit(1 + i, 0.)),
            u if u <= n => {
                let i = u - 1;
                (0..m).for_each(|j| visit(1 + n + j, self.kernel(i, j)))
            }
            u if u <= n + m => {
                let j = u - 1 - n;
                (0..n)
                    .filter(|&i| self.plan[i * m + j] > Self::EPSILON)
                    .for_each(|i| visit(1 + i, -self.kernel(i, j)));
                if self.demand[j] > Self::EPSILON {
                    visit(self.sink(), 0.)
                }
            }
            _ => {}
        }
    }

    /// shortest path tree from the source under reduced costs.
    /// stops as soon as the sink is settled.
    fn dijkstra(&self) -> Option<(Vec<Energy>, Vec<bool>, Vec<usize>)> {
        let v = self.nodes();
        let mut dist = vec![Energy::INFINITY; v];
        let mut done = vec![false; v];
        let mut prev = vec![usize::MAX; v];
        dist[self.source()] = 0.;
        while let Some(u) = (0..v)
            .filter(|&u| !done[u] && dist[u].is_finite())
            .min_by(|&a, &b| dist[a].total_cmp(&dist[b]))
        {
            done[u] = true;
            if u == self.sink() {
                break;
            }
            self.neighbors(u, |w, cost| {
                let reduced = (cost + self.potential[u] - self.potential[w]).max(0.);
                if !done[w] && dist[u] + reduced < dist[w] {
                    dist[w] = dist[u] + reduced;
                    prev[w] = u;
                }
            });
        }
        done[self.sink()].then_some((dist, done, prev))
    }

    /// push as much mass as the path allows, returning the amount pushed
    fn augment(&mut self, prev: &[usize]) -> Probability {
        let (n, m) = (self.n(), self.m());
        let mut path = Vec::new();
        let mut w = self.sink();
        while w != self.source() {
            path.push((prev[w], w));
            w = prev[w];
        }
        let delta = path
            .iter()
            .map(|&(u, w)| match (u, w) {
                (u, w) if u == self.source() => self.supply[w - 1],
                (u, w) if w == self.sink() => self.demand[u - 1 - n],
                (u, w) if u > n => self.plan[(w - 1) * m + (u - 1 - n)],
                _ => Probability::INFINITY,
            })
            .fold(Probability::INFINITY, Probability::min);
        for (u, w) in path {
            match (u, w) {
                (u, w) if u == self.source() => self.supply[w - 1] -= delta,
                (u, w) if w == self.sink() => self.demand[u - 1 - n] -= delta,
                (u, w) if u > n => self.plan[(w - 1) * m + (u - 1 - n)] -= delta,
                (u, w) => self.plan[(u - 1) * m + (w - 1 - n)] += delta,
            }
        }
        delta
    }

    /// successive shortest paths until supply or demand runs out
    fn evolve(mut self) -> Self {
        while let Some((dist, done, prev)) = self.dijkstra() {
            let horizon = dist[self.sink()];
            self.potential
                .iter_mut()
                .zip(dist.iter().zip(done.iter()))
                .for_each(|(p, (&d, &settled))| *p += if settled { d } else { horizon });
            if self.augment(&prev) <= Self::EPSILON {
                break;
            }
        }
        self
    }

    fn position(support: &[usize], x: usize) -> Option<usize> {
        support.binary_search(&x).ok()
    }
}

impl<'a, M> Coupling for Network<'a, M>
where
    M: Measure<X = usize, Y = usize>,
{
    type X = usize;
    type Y = usize;
    type M = M;
    type P = [Probability];
    type Q = [Probability];

    fn minimize(self) -> Self {
        self.evolve()
    }
    fn flow(&self, x: &Self::X, y: &Self::Y) -> Probability {
        match (Self::position(&self.lhs, *x), Self::position(&self.rhs, *y)) {
            (Some(i), Some(j)) => self.plan[i * self.m() + j],
            _ => 0.,
        }
    }
    fn cost(&self) -> Energy {
        let m = self.m();
        self.plan
            .iter()
            .enumerate()
            .filter(|(_, f)| **f > 0.)
            .map(|(k, &f)| f * self.kernel(k / m, k % m))
            .sum()
    }
}

impl<'a, M> From<(&'a [Probability], &'a [Probability], &'a M)> for Network<'a, M>
where
    M: Measure<X = usize, Y = usize>,
{
    fn from((mu, nu, metric): (&'a [Probability], &'a [Probability], &'a M)) -> Self {
        let lhs = mu
            .support()
            .filter(|x| mu.density(x) > Self::EPSILON)
            .collect::<Vec<_>>();
        let rhs = nu
            .support()
            .filter(|y| nu.density(y) > Self::EPSILON)
            .collect::<Vec<_>>();
        let supply = lhs.iter().map(|x| mu.density(x)).collect::<Vec<_>>();
        let demand = rhs.iter().map(|y| nu.density(y)).collect::<Vec<_>>();
        let plan = vec![0.; lhs.len() * rhs.len()];
        let potential = vec![0.; lhs.len() + rhs.len() + 2];
        Self {
            metric,
            lhs,
            rhs,
            supply,
            demand,
            plan,
            potential,
        }
    }
}
