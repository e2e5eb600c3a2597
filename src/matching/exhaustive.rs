use log::debug;

use super::*;

/// Exact minimum-weight perfect matching by dynamic programming over vertex subsets.
///
/// `cost[S]` is the cheapest perfect matching of the vertex set `S`; it is obtained by pairing the
/// smallest vertex of `S` with every other member. Runs in `O(2^k * k)` time and `O(2^k)` space,
/// hence the hard limit on `k`.
#[derive(Clone, Copy, Debug)]
pub struct ExhaustiveMatcher {
    max_nodes: NumNodes,
}

impl ExhaustiveMatcher {
    /// Largest supported number of vertices
    pub const MAX_NODES: NumNodes = 20;

    /// ** Panics if `max_nodes` exceeds [`ExhaustiveMatcher::MAX_NODES`] **
    pub fn with_limit(max_nodes: NumNodes) -> Self {
        assert!(max_nodes <= Self::MAX_NODES);
        Self { max_nodes }
    }
}

impl Default for ExhaustiveMatcher {
    fn default() -> Self {
        Self {
            max_nodes: Self::MAX_NODES,
        }
    }
}

impl MatchingOracle for ExhaustiveMatcher {
    fn name(&self) -> &'static str {
        "exhaustive"
    }

    fn solve_min_weight_perfect_matching(
        &self,
        graph: &Subgraph,
    ) -> Result<Vec<Edge>, OracleError> {
        let k = graph.number_of_nodes();
        if k % 2 == 1 {
            return Err(OracleError::OddVertexCount { count: k });
        }
        if k > self.max_nodes {
            return Err(OracleError::TooManyVertices {
                oracle: self.name(),
                count: k,
                limit: self.max_nodes,
            });
        }
        if k == 0 {
            return Ok(Vec::new());
        }

        let full = (1usize << k) - 1;
        let mut cost = vec![Weight::INFINITY; full + 1];
        let mut partner = vec![u8::MAX; full + 1];
        cost[0] = 0.0;

        for set in 1..=full {
            if set.count_ones() % 2 == 1 {
                continue;
            }

            let u = set.trailing_zeros();
            let rest = set & !(1 << u);

            let mut candidates = rest;
            while candidates != 0 {
                let v = candidates.trailing_zeros();
                candidates &= candidates - 1;

                let c = cost[rest & !(1 << v)] + graph.weight(u, v);
                if c < cost[set] {
                    cost[set] = c;
                    partner[set] = v as u8;
                }
            }
        }

        debug!("exhaustive matching of {k} vertices has weight {}", cost[full]);

        let mut pairs = Vec::with_capacity(k as usize / 2);
        let mut set = full;
        while set != 0 {
            let u = set.trailing_zeros();
            let v = partner[set] as u32;
            pairs.push(Edge(u, v));
            set &= !(1 << u) & !(1 << v);
        }

        Ok(pairs)
    }
}
