use itertools::Itertools;
use rand::Rng;

use crate::graph::*;

/// Weight of a minimum-weight perfect matching computed by plain recursion
/// (pair the first vertex with every other one). Only meant for `k <= 12`.
pub fn brute_force_min_matching(graph: &Subgraph) -> Weight {
    fn recurse(graph: &Subgraph, remaining: &mut Vec<Node>) -> Weight {
        if remaining.is_empty() {
            return 0.0;
        }

        let u = remaining.remove(0);
        let mut best = Weight::INFINITY;
        for i in 0..remaining.len() {
            let v = remaining.remove(i);
            best = best.min(graph.weight(u, v) + recurse(graph, remaining));
            remaining.insert(i, v);
        }
        remaining.insert(0, u);

        best
    }

    assert!(graph.number_of_nodes() % 2 == 0);
    assert!(graph.number_of_nodes() <= 12);
    recurse(graph, &mut graph.vertices().collect())
}

/// Weight of an optimal tour obtained by enumerating all `(n-1)!` cyclic orders starting at 0
pub fn brute_force_optimal_tour(matrix: &WeightMatrix) -> Weight {
    let n = matrix.number_of_nodes();
    assert!((1..=9).contains(&n));

    if n == 1 {
        return 0.0;
    }

    (1..n)
        .permutations((n - 1) as usize)
        .map(|perm| {
            let mut weight = matrix.weight(0, perm[0]) + matrix.weight(perm[n as usize - 2], 0);
            for (&u, &v) in perm.iter().tuple_windows() {
                weight += matrix.weight(u, v);
            }
            weight
        })
        .fold(Weight::INFINITY, Weight::min)
}

/// Random metric instances of sizes in `nodes`; every second one has integral weights
pub fn random_metric_instances(
    rng: &mut impl Rng,
    nodes: std::ops::Range<NumNodes>,
) -> impl Iterator<Item = WeightMatrix> {
    (0..).map(move |i| {
        let n = rng.gen_range(nodes.clone());
        if i % 2 == 0 {
            WeightMatrix::random_euclidean(rng, n, 100.0)
        } else {
            WeightMatrix::random_rounded_euclidean(rng, n, 10.0)
        }
    })
}

/// Random permutation of `0..n`
pub fn random_permutation(rng: &mut impl Rng, n: NumNodes) -> Vec<Node> {
    use rand::seq::SliceRandom;

    let mut mapping: Vec<Node> = (0..n).collect();
    mapping.shuffle(rng);
    mapping
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn optimal_tour_of_square() {
        // unit square with diagonals of length 2
        let matrix = WeightMatrix::try_from_rows(&[
            [0.0, 1.0, 2.0, 1.0],
            [1.0, 0.0, 1.0, 2.0],
            [2.0, 1.0, 0.0, 1.0],
            [1.0, 2.0, 1.0, 0.0],
        ])
        .unwrap();
        assert_eq!(brute_force_optimal_tour(&matrix), 4.0);

        let sub = matrix.induced_subgraph(&[0, 1, 2, 3]);
        assert_eq!(brute_force_min_matching(&sub), 2.0);
    }
}
