use std::{
    cmp::{Ordering, Reverse},
    collections::BinaryHeap,
};

use log::debug;

use crate::graph::*;

/// Candidate edge of Prim's algorithm, ordered by `(weight, origin, dest)`
#[derive(Clone, Copy, Debug)]
struct Candidate {
    weight: Weight,
    origin: Node,
    dest: Node,
}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then(self.origin.cmp(&other.origin))
            .then(self.dest.cmp(&other.dest))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Candidate {}

/// Computes a minimum spanning tree rooted at vertex 0; see [`build_mst_from`]
pub fn build_mst(matrix: &WeightMatrix) -> Multigraph {
    build_mst_from(matrix, 0)
}

/// Prim's algorithm with lazy deletion.
///
/// Starting at `start`, the cheapest candidate edge is popped from a binary min-heap; if its
/// destination is not yet part of the tree, the edge is committed and all edges from the new
/// vertex to unvisited vertices become candidates. Stale candidates are discarded when popped.
/// Ties are broken by `(origin, dest)`, so the result is deterministic.
///
/// Runs in `O(n^2 log n)` and returns the tree as a [`Multigraph`] with exactly `n - 1` edges.
/// ** Panics if `start >= n` **
pub fn build_mst_from(matrix: &WeightMatrix, start: Node) -> Multigraph {
    let n = matrix.number_of_nodes();
    assert!(start < n, "start vertex {start} out of range");

    let mut tree = Multigraph::new(n);
    let mut visited = vec![false; n as usize];
    let mut heap = BinaryHeap::with_capacity(n as usize);

    let push_candidates =
        |heap: &mut BinaryHeap<Reverse<Candidate>>, visited: &[bool], origin: Node| {
            heap.extend(
                matrix
                    .vertices()
                    .filter(|&v| !visited[v as usize])
                    .map(|dest| {
                        Reverse(Candidate {
                            weight: matrix.weight(origin, dest),
                            origin,
                            dest,
                        })
                    }),
            );
        };

    visited[start as usize] = true;
    push_candidates(&mut heap, &visited, start);

    let mut stale = 0usize;
    while let Some(Reverse(Candidate {
        weight,
        origin,
        dest,
    })) = heap.pop()
    {
        if visited[dest as usize] {
            stale += 1;
            continue;
        }

        tree.add_edge(origin, dest, weight);
        visited[dest as usize] = true;

        if tree.number_of_edges() + 1 == n as NumEdges {
            break;
        }

        push_candidates(&mut heap, &visited, dest);
    }

    debug_assert!(visited.iter().all(|&x| x));
    debug!(
        "prim: {} tree edges, {stale} stale candidates skipped, {} left in queue",
        tree.number_of_edges(),
        heap.len()
    );

    tree
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    use super::*;
    use crate::errors::InvariantCheck;
    use crate::testing::{random_metric_instances, random_permutation};

    fn reachable_from(tree: &Multigraph, start: Node) -> Vec<bool> {
        let mut visited = vec![false; tree.len()];
        let mut stack = vec![start];
        visited[start as usize] = true;

        while let Some(u) = stack.pop() {
            for &(v, _) in tree.neighbors_of(u) {
                if !std::mem::replace(&mut visited[v as usize], true) {
                    stack.push(v);
                }
            }
        }

        visited
    }

    /// O(n^3) reference: repeatedly add the cheapest edge leaving the current tree
    fn naive_mst_weight(matrix: &WeightMatrix) -> Weight {
        let mut in_tree = vec![false; matrix.len()];
        in_tree[0] = true;
        let mut weight = 0.0;

        for _ in 1..matrix.len() {
            let (w, v) = matrix
                .vertices()
                .filter(|&u| in_tree[u as usize])
                .cartesian_product(matrix.vertices().filter(|&v| !in_tree[v as usize]))
                .map(|(u, v)| (matrix.weight(u, v), v))
                .min_by(|a, b| a.0.total_cmp(&b.0))
                .unwrap();

            weight += w;
            in_tree[v as usize] = true;
        }

        weight
    }

    #[test]
    fn spanning_tree() {
        let mut rng = Pcg64::seed_from_u64(0xa11ce);

        for matrix in random_metric_instances(&mut rng, 1..40).take(100) {
            let tree = build_mst(&matrix);

            assert_eq!(tree.number_of_edges() + 1, matrix.number_of_nodes() as NumEdges);
            assert!(tree.is_correct().is_ok());
            assert!(reachable_from(&tree, 0).into_iter().all(|x| x));
            assert!((tree.total_weight() - naive_mst_weight(&matrix)).abs() < 1e-6);
        }
    }

    #[test]
    fn invariant_under_relabeling() {
        let mut rng = Pcg64::seed_from_u64(0xbeef);

        let instances = random_metric_instances(&mut rng, 2..30).take(50).collect_vec();
        for matrix in instances {
            let mapping = random_permutation(&mut rng, matrix.number_of_nodes());
            let relabeled = matrix.relabeled(&mapping);

            let original = build_mst(&matrix).total_weight();
            let permuted = build_mst(&relabeled).total_weight();
            assert!((original - permuted).abs() < 1e-6, "{original} vs {permuted}");

            let start = rng.gen_range(0..matrix.number_of_nodes());
            let rooted = build_mst_from(&matrix, start).total_weight();
            assert!((original - rooted).abs() < 1e-6);
        }
    }

    #[test]
    fn ties_prefer_smaller_origin() {
        // all weights equal: every vertex attaches to the smallest tree vertex
        let matrix = WeightMatrix::from_symmetric_fn(6, |_, _| 1.0).unwrap();

        let tree = build_mst(&matrix);
        assert_eq!(tree.degrees().collect_vec(), [5, 1, 1, 1, 1, 1]);
        assert_eq!(
            tree.neighbors_of(0).iter().map(|&(v, _)| v).collect_vec(),
            [1, 2, 3, 4, 5]
        );

        // 3-0 is committed first, after which every (1, 0, x) beats (1, 3, x)
        let tree = build_mst_from(&matrix, 3);
        assert_eq!(tree.degree_of(0), 5);
        assert_eq!(tree.degree_of(3), 1);
        assert_eq!(
            tree.neighbors_of(0).iter().map(|&(v, _)| v).collect_vec(),
            [3, 1, 2, 4, 5]
        );
    }

    #[test]
    fn four_vertices() {
        let matrix = WeightMatrix::try_from_rows(&[
            [0.0, 1.0, 2.0, 2.0],
            [1.0, 0.0, 2.0, 2.0],
            [2.0, 2.0, 0.0, 1.0],
            [2.0, 2.0, 1.0, 0.0],
        ])
        .unwrap();

        let tree = build_mst(&matrix);
        assert_eq!(tree.total_weight(), 4.0);
        assert_eq!(
            tree.edges().map(|e| e.edge()).sorted().collect_vec(),
            [Edge(0, 1), Edge(0, 2), Edge(2, 3)]
        );
    }

    #[test]
    fn single_vertex() {
        let matrix = WeightMatrix::try_from_rows(&[[0.0]]).unwrap();
        let tree = build_mst(&matrix);
        assert_eq!(tree.number_of_nodes(), 1);
        assert_eq!(tree.number_of_edges(), 0);
        assert_eq!(tree.total_weight(), 0.0);
    }
}
