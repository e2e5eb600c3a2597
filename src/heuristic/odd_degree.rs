use crate::graph::*;

/// Returns all vertices of odd degree in increasing order. By the handshake lemma their number
/// is even for every multigraph.
pub fn odd_vertices(graph: &Multigraph) -> Vec<Node> {
    graph
        .vertices()
        .filter(|&u| graph.degree_of(u) % 2 == 1)
        .collect()
}

#[cfg(test)]
mod test {
    use rand::SeedableRng;
    use rand_pcg::Pcg64;

    use super::*;
    use crate::{heuristic::build_mst, testing::random_metric_instances};

    #[test]
    fn path() {
        let mut graph = Multigraph::new(5);
        graph.add_edges([(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]);
        assert_eq!(odd_vertices(&graph), vec![0, 3]);

        // a parallel edge fixes the parity of both endpoints
        graph.add_edge(2, 3, 1.0);
        assert_eq!(odd_vertices(&graph), vec![0, 2]);
    }

    #[test]
    fn even_count_in_spanning_trees() {
        let mut rng = Pcg64::seed_from_u64(42);

        for matrix in random_metric_instances(&mut rng, 1..50).take(200) {
            let tree = build_mst(&matrix);
            let odd = odd_vertices(&tree);

            assert_eq!(odd.len() % 2, 0);
            if matrix.number_of_nodes() >= 2 {
                // every tree has at least two leaves
                assert!(odd.len() >= 2);
            }
        }
    }
}
