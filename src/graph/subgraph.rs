use super::*;

/// Complete graph induced by a subset of the vertices of a [`WeightMatrix`].
///
/// The subgraph uses local indices `0..k` where local vertex `i` corresponds to the `i`-th node of
/// the list it was created from. Self-loops are not part of the subgraph.
#[derive(Clone, Debug, PartialEq)]
pub struct Subgraph {
    nodes: Vec<Node>,
    weights: Vec<Weight>,
}

impl Subgraph {
    /// Returns the id of local vertex `u` in the parent graph
    pub fn global_id(&self, u: Node) -> Node {
        self.nodes[u as usize]
    }

    pub fn global_ids(&self) -> &[Node] {
        &self.nodes
    }

    /// Iterates over all `k(k-1)/2` edges `(u, v, w)` with local ids `u < v`
    pub fn edges(&self) -> impl Iterator<Item = WeightedEdge> + '_ {
        let k = self.number_of_nodes();
        (0..k).flat_map(move |u| ((u + 1)..k).map(move |v| WeightedEdge(u, v, self.weight(u, v))))
    }

    /// Largest edge weight; `0` if there are no edges
    pub fn max_weight(&self) -> Weight {
        self.weights.iter().copied().fold(0.0, Weight::max)
    }
}

impl WeightMatrix {
    /// Builds the complete subgraph induced by `nodes` (in the given order).
    /// ** Panics if a node is out of range **
    pub fn induced_subgraph(&self, nodes: &[Node]) -> Subgraph {
        let mut weights = Vec::with_capacity(nodes.len() * nodes.len());
        for &u in nodes {
            for &v in nodes {
                weights.push(if u == v { 0.0 } else { self.weight(u, v) });
            }
        }

        Subgraph {
            nodes: nodes.to_vec(),
            weights,
        }
    }
}

impl GraphNodeOrder for Subgraph {
    fn number_of_nodes(&self) -> NumNodes {
        self.nodes.len() as NumNodes
    }
}

impl GraphEdgeOrder for Subgraph {
    fn number_of_edges(&self) -> NumEdges {
        let k = self.number_of_nodes() as NumEdges;
        k * k.saturating_sub(1) / 2
    }
}

impl WeightLookup for Subgraph {
    #[inline]
    fn weight(&self, u: Node, v: Node) -> Weight {
        self.weights[(u as usize) * self.nodes.len() + v as usize]
    }
}

#[cfg(test)]
mod test {
    use itertools::Itertools;

    use super::*;

    #[test]
    fn induced() {
        let matrix = WeightMatrix::from_symmetric_fn(6, |u, v| (u * v) as Weight + 1.0).unwrap();
        let sub = matrix.induced_subgraph(&[5, 1, 3]);

        assert_eq!(sub.number_of_nodes(), 3);
        assert_eq!(sub.number_of_edges(), 3);
        assert_eq!(sub.global_id(0), 5);
        assert_eq!(sub.global_ids(), &[5, 1, 3]);
        assert_eq!(sub.weight(0, 1), 6.0);
        assert_eq!(sub.weight(2, 0), 16.0);
        assert_eq!(sub.weight(1, 1), 0.0);
        assert_eq!(sub.max_weight(), 16.0);

        let edges = sub.edges().collect_vec();
        assert_eq!(
            edges,
            vec![
                WeightedEdge(0, 1, 6.0),
                WeightedEdge(0, 2, 16.0),
                WeightedEdge(1, 2, 4.0)
            ]
        );
        assert_eq!(sub.weight_of_edges([Edge(0, 1), Edge(1, 2)]), 10.0);
    }

    #[test]
    fn empty() {
        let matrix = WeightMatrix::from_symmetric_fn(3, |_, _| 1.0).unwrap();
        let sub = matrix.induced_subgraph(&[]);
        assert!(sub.is_empty());
        assert_eq!(sub.edges().count(), 0);
        assert_eq!(sub.max_weight(), 0.0);
    }
}
