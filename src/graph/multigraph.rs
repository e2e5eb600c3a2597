use crate::errors::{InvariantCheck, StructuralError};

use super::*;

/// Undirected multigraph stored as index-based adjacency lists of `(neighbor, weight)` pairs.
///
/// Every edge `{u, v}` is stored twice, once in the list of `u` and once in the list of `v`.
/// Parallel edges are allowed (the matching may duplicate a tree edge), self-loops are not.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Multigraph {
    adj: Vec<Vec<(Node, Weight)>>,
    number_of_edges: NumEdges,
}

macro_rules! node_iterator {
    ($iter : ident, $single : ident, $type : ty) => {
        pub fn $iter(&self) -> impl Iterator<Item = $type> + '_ {
            self.vertices().map(|u| self.$single(u))
        }
    };
}

impl Multigraph {
    /// Creates an empty graph with n singleton nodes
    pub fn new(number_of_nodes: NumNodes) -> Self {
        Self {
            adj: vec![Vec::new(); number_of_nodes as usize],
            number_of_edges: 0,
        }
    }

    /// Returns the adjacency list of `u` in insertion order.
    /// ** Panics if u >= n **
    pub fn neighbors_of(&self, u: Node) -> &[(Node, Weight)] {
        &self.adj[u as usize]
    }

    pub fn degree_of(&self, u: Node) -> NumNodes {
        self.adj[u as usize].len() as NumNodes
    }

    node_iterator!(degrees, degree_of, NumNodes);
    node_iterator!(neighbors, neighbors_of, &[(Node, Weight)]);

    /// Iterates over every undirected edge exactly once, reported from its smaller endpoint
    pub fn edges(&self) -> impl Iterator<Item = WeightedEdge> + '_ {
        self.vertices().flat_map(move |u| {
            self.neighbors_of(u)
                .iter()
                .filter(move |&&(v, _)| u < v)
                .map(move |&(v, w)| WeightedEdge(u, v, w))
        })
    }

    /// Half the sum of all adjacency weights, i.e. each edge counted once
    pub fn total_weight(&self) -> Weight {
        self.adj
            .iter()
            .flat_map(|list| list.iter().map(|&(_, w)| w))
            .sum::<Weight>()
            / 2.0
    }

    /// Inserts the undirected edge `{u, v}` into both adjacency lists. A matching entry that is
    /// already present yields a parallel edge.
    /// ** Panics on self-loops or if u, v >= n **
    pub fn add_edge(&mut self, u: Node, v: Node, weight: Weight) {
        assert_ne!(u, v, "self-loops are not supported");
        self.adj[u as usize].push((v, weight));
        self.adj[v as usize].push((u, weight));
        self.number_of_edges += 1;
    }

    pub fn add_edges(&mut self, edges: impl IntoIterator<Item = impl Into<WeightedEdge>>) {
        for WeightedEdge(u, v, w) in edges.into_iter().map(|e| e.into()) {
            self.add_edge(u, v, w);
        }
    }

    /// Removes one edge incident to `u` from both endpoint lists and returns it as
    /// `WeightedEdge(u, v, w)`. The most recently inserted entry of `u` is taken; at `v` the
    /// first entry matching `(u, w)` is removed, so of several identical parallel edges exactly
    /// one disappears. Returns `Ok(None)` if `u` is isolated.
    pub fn try_take_edge_at(&mut self, u: Node) -> Result<Option<WeightedEdge>, StructuralError> {
        let Some((v, weight)) = self.adj[u as usize].pop() else {
            return Ok(None);
        };

        let reverse = &mut self.adj[v as usize];
        match reverse.iter().position(|&(x, w)| x == u && w == weight) {
            Some(pos) => {
                reverse.remove(pos);
            }
            None => {
                // keep the structure unchanged so that the caller can inspect it
                self.adj[u as usize].push((v, weight));
                return Err(StructuralError::AsymmetricAdjacency { u, v, weight });
            }
        }

        self.number_of_edges -= 1;
        Ok(Some(WeightedEdge(u, v, weight)))
    }

    /// Returns true if no edges remain
    pub fn is_drained(&self) -> bool {
        self.adj.iter().all(|list| list.is_empty())
    }

    /// Vertices whose adjacency list still holds at least one entry
    pub fn non_empty_vertices(&self) -> Vec<Node> {
        self.vertices()
            .filter(|&u| !self.adj[u as usize].is_empty())
            .collect()
    }
}

impl GraphNodeOrder for Multigraph {
    fn number_of_nodes(&self) -> NumNodes {
        self.adj.len() as NumNodes
    }
}

impl GraphEdgeOrder for Multigraph {
    fn number_of_edges(&self) -> NumEdges {
        self.number_of_edges
    }
}

impl InvariantCheck<StructuralError> for Multigraph {
    /// Every entry `(v, w)` at `u` has to be mirrored by an entry `(u, w)` at `v` with the same
    /// multiplicity.
    fn is_correct(&self) -> Result<(), StructuralError> {
        let mut total_entries: NumEdges = 0;

        for u in self.vertices() {
            let list = self.neighbors_of(u);
            total_entries += list.len() as NumEdges;

            for &(v, w) in list {
                let count = |from: Node, to: Node| {
                    self.neighbors_of(from)
                        .iter()
                        .filter(|&&(x, y)| x == to && y == w)
                        .count()
                };

                if v == u || count(u, v) != count(v, u) {
                    return Err(StructuralError::AsymmetricAdjacency { u, v, weight: w });
                }
            }
        }

        debug_assert_eq!(total_entries, 2 * self.number_of_edges);
        Ok(())
    }
}
