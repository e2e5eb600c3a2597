pub mod edge;
pub mod euclidean;
pub mod matrix;
pub mod multigraph;
pub mod subgraph;

pub type Node = u32;
pub type NumNodes = Node;
pub type NumEdges = u64;
pub type Weight = f64;

use std::ops::Range;

pub use edge::*;
pub use euclidean::*;
pub use matrix::*;
pub use multigraph::*;
pub use subgraph::*;

/// Provides getters pertaining to the size of a graph
pub trait GraphNodeOrder {
    /// Returns the number of nodes of the graph
    fn number_of_nodes(&self) -> NumNodes;

    /// Return the number of nodes as usize
    fn len(&self) -> usize {
        self.number_of_nodes() as usize
    }

    /// Returns an iterator over V.
    /// The range does not borrow self and hence may be used where a mutable reference to
    /// the graph is needed inside the loop.
    fn vertices(&self) -> Range<Node> {
        0..self.number_of_nodes()
    }

    /// Returns true if the graph has no nodes (and thus no edges)
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

pub trait GraphEdgeOrder {
    /// Returns the number of (undirected) edges of the graph; parallel edges count individually
    fn number_of_edges(&self) -> NumEdges;
}

/// Read access to the weight of the undirected edge {u, v} of a complete graph.
pub trait WeightLookup: GraphNodeOrder {
    /// ** Panics if u, v >= n **
    fn weight(&self, u: Node, v: Node) -> Weight;

    /// Sum of the weights of all edges in the iterator
    fn weight_of_edges(&self, edges: impl IntoIterator<Item = Edge>) -> Weight {
        edges.into_iter().map(|Edge(u, v)| self.weight(u, v)).sum()
    }
}
