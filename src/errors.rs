use std::error::Error;

use thiserror::Error;

use crate::graph::{Node, NumNodes, Weight};

/// Trait for checking invariants in datastructures
pub trait InvariantCheck<E: Error> {
    fn is_correct(&self) -> Result<(), E>;
}

/// Violations of the input contract: the weight matrix (or the run parameters derived from it)
/// cannot be processed. Raised before any algorithmic work is done.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InputError {
    #[error("weight matrix has no vertices")]
    Empty,

    #[error("weight matrix has {count} rows, more vertices than can be addressed")]
    TooManyRows { count: usize },

    #[error("weight matrix is not square: row {row} has {found} entries, expected {expected}")]
    NotSquare {
        row: NumNodes,
        expected: NumNodes,
        found: usize,
    },

    #[error("weight matrix is not symmetric: w({u},{v}) = {forward} but w({v},{u}) = {backward}")]
    Asymmetric {
        u: Node,
        v: Node,
        forward: Weight,
        backward: Weight,
    },

    #[error("negative weight w({u},{v}) = {weight}")]
    NegativeWeight { u: Node, v: Node, weight: Weight },

    #[error("weight w({u},{v}) is not a finite number")]
    NonFinite { u: Node, v: Node },

    #[error("start vertex {start} is out of range for {number_of_nodes} vertices")]
    StartOutOfRange {
        start: Node,
        number_of_nodes: NumNodes,
    },
}

/// A precondition of a later pipeline stage was broken by an earlier one. These are never
/// recovered from; continuing would produce a plausible looking but wrong tour.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum StructuralError {
    #[error("found an odd number ({count}) of odd-degree vertices")]
    OddNumberOfOddVertices { count: usize },

    #[error("vertex {node} has degree {degree} after augmentation, expected an even degree")]
    OddDegree { node: Node, degree: NumNodes },

    #[error("edge ({u},{v}) with weight {weight} has no mirrored entry at vertex {v}")]
    AsymmetricAdjacency { u: Node, v: Node, weight: Weight },

    #[error(
        "eulerian walk from {start} left {remaining} edges untouched at vertices {vertices:?}"
    )]
    ResidualEdges {
        start: Node,
        remaining: u64,
        vertices: Vec<Node>,
    },

    #[error("eulerian walk from {start} is not closed; it ends at vertex {end}")]
    OpenWalk { start: Node, end: Node },

    #[error("shortcut cycle visits {found} distinct vertices, expected {expected}")]
    IncompleteCycle { expected: NumNodes, found: NumNodes },
}

/// The matching oracle could not deliver a valid minimum-weight perfect matching.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum OracleError {
    #[error("cannot perfectly match an odd number ({count}) of vertices")]
    OddVertexCount { count: NumNodes },

    #[error("oracle {oracle} supports at most {limit} vertices, got {count}")]
    TooManyVertices {
        oracle: &'static str,
        count: NumNodes,
        limit: NumNodes,
    },

    #[error("matching refers to unknown vertex {node} (subgraph has {number_of_nodes} vertices)")]
    UnknownVertex {
        node: Node,
        number_of_nodes: NumNodes,
    },

    #[error("matching pairs vertex {node} with itself")]
    SelfPair { node: Node },

    #[error("vertex {node} is matched more than once")]
    DuplicateVertex { node: Node },

    #[error("vertices {nodes:?} are left unmatched")]
    Unmatched { nodes: Vec<Node> },
}

/// Umbrella error of the whole pipeline
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ChristofidesError {
    #[error("invalid input: {0}")]
    Input(#[from] InputError),

    #[error("structural invariant violated: {0}")]
    Structural(#[from] StructuralError),

    #[error("matching oracle failed: {0}")]
    Oracle(#[from] OracleError),
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn messages_carry_context() {
        let err: ChristofidesError = StructuralError::OddDegree { node: 3, degree: 5 }.into();
        let msg = err.to_string();
        assert!(msg.contains("vertex 3"), "{msg}");
        assert!(msg.contains("degree 5"), "{msg}");

        let err: ChristofidesError = InputError::Asymmetric {
            u: 0,
            v: 2,
            forward: 1.0,
            backward: 2.5,
        }
        .into();
        assert!(matches!(err, ChristofidesError::Input(_)));
        assert!(err.to_string().contains("w(2,0) = 2.5"));
    }
}
