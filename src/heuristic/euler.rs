use log::{debug, trace};

use crate::{errors::StructuralError, graph::*};

/// Extracts an Eulerian circuit starting and ending at `start` with Hierholzer's algorithm.
///
/// The walk keeps a stack of vertices. While the top vertex has an incident edge, the edge is
/// removed from both endpoint lists and its other endpoint is pushed; otherwise the vertex is
/// popped and appended to the circuit. The circuit is thus emitted in backtracking order.
///
/// The multigraph is consumed. Every vertex must have even degree and all edges must be
/// reachable from `start`; otherwise the walk either strands edges or ends elsewhere, which is
/// reported as [`StructuralError`]. On success the circuit has `m + 1` entries.
/// ** Panics if `start >= n` **
pub fn extract_eulerian_circuit(
    mut graph: Multigraph,
    start: Node,
) -> Result<Vec<Node>, StructuralError> {
    assert!(start < graph.number_of_nodes());

    let number_of_edges = graph.number_of_edges();
    let mut circuit = Vec::with_capacity(number_of_edges as usize + 1);
    let mut stack = vec![start];

    while let Some(&u) = stack.last() {
        match graph.try_take_edge_at(u)? {
            Some(WeightedEdge(_, v, w)) => {
                trace!("walk {u} -> {v} (weight {w})");
                stack.push(v);
            }
            None => {
                stack.pop();
                circuit.push(u);
            }
        }
    }

    if !graph.is_drained() {
        return Err(StructuralError::ResidualEdges {
            start,
            remaining: graph.number_of_edges(),
            vertices: graph.non_empty_vertices(),
        });
    }

    let end = circuit[0];
    if end != start {
        return Err(StructuralError::OpenWalk { start, end });
    }

    debug!("eulerian circuit from {start} traverses {number_of_edges} edges");
    debug_assert_eq!(circuit.len() as NumEdges, number_of_edges + 1);

    Ok(circuit)
}
