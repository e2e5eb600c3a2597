use log::debug;

use crate::{
    errors::{ChristofidesError, StructuralError},
    graph::*,
    matching::{MatchingOracle, validate_perfect_matching},
};

/// Adds a minimum-weight perfect matching on the odd-degree vertices `odd` to `tree`.
///
/// The complete subgraph induced by `odd` is handed to `oracle`; its answer is validated and
/// every pair is inserted as an edge with its weight from `matrix`, yielding parallel edges where
/// a pair duplicates a tree edge. Afterwards every vertex has even degree.
///
/// Returns the total weight of the matching. The oracle is not consulted if `odd` is empty.
pub fn augment_with_matching<O: MatchingOracle + ?Sized>(
    tree: &mut Multigraph,
    odd: &[Node],
    matrix: &WeightMatrix,
    oracle: &O,
) -> Result<Weight, ChristofidesError> {
    if odd.len() % 2 == 1 {
        return Err(StructuralError::OddNumberOfOddVertices { count: odd.len() }.into());
    }

    if odd.is_empty() {
        return Ok(0.0);
    }

    let subgraph = matrix.induced_subgraph(odd);
    let pairs = oracle.solve_min_weight_perfect_matching(&subgraph)?;
    validate_perfect_matching(subgraph.number_of_nodes(), &pairs)?;

    let mut matching_weight = 0.0;
    for Edge(a, b) in pairs {
        let u = subgraph.global_id(a);
        let v = subgraph.global_id(b);
        let weight = matrix.weight(u, v);

        tree.add_edge(u, v, weight);
        matching_weight += weight;
    }

    debug!(
        "oracle {} matched {} vertices with weight {matching_weight}",
        oracle.name(),
        odd.len()
    );

    if let Some(node) = tree.vertices().find(|&u| tree.degree_of(u) % 2 == 1) {
        return Err(StructuralError::OddDegree {
            node,
            degree: tree.degree_of(node),
        }
        .into());
    }

    Ok(matching_weight)
}
