use itertools::Itertools;

use crate::graph::*;

/// Sums the weights of consecutive pairs along `cycle`
pub fn total_cost(graph: &impl WeightLookup, cycle: &[Node]) -> Weight {
    cycle
        .iter()
        .tuple_windows()
        .map(|(&u, &v)| graph.weight(u, v))
        .sum()
}
