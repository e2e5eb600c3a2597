use fxhash::FxHashSet;

use crate::graph::*;

/// Turns a closed walk into a Hamiltonian cycle on the visited vertices: keeps the first
/// occurrence of every vertex in walk order and closes the cycle by repeating the first vertex.
///
/// For a circuit covering `n` vertices the result has `n + 1` entries. The result is only
/// no longer than the walk if the weights satisfy the triangle inequality.
pub fn shortcut(circuit: &[Node]) -> Vec<Node> {
    let Some(&first) = circuit.first() else {
        return Vec::new();
    };

    let mut seen = FxHashSet::default();
    let mut cycle: Vec<Node> = circuit.iter().copied().filter(|&u| seen.insert(u)).collect();
    cycle.push(first);

    cycle
}
