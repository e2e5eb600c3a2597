use rand::Rng;

use crate::graph::*;

pub trait EuclideanGenerator: Sized {
    /// Places `n` points independently and uniformly at random in the square `[0, side)^2` and
    /// returns the complete graph of their Euclidean distances. Such instances are metric.
    fn random_euclidean<R: Rng>(rng: &mut R, n: NumNodes, side: Weight) -> Self;

    /// Same as [`EuclideanGenerator::random_euclidean`] but rounds every distance up to the next
    /// integer. Rounding up keeps the triangle inequality intact and produces many ties.
    fn random_rounded_euclidean<R: Rng>(rng: &mut R, n: NumNodes, side: Weight) -> Self;
}

fn random_points<R: Rng>(rng: &mut R, n: NumNodes, side: Weight) -> Vec<(Weight, Weight)> {
    assert!(side > 0.0);
    (0..n)
        .map(|_| (rng.gen_range(0.0..side), rng.gen_range(0.0..side)))
        .collect()
}

fn distance(a: (Weight, Weight), b: (Weight, Weight)) -> Weight {
    (a.0 - b.0).hypot(a.1 - b.1)
}

impl EuclideanGenerator for WeightMatrix {
    fn random_euclidean<R: Rng>(rng: &mut R, n: NumNodes, side: Weight) -> Self {
        assert!(n > 0);
        let points = random_points(rng, n, side);
        Self::from_symmetric_fn(n, |u, v| distance(points[u as usize], points[v as usize]))
            .expect("euclidean distances are finite and symmetric")
    }

    fn random_rounded_euclidean<R: Rng>(rng: &mut R, n: NumNodes, side: Weight) -> Self {
        assert!(n > 0);
        let points = random_points(rng, n, side);
        Self::from_symmetric_fn(n, |u, v| {
            distance(points[u as usize], points[v as usize]).ceil()
        })
        .expect("euclidean distances are finite and symmetric")
    }
}
