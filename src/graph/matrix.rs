use crate::errors::{InputError, InvariantCheck};

use super::*;

/// Dense weight matrix of a complete, undirected graph over the vertices `0..n`.
///
/// The matrix is stored row-major. Diagonal entries are ignored on construction and read as `0`.
/// Every constructor validates the input, so a `WeightMatrix` in hand is square, symmetric,
/// finite and non-negative.
#[derive(Clone, Debug, PartialEq)]
pub struct WeightMatrix {
    number_of_nodes: NumNodes,
    weights: Vec<Weight>,
}

impl WeightMatrix {
    /// Builds a matrix from its rows; the number of rows determines `n`.
    pub fn try_from_rows<R: AsRef<[Weight]>>(rows: &[R]) -> Result<Self, InputError> {
        let n = Self::number_of_rows(rows.len())?;
        if n == 0 {
            return Err(InputError::Empty);
        }

        let mut weights = Vec::with_capacity(rows.len() * rows.len());
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != n as usize {
                return Err(InputError::NotSquare {
                    row: row_idx as NumNodes,
                    expected: n,
                    found: row.len(),
                });
            }
            weights.extend_from_slice(row);
        }

        Self::try_from_raw(n, weights)
    }

    /// Builds the matrix by evaluating `weight(u, v)` for every `u < v` and mirroring the result.
    pub fn from_symmetric_fn(
        n: NumNodes,
        mut weight: impl FnMut(Node, Node) -> Weight,
    ) -> Result<Self, InputError> {
        let mut weights = vec![0.0; (n as usize) * (n as usize)];
        for u in 0..n {
            for v in (u + 1)..n {
                let w = weight(u, v);
                weights[Self::index(n, u, v)] = w;
                weights[Self::index(n, v, u)] = w;
            }
        }

        Self::try_from_raw(n, weights)
    }

    fn number_of_rows(count: usize) -> Result<NumNodes, InputError> {
        NumNodes::try_from(count).map_err(|_| InputError::TooManyRows { count })
    }

    fn try_from_raw(n: NumNodes, mut weights: Vec<Weight>) -> Result<Self, InputError> {
        debug_assert_eq!(weights.len(), (n as usize) * (n as usize));
        for u in 0..n {
            weights[Self::index(n, u, u)] = 0.0;
        }

        let matrix = Self {
            number_of_nodes: n,
            weights,
        };
        matrix.is_correct()?;
        Ok(matrix)
    }

    #[inline]
    fn index(n: NumNodes, u: Node, v: Node) -> usize {
        (u as usize) * (n as usize) + v as usize
    }

    /// Returns the weights of all edges incident to `u` (with a `0` at position `u`)
    pub fn row(&self, u: Node) -> &[Weight] {
        let n = self.number_of_nodes as usize;
        &self.weights[(u as usize) * n..(u as usize + 1) * n]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[Weight]> + '_ {
        self.weights.chunks_exact(self.number_of_nodes as usize)
    }

    /// Largest off-diagonal weight; `0` for a single vertex
    pub fn max_weight(&self) -> Weight {
        self.weights.iter().copied().fold(0.0, Weight::max)
    }

    /// Returns the matrix in which vertex `i` takes the role of vertex `mapping[i]`.
    /// ** Panics if `mapping` is not a permutation of `0..n` **
    pub fn relabeled(&self, mapping: &[Node]) -> Self {
        assert_eq!(mapping.len(), self.len());
        let mut seen = vec![false; self.len()];
        for &x in mapping {
            assert!(!std::mem::replace(&mut seen[x as usize], true));
        }

        let n = self.number_of_nodes;
        let mut weights = vec![0.0; self.weights.len()];
        for u in 0..n {
            for v in 0..n {
                weights[Self::index(n, u, v)] =
                    self.weight(mapping[u as usize], mapping[v as usize]);
            }
        }

        Self {
            number_of_nodes: n,
            weights,
        }
    }
}

impl GraphNodeOrder for WeightMatrix {
    fn number_of_nodes(&self) -> NumNodes {
        self.number_of_nodes
    }
}

impl GraphEdgeOrder for WeightMatrix {
    fn number_of_edges(&self) -> NumEdges {
        let n = self.number_of_nodes as NumEdges;
        n * n.saturating_sub(1) / 2
    }
}

impl WeightLookup for WeightMatrix {
    #[inline]
    fn weight(&self, u: Node, v: Node) -> Weight {
        self.weights[Self::index(self.number_of_nodes, u, v)]
    }
}

impl InvariantCheck<InputError> for WeightMatrix {
    fn is_correct(&self) -> Result<(), InputError> {
        let n = self.number_of_nodes;
        if n == 0 {
            return Err(InputError::Empty);
        }

        for u in 0..n {
            for v in (u + 1)..n {
                let forward = self.weight(u, v);
                let backward = self.weight(v, u);

                if !forward.is_finite() {
                    return Err(InputError::NonFinite { u, v });
                }
                if !backward.is_finite() {
                    return Err(InputError::NonFinite { u: v, v: u });
                }
                if forward != backward {
                    return Err(InputError::Asymmetric {
                        u,
                        v,
                        forward,
                        backward,
                    });
                }
                if forward < 0.0 {
                    return Err(InputError::NegativeWeight {
                        u,
                        v,
                        weight: forward,
                    });
                }
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn from_rows() {
        let matrix =
            WeightMatrix::try_from_rows(&[[7.0, 1.0, 2.0], [1.0, 7.0, 3.0], [2.0, 3.0, 7.0]])
                .unwrap();

        assert_eq!(matrix.number_of_nodes(), 3);
        assert_eq!(matrix.number_of_edges(), 3);
        assert_eq!(matrix.weight(0, 2), 2.0);
        assert_eq!(matrix.weight(2, 1), 3.0);
        // diagonal is ignored
        assert_eq!(matrix.weight(1, 1), 0.0);
        assert_eq!(matrix.row(1), &[1.0, 0.0, 3.0]);
        assert_eq!(matrix.rows().count(), 3);
        assert_eq!(matrix.max_weight(), 3.0);
    }

    #[test]
    fn rejects_invalid_input() {
        let empty: [[Weight; 0]; 0] = [];
        assert_eq!(WeightMatrix::try_from_rows(&empty), Err(InputError::Empty));

        assert_eq!(
            WeightMatrix::try_from_rows(&[vec![0.0, 1.0], vec![1.0]]),
            Err(InputError::NotSquare {
                row: 1,
                expected: 2,
                found: 1
            })
        );

        assert_eq!(
            WeightMatrix::try_from_rows(&[[0.0, 1.0], [2.0, 0.0]]),
            Err(InputError::Asymmetric {
                u: 0,
                v: 1,
                forward: 1.0,
                backward: 2.0
            })
        );

        assert_eq!(
            WeightMatrix::try_from_rows(&[[0.0, -1.0], [-1.0, 0.0]]),
            Err(InputError::NegativeWeight {
                u: 0,
                v: 1,
                weight: -1.0
            })
        );

        assert!(matches!(
            WeightMatrix::try_from_rows(&[[0.0, Weight::NAN], [Weight::NAN, 0.0]]),
            Err(InputError::NonFinite { .. })
        ));
    }

    #[test]
    #[cfg(target_pointer_width = "64")]
    fn row_count_must_fit_node_ids() {
        assert_eq!(WeightMatrix::number_of_rows(5), Ok(5));
        assert_eq!(
            WeightMatrix::number_of_rows(NumNodes::MAX as usize),
            Ok(NumNodes::MAX)
        );

        let count = NumNodes::MAX as usize + 1;
        assert_eq!(
            WeightMatrix::number_of_rows(count),
            Err(InputError::TooManyRows { count })
        );
    }

    #[test]
    fn diagonal_is_ignored() {
        let matrix = WeightMatrix::try_from_rows(&[[-5.0, 1.0], [1.0, Weight::NAN]]).unwrap();
        assert_eq!(matrix.weight(0, 0), 0.0);
        assert_eq!(matrix.weight(1, 1), 0.0);
    }

    #[test]
    fn symmetric_fn() {
        let matrix = WeightMatrix::from_symmetric_fn(5, |u, v| (u + 2 * v) as Weight).unwrap();
        for u in 0..5 {
            for v in 0..5 {
                assert_eq!(matrix.weight(u, v), matrix.weight(v, u));
            }
        }
        assert_eq!(matrix.weight(3, 1), 7.0);
    }

    #[test]
    fn relabel() {
        let matrix = WeightMatrix::from_symmetric_fn(4, |u, v| (10 * u + v) as Weight).unwrap();
        let relabeled = matrix.relabeled(&[2, 0, 3, 1]);
        assert!(relabeled.is_correct().is_ok());
        assert_eq!(relabeled.weight(0, 1), matrix.weight(2, 0));
        assert_eq!(relabeled.weight(2, 3), matrix.weight(3, 1));
    }
}
