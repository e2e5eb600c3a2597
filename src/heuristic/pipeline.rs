use itertools::Itertools;
use log::{debug, info};
use serde::Serialize;

use super::*;
use crate::{
    errors::{ChristofidesError, InputError, InvariantCheck, StructuralError},
    matching::MatchingOracle,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ChristofidesConfig {
    /// Root of the spanning tree and start of the Eulerian walk; first and last vertex of the tour
    pub start: Node,
    /// Re-validate the matrix and the multigraph between stages
    pub check_invariants: bool,
}

impl Default for ChristofidesConfig {
    fn default() -> Self {
        Self {
            start: 0,
            check_invariants: true,
        }
    }
}

/// Result of a single run
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TourReport {
    /// Edges of the spanning tree, normalized and sorted
    pub mst_edges: Vec<WeightedEdge>,
    pub mst_weight: Weight,
    pub matching_weight: Weight,
    /// Closed tour of `n + 1` vertices with `tour[0] == tour[n]`
    pub tour: Vec<Node>,
    pub tour_weight: Weight,
}

/// # Christofides' heuristic for the metric TSP
///
/// 1. Computes a minimum spanning tree `T` (Prim)
/// 2. Selects the vertices `O` of odd degree in `T`
/// 3. Adds a minimum-weight perfect matching on `O` to `T`
/// 4. Extracts an Eulerian circuit of the resulting multigraph
/// 5. Shortcuts the circuit into a Hamiltonian cycle
///
/// If the weights satisfy the triangle inequality, the tour is at most 1.5 times as long as an
/// optimal one.
pub struct Christofides<'a, O> {
    matrix: &'a WeightMatrix,
    oracle: O,
    config: ChristofidesConfig,
}

impl<'a, O: MatchingOracle> Christofides<'a, O> {
    pub fn new(matrix: &'a WeightMatrix, oracle: O) -> Self {
        Self {
            matrix,
            oracle,
            config: ChristofidesConfig::default(),
        }
    }

    pub fn with_config(mut self, config: ChristofidesConfig) -> Self {
        self.config = config;
        self
    }

    pub fn config(&self) -> &ChristofidesConfig {
        &self.config
    }

    pub fn run(&self) -> Result<TourReport, ChristofidesError> {
        let matrix = self.matrix;
        let n = matrix.number_of_nodes();
        let ChristofidesConfig {
            start,
            check_invariants,
        } = self.config;

        if check_invariants {
            matrix.is_correct()?;
        }

        if start >= n {
            return Err(InputError::StartOutOfRange {
                start,
                number_of_nodes: n,
            }
            .into());
        }

        if n == 1 {
            info!("single vertex; returning the trivial tour");
            return Ok(TourReport {
                mst_edges: Vec::new(),
                mst_weight: 0.0,
                matching_weight: 0.0,
                tour: vec![start, start],
                tour_weight: 0.0,
            });
        }

        let mut multigraph = build_mst_from(matrix, start);
        let mst_weight = multigraph.total_weight();
        let mst_edges = multigraph
            .edges()
            .sorted_by(|a, b| a.edge().cmp(&b.edge()))
            .collect_vec();
        info!(
            "minimum spanning tree has {} edges and weight {mst_weight}",
            multigraph.number_of_edges()
        );

        let odd = odd_vertices(&multigraph);
        info!("{} vertices of odd degree", odd.len());

        let matching_weight = augment_with_matching(&mut multigraph, &odd, matrix, &self.oracle)?;
        info!(
            "matching of weight {matching_weight}; multigraph has {} edges",
            multigraph.number_of_edges()
        );

        if check_invariants {
            multigraph.is_correct()?;
        }

        let circuit = extract_eulerian_circuit(multigraph, start)?;
        info!("eulerian circuit visits {} vertices", circuit.len());

        let tour = shortcut(&circuit);
        debug!("shortcut removed {} repeated visits", circuit.len().saturating_sub(tour.len()));

        if tour.len() != n as usize + 1 {
            return Err(StructuralError::IncompleteCycle {
                expected: n,
                found: tour.len().saturating_sub(1) as NumNodes,
            }
            .into());
        }

        let tour_weight = total_cost(matrix, &tour);
        info!("tour weight {tour_weight}");

        Ok(TourReport {
            mst_edges,
            mst_weight,
            matching_weight,
            tour,
            tour_weight,
        })
    }
}

/// Runs [`Christofides`] with the default configuration
pub fn christofides<O: MatchingOracle + ?Sized>(
    matrix: &WeightMatrix,
    oracle: &O,
) -> Result<TourReport, ChristofidesError> {
    Christofides::new(matrix, oracle).run()
}

#[cfg(test)]
mod test {
    use itertools::Itertools;
    use rand::{Rng, SeedableRng};
    use rand_pcg::Pcg64;

    use super::*;
    use crate::{
        errors::OracleError,
        matching::{BlossomMatcher, ExhaustiveMatcher, OracleKind},
        testing::{brute_force_optimal_tour, random_metric_instances, random_permutation},
    };

    struct PanickingOracle;

    impl MatchingOracle for PanickingOracle {
        fn name(&self) -> &'static str {
            "panicking"
        }

        fn solve_min_weight_perfect_matching(
            &self,
            _graph: &Subgraph,
        ) -> Result<Vec<Edge>, OracleError> {
            panic!("oracle must not be invoked");
        }
    }

    fn four_vertex_example() -> WeightMatrix {
        WeightMatrix::try_from_rows(&[
            [0.0, 1.0, 2.0, 2.0],
            [1.0, 0.0, 2.0, 2.0],
            [2.0, 2.0, 0.0, 1.0],
            [2.0, 2.0, 1.0, 0.0],
        ])
        .unwrap()
    }

    fn assert_is_tour(report: &TourReport, n: NumNodes, start: Node) {
        assert_eq!(report.tour.len(), n as usize + 1);
        assert_eq!(report.tour[0], start);
        assert_eq!(report.tour[n as usize], start);
        assert_eq!(
            report.tour[..n as usize].iter().copied().sorted().collect_vec(),
            (0..n).collect_vec()
        );
    }

    #[test]
    fn four_vertices() {
        let matrix = four_vertex_example();
        let report = christofides(&matrix, &BlossomMatcher).unwrap();

        assert_eq!(report.mst_weight, 4.0);
        assert_eq!(
            report.mst_edges,
            [
                WeightedEdge(0, 1, 1.0),
                WeightedEdge(0, 2, 2.0),
                WeightedEdge(2, 3, 1.0)
            ]
        );
        assert_is_tour(&report, 4, 0);

        let optimum = brute_force_optimal_tour(&matrix);
        assert_eq!(optimum, 6.0);
        assert!(report.tour_weight <= 1.5 * optimum);
        assert_eq!(report.tour_weight, total_cost(&matrix, &report.tour));
    }

    #[test]
    fn single_vertex() {
        let matrix = WeightMatrix::try_from_rows(&[[3.0]]).unwrap();
        let report = christofides(&matrix, &PanickingOracle).unwrap();

        assert_eq!(
            report,
            TourReport {
                mst_edges: vec![],
                mst_weight: 0.0,
                matching_weight: 0.0,
                tour: vec![0, 0],
                tour_weight: 0.0
            }
        );
    }

    #[test]
    fn two_vertices() {
        let matrix = WeightMatrix::try_from_rows(&[[0.0, 1.5], [1.5, 0.0]]).unwrap();
        let report = christofides(&matrix, &ExhaustiveMatcher::default()).unwrap();

        assert_eq!(report.tour, vec![0, 1, 0]);
        assert_eq!(report.mst_edges, [WeightedEdge(0, 1, 1.5)]);
        assert_eq!(report.mst_weight, 1.5);
        assert_eq!(report.matching_weight, 1.5);
        assert_eq!(report.tour_weight, 3.0);
    }

    #[test]
    fn start_out_of_range() {
        let matrix = four_vertex_example();
        let result = Christofides::new(&matrix, BlossomMatcher)
            .with_config(ChristofidesConfig {
                start: 4,
                ..Default::default()
            })
            .run();

        assert_eq!(
            result,
            Err(ChristofidesError::Input(InputError::StartOutOfRange {
                start: 4,
                number_of_nodes: 4
            }))
        );
    }

    #[test]
    fn custom_start() {
        let mut rng = Pcg64::seed_from_u64(0x51a27);

        let instances = random_metric_instances(&mut rng, 2..25).take(50).collect_vec();
        for matrix in instances {
            let n = matrix.number_of_nodes();
            let start = rng.gen_range(0..n);
            let config = ChristofidesConfig {
                start,
                check_invariants: rng.gen_bool(0.5),
            };

            let algo = Christofides::new(&matrix, BlossomMatcher).with_config(config);
            assert_eq!(algo.config().start, start);

            let report = algo.run().unwrap();
            assert_is_tour(&report, n, start);
        }
    }

    #[test]
    fn idempotent() {
        let mut rng = Pcg64::seed_from_u64(0x1de);

        for matrix in random_metric_instances(&mut rng, 1..30).take(30) {
            let first = christofides(&matrix, &BlossomMatcher).unwrap();
            let second = christofides(&matrix, &BlossomMatcher).unwrap();
            assert_eq!(first, second);
        }
    }

    #[test]
    fn mst_weight_invariant_under_relabeling() {
        let mut rng = Pcg64::seed_from_u64(0x7e1a);

        let instances = random_metric_instances(&mut rng, 2..20).take(30).collect_vec();
        for matrix in instances {
            let mapping = random_permutation(&mut rng, matrix.number_of_nodes());
            let original = christofides(&matrix, &BlossomMatcher).unwrap();
            let relabeled = christofides(&matrix.relabeled(&mapping), &BlossomMatcher).unwrap();

            // ties may select a different tree, and with it a different matching
            assert!((original.mst_weight - relabeled.mst_weight).abs() < 1e-6);
            assert_eq!(original.mst_edges.len(), relabeled.mst_edges.len());
        }
    }

    #[test]
    fn approximation_ratio() {
        let mut rng = Pcg64::seed_from_u64(0x3a7105);

        for matrix in random_metric_instances(&mut rng, 1..9).take(150) {
            let optimum = brute_force_optimal_tour(&matrix);

            for oracle in [OracleKind::Blossom, OracleKind::Exhaustive] {
                let report = christofides(&matrix, &oracle.build()).unwrap();

                assert_is_tour(&report, matrix.number_of_nodes(), 0);
                assert!(report.tour_weight >= optimum - 1e-9);
                assert!(
                    report.tour_weight <= 1.5 * optimum + 1e-9,
                    "{oracle}: tour {} exceeds 1.5 * {optimum}",
                    report.tour_weight
                );
                assert!(report.mst_weight <= optimum + 1e-9);
                assert!(2.0 * report.matching_weight <= optimum + 1e-9);
            }
        }
    }

    #[test]
    fn oracles_agree_on_matching_weight() {
        let mut rng = Pcg64::seed_from_u64(0xa9ee);

        for matrix in random_metric_instances(&mut rng, 2..21).take(60) {
            let blossom = christofides(&matrix, &BlossomMatcher).unwrap();
            let exhaustive = christofides(&matrix, &ExhaustiveMatcher::default()).unwrap();

            assert_eq!(blossom.mst_weight, exhaustive.mst_weight);
            assert!((blossom.matching_weight - exhaustive.matching_weight).abs() < 1e-6);
        }
    }

    #[test]
    fn tiny_instances() {
        use crate::io::MatrixReader;

        let files = glob::glob("instances/tiny/*.txt")
            .expect("Failed to glob")
            .map(|r| r.expect("Failed to access globbed path"))
            .collect_vec();
        assert!(!files.is_empty());

        for file in files {
            let matrix = WeightMatrix::try_read_matrix_file(&file).unwrap();
            let report = christofides(&matrix, &BlossomMatcher).unwrap();
            let optimum = brute_force_optimal_tour(&matrix);

            assert_is_tour(&report, matrix.number_of_nodes(), 0);
            assert!(
                report.tour_weight <= 1.5 * optimum,
                "{}: tour {} vs optimum {optimum}",
                file.display(),
                report.tour_weight
            );
        }
    }

    #[test]
    fn oracle_errors_propagate() {
        let matrix = WeightMatrix::from_symmetric_fn(12, |u, v| (u + v) as Weight + 1.0).unwrap();
        // a star at 0: eleven leaves plus the odd-degree center need matching
        let result = christofides(&matrix, &ExhaustiveMatcher::with_limit(4));

        assert!(matches!(
            result,
            Err(ChristofidesError::Oracle(OracleError::TooManyVertices {
                oracle: "exhaustive",
                count: 12,
                limit: 4
            }))
        ));
    }
}
