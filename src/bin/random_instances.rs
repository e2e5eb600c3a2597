use std::sync::atomic::{AtomicU64, Ordering};

use ::log::{LevelFilter, error, info};
use christofides::{log::build_logger_for_verbosity, prelude::*};
use itertools::Itertools;
use rand::SeedableRng;
use rand_pcg::Pcg64;
use rayon::prelude::*;
use structopt::StructOpt;

/// Cross-checks both matching oracles and the approximation bound on random Euclidean instances
#[derive(Debug, StructOpt)]
struct Opt {
    #[structopt(short, long, default_value = "1000")]
    repeats: u64,

    /// Instance sizes to sample, e.g. -n 8,16,32
    #[structopt(short, long, use_delimiter = true, default_value = "6,10,16,24,40")]
    nodes: Vec<NumNodes>,

    /// Side length of the square the points are drawn from
    #[structopt(long, default_value = "1000")]
    side: Weight,

    #[structopt(long, default_value = "1234")]
    seed: u64,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

#[derive(Default)]
struct Counters {
    completed: AtomicU64,
    compared: AtomicU64,
    failures: AtomicU64,
}

fn main() -> anyhow::Result<()> {
    let opt = Opt::from_args();
    build_logger_for_verbosity(LevelFilter::Warn, opt.verbose);

    let params = (0..opt.repeats).cartesian_product(opt.nodes.iter().copied()).collect_vec();
    let total_instances = params.len() as u64;
    let counters = Counters::default();

    params.into_par_iter().for_each(|(repeat, n)| {
        let seed = opt.seed ^ (repeat << 16) ^ n as u64;
        let mut rng = Pcg64::seed_from_u64(seed);
        let matrix = WeightMatrix::random_euclidean(&mut rng, n, opt.side);

        if let Err(message) = process_instance(&matrix, &counters) {
            counters.failures.fetch_add(1, Ordering::Relaxed);
            error!("n = {n}, seed = {seed}: {message}");
        }

        let counter = counters.completed.fetch_add(1, Ordering::Relaxed) + 1;
        if counter % 1000 == 0 {
            println!("Completed {counter:>7} of {total_instances:>7}");
        }
    });

    let failures = counters.failures.load(Ordering::Relaxed);
    println!(
        "Instances: {total_instances}, oracles compared: {}, failures: {failures}",
        counters.compared.load(Ordering::Relaxed)
    );

    anyhow::ensure!(failures == 0, "{failures} instances failed");
    Ok(())
}

fn process_instance(matrix: &WeightMatrix, counters: &Counters) -> Result<(), String> {
    let blossom = christofides(matrix, &BlossomMatcher).map_err(|e| e.to_string())?;

    if blossom.tour_weight > 2.0 * blossom.mst_weight * (1.0 + 1e-9) {
        return Err(format!(
            "tour weight {} exceeds twice the MST weight {}",
            blossom.tour_weight, blossom.mst_weight
        ));
    }

    match christofides(matrix, &ExhaustiveMatcher::default()) {
        Ok(exhaustive) => {
            counters.compared.fetch_add(1, Ordering::Relaxed);
            let diff = (blossom.matching_weight - exhaustive.matching_weight).abs();
            if diff > 1e-6 * blossom.matching_weight.max(1.0) {
                return Err(format!(
                    "matching weights differ: blossom {} vs exhaustive {}",
                    blossom.matching_weight, exhaustive.matching_weight
                ));
            }
        }
        Err(ChristofidesError::Oracle(OracleError::TooManyVertices { count, .. })) => {
            info!("skipped exhaustive oracle for {count} odd vertices");
        }
        Err(e) => return Err(e.to_string()),
    }

    Ok(())
}
