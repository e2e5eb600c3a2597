use std::{
    fs::File,
    io::{BufRead, BufWriter, Write},
    path::PathBuf,
};

use ::log::{LevelFilter, info, warn};
use anyhow::bail;
use christofides::{log::build_logger_for_verbosity, prelude::*};
use structopt::StructOpt;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "christofides",
    about = "Approximates a metric TSP tour with Christofides' heuristic"
)]
struct Opts {
    /// Weight matrix; read from stdin if omitted
    #[structopt(short, long, parse(from_os_str))]
    input: Option<PathBuf>,

    /// Write the report here instead of stdout
    #[structopt(short, long, parse(from_os_str))]
    output: Option<PathBuf>,

    /// First and last vertex of the tour
    #[structopt(short, long, default_value = "0")]
    start: Node,

    /// Matching oracle: blossom or exhaustive
    #[structopt(long, default_value = "blossom")]
    oracle: OracleKind,

    /// Emit the report as JSON
    #[structopt(long)]
    json: bool,

    /// Ask for a matrix file on stdin until one can be loaded
    #[structopt(long)]
    interactive: bool,

    /// Skip re-validation between pipeline stages
    #[structopt(long)]
    no_checks: bool,

    /// Verbose mode (-v, -vv, -vvv, etc.)
    #[structopt(short, long, parse(from_occurrences))]
    verbose: usize,
}

fn load_matrix(path: &Option<PathBuf>) -> anyhow::Result<WeightMatrix> {
    if let Some(path) = path {
        Ok(WeightMatrix::try_read_matrix_file(path)?)
    } else {
        let stdin = std::io::stdin().lock();
        Ok(WeightMatrix::try_read_matrix(stdin)?)
    }
}

/// Prompts for paths until a valid matrix is read; an empty line or end of input aborts
fn prompt_for_matrix() -> anyhow::Result<WeightMatrix> {
    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        eprint!("Path to weight matrix (empty line to abort): ");
        std::io::stderr().flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            bail!("no matrix given");
        }

        let path = line.trim();
        if path.is_empty() {
            bail!("aborted by user");
        }

        match WeightMatrix::try_read_matrix_file(path) {
            Ok(matrix) => return Ok(matrix),
            Err(e) => warn!("Cannot use {path}: {e}"),
        }
    }
}

fn main() -> anyhow::Result<()> {
    let opts = Opts::from_args();
    build_logger_for_verbosity(LevelFilter::Warn, opts.verbose);

    let matrix = if opts.interactive {
        prompt_for_matrix()?
    } else {
        load_matrix(&opts.input)?
    };
    info!(
        "Loaded matrix with {} vertices; using oracle {}",
        matrix.number_of_nodes(),
        opts.oracle
    );

    let config = ChristofidesConfig {
        start: opts.start,
        check_invariants: !opts.no_checks,
    };
    let report = Christofides::new(&matrix, opts.oracle.build())
        .with_config(config)
        .run()?;

    let writer: Box<dyn Write> = match &opts.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(std::io::stdout().lock()),
    };

    if opts.json {
        report.try_write_json(writer)?;
    } else {
        report.try_write_tour(writer)?;
    }

    Ok(())
}
