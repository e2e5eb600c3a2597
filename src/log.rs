//! Logger set-up shared by the binaries and (optionally) by tests.
//!
//! All messages go to stderr so that stdout stays reserved for the tour output.
use std::io::Write;
use std::time::Instant;

use env_logger::{Builder, Env};
use log::LevelFilter;

/// Initialises `env_logger` with the given default level. A `RUST_LOG` variable set by the
/// user takes precedence. Calling this more than once is harmless; later calls are ignored.
pub fn build_logger_for_level(level: LevelFilter) {
    let start = Instant::now();

    let _ = Builder::from_env(Env::default().default_filter_or(level.as_str()))
        .format(move |buf, record| {
            let elapsed = start.elapsed();
            writeln!(
                buf,
                "[{:>4}.{:03}s {:<5} {}] {}",
                elapsed.as_secs(),
                elapsed.subsec_millis(),
                record.level(),
                record.target(),
                record.args()
            )
        })
        .try_init();
}

/// Raises `default` by one level per occurrence of `-v`
pub fn build_logger_for_verbosity(default: LevelFilter, verbosity: usize) {
    build_logger_for_level(level_for_verbosity(default, verbosity));
}

fn level_for_verbosity(default: LevelFilter, verbosity: usize) -> LevelFilter {
    const LEVELS: [LevelFilter; 6] = [
        LevelFilter::Off,
        LevelFilter::Error,
        LevelFilter::Warn,
        LevelFilter::Info,
        LevelFilter::Debug,
        LevelFilter::Trace,
    ];

    let base = LEVELS.iter().position(|&l| l == default).unwrap_or(2);
    LEVELS[(base + verbosity).min(LEVELS.len() - 1)]
}
