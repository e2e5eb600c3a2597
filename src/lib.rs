pub mod errors;
pub mod graph;
pub mod heuristic;
pub mod io;
pub mod log;
pub mod matching;

pub mod prelude {
    pub use super::errors::*;
    pub use super::graph::*;
    pub use super::heuristic::*;
    pub use super::io::*;
    pub use super::matching::*;
}

#[cfg(test)]
mod testing;
