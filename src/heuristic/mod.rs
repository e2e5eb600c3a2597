//! The stages of Christofides' heuristic and the driver chaining them.

use crate::graph::*;

pub mod augment;
pub mod cost;
pub mod euler;
pub mod mst;
pub mod odd_degree;
pub mod pipeline;
pub mod shortcut;

pub use augment::augment_with_matching;
pub use cost::total_cost;
pub use euler::extract_eulerian_circuit;
pub use mst::{build_mst, build_mst_from};
pub use odd_degree::odd_vertices;
pub use pipeline::{Christofides, ChristofidesConfig, TourReport, christofides};
pub use shortcut::shortcut;
