//! Minimum-weight perfect matching oracles.
//!
//! The Christofides pipeline only needs a single capability from this module: given a complete
//! graph on an even number of vertices, return a perfect matching of minimum total weight.
//! [`MatchingOracle`] captures exactly that, so the pipeline is agnostic of the algorithm used.
//!
//! Two exact oracles are provided:
//!  - [`BlossomMatcher`]: Edmonds' weighted blossom algorithm, polynomial and the default choice
//!  - [`ExhaustiveMatcher`]: a subset dynamic programme, exponential but trivially correct, used
//!    for cross-checking on small inputs

use std::{fmt, str::FromStr};

use crate::{errors::OracleError, graph::*};

pub mod blossom;
pub mod exhaustive;

pub use blossom::BlossomMatcher;
pub use exhaustive::ExhaustiveMatcher;

pub trait MatchingOracle {
    /// Short name used in logs and error messages
    fn name(&self) -> &'static str;

    /// Computes a minimum-weight perfect matching of the complete graph `graph`. The returned
    /// pairs use the LOCAL vertex ids of `graph`.
    fn solve_min_weight_perfect_matching(
        &self,
        graph: &Subgraph,
    ) -> Result<Vec<Edge>, OracleError>;
}

impl<O: MatchingOracle + ?Sized> MatchingOracle for &O {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve_min_weight_perfect_matching(
        &self,
        graph: &Subgraph,
    ) -> Result<Vec<Edge>, OracleError> {
        (**self).solve_min_weight_perfect_matching(graph)
    }
}

impl<O: MatchingOracle + ?Sized> MatchingOracle for Box<O> {
    fn name(&self) -> &'static str {
        (**self).name()
    }

    fn solve_min_weight_perfect_matching(
        &self,
        graph: &Subgraph,
    ) -> Result<Vec<Edge>, OracleError> {
        (**self).solve_min_weight_perfect_matching(graph)
    }
}

/// Checks that `pairs` is a perfect matching of the vertices `0..number_of_nodes`
pub fn validate_perfect_matching(
    number_of_nodes: NumNodes,
    pairs: &[Edge],
) -> Result<(), OracleError> {
    let mut matched = vec![false; number_of_nodes as usize];

    for &Edge(u, v) in pairs {
        for node in [u, v] {
            if node >= number_of_nodes {
                return Err(OracleError::UnknownVertex {
                    node,
                    number_of_nodes,
                });
            }
        }

        if u == v {
            return Err(OracleError::SelfPair { node: u });
        }

        for node in [u, v] {
            if std::mem::replace(&mut matched[node as usize], true) {
                return Err(OracleError::DuplicateVertex { node });
            }
        }
    }

    let unmatched: Vec<Node> = (0..number_of_nodes)
        .filter(|&u| !matched[u as usize])
        .collect();

    if unmatched.is_empty() {
        Ok(())
    } else {
        Err(OracleError::Unmatched { nodes: unmatched })
    }
}

/// Selects one of the built-in oracles, e.g. from the command line
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OracleKind {
    #[default]
    Blossom,
    Exhaustive,
}

impl OracleKind {
    pub fn build(self) -> Box<dyn MatchingOracle + Send + Sync> {
        match self {
            OracleKind::Blossom => Box::new(BlossomMatcher),
            OracleKind::Exhaustive => Box::new(ExhaustiveMatcher::default()),
        }
    }
}

impl FromStr for OracleKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "blossom" => Ok(OracleKind::Blossom),
            "exhaustive" | "dp" => Ok(OracleKind::Exhaustive),
            _ => Err(format!(
                "unknown matching oracle \"{s}\"; expected blossom or exhaustive"
            )),
        }
    }
}

impl fmt::Display for OracleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OracleKind::Blossom => write!(f, "blossom"),
            OracleKind::Exhaustive => write!(f, "exhaustive"),
        }
    }
}
