//! Error types for the solver.

use std::fmt;

/// Errors reported by the solver.
///
/// Infeasible moves are not errors: the move operators return `None` for
/// those. The variants below mean either bad input or a broken invariant.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// The running score disagrees with a full re-evaluation of the tour.
    ScoreDrift { claimed: f64, actual: f64 },
    /// A tour repeats a node, is not closed, or disagrees with its bitset.
    InvalidTour(Vec<usize>),
    /// The problem has no nodes.
    EmptyProblem,
    /// A node index outside the problem's node arena.
    InvalidNode(usize),
    /// A configuration value is out of range.
    InvalidConfig(String),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::ScoreDrift { claimed, actual } => write!(
                f,
                "score drift: tracked {:.6}, evaluated {:.6} (difference {:.6})",
                claimed,
                actual,
                claimed - actual
            ),
            Error::InvalidTour(tour) => write!(f, "malformed tour {:?}", tour),
            Error::EmptyProblem => write!(f, "problem has no nodes"),
            Error::InvalidNode(index) => write!(f, "node index {} is out of range", index),
            Error::InvalidConfig(reason) => write!(f, "invalid configuration: {}", reason),
        }
    }
}

impl std::error::Error for Error {}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
