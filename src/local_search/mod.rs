//! Local search operators and the steepest-ascent driver.

pub mod insertion;
pub mod removal;
pub mod swap;
pub mod two_opt;
pub mod utils;

use crate::problem::Problem;
use crate::solution::Solution;
use log::trace;

pub use self::insertion::{best_insertion, random_insertion};
pub use self::removal::{best_removal, random_removal};
pub use self::swap::random_swap;
pub use self::two_opt::{best_reversal, random_reversal};

/// Smallest delta the driver counts as an improvement.
pub const IMPROVEMENT_EPSILON: f64 = 1e-9;

/// Assert in debug builds that the running score still matches a full
/// evaluation of the tour.
pub(crate) fn debug_check_score(problem: &Problem, solution: &Solution) {
    if cfg!(debug_assertions) {
        let actual = problem.evaluate(&solution.tour);
        debug_assert!(
            (solution.score - actual).abs() <= 1e-6 * (1.0 + actual.abs()),
            "running score {} drifted from evaluated score {}",
            solution.score,
            actual
        );
    }
}

/// A single local change to a tour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MoveKind {
    /// Insert `node` into the edge starting at position `edge`.
    Insert { node: usize, edge: usize },
    /// Remove `node`, found at `position`.
    Remove { position: usize, node: usize },
    /// Reverse the sub-path `i..=j`.
    Reverse { i: usize, j: usize },
    /// Exchange the nodes at `i` and `j`.
    Swap { i: usize, j: usize },
}

/// A move together with the score change it produces.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Move {
    pub kind: MoveKind,
    pub delta: f64,
}

impl Move {
    /// Apply the move, keeping tour, unvisited pool and score in step.
    pub fn apply(&self, solution: &mut Solution) {
        match self.kind {
            MoveKind::Insert { node, edge } => solution.insert_node(edge, node),
            MoveKind::Remove { position, .. } => {
                solution.remove_at(position);
            }
            MoveKind::Reverse { i, j } => solution.reverse_segment(i, j),
            MoveKind::Swap { i, j } => solution.swap_positions(i, j),
        }
        solution.score += self.delta;
    }
}

/// Steepest-ascent local search over the mixed insertion, removal and
/// reversal neighbourhood.
#[derive(Debug, Default, Clone)]
pub struct LocalSearch {
    /// Moves applied over the lifetime of this instance
    pub moves_applied: usize,
}

impl LocalSearch {
    /// Create a new local search instance.
    pub fn new() -> Self {
        LocalSearch::default()
    }

    /// The best move across all three families.
    ///
    /// Ties go to insertion, then removal, then reversal.
    pub fn best_move(problem: &Problem, solution: &Solution) -> Option<Move> {
        [
            best_insertion(problem, solution),
            best_removal(problem, solution),
            best_reversal(problem, solution),
        ]
        .into_iter()
        .flatten()
        .fold(None, |best: Option<Move>, candidate| match best {
            Some(m) if m.delta >= candidate.delta => Some(m),
            _ => Some(candidate),
        })
    }

    /// Apply improving moves until none is left. Returns the number of moves
    /// applied.
    pub fn run(&mut self, problem: &Problem, solution: &mut Solution) -> usize {
        let mut applied = 0;

        while let Some(best) = Self::best_move(problem, solution) {
            if best.delta <= IMPROVEMENT_EPSILON {
                break;
            }

            trace!("{:?} (delta {:.3})", best.kind, best.delta);
            best.apply(solution);
            debug_check_score(problem, solution);
            applied += 1;
        }

        self.moves_applied += applied;
        applied
    }
}
