//! Pairwise node swap, used as a random neighbour and as a perturbation.

use crate::problem::Problem;
use crate::solution::Solution;
use rand::Rng;

use super::two_opt::interior_pair;
use super::utils::swap_delta;
use super::{Move, MoveKind};

/// Sample two interior positions and propose exchanging their nodes.
///
/// The anchor stays in place, so at least three visited nodes are needed.
pub fn random_swap<R: Rng>(problem: &Problem, solution: &Solution, rng: &mut R) -> Option<Move> {
    let k = solution.len();
    if k < 3 {
        return None;
    }

    let (i, j) = interior_pair(k, rng);

    Some(Move {
        kind: MoveKind::Swap { i, j },
        delta: swap_delta(problem, &solution.tour, i, j),
    })
}
