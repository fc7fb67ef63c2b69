//! 2-Opt neighbourhood: reverse a sub-path of the tour.

use crate::problem::Problem;
use crate::solution::Solution;
use rand::seq::index;
use rand::Rng;

use super::utils::reversal_delta;
use super::{Move, MoveKind};

/// Find the best segment reversal.
///
/// Reversing the whole interior `(1, k - 1)` only flips the direction of
/// travel, so it is never proposed; tours of three nodes or fewer therefore
/// have no reversal at all.
pub fn best_reversal(problem: &Problem, solution: &Solution) -> Option<Move> {
    let k = solution.len();
    if k < 4 {
        return None;
    }

    let mut best: Option<Move> = None;

    for i in 1..k - 1 {
        for j in i + 1..k {
            if i == 1 && j == k - 1 {
                continue;
            }

            let delta = reversal_delta(problem, &solution.tour, i, j);
            if best.map_or(true, |m| delta > m.delta) {
                best = Some(Move {
                    kind: MoveKind::Reverse { i, j },
                    delta,
                });
            }
        }
    }

    best
}

/// Sample a uniform pair of interior positions, excluding the full span.
pub fn random_reversal<R: Rng>(
    problem: &Problem,
    solution: &Solution,
    rng: &mut R,
) -> Option<Move> {
    let k = solution.len();
    if k < 4 {
        return None;
    }

    loop {
        let (i, j) = interior_pair(k, rng);
        if i == 1 && j == k - 1 {
            continue;
        }

        return Some(Move {
            kind: MoveKind::Reverse { i, j },
            delta: reversal_delta(problem, &solution.tour, i, j),
        });
    }
}

/// Two distinct positions in `1..k`, drawn uniformly and returned in order.
pub(crate) fn interior_pair<R: Rng>(k: usize, rng: &mut R) -> (usize, usize) {
    let picked = index::sample(rng, k - 1, 2);
    let (a, b) = (picked.index(0) + 1, picked.index(1) + 1);
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}
