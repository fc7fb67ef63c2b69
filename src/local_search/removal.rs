//! Removal neighbourhood: drop a visited node and reconnect its neighbours.

use crate::problem::Problem;
use crate::solution::Solution;
use rand::Rng;

use super::utils::removal_delta;
use super::{Move, MoveKind};

/// Find the best node to remove. Returns `None` for a single-node tour.
pub fn best_removal(problem: &Problem, solution: &Solution) -> Option<Move> {
    if solution.len() < 2 {
        return None;
    }

    let mut best: Option<Move> = None;

    for position in 0..solution.len() {
        let delta = removal_delta(problem, &solution.tour, position);
        if best.map_or(true, |m| delta > m.delta) {
            best = Some(Move {
                kind: MoveKind::Remove {
                    position,
                    node: solution.tour[position],
                },
                delta,
            });
        }
    }

    best
}

/// Sample one visited position uniformly.
pub fn random_removal<R: Rng>(
    problem: &Problem,
    solution: &Solution,
    rng: &mut R,
) -> Option<Move> {
    if solution.len() < 2 {
        return None;
    }

    let position = rng.gen_range(0..solution.len());

    Some(Move {
        kind: MoveKind::Remove {
            position,
            node: solution.tour[position],
        },
        delta: removal_delta(problem, &solution.tour, position),
    })
}
