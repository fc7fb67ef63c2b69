//! Insertion neighbourhood: put an unvisited node into an edge of the tour.

use crate::problem::Problem;
use crate::solution::Solution;
use rand::seq::IteratorRandom;
use rand::Rng;

use super::utils::insertion_delta;
use super::{Move, MoveKind};

/// Find the best (edge, node) insertion.
///
/// Edges are scanned in tour order and free nodes in arena order; the first
/// candidate with the highest delta wins. Returns `None` when every node is
/// already on the tour.
pub fn best_insertion(problem: &Problem, solution: &Solution) -> Option<Move> {
    let mut best: Option<Move> = None;

    for edge in 0..solution.len() {
        for node in solution.free_nodes() {
            let delta = insertion_delta(problem, &solution.tour, edge, node);
            if best.map_or(true, |m| delta > m.delta) {
                best = Some(Move {
                    kind: MoveKind::Insert { node, edge },
                    delta,
                });
            }
        }
    }

    best
}

/// Sample one edge and one free node uniformly.
pub fn random_insertion<R: Rng>(
    problem: &Problem,
    solution: &Solution,
    rng: &mut R,
) -> Option<Move> {
    if solution.is_empty() {
        return None;
    }

    let node = solution.free_nodes().choose(rng)?;
    let edge = rng.gen_range(0..solution.len());

    Some(Move {
        kind: MoveKind::Insert { node, edge },
        delta: insertion_delta(problem, &solution.tour, edge, node),
    })
}
