//! Score deltas of the move families.
//!
//! Each family has exactly one delta function here; the exhaustive scans and
//! the random samplers both go through it. A positive delta is an improvement.

use crate::problem::Problem;

/// Delta of inserting `node` into the edge `(tour[edge], tour[edge + 1])`.
pub fn insertion_delta(problem: &Problem, tour: &[usize], edge: usize, node: usize) -> f64 {
    let a = tour[edge];
    let b = tour[edge + 1];
    problem.gain(node) + problem.cost(a, b) - (problem.cost(a, node) + problem.cost(node, b))
}

/// Predecessor and successor of the node at `position`.
///
/// The anchor at position 0 takes the second-to-last entry as predecessor.
pub fn neighbours(tour: &[usize], position: usize) -> (usize, usize) {
    let prev = if position == 0 {
        tour[tour.len() - 2]
    } else {
        tour[position - 1]
    };
    (prev, tour[position + 1])
}

/// Delta of removing the node at `position`.
pub fn removal_delta(problem: &Problem, tour: &[usize], position: usize) -> f64 {
    let node = tour[position];
    let (prev, next) = neighbours(tour, position);
    problem.cost(prev, node) + problem.cost(node, next)
        - problem.gain(node)
        - problem.cost(prev, next)
}

/// Delta of reversing the sub-path `tour[i..=j]`, for `1 <= i < j < tour.len() - 1`.
///
/// Only the two boundary edges change.
pub fn reversal_delta(problem: &Problem, tour: &[usize], i: usize, j: usize) -> f64 {
    let before = tour[i - 1];
    let after = tour[j + 1];
    let old = problem.cost(before, tour[i]) + problem.cost(tour[j], after);
    let new = problem.cost(before, tour[j]) + problem.cost(tour[i], after);
    old - new
}

/// Delta of exchanging the nodes at positions `i < j`, both interior.
///
/// Adjacent positions share an edge, so only three edges change there.
pub fn swap_delta(problem: &Problem, tour: &[usize], i: usize, j: usize) -> f64 {
    let a = tour[i];
    let b = tour[j];

    if j == i + 1 {
        let before = tour[i - 1];
        let after = tour[j + 1];
        let old = problem.cost(before, a) + problem.cost(b, after);
        let new = problem.cost(before, b) + problem.cost(a, after);
        return old - new;
    }

    let (a_prev, a_next) = (tour[i - 1], tour[i + 1]);
    let (b_prev, b_next) = (tour[j - 1], tour[j + 1]);
    let old = problem.cost(a_prev, a)
        + problem.cost(a, a_next)
        + problem.cost(b_prev, b)
        + problem.cost(b, b_next);
    let new = problem.cost(a_prev, b)
        + problem.cost(b, a_next)
        + problem.cost(b_prev, a)
        + problem.cost(a, b_next);
    old - new
}
