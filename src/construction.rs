//! Construction heuristics building an initial tour from scratch.
//!
//! Every heuristic starts from a seed node and consumes the unvisited pool of
//! the solution it grows; nodes leave the pool as they are placed.

use crate::error::{Error, Result};
use crate::local_search::utils::insertion_delta;
use crate::local_search::{best_insertion, Move, MoveKind};
use crate::problem::Problem;
use crate::solution::Solution;
use log::debug;
use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// The available construction heuristics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Construction {
    NearestNeighbour,
    CycleExpansion,
    RegretExpansion,
}

impl Construction {
    /// Build a tour starting from `start`.
    pub fn build(&self, problem: &Problem, start: usize) -> Result<Solution> {
        match self {
            Construction::NearestNeighbour => nearest_neighbour(problem, start),
            Construction::CycleExpansion => cycle_expansion(problem, start),
            Construction::RegretExpansion => regret_expansion(problem, start),
        }
    }
}

/// The free node maximizing `gain - cost(current, node)`, first found on ties.
fn nearest_free_node(problem: &Problem, solution: &Solution, current: usize) -> Option<(usize, f64)> {
    let mut best: Option<(usize, f64)> = None;

    for node in solution.free_nodes() {
        let value = problem.gain(node) - problem.cost(current, node);
        if best.map_or(true, |(_, best_value)| value > best_value) {
            best = Some((node, value));
        }
    }

    best
}

/// Greedy nearest-insertion.
///
/// Extends a path from `start` with the most valuable next node until that
/// value turns negative, then closes the cycle back to `start`.
pub fn nearest_neighbour(problem: &Problem, start: usize) -> Result<Solution> {
    problem.check_node(start)?;

    let mut solution = Solution::new(problem, start);
    let mut path = vec![start];
    let mut current = start;

    while let Some((node, value)) = nearest_free_node(problem, &solution, current) {
        if value < 0.0 {
            break;
        }
        // Extend the open path; the tour is closed after the loop
        solution.in_tour[node] = true;
        solution.score += value;
        path.push(node);
        current = node;
    }

    solution.score -= problem.cost(current, start);
    path.push(start);
    solution.tour = path;

    debug!(
        "nearest neighbour from {}: {} nodes, score {:.2}",
        start,
        solution.len(),
        solution.score
    );
    Ok(solution)
}

/// Start a cycle `[start, n, start]` with `n` the best nearest-insertion
/// neighbour of `start`, whatever its value.
fn two_node_cycle(problem: &Problem, start: usize) -> Solution {
    let mut solution = Solution::new(problem, start);

    if let Some((node, _)) = nearest_free_node(problem, &solution, start) {
        Move {
            kind: MoveKind::Insert { node, edge: 0 },
            delta: insertion_delta(problem, &solution.tour, 0, node),
        }
        .apply(&mut solution);
    }

    solution
}

/// Greedy cycle-expansion.
///
/// Repeatedly breaks the edge and inserts the node with the highest net
/// profit, stopping once that profit is negative.
pub fn cycle_expansion(problem: &Problem, start: usize) -> Result<Solution> {
    problem.check_node(start)?;

    let mut solution = two_node_cycle(problem, start);

    while let Some(best) = best_insertion(problem, &solution) {
        if best.delta < 0.0 {
            break;
        }
        best.apply(&mut solution);
    }

    debug!(
        "cycle expansion from {}: {} nodes, score {:.2}",
        start,
        solution.len(),
        solution.score
    );
    Ok(solution)
}

/// Per-segment score ledger of a tour.
///
/// Entry `2e` is the (negative) cost of edge `e` and entry `2e + 1` the gain
/// of the node that edge leads to, so the score is the plain sum.
#[derive(Debug, Clone, PartialEq)]
pub struct SegmentLedger {
    values: Vec<f64>,
}

impl SegmentLedger {
    /// Build the ledger of a closed tour.
    pub fn from_tour(problem: &Problem, tour: &[usize]) -> Self {
        let mut values = Vec::with_capacity(2 * tour.len());
        for pair in tour.windows(2) {
            values.push(-problem.cost(pair[0], pair[1]));
            values.push(problem.gain(pair[1]));
        }
        SegmentLedger { values }
    }

    /// Replace the entry of `edge` by the three entries of `node` breaking it.
    ///
    /// `tour` is the tour before the insertion.
    pub fn insert(&mut self, problem: &Problem, tour: &[usize], edge: usize, node: usize) {
        let entries = [
            -problem.cost(tour[edge], node),
            problem.gain(node),
            -problem.cost(node, tour[edge + 1]),
        ];
        // Entry 2e (the broken edge) becomes three; the old gain entry 2e + 1 shifts right
        self.values.splice(2 * edge..=2 * edge, entries);
    }

    /// Raw entries, in tour order.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Score of the tour.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }
}

/// Best and second-best insertion of `node` over all edges, as
/// `(edge, best, second)`.
fn edge_regret(problem: &Problem, tour: &[usize], node: usize) -> Option<(usize, f64, f64)> {
    let mut first: Option<(usize, f64)> = None;
    let mut second: Option<f64> = None;

    for edge in 0..tour.len() - 1 {
        let value = insertion_delta(problem, tour, edge, node);
        match first {
            Some((_, best)) if value <= best => {
                if second.map_or(true, |s| value > s) {
                    second = Some(value);
                }
            }
            _ => {
                second = first.map(|(_, best)| best);
                first = Some((edge, value));
            }
        }
    }

    first.map(|(edge, best)| (edge, best, second.unwrap_or(best)))
}

/// Regret-based cycle-expansion.
///
/// Among nodes whose best insertion is profitable, inserts the one losing the
/// most if its best edge were taken away.
pub fn regret_expansion(problem: &Problem, start: usize) -> Result<Solution> {
    problem.check_node(start)?;

    let mut solution = two_node_cycle(problem, start);
    let mut ledger = SegmentLedger::from_tour(problem, &solution.tour);

    loop {
        let mut chosen: Option<(usize, usize, f64)> = None;

        for node in solution.free_nodes() {
            if let Some((edge, best, second)) = edge_regret(problem, &solution.tour, node) {
                // Only profitable insertions compete
                if best <= 0.0 {
                    continue;
                }
                let regret = best - second;
                if chosen.map_or(true, |(_, _, top)| regret > top) {
                    chosen = Some((node, edge, regret));
                }
            }
        }

        let (node, edge, _) = match chosen {
            Some(choice) => choice,
            // Nothing profitable left
            None => break,
        };

        ledger.insert(problem, &solution.tour, edge, node);
        solution.insert_node(edge, node);
    }

    // Score taken from the ledger, not tracked per insertion
    solution.score = ledger.total();

    debug!(
        "regret expansion from {}: {} nodes, score {:.2}",
        start,
        solution.len(),
        solution.score
    );
    Ok(solution)
}

/// Run a heuristic from every seed node and keep the best tour.
pub fn best_of_all_seeds(problem: &Problem, heuristic: Construction) -> Result<Solution> {
    let mut best: Option<Solution> = None;

    for start in 0..problem.len() {
        let solution = heuristic.build(problem, start)?;
        if best.as_ref().map_or(true, |b| solution.score > b.score) {
            best = Some(solution);
        }
    }

    best.ok_or(Error::EmptyProblem)
}

/// A random tour: size uniform in `1..=N`, nodes in random order.
pub fn random_solution<R: Rng>(problem: &Problem, rng: &mut R) -> Result<Solution> {
    if problem.is_empty() {
        return Err(Error::EmptyProblem);
    }

    let size = rng.gen_range(1..=problem.len());
    let mut nodes: Vec<usize> = (0..problem.len()).collect();
    nodes.shuffle(rng);
    nodes.truncate(size);

    Ok(Solution::from_sequence(problem, &nodes))
}
