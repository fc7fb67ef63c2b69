//! Solution representation for the profit-collecting TSP.

use crate::error::Result;
use crate::problem::Problem;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A closed tour over a subset of the problem's nodes.
///
/// `tour` holds node indices with the anchor repeated at the end, so a tour
/// visiting `k` nodes has `k + 1` entries. `in_tour` is the membership bitset
/// over the node arena; its complement is the unvisited pool. Every mutating
/// method keeps both in sync. `score` is the running total maintained by the
/// move operators.
#[derive(Clone, Serialize, Deserialize)]
pub struct Solution {
    pub tour: Vec<usize>,
    pub in_tour: Vec<bool>,
    pub score: f64,
}

impl Solution {
    /// Create a tour visiting only `start`.
    pub fn new(problem: &Problem, start: usize) -> Self {
        let mut in_tour = vec![false; problem.len()];
        in_tour[start] = true;

        Solution {
            tour: vec![start, start],
            in_tour,
            score: problem.gain(start),
        }
    }

    /// Create a solution from an open sequence of distinct node indices.
    ///
    /// The sequence is closed back to its first node and fully evaluated.
    pub fn from_sequence(problem: &Problem, sequence: &[usize]) -> Self {
        let mut tour = sequence.to_vec();
        if let Some(&first) = sequence.first() {
            tour.push(first);
        }

        let mut in_tour = vec![false; problem.len()];
        for &node in sequence {
            in_tour[node] = true;
        }

        let score = problem.evaluate(&tour);

        Solution {
            tour,
            in_tour,
            score,
        }
    }

    /// Number of distinct nodes on the tour.
    pub fn len(&self) -> usize {
        self.tour.len().saturating_sub(1)
    }

    /// Check whether the tour visits no node at all.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The visited nodes in order, without the closing duplicate.
    pub fn nodes(&self) -> &[usize] {
        &self.tour[..self.len()]
    }

    /// Check whether a node is on the tour.
    pub fn contains(&self, node: usize) -> bool {
        self.in_tour[node]
    }

    /// Iterate over the unvisited node indices in arena order.
    pub fn free_nodes(&self) -> impl Iterator<Item = usize> + '_ {
        self.in_tour
            .iter()
            .enumerate()
            .filter(|(_, &visited)| !visited)
            .map(|(node, _)| node)
    }

    /// Number of unvisited nodes.
    pub fn free_count(&self) -> usize {
        self.in_tour.len() - self.len()
    }

    /// Insert `node` between `tour[edge]` and `tour[edge + 1]`.
    pub fn insert_node(&mut self, edge: usize, node: usize) {
        debug_assert!(!self.in_tour[node], "node {} is already on the tour", node);
        self.tour.insert(edge + 1, node);
        self.in_tour[node] = true;
    }

    /// Remove the node at `position` and return it.
    ///
    /// Removing the anchor re-anchors the tour at its successor.
    pub fn remove_at(&mut self, position: usize) -> usize {
        debug_assert!(self.len() > 1, "cannot remove from a single-node tour");
        let node = if position == 0 {
            self.tour.pop();
            let node = self.tour.remove(0);
            self.tour.push(self.tour[0]);
            node
        } else {
            self.tour.remove(position)
        };
        self.in_tour[node] = false;
        node
    }

    /// Reverse the sub-path `tour[i..=j]`.
    pub fn reverse_segment(&mut self, i: usize, j: usize) {
        self.tour[i..=j].reverse();
    }

    /// Exchange the nodes at two positions.
    pub fn swap_positions(&mut self, i: usize, j: usize) {
        self.tour.swap(i, j);
    }

    /// Check the structural invariants: the tour is closed, no node appears
    /// twice among interior positions and the bitset matches the tour.
    pub fn is_valid(&self) -> bool {
        if self.tour.len() < 2 || self.tour.first() != self.tour.last() {
            return false;
        }

        let mut seen = vec![false; self.in_tour.len()];
        for &node in self.nodes() {
            if node >= seen.len() || seen[node] {
                return false;
            }
            seen[node] = true;
        }

        seen == self.in_tour
    }

    /// Compare the running score against a full evaluation.
    pub fn check(&self, problem: &Problem, tolerance: f64) -> Result<()> {
        problem.check(&self.tour, self.score, tolerance)
    }

    /// Re-evaluate the score from scratch.
    pub fn reevaluate(&mut self, problem: &Problem) {
        self.score = problem.evaluate(&self.tour);
    }

    /// Check whether two tours are the same cycle, up to rotation and
    /// direction of travel.
    pub fn is_duplicate_of(&self, other: &Solution) -> bool {
        let k = self.len();
        if k != other.len() {
            return false;
        }
        if k == 0 {
            return true;
        }

        let ours = self.nodes();
        let theirs = other.nodes();
        let offset = match theirs.iter().position(|&node| node == ours[0]) {
            Some(offset) => offset,
            None => return false,
        };

        let forward = (0..k).all(|t| ours[t] == theirs[(offset + t) % k]);
        forward || (0..k).all(|t| ours[t] == theirs[(offset + k - t) % k])
    }
}

impl fmt::Debug for Solution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Solution:")?;
        writeln!(f, "  Score: {:.2}", self.score)?;
        writeln!(f, "  Visited: {}", self.len())?;
        writeln!(f, "  Tour: {:?}", self.tour)
    }
}
