//! Population management for the genetic algorithm.

use crate::construction::random_solution;
use crate::error::Result;
use crate::local_search::LocalSearch;
use crate::problem::Problem;
use crate::solution::Solution;
use log::{debug, warn};
use rand::seq::index;
use rand::Rng;

/// Draws allowed per population slot before giving up on finding a new
/// distinct member.
const ATTEMPTS_PER_MEMBER: usize = 50;

/// A fixed-size set of pairwise distinct tours.
pub struct Population {
    pub members: Vec<Solution>,
    /// Target number of members
    pub capacity: usize,
}

impl Population {
    /// Create an empty population.
    pub fn new(capacity: usize) -> Self {
        Population {
            members: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Fill the population with locally optimized random tours, rejecting
    /// duplicates.
    ///
    /// Tiny instances may not admit `capacity` distinct optima; the population
    /// is then left smaller.
    pub fn initialize<R: Rng>(
        &mut self,
        problem: &Problem,
        local_search: &mut LocalSearch,
        rng: &mut R,
    ) -> Result<()> {
        self.members.clear();
        let mut attempts = 0;

        while self.members.len() < self.capacity && attempts < ATTEMPTS_PER_MEMBER * self.capacity
        {
            attempts += 1;

            let mut candidate = random_solution(problem, rng)?;
            local_search.run(problem, &mut candidate);

            if !self.contains_duplicate_of(&candidate) {
                self.members.push(candidate);
            }
        }

        if self.members.len() < self.capacity {
            warn!(
                "population holds {} of {} members after {} attempts",
                self.members.len(),
                self.capacity,
                attempts
            );
        } else {
            debug!("population initialized after {} attempts", attempts);
        }

        Ok(())
    }

    /// Number of members.
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Check whether the population has no members.
    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Check whether a tour duplicates any member.
    pub fn contains_duplicate_of(&self, solution: &Solution) -> bool {
        self.members.iter().any(|m| m.is_duplicate_of(solution))
    }

    /// Check that no two members are duplicates of each other.
    pub fn is_distinct(&self) -> bool {
        self.members.iter().enumerate().all(|(i, a)| {
            self.members[i + 1..]
                .iter()
                .all(|b| !a.is_duplicate_of(b))
        })
    }

    /// Pick two different members uniformly at random.
    ///
    /// Returns `None` when fewer than two members exist.
    pub fn select_parents<R: Rng>(&self, rng: &mut R) -> Option<(&Solution, &Solution)> {
        if self.members.len() < 2 {
            return None;
        }

        let picked = index::sample(rng, self.members.len(), 2);
        Some((&self.members[picked.index(0)], &self.members[picked.index(1)]))
    }

    /// Index of the lowest-scoring member.
    pub fn worst_index(&self) -> Option<usize> {
        self.members
            .iter()
            .enumerate()
            .min_by(|(_, a), (_, b)| a.score.total_cmp(&b.score))
            .map(|(i, _)| i)
    }

    /// Replace the worst member by `child` if the child scores strictly higher
    /// and duplicates no member. Returns whether the child was admitted.
    pub fn try_replace_worst(&mut self, child: Solution) -> bool {
        let worst = match self.worst_index() {
            Some(worst) => worst,
            None => return false,
        };

        if child.score <= self.members[worst].score || self.contains_duplicate_of(&child) {
            return false;
        }

        self.members[worst] = child;
        true
    }

    /// The highest-scoring member.
    pub fn best(&self) -> Option<&Solution> {
        self.members
            .iter()
            .max_by(|a, b| a.score.total_cmp(&b.score))
    }
}
