//! Iterated local search with random perturbation.

use crate::config::Config;
use crate::construction::random_solution;
use crate::error::Result;
use crate::local_search::{debug_check_score, random_removal, random_swap, LocalSearch};
use crate::problem::Problem;
use crate::solution::Solution;
use log::{debug, info};
use rand::Rng;
use std::time::{Duration, Instant};

/// Perturbs the incumbent and keeps the perturbed tour when it scores higher.
///
/// The perturbed tour is compared as is, without another local search pass.
pub struct IteratedLocalSearch {
    pub time_limit: Duration,
    pub max_iterations: Option<usize>,
    pub local_search: LocalSearch,
    pub iterations: usize,
    pub improvements: usize,
    pub run_time: Duration,
}

impl IteratedLocalSearch {
    /// Create a new instance from the configuration.
    pub fn new(config: &Config) -> Self {
        IteratedLocalSearch {
            time_limit: config.time_limit,
            max_iterations: config.max_iterations,
            local_search: LocalSearch::new(),
            iterations: 0,
            improvements: 0,
            run_time: Duration::from_secs(0),
        }
    }

    /// Swap, remove, swap. Steps that are infeasible on the current tour are
    /// skipped.
    pub fn perturb<R: Rng>(problem: &Problem, solution: &Solution, rng: &mut R) -> Solution {
        let mut perturbed = solution.clone();

        if let Some(m) = random_swap(problem, &perturbed, rng) {
            m.apply(&mut perturbed);
        }
        if let Some(m) = random_removal(problem, &perturbed, rng) {
            m.apply(&mut perturbed);
        }
        if let Some(m) = random_swap(problem, &perturbed, rng) {
            m.apply(&mut perturbed);
        }

        debug_check_score(problem, &perturbed);
        perturbed
    }

    /// Run until the time limit (or iteration cap) is reached.
    pub fn run<R: Rng>(&mut self, problem: &Problem, rng: &mut R) -> Result<Solution> {
        let start_time = Instant::now();

        let mut best = random_solution(problem, rng)?;
        self.local_search.run(problem, &mut best);
        debug!("initial local optimum {:.2}", best.score);

        while !self.should_terminate(start_time) {
            let candidate = Self::perturb(problem, &best, rng);
            self.iterations += 1;

            if candidate.score > best.score {
                debug!(
                    "iteration {}: {:.2} -> {:.2}",
                    self.iterations, best.score, candidate.score
                );
                best = candidate;
                self.improvements += 1;
            }
        }

        self.run_time = start_time.elapsed();
        info!(
            "iterated local search: {} iterations, {} improvements, best {:.2}",
            self.iterations, self.improvements, best.score
        );
        Ok(best)
    }

    fn should_terminate(&self, start_time: Instant) -> bool {
        if let Some(max) = self.max_iterations {
            if self.iterations >= max {
                return true;
            }
        }

        start_time.elapsed() >= self.time_limit
    }
}
