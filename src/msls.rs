//! Multi-start local search.

use crate::config::Config;
use crate::construction::random_solution;
use crate::error::{Error, Result};
use crate::local_search::LocalSearch;
use crate::problem::Problem;
use crate::solution::Solution;
use log::{debug, info};
use rand::Rng;
use std::time::{Duration, Instant};

/// Runs local search from independent random tours and keeps the best optimum.
pub struct MultiStartLocalSearch {
    pub restarts: usize,
    pub local_search: LocalSearch,
    pub iterations: usize,
    pub run_time: Duration,
}

impl MultiStartLocalSearch {
    /// Create a new instance from the configuration.
    pub fn new(config: &Config) -> Self {
        MultiStartLocalSearch {
            restarts: config.msls_restarts,
            local_search: LocalSearch::new(),
            iterations: 0,
            run_time: Duration::from_secs(0),
        }
    }

    /// Run every restart and return the best local optimum found.
    pub fn run<R: Rng>(&mut self, problem: &Problem, rng: &mut R) -> Result<Solution> {
        let start_time = Instant::now();
        let mut best: Option<Solution> = None;

        for restart in 0..self.restarts.max(1) {
            let mut candidate = random_solution(problem, rng)?;
            self.local_search.run(problem, &mut candidate);
            self.iterations += 1;

            if best.as_ref().map_or(true, |b| candidate.score > b.score) {
                debug!("restart {}: new best {:.2}", restart, candidate.score);
                best = Some(candidate);
            }
        }

        self.run_time = start_time.elapsed();
        let best = best.ok_or(Error::EmptyProblem)?;

        info!(
            "multi-start local search: {} restarts, best {:.2}, {:?}",
            self.iterations, best.score, self.run_time
        );
        Ok(best)
    }
}
