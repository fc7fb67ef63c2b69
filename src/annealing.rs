//! Simulated annealing with geometric cooling.

use crate::config::Config;
use crate::construction::random_solution;
use crate::error::Result;
use crate::local_search::{debug_check_score, random_insertion, random_removal, random_swap, Move};
use crate::problem::Problem;
use crate::solution::Solution;
use log::{debug, info};
use rand::Rng;
use std::time::{Duration, Instant};

/// Simulated annealing over swap, insertion and removal neighbours.
pub struct SimulatedAnnealing {
    pub initial_temperature: f64,
    pub final_temperature: f64,
    pub iterations_per_temperature: usize,
    pub cooling_factor: f64,
    pub iterations: usize,
    pub accepted: usize,
    /// Score of the last accepted solution when the run ended
    pub current_score: f64,
    pub run_time: Duration,
}

impl SimulatedAnnealing {
    /// Create a new instance from the configuration.
    pub fn new(config: &Config) -> Self {
        SimulatedAnnealing {
            initial_temperature: config.initial_temperature,
            final_temperature: config.final_temperature,
            iterations_per_temperature: config.iterations_per_temperature,
            cooling_factor: config.cooling_factor,
            iterations: 0,
            accepted: 0,
            current_score: f64::NEG_INFINITY,
            run_time: Duration::from_secs(0),
        }
    }

    /// Draw one random neighbour: swap, insertion or removal with equal
    /// probability, re-drawn when the chosen kind is impossible on this tour.
    /// Returns `None` when no kind is possible.
    pub fn random_neighbour<R: Rng>(
        problem: &Problem,
        solution: &Solution,
        rng: &mut R,
    ) -> Option<Move> {
        let can_swap = solution.len() >= 3;
        let can_insert = solution.free_count() > 0;
        let can_remove = solution.len() >= 2;
        if !(can_swap || can_insert || can_remove) {
            return None;
        }

        loop {
            let candidate = match rng.gen_range(0..3) {
                0 => random_swap(problem, solution, rng),
                1 => random_insertion(problem, solution, rng),
                _ => random_removal(problem, solution, rng),
            };
            if candidate.is_some() {
                return candidate;
            }
        }
    }

    /// Metropolis acceptance for maximization: improvements and ties always
    /// pass, a loss passes with probability `exp(delta / temperature)`.
    pub fn accept<R: Rng>(delta: f64, temperature: f64, rng: &mut R) -> bool {
        delta > 0.0 || (delta / temperature).exp() > rng.gen::<f64>()
    }

    /// Cool from the initial to the final temperature and return the best
    /// solution seen.
    pub fn run<R: Rng>(&mut self, problem: &Problem, rng: &mut R) -> Result<Solution> {
        let start_time = Instant::now();

        let mut current = random_solution(problem, rng)?;
        let mut best = current.clone();
        let mut temperature = self.initial_temperature;

        'cooling: while temperature > self.final_temperature {
            for _ in 0..self.iterations_per_temperature {
                let neighbour = match Self::random_neighbour(problem, &current, rng) {
                    Some(neighbour) => neighbour,
                    None => break 'cooling,
                };
                self.iterations += 1;

                if Self::accept(neighbour.delta, temperature, rng) {
                    neighbour.apply(&mut current);
                    debug_check_score(problem, &current);
                    self.accepted += 1;

                    if current.score > best.score {
                        best = current.clone();
                    }
                }
            }

            debug!(
                "temperature {:.3}: current {:.2}, best {:.2}",
                temperature, current.score, best.score
            );
            temperature *= self.cooling_factor;
        }

        self.current_score = current.score;
        self.run_time = start_time.elapsed();
        info!(
            "simulated annealing: {} iterations, {} accepted, best {:.2}, {:?}",
            self.iterations, self.accepted, best.score, self.run_time
        );
        Ok(best)
    }
}
