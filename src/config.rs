//! Configuration parameters for the profit-collecting TSP solvers.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration settings shared by all solvers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Multiplier converting travel distance into gain units
    pub cost_weight: f64,
    /// Seed node used by the construction heuristics
    pub start_node: usize,
    /// Run the construction heuristics from every seed node and keep the best
    #[serde(default)]
    pub all_seeds: bool,
    /// Number of restarts of the multi-start local search
    pub msls_restarts: usize,
    /// Starting temperature of simulated annealing (T0)
    pub initial_temperature: f64,
    /// Temperature at which simulated annealing stops (Tk)
    pub final_temperature: f64,
    /// Neighbours tried at each temperature level (L)
    pub iterations_per_temperature: usize,
    /// Geometric cooling factor (α)
    pub cooling_factor: f64,
    /// Number of individuals kept by the genetic algorithm
    pub population_size: usize,
    /// Wall-clock budget for iterated local search and the genetic algorithm
    pub time_limit: Duration,
    /// Optional cap on iterations/generations for time-bounded solvers
    pub max_iterations: Option<usize>,
    /// Largest tolerated gap between tracked and evaluated score
    pub verify_tolerance: f64,
    /// Seed for the random number generator; `None` draws from entropy
    pub seed: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            cost_weight: 5.0,
            start_node: 0,
            all_seeds: false,
            msls_restarts: 100,
            initial_temperature: 75.0,
            final_temperature: 1.0,
            iterations_per_temperature: 1000,
            cooling_factor: 0.98,
            population_size: 20,
            time_limit: Duration::from_secs(10),
            max_iterations: None,
            verify_tolerance: 1.0,
            seed: None,
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Config::default()
    }

    /// Set the distance weight.
    pub fn with_cost_weight(mut self, weight: f64) -> Self {
        self.cost_weight = weight;
        self
    }

    /// Set the seed node for construction heuristics.
    pub fn with_start_node(mut self, node: usize) -> Self {
        self.start_node = node;
        self
    }

    /// Build constructions from every seed node instead of `start_node`.
    pub fn with_all_seeds(mut self, all_seeds: bool) -> Self {
        self.all_seeds = all_seeds;
        self
    }

    /// Set the number of multi-start restarts.
    pub fn with_msls_restarts(mut self, restarts: usize) -> Self {
        self.msls_restarts = restarts;
        self
    }

    /// Set the annealing schedule.
    pub fn with_annealing_schedule(
        mut self,
        initial_temperature: f64,
        final_temperature: f64,
        iterations_per_temperature: usize,
        cooling_factor: f64,
    ) -> Self {
        self.initial_temperature = initial_temperature;
        self.final_temperature = final_temperature;
        self.iterations_per_temperature = iterations_per_temperature;
        self.cooling_factor = cooling_factor;
        self
    }

    /// Set the genetic algorithm population size.
    pub fn with_population_size(mut self, size: usize) -> Self {
        self.population_size = size;
        self
    }

    /// Set the time limit.
    pub fn with_time_limit(mut self, duration: Duration) -> Self {
        self.time_limit = duration;
        self
    }

    /// Set the iteration cap for time-bounded solvers.
    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = Some(iterations);
        self
    }

    /// Set the score verification tolerance.
    pub fn with_verify_tolerance(mut self, tolerance: f64) -> Self {
        self.verify_tolerance = tolerance;
        self
    }

    /// Set the random seed.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check that every parameter is usable.
    pub fn validate(&self) -> Result<()> {
        if !self.cost_weight.is_finite() || self.cost_weight < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "cost weight must be finite and non-negative, got {}",
                self.cost_weight
            )));
        }
        if !(self.cooling_factor > 0.0 && self.cooling_factor < 1.0) {
            return Err(Error::InvalidConfig(format!(
                "cooling factor must lie in (0, 1), got {}",
                self.cooling_factor
            )));
        }
        if !(self.final_temperature > 0.0 && self.initial_temperature > self.final_temperature) {
            return Err(Error::InvalidConfig(format!(
                "temperatures must satisfy T0 > Tk > 0, got T0 = {}, Tk = {}",
                self.initial_temperature, self.final_temperature
            )));
        }
        if self.iterations_per_temperature == 0 {
            return Err(Error::InvalidConfig(
                "iterations per temperature must be at least 1".to_string(),
            ));
        }
        if self.population_size < 2 {
            return Err(Error::InvalidConfig(format!(
                "population size must be at least 2, got {}",
                self.population_size
            )));
        }
        if !(self.verify_tolerance >= 0.0) {
            return Err(Error::InvalidConfig(format!(
                "verify tolerance must be non-negative, got {}",
                self.verify_tolerance
            )));
        }
        Ok(())
    }
}
