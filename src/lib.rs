//! # PCTSP
//!
//! Heuristic solvers for the profit-collecting Travelling Salesman Problem:
//! choose a closed tour over a subset of nodes that maximizes the collected
//! gain minus the weighted travel distance.
//!
//! The crate offers three construction heuristics (nearest neighbour, greedy
//! cycle expansion and regret-based cycle expansion), a steepest-ascent local
//! search over insertion, removal and 2-opt moves, and four metaheuristics
//! built on them: multi-start local search, iterated local search, simulated
//! annealing and a genetic algorithm with path-based recombination.

pub mod annealing;
pub mod config;
pub mod construction;
pub mod error;
pub mod genetic;
pub mod ils;
pub mod local_search;
pub mod msls;
pub mod population;
pub mod problem;
pub mod solution;
pub mod utils;

use crate::annealing::SimulatedAnnealing;
use crate::config::Config;
use crate::construction::{best_of_all_seeds, random_solution, Construction};
use crate::error::{Error, Result};
use crate::genetic::GeneticAlgorithm;
use crate::ils::IteratedLocalSearch;
use crate::local_search::LocalSearch;
use crate::msls::MultiStartLocalSearch;
use crate::problem::Problem;
use crate::solution::Solution;

use log::info;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// The solvers the crate can run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Algorithm {
    NearestNeighbour,
    CycleExpansion,
    RegretExpansion,
    /// Local search started from a random tour
    RandomLocalSearch,
    /// Local search started from the regret expansion tour
    GreedyLocalSearch,
    MultiStartLocalSearch,
    IteratedLocalSearch,
    SimulatedAnnealing,
    Genetic,
}

/// The result of one solver run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Outcome {
    pub algorithm: Algorithm,
    pub solution: Solution,
    pub elapsed: Duration,
    /// Restarts, iterations or generations, depending on the solver
    pub iterations: usize,
}

/// Runs solvers on one problem with one configuration.
pub struct Solver {
    pub problem: Problem,
    pub config: Config,
    rng: ChaCha8Rng,
}

impl Solver {
    /// Create a solver. The configuration's cost weight replaces the one the
    /// problem was built with.
    pub fn new(mut problem: Problem, config: Config) -> Result<Self> {
        config.validate()?;
        problem.check_node(config.start_node)?;
        problem.cost_weight = config.cost_weight;

        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };

        Ok(Solver {
            problem,
            config,
            rng,
        })
    }

    /// Run one solver. The returned tour's score is checked against a full
    /// evaluation; drift beyond the configured tolerance is an error.
    pub fn run(&mut self, algorithm: Algorithm) -> Result<Outcome> {
        let start_time = Instant::now();
        let problem = &self.problem;
        let config = &self.config;
        let rng = &mut self.rng;

        info!("running {:?} on {} ({} nodes)", algorithm, problem.name, problem.len());

        let (solution, iterations) = match algorithm {
            Algorithm::NearestNeighbour => {
                Self::construct(problem, config, Construction::NearestNeighbour)?
            }
            Algorithm::CycleExpansion => {
                Self::construct(problem, config, Construction::CycleExpansion)?
            }
            Algorithm::RegretExpansion => {
                Self::construct(problem, config, Construction::RegretExpansion)?
            }
            Algorithm::RandomLocalSearch => {
                let mut solution = random_solution(problem, rng)?;
                let moves = LocalSearch::new().run(problem, &mut solution);
                (solution, moves)
            }
            Algorithm::GreedyLocalSearch => {
                let (mut solution, _) =
                    Self::construct(problem, config, Construction::RegretExpansion)?;
                let moves = LocalSearch::new().run(problem, &mut solution);
                (solution, moves)
            }
            Algorithm::MultiStartLocalSearch => {
                let mut msls = MultiStartLocalSearch::new(config);
                let solution = msls.run(problem, rng)?;
                (solution, msls.iterations)
            }
            Algorithm::IteratedLocalSearch => {
                let mut ils = IteratedLocalSearch::new(config);
                let solution = ils.run(problem, rng)?;
                (solution, ils.iterations)
            }
            Algorithm::SimulatedAnnealing => {
                let mut annealing = SimulatedAnnealing::new(config);
                let solution = annealing.run(problem, rng)?;
                (solution, annealing.iterations)
            }
            Algorithm::Genetic => {
                let mut genetic = GeneticAlgorithm::new(config);
                let solution = genetic.run(problem, rng)?;
                (solution, genetic.iterations)
            }
        };

        solution.check(problem, config.verify_tolerance)?;
        if !solution.is_valid() {
            return Err(Error::InvalidTour(solution.tour.clone()));
        }

        let elapsed = start_time.elapsed();
        info!("{:?} finished: score {:.2} in {:?}", algorithm, solution.score, elapsed);

        Ok(Outcome {
            algorithm,
            solution,
            elapsed,
            iterations,
        })
    }

    /// Build a tour from the configured seed node, or from every seed node
    /// when `all_seeds` is set. Returns the tour and the number of builds.
    fn construct(
        problem: &Problem,
        config: &Config,
        heuristic: Construction,
    ) -> Result<(Solution, usize)> {
        if config.all_seeds {
            Ok((best_of_all_seeds(problem, heuristic)?, problem.len()))
        } else {
            Ok((heuristic.build(problem, config.start_node)?, 1))
        }
    }
}
