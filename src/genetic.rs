//! Genetic algorithm with path-based recombination.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::local_search::LocalSearch;
use crate::population::Population;
use crate::problem::Problem;
use crate::solution::Solution;
use log::{debug, info};
use rand::{seq::SliceRandom, Rng};
use std::time::{Duration, Instant};

/// Implements the recombination operator.
pub struct Genetic;

impl Genetic {
    /// Split the node sets of both parents into fragments.
    ///
    /// Maximal sub-paths of `parent1` whose every edge is also an edge of
    /// `parent2` (in either direction) form one fragment each. Every other
    /// node of either parent becomes a singleton fragment.
    pub fn fragments(parent1: &Solution, parent2: &Solution) -> Vec<Vec<usize>> {
        let a = parent1.nodes();
        let b = parent2.nodes();
        let ka = a.len();
        let kb = b.len();

        // Position of every node in parent2, for O(1) edge lookups
        let mut position_in_b = vec![None; parent2.in_tour.len()];
        for (position, &node) in b.iter().enumerate() {
            position_in_b[node] = Some(position);
        }

        let shared_edge = |u: usize, v: usize| -> bool {
            if u == v || kb < 2 {
                return false;
            }
            match (position_in_b[u], position_in_b[v]) {
                (Some(pu), Some(pv)) => (pu + 1) % kb == pv || (pv + 1) % kb == pu,
                _ => false,
            }
        };

        let mut fragments = Vec::new();

        if ka > 0 {
            // common[e]: edge (a[e], a[(e + 1) % ka]) is also an edge of parent2
            let common: Vec<bool> = (0..ka).map(|e| shared_edge(a[e], a[(e + 1) % ka])).collect();

            // Start walking just after a broken edge so no fragment is split by the wrap
            match (0..ka).find(|&s| !common[(s + ka - 1) % ka]) {
                // Every edge shared: parent1 is one closed fragment
                None => fragments.push(a.to_vec()),
                Some(start) => {
                    let mut fragment = Vec::new();
                    for t in 0..ka {
                        let e = (start + t) % ka;
                        fragment.push(a[e]);
                        if !common[e] {
                            fragments.push(std::mem::take(&mut fragment));
                        }
                    }
                }
            }
        }

        // Nodes only parent2 visits
        fragments.extend(
            b.iter()
                .filter(|&&node| !parent1.contains(node))
                .map(|&node| vec![node]),
        );

        fragments
    }

    /// Assemble a child from a random subset of the parents' fragments.
    ///
    /// The child's size is drawn uniformly between the two parents' sizes;
    /// fragments are shuffled, taken while they fit, each reversed with
    /// probability one half, and the result closed into a cycle.
    pub fn crossover<R: Rng>(
        &self,
        problem: &Problem,
        parent1: &Solution,
        parent2: &Solution,
        rng: &mut R,
    ) -> Solution {
        let mut fragments = Self::fragments(parent1, parent2);
        fragments.shuffle(rng);

        let smaller = parent1.len().min(parent2.len());
        let larger = parent1.len().max(parent2.len());
        let target = rng.gen_range(smaller.max(1)..=larger.max(1));

        // The first fragment is always taken, even if it overshoots the target
        let mut sequence = Vec::with_capacity(target);
        for mut fragment in fragments {
            if !sequence.is_empty() && sequence.len() + fragment.len() > target {
                continue;
            }
            if fragment.len() > 1 && rng.gen_bool(0.5) {
                fragment.reverse();
            }
            sequence.extend(fragment);
            if sequence.len() >= target {
                break;
            }
        }

        Solution::from_sequence(problem, &sequence)
    }
}

/// Steady-state genetic algorithm over locally optimized tours.
pub struct GeneticAlgorithm {
    pub population: Population,
    pub genetic: Genetic,
    pub local_search: LocalSearch,
    pub time_limit: Duration,
    pub max_iterations: Option<usize>,
    pub iterations: usize,
    pub replacements: usize,
    pub run_time: Duration,
}

impl GeneticAlgorithm {
    /// Create a new instance from the configuration.
    pub fn new(config: &Config) -> Self {
        GeneticAlgorithm {
            population: Population::new(config.population_size),
            genetic: Genetic,
            local_search: LocalSearch::new(),
            time_limit: config.time_limit,
            max_iterations: config.max_iterations,
            iterations: 0,
            replacements: 0,
            run_time: Duration::from_secs(0),
        }
    }

    /// Initialize the population with random locally optimized tours.
    pub fn initialize<R: Rng>(&mut self, problem: &Problem, rng: &mut R) -> Result<()> {
        self.population
            .initialize(problem, &mut self.local_search, rng)
    }

    /// Run generations until the time limit (or iteration cap) is reached and
    /// return the best member.
    pub fn run<R: Rng>(&mut self, problem: &Problem, rng: &mut R) -> Result<Solution> {
        let start_time = Instant::now();

        self.initialize(problem, rng)?;

        while !self.should_terminate(start_time) {
            let mut child = match self.population.select_parents(rng) {
                Some((parent1, parent2)) => self.genetic.crossover(problem, parent1, parent2, rng),
                None => break,
            };

            // Children are locally optimized before competing for a slot
            self.local_search.run(problem, &mut child);
            self.iterations += 1;

            let child_score = child.score;
            if self.population.try_replace_worst(child) {
                self.replacements += 1;
                debug!(
                    "generation {}: admitted child scoring {:.2}",
                    self.iterations, child_score
                );
            }
        }

        self.run_time = start_time.elapsed();
        let best = self.population.best().cloned().ok_or(Error::EmptyProblem)?;

        info!(
            "genetic algorithm: {} generations, {} replacements, best {:.2}",
            self.iterations, self.replacements, best.score
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
