//! Unit tests for recombination, population management and the genetic
//! algorithm.

use pctsp::config::Config;
use pctsp::genetic::{Genetic, GeneticAlgorithm};
use pctsp::local_search::LocalSearch;
use pctsp::population::Population;
use pctsp::problem::{Node, Problem};
use pctsp::solution::Solution;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::time::Duration;

/// Nodes on a line, with enough gain to make every node worth visiting.
fn create_line_problem(size: usize) -> Problem {
    let nodes = (0..size)
        .map(|id| Node::new(id, id as f64 * 10.0, 0.0, 100.0))
        .collect();

    Problem::new("Line".to_string(), nodes, 1.0)
}

/// A seeded random instance.
fn create_random_problem(size: usize, seed: u64) -> Problem {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    Problem::random(format!("Random{}", size), size, 1.0, &mut rng)
}

#[test]
fn test_fragments_split_on_shared_edges() {
    let problem = create_line_problem(8);
    let parent1 = Solution::from_sequence(&problem, &[0, 1, 2, 3, 4, 5]);
    let parent2 = Solution::from_sequence(&problem, &[2, 1, 0, 6, 4, 5, 7]);

    let fragments = Genetic::fragments(&parent1, &parent2);

    assert_eq!(
        fragments,
        vec![vec![0, 1, 2], vec![3], vec![4, 5], vec![6], vec![7]]
    );
}

#[test]
fn test_fragments_of_identical_cycles() {
    let problem = create_line_problem(6);
    let parent1 = Solution::from_sequence(&problem, &[0, 1, 2, 3, 4]);
    let reversed = Solution::from_sequence(&problem, &[3, 2, 1, 0, 4]);

    assert_eq!(
        Genetic::fragments(&parent1, &parent1),
        vec![vec![0, 1, 2, 3, 4]]
    );
    assert_eq!(
        Genetic::fragments(&parent1, &reversed),
        vec![vec![0, 1, 2, 3, 4]]
    );
}

#[test]
fn test_fragments_without_shared_edges() {
    let problem = create_line_problem(6);
    let parent1 = Solution::from_sequence(&problem, &[0, 2, 4]);
    let parent2 = Solution::from_sequence(&problem, &[1, 3, 5]);

    let fragments = Genetic::fragments(&parent1, &parent2);

    assert_eq!(fragments.len(), 6);
    assert!(fragments.iter().all(|fragment| fragment.len() == 1));
}

#[test]
fn test_fragments_of_single_node_parents() {
    let problem = create_line_problem(3);
    let parent1 = Solution::new(&problem, 0);
    let parent2 = Solution::new(&problem, 0);

    assert_eq!(Genetic::fragments(&parent1, &parent2), vec![vec![0]]);
}

#[test]
fn test_crossover_produces_valid_children() {
    let problem = create_random_problem(20, 1);
    let mut rng = ChaCha8Rng::seed_from_u64(2);
    let parent1 = Solution::from_sequence(&problem, &[0, 1, 2, 3, 4, 5, 6, 7, 8, 9]);
    let parent2 = Solution::from_sequence(&problem, &[9, 8, 7, 3, 2, 10, 11, 12, 13, 14, 15, 16]);

    for _ in 0..100 {
        let child = Genetic.crossover(&problem, &parent1, &parent2, &mut rng);

        assert!(child.is_valid());
        assert!(child.len() >= 1 && child.len() <= parent2.len());
        assert!(child
            .nodes()
            .iter()
            .all(|&node| parent1.contains(node) || parent2.contains(node)));
        assert_eq!(child.score, problem.evaluate(&child.tour));
    }
}

#[test]
fn test_crossover_of_identical_parents_reproduces_parent() {
    let problem = create_random_problem(12, 3);
    let mut rng = ChaCha8Rng::seed_from_u64(4);
    let parent = Solution::from_sequence(&problem, &[4, 7, 1, 0, 9, 3]);

    for _ in 0..20 {
        let child = Genetic.crossover(&problem, &parent, &parent, &mut rng);
        assert!(child.is_duplicate_of(&parent));
    }
}

#[test]
fn test_population_initialization_is_distinct() {
    let problem = create_random_problem(30, 5);
    let mut rng = ChaCha8Rng::seed_from_u64(6);
    let mut local_search = LocalSearch::new();

    let mut population = Population::new(6);
    population
        .initialize(&problem, &mut local_search, &mut rng)
        .unwrap();

    assert!(population.len() >= 2 && population.len() <= 6);
    assert!(population.is_distinct());
    for member in &population.members {
        assert!(member.is_valid());
        assert!(member.check(&problem, 1e-6).is_ok());
    }
}

#[test]
fn test_population_tiny_instance_stays_distinct() {
    // Two nodes admit at most three distinct tours.
    let problem = create_line_problem(2);
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    let mut local_search = LocalSearch::new();

    let mut population = Population::new(20);
    population
        .initialize(&problem, &mut local_search, &mut rng)
        .unwrap();

    assert!(population.len() <= 3);
    assert!(population.is_distinct());
}

#[test]
fn test_select_parents_picks_different_members() {
    let problem = create_line_problem(5);
    let mut rng = ChaCha8Rng::seed_from_u64(8);
    let mut population = Population::new(3);
    population.members = vec![
        Solution::from_sequence(&problem, &[0, 1]),
        Solution::from_sequence(&problem, &[0, 1, 2]),
        Solution::from_sequence(&problem, &[3, 4]),
    ];

    for _ in 0..50 {
        let (a, b) = population.select_parents(&mut rng).unwrap();
        assert!(!std::ptr::eq(a, b));
    }

    population.members.truncate(1);
    assert!(population.select_parents(&mut rng).is_none());
}

#[test]
fn test_replace_worst_rules() {
    let problem = create_line_problem(5);
    let mut population = Population::new(3);
    population.members = vec![
        Solution::from_sequence(&problem, &[0, 1, 2, 3, 4]),
        Solution::from_sequence(&problem, &[0, 1]),
        Solution::from_sequence(&problem, &[0, 1, 2]),
    ];
    let worst = population.worst_index().unwrap();
    assert_eq!(worst, 1);

    // Not better than the worst member
    let weak = Solution::from_sequence(&problem, &[4]);
    assert!(!population.try_replace_worst(weak));

    // Better, but a duplicate of an existing member
    let duplicate = Solution::from_sequence(&problem, &[2, 1, 0]);
    assert!(!population.try_replace_worst(duplicate));

    // Better and new
    let child = Solution::from_sequence(&problem, &[1, 2, 3]);
    assert!(population.try_replace_worst(child));
    assert_eq!(population.members[1].nodes(), &[1, 2, 3]);
    assert!(population.is_distinct());

    let best = population.best().unwrap();
    assert_eq!(best.len(), 5);
}

#[test]
fn test_genetic_algorithm_run() {
    let problem = create_random_problem(25, 9);
    let config = Config::new()
        .with_cost_weight(1.0)
        .with_population_size(5)
        .with_max_iterations(20)
        .with_time_limit(Duration::from_secs(60));
    let mut rng = ChaCha8Rng::seed_from_u64(10);

    let mut genetic = GeneticAlgorithm::new(&config);
    let best = genetic.run(&problem, &mut rng).unwrap();

    assert_eq!(genetic.iterations, 20);
    assert!(genetic.replacements <= genetic.iterations);
    assert!(genetic.population.is_distinct());
    assert!(best.is_valid());
    assert!(best.check(&problem, 1e-6).is_ok());
    assert!(genetic
        .population
        .members
        .iter()
        .all(|member| member.score <= best.score));
}

#[test]
fn test_genetic_algorithm_on_tiny_instance() {
    let problem = create_line_problem(1);
    let config = Config::new()
        .with_cost_weight(1.0)
        .with_max_iterations(10)
        .with_time_limit(Duration::from_secs(60));
    let mut rng = ChaCha8Rng::seed_from_u64(11);

    let mut genetic = GeneticAlgorithm::new(&config);
    let best = genetic.run(&problem, &mut rng).unwrap();

    assert_eq!(best.tour, vec![0, 0]);
    assert_eq!(genetic.iterations, 0);
}
