//! Unit tests for scoring and the solution representation.

use pctsp::error::Error;
use pctsp::problem::{Node, Problem};
use pctsp::solution::Solution;

/// Four nodes on the corners of a 10x10 square, all with the same gain.
fn create_square_problem(gain: f64) -> Problem {
    let nodes = vec![
        Node::new(0, 0.0, 0.0, gain),
        Node::new(1, 0.0, 10.0, gain),
        Node::new(2, 10.0, 10.0, gain),
        Node::new(3, 10.0, 0.0, gain),
    ];

    Problem::new("Square".to_string(), nodes, 1.0)
}

#[test]
fn test_node_distance() {
    let a = Node::new(0, 0.0, 0.0, 0.0);
    let b = Node::new(1, 3.0, 4.0, 0.0);

    assert_eq!(a.distance(&b), 5.0);
    assert_eq!(b.distance(&a), 5.0);
}

#[test]
fn test_evaluate_full_square() {
    let problem = create_square_problem(5.0);

    // 20 gain minus a perimeter of 40
    assert_eq!(problem.evaluate(&[0, 1, 2, 3, 0]), -20.0);
}

#[test]
fn test_evaluate_single_node_tour() {
    let problem = create_square_problem(5.0);

    assert_eq!(problem.evaluate(&[2, 2]), 5.0);
}

#[test]
fn test_evaluate_applies_cost_weight() {
    let mut problem = create_square_problem(5.0);
    problem.cost_weight = 5.0;

    assert_eq!(problem.evaluate(&[0, 1, 0]), 10.0 - 5.0 * 20.0);
}

#[test]
fn test_verify_round_trip_is_exact() {
    let problem = create_square_problem(7.5);
    let tour = [0, 2, 1, 3, 0];

    assert_eq!(problem.verify(&tour, problem.evaluate(&tour)), 0.0);
    assert!((problem.verify(&tour, problem.evaluate(&tour) + 2.0) - 2.0).abs() < 1e-9);
}

#[test]
fn test_check_reports_drift() {
    let problem = create_square_problem(5.0);
    let tour = [0, 1, 2, 3, 0];

    assert!(problem.check(&tour, -20.5, 1.0).is_ok());

    match problem.check(&tour, -15.0, 1.0) {
        Err(Error::ScoreDrift { claimed, actual }) => {
            assert_eq!(claimed, -15.0);
            assert_eq!(actual, -20.0);
        }
        other => panic!("expected score drift, got {:?}", other),
    }
}

#[test]
fn test_check_node() {
    let problem = create_square_problem(5.0);
    assert!(problem.check_node(3).is_ok());
    assert_eq!(problem.check_node(4), Err(Error::InvalidNode(4)));

    let empty = Problem::new("Empty".to_string(), Vec::new(), 1.0);
    assert_eq!(empty.check_node(0), Err(Error::EmptyProblem));
}

#[test]
fn test_solution_from_sequence() {
    let problem = create_square_problem(5.0);
    let solution = Solution::from_sequence(&problem, &[3, 1, 2]);

    assert_eq!(solution.tour, vec![3, 1, 2, 3]);
    assert_eq!(solution.len(), 3);
    assert_eq!(solution.nodes(), &[3, 1, 2]);
    assert_eq!(solution.free_nodes().collect::<Vec<_>>(), vec![0]);
    assert_eq!(solution.free_count(), 1);
    assert!(solution.is_valid());
    assert!(solution.check(&problem, 1e-9).is_ok());
}

#[test]
fn test_solution_new_single_node() {
    let problem = create_square_problem(5.0);
    let solution = Solution::new(&problem, 1);

    assert_eq!(solution.tour, vec![1, 1]);
    assert_eq!(solution.score, 5.0);
    assert!(solution.is_valid());
}

#[test]
fn test_is_valid_detects_corruption() {
    let problem = create_square_problem(5.0);

    let mut repeated = Solution::from_sequence(&problem, &[0, 1, 2]);
    repeated.tour = vec![0, 1, 1, 0];
    assert!(!repeated.is_valid());

    let mut open = Solution::from_sequence(&problem, &[0, 1, 2]);
    open.tour.pop();
    assert!(!open.is_valid());

    let mut stale_bitset = Solution::from_sequence(&problem, &[0, 1, 2]);
    stale_bitset.in_tour[3] = true;
    assert!(!stale_bitset.is_valid());
}

#[test]
fn test_remove_anchor_reanchors_tour() {
    let problem = create_square_problem(5.0);
    let mut solution = Solution::from_sequence(&problem, &[0, 1, 2]);

    let removed = solution.remove_at(0);

    assert_eq!(removed, 0);
    assert_eq!(solution.tour, vec![1, 2, 1]);
    assert!(!solution.contains(0));
    assert!(solution.is_valid());
}

#[test]
fn test_insert_node_updates_pool() {
    let problem = create_square_problem(5.0);
    let mut solution = Solution::from_sequence(&problem, &[0, 2]);

    solution.insert_node(1, 3);

    assert_eq!(solution.tour, vec![0, 2, 3, 0]);
    assert!(solution.contains(3));
    assert_eq!(solution.free_nodes().collect::<Vec<_>>(), vec![1]);
}

#[test]
fn test_duplicate_detection() {
    let problem = create_square_problem(5.0);
    let a = Solution::from_sequence(&problem, &[0, 1, 2, 3]);
    let rotated = Solution::from_sequence(&problem, &[2, 3, 0, 1]);
    let reversed = Solution::from_sequence(&problem, &[3, 2, 1, 0]);
    let reversed_rotated = Solution::from_sequence(&problem, &[1, 0, 3, 2]);
    let different = Solution::from_sequence(&problem, &[0, 2, 1, 3]);
    let shorter = Solution::from_sequence(&problem, &[0, 1, 2]);

    assert!(a.is_duplicate_of(&a));
    assert!(a.is_duplicate_of(&rotated));
    assert!(a.is_duplicate_of(&reversed));
    assert!(a.is_duplicate_of(&reversed_rotated));
    assert!(!a.is_duplicate_of(&different));
    assert!(!a.is_duplicate_of(&shorter));

    // Symmetry
    assert_eq!(a.is_duplicate_of(&different), different.is_duplicate_of(&a));
    assert_eq!(a.is_duplicate_of(&reversed), reversed.is_duplicate_of(&a));
}

#[test]
fn test_duplicate_detection_same_size_disjoint() {
    let problem = create_square_problem(5.0);
    let a = Solution::from_sequence(&problem, &[0, 1]);
    let b = Solution::from_sequence(&problem, &[2, 3]);

    assert!(!a.is_duplicate_of(&b));
    assert!(!b.is_duplicate_of(&a));
}
