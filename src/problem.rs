//! Problem definition and scoring primitives for the profit-collecting TSP.

use crate::error::{Error, Result};
use itertools::Itertools;
use rand::Rng;
use serde::{Deserialize, Serialize};

/// A point that may be visited, together with the profit earned by visiting it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Node {
    pub id: usize,
    pub x: f64,
    pub y: f64,
    pub gain: f64,
}

impl Node {
    /// Create a new node.
    pub fn new(id: usize, x: f64, y: f64, gain: f64) -> Self {
        Node { id, x, y, gain }
    }

    /// Calculate the Euclidean distance between two nodes.
    pub fn distance(&self, other: &Node) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

/// A problem instance: the node arena, its distance matrix and the weight
/// applied to every travelled distance.
///
/// Tours refer to nodes by their index in `nodes`, never by `Node::id`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Problem {
    pub name: String,
    pub nodes: Vec<Node>,
    pub cost_weight: f64,
    pub distance_matrix: Vec<Vec<f64>>,
}

impl Problem {
    /// Create a new problem.
    pub fn new(name: String, nodes: Vec<Node>, cost_weight: f64) -> Self {
        let distance_matrix = Self::compute_distance_matrix(&nodes);

        Problem {
            name,
            nodes,
            cost_weight,
            distance_matrix,
        }
    }

    /// Generate a random instance with coordinates and gains drawn uniformly
    /// from `[0, 4000)`, the range of the classic kroA/kroB instances.
    pub fn random<R: Rng>(name: String, size: usize, cost_weight: f64, rng: &mut R) -> Self {
        let nodes = (0..size)
            .map(|id| {
                Node::new(
                    id,
                    rng.gen_range(0.0..4000.0),
                    rng.gen_range(0.0..4000.0),
                    rng.gen_range(0.0..4000.0),
                )
            })
            .collect();

        Problem::new(name, nodes, cost_weight)
    }

    /// Number of nodes in the arena.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check whether the problem has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Euclidean distance between two node indices.
    pub fn distance(&self, from: usize, to: usize) -> f64 {
        self.distance_matrix[from][to]
    }

    /// Weighted travel cost between two node indices.
    pub fn cost(&self, from: usize, to: usize) -> f64 {
        self.cost_weight * self.distance_matrix[from][to]
    }

    /// Gain of a node index.
    pub fn gain(&self, node: usize) -> f64 {
        self.nodes[node].gain
    }

    /// Fully evaluate a closed tour: collected gain minus weighted length.
    ///
    /// The closing duplicate of the anchor contributes no gain.
    pub fn evaluate(&self, tour: &[usize]) -> f64 {
        tour.iter()
            .tuple_windows()
            .map(|(&from, &to)| self.gain(from) - self.cost(from, to))
            .sum()
    }

    /// Difference between a claimed score and the evaluated score of a tour.
    pub fn verify(&self, tour: &[usize], claimed: f64) -> f64 {
        claimed - self.evaluate(tour)
    }

    /// Fail with `Error::ScoreDrift` if the claimed score is further than
    /// `tolerance` from the evaluated score.
    pub fn check(&self, tour: &[usize], claimed: f64, tolerance: f64) -> Result<()> {
        let actual = self.evaluate(tour);
        if (claimed - actual).abs() > tolerance {
            return Err(Error::ScoreDrift { claimed, actual });
        }
        Ok(())
    }

    /// Ensure a node index refers to a node of this problem.
    pub fn check_node(&self, node: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(Error::EmptyProblem);
        }
        if node >= self.nodes.len() {
            return Err(Error::InvalidNode(node));
        }
        Ok(())
    }

    /// Generate the full distance matrix for all nodes.
    fn compute_distance_matrix(nodes: &[Node]) -> Vec<Vec<f64>> {
        let n = nodes.len();
        let mut matrix = vec![vec![0.0; n]; n];

        for i in 0..n {
            for j in 0..n {
                if i != j {
                    matrix[i][j] = nodes[i].distance(&nodes[j]);
                }
            }
        }

        matrix
    }
}
