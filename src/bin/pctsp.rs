//! Command-line front end: load or generate an instance, run a solver and
//! report the tour.

use clap::{Parser, ValueEnum};
use log::info;
use pctsp::config::Config;
use pctsp::problem::{Node, Problem};
use pctsp::utils::{format_duration, RunSummary};
use pctsp::{Algorithm, Solver};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Clone, Copy, ValueEnum)]
enum AlgorithmArg {
    NearestNeighbour,
    CycleExpansion,
    Regret,
    RandomLs,
    GreedyLs,
    Msls,
    Ils,
    Sa,
    Ga,
}

impl From<AlgorithmArg> for Algorithm {
    fn from(arg: AlgorithmArg) -> Self {
        match arg {
            AlgorithmArg::NearestNeighbour => Algorithm::NearestNeighbour,
            AlgorithmArg::CycleExpansion => Algorithm::CycleExpansion,
            AlgorithmArg::Regret => Algorithm::RegretExpansion,
            AlgorithmArg::RandomLs => Algorithm::RandomLocalSearch,
            AlgorithmArg::GreedyLs => Algorithm::GreedyLocalSearch,
            AlgorithmArg::Msls => Algorithm::MultiStartLocalSearch,
            AlgorithmArg::Ils => Algorithm::IteratedLocalSearch,
            AlgorithmArg::Sa => Algorithm::SimulatedAnnealing,
            AlgorithmArg::Ga => Algorithm::Genetic,
        }
    }
}

/// Heuristic solver for the profit-collecting travelling salesman problem.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Solver to run
    #[arg(short, long, value_enum, default_value = "regret")]
    algorithm: AlgorithmArg,

    /// JSON file holding an array of nodes ({"id", "x", "y", "gain"})
    #[arg(short, long, conflicts_with = "random")]
    input: Option<PathBuf>,

    /// Generate a random instance with this many nodes instead
    #[arg(short, long, default_value_t = 100)]
    random: usize,

    /// Random seed
    #[arg(short, long)]
    seed: Option<u64>,

    /// Weight applied to every travelled distance
    #[arg(long, default_value_t = 5.0)]
    cost_weight: f64,

    /// Time budget for iterated local search and the genetic algorithm
    #[arg(long, default_value_t = 10_000)]
    time_limit_ms: u64,

    /// Seed node for the construction heuristics
    #[arg(long, default_value_t = 0)]
    start_node: usize,

    /// Run construction heuristics from every seed node and keep the best
    #[arg(long)]
    all_seeds: bool,

    /// Repeat the run this many times and print a summary
    #[arg(long, default_value_t = 1)]
    runs: usize,

    /// Print the outcome as JSON
    #[arg(long)]
    json: bool,
}

fn load_problem(args: &Args) -> Result<Problem, Box<dyn std::error::Error>> {
    match &args.input {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            let nodes: Vec<Node> = serde_json::from_reader(reader)?;
            let name = path
                .file_stem()
                .map(|stem| stem.to_string_lossy().into_owned())
                .unwrap_or_else(|| "input".to_string());
            Ok(Problem::new(name, nodes, args.cost_weight))
        }
        None => {
            let mut rng = ChaCha8Rng::seed_from_u64(args.seed.unwrap_or(0));
            Ok(Problem::random(
                format!("random-{}", args.random),
                args.random,
                args.cost_weight,
                &mut rng,
            ))
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();
    let args = Args::parse();

    let problem = load_problem(&args)?;
    info!("loaded {} with {} nodes", problem.name, problem.len());

    let mut config = Config::new()
        .with_cost_weight(args.cost_weight)
        .with_start_node(args.start_node)
        .with_all_seeds(args.all_seeds)
        .with_time_limit(Duration::from_millis(args.time_limit_ms));
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }

    let algorithm = Algorithm::from(args.algorithm);
    let mut solver = Solver::new(problem, config)?;
    let mut scores = Vec::with_capacity(args.runs);

    for _ in 0..args.runs.max(1) {
        let outcome = solver.run(algorithm)?;
        scores.push(outcome.solution.score);

        if args.json {
            println!("{}", serde_json::to_string_pretty(&outcome)?);
        } else {
            println!(
                "{:?}: score {:.2}, {} nodes, {}",
                outcome.algorithm,
                outcome.solution.score,
                outcome.solution.len(),
                format_duration(outcome.elapsed)
            );
            println!("tour: {:?}", outcome.solution.tour);
        }
    }

    if args.runs > 1 {
        if let Some(summary) = RunSummary::from_scores(&scores) {
            println!("{:?} - {}", algorithm, summary.format());
        }
    }

    Ok(())
}
