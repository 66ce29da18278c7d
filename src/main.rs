//! Sliding Puzzle Solver
//!
//! Finds a sequence of tile slides that turns one arrangement of an N x N
//! sliding-tile puzzle into another, using a random walk, breadth-first,
//! best-first or A* search, and reports how much of the state space the
//! search touched.

use std::process;

use clap::{Args, Parser, Subcommand, ValueEnum};
use log::warn;

use slider::board::{parse_tiles, Action};
use slider::error::PuzzleError;
use slider::heuristic::Heuristic;
use slider::search::Algorithm;
use slider::{board_for_width, SolverOps};

/// Solves N x N sliding-tile puzzles with uninformed and heuristic search.
#[derive(Parser)]
#[command(name = "slider")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Search for a sequence of slides from the start to the goal.
    Solve(SolveArgs),
    /// Print a solvable start arrangement a number of random slides from the goal.
    Scramble {
        /// Grid width.
        #[arg(short, long, default_value_t = 3)]
        width: usize,
        /// Number of random slides.
        #[arg(short, long, default_value_t = 20)]
        moves: usize,
        /// Seed for reproducible scrambles.
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Report whether the goal can be reached from the start.
    Check(PuzzleArgs),
}

/// Start and goal arrangements on a board of a given width.
#[derive(Args)]
struct PuzzleArgs {
    /// Grid width.
    #[arg(short, long, default_value_t = 3)]
    width: usize,
    /// Start arrangement row by row, 0 for the blank (e.g. "1,2,3,4,0,6,7,5,8").
    #[arg(short, long)]
    initial: String,
    /// Goal arrangement; defaults to the tiles in order with the blank last.
    #[arg(short, long)]
    goal: Option<String>,
}

impl PuzzleArgs {
    /// Parses the start and goal tile lists for `board`.
    fn resolve(&self, board: &dyn SolverOps) -> Result<(Vec<u8>, Vec<u8>), PuzzleError> {
        let initial = parse_tiles(&self.initial)?;
        let goal = match &self.goal {
            Some(goal) => parse_tiles(goal)?,
            None => board.goal(),
        };
        Ok((initial, goal))
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Strategy {
    /// Uniformly random slides until the goal shows up.
    Random,
    /// Breadth-first search; shortest solutions.
    Bfs,
    /// Greedy search on the heuristic alone.
    BestFirst,
    /// Path length plus heuristic.
    Astar,
}

#[derive(Args)]
struct SolveArgs {
    #[command(flatten)]
    puzzle: PuzzleArgs,
    /// Search strategy.
    #[arg(short, long, value_enum, default_value_t = Strategy::Astar)]
    algorithm: Strategy,
    /// Heuristic for best-first and A* search.
    #[arg(long, value_enum, default_value_t = Heuristic::Manhattan)]
    heuristic: Heuristic,
    /// Seed for the random walk.
    #[arg(long)]
    seed: Option<u64>,
    /// Give up the random walk after this many slides.
    #[arg(long)]
    max_steps: Option<usize>,
    /// Print the board after every slide.
    #[arg(long)]
    replay: bool,
}

impl SolveArgs {
    /// Resolves the command-line choices into a concrete search algorithm.
    fn algorithm(&self) -> Algorithm {
        match self.algorithm {
            Strategy::Random => Algorithm::RandomWalk {
                seed: self.seed,
                step_limit: self.max_steps,
            },
            Strategy::Bfs => Algorithm::BreadthFirst,
            Strategy::BestFirst => Algorithm::BestFirst(self.heuristic),
            Strategy::Astar => Algorithm::AStar(self.heuristic),
        }
    }
}

fn main() {
    // the search report is printed; set RUST_LOG=info or debug for search progress
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    let result = match cli.command {
        Command::Solve(args) => run_solve(&args),
        Command::Scramble { width, moves, seed } => run_scramble(width, moves, seed),
        Command::Check(args) => run_check(&args),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Solves the puzzle and prints the report and the slides found.
fn run_solve(args: &SolveArgs) -> Result<(), PuzzleError> {
    let board = board_for_width(args.puzzle.width)?;
    let (initial, goal) = args.puzzle.resolve(board)?;
    let algorithm = args.algorithm();

    println!("Start:\n{}", board.format_tiles(&initial)?);
    if !board.is_solvable(&initial, &goal)? {
        warn!("the goal is not reachable from this start");
        if matches!(algorithm, Algorithm::RandomWalk { step_limit: None, .. }) {
            warn!("a random walk without --max-steps will not terminate");
        }
    }

    let report = board.solve(&algorithm, &initial, &goal)?;
    println!("{}: {}", report.algorithm, report.stats);

    match &report.path {
        Some(path) => print!("{}", format_solution(board, &initial, path, args.replay)?),
        None => println!("No solution found"),
    }

    Ok(())
}

/// Prints a random solvable start arrangement.
fn run_scramble(width: usize, moves: usize, seed: Option<u64>) -> Result<(), PuzzleError> {
    let board = board_for_width(width)?;
    let tiles = board.scramble(moves, seed);
    println!("{}", join_tiles(&tiles));
    print!("{}", board.format_tiles(&tiles)?);
    Ok(())
}

/// Prints whether the goal is reachable from the start.
fn run_check(args: &PuzzleArgs) -> Result<(), PuzzleError> {
    let board = board_for_width(args.width)?;
    let (initial, goal) = args.resolve(board)?;
    if board.is_solvable(&initial, &goal)? {
        println!("solvable");
    } else {
        println!("unsolvable");
    }
    Ok(())
}

fn join_tiles(tiles: &[u8]) -> String {
    tiles
        .iter()
        .map(|tile| tile.to_string())
        .collect::<Vec<_>>()
        .join(",")
}

/// Formats the slides of a solution, optionally with the board after each one.
fn format_solution(
    board: &dyn SolverOps,
    initial: &[u8],
    path: &[Action],
    replay: bool,
) -> Result<String, PuzzleError> {
    let actions: Vec<String> = path.iter().map(|action| action.to_string()).collect();
    let mut output = format!("Solution in {} moves: {}\n", path.len(), actions.join(" "));

    if replay {
        let states = board.replay(initial, path)?;
        for (step, (action, state)) in path.iter().zip(&states[1..]).enumerate() {
            // read the sliding tile before the move
            let tile = states[step][*action];
            output.push_str(&format!(
                "\nMove {}: slide {} from cell {}\n",
                step + 1,
                tile,
                action
            ));
            output.push_str(&board.format_tiles(state)?);
        }
    }

    Ok(output)
}
