#![doc = include_str!("../README.md")]

use anyhow::Context;
use clap::{Args, Parser, Subcommand, ValueEnum};
use cpu_time::ProcessTime;
use fsum::FSum;
use puzzles::puzzle_sliding::heuristic::Heuristic;
use puzzles::puzzle_sliding::state::Board;
use puzzles::puzzle_sliding::utils::{MAX_DIMENSION, MIN_DIMENSION};
use puzzles::solver::{Solver, SolverConf};
use puzzles::stats::{Limited, SearchAllStats};
use rand::{seq::SliceRandom, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::fs;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Cli {
    #[clap(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Solve the board read from the file and print the shortest solution
    Solve(SolveArgs),
    /// Solve random boards and report the search effort
    Bench(BenchArgs),
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum HeuristicArg {
    Manhattan,
    Hamming,
}

impl From<HeuristicArg> for Heuristic {
    fn from(arg: HeuristicArg) -> Self {
        match arg {
            HeuristicArg::Manhattan => Heuristic::Manhattan,
            HeuristicArg::Hamming => Heuristic::Hamming,
        }
    }
}

#[derive(Args, Debug)]
struct SolveArgs {
    /// Path to the board file: the dimension n followed by n*n tiles, 0 is the blank
    board_file: PathBuf,

    #[clap(long, value_enum, default_value = "manhattan")]
    heuristic: HeuristicArg,

    /// Give up after expanding this many nodes
    #[clap(long)]
    max_expansions: Option<u64>,
}

#[derive(Args, Debug)]
struct BenchArgs {
    /// Side length of the boards
    #[clap(short, long, default_value_t = 3)]
    dimension: usize,

    /// Number of boards to solve
    #[clap(short, long, default_value_t = 100)]
    count: usize,

    /// Number of random moves made from the goal to obtain each board
    #[clap(short, long, default_value_t = 200)]
    walk: usize,

    /// Use random permutations (half of them unsolvable) instead of random walks
    #[clap(long)]
    shuffle: bool,

    #[clap(long, default_value_t = 123)]
    seed: u64,

    #[clap(long, value_enum, default_value = "manhattan")]
    heuristic: HeuristicArg,
}

// https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance
fn sdev(sum: u64, sqrsum: f64, n: u64) -> f64 {
    if n < 2 { return 0.0; }
    let sum = sum as f64;
    ((sqrsum - sum * sum / n as f64) / (n-1) as f64).sqrt()
}

/// Returns random solvable board obtained by `steps` random moves from the goal.
fn rand_walk_board(dimension: usize, steps: usize, rng: &mut ChaCha8Rng) -> Board {
    let mut board = Board::goal(dimension);
    let mut prev_board: Option<Board> = None; // to not undo moves
    for _ in 0..steps {
        let mut neighbors = board.neighbors();
        neighbors.retain(|n| prev_board.as_ref() != Some(&*n));
        if let Some(next) = neighbors.choose(rng) {
            prev_board = Some(std::mem::replace(&mut board, next.clone()));
        }
    }
    board
}

/// Returns board with randomly permuted tiles.
fn rand_shuffled_board(dimension: usize, rng: &mut ChaCha8Rng) -> anyhow::Result<Board> {
    let mut tiles: Vec<u16> = (0..(dimension * dimension) as u16).collect();
    tiles.shuffle(rng);
    Ok(Board::from_tiles(dimension, tiles)?)
}

fn solve(args: SolveArgs) -> anyhow::Result<()> {
    let content = fs::read_to_string(&args.board_file)
        .with_context(|| format!("failed to read {}", args.board_file.display()))?;
    let initial = content.parse::<Board>()
        .with_context(|| format!("invalid board in {}", args.board_file.display()))?;
    info!(dimension = initial.dimension(), manhattan = initial.manhattan(), hamming = initial.hamming(), "board loaded");

    let conf = SolverConf::with_heuristic(args.heuristic.into());
    let mut stats = Limited::with_limit(args.max_expansions.unwrap_or(u64::MAX));
    let solver = Solver::with_conf(&initial, conf, &mut stats)?;
    info!(expanded = stats.expanded, generated = stats.generated, "search finished");

    print_solution(&mut io::stdout().lock(), &solver)?;
    Ok(())
}

/// Writes the number of moves followed by all boards of the solution, each followed by an empty line.
fn print_solution(out: &mut impl Write, solver: &Solver) -> io::Result<()> {
    match solver.solution() {
        None => writeln!(out, "No solution possible"),
        Some(path) => {
            writeln!(out, "Minimum number of moves = {}", path.len() - 1)?;
            for board in path {
                writeln!(out, "{}", board)?;
            }
            Ok(())
        }
    }
}

fn bench(args: BenchArgs) -> anyhow::Result<()> {
    if !(MIN_DIMENSION..=MAX_DIMENSION).contains(&args.dimension) {
        anyhow::bail!("dimension must be in range {}..={}", MIN_DIMENSION, MAX_DIMENSION);
    }
    let conf = SolverConf::with_heuristic(args.heuristic.into());
    let mut rng = ChaCha8Rng::seed_from_u64(args.seed);
    let mut total_visits = SearchAllStats::default();
    let mut total_expanded_sqr = 0.0;
    let mut seconds = Vec::with_capacity(args.count);
    let mut solvable = 0usize;
    let mut total_moves = 0u64;
    for index in 0..args.count {
        let initial = if args.shuffle {
            rand_shuffled_board(args.dimension, &mut rng)?
        } else {
            rand_walk_board(args.dimension, args.walk, &mut rng)
        };
        let mut visits = SearchAllStats::default();
        let start_moment = ProcessTime::try_now().context("getting process time failed")?;
        let solver = Solver::with_conf(&initial, conf, &mut visits)?;
        let elapsed = start_moment.try_elapsed().context("getting process time failed")?.as_secs_f64();
        if let Some(moves) = solver.moves() {
            solvable += 1;
            total_moves += moves as u64;
        }
        info!(index, moves = solver.moves(), expanded = visits.expanded, seconds = elapsed, "case solved");
        total_visits += visits;
        total_expanded_sqr += visits.expanded as f64 * visits.expanded as f64;
        seconds.push(elapsed);
    }
    if args.count == 0 { return Ok(()); }
    let count = args.count as f64;
    println!("{} boards {}x{}, {} solvable, {:.2} moves/solvable board.",
             args.count, args.dimension, args.dimension, solvable,
             if solvable == 0 { 0.0 } else { total_moves as f64 / solvable as f64 });
    println!("  {:.0} (sdev {:.0}) nodes/case expanded, {:.0} nodes/case generated, {:.6} sec/case.",
             total_visits.expanded as f64 / count,
             sdev(total_visits.expanded, total_expanded_sqr, args.count as u64),
             total_visits.generated as f64 / count,
             FSum::with_all(seconds.iter().copied()).value() / count);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt().with_env_filter(filter).with_writer(std::io::stderr).init();

    match Cli::parse().command {
        Command::Solve(args) => solve(args),
        Command::Bench(args) => bench(args),
    }
}
