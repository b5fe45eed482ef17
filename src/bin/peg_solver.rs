use anyhow::Result;
use clap::Parser;
use peg_solitaire_solver::logging;
use peg_solitaire_solver::solver::{solve_with_limits, SearchLimits, SearchMode, SearchOutcome};
use peg_solitaire_solver::utils::{parse_time_limit, read_board_file, write_moves_file};
use std::path::PathBuf;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Candidate ordering: plain (alias depth), rating, manhattan or area
    #[clap(short, long, value_enum, default_value_t = SearchMode::Area)]
    mode: SearchMode,

    /// Give up after this many seconds
    #[clap(short, long, value_parser = parse_time_limit)]
    time_limit: Option<Duration>,

    /// Print search diagnostics to stderr
    #[clap(short, long)]
    verbose: bool,

    /// Write diagnostics to this file instead of stderr
    #[clap(long)]
    log_file: Option<String>,

    /// Path to the board file (`rows cols` header, then rows of 0/1/2 codes)
    board_file: PathBuf,

    /// Path the solution moves are written to
    solution_file: PathBuf,
}

fn main() -> Result<()> {
    let args = Args::parse();

    if args.verbose {
        logging::enable_verbose_logging();
    }
    if let Some(path) = &args.log_file {
        logging::init_log_file(path)?;
    }

    let board = read_board_file(&args.board_file)?;
    println!("Loaded board from {}\n", args.board_file.display());
    println!("Initial board state ({} pegs):\n{}\n", board.peg_count(), board);
    println!("Searching with mode '{}'...\n", args.mode);

    let limits = SearchLimits {
        time_budget: args.time_limit,
    };
    let start = Instant::now();
    let outcome = solve_with_limits(&board, args.mode, &limits);
    let elapsed = start.elapsed();

    let stats = outcome.stats().clone();
    match &outcome {
        SearchOutcome::Solved(solution) => {
            println!("Solution found ({} moves):", solution.moves.len());
            for (i, mv) in solution.moves.iter().enumerate() {
                println!("  Move {}: {}", i + 1, mv);
            }
            println!("\nFinal board state:\n{}\n", solution.final_board);
        }
        SearchOutcome::Exhausted(_) => println!("No solution exists for this board.\n"),
        SearchOutcome::TimedOut(_) => println!("Time limit reached before a solution was found.\n"),
    }
    println!(
        "Expanded {} nodes, visited {} states, pruned {} duplicates.",
        stats.nodes_expanded, stats.states_visited, stats.duplicates_pruned
    );

    write_moves_file(&args.solution_file, &outcome.into_moves())?;
    println!("Solution written to {}", args.solution_file.display());
    println!("{:.3} seconds", elapsed.as_secs_f64());
    Ok(())
}
