use clap::Parser;
use peg_solitaire_solver::engine::Board;
use peg_solitaire_solver::solver::{solve_with_limits, SearchLimits, SearchMode, SearchOutcome};
use peg_solitaire_solver::utils::parse_time_limit;
use peg_solitaire_solver::verifier::{verify, VerifyPolicy};
use std::collections::HashMap;
use std::time::{Duration, Instant};

#[derive(Parser, Debug)]
#[clap(author, version, about = "Compare the search modes on seeded solvable boards", long_about = None)]
struct Args {
    /// Number of random boards to evaluate
    #[clap(short, long, default_value_t = 20)]
    boards: usize,

    /// Seed of the first board; board i uses seed + i
    #[clap(short, long, default_value_t = 0)]
    seed: u64,

    /// Board height
    #[clap(long, default_value_t = 7)]
    rows: usize,

    /// Board width
    #[clap(long, default_value_t = 7)]
    cols: usize,

    /// Reverse jumps used to build each board (initial peg count is at most this plus one)
    #[clap(long, default_value_t = 16)]
    reverse_moves: usize,

    /// Per-run time limit in seconds
    #[clap(short, long, default_value = "5", value_parser = parse_time_limit)]
    time_limit: Duration,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum RunStatus {
    Solved,
    /// The solver claimed a solution that the verifier rejects.
    Unverified,
    Exhausted,
    TimedOut,
}

impl RunStatus {
    fn label(self) -> &'static str {
        match self {
            RunStatus::Solved => "solved",
            RunStatus::Unverified => "UNVERIFIED",
            RunStatus::Exhausted => "exhausted",
            RunStatus::TimedOut => "timed out",
        }
    }
}

fn classify(board: &Board, outcome: &SearchOutcome) -> RunStatus {
    match outcome {
        SearchOutcome::Solved(solution) => {
            let verified = verify(board, &solution.moves, VerifyPolicy::Strict)
                .map(|report| report.is_valid())
                .unwrap_or(false);
            if verified {
                RunStatus::Solved
            } else {
                RunStatus::Unverified
            }
        }
        SearchOutcome::Exhausted(_) => RunStatus::Exhausted,
        SearchOutcome::TimedOut(_) => RunStatus::TimedOut,
    }
}

#[derive(Default)]
struct ModeTotals {
    solved: usize,
    unverified: usize,
    timed_out: usize,
    nodes: u64,
    seconds: f64,
}

fn main() {
    let args = Args::parse();
    let limits = SearchLimits {
        time_budget: Some(args.time_limit),
    };

    let mut totals: HashMap<SearchMode, ModeTotals> = HashMap::new();

    println!(
        "Evaluating {} modes on {} boards ({}x{}, {} reverse jumps)...",
        SearchMode::ALL.len(),
        args.boards,
        args.rows,
        args.cols,
        args.reverse_moves
    );

    for board_idx in 0..args.boards {
        let current_seed = args.seed + board_idx as u64;
        let board = Board::random_solvable(args.rows, args.cols, args.reverse_moves, current_seed);
        println!(
            "\nBoard {} (Seed: {}, Pegs: {})",
            board_idx,
            current_seed,
            board.peg_count()
        );

        for mode in SearchMode::ALL {
            let start = Instant::now();
            let outcome = solve_with_limits(&board, mode, &limits);
            let seconds = start.elapsed().as_secs_f64();
            let entry = totals.entry(mode).or_default();
            entry.nodes += outcome.stats().nodes_expanded;
            entry.seconds += seconds;

            let status = classify(&board, &outcome);
            match status {
                RunStatus::Solved => entry.solved += 1,
                RunStatus::Unverified => {
                    entry.unverified += 1;
                    eprintln!(
                        "Error: mode {} produced a solution that does not verify on seed {}",
                        mode, current_seed
                    );
                }
                RunStatus::Exhausted => eprintln!(
                    "Error: mode {} exhausted a solvable board (seed {})",
                    mode, current_seed
                ),
                RunStatus::TimedOut => entry.timed_out += 1,
            }
            println!(
                "  Mode: {:<10} {:<10} Nodes: {:<10} Time: {:.3}s",
                mode,
                status.label(),
                outcome.stats().nodes_expanded,
                seconds
            );
        }
    }

    println!("\n--- Evaluation Complete ---");
    println!("\n--- Totals ---");

    let mut rows: Vec<(SearchMode, &ModeTotals)> =
        SearchMode::ALL.iter().filter_map(|m| totals.get(m).map(|t| (*m, t))).collect();
    // Most boards solved first, then fewest nodes.
    rows.sort_by(|a, b| b.1.solved.cmp(&a.1.solved).then(a.1.nodes.cmp(&b.1.nodes)));

    for (mode, t) in rows {
        println!(
            "Mode {:<10}: solved {:>3}/{:<3} unverified {:>3} timed out {:>3}  nodes {:>12}  time {:.3}s",
            mode, t.solved, args.boards, t.unverified, t.timed_out, t.nodes, t.seconds
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use peg_solitaire_solver::engine::{Cell, Move};
    use peg_solitaire_solver::solver::{solve, SearchStats, Solution};

    fn row_board() -> Board {
        Board::from_cells(1, 4, vec![Cell::Peg, Cell::Peg, Cell::Empty, Cell::Peg]).unwrap()
    }

    #[test]
    fn test_real_solution_counts_as_solved() {
        let board = row_board();
        assert_eq!(classify(&board, &solve(&board, SearchMode::Area)), RunStatus::Solved);
    }

    #[test]
    fn test_bogus_solution_is_not_counted_as_solved() {
        let board = row_board();
        let outcome = SearchOutcome::Solved(Solution {
            moves: vec![Move::new(1, 1, 1, 3)],
            final_board: board.clone(),
            mode: SearchMode::Plain,
            stats: SearchStats::default(),
        });
        assert_eq!(classify(&board, &outcome), RunStatus::Unverified);
    }
}
