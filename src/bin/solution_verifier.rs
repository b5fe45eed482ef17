use anyhow::Result;
use clap::Parser;
use peg_solitaire_solver::utils::{read_board_file, read_moves_file};
use peg_solitaire_solver::verifier::{verify, VerifyPolicy};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser, Debug)]
#[clap(author, version, about, long_about = None)]
struct Args {
    /// Reject the whole solution at the first invalid move instead of skipping it
    #[clap(short, long)]
    strict: bool,

    /// Path to the original board file
    board_file: PathBuf,

    /// Path to the solution file (one `srcRow srcCol dstRow dstCol` move per line)
    solution_file: PathBuf,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let board = read_board_file(&args.board_file)?;
    let moves = read_moves_file(&args.solution_file)?;
    let policy = if args.strict {
        VerifyPolicy::Strict
    } else {
        VerifyPolicy::Permissive
    };

    let report = match verify(&board, &moves, policy) {
        Ok(report) => report,
        Err(e) => {
            println!("{}", e);
            println!("The solution is not valid.");
            return Ok(ExitCode::FAILURE);
        }
    };

    for rejected in &report.skipped {
        eprintln!(
            "Warning: skipped move {} ({}): {}",
            rejected.index, rejected.mv, rejected.reason
        );
    }

    if report.is_valid() {
        println!("The solution is valid.");
        Ok(ExitCode::SUCCESS)
    } else {
        println!(
            "The solution is not valid. ({} pegs remain)",
            report.remaining_pegs
        );
        Ok(ExitCode::FAILURE)
    }
}
