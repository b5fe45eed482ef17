//! End-to-end check: board text in, solution text out, replayed by the verifier.

use peg_solitaire_solver::engine::Board;
use peg_solitaire_solver::solver::{solve, SearchMode, SearchOutcome};
use peg_solitaire_solver::utils::{format_moves, parse_board, parse_moves};
use peg_solitaire_solver::verifier::{verify, VerifyPolicy};

/// Four pegs in an L; one solution is 1 1 1 3, 3 2 1 2, 1 3 1 1.
const L_BOARD: &str = "\
3 4
1 1 2 2
2 1 2 0
2 1 2 0
";

fn round_trip(board: &Board, mode: SearchMode) -> Option<usize> {
    let outcome = solve(board, mode);
    let solved = outcome.is_solved();
    let text = format_moves(&outcome.into_moves());
    let moves = parse_moves(&text).expect("formatted moves parse back");
    if !solved {
        assert!(moves.is_empty());
        return None;
    }
    let report = verify(board, &moves, VerifyPolicy::Strict).expect("solver moves are legal");
    assert!(report.is_valid(), "mode {} left {} pegs", mode, report.remaining_pegs);
    assert_eq!(report.applied, moves.len());
    assert_eq!(moves.len(), board.peg_count() - 1);
    Some(moves.len())
}

#[test]
fn l_board_is_solved_by_every_mode() {
    let board = parse_board(L_BOARD).unwrap();
    assert_eq!(board.peg_count(), 4);
    for mode in SearchMode::ALL {
        assert_eq!(round_trip(&board, mode), Some(3), "mode {}", mode);
    }
}

#[test]
fn seeded_boards_are_solved_by_every_mode() {
    for seed in 100..112 {
        let board = Board::random_solvable(6, 6, 10, seed);
        for mode in SearchMode::ALL {
            assert!(
                round_trip(&board, mode).is_some(),
                "seed {} mode {} failed",
                seed,
                mode
            );
        }
    }
}

#[test]
fn unsolvable_board_yields_empty_solution() {
    // Two pegs that can never meet.
    let board = parse_board("1 5\n1 2 2 2 1\n").unwrap();
    for mode in SearchMode::ALL {
        assert!(matches!(solve(&board, mode), SearchOutcome::Exhausted(_)));
        assert_eq!(round_trip(&board, mode), None);
    }
}

#[test]
fn tampered_solution_fails_verification() {
    let board = parse_board(L_BOARD).unwrap();
    let mut moves = solve(&board, SearchMode::Area).into_moves();
    moves.pop();

    let permissive = verify(&board, &moves, VerifyPolicy::Permissive).unwrap();
    assert!(!permissive.is_valid());
    assert_eq!(permissive.remaining_pegs, 2);

    // Replaying the first move twice: the second copy has nothing to jump over.
    let mut doubled = moves.clone();
    doubled.insert(1, moves[0]);
    assert!(verify(&board, &doubled, VerifyPolicy::Strict).is_err());
    let report = verify(&board, &doubled, VerifyPolicy::Permissive).unwrap();
    assert_eq!(report.skipped.len(), 1);
    assert_eq!(report.skipped[0].index, 2);
}
