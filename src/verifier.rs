//! Independent replay of a claimed solution.
//!
//! The verifier does not trust the solver: it takes the original board and a list
//! of 1-based moves, applies them one by one to its own copy of the board and
//! declares success iff exactly one peg is left at the end.
use crate::engine::{Board, Cell, Move};
use crate::error::{Error, MoveRejection, Result};

/// What to do when a move in the list cannot be applied.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum VerifyPolicy {
    /// Skip the move, leave the board unchanged for that step and keep going.
    #[default]
    Permissive,
    /// Stop at the first invalid move with [`Error::InvalidMove`].
    Strict,
}

/// A move the verifier refused to apply.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RejectedMove {
    /// 1-based position of the move in the list.
    pub index: usize,
    pub mv: Move,
    pub reason: MoveRejection,
}

/// Result of replaying a move list.
#[derive(Clone, Debug)]
pub struct VerificationReport {
    /// Number of moves that were applied.
    pub applied: usize,
    /// Moves that were skipped (always empty under `VerifyPolicy::Strict`).
    pub skipped: Vec<RejectedMove>,
    pub remaining_pegs: usize,
    pub final_board: Board,
}

impl VerificationReport {
    /// The solution is valid when exactly one peg remains.
    pub fn is_valid(&self) -> bool {
        self.remaining_pegs == 1
    }
}

/// Replays `moves` against a copy of `board`.
///
/// # Errors
/// Under `VerifyPolicy::Strict`, returns `Error::InvalidMove` for the first move that
/// cannot be applied. Under `VerifyPolicy::Permissive` this never fails.
///
/// # Examples
/// ```
/// use peg_solitaire_solver::engine::{Board, Cell, Move};
/// use peg_solitaire_solver::verifier::{verify, VerifyPolicy};
/// let board = Board::from_cells(1, 3, vec![Cell::Peg, Cell::Peg, Cell::Empty]).unwrap();
/// let report = verify(&board, &[Move::new(1, 1, 1, 3)], VerifyPolicy::Strict).unwrap();
/// assert!(report.is_valid());
/// ```
pub fn verify(board: &Board, moves: &[Move], policy: VerifyPolicy) -> Result<VerificationReport> {
    let mut working = board.clone();
    let mut applied = 0;
    let mut skipped = Vec::new();

    for (i, mv) in moves.iter().enumerate() {
        match apply_checked(&mut working, mv) {
            Ok(()) => applied += 1,
            Err(reason) => {
                let index = i + 1;
                if policy == VerifyPolicy::Strict {
                    return Err(Error::InvalidMove {
                        index,
                        mv: *mv,
                        reason,
                    });
                }
                skipped.push(RejectedMove {
                    index,
                    mv: *mv,
                    reason,
                });
            }
        }
    }

    Ok(VerificationReport {
        applied,
        skipped,
        remaining_pegs: working.peg_count(),
        final_board: working,
    })
}

/// Checks `mv` against `board` and applies it in place. The board is left untouched
/// when the move is rejected.
fn apply_checked(board: &mut Board, mv: &Move) -> std::result::Result<(), MoveRejection> {
    let to_index = |one_based: usize, limit: usize| {
        one_based
            .checked_sub(1)
            .filter(|zero_based| *zero_based < limit)
    };
    let (from_r, from_c, to_r, to_c) = match (
        to_index(mv.from_row, board.rows()),
        to_index(mv.from_col, board.cols()),
        to_index(mv.to_row, board.rows()),
        to_index(mv.to_col, board.cols()),
    ) {
        (Some(fr), Some(fc), Some(tr), Some(tc)) => (fr, fc, tr, tc),
        _ => return Err(MoveRejection::OutOfBounds),
    };

    let same_row_jump = from_r == to_r && from_c.abs_diff(to_c) == 2;
    let same_col_jump = from_c == to_c && from_r.abs_diff(to_r) == 2;
    if !same_row_jump && !same_col_jump {
        return Err(MoveRejection::NotAxisAlignedJump);
    }
    let (mid_r, mid_c) = ((from_r + to_r) / 2, (from_c + to_c) / 2);

    if board.get_cell(mid_r, mid_c) != Cell::Peg {
        return Err(MoveRejection::NothingToJumpOver);
    }
    if board.get_cell(from_r, from_c) != Cell::Peg {
        return Err(MoveRejection::SourceNotPeg);
    }
    if board.get_cell(to_r, to_c) != Cell::Empty {
        return Err(MoveRejection::DestinationNotEmpty);
    }

    board.set_cell(mid_r, mid_c, Cell::Empty);
    board.set_cell(from_r, from_c, Cell::Empty);
    board.set_cell(to_r, to_c, Cell::Peg);
    Ok(())
}
