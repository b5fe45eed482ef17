//! Error types for the peg solitaire solver.

use crate::engine::Move;
use thiserror::Error;

/// Main error type for the solver library.
///
/// Search failures are not errors: an unsolvable board is reported as
/// [`SearchOutcome::Exhausted`](crate::solver::SearchOutcome::Exhausted).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Error {
    #[error("invalid board dimensions {rows}x{cols}: both must be at least 1")]
    InvalidDimensions { rows: usize, cols: usize },

    #[error("board is {rows}x{cols} but {got} cells were supplied (expected {expected})")]
    CellCountMismatch {
        rows: usize,
        cols: usize,
        expected: usize,
        got: usize,
    },

    #[error("invalid cell code '{code}' at row {row} col {col} (expected 0, 1 or 2)")]
    InvalidCellCode { code: char, row: usize, col: usize },

    #[error("missing or malformed dimension header: '{line}'")]
    MissingHeader { line: String },

    #[error("expected {expected} board rows, found {got}")]
    RowCountMismatch { expected: usize, got: usize },

    #[error("row {row} has {got} cells (expected {expected})")]
    RowLengthMismatch {
        row: usize,
        expected: usize,
        got: usize,
    },

    #[error("malformed move on line {line}: '{text}' (expected four positive integers)")]
    MalformedMove { line: usize, text: String },

    #[error("move {index} ({mv}) is invalid: {reason}")]
    InvalidMove {
        index: usize,
        mv: Move,
        reason: MoveRejection,
    },
}

/// Why the verifier refused to apply a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveRejection {
    /// Source or destination lies outside the grid.
    OutOfBounds,
    /// Source and destination are not two cells apart on one row or column.
    NotAxisAlignedJump,
    /// The source cell holds no peg.
    SourceNotPeg,
    /// The cell being jumped over holds no peg.
    NothingToJumpOver,
    /// The landing cell is occupied or off the playable board.
    DestinationNotEmpty,
}

impl std::fmt::Display for MoveRejection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            MoveRejection::OutOfBounds => "coordinates are outside the board",
            MoveRejection::NotAxisAlignedJump => "not a two-cell jump along a row or column",
            MoveRejection::SourceNotPeg => "source cell holds no peg",
            MoveRejection::NothingToJumpOver => "intervening cell holds no peg",
            MoveRejection::DestinationNotEmpty => "destination cell is not empty",
        };
        f.write_str(text)
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;
