//! # Peg Solitaire Solver Library
//!
//! This library finds jump sequences that reduce a peg solitaire board to a single
//! peg, and independently verifies such sequences.
//!
//! It is used by three binaries:
//! - `peg_solver`: reads a board file, searches in the selected mode and writes the
//!   moves to a solution file.
//! - `solution_verifier`: replays a solution file against a board file.
//! - `mode_evaluator`: compares the four search modes on seeded random boards.
//!
//! ## Modules
//! - `engine`: the board (`Board`, `Cell`), jumps and moves, candidate enumeration
//!   and the canonical state key.
//! - `heuristics`: the area, Manhattan and rating scores used by best-first modes.
//! - `solver`: the backtracking search (`solve`, `SearchMode`, `VisitedSet`).
//! - `verifier`: replay of a move list with a configurable invalid-move policy.
//! - `utils`: board and move-list text formats.
//! - `error`: the library error type.
//! - `logging`: the verbose switch behind the `vlog!` macro.

pub mod engine;
pub mod error;
pub mod heuristics;
pub mod logging;
pub mod solver;
pub mod utils;
pub mod verifier;

pub use error::{Error, Result};
