//! Board model and move generation for peg solitaire.
//!
//! This module defines the puzzle's fundamental components:
//! - `Cell`: the tri-state content of one grid position.
//! - `Direction`, `Jump` and `Move`: a single jump, in internal (0-based) and
//!   external (1-based) form.
//! - `Board`: the rectangular grid, with jump legality, jump application, candidate
//!   enumeration and the canonical state key used by the solver's memo.
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::error::{Error, Result};

/// Represents the content of a single grid position.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Cell {
    /// Not part of the playable board. Never changes.
    Invalid,
    /// A playable position holding a peg.
    Peg,
    /// A playable position with no peg.
    Empty,
}

impl Cell {
    /// Decodes a board-file digit: `0` = Invalid, `1` = Peg, `2` = Empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use peg_solitaire_solver::engine::Cell;
    /// assert_eq!(Cell::from_code('1'), Some(Cell::Peg));
    /// assert_eq!(Cell::from_code('7'), None);
    /// ```
    pub fn from_code(code: char) -> Option<Cell> {
        match code {
            '0' => Some(Cell::Invalid),
            '1' => Some(Cell::Peg),
            '2' => Some(Cell::Empty),
            _ => None,
        }
    }

    /// Encodes the cell as its board-file digit.
    pub fn code(&self) -> char {
        match self {
            Cell::Invalid => '0',
            Cell::Peg => '1',
            Cell::Empty => '2',
        }
    }

    /// Character used when drawing the board for humans.
    pub fn to_char(&self) -> char {
        match self {
            Cell::Invalid => ' ',
            Cell::Peg => 'o',
            Cell::Empty => '.',
        }
    }
}

/// One of the four jump directions.
///
/// The declaration order is the order in which candidates are enumerated.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All directions in enumeration order.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Row and column step for one cell in this direction.
    pub fn delta(&self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }
}

/// A jump identified by its source cell (0-based) and direction.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Jump {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
}

/// A move as reported to the outside world: 1-based source and destination.
///
/// Rendered by `Display` as `srcRow srcCol dstRow dstCol`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Move {
    pub from_row: usize,
    pub from_col: usize,
    pub to_row: usize,
    pub to_col: usize,
}

impl Move {
    pub fn new(from_row: usize, from_col: usize, to_row: usize, to_col: usize) -> Self {
        Move {
            from_row,
            from_col,
            to_row,
            to_col,
        }
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} {}",
            self.from_row, self.from_col, self.to_row, self.to_col
        )
    }
}

/// Equality key for board states within one search run.
///
/// One bit per playable cell in row-major order (set for a peg); `Invalid` cells are
/// skipped since their layout is fixed for the lifetime of a board.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CanonicalKey(Box<[u64]>);

/// Represents the puzzle board as a row-major grid of `Cell`s.
///
/// Dimensions are fixed at construction. Moves only ever toggle `Peg`/`Empty`
/// cells, so the set of `Invalid` cells is the same for a board and all its
/// successors.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: Vec<Cell>,
}

impl Board {
    /// Creates a board from a row-major cell vector.
    ///
    /// # Errors
    /// * `Error::InvalidDimensions` if either dimension is zero or `rows * cols`
    ///   overflows.
    /// * `Error::CellCountMismatch` if `cells.len() != rows * cols`.
    ///
    /// # Examples
    /// ```
    /// use peg_solitaire_solver::engine::{Board, Cell};
    /// let board = Board::from_cells(1, 3, vec![Cell::Peg, Cell::Peg, Cell::Empty]).unwrap();
    /// assert_eq!(board.peg_count(), 2);
    /// assert!(Board::from_cells(2, 2, vec![Cell::Peg]).is_err());
    /// ```
    pub fn from_cells(rows: usize, cols: usize, cells: Vec<Cell>) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(Error::InvalidDimensions { rows, cols });
        }
        let expected = rows
            .checked_mul(cols)
            .ok_or(Error::InvalidDimensions { rows, cols })?;
        if cells.len() != expected {
            return Err(Error::CellCountMismatch {
                rows,
                cols,
                expected,
                got: cells.len(),
            });
        }
        Ok(Board { rows, cols, cells })
    }

    /// Generates a board that is solvable by construction.
    ///
    /// Starting from a fully playable, empty `rows` x `cols` grid with a single peg at
    /// a random position, up to `reverse_moves` random "un-jumps" are applied (a peg
    /// at `L` with empty cells `M` and `S` beyond it becomes pegs at `M` and `S`).
    /// Replaying those un-jumps backwards is a valid solution, so the resulting board
    /// always has one. Fewer un-jumps are applied if the board runs out of room.
    ///
    /// The same seed always produces the same board.
    ///
    /// # Panics
    /// Panics if either dimension is zero.
    pub fn random_solvable(rows: usize, cols: usize, reverse_moves: usize, seed: u64) -> Self {
        assert!(rows > 0 && cols > 0, "board dimensions must be non-zero");
        let mut rng = SmallRng::seed_from_u64(seed);
        let mut board = Board {
            rows,
            cols,
            cells: vec![Cell::Empty; rows * cols],
        };
        let start = rng.gen_range(0..rows * cols);
        board.cells[start] = Cell::Peg;

        for _ in 0..reverse_moves {
            let mut options = Vec::new();
            for (r, c) in board.pegs() {
                for direction in Direction::ALL {
                    let mid = board.neighbor(r, c, direction, 1);
                    let far = board.neighbor(r, c, direction, 2);
                    if let (Some(mid), Some(far)) = (mid, far) {
                        if board.get_cell(mid.0, mid.1) == Cell::Empty
                            && board.get_cell(far.0, far.1) == Cell::Empty
                        {
                            options.push(((r, c), mid, far));
                        }
                    }
                }
            }
            if options.is_empty() {
                break;
            }
            let (landing, mid, far) = options[rng.gen_range(0..options.len())];
            board.set_cell(landing.0, landing.1, Cell::Empty);
            board.set_cell(mid.0, mid.1, Cell::Peg);
            board.set_cell(far.0, far.1, Cell::Peg);
        }
        board
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Returns the cell at (`r`, `c`), 0-based.
    ///
    /// # Panics
    /// Panics if `r` or `c` are outside the board dimensions.
    pub fn get_cell(&self, r: usize, c: usize) -> Cell {
        assert!(r < self.rows && c < self.cols, "({}, {}) is off the board", r, c);
        self.cells[r * self.cols + c]
    }

    /// Sets the cell at (`r`, `c`). Only `Peg`/`Empty` toggles are allowed.
    pub(crate) fn set_cell(&mut self, r: usize, c: usize, cell: Cell) {
        let idx = r * self.cols + c;
        debug_assert!(
            self.cells[idx] != Cell::Invalid && cell != Cell::Invalid,
            "moves never touch invalid cells"
        );
        self.cells[idx] = cell;
    }

    /// Checks whether signed coordinates fall inside the grid.
    pub fn in_bounds(&self, r: isize, c: isize) -> bool {
        r >= 0 && c >= 0 && (r as usize) < self.rows && (c as usize) < self.cols
    }

    /// Cell `steps` positions away from (`r`, `c`) in `direction`, if on the grid.
    pub fn neighbor(
        &self,
        r: usize,
        c: usize,
        direction: Direction,
        steps: isize,
    ) -> Option<(usize, usize)> {
        let (dr, dc) = direction.delta();
        let nr = r as isize + dr * steps;
        let nc = c as isize + dc * steps;
        if self.in_bounds(nr, nc) {
            Some((nr as usize, nc as usize))
        } else {
            None
        }
    }

    /// Iterates over the coordinates of all pegs in row-major order.
    pub fn pegs(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        let cols = self.cols;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Cell::Peg)
            .map(move |(idx, _)| (idx / cols, idx % cols))
    }

    pub fn peg_count(&self) -> usize {
        self.cells.iter().filter(|cell| **cell == Cell::Peg).count()
    }

    /// The puzzle is solved when exactly one peg remains.
    pub fn is_solved(&self) -> bool {
        self.peg_count() == 1
    }

    /// Checks whether the peg at (`r`, `c`) can jump in `direction`.
    ///
    /// The source must hold a peg, the adjacent cell in that direction must hold a
    /// peg, and the cell beyond it must be on the grid and `Empty`. Nothing further
    /// along the line matters.
    pub fn can_jump(&self, r: usize, c: usize, direction: Direction) -> bool {
        if self.get_cell(r, c) != Cell::Peg {
            return false;
        }
        match (
            self.neighbor(r, c, direction, 1),
            self.neighbor(r, c, direction, 2),
        ) {
            (Some((mr, mc)), Some((lr, lc))) => {
                self.get_cell(mr, mc) == Cell::Peg && self.get_cell(lr, lc) == Cell::Empty
            }
            _ => false,
        }
    }

    /// Number of directions in which the peg at (`r`, `c`) can jump.
    pub fn jump_count_from(&self, r: usize, c: usize) -> usize {
        Direction::ALL
            .iter()
            .filter(|direction| self.can_jump(r, c, **direction))
            .count()
    }

    /// Checks whether the peg at (`r`, `c`) has a peg directly above, below, left or right.
    pub fn has_adjacent_peg(&self, r: usize, c: usize) -> bool {
        Direction::ALL.iter().any(|direction| {
            self.neighbor(r, c, *direction, 1)
                .map_or(false, |(nr, nc)| self.get_cell(nr, nc) == Cell::Peg)
        })
    }

    /// Enumerates every legal jump in candidate order: rows top to bottom, columns
    /// left to right, and for each peg the directions up, down, left, right.
    pub fn legal_jumps(&self) -> Vec<Jump> {
        let mut jumps = Vec::new();
        for (row, col) in self.pegs() {
            for direction in Direction::ALL {
                if self.can_jump(row, col, direction) {
                    jumps.push(Jump {
                        row,
                        col,
                        direction,
                    });
                }
            }
        }
        jumps
    }

    /// Applies `jump` to a copy of the board.
    ///
    /// The source and jumped-over cells become `Empty` and the landing cell becomes a
    /// `Peg`; `self` is left untouched. The returned `Move` is 1-based and runs from
    /// the source to the landing cell.
    ///
    /// # Panics
    /// Panics if the jump is not legal on this board.
    ///
    /// # Examples
    /// ```
    /// use peg_solitaire_solver::engine::{Board, Cell, Direction, Jump, Move};
    /// let board = Board::from_cells(1, 3, vec![Cell::Peg, Cell::Peg, Cell::Empty]).unwrap();
    /// let (next, mv) = board.apply_jump(Jump { row: 0, col: 0, direction: Direction::Right });
    /// assert_eq!(mv, Move::new(1, 1, 1, 3));
    /// assert_eq!(next.peg_count(), 1);
    /// assert_eq!(board.peg_count(), 2);
    /// ```
    pub fn apply_jump(&self, jump: Jump) -> (Board, Move) {
        let Jump {
            row,
            col,
            direction,
        } = jump;
        assert!(
            self.can_jump(row, col, direction),
            "illegal jump {:?} from ({}, {})",
            direction,
            row,
            col
        );
        let (mr, mc) = self.neighbor(row, col, direction, 1).unwrap_or((row, col));
        let (lr, lc) = self.neighbor(row, col, direction, 2).unwrap_or((row, col));

        let mut next = self.clone();
        next.set_cell(row, col, Cell::Empty);
        next.set_cell(mr, mc, Cell::Empty);
        next.set_cell(lr, lc, Cell::Peg);
        (next, Move::new(row + 1, col + 1, lr + 1, lc + 1))
    }

    /// Encodes the `Peg`/`Empty` cells as a [`CanonicalKey`].
    pub fn canonical_key(&self) -> CanonicalKey {
        let playable = self.cells.iter().filter(|c| **c != Cell::Invalid).count();
        let mut words = vec![0u64; (playable + 63) / 64];
        let mut bit = 0;
        for cell in &self.cells {
            match cell {
                Cell::Invalid => continue,
                Cell::Peg => words[bit / 64] |= 1 << (bit % 64),
                Cell::Empty => {}
            }
            bit += 1;
        }
        CanonicalKey(words.into_boxed_slice())
    }

    /// Formats the board with row/column indices (1-based, matching `Move`) and an
    /// optional highlighted cell, shown in brackets.
    pub fn to_string_with_highlight(&self, pos: Option<(usize, usize)>) -> String {
        let mut output = String::new();

        output.push_str("   ");
        for c_idx in 0..self.cols {
            output.push_str(&format!("{:>3}", c_idx + 1));
        }
        output.push('\n');

        for r_idx in 0..self.rows {
            output.push_str(&format!("{:>3}", r_idx + 1));
            for c_idx in 0..self.cols {
                let symbol = self.get_cell(r_idx, c_idx).to_char();
                if pos == Some((r_idx, c_idx)) {
                    output.push_str(&format!(" [{}]", symbol));
                    continue;
                }
                output.push_str(&format!("  {}", symbol));
            }
            if r_idx < self.rows - 1 {
                output.push('\n');
            }
        }

        output
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with_highlight(None))
    }
}
