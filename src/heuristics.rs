//! Scoring functions used by the best-first search modes.
//!
//! Each function scores a *successor* board, i.e. the board that results from one
//! candidate jump. The solver scores every candidate at a level, then tries them in
//! score order.
use crate::engine::Board;

/// Whether lower or higher scores are preferred.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Objective {
    Minimize,
    Maximize,
}

/// The three candidate-ordering heuristics.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Heuristic {
    /// [`rating_score`], maximized.
    Rating,
    /// [`manhattan_score`], minimized.
    Manhattan,
    /// [`area_score`], minimized.
    Area,
}

impl Heuristic {
    /// Scores a successor board with this heuristic.
    pub fn score(&self, board: &Board) -> u64 {
        match self {
            Heuristic::Rating => rating_score(board),
            Heuristic::Manhattan => manhattan_score(board),
            Heuristic::Area => area_score(board),
        }
    }

    pub fn objective(&self) -> Objective {
        match self {
            Heuristic::Rating => Objective::Maximize,
            Heuristic::Manhattan | Heuristic::Area => Objective::Minimize,
        }
    }
}

/// Area of the smallest axis-aligned rectangle enclosing every peg.
///
/// Computed as `(row_span + 1) * (col_span + 1)`. A board without pegs scores 0.
/// Lower means the pegs are packed more tightly.
///
/// # Examples
/// ```
/// use peg_solitaire_solver::engine::{Board, Cell};
/// use peg_solitaire_solver::heuristics::area_score;
/// // Pegs at (0, 0) and (1, 2): a 2 x 3 rectangle.
/// let cells = vec![Cell::Peg, Cell::Empty, Cell::Empty, Cell::Empty, Cell::Empty, Cell::Peg];
/// let board = Board::from_cells(2, 3, cells).unwrap();
/// assert_eq!(area_score(&board), 6);
/// ```
pub fn area_score(board: &Board) -> u64 {
    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for (r, c) in board.pegs() {
        bounds = Some(match bounds {
            None => (r, r, c, c),
            Some((min_r, max_r, min_c, max_c)) => {
                (min_r.min(r), max_r.max(r), min_c.min(c), max_c.max(c))
            }
        });
    }
    match bounds {
        Some((min_r, max_r, min_c, max_c)) => ((max_r - min_r + 1) * (max_c - min_c + 1)) as u64,
        None => 0,
    }
}

/// Sum over every peg of its Manhattan distance to every peg.
///
/// Each unordered pair is counted twice; the doubling does not change the ranking.
/// Lower means the pegs are closer together.
pub fn manhattan_score(board: &Board) -> u64 {
    let pegs: Vec<(usize, usize)> = board.pegs().collect();
    let mut total = 0u64;
    for &(r1, c1) in &pegs {
        for &(r2, c2) in &pegs {
            total += (r1.abs_diff(r2) + c1.abs_diff(c2)) as u64;
        }
    }
    total
}

/// Mobility-and-cohesion rating of a board.
///
/// For every peg, adds the number of directions in which it can jump, plus one if
/// it has at least one orthogonally adjacent peg. Higher is better.
pub fn rating_score(board: &Board) -> u64 {
    board
        .pegs()
        .map(|(r, c)| {
            let mobility = board.jump_count_from(r, c) as u64;
            let connected = u64::from(board.has_adjacent_peg(r, c));
            mobility + connected
        })
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::tests::board_from_rows;
    use crate::engine::{Direction, Jump};

    #[test]
    fn test_area_score_single_peg_is_one() {
        let board = board_from_rows(&["222", "212", "222"]);
        assert_eq!(area_score(&board), 1);
    }

    #[test]
    fn test_area_score_ignores_invalid_and_empty_cells() {
        let board = board_from_rows(&[
            "00100", //
            "02220", //
            "12221",
        ]);
        // Pegs at (0,2), (2,0), (2,4): 3 rows x 5 cols.
        assert_eq!(area_score(&board), 15);
    }

    #[test]
    fn test_area_score_empty_board() {
        let board = board_from_rows(&["22", "02"]);
        assert_eq!(area_score(&board), 0);
    }

    #[test]
    fn test_manhattan_score_counts_pairs_twice() {
        // Pegs at (0,0), (0,2), (1,1): pair distances 2, 2, 2.
        let board = board_from_rows(&["121", "212"]);
        assert_eq!(manhattan_score(&board), 12);
    }

    #[test]
    fn test_manhattan_score_single_peg_is_zero() {
        let board = board_from_rows(&["2221"]);
        assert_eq!(manhattan_score(&board), 0);
    }

    #[test]
    fn test_rating_score_counts_mobility_and_adjacency() {
        // (0,0) and (0,1) are adjacent and (0,0) can jump right; (2,2) is isolated.
        let board = board_from_rows(&[
            "1122", //
            "2222", //
            "2212",
        ]);
        assert_eq!(board.jump_count_from(0, 0), 1);
        assert_eq!(board.jump_count_from(0, 1), 0);
        assert_eq!(rating_score(&board), 1 + 1 + 1);
    }

    #[test]
    fn test_rating_score_adjacency_without_mobility() {
        // Neither board has a legal jump; only adjacency differs.
        let adjacent = board_from_rows(&["1102"]);
        let isolated = board_from_rows(&["1012"]);
        assert_eq!(rating_score(&adjacent), 2);
        assert_eq!(rating_score(&isolated), 0);
    }

    #[test]
    fn test_rating_prefers_move_that_keeps_pegs_adjacent() {
        // Invalid, peg, empty, peg, peg, empty.
        let board = board_from_rows(&["012112"]);
        let jumps = board.legal_jumps();
        assert_eq!(jumps.len(), 2);

        // First candidate: (0,3) jumps right, leaving pegs at (0,1) and (0,5), both isolated.
        let (scattered, _) = board.apply_jump(jumps[0]);
        assert_eq!(
            jumps[0],
            Jump {
                row: 0,
                col: 3,
                direction: Direction::Right
            }
        );
        // Second candidate: (0,4) jumps left, leaving an adjacent pair at (0,1), (0,2).
        let (paired, _) = board.apply_jump(jumps[1]);

        assert_eq!(rating_score(&scattered), 0);
        assert_eq!(rating_score(&paired), 3);
        assert!(rating_score(&paired) > rating_score(&scattered));
    }

    #[test]
    fn test_heuristic_objectives() {
        assert_eq!(Heuristic::Rating.objective(), Objective::Maximize);
        assert_eq!(Heuristic::Manhattan.objective(), Objective::Minimize);
        assert_eq!(Heuristic::Area.objective(), Objective::Minimize);

        let board = board_from_rows(&["121", "212"]);
        assert_eq!(Heuristic::Manhattan.score(&board), manhattan_score(&board));
        assert_eq!(Heuristic::Area.score(&board), area_score(&board));
        assert_eq!(Heuristic::Rating.score(&board), rating_score(&board));
    }
}
