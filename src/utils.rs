use crate::engine::{Board, Cell, Move};
use crate::error::{Error, Result};
use anyhow::Context;
use std::fs;
use std::path::Path;
use std::time::Duration;

/// Parses a board in the text puzzle format.
///
/// The first non-blank line holds the dimensions `rows cols`. Each following
/// non-blank line is one board row of single-digit cell codes:
/// - `0`: `Cell::Invalid`
/// - `1`: `Cell::Peg`
/// - `2`: `Cell::Empty`
///
/// Spaces between digits are optional.
///
/// # Errors
/// * `Error::MissingHeader` if the first line is not two integers.
/// * `Error::RowCountMismatch` / `Error::RowLengthMismatch` if the grid does not
///   match the header.
/// * `Error::InvalidCellCode` for any other character (row and column are 1-based).
///
/// # Examples
/// ```
/// use peg_solitaire_solver::engine::Cell;
/// use peg_solitaire_solver::utils::parse_board;
///
/// let board = parse_board("2 3\n1 1 2\n0 1 0\n").unwrap();
/// assert_eq!(board.rows(), 2);
/// assert_eq!(board.get_cell(0, 2), Cell::Empty);
/// assert_eq!(board.get_cell(1, 0), Cell::Invalid);
///
/// assert!(parse_board("2 3\n112\n").is_err());
/// ```
pub fn parse_board(text: &str) -> Result<Board> {
    let mut lines = text.lines().map(str::trim).filter(|line| !line.is_empty());

    let header = lines.next().unwrap_or("");
    let dims: Vec<usize> = header
        .split_whitespace()
        .map(|token| token.parse::<usize>())
        .collect::<std::result::Result<_, _>>()
        .map_err(|_| Error::MissingHeader {
            line: header.to_string(),
        })?;
    let (rows, cols) = match dims.as_slice() {
        [rows, cols] => (*rows, *cols),
        _ => {
            return Err(Error::MissingHeader {
                line: header.to_string(),
            })
        }
    };

    if rows.checked_mul(cols).is_none() {
        return Err(Error::InvalidDimensions { rows, cols });
    }

    let grid_lines: Vec<&str> = lines.collect();
    if grid_lines.len() != rows {
        return Err(Error::RowCountMismatch {
            expected: rows,
            got: grid_lines.len(),
        });
    }

    let mut cells = Vec::new();
    for (r, line) in grid_lines.iter().enumerate() {
        let codes: Vec<char> = line.chars().filter(|ch| !ch.is_whitespace()).collect();
        if codes.len() != cols {
            return Err(Error::RowLengthMismatch {
                row: r + 1,
                expected: cols,
                got: codes.len(),
            });
        }
        for (c, code) in codes.into_iter().enumerate() {
            let cell = Cell::from_code(code).ok_or(Error::InvalidCellCode {
                code,
                row: r + 1,
                col: c + 1,
            })?;
            cells.push(cell);
        }
    }

    Board::from_cells(rows, cols, cells)
}

/// Parses a move list, one move per non-blank line.
///
/// A move is four whitespace-separated positive integers
/// `srcRow srcCol dstRow dstCol`. A single four-digit token (`1214`) is also
/// accepted as four one-digit coordinates.
///
/// Whether a move is legal is not checked here; that is the verifier's job.
pub fn parse_moves(text: &str) -> Result<Vec<Move>> {
    let mut moves = Vec::new();
    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }
        let malformed = || Error::MalformedMove {
            line: idx + 1,
            text: line.to_string(),
        };

        let tokens: Vec<&str> = line.split_whitespace().collect();
        let numbers: Vec<usize> = if tokens.len() == 1 && tokens[0].len() == 4 {
            tokens[0]
                .chars()
                .map(|ch| ch.to_digit(10).map(|d| d as usize))
                .collect::<Option<_>>()
                .ok_or_else(malformed)?
        } else {
            tokens
                .iter()
                .map(|token| token.parse::<usize>())
                .collect::<std::result::Result<_, _>>()
                .map_err(|_| malformed())?
        };

        match numbers.as_slice() {
            [fr, fc, tr, tc] if numbers.iter().all(|n| *n > 0) => {
                moves.push(Move::new(*fr, *fc, *tr, *tc))
            }
            _ => return Err(malformed()),
        }
    }
    Ok(moves)
}

/// Renders moves one per line as `srcRow srcCol dstRow dstCol`.
pub fn format_moves(moves: &[Move]) -> String {
    let mut out = String::new();
    for mv in moves {
        out.push_str(&mv.to_string());
        out.push('\n');
    }
    out
}

/// Parses a `--time-limit` value in seconds. Negative, NaN and infinite values are
/// rejected.
pub fn parse_time_limit(text: &str) -> std::result::Result<Duration, String> {
    let seconds: f64 = text
        .trim()
        .parse()
        .map_err(|_| format!("`{}` is not a number of seconds", text))?;
    Duration::try_from_secs_f64(seconds)
        .map_err(|e| format!("`{}` is not a usable time limit: {}", text, e))
}

/// Reads and parses a board file.
pub fn read_board_file(path: &Path) -> anyhow::Result<Board> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read board file {}", path.display()))?;
    parse_board(&content).with_context(|| format!("invalid board in {}", path.display()))
}

/// Reads and parses a solution file.
pub fn read_moves_file(path: &Path) -> anyhow::Result<Vec<Move>> {
    let content = fs::read_to_string(path)
        .with_context(|| format!("failed to read solution file {}", path.display()))?;
    parse_moves(&content).with_context(|| format!("invalid solution in {}", path.display()))
}

/// Writes `moves` to `path`, replacing any previous content.
pub fn write_moves_file(path: &Path, moves: &[Move]) -> anyhow::Result<()> {
    fs::write(path, format_moves(moves))
        .with_context(|| format!("failed to write solution file {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_board_with_and_without_spaces() {
        let spaced = parse_board("3 3\n0 1 0\n1 2 1\n0 1 0\n").unwrap();
        let compact = parse_board("3 3\n010\n121\n010").unwrap();
        assert_eq!(spaced, compact);
        assert_eq!(spaced.peg_count(), 4);
        assert_eq!(spaced.get_cell(1, 1), Cell::Empty);
    }

    #[test]
    fn test_parse_board_rejects_oversized_header() {
        assert_eq!(
            parse_board("2 9999999999999999999\n1\n1\n").unwrap_err(),
            Error::InvalidDimensions {
                rows: 2,
                cols: 9999999999999999999
            }
        );
        // Fits in usize, but only one short row follows.
        assert_eq!(
            parse_board("1 1000000000000000000\n1\n").unwrap_err(),
            Error::RowLengthMismatch {
                row: 1,
                expected: 1000000000000000000,
                got: 1
            }
        );
    }

    #[test]
    fn test_parse_board_skips_blank_lines() {
        let board = parse_board("\n1 3\n\n1 1 2\n\n").unwrap();
        assert_eq!(board.cols(), 3);
    }

    #[test]
    fn test_parse_board_bad_header() {
        assert!(matches!(
            parse_board("three 3\n111\n"),
            Err(Error::MissingHeader { .. })
        ));
        assert!(matches!(parse_board("3\n111\n"), Err(Error::MissingHeader { .. })));
        assert!(matches!(parse_board(""), Err(Error::MissingHeader { .. })));
    }

    #[test]
    fn test_parse_board_dimension_mismatch() {
        assert_eq!(
            parse_board("2 2\n11\n").unwrap_err(),
            Error::RowCountMismatch {
                expected: 2,
                got: 1
            }
        );
        assert_eq!(
            parse_board("2 2\n11\n112\n").unwrap_err(),
            Error::RowLengthMismatch {
                row: 2,
                expected: 2,
                got: 3
            }
        );
        assert_eq!(
            parse_board("0 2\n").unwrap_err(),
            Error::InvalidDimensions { rows: 0, cols: 2 }
        );
    }

    #[test]
    fn test_parse_board_invalid_code() {
        let err = parse_board("1 3\n1 3 2\n").unwrap_err();
        assert_eq!(
            err,
            Error::InvalidCellCode {
                code: '3',
                row: 1,
                col: 2
            }
        );
        assert!(err.to_string().contains("invalid cell code '3'"));
    }

    #[test]
    fn test_parse_moves_formats() {
        let moves = parse_moves("1 1 1 3\n\n  10 2 12 2  \n1412\n").unwrap();
        assert_eq!(
            moves,
            vec![
                Move::new(1, 1, 1, 3),
                Move::new(10, 2, 12, 2),
                Move::new(1, 4, 1, 2)
            ]
        );
    }

    #[test]
    fn test_parse_moves_rejects_malformed_lines() {
        assert_eq!(
            parse_moves("1 1 1 3\n1 2 3\n").unwrap_err(),
            Error::MalformedMove {
                line: 2,
                text: "1 2 3".to_string()
            }
        );
        assert!(parse_moves("a b c d").is_err());
        assert!(parse_moves("0 1 1 3").is_err());
        assert!(parse_moves("12a4").is_err());
    }

    #[test]
    fn test_format_moves_matches_parse() {
        let moves = vec![Move::new(3, 1, 1, 1), Move::new(1, 2, 1, 4)];
        let text = format_moves(&moves);
        assert_eq!(text, "3 1 1 1\n1 2 1 4\n");
        assert_eq!(parse_moves(&text).unwrap(), moves);
    }

    #[test]
    fn test_parse_time_limit() {
        assert_eq!(parse_time_limit("1.5").unwrap(), Duration::from_millis(1500));
        assert_eq!(parse_time_limit("0").unwrap(), Duration::ZERO);
        assert!(parse_time_limit("-1").is_err());
        assert!(parse_time_limit("NaN").is_err());
        assert!(parse_time_limit("inf").is_err());
        assert!(parse_time_limit("soon").is_err());
    }

    #[test]
    fn test_file_helpers() {
        let mut board_file = NamedTempFile::new().unwrap();
        write!(board_file, "1 4\n1 1 2 1\n").unwrap();
        let board = read_board_file(board_file.path()).unwrap();
        assert_eq!(board.peg_count(), 3);

        let solution_file = NamedTempFile::new().unwrap();
        let moves = vec![Move::new(1, 1, 1, 3), Move::new(1, 4, 1, 2)];
        write_moves_file(solution_file.path(), &moves).unwrap();
        assert_eq!(read_moves_file(solution_file.path()).unwrap(), moves);
    }

    #[test]
    fn test_read_board_file_reports_path() {
        let err = read_board_file(Path::new("/nonexistent/board.txt")).unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/board.txt"));
    }
}
