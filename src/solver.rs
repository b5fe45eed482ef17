//! Backtracking search for a peg solitaire solution.
//!
//! All four modes share one discipline: try the successors of a board in some
//! order, skip successors whose state was already seen anywhere in the run, and
//! stop the whole search as soon as a board with a single peg is reached. The modes
//! differ only in the order in which successors are tried.
use crate::engine::{Board, CanonicalKey, Jump, Move};
use crate::heuristics::{Heuristic, Objective};
use crate::vlog;
use std::cmp::Reverse;
use std::collections::HashSet;
use std::fmt;
use std::time::{Duration, Instant};

const PROGRESS_INTERVAL: u64 = 100_000;

/// Successor ordering strategy.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum SearchMode {
    /// Depth-first in raster order: rows top to bottom, columns left to right,
    /// directions up, down, left, right.
    #[value(alias = "depth")]
    Plain,
    /// Best-first by [`rating_score`](crate::heuristics::rating_score), highest first.
    Rating,
    /// Best-first by [`manhattan_score`](crate::heuristics::manhattan_score), lowest first.
    Manhattan,
    /// Best-first by [`area_score`](crate::heuristics::area_score), lowest first.
    #[default]
    Area,
}

impl SearchMode {
    pub const ALL: [SearchMode; 4] = [
        SearchMode::Plain,
        SearchMode::Rating,
        SearchMode::Manhattan,
        SearchMode::Area,
    ];

    /// The heuristic that orders candidates, or `None` for plain depth-first.
    pub fn heuristic(&self) -> Option<Heuristic> {
        match self {
            SearchMode::Plain => None,
            SearchMode::Rating => Some(Heuristic::Rating),
            SearchMode::Manhattan => Some(Heuristic::Manhattan),
            SearchMode::Area => Some(Heuristic::Area),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            SearchMode::Plain => "plain",
            SearchMode::Rating => "rating",
            SearchMode::Manhattan => "manhattan",
            SearchMode::Area => "area",
        }
    }
}

impl fmt::Display for SearchMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Board states already reached during one search run.
///
/// Entries are never removed, not even on backtrack: every jump removes a peg, so a
/// state cannot reappear further down the same branch, and a state that was fully
/// explored once has nothing new to offer when reached along another path.
#[derive(Debug, Default)]
pub struct VisitedSet {
    keys: HashSet<CanonicalKey>,
}

impl VisitedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, key: &CanonicalKey) -> bool {
        self.keys.contains(key)
    }

    /// Records `key`, returning `true` if it was not present before.
    pub fn insert(&mut self, key: CanonicalKey) -> bool {
        self.keys.insert(key)
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

/// Caller-imposed limits on a search run.
#[derive(Clone, Debug, Default)]
pub struct SearchLimits {
    /// Wall-clock budget. `None` searches until solved or exhausted.
    pub time_budget: Option<Duration>,
}

/// Counters collected during a search run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Boards whose successors were generated.
    pub nodes_expanded: u64,
    /// Distinct states recorded in the visited set.
    pub states_visited: usize,
    /// Successors skipped because their state had been seen before.
    pub duplicates_pruned: u64,
    /// Moves undone after their subtree failed.
    pub backtracks: u64,
}

/// A solved run.
#[derive(Clone, Debug)]
pub struct Solution {
    /// Moves from the initial board to a single-peg board, 1-based.
    pub moves: Vec<Move>,
    /// The single-peg board the moves lead to.
    pub final_board: Board,
    pub mode: SearchMode,
    pub stats: SearchStats,
}

/// How a search run ended.
#[derive(Clone, Debug)]
pub enum SearchOutcome {
    Solved(Solution),
    /// Every reachable state was explored without reaching a single peg.
    Exhausted(SearchStats),
    /// The time budget ran out first.
    TimedOut(SearchStats),
}

impl SearchOutcome {
    pub fn is_solved(&self) -> bool {
        matches!(self, SearchOutcome::Solved(_))
    }

    pub fn solution(&self) -> Option<&Solution> {
        match self {
            SearchOutcome::Solved(solution) => Some(solution),
            _ => None,
        }
    }

    pub fn stats(&self) -> &SearchStats {
        match self {
            SearchOutcome::Solved(solution) => &solution.stats,
            SearchOutcome::Exhausted(stats) | SearchOutcome::TimedOut(stats) => stats,
        }
    }

    /// The solution's moves, or an empty list when no solution was found.
    pub fn into_moves(self) -> Vec<Move> {
        match self {
            SearchOutcome::Solved(solution) => solution.moves,
            _ => Vec::new(),
        }
    }
}

/// A scored one-ply successor.
#[derive(Clone, Debug)]
pub struct Candidate {
    pub jump: Jump,
    pub mv: Move,
    pub successor: Board,
    pub score: u64,
}

/// Scores every legal jump from `board` and orders them for a best-first mode.
///
/// Candidates are sorted ascending for minimized heuristics and descending for
/// maximized ones. The sort is stable, so equal scores keep the raster enumeration
/// order of [`Board::legal_jumps`].
pub fn rank_candidates(board: &Board, heuristic: Heuristic) -> Vec<Candidate> {
    let mut candidates: Vec<Candidate> = board
        .legal_jumps()
        .into_iter()
        .map(|jump| {
            let (successor, mv) = board.apply_jump(jump);
            let score = heuristic.score(&successor);
            Candidate {
                jump,
                mv,
                successor,
                score,
            }
        })
        .collect();

    match heuristic.objective() {
        Objective::Minimize => candidates.sort_by_key(|c| c.score),
        Objective::Maximize => candidates.sort_by_key(|c| Reverse(c.score)),
    }
    candidates
}

/// Solves `board` in the given mode without limits.
///
/// # Examples
/// ```
/// use peg_solitaire_solver::engine::{Board, Cell, Move};
/// use peg_solitaire_solver::solver::{solve, SearchMode};
/// let cells = vec![Cell::Peg, Cell::Peg, Cell::Empty, Cell::Peg];
/// let board = Board::from_cells(1, 4, cells).unwrap();
/// let outcome = solve(&board, SearchMode::Plain);
/// assert_eq!(outcome.into_moves(), vec![Move::new(1, 1, 1, 3), Move::new(1, 4, 1, 2)]);
/// ```
pub fn solve(board: &Board, mode: SearchMode) -> SearchOutcome {
    solve_with_limits(board, mode, &SearchLimits::default())
}

/// Solves `board` in the given mode, giving up when `limits` are exceeded.
pub fn solve_with_limits(board: &Board, mode: SearchMode, limits: &SearchLimits) -> SearchOutcome {
    vlog!(
        "search start: mode={} size={}x{} pegs={}",
        mode,
        board.rows(),
        board.cols(),
        board.peg_count()
    );

    if board.is_solved() {
        return SearchOutcome::Solved(Solution {
            moves: Vec::new(),
            final_board: board.clone(),
            mode,
            stats: SearchStats::default(),
        });
    }

    let mut context = SearchContext {
        mode,
        deadline: limits.time_budget.map(|budget| Instant::now() + budget),
        path: Vec::new(),
        visited: VisitedSet::new(),
        stats: SearchStats::default(),
        solved_board: None,
    };
    let flow = context.explore(board);
    context.stats.states_visited = context.visited.len();

    vlog!(
        "search end: mode={} result={:?} expanded={} visited={} pruned={}",
        mode,
        flow,
        context.stats.nodes_expanded,
        context.stats.states_visited,
        context.stats.duplicates_pruned
    );

    match (flow, context.solved_board) {
        (Flow::Solved, Some(final_board)) => SearchOutcome::Solved(Solution {
            moves: context.path,
            final_board,
            mode,
            stats: context.stats,
        }),
        (Flow::TimedOut, _) => SearchOutcome::TimedOut(context.stats),
        _ => SearchOutcome::Exhausted(context.stats),
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Flow {
    Solved,
    Exhausted,
    TimedOut,
}

/// Mutable state of one search run, owned by the top-level call.
struct SearchContext {
    mode: SearchMode,
    deadline: Option<Instant>,
    /// Moves from the initial board to the board being explored.
    path: Vec<Move>,
    visited: VisitedSet,
    stats: SearchStats,
    solved_board: Option<Board>,
}

impl SearchContext {
    /// Explores the successors of `board`. On `Flow::Solved` the path holds the full
    /// solution; otherwise it is exactly as it was on entry.
    fn explore(&mut self, board: &Board) -> Flow {
        if let Some(deadline) = self.deadline {
            if Instant::now() >= deadline {
                return Flow::TimedOut;
            }
        }
        self.stats.nodes_expanded += 1;
        if self.stats.nodes_expanded % PROGRESS_INTERVAL == 0 {
            vlog!(
                "progress: expanded={} visited={} depth={}",
                self.stats.nodes_expanded,
                self.visited.len(),
                self.path.len()
            );
        }

        match self.mode.heuristic() {
            None => {
                for jump in board.legal_jumps() {
                    let (successor, mv) = board.apply_jump(jump);
                    if let Some(flow) = self.try_successor(successor, mv) {
                        return flow;
                    }
                }
            }
            Some(heuristic) => {
                for candidate in rank_candidates(board, heuristic) {
                    if let Some(flow) = self.try_successor(candidate.successor, candidate.mv) {
                        return flow;
                    }
                }
            }
        }
        Flow::Exhausted
    }

    /// Tries one successor. Returns `Some` when the whole search must stop, `None` to
    /// move on to the next candidate.
    fn try_successor(&mut self, successor: Board, mv: Move) -> Option<Flow> {
        if !self.visited.insert(successor.canonical_key()) {
            self.stats.duplicates_pruned += 1;
            return None;
        }
        self.path.push(mv);

        if successor.is_solved() {
            self.solved_board = Some(successor);
            return Some(Flow::Solved);
        }

        match self.explore(&successor) {
            Flow::Solved => Some(Flow::Solved),
            Flow::TimedOut => {
                self.path.pop();
                Some(Flow::TimedOut)
            }
            Flow::Exhausted => {
                self.path.pop();
                self.stats.backtracks += 1;
                None
            }
        }
    }
}
