//! An agent to choose moves in Connect 4

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rayon::prelude::*;

use crate::board::{Board, Side};
use crate::heuristic::score_position;
use crate::rules::{has_four_in_a_row, is_terminal};
use crate::{COLS, ROWS, WIN_SCORE};

/// Search depth used when none is configured
pub const DEFAULT_DEPTH: usize = 4;
/// No game lasts longer than this many plies, deeper searches are clamped
pub const MAX_DEPTH: usize = ROWS * COLS;

// starting score of the single-ply picker, below any heuristic score
const PICK_BASELINE: i32 = -10_000;

/// The outcome of a search: the column to play and the score of the position
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub struct SearchResult {
    /// `None` when the search stopped at a leaf
    pub column: Option<usize>,
    pub score: i32,
}

/// How the root move is picked among columns with the same score
#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum TieBreak {
    /// Keep the lowest column achieving the best score
    FirstFound,
    /// Score every root column exactly and pick one of the best at random
    Random,
}

/// Returns the side a score proves to be winning within the search horizon
pub fn forced_winner(score: i32) -> Option<Side> {
    if score >= WIN_SCORE {
        Some(Side::Ai)
    } else if score <= -WIN_SCORE {
        Some(Side::Player)
    } else {
        None
    }
}

/// A depth limited alpha-beta agent
///
/// # Notes
/// Scores are always from the AI's point of view: the AI is the maximizing
/// side and the player the minimizing side, whichever side the agent is asked
/// to move for. Positions at the depth limit are scored with
/// [`score_position`], terminal positions with `WIN_SCORE`, `-WIN_SCORE` or 0.
///
/// Every node works on its own copy of the board, the caller's board is
/// never modified.
#[derive(Clone)]
pub struct Solver {
    depth: usize,
    tie_break: TieBreak,
    rng: StdRng,

    /// The number of nodes searched by this `Solver` so far (for diagnostics only)
    pub node_count: usize,
}

impl Solver {
    /// Creates a new `Solver` searching `depth` plies, seeded from the OS
    pub fn new(depth: usize) -> Self {
        Self {
            depth: depth.min(MAX_DEPTH),
            tie_break: TieBreak::FirstFound,
            rng: StdRng::from_os_rng(),
            node_count: 0,
        }
    }

    /// Replaces the random source with one seeded from `seed`
    pub fn with_seed(self, seed: u64) -> Self {
        self.with_rng(StdRng::seed_from_u64(seed))
    }

    pub fn with_rng(mut self, rng: StdRng) -> Self {
        self.rng = rng;
        self
    }

    pub fn with_tie_break(mut self, tie_break: TieBreak) -> Self {
        self.tie_break = tie_break;
        self
    }

    pub fn with_depth(mut self, depth: usize) -> Self {
        self.depth = depth.min(MAX_DEPTH);
        self
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Performs alpha-beta search
    ///
    /// Returns the best column for the side to move (AI if `maximizing`)
    /// and the score of the position.
    pub fn search(
        &mut self,
        board: &Board,
        depth: usize,
        mut alpha: i32,
        mut beta: i32,
        maximizing: bool,
    ) -> SearchResult {
        self.node_count += 1;

        if is_terminal(board) {
            let score = if has_four_in_a_row(board, Side::Ai) {
                WIN_SCORE
            } else if has_four_in_a_row(board, Side::Player) {
                -WIN_SCORE
            } else {
                0
            };
            return SearchResult {
                column: None,
                score,
            };
        }
        if depth == 0 {
            return SearchResult {
                column: None,
                score: score_position(board, Side::Ai),
            };
        }

        let mut columns = board.valid_columns().peekable();
        // a board without moves is terminal, so there is always a default
        let mut column = columns.peek().copied();
        debug_assert!(column.is_some(), "search reached a non-terminal board without moves");

        let (side, mut value) = if maximizing {
            (Side::Ai, i32::MIN)
        } else {
            (Side::Player, i32::MAX)
        };

        for candidate in columns {
            let mut next = *board;
            let row = match next.lowest_open_row(candidate) {
                Some(row) => row,
                None => continue,
            };
            next.place(row, candidate, side);

            let score = self.search(&next, depth - 1, alpha, beta, !maximizing).score;
            if maximizing {
                if score > value {
                    value = score;
                    column = Some(candidate);
                }
                alpha = alpha.max(value);
            } else {
                if score < value {
                    value = score;
                    column = Some(candidate);
                }
                beta = beta.min(value);
            }
            // the other side will never allow this line, skip the remaining columns
            if alpha >= beta {
                break;
            }
        }

        SearchResult {
            column,
            score: value,
        }
    }

    /// Searches the position with the AI to move
    pub fn search_root(&mut self, board: &Board) -> SearchResult {
        self.search_for(board, Side::Ai)
    }

    /// Searches the position with `side` to move, applying the tie-break policy
    pub fn search_for(&mut self, board: &Board, side: Side) -> SearchResult {
        let maximizing = side == Side::Ai;
        if self.tie_break == TieBreak::FirstFound || self.depth == 0 || is_terminal(board) {
            return self.search(board, self.depth, i32::MIN, i32::MAX, maximizing);
        }

        let scores = self.analyse(board, side);
        let best = if maximizing {
            scores.iter().map(|&(_, score)| score).max()
        } else {
            scores.iter().map(|&(_, score)| score).min()
        };
        let best = match best {
            Some(best) => best,
            None => return self.search(board, self.depth, i32::MIN, i32::MAX, maximizing),
        };

        let candidates: Vec<usize> = scores
            .iter()
            .filter(|&&(_, score)| score == best)
            .map(|&(column, _)| column)
            .collect();
        let column = candidates[self.rng.random_range(0..candidates.len())];

        SearchResult {
            column: Some(column),
            score: best,
        }
    }

    /// Chooses the column to play for `side`, `None` if the game is over
    pub fn choose_move(&mut self, board: &Board, side: Side) -> Option<usize> {
        self.search_for(board, side).column
    }

    /// Chooses the column to play for `side`, logging the score of every column to stdout
    pub fn choose_move_verbose(&mut self, board: &Board, side: Side) -> Option<usize> {
        let start = self.node_count;

        for (column, score) in self.analyse(board, side) {
            match forced_winner(score) {
                Some(Side::Ai) => println!("Column {}: AI wins", column + 1),
                Some(Side::Player) => println!("Column {}: Player wins", column + 1),
                None => println!("Column {}: {}", column + 1, score),
            }
        }
        let result = self.search_for(board, side);

        println!(
            "Search depth: {}, positions searched: {}",
            self.depth,
            self.node_count - start
        );
        result.column
    }

    /// Scores every open column for `side` with a full-window search
    ///
    /// The columns are searched in parallel, each on its own copy of the
    /// solver. At least one ply is searched even if the depth is 0.
    /// Returns an empty list if the game is over.
    pub fn analyse(&mut self, board: &Board, side: Side) -> Vec<(usize, i32)> {
        if is_terminal(board) {
            return Vec::new();
        }
        self.node_count += 1;

        let depth = self.depth.max(1) - 1;
        let next_maximizing = side.opponent() == Side::Ai;
        let columns: Vec<usize> = board.valid_columns().collect();
        let template = self.clone();

        let scored: Vec<(usize, i32, usize)> = columns
            .into_par_iter()
            .filter_map(|column| {
                let mut next_board = *board;
                let row = next_board.lowest_open_row(column)?;
                next_board.place(row, column, side);

                let mut next = template.clone();
                next.node_count = 0;
                let result = next.search(&next_board, depth, i32::MIN, i32::MAX, next_maximizing);
                Some((column, result.score, next.node_count))
            })
            .collect();

        self.node_count += scored.iter().map(|&(_, _, nodes)| nodes).sum::<usize>();
        scored
            .into_iter()
            .map(|(column, score, _)| (column, score))
            .collect()
    }

    /// Picks a column for `side` by the heuristic score one ply ahead, without searching
    ///
    /// Starts from a random open column and keeps the first column with the
    /// highest score. Returns `None` if the board is full.
    pub fn pick_best_move(&mut self, board: &Board, side: Side) -> Option<usize> {
        let columns: Vec<usize> = board.valid_columns().collect();
        if columns.is_empty() {
            return None;
        }

        let mut best_column = columns[self.rng.random_range(0..columns.len())];
        let mut best_score = PICK_BASELINE;
        for &column in columns.iter() {
            let mut next = *board;
            if let Some(row) = next.lowest_open_row(column) {
                next.place(row, column, side);
            }
            let score = score_position(&next, side);
            if score > best_score {
                best_score = score;
                best_column = column;
            }
        }
        Some(best_column)
    }
}

impl Default for Solver {
    fn default() -> Self {
        Self::new(DEFAULT_DEPTH)
    }
}
