//! An alpha-beta agent for playing the board game 'Connect 4'
//!
//! The agent searches the game tree to a fixed depth and scores the
//! positions it cannot resolve with a window based heuristic.
//!
//! # Basic Usage
//!
//! ```
//! use connect4_engine::{board::Board, solver::Solver, Side};
//!
//!# use std::error::Error;
//!# fn main() -> Result<(), Box<dyn Error>> {
//! let board: Board = "
//!     .......
//!     .......
//!     .......
//!     .......
//!     XXX....
//!     OOO....
//! ".parse()?;
//! let mut solver = Solver::new(1).with_seed(7);
//! let result = solver.search_root(&board);
//!
//! assert_eq!(result.column, Some(3));
//! assert_eq!(result.score, connect4_engine::WIN_SCORE);
//!# Ok(())
//!# }
//! ```

use static_assertions::*;
pub use anyhow;

pub mod board;

pub mod rules;

pub mod heuristic;

pub mod solver;

pub mod session;


pub use board::{Board, Cell, InvalidColumn, Side};
pub use solver::{SearchResult, Solver, TieBreak};

/// The number of rows of the game board
pub const ROWS: usize = 6;

/// The number of columns of the game board
pub const COLS: usize = 7;

/// The number of tiles in a row needed to win
pub const SERIES_LEN: usize = 4;

/// Score of a position won by the AI, the negated value marks a loss
pub const WIN_SCORE: i32 = 10_000_000;

// every window scan assumes at least one full window fits in each direction
const_assert!(ROWS >= SERIES_LEN);
const_assert!(COLS >= SERIES_LEN);

/// Creates an empty board
pub fn create_board() -> Board {
    Board::new()
}

/// Whether a piece can be dropped into `column`, out of range columns are never valid
pub fn is_valid_column(board: &Board, column: usize) -> bool {
    column < COLS && board.is_open(column)
}

/// Drops a piece of `side` into `column`, returning the row it landed in
pub fn drop_piece(board: &mut Board, column: usize, side: Side) -> Result<usize, InvalidColumn> {
    board.drop_piece(column, side)
}

/// Whether `side` has four in a row anywhere on the board
pub fn is_winning_move(board: &Board, side: Side) -> bool {
    rules::has_four_in_a_row(board, side)
}

/// Chooses a column for `side` with a `depth` ply alpha-beta search
///
/// Returns `None` when the game on `board` is already over.
pub fn choose_move(board: &Board, side: Side, depth: usize) -> Option<usize> {
    Solver::new(depth).choose_move(board, side)
}
