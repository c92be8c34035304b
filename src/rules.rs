//! Four-in-a-row and game-end detection

use crate::board::{Board, Cell, Side};
use crate::{COLS, ROWS, SERIES_LEN};

fn check_horizontal(board: &Board, piece: Cell) -> bool {
    for row in 0..ROWS {
        for column in 0..=COLS - SERIES_LEN {
            if (0..SERIES_LEN).all(|i| board.cell(row, column + i) == piece) {
                return true;
            }
        }
    }
    false
}

fn check_vertical(board: &Board, piece: Cell) -> bool {
    for column in 0..COLS {
        for row in 0..=ROWS - SERIES_LEN {
            if (0..SERIES_LEN).all(|i| board.cell(row + i, column) == piece) {
                return true;
            }
        }
    }
    false
}

// diagonal /: going up the board moves right
fn check_positive_diagonal(board: &Board, piece: Cell) -> bool {
    for row in SERIES_LEN - 1..ROWS {
        for column in 0..=COLS - SERIES_LEN {
            if (0..SERIES_LEN).all(|i| board.cell(row - i, column + i) == piece) {
                return true;
            }
        }
    }
    false
}

// diagonal \: going up the board moves left
fn check_negative_diagonal(board: &Board, piece: Cell) -> bool {
    for row in SERIES_LEN - 1..ROWS {
        for column in SERIES_LEN - 1..COLS {
            if (0..SERIES_LEN).all(|i| board.cell(row - i, column - i) == piece) {
                return true;
            }
        }
    }
    false
}

/// Whether `side` has four pieces in a row in any direction
pub fn has_four_in_a_row(board: &Board, side: Side) -> bool {
    let piece = Cell::Taken(side);
    check_horizontal(board, piece)
        || check_vertical(board, piece)
        || check_positive_diagonal(board, piece)
        || check_negative_diagonal(board, piece)
}

/// Returns the side with four in a row, if any
///
/// Positions reached through legal play never have two winners, the AI is
/// reported first otherwise.
pub fn winner(board: &Board) -> Option<Side> {
    [Side::Ai, Side::Player]
        .iter()
        .copied()
        .find(|&side| has_four_in_a_row(board, side))
}

/// The game is over once either side has connected four or the board is full
pub fn is_terminal(board: &Board) -> bool {
    has_four_in_a_row(board, Side::Player) || has_four_in_a_row(board, Side::Ai) || board.is_full()
}
