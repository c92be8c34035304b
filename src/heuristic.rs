//! Static evaluation of positions the search cannot resolve
//!
//! A position is scored for one side by sliding a 4 cell window over every
//! row, column and diagonal and adding a bonus for pieces in the middle
//! column, which take part in the most potential alignments.

use crate::board::{Board, Cell, Side};
use crate::{COLS, ROWS, SERIES_LEN};

/// Score for a completed alignment
pub const FOUR_SCORE: i32 = 100;
/// Score for three pieces with the fourth cell open
pub const THREE_SCORE: i32 = 5;
/// Score for two pieces with both other cells open
pub const TWO_SCORE: i32 = 2;
/// Penalty for an opponent three with the fourth cell open
pub const OPPONENT_THREE_PENALTY: i32 = -4;
/// Bonus per piece in the middle column
pub const CENTER_WEIGHT: i32 = 6;

/// Coordinates `(row, column)` of the cells in a window
pub type Window = [(usize, usize); SERIES_LEN];

/// Emits every window on the board: horizontal, vertical, then both diagonals
pub fn windows() -> impl Iterator<Item = Window> {
    let horizontal = (0..ROWS).flat_map(|row| {
        (0..=COLS - SERIES_LEN).map(move |column| line(row, column, 0, 1))
    });
    let vertical = (0..COLS).flat_map(|column| {
        (0..=ROWS - SERIES_LEN).map(move |row| line(row, column, 1, 0))
    });
    let positive = (SERIES_LEN - 1..ROWS).flat_map(|row| {
        (0..=COLS - SERIES_LEN).map(move |column| line(row, column, -1, 1))
    });
    let negative = (SERIES_LEN - 1..ROWS).flat_map(|row| {
        (SERIES_LEN - 1..COLS).map(move |column| line(row, column, -1, -1))
    });
    horizontal.chain(vertical).chain(positive).chain(negative)
}

fn line(row: usize, column: usize, d_row: isize, d_column: isize) -> Window {
    let mut window = [(0, 0); SERIES_LEN];
    for (i, cell) in window.iter_mut().enumerate() {
        *cell = (
            (row as isize + d_row * i as isize) as usize,
            (column as isize + d_column * i as isize) as usize,
        );
    }
    window
}

/// Scores the contents of a single window for `side`
pub fn evaluate_window(cells: &[Cell; SERIES_LEN], side: Side) -> i32 {
    let count = |piece: Cell| cells.iter().filter(|&&cell| cell == piece).count();
    let own = count(Cell::Taken(side));
    let opponent = count(Cell::Taken(side.opponent()));
    let empty = count(Cell::Empty);

    match (own, opponent, empty) {
        (4, _, _) => FOUR_SCORE,
        (3, _, 1) => THREE_SCORE,
        (2, _, 2) => TWO_SCORE,
        (_, 3, 1) => OPPONENT_THREE_PENALTY,
        _ => 0,
    }
}

/// Scores the whole board from the point of view of `side`
pub fn score_position(board: &Board, side: Side) -> i32 {
    let center = (0..ROWS)
        .filter(|&row| board.cell(row, COLS / 2) == Cell::Taken(side))
        .count() as i32;

    let windows: i32 = windows()
        .map(|window| {
            let mut cells = [Cell::Empty; SERIES_LEN];
            for (cell, &(row, column)) in cells.iter_mut().zip(window.iter()) {
                *cell = board.cell(row, column);
            }
            evaluate_window(&cells, side)
        })
        .sum();

    center * CENTER_WEIGHT + windows
}
