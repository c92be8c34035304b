use anyhow::{anyhow, Result};
use thiserror::Error;

use std::fmt;
use std::str::FromStr;

use crate::{COLS, ROWS};

/// One of the two sides placing pieces
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Side {
    Player,
    Ai,
}

impl Side {
    pub fn opponent(self) -> Self {
        match self {
            Side::Player => Side::Ai,
            Side::Ai => Side::Player,
        }
    }
}

#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum Cell {
    Empty,
    Taken(Side),
}

impl Cell {
    pub fn is_empty(&self) -> bool {
        match self {
            Cell::Empty => true,
            _ => false,
        }
    }

    fn symbol(&self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::Taken(Side::Player) => 'X',
            Cell::Taken(Side::Ai) => 'O',
        }
    }
}

/// A move that cannot be played
#[derive(Copy, Clone, Eq, PartialEq, Debug, Error)]
pub enum InvalidColumn {
    #[error("Invalid move, column {0} out of range. Columns must be between 0 and {max}", max = COLS - 1)]
    OutOfRange(usize),
    #[error("Invalid move, column {0} full")]
    Full(usize),
}

/// A 6x7 Connect 4 grid
///
/// Row 0 is the top of the board, pieces fall towards row `ROWS - 1`.
/// The board is a small `Copy` value so the search can keep a private
/// copy per node.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct Board {
    cells: [[Cell; COLS]; ROWS], // cells are stored top-to-bottom, left-to-right
}

impl Board {
    pub fn new() -> Self {
        Self {
            cells: [[Cell::Empty; COLS]; ROWS],
        }
    }

    /// Builds a board by replaying 1-indexed column digits, `first` moves first
    pub fn from_moves<S: AsRef<str>>(moves: S, first: Side) -> Result<Self> {
        let mut board = Self::new();
        let mut side = first;

        for column_char in moves.as_ref().chars() {
            match column_char.to_digit(10).map(|c| c as usize) {
                Some(column @ 1..=COLS) => {
                    board.drop_piece(column - 1, side)?;
                    side = side.opponent();
                }
                _ => return Err(anyhow!("could not parse '{}' as a valid move", column_char)),
            }
        }
        Ok(board)
    }

    pub fn cell(&self, row: usize, column: usize) -> Cell {
        self.cells[row][column]
    }

    /// Whether the top cell of `column` is still free
    ///
    /// # Panics
    /// Panics if `column` is out of range.
    pub fn is_open(&self, column: usize) -> bool {
        self.cells[0][column].is_empty()
    }

    /// Returns the row a piece dropped into `column` would land in,
    /// or `None` if the column is full
    pub fn lowest_open_row(&self, column: usize) -> Option<usize> {
        (0..ROWS).rev().find(|&row| self.cells[row][column].is_empty())
    }

    /// Sets a single cell without any checks
    pub fn place(&mut self, row: usize, column: usize, side: Side) {
        self.cells[row][column] = Cell::Taken(side);
    }

    /// Drops a piece into `column`, returning the row it landed in
    pub fn drop_piece(&mut self, column: usize, side: Side) -> Result<usize, InvalidColumn> {
        if column >= COLS {
            return Err(InvalidColumn::OutOfRange(column));
        }
        let row = self
            .lowest_open_row(column)
            .ok_or(InvalidColumn::Full(column))?;
        self.place(row, column, side);
        Ok(row)
    }

    /// Emits the open columns in ascending order
    pub fn valid_columns(&self) -> impl Iterator<Item = usize> + '_ {
        (0..COLS).filter(move |&column| self.is_open(column))
    }

    pub fn is_full(&self) -> bool {
        self.valid_columns().next().is_none()
    }

    /// Returns the number of pieces of `side` on the board
    pub fn count_pieces(&self, side: Side) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell == Cell::Taken(side))
            .count()
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl FromStr for Board {
    type Err = anyhow::Error;

    /// Parses six rows of seven cells, top row first: `.` is empty,
    /// `X` a player piece and `O` an AI piece
    fn from_str(s: &str) -> Result<Self> {
        let rows: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        if rows.len() != ROWS {
            return Err(anyhow!("expected {} rows, found {}", ROWS, rows.len()));
        }

        let mut board = Self::new();
        for (row, line) in rows.iter().enumerate() {
            let symbols: Vec<char> = line.chars().collect();
            if symbols.len() != COLS {
                return Err(anyhow!(
                    "row {} has {} cells, expected {}",
                    row,
                    symbols.len(),
                    COLS
                ));
            }
            for (column, symbol) in symbols.into_iter().enumerate() {
                board.cells[row][column] = match symbol {
                    '.' => Cell::Empty,
                    'X' | 'x' => Cell::Taken(Side::Player),
                    'O' | 'o' => Cell::Taken(Side::Ai),
                    _ => return Err(anyhow!("could not parse '{}' as a cell", symbol)),
                };
            }
        }

        // pieces never float above an empty cell
        for column in 0..COLS {
            for row in 0..ROWS - 1 {
                if !board.cells[row][column].is_empty() && board.cells[row + 1][column].is_empty() {
                    return Err(anyhow!("floating piece at row {}, column {}", row, column));
                }
            }
        }
        Ok(board)
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.iter() {
            let line: String = row.iter().map(Cell::symbol).collect();
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
