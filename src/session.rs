use anyhow::{anyhow, Result};
use rand::Rng;

use crate::board::{Board, Side};
use crate::rules::has_four_in_a_row;

#[derive(Copy, Clone, Eq, PartialEq, Debug)]
pub enum GameState {
    Playing,
    PlayerWin,
    AiWin,
    Draw,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        *self != GameState::Playing
    }
}

/// A game in progress, owning the authoritative board
#[derive(Clone, Debug)]
pub struct GameSession {
    board: Board,
    turn: Side,
    state: GameState,
    moves: Vec<usize>,
}

impl GameSession {
    pub fn new(first: Side) -> Self {
        Self {
            board: Board::new(),
            turn: first,
            state: GameState::Playing,
            moves: Vec::new(),
        }
    }

    /// Starts a game with a randomly chosen side to move first
    pub fn with_random_first<R: Rng>(rng: &mut R) -> Self {
        let first = if rng.random_bool(0.5) {
            Side::Player
        } else {
            Side::Ai
        };
        Self::new(first)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// The side to move next
    pub fn turn(&self) -> Side {
        self.turn
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    /// The columns played so far, 0-indexed
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// Plays `column` for the side to move and returns the new game state
    pub fn play_checked(&mut self, column: usize) -> Result<GameState> {
        if self.state.is_over() {
            return Err(anyhow!("Invalid move, the game is already over"));
        }
        self.board.drop_piece(column, self.turn)?;
        self.moves.push(column);

        self.state = if has_four_in_a_row(&self.board, self.turn) {
            match self.turn {
                Side::Player => GameState::PlayerWin,
                Side::Ai => GameState::AiWin,
            }
        } else if self.board.is_full() {
            GameState::Draw
        } else {
            GameState::Playing
        };
        self.turn = self.turn.opponent();

        Ok(self.state)
    }
}
