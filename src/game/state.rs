use super::board::{Board, MoveError, Placement};
use super::win::{self, Axis};
use super::Player;
use crate::error::BoardError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
    win_axis: Option<Axis>,
}

impl GameState {
    /// Create initial game state on the standard board
    pub fn initial() -> Self {
        Self::from_board(Board::standard())
    }

    /// Create initial game state on a `rows` x `cols` board
    pub fn with_dimensions(rows: usize, cols: usize) -> Result<Self, BoardError> {
        Ok(Self::from_board(Board::new(rows, cols)?))
    }

    fn from_board(board: Board) -> Self {
        GameState {
            board,
            current_player: Player::Red, // Red starts
            outcome: None,
            win_axis: None,
        }
    }

    /// Get current player
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    /// Get reference to board
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Get game outcome if game is over
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    /// Axis of the winning line, once someone has won
    pub fn win_axis(&self) -> Option<Axis> {
        self.win_axis
    }

    /// Check if game is over
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_some()
    }

    /// Get list of legal columns (not full)
    pub fn legal_actions(&self) -> Vec<usize> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.legal_columns()
    }

    /// Apply a move and return new state (immutable)
    pub fn apply_move(&self, column: usize) -> Result<GameState, MoveError> {
        let mut next = self.clone();
        next.apply_move_mut(column)?;
        Ok(next)
    }

    /// Apply a move in place. On error nothing changes.
    ///
    /// The active player only switches when the game goes on; after a
    /// winning or drawing move it stays on the player who made it.
    pub fn apply_move_mut(&mut self, column: usize) -> Result<Placement, MoveError> {
        if self.is_terminal() {
            return Err(MoveError::GameOver);
        }

        let placement = self.board.apply_move(column, self.current_player)?;

        let won = win::check_win(&self.board, placement);
        if let Some(axis) = won.axis {
            self.outcome = Some(GameOutcome::Winner(self.current_player));
            self.win_axis = Some(axis);
        } else if self.board.is_full() {
            self.outcome = Some(GameOutcome::Draw);
        } else {
            self.current_player = self.current_player.other();
        }

        Ok(placement)
    }

    /// Back to an empty board with Red to move
    pub fn reset(&mut self) {
        self.board.reset();
        self.current_player = Player::Red;
        self.outcome = None;
        self.win_axis = None;
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::initial()
    }
}
