//! Game handle tying the board, win detection and search together.
//!
//! Each [`Game`] owns all of its state. Separate games share nothing and can
//! live on separate threads; a single game must be driven from one place at
//! a time.

use log::{debug, trace};

use crate::ai::minimax::{self, SearchOutcome};
use crate::ai::{Evaluator, RunLengthEvaluator};
use crate::error::BoardError;
use crate::game::{Axis, Board, GameOutcome, GameState, MoveError, Placement, Player};

/// Result of an attempted move, as handed to display and statistics code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize)]
pub struct MoveOutcome {
    pub applied: bool,
    pub terminal: bool,
    pub winner: Option<Player>,
    pub draw: bool,
    pub placement: Option<Placement>,
    /// Axis of the winning line.
    pub axis: Option<Axis>,
    /// Why the move was turned down, when `applied` is false.
    #[serde(skip)]
    pub rejected: Option<MoveError>,
}

impl MoveOutcome {
    fn rejected(state: &GameState, err: MoveError) -> Self {
        let mut outcome = Self::from_state(state);
        outcome.rejected = Some(err);
        outcome
    }

    fn from_state(state: &GameState) -> Self {
        MoveOutcome {
            applied: false,
            terminal: state.is_terminal(),
            winner: match state.outcome() {
                Some(GameOutcome::Winner(player)) => Some(player),
                _ => None,
            },
            draw: state.outcome() == Some(GameOutcome::Draw),
            placement: None,
            axis: state.win_axis(),
            rejected: None,
        }
    }
}

pub type GameHandle = Game;

/// Start a game on a `rows` x `cols` board with the default evaluator.
pub fn new_game(rows: usize, cols: usize) -> Result<GameHandle, BoardError> {
    Game::new(rows, cols)
}

pub struct Game {
    state: GameState,
    evaluator: Box<dyn Evaluator>,
}

impl Game {
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardError> {
        Ok(Game {
            state: GameState::with_dimensions(rows, cols)?,
            evaluator: Box::new(RunLengthEvaluator),
        })
    }

    pub fn standard() -> Self {
        Game {
            state: GameState::initial(),
            evaluator: Box::new(RunLengthEvaluator),
        }
    }

    /// Replace the position evaluator used by search. Fails when the
    /// evaluator cannot score this game's board.
    pub fn with_evaluator(mut self, evaluator: Box<dyn Evaluator>) -> Result<Self, BoardError> {
        let (rows, cols) = (self.board().rows(), self.board().cols());
        if !evaluator.fits(rows, cols) {
            return Err(BoardError::UnsupportedEvaluator {
                name: evaluator.name().to_string(),
                rows,
                cols,
            });
        }
        self.evaluator = evaluator;
        Ok(self)
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn board(&self) -> &Board {
        self.state.board()
    }

    pub fn current_player(&self) -> Player {
        self.state.current_player()
    }

    pub fn outcome(&self) -> Option<GameOutcome> {
        self.state.outcome()
    }

    pub fn is_terminal(&self) -> bool {
        self.state.is_terminal()
    }

    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }

    /// Whether `col` would currently be accepted. Always false once the game
    /// is over.
    pub fn is_move_legal(&self, col: usize) -> bool {
        !self.state.is_terminal() && self.state.board().is_move_legal(col)
    }

    /// Drop the active player's token into `col`. Rejected moves leave the
    /// game untouched and report `applied: false`.
    pub fn apply_move(&mut self, col: usize) -> MoveOutcome {
        let player = self.state.current_player();
        match self.state.apply_move_mut(col) {
            Ok(placement) => {
                trace!(
                    "{} dropped into column {} at row {}",
                    player.name(),
                    placement.col,
                    placement.row
                );
                let mut outcome = MoveOutcome::from_state(&self.state);
                outcome.applied = true;
                outcome.placement = Some(placement);
                if let Some(result) = self.state.outcome() {
                    debug!("game over after {} moves: {:?}", self.board().filled_count(), result);
                }
                outcome
            }
            Err(err) => {
                trace!("{} move into column {} rejected: {}", player.name(), col, err);
                MoveOutcome::rejected(&self.state, err)
            }
        }
    }

    /// Read-only copy of the grid as cell values.
    pub fn board_snapshot(&self) -> Vec<Vec<i8>> {
        self.state.board().snapshot()
    }

    /// Full search from the current position. `None` once the game is over.
    /// A depth of zero is treated as one.
    pub fn search(&self, depth: usize) -> Option<SearchOutcome> {
        if self.state.is_terminal() {
            return None;
        }
        Some(minimax::search(
            self.state.board(),
            self.state.current_player(),
            depth.max(1),
            self.evaluator(),
        ))
    }

    /// Column the search recommends for the active player.
    pub fn choose_move_by_search(&self, depth: usize) -> Option<usize> {
        self.search(depth).and_then(|outcome| outcome.column)
    }

    /// Search and immediately play the recommended column.
    pub fn play_search_move(&mut self, depth: usize) -> Option<MoveOutcome> {
        let col = self.choose_move_by_search(depth)?;
        Some(self.apply_move(col))
    }

    /// Empty board, Red to move. The evaluator is kept.
    pub fn reset(&mut self) {
        self.state.reset();
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ai::{ProbabilityTable, TableEvaluator};
    use std::sync::Arc;

    #[test]
    fn accepted_move_flips_player() {
        let mut game = Game::standard();
        let outcome = game.apply_move(3);
        assert!(outcome.applied);
        assert!(!outcome.terminal);
        assert_eq!(outcome.placement.map(|p| (p.row, p.col)), Some((5, 3)));
        assert_eq!(game.current_player(), Player::Yellow);
    }

    #[test]
    fn rejected_move_changes_nothing() {
        let mut game = new_game(2, 2).unwrap();
        game.apply_move(0);
        game.apply_move(0);
        let snapshot = game.board_snapshot();
        let player = game.current_player();

        let outcome = game.apply_move(0);
        assert!(!outcome.applied);
        assert_eq!(outcome.rejected, Some(MoveError::ColumnFull));
        assert_eq!(game.board_snapshot(), snapshot);
        assert_eq!(game.current_player(), player);

        let outcome = game.apply_move(9);
        assert_eq!(outcome.rejected, Some(MoveError::InvalidColumn));
    }

    #[test]
    fn winning_move_is_terminal() {
        let mut game = Game::standard();
        for col in [0, 0, 1, 1, 2, 2] {
            assert!(!game.apply_move(col).terminal);
        }
        let outcome = game.apply_move(3);
        assert!(outcome.applied && outcome.terminal);
        assert_eq!(outcome.winner, Some(Player::Red));
        assert_eq!(outcome.axis, Some(Axis::Horizontal));
        assert!(!outcome.draw);
        assert_eq!(game.current_player(), Player::Red);

        assert!(!game.is_move_legal(4));
        let again = game.apply_move(4);
        assert!(!again.applied);
        assert_eq!(again.rejected, Some(MoveError::GameOver));
        assert_eq!(again.winner, Some(Player::Red));
    }

    #[test]
    fn search_plays_the_winning_column() {
        let mut game = Game::standard();
        for col in [0, 0, 1, 1, 2, 2] {
            game.apply_move(col);
        }
        assert_eq!(game.choose_move_by_search(2), Some(3));
        let outcome = game.play_search_move(2).unwrap();
        assert_eq!(outcome.winner, Some(Player::Red));
        assert_eq!(game.choose_move_by_search(2), None);
        assert!(game.play_search_move(2).is_none());
    }

    #[test]
    fn reset_starts_over() {
        let mut game = Game::standard();
        game.apply_move(1);
        game.reset();
        assert_eq!(game.current_player(), Player::Red);
        assert!(game.board_snapshot().iter().flatten().all(|&v| v == 0));
    }

    #[test]
    fn mismatched_table_evaluator_is_refused() {
        let table = Arc::new(ProbabilityTable {
            rows: 3,
            cols: 3,
            p: vec![0.1; 9],
        });
        let evaluator = TableEvaluator::for_board(Arc::clone(&table), 3, 3).unwrap();

        let err = Game::standard()
            .with_evaluator(Box::new(evaluator.clone()))
            .err()
            .unwrap();
        assert_eq!(
            err,
            BoardError::UnsupportedEvaluator {
                name: "table".into(),
                rows: 6,
                cols: 7
            }
        );

        let game = new_game(3, 3).unwrap().with_evaluator(Box::new(evaluator)).unwrap();
        assert_eq!(game.evaluator().name(), "table");
        assert!(game.choose_move_by_search(1).is_some());
    }

    #[test]
    fn invalid_dimensions() {
        assert!(new_game(0, 7).is_err());
    }
}
