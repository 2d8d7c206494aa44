//! Core Connect Four game logic: board representation, player types, win
//! detection and the game state machine.

mod board;
mod player;
mod state;
pub mod win;

pub use board::{Board, Cell, MoveError, Placement, COLS, MAX_DIMENSION, ROWS};
pub use player::Player;
pub use state::{GameOutcome, GameState};
pub use win::{Axis, ScanMode, WinOutcome};
