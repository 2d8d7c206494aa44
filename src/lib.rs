//! # Minimax Connect Four
//!
//! A Connect Four engine on a configurable gravity grid with a minimax move
//! chooser built over an explicit, full-width search tree.
//!
//! ## Modules
//!
//! - [`game`]: Core game logic: board, player, win detection, state machine
//! - [`ai`]: Agent trait, position evaluators, search tree, minimax agent
//! - [`engine`]: Game handle used by display, input and statistics code
//! - [`stats`]: Win/draw tallies with per-axis attribution
//! - [`config`]: TOML configuration loading and validation
//! - [`error`]: Structured error types

pub mod ai;
pub mod config;
pub mod engine;
pub mod error;
pub mod game;
pub mod stats;
