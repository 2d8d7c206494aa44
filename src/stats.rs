use std::collections::VecDeque;

use crate::engine::MoveOutcome;
use crate::game::{Axis, Player};

/// Result of a single finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GameResult {
    pub winner: Option<Player>,
    pub axis: Option<Axis>,
    pub game_length: usize,
}

/// Win/draw tallies fed from the [`MoveOutcome`]s a game returns.
///
/// Lifetime counters are never capped; rates are computed over a rolling
/// window of recent games.
pub struct GameStats {
    results: VecDeque<GameResult>,
    capacity: usize,
    total_games: usize,
    red_wins: usize,
    yellow_wins: usize,
    draws: usize,
    axis_wins: [usize; 4],
    moves_in_game: usize,
}

impl GameStats {
    pub fn with_capacity(capacity: usize) -> Self {
        GameStats {
            results: VecDeque::with_capacity(capacity),
            capacity,
            total_games: 0,
            red_wins: 0,
            yellow_wins: 0,
            draws: 0,
            axis_wins: [0; 4],
            moves_in_game: 0,
        }
    }

    pub fn new() -> Self {
        Self::with_capacity(100)
    }

    /// Feed one move outcome. Returns the finished game's result when the
    /// move ended it.
    pub fn record_move(&mut self, outcome: &MoveOutcome) -> Option<GameResult> {
        if !outcome.applied {
            return None;
        }
        self.moves_in_game += 1;
        if !outcome.terminal {
            return None;
        }

        let result = GameResult {
            winner: outcome.winner,
            axis: outcome.axis,
            game_length: self.moves_in_game,
        };
        self.moves_in_game = 0;
        self.record_game(result);
        Some(result)
    }

    pub fn record_game(&mut self, result: GameResult) {
        self.total_games += 1;
        match result.winner {
            Some(Player::Red) => self.red_wins += 1,
            Some(Player::Yellow) => self.yellow_wins += 1,
            None => self.draws += 1,
        }
        if let Some(axis) = result.axis {
            self.axis_wins[axis.index()] += 1;
        }

        self.results.push_back(result);
        if self.results.len() > self.capacity {
            self.results.pop_front();
        }
    }

    /// Win rate for `player` in the last N games.
    pub fn win_rate(&self, player: Player, last_n: usize) -> f32 {
        self.rate(last_n, |r| r.winner == Some(player))
    }

    /// Draw rate in the last N games.
    pub fn draw_rate(&self, last_n: usize) -> f32 {
        self.rate(last_n, |r| r.winner.is_none())
    }

    fn rate(&self, last_n: usize, pred: impl Fn(&GameResult) -> bool) -> f32 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let hits = self.results.iter().rev().take(n).filter(|&r| pred(r)).count();
        hits as f32 / n as f32
    }

    /// Average game length over the last N games.
    pub fn average_game_length(&self, last_n: usize) -> f32 {
        let n = self.results.len().min(last_n);
        if n == 0 {
            return 0.0;
        }
        let total: usize = self
            .results
            .iter()
            .rev()
            .take(n)
            .map(|r| r.game_length)
            .sum();
        total as f32 / n as f32
    }

    pub fn wins(&self, player: Player) -> usize {
        match player {
            Player::Red => self.red_wins,
            Player::Yellow => self.yellow_wins,
        }
    }

    pub fn draws(&self) -> usize {
        self.draws
    }

    /// Lifetime wins completed along `axis`.
    pub fn axis_wins(&self, axis: Axis) -> usize {
        self.axis_wins[axis.index()]
    }

    pub fn total_games(&self) -> usize {
        self.total_games
    }
}

impl Default for GameStats {
    fn default() -> Self {
        Self::new()
    }
}
