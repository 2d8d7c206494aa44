use rand::rngs::StdRng;
use rand::seq::IndexedRandom;
use rand::SeedableRng;

use super::agent::Agent;
use crate::game::{Board, GameState};

/// Uniform choice among the columns that still accept a token.
pub struct RandomAgent {
    rng: StdRng,
    seed: Option<u64>,
}

impl RandomAgent {
    /// Entropy-seeded agent.
    pub fn new() -> Self {
        RandomAgent {
            rng: StdRng::from_os_rng(),
            seed: None,
        }
    }

    /// Reproducible sequence of choices for a given seed.
    pub fn seeded(seed: u64) -> Self {
        RandomAgent {
            rng: StdRng::seed_from_u64(seed),
            seed: Some(seed),
        }
    }

    pub fn seed(&self) -> Option<u64> {
        self.seed
    }

    /// A random open column of `board`, `None` when every column is full.
    pub fn choose_column(&mut self, board: &Board) -> Option<usize> {
        board.legal_columns().choose(&mut self.rng).copied()
    }
}

impl Default for RandomAgent {
    fn default() -> Self {
        Self::new()
    }
}

impl Agent for RandomAgent {
    fn select_action(&mut self, state: &GameState) -> usize {
        let actions = state.legal_actions();
        let Some(&col) = actions.choose(&mut self.rng) else {
            panic!("no legal column on a finished game");
        };
        col
    }

    fn name(&self) -> &str {
        "Random"
    }
}
