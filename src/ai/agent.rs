use crate::game::GameState;

/// Anything that can pick a column for the player to move.
pub trait Agent {
    /// Select an action (column) given the current game state. The state
    /// must not be terminal.
    fn select_action(&mut self, state: &GameState) -> usize;

    /// Return the agent's display name.
    fn name(&self) -> &str;
}
