//! Move choosers: position evaluators, the minimax search tree and agents
//! built on top of them.

mod agent;
pub mod evaluator;
pub mod minimax;
mod random;
pub mod tree;

pub use agent::Agent;
pub use evaluator::{Evaluator, ProbabilityTable, RunLengthEvaluator, TableEvaluator};
pub use minimax::{MinimaxAgent, SearchOutcome};
pub use random::RandomAgent;
pub use tree::{SearchNode, SearchTree, Sign, Subtree};
