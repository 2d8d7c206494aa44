use log::debug;

use crate::game::win;
use crate::game::{Board, GameState, Player};

use super::agent::Agent;
use super::evaluator::{Evaluator, RunLengthEvaluator};
use super::tree::{SearchTree, Sign};

/// Added to the evaluation of a position where a move just won, signed
/// toward the winner.
pub const WIN_SCORE: f64 = 1e9;

/// Output of one search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    /// Recommended column, `None` when the root had no legal move.
    pub column: Option<usize>,
    /// Minimax value of the root.
    pub value: f64,
    pub tree: SearchTree<usize>,
}

/// Column ordering: centre first, then outward, left before right.
pub fn move_order(cols: usize) -> Vec<usize> {
    let mut order: Vec<usize> = (0..cols).collect();
    order.sort_by_key(|&col| ((2 * col).abs_diff(cols - 1), col));
    order
}

/// Red maximises, Yellow minimises.
pub fn root_sign(to_move: Player) -> Sign {
    match to_move {
        Player::Red => Sign::Max,
        Player::Yellow => Sign::Min,
    }
}

/// Build the full-width tree of every line of play up to `depth` plies from
/// `board`, scoring each leaf with `evaluator`.
///
/// A move that wins or fills the board ends its line early. Winning leaves
/// get [`WIN_SCORE`] plus the plies left unplayed, so quicker wins rank
/// higher.
pub fn build_tree(
    board: &Board,
    to_move: Player,
    depth: usize,
    evaluator: &dyn Evaluator,
) -> SearchTree<usize> {
    let mut tree = SearchTree::new();
    let root = tree.root();
    if depth == 0 || board.is_full() {
        tree.set_value(root, evaluator.evaluate(board));
        return tree;
    }

    let order = move_order(board.cols());
    expand(&mut tree, root, board, to_move, depth, evaluator, &order);
    tree
}

fn expand(
    tree: &mut SearchTree<usize>,
    parent: ego_tree::NodeId,
    board: &Board,
    mover: Player,
    remaining: usize,
    evaluator: &dyn Evaluator,
    order: &[usize],
) {
    for &col in order {
        let mut next = board.clone();
        let Ok(placement) = next.apply_move(col, mover) else {
            continue;
        };

        if win::check_win(&next, placement).is_win() {
            let bonus = WIN_SCORE + (remaining - 1) as f64;
            let value = evaluator.evaluate(&next) + f64::from(mover.sign()) * bonus;
            tree.add_child(parent, col, Some(value));
        } else if remaining == 1 || next.is_full() {
            tree.add_child(parent, col, Some(evaluator.evaluate(&next)));
        } else {
            let child = tree.add_child(parent, col, None);
            expand(tree, child, &next, mover.other(), remaining - 1, evaluator, order);
        }
    }
}

/// Build, score and propagate a search tree, returning the recommended move.
pub fn search(
    board: &Board,
    to_move: Player,
    depth: usize,
    evaluator: &dyn Evaluator,
) -> SearchOutcome {
    let mut tree = build_tree(board, to_move, depth, evaluator);
    let root = tree.root();
    let value = tree.minimax(root, root_sign(to_move));
    let column = tree.best_label(root).copied();

    debug!(
        "{} search depth {} over {} nodes: column {:?}, value {}",
        to_move.name(),
        depth,
        tree.node_count(),
        column,
        value
    );

    SearchOutcome {
        column,
        value,
        tree,
    }
}

/// Minimax agent over an explicit, full-width search tree.
pub struct MinimaxAgent {
    depth: usize,
    evaluator: Box<dyn Evaluator>,
}

impl MinimaxAgent {
    pub fn new(depth: usize) -> Self {
        Self::with_evaluator(depth, Box::new(RunLengthEvaluator))
    }

    pub fn with_evaluator(depth: usize, evaluator: Box<dyn Evaluator>) -> Self {
        MinimaxAgent {
            depth: depth.max(1),
            evaluator,
        }
    }

    pub fn depth(&self) -> usize {
        self.depth
    }

    pub fn evaluator(&self) -> &dyn Evaluator {
        self.evaluator.as_ref()
    }
}

impl Agent for MinimaxAgent {
    fn select_action(&mut self, state: &GameState) -> usize {
        let legal = state.legal_actions();
        assert!(!legal.is_empty(), "No legal actions available");

        search(state.board(), state.current_player(), self.depth, self.evaluator())
            .column
            .unwrap_or(legal[0])
    }

    fn name(&self) -> &str {
        "Minimax"
    }
}
