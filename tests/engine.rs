use minimax_connect_four::ai::{Agent, RandomAgent, SearchTree, Sign};
use minimax_connect_four::engine::{new_game, Game};
use minimax_connect_four::game::win::check_win;
use minimax_connect_four::game::{Axis, Board, Cell, Player};

/// Drops every move for its given player on an otherwise empty 6x7 board and
/// returns the axis credited for the last one.
fn winning_axis(moves: &[(usize, Player)]) -> Option<Axis> {
    let mut board = Board::standard();
    let mut last = None;
    for &(col, player) in moves {
        last = Some(board.apply_move(col, player).unwrap());
    }
    check_win(&board, last.unwrap()).axis
}

fn assert_board_invariants(board: &Board) {
    for col in 0..board.cols() {
        let filled = (0..board.rows())
            .filter(|&row| board.get(row, col) != Cell::Empty)
            .count();
        let pointer = board.fill_pointer(col).unwrap();
        assert_eq!(pointer, board.rows() as isize - 1 - filled as isize);
        assert_eq!(board.is_move_legal(col), pointer >= 0);
    }
    for value in board.snapshot().into_iter().flatten() {
        assert!((-1..=1).contains(&value));
    }
}

#[test]
fn red_bottom_row_wins_horizontally() {
    let moves: Vec<_> = (0..4).map(|col| (col, Player::Red)).collect();
    assert_eq!(winning_axis(&moves), Some(Axis::Horizontal));
}

#[test]
fn every_axis_is_detected() {
    assert_eq!(winning_axis(&[(5, Player::Red); 4]), Some(Axis::Vertical));

    let up = [
        (1, Player::Red),
        (2, Player::Yellow),
        (2, Player::Red),
        (3, Player::Yellow),
        (3, Player::Yellow),
        (3, Player::Red),
        (4, Player::Yellow),
        (4, Player::Yellow),
        (4, Player::Yellow),
        (4, Player::Red),
    ];
    assert_eq!(winning_axis(&up), Some(Axis::DiagonalUp));

    let down = [
        (5, Player::Red),
        (4, Player::Yellow),
        (4, Player::Red),
        (3, Player::Yellow),
        (3, Player::Yellow),
        (3, Player::Red),
        (2, Player::Yellow),
        (2, Player::Yellow),
        (2, Player::Yellow),
        (2, Player::Red),
    ];
    assert_eq!(winning_axis(&down), Some(Axis::DiagonalDown));
}

#[test]
fn blocked_lines_do_not_win() {
    let blocked = [
        (3, Player::Yellow),
        (0, Player::Red),
        (1, Player::Red),
        (2, Player::Red),
    ];
    assert_eq!(winning_axis(&blocked), None);

    let edge = [(6, Player::Red), (5, Player::Red), (4, Player::Red)];
    assert_eq!(winning_axis(&edge), None);

    let capped = [
        (0, Player::Red),
        (0, Player::Red),
        (0, Player::Red),
        (0, Player::Yellow),
    ];
    assert_eq!(winning_axis(&capped), None);
}

#[test]
fn full_board_without_line_is_a_draw() {
    let moves = [
        2, 3, 3, 2, 3, 3, 4, 3, 3, 2, 2, 4, 2, 2, 0, 4, 4, 1, 4, 4, 1, 5, 1, 1, 5, 1, 1, 0, 5, 5,
        6, 5, 5, 0, 0, 6, 0, 6, 6, 0, 6, 6,
    ];
    let mut game = new_game(6, 7).unwrap();
    let (last, rest) = moves.split_last().unwrap();
    for &col in rest {
        let outcome = game.apply_move(col);
        assert!(outcome.applied && !outcome.terminal, "column {col}");
    }

    let outcome = game.apply_move(*last);
    assert!(outcome.applied);
    assert!(outcome.terminal);
    assert!(outcome.draw);
    assert_eq!(outcome.winner, None);
    assert!(game.board().is_full());
    assert!(!game.apply_move(0).applied);
}

#[test]
fn random_games_keep_invariants_and_alternate_turns() {
    for seed in 0..20 {
        let mut agent = RandomAgent::seeded(seed);
        let mut game = Game::standard();
        while !game.is_terminal() {
            let mover = game.current_player();
            let col = agent.select_action(game.state());
            let outcome = game.apply_move(col);
            assert!(outcome.applied);
            assert_board_invariants(game.board());
            if outcome.terminal {
                assert_eq!(game.current_player(), mover);
                if let Some(winner) = outcome.winner {
                    assert_eq!(winner, mover);
                    assert!(outcome.axis.is_some());
                }
            } else {
                assert_eq!(game.current_player(), mover.other());
            }
        }
    }
}

#[test]
fn minimax_example_from_two_ply_tree() {
    let mut tree = SearchTree::new();
    let root = tree.root();
    let child1 = tree.add_child(root, 1usize, None);
    let child2 = tree.add_child(root, 2usize, None);
    for (parent, value) in [(child1, 3.0), (child1, 5.0), (child2, 2.0), (child2, 8.0)] {
        tree.add_child(parent, 0, Some(value));
    }

    assert_eq!(tree.minimax(root, Sign::Max), 3.0);
    assert_eq!(tree.value(child1), Some(3.0));
    assert_eq!(tree.value(child2), Some(2.0));
    assert_eq!(tree.best_label(root), Some(&1));
}

#[test]
fn search_agent_finishes_game_against_random() {
    let mut random = RandomAgent::seeded(42);
    let mut game = Game::standard();
    while !game.is_terminal() {
        let outcome = match game.current_player() {
            Player::Red => game.play_search_move(3).unwrap(),
            Player::Yellow => {
                let col = random.select_action(game.state());
                game.apply_move(col)
            }
        };
        assert!(outcome.applied);
    }
    assert!(game.outcome().is_some());
    assert_eq!(game.choose_move_by_search(3), None);
}

#[test]
fn search_is_deterministic() {
    let mut game = Game::standard();
    for col in [3, 3, 2] {
        game.apply_move(col);
    }
    let first = game.choose_move_by_search(3);
    for _ in 0..3 {
        assert_eq!(game.choose_move_by_search(3), first);
    }
}

#[test]
fn independent_games_run_on_separate_threads() {
    let handles: Vec<_> = (0..4)
        .map(|seed| {
            std::thread::spawn(move || {
                let mut game = Game::standard();
                let mut random = RandomAgent::seeded(seed);
                while !game.is_terminal() {
                    if game.current_player() == Player::Red {
                        game.play_search_move(2);
                    } else {
                        let col = random.select_action(game.state());
                        game.apply_move(col);
                    }
                }
                game.outcome()
            })
        })
        .collect();

    for handle in handles {
        assert!(handle.join().unwrap().is_some());
    }
}
