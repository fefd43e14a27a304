use super::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

#[test]
fn test_stone_opponent() {
    assert_eq!(Stone::Black.opponent(), Stone::White);
    assert_eq!(Stone::White.opponent(), Stone::Black);
    assert_eq!(Stone::Empty.opponent(), Stone::Empty);
    assert_eq!(Stone::Border.opponent(), Stone::Border);
}

#[test]
fn test_board_size_limits() {
    assert_eq!(Board::new(1).unwrap_err(), BoardError::InvalidSize(1));
    assert_eq!(Board::new(26).unwrap_err(), BoardError::InvalidSize(26));
    assert!(Board::new(MIN_SIZE).is_ok());
    assert!(Board::new(MAX_SIZE).is_ok());
}

#[test]
fn test_point_layout() {
    let board = Board::new(7).unwrap();
    assert_eq!(board.stride(), 8);
    assert_eq!(board.pt(1, 1), Point(9));
    assert_eq!(board.pt(7, 7), Point(63));
    assert_eq!(board.coord(Point(63)), (7, 7));
    assert_eq!(board.directions(), [1, 8, 9, 7]);
}

#[test]
fn test_border_ring() {
    let board = Board::new(5).unwrap();
    let ns = board.stride();
    for i in 0..ns {
        assert_eq!(board.get(Point(i)), Stone::Border);
    }
    for row in 1..=5 {
        assert_eq!(board.get(Point(row * ns)), Stone::Border);
    }
    assert_eq!(board.get(Point(6 * ns + 1)), Stone::Border);
    assert_eq!(board.get(Point(10_000)), Stone::Border);
    assert!(!board.on_board(Point(0)));
    assert!(board.on_board(board.pt(3, 3)));
}

#[test]
fn test_new_board_state() {
    let board = Board::new(DEFAULT_SIZE).unwrap();
    assert_eq!(board.size(), 7);
    assert_eq!(board.current_player(), Stone::Black);
    assert_eq!(board.empty_count(), 49);
    assert_eq!(board.legal_moves(Stone::Black).len(), 49);
    assert_eq!(board.check_terminal(), Outcome::Ongoing);
    assert_eq!(board.move_number(), 0);
}

#[test]
fn test_candidate_order_is_ascending() {
    let board = Board::new(5).unwrap();
    let moves = board.legal_moves(Stone::White);
    assert_eq!(moves[0], board.pt(1, 1));
    assert_eq!(moves[1], board.pt(1, 2));
    assert_eq!(moves[5], board.pt(2, 1));
    assert!(moves.windows(2).all(|w| w[0] < w[1]));
    assert!(board.legal_moves(Stone::Empty).is_empty());
}

#[test]
fn test_play_move_rules() {
    let mut board = Board::new(5).unwrap();
    let p = board.pt(3, 3);
    assert!(board.play_move(p, Stone::Black));
    assert_eq!(board.get(p), Stone::Black);
    assert_eq!(board.current_player(), Stone::White);
    assert_eq!(board.empty_count(), 24);

    assert!(!board.play_move(p, Stone::White));
    assert!(!board.play_move(Point(0), Stone::White));
    assert!(!board.play_move(board.pt(1, 1), Stone::Empty));
    assert_eq!(board.move_number(), 1);
}

#[test]
fn test_undo_restores_everything() {
    let mut board = Board::new(7).unwrap();
    for col in 1..=4 {
        board.play_move(board.pt(2, col), Stone::Black);
        board.play_move(board.pt(5, col), Stone::White);
    }
    let before = board.render();
    board.play_move(board.pt(2, 5), Stone::Black);
    assert_eq!(board.check_terminal(), Outcome::BlackWins);

    assert_eq!(board.undo_move(), Some(Move::Place(board.pt(2, 5))));
    assert_eq!(board.check_terminal(), Outcome::Ongoing);
    assert_eq!(board.current_player(), Stone::Black);
    assert_eq!(board.render(), before);
}

#[test]
fn test_undo_on_fresh_board() {
    let mut board = Board::new(5).unwrap();
    assert_eq!(board.undo_move(), None);
    assert_eq!(board.last_move(), None);
}

#[test]
fn test_pass_and_last_move() {
    let mut board = Board::new(5).unwrap();
    board.pass(Stone::Black);
    assert_eq!(board.current_player(), Stone::White);
    assert_eq!(board.last_move(), Some((Move::Pass, Stone::Black)));
    assert_eq!(board.empty_count(), 25);

    assert_eq!(board.undo_move(), Some(Move::Pass));
    assert_eq!(board.current_player(), Stone::Black);
}

#[test]
fn test_reset_to_move_number() {
    let mut board = Board::new(5).unwrap();
    board.play_move(board.pt(1, 1), Stone::Black);
    let mark = board.move_number();
    let snapshot = board.render();

    board.play_move(board.pt(2, 2), Stone::White);
    board.play_move(board.pt(3, 3), Stone::Black);
    board.reset_to_move_number(mark);

    assert_eq!(board.move_number(), 1);
    assert_eq!(board.render(), snapshot);
    assert_eq!(board.current_player(), Stone::White);
}

#[test]
fn test_from_diagram() {
    let board = Board::from_diagram(&["X..", ".O.", "..X"]).unwrap();
    assert_eq!(board.get(board.pt(3, 1)), Stone::Black);
    assert_eq!(board.get(board.pt(2, 2)), Stone::White);
    assert_eq!(board.get(board.pt(1, 3)), Stone::Black);
    assert_eq!(board.current_player(), Stone::White);
    assert_eq!(board.render(), "X..\n.O.\n..X\n");
}

#[test]
fn test_from_diagram_errors() {
    assert!(matches!(
        Board::from_diagram(&["X..", ".."]),
        Err(BoardError::MalformedDiagram { .. })
    ));
    assert_eq!(
        Board::from_diagram(&["X?", ".."]).unwrap_err(),
        BoardError::BadCell('?')
    );
    assert_eq!(Board::from_diagram(&["X"]).unwrap_err(), BoardError::InvalidSize(1));
}

#[test]
fn test_from_diagram_detects_five() {
    let board = Board::from_diagram(&["OOOOO", ".....", "XXXX.", ".....", "X...."]).unwrap();
    assert_eq!(board.check_terminal(), Outcome::WhiteWins);
}

#[test]
fn test_full_board_is_draw() {
    let board = Board::from_diagram(&["XXOOX", "OOOOX", "XXOXO", "OOXOO", "XOXOX"]).unwrap();
    assert_eq!(board.empty_count(), 0);
    assert_eq!(board.check_terminal(), Outcome::Draw);
    assert!(board.is_game_over());
    assert!(board.legal_moves(Stone::Black).is_empty());
}

#[test]
fn test_winner_is_sticky() {
    let mut board = Board::new(9).unwrap();
    for col in 1..=5 {
        board.play_move(board.pt(1, col), Stone::Black);
    }
    for col in 1..=5 {
        board.play_move(board.pt(9, col), Stone::White);
    }
    assert_eq!(board.winner(), Some(Stone::Black));
}

#[test]
fn test_random_legal_move() {
    let mut rng = ChaCha8Rng::seed_from_u64(5);
    let mut board = Board::from_diagram(&["XXO..", "OOOOX", "XXOXO", "OOXOO", "XOXOX"]).unwrap();
    for _ in 0..20 {
        let mv = board.random_legal_move(Stone::Black, &mut rng);
        assert!(mv == Move::Place(board.pt(5, 4)) || mv == Move::Place(board.pt(5, 5)));
    }
    board.play_move(board.pt(5, 4), Stone::Black);
    board.play_move(board.pt(5, 5), Stone::White);
    assert_eq!(board.random_legal_move(Stone::Black, &mut rng), Move::Pass);
}

#[test]
fn test_simulate_runs_to_the_end() {
    let mut rng = ChaCha8Rng::seed_from_u64(99);
    let mut board = Board::new(7).unwrap();
    board.play_move(board.pt(4, 4), Stone::Black);

    for _ in 0..10 {
        let winner = board.simulate(&mut rng);
        let outcome = board.check_terminal();
        assert!(outcome.is_terminal());
        assert_eq!(outcome.winner().unwrap_or(Stone::Empty), winner);
        board.reset_to_move_number(1);
        assert_eq!(board.empty_count(), 48);
    }
}
