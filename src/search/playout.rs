//! Playouts: games played from a position to the end
//!
//! Both variants own a single working copy of the starting board and play
//! it forward in place. The copy is private to the playout, so this is
//! equivalent to duplicating the board at every ply, and the depth of a
//! playout never touches the call stack.

use rand::Rng;
use tracing::trace;

use crate::board::{Board, Move, Stone};
use crate::eval::classify;

/// Score of a rule-guided playout won by the original color
pub const WIN_SCORE: f64 = 1.0;
/// Score of a rule-guided playout lost or drawn at a terminal position
pub const LOSS_SCORE: f64 = 0.0;
/// Score when the classifier has nothing to offer
pub const NEUTRAL_SCORE: f64 = 0.5;

/// Play uniformly random moves until the game ends.
///
/// Returns true iff `original` wins. Draws, opponent wins and running out
/// of moves (`Move::Pass`) all count as false.
pub fn random_playout<R: Rng + ?Sized>(
    board: &Board,
    original: Stone,
    to_move: Stone,
    rng: &mut R,
) -> bool {
    let mut work = board.clone();
    let mut color = to_move;
    loop {
        let outcome = work.check_terminal();
        if outcome.is_terminal() {
            trace!(plies = work.move_number() - board.move_number(), ?outcome, "random playout");
            return outcome.winner() == Some(original);
        }
        match work.random_legal_move(color, rng) {
            Move::Place(p) => {
                work.play_move(p, color);
            }
            Move::Pass => return false,
        }
        color = color.opponent();
    }
}

/// Play classifier-selected moves until the game ends.
///
/// At every ply the side to move plays the last move of its best tier.
/// Returns [`WIN_SCORE`] or [`LOSS_SCORE`] at a terminal position, and
/// [`NEUTRAL_SCORE`] as soon as the classifier returns no moves. The
/// classifier only yields board points, so a pass never reaches this loop.
pub fn rule_playout(board: &Board, original: Stone, to_move: Stone) -> f64 {
    let mut work = board.clone();
    let mut color = to_move;
    loop {
        let outcome = work.check_terminal();
        if outcome.is_terminal() {
            trace!(plies = work.move_number() - board.move_number(), ?outcome, "rule playout");
            return if outcome.winner() == Some(original) {
                WIN_SCORE
            } else {
                LOSS_SCORE
            };
        }

        let (_, moves) = classify(&work, color);
        let Some(&mv) = moves.last() else {
            return NEUTRAL_SCORE;
        };
        if !work.play_move(mv, color) {
            return NEUTRAL_SCORE;
        }
        color = color.opponent();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::eval::MoveCategory;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    /// Black to move; (5,5) completes the top row and is the only empty point
    fn forced_win() -> Board {
        Board::from_diagram(&["XXXX.", "OOOOX", "XXOXO", "OOXOO", "XOXOX"]).unwrap()
    }

    /// Black to move; (5,4) and (5,5) are empty and any filling is a draw
    fn two_empty_draw() -> Board {
        Board::from_diagram(&["XXO..", "OOOOX", "XXOXO", "OOXOO", "XOXOX"]).unwrap()
    }

    #[test]
    fn test_forced_win_always_wins() {
        let board = forced_win();
        assert_eq!(board.current_player(), Stone::Black);
        let mut rng = ChaCha8Rng::seed_from_u64(42);

        let wins = (0..200)
            .filter(|_| random_playout(&board, Stone::Black, Stone::Black, &mut rng))
            .count();
        assert_eq!(wins, 200);
    }

    #[test]
    fn test_random_playout_terminal_start() {
        let mut board = forced_win();
        board.play_move(board.pt(5, 5), Stone::Black);
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        assert!(random_playout(&board, Stone::Black, Stone::White, &mut rng));
        assert!(!random_playout(&board, Stone::White, Stone::White, &mut rng));
    }

    #[test]
    fn test_random_playout_draw_is_not_a_win() {
        let board = two_empty_draw();
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        for _ in 0..20 {
            assert!(!random_playout(&board, Stone::Black, Stone::Black, &mut rng));
            assert!(!random_playout(&board, Stone::White, Stone::Black, &mut rng));
        }
    }

    #[test]
    fn test_random_playout_terminates_on_empty_board() {
        let board = Board::new(9).unwrap();
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        for _ in 0..50 {
            // Only checks that it returns
            let _ = random_playout(&board, Stone::Black, Stone::Black, &mut rng);
        }
    }

    #[test]
    fn test_random_playout_leaves_board_untouched() {
        let board = two_empty_draw();
        let before = board.render();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        random_playout(&board, Stone::Black, Stone::Black, &mut rng);
        assert_eq!(board.render(), before);
        assert_eq!(board.move_number(), 0);
    }

    #[test]
    fn test_rule_playout_scores() {
        assert_eq!(rule_playout(&forced_win(), Stone::Black, Stone::Black), WIN_SCORE);
        assert_eq!(rule_playout(&forced_win(), Stone::White, Stone::Black), LOSS_SCORE);
        assert_eq!(rule_playout(&two_empty_draw(), Stone::Black, Stone::Black), LOSS_SCORE);
    }

    #[test]
    fn test_rule_playout_range_from_open_positions() {
        for size in [5, 6] {
            let board = Board::new(size).unwrap();
            for original in [Stone::Black, Stone::White] {
                let score = rule_playout(&board, original, Stone::Black);
                assert!(
                    [LOSS_SCORE, NEUTRAL_SCORE, WIN_SCORE].contains(&score),
                    "unexpected score {score}"
                );
            }
        }
    }

    #[test]
    fn test_rule_playout_takes_winning_move() {
        // Black four on a roomy board: the classifier's Win tier decides
        let mut board = Board::new(9).unwrap();
        for col in 2..=5 {
            board.play_move(board.pt(5, col), Stone::Black);
        }
        board.play_move(board.pt(1, 1), Stone::White);
        board.play_move(board.pt(9, 9), Stone::White);
        assert_eq!(rule_playout(&board, Stone::Black, Stone::Black), WIN_SCORE);
    }

    /// Black to move with (1,5), (2,2) and (5,5) empty. (5,5) sits on the
    /// unfinished column and diagonal, so only it makes a double four.
    fn double_four_last() -> Board {
        Board::from_diagram(&["XOOX.", "OXOXX", "XOXOX", "O.OOX", "XOXO."]).unwrap()
    }

    #[test]
    fn test_rule_playout_plays_last_move_of_tier() {
        let board = double_four_last();
        let (a, b, c) = (board.pt(1, 5), board.pt(2, 2), board.pt(5, 5));
        assert_eq!(classify(&board, Stone::Black), (MoveCategory::None, vec![a, b, c]));

        // The last candidate forks; White can block only one of the two fives
        let mut forked = board.clone();
        forked.play_move(c, Stone::Black);
        assert_eq!(classify(&forked, Stone::White), (MoveCategory::BlockWin, vec![a, b]));
        assert_eq!(rule_playout(&board, Stone::Black, Stone::Black), WIN_SCORE);
        assert_eq!(rule_playout(&board, Stone::White, Stone::Black), LOSS_SCORE);

        // Starting from the first candidate instead, White blocks and the game is drawn
        let mut early = board.clone();
        early.play_move(a, Stone::Black);
        assert_eq!(classify(&early, Stone::White), (MoveCategory::BlockWin, vec![c]));
        assert_eq!(rule_playout(&early, Stone::Black, Stone::White), LOSS_SCORE);
    }
}
