//! Tactical pattern counts
//!
//! The classifier never looks at these numbers in isolation; it compares a
//! count before and after a candidate move. The definitions:
//!
//! - block-win count of `c`: empty points where the opponent of `c` would
//!   complete five
//! - open-four count of `c`: runs of exactly four `c` stones with both end
//!   cells empty
//! - block-open-four count of `c`: empty points where the opponent of `c`
//!   would create an open four

use crate::board::{Board, Point, Stone};

use super::win::{has_five_at, run_extent};

/// Number of empty points where the opponent of `color` completes five
pub fn count_block_win(board: &Board, color: Stone) -> usize {
    let opponent = color.opponent();
    board
        .empty_points()
        .into_iter()
        .filter(|&p| has_five_at(board, p, opponent))
        .count()
}

/// Number of open fours (`_XXXX_`) belonging to `color`
pub fn count_open_four(board: &Board, color: Stone) -> usize {
    let dirs = board.directions();
    let first = board.stride() + 1;
    let last = board.pt(board.size(), board.size()).index();

    let mut count = 0;
    for idx in first..=last {
        if board.get(Point(idx)) != color {
            continue;
        }
        for &dir in &dirs {
            // Only measure from the start of a run so each run is seen once
            if board.get(Point(idx - dir)) == color {
                continue;
            }
            let mut end = idx;
            while board.get(Point(end + dir)) == color {
                end += dir;
            }
            let len = (end - idx) / dir + 1;
            if len == 4
                && board.get(Point(idx - dir)) == Stone::Empty
                && board.get(Point(end + dir)) == Stone::Empty
            {
                count += 1;
            }
        }
    }
    count
}

/// True if `color` playing on `p` would form an open four through `p`
pub fn makes_open_four(board: &Board, p: Point, color: Stone) -> bool {
    board.directions().iter().any(|&dir| {
        let (before, after) = run_extent(board, p, dir, color);
        if before + after + 1 != 4 {
            return false;
        }
        let low = p.index() - (before + 1) * dir;
        let high = p.index() + (after + 1) * dir;
        board.get(Point(low)) == Stone::Empty && board.get(Point(high)) == Stone::Empty
    })
}

/// Number of empty points where the opponent of `color` makes an open four
pub fn count_block_open_four(board: &Board, color: Stone) -> usize {
    let opponent = color.opponent();
    board
        .empty_points()
        .into_iter()
        .filter(|&p| makes_open_four(board, p, opponent))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board7() -> Board {
        Board::new(7).unwrap()
    }

    fn place(board: &mut Board, cells: &[(usize, usize)], color: Stone) {
        for &(r, c) in cells {
            let p = board.pt(r, c);
            assert!(board.play_move(p, color));
        }
    }

    #[test]
    fn test_block_win_counts_opponent_fives() {
        let mut board = board7();
        // Open four for White: both ends complete five
        place(&mut board, &[(3, 2), (3, 3), (3, 4), (3, 5)], Stone::White);
        assert_eq!(count_block_win(&board, Stone::Black), 2);
        assert_eq!(count_block_win(&board, Stone::White), 0);

        place(&mut board, &[(3, 1)], Stone::Black);
        assert_eq!(count_block_win(&board, Stone::Black), 1);
    }

    #[test]
    fn test_block_win_gapped_four() {
        let mut board = board7();
        place(&mut board, &[(2, 1), (2, 2), (2, 4), (2, 5)], Stone::Black);
        assert_eq!(count_block_win(&board, Stone::White), 1);
    }

    #[test]
    fn test_open_four_needs_both_ends_empty() {
        let mut board = board7();
        place(&mut board, &[(4, 2), (4, 3), (4, 4), (4, 5)], Stone::Black);
        assert_eq!(count_open_four(&board, Stone::Black), 1);
        assert_eq!(count_open_four(&board, Stone::White), 0);

        place(&mut board, &[(4, 6)], Stone::White);
        assert_eq!(count_open_four(&board, Stone::Black), 0);
    }

    #[test]
    fn test_open_four_at_edge_is_closed() {
        let mut board = board7();
        place(&mut board, &[(1, 1), (2, 1), (3, 1), (4, 1)], Stone::White);
        assert_eq!(count_open_four(&board, Stone::White), 0);
    }

    #[test]
    fn test_open_four_diagonal() {
        let mut board = board7();
        place(&mut board, &[(2, 2), (3, 3), (4, 4), (5, 5)], Stone::White);
        assert_eq!(count_open_four(&board, Stone::White), 1);

        let mut board = board7();
        place(&mut board, &[(2, 6), (3, 5), (4, 4), (5, 3)], Stone::Black);
        assert_eq!(count_open_four(&board, Stone::Black), 1);
    }

    #[test]
    fn test_five_is_not_an_open_four() {
        let mut board = board7();
        place(&mut board, &[(4, 2), (4, 3), (4, 4), (4, 5), (4, 6)], Stone::Black);
        assert_eq!(count_open_four(&board, Stone::Black), 0);
    }

    #[test]
    fn test_makes_open_four() {
        let mut board = board7();
        place(&mut board, &[(3, 2), (3, 3), (3, 4)], Stone::White);
        assert!(makes_open_four(&board, board.pt(3, 5), Stone::White));
        // Left end would be the border column
        assert!(!makes_open_four(&board, board.pt(3, 1), Stone::White));
        assert!(!makes_open_four(&board, board.pt(3, 5), Stone::Black));
    }

    #[test]
    fn test_block_open_four_count() {
        let mut board = board7();
        place(&mut board, &[(3, 2), (3, 3), (3, 4)], Stone::White);
        assert_eq!(count_block_open_four(&board, Stone::Black), 1);

        place(&mut board, &[(3, 6)], Stone::Black);
        assert_eq!(count_block_open_four(&board, Stone::Black), 0);
    }
}
