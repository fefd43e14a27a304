//! Heuristic move classifier
//!
//! Ranks the legal moves of a position into priority tiers by probing every
//! candidate on a private copy of the board:
//!
//! 1. **Win**: the move completes five
//! 2. **BlockWin**: the move removes an opponent winning point
//! 3. **OpenFour**: the move creates an open four
//! 4. **BlockOpenFour**: the move removes an opponent open-four point
//!
//! The scan is a single pass in candidate order with sticky flags. Once a
//! tier has been found, candidates visited later are no longer tested for
//! the tiers below it, so the lower lists only hold moves seen before the
//! first hit of a higher tier. Every candidate is still tested for a win.

use std::fmt;

use tracing::trace;

use crate::board::{Board, Point, Stone};
use crate::rules::{count_block_open_four, count_block_win, count_open_four};

/// Priority tier of a move, best first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MoveCategory {
    Win,
    BlockWin,
    OpenFour,
    BlockOpenFour,
    /// No tactical preference; the move list is every candidate
    None,
}

impl fmt::Display for MoveCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            MoveCategory::Win => "Win",
            MoveCategory::BlockWin => "BlockWin",
            MoveCategory::OpenFour => "OpenFour",
            MoveCategory::BlockOpenFour => "BlockOpenFour",
            MoveCategory::None => "None",
        };
        f.write_str(name)
    }
}

/// Sticky flags carried through the scan. Never cleared once set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct ScanFlags {
    win: bool,
    block_win: bool,
    open_four: bool,
    block_open_four: bool,
}

/// Pattern counts of the unmodified position
#[derive(Debug, Clone, Copy)]
struct Baseline {
    block_win: usize,
    open_four: usize,
    block_open_four: usize,
}

/// Full result of a classification scan
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Classification {
    pub win: Vec<Point>,
    pub block_win: Vec<Point>,
    pub open_four: Vec<Point>,
    pub block_open_four: Vec<Point>,
    /// Every legal move, in scan order
    pub candidates: Vec<Point>,
    flags: ScanFlags,
}

impl Classification {
    /// Highest non-empty tier
    pub fn category(&self) -> MoveCategory {
        if self.flags.win {
            MoveCategory::Win
        } else if self.flags.block_win {
            MoveCategory::BlockWin
        } else if self.flags.open_four {
            MoveCategory::OpenFour
        } else if self.flags.block_open_four {
            MoveCategory::BlockOpenFour
        } else {
            MoveCategory::None
        }
    }

    /// Moves of the highest tier, or all candidates when no tier was hit
    pub fn moves(&self) -> &[Point] {
        match self.category() {
            MoveCategory::Win => &self.win,
            MoveCategory::BlockWin => &self.block_win,
            MoveCategory::OpenFour => &self.open_four,
            MoveCategory::BlockOpenFour => &self.block_open_four,
            MoveCategory::None => &self.candidates,
        }
    }

    /// Consume into the `(category, moves)` pair
    pub fn into_verdict(mut self) -> (MoveCategory, Vec<Point>) {
        let category = self.category();
        let moves = match category {
            MoveCategory::Win => self.win,
            MoveCategory::BlockWin => self.block_win,
            MoveCategory::OpenFour => self.open_four,
            MoveCategory::BlockOpenFour => self.block_open_four,
            MoveCategory::None => std::mem::take(&mut self.candidates),
        };
        (category, moves)
    }

    /// Probe one candidate, gating each test on the flags as they stand now
    fn visit(mut self, board: &Board, color: Stone, base: &Baseline, mv: Point) -> Self {
        self.candidates.push(mv);

        let mut probe = board.clone();
        if !probe.play_move(mv, color) {
            return self;
        }

        if probe.check_terminal().winner() == Some(color) {
            self.win.push(mv);
            self.flags.win = true;
        }

        if !self.flags.win && count_block_win(&probe, color) < base.block_win {
            self.block_win.push(mv);
            self.flags.block_win = true;
        }

        if !self.flags.win
            && !self.flags.block_win
            && count_open_four(&probe, color) > base.open_four
        {
            self.open_four.push(mv);
            self.flags.open_four = true;
        }

        if !self.flags.win
            && !self.flags.block_win
            && !self.flags.open_four
            && count_block_open_four(&probe, color) < base.block_open_four
        {
            self.block_open_four.push(mv);
            self.flags.block_open_four = true;
        }

        self
    }
}

/// Run the full scan for `color` and keep every tier's list
pub fn scan(board: &Board, color: Stone) -> Classification {
    let candidates = board.legal_moves(color);
    if candidates.is_empty() {
        return Classification::default();
    }

    let base = Baseline {
        block_win: count_block_win(board, color),
        open_four: count_open_four(board, color),
        block_open_four: count_block_open_four(board, color),
    };

    let result = candidates
        .into_iter()
        .fold(Classification::default(), |acc, mv| {
            acc.visit(board, color, &base, mv)
        });

    trace!(
        color = color.name(),
        category = %result.category(),
        moves = result.moves().len(),
        "classified position"
    );
    result
}

/// Classify the moves of `color`.
///
/// Returns the best tier and its moves. With no legal moves at all the
/// result is `(MoveCategory::None, [])`, which callers map to pass/resign.
///
/// # Example
///
/// ```
/// use gomoku::board::{Board, Stone};
/// use gomoku::eval::{classify, MoveCategory};
///
/// let mut board = Board::new(7).unwrap();
/// for col in 1..=4 {
///     board.play_move(board.pt(4, col), Stone::Black);
/// }
/// let (category, moves) = classify(&board, Stone::Black);
/// assert_eq!(category, MoveCategory::Win);
/// assert_eq!(moves, vec![board.pt(4, 5)]);
/// ```
pub fn classify(board: &Board, color: Stone) -> (MoveCategory, Vec<Point>) {
    scan(board, color).into_verdict()
}

/// Classify for the side to move
pub fn classify_to_move(board: &Board) -> (MoveCategory, Vec<Point>) {
    classify(board, board.current_player())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn place(board: &mut Board, cells: &[(usize, usize)], color: Stone) {
        for &(r, c) in cells {
            let p = board.pt(r, c);
            assert!(board.play_move(p, color));
        }
    }

    #[test]
    fn test_category_order() {
        assert!(MoveCategory::Win < MoveCategory::BlockWin);
        assert!(MoveCategory::BlockWin < MoveCategory::OpenFour);
        assert!(MoveCategory::OpenFour < MoveCategory::BlockOpenFour);
        assert!(MoveCategory::BlockOpenFour < MoveCategory::None);
    }

    #[test]
    fn test_immediate_win_four_open_one_end() {
        let mut board = Board::new(7).unwrap();
        place(&mut board, &[(4, 1), (4, 2), (4, 3), (4, 4)], Stone::Black);
        place(&mut board, &[(1, 7), (2, 7), (7, 7)], Stone::White);

        let (category, moves) = classify(&board, Stone::Black);
        assert_eq!(category, MoveCategory::Win);
        assert_eq!(moves, vec![board.pt(4, 5)]);
    }

    #[test]
    fn test_every_winning_move_is_collected() {
        let mut board = Board::new(7).unwrap();
        place(&mut board, &[(4, 2), (4, 3), (4, 4), (4, 5)], Stone::Black);

        let (category, moves) = classify(&board, Stone::Black);
        assert_eq!(category, MoveCategory::Win);
        assert_eq!(moves, vec![board.pt(4, 1), board.pt(4, 6)]);
    }

    #[test]
    fn test_block_open_four_threat() {
        let mut board = Board::new(7).unwrap();
        place(&mut board, &[(3, 2), (3, 3), (3, 4), (3, 5)], Stone::White);
        board.set_current_player(Stone::Black);

        let (category, moves) = classify_to_move(&board);
        assert_eq!(category, MoveCategory::BlockWin);
        assert_eq!(moves, vec![board.pt(3, 1), board.pt(3, 6)]);
    }

    #[test]
    fn test_open_four_created() {
        let mut board = Board::new(7).unwrap();
        place(&mut board, &[(3, 2), (3, 3), (3, 4)], Stone::Black);

        let (category, moves) = classify(&board, Stone::Black);
        assert_eq!(category, MoveCategory::OpenFour);
        assert_eq!(moves, vec![board.pt(3, 5)]);
    }

    #[test]
    fn test_block_open_four() {
        let mut board = Board::new(7).unwrap();
        place(&mut board, &[(3, 2), (3, 3), (3, 4)], Stone::White);

        let (category, moves) = classify(&board, Stone::Black);
        assert_eq!(category, MoveCategory::BlockOpenFour);
        assert_eq!(moves, vec![board.pt(3, 1), board.pt(3, 5), board.pt(3, 6)]);
    }

    #[test]
    fn test_no_preference_returns_all_candidates() {
        let mut board = Board::new(5).unwrap();
        place(&mut board, &[(3, 3)], Stone::Black);

        let (category, moves) = classify(&board, Stone::White);
        assert_eq!(category, MoveCategory::None);
        assert_eq!(moves, board.legal_moves(Stone::White));
        assert_eq!(moves.len(), 24);
    }

    #[test]
    fn test_full_board_has_no_candidates() {
        let board = Board::from_diagram(&["XXOOX", "OOOOX", "XXOXO", "OOXOO", "XOXOX"]).unwrap();
        let (category, moves) = classify(&board, Stone::Black);
        assert_eq!(category, MoveCategory::None);
        assert!(moves.is_empty());
    }

    #[test]
    fn test_win_found_first_hides_later_block_win() {
        // Black's winning point (1,5) is scanned before the block at (5,5)
        let mut board = Board::new(9).unwrap();
        place(&mut board, &[(1, 1), (1, 2), (1, 3), (1, 4)], Stone::Black);
        place(&mut board, &[(5, 1), (5, 2), (5, 3), (5, 4)], Stone::White);

        let result = scan(&board, Stone::Black);
        assert_eq!(result.category(), MoveCategory::Win);
        assert_eq!(result.win, vec![board.pt(1, 5)]);
        assert!(!result.block_win.contains(&board.pt(5, 5)));
        assert!(result.block_win.is_empty());
    }

    #[test]
    fn test_block_win_seen_before_win_is_kept() {
        // Mirror image: the block at (1,5) is scanned before the win at (5,5)
        let mut board = Board::new(9).unwrap();
        place(&mut board, &[(1, 1), (1, 2), (1, 3), (1, 4)], Stone::White);
        place(&mut board, &[(5, 1), (5, 2), (5, 3), (5, 4)], Stone::Black);

        let result = scan(&board, Stone::Black);
        assert_eq!(result.block_win, vec![board.pt(1, 5)]);
        assert_eq!(result.win, vec![board.pt(5, 5)]);

        let (category, moves) = result.into_verdict();
        assert_eq!(category, MoveCategory::Win);
        assert_eq!(moves, vec![board.pt(5, 5)]);
    }

    #[test]
    fn test_classify_leaves_board_untouched() {
        let mut board = Board::new(7).unwrap();
        place(&mut board, &[(3, 2), (3, 3), (3, 4)], Stone::White);
        let before = board.render();
        let moves_before = board.move_number();

        let _ = classify(&board, Stone::Black);
        assert_eq!(board.render(), before);
        assert_eq!(board.move_number(), moves_before);
    }
}
