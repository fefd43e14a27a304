//! Win condition checking
//!
//! Five or more stones of one color in a horizontal, vertical or diagonal
//! line win. Overlines count.

use crate::board::{Board, Point, Stone};

/// Length of the `color` run through `p` along `dir`, counting `p` itself
/// as `color` whatever it currently holds.
///
/// The border ring stops both scans, so no bounds checks are needed.
#[inline]
pub fn run_length(board: &Board, p: Point, dir: usize, color: Stone) -> usize {
    let (before, after) = run_extent(board, p, dir, color);
    before + after + 1
}

/// Stones of `color` immediately before and after `p` along `dir`
#[inline]
pub(crate) fn run_extent(board: &Board, p: Point, dir: usize, color: Stone) -> (usize, usize) {
    let mut after = 0;
    let mut q = p.index() + dir;
    while board.get(Point(q)) == color {
        after += 1;
        q += dir;
    }

    let mut before = 0;
    let mut q = p.index();
    while let Some(prev) = q.checked_sub(dir) {
        if board.get(Point(prev)) != color {
            break;
        }
        before += 1;
        q = prev;
    }

    (before, after)
}

/// Fast five-in-a-row check at a specific point.
///
/// Only checks the four lines through `p`. No allocation.
#[inline]
pub fn has_five_at(board: &Board, p: Point, color: Stone) -> bool {
    board
        .directions()
        .iter()
        .any(|&dir| run_length(board, p, dir, color) >= 5)
}

/// Stones of the five-or-longer line through `p`, in ascending order
pub fn winning_line(board: &Board, p: Point) -> Option<Vec<Point>> {
    let color = board.get(p);
    if !color.is_player() {
        return None;
    }
    board.directions().iter().find_map(|&dir| {
        let (before, after) = run_extent(board, p, dir, color);
        if before + after + 1 < 5 {
            return None;
        }
        let start = p.index() - before * dir;
        Some((0..=before + after).map(|i| Point(start + i * dir)).collect())
    })
}
