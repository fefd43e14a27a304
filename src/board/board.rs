//! Board structure with move history
//!
//! The grid is stored as a one-dimensional array padded with a ring of
//! `Stone::Border` cells, so line scans stop at the edge without bounds
//! checks. Rows share a single border column: stepping right from the last
//! column lands on the next row's border cell.

use rand::seq::SliceRandom;
use rand::Rng;
use thiserror::Error;

use super::{Move, Outcome, Point, Stone, MAX_SIZE, MIN_SIZE};
use crate::rules::has_five_at;

/// Errors raised when building or editing a board
#[derive(Debug, Error, PartialEq, Eq)]
pub enum BoardError {
    #[error("board size {0} out of range (2..=25)")]
    InvalidSize(usize),

    #[error("diagram has {rows} rows of widths {widths:?}, expected a square")]
    MalformedDiagram { rows: usize, widths: Vec<usize> },

    #[error("unexpected character {0:?} in diagram")]
    BadCell(char),
}

/// Record of a move for undo
#[derive(Debug, Clone, Copy)]
struct MoveRecord {
    mv: Move,
    color: Stone,
    /// Winner before this move was played
    prev_winner: Option<Stone>,
}

/// Game board
#[derive(Debug, Clone)]
pub struct Board {
    size: usize,
    /// Row stride: `size + 1` (one shared border column)
    ns: usize,
    cells: Vec<Stone>,
    current_player: Stone,
    empty_count: usize,
    /// First color to complete five; sticky until undone
    winner: Option<Stone>,
    history: Vec<MoveRecord>,
}

impl Board {
    /// Create an empty board with Black to move
    pub fn new(size: usize) -> Result<Self, BoardError> {
        if !(MIN_SIZE..=MAX_SIZE).contains(&size) {
            return Err(BoardError::InvalidSize(size));
        }
        let ns = size + 1;
        let mut cells = vec![Stone::Border; (size + 2) * ns + 1];
        for row in 1..=size {
            let start = row * ns + 1;
            cells[start..start + size].fill(Stone::Empty);
        }
        Ok(Self {
            size,
            ns,
            cells,
            current_player: Stone::Black,
            empty_count: size * size,
            winner: None,
            history: Vec::with_capacity(size * size),
        })
    }

    /// Build a board from rows of `X` (black), `O` (white) and `.` (empty).
    ///
    /// The first row is the top of the board (row `size`), matching
    /// [`Board::render`]. Black is to move when it has no more stones than
    /// White. Stones are placed without history, so the diagram is the
    /// starting position for undo purposes.
    pub fn from_diagram(rows: &[&str]) -> Result<Self, BoardError> {
        let widths: Vec<usize> = rows.iter().map(|r| r.chars().count()).collect();
        if widths.iter().any(|&w| w != rows.len()) {
            return Err(BoardError::MalformedDiagram {
                rows: rows.len(),
                widths,
            });
        }
        let mut board = Self::new(rows.len())?;
        let (mut black, mut white) = (0usize, 0usize);
        for (i, line) in rows.iter().enumerate() {
            let row = board.size - i;
            for (j, ch) in line.chars().enumerate() {
                let stone = match ch {
                    'X' | 'x' => Stone::Black,
                    'O' | 'o' => Stone::White,
                    '.' => continue,
                    other => return Err(BoardError::BadCell(other)),
                };
                match stone {
                    Stone::Black => black += 1,
                    _ => white += 1,
                }
                let p = board.pt(row, j + 1);
                board.set_stone(p, stone);
            }
        }
        board.winner = board.find_winner();
        board.current_player = if black <= white {
            Stone::Black
        } else {
            Stone::White
        };
        Ok(board)
    }

    /// Clear the board, possibly changing its size
    pub fn reset(&mut self, size: usize) -> Result<(), BoardError> {
        *self = Self::new(size)?;
        Ok(())
    }

    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Row stride of the padded array
    #[inline]
    pub fn stride(&self) -> usize {
        self.ns
    }

    /// Line directions: horizontal, vertical and the two diagonals
    #[inline]
    pub fn directions(&self) -> [usize; 4] {
        [1, self.ns, self.ns + 1, self.ns - 1]
    }

    /// Point for a 1-based (row, col) pair
    #[inline]
    pub fn pt(&self, row: usize, col: usize) -> Point {
        debug_assert!((1..=self.size).contains(&row) && (1..=self.size).contains(&col));
        Point(row * self.ns + col)
    }

    /// 1-based (row, col) of a point
    #[inline]
    pub fn coord(&self, p: Point) -> (usize, usize) {
        (p.0 / self.ns, p.0 % self.ns)
    }

    /// True if the point lies in the playing area
    #[inline]
    pub fn on_board(&self, p: Point) -> bool {
        matches!(self.cells.get(p.0), Some(s) if *s != Stone::Border)
    }

    /// Stone at a point; anything outside the array reads as border
    #[inline]
    pub fn get(&self, p: Point) -> Stone {
        self.cells.get(p.0).copied().unwrap_or(Stone::Border)
    }

    #[inline]
    pub fn current_player(&self) -> Stone {
        self.current_player
    }

    #[inline]
    pub fn set_current_player(&mut self, color: Stone) {
        if color.is_player() {
            self.current_player = color;
        }
    }

    /// Legal targets are empty on-board points; color must be Black or White
    #[inline]
    pub fn is_legal(&self, p: Point, color: Stone) -> bool {
        color.is_player() && self.get(p) == Stone::Empty
    }

    /// Play a stone for `color`.
    ///
    /// Returns false (and leaves the board untouched) if the point is
    /// occupied, off the board, or `color` is not a player.
    pub fn play_move(&mut self, p: Point, color: Stone) -> bool {
        if !self.is_legal(p, color) {
            return false;
        }
        let prev_winner = self.winner;
        self.set_stone(p, color);
        if self.winner.is_none() && has_five_at(self, p, color) {
            self.winner = Some(color);
        }
        self.history.push(MoveRecord {
            mv: Move::Place(p),
            color,
            prev_winner,
        });
        self.current_player = color.opponent();
        true
    }

    /// Pass for `color`, handing the move to the opponent
    pub fn pass(&mut self, color: Stone) {
        self.history.push(MoveRecord {
            mv: Move::Pass,
            color,
            prev_winner: self.winner,
        });
        self.current_player = color.opponent();
    }

    /// Play either kind of move
    pub fn apply(&mut self, mv: Move, color: Stone) -> bool {
        match mv {
            Move::Place(p) => self.play_move(p, color),
            Move::Pass => {
                self.pass(color);
                true
            }
        }
    }

    /// Number of moves (including passes) played since the last reset
    #[inline]
    pub fn move_number(&self) -> usize {
        self.history.len()
    }

    /// Most recent move, if any
    pub fn last_move(&self) -> Option<(Move, Stone)> {
        self.history.last().map(|r| (r.mv, r.color))
    }

    /// Take back the most recent move. Returns it, or `None` at the start.
    pub fn undo_move(&mut self) -> Option<Move> {
        let record = self.history.pop()?;
        if let Move::Place(p) = record.mv {
            self.cells[p.0] = Stone::Empty;
            self.empty_count += 1;
        }
        self.winner = record.prev_winner;
        self.current_player = record.color;
        Some(record.mv)
    }

    /// Undo moves until exactly `move_number` remain
    pub fn reset_to_move_number(&mut self, move_number: usize) {
        while self.history.len() > move_number {
            self.undo_move();
        }
    }

    /// Game state: a completed five wins, a full board without one draws
    pub fn check_terminal(&self) -> Outcome {
        match self.winner {
            Some(Stone::Black) => Outcome::BlackWins,
            Some(Stone::White) => Outcome::WhiteWins,
            _ if self.empty_count == 0 => Outcome::Draw,
            _ => Outcome::Ongoing,
        }
    }

    /// Convenience for `check_terminal().is_terminal()`
    #[inline]
    pub fn is_game_over(&self) -> bool {
        self.check_terminal().is_terminal()
    }

    #[inline]
    pub fn winner(&self) -> Option<Stone> {
        self.winner
    }

    /// All empty points in ascending order
    pub fn empty_points(&self) -> Vec<Point> {
        (self.ns + 1..self.cells.len())
            .filter(|&i| self.cells[i] == Stone::Empty)
            .map(Point)
            .collect()
    }

    #[inline]
    pub fn empty_count(&self) -> usize {
        self.empty_count
    }

    /// Legal moves for `color` in ascending point order.
    ///
    /// This order is the candidate order everywhere in the engine, so it
    /// decides ties.
    pub fn legal_moves(&self, color: Stone) -> Vec<Point> {
        if !color.is_player() {
            return Vec::new();
        }
        self.empty_points()
    }

    /// Uniformly random legal move for `color`, or `Move::Pass` if none
    pub fn random_legal_move<R: Rng + ?Sized>(&self, color: Stone, rng: &mut R) -> Move {
        self.legal_moves(color)
            .choose(rng)
            .map_or(Move::Pass, |&p| Move::Place(p))
    }

    /// Play uniformly random moves for the side to move until the game ends.
    ///
    /// Returns the winner, or `Stone::Empty` for a draw. The moves stay on
    /// the board; use [`Board::reset_to_move_number`] to take them back.
    pub fn simulate<R: Rng + ?Sized>(&mut self, rng: &mut R) -> Stone {
        loop {
            match self.check_terminal() {
                Outcome::BlackWins => return Stone::Black,
                Outcome::WhiteWins => return Stone::White,
                Outcome::Draw => return Stone::Empty,
                Outcome::Ongoing => {}
            }
            let color = self.current_player;
            match self.random_legal_move(color, rng) {
                Move::Place(p) => {
                    self.play_move(p, color);
                }
                // unreachable while the game is ongoing: an empty point exists
                Move::Pass => return Stone::Empty,
            }
        }
    }

    /// Rows from top (row `size`) to bottom, `X`/`O`/`.` per cell
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.size * (self.size + 1));
        for row in (1..=self.size).rev() {
            for col in 1..=self.size {
                out.push(match self.get(self.pt(row, col)) {
                    Stone::Black => 'X',
                    Stone::White => 'O',
                    _ => '.',
                });
            }
            out.push('\n');
        }
        out
    }

    /// Full scan for a five; only needed when stones bypass `play_move`
    fn find_winner(&self) -> Option<Stone> {
        (self.ns + 1..self.cells.len())
            .map(Point)
            .find(|&p| {
                let s = self.get(p);
                s.is_player() && has_five_at(self, p, s)
            })
            .map(|p| self.get(p))
    }

    fn set_stone(&mut self, p: Point, stone: Stone) {
        debug_assert_eq!(self.cells[p.0], Stone::Empty);
        self.cells[p.0] = stone;
        self.empty_count -= 1;
    }
}
