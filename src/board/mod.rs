//! Board representation for Gomoku

pub mod board;

#[cfg(test)]
mod tests;

// Re-exports
pub use board::{Board, BoardError};

/// Smallest supported board (2x2)
pub const MIN_SIZE: usize = 2;
/// Largest supported board; GTP column letters run out after 25
pub const MAX_SIZE: usize = 25;
/// Default board size for new games
pub const DEFAULT_SIZE: usize = 7;

/// Cell colors
///
/// `Border` only appears in the sentinel ring around the playing area.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stone {
    Empty,
    Black,
    White,
    Border,
}

impl Stone {
    /// Get opponent color
    #[inline]
    pub fn opponent(self) -> Stone {
        match self {
            Stone::Black => Stone::White,
            Stone::White => Stone::Black,
            other => other,
        }
    }

    /// True for the two colors that can move
    #[inline]
    pub fn is_player(self) -> bool {
        matches!(self, Stone::Black | Stone::White)
    }

    pub fn name(self) -> &'static str {
        match self {
            Stone::Black => "black",
            Stone::White => "white",
            Stone::Empty => "empty",
            Stone::Border => "border",
        }
    }
}

/// Index of a cell in the padded board array
///
/// A point encodes `row * (size + 1) + col` with 1-based row and column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point(pub usize);

impl Point {
    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A move: a stone placed on a point, or a pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Move {
    Place(Point),
    Pass,
}

impl Move {
    /// The point played, if any
    #[inline]
    pub fn point(self) -> Option<Point> {
        match self {
            Move::Place(p) => Some(p),
            Move::Pass => None,
        }
    }
}

impl From<Point> for Move {
    fn from(p: Point) -> Self {
        Move::Place(p)
    }
}

/// Game state as seen from outside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    BlackWins,
    WhiteWins,
    Draw,
    Ongoing,
}

impl Outcome {
    #[inline]
    pub fn is_terminal(self) -> bool {
        self != Outcome::Ongoing
    }

    /// Winning color, `None` for draws and unfinished games
    #[inline]
    pub fn winner(self) -> Option<Stone> {
        match self {
            Outcome::BlackWins => Some(Stone::Black),
            Outcome::WhiteWins => Some(Stone::White),
            Outcome::Draw | Outcome::Ongoing => None,
        }
    }
}
