//! Go Text Protocol front-end
//!
//! Lets GoGui-style controllers drive the engine over stdin/stdout.

pub mod connection;
pub mod coords;

use thiserror::Error;

pub use connection::{GtpConnection, Response, COMMANDS};
pub use coords::{format_coord, format_move, parse_color, parse_coord, parse_move};

/// Failures reported to the controller as `? message`
#[derive(Debug, Error)]
pub enum GtpError {
    #[error("{0}")]
    Usage(&'static str),

    #[error("Unknown command")]
    UnknownCommand(String),

    #[error("illegal move: \"{0}\" wrong coordinate")]
    WrongCoordinate(String),

    #[error("illegal board size {0}")]
    BoardSize(String),

    #[error("illegal color \"{0}\"")]
    Color(String),

    #[error("illegal komi {0}")]
    Komi(String),

    #[error(transparent)]
    Board(#[from] crate::board::BoardError),

    #[error(transparent)]
    Search(#[from] crate::search::SearchError),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
}
