//! GTP coordinates and colors
//!
//! Columns are letters `A` to `Z` without `I`; rows are numbered from 1 at
//! the bottom. Input is case-insensitive, output is upper case.

use crate::board::{Board, Move, Stone, MAX_SIZE, MIN_SIZE};

use super::GtpError;

const COLUMN_LETTERS: &[u8] = b"ABCDEFGHJKLMNOPQRSTUVWXYZ";

/// Parse `b`/`w` (either case)
pub fn parse_color(s: &str) -> Option<Stone> {
    match s.to_ascii_lowercase().as_str() {
        "b" => Some(Stone::Black),
        "w" => Some(Stone::White),
        _ => None,
    }
}

/// Format a (row, col) pair, e.g. `(2, 9)` as `J2`
pub fn format_coord(row: usize, col: usize) -> String {
    let letter = COLUMN_LETTERS.get(col.wrapping_sub(1)).copied().unwrap_or(b'?');
    format!("{}{}", letter as char, row)
}

/// Format a move on `board`
pub fn format_move(board: &Board, mv: Move) -> String {
    match mv {
        Move::Place(p) => {
            let (row, col) = board.coord(p);
            format_coord(row, col)
        }
        Move::Pass => "pass".to_string(),
    }
}

/// Parse a GTP vertex into a 1-based (row, col) pair; `None` means pass.
pub fn parse_coord(s: &str, board_size: usize) -> Result<Option<(usize, usize)>, GtpError> {
    if !(MIN_SIZE..=MAX_SIZE).contains(&board_size) {
        return Err(GtpError::BoardSize(board_size.to_string()));
    }
    let s = s.to_ascii_lowercase();
    if s == "pass" {
        return Ok(None);
    }
    let wrong = || GtpError::WrongCoordinate(s.clone());

    let mut chars = s.chars();
    let letter = chars.next().ok_or_else(wrong)?;
    if !letter.is_ascii_lowercase() || letter == 'i' {
        return Err(wrong());
    }
    let mut col = (letter as u8 - b'a') as usize;
    if letter < 'i' {
        col += 1;
    }
    let row: usize = chars.as_str().parse().map_err(|_| wrong())?;
    if row < 1 || row > board_size || col > board_size {
        return Err(wrong());
    }
    Ok(Some((row, col)))
}

/// Parse a GTP vertex into a move on `board`
pub fn parse_move(s: &str, board: &Board) -> Result<Move, GtpError> {
    Ok(match parse_coord(s, board.size())? {
        Some((row, col)) => Move::Place(board.pt(row, col)),
        None => Move::Pass,
    })
}
