//! Game rules for freestyle Gomoku
//!
//! - Win conditions: five or more stones in a row
//! - Tactical pattern counts used by the move classifier

pub mod threats;
pub mod win;

// Re-exports for convenient access
pub use threats::{count_block_open_four, count_block_win, count_open_four, makes_open_four};
pub use win::{has_five_at, run_length, winning_line};
