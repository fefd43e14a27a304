//! Position heuristics for Gomoku
//!
//! This module provides the tactical move classifier used by the
//! rule-guided playouts and the `policy_moves` command.

pub mod classify;

pub use classify::{classify, classify_to_move, scan, Classification, MoveCategory};
