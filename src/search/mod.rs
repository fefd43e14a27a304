//! Search module for Gomoku AI
//!
//! Contains:
//! - Random and rule-guided playouts
//! - The root move evaluator with its three scoring policies

pub mod evaluator;
pub mod playout;

pub use evaluator::{Evaluation, MoveEvaluator, Policy, SearchError, DEFAULT_SIMULATIONS};
pub use playout::{random_playout, rule_playout, LOSS_SCORE, NEUTRAL_SCORE, WIN_SCORE};
