//! Simulation-based Gomoku player
//!
//! Chooses moves on an N x N free-style Gomoku board (five or more in a row
//! wins, overlines allowed) by scoring every legal move with playouts:
//! - random playouts, scored by win ratio
//! - rule-guided playouts, where each side plays the best move of a
//!   tactical classifier (win, block a win, make an open four, block an
//!   open four)
//! - scored self-play on the live board, rewound after every trial
//!
//! # Architecture
//!
//! - [`board`]: padded board with move history and undo
//! - [`rules`]: five detection and tactical pattern counts
//! - [`eval`]: the heuristic move classifier
//! - [`search`]: playouts and the root move evaluator
//! - [`engine`]: engine facade answering move requests
//! - [`config`], [`logging`]: ambient setup shared by the binaries
//! - [`gtp`]: Go Text Protocol front-end
//! - [`ui`]: desktop GUI
//!
//! # Quick Start
//!
//! ```
//! use gomoku::{Board, EngineConfig, SimulationEngine, Stone};
//!
//! let mut board = Board::new(7).unwrap();
//! board.play_move(board.pt(4, 4), Stone::Black);
//!
//! let config = EngineConfig { num_simulations: 2, seed: Some(3), ..Default::default() };
//! let mut engine = SimulationEngine::new(config);
//! let result = engine.gen_move(&mut board, Stone::White).unwrap();
//! if let Some(p) = result.point() {
//!     board.play_move(p, Stone::White);
//! }
//! assert_eq!(board.move_number(), 2);
//! ```

pub mod board;
pub mod config;
pub mod engine;
pub mod eval;
pub mod gtp;
pub mod logging;
pub mod rules;
pub mod search;
pub mod ui;

// Re-export commonly used types for convenience
pub use board::{Board, Move, Outcome, Point, Stone};
pub use config::EngineConfig;
pub use engine::{MoveResult, Reply, SimulationEngine};
pub use eval::{classify, MoveCategory};
pub use search::{MoveEvaluator, Policy};
