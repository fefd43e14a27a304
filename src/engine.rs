//! Simulation engine tying the evaluator to a game
//!
//! [`SimulationEngine`] answers "what should this color play here?" the way
//! a GTP `genmove` does. A finished game is answered with a pass when the
//! asking color won and a resignation otherwise; an ongoing game goes to the
//! move evaluator with the configured policy.
//!
//! # Example
//!
//! ```
//! use gomoku::{Board, EngineConfig, Reply, SimulationEngine, Stone};
//!
//! let config = EngineConfig {
//!     num_simulations: 2,
//!     seed: Some(1),
//!     ..EngineConfig::default()
//! };
//! let mut engine = SimulationEngine::new(config);
//! let mut board = Board::new(5).unwrap();
//!
//! let result = engine.gen_move(&mut board, Stone::Black).unwrap();
//! println!("Best move: {:?}", result.reply);
//! println!("Policy: {}", result.policy);
//! println!("Time: {}ms", result.time_ms);
//! assert!(matches!(result.reply, Reply::Play(_)));
//! ```

use std::time::Instant;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::info;

use crate::board::{Board, Point, Stone};
use crate::config::EngineConfig;
use crate::search::{Evaluation, MoveEvaluator, Policy, SearchError};

/// What the engine wants to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reply {
    /// Place a stone
    Play(Point),
    /// The game is over and the asking color won
    Pass,
    /// The game is over and the asking color did not win
    Resign,
}

/// Result of a move request with statistics.
#[derive(Debug, Clone)]
pub struct MoveResult {
    pub reply: Reply,
    /// Estimated score of the move, 0.0 for pass and resign
    pub ratio: f64,
    /// Policy that produced the move
    pub policy: Policy,
    /// Time taken in milliseconds
    pub time_ms: u64,
    /// Playouts run for this request
    pub playouts: u64,
}

impl MoveResult {
    #[inline]
    fn finished(reply: Reply, policy: Policy) -> Self {
        Self {
            reply,
            ratio: 0.0,
            policy,
            time_ms: 0,
            playouts: 0,
        }
    }

    #[inline]
    fn from_evaluation(eval: Evaluation, policy: Policy, time_ms: u64, playouts: u64) -> Self {
        Self {
            reply: Reply::Play(eval.best_move),
            ratio: eval.ratio,
            policy,
            time_ms,
            playouts,
        }
    }

    /// The point to play, if the reply places a stone
    #[inline]
    pub fn point(&self) -> Option<Point> {
        match self.reply {
            Reply::Play(p) => Some(p),
            Reply::Pass | Reply::Resign => None,
        }
    }
}

/// Playout-based Gomoku player.
///
/// Owns its configuration, the move evaluator and a seedable RNG, so two
/// engines built from the same seeded config choose the same moves.
#[derive(Debug, Clone)]
pub struct SimulationEngine {
    config: EngineConfig,
    evaluator: MoveEvaluator,
    rng: ChaCha8Rng,
}

impl SimulationEngine {
    /// Create an engine from a configuration
    #[must_use]
    pub fn new(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self {
            evaluator: MoveEvaluator::with_simulations(config.num_simulations),
            config,
            rng,
        }
    }

    /// Player name as reported over GTP
    pub fn name(&self) -> String {
        format!("Simulation Player ({} sim.)", self.evaluator.num_simulations())
    }

    #[inline]
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    #[inline]
    pub fn policy(&self) -> Policy {
        self.config.policy
    }

    /// Switch the scoring policy for later requests
    pub fn set_policy(&mut self, policy: Policy) {
        self.config.policy = policy;
    }

    /// Total playouts since the engine was created
    #[inline]
    pub fn playouts(&self) -> u64 {
        self.evaluator.playouts()
    }

    /// Choose a move for `color` without playing it.
    ///
    /// The board is only borrowed mutably for the scored policy, which
    /// commits and undoes candidates in place; it comes back unchanged in
    /// every case.
    ///
    /// # Errors
    ///
    /// `SearchError::NoLegalMoves` if the game is ongoing but `color` has no
    /// move, which only happens for a non-player color.
    pub fn gen_move(&mut self, board: &mut Board, color: Stone) -> Result<MoveResult, SearchError> {
        let policy = self.config.policy;
        let outcome = board.check_terminal();
        if outcome.is_terminal() {
            let reply = if outcome.winner() == Some(color) {
                Reply::Pass
            } else {
                Reply::Resign
            };
            info!(color = color.name(), ?outcome, ?reply, "game already over");
            return Ok(MoveResult::finished(reply, policy));
        }

        let start = Instant::now();
        let before = self.evaluator.playouts();
        let eval = match policy {
            Policy::Scored => {
                let to_move = board.current_player();
                board.set_current_player(color);
                let eval = self.evaluator.score_candidates(board, &mut self.rng);
                board.set_current_player(to_move);
                eval?
            }
            Policy::Random | Policy::RuleBased => {
                self.evaluator
                    .select_move(board, color, policy, &mut self.rng)?
            }
        };
        let time_ms = start.elapsed().as_millis() as u64;
        let playouts = self.evaluator.playouts() - before;

        info!(
            color = color.name(),
            %policy,
            point = eval.best_move.index(),
            ratio = eval.ratio,
            playouts,
            time_ms,
            "move selected"
        );
        Ok(MoveResult::from_evaluation(eval, policy, time_ms, playouts))
    }
}

impl Default for SimulationEngine {
    fn default() -> Self {
        Self::new(EngineConfig::default())
    }
}
