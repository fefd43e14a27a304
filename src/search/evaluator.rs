//! Root move selection by playout statistics
//!
//! Every legal move at the root is scored by running a fixed number of
//! playouts after committing it, and the best-scoring move is chosen.
//! Candidates are visited in board order; a later candidate replaces the
//! current best only with a strictly greater ratio, so ties go to the
//! earliest candidate.
//!
//! # Example
//!
//! ```
//! use gomoku::board::{Board, Stone};
//! use gomoku::search::{MoveEvaluator, Policy};
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! let board = Board::new(5).unwrap();
//! let mut evaluator = MoveEvaluator::with_simulations(2);
//! let mut rng = ChaCha8Rng::seed_from_u64(7);
//!
//! let eval = evaluator
//!     .select_move(&board, Stone::Black, Policy::Random, &mut rng)
//!     .unwrap();
//! assert!(board.is_legal(eval.best_move, Stone::Black));
//! ```

use std::fmt;
use std::str::FromStr;

use rand::Rng;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::board::{Board, Outcome, Point, Stone};

use super::playout::{random_playout, rule_playout};

/// Playouts per candidate unless configured otherwise
pub const DEFAULT_SIMULATIONS: u32 = 10;

/// How candidate moves are scored
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Win ratio of uniformly random playouts
    #[default]
    Random,
    /// Mean score of classifier-guided playouts
    RuleBased,
    /// Random self-play on the live board, rewound after every trial
    Scored,
}

impl Policy {
    pub fn as_str(self) -> &'static str {
        match self {
            Policy::Random => "random",
            Policy::RuleBased => "rule_based",
            Policy::Scored => "scored",
        }
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = SearchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Policy::Random),
            "rule_based" => Ok(Policy::RuleBased),
            "scored" => Ok(Policy::Scored),
            other => Err(SearchError::UnknownPolicy(other.to_string())),
        }
    }
}

/// Errors that can occur during move selection
#[derive(Debug, Error, PartialEq)]
pub enum SearchError {
    #[error("game is already over ({0:?})")]
    GameOver(Outcome),

    #[error("no legal moves available")]
    NoLegalMoves,

    #[error("illegal candidate move {0:?}")]
    IllegalMove(Point),

    #[error("unknown policy {0:?}")]
    UnknownPolicy(String),
}

/// Result of scoring every root candidate
#[derive(Debug, Clone, PartialEq)]
pub struct Evaluation {
    /// Chosen move
    pub best_move: Point,
    /// Its estimated score in [0, 1]
    pub ratio: f64,
    /// Number of root candidates scored
    pub candidates: usize,
}

/// Outcome counts of the scored variant's trials
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
struct Tally {
    black: u32,
    white: u32,
    draws: u32,
}

impl Tally {
    fn record(&mut self, winner: Stone) {
        match winner {
            Stone::Black => self.black += 1,
            Stone::White => self.white += 1,
            _ => self.draws += 1,
        }
    }

    fn total(&self) -> u32 {
        self.black + self.white + self.draws
    }
}

/// Playout-based move evaluator
#[derive(Debug, Clone)]
pub struct MoveEvaluator {
    /// Playouts (or trials) per candidate
    num_simulations: u32,
    /// Playouts run since creation, for statistics
    playouts: u64,
}

impl MoveEvaluator {
    /// Evaluator with [`DEFAULT_SIMULATIONS`] playouts per candidate
    pub fn new() -> Self {
        Self::with_simulations(DEFAULT_SIMULATIONS)
    }

    /// Evaluator with a custom playout count (at least one)
    pub fn with_simulations(num_simulations: u32) -> Self {
        Self {
            num_simulations: num_simulations.max(1),
            playouts: 0,
        }
    }

    #[inline]
    pub fn num_simulations(&self) -> u32 {
        self.num_simulations
    }

    #[inline]
    pub fn playouts(&self) -> u64 {
        self.playouts
    }

    /// Choose a move for `color` with the given policy.
    ///
    /// The board is not modified. `Policy::Scored` runs the scored variant
    /// on a private copy with `color` to move.
    ///
    /// # Errors
    ///
    /// `SearchError::GameOver` on a terminal board; callers are expected to
    /// check first and answer pass/resign themselves.
    pub fn select_move<R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        color: Stone,
        policy: Policy,
        rng: &mut R,
    ) -> Result<Evaluation, SearchError> {
        let outcome = board.check_terminal();
        if outcome.is_terminal() {
            return Err(SearchError::GameOver(outcome));
        }

        match policy {
            Policy::Random => {
                let candidates = board.legal_moves(color);
                pick_best(&candidates, |mv| Ok(self.random_ratio(board, color, mv, rng)))
            }
            Policy::RuleBased => {
                let candidates = board.legal_moves(color);
                pick_best(&candidates, |mv| Ok(self.rule_ratio(board, color, mv)))
            }
            Policy::Scored => {
                let mut work = board.clone();
                work.set_current_player(color);
                self.score_candidates(&mut work, rng)
            }
        }
    }

    /// Fraction of random playouts won after `color` plays `mv`
    fn random_ratio<R: Rng + ?Sized>(
        &mut self,
        board: &Board,
        color: Stone,
        mv: Point,
        rng: &mut R,
    ) -> f64 {
        let mut start = board.clone();
        start.play_move(mv, color);

        let opponent = color.opponent();
        let wins = (0..self.num_simulations)
            .filter(|_| random_playout(&start, color, opponent, rng))
            .count();
        self.playouts += u64::from(self.num_simulations);

        wins as f64 / f64::from(self.num_simulations)
    }

    /// Mean rule-guided playout score after `color` plays `mv`
    fn rule_ratio(&mut self, board: &Board, color: Stone, mv: Point) -> f64 {
        let mut start = board.clone();
        start.play_move(mv, color);

        let opponent = color.opponent();
        let total: f64 = (0..self.num_simulations)
            .map(|_| rule_playout(&start, color, opponent))
            .sum();
        self.playouts += u64::from(self.num_simulations);

        total / f64::from(self.num_simulations)
    }

    /// Score one candidate of the side to move on the live board.
    ///
    /// Commits `mv`, runs the trials (each one a random game to the end,
    /// rewound to the move number right after `mv`), then undoes `mv`. The
    /// result is from the mover's point of view: `(black wins + draws / 2) /
    /// trials`, inverted when White moves.
    pub fn score_candidate<R: Rng + ?Sized>(
        &mut self,
        board: &mut Board,
        mv: Point,
        rng: &mut R,
    ) -> Result<f64, SearchError> {
        let color = board.current_player();
        if !board.play_move(mv, color) {
            return Err(SearchError::IllegalMove(mv));
        }
        let move_number = board.move_number();

        let mut tally = Tally::default();
        for _ in 0..self.num_simulations {
            tally.record(board.simulate(rng));
            board.reset_to_move_number(move_number);
        }
        debug_assert_eq!(tally.total(), self.num_simulations);
        debug_assert_eq!(board.move_number(), move_number);
        board.undo_move();
        self.playouts += u64::from(self.num_simulations);

        let eval = (f64::from(tally.black) + 0.5 * f64::from(tally.draws))
            / f64::from(self.num_simulations);
        Ok(if color == Stone::White { 1.0 - eval } else { eval })
    }

    /// Choose a move for the side to move using the scored variant.
    ///
    /// Holds the board exclusively for the whole call. Every candidate is
    /// committed and undone in turn, so the board comes back with the same
    /// stones, side to move and move number.
    pub fn score_candidates<R: Rng + ?Sized>(
        &mut self,
        board: &mut Board,
        rng: &mut R,
    ) -> Result<Evaluation, SearchError> {
        let outcome = board.check_terminal();
        if outcome.is_terminal() {
            return Err(SearchError::GameOver(outcome));
        }

        let candidates = board.legal_moves(board.current_player());
        pick_best(&candidates, |mv| self.score_candidate(board, mv, rng))
    }
}

impl Default for MoveEvaluator {
    fn default() -> Self {
        Self::new()
    }
}

/// Score candidates in order and keep the first strictly best one
fn pick_best<F>(candidates: &[Point], mut score: F) -> Result<Evaluation, SearchError>
where
    F: FnMut(Point) -> Result<f64, SearchError>,
{
    let (&first, _) = candidates.split_first().ok_or(SearchError::NoLegalMoves)?;

    let mut best_move = first;
    let mut best_ratio = 0.0;
    for &mv in candidates {
        let ratio = score(mv)?;
        debug!(point = mv.index(), ratio, "candidate scored");
        if ratio > best_ratio {
            best_move = mv;
            best_ratio = ratio;
        }
    }

    Ok(Evaluation {
        best_move,
        ratio: best_ratio,
        candidates: candidates.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn two_empty_draw() -> Board {
        Board::from_diagram(&["XXO..", "OOOOX", "XXOXO", "OOXOO", "XOXOX"]).unwrap()
    }

    fn full_draw() -> Board {
        Board::from_diagram(&["XXOOX", "OOOOX", "XXOXO", "OOXOO", "XOXOX"]).unwrap()
    }

    fn rng() -> ChaCha8Rng {
        ChaCha8Rng::seed_from_u64(42)
    }

    #[test]
    fn test_policy_parse_and_display() {
        for policy in [Policy::Random, Policy::RuleBased, Policy::Scored] {
            assert_eq!(policy.to_string().parse::<Policy>(), Ok(policy));
        }
        assert_eq!(
            "minimax".parse::<Policy>(),
            Err(SearchError::UnknownPolicy("minimax".to_string()))
        );
    }

    #[test]
    fn test_tie_goes_to_first_candidate() {
        let board = two_empty_draw();
        let first = board.pt(5, 4);
        assert_eq!(board.legal_moves(Stone::Black)[0], first);

        for policy in [Policy::Random, Policy::RuleBased, Policy::Scored] {
            let mut evaluator = MoveEvaluator::new();
            let eval = evaluator
                .select_move(&board, Stone::Black, policy, &mut rng())
                .unwrap();
            assert_eq!(eval.best_move, first, "policy {policy}");
            assert_eq!(eval.candidates, 2);
        }
    }

    #[test]
    fn test_pick_best_strictly_greater() {
        let points = [Point(7), Point(8), Point(9), Point(10)];
        let scores = [0.3, 0.7, 0.7, 0.1];
        let mut i = 0;
        let eval = pick_best(&points, |_| {
            i += 1;
            Ok(scores[i - 1])
        })
        .unwrap();
        assert_eq!(eval.best_move, Point(8));
        assert_eq!(eval.ratio, 0.7);
    }

    #[test]
    fn test_pick_best_all_zero_keeps_first() {
        let points = [Point(3), Point(4)];
        let eval = pick_best(&points, |_| Ok(0.0)).unwrap();
        assert_eq!(eval.best_move, Point(3));
        assert_eq!(pick_best(&[], |_| Ok(1.0)), Err(SearchError::NoLegalMoves));
    }

    #[test]
    fn test_terminal_board_is_refused() {
        let mut board = full_draw();
        assert_eq!(board.check_terminal(), Outcome::Draw);

        let mut evaluator = MoveEvaluator::new();
        for policy in [Policy::Random, Policy::RuleBased, Policy::Scored] {
            assert_eq!(
                evaluator.select_move(&board, Stone::Black, policy, &mut rng()),
                Err(SearchError::GameOver(Outcome::Draw))
            );
        }
        assert_eq!(
            evaluator.score_candidates(&mut board, &mut rng()),
            Err(SearchError::GameOver(Outcome::Draw))
        );
        assert_eq!(evaluator.playouts(), 0);
    }

    #[test]
    fn test_immediate_win_scores_one() {
        let mut board = Board::new(7).unwrap();
        for col in 1..=4 {
            board.play_move(board.pt(4, col), Stone::Black);
            board.play_move(board.pt(7, col + 1), Stone::White);
        }
        let mut evaluator = MoveEvaluator::new();
        let eval = evaluator
            .select_move(&board, Stone::Black, Policy::RuleBased, &mut rng())
            .unwrap();
        assert_eq!(eval.best_move, board.pt(4, 5));
        assert_eq!(eval.ratio, 1.0);
    }

    #[test]
    fn test_random_policy_counts_playouts() {
        let board = two_empty_draw();
        let mut evaluator = MoveEvaluator::with_simulations(4);
        let eval = evaluator
            .select_move(&board, Stone::Black, Policy::Random, &mut rng())
            .unwrap();
        assert_eq!(eval.ratio, 0.0);
        assert_eq!(evaluator.playouts(), 8);
    }

    #[test]
    fn test_scored_variant_restores_board() {
        let mut board = Board::new(5).unwrap();
        board.play_move(board.pt(3, 3), Stone::Black);
        board.play_move(board.pt(2, 2), Stone::White);
        let before = board.render();
        let move_number = board.move_number();
        let to_move = board.current_player();

        let mut evaluator = MoveEvaluator::with_simulations(3);
        let eval = evaluator.score_candidates(&mut board, &mut rng()).unwrap();

        assert_eq!(board.move_number(), move_number);
        assert_eq!(board.render(), before);
        assert_eq!(board.current_player(), to_move);
        assert!(board.is_legal(eval.best_move, to_move));
        assert!((0.0..=1.0).contains(&eval.ratio));
    }

    #[test]
    fn test_scored_draws_count_half() {
        let mut board = two_empty_draw();
        let mut evaluator = MoveEvaluator::with_simulations(5);
        let mv = board.pt(5, 4);
        let score = evaluator.score_candidate(&mut board, mv, &mut rng()).unwrap();
        assert_eq!(score, 0.5);
        assert_eq!(board.move_number(), 0);
    }

    #[test]
    fn test_scored_inverts_for_white() {
        // White to move; its only move completes five
        let mut board =
            Board::from_diagram(&["OOOO.", "XXXXO", "OOXOX", "XXOXX", "OXOXO"]).unwrap();
        board.set_current_player(Stone::White);

        let mut evaluator = MoveEvaluator::with_simulations(4);
        let mv = board.pt(5, 5);
        let score = evaluator.score_candidate(&mut board, mv, &mut rng()).unwrap();
        assert_eq!(score, 1.0);
        assert!(board.is_legal(mv, Stone::White));
    }

    #[test]
    fn test_scored_rejects_occupied_point() {
        let mut board = two_empty_draw();
        let mut evaluator = MoveEvaluator::new();
        let occupied = board.pt(1, 1);
        assert_eq!(
            evaluator.score_candidate(&mut board, occupied, &mut rng()),
            Err(SearchError::IllegalMove(occupied))
        );
    }
}
