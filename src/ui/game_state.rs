//! Game state management for the Gomoku GUI

use std::sync::mpsc::{channel, Receiver, TryRecvError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::warn;

use crate::board::{Board, BoardError, Outcome, Point, Stone};
use crate::config::EngineConfig;
use crate::engine::{MoveResult, Reply, SimulationEngine};
use crate::eval::{classify_to_move, MoveCategory};
use crate::rules::winning_line;
use crate::search::{Policy, SearchError};

/// Game mode selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameMode {
    /// Player vs engine
    PvE { human_color: Stone },
    /// Player vs Player (hotseat)
    PvP,
}

impl Default for GameMode {
    fn default() -> Self {
        GameMode::PvE {
            human_color: Stone::Black,
        }
    }
}

/// What the worker thread hands back: the engine itself and its answer
type EngineReply = (SimulationEngine, Result<MoveResult, SearchError>);

/// What a worker answer is used for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineJob {
    /// Play the answer for the engine side
    Move,
    /// Show the answer as a hint
    Hint,
}

/// Engine computation state
pub enum AiState {
    Idle,
    Thinking {
        job: EngineJob,
        receiver: Receiver<EngineReply>,
        start_time: Instant,
    },
}

/// Game result
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameResult {
    pub outcome: Outcome,
    pub winning_line: Option<Vec<Point>>,
}

/// Move timer for tracking thinking time
pub struct MoveTimer {
    pub start_time: Option<Instant>,
    pub last_move_duration: Option<Duration>,
    pub ai_thinking_time: Option<Duration>,
}

impl Default for MoveTimer {
    fn default() -> Self {
        Self {
            start_time: Some(Instant::now()),
            last_move_duration: None,
            ai_thinking_time: None,
        }
    }
}

impl MoveTimer {
    pub fn start(&mut self) {
        self.start_time = Some(Instant::now());
    }

    pub fn stop(&mut self) -> Duration {
        let duration = self.elapsed();
        self.last_move_duration = Some(duration);
        self.start_time = None;
        duration
    }

    pub fn elapsed(&self) -> Duration {
        self.start_time.map_or(Duration::ZERO, |t| t.elapsed())
    }

    pub fn set_ai_time(&mut self, duration: Duration) {
        self.ai_thinking_time = Some(duration);
    }
}

/// Main game state
pub struct GameState {
    pub board: Board,
    pub mode: GameMode,
    pub game_over: Option<GameResult>,
    pub last_move: Option<Point>,
    pub last_ai_result: Option<MoveResult>,
    pub ai_state: AiState,
    pub move_timer: MoveTimer,
    pub suggested_move: Option<Point>,
    pub message: Option<String>,
    /// Classifier verdict for the side to move
    pub verdict: (MoveCategory, Vec<Point>),

    config: EngineConfig,
    /// `None` while the worker thread owns the engine
    engine: Option<SimulationEngine>,
}

impl GameState {
    pub fn new(mode: GameMode, config: EngineConfig) -> Result<Self, BoardError> {
        let board = Board::new(config.board_size)?;
        let verdict = classify_to_move(&board);
        Ok(Self {
            board,
            mode,
            game_over: None,
            last_move: None,
            last_ai_result: None,
            ai_state: AiState::Idle,
            move_timer: MoveTimer::default(),
            suggested_move: None,
            message: None,
            verdict,
            engine: Some(SimulationEngine::new(config.clone())),
            config,
        })
    }

    /// Start over on a board of the same size
    pub fn reset(&mut self) {
        let size = self.board.size();
        if let Err(e) = self.resize(size) {
            self.message = Some(e.to_string());
        }
    }

    /// Start over on a board of another size
    pub fn resize(&mut self, size: usize) -> Result<(), BoardError> {
        self.board.reset(size)?;
        self.config.board_size = size;
        self.game_over = None;
        self.last_move = None;
        self.last_ai_result = None;
        self.ai_state = AiState::Idle;
        self.move_timer = MoveTimer::default();
        self.suggested_move = None;
        self.message = None;
        if self.engine.is_none() {
            // The worker was abandoned with the old game
            self.engine = Some(SimulationEngine::new(self.config.clone()));
        }
        self.refresh_verdict();
        Ok(())
    }

    #[inline]
    pub fn current_turn(&self) -> Stone {
        self.board.current_player()
    }

    #[inline]
    pub fn policy(&self) -> Policy {
        self.config.policy
    }

    #[inline]
    pub fn num_simulations(&self) -> u32 {
        self.config.num_simulations
    }

    /// Switch the engine policy; applies to the next engine move
    pub fn set_policy(&mut self, policy: Policy) {
        self.config.policy = policy;
        if let Some(engine) = &mut self.engine {
            engine.set_policy(policy);
        }
    }

    /// Check if it's the human's turn
    pub fn is_human_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_color } => self.current_turn() == human_color,
            GameMode::PvP => true,
        }
    }

    /// Check if it's the engine's turn
    pub fn is_ai_turn(&self) -> bool {
        match self.mode {
            GameMode::PvE { human_color } => self.current_turn() != human_color,
            GameMode::PvP => false,
        }
    }

    /// Check if the engine is currently thinking
    pub fn is_ai_thinking(&self) -> bool {
        matches!(self.ai_state, AiState::Thinking { .. })
    }

    /// Attempt to place a stone at the given point
    pub fn try_place_stone(&mut self, p: Point) -> Result<(), String> {
        if self.game_over.is_some() {
            return Err("Game is over".to_string());
        }
        if self.is_ai_thinking() {
            return Err("Engine is thinking".to_string());
        }
        if !self.is_human_turn() {
            return Err("Not your turn".to_string());
        }
        if !self.board.is_legal(p, self.current_turn()) {
            return Err("Point is occupied".to_string());
        }

        self.execute_move(p);
        Ok(())
    }

    /// Execute a move (for both human and engine)
    fn execute_move(&mut self, p: Point) {
        let color = self.current_turn();
        if !self.board.play_move(p, color) {
            return;
        }

        self.last_move = Some(p);
        self.suggested_move = None;
        self.move_timer.stop();

        let outcome = self.board.check_terminal();
        if outcome.is_terminal() {
            self.game_over = Some(GameResult {
                outcome,
                winning_line: winning_line(&self.board, p),
            });
        } else {
            self.move_timer.start();
            self.message = None;
        }
        self.refresh_verdict();
    }

    fn refresh_verdict(&mut self) {
        self.verdict = if self.board.is_game_over() {
            (MoveCategory::None, Vec::new())
        } else {
            classify_to_move(&self.board)
        };
    }

    /// Hand the engine to a worker thread for the side to move
    pub fn start_ai_thinking(&mut self) {
        if !self.is_ai_turn() || self.is_ai_thinking() || self.game_over.is_some() {
            return;
        }
        self.spawn_engine(EngineJob::Move);
    }

    /// Ask the engine for a hint in PvP mode
    pub fn request_suggestion(&mut self) {
        if self.game_over.is_some() || self.is_ai_thinking() {
            return;
        }
        self.spawn_engine(EngineJob::Hint);
    }

    fn spawn_engine(&mut self, job: EngineJob) {
        let Some(mut engine) = self.engine.take() else {
            return;
        };

        let mut board = self.board.clone();
        let color = self.current_turn();
        let (tx, rx) = channel();

        thread::spawn(move || {
            let result = engine.gen_move(&mut board, color);
            let _ = tx.send((engine, result));
        });

        self.ai_state = AiState::Thinking {
            job,
            receiver: rx,
            start_time: Instant::now(),
        };
    }

    /// Check if the engine has finished thinking
    pub fn check_ai_result(&mut self) {
        let received = match &self.ai_state {
            AiState::Thinking {
                job,
                receiver,
                start_time,
            } => match receiver.try_recv() {
                Ok(reply) => Some((*job, reply, start_time.elapsed())),
                Err(TryRecvError::Empty) => None,
                Err(TryRecvError::Disconnected) => {
                    warn!("engine worker disconnected");
                    self.ai_state = AiState::Idle;
                    self.engine = Some(SimulationEngine::new(self.config.clone()));
                    self.message = Some("Engine error".to_string());
                    return;
                }
            },
            AiState::Idle => None,
        };

        let Some((job, (mut engine, result), elapsed)) = received else {
            return;
        };
        self.ai_state = AiState::Idle;
        engine.set_policy(self.config.policy);
        self.engine = Some(engine);

        match (job, result) {
            (EngineJob::Hint, Ok(move_result)) => {
                self.suggested_move = move_result.point();
                self.last_ai_result = Some(move_result);
            }
            (EngineJob::Move, Ok(move_result)) => {
                self.move_timer.set_ai_time(elapsed);
                let reply = move_result.reply;
                self.last_ai_result = Some(move_result);
                match reply {
                    Reply::Play(p) => self.execute_move(p),
                    Reply::Pass => self.message = Some("Engine passes".to_string()),
                    Reply::Resign => self.message = Some("Engine resigns".to_string()),
                }
            }
            (_, Err(e)) => self.message = Some(e.to_string()),
        }
    }

    /// Get engine thinking elapsed time
    pub fn ai_thinking_elapsed(&self) -> Option<Duration> {
        match &self.ai_state {
            AiState::Thinking { start_time, .. } => Some(start_time.elapsed()),
            AiState::Idle => None,
        }
    }

    /// Undo last move (both moves of a human/engine exchange in PvE)
    pub fn undo(&mut self) {
        if self.board.move_number() == 0 || self.is_ai_thinking() {
            return;
        }

        let undo_count = match self.mode {
            GameMode::PvE { human_color } if self.board.move_number() >= 2 => {
                // Leave the human to move again
                if self.current_turn() == human_color { 2 } else { 1 }
            }
            _ => 1,
        };
        for _ in 0..undo_count {
            self.board.undo_move();
        }

        self.game_over = None;
        self.suggested_move = None;
        self.last_move = self.board.last_move().and_then(|(mv, _)| mv.point());
        self.refresh_verdict();
        self.move_timer.start();
    }
}
