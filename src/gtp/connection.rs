//! GTP command dispatcher
//!
//! One line in, at most one response out. Responses are `= text\n\n` on
//! success and `? text\n\n` on failure. Like GoGui's reference players,
//! `play` reports an illegal move as a *successful* response whose text
//! starts with `illegal move:`.

use std::fmt;
use std::io::{BufRead, Write};

use tracing::{debug, warn};

use crate::board::{Board, Move, Outcome, Point, Stone};
use crate::engine::{Reply, SimulationEngine};
use crate::eval::{classify_to_move, MoveCategory};
use crate::search::Policy;

use super::coords::{format_move, parse_color, parse_move};
use super::GtpError;

/// Every command the dispatcher understands, in `list_commands` order
pub const COMMANDS: &[&str] = &[
    "protocol_version",
    "quit",
    "name",
    "boardsize",
    "showboard",
    "clear_board",
    "komi",
    "version",
    "known_command",
    "genmove",
    "list_commands",
    "play",
    "legal_moves",
    "gogui-rules_game_id",
    "gogui-rules_board_size",
    "gogui-rules_legal_moves",
    "gogui-rules_side_to_move",
    "gogui-rules_board",
    "gogui-rules_final_result",
    "gogui-analyze_commands",
    "policy",
    "policy_moves",
];

/// Required argument counts and their usage messages
const ARGMAP: &[(&str, usize, &str)] = &[
    ("boardsize", 1, "Usage: boardsize INT"),
    ("komi", 1, "Usage: komi FLOAT"),
    ("known_command", 1, "Usage: known_command CMD_NAME"),
    ("genmove", 1, "Usage: genmove {w,b}"),
    ("play", 2, "Usage: play {b,w} MOVE"),
    ("legal_moves", 1, "Usage: legal_moves {w,b}"),
    ("policy", 1, "Usage: policy {random,rule_based,scored}"),
];

const ANALYZE_COMMANDS: &str = "pstring/Legal Moves For ToPlay/gogui-rules_legal_moves\n\
                                pstring/Side to Play/gogui-rules_side_to_move\n\
                                pstring/Final Result/gogui-rules_final_result\n\
                                pstring/Board Size/gogui-rules_board_size\n\
                                pstring/Rules GameID/gogui-rules_game_id\n\
                                pstring/Show Board/gogui-rules_board\n";

/// A reply to one command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Response {
    Success(String),
    Failure(String),
}

impl Response {
    pub fn text(&self) -> &str {
        match self {
            Response::Success(text) | Response::Failure(text) => text,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Response::Success(_))
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Response::Success(text) => write!(f, "= {}\n\n", text),
            Response::Failure(text) => write!(f, "? {}\n\n", text),
        }
    }
}

/// GTP session state: the engine, the game board and komi
pub struct GtpConnection {
    engine: SimulationEngine,
    board: Board,
    komi: f64,
    quit: bool,
}

impl GtpConnection {
    pub fn new(engine: SimulationEngine, board: Board) -> Self {
        Self {
            engine,
            board,
            komi: 0.0,
            quit: false,
        }
    }

    #[inline]
    pub fn board(&self) -> &Board {
        &self.board
    }

    #[inline]
    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    #[inline]
    pub fn komi(&self) -> f64 {
        self.komi
    }

    /// True once `quit` has been answered
    #[inline]
    pub fn should_quit(&self) -> bool {
        self.quit
    }

    /// Read commands until end of input or `quit`
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<(), GtpError> {
        for line in input.lines() {
            let line = line?;
            if let Some(response) = self.execute(&line) {
                write!(output, "{}", response)?;
                output.flush()?;
            }
            if self.quit {
                break;
            }
        }
        Ok(())
    }

    /// Execute one command line.
    ///
    /// Blank lines and `#` comments produce no response. Leading digits
    /// (regression-test command ids) are stripped.
    pub fn execute(&mut self, line: &str) -> Option<Response> {
        if line.trim().is_empty() || line.starts_with('#') {
            return None;
        }
        let line = line.trim_start_matches(|c: char| c.is_ascii_digit());

        let mut elements = line.split_whitespace();
        let name = elements.next()?;
        let args: Vec<&str> = elements.collect();
        debug!(command = name, ?args, "gtp command");

        if let Some(&(_, argc, usage)) = ARGMAP.iter().find(|(cmd, _, _)| *cmd == name) {
            if args.len() != argc {
                return Some(Response::Failure(usage.to_string()));
            }
        }

        let result = self.dispatch(name, &args);
        Some(match result {
            Ok(text) => Response::Success(text),
            Err(e) => {
                warn!(command = name, error = %e, "gtp command failed");
                Response::Failure(e.to_string())
            }
        })
    }

    fn dispatch(&mut self, name: &str, args: &[&str]) -> Result<String, GtpError> {
        match name {
            "protocol_version" => Ok("2".to_string()),
            "quit" => {
                self.quit = true;
                Ok(String::new())
            }
            "name" => Ok(self.engine.name()),
            "version" => Ok(env!("CARGO_PKG_VERSION").to_string()),
            "boardsize" => self.boardsize_cmd(args[0]),
            "showboard" => Ok(format!("\n{}", self.board.render().trim_end())),
            "clear_board" => {
                self.board.reset(self.board.size())?;
                Ok(String::new())
            }
            "komi" => {
                self.komi = args[0]
                    .parse()
                    .map_err(|_| GtpError::Komi(args[0].to_string()))?;
                Ok(String::new())
            }
            "known_command" => Ok(COMMANDS.contains(&args[0]).to_string()),
            "list_commands" => Ok(COMMANDS.join(" ")),
            "legal_moves" => {
                let color = color_arg(args[0])?;
                Ok(self.sorted_moves(&self.board.legal_moves(color)))
            }
            "play" => self.play_cmd(args[0], args[1]),
            "genmove" => self.genmove_cmd(args[0]),
            "gogui-rules_game_id" => Ok("Gomoku".to_string()),
            "gogui-rules_board_size" => Ok(self.board.size().to_string()),
            "gogui-rules_legal_moves" => {
                if self.board.is_game_over() {
                    return Ok(String::new());
                }
                let moves = self.board.legal_moves(self.board.current_player());
                Ok(self.sorted_moves(&moves))
            }
            "gogui-rules_side_to_move" => Ok(self.board.current_player().name().to_string()),
            "gogui-rules_board" => Ok(self.board.render()),
            "gogui-rules_final_result" => Ok(final_result(self.board.check_terminal()).to_string()),
            "gogui-analyze_commands" => Ok(ANALYZE_COMMANDS.to_string()),
            "policy" => Ok(self.policy_cmd(args[0])),
            "policy_moves" => Ok(self.policy_moves_cmd()),
            other => Err(GtpError::UnknownCommand(other.to_string())),
        }
    }

    fn boardsize_cmd(&mut self, arg: &str) -> Result<String, GtpError> {
        let size: usize = arg
            .parse()
            .map_err(|_| GtpError::BoardSize(arg.to_string()))?;
        self.board.reset(size)?;
        Ok(String::new())
    }

    fn play_cmd(&mut self, color_arg: &str, vertex: &str) -> Result<String, GtpError> {
        let Some(color) = parse_color(color_arg) else {
            return Ok(format!(
                "illegal move: \"{}\" wrong color",
                color_arg.to_ascii_lowercase()
            ));
        };
        let mv = match parse_move(vertex, &self.board) {
            Ok(mv) => mv,
            Err(e @ GtpError::WrongCoordinate(_)) => return Ok(e.to_string()),
            Err(e) => return Err(e),
        };
        if !self.board.apply(mv, color) {
            return Ok(format!("illegal move: \"{}\" occupied", vertex));
        }
        debug!(color = color.name(), vertex, "played\n{}", self.board.render());
        Ok(String::new())
    }

    fn genmove_cmd(&mut self, color_arg: &str) -> Result<String, GtpError> {
        let color = color_arg_or_usage(color_arg, "Usage: genmove {w,b}")?;
        let result = self.engine.gen_move(&mut self.board, color)?;
        match result.reply {
            Reply::Pass => Ok("pass".to_string()),
            Reply::Resign => Ok("resign".to_string()),
            Reply::Play(p) => {
                let text = format_move(&self.board, Move::Place(p));
                if self.board.play_move(p, color) {
                    Ok(text)
                } else {
                    Ok(format!("illegal move: {}", text))
                }
            }
        }
    }

    fn policy_cmd(&mut self, arg: &str) -> String {
        match arg.parse::<Policy>() {
            Ok(policy) => {
                self.engine.set_policy(policy);
                format!("policy set to {}", policy)
            }
            Err(_) => "unknown policy".to_string(),
        }
    }

    /// Classifier verdict for the side to move, e.g. `BlockWin C3 F3`
    fn policy_moves_cmd(&self) -> String {
        let (category, moves) = classify_to_move(&self.board);
        let label = match category {
            MoveCategory::None => "Random".to_string(),
            other => other.to_string(),
        };
        let moves = self.sorted_moves(&moves);
        if moves.is_empty() {
            if category == MoveCategory::None {
                return String::new();
            }
            return label;
        }
        format!("{} {}", label, moves)
    }

    /// Vertices sorted as strings and joined by spaces
    fn sorted_moves(&self, moves: &[Point]) -> String {
        let mut names: Vec<String> = moves
            .iter()
            .map(|&p| format_move(&self.board, Move::Place(p)))
            .collect();
        names.sort();
        names.join(" ")
    }
}

fn color_arg(arg: &str) -> Result<Stone, GtpError> {
    parse_color(arg).ok_or_else(|| GtpError::Color(arg.to_string()))
}

fn color_arg_or_usage(arg: &str, usage: &'static str) -> Result<Stone, GtpError> {
    parse_color(arg).ok_or(GtpError::Usage(usage))
}

fn final_result(outcome: Outcome) -> &'static str {
    match outcome {
        Outcome::BlackWins => "black",
        Outcome::WhiteWins => "white",
        Outcome::Draw => "draw",
        Outcome::Ongoing => "unknown",
    }
}
