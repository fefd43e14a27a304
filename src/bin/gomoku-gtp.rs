//! GTP player binary
//!
//! Speaks GTP on stdin/stdout; logs go to stderr.

use std::io;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use gomoku::config::{load_config, EngineConfig};
use gomoku::gtp::GtpConnection;
use gomoku::logging::init_tracing;
use gomoku::search::Policy;
use gomoku::{Board, SimulationEngine};

#[derive(Parser, Debug)]
#[command(name = "gomoku-gtp")]
#[command(about = "Simulation-based Gomoku player speaking the Go Text Protocol")]
struct Args {
    /// Config file (default: $GOMOKU_SIM_CONFIG, then ./gomoku-sim.toml)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Move scoring policy (random, rule_based, scored)
    #[arg(long)]
    policy: Option<Policy>,

    /// Playouts per candidate move
    #[arg(long)]
    simulations: Option<u32>,

    /// Initial board size
    #[arg(long)]
    size: Option<usize>,

    /// RNG seed for reproducible play
    #[arg(long)]
    seed: Option<u64>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: String,
}

impl Args {
    fn resolve_config(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_path(path)
                .with_context(|| format!("loading {}", path.display()))?,
            None => load_config(),
        };
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(simulations) = self.simulations {
            config.num_simulations = simulations;
        }
        if let Some(size) = self.size {
            config.board_size = size;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
        config.validate()?;
        Ok(config)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_level);

    let config = args.resolve_config()?;
    info!(
        policy = %config.policy,
        simulations = config.num_simulations,
        size = config.board_size,
        "starting GTP session"
    );

    let board = Board::new(config.board_size)?;
    let mut connection = GtpConnection::new(SimulationEngine::new(config), board);

    let stdin = io::stdin();
    connection.run(stdin.lock(), io::stdout().lock())?;
    Ok(())
}
