//! Engine configuration
//!
//! Loaded from an optional TOML file and then overridden by command-line
//! flags in the binaries. Lookup order for the file:
//! 1. Path in the `GOMOKU_SIM_CONFIG` environment variable
//! 2. `gomoku-sim.toml` in the working directory
//!
//! A missing or unreadable file falls back to the built-in defaults.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info, warn};

use crate::board::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE};
use crate::search::{Policy, DEFAULT_SIMULATIONS};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV: &str = "GOMOKU_SIM_CONFIG";

/// Default config locations, searched in order
pub const CONFIG_SEARCH_PATHS: &[&str] = &["gomoku-sim.toml"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("num_simulations must be at least 1")]
    ZeroSimulations,

    #[error("board_size {0} out of range (2..=25)")]
    BoardSize(usize),
}

/// Settings shared by the GTP and GUI front-ends
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Candidate scoring policy
    pub policy: Policy,
    /// Playouts per candidate move
    pub num_simulations: u32,
    /// Board size for new games
    pub board_size: usize,
    /// RNG seed; `None` seeds from entropy
    pub seed: Option<u64>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            policy: Policy::Random,
            num_simulations: DEFAULT_SIMULATIONS,
            board_size: DEFAULT_SIZE,
            seed: None,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a TOML document; absent keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.num_simulations == 0 {
            return Err(ConfigError::ZeroSimulations);
        }
        if !(MIN_SIZE..=MAX_SIZE).contains(&self.board_size) {
            return Err(ConfigError::BoardSize(self.board_size));
        }
        Ok(())
    }
}

/// Load the configuration from the standard locations.
///
/// Never fails: problems with a file are logged and the defaults are used.
pub fn load_config() -> EngineConfig {
    if let Ok(path) = std::env::var(CONFIG_ENV) {
        let path = PathBuf::from(path);
        if path.exists() {
            info!("Loading config from {}: {}", CONFIG_ENV, path.display());
            return load_or_default(&path);
        }
        warn!("{}={} not found, searching defaults", CONFIG_ENV, path.display());
    }

    for path_str in CONFIG_SEARCH_PATHS {
        let path = Path::new(path_str);
        if path.exists() {
            info!("Loading config from {}", path.display());
            return load_or_default(path);
        }
    }

    debug!("No config file found, using built-in defaults");
    EngineConfig::default()
}

/// Load a specific file, falling back to defaults on any error
pub fn load_or_default(path: &Path) -> EngineConfig {
    match EngineConfig::from_path(path) {
        Ok(config) => config,
        Err(e) => {
            warn!("{}, using defaults", e);
            EngineConfig::default()
        }
    }
}
