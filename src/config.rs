use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::affordance::BID_INCREMENTS;
use crate::board::MAX_PLAYERS;
use crate::engine::GameSetup;
use crate::geometry::{BoardLayout, LayoutError};

pub const DEFAULT_LOG_FILE: &str = "monopoly-client.log";

/// Client settings. Every field is optional in the file; command-line
/// flags are applied on top by the binary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Program that runs the rules engine.
    pub engine: Option<String>,
    /// Arguments for the engine program, passed as given.
    pub engine_args: Vec<String>,
    pub setup: GameSetup,
    pub layout: BoardLayout,
    pub bid_increments: Vec<u32>,
    pub log_file: PathBuf,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            engine: None,
            engine_args: Vec::new(),
            setup: GameSetup::default(),
            layout: BoardLayout::default(),
            bid_increments: BID_INCREMENTS.to_vec(),
            log_file: PathBuf::from(DEFAULT_LOG_FILE),
        }
    }
}

impl ClientConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: ClientConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path).map_err(|source| ConfigError::ReadFailed {
            path: path.to_path_buf(),
            source,
        })?;
        ClientConfig::from_json_str(&contents)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let players = self.setup.player_count;
        if !(2..=MAX_PLAYERS).contains(&players) {
            return Err(ConfigError::PlayerCount(players));
        }
        if self.setup.starting_funds < 0 {
            return Err(ConfigError::StartingFunds(self.setup.starting_funds));
        }
        if self.bid_increments.is_empty() || self.bid_increments.contains(&0) {
            return Err(ConfigError::BidIncrements);
        }
        self.layout.validate()?;
        Ok(())
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to parse client config: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("failed to read client config from {path:?}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("player count must be between 2 and 4, got {0}")]
    PlayerCount(usize),
    #[error("starting funds cannot be negative, got {0}")]
    StartingFunds(i64),
    #[error("bid increments must be a non-empty list of positive amounts")]
    BidIncrements,
    #[error(transparent)]
    Layout(#[from] LayoutError),
}
