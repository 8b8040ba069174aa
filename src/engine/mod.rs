//! The fixed contract with the external rules engine.
//!
//! The engine owns every rule. The client only asks it whether a command
//! would be legal, sends commands, and reads back snapshots.

pub mod command;
pub mod process;
pub mod snapshot;

use serde::{Deserialize, Serialize};

use crate::board::{self, Cell};
use crate::types::{Property, PropertyGroup};

pub use command::{Command, CommandOutcome, TradeAssets, TradeOffer};
pub use process::ProcessEngine;
pub use snapshot::{Auction, GameStateSnapshot, PlayerSnapshot, PropertyState};

/// What the client hands the engine before the first turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameSetup {
    pub seed: String,
    pub player_count: usize,
    pub starting_funds: i64,
}

impl Default for GameSetup {
    fn default() -> Self {
        Self {
            seed: "monopolyRandomSeed!".to_string(),
            player_count: 4,
            starting_funds: 1500,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("failed to start engine `{program}`: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
    #[error("engine i/o failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("malformed engine message: {0}")]
    Protocol(#[from] serde_json::Error),
    #[error("engine closed its output")]
    Closed,
    #[error("expected a {expected} response from the engine, got {got}")]
    UnexpectedResponse {
        expected: &'static str,
        got: &'static str,
    },
    #[error("engine reported an error: {0}")]
    Reported(String),
    #[error("engine program is empty")]
    EmptyProgram,
}

pub trait RulesEngine {
    /// Hands over the initial setup and returns the opening snapshot.
    fn start(&mut self, setup: &GameSetup) -> Result<GameStateSnapshot, EngineError>;

    fn current_snapshot(&self) -> Result<GameStateSnapshot, EngineError>;

    /// Whether `command` would currently be accepted. Never mutates state.
    fn is_action_legal(&self, command: &Command) -> bool;

    fn execute(&mut self, command: &Command) -> Result<CommandOutcome, EngineError>;

    fn cell_to_property(&self, cell: Cell) -> Option<Property> {
        board::cell_to_property(cell)
    }

    fn property_group(&self, property: Property) -> PropertyGroup {
        board::property_group(property)
    }

    fn property_price(&self, property: Property) -> u32 {
        board::property_price(property)
    }
}
