#![warn(clippy::all)]
#![deny(rust_2018_idioms)]

pub mod affordance;
pub mod board;
pub mod cli;
pub mod config;
pub mod engine;
pub mod geometry;
pub mod trade;
pub mod types;
pub mod view;

pub use affordance::{EnabledSet, evaluate};
pub use board::Cell;
pub use config::ClientConfig;
pub use engine::{Command, CommandOutcome, GameSetup, GameStateSnapshot, RulesEngine};
pub use geometry::BoardLayout;
pub use trade::{TradeDraft, TradeSide};
pub use view::{Outcome, UiContext, UiEvent, ViewController};
