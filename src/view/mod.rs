mod context;
mod controller;
pub mod frame;

use crate::trade::TradeSide;
use crate::types::{ActionType, DeckType};

pub use context::UiContext;
pub use controller::{ViewController, ViewError};
pub use frame::{BoardFrame, CellView, DisplayText, FundsRow, PieceView};

/// A user gesture, already translated from keys or mouse clicks.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum UiEvent {
    Activate(ActionType),
    /// Bid the current highest bid plus `increment`.
    Bid { increment: u32 },
    /// A click in board coordinates.
    Click { x: f64, y: f64 },
    OpenTrade { partner: usize },
    AdjustCash { side: TradeSide, delta: i64 },
    ToggleJailFreeCard { side: TradeSide, deck: DeckType },
}

/// How an event was resolved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// Only local state changed; the engine was not contacted.
    Local,
    /// Exactly one command went to the engine.
    Forwarded { accepted: bool },
    Ignored,
}
