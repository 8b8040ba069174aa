use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::engine::snapshot::GameStateSnapshot;
use crate::types::{ActionType, DeckType, Property};

/// One side of a trade: what a single player hands over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeAssets {
    pub cash: u32,
    pub deeds: BTreeSet<Property>,
    pub jail_free_cards: BTreeSet<DeckType>,
}

impl TradeAssets {
    pub fn is_empty(&self) -> bool {
        self.cash == 0 && self.deeds.is_empty() && self.jail_free_cards.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradeOffer {
    pub offering_player: usize,
    pub considering_player: usize,
    pub offer: TradeAssets,
    pub consideration: TradeAssets,
}

impl TradeOffer {
    /// The same exchange seen from the other player. Proposing the reciprocal
    /// of a pending offer is how the considering player accepts it.
    pub fn reciprocal(&self) -> TradeOffer {
        TradeOffer {
            offering_player: self.considering_player,
            considering_player: self.offering_player,
            offer: self.consideration.clone(),
            consideration: self.offer.clone(),
        }
    }
}

/// A player intent forwarded to the engine. The same value is used to ask
/// whether the intent would currently be legal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Command {
    RollDice { player: usize },
    BuyProperty { player: usize },
    AuctionProperty { player: usize },
    UseJailFreeCard { player: usize },
    PayBail { player: usize },
    Bid { player: usize, amount: u32 },
    DeclineBid { player: usize },
    EndTurn { player: usize },
    Resign { player: usize },
    Mortgage { player: usize, property: Property },
    Unmortgage { player: usize, property: Property },
    BuyBuilding { player: usize, property: Property },
    SellBuilding { player: usize, property: Property },
    ProposeTrade { trade: TradeOffer },
    DeclineTrade { player: usize },
    CancelTrade { player: usize },
}

impl Command {
    pub fn player(&self) -> usize {
        match self {
            Command::RollDice { player }
            | Command::BuyProperty { player }
            | Command::AuctionProperty { player }
            | Command::UseJailFreeCard { player }
            | Command::PayBail { player }
            | Command::Bid { player, .. }
            | Command::DeclineBid { player }
            | Command::EndTurn { player }
            | Command::Resign { player }
            | Command::Mortgage { player, .. }
            | Command::Unmortgage { player, .. }
            | Command::BuyBuilding { player, .. }
            | Command::SellBuilding { player, .. }
            | Command::DeclineTrade { player }
            | Command::CancelTrade { player } => *player,
            Command::ProposeTrade { trade } => trade.offering_player,
        }
    }

    pub fn action_type(&self) -> ActionType {
        match self {
            Command::RollDice { .. } => ActionType::Roll,
            Command::BuyProperty { .. } => ActionType::BuyProperty,
            Command::AuctionProperty { .. } => ActionType::AuctionProperty,
            Command::UseJailFreeCard { .. } => ActionType::UseJailFreeCard,
            Command::PayBail { .. } => ActionType::PayBail,
            Command::Bid { .. } => ActionType::Bid,
            Command::DeclineBid { .. } => ActionType::DeclineBid,
            Command::EndTurn { .. } => ActionType::EndTurn,
            Command::Resign { .. } => ActionType::Resign,
            Command::Mortgage { .. } => ActionType::Mortgage,
            Command::Unmortgage { .. } => ActionType::Unmortgage,
            Command::BuyBuilding { .. } => ActionType::BuyBuilding,
            Command::SellBuilding { .. } => ActionType::SellBuilding,
            Command::ProposeTrade { .. } => ActionType::ProposeTrade,
            Command::DeclineTrade { .. } => ActionType::DeclineTrade,
            Command::CancelTrade { .. } => ActionType::CancelTrade,
        }
    }

    /// The command behind a control that needs only the acting player.
    pub fn for_player(action: ActionType, player: usize) -> Option<Command> {
        let command = match action {
            ActionType::Roll => Command::RollDice { player },
            ActionType::BuyProperty => Command::BuyProperty { player },
            ActionType::AuctionProperty => Command::AuctionProperty { player },
            ActionType::UseJailFreeCard => Command::UseJailFreeCard { player },
            ActionType::PayBail => Command::PayBail { player },
            ActionType::DeclineBid => Command::DeclineBid { player },
            ActionType::EndTurn => Command::EndTurn { player },
            ActionType::Resign => Command::Resign { player },
            ActionType::DeclineTrade => Command::DeclineTrade { player },
            ActionType::CancelTrade => Command::CancelTrade { player },
            _ => return None,
        };
        Some(command)
    }

    /// The command behind a manage-mode control aimed at one property.
    pub fn for_property(action: ActionType, player: usize, property: Property) -> Option<Command> {
        let command = match action {
            ActionType::Mortgage => Command::Mortgage { player, property },
            ActionType::Unmortgage => Command::Unmortgage { player, property },
            ActionType::BuyBuilding => Command::BuyBuilding { player, property },
            ActionType::SellBuilding => Command::SellBuilding { player, property },
            _ => return None,
        };
        Some(command)
    }
}

/// The engine's answer to a command. A rejection still carries the state the
/// engine considers current so the client can redraw from it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    Accepted(GameStateSnapshot),
    Rejected {
        reason: String,
        snapshot: GameStateSnapshot,
    },
}

impl CommandOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, CommandOutcome::Accepted(_))
    }

}
