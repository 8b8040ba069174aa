use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::board::Cell;
use crate::engine::command::TradeOffer;
use crate::types::{DeckType, Property, Space, TurnPhase};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerSnapshot {
    pub position: Cell,
    pub funds: i64,
    #[serde(default)]
    pub eliminated: bool,
    #[serde(default)]
    pub jail_turns_remaining: u8,
    #[serde(default)]
    pub jail_free_cards: BTreeSet<DeckType>,
}

impl PlayerSnapshot {
    pub fn new(position: Cell, funds: i64) -> Self {
        Self {
            position,
            funds,
            eliminated: false,
            jail_turns_remaining: 0,
            jail_free_cards: BTreeSet::new(),
        }
    }

    pub fn in_jail(&self) -> bool {
        self.jail_turns_remaining > 0
    }
}

/// An auction in progress. `bidders` is ordered: the player to bid next is
/// first and the current highest bidder is last.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Auction {
    pub property: Property,
    pub highest_bid: u32,
    pub bidders: Vec<usize>,
}

impl Auction {
    pub fn leading_bidder(&self) -> Option<usize> {
        if self.highest_bid == 0 {
            return None;
        }
        self.bidders.last().copied()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PropertyState {
    pub property: Property,
    #[serde(default)]
    pub owner: Option<usize>,
    #[serde(default)]
    pub mortgaged: bool,
    #[serde(default)]
    pub building_level: u8,
}

/// Authoritative game state as last reported by the engine. Replaced
/// wholesale after every command; the client never edits one.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub players: Vec<PlayerSnapshot>,
    pub active_player: usize,
    pub controlling_player: usize,
    pub phase: TurnPhase,
    #[serde(default)]
    pub auction: Option<Auction>,
    #[serde(default)]
    pub last_roll: Option<(u8, u8)>,
    #[serde(default)]
    pub properties: Vec<PropertyState>,
    #[serde(default)]
    pub pending_trade: Option<TradeOffer>,
}

impl GameStateSnapshot {
    /// A fresh game: everyone on Go with the same funds, nothing owned.
    pub fn new(player_count: usize, starting_funds: i64) -> Self {
        Self {
            players: (0..player_count)
                .map(|_| PlayerSnapshot::new(Cell::from(Space::Go), starting_funds))
                .collect(),
            active_player: 0,
            controlling_player: 0,
            phase: TurnPhase::WaitingForRoll,
            auction: None,
            last_roll: None,
            properties: Vec::new(),
            pending_trade: None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == TurnPhase::GameOver
    }

    pub fn player(&self, index: usize) -> Option<&PlayerSnapshot> {
        self.players.get(index)
    }

    pub fn player_count(&self) -> usize {
        self.players.len()
    }

    pub fn is_eliminated(&self, player: usize) -> bool {
        self.player(player).map_or(true, |p| p.eliminated)
    }

    pub fn remaining_players(&self) -> impl Iterator<Item = usize> + '_ {
        self.players
            .iter()
            .enumerate()
            .filter(|(_, player)| !player.eliminated)
            .map(|(idx, _)| idx)
    }

    /// The last player standing once the game is over.
    pub fn winner(&self) -> Option<usize> {
        if !self.is_game_over() {
            return None;
        }
        let mut remaining = self.remaining_players();
        match (remaining.next(), remaining.next()) {
            (Some(winner), None) => Some(winner),
            _ => None,
        }
    }

    pub fn property_state(&self, property: Property) -> Option<&PropertyState> {
        self.properties
            .iter()
            .find(|state| state.property == property)
    }

    pub fn owner_of(&self, property: Property) -> Option<usize> {
        self.property_state(property).and_then(|state| state.owner)
    }

    pub fn is_mortgaged(&self, property: Property) -> bool {
        self.property_state(property)
            .is_some_and(|state| state.mortgaged)
    }

    pub fn building_level(&self, property: Property) -> u8 {
        self.property_state(property)
            .map_or(0, |state| state.building_level)
    }

    pub fn holds_jail_free_card(&self, player: usize, deck: DeckType) -> bool {
        self.player(player)
            .is_some_and(|p| p.jail_free_cards.contains(&deck))
    }
}
