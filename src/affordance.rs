//! Which controls are live for the current snapshot and interaction mode.
//!
//! Every flag is a mode gate combined with the engine's own legality answer.
//! Nothing here is cached; callers re-evaluate after each change.

use std::collections::BTreeMap;

use crate::engine::{Command, GameStateSnapshot, RulesEngine};
use crate::types::ActionType;
use crate::view::UiContext;

pub const BID_INCREMENTS: [u32; 4] = [5, 10, 25, 50];

/// Player-only commands offered while no mode is active.
const NORMAL_COMMANDS: [ActionType; 7] = [
    ActionType::Roll,
    ActionType::BuyProperty,
    ActionType::AuctionProperty,
    ActionType::UseJailFreeCard,
    ActionType::PayBail,
    ActionType::DeclineBid,
    ActionType::EndTurn,
];

const MANAGE_COMMANDS: [ActionType; 4] = [
    ActionType::Mortgage,
    ActionType::Unmortgage,
    ActionType::BuyBuilding,
    ActionType::SellBuilding,
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BidOption {
    pub increment: u32,
    pub amount: u32,
    pub enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnabledSet {
    actions: BTreeMap<ActionType, bool>,
    pub bids: Vec<BidOption>,
    /// One start-trade control per other player.
    pub trade_partners: Vec<(usize, bool)>,
}

impl Default for EnabledSet {
    fn default() -> Self {
        Self {
            actions: ActionType::ALL.iter().map(|action| (*action, false)).collect(),
            bids: Vec::new(),
            trade_partners: Vec::new(),
        }
    }
}

impl EnabledSet {
    pub fn is_enabled(&self, action: ActionType) -> bool {
        self.actions.get(&action).copied().unwrap_or(false)
    }

    pub fn bid_option(&self, increment: u32) -> Option<&BidOption> {
        self.bids.iter().find(|bid| bid.increment == increment)
    }

    pub fn partner_enabled(&self, partner: usize) -> bool {
        self.trade_partners
            .iter()
            .any(|(player, enabled)| *player == partner && *enabled)
    }

    pub fn enabled_actions(&self) -> impl Iterator<Item = ActionType> + '_ {
        self.actions
            .iter()
            .filter(|(_, enabled)| **enabled)
            .map(|(action, _)| *action)
    }

    pub fn any_enabled(&self) -> bool {
        self.enabled_actions().next().is_some()
            || self.bids.iter().any(|bid| bid.enabled)
            || self.trade_partners.iter().any(|(_, enabled)| *enabled)
    }

    fn set(&mut self, action: ActionType, enabled: bool) {
        self.actions.insert(action, enabled);
    }
}

pub fn evaluate<E: RulesEngine + ?Sized>(
    snapshot: &GameStateSnapshot,
    context: &UiContext,
    engine: &E,
    increments: &[u32],
) -> EnabledSet {
    let mut enabled = EnabledSet::default();
    if snapshot.is_game_over() {
        return enabled;
    }

    let player = snapshot.controlling_player;
    let player_active = !snapshot.is_eliminated(player);
    let legal = |command: Command| engine.is_action_legal(&command);

    match context {
        UiContext::Normal => {
            for action in NORMAL_COMMANDS {
                if let Some(command) = Command::for_player(action, player) {
                    enabled.set(action, legal(command));
                }
            }
            if let Some(auction) = &snapshot.auction {
                enabled.bids = increments
                    .iter()
                    .map(|&increment| {
                        let amount = auction.highest_bid + increment;
                        BidOption {
                            increment,
                            amount,
                            enabled: legal(Command::Bid { player, amount }),
                        }
                    })
                    .collect();
            }
            let any_bid = enabled.bids.iter().any(|bid| bid.enabled);
            enabled.set(ActionType::Bid, any_bid);
            enabled.set(ActionType::StartManage, player_active);
            enabled.trade_partners = (0..snapshot.player_count())
                .filter(|partner| *partner != player)
                .map(|partner| (partner, player_active && !snapshot.is_eliminated(partner)))
                .collect();
        }
        UiContext::Manage { selected } => {
            enabled.set(ActionType::FinishManage, player_active);
            if let Some(property) = *selected {
                for action in MANAGE_COMMANDS {
                    if let Some(command) = Command::for_property(action, player, property) {
                        enabled.set(action, legal(command));
                    }
                }
            }
        }
        UiContext::Trade(draft) => {
            let pending = snapshot.pending_trade.as_ref();
            let cancel = match pending {
                Some(offer) if offer.offering_player == player => {
                    legal(Command::CancelTrade { player })
                }
                _ => true,
            };
            enabled.set(ActionType::CancelTrade, cancel);
            enabled.set(
                ActionType::DeclineTrade,
                legal(Command::DeclineTrade { player }),
            );
            enabled.set(
                ActionType::ProposeTrade,
                legal(Command::ProposeTrade {
                    trade: draft.clone().commit(),
                }),
            );
            let accept = match pending {
                Some(offer)
                    if offer.offering_player == draft.considering_player()
                        && offer.considering_player == player =>
                {
                    legal(Command::ProposeTrade {
                        trade: offer.reciprocal(),
                    })
                }
                _ => false,
            };
            enabled.set(ActionType::AcceptTrade, accept);
        }
    }

    enabled.set(ActionType::Resign, legal(Command::Resign { player }));
    enabled
}
