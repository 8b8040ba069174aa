//! Client-held trade draft, built up one click at a time before it is
//! committed as a single proposal.

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter};

use crate::board::player_name;
use crate::engine::{GameStateSnapshot, TradeAssets, TradeOffer};
use crate::types::{DeckType, Property};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum TradeSide {
    /// What the offering player gives up.
    Offer,
    /// What the offering player asks for in return.
    Consideration,
}

impl TradeSide {
    pub fn other(self) -> TradeSide {
        match self {
            TradeSide::Offer => TradeSide::Consideration,
            TradeSide::Consideration => TradeSide::Offer,
        }
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum TradeError {
    #[error("a player cannot trade with themselves (player {0})")]
    SamePlayer(usize),
    #[error("trade cash cannot be negative, got {0}")]
    NegativeCash(i64),
    #[error("trade cash {0} exceeds the largest amount a side can carry")]
    CashOverflow(i64),
}

/// What a toggle did to the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    Added,
    Removed,
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TradeDraft {
    offering_player: usize,
    considering_player: usize,
    offer: TradeAssets,
    consideration: TradeAssets,
}

impl TradeDraft {
    pub fn begin(offering_player: usize, considering_player: usize) -> Result<Self, TradeError> {
        if offering_player == considering_player {
            return Err(TradeError::SamePlayer(offering_player));
        }
        Ok(Self {
            offering_player,
            considering_player,
            offer: TradeAssets::default(),
            consideration: TradeAssets::default(),
        })
    }

    pub fn offering_player(&self) -> usize {
        self.offering_player
    }

    pub fn considering_player(&self) -> usize {
        self.considering_player
    }

    pub fn player_for(&self, side: TradeSide) -> usize {
        match side {
            TradeSide::Offer => self.offering_player,
            TradeSide::Consideration => self.considering_player,
        }
    }

    pub fn side(&self, side: TradeSide) -> &TradeAssets {
        match side {
            TradeSide::Offer => &self.offer,
            TradeSide::Consideration => &self.consideration,
        }
    }

    fn side_mut(&mut self, side: TradeSide) -> &mut TradeAssets {
        match side {
            TradeSide::Offer => &mut self.offer,
            TradeSide::Consideration => &mut self.consideration,
        }
    }

    /// The side whose player owns `property` in `snapshot`, if either does.
    pub fn side_owning(&self, property: Property, snapshot: &GameStateSnapshot) -> Option<TradeSide> {
        let owner = snapshot.owner_of(property)?;
        [TradeSide::Offer, TradeSide::Consideration]
            .into_iter()
            .find(|side| self.player_for(*side) == owner)
    }

    /// Removes the deed if it is already on `side`, otherwise adds it when
    /// the side's player owns it. Anything else leaves the draft alone.
    pub fn toggle_property(
        &mut self,
        side: TradeSide,
        property: Property,
        snapshot: &GameStateSnapshot,
    ) -> Toggle {
        if self.side_mut(side).deeds.remove(&property) {
            return Toggle::Removed;
        }
        if self.side(side.other()).deeds.contains(&property) {
            return Toggle::Ignored;
        }
        if snapshot.owner_of(property) != Some(self.player_for(side)) {
            return Toggle::Ignored;
        }
        self.side_mut(side).deeds.insert(property);
        Toggle::Added
    }

    pub fn toggle_jail_free_card(
        &mut self,
        side: TradeSide,
        deck: DeckType,
        snapshot: &GameStateSnapshot,
    ) -> Toggle {
        if self.side_mut(side).jail_free_cards.remove(&deck) {
            return Toggle::Removed;
        }
        if !snapshot.holds_jail_free_card(self.player_for(side), deck) {
            return Toggle::Ignored;
        }
        self.side_mut(side).jail_free_cards.insert(deck);
        Toggle::Added
    }

    pub fn set_cash(&mut self, side: TradeSide, amount: i64) -> Result<(), TradeError> {
        if amount < 0 {
            return Err(TradeError::NegativeCash(amount));
        }
        let cash = u32::try_from(amount).map_err(|_| TradeError::CashOverflow(amount))?;
        self.side_mut(side).cash = cash;
        Ok(())
    }

    pub fn adjust_cash(&mut self, side: TradeSide, delta: i64) -> Result<(), TradeError> {
        let current = i64::from(self.side(side).cash);
        self.set_cash(side, current.saturating_add(delta))
    }

    pub fn is_empty(&self) -> bool {
        self.offer.is_empty() && self.consideration.is_empty()
    }

    /// Drops deeds and cards their side's player no longer holds. Returns
    /// true when anything was dropped.
    pub fn retain_held(&mut self, snapshot: &GameStateSnapshot) -> bool {
        let mut dropped = false;
        for side in [TradeSide::Offer, TradeSide::Consideration] {
            let player = self.player_for(side);
            let assets = self.side_mut(side);
            let before = assets.deeds.len() + assets.jail_free_cards.len();
            assets
                .deeds
                .retain(|deed| snapshot.owner_of(*deed) == Some(player));
            assets
                .jail_free_cards
                .retain(|deck| snapshot.holds_jail_free_card(player, *deck));
            dropped |= before != assets.deeds.len() + assets.jail_free_cards.len();
        }
        dropped
    }

    /// The record the engine judges. Both sides travel together.
    pub fn commit(self) -> TradeOffer {
        TradeOffer {
            offering_player: self.offering_player,
            considering_player: self.considering_player,
            offer: self.offer,
            consideration: self.consideration,
        }
    }

    pub fn cancel(self) {}

    /// One line per side, e.g. `Player 1 gives: $50, BROWN1`.
    pub fn summary(&self) -> Vec<String> {
        [TradeSide::Offer, TradeSide::Consideration]
            .into_iter()
            .map(|side| {
                format!(
                    "{} gives: {}",
                    player_name(self.player_for(side)),
                    describe_assets(self.side(side))
                )
            })
            .collect()
    }
}

pub fn describe_assets(assets: &TradeAssets) -> String {
    if assets.is_empty() {
        return "nothing".to_string();
    }
    let cash = (assets.cash > 0).then(|| format!("${}", assets.cash));
    let deeds = assets.deeds.iter().map(|deed| deed.to_string());
    let cards = assets
        .jail_free_cards
        .iter()
        .map(|deck| format!("{deck} jail card"));
    cash.into_iter().chain(deeds).chain(cards).join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::PropertyState;

    fn snapshot_with_owners(owners: &[(Property, usize)]) -> GameStateSnapshot {
        let mut snapshot = GameStateSnapshot::new(3, 1500);
        snapshot.properties = owners
            .iter()
            .map(|(property, owner)| PropertyState {
                property: *property,
                owner: Some(*owner),
                mortgaged: false,
                building_level: 0,
            })
            .collect();
        snapshot
    }

    #[test]
    fn begin_refuses_a_self_trade() {
        assert_eq!(TradeDraft::begin(2, 2), Err(TradeError::SamePlayer(2)));
        let draft = TradeDraft::begin(0, 1).unwrap();
        assert!(draft.is_empty());
    }

    #[test]
    fn toggling_twice_restores_the_side() {
        let snapshot = snapshot_with_owners(&[(Property::Orange1, 0)]);
        let mut draft = TradeDraft::begin(0, 1).unwrap();
        assert_eq!(
            draft.toggle_property(TradeSide::Offer, Property::Orange1, &snapshot),
            Toggle::Added
        );
        assert!(draft.side(TradeSide::Offer).deeds.contains(&Property::Orange1));
        assert_eq!(
            draft.toggle_property(TradeSide::Offer, Property::Orange1, &snapshot),
            Toggle::Removed
        );
        assert!(draft.is_empty());
    }

    #[test]
    fn deeds_must_belong_to_the_side_player() {
        let snapshot = snapshot_with_owners(&[(Property::Orange1, 0), (Property::Red2, 2)]);
        let mut draft = TradeDraft::begin(0, 1).unwrap();
        assert_eq!(
            draft.toggle_property(TradeSide::Consideration, Property::Orange1, &snapshot),
            Toggle::Ignored
        );
        assert_eq!(
            draft.toggle_property(TradeSide::Offer, Property::Red2, &snapshot),
            Toggle::Ignored
        );
        assert_eq!(
            draft.toggle_property(TradeSide::Offer, Property::Blue1, &snapshot),
            Toggle::Ignored
        );
        assert!(draft.is_empty());
    }

    #[test]
    fn side_owning_follows_the_snapshot() {
        let snapshot = snapshot_with_owners(&[(Property::Green1, 1), (Property::Red2, 2)]);
        let draft = TradeDraft::begin(0, 1).unwrap();
        assert_eq!(
            draft.side_owning(Property::Green1, &snapshot),
            Some(TradeSide::Consideration)
        );
        assert_eq!(draft.side_owning(Property::Red2, &snapshot), None);
        assert_eq!(draft.side_owning(Property::Blue2, &snapshot), None);
    }

    #[test]
    fn jail_cards_need_to_be_held() {
        let mut snapshot = GameStateSnapshot::new(2, 1500);
        snapshot.players[1].jail_free_cards.insert(DeckType::Chance);
        let mut draft = TradeDraft::begin(0, 1).unwrap();
        assert_eq!(
            draft.toggle_jail_free_card(TradeSide::Offer, DeckType::Chance, &snapshot),
            Toggle::Ignored
        );
        assert_eq!(
            draft.toggle_jail_free_card(TradeSide::Consideration, DeckType::Chance, &snapshot),
            Toggle::Added
        );
    }

    #[test]
    fn assets_that_changed_hands_are_dropped() {
        let snapshot = snapshot_with_owners(&[(Property::Brown1, 0), (Property::Brown2, 0)]);
        let mut draft = TradeDraft::begin(0, 1).unwrap();
        draft.toggle_property(TradeSide::Offer, Property::Brown1, &snapshot);
        draft.toggle_property(TradeSide::Offer, Property::Brown2, &snapshot);
        assert!(!draft.retain_held(&snapshot));

        let after = snapshot_with_owners(&[(Property::Brown1, 2), (Property::Brown2, 0)]);
        assert!(draft.retain_held(&after));
        assert_eq!(
            draft.side(TradeSide::Offer).deeds.iter().copied().collect::<Vec<_>>(),
            vec![Property::Brown2]
        );
    }

    #[test]
    fn cash_is_never_negative() {
        let mut draft = TradeDraft::begin(0, 1).unwrap();
        draft.set_cash(TradeSide::Offer, 40).unwrap();
        draft.adjust_cash(TradeSide::Offer, 10).unwrap();
        assert_eq!(draft.side(TradeSide::Offer).cash, 50);
        assert_eq!(
            draft.adjust_cash(TradeSide::Offer, -60),
            Err(TradeError::NegativeCash(-10))
        );
        assert_eq!(draft.side(TradeSide::Offer).cash, 50);
    }

    #[test]
    fn cash_beyond_u32_is_an_overflow() {
        let mut draft = TradeDraft::begin(0, 1).unwrap();
        let too_much = i64::from(u32::MAX) + 1;
        assert_eq!(
            draft.set_cash(TradeSide::Consideration, too_much),
            Err(TradeError::CashOverflow(too_much))
        );
        assert_eq!(
            draft.adjust_cash(TradeSide::Consideration, i64::MAX),
            Err(TradeError::CashOverflow(i64::MAX))
        );
        assert_eq!(draft.side(TradeSide::Consideration).cash, 0);
    }

    #[test]
    fn commit_carries_both_sides() {
        let snapshot = snapshot_with_owners(&[(Property::Brown1, 0), (Property::Blue2, 1)]);
        let mut draft = TradeDraft::begin(0, 1).unwrap();
        draft.toggle_property(TradeSide::Offer, Property::Brown1, &snapshot);
        draft.toggle_property(TradeSide::Consideration, Property::Blue2, &snapshot);
        draft.set_cash(TradeSide::Offer, 200).unwrap();
        assert_eq!(
            draft.summary(),
            vec![
                "Player 1 gives: $200, BROWN1".to_string(),
                "Player 2 gives: BLUE2".to_string(),
            ]
        );

        let trade = draft.commit();
        assert_eq!(trade.offering_player, 0);
        assert_eq!(trade.considering_player, 1);
        assert_eq!(trade.offer.cash, 200);
        assert!(trade.offer.deeds.contains(&Property::Brown1));
        assert!(trade.consideration.deeds.contains(&Property::Blue2));
    }
}
