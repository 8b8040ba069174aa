//! Everything the front end needs to draw one frame, computed from a
//! snapshot and the local context. Drawing itself happens elsewhere.

use itertools::Itertools;

use crate::board::{Cell, player_name};
use crate::engine::{GameStateSnapshot, RulesEngine};
use crate::geometry::{BoardLayout, Point, Polygon};
use crate::trade::{TradeSide, describe_assets};
use crate::types::{Property, PropertyGroup};
use crate::view::UiContext;

#[derive(Debug, Clone, PartialEq)]
pub struct CellView {
    pub cell: Cell,
    pub polygon: Polygon,
    pub property: Option<Property>,
    pub group: Option<PropertyGroup>,
    /// List price of the deed on this cell.
    pub price: Option<u32>,
    pub owner: Option<usize>,
    pub mortgaged: bool,
    pub building_level: u8,
    pub selected: bool,
    /// Which side of the open draft holds this deed.
    pub in_trade: Option<TradeSide>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PieceView {
    pub player: usize,
    pub cell: Cell,
    pub position: Point,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FundsRow {
    pub player: usize,
    pub name: String,
    pub funds: i64,
    pub controlling: bool,
    pub in_jail: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct DisplayText {
    pub funds: Vec<FundsRow>,
    pub dice: Option<(u8, u8)>,
    pub auction: Option<String>,
    pub banners: Vec<String>,
    pub trade: Vec<String>,
    pub mode: String,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoardFrame {
    pub size: f64,
    pub cells: Vec<CellView>,
    pub pieces: Vec<PieceView>,
    pub text: DisplayText,
}

impl BoardFrame {
    pub fn render<E: RulesEngine + ?Sized>(
        layout: &BoardLayout,
        snapshot: &GameStateSnapshot,
        context: &UiContext,
        engine: &E,
        status: Option<&str>,
    ) -> Self {
        let cells = Cell::all()
            .map(|cell| cell_view(layout, snapshot, context, engine, cell))
            .collect();
        Self {
            size: layout.size,
            cells,
            pieces: pieces(layout, snapshot),
            text: DisplayText {
                funds: funds_table(snapshot),
                dice: snapshot.last_roll,
                auction: auction_line(snapshot),
                banners: banners(snapshot),
                trade: trade_lines(snapshot, context),
                mode: mode_line(context),
                status: status.map(str::to_string),
            },
        }
    }

    pub fn cell(&self, cell: Cell) -> &CellView {
        &self.cells[cell.index()]
    }
}

fn cell_view<E: RulesEngine + ?Sized>(
    layout: &BoardLayout,
    snapshot: &GameStateSnapshot,
    context: &UiContext,
    engine: &E,
    cell: Cell,
) -> CellView {
    let property = engine.cell_to_property(cell);
    CellView {
        cell,
        polygon: layout.cell_polygon(cell),
        property,
        group: property.map(|p| engine.property_group(p)),
        price: property.map(|p| engine.property_price(p)),
        owner: property.and_then(|p| snapshot.owner_of(p)),
        mortgaged: property.is_some_and(|p| snapshot.is_mortgaged(p)),
        building_level: property.map_or(0, |p| snapshot.building_level(p)),
        selected: property.is_some() && property == context.selected(),
        in_trade: property.and_then(|p| {
            let draft = context.draft()?;
            [TradeSide::Offer, TradeSide::Consideration]
                .into_iter()
                .find(|side| draft.side(*side).deeds.contains(&p))
        }),
    }
}

/// Pieces sharing a cell are spread across it so they stay distinguishable.
fn pieces(layout: &BoardLayout, snapshot: &GameStateSnapshot) -> Vec<PieceView> {
    let spread = layout.cell_width() * 0.2;
    snapshot
        .players
        .iter()
        .enumerate()
        .filter(|(_, player)| !player.eliminated)
        .map(|(idx, player)| {
            let centroid = layout.cell_polygon(player.position).centroid();
            let shift = (idx as f64 - 1.5) * spread;
            PieceView {
                player: idx,
                cell: player.position,
                position: Point::new(centroid.x + shift, centroid.y + shift / 2.0),
            }
        })
        .collect()
}

pub fn funds_table(snapshot: &GameStateSnapshot) -> Vec<FundsRow> {
    snapshot
        .players
        .iter()
        .enumerate()
        .filter(|(_, player)| !player.eliminated)
        .map(|(idx, player)| FundsRow {
            player: idx,
            name: player_name(idx),
            funds: player.funds,
            controlling: idx == snapshot.controlling_player,
            in_jail: player.in_jail(),
        })
        .collect()
}

pub fn auction_line(snapshot: &GameStateSnapshot) -> Option<String> {
    let auction = snapshot.auction.as_ref()?;
    let line = match auction.leading_bidder() {
        Some(leader) => format!(
            "Auction for {}: ${} by {}",
            auction.property,
            auction.highest_bid,
            player_name(leader)
        ),
        None => format!("Auction for {}: no bids yet", auction.property),
    };
    Some(line)
}

pub fn banners(snapshot: &GameStateSnapshot) -> Vec<String> {
    if snapshot.is_game_over() {
        let banner = match snapshot.winner() {
            Some(winner) => format!("Game over: {} wins", player_name(winner)),
            None => "Game over".to_string(),
        };
        return vec![banner];
    }
    let mut banners = vec![format!(
        "{}'s turn ({})",
        player_name(snapshot.active_player),
        snapshot.phase
    )];
    if snapshot.controlling_player != snapshot.active_player {
        banners.push(format!(
            "{} to act",
            player_name(snapshot.controlling_player)
        ));
    }
    let eliminated = snapshot
        .players
        .iter()
        .enumerate()
        .filter(|(_, player)| player.eliminated)
        .map(|(idx, _)| player_name(idx))
        .join(", ");
    if !eliminated.is_empty() {
        banners.push(format!("Eliminated: {eliminated}"));
    }
    banners
}

fn trade_lines(snapshot: &GameStateSnapshot, context: &UiContext) -> Vec<String> {
    if let Some(draft) = context.draft() {
        let mut lines = vec![format!(
            "Drafting trade with {}",
            player_name(draft.considering_player())
        )];
        lines.extend(draft.summary());
        return lines;
    }
    match &snapshot.pending_trade {
        Some(offer) => vec![
            format!(
                "{} offers {}: {}",
                player_name(offer.offering_player),
                player_name(offer.considering_player),
                describe_assets(&offer.offer)
            ),
            format!("in exchange for: {}", describe_assets(&offer.consideration)),
        ],
        None => Vec::new(),
    }
}

fn mode_line(context: &UiContext) -> String {
    match context.selected() {
        Some(property) => format!("mode: {} ({property})", context.mode_name()),
        None => format!("mode: {}", context.mode_name()),
    }
}
