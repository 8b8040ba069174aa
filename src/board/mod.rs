//! Static identity tables for the 40-space board.
//!
//! Nothing here depends on game state: ownership, mortgages and buildings
//! arrive with each engine snapshot.

use std::collections::HashMap;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use strum::IntoEnumIterator;

use crate::types::{Property, PropertyGroup, Space};

pub const NUMBER_OF_SPACES: usize = 40;
pub const SPACES_PER_SIDE: usize = 10;
pub const SIDE_COUNT: usize = 4;
pub const HOTEL_LEVEL: u8 = 5;
pub const MAX_PLAYERS: usize = 4;

/// One of the 40 ordered positions around the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Cell(u8);

impl Cell {
    pub fn new(index: usize) -> Option<Self> {
        (index < NUMBER_OF_SPACES).then_some(Cell(index as u8))
    }

    pub fn from_side_offset(side: usize, offset: usize) -> Option<Self> {
        if side >= SIDE_COUNT || offset >= SPACES_PER_SIDE {
            return None;
        }
        Cell::new(side * SPACES_PER_SIDE + offset)
    }

    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn side(self) -> usize {
        self.index() / SPACES_PER_SIDE
    }

    pub fn offset(self) -> usize {
        self.index() % SPACES_PER_SIDE
    }

    pub fn is_corner(self) -> bool {
        self.offset() == 0
    }

    pub fn space(self) -> Space {
        SPACES[self.index()]
    }

    pub fn all() -> impl Iterator<Item = Cell> {
        (0..NUMBER_OF_SPACES as u8).map(Cell)
    }
}

impl From<Space> for Cell {
    fn from(space: Space) -> Self {
        Cell(space as u8)
    }
}

impl From<Cell> for u8 {
    fn from(cell: Cell) -> Self {
        cell.0
    }
}

impl TryFrom<u8> for Cell {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Cell::new(value as usize).ok_or_else(|| format!("cell index {value} out of range"))
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.index(), self.space())
    }
}

static SPACES: Lazy<Vec<Space>> = Lazy::new(|| Space::iter().collect());

static PROPERTY_SPACES: Lazy<HashMap<Property, Space>> = Lazy::new(|| {
    Space::iter()
        .filter_map(|space| space_to_property(space).map(|property| (property, space)))
        .collect()
});

pub fn space_to_property(space: Space) -> Option<Property> {
    use Property as P;
    let property = match space {
        Space::Brown1 => P::Brown1,
        Space::Brown2 => P::Brown2,
        Space::LightBlue1 => P::LightBlue1,
        Space::LightBlue2 => P::LightBlue2,
        Space::LightBlue3 => P::LightBlue3,
        Space::Magenta1 => P::Magenta1,
        Space::Magenta2 => P::Magenta2,
        Space::Magenta3 => P::Magenta3,
        Space::Orange1 => P::Orange1,
        Space::Orange2 => P::Orange2,
        Space::Orange3 => P::Orange3,
        Space::Red1 => P::Red1,
        Space::Red2 => P::Red2,
        Space::Red3 => P::Red3,
        Space::Yellow1 => P::Yellow1,
        Space::Yellow2 => P::Yellow2,
        Space::Yellow3 => P::Yellow3,
        Space::Green1 => P::Green1,
        Space::Green2 => P::Green2,
        Space::Green3 => P::Green3,
        Space::Blue1 => P::Blue1,
        Space::Blue2 => P::Blue2,
        Space::Utility1 => P::Utility1,
        Space::Utility2 => P::Utility2,
        Space::Railroad1 => P::Railroad1,
        Space::Railroad2 => P::Railroad2,
        Space::Railroad3 => P::Railroad3,
        Space::Railroad4 => P::Railroad4,
        Space::Go
        | Space::Jail
        | Space::FreeParking
        | Space::GoToJail
        | Space::CommunityChest1
        | Space::CommunityChest2
        | Space::CommunityChest3
        | Space::Chance1
        | Space::Chance2
        | Space::Chance3
        | Space::IncomeTax
        | Space::LuxuryTax => return None,
    };
    Some(property)
}

pub fn cell_to_property(cell: Cell) -> Option<Property> {
    space_to_property(cell.space())
}

pub fn property_to_cell(property: Property) -> Cell {
    // Every property has exactly one space; the table is built from the same match.
    PROPERTY_SPACES
        .get(&property)
        .copied()
        .map(Cell::from)
        .unwrap_or(Cell(0))
}

pub fn property_group(property: Property) -> PropertyGroup {
    use Property::*;
    match property {
        Brown1 | Brown2 => PropertyGroup::Brown,
        LightBlue1 | LightBlue2 | LightBlue3 => PropertyGroup::LightBlue,
        Magenta1 | Magenta2 | Magenta3 => PropertyGroup::Magenta,
        Orange1 | Orange2 | Orange3 => PropertyGroup::Orange,
        Red1 | Red2 | Red3 => PropertyGroup::Red,
        Yellow1 | Yellow2 | Yellow3 => PropertyGroup::Yellow,
        Green1 | Green2 | Green3 => PropertyGroup::Green,
        Blue1 | Blue2 => PropertyGroup::Blue,
        Utility1 | Utility2 => PropertyGroup::Utility,
        Railroad1 | Railroad2 | Railroad3 | Railroad4 => PropertyGroup::Railroad,
    }
}

/// List price printed on the deed.
pub fn property_price(property: Property) -> u32 {
    use Property::*;
    match property {
        Brown1 | Brown2 => 60,
        LightBlue1 | LightBlue2 => 100,
        LightBlue3 => 120,
        Magenta1 | Magenta2 => 140,
        Magenta3 => 160,
        Orange1 | Orange2 => 180,
        Orange3 => 200,
        Red1 | Red2 => 220,
        Red3 => 240,
        Yellow1 | Yellow2 => 260,
        Yellow3 => 280,
        Green1 | Green2 => 300,
        Green3 => 320,
        Blue1 => 350,
        Blue2 => 400,
        Utility1 | Utility2 => 150,
        Railroad1 | Railroad2 | Railroad3 | Railroad4 => 200,
    }
}

pub fn player_name(player: usize) -> String {
    format!("Player {}", player + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn side_and_offset_recover_index() {
        for cell in Cell::all() {
            let rebuilt = Cell::from_side_offset(cell.side(), cell.offset()).unwrap();
            assert_eq!(rebuilt, cell);
        }
    }

    #[test]
    fn corners_are_exactly_offset_zero() {
        let corners: Vec<Space> = Cell::all()
            .filter(|cell| cell.is_corner())
            .map(Cell::space)
            .collect();
        assert_eq!(
            corners,
            vec![Space::Go, Space::Jail, Space::FreeParking, Space::GoToJail]
        );
    }

    #[test]
    fn out_of_range_cells_are_rejected() {
        assert!(Cell::new(40).is_none());
        assert!(Cell::from_side_offset(4, 0).is_none());
        assert!(Cell::from_side_offset(0, 10).is_none());
    }

    #[test]
    fn every_property_maps_back_to_its_space() {
        assert_eq!(PROPERTY_SPACES.len(), 28);
        for property in Property::iter() {
            let cell = property_to_cell(property);
            assert_eq!(cell_to_property(cell), Some(property));
        }
    }

    #[test]
    fn prices_follow_the_deed_table() {
        assert_eq!(property_price(Property::Brown1), 60);
        assert_eq!(property_price(Property::Blue2), 400);
        assert_eq!(property_price(Property::Railroad3), 200);
        assert_eq!(property_group(Property::Utility2), PropertyGroup::Utility);
    }
}
