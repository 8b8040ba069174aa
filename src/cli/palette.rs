//! Presentation lookups. All of them are total over their enums; values
//! outside a known range get an explicit fallback.

use ratatui::style::Color;

use crate::board::HOTEL_LEVEL;
use crate::types::{PropertyGroup, Space};

pub fn group_color(group: PropertyGroup) -> Color {
    match group {
        PropertyGroup::Brown => Color::Rgb(149, 84, 54),
        PropertyGroup::LightBlue => Color::LightCyan,
        PropertyGroup::Magenta => Color::Magenta,
        PropertyGroup::Orange => Color::Rgb(247, 148, 29),
        PropertyGroup::Red => Color::Red,
        PropertyGroup::Yellow => Color::Yellow,
        PropertyGroup::Green => Color::Green,
        PropertyGroup::Blue => Color::Blue,
        PropertyGroup::Utility => Color::Gray,
        PropertyGroup::Railroad => Color::DarkGray,
    }
}

pub fn player_color(player: usize) -> Color {
    match player {
        0 => Color::LightRed,
        1 => Color::LightBlue,
        2 => Color::LightGreen,
        3 => Color::LightYellow,
        _ => Color::White,
    }
}

/// Short label printed inside a cell.
pub fn space_glyph(space: Space) -> &'static str {
    use Space::*;
    match space {
        Go => "GO",
        Jail => "JAIL",
        FreeParking => "FREE",
        GoToJail => "G2J",
        CommunityChest1 | CommunityChest2 | CommunityChest3 => "CC",
        Chance1 | Chance2 | Chance3 => "?",
        IncomeTax => "TAX",
        LuxuryTax => "LUX",
        Railroad1 | Railroad2 | Railroad3 | Railroad4 => "RR",
        Utility1 => "ELEC",
        Utility2 => "WATR",
        Brown1 | LightBlue1 | Magenta1 | Orange1 | Red1 | Yellow1 | Green1 | Blue1 => "1",
        Brown2 | LightBlue2 | Magenta2 | Orange2 | Red2 | Yellow2 | Green2 | Blue2 => "2",
        LightBlue3 | Magenta3 | Orange3 | Red3 | Yellow3 | Green3 => "3",
    }
}

pub fn die_face(value: u8) -> char {
    match value {
        1 => '⚀',
        2 => '⚁',
        3 => '⚂',
        4 => '⚃',
        5 => '⚄',
        6 => '⚅',
        _ => '?',
    }
}

/// Houses as dots, a hotel as `H`.
pub fn building_marker(level: u8) -> String {
    if level >= HOTEL_LEVEL {
        "H".to_string()
    } else {
        "•".repeat(usize::from(level))
    }
}
