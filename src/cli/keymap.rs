//! Key bindings. The same key may mean different things per mode; the
//! controller still decides whether the resulting event is enabled.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::trade::TradeSide;
use crate::types::{ActionType, DeckType};
use crate::view::{UiContext, UiEvent};

/// Cash moved by one press of a trade cash key.
pub const CASH_STEP: i64 = 10;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum KeyAction {
    Ui(UiEvent),
    Quit,
    ToggleHelp,
    /// Re-read the engine's snapshot and redraw.
    Resync,
    /// `t` was pressed; the next digit names the partner.
    AwaitPartner,
    Nothing,
}

#[derive(Debug, Default)]
pub struct Keymap {
    awaiting_partner: bool,
}

impl Keymap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn awaiting_partner(&self) -> bool {
        self.awaiting_partner
    }

    pub fn translate(
        &mut self,
        key: KeyEvent,
        context: &UiContext,
        increments: &[u32],
    ) -> KeyAction {
        if key.modifiers.contains(KeyModifiers::CONTROL) {
            match key.code {
                KeyCode::Char('c') => return KeyAction::Quit,
                KeyCode::Char('l') => return KeyAction::Resync,
                _ => {}
            }
        }
        if std::mem::take(&mut self.awaiting_partner) {
            return match digit(key.code) {
                Some(n) if n >= 1 => KeyAction::Ui(UiEvent::OpenTrade { partner: n - 1 }),
                _ => KeyAction::Nothing,
            };
        }
        match key.code {
            KeyCode::Char('q') => return KeyAction::Quit,
            KeyCode::Char('?') => return KeyAction::ToggleHelp,
            KeyCode::Char('R') => return activate(ActionType::Resign),
            _ => {}
        }
        match context {
            UiContext::Normal => self.normal(key.code, increments),
            UiContext::Manage { .. } => manage(key.code),
            UiContext::Trade(_) => trade(key.code),
        }
    }

    fn normal(&mut self, code: KeyCode, increments: &[u32]) -> KeyAction {
        if let Some(n) = digit(code) {
            return match n.checked_sub(1).and_then(|idx| increments.get(idx)) {
                Some(&increment) => KeyAction::Ui(UiEvent::Bid { increment }),
                None => KeyAction::Nothing,
            };
        }
        match code {
            KeyCode::Char('r') => activate(ActionType::Roll),
            KeyCode::Char('b') => activate(ActionType::BuyProperty),
            KeyCode::Char('a') => activate(ActionType::AuctionProperty),
            KeyCode::Char('j') => activate(ActionType::UseJailFreeCard),
            KeyCode::Char('p') => activate(ActionType::PayBail),
            KeyCode::Char('B') => activate(ActionType::Bid),
            KeyCode::Char('d') => activate(ActionType::DeclineBid),
            KeyCode::Char('e') => activate(ActionType::EndTurn),
            KeyCode::Char('m') => activate(ActionType::StartManage),
            KeyCode::Char('t') => {
                self.awaiting_partner = true;
                KeyAction::AwaitPartner
            }
            _ => KeyAction::Nothing,
        }
    }
}

fn manage(code: KeyCode) -> KeyAction {
    match code {
        KeyCode::Char('m') | KeyCode::Char('f') | KeyCode::Esc => {
            activate(ActionType::FinishManage)
        }
        KeyCode::Char('g') => activate(ActionType::Mortgage),
        KeyCode::Char('u') => activate(ActionType::Unmortgage),
        KeyCode::Char('h') => activate(ActionType::BuyBuilding),
        KeyCode::Char('s') => activate(ActionType::SellBuilding),
        _ => KeyAction::Nothing,
    }
}

fn trade(code: KeyCode) -> KeyAction {
    let cash = |side, delta| KeyAction::Ui(UiEvent::AdjustCash { side, delta });
    let card = |side, deck| KeyAction::Ui(UiEvent::ToggleJailFreeCard { side, deck });
    match code {
        KeyCode::Char('+') | KeyCode::Char('=') => cash(TradeSide::Offer, CASH_STEP),
        KeyCode::Char('-') => cash(TradeSide::Offer, -CASH_STEP),
        KeyCode::Char(']') => cash(TradeSide::Consideration, CASH_STEP),
        KeyCode::Char('[') => cash(TradeSide::Consideration, -CASH_STEP),
        KeyCode::Char('c') => card(TradeSide::Offer, DeckType::Chance),
        KeyCode::Char('C') => card(TradeSide::Consideration, DeckType::Chance),
        KeyCode::Char('k') => card(TradeSide::Offer, DeckType::CommunityChest),
        KeyCode::Char('K') => card(TradeSide::Consideration, DeckType::CommunityChest),
        KeyCode::Enter => activate(ActionType::ProposeTrade),
        KeyCode::Char('y') => activate(ActionType::AcceptTrade),
        KeyCode::Char('x') => activate(ActionType::DeclineTrade),
        KeyCode::Esc => activate(ActionType::CancelTrade),
        _ => KeyAction::Nothing,
    }
}

fn activate(action: ActionType) -> KeyAction {
    KeyAction::Ui(UiEvent::Activate(action))
}

fn digit(code: KeyCode) -> Option<usize> {
    match code {
        KeyCode::Char(c) => c.to_digit(10).map(|d| d as usize),
        _ => None,
    }
}

/// Key hint shown next to a control in the side panel.
pub fn key_hint(action: ActionType) -> &'static str {
    match action {
        ActionType::Roll => "r",
        ActionType::BuyProperty => "b",
        ActionType::AuctionProperty => "a",
        ActionType::UseJailFreeCard => "j",
        ActionType::PayBail => "p",
        ActionType::Bid => "B/1-9",
        ActionType::DeclineBid => "d",
        ActionType::EndTurn => "e",
        ActionType::Resign => "R",
        ActionType::StartManage => "m",
        ActionType::FinishManage => "f",
        ActionType::Mortgage => "g",
        ActionType::Unmortgage => "u",
        ActionType::BuyBuilding => "h",
        ActionType::SellBuilding => "s",
        ActionType::DeclineTrade => "x",
        ActionType::CancelTrade => "Esc",
        ActionType::ProposeTrade => "Enter",
        ActionType::AcceptTrade => "y",
    }
}

pub fn help_lines(context: &UiContext) -> &'static [&'static str] {
    match context {
        UiContext::Normal => &[
            "r roll | b buy | a auction | j jail card | p bail | e end turn",
            "1-9 bid by increment | B lowest bid | d decline bid",
            "m manage | t<n> trade with player n | R resign | ^L resync | q quit",
        ],
        UiContext::Manage { .. } => &[
            "click a deed to select it",
            "g mortgage | u unmortgage | h buy building | s sell building",
            "f/Esc finish | R resign | q quit",
        ],
        UiContext::Trade(_) => &[
            "click deeds to add or remove them",
            "+/- offer cash | ]/[ asked cash | c/C chance card | k/K chest card",
            "Enter propose | y accept | x decline | Esc cancel | q quit",
        ],
    }
}
