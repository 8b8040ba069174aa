use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum PropertyGroup {
    Brown,
    LightBlue,
    Magenta,
    Orange,
    Red,
    Yellow,
    Green,
    Blue,
    Utility,
    Railroad,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Property {
    Brown1,
    Brown2,
    LightBlue1,
    LightBlue2,
    LightBlue3,
    Magenta1,
    Magenta2,
    Magenta3,
    Orange1,
    Orange2,
    Orange3,
    Red1,
    Red2,
    Red3,
    Yellow1,
    Yellow2,
    Yellow3,
    Green1,
    Green2,
    Green3,
    Blue1,
    Blue2,
    Utility1,
    Utility2,
    Railroad1,
    Railroad2,
    Railroad3,
    Railroad4,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum Space {
    Go,
    Brown1,
    CommunityChest1,
    Brown2,
    IncomeTax,
    Railroad1,
    LightBlue1,
    Chance1,
    LightBlue2,
    LightBlue3,

    Jail,
    Magenta1,
    Utility1,
    Magenta2,
    Magenta3,
    Railroad2,
    Orange1,
    CommunityChest2,
    Orange2,
    Orange3,

    FreeParking,
    Red1,
    Chance2,
    Red2,
    Red3,
    Railroad3,
    Yellow1,
    Yellow2,
    Utility2,
    Yellow3,

    GoToJail,
    Green1,
    Green2,
    CommunityChest3,
    Green3,
    Railroad4,
    Chance3,
    Blue1,
    LuxuryTax,
    Blue2,
}

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum DeckType {
    Chance,
    CommunityChest,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, EnumString, Display, EnumIter,
)]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE")]
pub enum TurnPhase {
    WaitingForRoll,
    WaitingForBuyPropertyInput,
    WaitingForBids,
    WaitingForTradeOfferResponse,
    WaitingForDebtSettlement,
    WaitingForAcquisitionManagement,
    WaitingForTurnEnd,
    GameOver,
}

/// Every named control the client exposes.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    Display,
    EnumIter,
)]
#[strum(serialize_all = "kebab-case")]
pub enum ActionType {
    Roll,
    BuyProperty,
    AuctionProperty,
    UseJailFreeCard,
    PayBail,
    Bid,
    DeclineBid,
    EndTurn,
    Resign,
    StartManage,
    FinishManage,
    Mortgage,
    Unmortgage,
    SellBuilding,
    BuyBuilding,
    DeclineTrade,
    CancelTrade,
    ProposeTrade,
    AcceptTrade,
}

impl ActionType {
    pub const ALL: [ActionType; 19] = [
        ActionType::Roll,
        ActionType::BuyProperty,
        ActionType::AuctionProperty,
        ActionType::UseJailFreeCard,
        ActionType::PayBail,
        ActionType::Bid,
        ActionType::DeclineBid,
        ActionType::EndTurn,
        ActionType::Resign,
        ActionType::StartManage,
        ActionType::FinishManage,
        ActionType::Mortgage,
        ActionType::Unmortgage,
        ActionType::SellBuilding,
        ActionType::BuyBuilding,
        ActionType::DeclineTrade,
        ActionType::CancelTrade,
        ActionType::ProposeTrade,
        ActionType::AcceptTrade,
    ];
}
