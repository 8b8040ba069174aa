mod common;

use std::collections::BTreeSet;

use common::{Reply, ScriptedEngine, click_on, controller, owned};
use monopoly_client::board::property_to_cell;
use monopoly_client::engine::{GameStateSnapshot, TradeAssets, TradeOffer};
use monopoly_client::trade::TradeSide;
use monopoly_client::types::{ActionType, DeckType, Property, TurnPhase};
use monopoly_client::view::{Outcome, UiContext, UiEvent};
use monopoly_client::Command;

fn three_owners() -> GameStateSnapshot {
    owned(
        GameStateSnapshot::new(3, 1500),
        &[
            (Property::Brown1, 0),
            (Property::Blue2, 1),
            (Property::Red1, 2),
        ],
    )
}

fn pending_brown_offer() -> (GameStateSnapshot, TradeOffer) {
    let offer = TradeOffer {
        offering_player: 0,
        considering_player: 1,
        offer: TradeAssets {
            cash: 0,
            deeds: BTreeSet::from([Property::Brown1]),
            jail_free_cards: BTreeSet::new(),
        },
        consideration: TradeAssets {
            cash: 120,
            ..TradeAssets::default()
        },
    };
    let mut snapshot = owned(GameStateSnapshot::new(2, 1500), &[(Property::Brown1, 0)]);
    snapshot.phase = TurnPhase::WaitingForTradeOfferResponse;
    snapshot.controlling_player = 1;
    snapshot.pending_trade = Some(offer.clone());
    (snapshot, offer)
}

#[test]
fn draft_builds_up_and_commits_as_one_command() {
    let mut view = controller(ScriptedEngine::permissive(three_owners()));

    assert_eq!(
        view.handle(UiEvent::OpenTrade { partner: 1 }).unwrap(),
        Outcome::Local
    );
    let draft = view.context().draft().unwrap();
    assert_eq!(draft.offering_player(), 0);
    assert_eq!(draft.considering_player(), 1);
    assert!(draft.is_empty());

    view.handle(click_on(Property::Brown1)).unwrap();
    assert!(view
        .context()
        .draft()
        .unwrap()
        .side(TradeSide::Offer)
        .deeds
        .contains(&Property::Brown1));
    view.handle(click_on(Property::Brown1)).unwrap();
    assert!(view.context().draft().unwrap().is_empty());

    view.handle(click_on(Property::Brown1)).unwrap();
    view.handle(click_on(Property::Blue2)).unwrap();
    assert_eq!(
        view.handle(click_on(Property::Red1)).unwrap(),
        Outcome::Ignored
    );
    assert_eq!(
        view.frame().cell(property_to_cell(Property::Blue2)).in_trade,
        Some(TradeSide::Consideration)
    );

    assert_eq!(
        view.handle(UiEvent::AdjustCash {
            side: TradeSide::Offer,
            delta: 50
        })
        .unwrap(),
        Outcome::Local
    );
    assert_eq!(
        view.handle(UiEvent::AdjustCash {
            side: TradeSide::Offer,
            delta: -100
        })
        .unwrap(),
        Outcome::Ignored
    );

    let outcome = view
        .handle(UiEvent::Activate(ActionType::ProposeTrade))
        .unwrap();
    assert_eq!(outcome, Outcome::Forwarded { accepted: true });
    assert_eq!(view.context(), &UiContext::Normal);

    let expected = TradeOffer {
        offering_player: 0,
        considering_player: 1,
        offer: TradeAssets {
            cash: 50,
            deeds: BTreeSet::from([Property::Brown1]),
            jail_free_cards: BTreeSet::new(),
        },
        consideration: TradeAssets {
            cash: 0,
            deeds: BTreeSet::from([Property::Blue2]),
            jail_free_cards: BTreeSet::new(),
        },
    };
    assert_eq!(
        view.engine().executed(),
        &[Command::ProposeTrade { trade: expected }]
    );
}

#[test]
fn rejected_proposal_drops_the_draft() {
    let engine = ScriptedEngine::permissive(three_owners()).replying(Reply::Reject("unfair"));
    let mut view = controller(engine);
    view.handle(UiEvent::OpenTrade { partner: 2 }).unwrap();
    view.handle(click_on(Property::Red1)).unwrap();

    let outcome = view
        .handle(UiEvent::Activate(ActionType::ProposeTrade))
        .unwrap();
    assert_eq!(outcome, Outcome::Forwarded { accepted: false });
    assert_eq!(view.context(), &UiContext::Normal);
    assert_eq!(view.engine().executed().len(), 1);
    assert!(view.frame().text.trade.is_empty());
}

#[test]
fn cancelling_a_local_draft_sends_nothing() {
    let mut view = controller(ScriptedEngine::permissive(three_owners()));
    view.handle(UiEvent::OpenTrade { partner: 1 }).unwrap();
    view.handle(click_on(Property::Brown1)).unwrap();

    assert_eq!(
        view.handle(UiEvent::Activate(ActionType::CancelTrade)).unwrap(),
        Outcome::Local
    );
    assert_eq!(view.context(), &UiContext::Normal);
    assert!(view.engine().executed().is_empty());
}

#[test]
fn only_other_live_players_can_be_trade_partners() {
    let mut snapshot = three_owners();
    snapshot.players[2].eliminated = true;
    let mut view = controller(ScriptedEngine::permissive(snapshot));

    assert_eq!(
        view.handle(UiEvent::OpenTrade { partner: 0 }).unwrap(),
        Outcome::Ignored
    );
    assert_eq!(
        view.handle(UiEvent::OpenTrade { partner: 2 }).unwrap(),
        Outcome::Ignored
    );
    assert_eq!(
        view.handle(UiEvent::OpenTrade { partner: 7 }).unwrap(),
        Outcome::Ignored
    );
    assert_eq!(view.context(), &UiContext::Normal);
}

#[test]
fn pending_offer_is_accepted_with_its_reciprocal() {
    let (snapshot, offer) = pending_brown_offer();
    let acceptance = Command::ProposeTrade {
        trade: offer.reciprocal(),
    };
    let engine = ScriptedEngine::new(snapshot).allowing([acceptance.clone()]);
    let mut view = controller(engine);
    assert_eq!(
        view.frame().text.trade,
        vec![
            "Player 1 offers Player 2: BROWN1",
            "in exchange for: $120",
        ]
    );

    view.handle(UiEvent::OpenTrade { partner: 0 }).unwrap();
    assert!(view.enabled().is_enabled(ActionType::AcceptTrade));
    assert!(!view.enabled().is_enabled(ActionType::DeclineTrade));

    let outcome = view
        .handle(UiEvent::Activate(ActionType::AcceptTrade))
        .unwrap();
    assert_eq!(outcome, Outcome::Forwarded { accepted: true });
    assert_eq!(view.engine().executed(), &[acceptance]);
    assert_eq!(view.context(), &UiContext::Normal);
}

#[test]
fn pending_offer_can_be_declined() {
    let (snapshot, _) = pending_brown_offer();
    let engine = ScriptedEngine::new(snapshot).allowing([Command::DeclineTrade { player: 1 }]);
    let mut view = controller(engine);
    view.handle(UiEvent::OpenTrade { partner: 0 }).unwrap();

    assert!(!view.enabled().is_enabled(ActionType::AcceptTrade));
    let outcome = view
        .handle(UiEvent::Activate(ActionType::DeclineTrade))
        .unwrap();
    assert_eq!(outcome, Outcome::Forwarded { accepted: true });
    assert_eq!(
        view.engine().executed(),
        &[Command::DeclineTrade { player: 1 }]
    );
}

#[test]
fn jail_cards_join_only_the_holder_side() {
    let mut snapshot = three_owners();
    snapshot.players[0]
        .jail_free_cards
        .insert(DeckType::CommunityChest);
    let mut view = controller(ScriptedEngine::permissive(snapshot));
    view.handle(UiEvent::OpenTrade { partner: 1 }).unwrap();

    assert_eq!(
        view.handle(UiEvent::ToggleJailFreeCard {
            side: TradeSide::Consideration,
            deck: DeckType::CommunityChest,
        })
        .unwrap(),
        Outcome::Ignored
    );
    assert_eq!(
        view.handle(UiEvent::ToggleJailFreeCard {
            side: TradeSide::Offer,
            deck: DeckType::CommunityChest,
        })
        .unwrap(),
        Outcome::Local
    );
    let draft = view.context().draft().unwrap();
    assert!(draft
        .side(TradeSide::Offer)
        .jail_free_cards
        .contains(&DeckType::CommunityChest));
}

#[test]
fn partner_elimination_ends_the_draft() {
    let snapshot = three_owners();
    let mut view = controller(ScriptedEngine::permissive(snapshot.clone()));
    view.handle(UiEvent::OpenTrade { partner: 1 }).unwrap();
    view.handle(click_on(Property::Blue2)).unwrap();

    let mut after = snapshot;
    after.players[1].eliminated = true;
    view.apply_update(after);
    assert_eq!(view.context(), &UiContext::Normal);
}
