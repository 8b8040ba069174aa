use std::mem;

use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::affordance::{self, EnabledSet};
use crate::engine::{
    Command, CommandOutcome, EngineError, GameSetup, GameStateSnapshot, RulesEngine,
};
use crate::geometry::BoardLayout;
use crate::trade::{Toggle, TradeDraft, TradeError, TradeSide};
use crate::types::{ActionType, DeckType};
use crate::view::{BoardFrame, Outcome, UiContext, UiEvent};

#[derive(Debug, thiserror::Error)]
pub enum ViewError {
    #[error(transparent)]
    Engine(#[from] EngineError),
    #[error(transparent)]
    Trade(#[from] TradeError),
}

/// Owns the latest snapshot and all local interaction state, and is the
/// only path from user input to the engine.
///
/// Both entry points take `&mut self`: a second event cannot start while a
/// command is still waiting on the engine.
pub struct ViewController<E> {
    engine: E,
    layout: BoardLayout,
    bid_increments: Vec<u32>,
    snapshot: GameStateSnapshot,
    context: UiContext,
    enabled: EnabledSet,
    frame: BoardFrame,
    status: Option<String>,
    session_id: Uuid,
}

impl<E: RulesEngine> ViewController<E> {
    /// Starts a game on `engine` and builds the first frame.
    pub fn start(
        mut engine: E,
        setup: &GameSetup,
        layout: BoardLayout,
        bid_increments: Vec<u32>,
    ) -> Result<Self, ViewError> {
        let snapshot = engine.start(setup)?;
        Ok(Self::new(engine, snapshot, layout, bid_increments))
    }

    pub fn new(
        engine: E,
        snapshot: GameStateSnapshot,
        layout: BoardLayout,
        bid_increments: Vec<u32>,
    ) -> Self {
        let session_id = Uuid::new_v4();
        let context = UiContext::Normal;
        let enabled = affordance::evaluate(&snapshot, &context, &engine, &bid_increments);
        let frame = BoardFrame::render(&layout, &snapshot, &context, &engine, None);
        info!(%session_id, players = snapshot.player_count(), "view session started");
        Self {
            engine,
            layout,
            bid_increments,
            snapshot,
            context,
            enabled,
            frame,
            status: None,
            session_id,
        }
    }

    pub fn engine(&self) -> &E {
        &self.engine
    }

    pub fn layout(&self) -> &BoardLayout {
        &self.layout
    }

    pub fn bid_increments(&self) -> &[u32] {
        &self.bid_increments
    }

    pub fn snapshot(&self) -> &GameStateSnapshot {
        &self.snapshot
    }

    pub fn context(&self) -> &UiContext {
        &self.context
    }

    pub fn enabled(&self) -> &EnabledSet {
        &self.enabled
    }

    pub fn frame(&self) -> &BoardFrame {
        &self.frame
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// The single place a new snapshot enters the view.
    pub fn apply_update(&mut self, snapshot: GameStateSnapshot) {
        self.snapshot = snapshot;
        self.invalidate_context();
        self.refresh();
    }

    /// Pulls the engine's current snapshot, for a redraw after an external change.
    pub fn resync(&mut self) -> Result<(), ViewError> {
        let snapshot = self.engine.current_snapshot()?;
        self.apply_update(snapshot);
        Ok(())
    }

    pub fn handle(&mut self, event: UiEvent) -> Result<Outcome, ViewError> {
        debug!(session = %self.session_id, ?event, "ui event");
        match event {
            UiEvent::Activate(action) => self.activate(action),
            UiEvent::Bid { increment } => {
                let amount = self
                    .enabled
                    .bid_option(increment)
                    .filter(|bid| bid.enabled)
                    .map(|bid| bid.amount);
                match amount {
                    Some(amount) => self.bid(amount),
                    None => Ok(self.ignore("bid increment not available")),
                }
            }
            UiEvent::Click { x, y } => Ok(self.click(x, y)),
            UiEvent::OpenTrade { partner } => {
                if !self.enabled.partner_enabled(partner) {
                    return Ok(self.ignore("trade partner not available"));
                }
                let draft = TradeDraft::begin(self.snapshot.controlling_player, partner)?;
                self.set_context(UiContext::Trade(draft));
                Ok(Outcome::Local)
            }
            UiEvent::AdjustCash { side, delta } => Ok(self.adjust_cash(side, delta)),
            UiEvent::ToggleJailFreeCard { side, deck } => Ok(self.toggle_jail_card(side, deck)),
        }
    }

    fn activate(&mut self, action: ActionType) -> Result<Outcome, ViewError> {
        if !self.enabled.is_enabled(action) {
            return Ok(self.ignore("control disabled"));
        }
        let player = self.snapshot.controlling_player;
        match action {
            ActionType::StartManage => {
                self.set_context(UiContext::Manage { selected: None });
                Ok(Outcome::Local)
            }
            ActionType::FinishManage => {
                self.set_context(UiContext::Normal);
                Ok(Outcome::Local)
            }
            ActionType::Bid => {
                let lowest = self
                    .enabled
                    .bids
                    .iter()
                    .find(|bid| bid.enabled)
                    .map(|bid| bid.amount);
                match lowest {
                    Some(amount) => self.bid(amount),
                    None => Ok(self.ignore("no legal bid")),
                }
            }
            ActionType::Mortgage
            | ActionType::Unmortgage
            | ActionType::BuyBuilding
            | ActionType::SellBuilding => {
                let command = self
                    .context
                    .selected()
                    .and_then(|property| Command::for_property(action, player, property));
                match command {
                    Some(command) => self.forward(command, None),
                    None => Ok(self.ignore("no property selected")),
                }
            }
            ActionType::ProposeTrade => {
                let Some(draft) = self.context.draft() else {
                    return Ok(self.ignore("no trade draft"));
                };
                let trade = draft.clone().commit();
                self.forward(Command::ProposeTrade { trade }, Some(UiContext::Normal))
            }
            ActionType::AcceptTrade => {
                let Some(pending) = &self.snapshot.pending_trade else {
                    return Ok(self.ignore("no pending trade"));
                };
                let trade = pending.reciprocal();
                self.forward(Command::ProposeTrade { trade }, Some(UiContext::Normal))
            }
            ActionType::CancelTrade => {
                let engine_holds_offer = self
                    .snapshot
                    .pending_trade
                    .as_ref()
                    .is_some_and(|offer| offer.offering_player == player);
                if engine_holds_offer {
                    return self.forward(Command::CancelTrade { player }, Some(UiContext::Normal));
                }
                if let UiContext::Trade(draft) = mem::take(&mut self.context) {
                    draft.cancel();
                }
                info!(session = %self.session_id, "trade draft discarded");
                self.refresh();
                Ok(Outcome::Local)
            }
            ActionType::DeclineTrade => {
                self.forward(Command::DeclineTrade { player }, Some(UiContext::Normal))
            }
            other => match Command::for_player(other, player) {
                Some(command) => self.forward(command, None),
                None => Ok(self.ignore("control has no command")),
            },
        }
    }

    fn bid(&mut self, amount: u32) -> Result<Outcome, ViewError> {
        let player = self.snapshot.controlling_player;
        self.forward(Command::Bid { player, amount }, None)
    }

    fn click(&mut self, x: f64, y: f64) -> Outcome {
        let cell = self.layout.hit_test(x, y);
        let property = cell.and_then(|cell| self.engine.cell_to_property(cell));
        let controlling = self.snapshot.controlling_player;
        let outcome = match &mut self.context {
            UiContext::Normal => Outcome::Ignored,
            UiContext::Manage { selected } => {
                let owned = property.filter(|p| self.snapshot.owner_of(*p) == Some(controlling));
                match owned {
                    Some(property) if *selected != Some(property) => *selected = Some(property),
                    _ => *selected = None,
                }
                debug!(session = %self.session_id, selected = ?selected, "manage selection");
                Outcome::Local
            }
            UiContext::Trade(draft) => {
                let toggle = property.and_then(|property| {
                    let side = draft.side_owning(property, &self.snapshot)?;
                    Some(draft.toggle_property(side, property, &self.snapshot))
                });
                match toggle {
                    Some(Toggle::Added | Toggle::Removed) => Outcome::Local,
                    _ => Outcome::Ignored,
                }
            }
        };
        if outcome == Outcome::Local {
            self.refresh();
        } else {
            debug!(session = %self.session_id, x, y, ?cell, "click ignored");
        }
        outcome
    }

    fn adjust_cash(&mut self, side: TradeSide, delta: i64) -> Outcome {
        let UiContext::Trade(draft) = &mut self.context else {
            return self.ignore("cash outside trade");
        };
        if let Err(err) = draft.adjust_cash(side, delta) {
            debug!(session = %self.session_id, %err, "cash adjustment refused");
            return Outcome::Ignored;
        }
        self.refresh();
        Outcome::Local
    }

    fn toggle_jail_card(&mut self, side: TradeSide, deck: DeckType) -> Outcome {
        let UiContext::Trade(draft) = &mut self.context else {
            return self.ignore("jail card outside trade");
        };
        match draft.toggle_jail_free_card(side, deck, &self.snapshot) {
            Toggle::Ignored => self.ignore("jail card not held"),
            Toggle::Added | Toggle::Removed => {
                self.refresh();
                Outcome::Local
            }
        }
    }

    /// Sends one command and applies whatever snapshot comes back. A
    /// transport failure leaves every piece of local state as it was.
    fn forward(
        &mut self,
        command: Command,
        on_accept: Option<UiContext>,
    ) -> Result<Outcome, ViewError> {
        info!(session = %self.session_id, ?command, "forwarding command");
        let outcome = match self.engine.execute(&command) {
            Ok(outcome) => outcome,
            Err(err) => {
                warn!(session = %self.session_id, ?command, %err, "engine transport failed");
                return Err(err.into());
            }
        };
        let accepted = outcome.is_accepted();
        match outcome {
            CommandOutcome::Accepted(snapshot) => {
                self.status = None;
                if let Some(context) = on_accept {
                    self.change_mode(context);
                }
                self.apply_update(snapshot);
            }
            CommandOutcome::Rejected { reason, snapshot } => {
                info!(session = %self.session_id, ?command, %reason, "command rejected");
                self.status = Some(format!("{} rejected: {reason}", command.action_type()));
                // Only a trade draft is speculative; manage mode survives.
                if matches!(self.context, UiContext::Trade(_)) {
                    self.change_mode(UiContext::Normal);
                }
                self.apply_update(snapshot);
            }
        }
        Ok(Outcome::Forwarded { accepted })
    }

    fn set_context(&mut self, context: UiContext) {
        self.change_mode(context);
        self.refresh();
    }

    fn change_mode(&mut self, context: UiContext) {
        let from = self.context.mode_name();
        let to = context.mode_name();
        if from != to {
            info!(session = %self.session_id, from, to, "mode change");
        }
        self.context = context;
    }

    /// Falls back to normal mode when the snapshot has made the local
    /// context meaningless. A selection that changed hands is only cleared.
    fn invalidate_context(&mut self) {
        let controlling = self.snapshot.controlling_player;
        let reason = if self.context.is_normal() {
            None
        } else if self.snapshot.is_game_over() {
            Some("game over")
        } else if self.snapshot.is_eliminated(controlling) {
            Some("controlling player eliminated")
        } else {
            match &mut self.context {
                UiContext::Manage { selected } => {
                    if selected.is_some_and(|p| self.snapshot.owner_of(p) != Some(controlling)) {
                        debug!(session = %self.session_id, ?selected, "selection changed hands");
                        *selected = None;
                    }
                    None
                }
                UiContext::Trade(draft) => {
                    if draft.offering_player() != controlling {
                        Some("controlling player changed")
                    } else if self.snapshot.is_eliminated(draft.considering_player()) {
                        Some("trade partner eliminated")
                    } else {
                        if draft.retain_held(&self.snapshot) {
                            debug!(session = %self.session_id, "dropped assets no longer held");
                        }
                        None
                    }
                }
                _ => None,
            }
        };
        if let Some(reason) = reason {
            info!(session = %self.session_id, reason, "local context reset");
            self.change_mode(UiContext::Normal);
        }
    }

    fn refresh(&mut self) {
        self.enabled = affordance::evaluate(
            &self.snapshot,
            &self.context,
            &self.engine,
            &self.bid_increments,
        );
        self.frame = BoardFrame::render(
            &self.layout,
            &self.snapshot,
            &self.context,
            &self.engine,
            self.status.as_deref(),
        );
    }

    fn ignore(&self, why: &'static str) -> Outcome {
        debug!(session = %self.session_id, why, "event ignored");
        Outcome::Ignored
    }
}
