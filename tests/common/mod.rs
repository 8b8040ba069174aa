#![allow(dead_code)]

use std::cell::RefCell;
use std::collections::{HashSet, VecDeque};

use monopoly_client::affordance::BID_INCREMENTS;
use monopoly_client::board::property_to_cell;
use monopoly_client::engine::{
    Command, CommandOutcome, EngineError, GameSetup, GameStateSnapshot, PropertyState,
    RulesEngine,
};
use monopoly_client::geometry::{BoardLayout, Point};
use monopoly_client::types::Property;
use monopoly_client::view::{UiEvent, ViewController};

/// What the scripted engine does with the next executed command.
pub enum Reply {
    Accept(GameStateSnapshot),
    Reject(&'static str),
    Fail,
}

/// A stand-in rules engine: legality comes from an allow list, command
/// results from a queue of replies. Every query and command is recorded.
pub struct ScriptedEngine {
    snapshot: GameStateSnapshot,
    allowed: RefCell<HashSet<Command>>,
    allow_everything: bool,
    replies: VecDeque<Reply>,
    queries: RefCell<Vec<Command>>,
    executed: Vec<Command>,
}

impl ScriptedEngine {
    pub fn new(snapshot: GameStateSnapshot) -> Self {
        Self {
            snapshot,
            allowed: RefCell::new(HashSet::new()),
            allow_everything: false,
            replies: VecDeque::new(),
            queries: RefCell::new(Vec::new()),
            executed: Vec::new(),
        }
    }

    pub fn permissive(snapshot: GameStateSnapshot) -> Self {
        Self {
            allow_everything: true,
            ..Self::new(snapshot)
        }
    }

    pub fn allowing(mut self, commands: impl IntoIterator<Item = Command>) -> Self {
        self.allowed.get_mut().extend(commands);
        self
    }

    pub fn replying(mut self, reply: Reply) -> Self {
        self.replies.push_back(reply);
        self
    }

    pub fn executed(&self) -> &[Command] {
        &self.executed
    }

    pub fn queries(&self) -> Vec<Command> {
        self.queries.borrow().clone()
    }
}

impl RulesEngine for ScriptedEngine {
    fn start(&mut self, setup: &GameSetup) -> Result<GameStateSnapshot, EngineError> {
        self.snapshot = GameStateSnapshot::new(setup.player_count, setup.starting_funds);
        Ok(self.snapshot.clone())
    }

    fn current_snapshot(&self) -> Result<GameStateSnapshot, EngineError> {
        Ok(self.snapshot.clone())
    }

    fn is_action_legal(&self, command: &Command) -> bool {
        self.queries.borrow_mut().push(command.clone());
        self.allow_everything || self.allowed.borrow().contains(command)
    }

    fn execute(&mut self, command: &Command) -> Result<CommandOutcome, EngineError> {
        self.executed.push(command.clone());
        match self.replies.pop_front() {
            Some(Reply::Accept(snapshot)) => {
                self.snapshot = snapshot.clone();
                Ok(CommandOutcome::Accepted(snapshot))
            }
            Some(Reply::Reject(reason)) => Ok(CommandOutcome::Rejected {
                reason: reason.to_string(),
                snapshot: self.snapshot.clone(),
            }),
            Some(Reply::Fail) => Err(EngineError::Closed),
            None => Ok(CommandOutcome::Accepted(self.snapshot.clone())),
        }
    }
}

pub fn owned(mut snapshot: GameStateSnapshot, deeds: &[(Property, usize)]) -> GameStateSnapshot {
    for (property, owner) in deeds {
        snapshot.properties.push(PropertyState {
            property: *property,
            owner: Some(*owner),
            mortgaged: false,
            building_level: 0,
        });
    }
    snapshot
}

pub fn controller(engine: ScriptedEngine) -> ViewController<ScriptedEngine> {
    let snapshot = engine.snapshot.clone();
    ViewController::new(engine, snapshot, BoardLayout::default(), BID_INCREMENTS.to_vec())
}

pub fn centroid_of(property: Property) -> Point {
    BoardLayout::default()
        .cell_polygon(property_to_cell(property))
        .centroid()
}

pub fn click_on(property: Property) -> UiEvent {
    let point = centroid_of(property);
    UiEvent::Click {
        x: point.x,
        y: point.y,
    }
}
