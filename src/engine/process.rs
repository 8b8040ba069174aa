//! Line-delimited JSON transport to an engine running as a child process.
//!
//! Every request is one JSON object on its own line and is answered by
//! exactly one JSON object on one line. Requests never overlap.

use std::cell::RefCell;
use std::io::{BufRead, BufReader, Write};
use std::process::{Child, ChildStdin, ChildStdout, Command as ProcessCommand, Stdio};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::engine::{
    Command, CommandOutcome, EngineError, GameSetup, GameStateSnapshot, RulesEngine,
};

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Request<'a> {
    Setup { setup: &'a GameSetup },
    Snapshot,
    IsLegal { query: &'a Command },
    Execute { command: &'a Command },
}

#[derive(Debug, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum Response {
    Snapshot { snapshot: GameStateSnapshot },
    Legal { legal: bool },
    Accepted { snapshot: GameStateSnapshot },
    Rejected {
        reason: String,
        snapshot: GameStateSnapshot,
    },
    Error { message: String },
}

impl Response {
    fn kind(&self) -> &'static str {
        match self {
            Response::Snapshot { .. } => "snapshot",
            Response::Legal { .. } => "legal",
            Response::Accepted { .. } => "accepted",
            Response::Rejected { .. } => "rejected",
            Response::Error { .. } => "error",
        }
    }
}

struct Channel<R, W> {
    reader: R,
    writer: W,
    line: String,
}

/// Speaks the JSON-lines protocol over any reader/writer pair.
pub struct JsonLineEngine<R, W> {
    channel: RefCell<Channel<R, W>>,
}

impl<R: BufRead, W: Write> JsonLineEngine<R, W> {
    pub fn from_streams(reader: R, writer: W) -> Self {
        Self {
            channel: RefCell::new(Channel {
                reader,
                writer,
                line: String::new(),
            }),
        }
    }

    pub fn into_streams(self) -> (R, W) {
        let channel = self.channel.into_inner();
        (channel.reader, channel.writer)
    }

    fn round_trip(&self, request: &Request<'_>) -> Result<Response, EngineError> {
        let mut channel = self.channel.borrow_mut();
        let encoded = serde_json::to_string(request)?;
        writeln!(channel.writer, "{encoded}")?;
        channel.writer.flush()?;

        let Channel { reader, line, .. } = &mut *channel;
        line.clear();
        if reader.read_line(line)? == 0 {
            return Err(EngineError::Closed);
        }
        let response: Response = serde_json::from_str(line.trim())?;
        if let Response::Error { message } = response {
            return Err(EngineError::Reported(message));
        }
        Ok(response)
    }

    fn expect_snapshot(&self, request: &Request<'_>) -> Result<GameStateSnapshot, EngineError> {
        match self.round_trip(request)? {
            Response::Snapshot { snapshot } => Ok(snapshot),
            other => Err(EngineError::UnexpectedResponse {
                expected: "snapshot",
                got: other.kind(),
            }),
        }
    }
}

impl<R: BufRead, W: Write> RulesEngine for JsonLineEngine<R, W> {
    fn start(&mut self, setup: &GameSetup) -> Result<GameStateSnapshot, EngineError> {
        info!(
            seed = %setup.seed,
            players = setup.player_count,
            funds = setup.starting_funds,
            "sending game setup"
        );
        self.expect_snapshot(&Request::Setup { setup })
    }

    fn current_snapshot(&self) -> Result<GameStateSnapshot, EngineError> {
        self.expect_snapshot(&Request::Snapshot)
    }

    fn is_action_legal(&self, command: &Command) -> bool {
        match self.round_trip(&Request::IsLegal { query: command }) {
            Ok(Response::Legal { legal }) => legal,
            Ok(other) => {
                warn!(?command, got = other.kind(), "unexpected reply to legality query");
                false
            }
            Err(err) => {
                warn!(?command, %err, "legality query failed; treating as illegal");
                false
            }
        }
    }

    fn execute(&mut self, command: &Command) -> Result<CommandOutcome, EngineError> {
        debug!(?command, "executing command");
        match self.round_trip(&Request::Execute { command })? {
            Response::Accepted { snapshot } => Ok(CommandOutcome::Accepted(snapshot)),
            Response::Rejected { reason, snapshot } => {
                Ok(CommandOutcome::Rejected { reason, snapshot })
            }
            other => Err(EngineError::UnexpectedResponse {
                expected: "accepted or rejected",
                got: other.kind(),
            }),
        }
    }
}

/// An engine launched as a child process. Program and arguments are passed
/// through untouched, so paths may contain spaces.
pub struct ProcessEngine {
    inner: JsonLineEngine<BufReader<ChildStdout>, ChildStdin>,
    child: Child,
}

impl ProcessEngine {
    pub fn spawn(program: &str, args: &[String]) -> Result<Self, EngineError> {
        if program.trim().is_empty() {
            return Err(EngineError::EmptyProgram);
        }
        let mut child = ProcessCommand::new(program)
            .args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| EngineError::Spawn {
                program: program.to_string(),
                source,
            })?;
        let stdin = child.stdin.take().ok_or(EngineError::Closed)?;
        let stdout = child.stdout.take().ok_or(EngineError::Closed)?;
        info!(program, ?args, pid = child.id(), "engine process started");
        Ok(Self {
            inner: JsonLineEngine::from_streams(BufReader::new(stdout), stdin),
            child,
        })
    }
}

impl RulesEngine for ProcessEngine {
    fn start(&mut self, setup: &GameSetup) -> Result<GameStateSnapshot, EngineError> {
        self.inner.start(setup)
    }

    fn current_snapshot(&self) -> Result<GameStateSnapshot, EngineError> {
        self.inner.current_snapshot()
    }

    fn is_action_legal(&self, command: &Command) -> bool {
        self.inner.is_action_legal(command)
    }

    fn execute(&mut self, command: &Command) -> Result<CommandOutcome, EngineError> {
        self.inner.execute(command)
    }
}

impl Drop for ProcessEngine {
    fn drop(&mut self) {
        let _ = self.child.kill();
        let _ = self.child.wait();
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::types::TurnPhase;

    fn snapshot_json() -> String {
        serde_json::to_string(&GameStateSnapshot::new(2, 1500)).unwrap()
    }

    fn engine_with_replies(replies: &[String]) -> JsonLineEngine<Cursor<Vec<u8>>, Vec<u8>> {
        let script = replies.join("\n") + "\n";
        JsonLineEngine::from_streams(Cursor::new(script.into_bytes()), Vec::new())
    }

    fn sent_lines(engine: JsonLineEngine<Cursor<Vec<u8>>, Vec<u8>>) -> Vec<serde_json::Value> {
        let (_, written) = engine.into_streams();
        String::from_utf8(written)
            .unwrap()
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn setup_is_sent_and_snapshot_returned() {
        let mut engine = engine_with_replies(&[format!(
            r#"{{"type":"snapshot","snapshot":{}}}"#,
            snapshot_json()
        )]);
        let snapshot = engine.start(&GameSetup::default()).unwrap();
        assert_eq!(snapshot.phase, TurnPhase::WaitingForRoll);

        let sent = sent_lines(engine);
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0]["type"], "setup");
        assert_eq!(sent[0]["setup"]["player_count"], 4);
        assert_eq!(sent[0]["setup"]["seed"], "monopolyRandomSeed!");
    }

    #[test]
    fn legality_queries_carry_the_full_command() {
        let engine = engine_with_replies(&[r#"{"type":"legal","legal":true}"#.to_string()]);
        assert!(engine.is_action_legal(&Command::Bid {
            player: 1,
            amount: 30
        }));
        let sent = sent_lines(engine);
        assert_eq!(
            sent[0],
            serde_json::json!({
                "type": "is_legal",
                "query": {"kind": "bid", "player": 1, "amount": 30}
            })
        );
    }

    #[test]
    fn failed_queries_read_as_illegal() {
        let engine = engine_with_replies(&[r#"{"type":"error","message":"boom"}"#.to_string()]);
        assert!(!engine.is_action_legal(&Command::EndTurn { player: 0 }));
        let closed = engine_with_replies(&[]);
        assert!(!closed.is_action_legal(&Command::EndTurn { player: 0 }));
    }

    #[test]
    fn rejected_commands_keep_the_engine_snapshot() {
        let mut engine = engine_with_replies(&[format!(
            r#"{{"type":"rejected","reason":"not your turn","snapshot":{}}}"#,
            snapshot_json()
        )]);
        let outcome = engine.execute(&Command::RollDice { player: 1 }).unwrap();
        match outcome {
            CommandOutcome::Rejected { reason, snapshot } => {
                assert_eq!(reason, "not your turn");
                assert_eq!(snapshot.player_count(), 2);
            }
            other => panic!("expected rejection, got {other:?}"),
        }
    }

    #[test]
    fn spawn_keeps_the_program_path_whole() {
        match ProcessEngine::spawn("   ", &[]) {
            Err(EngineError::EmptyProgram) => {}
            Err(other) => panic!("expected empty program, got {other}"),
            Ok(_) => panic!("blank program spawned"),
        }
        let program = "/nonexistent dir/monopoly engine";
        match ProcessEngine::spawn(program, &["--seed".to_string(), "two words".to_string()]) {
            Err(EngineError::Spawn { program: failed, .. }) => assert_eq!(failed, program),
            Err(other) => panic!("expected spawn failure, got {other}"),
            Ok(_) => panic!("nonexistent program spawned"),
        }
    }

    #[test]
    fn wrong_reply_kind_is_a_protocol_fault() {
        let mut engine = engine_with_replies(&[r#"{"type":"legal","legal":true}"#.to_string()]);
        let err = engine.execute(&Command::EndTurn { player: 0 }).unwrap_err();
        assert!(matches!(
            err,
            EngineError::UnexpectedResponse {
                got: "legal",
                ..
            }
        ));
    }
}
