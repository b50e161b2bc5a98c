//! The hand loop against a simulated dealer and over recorded transcripts.

use actline_ai::baseline::{PassiveAI, RandomAI};
use actline_ai::scripted::ScriptedAI;
use actline_cli::logging::TestLogSubscriber;
use actline_cli::session::play_hand;
use actline_cli::transport::{HandResponse, ScriptedTransport, Transcript, Transport};
use actline_cli::{SessionError, TransportError};
use actline_engine::cards::Card;
use actline_engine::decoder::{decode, decode_with_log, Terminal};
use actline_engine::legality::Commitments;
use actline_engine::player::{Action, Position};
use actline_engine::rules::HandContext;
use tracing::Level;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::Registry;

/// Dealer whose own seat only ever checks or calls.
struct CallingDealer {
    ctx: HandContext,
    client_pos: Position,
    history: String,
    hands: usize,
}

impl CallingDealer {
    fn new(client_pos: Position) -> Self {
        Self {
            ctx: HandContext::default(),
            client_pos,
            history: String::new(),
            hands: 0,
        }
    }

    /// Appends a token, closing the street with a delimiter when it ends one.
    fn push(&mut self, token: &str) -> Result<(), TransportError> {
        let before = decode(&self.history, &self.ctx)
            .map_err(|e| TransportError::Remote(e.to_string()))?;
        self.history.push_str(token);
        let after = decode(&self.history, &self.ctx)
            .map_err(|e| TransportError::Remote(e.to_string()))?;
        if after.terminal.is_none() && after.street > before.street {
            self.history.push('/');
        }
        Ok(())
    }

    fn respond(&mut self) -> Result<HandResponse, TransportError> {
        let state = decode(&self.history, &self.ctx)
            .map_err(|e| TransportError::Remote(e.to_string()))?;
        let mut state = state;
        while state.to_act == Some(self.client_pos.opponent()) {
            self.push(if state.facing_bet() { "c" } else { "k" })?;
            state = decode(&self.history, &self.ctx)
                .map_err(|e| TransportError::Remote(e.to_string()))?;
        }
        let (state, log) = decode_with_log(&self.history, &self.ctx)
            .map_err(|e| TransportError::Remote(e.to_string()))?;
        let winnings = state.terminal.map(|terminal| {
            let c = Commitments::from_log(&log, &self.ctx);
            let folder = log.last().map(|r| r.position);
            match terminal {
                Terminal::Fold if folder == Some(self.client_pos) => {
                    -i64::from(c.total(self.client_pos))
                }
                Terminal::Fold => i64::from(c.total(self.client_pos.opponent())),
                _ => 0,
            }
        });
        Ok(HandResponse {
            action: self.history.clone(),
            client_pos: self.client_pos.index() as i64,
            winnings,
            token: Some(format!("token-{}", self.hands)),
            ..Default::default()
        })
    }
}

impl Transport for CallingDealer {
    fn new_hand(&mut self, _token: Option<&str>) -> Result<HandResponse, TransportError> {
        self.hands += 1;
        self.history.clear();
        self.respond()
    }

    fn act(&mut self, _token: Option<&str>, incr: &str) -> Result<HandResponse, TransportError> {
        self.push(incr)?;
        self.respond()
    }
}

#[test]
fn random_decider_always_sends_legal_tokens() {
    let ctx = HandContext::default();
    let mut token = None;
    for seed in 0..200u64 {
        let pos = if seed % 2 == 0 {
            Position::Button
        } else {
            Position::BigBlind
        };
        let mut dealer = CallingDealer::new(pos);
        let mut ai = RandomAI::new(Some(seed));
        let outcome = play_hand(&mut dealer, &mut ai, &ctx, &mut token)
            .unwrap_or_else(|e| panic!("seed {}: {}", seed, e));
        assert_eq!(outcome.client_pos, pos);
        assert!(outcome.record.terminal.is_some(), "seed {}: {}", seed, outcome.history);
        assert!(decode(&outcome.history, &ctx).unwrap().is_terminal());
        // the dealer never folds
        assert!(!outcome.opponent_folded);
    }
    assert_eq!(token.as_deref(), Some("token-1"));
}

#[test]
fn passive_hands_check_down_to_showdown() {
    let ctx = HandContext::default();
    let mut dealer = CallingDealer::new(Position::Button);
    let outcome = play_hand(&mut dealer, &mut PassiveAI, &ctx, &mut None).unwrap();
    assert_eq!(outcome.history, "ck/kk/kk/kk");
    assert_eq!(outcome.record.terminal, Some(Terminal::Showdown));
    assert_eq!(outcome.winnings, 0);
}

#[test]
fn recorded_transcript_replays_with_scripted_tokens() {
    let line = r#"{"responses":[
        {"old_action":"","action":"","client_pos":1,"hole_cards":["Ac","9d"],"board":[],"token":"t1"},
        {"old_action":"","action":"b200c/k","client_pos":1,"hole_cards":["Ac","9d"],"board":["2c","7h","Kd"]},
        {"old_action":"b200c/k","action":"b200c/kb300b900","client_pos":1,"hole_cards":["Ac","9d"],"board":["2c","7h","Kd"]},
        {"old_action":"b200c/kb300b900","action":"b200c/kb300b900f","client_pos":1,"hole_cards":["Ac","9d"],"board":["2c","7h","Kd"],"winnings":-500,"bot_hole_cards":["Qs","Qd"]}
    ],"sent":["b200","b300","f"]}"#;
    let transcript: Transcript = serde_json::from_str(line).unwrap();
    let mut actions: Vec<Action> = Vec::new();
    for t in &transcript.sent {
        actions.push(t.parse().unwrap());
    }
    let mut ai = actline_ai::scripted::ScriptedAI::new(actions);
    let mut transport = ScriptedTransport::new(&transcript);
    let mut token = None;
    let outcome =
        play_hand(&mut transport, &mut ai, &HandContext::default(), &mut token).unwrap();

    assert_eq!(token.as_deref(), Some("t1"));
    assert_eq!(outcome.winnings, -500);
    assert_eq!(outcome.history, "b200c/kb300b900f");
    assert_eq!(outcome.record.terminal, Some(Terminal::Fold));
    assert!(!outcome.opponent_folded);
    assert_eq!(outcome.record.board.len(), 3);
    assert_eq!(outcome.record.opponent_hole_cards.len(), 2);
    assert_eq!(outcome.record.hole_cards[0].to_string(), "Ac");
}

#[test]
fn decode_failure_is_logged_and_returned() {
    let transcript = Transcript {
        responses: vec![HandResponse {
            action: "b200k".into(),
            ..Default::default()
        }],
        sent: vec![],
    };
    let logs = TestLogSubscriber::new();
    let registry = Registry::default().with(logs.clone().into_layer::<Registry>());

    let result = tracing::subscriber::with_default(registry, || {
        let mut transport = ScriptedTransport::new(&transcript);
        play_hand(&mut transport, &mut PassiveAI, &HandContext::default(), &mut None)
    });

    assert!(matches!(result, Err(SessionError::Decode { .. })));
    let warnings = logs.find(Level::WARN, "undecodable history");
    assert_eq!(warnings.len(), 1);
    assert!(warnings[0]
        .fields
        .iter()
        .any(|(k, v)| k == "history" && v.contains("b200k")));
}

#[test]
fn board_for_another_street_is_flagged() {
    let flop: Vec<Card> = ["2c", "7h", "Ks"].iter().map(|c| c.parse().unwrap()).collect();
    // client in the big blind faces a preflop raise with a flop already dealt
    let transcript = Transcript {
        responses: vec![
            HandResponse {
                action: "b200".into(),
                client_pos: 0,
                board: flop,
                ..Default::default()
            },
            HandResponse {
                action: "b200f".into(),
                winnings: Some(-200),
                ..Default::default()
            },
        ],
        sent: vec!["f".into()],
    };
    let logs = TestLogSubscriber::new();
    let registry = Registry::default().with(logs.clone().into_layer::<Registry>());

    let outcome = tracing::subscriber::with_default(registry, || {
        let mut transport = ScriptedTransport::new(&transcript);
        play_hand(&mut transport, &mut ScriptedAI::new([Action::Fold]), &HandContext::default(), &mut None)
    })
    .unwrap();

    assert_eq!(outcome.winnings, -200);
    assert_eq!(logs.find(Level::WARN, "board does not match").len(), 1);
}
