//! The seam between the hand loop and whatever serves hands.
//!
//! A live deployment talks to a remote dealer over HTTP; this crate ships a
//! [`ScriptedTransport`] that replays recorded responses so whole sessions
//! can be re-run offline and in tests.

use actline_engine::cards::Card;
use serde::{Deserialize, Serialize};

use crate::error::TransportError;

/// One response body from the dealer.
///
/// `action` is always the full cumulative history. `winnings` is present only
/// once the hand is over.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandResponse {
    #[serde(default)]
    pub old_action: String,
    #[serde(default)]
    pub action: String,
    /// 0 = big blind, 1 = button
    #[serde(default)]
    pub client_pos: i64,
    #[serde(default)]
    pub hole_cards: Vec<Card>,
    #[serde(default)]
    pub board: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winnings: Option<i64>,
    /// Opaque session token; replaces the previous one when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub bot_hole_cards: Vec<Card>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_msg: Option<String>,
}

impl HandResponse {
    /// Turns an `error_msg` body into an error.
    pub fn into_result(self) -> Result<Self, TransportError> {
        match self.error_msg {
            Some(msg) => Err(TransportError::Remote(msg)),
            None => Ok(self),
        }
    }
}

/// Something that deals hands and accepts the client's actions.
pub trait Transport {
    /// Starts a hand. `token` is passed through untouched.
    fn new_hand(&mut self, token: Option<&str>) -> Result<HandResponse, TransportError>;

    /// Sends one wire token (`incr`) for the current hand.
    fn act(&mut self, token: Option<&str>, incr: &str) -> Result<HandResponse, TransportError>;
}

/// A recorded hand: every response the dealer gave and every token the
/// client sent, in order.
///
/// `responses[0]` answers `new_hand`; `responses[i + 1]` answers the `i`-th
/// act. Stored one per line in transcript files.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transcript {
    pub responses: Vec<HandResponse>,
    #[serde(default)]
    pub sent: Vec<String>,
}

/// Replays a [`Transcript`], checking the client stays on the recorded line.
///
/// ```
/// use actline_cli::transport::{HandResponse, ScriptedTransport, Transcript, Transport};
///
/// let transcript = Transcript {
///     responses: vec![
///         HandResponse { action: "b200".into(), ..Default::default() },
///         HandResponse { action: "b200f".into(), winnings: Some(-100), ..Default::default() },
///     ],
///     sent: vec!["f".into()],
/// };
/// let mut t = ScriptedTransport::new(&transcript);
/// assert_eq!(t.new_hand(None).unwrap().action, "b200");
/// assert_eq!(t.act(None, "f").unwrap().winnings, Some(-100));
/// ```
#[derive(Debug)]
pub struct ScriptedTransport<'a> {
    transcript: &'a Transcript,
    next: usize,
    history: String,
}

impl<'a> ScriptedTransport<'a> {
    pub fn new(transcript: &'a Transcript) -> Self {
        Self {
            transcript,
            next: 0,
            history: String::new(),
        }
    }

    fn respond(&mut self) -> Result<HandResponse, TransportError> {
        let response = self
            .transcript
            .responses
            .get(self.next)
            .cloned()
            .ok_or(TransportError::Exhausted)?;
        self.next += 1;
        self.history = response.action.clone();
        response.into_result()
    }
}

impl Transport for ScriptedTransport<'_> {
    fn new_hand(&mut self, _token: Option<&str>) -> Result<HandResponse, TransportError> {
        self.next = 0;
        self.respond()
    }

    fn act(&mut self, _token: Option<&str>, incr: &str) -> Result<HandResponse, TransportError> {
        let recorded = self
            .transcript
            .responses
            .get(self.next)
            .ok_or(TransportError::Exhausted)?;
        let expected = format!("{}{}", self.history, incr);
        let stays_on_line = match recorded.action.strip_prefix(&expected) {
            // "b20" must not match a recorded "b200"
            Some(rest) => !rest.starts_with(|c: char| c.is_ascii_digit()),
            None => false,
        };
        if !stays_on_line {
            return Err(TransportError::Diverged {
                sent: incr.to_string(),
                recorded: recorded.action.clone(),
            });
        }
        self.respond()
    }
}
