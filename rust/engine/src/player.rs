use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::{DecodeError, GameError};

/// A seat in a heads-up hand, numbered the way the wire protocol numbers it.
///
/// The big blind is seat 0: second to act preflop, first on every later
/// street. The button posts the small blind and is seat 1.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Position {
    /// Big blind position (wire index 0)
    BigBlind,
    /// Button position, small blind in heads-up (wire index 1)
    Button,
}

impl Position {
    pub fn index(self) -> usize {
        match self {
            Position::BigBlind => 0,
            Position::Button => 1,
        }
    }

    pub fn from_index(index: i64) -> Result<Self, GameError> {
        match index {
            0 => Ok(Position::BigBlind),
            1 => Ok(Position::Button),
            other => Err(GameError::InvalidPosition(other)),
        }
    }

    pub fn opponent(self) -> Self {
        match self {
            Position::BigBlind => Position::Button,
            Position::Button => Position::BigBlind,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::BigBlind => write!(f, "BB"),
            Position::Button => write!(f, "SB"),
        }
    }
}

/// One betting action as it appears in an action history.
///
/// `Bet` carries the absolute amount the bettor has put in on the current
/// street, not the increment; it covers both opening bets and raises.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum Action {
    Check,
    Call,
    Fold,
    Bet(u32),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Check => write!(f, "k"),
            Action::Call => write!(f, "c"),
            Action::Fold => write!(f, "f"),
            Action::Bet(to) => write!(f, "b{}", to),
        }
    }
}

impl FromStr for Action {
    type Err = DecodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut actions = parse_tokens(s)?;
        match (actions.pop(), actions.is_empty()) {
            (Some(action), true) => Ok(action),
            (Some(_), false) => Err(DecodeError::ExtraCharacters { at: token_len(s) }),
            (None, _) => Err(DecodeError::EmptyToken),
        }
    }
}

fn token_len(s: &str) -> usize {
    let bytes = s.as_bytes();
    match bytes.first() {
        Some(b'b') => 1 + bytes[1..].iter().take_while(|b| b.is_ascii_digit()).count(),
        Some(_) => 1,
        None => 0,
    }
}

/// Splits a history fragment into actions without checking betting legality.
///
/// Street delimiters are skipped. Use [`crate::decoder::decode`] to validate a
/// full history.
///
/// ```
/// use actline_engine::player::{parse_tokens, Action};
///
/// let actions = parse_tokens("b200c/kb400").unwrap();
/// assert_eq!(
///     actions,
///     vec![Action::Bet(200), Action::Call, Action::Check, Action::Bet(400)]
/// );
/// ```
pub fn parse_tokens(fragment: &str) -> Result<Vec<Action>, DecodeError> {
    let bytes = fragment.as_bytes();
    let mut actions = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let at = i;
        let c = bytes[i];
        i += 1;
        match c {
            b'/' => {}
            b'k' => actions.push(Action::Check),
            b'c' => actions.push(Action::Call),
            b'f' => actions.push(Action::Fold),
            b'b' => {
                let (amount, next) = read_amount(fragment, i)?;
                actions.push(Action::Bet(amount));
                i = next;
            }
            _ => {
                return Err(DecodeError::UnexpectedCharacter {
                    ch: fragment[at..].chars().next().unwrap_or('?'),
                    at,
                })
            }
        }
    }
    Ok(actions)
}

/// Reads the digit run starting at `start`, returning the amount and the
/// offset just past it.
pub(crate) fn read_amount(s: &str, start: usize) -> Result<(u32, usize), DecodeError> {
    let digits = s.as_bytes()[start..]
        .iter()
        .take_while(|b| b.is_ascii_digit())
        .count();
    if digits == 0 {
        return Err(DecodeError::MissingBetSize { at: start });
    }
    let end = start + digits;
    let amount = s[start..end]
        .parse::<u32>()
        .map_err(|_| DecodeError::BetSizeNotInteger { at: start })?;
    Ok((amount, end))
}
