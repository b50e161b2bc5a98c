//! Action history decoding.
//!
//! A history such as `b200c/kb400c/kk/b1200f` is replayed token by token from
//! the posted blinds. Every call starts from scratch: the remote side always
//! sends the whole cumulative history, so nothing is carried between calls.

use serde::{Deserialize, Serialize};

use crate::errors::DecodeError;
use crate::logger::{ActionRecord, Street};
use crate::player::{read_amount, Action, Position};
use crate::rules::{validate_raise, HandContext};

/// How a finished hand ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Terminal {
    /// One player folded; no showdown
    Fold,
    /// Betting completed through the final street
    Showdown,
    /// An all-in was called before the final street; the board runs out
    /// with no further betting
    AllInRunout,
}

/// Betting state reconstructed from an action history.
///
/// `total_last_bet_to` follows the last aggressor's cumulative commitment,
/// not the next actor's. Callers that need their own running total keep a
/// [`crate::legality::Commitments`] alongside.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct BettingState {
    /// Street index, 0 = preflop
    pub street: u8,
    /// Street total of the last aggressor on the current street
    pub street_last_bet_to: u32,
    /// Hand total of the last aggressor
    pub total_last_bet_to: u32,
    /// Size of the outstanding bet or raise; 0 when nothing is owed
    pub last_bet_size: u32,
    pub last_bettor: Option<Position>,
    /// `None` once the hand is over
    pub to_act: Option<Position>,
    pub terminal: Option<Terminal>,
    /// Number of action tokens replayed
    pub actions: usize,
}

impl BettingState {
    /// The state right after the blinds are posted: the big blind counts as
    /// the opening bet and the button acts first.
    pub fn posted(ctx: &HandContext) -> Self {
        Self {
            street: 0,
            street_last_bet_to: ctx.big_blind,
            total_last_bet_to: ctx.big_blind,
            last_bet_size: ctx.big_blind - ctx.small_blind,
            last_bettor: Some(Position::BigBlind),
            to_act: Some(Position::Button),
            terminal: None,
            actions: 0,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.terminal.is_some()
    }

    pub fn facing_bet(&self) -> bool {
        self.last_bet_size > 0
    }

    pub fn street_name(&self) -> Option<Street> {
        Street::from_index(self.street)
    }
}

/// Replays `history` and returns the resulting betting state.
///
/// # Errors
///
/// Returns the first [`DecodeError`] met while scanning; no partial state is
/// produced.
///
/// # Examples
///
/// ```
/// use actline_engine::decoder::decode;
/// use actline_engine::player::Position;
/// use actline_engine::rules::HandContext;
///
/// let ctx = HandContext::default();
/// let state = decode("b200c/kb400", &ctx).unwrap();
/// assert_eq!(state.street, 1);
/// assert_eq!(state.street_last_bet_to, 400);
/// assert_eq!(state.total_last_bet_to, 600);
/// assert_eq!(state.to_act, Some(Position::BigBlind));
///
/// assert!(decode("k", &ctx).is_err());
/// ```
pub fn decode(history: &str, ctx: &HandContext) -> Result<BettingState, DecodeError> {
    Replay::new(history, ctx).run().map(|(state, _)| state)
}

/// Same as [`decode`], also returning every accepted action in order.
pub fn decode_with_log(
    history: &str,
    ctx: &HandContext,
) -> Result<(BettingState, Vec<ActionRecord>), DecodeError> {
    Replay::new(history, ctx).run()
}

struct Replay<'a> {
    history: &'a str,
    bytes: &'a [u8],
    i: usize,
    ctx: &'a HandContext,
    street: u8,
    street_last_bet_to: u32,
    total_last_bet_to: u32,
    last_bet_size: u32,
    last_bettor: Option<Position>,
    pos: Position,
    terminal: Option<Terminal>,
    // set once the next check or call closes the street
    street_ending: bool,
    log: Vec<ActionRecord>,
}

impl<'a> Replay<'a> {
    fn new(history: &'a str, ctx: &'a HandContext) -> Self {
        let seed = BettingState::posted(ctx);
        Self {
            history,
            bytes: history.as_bytes(),
            i: 0,
            ctx,
            street: seed.street,
            street_last_bet_to: seed.street_last_bet_to,
            total_last_bet_to: seed.total_last_bet_to,
            last_bet_size: seed.last_bet_size,
            last_bettor: seed.last_bettor,
            pos: Position::Button,
            terminal: None,
            street_ending: false,
            log: Vec::new(),
        }
    }

    fn run(mut self) -> Result<(BettingState, Vec<ActionRecord>), DecodeError> {
        while self.i < self.bytes.len() {
            if self.terminal.is_some() {
                return Err(DecodeError::ExtraCharacters { at: self.i });
            }
            if self.street >= self.ctx.num_streets {
                return Err(DecodeError::StreetOverflow {
                    street: self.street,
                    streets: self.ctx.num_streets,
                });
            }
            let at = self.i;
            self.i += 1;
            match self.bytes[at] {
                b'k' => self.check()?,
                b'c' => self.call()?,
                b'f' => self.fold()?,
                b'b' => self.bet()?,
                _ => {
                    return Err(DecodeError::UnexpectedCharacter {
                        ch: self.history[at..].chars().next().unwrap_or('?'),
                        at,
                    })
                }
            }
        }
        Ok(self.finish())
    }

    fn finish(self) -> (BettingState, Vec<ActionRecord>) {
        let state = BettingState {
            street: self.street,
            street_last_bet_to: self.street_last_bet_to,
            total_last_bet_to: self.total_last_bet_to,
            last_bet_size: self.last_bet_size,
            last_bettor: self.last_bettor,
            to_act: match self.terminal {
                Some(_) => None,
                None => Some(self.pos),
            },
            terminal: self.terminal,
            actions: self.log.len(),
        };
        (state, self.log)
    }

    fn record(&mut self, action: Action) {
        // street < num_streets <= 4 is checked before every token
        let street = Street::from_index(self.street).unwrap_or(Street::River);
        self.log.push(ActionRecord {
            position: self.pos,
            street,
            action,
        });
    }

    fn remaining(&self) -> bool {
        self.i < self.bytes.len()
    }

    fn check(&mut self) -> Result<(), DecodeError> {
        if self.last_bet_size > 0 {
            return Err(DecodeError::IllegalCheck {
                outstanding: self.last_bet_size,
            });
        }
        self.record(Action::Check);
        self.close_or_pass()
    }

    fn call(&mut self) -> Result<(), DecodeError> {
        if self.last_bet_size == 0 {
            return Err(DecodeError::IllegalCall);
        }
        self.record(Action::Call);
        if self.total_last_bet_to == self.ctx.stack_size {
            return self.all_in_runout();
        }
        self.close_or_pass()?;
        self.last_bet_size = 0;
        self.last_bettor = None;
        Ok(())
    }

    fn fold(&mut self) -> Result<(), DecodeError> {
        if self.last_bet_size == 0 {
            return Err(DecodeError::IllegalFold);
        }
        if self.remaining() {
            return Err(DecodeError::ExtraCharacters { at: self.i });
        }
        self.record(Action::Fold);
        self.terminal = Some(Terminal::Fold);
        Ok(())
    }

    fn bet(&mut self) -> Result<(), DecodeError> {
        let (target, next) = read_amount(self.history, self.i)?;
        self.i = next;
        let size = i64::from(target) - i64::from(self.street_last_bet_to);
        let behind = self.ctx.stack_size.saturating_sub(self.total_last_bet_to);
        validate_raise(size, self.last_bet_size, behind, self.ctx)?;

        // validate_raise bounds size to 1..=behind
        let size = size as u32;
        self.record(Action::Bet(target));
        self.last_bet_size = size;
        self.street_last_bet_to = target;
        self.total_last_bet_to += size;
        self.last_bettor = Some(self.pos);
        self.pos = self.pos.opponent();
        self.street_ending = true;
        Ok(())
    }

    /// Either hands the action to the opponent or, on the second passive
    /// action of the street, moves to the next street.
    fn close_or_pass(&mut self) -> Result<(), DecodeError> {
        if !self.street_ending {
            self.pos = self.pos.opponent();
            self.street_ending = true;
            return Ok(());
        }
        let last = self.ctx.last_street();
        if self.street < last && self.remaining() {
            if self.bytes[self.i] != b'/' {
                return Err(DecodeError::MissingSlash { at: self.i });
            }
            self.i += 1;
        }
        if self.street == last {
            self.terminal = Some(Terminal::Showdown);
        } else {
            self.pos = Position::BigBlind;
            self.street += 1;
        }
        self.street_last_bet_to = 0;
        self.street_ending = false;
        Ok(())
    }

    /// A call of an all-in bet. Later streets carry no betting, so the rest of
    /// the history is either empty or one slash per street left before the
    /// final one.
    fn all_in_runout(&mut self) -> Result<(), DecodeError> {
        let last = self.ctx.last_street();
        if self.remaining() {
            for _ in self.street..last {
                if !self.remaining() {
                    return Err(DecodeError::MissingSlashAtEnd);
                }
                if self.bytes[self.i] != b'/' {
                    return Err(DecodeError::MissingSlash { at: self.i });
                }
                self.i += 1;
            }
        }
        if self.remaining() {
            return Err(DecodeError::ExtraCharacters { at: self.i });
        }
        self.street = last;
        self.terminal = Some(Terminal::AllInRunout);
        self.last_bet_size = 0;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx() -> HandContext {
        HandContext::default()
    }

    #[test]
    fn empty_history_is_posted_blinds() {
        let s = decode("", &ctx()).unwrap();
        assert_eq!(s, BettingState::posted(&ctx()));
        assert_eq!(s.street_last_bet_to, 100);
        assert_eq!(s.total_last_bet_to, 100);
        assert_eq!(s.last_bet_size, 50);
        assert_eq!(s.last_bettor, Some(Position::BigBlind));
        assert_eq!(s.to_act, Some(Position::Button));
    }

    #[test]
    fn limp_then_check_closes_preflop() {
        let s = decode("c", &ctx()).unwrap();
        assert_eq!(s.last_bet_size, 0);
        assert_eq!(s.last_bettor, None);
        assert_eq!(s.to_act, Some(Position::BigBlind));
        assert_eq!(s.street_last_bet_to, 100);

        let s = decode("ck", &ctx()).unwrap();
        assert_eq!(s.street, 1);
        assert_eq!(s.street_last_bet_to, 0);
        assert_eq!(s.to_act, Some(Position::BigBlind));
    }

    #[test]
    fn trailing_slash_is_optional() {
        assert_eq!(
            decode("ck", &ctx()).unwrap().street,
            decode("ck/", &ctx()).unwrap().street
        );
    }

    #[test]
    fn showdown_after_river_checks() {
        let s = decode("ck/kk/kk/kk", &ctx()).unwrap();
        assert_eq!(s.terminal, Some(Terminal::Showdown));
        assert_eq!(s.to_act, None);
        assert_eq!(s.street, 3);
    }

    #[test]
    fn tokens_after_showdown_are_rejected() {
        assert_eq!(
            decode("ck/kk/kk/kkk", &ctx()),
            Err(DecodeError::ExtraCharacters { at: 11 })
        );
    }

    #[test]
    fn missing_slash_between_streets() {
        assert_eq!(
            decode("ckk", &ctx()),
            Err(DecodeError::MissingSlash { at: 2 })
        );
    }

    #[test]
    fn stray_slash_is_unexpected() {
        assert_eq!(
            decode("c/", &ctx()),
            Err(DecodeError::UnexpectedCharacter { ch: '/', at: 1 })
        );
    }

    #[test]
    fn action_log_tracks_seats_and_streets() {
        let (_, log) = decode_with_log("b200c/kb400", &ctx()).unwrap();
        let seats: Vec<_> = log.iter().map(|r| (r.position, r.street)).collect();
        assert_eq!(
            seats,
            vec![
                (Position::Button, Street::Preflop),
                (Position::BigBlind, Street::Preflop),
                (Position::BigBlind, Street::Flop),
                (Position::Button, Street::Flop),
            ]
        );
        assert_eq!(log[3].action, Action::Bet(400));
    }

    #[test]
    fn short_table_reaches_showdown_sooner() {
        let ctx = HandContext::new(1_000, 5, 10, 2).unwrap();
        let s = decode("ck/kk", &ctx).unwrap();
        assert_eq!(s.terminal, Some(Terminal::Showdown));
        assert_eq!(s.street, 1);
    }
}
