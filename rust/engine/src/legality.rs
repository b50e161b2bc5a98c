//! Legal action sets for the next player to act.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::decoder::BettingState;
use crate::logger::{ActionRecord, Street};
use crate::player::{Action, Position};
use crate::rules::{min_raise_size, HandContext};

/// Chips each seat has put into the pot this hand.
///
/// The decoder only reports the last aggressor's running total, so a client
/// keeps one of these per hand and feeds it every action it sees.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct Commitments {
    street: u8,
    /// Amount both seats had committed when the current street began
    base: u32,
    this_street: [u32; 2],
    stack_size: u32,
}

impl Commitments {
    /// Blinds posted, nothing else.
    pub fn posted(ctx: &HandContext) -> Self {
        let mut this_street = [0; 2];
        this_street[Position::BigBlind.index()] = ctx.big_blind;
        this_street[Position::Button.index()] = ctx.small_blind;
        Self {
            street: 0,
            base: 0,
            this_street,
            stack_size: ctx.stack_size,
        }
    }

    /// Rebuilds commitments from a full decoder log.
    pub fn from_log(records: &[ActionRecord], ctx: &HandContext) -> Self {
        let mut c = Self::posted(ctx);
        c.observe(records);
        c
    }

    pub fn observe(&mut self, records: &[ActionRecord]) {
        for r in records {
            self.record(r.street, r.position, r.action);
        }
    }

    pub fn record(&mut self, street: Street, position: Position, action: Action) {
        self.sync_street(street.index());
        let seat = position.index();
        match action {
            Action::Bet(to) => self.this_street[seat] = to,
            Action::Call => {
                let matched = self.this_street[position.opponent().index()];
                let cap = self.stack_size - self.base;
                self.this_street[seat] = matched.min(cap);
            }
            Action::Check | Action::Fold => {}
        }
    }

    /// Rolls the street amounts into the base when a later street starts.
    pub fn sync_street(&mut self, street: u8) {
        while self.street < street {
            self.base += self.this_street[0].max(self.this_street[1]);
            self.this_street = [0; 2];
            self.street += 1;
        }
    }

    pub fn total(&self, position: Position) -> u32 {
        self.base + self.this_street[position.index()]
    }

    pub fn street_amount(&self, position: Position) -> u32 {
        self.this_street[position.index()]
    }

    pub fn max_total(&self) -> u32 {
        self.total(Position::BigBlind)
            .max(self.total(Position::Button))
    }

    pub fn pot(&self) -> u32 {
        self.total(Position::BigBlind) + self.total(Position::Button)
    }

    pub fn remaining(&self, position: Position) -> u32 {
        self.stack_size.saturating_sub(self.total(position))
    }
}

/// Street-total bounds for a bet or raise.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct BetBounds {
    pub min_bet_to: u32,
    pub max_bet_to: u32,
}

impl BetBounds {
    pub fn clamp(&self, to: u32) -> u32 {
        to.clamp(self.min_bet_to, self.max_bet_to)
    }
}

#[derive(Debug, Clone, Copy, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct LegalActionSet {
    pub fold: bool,
    pub check: bool,
    pub call: bool,
    pub bet: Option<BetBounds>,
}

impl LegalActionSet {
    pub fn is_empty(&self) -> bool {
        !self.fold && !self.check && !self.call && self.bet.is_none()
    }

    pub fn contains(&self, action: &Action) -> bool {
        match action {
            Action::Fold => self.fold,
            Action::Check => self.check,
            Action::Call => self.call,
            Action::Bet(to) => self
                .bet
                .is_some_and(|b| (b.min_bet_to..=b.max_bet_to).contains(to)),
        }
    }
}

impl fmt::Display for LegalActionSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts = Vec::new();
        if self.fold {
            parts.push("fold".to_string());
        }
        if self.check {
            parts.push("check".to_string());
        }
        if self.call {
            parts.push("call".to_string());
        }
        if let Some(b) = self.bet {
            parts.push(format!("bet {}..={}", b.min_bet_to, b.max_bet_to));
        }
        write!(f, "{}", parts.join(", "))
    }
}

/// Actions open to `actor` in `state`.
///
/// Empty when the hand is over or it is the other seat's turn. Facing a bet
/// (which includes the button's opening decision against the big blind) the
/// actor may fold, call, or raise; with nothing owed the choice is check or
/// bet. Raising is dropped once either seat's whole stack is already in.
///
/// # Examples
///
/// ```
/// use actline_engine::decoder::decode_with_log;
/// use actline_engine::legality::{legal_actions, Commitments};
/// use actline_engine::player::Position;
/// use actline_engine::rules::HandContext;
///
/// let ctx = HandContext::default();
/// let (state, log) = decode_with_log("", &ctx).unwrap();
/// let commitments = Commitments::from_log(&log, &ctx);
/// let legal = legal_actions(&state, Position::Button, &commitments, &ctx);
/// assert!(legal.fold && legal.call && !legal.check);
/// let bounds = legal.bet.unwrap();
/// assert_eq!((bounds.min_bet_to, bounds.max_bet_to), (200, 20_000));
/// ```
pub fn legal_actions(
    state: &BettingState,
    actor: Position,
    commitments: &Commitments,
    ctx: &HandContext,
) -> LegalActionSet {
    if state.is_terminal() || state.to_act != Some(actor) {
        return LegalActionSet::default();
    }
    let facing = state.facing_bet();
    let all_in = commitments.max_total() >= ctx.stack_size
        || state.total_last_bet_to >= ctx.stack_size;
    LegalActionSet {
        fold: facing,
        check: !facing,
        call: facing,
        bet: if all_in {
            None
        } else {
            bet_bounds(state, actor, commitments, ctx)
        },
    }
}

/// Street-total range for a bet by `actor`, or `None` when no raise fits.
///
/// The floor is the current street total plus the minimum raise increment,
/// and the ceiling is the actor's whole stack; a stack between the two may
/// still go all-in.
pub fn bet_bounds(
    state: &BettingState,
    actor: Position,
    commitments: &Commitments,
    ctx: &HandContext,
) -> Option<BetBounds> {
    let own_street = commitments.street_amount(actor);
    let max_bet_to = own_street + commitments.remaining(actor);
    if max_bet_to <= state.street_last_bet_to {
        return None;
    }
    let behind = max_bet_to - state.street_last_bet_to;
    let min_bet_to = state.street_last_bet_to + min_raise_size(state.last_bet_size, behind, ctx);
    Some(BetBounds {
        min_bet_to,
        max_bet_to,
    })
}
