//! Turning a decision into the wire token to send.

use serde::{Deserialize, Serialize};

use crate::decoder::BettingState;
use crate::legality::{Commitments, LegalActionSet};
use crate::player::Action;
use crate::rules::{min_raise_size, HandContext};

/// What a decision source wants to do, before it is turned into a token.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum Decision {
    Fold,
    /// Check when nothing is owed, call otherwise
    CheckOrCall,
    /// Raise by this fraction of the pot after calling
    BetPot(f64),
    /// Bet or raise to this street total
    BetTo(u32),
}

/// Maps a decision that is not open to the actor onto a legal one.
///
/// Folding with nothing to call becomes a check, and a bet where raising is
/// closed becomes a call. Decisions on an empty set are left alone.
pub fn sanitize(decision: Decision, legal: &LegalActionSet) -> Decision {
    if legal.is_empty() {
        return decision;
    }
    match decision {
        Decision::Fold if !legal.fold => Decision::CheckOrCall,
        Decision::BetPot(_) | Decision::BetTo(_) if legal.bet.is_none() => Decision::CheckOrCall,
        other => other,
    }
}

/// Encodes `decision` for the seat to act in `state`.
///
/// Bet sizes are never rejected: a request below the minimum raise is lifted
/// to it, one above the stack is cut to all-in, and a bet where no raise is
/// possible is sent as a check or call. Pot-fraction raises are lifted to at
/// least twice the street bet. A `BetTo` the decoder would already accept is
/// sent as is. Fold, check and call are passed through unchanged.
///
/// # Examples
///
/// ```
/// use actline_engine::decoder::decode_with_log;
/// use actline_engine::encoder::{encode, Decision};
/// use actline_engine::legality::Commitments;
/// use actline_engine::player::Action;
/// use actline_engine::rules::HandContext;
///
/// let ctx = HandContext::default();
/// let (state, log) = decode_with_log("", &ctx).unwrap();
/// let c = Commitments::from_log(&log, &ctx);
///
/// assert_eq!(encode(Decision::CheckOrCall, &state, &c, &ctx), Action::Call);
/// assert_eq!(encode(Decision::BetPot(1.0), &state, &c, &ctx), Action::Bet(300));
/// assert_eq!(encode(Decision::BetTo(120), &state, &c, &ctx), Action::Bet(200));
/// ```
pub fn encode(
    decision: Decision,
    state: &BettingState,
    commitments: &Commitments,
    ctx: &HandContext,
) -> Action {
    match decision {
        Decision::Fold => Action::Fold,
        Decision::CheckOrCall => passive(state),
        Decision::BetPot(fraction) => {
            let target = pot_fraction_target(fraction, state, commitments);
            clamp_bet(target, false, state, commitments, ctx)
        }
        Decision::BetTo(to) => clamp_bet(to, true, state, commitments, ctx),
    }
}

fn passive(state: &BettingState) -> Action {
    if state.facing_bet() {
        Action::Call
    } else {
        Action::Check
    }
}

/// Street total of a raise worth `fraction` of the pot once the actor has
/// called.
fn pot_fraction_target(fraction: f64, state: &BettingState, commitments: &Commitments) -> u32 {
    let own = state
        .to_act
        .map(|p| commitments.street_amount(p))
        .unwrap_or(0);
    let to_call = state.street_last_bet_to.saturating_sub(own);
    let pot_after_call = f64::from(commitments.pot() + to_call);
    let extra = (fraction.max(0.0) * pot_after_call).round();
    let extra = if extra.is_finite() && extra < f64::from(u32::MAX) {
        extra as u32
    } else {
        u32::MAX
    };
    state.street_last_bet_to.saturating_add(extra)
}

fn clamp_bet(
    requested: u32,
    exact: bool,
    state: &BettingState,
    commitments: &Commitments,
    ctx: &HandContext,
) -> Action {
    let Some(actor) = state.to_act else {
        return passive(state);
    };
    let street_to = state.street_last_bet_to;
    let all_in_to = commitments
        .street_amount(actor)
        .saturating_add(commitments.remaining(actor));
    let behind = ctx.stack_size.saturating_sub(state.total_last_bet_to);
    if behind == 0 || all_in_to <= street_to {
        return passive(state);
    }
    let ceiling = all_in_to.min(street_to.saturating_add(behind));
    let legal_floor = street_to.saturating_add(min_raise_size(state.last_bet_size, behind, ctx));
    if exact && (legal_floor..=ceiling).contains(&requested) {
        return Action::Bet(requested);
    }
    let floor = if street_to > 0 {
        street_to.saturating_mul(2).max(legal_floor)
    } else {
        ctx.big_blind
    };
    Action::Bet(requested.max(floor).min(ceiling))
}
