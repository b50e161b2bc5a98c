//! # actline-ai: Decision Sources
//!
//! The hand loop asks a [`Decider`] what to do whenever the client is to act.
//! Real strategies (a trained agent, a human at a prompt) live outside this
//! workspace; the deciders here exist to drive and test the loop.
//!
//! ## Core Components
//!
//! - [`Decider`] - Trait every decision source implements
//! - [`baseline`] - `random` and `passive` reference deciders
//! - [`scripted`] - Replays recorded client tokens
//! - [`create_ai`] - Factory by name
//!
//! ## Quick Start
//!
//! ```rust
//! use actline_ai::{create_ai, DecisionView};
//! use actline_engine::decoder::decode_with_log;
//! use actline_engine::encoder::Decision;
//! use actline_engine::legality::{legal_actions, Commitments};
//! use actline_engine::player::Position;
//! use actline_engine::rules::HandContext;
//!
//! let ctx = HandContext::default();
//! let (state, log) = decode_with_log("", &ctx).unwrap();
//! let commitments = Commitments::from_log(&log, &ctx);
//! let legal = legal_actions(&state, Position::Button, &commitments, &ctx);
//!
//! let mut ai = create_ai("passive", None).unwrap();
//! let view = DecisionView {
//!     state: &state,
//!     legal: &legal,
//!     commitments: &commitments,
//!     position: Position::Button,
//!     hole_cards: &[],
//!     board: &[],
//! };
//! assert_eq!(ai.decide(&view), Decision::CheckOrCall);
//! ```

use actline_engine::cards::Card;
use actline_engine::decoder::BettingState;
use actline_engine::encoder::Decision;
use actline_engine::legality::{Commitments, LegalActionSet};
use actline_engine::player::{Action, Position};

pub mod baseline;
pub mod scripted;

/// Everything a decider may look at when it is the client's turn.
#[derive(Debug, Clone, Copy)]
pub struct DecisionView<'a> {
    pub state: &'a BettingState,
    pub legal: &'a LegalActionSet,
    pub commitments: &'a Commitments,
    /// Seat the client plays this hand
    pub position: Position,
    pub hole_cards: &'a [Card],
    pub board: &'a [Card],
}

/// Interface for decision sources.
///
/// A decider returns a [`Decision`], not a wire token; sizes are clamped by
/// the encoder afterwards, so a decider may ask for any amount.
///
/// # Example Implementation
///
/// ```rust
/// use actline_ai::{Decider, DecisionView};
/// use actline_engine::encoder::Decision;
///
/// struct PotBettor;
///
/// impl Decider for PotBettor {
///     fn decide(&mut self, view: &DecisionView<'_>) -> Decision {
///         if view.legal.bet.is_some() {
///             Decision::BetPot(1.0)
///         } else {
///             Decision::CheckOrCall
///         }
///     }
///
///     fn name(&self) -> &str {
///         "PotBettor"
///     }
/// }
/// ```
pub trait Decider: Send {
    /// Chooses the client's next move.
    fn decide(&mut self, view: &DecisionView<'_>) -> Decision;

    /// Called at the start of every hand with the client's seat.
    fn new_hand(&mut self, _position: Position) {}

    /// Called with the opponent's actions observed since the client last acted.
    fn observe_opponent(&mut self, _actions: &[Action]) {}

    fn name(&self) -> &str;
}

/// Creates a decider by type string.
///
/// # Supported AI Types
///
/// - `"random"` - Uniform over the legal action kinds, seeded
/// - `"passive"` - Always checks or calls
///
/// Returns `None` for unknown names. Scripted deciders are built from a
/// recording with [`scripted::ScriptedAI::new`] instead.
///
/// ```rust
/// use actline_ai::create_ai;
///
/// assert_eq!(create_ai("random", Some(7)).unwrap().name(), "RandomAI");
/// assert!(create_ai("deepcfr", None).is_none());
/// ```
pub fn create_ai(ai_type: &str, seed: Option<u64>) -> Option<Box<dyn Decider>> {
    match ai_type {
        "random" => Some(Box::new(baseline::RandomAI::new(seed))),
        "passive" => Some(Box::new(baseline::PassiveAI)),
        _ => None,
    }
}

/// Names accepted by [`create_ai`].
pub const AI_TYPES: &[&str] = &["random", "passive"];
