//! # actline-engine: Heads-Up Action History Core
//!
//! Reconstructs the betting state of a heads-up no-limit hand from the compact
//! action notation used by remote poker bots (`b200c/kk/kb400f`), works out
//! which actions the next player may take, and turns a decision back into a
//! wire token. Everything here is a pure function of its inputs.
//!
//! ## Core Modules
//!
//! - [`decoder`] - History replay, street transitions and terminal detection
//! - [`legality`] - Legal action sets, raise bounds and commitment tracking
//! - [`encoder`] - Decision to wire token, with raise clamping
//! - [`diff`] - Isolating the opponent's newest tokens
//! - [`player`] - Seats, actions and token parsing
//! - [`rules`] - Table context and minimum-raise rules
//! - [`cards`] - Wire card notation
//! - [`logger`] - Streets, action records and JSONL hand records
//! - [`errors`] - Error types
//!
//! ## Quick Start
//!
//! ```rust
//! use actline_engine::decoder::decode_with_log;
//! use actline_engine::encoder::{encode, Decision};
//! use actline_engine::legality::{legal_actions, Commitments};
//! use actline_engine::player::Position;
//! use actline_engine::rules::HandContext;
//!
//! let ctx = HandContext::default();
//! let (state, log) = decode_with_log("b200c/k", &ctx).unwrap();
//! let commitments = Commitments::from_log(&log, &ctx);
//!
//! let legal = legal_actions(&state, Position::Button, &commitments, &ctx);
//! assert!(legal.check && !legal.fold);
//!
//! let token = encode(Decision::BetPot(0.75), &state, &commitments, &ctx);
//! assert_eq!(token.to_string(), "b300");
//! ```

pub mod cards;
pub mod decoder;
pub mod diff;
pub mod encoder;
pub mod errors;
pub mod legality;
pub mod logger;
pub mod player;
pub mod rules;
