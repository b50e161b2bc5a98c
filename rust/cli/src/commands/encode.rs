//! `encode`: the wire token for a decision.

use crate::cli::DecisionKind;
use crate::error::CliError;
use actline_engine::decoder::decode_with_log;
use actline_engine::encoder::{encode, sanitize, Decision};
use actline_engine::legality::{legal_actions, Commitments};
use std::io::Write;

/// Prints the token the seat to act should send.
///
/// Decisions outside the legal set are mapped onto a legal one first and bet
/// sizes are clamped, so any decision on a live hand yields a valid token.
pub fn handle_encode_command(
    history: &str,
    kind: DecisionKind,
    fraction: f64,
    amount: Option<u32>,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let decision = match kind {
        DecisionKind::Fold => Decision::Fold,
        DecisionKind::Call => Decision::CheckOrCall,
        DecisionKind::Pot => {
            if !fraction.is_finite() || fraction < 0.0 {
                return Err(CliError::InvalidInput(format!(
                    "--fraction must be a non-negative number, got {}",
                    fraction
                )));
            }
            Decision::BetPot(fraction)
        }
        DecisionKind::To => Decision::BetTo(amount.ok_or_else(|| {
            CliError::InvalidInput("--amount is required with --decision to".into())
        })?),
    };

    let ctx = super::table()?;
    let (state, log) = decode_with_log(history, &ctx)?;
    let Some(actor) = state.to_act else {
        return Err(CliError::InvalidInput(format!(
            "hand {:?} is already over",
            history
        )));
    };
    let commitments = Commitments::from_log(&log, &ctx);
    let legal = legal_actions(&state, actor, &commitments, &ctx);
    let action = encode(sanitize(decision, &legal), &state, &commitments, &ctx);
    writeln!(out, "{}", action)?;
    Ok(())
}
