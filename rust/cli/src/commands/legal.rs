//! `legal`: the actions open to one seat.

use crate::error::CliError;
use actline_engine::decoder::decode_with_log;
use actline_engine::legality::{legal_actions, Commitments};
use actline_engine::player::Position;
use std::io::Write;

pub fn handle_legal_command(
    history: &str,
    client_pos: i64,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    let ctx = super::table()?;
    let position = Position::from_index(client_pos)?;
    let (state, log) = decode_with_log(history, &ctx)?;
    let commitments = Commitments::from_log(&log, &ctx);

    writeln!(
        out,
        "Committed: {} {}, {} {}, pot {}",
        Position::BigBlind,
        commitments.total(Position::BigBlind),
        Position::Button,
        commitments.total(Position::Button),
        commitments.pot()
    )?;
    match state.to_act {
        None => writeln!(out, "Legal: none (hand over)")?,
        Some(actor) if actor != position => {
            writeln!(out, "Legal: none ({} to act)", actor)?
        }
        Some(_) => {
            let legal = legal_actions(&state, position, &commitments, &ctx);
            writeln!(out, "Legal: {}", legal)?;
        }
    }
    Ok(())
}
