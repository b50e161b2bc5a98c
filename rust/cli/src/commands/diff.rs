//! `diff`: what the opponent added between two histories.

use crate::error::CliError;
use actline_engine::diff::{opponent_actions, opponent_tokens};
use std::io::Write;

pub fn handle_diff_command(
    prev: &str,
    current: &str,
    last: &str,
    out: &mut dyn Write,
) -> Result<(), CliError> {
    // reject fragments that are not whole tokens
    opponent_actions(prev, current, last)?;
    writeln!(out, "{}", opponent_tokens(prev, current, last))?;
    Ok(())
}
