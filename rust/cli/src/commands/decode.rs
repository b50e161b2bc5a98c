//! `decode`: replay a history and print the resulting state.

use crate::error::CliError;
use actline_engine::decoder::decode_with_log;
use std::io::Write;

/// Prints `{"state": ..., "log": [...]}` as pretty JSON.
///
/// # Errors
///
/// `CliError::Engine` carrying the first decode error in the history.
pub fn handle_decode_command(history: &str, out: &mut dyn Write) -> Result<(), CliError> {
    let ctx = super::table()?;
    let (state, log) = decode_with_log(history, &ctx)?;
    let display = serde_json::json!({
        "history": history,
        "state": state,
        "log": log,
    });
    writeln!(out, "{}", serde_json::to_string_pretty(&display)?)?;
    Ok(())
}
